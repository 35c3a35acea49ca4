use fibre_container::{
  Activation, Container, InstallError, Key, Module, OverrideError, RegisterError,
};
use std::sync::Arc;

trait Analytics: Send + Sync {
  fn name(&self) -> &'static str;
}

struct RemoteAnalytics;
impl Analytics for RemoteAnalytics {
  fn name(&self) -> &'static str {
    "remote"
  }
}

struct NoopAnalytics;
impl Analytics for NoopAnalytics {
  fn name(&self) -> &'static str {
    "noop"
  }
}

struct AppModule;

impl Module for AppModule {
  fn register(&self, container: &Container) -> Result<(), RegisterError> {
    container.register_trait([Key::of::<dyn Analytics>()], Activation::Eager, |_| {
      Ok::<_, RegisterError>(Arc::new(RemoteAnalytics) as Arc<dyn Analytics>)
    })
  }
}

// The same setup with the analytics backend swapped out.
struct TestModule;

impl Module for TestModule {
  fn register(&self, container: &Container) -> Result<(), RegisterError> {
    AppModule.register(container)
  }

  fn override_dependencies(&self, container: &Container) -> Result<(), OverrideError> {
    container.override_trait(Key::of::<dyn Analytics>(), |_| {
      Ok::<_, OverrideError>(Arc::new(NoopAnalytics) as Arc<dyn Analytics>)
    })
  }
}

#[test]
fn test_install_registers_module() {
  // Arrange
  let container = Container::new();

  // Act
  container.install(&AppModule).unwrap();
  container.bootstrap().unwrap();

  // Assert
  assert!(container.is_resolved(Key::of::<dyn Analytics>()));
  assert_eq!(container.resolve::<dyn Analytics>().unwrap().name(), "remote");
}

#[test]
fn test_install_applies_overrides_after_registration() {
  // Arrange
  let container = Container::new();

  // Act
  container.install(&TestModule).unwrap();
  container.bootstrap().unwrap();

  // Assert: the override keeps the registration eager.
  assert!(container.is_resolved(Key::of::<dyn Analytics>()));
  assert_eq!(container.resolve::<dyn Analytics>().unwrap().name(), "noop");
}

#[test]
fn test_install_after_bootstrap_fails() {
  // Arrange
  let container = Container::new();
  container.bootstrap().unwrap();

  // Act
  let result = container.install(&AppModule);

  // Assert
  assert!(matches!(
    result,
    Err(InstallError::Register(RegisterError::AlreadyBootstrapped { .. }))
  ));
}
