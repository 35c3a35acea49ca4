use fibre_container::{Activation, Container, Module, OverrideError, RegisterError};

struct Greeting(String);

struct AppModule;

impl Module for AppModule {
  fn register(&self, container: &Container) -> Result<(), RegisterError> {
    container.register_fn(["greeting"], Activation::Eager, || Greeting("Hello, World!".into()))
  }
}

// Reuses the application setup and swaps one dependency, as a test would.
struct TestModule;

impl Module for TestModule {
  fn register(&self, container: &Container) -> Result<(), RegisterError> {
    AppModule.register(container)
  }

  fn override_dependencies(&self, container: &Container) -> Result<(), OverrideError> {
    container.override_fn("greeting", || Greeting("Hello, Test!".into()))
  }
}

// By accepting a `&Container`, the logic can run against any setup.
fn greet(container: &Container) -> String {
  match container.resolve_key::<Greeting>("greeting") {
    Ok(greeting) => greeting.0.clone(),
    Err(error) => format!("no greeting: {}", error),
  }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
  let app = Container::new();
  app.install(&AppModule)?;
  app.bootstrap()?;

  let test = Container::new();
  test.install(&TestModule)?;
  test.bootstrap()?;

  println!("App:  {}", greet(&app));
  println!("Test: {}", greet(&test));
  assert_eq!(greet(&app), "Hello, World!");
  assert_eq!(greet(&test), "Hello, Test!");
  Ok(())
}
