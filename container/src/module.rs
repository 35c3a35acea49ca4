//! Composition roots that register a group of dependencies at once.

use crate::container::Container;
use crate::error::{InstallError, OverrideError, RegisterError};

/// A unit of application setup.
///
/// `register` declares the dependencies. `override_dependencies` runs right
/// after it and is the place for tests to swap implementations before the
/// container is bootstrapped.
pub trait Module {
  fn register(&self, container: &Container) -> Result<(), RegisterError>;

  fn override_dependencies(&self, _container: &Container) -> Result<(), OverrideError> {
    Ok(())
  }
}

impl Container {
  /// Runs `module`'s registration followed by its overrides.
  pub fn install<M: Module + ?Sized>(&self, module: &M) -> Result<(), InstallError> {
    module.register(self)?;
    module.override_dependencies(self)?;
    Ok(())
  }
}
