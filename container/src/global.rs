//! The process-wide default container.

use crate::container::Container;
use once_cell::sync::Lazy;

// Created on first access in a thread-safe manner.
static GLOBAL_CONTAINER: Lazy<Container> = Lazy::new(Container::default);

/// Provides a reference to the global container instance.
///
/// Applications that prefer an explicit composition root should construct their
/// own [`Container`] instead; this instance only exists with the `global` feature.
///
/// # Examples
///
/// ```
/// use fibre_container::{global, Activation};
///
/// global()
///   .register_fn(["greeting"], Activation::Lazy, || String::from("Hello from global!"))
///   .unwrap();
/// ```
pub fn global() -> &'static Container {
  &GLOBAL_CONTAINER
}
