use fibre_container::{resolve_in, Activation, Container, ResolveError};
use std::panic;

struct RegisteredService;
struct UnregisteredService;

fn main() {
  let container = Container::new();

  // --- An empty container ---
  match container.resolve::<UnregisteredService>() {
    Err(ResolveError::NoDependenciesRegistered) => println!("Nothing is registered yet."),
    _ => panic!("expected NoDependenciesRegistered"),
  }

  let container = Container::new();
  container
    .register_fn(["registered"], Activation::Lazy, || RegisteredService)
    .unwrap();

  // --- Using the fallible `resolve()` method ---
  match container.resolve::<UnregisteredService>() {
    Err(error @ ResolveError::NotRegistered(_)) => println!("Correctly failed: {}", error),
    _ => panic!("Should not have found the service!"),
  }

  // --- Using the panicking `resolve_in!` macro ---
  println!("Attempting to resolve a service that was never registered...");
  let result = panic::catch_unwind(panic::AssertUnwindSafe(|| {
    let _service = resolve_in!(container, UnregisteredService);
  }));

  assert!(result.is_err(), "resolve_in! should have panicked.");
  println!("Successfully caught the expected panic from resolve_in!.");
}
