use fibre_container::{Activation, Container};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};

// A simple service that gets a unique ID upon creation.
struct RequestTracker {
  id: usize,
}

// A global, thread-safe counter to generate unique IDs.
static ID_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn new_tracker(kind: &str) -> RequestTracker {
  let id = ID_COUNTER.fetch_add(1, Ordering::SeqCst);
  println!("Creating {} RequestTracker #{}...", kind, id);
  RequestTracker { id }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
  let container = Container::new();

  // --- Eager Registration ---
  // Built while bootstrapping, before anybody asks for it.
  container.register_fn(["eager_tracker"], Activation::Eager, || new_tracker("EAGER"))?;

  // --- Lazy Registration ---
  // Built the first time it is resolved.
  container.register_fn(["lazy_tracker"], Activation::Lazy, || new_tracker("LAZY"))?;

  println!("--- Bootstrapping ---");
  container.bootstrap()?;
  assert_eq!(ID_COUNTER.load(Ordering::SeqCst), 1);

  println!("--- Resolving ---");
  let e1 = container.resolve_key::<RequestTracker>("eager_tracker")?;
  let l1 = container.resolve_key::<RequestTracker>("lazy_tracker")?;
  let l2 = container.resolve_key::<RequestTracker>("lazy_tracker")?;
  println!("Eager ID: {}, Lazy IDs: {} and {}", e1.id, l1.id, l2.id);

  assert_eq!(e1.id, 0);
  assert_eq!(l1.id, 1);
  assert!(Arc::ptr_eq(&l1, &l2), "Singleton instances should be identical");
  println!("Lazy instances are the same pointer, as expected.");
  Ok(())
}
