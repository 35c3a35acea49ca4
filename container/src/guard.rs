//! Re-entrancy detection for constructors.

use crate::error::ResolveError;
use crate::key::Key;
use std::cell::RefCell;
use std::collections::HashSet;

thread_local! {
  // Keys whose constructors are running on this thread, tagged with the owning container.
  static RESOLVING: RefCell<HashSet<(usize, Key)>> = RefCell::new(HashSet::new());
}

/// An RAII guard marking a key as under construction on the current thread.
///
/// Entering a key that is already marked means a constructor asked for its own
/// product, directly or through other dependencies.
pub(crate) struct ResolutionGuard {
  entry: (usize, Key),
}

impl ResolutionGuard {
  pub(crate) fn enter(container: usize, key: &Key) -> Result<Self, ResolveError> {
    let entry = (container, key.clone());
    let inserted = RESOLVING.with(|stack| stack.borrow_mut().insert(entry.clone()));
    if !inserted {
      return Err(ResolveError::CircularDependency(key.clone()));
    }
    Ok(Self { entry })
  }
}

impl Drop for ResolutionGuard {
  fn drop(&mut self) {
    RESOLVING.with(|stack| {
      stack.borrow_mut().remove(&self.entry);
    });
  }
}
