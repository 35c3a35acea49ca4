//! The memoizing wrapper that backs every registration.

use crate::container::Container;
use crate::error::BoxError;
use once_cell::sync::OnceCell;
use std::any::Any;
use std::sync::Arc;

/// A type-erased shared value. The concrete payload is always an `Arc<T>`.
pub(crate) type Erased = Arc<dyn Any + Send + Sync>;

pub(crate) type Constructor = Box<dyn Fn(&Container) -> Result<Erased, BoxError> + Send + Sync>;

/// A deferred, memoized construction.
///
/// The constructor runs at most once per cell. A failed construction leaves the
/// cell empty, so the next resolution starts from scratch.
pub(crate) struct LazyCell {
  value: OnceCell<Erased>,
  constructor: Constructor,
  type_name: &'static str,
}

impl LazyCell {
  pub(crate) fn new(type_name: &'static str, constructor: Constructor) -> Self {
    Self {
      value: OnceCell::new(),
      constructor,
      type_name,
    }
  }

  /// A cell whose value is already known. Its constructor is kept so that the
  /// cell behaves like any other registration.
  pub(crate) fn resolved(type_name: &'static str, value: Erased) -> Self {
    let shared = Arc::clone(&value);
    Self {
      value: OnceCell::with_value(value),
      constructor: Box::new(move |_: &Container| Ok::<_, BoxError>(Arc::clone(&shared))),
      type_name,
    }
  }

  pub(crate) fn is_resolved(&self) -> bool {
    self.value.get().is_some()
  }

  /// Name of the type this cell produces, used for mismatch diagnostics.
  pub(crate) fn type_name(&self) -> &'static str {
    self.type_name
  }

  pub(crate) fn resolve(&self, container: &Container) -> Result<Erased, BoxError> {
    self
      .value
      .get_or_try_init(|| (self.constructor)(container))
      .map(Arc::clone)
  }
}
