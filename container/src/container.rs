//! The main `Container` struct and its associated methods.

use crate::cell::{Constructor, Erased, LazyCell};
use crate::error::{BoxError, OverrideError, RegisterError, ResolveError};
use crate::guard::ResolutionGuard;
use crate::key::Key;
use dashmap::{DashMap, DashSet};
use parking_lot::RwLock;
use std::any::{type_name, Any};
use std::convert::Infallible;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// When a registration is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Activation {
  /// Constructed on first resolution.
  #[default]
  Lazy,
  /// Constructed by [`Container::bootstrap`].
  Eager,
}

/// Behavioural switches for a [`Container`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerConfig {
  /// Let the first resolution bootstrap an open container that has no eager
  /// registrations. When disabled, [`Container::bootstrap`] is always required.
  pub auto_bootstrap: bool,
}

impl Default for ContainerConfig {
  fn default() -> Self {
    Self {
      auto_bootstrap: true,
    }
  }
}

/// The dependency container.
///
/// Registrations are accepted while the container is open. [`bootstrap`](Self::bootstrap)
/// closes the registration surface and constructs every eager registration;
/// resolution stays available afterwards. Every registration is a singleton: its
/// constructor runs at most once and all keys aliasing it share the instance.
///
/// The container is thread-safe. No internal lock is held while a constructor
/// runs, so constructors may resolve their own dependencies from the container
/// they receive.
#[derive(Default)]
pub struct Container {
  registrations: DashMap<Key, Arc<LazyCell>>,
  aliases: DashMap<Key, Key>,
  eager_keys: DashSet<Key>,
  bootstrapped: RwLock<bool>,
  config: ContainerConfig,
}

impl Container {
  /// Creates a new, empty and open `Container`.
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_config(config: ContainerConfig) -> Self {
    Self {
      config,
      ..Self::default()
    }
  }

  // --- PRIVATE HELPERS ---

  fn id(&self) -> usize {
    self as *const Self as usize
  }

  fn insert_cell(
    &self,
    keys: impl IntoIterator<Item = impl Into<Key>>,
    activation: Activation,
    cell: LazyCell,
  ) -> Result<(), RegisterError> {
    let mut unique: Vec<Key> = Vec::new();
    for key in keys {
      let key = key.into();
      if !unique.contains(&key) {
        unique.push(key);
      }
    }
    let Some((primary, aliases)) = unique.split_first() else {
      return Err(RegisterError::MissingKey);
    };

    // Held for the whole insertion so bootstrap cannot slip in between.
    let bootstrapped = self.bootstrapped.read();
    if *bootstrapped {
      let keys = unique.iter().map(Key::raw).collect::<Vec<_>>().join(",");
      return Err(RegisterError::AlreadyBootstrapped { keys });
    }

    self.aliases.remove(primary);
    self.registrations.insert(primary.clone(), Arc::new(cell));

    for alias in aliases {
      self.registrations.remove(alias);
      self.eager_keys.remove(alias);
      self.aliases.insert(alias.clone(), primary.clone());
    }

    match activation {
      Activation::Eager => {
        self.eager_keys.insert(primary.clone());
      }
      Activation::Lazy => {
        self.eager_keys.remove(primary);
      }
    }

    debug!(key = %primary, aliases = aliases.len(), ?activation, "registered dependency");
    Ok(())
  }

  /// Follows the alias chain starting at `key` to the key owning a registration.
  fn root_of(&self, key: &Key) -> Option<Key> {
    let mut current = key.clone();
    // Any chain longer than the alias table must revisit a key.
    for _ in 0..=self.aliases.len() {
      if self.registrations.contains_key(&current) {
        return Some(current);
      }
      match self.aliases.get(&current).map(|next| next.value().clone()) {
        Some(next) => current = next,
        None => return Some(current),
      }
    }
    None
  }

  fn ensure_bootstrapped(&self) -> Result<(), ResolveError> {
    if *self.bootstrapped.read() {
      return Ok(());
    }

    let mut bootstrapped = self.bootstrapped.write();
    if *bootstrapped {
      return Ok(());
    }
    if self.config.auto_bootstrap && self.eager_keys.is_empty() {
      *bootstrapped = true;
      debug!("no eager dependencies, bootstrapped on first resolution");
      return Ok(());
    }
    Err(ResolveError::NotBootstrapped)
  }

  /// Runs (or reuses) the construction behind `root`, reporting failures against `requested`.
  fn construct(&self, requested: &Key, root: &Key) -> Result<(Arc<LazyCell>, Erased), ResolveError> {
    let cell = self
      .registrations
      .get(root)
      .map(|entry| Arc::clone(entry.value()))
      .ok_or_else(|| ResolveError::NotRegistered(requested.clone()))?;

    if cell.is_resolved() {
      trace!(key = %requested, "resolved cached dependency");
    } else {
      trace!(key = %requested, "constructing dependency");
    }

    let _guard = ResolutionGuard::enter(self.id(), root)?;
    let value = cell.resolve(self).map_err(|source| {
      warn!(key = %requested, error = %source, "dependency constructor failed");
      ResolveError::Unknown {
        key: requested.clone(),
        source,
      }
    })?;
    Ok((cell, value))
  }

  fn replace_cell(&self, key: Key, cell: LazyCell) -> Result<(), OverrideError> {
    let root = self
      .root_of(&key)
      .ok_or_else(|| OverrideError::NotRegistered(key.clone()))?;

    let previous = match self.registrations.get_mut(&root) {
      Some(mut entry) => std::mem::replace(entry.value_mut(), Arc::new(cell)),
      None => return Err(OverrideError::NotRegistered(key)),
    };
    // The old value may run arbitrary `Drop` code; release the shard first.
    drop(previous);

    debug!(key = %key, root = %root, "overrode dependency");
    Ok(())
  }

  fn erase<I, E, F>(constructor: F) -> Constructor
  where
    I: ?Sized + Any + Send + Sync,
    E: Into<BoxError>,
    F: Fn(&Container) -> Result<Arc<I>, E> + Send + Sync + 'static,
  {
    Box::new(move |container: &Container| -> Result<Erased, BoxError> {
      constructor(container)
        .map(|value| Arc::new(value) as Erased)
        .map_err(Into::into)
    })
  }

  // --- PUBLIC API ---

  // --- Registration ---

  /// Registers a constructor under one or more keys.
  ///
  /// The first key owns the registration; every other key becomes an alias of it.
  /// Registering an already known key replaces its registration, discarding any
  /// memoized value.
  ///
  /// # Errors
  ///
  /// [`RegisterError::MissingKey`] when `keys` is empty and
  /// [`RegisterError::AlreadyBootstrapped`] once the container is bootstrapped.
  pub fn register<T, E, F>(
    &self,
    keys: impl IntoIterator<Item = impl Into<Key>>,
    activation: Activation,
    constructor: F,
  ) -> Result<(), RegisterError>
  where
    T: Any + Send + Sync,
    E: Into<BoxError>,
    F: Fn(&Container) -> Result<T, E> + Send + Sync + 'static,
  {
    self.register_trait::<T, E, _>(keys, activation, move |container| {
      constructor(container).map(Arc::new)
    })
  }

  /// Registers a constructor that does not need the container.
  pub fn register_fn<T: Any + Send + Sync>(
    &self,
    keys: impl IntoIterator<Item = impl Into<Key>>,
    activation: Activation,
    constructor: impl Fn() -> T + Send + Sync + 'static,
  ) -> Result<(), RegisterError> {
    self.register(keys, activation, move |_| Ok::<_, Infallible>(constructor()))
  }

  /// Registers a constructor under the key derived from `T`.
  pub fn register_type<T, E, F>(&self, activation: Activation, constructor: F) -> Result<(), RegisterError>
  where
    T: Any + Send + Sync,
    E: Into<BoxError>,
    F: Fn(&Container) -> Result<T, E> + Send + Sync + 'static,
  {
    self.register([Key::of::<T>()], activation, constructor)
  }

  /// Registers a constructor producing a shared, possibly unsized, value such as
  /// `Arc<dyn Trait>`. Resolve it with `resolve_key::<dyn Trait>`.
  pub fn register_trait<I, E, F>(
    &self,
    keys: impl IntoIterator<Item = impl Into<Key>>,
    activation: Activation,
    constructor: F,
  ) -> Result<(), RegisterError>
  where
    I: ?Sized + Any + Send + Sync,
    E: Into<BoxError>,
    F: Fn(&Container) -> Result<Arc<I>, E> + Send + Sync + 'static,
  {
    let cell = LazyCell::new(type_name::<I>(), Self::erase(constructor));
    self.insert_cell(keys, activation, cell)
  }

  /// Registers a value that already exists. It counts as resolved immediately.
  pub fn register_instance<T: Any + Send + Sync>(
    &self,
    keys: impl IntoIterator<Item = impl Into<Key>>,
    instance: T,
  ) -> Result<(), RegisterError> {
    let value: Erased = Arc::new(Arc::new(instance));
    let cell = LazyCell::resolved(type_name::<T>(), value);
    self.insert_cell(keys, Activation::Lazy, cell)
  }

  /// Makes `alias` resolve to the registration behind `source`.
  ///
  /// `source` is followed to its root first, so the new alias is always a single hop.
  ///
  /// # Errors
  ///
  /// [`RegisterError::AliasAlreadyTaken`] when `alias` is already an alias or owns a
  /// registration and `override_existing` is false; [`RegisterError::AliasCycle`]
  /// when `source` leads back to `alias`.
  pub fn register_alias(
    &self,
    alias: impl Into<Key>,
    source: impl Into<Key>,
    override_existing: bool,
  ) -> Result<(), RegisterError> {
    let alias = alias.into();
    let source = source.into();

    let taken = self.aliases.contains_key(&alias) || self.registrations.contains_key(&alias);
    if taken && !override_existing {
      return Err(RegisterError::AliasAlreadyTaken(alias));
    }

    let root = self
      .root_of(&source)
      .ok_or_else(|| RegisterError::AliasCycle(alias.clone()))?;
    if root == alias {
      return Err(RegisterError::AliasCycle(alias));
    }

    if self.registrations.remove(&alias).is_some() {
      self.eager_keys.remove(&alias);
    }
    debug!(alias = %alias, root = %root, "registered alias");
    self.aliases.insert(alias, root);
    Ok(())
  }

  /// Makes the key of `A` resolve to the registration of `T`.
  pub fn alias<A, T>(&self, override_existing: bool) -> Result<(), RegisterError>
  where
    A: ?Sized + Any,
    T: ?Sized + Any,
  {
    self.register_alias(Key::of::<A>(), Key::of::<T>(), override_existing)
  }

  // --- Bootstrap ---

  /// Closes registration and constructs every eager registration.
  ///
  /// The container counts as bootstrapped even when an eager constructor fails;
  /// the failing registration stays unresolved and is retried on next resolution.
  pub fn bootstrap(&self) -> Result<(), ResolveError> {
    *self.bootstrapped.write() = true;

    let eager: Vec<Key> = self.eager_keys.iter().map(|key| key.key().clone()).collect();
    debug!(eager = eager.len(), "bootstrapping container");

    for key in &eager {
      if self.registrations.contains_key(key) {
        self.construct(key, key)?;
      }
    }
    Ok(())
  }

  pub fn is_bootstrapped(&self) -> bool {
    *self.bootstrapped.read()
  }

  // --- Resolution ---

  /// Resolves the dependency registered under the key derived from `T`.
  pub fn resolve<T: ?Sized + Any + Send + Sync>(&self) -> Result<Arc<T>, ResolveError> {
    self.resolve_key(Key::of::<T>())
  }

  /// Resolves the dependency registered under `key`.
  ///
  /// # Errors
  ///
  /// - [`ResolveError::NotBootstrapped`] if eager registrations are pending.
  /// - [`ResolveError::NoDependenciesRegistered`] if nothing is registered at all.
  /// - [`ResolveError::NotRegistered`] if `key` is unknown.
  /// - [`ResolveError::Unknown`] if the constructor failed; the cause is kept as source.
  /// - [`ResolveError::TypeMismatch`] if the registered value is not a `T`.
  pub fn resolve_key<T: ?Sized + Any + Send + Sync>(&self, key: impl Into<Key>) -> Result<Arc<T>, ResolveError> {
    let key = key.into();
    self.ensure_bootstrapped()?;

    if self.registrations.is_empty() {
      return Err(ResolveError::NoDependenciesRegistered);
    }

    let root = self
      .root_of(&key)
      .ok_or_else(|| ResolveError::AliasCycle(key.clone()))?;
    let (cell, value) = self.construct(&key, &root)?;

    value
      .downcast_ref::<Arc<T>>()
      .cloned()
      .ok_or_else(|| ResolveError::TypeMismatch {
        expected: type_name::<T>(),
        actual: cell.type_name(),
      })
  }

  // --- Override ---

  /// Replaces the registration behind `key` with a fresh, unresolved one.
  ///
  /// Works before and after bootstrap and keeps the key's activation. Aliases of
  /// `key` see the replacement too.
  ///
  /// # Errors
  ///
  /// [`OverrideError::NotRegistered`] if nothing is registered under `key`.
  pub fn override_with<T, E, F>(&self, key: impl Into<Key>, constructor: F) -> Result<(), OverrideError>
  where
    T: Any + Send + Sync,
    E: Into<BoxError>,
    F: Fn(&Container) -> Result<T, E> + Send + Sync + 'static,
  {
    self.override_trait::<T, E, _>(key, move |container| constructor(container).map(Arc::new))
  }

  pub fn override_fn<T: Any + Send + Sync>(
    &self,
    key: impl Into<Key>,
    constructor: impl Fn() -> T + Send + Sync + 'static,
  ) -> Result<(), OverrideError> {
    self.override_with(key, move |_| Ok::<_, Infallible>(constructor()))
  }

  /// Replaces the registration behind the key derived from `R`.
  pub fn override_type<R, T, E, F>(&self, constructor: F) -> Result<(), OverrideError>
  where
    R: ?Sized + Any,
    T: Any + Send + Sync,
    E: Into<BoxError>,
    F: Fn(&Container) -> Result<T, E> + Send + Sync + 'static,
  {
    self.override_with(Key::of::<R>(), constructor)
  }

  pub fn override_trait<I, E, F>(&self, key: impl Into<Key>, constructor: F) -> Result<(), OverrideError>
  where
    I: ?Sized + Any + Send + Sync,
    E: Into<BoxError>,
    F: Fn(&Container) -> Result<Arc<I>, E> + Send + Sync + 'static,
  {
    let cell = LazyCell::new(type_name::<I>(), Self::erase(constructor));
    self.replace_cell(key.into(), cell)
  }

  // --- Removal & introspection ---

  /// Removes the registration or alias stored under `key`.
  ///
  /// Returns whether anything was removed. Aliases pointing at a removed
  /// registration are left dangling and fail with `NotRegistered`.
  pub fn remove(&self, key: impl Into<Key>) -> bool {
    let key = key.into();
    let removed = if self.registrations.remove(&key).is_some() {
      self.eager_keys.remove(&key);
      true
    } else {
      self.aliases.remove(&key).is_some()
    };
    if removed {
      debug!(key = %key, "removed dependency");
    }
    removed
  }

  /// Whether `key`, directly or through aliases, reaches a registration.
  pub fn is_registered(&self, key: impl Into<Key>) -> bool {
    self
      .root_of(&key.into())
      .is_some_and(|root| self.registrations.contains_key(&root))
  }

  /// Whether the registration reached by `key` has been constructed.
  pub fn is_resolved(&self, key: impl Into<Key>) -> bool {
    self
      .root_of(&key.into())
      .and_then(|root| self.registrations.get(&root).map(|cell| cell.is_resolved()))
      .unwrap_or(false)
  }

  /// Number of registrations, not counting aliases.
  pub fn len(&self) -> usize {
    self.registrations.len()
  }

  pub fn is_empty(&self) -> bool {
    self.registrations.is_empty()
  }
}
