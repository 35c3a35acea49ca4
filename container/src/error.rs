use crate::key::Key;
use thiserror::Error;

/// The error type carried by failing constructors.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failures while adding registrations or aliases.
#[derive(Debug, Error)]
pub enum RegisterError {
  #[error("no key was supplied for the registration")]
  MissingKey,

  #[error("alias '{0}' is already taken")]
  AliasAlreadyTaken(Key),

  #[error("alias '{0}' would resolve to itself")]
  AliasCycle(Key),

  #[error("container is already bootstrapped, cannot register: {keys}")]
  AlreadyBootstrapped { keys: String },
}

/// Failures while resolving a dependency.
#[derive(Debug, Error)]
pub enum ResolveError {
  #[error("container has eager registrations and must be bootstrapped before resolving")]
  NotBootstrapped,

  #[error("no dependencies are registered")]
  NoDependenciesRegistered,

  #[error("no dependency registered for '{0}'")]
  NotRegistered(Key),

  #[error("type mismatch: requested {expected}, registered {actual}")]
  TypeMismatch {
    expected: &'static str,
    actual: &'static str,
  },

  #[error("circular dependency detected while resolving '{0}'")]
  CircularDependency(Key),

  #[error("alias chain for '{0}' loops back on itself")]
  AliasCycle(Key),

  #[error("failed to construct '{key}': {source}")]
  Unknown {
    key: Key,
    #[source]
    source: BoxError,
  },
}

/// Failures while replacing an existing registration.
#[derive(Debug, Error)]
pub enum OverrideError {
  #[error("cannot override '{0}': nothing is registered under that key")]
  NotRegistered(Key),
}

/// Failures while installing a [`Module`](crate::Module).
#[derive(Debug, Error)]
pub enum InstallError {
  #[error(transparent)]
  Register(#[from] RegisterError),

  #[error(transparent)]
  Override(#[from] OverrideError),
}

/// A specialized `Result` type for resolution.
pub type Result<T, E = ResolveError> = std::result::Result<T, E>;
