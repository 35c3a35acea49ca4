//! # Fibre Container
//!
//! A keyed, bootstrap-aware dependency container for Rust.
//!
//! Constructors are registered under one or more [`Key`]s and produce shared
//! singletons. Each constructor receives the container so it can resolve its own
//! dependencies, and it runs at most once no matter how many keys alias it.
//!
//! ## Core Concepts
//!
//! - **Container**: owns the registrations, the eager set and the bootstrap flag.
//! - **Key**: a label plus a hash identity, derived from a type or any hashable value.
//! - **Activation**: lazy registrations are built on first use, eager ones by
//!   [`Container::bootstrap`].
//! - **Bootstrap**: closes registration. A container without eager registrations
//!   bootstraps itself on first resolution.
//! - **Override**: swaps the constructor behind an existing key, mostly for tests.
//!
//! ## Quick Start
//!
//! ```
//! use fibre_container::{Activation, Container, ResolveError};
//! use std::sync::Arc;
//!
//! struct Config {
//!     url: String,
//! }
//!
//! struct Database {
//!     url: String,
//! }
//!
//! let container = Container::new();
//!
//! container
//!     .register_fn(["config"], Activation::Eager, || Config { url: "postgres://db".into() })
//!     .unwrap();
//!
//! // The constructor resolves its own dependency.
//! container
//!     .register_type(Activation::Lazy, |c| {
//!         let config = c.resolve_key::<Config>("config")?;
//!         Ok::<_, ResolveError>(Database { url: config.url.clone() })
//!     })
//!     .unwrap();
//!
//! container.bootstrap().unwrap();
//!
//! let db = container.resolve::<Database>().unwrap();
//! assert_eq!(db.url, "postgres://db");
//! assert!(Arc::ptr_eq(&db, &container.resolve::<Database>().unwrap()));
//! ```

mod cell;
mod container;
mod error;
#[cfg(feature = "global")]
mod global;
mod guard;
mod key;
mod macros;
mod module;

pub use container::{Activation, Container, ContainerConfig};
pub use error::{BoxError, InstallError, OverrideError, RegisterError, ResolveError, Result};
#[cfg(feature = "global")]
pub use global::global;
pub use key::Key;
pub use module::Module;
