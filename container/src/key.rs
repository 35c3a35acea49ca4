//! Lookup keys used to address registrations.

use once_cell::sync::Lazy;
use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{BuildHasher, Hash, Hasher};

// Fixed seeds so that the same value always maps to the same identity within a process.
static KEY_HASHER: Lazy<ahash::RandomState> = Lazy::new(|| {
  ahash::RandomState::with_seeds(
    0x243f_6a88_85a3_08d3,
    0x1319_8a2e_0370_7344,
    0xa409_3822_299f_31d0,
    0x082e_fa98_ec4e_6c89,
  )
});

/// A dual-identity lookup key.
///
/// `raw` is a human-readable label kept for diagnostics only. Two keys are equal
/// if and only if their `identity` values are equal.
///
/// Keys derived from a type use the type's canonical name, so `Key::of::<T>()`
/// and `Key::from(std::any::type_name::<T>())` address the same registration.
#[derive(Clone)]
pub struct Key {
  raw: String,
  identity: u64,
}

impl Key {
  /// Derives the key for the type `T`.
  pub fn of<T: ?Sized + Any>() -> Self {
    Self::named(std::any::type_name::<T>())
  }

  /// Derives a key from an arbitrary hashable value.
  ///
  /// String values share the namespace of type-derived keys. Any other value is
  /// hashed together with its own type, so `0u8` and `0u32` are distinct keys.
  pub fn new<K: Hash + fmt::Debug + Any>(value: K) -> Self {
    let any = &value as &dyn Any;
    if let Some(name) = any.downcast_ref::<String>() {
      return Self::named(name);
    }
    if let Some(name) = any.downcast_ref::<&'static str>() {
      return Self::named(name);
    }

    Self {
      raw: format!("{:?}", value),
      identity: KEY_HASHER.hash_one((TypeId::of::<K>(), &value)),
    }
  }

  fn named(name: &str) -> Self {
    Self {
      raw: name.to_owned(),
      identity: KEY_HASHER.hash_one(name),
    }
  }

  /// The human-readable label of this key.
  pub fn raw(&self) -> &str {
    &self.raw
  }

  /// The value used for equality and lookup.
  pub fn identity(&self) -> u64 {
    self.identity
  }
}

impl PartialEq for Key {
  fn eq(&self, other: &Self) -> bool {
    self.identity == other.identity
  }
}

impl Eq for Key {}

impl Hash for Key {
  fn hash<H: Hasher>(&self, state: &mut H) {
    state.write_u64(self.identity);
  }
}

impl fmt::Debug for Key {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Key({}, #{:016x})", self.raw, self.identity)
  }
}

impl fmt::Display for Key {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.raw)
  }
}

impl From<&str> for Key {
  fn from(name: &str) -> Self {
    Self::named(name)
  }
}

impl From<String> for Key {
  fn from(name: String) -> Self {
    Self::named(&name)
  }
}

impl From<&String> for Key {
  fn from(name: &String) -> Self {
    Self::named(name)
  }
}

impl From<&Key> for Key {
  fn from(key: &Key) -> Self {
    key.clone()
  }
}
