//! Public macros for ergonomic, panicking resolution.

/// Resolves a dependency from an explicit container, panicking on failure.
///
/// Use [`Container::resolve`](crate::Container::resolve) or
/// [`Container::resolve_key`](crate::Container::resolve_key) for the fallible form.
///
/// # Panics
///
/// Panics with the [`ResolveError`](crate::ResolveError) if the dependency
/// cannot be resolved.
///
/// # Examples
///
/// ```
/// use fibre_container::{resolve_in, Activation, Container};
/// use std::sync::Arc;
///
/// trait Greeter: Send + Sync { fn greet(&self) -> String; }
/// struct EnglishGreeter;
/// impl Greeter for EnglishGreeter { fn greet(&self) -> String { "Hello!".to_string() } }
///
/// let container = Container::new();
/// container.register_fn(["port"], Activation::Lazy, || 8080u16).unwrap();
/// container
///   .register_trait([fibre_container::Key::of::<dyn Greeter>()], Activation::Lazy, |_| {
///     Ok::<_, std::convert::Infallible>(Arc::new(EnglishGreeter) as Arc<dyn Greeter>)
///   })
///   .unwrap();
///
/// assert_eq!(*resolve_in!(container, u16, "port"), 8080);
/// assert_eq!(resolve_in!(container, trait Greeter).greet(), "Hello!");
/// ```
#[macro_export]
macro_rules! resolve_in {
    // resolve_in!(container, trait MyTrait)
    ($container:expr, trait $trait_ident:ident) => {
        $container
            .resolve::<dyn $trait_ident>()
            .unwrap_or_else(|error| {
                panic!(
                    "Failed to resolve required trait service {}: {}",
                    std::any::type_name::<dyn $trait_ident>(),
                    error
                )
            })
    };

    // resolve_in!(container, trait MyTrait, "key")
    ($container:expr, trait $trait_ident:ident, $key:expr) => {
        $container
            .resolve_key::<dyn $trait_ident>($key)
            .unwrap_or_else(|error| {
                panic!(
                    "Failed to resolve required trait service {}: {}",
                    std::any::type_name::<dyn $trait_ident>(),
                    error
                )
            })
    };

    // resolve_in!(container, MyService)
    ($container:expr, $type:ty) => {
        $container.resolve::<$type>().unwrap_or_else(|error| {
            panic!(
                "Failed to resolve required service {}: {}",
                std::any::type_name::<$type>(),
                error
            )
        })
    };

    // resolve_in!(container, MyService, "key")
    ($container:expr, $type:ty, $key:expr) => {
        $container.resolve_key::<$type>($key).unwrap_or_else(|error| {
            panic!(
                "Failed to resolve required service {}: {}",
                std::any::type_name::<$type>(),
                error
            )
        })
    };
}

/// Resolves a dependency from the global container, panicking on failure.
///
/// # Examples
///
/// ```
/// use fibre_container::{global, resolve, Activation};
///
/// global().register_fn(["macro_doc"], Activation::Lazy, || String::from("hello")).unwrap();
///
/// let message = resolve!(String, "macro_doc");
/// assert_eq!(*message, "hello");
/// ```
#[cfg(feature = "global")]
#[macro_export]
macro_rules! resolve {
    (trait $trait_ident:ident) => {
        $crate::resolve_in!($crate::global(), trait $trait_ident)
    };

    (trait $trait_ident:ident, $key:expr) => {
        $crate::resolve_in!($crate::global(), trait $trait_ident, $key)
    };

    ($type:ty) => {
        $crate::resolve_in!($crate::global(), $type)
    };

    ($type:ty, $key:expr) => {
        $crate::resolve_in!($crate::global(), $type, $key)
    };
}
