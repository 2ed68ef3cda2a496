//! Declaration macros. Each expands to a marker type, its `ClassKind`
//! impl, and a startup constructor that registers the declaration in
//! the process-wide store before `main` runs. A rejected declaration
//! is a programming error and panics at startup.

/// Declare a collection-backed model.
///
/// ```ignore
/// model! {
///     pub struct User;
///     collection = "user";
///     fields = [
///         FieldDecl::new("id", FieldType::Ulid).id(),
///         FieldDecl::new("name", FieldType::Text).default_value(Value::text("anon")),
///     ];
/// }
/// ```
///
/// `extends = Parent;` links the class under an already-declared parent;
/// without `collection = "..."` the snake-cased type name is used.
#[macro_export]
macro_rules! model {
    (
        $(#[$attr:meta])*
        $vis:vis struct $name:ident;
        $(extends = $parent:ty;)?
        $(collection = $collection:literal;)?
        fields = [ $($field:expr),* $(,)? ];
    ) => {
        $(#[$attr])*
        $vis struct $name;

        impl $crate::core::class::ClassKind for $name {
            const PATH: &'static str = concat!(module_path!(), "::", stringify!($name));
            const PARENT: Option<$crate::core::class::ClassId> =
                $crate::model!(@parent $($parent)?);
        }

        const _: () = {
            #[cfg(not(target_arch = "wasm32"))]
            #[$crate::__reexports::ctor::ctor(unsafe, anonymous, crate_path = $crate::__reexports::ctor)]
            fn __register() {
                let decl = $crate::decl::ModelDecl::of::<$name>()
                    $(.collection($collection))?
                    $(.field($field))*;

                if let Err(err) = decl.register() {
                    panic!(
                        "model declaration for '{}' failed: {err}",
                        <$name as $crate::core::class::ClassKind>::PATH,
                    );
                }
            }
        };
    };

    (@parent) => {
        None
    };
    (@parent $parent:ty) => {
        Some($crate::core::class::ClassId::of::<$parent>())
    };
}

/// Declare a collection-less data mapper.
///
/// Grammar matches [`model!`] minus the `collection` entry.
#[macro_export]
macro_rules! data_mapper {
    (
        $(#[$attr:meta])*
        $vis:vis struct $name:ident;
        $(extends = $parent:ty;)?
        fields = [ $($field:expr),* $(,)? ];
    ) => {
        $(#[$attr])*
        $vis struct $name;

        impl $crate::core::class::ClassKind for $name {
            const PATH: &'static str = concat!(module_path!(), "::", stringify!($name));
            const PARENT: Option<$crate::core::class::ClassId> =
                $crate::data_mapper!(@parent $($parent)?);
        }

        const _: () = {
            #[cfg(not(target_arch = "wasm32"))]
            #[$crate::__reexports::ctor::ctor(unsafe, anonymous, crate_path = $crate::__reexports::ctor)]
            fn __register() {
                let decl = $crate::decl::MapperDecl::of::<$name>()
                    $(.field($field))*;

                if let Err(err) = decl.register() {
                    panic!(
                        "data-mapper declaration for '{}' failed: {err}",
                        <$name as $crate::core::class::ClassKind>::PATH,
                    );
                }
            }
        };
    };

    (@parent) => {
        None
    };
    (@parent $parent:ty) => {
        Some($crate::core::class::ClassId::of::<$parent>())
    };
}
