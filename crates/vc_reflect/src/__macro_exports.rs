//! Items used by exported macros. Not public API.

pub use alloc::boxed::Box;

#[cfg(feature = "auto_register")]
pub mod auto_register {
    pub use inventory;

    use crate::registry::{GetTypeMeta, TypeMeta, TypeRegistry};

    pub struct __AutoRegisterFunc(pub fn(&mut TypeRegistry));

    inventory::collect!(__AutoRegisterFunc);

    #[inline]
    pub fn __register<T: GetTypeMeta>(registry: &mut TypeRegistry) {
        registry.register::<T>();
    }

    /// Registered together with user types; its presence proves that
    /// `inventory` works on this platform.
    pub struct __AvailFlag;

    crate::impl_type_path!(
        __AvailFlag,
        "vc_reflect::__macro_exports::auto_register::__AvailFlag"
    );

    impl GetTypeMeta for __AvailFlag {
        fn get_type_meta() -> TypeMeta {
            TypeMeta::of::<Self>()
        }
    }

    inventory::submit! {
        __AutoRegisterFunc(__register::<__AvailFlag>)
    }

    pub fn __register_types(registry: &mut TypeRegistry) {
        for func in inventory::iter::<__AutoRegisterFunc> {
            (func.0)(registry);
        }
    }
}

// -----------------------------------------------------------------------------
// auto_register

/// Submits a type for [`TypeRegistry::auto_register`].
///
/// The type must implement [`GetTypeMeta`]. Generic types must be named
/// with concrete parameters.
///
/// ```
/// use vc_reflect::registry::{GetTypeMeta, TypeMeta, TypeRegistry};
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct Coin;
/// vc_reflect::impl_reflect_value!(Coin, "demo::Coin");
///
/// impl GetTypeMeta for Coin {
///     fn get_type_meta() -> TypeMeta {
///         TypeMeta::of::<Self>()
///     }
/// }
///
/// vc_reflect::auto_register!(Coin);
///
/// let mut registry = TypeRegistry::empty();
/// if registry.auto_register() {
///     assert!(registry.get_with_type_name("Coin").is_some());
/// }
/// ```
///
/// [`TypeRegistry::auto_register`]: crate::registry::TypeRegistry::auto_register
/// [`GetTypeMeta`]: crate::registry::GetTypeMeta
#[cfg(feature = "auto_register")]
#[macro_export]
macro_rules! auto_register {
    ($ty:ty) => {
        $crate::__macro_exports::auto_register::inventory::submit! {
            $crate::__macro_exports::auto_register::__AutoRegisterFunc(
                $crate::__macro_exports::auto_register::__register::<$ty>
            )
        }
    };
}

/// Submits a type for [`TypeRegistry::auto_register`].
///
/// The `auto_register` feature is disabled, this expands to nothing.
///
/// [`TypeRegistry::auto_register`]: crate::registry::TypeRegistry::auto_register
#[cfg(not(feature = "auto_register"))]
#[macro_export]
macro_rules! auto_register {
    ($ty:ty) => {};
}
