use alloc::string::String;
use core::fmt;
use core::marker::PhantomData;
use core::ops::{Deref, DerefMut};

use vc_reflect::Reflect;
use vc_reflect::func::ArgList;
use vc_reflect::info::{Type, TypePath};
use vc_scene::{ObjectId, ObjectModel};

use crate::{MemberBinding, MemberError};

/// A [`MemberBinding`] whose value is expected to be a `T`.
///
/// Reads and calls are cast to `T`, writes take a `T`. Everything else is
/// available through [`Deref`].
///
/// ```
/// use vc_member::TypedMember;
/// use vc_scene::{Scene, Vec3};
///
/// let mut scene = Scene::new();
/// let player = scene.spawn_game_object("player");
///
/// let mut position = TypedMember::<Vec3>::new("position")
///     .with_target(player)
///     .with_component("Transform");
/// position.set_value(&mut scene, Vec3::ONE).unwrap();
///
/// assert!(position.is_compatible(&scene).unwrap());
/// assert_eq!(position.value(&scene).unwrap(), Vec3::ONE);
/// ```
pub struct TypedMember<T> {
    binding: MemberBinding,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Reflect + TypePath> TypedMember<T> {
    #[inline]
    pub fn new(name: impl Into<String>) -> Self {
        MemberBinding::new(name).into()
    }

    #[inline]
    pub fn with_target(self, target: ObjectId) -> Self {
        self.binding.with_target(target).into()
    }

    #[inline]
    pub fn with_component(self, component: impl Into<String>) -> Self {
        self.binding.with_component(component).into()
    }

    #[inline]
    pub fn into_inner(self) -> MemberBinding {
        self.binding
    }

    /// Reads the field or property.
    pub fn value(&mut self, model: &(impl ObjectModel + ?Sized)) -> Result<T, MemberError> {
        self.binding.get_as(model)
    }

    /// Writes the field or property.
    pub fn set_value(
        &mut self,
        model: &mut (impl ObjectModel + ?Sized),
        value: T,
    ) -> Result<(), MemberError> {
        self.binding.set_as(model, value)
    }

    pub fn invoke<'a>(
        &mut self,
        model: &'a mut (impl ObjectModel + ?Sized),
        args: ArgList<'a>,
    ) -> Result<T, MemberError> {
        self.binding.invoke_as(model, args)
    }

    pub fn invoke_or_set<'a>(
        &mut self,
        model: &'a mut (impl ObjectModel + ?Sized),
        args: ArgList<'a>,
    ) -> Result<T, MemberError> {
        self.binding.invoke_or_set_as(model, args)
    }

    pub fn get_or_invoke<'a>(
        &mut self,
        model: &'a mut (impl ObjectModel + ?Sized),
        args: ArgList<'a>,
    ) -> Result<T, MemberError> {
        self.binding.get_or_invoke_as(model, args)
    }

    /// Resolves the binding and checks that its value type is `T`.
    pub fn is_compatible(
        &mut self,
        model: &(impl ObjectModel + ?Sized),
    ) -> Result<bool, MemberError> {
        Ok(self.binding.ty(model)? == Type::of::<T>())
    }
}

impl<T> From<MemberBinding> for TypedMember<T> {
    #[inline]
    fn from(binding: MemberBinding) -> Self {
        Self {
            binding,
            _marker: PhantomData,
        }
    }
}

impl<T> Deref for TypedMember<T> {
    type Target = MemberBinding;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.binding
    }
}

impl<T> DerefMut for TypedMember<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.binding
    }
}

impl<T> Clone for TypedMember<T> {
    #[inline]
    fn clone(&self) -> Self {
        self.binding.clone().into()
    }
}

impl<T> PartialEq for TypedMember<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.binding == other.binding
    }
}

impl<T> Eq for TypedMember<T> {}

impl<T: TypePath> fmt::Debug for TypedMember<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypedMember")
            .field(&T::type_name())
            .field(&self.binding)
            .finish()
    }
}
