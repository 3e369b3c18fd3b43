use alloc::boxed::Box;
use alloc::sync::Arc;
use core::fmt;

use crate::Reflect;
use crate::info::{AccessError, Projection, Type, TypePath, Visibility};

// -----------------------------------------------------------------------------
// PropertyAccess

trait PropertyAccess: Send + Sync {
    fn get(&self, target: &dyn Reflect) -> Option<Box<dyn Reflect>>;

    fn is_writable(&self) -> bool;

    // Both types are checked by the caller, returns `false` only on a mismatched target.
    fn set(&self, target: &mut dyn Reflect, value: Box<dyn Reflect>) -> bool;
}

struct TypedProperty<T, V> {
    get: fn(&T) -> V,
    set: Option<fn(&mut T, V)>,
}

impl<T: Reflect, V: Reflect> PropertyAccess for TypedProperty<T, V> {
    fn get(&self, target: &dyn Reflect) -> Option<Box<dyn Reflect>> {
        let target = target.downcast_ref::<T>()?;
        Some(Box::new((self.get)(target)))
    }

    #[inline]
    fn is_writable(&self) -> bool {
        self.set.is_some()
    }

    fn set(&self, target: &mut dyn Reflect, value: Box<dyn Reflect>) -> bool {
        let (Some(setter), Some(target)) = (self.set, target.downcast_mut::<T>()) else {
            return false;
        };
        match value.take::<V>() {
            Ok(value) => {
                setter(target, value);
                true
            }
            Err(_) => false,
        }
    }
}

// -----------------------------------------------------------------------------
// PropertyInfo

/// A reflected property: a getter and an optional setter.
///
/// Unlike [`FieldInfo`](crate::info::FieldInfo), a property may compute its
/// value and may be read-only.
///
/// # Examples
///
/// ```
/// use vc_reflect::{Reflect, info::{AccessError, PropertyInfo}};
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct Stats { hits: u32, misses: u32 }
/// vc_reflect::impl_reflect_value!(Stats, "demo::Stats");
///
/// let total = PropertyInfo::read_only::<Stats, u32>("total", |s| s.hits + s.misses);
///
/// let mut stats = Stats { hits: 3, misses: 1 };
/// assert_eq!(total.get(&stats).unwrap().take::<u32>().unwrap(), 4);
/// assert!(matches!(
///     total.set(&mut stats, 0_u32.into_boxed_reflect()),
///     Err(AccessError::ReadOnly { .. })
/// ));
/// ```
#[derive(Clone)]
pub struct PropertyInfo {
    name: &'static str,
    owner: Type,
    ty: Type,
    visibility: Visibility,
    access: Arc<dyn PropertyAccess>,
    projection: Projection,
}

impl PropertyInfo {
    /// Creates a read-write property `name` of type `V` declared on `T`.
    pub fn new<T, V>(name: &'static str, get: fn(&T) -> V, set: fn(&mut T, V)) -> Self
    where
        T: Reflect + TypePath,
        V: Reflect + TypePath,
    {
        Self::build::<T, V>(name, get, Some(set))
    }

    /// Creates a property without setter.
    pub fn read_only<T, V>(name: &'static str, get: fn(&T) -> V) -> Self
    where
        T: Reflect + TypePath,
        V: Reflect + TypePath,
    {
        Self::build::<T, V>(name, get, None)
    }

    fn build<T, V>(name: &'static str, get: fn(&T) -> V, set: Option<fn(&mut T, V)>) -> Self
    where
        T: Reflect + TypePath,
        V: Reflect + TypePath,
    {
        Self {
            name,
            owner: Type::of::<T>(),
            ty: Type::of::<V>(),
            visibility: Visibility::Public,
            access: Arc::new(TypedProperty { get, set }),
            projection: Projection::identity(),
        }
    }

    /// Marks the property as [`Visibility::NonPublic`].
    #[inline]
    pub fn non_public(mut self) -> Self {
        self.visibility = Visibility::NonPublic;
        self
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The declaring type.
    #[inline]
    pub fn owner(&self) -> Type {
        self.owner
    }

    /// The property type.
    #[inline]
    pub fn ty(&self) -> Type {
        self.ty
    }

    #[inline]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    #[inline]
    pub fn is_writable(&self) -> bool {
        self.access.is_writable()
    }

    #[inline]
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub(crate) fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    #[cold]
    fn mismatched_target(&self, received: &'static str) -> AccessError {
        AccessError::MismatchedTarget {
            member: self.name,
            expected: self.owner.path(),
            received,
        }
    }

    /// Calls the getter on `target`.
    pub fn get(&self, target: &dyn Reflect) -> Result<Box<dyn Reflect>, AccessError> {
        let received = target.reflect_type_path();
        self.projection
            .apply(target)
            .and_then(|owner| self.access.get(owner))
            .ok_or_else(|| self.mismatched_target(received))
    }

    /// Calls the setter on `target`.
    pub fn set(&self, target: &mut dyn Reflect, value: Box<dyn Reflect>) -> Result<(), AccessError> {
        if !self.is_writable() {
            return Err(AccessError::ReadOnly { member: self.name });
        }
        if value.ty_id() != self.ty.id() {
            return Err(AccessError::MismatchedType {
                member: self.name,
                expected: self.ty.path(),
                received: value.reflect_type_path(),
            });
        }
        let received = target.reflect_type_path();
        match self.projection.apply_mut(target) {
            Some(owner) => {
                if self.access.set(owner, value) {
                    Ok(())
                } else {
                    Err(self.mismatched_target(received))
                }
            }
            None => Err(self.mismatched_target(received)),
        }
    }
}

impl fmt::Debug for PropertyInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyInfo")
            .field("name", &self.name)
            .field("owner", &self.owner)
            .field("ty", &self.ty)
            .field("writable", &self.is_writable())
            .field("visibility", &self.visibility)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests
