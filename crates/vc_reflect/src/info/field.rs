use alloc::boxed::Box;
use alloc::sync::Arc;
use core::fmt;

use crate::Reflect;
use crate::info::{AccessError, Projection, Type, TypePath, Visibility};

// -----------------------------------------------------------------------------
// FieldAccess

trait FieldAccess: Send + Sync {
    fn get<'a>(&self, target: &'a dyn Reflect) -> Option<&'a dyn Reflect>;

    fn get_mut<'a>(&self, target: &'a mut dyn Reflect) -> Option<&'a mut dyn Reflect>;
}

struct TypedField<T, V> {
    get: fn(&T) -> &V,
    get_mut: fn(&mut T) -> &mut V,
}

impl<T: Reflect, V: Reflect> FieldAccess for TypedField<T, V> {
    fn get<'a>(&self, target: &'a dyn Reflect) -> Option<&'a dyn Reflect> {
        let target = target.downcast_ref::<T>()?;
        Some((self.get)(target) as &dyn Reflect)
    }

    fn get_mut<'a>(&self, target: &'a mut dyn Reflect) -> Option<&'a mut dyn Reflect> {
        let target = target.downcast_mut::<T>()?;
        Some((self.get_mut)(target) as &mut dyn Reflect)
    }
}

// -----------------------------------------------------------------------------
// FieldInfo

/// A reflected field: a place inside the declaring value.
///
/// Reading a field clones it, writing replaces it in place.
///
/// # Examples
///
/// ```
/// use vc_reflect::{Reflect, info::FieldInfo};
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct Health { current: i32 }
/// vc_reflect::impl_reflect_value!(Health, "demo::Health");
///
/// let field = FieldInfo::new::<Health, i32>("current", |h| &h.current, |h| &mut h.current);
///
/// let mut health = Health { current: 3 };
/// field.set(&mut health, 10.into_boxed_reflect()).unwrap();
/// assert_eq!(health.current, 10);
///
/// let value = field.get(&health).unwrap();
/// assert_eq!(value.take::<i32>().unwrap(), 10);
/// ```
#[derive(Clone)]
pub struct FieldInfo {
    name: &'static str,
    owner: Type,
    ty: Type,
    visibility: Visibility,
    access: Arc<dyn FieldAccess>,
    projection: Projection,
}

impl FieldInfo {
    /// Creates a field `name` of type `V` declared on `T`.
    pub fn new<T, V>(name: &'static str, get: fn(&T) -> &V, get_mut: fn(&mut T) -> &mut V) -> Self
    where
        T: Reflect + TypePath,
        V: Reflect + TypePath,
    {
        Self {
            name,
            owner: Type::of::<T>(),
            ty: Type::of::<V>(),
            visibility: Visibility::Public,
            access: Arc::new(TypedField { get, get_mut }),
            projection: Projection::identity(),
        }
    }

    /// Marks the field as [`Visibility::NonPublic`].
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

    /// The field type.
    #[inline]
    pub fn ty(&self) -> Type {
        self.ty
    }

    #[inline]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    #[inline]
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub(crate) fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    /// Borrows the field of `target`.
    pub fn get_ref<'a>(&self, target: &'a dyn Reflect) -> Result<&'a dyn Reflect, AccessError> {
        let received = target.reflect_type_path();
        self.projection
            .apply(target)
            .and_then(|owner| self.access.get(owner))
            .ok_or(AccessError::MismatchedTarget {
                member: self.name,
                expected: self.owner.path(),
                received,
            })
    }

    /// Mutably borrows the field of `target`.
    pub fn get_mut<'a>(
        &self,
        target: &'a mut dyn Reflect,
    ) -> Result<&'a mut dyn Reflect, AccessError> {
        let received = target.reflect_type_path();
        self.projection
            .apply_mut(target)
            .and_then(|owner| self.access.get_mut(owner))
            .ok_or(AccessError::MismatchedTarget {
                member: self.name,
                expected: self.owner.path(),
                received,
            })
    }

    /// Returns a clone of the field value.
    #[inline]
    pub fn get(&self, target: &dyn Reflect) -> Result<Box<dyn Reflect>, AccessError> {
        self.get_ref(target).map(|value| value.reflect_clone())
    }

    /// Overwrites the field with `value`, which must be of the field type.
    pub fn set(&self, target: &mut dyn Reflect, value: Box<dyn Reflect>) -> Result<(), AccessError> {
        if value.ty_id() != self.ty.id() {
            return Err(AccessError::MismatchedType {
                member: self.name,
                expected: self.ty.path(),
                received: value.reflect_type_path(),
            });
        }
        self.get_mut(target)?
            .set(value)
            .map_err(|value| AccessError::MismatchedType {
                member: self.name,
                expected: self.ty.path(),
                received: value.reflect_type_path(),
            })
    }
}

impl fmt::Debug for FieldInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldInfo")
            .field("name", &self.name)
            .field("owner", &self.owner)
            .field("ty", &self.ty)
            .field("visibility", &self.visibility)
            .field("projection", &self.projection)
            .finish()
    }
}
