use core::ops::{Add, Mul, Sub};

use vc_reflect::func::Return;
use vc_reflect::info::{FieldInfo, MethodInfo, Type};
use vc_reflect::registry::{GetTypeMeta, TypeMeta, TypeRegistry};

/// A three component vector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

vc_reflect::impl_reflect_value!(Vec3, "vc_scene::Vec3");

impl Vec3 {
    pub const ZERO: Self = Self::splat(0.0);
    pub const ONE: Self = Self::splat(1.0);

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v, z: v }
    }

    #[inline]
    pub fn dot(self, rhs: Self) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    #[inline]
    pub fn length(self) -> f32 {
        libm::sqrtf(self.dot(self))
    }
}

impl Add for Vec3 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl GetTypeMeta for Vec3 {
    fn get_type_meta() -> TypeMeta {
        TypeMeta::of::<Self>()
            .with_field(FieldInfo::new::<Self, f32>("x", |v| &v.x, |v| &mut v.x))
            .with_field(FieldInfo::new::<Self, f32>("y", |v| &v.y, |v| &mut v.y))
            .with_field(FieldInfo::new::<Self, f32>("z", |v| &v.z, |v| &mut v.z))
            .with_method(MethodInfo::instance::<Self, _>(
                "length",
                &[],
                Type::of::<f32>(),
                |v, _| Ok(Return::owned(v.length())),
            ))
            .with_method(MethodInfo::function::<Self, _>(
                "splat",
                &[Type::of::<f32>()],
                Type::of::<Self>(),
                |args| Ok(Return::owned(Self::splat(args.take_owned::<f32>()?))),
            ))
    }

    fn register_dependencies(registry: &mut TypeRegistry) {
        registry.register::<f32>();
    }
}
