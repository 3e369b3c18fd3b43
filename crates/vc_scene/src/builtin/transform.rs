use vc_reflect::func::Return;
use vc_reflect::info::{FieldInfo, MethodInfo, Type};
use vc_reflect::registry::{GetTypeMeta, TypeMeta, TypeRegistry};

use crate::Vec3;

// -----------------------------------------------------------------------------
// Transform

/// Position and scale of a game object.
///
/// Every game object owns exactly one, attached as its first behavior.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub scale: Vec3,
}

vc_reflect::impl_reflect_value!(Transform, "vc_scene::Transform");

impl Default for Transform {
    #[inline]
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    #[inline]
    pub fn translate(&mut self, offset: Vec3) {
        self.position = self.position + offset;
    }

    #[inline]
    pub fn translate_xyz(&mut self, x: f32, y: f32, z: f32) {
        self.translate(Vec3::new(x, y, z));
    }
}

impl GetTypeMeta for Transform {
    fn get_type_meta() -> TypeMeta {
        TypeMeta::of::<Self>()
            .with_field(FieldInfo::new::<Self, Vec3>(
                "position",
                |t| &t.position,
                |t| &mut t.position,
            ))
            .with_field(FieldInfo::new::<Self, Vec3>(
                "scale",
                |t| &t.scale,
                |t| &mut t.scale,
            ))
            .with_method(MethodInfo::instance::<Self, _>(
                "translate",
                &[Type::of::<Vec3>()],
                Type::unit(),
                |t, args| {
                    t.translate(args.take_owned::<Vec3>()?);
                    Ok(Return::Unit)
                },
            ))
            .with_method(MethodInfo::instance::<Self, _>(
                "translate",
                &[Type::of::<f32>(), Type::of::<f32>(), Type::of::<f32>()],
                Type::unit(),
                |t, args| {
                    let x = args.take_owned::<f32>()?;
                    let y = args.take_owned::<f32>()?;
                    let z = args.take_owned::<f32>()?;
                    t.translate_xyz(x, y, z);
                    Ok(Return::Unit)
                },
            ))
    }

    fn register_dependencies(registry: &mut TypeRegistry) {
        registry.register::<Vec3>();
    }
}

// -----------------------------------------------------------------------------
// TransformExt

/// Holder of the extension methods of [`Transform`].
pub struct TransformExt;

vc_reflect::impl_type_path!(TransformExt, "vc_scene::TransformExt");

impl TransformExt {
    #[inline]
    pub fn distance_to(transform: &Transform, point: Vec3) -> f32 {
        (point - transform.position).length()
    }
}

impl GetTypeMeta for TransformExt {
    fn get_type_meta() -> TypeMeta {
        TypeMeta::of::<Self>().with_method(MethodInfo::extension::<Self, _>(
            "distance_to",
            &[Type::of::<Transform>(), Type::of::<Vec3>()],
            Type::of::<f32>(),
            |args| {
                let transform = args.take_ref::<Transform>()?;
                let point = args.take_owned::<Vec3>()?;
                Ok(Return::owned(Self::distance_to(transform, point)))
            },
        ))
    }

    fn register_dependencies(registry: &mut TypeRegistry) {
        registry.register::<Transform>();
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use core::any::TypeId;

    use vc_reflect::func::ArgList;
    use vc_reflect::info::Type;
    use vc_reflect::registry::TypeRegistry;

    use super::{Transform, TransformExt};
    use crate::Vec3;

    #[test]
    fn translate_overloads_have_distinct_signatures() {
        let mut registry = TypeRegistry::new();
        registry.register::<Transform>();

        let found = registry.find_members(TypeId::of::<Transform>(), "translate");
        assert_eq!(found.len(), 2);

        let by_vector = found
            .iter()
            .filter_map(|m| m.as_method())
            .find(|m| m.matches(&[Type::of::<Vec3>()]))
            .unwrap();

        let mut transform = Transform::default();
        by_vector
            .invoke(&mut transform, ArgList::new().with_owned(Vec3::ONE))
            .unwrap();
        assert_eq!(transform.position, Vec3::ONE);
    }

    #[test]
    fn distance_extension() {
        let mut registry = TypeRegistry::new();
        registry.register::<TransformExt>();

        let found = registry.extension_methods_named(TypeId::of::<Transform>(), "distance_to");
        assert_eq!(found.len(), 1);

        let mut transform = Transform::default();
        let ret = found[0]
            .invoke(&mut transform, ArgList::new().with_owned(Vec3::new(0.0, 3.0, 4.0)))
            .unwrap();
        let distance = ret.take::<f32>().unwrap();
        assert!((distance - 5.0).abs() < 1e-5);
    }
}
