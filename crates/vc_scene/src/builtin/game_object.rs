use alloc::string::String;

use vc_reflect::func::Return;
use vc_reflect::info::{FieldInfo, MethodInfo, PropertyInfo, Type};
use vc_reflect::registry::{GetTypeMeta, TypeMeta, TypeRegistry};

use crate::ObjectId;

/// A composable object. Its behaviors are stored in the [`Scene`](crate::Scene).
#[derive(Debug, Clone, PartialEq)]
pub struct GameObject {
    name: String,
    active: bool,
    pub tag: String,
    transform: ObjectId,
}

vc_reflect::impl_reflect_value!(GameObject, "vc_scene::GameObject");

impl GameObject {
    pub(crate) fn new(name: String, transform: ObjectId) -> Self {
        Self {
            name,
            active: true,
            tag: String::from("Untagged"),
            transform,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    #[inline]
    pub fn active(&self) -> bool {
        self.active
    }

    #[inline]
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// The [`Transform`](crate::Transform) behavior of this object.
    #[inline]
    pub fn transform(&self) -> ObjectId {
        self.transform
    }

    #[inline]
    pub fn compare_tag(&self, tag: &str) -> bool {
        self.tag == tag
    }
}

impl GetTypeMeta for GameObject {
    fn get_type_meta() -> TypeMeta {
        TypeMeta::of::<Self>()
            .with_property(PropertyInfo::new::<Self, String>(
                "name",
                |g| g.name.clone(),
                |g, name| g.name = name,
            ))
            .with_property(PropertyInfo::new::<Self, bool>(
                "active",
                |g| g.active,
                |g, active| g.active = active,
            ))
            .with_property(PropertyInfo::read_only::<Self, ObjectId>(
                "transform",
                |g| g.transform,
            ))
            .with_field(FieldInfo::new::<Self, String>("tag", |g| &g.tag, |g| &mut g.tag))
            .with_method(MethodInfo::instance::<Self, _>(
                "set_active",
                &[Type::of::<bool>()],
                Type::unit(),
                |g, args| {
                    g.set_active(args.take_owned::<bool>()?);
                    Ok(Return::Unit)
                },
            ))
            .with_method(MethodInfo::instance::<Self, _>(
                "compare_tag",
                &[Type::of::<String>()],
                Type::of::<bool>(),
                |g, args| Ok(Return::owned(g.compare_tag(&args.take_owned::<String>()?))),
            ))
    }

    fn register_dependencies(registry: &mut TypeRegistry) {
        registry.register::<String>();
        registry.register::<bool>();
        registry.register::<ObjectId>();
    }
}
