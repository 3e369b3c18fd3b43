use alloc::string::String;
use alloc::vec::Vec;
use core::any::TypeId;
use core::fmt;

use foldhash::fast::FixedState;

use crate::info::{MemberInfo, MethodInfo, Projection};
use crate::registry::{GetTypeMeta, TypeMeta};

type FixedMap<K, V> = hashbrown::HashMap<K, V, FixedState>;
type FixedSet<K> = hashbrown::HashSet<K, FixedState>;

// -----------------------------------------------------------------------------
// TypeRegistry

/// A registry of [reflected] types and their members.
///
/// This struct is the central store for member lookup. [Registering] a type
/// inserts its [`TypeMeta`], generated by [`GetTypeMeta`], and indexes it by
/// [`TypeId`], full type path and short type name.
///
/// Types are kept in registration order; lookups that scan the whole registry,
/// like [`extension_methods`](Self::extension_methods), report results in
/// that order.
///
/// # Example
///
/// ```
/// use vc_reflect::registry::TypeRegistry;
///
/// let registry = TypeRegistry::new();
///
/// let meta = registry.get_with_type_name("String").unwrap();
/// assert_eq!(meta.ty().path(), "alloc::string::String");
/// assert!(registry.get_with_type_path("alloc::string::String").is_some());
/// ```
///
/// [reflected]: crate
/// [Registering]: TypeRegistry::register
pub struct TypeRegistry {
    metas: Vec<TypeMeta>,
    type_id_to_index: FixedMap<TypeId, usize>,
    type_path_to_id: FixedMap<&'static str, TypeId>,
    type_name_to_id: FixedMap<&'static str, TypeId>,
    ambiguous_names: FixedSet<&'static str>,
}

impl Default for TypeRegistry {
    /// See [`TypeRegistry::new`] .
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// A registry without any type, not even primitives.
    #[inline]
    pub fn empty() -> Self {
        Self {
            metas: Vec::new(),
            type_id_to_index: FixedMap::default(),
            type_path_to_id: FixedMap::default(),
            type_name_to_id: FixedMap::default(),
            ambiguous_names: FixedSet::default(),
        }
    }

    /// A registry knowing `()`, `bool`, `char`, the numeric primitives and `String`.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register::<()>();
        registry.register::<bool>();
        registry.register::<char>();
        registry.register::<u8>();
        registry.register::<u16>();
        registry.register::<u32>();
        registry.register::<u64>();
        registry.register::<u128>();
        registry.register::<usize>();
        registry.register::<i8>();
        registry.register::<i16>();
        registry.register::<i32>();
        registry.register::<i64>();
        registry.register::<i128>();
        registry.register::<isize>();
        registry.register::<f32>();
        registry.register::<f64>();
        registry.register::<String>();
        registry
    }

    // # Validity
    // The type must **not** already exist.
    fn add_new_type_indices(&mut self, type_meta: &TypeMeta) {
        let ty = type_meta.ty();
        let type_name = ty.name();

        if !self.ambiguous_names.contains(type_name) {
            if self.type_name_to_id.contains_key(type_name) {
                self.type_name_to_id.remove(type_name);
                self.ambiguous_names.insert(type_name);
            } else {
                self.type_name_to_id.insert(type_name, ty.id());
            }
        }

        // Full paths are assumed unique.
        self.type_path_to_id.insert(ty.path(), ty.id());
    }

    fn push_new(&mut self, type_meta: TypeMeta) {
        log::trace!(
            "register `{}` with {} members",
            type_meta.ty().path(),
            type_meta.members().len()
        );
        self.add_new_type_indices(&type_meta);
        self.type_id_to_index
            .insert(type_meta.type_id(), self.metas.len());
        self.metas.push(type_meta);
    }

    /// Inserts `type_meta` unless its type is known, returns whether it did.
    ///
    /// Dependencies are not registered, see [`register`](Self::register).
    pub fn try_insert_type_meta(&mut self, type_meta: TypeMeta) -> bool {
        if self.contains(type_meta.type_id()) {
            return false;
        }
        self.push_new(type_meta);
        true
    }

    /// Inserts `type_meta`, replacing the meta of a known type in place.
    ///
    /// A replaced meta keeps its registration order. Dependencies are not
    /// registered. Bindings resolved earlier keep the members they cached.
    pub fn insert_type_meta(&mut self, type_meta: TypeMeta) {
        match self.type_id_to_index.get(&type_meta.type_id()) {
            Some(&index) => {
                log::trace!("overwrite `{}`", type_meta.ty().path());
                self.metas[index] = type_meta;
            }
            None => self.push_new(type_meta),
        }
    }

    /// Registers `T` and, the first time only, its
    /// [dependencies](GetTypeMeta::register_dependencies).
    pub fn register<T: GetTypeMeta>(&mut self) {
        if self.try_insert_type_meta(T::get_type_meta()) {
            T::register_dependencies(self);
        }
    }

    /// Registers every type submitted with [`auto_register!`](crate::auto_register).
    ///
    /// Returns `false` when the `auto_register` feature is off or `inventory`
    /// does not support the platform. Calling it again does nothing.
    #[cfg_attr(not(feature = "auto_register"), inline(always))]
    pub fn auto_register(&mut self) -> bool {
        #[cfg(feature = "auto_register")]
        {
            use crate::__macro_exports::auto_register;
            if self.contains(TypeId::of::<auto_register::__AvailFlag>()) {
                return true;
            }
            auto_register::__register_types(self);
            self.contains(TypeId::of::<auto_register::__AvailFlag>())
        }
        #[cfg(not(feature = "auto_register"))]
        {
            false
        }
    }

    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.type_id_to_index.contains_key(&type_id)
    }

    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&TypeMeta> {
        match self.type_id_to_index.get(&type_id) {
            Some(&index) => self.metas.get(index),
            None => None,
        }
    }

    #[inline]
    pub fn get_mut(&mut self, type_id: TypeId) -> Option<&mut TypeMeta> {
        match self.type_id_to_index.get(&type_id) {
            Some(&index) => self.metas.get_mut(index),
            None => None,
        }
    }

    /// Returns the [`TypeMeta`] with the given [type path].
    ///
    /// [type path]: crate::info::TypePath::type_path
    pub fn get_with_type_path(&self, type_path: &str) -> Option<&TypeMeta> {
        match self.type_path_to_id.get(type_path) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    /// Looks a type up by [type name], `None` if the name is unknown or ambiguous.
    ///
    /// [type name]: crate::info::TypePath::type_name
    pub fn get_with_type_name(&self, type_name: &str) -> Option<&TypeMeta> {
        match self.type_name_to_id.get(type_name) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    /// Returns `true` if the given [type name] matches multiple registered types.
    ///
    /// [type name]: crate::info::TypePath::type_name
    pub fn is_ambiguous(&self, type_name: &str) -> bool {
        self.ambiguous_names.contains(type_name)
    }

    /// Returns an iterator over the [`TypeMeta`]s in registration order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &TypeMeta> {
        self.metas.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.metas.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.metas.is_empty()
    }

    /// Returns the type and its registered bases, most derived first.
    ///
    /// Each entry carries the projection from the starting type to that base.
    /// The walk stops at the first base that is not registered, or when a
    /// type appears twice.
    pub fn hierarchy(&self, type_id: TypeId) -> Vec<(&TypeMeta, Projection)> {
        let mut chain: Vec<(&TypeMeta, Projection)> = Vec::new();
        let Some(mut meta) = self.get(type_id) else {
            return chain;
        };
        let mut projection = Projection::identity();
        loop {
            let next = meta.upcast().cloned();
            chain.push((meta, projection.clone()));

            let Some(upcast) = next else { break };
            let base = upcast.base();
            if chain.iter().any(|(seen, _)| seen.type_id() == base.id()) {
                log::warn!("base cycle at `{}`", base.path());
                break;
            }
            let Some(base_meta) = self.get(base.id()) else {
                log::debug!("base `{}` is not registered", base.path());
                break;
            };
            projection = projection.then(upcast);
            meta = base_meta;
        }
        chain
    }

    /// Members named `name` declared on the type or its bases, most derived
    /// first. Extension methods are not included.
    ///
    /// Members found on a base carry the projection to it.
    pub fn find_members(&self, type_id: TypeId, name: &str) -> Vec<MemberInfo> {
        let mut found = Vec::new();
        for (meta, projection) in self.hierarchy(type_id) {
            for member in meta.members_named(name) {
                if member.as_method().is_some_and(MethodInfo::is_extension) {
                    continue;
                }
                found.push(member.clone().with_projection(projection.clone()));
            }
        }
        found
    }

    /// Extension methods whose extended type is the type or one of its bases.
    ///
    /// Holders are scanned in registration order. Each method carries the
    /// projection from the type to the extended type.
    pub fn extension_methods(&self, type_id: TypeId) -> Vec<MethodInfo> {
        let chain = self.hierarchy(type_id);
        let mut found = Vec::new();
        if chain.is_empty() {
            return found;
        }
        for holder in &self.metas {
            for method in holder.extension_methods() {
                let Some(extended) = method.extended_type() else { continue };
                if let Some((_, projection)) =
                    chain.iter().find(|(meta, _)| meta.type_id() == extended.id())
                {
                    found.push(method.clone().with_projection(projection.clone()));
                }
            }
        }
        found
    }

    /// Extension methods applicable to the type, filtered by name.
    pub fn extension_methods_named(&self, type_id: TypeId, name: &str) -> Vec<MethodInfo> {
        let mut found = self.extension_methods(type_id);
        found.retain(|method| method.name() == name);
        found
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.metas.iter().map(TypeMeta::ty))
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;
    use core::any::TypeId;

    use crate::Reflect;
    use crate::func::{ArgList, Return};
    use crate::info::{FieldInfo, MemberKind, MethodInfo, Type};
    use crate::registry::{GetTypeMeta, TypeMeta, TypeRegistry};

    #[derive(Clone, PartialEq, Debug, Default)]
    struct Shape {
        id: u32,
    }
    crate::impl_reflect_value!(Shape, "test::Shape");

    #[derive(Clone, PartialEq, Debug, Default)]
    struct Circle {
        shape: Shape,
        radius: f32,
    }
    crate::impl_reflect_value!(Circle, "test::Circle");

    struct ShapeExt;
    crate::impl_type_path!(ShapeExt, "test::ShapeExt");

    impl GetTypeMeta for Shape {
        fn get_type_meta() -> TypeMeta {
            TypeMeta::of::<Self>()
                .with_field(FieldInfo::new::<Self, u32>("id", |s| &s.id, |s| &mut s.id))
        }
    }

    impl GetTypeMeta for Circle {
        fn get_type_meta() -> TypeMeta {
            TypeMeta::of::<Self>()
                .with_base::<Self, Shape>(|c| &c.shape, |c| &mut c.shape)
                .with_field(FieldInfo::new::<Self, f32>("radius", |c| &c.radius, |c| &mut c.radius))
                .with_field(FieldInfo::new::<Self, u32>("id", |c| &c.shape.id, |c| &mut c.shape.id))
        }

        fn register_dependencies(registry: &mut TypeRegistry) {
            registry.register::<Shape>();
        }
    }

    impl GetTypeMeta for ShapeExt {
        fn get_type_meta() -> TypeMeta {
            TypeMeta::of::<Self>().with_method(MethodInfo::extension::<Self, _>(
                "describe",
                &[Type::of::<Shape>()],
                Type::of::<u32>(),
                |args| Ok(Return::owned(args.take_ref::<Shape>()?.id)),
            ))
        }
    }

    #[test]
    fn register_with_dependencies() {
        let mut registry = TypeRegistry::empty();
        registry.register::<Circle>();
        assert!(registry.contains(TypeId::of::<Shape>()));
        assert_eq!(registry.len(), 2);

        let chain: Vec<_> = registry
            .hierarchy(TypeId::of::<Circle>())
            .into_iter()
            .map(|(meta, projection)| (meta.ty().name(), projection.depth()))
            .collect();
        assert_eq!(chain, [("Circle", 0), ("Shape", 1)]);
    }

    #[test]
    fn derived_members_come_first() {
        let mut registry = TypeRegistry::empty();
        registry.register::<Circle>();

        let found = registry.find_members(TypeId::of::<Circle>(), "id");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].owner(), Type::of::<Circle>());
        assert_eq!(found[1].owner(), Type::of::<Shape>());
        assert_eq!(found[1].kind(), MemberKind::Field);

        let mut circle = Circle::default();
        let field = found[1].as_field().unwrap();
        field.set(&mut circle, 9_u32.into_boxed_reflect()).unwrap();
        assert_eq!(circle.shape.id, 9);
    }

    #[test]
    fn extension_methods_reach_derived_types() {
        let mut registry = TypeRegistry::empty();
        registry.register::<Circle>();
        registry.register::<ShapeExt>();

        assert!(registry.find_members(TypeId::of::<Shape>(), "describe").is_empty());
        let found = registry.extension_methods_named(TypeId::of::<Circle>(), "describe");
        assert_eq!(found.len(), 1);

        let mut circle = Circle::default();
        circle.shape.id = 4;
        let ret = found[0]
            .invoke(&mut circle, ArgList::new())
            .unwrap();
        assert_eq!(ret.take::<u32>().unwrap(), 4);
    }

    #[test]
    fn ambiguous_names_and_overwrite() {
        mod other {
            #[derive(Clone, PartialEq, Debug)]
            pub struct Shape;
            crate::impl_reflect_value!(Shape, "other::Shape");
            impl crate::registry::GetTypeMeta for Shape {
                fn get_type_meta() -> crate::registry::TypeMeta {
                    crate::registry::TypeMeta::of::<Self>()
                }
            }
        }

        let mut registry = TypeRegistry::new();
        registry.register::<Shape>();
        registry.register::<other::Shape>();
        assert!(registry.is_ambiguous("Shape"));
        assert!(registry.get_with_type_name("Shape").is_none());
        assert!(registry.get_with_type_path("other::Shape").is_some());

        let before = registry.len();
        registry.insert_type_meta(TypeMeta::of::<Shape>());
        assert_eq!(registry.len(), before);
        assert!(registry.find_members(TypeId::of::<Shape>(), "id").is_empty());
    }
}
