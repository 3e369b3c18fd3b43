use alloc::boxed::Box;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use core::hash::{Hash, Hasher};

use vc_reflect::Reflect;
use vc_reflect::func::{ArgList, ArgValue, Return};
use vc_reflect::info::{MemberInfo, MemberKind, MethodInfo, Signature, Type, TypePath};
use vc_scene::{ObjectId, ObjectKind, ObjectModel};

use crate::state::BindingState;
use crate::{BindingStage, MemberError, SourceKind};

// -----------------------------------------------------------------------------
// MemberBinding

/// A configured reference to a field, property or method of a host object.
///
/// A binding names a target object, an optional component (a behavior
/// attached to the target's game object) and a member. It resolves lazily:
///
/// 1. [`ensure_targeted`](Self::ensure_targeted) finds the object reflection
///    runs against.
/// 2. [`ensure_reflected`](Self::ensure_reflected) finds the member on that
///    object's type, its bases and the extension methods of those types.
///
/// Both results are cached until the inputs they depend on change. Every
/// access operation runs both steps first.
///
/// # Example
///
/// ```
/// use vc_member::{MemberBinding, SourceKind};
/// use vc_scene::{GameObject, Scene};
///
/// let mut scene = Scene::new();
/// let player = scene.spawn_game_object("player");
///
/// let mut binding = MemberBinding::new("active").with_target(player);
/// binding.set(&mut scene, Box::new(false)).unwrap();
///
/// assert_eq!(binding.source_kind(), SourceKind::Property);
/// assert!(!scene.get::<GameObject>(player).unwrap().active());
/// assert_eq!(binding.get_as::<bool>(&scene).unwrap(), false);
/// ```
#[derive(Clone, Default)]
pub struct MemberBinding {
    target: Option<ObjectId>,
    component: Option<String>,
    name: String,
    parameter_types: Option<Vec<Type>>,
    state: BindingState,
}

impl MemberBinding {
    /// Creates an unassigned binding to the member `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[inline]
    pub fn with_target(mut self, target: ObjectId) -> Self {
        self.set_target(Some(target));
        self
    }

    #[inline]
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.set_component(component);
        self
    }

    /// Selects a method overload by its exact parameter list.
    ///
    /// For extension methods the list starts with the extended type.
    #[inline]
    pub fn with_parameter_types(mut self, types: impl Into<Vec<Type>>) -> Self {
        self.set_parameter_types(Some(types.into()));
        self
    }

    // -------------------------------------------------------------------------
    // Inputs

    #[inline]
    pub fn target(&self) -> Option<ObjectId> {
        self.target
    }

    #[inline]
    pub fn component(&self) -> Option<&str> {
        self.component.as_deref()
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn parameter_types(&self) -> Option<&[Type]> {
        self.parameter_types.as_deref()
    }

    /// Changes the target and drops every cached result.
    pub fn set_target(&mut self, target: Option<ObjectId>) {
        self.target = target;
        self.state.reset();
    }

    /// Changes the component and drops every cached result.
    ///
    /// An empty name clears the component.
    pub fn set_component(&mut self, component: impl Into<String>) {
        let component: String = component.into();
        self.component = (!component.is_empty()).then_some(component);
        self.state.reset();
    }

    /// Changes the member name; the resolved target stays cached.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.state.forget_member();
    }

    /// Changes the overload selector; the resolved target stays cached.
    pub fn set_parameter_types(&mut self, types: Option<Vec<Type>>) {
        self.parameter_types = types;
        self.state.forget_member();
    }

    // -------------------------------------------------------------------------
    // Queries

    /// Returns `true` if a target and a member name are set.
    ///
    /// Says nothing about whether the binding resolves.
    #[inline]
    pub fn is_assigned(&self) -> bool {
        self.target.is_some() && !self.name.is_empty()
    }

    /// Returns `true` if the member is resolved and cached.
    #[inline]
    pub fn is_reflected(&self) -> bool {
        self.state.stage() == BindingStage::Reflected
    }

    #[inline]
    pub fn stage(&self) -> BindingStage {
        self.state.stage()
    }

    /// The kind of the cached member, [`SourceKind::Unknown`] before reflection.
    pub fn source_kind(&self) -> SourceKind {
        self.state
            .member()
            .map_or(SourceKind::Unknown, |member| member.kind().into())
    }

    /// Returns `true` if the cached member is an extension method.
    pub fn is_extension(&self) -> bool {
        self.state
            .member()
            .and_then(MemberInfo::as_method)
            .is_some_and(MethodInfo::is_extension)
    }

    /// The cached object reflection runs against.
    #[inline]
    pub fn resolved_target(&self) -> Option<ObjectId> {
        self.state.resolved_target()
    }

    /// The cached member descriptor.
    #[inline]
    pub fn member_info(&self) -> Option<&MemberInfo> {
        self.state.member()
    }

    /// Resolves the binding and returns `true` for methods.
    pub fn is_method<M: ObjectModel + ?Sized>(&mut self, model: &M) -> Result<bool, MemberError> {
        let (_, member) = self.ensure_reflected(model)?;
        Ok(member.kind() == MemberKind::Method)
    }

    /// Resolves the binding and returns the field type, the property type
    /// or the method return type.
    pub fn ty<M: ObjectModel + ?Sized>(&mut self, model: &M) -> Result<Type, MemberError> {
        let (_, member) = self.ensure_reflected(model)?;
        Ok(member.value_type())
    }

    // -------------------------------------------------------------------------
    // Target resolution

    /// Returns the object reflection runs against, resolving it if needed.
    ///
    /// - Game objects and behaviors resolve to the game object, or to its
    ///   behavior named by the component.
    /// - Assets resolve to themselves.
    /// - Other objects are rejected.
    pub fn ensure_targeted<M: ObjectModel + ?Sized>(
        &mut self,
        model: &M,
    ) -> Result<ObjectId, MemberError> {
        if let Some(resolved) = self.state.resolved_target() {
            if model.contains(resolved) {
                log::trace!("`{}` target cache hit", self.name);
                return Ok(resolved);
            }
        }

        let resolved = self.resolve_target(model)?;
        log::debug!(
            "`{}` targets {resolved:?} through {:?}",
            self.name,
            self.target
        );
        self.state.target(resolved);
        Ok(resolved)
    }

    fn resolve_target<M: ObjectModel + ?Sized>(&self, model: &M) -> Result<ObjectId, MemberError> {
        let target = self.target.ok_or(MemberError::UnresolvedTarget)?;
        let kind = model
            .kind(target)
            .ok_or(MemberError::DanglingTarget(target))?;

        match kind {
            ObjectKind::GameObject | ObjectKind::Behavior => {
                let game_object = match kind {
                    ObjectKind::Behavior => model
                        .owner(target)
                        .ok_or(MemberError::DanglingTarget(target))?,
                    _ => target,
                };
                match &self.component {
                    Some(component) => model.find_behavior(game_object, component).ok_or_else(
                        || MemberError::ComponentNotFound {
                            game_object,
                            component: component.clone(),
                        },
                    ),
                    None => Ok(game_object),
                }
            }
            ObjectKind::Asset => Ok(target),
            ObjectKind::Opaque => Err(MemberError::UnsupportedTargetKind { target, kind }),
        }
    }

    // -------------------------------------------------------------------------
    // Member resolution

    /// Returns the resolved target and member, resolving them if needed.
    ///
    /// A failed resolution leaves the cached state untouched.
    pub fn ensure_reflected<M: ObjectModel + ?Sized>(
        &mut self,
        model: &M,
    ) -> Result<(ObjectId, &MemberInfo), MemberError> {
        let target = self.ensure_targeted(model)?;
        let member = match self.state.take_member() {
            Some(member) => {
                log::trace!("`{}` member cache hit", self.name);
                member
            }
            None => {
                let member = self.resolve_member(model, target)?;
                log::debug!(
                    "`{}` resolved to {} of `{}`",
                    self.name,
                    member.kind(),
                    member.owner().path()
                );
                member
            }
        };
        Ok((target, self.state.reflect(target, member)))
    }

    /// Resolves target and member again, ignoring the cache.
    ///
    /// On failure the previous state is kept.
    pub fn reflect<M: ObjectModel + ?Sized>(&mut self, model: &M) -> Result<(), MemberError> {
        let target = self.resolve_target(model)?;
        let member = self.resolve_member(model, target)?;
        self.state.reflect(target, member);
        Ok(())
    }

    fn resolve_member<M: ObjectModel + ?Sized>(
        &self,
        model: &M,
        target: ObjectId,
    ) -> Result<MemberInfo, MemberError> {
        if self.name.is_empty() {
            return Err(MemberError::Unassigned);
        }
        let object = model
            .object(target)
            .ok_or(MemberError::DanglingTarget(target))?;
        let registry = model.registry();
        let type_id = object.ty_id();
        let owner = registry
            .get(type_id)
            .ok_or(MemberError::UnregisteredType(object.reflect_type_path()))?
            .ty()
            .path();

        let members = registry.find_members(type_id, &self.name);
        let extensions = registry.extension_methods_named(type_id, &self.name);

        let kind = match members.first() {
            Some(first) => first.kind(),
            None if !extensions.is_empty() => MemberKind::Method,
            None => {
                return Err(MemberError::MemberNotFound {
                    owner,
                    name: self.name.clone(),
                });
            }
        };

        match kind {
            MemberKind::Field | MemberKind::Property => {
                let mut members = members;
                Ok(members.swap_remove(0))
            }
            MemberKind::Method => {
                let methods = members.into_iter().filter_map(|member| match member {
                    MemberInfo::Method(method) => Some(method),
                    _ => None,
                });
                self.select_method(owner, methods.collect(), extensions)
                    .map(MemberInfo::Method)
            }
        }
    }

    fn select_method(
        &self,
        owner: &'static str,
        methods: Vec<MethodInfo>,
        extensions: Vec<MethodInfo>,
    ) -> Result<MethodInfo, MemberError> {
        if let Some(types) = &self.parameter_types {
            return methods
                .into_iter()
                .find(|method| method.matches(types))
                .or_else(|| {
                    extensions
                        .into_iter()
                        .find(|method| method.matches(types))
                })
                .ok_or_else(|| MemberError::MethodNotFound {
                    owner,
                    signature: format!("{}{}", self.name, Signature(types)),
                });
        }

        let mut candidates = methods;
        candidates.extend(extensions);
        match candidates.len() {
            0 => Err(MemberError::MethodNotFound {
                owner,
                signature: self.name.clone(),
            }),
            1 => Ok(candidates.swap_remove(0)),
            _ => Err(MemberError::AmbiguousMethod {
                owner,
                name: self.name.clone(),
                candidates: candidates
                    .iter()
                    .map(|method| method.signature().to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            }),
        }
    }

    // -------------------------------------------------------------------------
    // Access

    /// Reads a field or property.
    pub fn get<M: ObjectModel + ?Sized>(
        &mut self,
        model: &M,
    ) -> Result<Box<dyn Reflect>, MemberError> {
        let (target, member) = self.ensure_reflected(model)?;
        let object = model
            .object(target)
            .ok_or(MemberError::DanglingTarget(target))?;
        match member {
            MemberInfo::Field(field) => Ok(field.get(object)?),
            MemberInfo::Property(property) => Ok(property.get(object)?),
            MemberInfo::Method(_) => Err(invalid_access(member, "get")),
        }
    }

    /// Writes a field or property.
    pub fn set<M: ObjectModel + ?Sized>(
        &mut self,
        model: &mut M,
        value: Box<dyn Reflect>,
    ) -> Result<(), MemberError> {
        let (target, member) = self.ensure_reflected(&*model)?;
        let object = model
            .object_mut(target)
            .ok_or(MemberError::DanglingTarget(target))?;
        match member {
            MemberInfo::Field(field) => Ok(field.set(object, value)?),
            MemberInfo::Property(property) => Ok(property.set(object, value)?),
            MemberInfo::Method(_) => Err(invalid_access(member, "set")),
        }
    }

    /// Calls a method.
    ///
    /// Extension methods receive the resolved target as first argument;
    /// `args` holds the remaining ones.
    pub fn invoke<'a, M: ObjectModel + ?Sized>(
        &mut self,
        model: &'a mut M,
        args: ArgList<'a>,
    ) -> Result<Return, MemberError> {
        let (target, member) = self.ensure_reflected(&*model)?;
        match member {
            MemberInfo::Method(method) => call(model, target, method, args),
            _ => Err(invalid_access(member, "invoke")),
        }
    }

    /// Calls a method, or writes the single argument to a field or property.
    ///
    /// For fields and properties, returns the written value.
    pub fn invoke_or_set<'a, M: ObjectModel + ?Sized>(
        &mut self,
        model: &'a mut M,
        mut args: ArgList<'a>,
    ) -> Result<Return, MemberError> {
        let (target, member) = self.ensure_reflected(&*model)?;
        if let MemberInfo::Method(method) = member {
            return call(model, target, method, args);
        }
        if args.len() != 1 {
            return Err(MemberError::Arity {
                expected: 1,
                received: args.len(),
            });
        }
        let value = match args.take_arg().map_err(vc_reflect::func::CallError::from)? {
            ArgValue::Owned(value) => value,
            borrowed => borrowed.value().reflect_clone(),
        };
        let written = value.reflect_clone();
        self.set(model, value)?;
        Ok(Return::Owned(written))
    }

    /// Calls a method, or reads a field or property when `args` is empty.
    pub fn get_or_invoke<'a, M: ObjectModel + ?Sized>(
        &mut self,
        model: &'a mut M,
        args: ArgList<'a>,
    ) -> Result<Return, MemberError> {
        let (target, member) = self.ensure_reflected(&*model)?;
        if let MemberInfo::Method(method) = member {
            return call(model, target, method, args);
        }
        if !args.is_empty() {
            return Err(MemberError::Arity {
                expected: 0,
                received: args.len(),
            });
        }
        self.get(&*model).map(Return::Owned)
    }

    // -------------------------------------------------------------------------
    // Typed access

    /// [`get`](Self::get), then takes the value as `T`.
    pub fn get_as<T: Reflect + TypePath>(
        &mut self,
        model: &(impl ObjectModel + ?Sized),
    ) -> Result<T, MemberError> {
        cast(self.get(model)?)
    }

    /// [`set`](Self::set) with an unboxed value.
    pub fn set_as<T: Reflect>(
        &mut self,
        model: &mut (impl ObjectModel + ?Sized),
        value: T,
    ) -> Result<(), MemberError> {
        self.set(model, Box::new(value))
    }

    /// [`invoke`](Self::invoke), then takes the return value as `T`.
    ///
    /// Methods without value return `()`.
    pub fn invoke_as<'a, T: Reflect + TypePath>(
        &mut self,
        model: &'a mut (impl ObjectModel + ?Sized),
        args: ArgList<'a>,
    ) -> Result<T, MemberError> {
        cast(self.invoke(model, args)?.into_owned())
    }

    /// [`invoke_or_set`](Self::invoke_or_set), then takes the result as `T`.
    pub fn invoke_or_set_as<'a, T: Reflect + TypePath>(
        &mut self,
        model: &'a mut (impl ObjectModel + ?Sized),
        args: ArgList<'a>,
    ) -> Result<T, MemberError> {
        cast(self.invoke_or_set(model, args)?.into_owned())
    }

    /// [`get_or_invoke`](Self::get_or_invoke), then takes the result as `T`.
    pub fn get_or_invoke_as<'a, T: Reflect + TypePath>(
        &mut self,
        model: &'a mut (impl ObjectModel + ?Sized),
        args: ArgList<'a>,
    ) -> Result<T, MemberError> {
        cast(self.get_or_invoke(model, args)?.into_owned())
    }
}

// -----------------------------------------------------------------------------
// Helpers

#[cold]
fn invalid_access(member: &MemberInfo, operation: &'static str) -> MemberError {
    MemberError::InvalidAccess {
        member: member.name().to_string(),
        kind: member.kind(),
        operation,
    }
}

// The argument list borrows for as long as the model, the receiver joins it.
fn call<'a, M: ObjectModel + ?Sized>(
    model: &'a mut M,
    target: ObjectId,
    method: &MethodInfo,
    args: ArgList<'a>,
) -> Result<Return, MemberError> {
    let object = model
        .object_mut(target)
        .ok_or(MemberError::DanglingTarget(target))?;
    Ok(method.invoke(object, args)?)
}

fn cast<T: Reflect + TypePath>(value: Box<dyn Reflect>) -> Result<T, MemberError> {
    value.take::<T>().map_err(|value| MemberError::Cast {
        expected: T::type_path(),
        received: value.reflect_type_path(),
    })
}

// -----------------------------------------------------------------------------
// Equality

/// Bindings are equal when they name the same target, component, member
/// and overload. Cached state is ignored.
impl PartialEq for MemberBinding {
    fn eq(&self, other: &Self) -> bool {
        self.target == other.target
            && self.component == other.component
            && self.name == other.name
            && self.parameter_types == other.parameter_types
    }
}

impl Eq for MemberBinding {}

impl Hash for MemberBinding {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.target.hash(state);
        self.component.hash(state);
        self.name.hash(state);
        self.parameter_types.hash(state);
    }
}

impl fmt::Debug for MemberBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberBinding")
            .field("target", &self.target)
            .field("component", &self.component)
            .field("name", &self.name)
            .field("parameter_types", &self.parameter_types)
            .field("stage", &self.stage())
            .finish()
    }
}

/// Writes `component.name(params)`, omitting the parts that are not set.
impl fmt::Display for MemberBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(component) = &self.component {
            write!(f, "{component}.")?;
        }
        f.write_str(&self.name)?;
        if let Some(types) = &self.parameter_types {
            write!(f, "{}", Signature(types))?;
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;
    use alloc::vec;

    use vc_reflect::func::{ArgList, CallError, Return};
    use vc_reflect::info::{AccessError, FieldInfo, MemberKind, MethodInfo, PropertyInfo, Type};
    use vc_reflect::registry::{GetTypeMeta, TypeMeta, TypeRegistry};
    use vc_scene::{GameObject, ObjectId, Scene, Transform, Vec3};

    use super::MemberBinding;
    use crate::{BindingStage, MemberError, SourceKind};

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Health {
        current: i32,
        max: i32,
    }

    vc_reflect::impl_reflect_value!(Health, "game::Health");

    impl GetTypeMeta for Health {
        fn get_type_meta() -> TypeMeta {
            TypeMeta::of::<Self>()
                .with_field(FieldInfo::new::<Self, i32>(
                    "current",
                    |h| &h.current,
                    |h| &mut h.current,
                ))
                .with_property(PropertyInfo::read_only::<Self, i32>("max", |h| h.max))
                .with_method(MethodInfo::instance::<Self, _>(
                    "heal",
                    &[Type::of::<i32>()],
                    Type::of::<i32>(),
                    |h, args| {
                        h.current = (h.current + args.take_owned::<i32>()?).min(h.max);
                        Ok(Return::owned(h.current))
                    },
                ))
                .with_method(MethodInfo::instance::<Self, _>(
                    "absorb",
                    &[Type::of::<Health>(), Type::of::<i32>()],
                    Type::of::<i32>(),
                    |h, args| {
                        let other = args.take_owned::<Health>()?;
                        h.current += other.current + args.take_owned::<i32>()?;
                        Ok(Return::owned(h.current))
                    },
                ))
        }
    }

    #[derive(Debug, Clone, PartialEq, Default)]
    struct BossHealth {
        health: Health,
        shield: i32,
    }

    vc_reflect::impl_reflect_value!(BossHealth, "game::BossHealth");

    impl GetTypeMeta for BossHealth {
        fn get_type_meta() -> TypeMeta {
            TypeMeta::of::<Self>()
                .with_base::<Self, Health>(|b| &b.health, |b| &mut b.health)
                .with_field(FieldInfo::new::<Self, i32>(
                    "shield",
                    |b| &b.shield,
                    |b| &mut b.shield,
                ))
        }

        fn register_dependencies(registry: &mut TypeRegistry) {
            registry.register::<Health>();
        }
    }

    struct HealthExt;

    vc_reflect::impl_type_path!(HealthExt, "game::HealthExt");

    impl GetTypeMeta for HealthExt {
        fn get_type_meta() -> TypeMeta {
            TypeMeta::of::<Self>()
                .with_method(MethodInfo::extension::<Self, _>(
                    "clamp",
                    &[Type::of::<Health>(), Type::of::<i32>()],
                    Type::of::<i32>(),
                    |args| {
                        let health = args.take_ref::<Health>()?;
                        let limit = args.take_owned::<i32>()?;
                        Ok(Return::owned(health.current.min(limit)))
                    },
                ))
                .with_method(MethodInfo::extension::<Self, _>(
                    "clamp",
                    &[Type::of::<Health>(), Type::of::<i32>(), Type::of::<i32>()],
                    Type::of::<i32>(),
                    |args| {
                        let health = args.take_ref::<Health>()?;
                        let low = args.take_owned::<i32>()?;
                        let high = args.take_owned::<i32>()?;
                        Ok(Return::owned(health.current.clamp(low, high)))
                    },
                ))
                .with_method(MethodInfo::extension::<Self, _>(
                    "is_full",
                    &[Type::of::<Health>()],
                    Type::of::<bool>(),
                    |args| {
                        let health = args.take_ref::<Health>()?;
                        Ok(Return::owned(health.current >= health.max))
                    },
                ))
                .with_method(MethodInfo::extension::<Self, _>(
                    "absorb",
                    &[Type::of::<Health>(), Type::of::<i32>()],
                    Type::of::<i32>(),
                    |args| {
                        let health = args.take_ref::<Health>()?;
                        Ok(Return::owned(health.current))
                    },
                ))
        }

        fn register_dependencies(registry: &mut TypeRegistry) {
            registry.register::<Health>();
        }
    }

    fn scene() -> Scene {
        let mut scene = Scene::new();
        scene.registry_mut().register::<BossHealth>();
        scene.registry_mut().register::<HealthExt>();
        scene
    }

    fn transform_of(scene: &Scene, game_object: ObjectId) -> ObjectId {
        scene.get::<GameObject>(game_object).unwrap().transform()
    }

    // Scenario A
    #[test]
    fn property_reads_transform_handle() {
        let mut scene = scene();
        let player = scene.spawn_game_object("player");

        let mut binding = MemberBinding::new("transform").with_target(player);
        let transform = binding.get_as::<ObjectId>(&scene).unwrap();

        assert_eq!(transform, transform_of(&scene, player));
        assert_eq!(binding.source_kind(), SourceKind::Property);
        assert!(!binding.is_extension());
        assert_eq!(binding.ty(&scene), Ok(Type::of::<ObjectId>()));
    }

    // Scenario B
    #[test]
    fn explicit_parameter_types_select_overload() {
        let mut scene = scene();
        let player = scene.spawn_game_object("player");
        let transform = transform_of(&scene, player);

        let mut binding = MemberBinding::new("translate")
            .with_target(transform)
            .with_component("Transform")
            .with_parameter_types([Type::of::<Vec3>()]);

        let args = ArgList::new().with_owned(Vec3::ONE);
        assert_eq!(binding.invoke(&mut scene, args).map(|ret| ret.is_unit()), Ok(true));
        assert_eq!(binding.resolved_target(), Some(transform));
        assert!(!binding.is_extension());
        assert_eq!(
            binding.member_info().and_then(|m| m.as_method()).map(|m| m.params().len()),
            Some(1)
        );

        binding.set_parameter_types(Some(vec![Type::of::<f32>(); 3]));
        let args = ArgList::new().with_owned(1.0_f32).with_owned(0.0_f32).with_owned(0.0_f32);
        binding.invoke(&mut scene, args).unwrap();

        let position = scene.get::<Transform>(transform).unwrap().position;
        assert_eq!(position, Vec3::new(2.0, 1.0, 1.0));

        binding.set_parameter_types(None);
        assert!(matches!(
            binding.ensure_reflected(&scene),
            Err(MemberError::AmbiguousMethod { .. })
        ));
    }

    // Scenario C
    #[test]
    fn implicit_extension_overloads_are_ambiguous() {
        let mut scene = scene();
        let asset = scene.create_asset(Health { current: 3, max: 10 });

        let mut binding = MemberBinding::new("clamp").with_target(asset);
        let err = binding.ensure_reflected(&scene).unwrap_err();
        let MemberError::AmbiguousMethod { candidates, .. } = err else {
            panic!("unexpected error: {err:?}");
        };
        assert_eq!(candidates, "clamp(Health, i32), clamp(Health, i32, i32)");
        assert_eq!(binding.stage(), BindingStage::Targeted);
    }

    // Scenario D
    #[test]
    fn missing_component_fails_every_access() {
        let mut scene = scene();
        let player = scene.spawn_game_object("player");

        let mut binding = MemberBinding::new("mass")
            .with_target(player)
            .with_component("Rigidbody");
        let expected = MemberError::ComponentNotFound {
            game_object: player,
            component: String::from("Rigidbody"),
        };

        assert_eq!(binding.get(&scene).unwrap_err(), expected);
        assert_eq!(binding.set(&mut scene, Box::new(1.0_f32)).unwrap_err(), expected);
        assert_eq!(binding.stage(), BindingStage::Unresolved);
    }

    // Scenario E
    #[test]
    fn invoke_or_set_writes_fields() {
        let mut scene = scene();
        let asset = scene.create_asset(Health::default());

        let mut binding = MemberBinding::new("current").with_target(asset);
        let written = binding
            .invoke_or_set_as::<i32>(&mut scene, ArgList::new().with_owned(5_i32))
            .unwrap();
        assert_eq!(written, 5);
        assert_eq!(scene.get::<Health>(asset).unwrap().current, 5);

        let args = ArgList::new().with_owned(5_i32).with_owned(6_i32);
        assert_eq!(
            binding.invoke_or_set(&mut scene, args).unwrap_err(),
            MemberError::Arity {
                expected: 1,
                received: 2,
            }
        );

        let value = 8_i32;
        binding
            .invoke_or_set(&mut scene, ArgList::new().with_ref(&value))
            .unwrap();
        assert_eq!(binding.get_or_invoke_as::<i32>(&mut scene, ArgList::new()), Ok(8));
    }

    #[test]
    fn resolution_is_cached() {
        let mut scene = scene();
        let asset = scene.create_asset(Health { current: 4, max: 10 });

        let mut binding = MemberBinding::new("current").with_target(asset);
        assert_eq!(binding.get_as::<i32>(&scene), Ok(4));

        scene
            .registry_mut()
            .insert_type_meta(TypeMeta::of::<Health>());

        assert!(binding.is_reflected());
        assert_eq!(binding.get_as::<i32>(&scene), Ok(4));

        let err = binding.reflect(&scene).unwrap_err();
        assert!(matches!(err, MemberError::MemberNotFound { owner: "game::Health", .. }));
        assert!(binding.is_reflected());
        assert_eq!(binding.source_kind(), SourceKind::Field);
    }

    #[test]
    fn input_changes_invalidate() {
        let mut scene = scene();
        let player = scene.spawn_game_object("player");

        let mut binding = MemberBinding::new("active").with_target(player);
        binding.ensure_reflected(&scene).unwrap();
        assert_eq!(binding.stage(), BindingStage::Reflected);

        binding.set_name("tag");
        assert_eq!(binding.stage(), BindingStage::Targeted);
        assert_eq!(binding.source_kind(), SourceKind::Unknown);
        assert_eq!(binding.ty(&scene), Ok(Type::of::<String>()));
        assert_eq!(binding.source_kind(), SourceKind::Field);

        binding.set_component("Transform");
        assert_eq!(binding.stage(), BindingStage::Unresolved);
        assert!(matches!(
            binding.ensure_reflected(&scene),
            Err(MemberError::MemberNotFound { .. })
        ));

        binding.set_component("");
        assert_eq!(binding.component(), None);
        binding.set_target(None);
        assert!(!binding.is_assigned());
        assert_eq!(binding.ensure_targeted(&scene), Err(MemberError::UnresolvedTarget));
    }

    #[test]
    fn member_kinds_are_exclusive() {
        let mut scene = scene();
        let player = scene.spawn_game_object("player");

        for (name, kind) in [
            ("tag", SourceKind::Field),
            ("name", SourceKind::Property),
            ("set_active", SourceKind::Method),
        ] {
            let mut binding = MemberBinding::new(name).with_target(player);
            let (_, member) = binding.ensure_reflected(&scene).unwrap();
            assert_eq!(SourceKind::from(member.kind()), kind);
            assert_eq!(binding.source_kind(), kind);
        }

        let mut method = MemberBinding::new("set_active").with_target(player);
        assert_eq!(
            method.get(&scene).unwrap_err(),
            MemberError::InvalidAccess {
                member: String::from("set_active"),
                kind: MemberKind::Method,
                operation: "get",
            }
        );
        let mut field = MemberBinding::new("tag").with_target(player);
        assert!(matches!(
            field.invoke(&mut scene, ArgList::new()),
            Err(MemberError::InvalidAccess { kind: MemberKind::Field, .. })
        ));
        assert_eq!(method.is_method(&scene), Ok(true));
        assert_eq!(method.ty(&scene), Ok(Type::unit()));
    }

    #[test]
    fn extension_receives_resolved_target_first() {
        let mut scene = scene();
        let boss = scene.create_asset(BossHealth {
            health: Health { current: 7, max: 20 },
            shield: 2,
        });

        let mut clamp = MemberBinding::new("clamp")
            .with_target(boss)
            .with_parameter_types([Type::of::<Health>(), Type::of::<i32>()]);
        assert_eq!(clamp.invoke_as::<i32>(&mut scene, ArgList::new().with_owned(5_i32)), Ok(5));
        assert_eq!(clamp.invoke_as::<i32>(&mut scene, ArgList::new().with_owned(10_i32)), Ok(7));
        assert!(clamp.is_extension());

        let args = ArgList::new().with_owned(String::from("five"));
        assert!(matches!(
            clamp.invoke(&mut scene, args),
            Err(MemberError::Call(CallError::Arg(_)))
        ));

        clamp.set_parameter_types(Some(vec![Type::of::<i32>()]));
        assert!(matches!(
            clamp.ensure_reflected(&scene),
            Err(MemberError::MethodNotFound { signature, .. }) if signature == "clamp(i32)"
        ));
    }

    #[test]
    fn inherited_members_resolve_through_base() {
        let mut scene = scene();
        let boss = scene.create_asset(BossHealth {
            health: Health { current: 7, max: 20 },
            shield: 2,
        });

        let mut current = MemberBinding::new("current").with_target(boss);
        current.set_as(&mut scene, 12_i32).unwrap();
        assert_eq!(scene.get::<BossHealth>(boss).unwrap().health.current, 12);

        let mut heal = MemberBinding::new("heal").with_target(boss);
        assert_eq!(heal.invoke_as::<i32>(&mut scene, ArgList::new().with_owned(30_i32)), Ok(20));

        let mut shield = MemberBinding::new("shield").with_target(boss);
        assert_eq!(shield.get_as::<i32>(&scene), Ok(2));
    }

    #[test]
    fn extension_only_names_resolve_to_methods() {
        let mut scene = scene();
        let asset = scene.create_asset(Health { current: 10, max: 10 });

        let mut is_full = MemberBinding::new("is_full").with_target(asset);
        assert_eq!(is_full.invoke_as::<bool>(&mut scene, ArgList::new()), Ok(true));
        assert_eq!(is_full.source_kind(), SourceKind::Method);
        assert!(is_full.is_extension());
        assert_eq!(is_full.ty(&scene), Ok(Type::of::<bool>()));

        let mut current = MemberBinding::new("current").with_target(asset);
        current.set_as(&mut scene, 4_i32).unwrap();
        assert_eq!(is_full.get_or_invoke_as::<bool>(&mut scene, ArgList::new()), Ok(false));
    }

    #[test]
    fn static_methods_ignore_the_receiver() {
        let mut scene = scene();
        let asset = scene.create_asset(Vec3::new(1.0, 2.0, 3.0));

        let mut splat = MemberBinding::new("splat").with_target(asset);
        let args = ArgList::new().with_owned(2.0_f32);
        assert_eq!(splat.invoke_as::<Vec3>(&mut scene, args), Ok(Vec3::splat(2.0)));
        assert_eq!(splat.source_kind(), SourceKind::Method);
        assert!(!splat.is_extension());
        assert_eq!(scene.get::<Vec3>(asset), Some(&Vec3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn explicit_selection_prefers_ordinary_methods() {
        let mut scene = scene();
        let asset = scene.create_asset(Health { current: 3, max: 10 });
        let params = [Type::of::<Health>(), Type::of::<i32>()];

        let mut absorb = MemberBinding::new("absorb")
            .with_target(asset)
            .with_parameter_types(params);
        let args = ArgList::new()
            .with_owned(Health { current: 2, max: 0 })
            .with_owned(1_i32);
        assert_eq!(absorb.invoke_as::<i32>(&mut scene, args), Ok(6));
        assert!(!absorb.is_extension());
        assert_eq!(scene.get::<Health>(asset).unwrap().current, 6);

        absorb.set_parameter_types(None);
        let err = absorb.ensure_reflected(&scene).unwrap_err();
        let MemberError::AmbiguousMethod { candidates, .. } = err else {
            panic!("unexpected error: {err:?}");
        };
        assert_eq!(candidates, "absorb(Health, i32), absorb(Health, i32)");
    }

    #[test]
    fn read_only_property_rejects_writes() {
        let mut scene = scene();
        let asset = scene.create_asset(Health { current: 1, max: 10 });

        let mut max = MemberBinding::new("max").with_target(asset);
        assert_eq!(max.get_as::<i32>(&scene), Ok(10));
        assert_eq!(
            max.set(&mut scene, Box::new(11_i32)),
            Err(MemberError::Access(AccessError::ReadOnly { member: "max" }))
        );

        let mut current = MemberBinding::new("current").with_target(asset);
        assert!(matches!(
            current.set(&mut scene, Box::new(1.5_f32)),
            Err(MemberError::Access(AccessError::MismatchedType { .. }))
        ));
        assert!(matches!(
            current.get_as::<u8>(&scene),
            Err(MemberError::Cast { expected: "u8", received: "i32" })
        ));
    }

    #[test]
    fn target_kinds() {
        let mut scene = scene();
        let player = scene.spawn_game_object("player");
        let transform = transform_of(&scene, player);

        let mut binding = MemberBinding::new("name").with_target(transform);
        assert_eq!(binding.ensure_targeted(&scene), Ok(player));
        assert_eq!(binding.get_as::<String>(&scene), Ok(String::from("player")));

        let opaque = scene.spawn_opaque(3_u8);
        binding.set_target(Some(opaque));
        assert!(matches!(
            binding.ensure_targeted(&scene),
            Err(MemberError::UnsupportedTargetKind { .. })
        ));

        binding.set_target(Some(player));
        binding.ensure_reflected(&scene).unwrap();
        scene.despawn(player);
        assert_eq!(binding.get(&scene).unwrap_err(), MemberError::DanglingTarget(player));

        let mut unnamed = MemberBinding::default().with_target(transform);
        assert_eq!(unnamed.ensure_reflected(&scene).unwrap_err(), MemberError::DanglingTarget(transform));
        let asset = scene.create_asset(Vec3::ZERO);
        unnamed.set_target(Some(asset));
        assert_eq!(unnamed.ensure_reflected(&scene).unwrap_err(), MemberError::Unassigned);

        let mut empty = Scene::with_registry(TypeRegistry::empty());
        let asset = empty.create_asset(Health::default());
        let mut bare = MemberBinding::new("current").with_target(asset);
        assert_eq!(
            bare.ensure_reflected(&empty).unwrap_err(),
            MemberError::UnregisteredType("game::Health")
        );
    }

    #[test]
    fn equality_ignores_cache() {
        let mut scene = scene();
        let player = scene.spawn_game_object("player");

        let mut resolved = MemberBinding::new("translate")
            .with_target(player)
            .with_component("Transform")
            .with_parameter_types([Type::of::<Vec3>()]);
        resolved.ensure_reflected(&scene).unwrap();

        let fresh = MemberBinding::new("translate")
            .with_target(player)
            .with_component("Transform")
            .with_parameter_types([Type::of::<Vec3>()]);
        assert_eq!(resolved, fresh);
        assert_eq!(alloc::format!("{fresh}"), "Transform.translate(Vec3)");

        let other = fresh.clone().with_parameter_types([Type::of::<f32>(); 3]);
        assert_ne!(other, fresh);
    }
}
