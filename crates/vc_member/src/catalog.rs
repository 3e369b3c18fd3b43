//! Enumeration of the members a binding can point at.
//!
//! Editors list these options so a user can pick a member instead of
//! typing its name. Each [`MemberOption`] converts to a [`MemberBinding`]
//! that resolves back to the listed member.

use alloc::borrow::ToOwned;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use vc_reflect::info::{MemberInfo, MemberKind, MethodInfo, Signature, Type, Visibility};
use vc_scene::{ObjectId, ObjectKind, ObjectModel};

use crate::{MemberBinding, MemberError};

// -----------------------------------------------------------------------------
// MemberFilter

/// Which members [`member_options`] lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberFilter {
    pub fields: bool,
    pub properties: bool,
    pub methods: bool,
    pub extensions: bool,
    /// Also list [`Visibility::NonPublic`] members.
    pub non_public: bool,
}

impl Default for MemberFilter {
    fn default() -> Self {
        Self {
            fields: true,
            properties: true,
            methods: true,
            extensions: true,
            non_public: false,
        }
    }
}

impl MemberFilter {
    /// Fields and properties only.
    pub const VALUES: Self = Self {
        fields: true,
        properties: true,
        methods: false,
        extensions: false,
        non_public: false,
    };

    /// Methods and extension methods only.
    pub const METHODS: Self = Self {
        fields: false,
        properties: false,
        methods: true,
        extensions: true,
        non_public: false,
    };

    fn accepts(&self, member: &MemberInfo) -> bool {
        if member.visibility() == Visibility::NonPublic && !self.non_public {
            return false;
        }
        match member {
            MemberInfo::Field(_) => self.fields,
            MemberInfo::Property(_) => self.properties,
            MemberInfo::Method(method) if method.is_extension() => self.extensions,
            MemberInfo::Method(_) => self.methods,
        }
    }
}

// -----------------------------------------------------------------------------
// MemberOption

/// A member found by [`member_options`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberOption {
    /// The behavior declaring the member, `None` for the host object itself.
    pub component: Option<&'static str>,
    pub name: &'static str,
    pub kind: MemberKind,
    /// Field type, property type or method return type.
    pub value_type: Type,
    /// Full parameter list of a method, receiver first for extensions.
    pub parameter_types: Option<Vec<Type>>,
    pub is_extension: bool,
}

impl MemberOption {
    fn new(component: Option<&'static str>, member: &MemberInfo) -> Self {
        let method = member.as_method();
        Self {
            component,
            name: member.name(),
            kind: member.kind(),
            value_type: member.value_type(),
            parameter_types: method.map(|method| method.params().to_vec()),
            is_extension: method.is_some_and(MethodInfo::is_extension),
        }
    }

    /// A display label such as `Transform.translate(Vec3)`.
    pub fn label(&self) -> String {
        let mut label = match self.component {
            Some(component) => format!("{component}.{}", self.name),
            None => self.name.to_owned(),
        };
        if let Some(types) = &self.parameter_types {
            label.push_str(&format!("{}", Signature(types)));
        }
        label
    }

    /// Builds a binding to this member on `target`.
    ///
    /// Methods get explicit parameter types so overloads stay apart.
    pub fn to_binding(&self, target: ObjectId) -> MemberBinding {
        let mut binding = MemberBinding::new(self.name).with_target(target);
        if let Some(component) = self.component {
            binding.set_component(component);
        }
        binding.set_parameter_types(self.parameter_types.clone());
        binding
    }

    fn same_member(&self, other: &Self) -> bool {
        self.component == other.component
            && self.name == other.name
            && self.parameter_types == other.parameter_types
    }
}

// -----------------------------------------------------------------------------
// member_options

/// Lists the bindable members of `target`.
///
/// Walks the host (the game object, or the asset itself) and then every
/// behavior attached to the game object, in attachment order. For each
/// object, members of the type come before members of its bases, extension
/// methods come last. A member shadowed by a derived member of the same
/// name and signature is listed once.
///
/// # Example
///
/// ```
/// use vc_member::catalog::{MemberFilter, member_options};
/// use vc_scene::Scene;
///
/// let mut scene = Scene::new();
/// let player = scene.spawn_game_object("player");
///
/// let options = member_options(&scene, player, &MemberFilter::default()).unwrap();
/// let labels: Vec<_> = options.iter().map(|option| option.label()).collect();
/// assert!(labels.contains(&"active".to_string()));
/// assert!(labels.contains(&"Transform.translate(Vec3)".to_string()));
/// assert!(labels.contains(&"Transform.distance_to(Transform, Vec3)".to_string()));
/// ```
pub fn member_options<M: ObjectModel + ?Sized>(
    model: &M,
    target: ObjectId,
    filter: &MemberFilter,
) -> Result<Vec<MemberOption>, MemberError> {
    let kind = model.kind(target).ok_or(MemberError::DanglingTarget(target))?;
    let host = match kind {
        ObjectKind::GameObject | ObjectKind::Asset => target,
        ObjectKind::Behavior => model
            .owner(target)
            .ok_or(MemberError::DanglingTarget(target))?,
        ObjectKind::Opaque => return Err(MemberError::UnsupportedTargetKind { target, kind }),
    };

    let mut options = Vec::new();
    collect_options(model, host, None, filter, &mut options);
    if model.kind(host) == Some(ObjectKind::GameObject) {
        for &behavior in model.behaviors(host) {
            let Some(object) = model.object(behavior) else {
                continue;
            };
            let component = Some(object.reflect_type_name());
            collect_options(model, behavior, component, filter, &mut options);
        }
    }
    log::trace!("listed {} members of {target:?}", options.len());
    Ok(options)
}

fn collect_options<M: ObjectModel + ?Sized>(
    model: &M,
    id: ObjectId,
    component: Option<&'static str>,
    filter: &MemberFilter,
    options: &mut Vec<MemberOption>,
) {
    let Some(object) = model.object(id) else {
        return;
    };
    let registry = model.registry();
    let type_id = object.ty_id();
    if !registry.contains(type_id) {
        log::debug!("`{}` is not registered, no members listed", object.reflect_type_path());
        return;
    }

    let start = options.len();
    let members = registry
        .hierarchy(type_id)
        .into_iter()
        .flat_map(|(meta, _)| meta.members().iter().cloned())
        .filter(|member| !member.as_method().is_some_and(MethodInfo::is_extension))
        .chain(
            registry
                .extension_methods(type_id)
                .into_iter()
                .map(MemberInfo::Method),
        );

    for member in members {
        if !filter.accepts(&member) {
            continue;
        }
        let option = MemberOption::new(component, &member);
        if !options[start..].iter().any(|known| known.same_member(&option)) {
            options.push(option);
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec;

    use vc_reflect::info::{MemberKind, Type};
    use vc_scene::{ObjectModel, Scene, Transform, Vec3};

    use super::{MemberFilter, member_options};
    use crate::MemberError;

    #[test]
    fn options_convert_to_working_bindings() {
        let mut scene = Scene::new();
        let player = scene.spawn_game_object("player");

        let options = member_options(&scene, player, &MemberFilter::METHODS).unwrap();
        assert!(options.iter().all(|option| option.kind == MemberKind::Method));

        let translate = options
            .iter()
            .find(|option| {
                option.name == "translate"
                    && option.parameter_types == Some(vec![Type::of::<Vec3>()])
            })
            .unwrap();
        assert_eq!(translate.component, Some("Transform"));

        let mut binding = translate.to_binding(player);
        binding
            .invoke(
                &mut scene,
                vc_reflect::func::ArgList::new().with_owned(Vec3::ONE),
            )
            .unwrap();

        let transform = binding.resolved_target().unwrap();
        assert_eq!(scene.get::<Transform>(transform).unwrap().position, Vec3::ONE);
    }

    #[test]
    fn assets_list_their_own_members() {
        let mut scene = Scene::new();
        let asset = scene.create_asset(Vec3::ZERO);

        let options = member_options(&scene, asset, &MemberFilter::VALUES).unwrap();
        let names: vec::Vec<_> = options.iter().map(|option| option.name).collect();
        assert_eq!(names, ["x", "y", "z"]);
        assert!(options.iter().all(|option| option.component.is_none()));
    }

    #[test]
    fn opaque_and_dangling_targets_fail() {
        let mut scene = Scene::new();
        let opaque = scene.spawn_opaque(1_u32);
        assert!(matches!(
            member_options(&scene, opaque, &MemberFilter::default()),
            Err(MemberError::UnsupportedTargetKind { .. })
        ));

        scene.despawn(opaque);
        assert!(!scene.contains(opaque));
        assert_eq!(
            member_options(&scene, opaque, &MemberFilter::default()),
            Err(MemberError::DanglingTarget(opaque))
        );
    }
}
