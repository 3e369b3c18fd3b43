use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};
use vc_reflect::registry::TypeRegistry;
use vc_reflect::serde::{TypeNameError, types_from_names, types_to_names};
use vc_scene::ObjectId;

use crate::MemberBinding;

/// The persistent form of a [`MemberBinding`].
///
/// Parameter types are stored as type paths and looked up again in a
/// [`TypeRegistry`] when the binding is restored. Cached resolution
/// results are never stored.
///
/// ```
/// use vc_member::{MemberBinding, MemberRecord};
/// use vc_reflect::info::Type;
/// use vc_scene::{Scene, Vec3};
///
/// let scene = Scene::new();
/// let binding = MemberBinding::new("translate")
///     .with_component("Transform")
///     .with_parameter_types([Type::of::<Vec3>()]);
///
/// let record = binding.to_record();
/// assert_eq!(record.component, "Transform");
/// assert_eq!(record.parameter_types.as_deref(), Some(&["vc_scene::Vec3".to_string()][..]));
///
/// let restored = MemberBinding::from_record(&record, vc_scene::ObjectModel::registry(&scene)).unwrap();
/// assert_eq!(restored, binding);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MemberRecord {
    pub target: Option<ObjectId>,
    /// Empty when the binding has no component.
    #[serde(default)]
    pub component: String,
    pub name: String,
    /// `None` selects a method by name only.
    #[serde(default)]
    pub parameter_types: Option<Vec<String>>,
}

impl MemberBinding {
    /// Captures the configuration of this binding.
    pub fn to_record(&self) -> MemberRecord {
        MemberRecord {
            target: self.target(),
            component: self.component().map(String::from).unwrap_or_default(),
            name: String::from(self.name()),
            parameter_types: self.parameter_types().map(types_to_names),
        }
    }

    /// Rebuilds an unresolved binding from `record`.
    ///
    /// Fails if a parameter type is unknown to `registry` or ambiguous.
    pub fn from_record(
        record: &MemberRecord,
        registry: &TypeRegistry,
    ) -> Result<Self, TypeNameError> {
        let parameter_types = record
            .parameter_types
            .as_deref()
            .map(|names| types_from_names(registry, names))
            .transpose()?;

        let mut binding = MemberBinding::new(record.name.as_str());
        binding.set_target(record.target);
        binding.set_component(record.component.as_str());
        binding.set_parameter_types(parameter_types);
        Ok(binding)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec;

    use vc_reflect::info::Type;
    use vc_reflect::registry::TypeRegistry;
    use vc_reflect::serde::TypeNameError;
    use vc_scene::{ObjectModel, Scene, Vec3};

    use super::MemberRecord;
    use crate::MemberBinding;

    #[test]
    fn record_round_trips_through_formats() {
        let mut scene = Scene::new();
        let player = scene.spawn_game_object("player");
        let binding = MemberBinding::new("translate")
            .with_target(player)
            .with_component("Transform")
            .with_parameter_types([Type::of::<f32>(); 3]);
        let record = binding.to_record();

        let json = serde_json::to_string(&record).unwrap();
        let from_json: MemberRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(from_json, record);

        let text = ron::to_string(&record).unwrap();
        let from_ron: MemberRecord = ron::from_str(&text).unwrap();
        assert_eq!(from_ron, record);

        let mut restored = MemberBinding::from_record(&from_ron, scene.registry()).unwrap();
        assert_eq!(restored, binding);
        assert!(!restored.is_reflected());

        let args = vc_reflect::func::ArgList::new()
            .with_owned(1.0_f32)
            .with_owned(2.0_f32)
            .with_owned(3.0_f32);
        restored.invoke(&mut scene, args).unwrap();
        let transform = restored.resolved_target().unwrap();
        assert_eq!(
            scene.get::<vc_scene::Transform>(transform).unwrap().position,
            Vec3::new(1.0, 2.0, 3.0)
        );
    }

    #[test]
    fn short_type_names_are_accepted() {
        let record = MemberRecord {
            name: String::from("translate"),
            parameter_types: Some(vec![String::from("Vec3")]),
            ..MemberRecord::default()
        };
        let scene = Scene::new();
        let binding = MemberBinding::from_record(&record, scene.registry()).unwrap();
        assert_eq!(binding.parameter_types(), Some(&[Type::of::<Vec3>()][..]));
        assert_eq!(binding.to_record().parameter_types, Some(vec![String::from("vc_scene::Vec3")]));
    }

    #[test]
    fn missing_optional_fields_default() {
        let record: MemberRecord = serde_json::from_str(r#"{"target":null,"name":"speed"}"#).unwrap();
        assert_eq!(record.component, "");
        assert_eq!(record.parameter_types, None);

        let binding = MemberBinding::from_record(&record, &TypeRegistry::new()).unwrap();
        assert_eq!(binding.component(), None);
        assert_eq!(binding.name(), "speed");
    }

    #[test]
    fn unknown_parameter_type_fails() {
        let record = MemberRecord {
            name: String::from("translate"),
            parameter_types: Some(vec![String::from("Nowhere")]),
            ..MemberRecord::default()
        };
        assert_eq!(
            MemberBinding::from_record(&record, &TypeRegistry::new()),
            Err(TypeNameError::Unknown(String::from("Nowhere")))
        );
    }
}
