use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use vc_reflect::Reflect;
use vc_reflect::registry::{GetTypeMeta, TypeMeta};

// -----------------------------------------------------------------------------
// ObjectId

slotmap::new_key_type! {
    /// A non-owning handle to an object of a [`Scene`](crate::Scene).
    ///
    /// Handles stay valid after the object is despawned; lookups through
    /// them then return `None`.
    pub struct ObjectId;
}

vc_reflect::impl_reflect_value!(ObjectId, "vc_scene::ObjectId");

impl GetTypeMeta for ObjectId {
    #[inline]
    fn get_type_meta() -> TypeMeta {
        TypeMeta::of::<Self>()
    }
}

// -----------------------------------------------------------------------------
// ObjectKind

/// The closed set of host object kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// A composable object owning a list of behaviors.
    GameObject,
    /// A component attached to exactly one game object.
    Behavior,
    /// A standalone data object.
    Asset,
    /// Anything else stored in the scene.
    Opaque,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::GameObject => "game object",
            Self::Behavior => "behavior",
            Self::Asset => "asset",
            Self::Opaque => "opaque object",
        })
    }
}

// -----------------------------------------------------------------------------
// ObjectSlot

pub(crate) struct ObjectSlot {
    pub value: Box<dyn Reflect>,
    pub kind: ObjectKind,
    // The owning game object of a behavior.
    pub owner: Option<ObjectId>,
    // Attached behaviors of a game object, in attachment order.
    pub behaviors: Vec<ObjectId>,
}

impl ObjectSlot {
    #[inline]
    pub fn new(value: Box<dyn Reflect>, kind: ObjectKind) -> Self {
        Self {
            value,
            kind,
            owner: None,
            behaviors: Vec::new(),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::{ObjectKind, ObjectModel, Scene};

    #[test]
    fn handles_survive_serialization() {
        let mut scene = Scene::new();
        let player = scene.spawn_game_object("player");

        let json = serde_json::to_string(&player).unwrap();
        let restored: super::ObjectId = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, player);
        assert_eq!(scene.kind(restored), Some(ObjectKind::GameObject));

        scene.despawn(player);
        assert!(!scene.contains(restored));
    }
}
