use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;

use slotmap::SlotMap;
use thiserror::Error;
use vc_reflect::Reflect;
use vc_reflect::registry::TypeRegistry;

use crate::builtin::{GameObject, Transform};
use crate::object::ObjectSlot;
use crate::{ObjectId, ObjectKind, ObjectModel};

// -----------------------------------------------------------------------------
// SceneError

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SceneError {
    #[error("object {0:?} was not found in the scene")]
    NotFound(ObjectId),

    #[error("object {id:?} is a {kind}, expected a game object")]
    NotGameObject { id: ObjectId, kind: ObjectKind },
}

// -----------------------------------------------------------------------------
// Scene

/// An arena of host objects plus the registry describing their types.
///
/// # Example
///
/// ```
/// use vc_scene::{GameObject, ObjectKind, ObjectModel, Scene, Transform};
///
/// let mut scene = Scene::new();
/// let player = scene.spawn_game_object("player");
///
/// let transform = scene.get::<GameObject>(player).unwrap().transform();
/// assert_eq!(scene.kind(transform), Some(ObjectKind::Behavior));
/// assert_eq!(scene.owner(transform), Some(player));
/// assert_eq!(scene.find_behavior(player, "Transform"), Some(transform));
/// assert!(scene.get::<Transform>(transform).is_some());
/// ```
pub struct Scene {
    objects: SlotMap<ObjectId, ObjectSlot>,
    registry: TypeRegistry,
}

impl Default for Scene {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Creates an empty scene whose registry knows the primitives, the
    /// built-in types and every type submitted with
    /// [`auto_register!`](vc_reflect::auto_register).
    pub fn new() -> Self {
        let mut registry = TypeRegistry::new();
        crate::builtin::register_builtin(&mut registry);
        if !registry.auto_register() {
            log::debug!("auto registration is unavailable, register types manually");
        }
        Self::with_registry(registry)
    }

    /// Creates an empty scene using `registry` as is.
    pub fn with_registry(registry: TypeRegistry) -> Self {
        Self {
            objects: SlotMap::with_key(),
            registry,
        }
    }

    #[inline]
    pub fn registry_mut(&mut self) -> &mut TypeRegistry {
        &mut self.registry
    }

    /// Number of live objects.
    #[inline]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Spawns a game object with a [`Transform`] attached as its first behavior.
    pub fn spawn_game_object(&mut self, name: impl Into<String>) -> ObjectId {
        let transform = self.objects.insert(ObjectSlot::new(
            Box::new(Transform::default()),
            ObjectKind::Behavior,
        ));
        let game_object = GameObject::new(name.into(), transform);
        let id = self
            .objects
            .insert(ObjectSlot::new(Box::new(game_object), ObjectKind::GameObject));

        if let Some(slot) = self.objects.get_mut(transform) {
            slot.owner = Some(id);
        }
        if let Some(slot) = self.objects.get_mut(id) {
            slot.behaviors.push(transform);
        }
        log::trace!("spawned game object {id:?}");
        id
    }

    /// Attaches `behavior` to `game_object`.
    pub fn add_behavior<T: Reflect>(
        &mut self,
        game_object: ObjectId,
        behavior: T,
    ) -> Result<ObjectId, SceneError> {
        self.add_boxed_behavior(game_object, Box::new(behavior))
    }

    /// Attaches an already boxed behavior to `game_object`.
    pub fn add_boxed_behavior(
        &mut self,
        game_object: ObjectId,
        behavior: Box<dyn Reflect>,
    ) -> Result<ObjectId, SceneError> {
        let kind = self
            .objects
            .get(game_object)
            .map(|slot| slot.kind)
            .ok_or(SceneError::NotFound(game_object))?;
        if kind != ObjectKind::GameObject {
            return Err(SceneError::NotGameObject {
                id: game_object,
                kind,
            });
        }

        let type_path = behavior.reflect_type_path();
        let mut slot = ObjectSlot::new(behavior, ObjectKind::Behavior);
        slot.owner = Some(game_object);
        let id = self.objects.insert(slot);
        if let Some(owner) = self.objects.get_mut(game_object) {
            owner.behaviors.push(id);
        }
        log::trace!("attached `{type_path}` {id:?} to {game_object:?}");
        Ok(id)
    }

    /// Stores a standalone data asset.
    pub fn create_asset<T: Reflect>(&mut self, asset: T) -> ObjectId {
        self.objects
            .insert(ObjectSlot::new(Box::new(asset), ObjectKind::Asset))
    }

    /// Stores a value that is neither a game object, a behavior nor an asset.
    pub fn spawn_opaque<T: Reflect>(&mut self, value: T) -> ObjectId {
        self.objects
            .insert(ObjectSlot::new(Box::new(value), ObjectKind::Opaque))
    }

    /// Removes an object.
    ///
    /// Despawning a game object despawns its behaviors; despawning a behavior
    /// detaches it from its owner. Returns `false` if the object was missing.
    pub fn despawn(&mut self, id: ObjectId) -> bool {
        let Some(slot) = self.objects.remove(id) else {
            log::warn!("despawning missing object {id:?}");
            return false;
        };
        for behavior in slot.behaviors {
            self.objects.remove(behavior);
        }
        if let Some(owner) = slot.owner.and_then(|owner| self.objects.get_mut(owner)) {
            owner.behaviors.retain(|&behavior| behavior != id);
        }
        log::trace!("despawned {} {id:?}", slot.kind);
        true
    }

    /// Borrows an object as `T`.
    pub fn get<T: Reflect>(&self, id: ObjectId) -> Option<&T> {
        self.objects.get(id)?.value.downcast_ref::<T>()
    }

    /// Mutably borrows an object as `T`.
    pub fn get_mut<T: Reflect>(&mut self, id: ObjectId) -> Option<&mut T> {
        self.objects.get_mut(id)?.value.downcast_mut::<T>()
    }

    /// Iterates over live objects and their kinds.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, ObjectKind, &dyn Reflect)> {
        self.objects
            .iter()
            .map(|(id, slot)| (id, slot.kind, &*slot.value))
    }
}

impl ObjectModel for Scene {
    #[inline]
    fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    #[inline]
    fn kind(&self, id: ObjectId) -> Option<ObjectKind> {
        self.objects.get(id).map(|slot| slot.kind)
    }

    #[inline]
    fn owner(&self, id: ObjectId) -> Option<ObjectId> {
        self.objects.get(id).and_then(|slot| slot.owner)
    }

    fn behaviors(&self, id: ObjectId) -> &[ObjectId] {
        match self.objects.get(id) {
            Some(slot) => &slot.behaviors,
            None => &[],
        }
    }

    #[inline]
    fn object(&self, id: ObjectId) -> Option<&dyn Reflect> {
        self.objects.get(id).map(|slot| &*slot.value)
    }

    #[inline]
    fn object_mut(&mut self, id: ObjectId) -> Option<&mut dyn Reflect> {
        self.objects.get_mut(id).map(|slot| &mut *slot.value)
    }
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.objects.iter().map(|(id, slot)| (id, &slot.value)))
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use vc_reflect::registry::{GetTypeMeta, TypeMeta, TypeRegistry};

    use super::{Scene, SceneError};
    use crate::{GameObject, ObjectKind, ObjectModel, Vec3};

    #[test]
    fn behaviors_follow_their_owner() {
        let mut scene = Scene::new();
        let player = scene.spawn_game_object("player");
        let speed = scene.add_behavior(player, 4.5_f32).unwrap();
        assert_eq!(scene.behaviors(player).len(), 2);
        assert_eq!(scene.find_behavior(player, "f32"), Some(speed));

        assert!(scene.despawn(speed));
        assert_eq!(scene.behaviors(player).len(), 1);

        assert!(scene.despawn(player));
        assert!(scene.is_empty());
        assert!(!scene.despawn(player));
    }

    #[test]
    fn behaviors_attach_to_game_objects_only() {
        let mut scene = Scene::new();
        let asset = scene.create_asset(Vec3::ZERO);
        assert_eq!(
            scene.add_behavior(asset, 1_u8),
            Err(SceneError::NotGameObject {
                id: asset,
                kind: ObjectKind::Asset,
            })
        );

        let gone = scene.spawn_opaque(String::from("tmp"));
        scene.despawn(gone);
        assert_eq!(scene.add_behavior(gone, 1_u8), Err(SceneError::NotFound(gone)));
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Lantern {
        lit: bool,
    }

    vc_reflect::impl_reflect_value!(Lantern, "scene_tests::Lantern");

    impl GetTypeMeta for Lantern {
        fn get_type_meta() -> TypeMeta {
            TypeMeta::of::<Self>()
        }
    }

    vc_reflect::auto_register!(Lantern);

    #[test]
    fn submitted_types_are_registered() {
        let scene = Scene::new();
        let mut registry = TypeRegistry::empty();
        if registry.auto_register() {
            assert!(scene.registry().get_with_type_name("Lantern").is_some());
        }
        assert!(scene.registry().get_with_type_name("GameObject").is_some());
        assert!(scene.registry().get_with_type_name("Vec3").is_some());

        let bare = Scene::with_registry(TypeRegistry::empty());
        assert!(bare.registry().is_empty());
        assert!(Lantern { lit: true }.lit);
    }

    #[test]
    fn typed_access() {
        let mut scene = Scene::new();
        let player = scene.spawn_game_object("player");
        scene.get_mut::<GameObject>(player).unwrap().set_active(false);
        assert!(!scene.get::<GameObject>(player).unwrap().active());
        assert!(scene.get::<Vec3>(player).is_none());
        assert_eq!(scene.object(player).map(|o| o.ty_id()), Some(core::any::TypeId::of::<GameObject>()));
    }
}
