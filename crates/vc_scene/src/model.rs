use vc_reflect::Reflect;
use vc_reflect::registry::TypeRegistry;

use crate::{ObjectId, ObjectKind};

/// The host object model seen by member bindings.
///
/// Implemented by [`Scene`](crate::Scene). Every query takes an [`ObjectId`]
/// and returns `None` (or an empty list) when the object no longer exists.
pub trait ObjectModel {
    /// The registry describing the objects' types.
    fn registry(&self) -> &TypeRegistry;

    /// Returns the kind of a live object.
    fn kind(&self, id: ObjectId) -> Option<ObjectKind>;

    /// Returns the game object a behavior is attached to.
    fn owner(&self, id: ObjectId) -> Option<ObjectId>;

    /// Returns the behaviors attached to a game object, in attachment order.
    fn behaviors(&self, id: ObjectId) -> &[ObjectId];

    fn object(&self, id: ObjectId) -> Option<&dyn Reflect>;

    fn object_mut(&mut self, id: ObjectId) -> Option<&mut dyn Reflect>;

    /// Returns `true` if `id` refers to a live object.
    #[inline]
    fn contains(&self, id: ObjectId) -> bool {
        self.kind(id).is_some()
    }

    /// Finds the first behavior of `game_object` whose type matches `type_name`.
    ///
    /// Both the short type name and the full type path are accepted.
    fn find_behavior(&self, game_object: ObjectId, type_name: &str) -> Option<ObjectId> {
        self.behaviors(game_object).iter().copied().find(|&id| {
            self.object(id).is_some_and(|value| {
                value.reflect_type_name() == type_name || value.reflect_type_path() == type_name
            })
        })
    }
}
