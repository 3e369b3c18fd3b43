//! Built-in host types.

mod game_object;
mod math;
mod transform;

pub use game_object::GameObject;
pub use math::Vec3;
pub use transform::{Transform, TransformExt};

use vc_reflect::registry::TypeRegistry;

/// Registers [`GameObject`], [`Transform`], [`TransformExt`] and their dependencies.
pub fn register_builtin(registry: &mut TypeRegistry) {
    registry.register::<GameObject>();
    registry.register::<Transform>();
    registry.register::<TransformExt>();
}
