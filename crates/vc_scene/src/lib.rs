//! Host object model for member bindings.
//!
//! A [`Scene`] stores objects of a closed set of [`ObjectKind`]s:
//!
//! - game objects, each owning a list of attached behaviors;
//! - behaviors, attached to exactly one game object;
//! - standalone data assets;
//! - opaque objects, which bindings refuse to target.
//!
//! Objects are addressed by [`ObjectId`] handles. Member bindings see the
//! scene through the [`ObjectModel`] trait.
//!
//! Built-in types ([`GameObject`], [`Transform`], [`Vec3`]) are registered
//! by [`Scene::new`] together with their members.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod model;
mod object;
mod scene;

pub mod builtin;

// -----------------------------------------------------------------------------
// Exports

pub use builtin::{GameObject, Transform, TransformExt, Vec3};
pub use model::ObjectModel;
pub use object::{ObjectId, ObjectKind};
pub use scene::{Scene, SceneError};
