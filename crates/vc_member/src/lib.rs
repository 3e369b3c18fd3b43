//! Reflection-based member bindings.
//!
//! A [`MemberBinding`] points at a field, property or method of an object
//! in an [`ObjectModel`](vc_scene::ObjectModel), given as
//!
//! - a target object,
//! - an optional component, the type name of a behavior attached to the
//!   target's game object,
//! - a member name,
//! - optional parameter types selecting one method overload.
//!
//! The binding resolves these lazily against the model's
//! [`TypeRegistry`](vc_reflect::registry::TypeRegistry) and caches the
//! result. Reads, writes and calls then go through one uniform surface
//! whatever the member kind:
//!
//! | operation         | field / property          | method             |
//! |-------------------|---------------------------|--------------------|
//! | `get`             | read                      | error              |
//! | `set`             | write                     | error              |
//! | `invoke`          | error                     | call               |
//! | `invoke_or_set`   | write the single argument | call               |
//! | `get_or_invoke`   | read, no arguments        | call               |
//!
//! Extension methods receive the resolved object as their first argument.
//!
//! # Example
//!
//! ```
//! use vc_member::MemberBinding;
//! use vc_reflect::func::ArgList;
//! use vc_reflect::info::Type;
//! use vc_scene::{GameObject, Scene, Transform, Vec3};
//!
//! let mut scene = Scene::new();
//! let player = scene.spawn_game_object("player");
//!
//! let mut translate = MemberBinding::new("translate")
//!     .with_target(player)
//!     .with_component("Transform")
//!     .with_parameter_types([Type::of::<Vec3>()]);
//!
//! let args = ArgList::new().with_owned(Vec3::new(1.0, 2.0, 3.0));
//! assert!(translate.invoke(&mut scene, args).unwrap().is_unit());
//!
//! let transform = scene.get::<GameObject>(player).unwrap().transform();
//! assert_eq!(
//!     scene.get::<Transform>(transform).unwrap().position,
//!     Vec3::new(1.0, 2.0, 3.0)
//! );
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod binding;
mod error;
mod record;
mod state;
mod typed;

pub mod catalog;

// -----------------------------------------------------------------------------
// Exports

pub use binding::MemberBinding;
pub use error::MemberError;
pub use record::MemberRecord;
pub use state::{BindingStage, SourceKind};
pub use typed::TypedMember;
