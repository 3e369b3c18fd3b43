//! Runtime reflection for member binding.
//!
//! `vc_reflect` describes types at runtime: their paths, their fields,
//! properties and methods, and how a derived type reaches its base.
//! Descriptors are stored in a [`TypeRegistry`](registry::TypeRegistry),
//! built explicitly or through [`auto_register!`].
//!
//! ## Menu
//!
//! - [`Reflect`]: the type-erased value trait.
//! - [`info`]: [`Type`](info::Type) and member descriptors.
//! - [`func`]: argument lists and return values for dynamic calls.
//! - [`registry`]: [`TypeMeta`](registry::TypeMeta) and [`TypeRegistry`](registry::TypeRegistry).
//! - [`serde`]: persistent type names.
//!
//! ## Example
//!
//! ```
//! use vc_reflect::Reflect;
//! use vc_reflect::info::FieldInfo;
//! use vc_reflect::registry::{GetTypeMeta, TypeMeta, TypeRegistry};
//!
//! #[derive(Clone, PartialEq, Debug)]
//! struct Lamp { brightness: f32 }
//! vc_reflect::impl_reflect_value!(Lamp, "demo::Lamp");
//!
//! impl GetTypeMeta for Lamp {
//!     fn get_type_meta() -> TypeMeta {
//!         TypeMeta::of::<Self>().with_field(FieldInfo::new::<Self, f32>(
//!             "brightness",
//!             |l| &l.brightness,
//!             |l| &mut l.brightness,
//!         ))
//!     }
//! }
//!
//! let mut registry = TypeRegistry::new();
//! registry.register::<Lamp>();
//!
//! let mut lamp = Lamp { brightness: 0.2 };
//! let members = registry.find_members(lamp.ty_id(), "brightness");
//! let field = members[0].as_field().unwrap();
//! field.set(&mut lamp, 0.8_f32.into_boxed_reflect()).unwrap();
//! assert_eq!(lamp.brightness, 0.8);
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// Extern Self

// Lets doc tests and macros name the crate as `vc_reflect` from inside it.
extern crate self as vc_reflect;

// -----------------------------------------------------------------------------
// no_std support

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod reflection;

pub mod func;
pub mod impls;
pub mod info;
pub mod registry;
pub mod serde;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use reflection::Reflect;
