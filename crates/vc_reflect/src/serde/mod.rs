//! Persistent type names.
//!
//! Member bindings store the parameter types of overloaded methods as
//! strings. This module maps [`Type`](crate::info::Type)s to those strings
//! and back through a [`TypeRegistry`](crate::registry::TypeRegistry).
//!
//! - Writing always uses the full [type path](crate::info::TypePath::type_path).
//! - Reading accepts the full path, then falls back to an unambiguous short
//!   [type name](crate::info::TypePath::type_name).
//!
//! With serde, [`Type`](crate::info::Type) serializes as its path and
//! [`TypeSeed`] deserializes it against a registry.
//!
//! ```
//! use vc_reflect::info::Type;
//! use vc_reflect::registry::TypeRegistry;
//! use vc_reflect::serde::{TypeNameError, type_from_name, type_to_name};
//!
//! let registry = TypeRegistry::new();
//!
//! let name = type_to_name(&Type::of::<String>());
//! assert_eq!(name, "alloc::string::String");
//! assert_eq!(type_from_name(&registry, "String"), Ok(Type::of::<String>()));
//! assert!(matches!(
//!     type_from_name(&registry, "Missing"),
//!     Err(TypeNameError::Unknown(_))
//! ));
//! ```

// -----------------------------------------------------------------------------
// Modules

mod type_name;

// -----------------------------------------------------------------------------
// Exports

pub use type_name::{TypeNameError, TypeSeed};
pub use type_name::{type_from_name, type_to_name, types_from_names, types_to_names};
