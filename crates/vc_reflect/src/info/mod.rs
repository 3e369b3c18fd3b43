//! Type and member descriptors.
//!
//! ## Menu
//!
//! - [`TypePath`]: static type paths and names, [`DynamicTypePath`] for values.
//! - [`Type`]: runtime type descriptor, compared by [`TypeId`](core::any::TypeId).
//! - [`MemberInfo`]: a field, property or method of a registered type.
//!     - [`FieldInfo`]: borrowable storage, read by clone and written in place.
//!     - [`PropertyInfo`]: getter and optional setter pair.
//!     - [`MethodInfo`]: callable with an [`ArgList`](crate::func::ArgList),
//!       either instance, static or extension.
//! - [`Projection`]: the path from a derived type to one of its registered bases.

// -----------------------------------------------------------------------------
// Modules

mod access_error;
mod field;
mod member;
mod method;
mod projection;
mod property;
mod type_path;

// -----------------------------------------------------------------------------
// Exports

pub use access_error::AccessError;
pub use field::FieldInfo;
pub use member::{MemberInfo, MemberKind, Visibility};
pub use method::{MethodInfo, Receiver};
pub use projection::{Projection, Upcast};
pub(crate) use projection::BaseUpcast;
pub use property::PropertyInfo;
pub use type_path::{DynamicTypePath, Type, TypePath};
pub use type_path::{Signature, module_path_of, short_name_of};
