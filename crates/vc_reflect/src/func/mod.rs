//! Dynamic method calls.
//!
//! ## Menu
//!
//! - [`ArgValue`]: one argument, either owned or borrowed.
//! - [`ArgList`]: ordered arguments consumed front to back by the callee.
//! - [`Return`]: the value produced by a call.
//! - [`ArgError`], [`CallError`]: what can go wrong while calling.
//!
//! Callees declared with [`MethodInfo`](crate::info::MethodInfo) receive an
//! [`ArgList`] and take their parameters in order:
//!
//! ```
//! use vc_reflect::func::{ArgList, Return};
//!
//! let mut args = ArgList::new().with_owned(3_i32).with_owned(4_i32);
//! let a = args.take_owned::<i32>().unwrap();
//! let b = args.take_owned::<i32>().unwrap();
//!
//! let ret = Return::owned(a + b);
//! assert_eq!(ret.take::<i32>().unwrap(), 7);
//! ```

// -----------------------------------------------------------------------------
// Modules

mod args;
mod error;
mod ret;

// -----------------------------------------------------------------------------
// Exports

pub use args::{ArgList, ArgValue, Ownership};
pub use error::{ArgError, CallError};
pub use ret::Return;
