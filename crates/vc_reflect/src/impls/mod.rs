//! [`Reflect`] implementations for foreign types.
//!
//! ## Implemented Menu
//!
//! - `()` `bool` `char`
//! - `i8`-`i128`, `u8`-`u128`, `isize`, `usize`, `f32`, `f64`
//! - `String`
//!
//! [`Reflect`]: crate::Reflect

mod primitives;
