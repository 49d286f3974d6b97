//! The data model shared by every field type.
//!
//! A [`FieldDescriptor`] is what the schema layer hands us, a [`TypedValue`]
//! is what a successful cast hands back, and the two error types describe the
//! only ways construction or casting can fail.

pub use self::descriptor::{Constraints, FieldDescriptor};
pub use self::error::{CastRefusal, CastResult, ConfigurationError};
pub use self::value::{GeoPoint, TypedValue};

mod descriptor;
mod error;
mod value;
