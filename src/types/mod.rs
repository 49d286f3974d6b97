//! The casting engine.
//!
//! A [`TypeRegistry`] turns a field descriptor into a [`FieldType`] once; the
//! field type then decides, value by value, whether raw input conforms to the
//! declared type and format. All format and locale decisions are made at
//! construction, so `cast` never re-reads the descriptor.

// Publicly export the primary components for use by other modules.
pub use self::field::FieldType;
pub use self::format::{FormatSpec, NumberLocale};
pub use self::registry::{create_type, RegistryOptions, TypeKind, TypeRegistry, UnknownTypePolicy};

// --- MODULE DECLARATIONS ---
mod field;
mod format;
mod registry;
mod rules {
    pub mod collection;
    pub mod geo;
    pub mod logical;
    pub mod numeric;
    pub mod temporal;
    pub mod text;
}
