//! Schema-driven value casting.
//!
//! Given a Table-Schema field descriptor and a raw value (a CSV cell or a
//! JSON-native value), decide whether the value conforms to the declared type
//! and format and, if it does, produce its canonical typed form.
//!
//! ```
//! use fieldcast::{create_type, FieldDescriptor, TypedValue};
//!
//! let field = create_type(&FieldDescriptor::new("price", "number").with_format("currency")).unwrap();
//! assert_eq!(field.cast_str("$10,000.00"), Ok(TypedValue::Number(10000.0)));
//! assert!(!field.test_str("10+000.00"));
//! ```

pub mod column;
pub mod schema;
pub mod types;

#[cfg(feature = "python")]
mod bindings {
    pub mod python;
}

pub use schema::{
    CastRefusal, CastResult, ConfigurationError, Constraints, FieldDescriptor, GeoPoint, TypedValue,
};
pub use types::{
    create_type, FieldType, FormatSpec, NumberLocale, RegistryOptions, TypeKind, TypeRegistry,
    UnknownTypePolicy,
};

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Reports the library version to the Python side.
#[cfg(feature = "python")]
#[pyfunction]
fn fieldcast_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// --- Module Definition ---
/// This function defines the `fieldcast._core` Python module.
#[cfg(feature = "python")]
#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(fieldcast_version, m)?)?;
    m.add_class::<bindings::python::PyField>()?;
    Ok(())
}
