//! Python bridge for the `_core` module.
//!
//! Values cross the boundary as JSON text so the Python side can hand over
//! whatever `json.loads` produced for a cell and get the canonical value back
//! the same way.
use crate::column;
use crate::schema::{ConfigurationError, FieldDescriptor, TypedValue};
use crate::types::{create_type, FieldType};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use serde_json::Value;

fn config_err(e: ConfigurationError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

fn json_err(e: serde_json::Error) -> PyErr {
    PyValueError::new_err(e.to_string())
}

fn to_json(value: Option<TypedValue>) -> PyResult<Option<String>> {
    value
        .map(|typed| serde_json::to_string(&typed))
        .transpose()
        .map_err(json_err)
}

#[pyclass(name = "_Field")]
#[derive(Debug, Clone)]
pub struct PyField {
    inner: FieldType,
}

#[pymethods]
impl PyField {
    /// Builds a field from its descriptor JSON. Unknown types, unsupported
    /// formats and bad separators raise `ValueError` here.
    #[new]
    pub fn new(descriptor_json: &str) -> PyResult<Self> {
        let descriptor = FieldDescriptor::from_json(descriptor_json).map_err(config_err)?;
        let inner = create_type(&descriptor).map_err(config_err)?;
        Ok(Self { inner })
    }

    #[getter]
    pub fn name(&self) -> String {
        self.inner.name().to_string()
    }

    #[getter]
    pub fn type_name(&self) -> String {
        self.inner.kind().name().to_string()
    }

    /// Returns the cast value as JSON, or `None` when refused.
    pub fn cast_json(&self, value_json: &str) -> PyResult<Option<String>> {
        let value: Value = serde_json::from_str(value_json).map_err(json_err)?;
        to_json(self.inner.cast(&value).ok())
    }

    pub fn cast_str(&self, value: &str) -> PyResult<Option<String>> {
        to_json(self.inner.cast_str(value).ok())
    }

    pub fn test_json(&self, value_json: &str) -> PyResult<bool> {
        let value: Value = serde_json::from_str(value_json).map_err(json_err)?;
        Ok(self.inner.test(&value))
    }

    pub fn test_str(&self, value: &str) -> bool {
        self.inner.test_str(value)
    }

    /// Casts a column of raw cells; returns the indices of refused rows.
    pub fn refused_rows(&self, cells: Vec<String>) -> Vec<usize> {
        column::cast_text_column(&self.inner, &cells).refused
    }
}
