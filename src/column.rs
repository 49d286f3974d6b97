//! Casting whole columns in parallel.
//!
//! A [`FieldType`] is immutable, so the same instance is shared by every
//! worker; each cell is cast independently and results keep row order.
use crate::schema::TypedValue;
use crate::types::FieldType;
use rayon::prelude::*;
use serde_json::Value;

/// The outcome of casting one column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnReport {
    /// One entry per input row; `None` where the cast was refused.
    pub values: Vec<Option<TypedValue>>,
    /// Row indices of refused cells, ascending.
    pub refused: Vec<usize>,
}

impl ColumnReport {
    fn from_values(values: Vec<Option<TypedValue>>) -> Self {
        let refused = values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.is_none().then_some(i))
            .collect();
        Self { values, refused }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// True when every cell conformed.
    pub fn is_clean(&self) -> bool {
        self.refused.is_empty()
    }
}

/// Casts JSON-shaped cells.
pub fn cast_column(field: &FieldType, cells: &[Value]) -> ColumnReport {
    let values = cells.par_iter().map(|cell| field.cast(cell).ok()).collect();
    ColumnReport::from_values(values)
}

/// Casts raw text cells, e.g. one CSV column.
pub fn cast_text_column<S>(field: &FieldType, cells: &[S]) -> ColumnReport
where
    S: AsRef<str> + Sync,
{
    let values = cells
        .par_iter()
        .map(|cell| field.cast_str(cell.as_ref()).ok())
        .collect();
    ColumnReport::from_values(values)
}
