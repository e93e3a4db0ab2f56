//! Fixing data access port trait.

use std::path::Path;

use chrono::NaiveDate;

use crate::domain::error::ObjregError;

pub trait FixingSource {
    /// Load a date-ordered fixing series from `path`.
    fn load(&self, path: &Path) -> Result<Vec<(NaiveDate, f64)>, ObjregError>;
}
