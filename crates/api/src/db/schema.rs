//! Hand-declared layout of the pre-populated climate database.
//!
//! The API never creates or migrates these tables; it only checks at
//! startup that every column it reads is present.

use super::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

pub const MEASUREMENT: TableSchema = TableSchema {
    name: "measurement",
    columns: &["station", "date", "prcp", "tobs"],
};

pub const STATION: TableSchema = TableSchema {
    name: "station",
    columns: &["id", "station", "name", "latitude", "longitude", "elevation"],
};

pub const CLIMATE_SCHEMA: [TableSchema; 2] = [MEASUREMENT, STATION];

impl TableSchema {
    /// Declared columns absent from `actual`. SQLite identifiers are
    /// case-insensitive, so the comparison is too.
    pub fn missing_columns(&self, actual: &[String]) -> Vec<&'static str> {
        self.columns
            .iter()
            .copied()
            .filter(|expected| !actual.iter().any(|a| a.eq_ignore_ascii_case(expected)))
            .collect()
    }

    /// Validate the column list reported by `pragma_table_info`. An empty
    /// list means the table does not exist.
    pub fn check(&self, actual: &[String]) -> Result<(), Error> {
        if actual.is_empty() {
            return Err(Error::Schema(format!("table `{}` not found", self.name)));
        }

        let missing = self.missing_columns(actual);
        if !missing.is_empty() {
            return Err(Error::Schema(format!(
                "table `{}` is missing column(s): {}",
                self.name,
                missing.join(", ")
            )));
        }

        Ok(())
    }
}
