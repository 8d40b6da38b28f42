use mongodb::bson::{Bson, Document};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_DATABASE: &str = "YouTube-Dashboard";
pub const DEFAULT_COLLECTION: &str = "everything";

/// The one lookup a probe performs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeTarget {
    pub database: String,
    pub collection: String,
    /// Top-level key to pull out of the first document, if any.
    pub field: Option<String>,
}

impl ProbeTarget {
    pub fn new(database: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            collection: collection.into(),
            field: None,
        }
    }

    pub fn with_field(mut self, field: Option<String>) -> Self {
        self.field = field;
        self
    }
}

impl Default for ProbeTarget {
    fn default() -> Self {
        Self::new(DEFAULT_DATABASE, DEFAULT_COLLECTION)
    }
}

impl fmt::Display for ProbeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.database, self.collection)?;
        if let Some(field) = &self.field {
            write!(f, "['{}']", field)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProbeOutcome {
    Found { document: Document },
    FieldFound { field: String, value: Bson },
    Empty,
    FieldMissing { field: String },
    /// Server selection gave up before any node answered.
    Unreachable { detail: String },
}

impl ProbeOutcome {
    pub fn is_reachable(&self) -> bool {
        !matches!(self, ProbeOutcome::Unreachable { .. })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pretty,
    Compact,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(OutputFormat::Pretty),
            "compact" => Ok(OutputFormat::Compact),
            other => Err(format!(
                "unknown output format '{}', expected pretty or compact",
                other
            )),
        }
    }
}
