//! File-based section source.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use toml::{Table, Value};
use tracing::debug;

use super::source::{SectionEntry, SectionSource};
use super::ConfigError;

/// A TOML document whose top-level tables are the sections.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
struct SectionDocument {
    sections: BTreeMap<String, Table>,
}

/// A section source that loads from a TOML file.
///
/// Every top-level table is one section; its scalar values become the
/// section's entries in document order:
///
/// ```toml
/// [plugSettings]
/// TestPlugin_Int32 = 1
/// TestPlugin_StringList = "a,b,c"
/// ```
///
/// Files can be marked as required or optional. Required files that don't exist
/// cause an error; optional files that don't exist are silently skipped.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    required: bool,
}

impl FileSource {
    /// Creates a new file source.
    ///
    /// If `required` is true, the build will fail if the file doesn't exist.
    pub fn new(path: impl AsRef<Path>, required: bool) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            required,
        }
    }
}

impl SectionSource for FileSource {
    fn entries(&self) -> Result<Vec<SectionEntry>, ConfigError> {
        let Some(document) = load_section_file(&self.path, self.required)? else {
            debug!(path = %self.path.display(), "optional config file missing, skipped");
            return Ok(Vec::new());
        };

        let mut entries = Vec::new();
        for (section, table) in document.sections {
            for (key, value) in table {
                let value = value_to_string(&value).ok_or_else(|| ConfigError::NonScalarValue {
                    section: section.clone(),
                    key: key.clone(),
                })?;
                entries.push(SectionEntry::new(section.as_str(), key, value));
            }
        }

        debug!(path = %self.path.display(), entries = entries.len(), "loaded config file");
        Ok(entries)
    }
}

/// Loads and parses a sectioned TOML file.
///
/// Returns `Ok(None)` if the file doesn't exist and `required` is false.
fn load_section_file(path: &Path, required: bool) -> Result<Option<SectionDocument>, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => {
            let document = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                source: e,
            })?;
            Ok(Some(document))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            if required {
                Err(ConfigError::FileNotFound(path.to_path_buf()))
            } else {
                Ok(None)
            }
        }
        Err(e) => Err(ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// String form of a scalar TOML value; `None` for arrays and tables.
fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Integer(i) => Some(i.to_string()),
        Value::Float(f) => Some(f.to_string()),
        Value::Boolean(b) => Some(b.to_string()),
        Value::Datetime(dt) => Some(dt.to_string()),
        Value::Array(_) | Value::Table(_) => None,
    }
}
