use tracing::debug;

use super::source::{SectionEntry, SectionSource};
use super::ConfigError;

/// Reads sections from environment variables named
/// `<prefix><sep><section><sep><key>`.
///
/// Section and key are taken verbatim, since lookups are case-sensitive.
/// The key is everything after the second separator, so it may itself
/// contain the separator.
#[derive(Debug, Clone)]
pub struct EnvSource {
    prefix: String,
    separator: String,
}

impl EnvSource {
    pub fn new(prefix: impl Into<String>, separator: impl Into<String>) -> Self {
        let separator = separator.into();
        assert!(!separator.is_empty(), "separator must not be empty");
        Self {
            prefix: prefix.into(),
            separator,
        }
    }

    fn entries_from<I>(&self, vars: I) -> Vec<SectionEntry>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let prefix_with_sep = format!("{}{}", self.prefix, self.separator);
        let mut entries = Vec::new();

        for (name, value) in vars {
            let Some(path) = name.strip_prefix(&prefix_with_sep) else {
                continue;
            };

            match path.split_once(self.separator.as_str()) {
                Some((section, key)) if !section.is_empty() && !key.is_empty() => {
                    entries.push(SectionEntry::new(section, key, value));
                }
                _ => debug!(var = %name, "environment variable has no section/key, skipped"),
            }
        }

        entries
    }
}

impl SectionSource for EnvSource {
    fn entries(&self) -> Result<Vec<SectionEntry>, ConfigError> {
        Ok(self.entries_from(std::env::vars()))
    }
}
