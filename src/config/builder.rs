use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::Path;

use tracing::debug;

use super::env::EnvSource;
use super::file::FileSource;
use super::source::{merge_entries, FlatSource, SectionEntry, SectionProvider, SectionSource};
use super::ConfigError;
use crate::bind::{self, Bind, BindError};

/// A section given directly to the builder.
#[derive(Debug)]
struct StaticSection {
    name: String,
    source: FlatSource,
}

impl SectionSource for StaticSection {
    fn entries(&self) -> Result<Vec<SectionEntry>, ConfigError> {
        Ok(self
            .source
            .iter()
            .map(|(key, value)| SectionEntry::new(self.name.as_str(), key, value))
            .collect())
    }
}

/// Loaded configuration sections, ready to bind settings types from.
///
/// ## Example
///
/// ```no_run
/// use dragon_bind::Config;
/// # use dragon_bind::bind::{Bind, Schema};
/// # #[derive(Default)] struct PluginSettings;
/// # impl Bind for PluginSettings {
/// #     fn schema() -> &'static Schema<Self> { unimplemented!() }
/// # }
///
/// let config = Config::builder()
///     .with_file("config/default.toml", true)
///     .with_env("MYAPP", "__")
///     .with_file("config/local.toml", false)
///     .build()?;
///
/// let settings: PluginSettings = config.resolve(Some("TestPlugin"), "plugSettings")?;
/// # Ok::<(), dragon_bind::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Config {
    sections: BTreeMap<String, FlatSource>,
}

impl Config {
    /// Creates a new configuration builder.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Names of all loaded sections.
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    /// Binds `T` from the named section.
    ///
    /// Field keys are `<prefix>_<field>` when a prefix is given.
    pub fn resolve<T: Bind>(&self, prefix: Option<&str>, section: &str) -> Result<T, BindError> {
        bind::resolve(self, prefix, section)
    }
}

impl SectionProvider for Config {
    fn section(&self, id: &str) -> Option<Cow<'_, FlatSource>> {
        self.sections.get(id).map(Cow::Borrowed)
    }
}

/// Builder for loading configuration sections from multiple sources.
///
/// Sources are merged in registration order, with later sources overriding
/// individual keys of earlier ones.
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .build() is called"]
pub struct ConfigBuilder {
    sources: Vec<Box<dyn SectionSource>>,
}

impl ConfigBuilder {
    /// Adds a TOML file to be loaded.
    ///
    /// If `required` is `true`, the build will fail if the file doesn't exist.
    /// Optional files that are missing are silently skipped.
    pub fn with_file(self, path: impl AsRef<Path>, required: bool) -> Self {
        self.with_source(FileSource::new(path, required))
    }

    /// Loads sections from environment variables named
    /// `<prefix><separator><section><separator><key>`.
    ///
    /// ```no_run
    /// # use dragon_bind::Config;
    /// // With MYAPP__plugSettings__TestPlugin_Int32=7
    /// let config = Config::builder()
    ///     .with_file("config/default.toml", true)
    ///     .with_env("MYAPP", "__")
    ///     .build()?;
    /// # Ok::<(), dragon_bind::ConfigError>(())
    /// ```
    pub fn with_env(self, prefix: impl Into<String>, separator: impl Into<String>) -> Self {
        self.with_source(EnvSource::new(prefix, separator))
    }

    /// Adds an already materialized section.
    pub fn with_section(self, name: impl Into<String>, source: FlatSource) -> Self {
        self.with_source(StaticSection {
            name: name.into(),
            source,
        })
    }

    /// Adds a custom section source.
    pub fn with_source(mut self, source: impl SectionSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Loads every source and merges the results.
    pub fn build(self) -> Result<Config, ConfigError> {
        let mut sections = BTreeMap::new();

        for source in &self.sources {
            merge_entries(&mut sections, source.entries()?);
        }

        debug!(
            sources = self.sources.len(),
            sections = sections.len(),
            "configuration sections loaded"
        );
        Ok(Config { sections })
    }
}
