//! Configuration section loading.

mod builder;
mod env;
mod error;
mod file;
mod source;

pub use builder::{Config, ConfigBuilder};
pub use env::EnvSource;
pub use error::ConfigError;
pub use file::FileSource;
pub use source::{FlatSource, SectionEntry, SectionProvider, SectionSource};
