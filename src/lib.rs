pub mod bind;
pub mod config;
mod error;

pub use bind::{Bind, BindError, FieldDescriptor, Schema};
pub use config::{Config, ConfigError, FlatSource, SectionProvider};
pub use error::Error;
