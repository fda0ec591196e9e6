//! Binding of flat configuration sections onto typed settings.
//!
//! A settings type registers its fields in a [`Schema`], each with a
//! [`FieldDescriptor`] and a typed setter. Resolution converts every field's
//! string value to the setter's type and reports all failures at once.

mod convert;
mod descriptor;
mod error;
mod field;
mod kind;
mod resolver;
mod schema;

pub use convert::{convert, ConvertRules};
pub use descriptor::{FieldDescriptor, PostLoadHook};
pub use error::{BindError, ConvertError, ErrorReport, FieldError, HookError};
pub use field::resolve_field;
pub use kind::{Bindable, EnumKind, RawList, Value, ValueKind};
pub use resolver::{bind_schema, resolve, resolve_source};
pub use schema::{Bind, Field, Schema};
