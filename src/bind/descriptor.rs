use std::fmt;

use super::convert::ConvertRules;
use super::HookError;

/// Invoked on the target object after its field has been bound.
pub type PostLoadHook<T> = fn(&mut T) -> Result<(), HookError>;

/// Binding rules attached to one field of a settings type.
///
/// Built by value and frozen once handed to a [`Schema`](super::Schema).
///
/// ```
/// use dragon_bind::bind::FieldDescriptor;
///
/// struct Settings;
///
/// let retries = FieldDescriptor::<Settings>::optional().with_default(3);
/// assert!(!retries.is_required());
/// assert_eq!(retries.default_value(), Some("3"));
/// ```
pub struct FieldDescriptor<T> {
    required: bool,
    default_value: Option<String>,
    delimiter: Option<char>,
    post_load: Option<PostLoadHook<T>>,
    error_suffix: Option<String>,
}

impl<T> FieldDescriptor<T> {
    /// A required field with no default, delimiter, hook or suffix.
    pub fn new() -> Self {
        Self {
            required: true,
            default_value: None,
            delimiter: None,
            post_load: None,
            error_suffix: None,
        }
    }

    /// A field that may be absent from the source.
    pub fn optional() -> Self {
        Self {
            required: false,
            ..Self::new()
        }
    }

    /// Value used when the key is absent. Its `Display` form goes through the
    /// same conversion as a configured value.
    pub fn with_default(mut self, value: impl fmt::Display) -> Self {
        self.default_value = Some(value.to_string());
        self
    }

    /// Separator for list, array and raw-list fields.
    ///
    /// Without one the whole value is a single element.
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    pub fn with_post_load(mut self, hook: PostLoadHook<T>) -> Self {
        self.post_load = Some(hook);
        self
    }

    /// Text appended to every error line reported for this field.
    pub fn with_error_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.error_suffix = Some(suffix.into());
        self
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    pub fn delimiter(&self) -> Option<char> {
        self.delimiter
    }

    pub fn post_load(&self) -> Option<PostLoadHook<T>> {
        self.post_load
    }

    pub fn error_suffix(&self) -> Option<&str> {
        self.error_suffix.as_deref()
    }

    pub(crate) fn rules(&self) -> ConvertRules {
        ConvertRules {
            required: self.required,
            delimiter: self.delimiter,
        }
    }
}

impl<T> Default for FieldDescriptor<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for FieldDescriptor<T> {
    fn clone(&self) -> Self {
        Self {
            required: self.required,
            default_value: self.default_value.clone(),
            delimiter: self.delimiter,
            post_load: self.post_load,
            error_suffix: self.error_suffix.clone(),
        }
    }
}

impl<T> fmt::Debug for FieldDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("required", &self.required)
            .field("default_value", &self.default_value)
            .field("delimiter", &self.delimiter)
            .field("post_load", &self.post_load.is_some())
            .field("error_suffix", &self.error_suffix)
            .finish()
    }
}
