use tracing::{debug, trace};

use super::convert::convert;
use super::{Field, FieldError};
use crate::config::FlatSource;

/// Binds one field of `target` from `source`.
///
/// Absent keys fail when the field is required and has no default, are
/// skipped when there is neither a default nor a post-load hook, and
/// otherwise take the converted default. The post-load hook runs last, after
/// the field has been assigned.
pub fn resolve_field<T>(
    target: &mut T,
    key: &str,
    field: &Field<T>,
    source: &FlatSource,
) -> Result<(), FieldError> {
    let descriptor = field.descriptor();

    match (source.get(key), descriptor.default_value()) {
        (Some(raw), _) => {
            let value = convert(raw, field.kind(), descriptor.rules(), false)?;
            field.assign(target, value)?;
            debug!(key, "bound configured value");
        }
        (None, Some(default)) => {
            let value = convert(default, field.kind(), descriptor.rules(), true)?;
            field.assign(target, value)?;
            debug!(key, default, "bound default value");
        }
        (None, None) if descriptor.is_required() => {
            return Err(FieldError::MissingRequired {
                key: key.to_string(),
                expected: field.kind().clone(),
            });
        }
        (None, None) => {
            if descriptor.post_load().is_none() {
                debug!(key, "optional entry absent, skipped");
                return Ok(());
            }
        }
    }

    if let Some(hook) = descriptor.post_load() {
        trace!(key, "running post-load hook");
        hook(target)?;
    }

    Ok(())
}
