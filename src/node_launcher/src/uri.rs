//! `package://` and `file://` path resolution

use crate::{
    error::{Result, SchemaError},
    package_index::PackageIndex,
    tree::{ConfigValue, Scalar},
};
use std::borrow::Cow;

pub const FILE_SCHEME: &str = "file://";
pub const PACKAGE_SCHEME: &str = "package://";

/// Resolve a single string value.
///
/// - `file://<path>` yields `<path>` as-is (no existence check)
/// - `package://<pkg>/<rel>` yields `<share dir of pkg>/<rel>`
/// - anything else is a literal and comes back borrowed and unchanged, so
///   `Cow::Owned` always means the value was rewritten
pub fn resolve_uri<'a>(value: &'a str, index: &dyn PackageIndex) -> Result<Cow<'a, str>> {
    if let Some(path) = value.strip_prefix(FILE_SCHEME) {
        return Ok(Cow::Owned(path.to_string()));
    }

    let Some(rest) = value.strip_prefix(PACKAGE_SCHEME) else {
        return Ok(Cow::Borrowed(value));
    };

    let (package, relative) = rest.split_once('/').unwrap_or((rest, ""));
    if package.is_empty() {
        return Err(SchemaError::MalformedUri {
            raw: value.to_string(),
        }
        .into());
    }

    let share = index.locate_package_share(package)?;
    let relative = relative.trim_start_matches('/');
    let resolved = if relative.is_empty() {
        share
    } else {
        share.join(relative)
    };

    Ok(Cow::Owned(resolved.to_string_lossy().into_owned()))
}

/// Rewrite every URI string found anywhere in `value`, including nested
/// mappings and sequence elements.
pub fn resolve_uris(value: &mut ConfigValue, index: &dyn PackageIndex) -> Result<()> {
    match value {
        ConfigValue::Scalar(Scalar::String(s)) => {
            let resolved = match resolve_uri(s, index)? {
                Cow::Owned(resolved) => resolved,
                Cow::Borrowed(_) => return Ok(()),
            };
            log::debug!("Resolved '{}' to '{}'", s, resolved);
            *s = resolved;
        }
        ConfigValue::Mapping(map) => {
            for item in map.values_mut() {
                resolve_uris(item, index)?;
            }
        }
        ConfigValue::Sequence(items) => {
            for item in items.iter_mut() {
                resolve_uris(item, index)?;
            }
        }
        ConfigValue::Scalar(_) => {}
    }
    Ok(())
}
