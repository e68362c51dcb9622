//! Property maps and their canonical textual forms.
//!
//! Keys and values are always strings. Integers are written as decimals,
//! floats with Rust's shortest round-trip formatting, enum names in their
//! canonical case and dimensions as space separated decimals, so equal
//! typed state always renders to byte-identical maps.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

use itertools::Itertools;

use crate::xdmf_error::XdmfError;

/// Ordered string → string property mapping.
pub type PropertyMap = BTreeMap<String, String>;

/// A typed value that contributes one or more entries to an item's
/// property map.
pub trait ItemProperty {
    /// Insert this value's key/value pairs into `properties`.
    fn collect_properties(&self, properties: &mut PropertyMap);
}

/// Parse a required property of `tag`.
pub fn required<T>(properties: &PropertyMap, tag: &str, key: &str) -> Result<T, XdmfError>
where
    T: FromStr,
    T::Err: Display,
{
    optional(properties, tag, key)?
        .ok_or_else(|| XdmfError::property(tag, key, "required property is missing"))
}

/// Parse an optional property of `tag`; absent keys yield `None`.
pub fn optional<T>(properties: &PropertyMap, tag: &str, key: &str) -> Result<Option<T>, XdmfError>
where
    T: FromStr,
    T::Err: Display,
{
    properties
        .get(key)
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|err| {
                XdmfError::property(tag, key, format!("invalid value `{raw}`: {err}"))
            })
        })
        .transpose()
}

/// Value of the first key in `keys` that is present.
pub fn first_of<'a>(properties: &'a PropertyMap, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .find_map(|key| properties.get(*key))
        .map(String::as_str)
}

/// Parse a `Dimensions` style value: whitespace separated non-negative
/// integers.
pub fn parse_dimensions(tag: &str, key: &str, raw: &str) -> Result<Vec<usize>, XdmfError> {
    raw.split_whitespace()
        .map(|part| {
            part.parse::<usize>().map_err(|_| {
                XdmfError::property(tag, key, format!("invalid dimension `{part}` in `{raw}`"))
            })
        })
        .collect()
}

/// Render dimensions in canonical form.
pub fn format_dimensions(dimensions: &[usize]) -> String {
    dimensions.iter().join(" ")
}
