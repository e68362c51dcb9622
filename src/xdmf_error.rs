//! XdmfError: unified error type for the xdmf-graph public APIs
//!
//! Every fallible operation in the crate returns this type. Variants follow
//! the three failure classes of the item graph (reconstruction, registry
//! lookup, latent structure) plus the boundary errors of the heavy-data and
//! XML adapters.

use thiserror::Error;

/// Unified error type for item-graph operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum XdmfError {
    /// An element could not be turned into an item: malformed or missing
    /// property, unresolvable tag, or an unresolved/duplicate reference.
    #[error("cannot reconstruct `{tag}` at {path}{}: {reason}", property_suffix(.property))]
    Reconstruction {
        /// Tag of the element being built.
        tag: String,
        /// Slash separated element path, empty until the reader fills it in.
        path: String,
        /// Offending property, when the failure is tied to one.
        property: Option<String>,
        /// Human readable cause.
        reason: String,
    },
    /// A descriptor registry lookup did not match any known descriptor.
    #[error("unknown {family}: {detail}")]
    UnknownType {
        /// Descriptor family (`TopologyType`, `GeometryType`, ...).
        family: &'static str,
        /// The ID or property combination that failed to resolve.
        detail: String,
    },
    /// A required part of an item is missing and the item was used in a way
    /// that needs it.
    #[error("`{tag}` is missing its {missing}")]
    LatentStructural {
        /// Tag of the incomplete item.
        tag: &'static str,
        /// Name of the missing part.
        missing: &'static str,
    },
    /// Heavy-data binding was released or accessed with the wrong scalar type.
    #[error("heavy data: {0}")]
    HeavyData(String),
    /// The XML adapter rejected its input.
    #[error("XML parse error: {0}")]
    XmlParse(String),
    /// Underlying reader/writer failure.
    #[error("I/O error: {0}")]
    Io(String),
}

fn property_suffix(property: &Option<String>) -> String {
    property
        .as_ref()
        .map(|name| format!(" (property `{name}`)"))
        .unwrap_or_default()
}

impl XdmfError {
    /// Reconstruction error tied to a single property of `tag`.
    pub fn property(tag: &str, property: &str, reason: impl Into<String>) -> Self {
        XdmfError::Reconstruction {
            tag: tag.to_string(),
            path: String::new(),
            property: Some(property.to_string()),
            reason: reason.into(),
        }
    }

    /// Reconstruction error not tied to a property.
    pub fn reconstruction(tag: &str, reason: impl Into<String>) -> Self {
        XdmfError::Reconstruction {
            tag: tag.to_string(),
            path: String::new(),
            property: None,
            reason: reason.into(),
        }
    }

    /// Registry miss for `family`.
    pub fn unknown_type(family: &'static str, detail: impl Into<String>) -> Self {
        XdmfError::UnknownType {
            family,
            detail: detail.into(),
        }
    }

    /// Fill in the element path of a reconstruction error that does not have
    /// one yet. Other variants pass through untouched.
    pub fn at_path(self, at: &str) -> Self {
        match self {
            XdmfError::Reconstruction {
                tag,
                path,
                property,
                reason,
            } if path.is_empty() => XdmfError::Reconstruction {
                tag,
                path: at.to_string(),
                property,
                reason,
            },
            other => other,
        }
    }
}

impl From<std::io::Error> for XdmfError {
    fn from(err: std::io::Error) -> Self {
        XdmfError::Io(err.to_string())
    }
}
