use serde::Serialize;

use crate::error::KspError;
use crate::raw::{RawMapping, RawObject};

/// A named annotation on a product. Also used for the promotional note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub name: String,
    pub description: String,
}

impl Tag {
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// Parses `{"up_name": ..., "tag_name": ...}` into name and description.
    ///
    /// # Errors
    ///
    /// Returns [`KspError::MissingField`] if either key is absent and
    /// [`KspError::InvalidField`] if either value is not a string.
    pub fn from_raw(raw: &RawMapping) -> Result<Self, KspError> {
        let obj = RawObject::new(raw, "Tag");
        Ok(Self {
            name: obj.require_str("up_name")?,
            description: obj.require_str("tag_name")?,
        })
    }
}
