//! Tag types and tags
//!
//! A [`TagType`] is a user-defined category such as `location` or `people`,
//! together with a multiplicity rule. A [`Tag`] binds a type to one or more
//! lowercase values and is attached to a photo.
//!
//! Names and values are case-insensitive: both are stored lowercase, so
//! `Location=Paris` and `location=paris` are the same tag.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::error::{Entity, ModelError, Result};

/// Separator between type and value in textual tag specs (`location=paris`)
pub const TAG_SPEC_SEPARATOR: char = '=';

/// A named tag category and its multiplicity rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagType {
    name: String,
    allows_multiple_values: bool,
}

impl TagType {
    /// Create a tag type; the name is stored lowercase
    #[must_use]
    pub fn new(name: &str, allows_multiple_values: bool) -> Self {
        Self {
            name: name.trim().to_lowercase(),
            allows_multiple_values,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn allows_multiple_values(&self) -> bool {
        self.allows_multiple_values
    }

    /// Case-insensitive name comparison
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name == name.trim().to_lowercase()
    }
}

// Identity is the name alone; the multiplicity flag is an attribute.
impl PartialEq for TagType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for TagType {}

impl Hash for TagType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for TagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.allows_multiple_values {
            write!(f, "{} (multivalue)", self.name)
        } else {
            f.write_str(&self.name)
        }
    }
}

/// A tag type bound to one or more values
///
/// Tags compare equal by `(type, values)`, so two photos can carry equal
/// tags and a tag built from user input finds the stored one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    tag_type: TagType,
    values: BTreeSet<String>,
}

impl Tag {
    /// Create a single-valued tag
    #[must_use]
    pub fn new(tag_type: &TagType, value: &str) -> Self {
        let mut values = BTreeSet::new();
        values.insert(normalize_value(value));
        Self {
            tag_type: tag_type.clone(),
            values,
        }
    }

    /// Create a tag from several values, honouring the type's multiplicity
    ///
    /// # Errors
    ///
    /// Returns `ModelError::InvalidOperation` if no values are given, or if the
    /// type is single-valued and more than one distinct value is given.
    pub fn with_values<I, S>(tag_type: &TagType, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tag = Self {
            tag_type: tag_type.clone(),
            values: BTreeSet::new(),
        };
        for value in values {
            tag.add_value(value.as_ref())?;
        }
        if tag.values.is_empty() {
            return Err(ModelError::InvalidOperation(format!(
                "Tag '{}' needs at least one value",
                tag_type.name()
            )));
        }
        Ok(tag)
    }

    /// Add a value to this tag
    ///
    /// Returns `Ok(false)` if the value was already present.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::InvalidOperation` if the tag type does not allow
    /// multiple values and the tag already holds a different value.
    pub fn add_value(&mut self, value: &str) -> Result<bool> {
        let value = normalize_value(value);
        if self.values.contains(&value) {
            return Ok(false);
        }
        if !self.tag_type.allows_multiple_values() && !self.values.is_empty() {
            return Err(ModelError::InvalidOperation(format!(
                "'{}' tag type does not allow multiple values",
                self.tag_type.name()
            )));
        }
        self.values.insert(value);
        Ok(true)
    }

    /// The tag type's name
    #[must_use]
    pub fn name(&self) -> &str {
        self.tag_type.name()
    }

    #[must_use]
    pub const fn tag_type(&self) -> &TagType {
        &self.tag_type
    }

    #[must_use]
    pub const fn values(&self) -> &BTreeSet<String> {
        &self.values
    }

    /// Whether this tag belongs to the named type (case-insensitive)
    #[must_use]
    pub fn is_of_type(&self, name: &str) -> bool {
        self.tag_type.is_named(name)
    }

    /// Parse a `type=value` spec against a set of defined tag types
    ///
    /// # Errors
    ///
    /// * `ModelError::InvalidOperation` if the spec is not of the form `type=value`
    /// * `ModelError::NotFound` if the type is not among `tag_types`
    pub fn parse(spec: &str, tag_types: &[TagType]) -> Result<Self> {
        let (name, value) = split_tag_spec(spec).ok_or_else(|| {
            ModelError::InvalidOperation(format!(
                "Expected a tag of the form type{TAG_SPEC_SEPARATOR}value, got '{spec}'"
            ))
        })?;
        let tag_type = tag_types
            .iter()
            .find(|t| t.is_named(name))
            .ok_or_else(|| ModelError::not_found(Entity::TagType, name))?;
        Ok(Self::new(tag_type, value))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values: Vec<&str> = self.values.iter().map(String::as_str).collect();
        write!(f, "{}={}", self.tag_type.name(), values.join(", "))
    }
}

/// Split a `type=value` spec into its trimmed halves
///
/// Returns `None` when the separator is missing or either side is empty.
#[must_use]
pub fn split_tag_spec(spec: &str) -> Option<(&str, &str)> {
    let (name, value) = spec.split_once(TAG_SPEC_SEPARATOR)?;
    let (name, value) = (name.trim(), value.trim());
    if name.is_empty() || value.is_empty() {
        None
    } else {
        Some((name, value))
    }
}

fn normalize_value(value: &str) -> String {
    value.trim().to_lowercase()
}
