//! The result of an extraction: requested segments that were found.

use std::collections::BTreeMap;
use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{Error, Result};
use crate::segment::IntoSegmentNames;

/// Ordered mapping from segment name to value.
///
/// Only segments that were both requested and present in the text have an
/// entry. Entries keep the order in which their names were requested.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionString {
    segments: Vec<(String, String)>,
}

impl ConnectionString {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Records a found segment. A name already present keeps its first value.
    pub(crate) fn insert(&mut self, name: &str, value: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.segments.push((name.to_owned(), value.to_owned()));
        true
    }

    /// Value of `name`, or `None` when it was not requested or not found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.segments
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.segments.iter().any(|(key, _)| key == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.segments
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    #[must_use]
    pub fn into_map(self) -> BTreeMap<String, String> {
        self.segments.into_iter().collect()
    }

    /// Checks that every name in `names` has an entry.
    ///
    /// # Errors
    /// Returns [`Error::MissingSegments`] listing the absent names in request order.
    pub fn require<N: IntoSegmentNames>(&self, names: N) -> Result<()> {
        let mut missing: Vec<String> = Vec::new();
        for name in names.into_segment_names() {
            if !self.contains(&name) && !missing.contains(&name) {
                missing.push(name);
            }
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::MissingSegments(missing))
        }
    }
}

/// Renders found segments as `name=value` pairs joined by `;`, in request order.
///
/// Extracting the same names from the rendering gives an equal result as long
/// as no name contains `;` or `=`. A `;` inside a name adds a segment boundary
/// that another requested name can match first.
impl fmt::Display for ConnectionString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            write!(f, "{key}={value}")?;
        }
        Ok(())
    }
}

impl Serialize for ConnectionString {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.segments.len()))?;
        for (key, value) in &self.segments {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl IntoIterator for ConnectionString {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.into_iter()
    }
}
