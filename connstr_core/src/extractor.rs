//! Pattern-based extraction of `name=value` segments from `;`-delimited text.
//!
//! Each requested name gets its own matcher: the segment must start the text
//! or follow a `;`, the name is matched literally, and the value runs up to
//! the next `;`. Names are escaped before they are embedded in the pattern,
//! so a name such as `a.b` only ever matches the literal `a.b`.

use std::fmt::Display;

use regex::Regex;
use tracing::{debug, trace};

use crate::connection_string::ConnectionString;
use crate::error::{Error, Result};
use crate::segment::IntoSegmentNames;

#[derive(Debug, Clone)]
struct SegmentMatcher {
    name: String,
    pattern: Regex,
}

impl SegmentMatcher {
    fn new(name: String) -> Result<Self> {
        let source = format!("(?:^|;){}=([^;]+)", regex::escape(&name));
        match Regex::new(&source) {
            Ok(pattern) => Ok(Self { name, pattern }),
            Err(source) => Err(Error::Pattern { name, source }),
        }
    }

    /// First value recorded for this segment in `text`.
    fn find<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|value| value.as_str())
    }
}

/// Extracts a fixed set of segments from connection strings.
///
/// Build once with the names of interest and reuse it for any number of
/// inputs. Extraction never fails: a requested segment that is missing from
/// the text simply has no entry in the result.
#[derive(Debug, Clone)]
pub struct SegmentExtractor {
    matchers: Vec<SegmentMatcher>,
}

impl SegmentExtractor {
    /// Compiles one matcher per distinct requested name, in request order.
    ///
    /// # Errors
    /// Returns [`Error::Pattern`] if a matcher cannot be compiled, which only
    /// happens for names large enough to exceed the regex size limit.
    pub fn new<N: IntoSegmentNames>(names: N) -> Result<Self> {
        let mut matchers: Vec<SegmentMatcher> = Vec::new();
        for name in names.into_segment_names() {
            if matchers.iter().any(|m| m.name == name) {
                trace!(segment = %name, "Skipping duplicate segment name");
                continue;
            }
            matchers.push(SegmentMatcher::new(name)?);
        }

        debug!(segments = matchers.len(), "Built segment extractor");
        Ok(Self { matchers })
    }

    /// Requested segment names, in request order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.matchers.iter().map(|m| m.name.as_str())
    }

    /// Extracts every requested segment present in `text`.
    ///
    /// `text` is rendered through its `Display` impl first; an empty
    /// rendering yields an empty result.
    #[must_use]
    pub fn extract<T: Display>(&self, text: T) -> ConnectionString {
        let text = text.to_string();
        let mut found = ConnectionString::new();

        if text.is_empty() {
            trace!("Empty connection string, nothing to extract");
            return found;
        }

        for matcher in &self.matchers {
            match matcher.find(&text) {
                Some(value) => {
                    trace!(segment = %matcher.name, "Found segment");
                    found.insert(&matcher.name, value);
                }
                None => trace!(segment = %matcher.name, "Segment not present"),
            }
        }

        debug!(
            requested = self.matchers.len(),
            found = found.len(),
            "Extracted connection string segments"
        );
        found
    }

    /// Extracts like [`extract`](Self::extract), then checks that every name
    /// in `required` was found.
    ///
    /// # Errors
    /// Returns [`Error::MissingSegments`] naming the absent required segments.
    pub fn extract_required<T: Display, N: IntoSegmentNames>(
        &self,
        text: T,
        required: N,
    ) -> Result<ConnectionString> {
        let found = self.extract(text);
        found.require(required)?;
        Ok(found)
    }
}

/// One-shot extraction of `names` from `text`.
///
/// # Errors
/// Returns [`Error::Pattern`] if a matcher for one of the names cannot be built.
pub fn extract<T: Display, N: IntoSegmentNames>(text: T, names: N) -> Result<ConnectionString> {
    Ok(SegmentExtractor::new(names)?.extract(text))
}
