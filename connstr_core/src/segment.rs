//! Coercion of the `names` argument into an ordered list of segment names.
//!
//! Callers may request a single segment or a sequence of them. Every element
//! only needs a textual form, so sequences accept any `Display` item.

use std::fmt::{self, Display};

/// Conversion of one or many segment names into their textual form.
///
/// Implemented for single names (`&str`, `String`, `char`) and for sequences
/// of any `Display` item. A single name of another `Display` type is passed
/// wrapped in [`Name`] or as a one-element array.
///
/// A single empty name requests nothing. An empty name inside a sequence is
/// kept and matches a segment written as `=value`.
pub trait IntoSegmentNames {
    /// Returns the requested names in request order.
    fn into_segment_names(self) -> Vec<String>;
}

/// A single segment name given by any `Display` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Name<T>(pub T);

impl<T: Display> Display for Name<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

fn single(name: String) -> Vec<String> {
    if name.is_empty() {
        Vec::new()
    } else {
        vec![name]
    }
}

impl IntoSegmentNames for &str {
    fn into_segment_names(self) -> Vec<String> {
        single(self.to_owned())
    }
}

impl IntoSegmentNames for String {
    fn into_segment_names(self) -> Vec<String> {
        single(self)
    }
}

impl IntoSegmentNames for &String {
    fn into_segment_names(self) -> Vec<String> {
        single(self.clone())
    }
}

impl IntoSegmentNames for char {
    fn into_segment_names(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl<T: Display> IntoSegmentNames for Name<T> {
    fn into_segment_names(self) -> Vec<String> {
        single(self.0.to_string())
    }
}

impl<N: Display> IntoSegmentNames for Vec<N> {
    fn into_segment_names(self) -> Vec<String> {
        self.iter().map(ToString::to_string).collect()
    }
}

impl<N: Display> IntoSegmentNames for &Vec<N> {
    fn into_segment_names(self) -> Vec<String> {
        self.iter().map(ToString::to_string).collect()
    }
}

impl<N: Display> IntoSegmentNames for &[N] {
    fn into_segment_names(self) -> Vec<String> {
        self.iter().map(ToString::to_string).collect()
    }
}

impl<N: Display, const K: usize> IntoSegmentNames for [N; K] {
    fn into_segment_names(self) -> Vec<String> {
        self.iter().map(ToString::to_string).collect()
    }
}

impl<N: Display> IntoSegmentNames for Option<N> {
    fn into_segment_names(self) -> Vec<String> {
        self.map_or_else(Vec::new, |name| single(name.to_string()))
    }
}
