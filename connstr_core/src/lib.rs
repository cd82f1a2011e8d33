#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::missing_panics_doc, clippy::must_use_candidate)]

//! Extraction of named segments from `;`-delimited connection strings.
//!
//! ```
//! let cs = connstr_core::extract("HostName=hub.example.net;DeviceId=dev-1", ["DeviceId"])?;
//! assert_eq!(cs.get("DeviceId"), Some("dev-1"));
//! assert!(!cs.contains("HostName"));
//! # Ok::<(), connstr_core::Error>(())
//! ```

mod connection_string;
mod error;
pub mod extractor;
mod segment;

pub use connection_string::ConnectionString;
pub use error::{Error, Result};
pub use extractor::{SegmentExtractor, extract};
pub use segment::{IntoSegmentNames, Name};
