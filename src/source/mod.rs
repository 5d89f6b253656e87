//! Content acquisition boundary.
//!
//! A [`ContentSource`] turns one identifier into an ordered list of raw text
//! segments, retrying internally; the acquirer owns persistence.

pub mod generation;
pub mod web;

use std::fmt;

pub use generation::GenerationSource;
pub use web::WebSource;

/// Ordered raw text segments for one identifier.
pub type RawSegments = Vec<String>;

/// Transient per-identifier failure after exhausting retries.
///
/// Never fatal to a batch; the identifier is skipped for this run and the
/// attempt count is reported so operators can judge flakiness.
#[derive(Debug)]
pub struct FetchError {
    pub identifier: String,
    pub attempts: usize,
    pub last_error: String,
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "fetch `{}` failed after {} attempts: {}",
            self.identifier, self.attempts, self.last_error
        )
    }
}

impl std::error::Error for FetchError {}

/// Polymorphic fetch seam between the acquirer and the outside world.
///
/// Implementations must be shareable across worker threads.
pub trait ContentSource: Sync {
    fn fetch(&self, identifier: &str) -> Result<RawSegments, FetchError>;
}

/// Percent-encode a URL path component, keeping `:/?&=` intact.
pub(crate) fn percent_encode_path(raw: &str) -> String {
    const SAFE: &[u8] = b":/?&=";
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        let keep = byte.is_ascii_alphanumeric()
            || matches!(byte, b'-' | b'_' | b'.' | b'~')
            || SAFE.contains(&byte);
        if keep {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}
