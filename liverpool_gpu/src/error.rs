//! Error types for the Liverpool GPU view layer
//!
//! Every failure here is local to one view or one draw: the caller (the texture
//! cache) decides whether to skip the view, the draw or the frame.

use std::fmt;

/// Result type for view-layer operations
pub type Result<T> = std::result::Result<T, Error>;

/// View-layer errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No table entry for a hardware format, or the device rejects every candidate format.
    /// Not retryable.
    UnsupportedFormat(String),

    /// Hardware-supplied ranges that clamping cannot reconcile (malformed title data)
    InvalidDescriptor(String),

    /// Backend-specific error (device object creation failed, etc.)
    BackendError(String),

    /// Out of host or device memory while creating a view
    OutOfMemory,
}

impl Error {
    /// True for errors caused by the guest's data rather than by the host device.
    ///
    /// The texture cache skips the affected view for these and keeps the frame going.
    pub fn is_guest_fault(&self) -> bool {
        matches!(self, Error::UnsupportedFormat(_) | Error::InvalidDescriptor(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnsupportedFormat(msg) => write!(f, "Unsupported format: {}", msg),
            Error::InvalidDescriptor(msg) => write!(f, "Invalid descriptor: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of memory"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
