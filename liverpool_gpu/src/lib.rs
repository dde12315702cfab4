/*!
# Liverpool GPU

Backend-agnostic core of the console GPU surface/view translation layer.

This crate holds the hardware side of the translation: the register-encoded
surface vocabulary (data/number formats, image types, channel selects, swap
modes, depth/stencil formats), the three hardware surface descriptor kinds,
and the ambient services shared with the backends (errors, logging,
configuration). Backend crates (Vulkan) turn these descriptors into views.

## Architecture

- **amdgpu**: hardware register vocabulary and source descriptors
- **VideoCore**: configuration, logger and diagnostic deduplication
- **Error**: failure taxonomy shared by every backend
*/

// Internal modules
mod error;
mod config;
mod video_core;
pub mod log;
pub mod amdgpu;

// Main liverpool namespace module
pub mod liverpool {
    // Error types
    pub use crate::error::{Error, Result};

    // Configuration
    pub use crate::config::Config;

    // Global state and logging entry points
    pub use crate::video_core::VideoCore;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Hardware register vocabulary
    pub mod amdgpu {
        pub use crate::amdgpu::*;
    }
}
