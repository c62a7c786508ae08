//! forgekit core library
//!
//! Common types and error handling shared by the pipeline crates and
//! the command-line frontend.

pub mod error;
pub mod platform;

pub use error::{Error, Result};
pub use platform::HostPlatform;

/// Re-export commonly used items
pub mod prelude {
    pub use crate::error::{Error, Result, ResultExt};
    pub use crate::platform::HostPlatform;
}
