//! Target environment model for the acoustics plugin build rules.
//!
//! A target environment is the tuple the host build orchestrator hands to the
//! module rules once per build invocation:
//! - **Platform:** the engine platform being built (Win64, Android, ...)
//! - **Configuration:** Debug or Release, plus the debug-CRT opt-in flag
//! - **Host version:** the engine version used to gate optional dependencies
//! - **Link settings:** modular vs monolithic linking, static CRT, compiler version

pub mod environment;
pub mod error;
pub mod parse;
pub mod platform;
pub mod version;

pub use environment::{BuildConfiguration, LinkType, TargetEnvironment};
pub use error::{Result, TargetError};
pub use platform::Platform;
pub use version::HostVersion;
