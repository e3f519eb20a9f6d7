//! Distributed-engine bridge.
//!
//! The engine itself is an external system; this module owns the narrow
//! traits it is driven through ([`backend`]), the explicit launch-option
//! construction that replaces ambient environment mutation ([`options`]),
//! and local resolution plus download of the engine runtime archive
//! ([`runtime`]).

pub mod backend;
pub mod options;
pub mod runtime;

pub use backend::{EngineBackend, EngineError, EngineFrame, EngineSession, FrameWriteRequest};
pub use options::{ApiHosts, EngineLaunchOptions};
pub use runtime::{default_runtime_path, resolve_runtime, RUNTIME_ARCHIVE, RUNTIME_BASE_URL};

/// Connector identifier passed as the engine write format.
pub const FRAME_FORMAT: &str = "com.treasuredata.spark";
