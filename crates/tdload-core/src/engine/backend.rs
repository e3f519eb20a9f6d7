//! Traits the distributed engine is consumed through.
//!
//! A backend launches sessions; a session converts payloads into the
//! engine's native frames; a frame saves itself to a destination table with
//! a write mode. Failures carry the engine's message verbatim so the spark
//! writer can classify permission errors apart from generic ones.

use crate::payload::Payload;
use crate::writer::WriteMode;
use thiserror::Error;

/// An engine-side failure, carrying the underlying message.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct EngineError {
    pub message: String,
}

impl EngineError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Parameters of one frame save.
#[derive(Debug, Clone, Copy)]
pub struct FrameWriteRequest<'a> {
    /// Conflict mode, passed through as the engine write mode
    pub mode: WriteMode,
    /// Connector identifier
    pub format: &'a str,
    /// Fully qualified `database.table` destination
    pub destination: &'a str,
}

/// Launches engine sessions from explicit options.
///
/// Backends that shell out to the engine's submit tooling can render the
/// options with [`crate::engine::EngineLaunchOptions::submit_args`].
pub trait EngineBackend: Send + Sync {
    fn launch(
        &self,
        options: &super::options::EngineLaunchOptions,
    ) -> std::result::Result<Box<dyn EngineSession>, EngineError>;
}

/// One live engine session.
pub trait EngineSession: Send {
    /// Convert a payload into the engine's native frame.
    fn create_frame(
        &self,
        payload: &Payload,
    ) -> std::result::Result<Box<dyn EngineFrame>, EngineError>;

    /// Stop the session. Further use requires launching a new one.
    fn stop(&mut self);
}

/// An engine frame ready to be written out.
pub trait EngineFrame {
    fn save(&self, request: &FrameWriteRequest<'_>) -> std::result::Result<(), EngineError>;
}
