//! Distributed-engine writer.
//!
//! Bridges to an external distributed compute engine through an injected
//! [`EngineBackend`]. The session is created lazily, memoized per
//! `(apikey, endpoint)` identity, and modeled as an explicit state machine:
//! absent or stopped sessions are (re)created, an active session is reused
//! for the same identity and refused for a different one.

use crate::config::SparkConfig;
use crate::engine::{
    resolve_runtime, EngineBackend, EngineError, EngineLaunchOptions, EngineSession,
    FrameWriteRequest, FRAME_FORMAT,
};
use crate::payload::Payload;
use crate::table::Table;
use crate::writer::WriteMode;
use crate::{Error, Result};
use tracing::debug;

/// Remote-API code that marks a permission failure.
const API_ACCESS_FAILURE: &str = "API_ACCESS_FAILURE";

/// Held-session states.
enum SessionState {
    Absent,
    Active {
        session: Box<dyn EngineSession>,
        apikey: String,
        endpoint: String,
    },
    Stopped,
}

/// Writer that loads data through the distributed engine's native
/// table-write API.
pub struct SparkWriter {
    config: SparkConfig,
    backend: Option<Box<dyn EngineBackend>>,
    state: SessionState,
}

impl SparkWriter {
    /// Create a writer with no engine backend attached. Session creation
    /// fails until one is registered with [`SparkWriter::with_backend`].
    pub fn new(config: SparkConfig) -> Self {
        Self {
            config,
            backend: None,
            state: SessionState::Absent,
        }
    }

    /// Attach the engine backend sessions are launched through.
    pub fn with_backend(mut self, backend: Box<dyn EngineBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Write the payload under the given conflict mode.
    ///
    /// All four conflict modes are supported; the mode is passed through as
    /// the engine write mode and the engine resolves table existence itself.
    /// Engine failures carrying the remote permission code surface as
    /// [`Error::AccessDenied`]; everything else wraps as [`Error::Remote`].
    pub fn write(&mut self, payload: Payload, table: &Table, mode: WriteMode) -> Result<()> {
        let apikey = table.client().apikey().to_string();
        let endpoint = table.client().endpoint().to_string();
        self.ensure_session(&apikey, &endpoint)?;

        let session = match &mut self.state {
            SessionState::Active { session, .. } => session,
            // ensure_session either left the state active or returned early
            _ => return Err(Error::Remote("engine session unavailable".into())),
        };

        let destination = table.qualified_name();
        let frame = session.create_frame(&payload).map_err(classify)?;
        frame
            .save(&FrameWriteRequest {
                mode,
                format: FRAME_FORMAT,
                destination: &destination,
            })
            .map_err(classify)?;

        debug!(table = %destination, mode = %mode, rows = payload.row_count(), "frame saved");
        Ok(())
    }

    /// Stop the held session if one is active. Idempotent when the session
    /// is already stopped or was never created.
    pub fn close(&mut self) -> Result<()> {
        match std::mem::replace(&mut self.state, SessionState::Stopped) {
            SessionState::Active { mut session, .. } => {
                session.stop();
                debug!("engine session stopped");
            }
            SessionState::Absent => self.state = SessionState::Absent,
            SessionState::Stopped => {}
        }
        Ok(())
    }

    fn ensure_session(&mut self, apikey: &str, endpoint: &str) -> Result<()> {
        match &self.state {
            SessionState::Active {
                apikey: held_apikey,
                endpoint: held_endpoint,
                ..
            } => {
                if held_apikey == apikey && held_endpoint == endpoint {
                    Ok(())
                } else {
                    Err(Error::SessionMismatch)
                }
            }
            SessionState::Absent | SessionState::Stopped => {
                let backend = self.backend.as_ref().ok_or_else(|| {
                    Error::NotFound(
                        "no distributed-engine backend is registered; \
                         attach one with SparkWriter::with_backend"
                            .into(),
                    )
                })?;

                let runtime_path = resolve_runtime(&self.config)?;
                let options = EngineLaunchOptions::build(runtime_path, apikey, endpoint);
                debug!(site = %options.site, "launching engine session");

                let session = backend.launch(&options).map_err(|e| {
                    Error::Remote(format!("failed to connect to the engine: {}", e.message))
                })?;

                self.state = SessionState::Active {
                    session,
                    apikey: apikey.to_string(),
                    endpoint: endpoint.to_string(),
                };
                Ok(())
            }
        }
    }
}

fn classify(error: EngineError) -> Error {
    if error.message.contains(API_ACCESS_FAILURE) {
        Error::AccessDenied(
            "failed to access the warehouse storage API; \
             contact customer support to enable access rights"
                .into(),
        )
    } else {
        Error::Remote(format!(
            "failed to load table via the engine bridge: {}",
            error.message
        ))
    }
}
