use std::sync::Arc;

use crate::builder::session::{InMemorySessionStore, SessionStore};
use crate::config::Config;
use crate::export::pdf::{LopdfExporter, PdfExporter};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Builder sessions. Default: in-memory, lost on restart.
    pub sessions: Arc<dyn SessionStore>,
    /// Pluggable PDF backend. Default: `LopdfExporter`.
    pub pdf: Arc<dyn PdfExporter>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            sessions: Arc::new(InMemorySessionStore::new(config.session_ttl)),
            config,
            pdf: Arc::new(LopdfExporter),
        }
    }
}
