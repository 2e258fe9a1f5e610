//! Builder sessions: one resume being edited, its wizard position and its
//! title gate. Sessions live behind the `SessionStore` trait so the backing
//! store can change without touching handlers.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tokio::time::Instant;
use uuid::Uuid;

use crate::builder::title_gate::{GatePhase, GateStatus, GateTimings, TitleGate};
use crate::builder::validation;
use crate::builder::wizard::{StepOutcome, Wizard, WizardStep};
use crate::errors::AppError;
use crate::models::resume::Resume;

#[derive(Debug, Clone)]
pub struct BuilderSession {
    pub id: Uuid,
    pub resume: Resume,
    pub wizard: Wizard,
    pub title_gate: TitleGate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// What the client sees of a session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub resume: Resume,
    pub active_step: WizardStep,
    pub active_index: usize,
    pub is_last: bool,
    /// Every required field still empty, across all steps.
    pub missing_fields: Vec<String>,
    pub gate: GateStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BuilderSession {
    pub fn new(timings: GateTimings) -> Self {
        let now = Utc::now();
        let resume = Resume::default();
        Self {
            id: resume.id,
            resume,
            wizard: Wizard::default(),
            title_gate: TitleGate::new(timings),
            created_at: now,
            updated_at: now,
        }
    }

    /// Fails with `Locked` while the title gate has not opened.
    pub fn ensure_unlocked(&mut self) -> Result<(), AppError> {
        let status = self.title_gate.poll(Instant::now());
        if status.phase == GatePhase::Unlocked {
            return Ok(());
        }
        Err(AppError::Locked(match status.unlocks_in_ms {
            Some(ms) => format!("Resume title is being confirmed; the form unlocks in {ms} ms"),
            None => "Enter a resume title to unlock the form".to_string(),
        }))
    }

    pub fn set_title(&mut self, title: String) -> GateStatus {
        self.title_gate.on_title_input(&title, Instant::now());
        self.resume.title = title;
        self.touch();
        self.title_gate.poll(Instant::now())
    }

    /// Replaces the resume content, keeping the session's id and title.
    pub fn replace_resume(&mut self, mut resume: Resume) -> Result<(), AppError> {
        self.ensure_unlocked()?;
        resume.id = self.id;
        resume.title = std::mem::take(&mut self.resume.title);
        resume.normalize();
        self.resume = resume;
        self.touch();
        Ok(())
    }

    pub fn next_step(&mut self) -> Result<StepOutcome, AppError> {
        self.ensure_unlocked()?;
        Ok(self.wizard.next(&self.resume))
    }

    pub fn previous_step(&mut self) -> Result<StepOutcome, AppError> {
        self.ensure_unlocked()?;
        Ok(self.wizard.previous())
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn snapshot(&mut self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id,
            resume: self.resume.clone(),
            active_step: self.wizard.active_step(),
            active_index: self.wizard.active_index(),
            is_last: self.wizard.is_last(),
            missing_fields: validation::missing_fields_for_all(&self.resume),
            gate: self.title_gate.poll(Instant::now()),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Store trait
// ────────────────────────────────────────────────────────────────────────────

pub type SessionUpdate<'a> =
    Box<dyn FnOnce(&mut BuilderSession) -> Result<(), AppError> + Send + 'a>;

/// Session persistence. Carried in `AppState` as `Arc<dyn SessionStore>`.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn insert(&self, session: BuilderSession) -> Result<(), AppError>;

    async fn get(&self, id: Uuid) -> Result<BuilderSession, AppError>;

    /// Applies `apply` under the store's lock. The change is kept only when
    /// `apply` succeeds.
    async fn update(&self, id: Uuid, apply: SessionUpdate<'_>) -> Result<(), AppError>;

    async fn remove(&self, id: Uuid) -> Result<(), AppError>;
}

/// Runs `f` against session `id` via `SessionStore::update` and hands back
/// whatever it produced.
pub async fn update_session<R, F>(store: &dyn SessionStore, id: Uuid, f: F) -> Result<R, AppError>
where
    R: Send,
    F: FnOnce(&mut BuilderSession) -> Result<R, AppError> + Send,
{
    let mut out = None;
    store
        .update(
            id,
            Box::new(|session: &mut BuilderSession| {
                out = Some(f(session)?);
                Ok(())
            }),
        )
        .await?;
    out.ok_or_else(|| AppError::Internal(anyhow::anyhow!("session update for {id} did not run")))
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Builder session {id} not found"))
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory store
// ────────────────────────────────────────────────────────────────────────────

struct StoredSession {
    session: BuilderSession,
    last_access: Instant,
}

/// Sessions in a map behind a tokio lock. A session not touched for
/// `idle_ttl` is treated as gone: it is dropped when next looked up, and a
/// sweep on every insert drops the rest.
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<Uuid, StoredSession>>,
    idle_ttl: Duration,
}

impl InMemorySessionStore {
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_ttl,
        }
    }

    fn is_expired(&self, stored: &StoredSession, now: Instant) -> bool {
        now.saturating_duration_since(stored.last_access) >= self.idle_ttl
    }

    /// The live entry for `id`, refreshed; an expired entry is removed.
    fn live_entry<'m>(
        &self,
        sessions: &'m mut HashMap<Uuid, StoredSession>,
        id: Uuid,
    ) -> Result<&'m mut StoredSession, AppError> {
        let now = Instant::now();
        let expired = match sessions.get(&id) {
            Some(stored) => self.is_expired(stored, now),
            None => return Err(not_found(id)),
        };
        if expired {
            sessions.remove(&id);
            tracing::info!(session_id = %id, "builder session expired");
            return Err(not_found(id));
        }
        let stored = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        stored.last_access = now;
        Ok(stored)
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn insert(&self, session: BuilderSession) -> Result<(), AppError> {
        let mut sessions = self.sessions.write().await;
        let now = Instant::now();
        let before = sessions.len();
        sessions.retain(|_, stored| !self.is_expired(stored, now));
        if sessions.len() < before {
            tracing::info!(evicted = before - sessions.len(), "evicted idle builder sessions");
        }

        if sessions.contains_key(&session.id) {
            return Err(AppError::Internal(anyhow::anyhow!(
                "Builder session {} already exists",
                session.id
            )));
        }
        sessions.insert(
            session.id,
            StoredSession {
                session,
                last_access: now,
            },
        );
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<BuilderSession, AppError> {
        let mut sessions = self.sessions.write().await;
        let stored = self.live_entry(&mut sessions, id)?;
        Ok(stored.session.clone())
    }

    async fn update(&self, id: Uuid, apply: SessionUpdate<'_>) -> Result<(), AppError> {
        let mut sessions = self.sessions.write().await;
        let stored = self.live_entry(&mut sessions, id)?;
        let mut draft = stored.session.clone();
        apply(&mut draft)?;
        stored.session = draft;
        Ok(())
    }

    async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        let mut sessions = self.sessions.write().await;
        self.live_entry(&mut sessions, id)?;
        sessions.remove(&id);
        Ok(())
    }
}
