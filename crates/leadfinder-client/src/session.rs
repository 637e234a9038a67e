//! Search session controller.
//!
//! One controller owns one observable [`SessionSnapshot`]. A search runs as
//! a spawned task that drains the response stream, decodes lines, and
//! applies the resulting events. All writes flow through a single
//! `watch::Sender`, and every write re-checks the session generation, so a
//! superseded (cancelled) run can never touch state again no matter when its
//! remaining bytes arrive.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use futures::StreamExt;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use uuid::Uuid;

use leadfinder_core::{sanitize_zip_codes, validate_included_types, SearchRequest, ValidationError};
use leadfinder_stream::{dispatch_line, LineDecoder, SearchResult, StreamEvent};

use crate::client::SearchClient;
use crate::error::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Completed,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    Progress,
    Warning,
}

/// One visible log line, in stream arrival order.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub kind: LogKind,
    pub message: String,
    pub at: DateTime<Utc>,
}

/// Point-in-time view of a session. Cloned out to readers; never shared
/// mutably.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    /// Identifies the session whose data this is; `None` until the first
    /// `start`.
    pub session_id: Option<Uuid>,
    pub phase: Phase,
    pub log: Vec<LogEntry>,
    pub result: Option<SearchResult>,
    pub error: Option<String>,
    /// Lines that were not valid records. Diagnostic only; never fails the
    /// session.
    pub malformed_lines: u64,
}

impl SessionSnapshot {
    fn idle() -> Self {
        Self {
            session_id: None,
            phase: Phase::Idle,
            log: Vec::new(),
            result: None,
            error: None,
            malformed_lines: 0,
        }
    }

    fn running(session_id: Uuid) -> Self {
        Self {
            session_id: Some(session_id),
            phase: Phase::Running,
            ..Self::idle()
        }
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self.phase, Phase::Completed | Phase::Failed)
    }
}

struct Shared {
    /// Generation of the run that owns the state. Bumped on every `start`
    /// and `reset`; writers carry the generation they were spawned with.
    generation: AtomicU64,
    tx: watch::Sender<SessionSnapshot>,
}

impl Shared {
    /// Applies `mutate` iff `generation` is still current. Returns whether
    /// the write landed. The generation check happens inside the sender's
    /// critical section, which is what makes cancellation race-free.
    fn apply(&self, generation: u64, mutate: impl FnOnce(&mut SessionSnapshot)) -> bool {
        self.tx.send_if_modified(|state| {
            if self.generation.load(Ordering::Acquire) != generation {
                return false;
            }
            mutate(state);
            true
        })
    }
}

/// Drives one search at a time against an injected [`SearchClient`].
///
/// State machine: `Idle → Running → {Completed, Failed}`, with [`reset`]
/// returning to `Idle` from a terminal phase and [`start`] superseding any
/// in-flight run.
///
/// [`reset`]: SessionController::reset
/// [`start`]: SessionController::start
pub struct SessionController {
    client: SearchClient,
    shared: Arc<Shared>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl SessionController {
    #[must_use]
    pub fn new(client: SearchClient) -> Self {
        let (tx, _rx) = watch::channel(SessionSnapshot::idle());
        Self {
            client,
            shared: Arc::new(Shared {
                generation: AtomicU64::new(0),
                tx,
            }),
            task: Mutex::new(None),
        }
    }

    /// Current state, cloned.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.shared.tx.borrow().clone()
    }

    /// Change notifications for readers that prefer subscribing to polling.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.shared.tx.subscribe()
    }

    /// Validates `request` and starts a new session, cancelling any
    /// in-flight one. Returns the new session's id.
    ///
    /// Validation failures leave existing state completely untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] if every zip code is dropped by
    /// the defensive re-filter or the business-type selection is empty.
    pub fn start(&self, request: SearchRequest) -> Result<Uuid, ClientError> {
        // The submitting UI may hold a stale validity flag; re-validate
        // before anything transitions.
        let zip_codes = sanitize_zip_codes(&request.zip_codes);
        if zip_codes.is_empty() {
            return Err(ValidationError::InvalidZipCodes.into());
        }
        validate_included_types(&request.included_types)?;
        let request = SearchRequest {
            zip_codes,
            ..request
        };

        let session_id = Uuid::new_v4();
        let mut task = self.task.lock().unwrap_or_else(PoisonError::into_inner);

        // Claim the next generation first: from here on, any write still in
        // flight from the previous session fails its generation check.
        let generation = self.shared.generation.fetch_add(1, Ordering::AcqRel) + 1;
        if let Some(previous) = task.take() {
            previous.abort();
        }

        self.shared
            .apply(generation, |state| *state = SessionSnapshot::running(session_id));

        tracing::info!(
            %session_id,
            zip_codes = request.zip_codes.len(),
            radius_m = request.radius_meters,
            "starting zip code search session"
        );

        let client = self.client.clone();
        let shared = Arc::clone(&self.shared);
        *task = Some(tokio::spawn(async move {
            run_session(client, shared, generation, session_id, request).await;
        }));

        Ok(session_id)
    }

    /// Returns to `Idle` from a terminal phase. Has no effect (returns
    /// `false`) while a session is `Running`; cancel by starting a new
    /// session instead.
    pub fn reset(&self) -> bool {
        let mut task = self.task.lock().unwrap_or_else(PoisonError::into_inner);
        if self.shared.tx.borrow().phase == Phase::Running {
            return false;
        }

        // A completed session's task may still be draining trailing events;
        // bump the generation so none of them land after the reset.
        let generation = self.shared.generation.fetch_add(1, Ordering::AcqRel) + 1;
        if let Some(previous) = task.take() {
            previous.abort();
        }
        self.shared
            .apply(generation, |state| *state = SessionSnapshot::idle())
    }
}

async fn run_session(
    client: SearchClient,
    shared: Arc<Shared>,
    generation: u64,
    session_id: Uuid,
    request: SearchRequest,
) {
    match drive_stream(&client, &shared, generation, &request).await {
        Ok(()) => {
            tracing::info!(%session_id, "zip code search session finished");
        }
        Err(err) => {
            tracing::warn!(%session_id, error = %err, "zip code search session failed");
            shared.apply(generation, |state| {
                state.phase = Phase::Failed;
                state.error = Some(err.to_string());
            });
        }
    }
}

/// Reads the response stream to the end, feeding the decoder and applying
/// each dispatched event. Returns `Ok` on normal completion or supersession,
/// `Err` for anything that prevented a result from ever arriving.
async fn drive_stream(
    client: &SearchClient,
    shared: &Shared,
    generation: u64,
    request: &SearchRequest,
) -> Result<(), ClientError> {
    let response = client.open_zip_code_stream(request).await?;
    let mut stream = response.bytes_stream();
    let mut decoder = LineDecoder::new();
    let mut saw_result = false;

    while let Some(chunk) = stream.next().await {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(err) => {
                if saw_result {
                    // The result is already in; a broken tail cannot
                    // un-complete the session.
                    tracing::warn!(error = %err, "transport error after result, dropping stream tail");
                    return Ok(());
                }
                return Err(err.into());
            }
        };
        tracing::debug!(bytes = chunk.len(), "received stream chunk");
        for line in decoder.feed(&chunk) {
            if !apply_event(shared, generation, dispatch_line(&line), &mut saw_result) {
                // Superseded by a newer session; stop reading.
                return Ok(());
            }
        }
    }

    // The backend may omit the final newline; the remainder is still one
    // record.
    if let Some(line) = decoder.finish() {
        if !apply_event(shared, generation, dispatch_line(&line), &mut saw_result) {
            return Ok(());
        }
    }

    if saw_result {
        Ok(())
    } else {
        Err(ClientError::IncompleteStream)
    }
}

/// Applies one event to the session state. Returns `false` when the write
/// was refused because the session has been superseded.
fn apply_event(
    shared: &Shared,
    generation: u64,
    event: StreamEvent,
    saw_result: &mut bool,
) -> bool {
    shared.apply(generation, |state| match event {
        StreamEvent::Progress { message } => state.log.push(LogEntry {
            kind: LogKind::Progress,
            message,
            at: Utc::now(),
        }),
        StreamEvent::Warning { message } => state.log.push(LogEntry {
            kind: LogKind::Warning,
            message,
            at: Utc::now(),
        }),
        StreamEvent::Result { payload } => {
            if state.result.is_some() {
                // The backend promises a single result record; keep the
                // first one if it ever breaks that promise.
                tracing::warn!("ignoring duplicate result record");
            } else {
                apply_result(state, payload);
                *saw_result = true;
            }
        }
        StreamEvent::Malformed { .. } => state.malformed_lines += 1,
    })
}

fn apply_result(state: &mut SessionSnapshot, payload: SearchResult) {
    tracing::info!(
        num_results = payload.num_results_found,
        num_zip_codes = payload.num_zip_codes_searched,
        "received final result"
    );
    state.result = Some(payload);
    state.phase = Phase::Completed;
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
