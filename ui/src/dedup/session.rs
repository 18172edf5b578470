//! Upload orchestration and the per-session dashboard state.
//!
//! [`DashboardSession`] is a plain state machine over
//! `Idle → Loading → Success | Failed`. It owns the installed result together
//! with the expansion and view state that must be reset whenever a new result
//! arrives. The network round-trip happens outside of it: [`DashboardSession::begin`]
//! hands out an [`UploadTicket`], the caller awaits the transport, then feeds
//! the outcome back through [`DashboardSession::complete`]. Because the
//! session is only borrowed on either side of the await, other interactions
//! keep working while an upload is in flight, and a second submit is rejected
//! by the state machine itself.

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;
use time::OffsetDateTime;

use super::error::UploadError;
use super::expansion::ExpansionState;
use super::model::UploadResult;
use super::transport::UploadTransport;
use super::view_mode::{ViewController, ViewMode};

/// A file picked by the user, already read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    fn looks_like_pdf(&self) -> bool {
        self.name.to_ascii_lowercase().ends_with(".pdf")
    }
}

/// Raw reply from the service, before interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceResponse {
    pub status: u16,
    pub body: String,
}

impl ServiceResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UploadPhase {
    #[default]
    Idle,
    Loading {
        attempt: u64,
    },
    Success,
    Failed(UploadError),
}

/// Proof that an attempt was started; required to complete it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadTicket {
    attempt: u64,
}

impl UploadTicket {
    pub fn attempt(&self) -> u64 {
        self.attempt
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitRejection {
    #[error("an upload is already in progress")]
    InFlight,
    #[error(transparent)]
    Invalid(UploadError),
}

/// A result accepted into the session. `attempt` identifies it for memoized
/// derivations.
#[derive(Debug, Clone)]
pub struct InstalledResult {
    pub attempt: u64,
    pub received_at: OffsetDateTime,
    pub result: Rc<UploadResult>,
}

// Identity, not contents: components keyed on an installed result only
// re-derive when a different upload is installed.
impl PartialEq for InstalledResult {
    fn eq(&self, other: &Self) -> bool {
        self.attempt == other.attempt && Rc::ptr_eq(&self.result, &other.result)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSession {
    phase: UploadPhase,
    installed: Option<InstalledResult>,
    expansion: ExpansionState,
    view: ViewController,
    last_attempt: u64,
}

impl DashboardSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &UploadPhase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, UploadPhase::Loading { .. })
    }

    pub fn error(&self) -> Option<&UploadError> {
        match &self.phase {
            UploadPhase::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn installed(&self) -> Option<&InstalledResult> {
        self.installed.as_ref()
    }

    pub fn result(&self) -> Option<&UploadResult> {
        self.installed.as_ref().map(|installed| installed.result.as_ref())
    }

    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view.mode()
    }

    /// Start an attempt. Rejected while another attempt is in flight; a bad
    /// selection moves straight to `Failed` without starting anything.
    pub fn begin(&mut self, files: &[SelectedFile]) -> Result<UploadTicket, SubmitRejection> {
        if let UploadPhase::Loading { attempt } = self.phase {
            tracing::warn!(attempt, "submit rejected: upload already in flight");
            return Err(SubmitRejection::InFlight);
        }

        if let Err(err) = validate_selection(files) {
            tracing::info!(%err, "submit rejected by validation");
            self.phase = UploadPhase::Failed(err.clone());
            return Err(SubmitRejection::Invalid(err));
        }

        self.last_attempt += 1;
        let attempt = self.last_attempt;
        self.installed = None;
        self.expansion.reset();
        self.phase = UploadPhase::Loading { attempt };
        tracing::info!(attempt, files = files.len(), "upload started");

        Ok(UploadTicket { attempt })
    }

    /// Feed the transport outcome back. Returns `false` when the ticket does
    /// not belong to the attempt in flight; the session is then untouched.
    pub fn complete(
        &mut self,
        ticket: UploadTicket,
        outcome: Result<ServiceResponse, UploadError>,
    ) -> bool {
        match self.phase {
            UploadPhase::Loading { attempt } if attempt == ticket.attempt => {}
            _ => {
                tracing::warn!(attempt = ticket.attempt, "ignoring stale upload completion");
                return false;
            }
        }

        match outcome.and_then(interpret_response) {
            Ok(result) => self.install(ticket.attempt, result),
            Err(err) => {
                tracing::warn!(attempt = ticket.attempt, %err, "upload failed");
                self.phase = UploadPhase::Failed(err);
            }
        }

        true
    }

    fn install(&mut self, attempt: u64, result: UploadResult) {
        tracing::info!(
            attempt,
            clusters = result.clusters.len(),
            coverage = result.coverage_set.len(),
            "upload result installed"
        );
        self.installed = Some(InstalledResult {
            attempt,
            received_at: received_now(),
            result: Rc::new(result),
        });
        self.expansion.reset();
        self.view.reset();
        self.phase = UploadPhase::Success;
    }

    /// Toggle a cluster of the installed result. Indices outside the current
    /// cluster list are ignored and yield `None`.
    pub fn toggle_cluster(&mut self, index: usize) -> Option<bool> {
        let count = self.result().map(|result| result.clusters.len())?;
        (index < count).then(|| self.expansion.toggle(index))
    }

    pub fn expand_all(&mut self) {
        if let Some(count) = self.result().map(|result| result.clusters.len()) {
            self.expansion.expand_all(count);
        }
    }

    pub fn collapse_all(&mut self) {
        self.expansion.reset();
    }

    pub fn select_view(&mut self, mode: ViewMode) -> bool {
        self.view.select(mode)
    }
}

/// Local wall-clock time. Falls back to UTC where the offset is unknowable
/// (multi-threaded Unix processes).
fn received_now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|err| {
        tracing::debug!(%err, "local offset unavailable; stamping in UTC");
        OffsetDateTime::now_utc()
    })
}

fn validate_selection(files: &[SelectedFile]) -> Result<(), UploadError> {
    if files.is_empty() {
        return Err(UploadError::NoFiles);
    }
    match files.iter().find(|file| !file.looks_like_pdf()) {
        Some(file) => Err(UploadError::NotPdf(file.name.clone())),
        None => Ok(()),
    }
}

/// Turn a raw reply into a validated result or a service error.
pub fn interpret_response(response: ServiceResponse) -> Result<UploadResult, UploadError> {
    if response.is_success() {
        UploadResult::from_json(&response.body)
    } else {
        Err(UploadError::Service {
            status: response.status,
            detail: service_detail(&response.body),
        })
    }
}

/// The service's `detail` string, when it sent a non-blank one.
fn service_detail(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("detail")
                .and_then(serde_json::Value::as_str)
                .map(str::to_string)
        })
        .filter(|detail| !detail.trim().is_empty())
}

/// Somewhere a [`DashboardSession`] lives, mutated in short synchronous turns.
pub trait SessionCell {
    fn update<R>(&mut self, f: impl FnOnce(&mut DashboardSession) -> R) -> R;
}

impl SessionCell for Rc<RefCell<DashboardSession>> {
    fn update<R>(&mut self, f: impl FnOnce(&mut DashboardSession) -> R) -> R {
        f(&mut self.borrow_mut())
    }
}

/// Run one complete upload: begin, await the transport, complete.
///
/// The session is not borrowed while the request is in flight.
pub async fn submit<C, T>(
    cell: &mut C,
    transport: &T,
    files: Vec<SelectedFile>,
) -> Result<UploadTicket, SubmitRejection>
where
    C: SessionCell,
    T: UploadTransport,
{
    let ticket = cell.update(|session| session.begin(&files))?;
    let outcome = transport.upload(&files).await;
    cell.update(|session| session.complete(ticket, outcome));
    Ok(ticket)
}
