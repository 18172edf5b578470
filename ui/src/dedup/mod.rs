//! Result-aggregation and view-state engine for the deduplication dashboard.
//!
//! Everything in here is platform-agnostic and free of UI concerns except for
//! the download targets, which pick a browser or filesystem delivery at
//! compile time. Components in `crate::results` and `crate::views` only read
//! from these types.

pub mod aggregate;
pub mod csv;
pub mod download;
pub mod error;
pub mod expansion;
pub mod model;
pub mod session;
pub mod transport;
pub mod view_mode;

pub use aggregate::{
    difficulty_histogram, per_source_histogram, summarize, ChartPoint, DifficultyCount,
    ResultSummary, SourceCount,
};
pub use csv::{serialize_coverage, CsvArtifact, COVERAGE_FILENAME};
pub use download::{deliver_scoped, export_coverage, Delivery, DownloadTarget, PlatformDownload};
pub use error::{ExportError, UploadError};
pub use expansion::ExpansionState;
pub use model::{CanonicalQuestion, Cluster, CoverageItem, Difficulty, QuestionInstance, UploadResult};
pub use session::{
    submit, DashboardSession, InstalledResult, SelectedFile, ServiceResponse, SessionCell,
    SubmitRejection, UploadPhase, UploadTicket,
};
pub use transport::{HttpTransport, UploadTransport};
pub use view_mode::{ViewController, ViewMode};
