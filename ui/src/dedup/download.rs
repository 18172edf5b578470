//! Delivery of CSV artifacts to the user.
//!
//! A [`DownloadTarget`] acquires a transient handle for the artifact, triggers
//! the save through it, and releases it. [`deliver_scoped`] owns that
//! sequence: once `acquire` succeeds, `release` runs on every path out,
//! including a failing or panicking `trigger`.
//!
//! - Web: the handle is an object URL for a Blob, triggered through a hidden
//!   anchor and revoked afterwards.
//! - Native: the handle is a staging file next to the final export, renamed
//!   into place by the trigger and removed if it is still around on release.

use std::path::PathBuf;

use super::csv::{serialize_coverage, CsvArtifact};
use super::error::ExportError;
use super::model::UploadResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Written straight to disk.
    Saved(PathBuf),
    /// Handed to the browser's download manager.
    Started,
}

pub trait DownloadTarget {
    type Handle;

    fn acquire(&self, artifact: &CsvArtifact) -> Result<Self::Handle, ExportError>;

    fn trigger(&self, handle: &Self::Handle, artifact: &CsvArtifact)
        -> Result<Delivery, ExportError>;

    fn release(&self, handle: Self::Handle);
}

struct Scoped<'a, T: DownloadTarget> {
    target: &'a T,
    handle: Option<T::Handle>,
}

impl<T: DownloadTarget> Drop for Scoped<'_, T> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.target.release(handle);
        }
    }
}

/// Acquire, trigger, release. The handle is released even when triggering fails.
pub fn deliver_scoped<T: DownloadTarget>(
    target: &T,
    artifact: &CsvArtifact,
) -> Result<Delivery, ExportError> {
    let scoped = Scoped {
        target,
        handle: Some(target.acquire(artifact)?),
    };
    let outcome = match scoped.handle.as_ref() {
        Some(handle) => target.trigger(handle, artifact),
        None => Err(ExportError::Io("download handle missing".into())),
    };
    drop(scoped);
    outcome
}

/// Export the coverage set of `result`. Nothing to export is `Ok(None)`, and
/// no download is triggered.
pub fn export_coverage<T: DownloadTarget>(
    result: Option<&UploadResult>,
    target: &T,
) -> Result<Option<Delivery>, ExportError> {
    let Some(artifact) = serialize_coverage(result.map(|r| r.coverage_set.as_slice())) else {
        tracing::debug!("coverage export skipped: nothing to export");
        return Ok(None);
    };

    let delivery = deliver_scoped(target, &artifact)?;
    tracing::info!(rows = artifact.rows, ?delivery, "coverage export delivered");
    Ok(Some(delivery))
}

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserDownload as PlatformDownload;
#[cfg(not(target_arch = "wasm32"))]
pub use native::DirectoryDownload as PlatformDownload;

#[cfg(target_arch = "wasm32")]
mod browser {
    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

    use super::{Delivery, DownloadTarget};
    use crate::dedup::csv::CsvArtifact;
    use crate::dedup::error::ExportError;

    #[derive(Debug, Clone, Copy, Default)]
    pub struct BrowserDownload;

    impl BrowserDownload {
        pub fn new() -> Result<Self, ExportError> {
            Ok(Self)
        }
    }

    pub struct ObjectUrl(String);

    impl DownloadTarget for BrowserDownload {
        type Handle = ObjectUrl;

        fn acquire(&self, artifact: &CsvArtifact) -> Result<ObjectUrl, ExportError> {
            let parts = js_sys::Array::new();
            parts.push(&JsValue::from_str(&artifact.contents));

            let opts = BlobPropertyBag::new();
            opts.set_type(artifact.mime);
            let blob = Blob::new_with_str_sequence_and_options(&parts, &opts)
                .map_err(|_| browser_error("Failed to create blob"))?;
            let url = Url::create_object_url_with_blob(&blob)
                .map_err(|_| browser_error("Unable to create download"))?;
            Ok(ObjectUrl(url))
        }

        fn trigger(&self, handle: &ObjectUrl, artifact: &CsvArtifact) -> Result<Delivery, ExportError> {
            let document = web_sys::window()
                .and_then(|w| w.document())
                .ok_or_else(|| browser_error("Document unavailable"))?;
            let anchor: HtmlAnchorElement = document
                .create_element("a")
                .map_err(|_| browser_error("Unable to create anchor"))?
                .dyn_into()
                .map_err(|_| browser_error("Anchor cast failed"))?;
            anchor.set_href(&handle.0);
            anchor.set_download(artifact.filename);
            anchor.style().set_property("display", "none").ok();

            document
                .body()
                .ok_or_else(|| browser_error("Missing body"))?
                .append_child(&anchor)
                .map_err(|_| browser_error("Unable to attach anchor"))?;
            anchor.click();
            anchor.remove();

            Ok(Delivery::Started)
        }

        fn release(&self, handle: ObjectUrl) {
            Url::revoke_object_url(&handle.0).ok();
        }
    }

    fn browser_error(message: &str) -> ExportError {
        ExportError::Browser(message.to_string())
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::fs;
    use std::path::PathBuf;

    use super::{Delivery, DownloadTarget};
    use crate::dedup::csv::CsvArtifact;
    use crate::dedup::error::ExportError;

    /// Writes exports into a directory, replacing any previous file of the
    /// same name.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct DirectoryDownload {
        dir: PathBuf,
    }

    impl DirectoryDownload {
        /// Per-user data directory, `exports/` subfolder.
        pub fn new() -> Result<Self, ExportError> {
            let dirs = directories::ProjectDirs::from("org", "ExamDedup", "ExamDedup")
                .ok_or(ExportError::NoExportDirectory)?;
            Ok(Self::in_dir(dirs.data_dir().join("exports")))
        }

        pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
            Self { dir: dir.into() }
        }
    }

    impl DownloadTarget for DirectoryDownload {
        type Handle = PathBuf;

        fn acquire(&self, artifact: &CsvArtifact) -> Result<PathBuf, ExportError> {
            fs::create_dir_all(&self.dir)?;
            let staging = self.dir.join(format!("{}.part", artifact.filename));
            fs::write(&staging, artifact.bytes())?;
            Ok(staging)
        }

        fn trigger(&self, handle: &PathBuf, artifact: &CsvArtifact) -> Result<Delivery, ExportError> {
            let target = self.dir.join(artifact.filename);
            fs::rename(handle, &target)?;
            Ok(Delivery::Saved(target))
        }

        fn release(&self, handle: PathBuf) {
            if handle.exists() {
                if let Err(err) = fs::remove_file(&handle) {
                    tracing::warn!(path = %handle.display(), %err, "could not remove staging file");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::dedup::model::fixtures::{cluster, member, result};
    use crate::dedup::model::Difficulty;

    #[derive(Default)]
    struct Recording {
        fail_trigger: bool,
        events: RefCell<Vec<&'static str>>,
        delivered: RefCell<Option<String>>,
    }

    impl DownloadTarget for Recording {
        type Handle = u32;

        fn acquire(&self, _artifact: &CsvArtifact) -> Result<u32, ExportError> {
            self.events.borrow_mut().push("acquire");
            Ok(7)
        }

        fn trigger(&self, handle: &u32, artifact: &CsvArtifact) -> Result<Delivery, ExportError> {
            assert_eq!(*handle, 7);
            self.events.borrow_mut().push("trigger");
            if self.fail_trigger {
                return Err(ExportError::Browser("click blocked".into()));
            }
            *self.delivered.borrow_mut() = Some(artifact.contents.clone());
            Ok(Delivery::Started)
        }

        fn release(&self, handle: u32) {
            assert_eq!(handle, 7);
            self.events.borrow_mut().push("release");
        }
    }

    fn sample() -> UploadResult {
        result(vec![cluster(0.9, vec![member("Q1", Difficulty::Easy, "a.pdf", 1.0)])])
    }

    #[test]
    fn releases_after_successful_trigger() {
        let target = Recording::default();
        let delivery = export_coverage(Some(&sample()), &target).expect("delivers");
        assert_eq!(delivery, Some(Delivery::Started));
        assert_eq!(*target.events.borrow(), ["acquire", "trigger", "release"]);
        assert_eq!(
            target.delivered.borrow().as_deref(),
            Some("Question,Difficulty,Source PDF,Cluster Confidence\n\"Q1\",Easy,a.pdf,0.9")
        );
    }

    #[test]
    fn releases_even_when_trigger_fails() {
        let target = Recording {
            fail_trigger: true,
            ..Recording::default()
        };
        let err = export_coverage(Some(&sample()), &target).unwrap_err();
        assert_eq!(err, ExportError::Browser("click blocked".into()));
        assert_eq!(*target.events.borrow(), ["acquire", "trigger", "release"]);
    }

    #[test]
    fn nothing_to_export_touches_nothing() {
        let target = Recording::default();
        assert_eq!(export_coverage(None, &target), Ok(None));
        assert_eq!(export_coverage(Some(&result(Vec::new())), &target), Ok(None));
        assert!(target.events.borrow().is_empty());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn directory_download_leaves_only_the_final_file() {
        let dir = std::env::temp_dir().join(format!("examdedup-export-{}", std::process::id()));
        let target = PlatformDownload::in_dir(&dir);

        let delivery = export_coverage(Some(&sample()), &target).expect("writes");
        let path = dir.join("minimal_coverage_set.csv");
        assert_eq!(delivery, Some(Delivery::Saved(path.clone())));
        let written = std::fs::read_to_string(&path).expect("export exists");
        assert!(written.starts_with("Question,Difficulty,Source PDF,Cluster Confidence\n"));
        assert!(!dir.join("minimal_coverage_set.csv.part").exists());

        std::fs::remove_dir_all(&dir).ok();
    }
}
