use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use url::Url;

use crate::api::{ApiClient, DownloadRequest, FileInfo};
use crate::domain::{AppError, AudioFormat, QueueItemState, SubmissionPhase};
use crate::i18n::{keys, LocaleResolver};
use crate::ui::{QueueItemView, SharedPage, StatusView};
use crate::utils::format_label;

/// Time the browser is given to begin a transfer before the transient
/// link is removed.
pub const DOWNLOAD_SETTLE_DELAY: Duration = Duration::from_millis(5000);

/// Extra pause between queue items (not applied after the last one).
pub const QUEUE_ITEM_GAP: Duration = Duration::from_millis(750);

/// Backend phrasings for content over the duration limit. These messages
/// are shown verbatim instead of the generic error template.
const DURATION_LIMIT_MARKERS: [&str; 2] = [
    "Контент длиннее 10 минут",
    "Плейлист содержит контент длиннее 10 минут",
];

const FALLBACK_ERROR_MESSAGE: &str = "Could not download file.";

/// Handle to a transient download link while it is attached to the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerId(pub usize);

/// The browser-native download affordance: a transient anchor pointing at
/// the file URL with a suggested save name, activated programmatically.
pub trait DownloadTrigger: Send + Sync {
    /// Create and activate the transient link.
    fn attach(&self, download_url: &str, filename: &str) -> TriggerId;

    /// Remove the transient link once the transfer has had time to start.
    fn detach(&self, id: TriggerId);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Validation failed; no request was sent.
    Rejected(AppError),
    /// The request failed or the server reported a non-success outcome.
    Failed(AppError),
    /// Files were accepted and the drain task is running.
    Queued { files: usize },
}

/// Drives one submission at a time: validate, call the backend, render the
/// outcome, and hand accepted files to a detached drain task.
///
/// The drain deliberately outlives `submit` so the submit control is usable
/// again while downloads are still being triggered. A newer submission
/// aborts a still-running drain before taking over the status area.
pub struct SubmissionWorkflow {
    api: ApiClient,
    i18n: LocaleResolver,
    page: SharedPage,
    trigger: Arc<dyn DownloadTrigger>,
    phase: Arc<Mutex<SubmissionPhase>>,
    drain: Mutex<Option<JoinHandle<()>>>,
}

impl SubmissionWorkflow {
    pub fn new(
        api: ApiClient,
        i18n: LocaleResolver,
        page: SharedPage,
        trigger: Arc<dyn DownloadTrigger>,
    ) -> Self {
        Self {
            api,
            i18n,
            page,
            trigger,
            phase: Arc::new(Mutex::new(SubmissionPhase::Idle)),
            drain: Mutex::new(None),
        }
    }

    pub fn phase(&self) -> SubmissionPhase {
        *self.phase.lock().expect("phase lock poisoned")
    }

    /// Handle one submit action end to end. Every path re-enables the
    /// submit control before returning.
    pub async fn submit(&self, raw_url: &str, format: AudioFormat) -> SubmissionOutcome {
        self.cancel_stale_drain();

        self.set_phase(SubmissionPhase::Validating);
        let url = raw_url.trim();
        if url.is_empty() || Url::parse(url).is_err() {
            let message = self.i18n.translate(keys::STATUS_ERROR_URL);
            self.page
                .lock()
                .await
                .render_status(StatusView::Error { message });
            self.set_phase(SubmissionPhase::Idle);
            return SubmissionOutcome::Rejected(AppError::InvalidUrl);
        }

        {
            let mut page = self.page.lock().await;
            page.render_status(StatusView::Processing {
                message: self.i18n.translate(keys::STATUS_PROCESSING),
            });
            page.set_submit_enabled(false);
        }
        self.set_phase(SubmissionPhase::Submitting);

        let outcome = self.perform(url.to_string(), format).await;

        self.page.lock().await.set_submit_enabled(true);
        if !matches!(outcome, SubmissionOutcome::Queued { .. }) {
            self.set_phase(SubmissionPhase::Idle);
        }
        outcome
    }

    /// Await the current drain task, if any. Host shells call this on page
    /// teardown; tests use it to observe drain completion.
    pub async fn finish_drain(&self) {
        let handle = self.drain.lock().expect("drain lock poisoned").take();
        if let Some(handle) = handle {
            // An aborted drain joins with an error; both results mean done.
            let _ = handle.await;
        }
    }

    async fn perform(&self, url: String, format: AudioFormat) -> SubmissionOutcome {
        let request = DownloadRequest { url, format };
        match self.api.download_audio(&request).await {
            Ok((true, payload)) if payload.status == "success" && !payload.files.is_empty() => {
                let files = payload.files;
                self.render_queue(&files, format).await;
                self.set_phase(SubmissionPhase::DrainingQueue);
                let count = files.len();
                self.spawn_drain(files);
                SubmissionOutcome::Queued { files: count }
            }
            Ok((_, payload)) => {
                let message = match payload.message {
                    Some(message) if is_duration_limit(&message) => message,
                    other => self.i18n.translate_with(
                        keys::STATUS_ERROR_GENERIC,
                        self.i18n.current_language(),
                        &[("MESSAGE", other.as_deref().unwrap_or(FALLBACK_ERROR_MESSAGE))],
                    ),
                };
                self.page.lock().await.render_status(StatusView::Error {
                    message: message.clone(),
                });
                SubmissionOutcome::Failed(AppError::Business(message))
            }
            Err(err) => {
                log::error!("download submission failed: {}", err);
                let detail = err.to_string();
                let message = format!(
                    "{} ({})",
                    self.i18n.translate(keys::STATUS_NETWORK_ERROR),
                    detail
                );
                self.page
                    .lock()
                    .await
                    .render_status(StatusView::Error { message });
                SubmissionOutcome::Failed(AppError::Transport(detail))
            }
        }
    }

    async fn render_queue(&self, files: &[FileInfo], format: AudioFormat) {
        let pending = self.i18n.translate(keys::FILE_STATUS_PENDING);
        let items = files
            .iter()
            .map(|file| QueueItemView {
                title: file.title.clone().unwrap_or_else(|| "Untitled".to_string()),
                artist: file.artist.clone(),
                format_label: format_label(&file.filename, format),
                status_label: pending.clone(),
            })
            .collect();

        self.page.lock().await.render_status(StatusView::Queue {
            header: self.i18n.translate(keys::STATUS_SUCCESS_HEADER),
            items,
            hint: self.i18n.translate(keys::STATUS_POST_DOWNLOAD_HINT),
        });
    }

    fn spawn_drain(&self, files: Vec<FileInfo>) {
        let page = self.page.clone();
        let i18n = self.i18n.clone();
        let trigger = self.trigger.clone();
        let phase = self.phase.clone();

        let handle = tokio::spawn(async move {
            drain_queue(page, i18n, trigger, files).await;
            *phase.lock().expect("phase lock poisoned") = SubmissionPhase::Idle;
        });
        *self.drain.lock().expect("drain lock poisoned") = Some(handle);
    }

    fn cancel_stale_drain(&self) {
        let handle = self.drain.lock().expect("drain lock poisoned").take();
        if let Some(handle) = handle {
            if !handle.is_finished() {
                log::debug!("aborting stale drain before new submission");
                handle.abort();
            }
        }
    }

    fn set_phase(&self, phase: SubmissionPhase) {
        *self.phase.lock().expect("phase lock poisoned") = phase;
    }
}

/// Trigger browser downloads for the accepted files, in response order,
/// pacing transitions so each transfer can begin before the next one.
async fn drain_queue(
    page: SharedPage,
    i18n: LocaleResolver,
    trigger: Arc<dyn DownloadTrigger>,
    files: Vec<FileInfo>,
) {
    let count = files.len();
    for (index, file) in files.into_iter().enumerate() {
        {
            let label = i18n.translate(keys::FILE_STATUS_DOWNLOADING);
            page.lock()
                .await
                .set_queue_item(index, QueueItemState::Downloading, &label);
        }

        let link = trigger.attach(&file.download_url, &file.filename);
        tokio::time::sleep(DOWNLOAD_SETTLE_DELAY).await;
        trigger.detach(link);

        {
            let label = i18n.translate(keys::FILE_STATUS_STARTED);
            page.lock()
                .await
                .set_queue_item(index, QueueItemState::Started, &label);
        }

        if index + 1 < count {
            tokio::time::sleep(QUEUE_ITEM_GAP).await;
        }
    }
}

fn is_duration_limit(message: &str) -> bool {
    DURATION_LIMIT_MARKERS
        .iter()
        .any(|marker| message.contains(marker))
}

/// Counter-based trigger ids; host shells typically map them to element ids.
#[derive(Default)]
pub struct TriggerIdAllocator {
    next: AtomicUsize,
}

impl TriggerIdAllocator {
    pub fn allocate(&self) -> TriggerId {
        TriggerId(self.next.fetch_add(1, Ordering::Relaxed))
    }
}
