//! Abstraction over the page the controller mutates.
//!
//! The crate renders nothing itself. The host shell implements
//! [`PageSurface`] over its actual document; tests implement it with a
//! recording fake. The status area is always overwritten whole, never
//! diffed, which is what lets a newer submission take the area over from a
//! stale drain.

pub mod showcase;

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{BackgroundMode, QueueItemState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDirection {
    LeftToRight,
    RightToLeft,
}

/// One row of the download queue listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueItemView {
    pub title: String,
    pub artist: Option<String>,
    pub format_label: String,
    pub status_label: String,
}

/// Full content of the status area. Variants carry already-localized text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusView {
    Processing {
        message: String,
    },
    Error {
        message: String,
    },
    Queue {
        header: String,
        items: Vec<QueueItemView>,
        hint: String,
    },
}

pub trait PageSurface: Send {
    /// Translation keys of every element tagged for localized text.
    fn translation_keys(&self) -> Vec<String>;

    /// Write resolved text into a tagged element. Values are HTML-bearing.
    fn write_translation(&mut self, key: &str, html: &str);

    fn set_document_language(&mut self, code: &str, direction: TextDirection);

    fn set_submit_enabled(&mut self, enabled: bool);

    fn render_status(&mut self, view: StatusView);

    /// Update one queue row's status label after the area was rendered.
    fn set_queue_item(&mut self, index: usize, state: QueueItemState, label: &str);

    fn set_background(&mut self, mode: BackgroundMode);
}

/// The page is shared between the submission path and the detached drain
/// task. Locks are short and never held across an await.
pub type SharedPage = Arc<Mutex<dyn PageSurface>>;

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use tokio::time::Instant;

    /// Recording fake used by workflow, i18n and controller tests.
    pub struct RecordingPage {
        pub keys: Vec<String>,
        pub translations: Vec<(String, String)>,
        pub document_language: Option<(String, TextDirection)>,
        pub submit_enabled: bool,
        pub submit_history: Vec<bool>,
        pub statuses: Vec<StatusView>,
        pub queue_events: Vec<(usize, QueueItemState, String, Instant)>,
        pub background: Option<BackgroundMode>,
    }

    impl RecordingPage {
        pub fn new(keys: &[&str]) -> Self {
            Self {
                keys: keys.iter().map(|k| k.to_string()).collect(),
                translations: Vec::new(),
                document_language: None,
                submit_enabled: true,
                submit_history: Vec::new(),
                statuses: Vec::new(),
                queue_events: Vec::new(),
                background: None,
            }
        }

        /// Concrete shared handle; coerces to [`SharedPage`] at call sites
        /// while the test keeps typed access for assertions.
        pub fn shared(keys: &[&str]) -> Arc<Mutex<RecordingPage>> {
            Arc::new(Mutex::new(Self::new(keys)))
        }

        pub fn last_status(&self) -> &StatusView {
            self.statuses.last().expect("no status rendered")
        }
    }

    impl PageSurface for RecordingPage {
        fn translation_keys(&self) -> Vec<String> {
            self.keys.clone()
        }

        fn write_translation(&mut self, key: &str, html: &str) {
            self.translations.push((key.to_string(), html.to_string()));
        }

        fn set_document_language(&mut self, code: &str, direction: TextDirection) {
            self.document_language = Some((code.to_string(), direction));
        }

        fn set_submit_enabled(&mut self, enabled: bool) {
            self.submit_enabled = enabled;
            self.submit_history.push(enabled);
        }

        fn render_status(&mut self, view: StatusView) {
            self.statuses.push(view);
        }

        fn set_queue_item(&mut self, index: usize, state: QueueItemState, label: &str) {
            self.queue_events
                .push((index, state, label.to_string(), Instant::now()));
        }

        fn set_background(&mut self, mode: BackgroundMode) {
            self.background = Some(mode);
        }
    }
}
