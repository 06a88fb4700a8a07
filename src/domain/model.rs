use serde::{Deserialize, Serialize};

/// Output format choices offered by the submission form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    Mp3,
    M4a,
    Opus,
    Mp4,
}

impl AudioFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::M4a => "m4a",
            AudioFormat::Opus => "opus",
            AudioFormat::Mp4 => "mp4",
        }
    }
}

impl Default for AudioFormat {
    fn default() -> Self {
        AudioFormat::Mp3
    }
}

/// Per-file state while the queue drains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueItemState {
    Pending,
    Downloading,
    Started,
}

/// Submission lifecycle. The submit control is disabled while a submission
/// is in flight, so at most one instance advances past `Validating`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionPhase {
    Idle,
    Validating,
    Submitting,
    DrainingQueue,
}

/// Page background themes. Unknown stored values normalize to `Night`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundMode {
    Night,
    FaultyTerminal,
    DotGrid,
    Aurora,
    Dither,
}

impl BackgroundMode {
    pub const ALL: [BackgroundMode; 5] = [
        BackgroundMode::Night,
        BackgroundMode::FaultyTerminal,
        BackgroundMode::DotGrid,
        BackgroundMode::Aurora,
        BackgroundMode::Dither,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BackgroundMode::Night => "night",
            BackgroundMode::FaultyTerminal => "faulty-terminal",
            BackgroundMode::DotGrid => "dot-grid",
            BackgroundMode::Aurora => "aurora",
            BackgroundMode::Dither => "dither",
        }
    }

    pub fn normalize(code: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == code)
            .unwrap_or(BackgroundMode::Night)
    }
}
