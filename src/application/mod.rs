mod submission;

pub use submission::{
    DownloadTrigger, SubmissionOutcome, SubmissionWorkflow, TriggerId, TriggerIdAllocator,
    DOWNLOAD_SETTLE_DELAY, QUEUE_ITEM_GAP,
};
