pub mod error;
pub mod model;

pub use error::AppError;
pub use model::{AudioFormat, BackgroundMode, QueueItemState, SubmissionPhase};
