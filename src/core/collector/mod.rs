//! Submission orchestration
//!
//! Runs the repository manager and then the review-request publisher for one
//! submission, and maps their results to a [`SubmissionOutcome`].

pub mod outcome;
pub mod workflow;

pub use outcome::SubmissionOutcome;
pub use workflow::SubmissionWorkflow;
