// src/exam/mod.rs

//! The exam engine: session state, countdown, scoring and submission.

pub mod gateway;
pub mod review;
pub mod runner;
pub mod scoring;
pub mod session;
pub mod timer;

pub use gateway::{LocalBoundary, PersistenceBoundary, SubmissionGateway, SubmitError};
pub use runner::{ExamHandle, ExamOutcome, ExamRunner, StartError};
pub use session::{ExamSession, FinishReason, SessionError, SessionSnapshot};
