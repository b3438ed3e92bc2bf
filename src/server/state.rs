//! Shared handler state

use crate::anonymization::Redactor;
use crate::core::collector::SubmissionWorkflow;
use crate::domain::NosCategory;
use std::sync::Arc;

/// State cloned into every handler
#[derive(Clone)]
pub struct AppState {
    pub workflow: Arc<SubmissionWorkflow>,
    pub redactor: Arc<dyn Redactor>,
    /// Device OS categories offered by the form, already sorted
    pub categories: Arc<Vec<NosCategory>>,
}

impl AppState {
    pub fn new(
        workflow: Arc<SubmissionWorkflow>,
        redactor: Arc<dyn Redactor>,
        categories: Vec<NosCategory>,
    ) -> Self {
        Self {
            workflow,
            redactor,
            categories: Arc::new(categories),
        }
    }
}
