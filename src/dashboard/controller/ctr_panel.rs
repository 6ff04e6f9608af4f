use super::form::{Completion, FormController, StalePolicy};
use super::jobs::{FetchResult, PanelJobs};
use super::skeleton::PanelSkeleton;
use super::validate::{FieldError, validate_ctr_form};
use crate::api::{CtrQuery, ReportSet};
use crate::dashboard::render::{TableView, report_table};

/// Raw text of the date inputs, exactly as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CtrInput {
    pub start: String,
    pub end: String,
}

impl CtrInput {
    /// Input text for a skeleton field name.
    pub fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "start" => Some(&mut self.start),
            "end" => Some(&mut self.end),
            _ => None,
        }
    }
}

/// Date-range form plus the metrics table it drives.
#[derive(Debug)]
pub struct CtrPanel {
    skeleton: PanelSkeleton,
    pub input: CtrInput,
    field_errors: Vec<FieldError>,
    form: FormController<TableView>,
}

impl CtrPanel {
    /// Build the panel and issue the unfiltered first load.
    pub(crate) fn mount(container: &str, policy: StalePolicy, jobs: &PanelJobs) -> Self {
        let mut panel = Self {
            skeleton: PanelSkeleton::ctr(container),
            input: CtrInput::default(),
            field_errors: Vec::new(),
            form: FormController::new(policy),
        };
        tracing::info!(panel = container, policy = ?panel.form.policy(), "Mounted CTR panel");
        panel.fetch(CtrQuery::default(), jobs);
        panel
    }

    pub fn skeleton(&self) -> &PanelSkeleton {
        &self.skeleton
    }

    pub fn form(&self) -> &FormController<TableView> {
        &self.form
    }

    /// Errors from the last rejected submit; cleared once a submit passes.
    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    /// Validate the inputs and fetch the report. Returns `false` when the
    /// inputs were rejected and nothing was sent.
    pub(crate) fn submit(&mut self, jobs: &PanelJobs) -> bool {
        match validate_ctr_form(&self.input.start, &self.input.end) {
            Ok(query) => {
                self.field_errors.clear();
                self.fetch(query, jobs);
                true
            }
            Err(errors) => {
                tracing::debug!(
                    panel = %self.skeleton.container,
                    errors = errors.len(),
                    "CTR form rejected"
                );
                self.field_errors = errors;
                false
            }
        }
    }

    pub(crate) fn apply(&mut self, message: FetchResult<ReportSet>) -> Completion {
        let FetchResult { ticket, result } = message;
        if let Err(err) = &result {
            tracing::warn!(panel = %self.skeleton.container, ticket = ticket.0, error = %err, "CTR request failed");
        }
        let outcome = self.form.complete(ticket, result, report_table);
        tracing::info!(panel = %self.skeleton.container, ticket = ticket.0, ?outcome, "CTR request completed");
        outcome
    }

    fn fetch(&mut self, query: CtrQuery, jobs: &PanelJobs) {
        let ticket = self.form.begin();
        tracing::info!(
            panel = %self.skeleton.container,
            ticket = ticket.0,
            endpoint = self.skeleton.endpoint,
            params = ?query.params(),
            "Requesting CTR report"
        );
        jobs.begin_report_fetch(ticket, query);
    }
}
