use super::form::{Completion, FormController, StalePolicy};
use super::jobs::{FetchResult, PanelJobs};
use super::skeleton::PanelSkeleton;
use super::validate::{FieldError, validate_ud_form};
use crate::api::{SampleSet, Trace};
use crate::dashboard::render::{SampleListView, TraceView, sample_list, trace_view};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UdInput {
    pub ud: String,
}

impl UdInput {
    pub fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        (name == "ud").then_some(&mut self.ud)
    }
}

/// Sample shortcuts on the left, identifier form and trace on the right.
///
/// The two halves have separate submit lifecycles and share nothing but the
/// `ud` input, which [`UdTracePanel::select_sample`] writes before submitting.
#[derive(Debug)]
pub struct UdTracePanel {
    skeleton: PanelSkeleton,
    pub input: UdInput,
    field_errors: Vec<FieldError>,
    trace: FormController<TraceView>,
    samples: FormController<SampleListView>,
}

impl UdTracePanel {
    /// Build the panel and fetch the sample list. No trace is loaded until
    /// the operator asks for one.
    pub(crate) fn mount(container: &str, policy: StalePolicy, jobs: &PanelJobs) -> Self {
        let mut panel = Self {
            skeleton: PanelSkeleton::ud_trace(container),
            input: UdInput::default(),
            field_errors: Vec::new(),
            trace: FormController::new(policy),
            samples: FormController::new(policy),
        };
        tracing::info!(panel = container, policy = ?panel.trace.policy(), "Mounted UD trace panel");
        let ticket = panel.samples.begin();
        tracing::info!(panel = container, ticket = ticket.0, "Requesting UD samples");
        jobs.begin_sample_fetch(ticket);
        panel
    }

    pub fn skeleton(&self) -> &PanelSkeleton {
        &self.skeleton
    }

    pub fn trace_form(&self) -> &FormController<TraceView> {
        &self.trace
    }

    pub fn sample_form(&self) -> &FormController<SampleListView> {
        &self.samples
    }

    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    /// Validate the identifier and fetch its trace.
    pub(crate) fn submit(&mut self, jobs: &PanelJobs) -> bool {
        let ud = match validate_ud_form(&self.input.ud) {
            Ok(ud) => ud,
            Err(errors) => {
                tracing::debug!(panel = %self.skeleton.container, "UD form rejected");
                self.field_errors = errors;
                return false;
            }
        };
        self.field_errors.clear();
        let ticket = self.trace.begin();
        tracing::info!(
            panel = %self.skeleton.container,
            ticket = ticket.0,
            endpoint = self.skeleton.endpoint,
            ud = %ud,
            "Requesting UD trace"
        );
        jobs.begin_trace_fetch(ticket, ud);
        true
    }

    /// Copy a sample label into the input and submit it.
    pub(crate) fn select_sample(&mut self, label: &str, jobs: &PanelJobs) -> bool {
        self.input.ud = label.to_string();
        self.submit(jobs)
    }

    pub(crate) fn apply_trace(&mut self, message: FetchResult<Trace>) -> Completion {
        let FetchResult { ticket, result } = message;
        if let Err(err) = &result {
            tracing::warn!(panel = %self.skeleton.container, ticket = ticket.0, error = %err, "UD trace request failed");
        }
        let outcome = self.trace.complete(ticket, result, trace_view);
        tracing::info!(panel = %self.skeleton.container, ticket = ticket.0, ?outcome, "UD trace request completed");
        outcome
    }

    pub(crate) fn apply_samples(&mut self, message: FetchResult<SampleSet>) -> Completion {
        let FetchResult { ticket, result } = message;
        if let Err(err) = &result {
            tracing::warn!(panel = %self.skeleton.container, ticket = ticket.0, error = %err, "UD sample request failed");
        }
        let outcome = self.samples.complete(ticket, result, sample_list);
        tracing::info!(panel = %self.skeleton.container, ticket = ticket.0, ?outcome, "UD sample request completed");
        outcome
    }

    pub(crate) fn in_flight(&self) -> usize {
        self.trace.in_flight() + self.samples.in_flight()
    }
}
