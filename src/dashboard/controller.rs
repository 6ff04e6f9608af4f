//! Panel state and request routing, independent of egui drawing.

mod ctr_panel;
mod form;
mod jobs;
mod skeleton;
mod ud_panel;
mod validate;

use std::sync::Arc;
use std::sync::mpsc::TryRecvError;

pub use ctr_panel::{CtrInput, CtrPanel};
pub use form::{Completion, FormController, FormState, StalePolicy, Ticket};
pub use skeleton::{FieldSpec, PanelSkeleton, SkeletonIds};
pub use ud_panel::{UdInput, UdTracePanel};
pub use validate::{FieldError, validate_ctr_form, validate_ud_form};

use jobs::{JobMessage, PanelJobs};

use crate::api::DashboardBackend;
use crate::config::DashboardSettings;

/// Container regions the dashboard lays out, one per tab.
pub const CONTAINERS: [&str; 2] = ["ctr", "ud"];

/// Owns both panels and the worker channel that feeds them.
pub struct DashboardController {
    jobs: PanelJobs,
    ctr: Option<CtrPanel>,
    ud: Option<UdTracePanel>,
}

impl DashboardController {
    /// Mount each panel whose configured container exists. Mounting issues
    /// the panels' first requests immediately.
    pub fn new(backend: Arc<dyn DashboardBackend>, settings: &DashboardSettings) -> Self {
        let jobs = PanelJobs::new(backend);
        let policy = settings.requests.stale_responses;
        let ctr_container = settings.panels.ctr_container.as_str();
        let ud_container = settings.panels.ud_container.as_str();

        let ctr = mountable(ctr_container, None)
            .then(|| CtrPanel::mount(ctr_container, policy, &jobs));
        let taken = ctr.as_ref().map(|_| ctr_container);
        let ud = mountable(ud_container, taken)
            .then(|| UdTracePanel::mount(ud_container, policy, &jobs));

        Self { jobs, ctr, ud }
    }

    pub fn ctr_panel(&self) -> Option<&CtrPanel> {
        self.ctr.as_ref()
    }

    pub fn ctr_panel_mut(&mut self) -> Option<&mut CtrPanel> {
        self.ctr.as_mut()
    }

    pub fn ud_panel(&self) -> Option<&UdTracePanel> {
        self.ud.as_ref()
    }

    pub fn ud_panel_mut(&mut self) -> Option<&mut UdTracePanel> {
        self.ud.as_mut()
    }

    /// Submit the CTR form. Returns `true` when a request was issued.
    pub fn submit_ctr(&mut self) -> bool {
        match self.ctr.as_mut() {
            Some(panel) => panel.submit(&self.jobs),
            None => false,
        }
    }

    /// Submit the trace form. Returns `true` when a request was issued.
    pub fn submit_trace(&mut self) -> bool {
        match self.ud.as_mut() {
            Some(panel) => panel.submit(&self.jobs),
            None => false,
        }
    }

    /// Load a sample identifier into the trace form and submit it.
    pub fn select_sample(&mut self, label: &str) -> bool {
        match self.ud.as_mut() {
            Some(panel) => panel.select_sample(label, &self.jobs),
            None => false,
        }
    }

    /// Requests issued and not yet applied, across both panels.
    pub fn pending_requests(&self) -> usize {
        let ctr = self.ctr.as_ref().map_or(0, |panel| panel.form().in_flight());
        let ud = self.ud.as_ref().map_or(0, UdTracePanel::in_flight);
        ctr + ud
    }

    pub fn has_pending_requests(&self) -> bool {
        self.pending_requests() > 0
    }

    /// Apply every finished request in arrival order. Returns how many
    /// messages were handled.
    pub fn poll_background_jobs(&mut self) -> usize {
        let mut handled = 0;
        loop {
            let message = match self.jobs.try_recv_message() {
                Ok(message) => message,
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            };
            handled += 1;
            match message {
                JobMessage::ReportLoaded(message) => {
                    if let Some(panel) = self.ctr.as_mut() {
                        panel.apply(message);
                    }
                }
                JobMessage::SamplesLoaded(message) => {
                    if let Some(panel) = self.ud.as_mut() {
                        panel.apply_samples(message);
                    }
                }
                JobMessage::TraceLoaded(message) => {
                    if let Some(panel) = self.ud.as_mut() {
                        panel.apply_trace(message);
                    }
                }
            }
        }
        handled
    }
}

fn mountable(container: &str, taken: Option<&str>) -> bool {
    if !CONTAINERS.contains(&container) {
        tracing::warn!(container, "No such container; panel not mounted");
        return false;
    }
    if taken == Some(container) {
        tracing::warn!(container, "Container already holds a panel; panel not mounted");
        return false;
    }
    true
}
