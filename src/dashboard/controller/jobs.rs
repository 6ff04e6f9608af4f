use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{
    Arc,
    mpsc::{Receiver, Sender, TryRecvError},
};
use std::thread;

use super::form::Ticket;
use crate::api::{ApiError, CtrQuery, DashboardBackend, ReportSet, SampleSet, Trace};

/// Outcome of one background fetch, tagged with the ticket it was issued under.
#[derive(Debug)]
pub(crate) struct FetchResult<P> {
    pub(crate) ticket: Ticket,
    pub(crate) result: Result<P, ApiError>,
}

#[derive(Debug)]
pub(crate) enum JobMessage {
    ReportLoaded(FetchResult<ReportSet>),
    SamplesLoaded(FetchResult<SampleSet>),
    TraceLoaded(FetchResult<Trace>),
}

/// Runs backend calls off the UI thread and queues their results.
pub(crate) struct PanelJobs {
    backend: Arc<dyn DashboardBackend>,
    message_tx: Sender<JobMessage>,
    message_rx: Receiver<JobMessage>,
}

impl PanelJobs {
    pub(crate) fn new(backend: Arc<dyn DashboardBackend>) -> Self {
        let (message_tx, message_rx) = std::sync::mpsc::channel();
        Self {
            backend,
            message_tx,
            message_rx,
        }
    }

    pub(crate) fn try_recv_message(&self) -> Result<JobMessage, TryRecvError> {
        self.message_rx.try_recv()
    }

    pub(crate) fn begin_report_fetch(&self, ticket: Ticket, query: CtrQuery) {
        self.spawn(
            ticket,
            move |backend| backend.fetch_report(&query),
            JobMessage::ReportLoaded,
        );
    }

    pub(crate) fn begin_sample_fetch(&self, ticket: Ticket) {
        self.spawn(
            ticket,
            |backend| backend.fetch_samples(),
            JobMessage::SamplesLoaded,
        );
    }

    pub(crate) fn begin_trace_fetch(&self, ticket: Ticket, ud: String) {
        self.spawn(
            ticket,
            move |backend| backend.fetch_trace(&ud),
            JobMessage::TraceLoaded,
        );
    }

    /// Every spawned fetch sends exactly one message, even if the backend
    /// panics, so its ticket is always settled.
    fn spawn<P, F, W>(&self, ticket: Ticket, fetch: F, wrap: W)
    where
        P: Send + 'static,
        F: FnOnce(&dyn DashboardBackend) -> Result<P, ApiError> + Send + 'static,
        W: FnOnce(FetchResult<P>) -> JobMessage + Send + 'static,
    {
        let backend = Arc::clone(&self.backend);
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = panic::catch_unwind(AssertUnwindSafe(|| fetch(backend.as_ref())))
                .unwrap_or_else(|payload| {
                    let reason = panic_reason(payload.as_ref());
                    tracing::error!(ticket = ticket.0, reason = %reason, "Request worker panicked");
                    Err(ApiError::Transport(format!("Request failed: {reason}")))
                });
            let _ = tx.send(wrap(FetchResult { ticket, result }));
        });
    }
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "unknown panic".to_string()
    }
}
