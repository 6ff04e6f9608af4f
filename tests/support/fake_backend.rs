use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Condvar, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use recdash::api::{ApiError, CtrQuery, DashboardBackend, ReportSet, SampleSet, Trace};
use recdash::dashboard::DashboardController;
use serde_json::json;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Report(CtrQuery),
    Samples,
    Trace(String),
}

/// Blocks a scripted trace fetch until released.
#[derive(Default)]
pub struct Gate {
    open: Mutex<bool>,
    changed: Condvar,
}

impl Gate {
    pub fn release(&self) {
        let mut open = self.open.lock().unwrap();
        *open = true;
        self.changed.notify_all();
    }

    fn wait(&self) {
        let mut open = self.open.lock().unwrap();
        while !*open {
            open = self.changed.wait(open).unwrap();
        }
    }
}

/// Scripted in-memory backend that records every call it receives.
pub struct FakeBackend {
    calls: Mutex<Vec<Call>>,
    report: Mutex<Result<ReportSet, ApiError>>,
    samples: Mutex<Result<SampleSet, ApiError>>,
    traces: Mutex<HashMap<String, Result<Trace, ApiError>>>,
    gates: Mutex<HashMap<String, Arc<Gate>>>,
    panicking: Mutex<HashSet<String>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            report: Mutex::new(Ok(report(&[("2024-01-01", 0.5, 0.4, 0.6)]))),
            samples: Mutex::new(Ok(samples(&["u1", "u2"]))),
            traces: Mutex::new(HashMap::new()),
            gates: Mutex::new(HashMap::new()),
            panicking: Mutex::new(HashSet::new()),
        }
    }

    pub fn set_report(&self, result: Result<ReportSet, ApiError>) {
        *self.report.lock().unwrap() = result;
    }

    pub fn set_samples(&self, result: Result<SampleSet, ApiError>) {
        *self.samples.lock().unwrap() = result;
    }

    pub fn set_trace(&self, ud: &str, result: Result<Trace, ApiError>) {
        self.traces.lock().unwrap().insert(ud.to_string(), result);
    }

    /// Make the next fetches of `ud` wait until the returned gate is released.
    pub fn hold_trace(&self, ud: &str) -> Arc<Gate> {
        let gate = Arc::new(Gate::default());
        self.gates
            .lock()
            .unwrap()
            .insert(ud.to_string(), Arc::clone(&gate));
        gate
    }

    /// Make fetches of `ud` panic inside the worker thread.
    pub fn panic_on_trace(&self, ud: &str) {
        self.panicking.lock().unwrap().insert(ud.to_string());
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl DashboardBackend for FakeBackend {
    fn fetch_report(&self, query: &CtrQuery) -> Result<ReportSet, ApiError> {
        self.record(Call::Report(*query));
        self.report.lock().unwrap().clone()
    }

    fn fetch_samples(&self) -> Result<SampleSet, ApiError> {
        self.record(Call::Samples);
        self.samples.lock().unwrap().clone()
    }

    fn fetch_trace(&self, ud: &str) -> Result<Trace, ApiError> {
        self.record(Call::Trace(ud.to_string()));
        let panics = self.panicking.lock().unwrap().contains(ud);
        if panics {
            panic!("trace backend exploded for {ud}");
        }
        let gate = self.gates.lock().unwrap().get(ud).cloned();
        if let Some(gate) = gate {
            gate.wait();
        }
        self.traces
            .lock()
            .unwrap()
            .get(ud)
            .cloned()
            .unwrap_or_else(|| Ok(trace(ud)))
    }
}

pub fn bucket(ctr: f64) -> serde_json::Value {
    json!({
        "ctr": ctr, "show_per_ud": 1.25, "click_per_ud": 0.5,
        "ud": 100, "uid": 90, "pub": 400, "show": 125,
        "click_ud": 40, "click_uid": 35, "click_pub": 48, "click": 50
    })
}

/// A report with one row per `(date, all, a, b)` ctr triple.
pub fn report(rows: &[(&str, f64, f64, f64)]) -> ReportSet {
    let data: Vec<_> = rows
        .iter()
        .map(|(when, all, a, b)| {
            json!({"data": {"when": when, "H": bucket(*all), "a": bucket(*a), "b": bucket(*b)}})
        })
        .collect();
    serde_json::from_value(json!({ "data": data })).unwrap()
}

pub fn samples(labels: &[&str]) -> SampleSet {
    SampleSet {
        count: labels.len() as u64,
        sample: labels.iter().map(|label| label.to_string()).collect(),
    }
}

/// A trace whose single liked word is `word`, so views can be told apart.
pub fn trace(word: &str) -> Trace {
    serde_json::from_value(json!({
        "word": {"count": 1, "items": [[word, 3]]},
        "show": {"count": 1, "items": [["paper-1", 2]]},
        "recommend": {"count": 0, "items": []}
    }))
    .unwrap()
}

/// Poll the controller until `done` holds, failing after a few seconds.
pub fn poll_until(
    controller: &mut DashboardController,
    mut done: impl FnMut(&DashboardController) -> bool,
) {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        controller.poll_background_jobs();
        if done(controller) {
            return;
        }
        assert!(Instant::now() < deadline, "timed out waiting for jobs");
        thread::sleep(Duration::from_millis(5));
    }
}

pub fn wait_idle(controller: &mut DashboardController) {
    poll_until(controller, |controller| !controller.has_pending_requests());
}
