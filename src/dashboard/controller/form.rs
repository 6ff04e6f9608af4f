//! Submit lifecycle shared by every panel.
//!
//! A controller moves `Idle -> Submitting -> Idle | Error`. Each fetch gets a
//! [`Ticket`]; completions are matched against the tickets still outstanding,
//! so every issued request unlocks the form exactly once.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::api::ApiError;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FormState {
    #[default]
    Idle,
    Submitting,
    Error(String),
}

/// Sequence number of one issued request, unique per controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(pub u64);

/// How overlapping submissions on one panel are reconciled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StalePolicy {
    /// Every completion applies in arrival order, so a slow early request
    /// can overwrite a fast later one.
    #[default]
    LastCompletedWins,
    /// Completions for anything but the newest ticket are dropped.
    LatestIssuedOnly,
}

/// What a completion did to the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    Rendered,
    Failed,
    Discarded,
}

#[derive(Debug)]
pub struct FormController<V> {
    state: FormState,
    view: Option<V>,
    policy: StalePolicy,
    next_ticket: u64,
    latest: Option<Ticket>,
    outstanding: BTreeSet<Ticket>,
}

impl<V> FormController<V> {
    pub fn new(policy: StalePolicy) -> Self {
        Self {
            state: FormState::Idle,
            view: None,
            policy,
            next_ticket: 1,
            latest: None,
            outstanding: BTreeSet::new(),
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Last successfully rendered result, if any.
    pub fn view(&self) -> Option<&V> {
        self.view.as_ref()
    }

    pub fn policy(&self) -> StalePolicy {
        self.policy
    }

    pub fn fieldset_enabled(&self) -> bool {
        self.state != FormState::Submitting
    }

    pub fn is_loading(&self) -> bool {
        self.state == FormState::Submitting
    }

    pub fn status_text(&self) -> Option<&str> {
        match &self.state {
            FormState::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Number of issued requests that have not completed yet.
    pub fn in_flight(&self) -> usize {
        self.outstanding.len()
    }

    /// Lock the form and hand out the ticket for a new request.
    pub fn begin(&mut self) -> Ticket {
        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        self.latest = Some(ticket);
        self.outstanding.insert(ticket);
        self.state = FormState::Submitting;
        ticket
    }

    /// Apply the outcome of the request behind `ticket`.
    ///
    /// Unknown or already completed tickets are discarded. Under
    /// [`StalePolicy::LatestIssuedOnly`] a superseded ticket is retired
    /// without touching the view or the state.
    pub fn complete<P>(
        &mut self,
        ticket: Ticket,
        result: Result<P, ApiError>,
        render: impl FnOnce(&P) -> V,
    ) -> Completion {
        if !self.outstanding.remove(&ticket) {
            return Completion::Discarded;
        }
        if self.policy == StalePolicy::LatestIssuedOnly && self.latest != Some(ticket) {
            return Completion::Discarded;
        }
        match result {
            Ok(payload) => {
                self.view = Some(render(&payload));
                self.state = FormState::Idle;
                Completion::Rendered
            }
            Err(err) => {
                self.state = FormState::Error(err.to_string());
                Completion::Failed
            }
        }
    }
}

impl<V> Default for FormController<V> {
    fn default() -> Self {
        Self::new(StalePolicy::default())
    }
}
