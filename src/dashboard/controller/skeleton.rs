use egui::Id;

use crate::api::{CTR_PATH, TRACE_PATH};

/// One input on a panel form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub hint: &'static str,
    pub required: bool,
}

impl FieldSpec {
    /// Label shown next to the input; required fields carry a trailing `*`.
    pub fn display_label(&self) -> String {
        if self.required {
            format!("{} *", self.label)
        } else {
            self.label.to_string()
        }
    }
}

/// Stable widget ids for one mounted panel, scoped to its container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SkeletonIds {
    pub form: Id,
    pub fieldset: Id,
    pub submit: Id,
    pub status: Id,
    pub result: Id,
}

impl SkeletonIds {
    fn for_container(container: &str) -> Self {
        let root = Id::new(("recdash_panel", container));
        Self {
            form: root.with("form"),
            fieldset: root.with("fieldset"),
            submit: root.with("submit"),
            status: root.with("status"),
            result: root.with("result"),
        }
    }
}

/// Fixed layout of a panel, built once when it is mounted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PanelSkeleton {
    pub container: String,
    pub title: &'static str,
    pub fields: Vec<FieldSpec>,
    pub submit_label: &'static str,
    pub endpoint: &'static str,
    pub ids: SkeletonIds,
}

impl PanelSkeleton {
    pub fn ctr(container: &str) -> Self {
        Self {
            container: container.to_string(),
            title: "CTR",
            fields: vec![
                FieldSpec {
                    name: "start",
                    label: "start",
                    hint: "YYYY-MM-DD",
                    required: true,
                },
                FieldSpec {
                    name: "end",
                    label: "end",
                    hint: "YYYY-MM-DD",
                    required: true,
                },
            ],
            submit_label: "Submit",
            endpoint: CTR_PATH,
            ids: SkeletonIds::for_container(container),
        }
    }

    pub fn ud_trace(container: &str) -> Self {
        Self {
            container: container.to_string(),
            title: "UD Trace",
            fields: vec![FieldSpec {
                name: "ud",
                label: "ud",
                hint: "ud",
                required: true,
            }],
            submit_label: "Submit",
            endpoint: TRACE_PATH,
            ids: SkeletonIds::for_container(container),
        }
    }
}
