use std::fmt;

use serde::Deserialize;
use time::{Date, format_description::FormatItem, macros::format_description};

const DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// One cohort's aggregated stats for one date.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MetricBucket {
    pub ctr: f64,
    pub show_per_ud: f64,
    pub click_per_ud: f64,
    pub ud: u64,
    pub uid: u64,
    /// Distinct content items shown.
    #[serde(rename = "pub")]
    pub content: u64,
    pub show: u64,
    pub click_ud: u64,
    pub click_uid: u64,
    /// Distinct content items clicked.
    #[serde(rename = "click_pub")]
    pub click_content: u64,
    pub click: u64,
}

/// Report rows per date: the combined total and both experiment variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cohort {
    All,
    A,
    B,
}

impl Cohort {
    /// Fixed render order.
    pub const ORDER: [Cohort; 3] = [Cohort::All, Cohort::A, Cohort::B];

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::A => "A",
            Self::B => "B",
        }
    }
}

/// One date's full report.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct DateRow {
    /// Date as formatted by the server; rendered verbatim.
    pub when: String,
    #[serde(rename = "H")]
    pub all: MetricBucket,
    #[serde(rename = "a")]
    pub cohort_a: MetricBucket,
    #[serde(rename = "b")]
    pub cohort_b: MetricBucket,
}

impl DateRow {
    pub fn bucket(&self, cohort: Cohort) -> &MetricBucket {
        match cohort {
            Cohort::All => &self.all,
            Cohort::A => &self.cohort_a,
            Cohort::B => &self.cohort_b,
        }
    }
}

/// Payload of the CTR endpoint. Rows keep server order.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(try_from = "ReportSetWire")]
pub struct ReportSet {
    pub data: Vec<DateRow>,
}

#[derive(Deserialize)]
struct ReportSetWire {
    data: Vec<serde_json::Value>,
}

impl TryFrom<ReportSetWire> for ReportSet {
    type Error = serde_json::Error;

    fn try_from(wire: ReportSetWire) -> Result<Self, Self::Error> {
        let data = wire
            .data
            .into_iter()
            .map(decode_row)
            .collect::<Result<_, _>>()?;
        Ok(Self { data })
    }
}

// The server nests each row one level deeper: `{"data": {"when": ...}}`.
fn decode_row(mut row: serde_json::Value) -> Result<DateRow, serde_json::Error> {
    let row = match row.as_object_mut().and_then(|fields| fields.remove("data")) {
        Some(inner) => inner,
        None => row,
    };
    DateRow::deserialize(row)
}

/// Identifiers offered as shortcuts in the trace panel.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SampleSet {
    pub count: u64,
    pub sample: Vec<String>,
}

/// A score with the digits the server wrote, so `3` stays `3` and `2.50`
/// stays `2.50`. Exponents gain an explicit sign (`1e2` reads back as `1e+2`).
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Score(serde_json::Number);

impl From<serde_json::Number> for Score {
    fn from(value: serde_json::Number) -> Self {
        Self(value)
    }
}

impl From<u64> for Score {
    fn from(value: u64) -> Self {
        Self(value.into())
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// `[label, score]` pair on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "(String, Score)")]
pub struct RankedItem {
    pub label: String,
    pub score: Score,
}

impl From<(String, Score)> for RankedItem {
    fn from((label, score): (String, Score)) -> Self {
        Self { label, score }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RankedList {
    pub count: u64,
    pub items: Vec<RankedItem>,
}

/// One identifier's behavioral trace.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Trace {
    pub word: RankedList,
    pub show: RankedList,
    pub recommend: RankedList,
}

/// Date filter for the CTR endpoint. Absent bounds are left to the server.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CtrQuery {
    pub start: Option<Date>,
    pub end: Option<Date>,
}

impl CtrQuery {
    /// Query parameters to send, skipping absent bounds.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        [("start", self.start), ("end", self.end)]
            .into_iter()
            .filter_map(|(name, date)| date.map(|date| (name, format_date(date))))
            .collect()
    }
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(text: &str) -> Result<Date, time::error::Parse> {
    Date::parse(text.trim(), DATE_FORMAT)
}

/// Format a date as `YYYY-MM-DD`.
pub fn format_date(date: Date) -> String {
    // A calendar date always carries every component the format asks for.
    date.format(DATE_FORMAT).unwrap_or_else(|_| date.to_string())
}
