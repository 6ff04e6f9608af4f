//! Pure conversions from backend payloads into typed view structs.
//!
//! Nothing here touches egui or keeps state. The same payload always yields
//! the same view, and a view can be serialized to HTML through
//! [`markup::ToMarkup`].

pub mod markup;

use crate::api::{Cohort, DateRow, MetricBucket, RankedList, ReportSet, SampleSet, Trace};

/// Emphasis applied to a single table cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CellTone {
    #[default]
    Plain,
    Success,
    Warning,
    Primary,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderCell {
    pub text: String,
    /// Tooltip shown on hover.
    pub hint: Option<String>,
}

impl HeaderCell {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            hint: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellView {
    pub text: String,
    /// Number of rows this cell covers, starting at its own row.
    pub row_span: u32,
    pub tone: CellTone,
}

impl CellView {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            row_span: 1,
            tone: CellTone::Plain,
        }
    }

    fn toned(text: impl Into<String>, tone: CellTone) -> Self {
        Self {
            tone,
            ..Self::text(text)
        }
    }

    fn spanning(text: impl Into<String>, row_span: u32) -> Self {
        Self {
            row_span,
            ..Self::text(text)
        }
    }
}

/// A row lists only the cells it owns; columns still covered by a
/// row-spanning cell from an earlier row are omitted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RowView {
    pub cells: Vec<CellView>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableView {
    pub header: Vec<HeaderCell>,
    pub rows: Vec<RowView>,
}

impl TableView {
    pub fn column_count(&self) -> usize {
        self.header.len()
    }
}

const REPORT_HEADER: [(&str, Option<&str>); 13] = [
    ("Date", None),
    ("group", None),
    ("ctr", None),
    ("show_per_ud", None),
    ("click_per_ud", None),
    ("the number of show ud", Some("show ud count")),
    ("the number of show uid", None),
    ("the number of show content", None),
    ("show", None),
    ("the number of click ud", None),
    ("the number of click uid", None),
    ("the number of click content", None),
    ("click", None),
];

/// Format a ratio with exactly four fractional digits.
///
/// Rounds to nearest from the exact binary value, so `0.12345` gives
/// `0.1235` and `0.12344` gives `0.1234`.
pub fn format_ratio(value: f64) -> String {
    format!("{value:.4}")
}

/// Build the metrics table: three rows per date sharing one date cell.
pub fn report_table(report: &ReportSet) -> TableView {
    let header = REPORT_HEADER
        .iter()
        .map(|(text, hint)| HeaderCell {
            text: (*text).to_string(),
            hint: hint.map(str::to_string),
        })
        .collect();
    let rows = report.data.iter().flat_map(date_rows).collect();
    TableView { header, rows }
}

fn date_rows(row: &DateRow) -> impl Iterator<Item = RowView> + '_ {
    let span = Cohort::ORDER.len() as u32;
    Cohort::ORDER.into_iter().enumerate().map(move |(index, cohort)| {
        let mut cells = Vec::with_capacity(REPORT_HEADER.len());
        if index == 0 {
            cells.push(CellView::spanning(row.when.clone(), span));
        }
        cells.push(CellView::text(cohort.label()));
        cells.extend(bucket_cells(row.bucket(cohort), cohort == Cohort::All));
        RowView { cells }
    })
}

fn bucket_cells(bucket: &MetricBucket, highlight: bool) -> [CellView; 11] {
    let ratio = |value: f64, tone: CellTone| {
        CellView::toned(
            format_ratio(value),
            if highlight { tone } else { CellTone::Plain },
        )
    };
    [
        ratio(bucket.ctr, CellTone::Success),
        ratio(bucket.show_per_ud, CellTone::Warning),
        ratio(bucket.click_per_ud, CellTone::Primary),
        CellView::text(bucket.ud.to_string()),
        CellView::text(bucket.uid.to_string()),
        CellView::text(bucket.content.to_string()),
        CellView::text(bucket.show.to_string()),
        CellView::text(bucket.click_ud.to_string()),
        CellView::text(bucket.click_uid.to_string()),
        CellView::text(bucket.click_content.to_string()),
        CellView::text(bucket.click.to_string()),
    ]
}

/// The three ranked lists in a trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RankedKind {
    Word,
    Show,
    Recommend,
}

impl RankedKind {
    /// Fixed block order in the trace pane.
    pub const ORDER: [RankedKind; 3] = [RankedKind::Word, RankedKind::Show, RankedKind::Recommend];

    fn noun(self) -> &'static str {
        match self {
            Self::Word => "liked words",
            Self::Show => "show",
            Self::Recommend => "recommend",
        }
    }

    fn columns(self) -> [&'static str; 2] {
        match self {
            Self::Word => ["Word", "Score"],
            Self::Show => ["Paper", "Count"],
            Self::Recommend => ["Paper", "Score"],
        }
    }

    fn list(self, trace: &Trace) -> &RankedList {
        match self {
            Self::Word => &trace.word,
            Self::Show => &trace.show,
            Self::Recommend => &trace.recommend,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RankedTableView {
    pub kind: RankedKind,
    /// One-line total shown above the table.
    pub summary: String,
    pub table: TableView,
}

/// Build one label/score table preceded by its total line.
pub fn ranked_table(kind: RankedKind, list: &RankedList) -> RankedTableView {
    let header = kind.columns().map(HeaderCell::plain).to_vec();
    let rows = list
        .items
        .iter()
        .map(|item| RowView {
            cells: vec![
                CellView::text(item.label.clone()),
                CellView::text(item.score.to_string()),
            ],
        })
        .collect();
    RankedTableView {
        kind,
        summary: format!("Total {} {}", list.count, kind.noun()),
        table: TableView { header, rows },
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceView {
    /// Word, show, recommend; always in that order.
    pub tables: Vec<RankedTableView>,
}

pub fn trace_view(trace: &Trace) -> TraceView {
    TraceView {
        tables: RankedKind::ORDER
            .into_iter()
            .map(|kind| ranked_table(kind, kind.list(trace)))
            .collect(),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SampleListView {
    pub header: String,
    /// Clickable identifiers, in server order.
    pub labels: Vec<String>,
}

pub fn sample_list(samples: &SampleSet) -> SampleListView {
    SampleListView {
        header: format!("Total: {}", samples.count),
        labels: samples.sample.clone(),
    }
}
