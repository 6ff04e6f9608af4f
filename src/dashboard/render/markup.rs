//! HTML serialization of rendered views.
//!
//! Every piece of text is escaped, so labels coming back from the server
//! cannot inject markup. Output depends only on the view, never on state.

use super::{CellTone, CellView, HeaderCell, RankedTableView, SampleListView, TableView, TraceView};

/// Serialize a view to an HTML fragment.
pub trait ToMarkup {
    fn write_markup(&self, out: &mut String);

    fn to_markup(&self) -> String {
        let mut out = String::new();
        self.write_markup(&mut out);
        out
    }
}

/// Escape text for use in element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn tone_class(tone: CellTone) -> Option<&'static str> {
    match tone {
        CellTone::Plain => None,
        CellTone::Success => Some("table-success"),
        CellTone::Warning => Some("table-warning"),
        CellTone::Primary => Some("table-primary"),
    }
}

impl ToMarkup for HeaderCell {
    fn write_markup(&self, out: &mut String) {
        match &self.hint {
            Some(hint) => {
                out.push_str("<th title=\"");
                out.push_str(&escape(hint));
                out.push_str("\">");
            }
            None => out.push_str("<th>"),
        }
        out.push_str(&escape(&self.text));
        out.push_str("</th>");
    }
}

impl ToMarkup for CellView {
    fn write_markup(&self, out: &mut String) {
        out.push_str("<td");
        if self.row_span > 1 {
            out.push_str(&format!(" rowspan=\"{}\"", self.row_span));
        }
        if let Some(class) = tone_class(self.tone) {
            out.push_str(" class=\"");
            out.push_str(class);
            out.push('"');
        }
        out.push('>');
        out.push_str(&escape(&self.text));
        out.push_str("</td>");
    }
}

impl ToMarkup for TableView {
    fn write_markup(&self, out: &mut String) {
        out.push_str("<table><tr>");
        for cell in &self.header {
            cell.write_markup(out);
        }
        out.push_str("</tr>");
        for row in &self.rows {
            out.push_str("<tr>");
            for cell in &row.cells {
                cell.write_markup(out);
            }
            out.push_str("</tr>");
        }
        out.push_str("</table>");
    }
}

impl ToMarkup for RankedTableView {
    fn write_markup(&self, out: &mut String) {
        out.push_str("<strong>");
        out.push_str(&escape(&self.summary));
        out.push_str("</strong>");
        self.table.write_markup(out);
    }
}

impl ToMarkup for TraceView {
    fn write_markup(&self, out: &mut String) {
        for table in &self.tables {
            table.write_markup(out);
        }
    }
}

impl ToMarkup for SampleListView {
    fn write_markup(&self, out: &mut String) {
        out.push_str("<strong>");
        out.push_str(&escape(&self.header));
        out.push_str("</strong><ul>");
        for label in &self.labels {
            out.push_str("<li><a>");
            out.push_str(&escape(label));
            out.push_str("</a></li>");
        }
        out.push_str("</ul>");
    }
}
