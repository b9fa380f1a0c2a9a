//! Presentation of status summaries.

use std::io::Write;

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table};

use crate::status::StatusSummary;

/// Receives summaries in display order.
pub trait SummarySink {
    /// Render `summaries`.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    fn present(&mut self, summaries: &[StatusSummary]) -> Result<()>;
}

/// Build the summary table.
#[must_use]
pub fn summary_table(summaries: &[StatusSummary]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Team").fg(Color::Cyan),
        Cell::new("App").fg(Color::Cyan),
        Cell::new("Revision").fg(Color::Cyan),
        Cell::new("Created").fg(Color::Cyan),
        Cell::new("Replicas").fg(Color::Cyan),
        Cell::new("Ready").fg(Color::Cyan),
        Cell::new("Available").fg(Color::Cyan),
    ]);

    for summary in summaries {
        let ready_color = if summary.ready_replicas >= summary.replicas {
            Color::Green
        } else if summary.ready_replicas == 0 {
            Color::Red
        } else {
            Color::Yellow
        };

        table.add_row(vec![
            Cell::new(&summary.team),
            Cell::new(&summary.name),
            Cell::new(summary.revision),
            Cell::new(&summary.created_at),
            Cell::new(summary.replicas),
            Cell::new(summary.ready_replicas).fg(ready_color),
            Cell::new(summary.available_replicas),
        ]);
    }

    table
}

/// Renders summaries as a table.
pub struct TableSink<W> {
    out: W,
}

impl<W: Write> TableSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SummarySink for TableSink<W> {
    fn present(&mut self, summaries: &[StatusSummary]) -> Result<()> {
        writeln!(self.out, "{}", summary_table(summaries))?;
        Ok(())
    }
}

/// Renders summaries as a JSON array.
pub struct JsonSink<W> {
    out: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SummarySink for JsonSink<W> {
    fn present(&mut self, summaries: &[StatusSummary]) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.out, summaries)?;
        writeln!(self.out)?;
        Ok(())
    }
}
