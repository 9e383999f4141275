//! Terminal implementation of the route view.

use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use routewatch_core::{LogEvent, RouteView, RowSelection};

use super::tables::{separator, truncate_string};

const LOG_SEPARATOR_WIDTH: usize = 40;
const ROUTE_COLUMN_WIDTH: usize = 60;
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// How observed routes are drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    /// Append every observation as it arrives.
    #[default]
    Log,
    /// Redraw the latest endpoint per route.
    Table,
}

/// [`RouteView`] that writes to a terminal (or any writer).
///
/// In [`ViewMode::Log`] each refresh appends its rows as
/// `Route:`/`Endpoint:` entries. In [`ViewMode::Table`] each refresh clears
/// the screen and redraws the rows as a table, with a checkbox column for
/// the selected routes.
#[derive(Debug)]
pub struct TerminalView<W = io::Stdout> {
    out: Mutex<W>,
    mode: ViewMode,
    selection: RowSelection,
}

impl TerminalView {
    /// View writing to stdout.
    pub fn stdout(mode: ViewMode) -> Self {
        Self::new(io::stdout(), mode)
    }
}

impl<W: Write + Send> TerminalView<W> {
    pub fn new(out: W, mode: ViewMode) -> Self {
        Self {
            out: Mutex::new(out),
            mode,
            selection: RowSelection::new(),
        }
    }

    /// Routes drawn as ticked in table mode.
    #[must_use]
    pub fn with_selection(mut self, selection: RowSelection) -> Self {
        self.selection = selection;
        self
    }

    pub const fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_with(&self, draw: impl FnOnce(&mut W) -> io::Result<()>) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = draw(&mut *out).and_then(|()| out.flush()) {
            // Write failures (e.g. a closed pipe) are not fatal.
            tracing::debug!(error = %e, "Failed to write to terminal");
        }
    }
}

fn write_log(out: &mut impl Write, rows: &[LogEvent]) -> io::Result<()> {
    for row in rows {
        writeln!(out, "Route: {}", row.route)?;
        writeln!(out, "Endpoint: {}", row.endpoint)?;
        writeln!(out, "{}", separator(LOG_SEPARATOR_WIDTH))?;
    }
    Ok(())
}

fn write_table(
    out: &mut impl Write,
    rows: &[LogEvent],
    selection: &RowSelection,
) -> io::Result<()> {
    write!(out, "{CLEAR_SCREEN}")?;
    if rows.is_empty() {
        return writeln!(out, "No routes observed yet.");
    }

    writeln!(out, "    {:<width$} Endpoint", "Route", width = ROUTE_COLUMN_WIDTH)?;
    writeln!(out, "{}", separator(ROUTE_COLUMN_WIDTH + 44))?;
    for row in rows {
        let mark = if selection.is_selected(&row.route) { 'x' } else { ' ' };
        writeln!(
            out,
            "[{mark}] {:<width$} {}",
            truncate_string(&row.route, ROUTE_COLUMN_WIDTH - 1),
            row.endpoint,
            width = ROUTE_COLUMN_WIDTH
        )?;
    }

    // Only rows still on screen count towards the selection summary.
    let mut visible = selection.clone();
    visible.retain_visible(rows);
    if visible.any_selected() {
        writeln!(
            out,
            "\n{} route(s), {} selected",
            rows.len(),
            visible.selected().count()
        )
    } else {
        writeln!(out, "\n{} route(s)", rows.len())
    }
}

impl<W: Write + Send> RouteView for TerminalView<W> {
    fn refresh(&self, rows: &[LogEvent]) {
        match self.mode {
            ViewMode::Log => self.write_with(|out| write_log(out, rows)),
            ViewMode::Table => self.write_with(|out| write_table(out, rows, &self.selection)),
        }
    }

    fn status(&self, message: &str) {
        self.write_with(|out| writeln!(out, "{message}"));
    }
}
