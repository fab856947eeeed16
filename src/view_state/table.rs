//! Column negotiation and cursor state for tables wider than the screen.
//!
//! Every redraw builds a fresh [`ColumnPlan`]: starting at the column offset,
//! columns are laid out left to right with their natural widths (header and
//! on-screen cells, capped by [`TableStyle::max_cell_width`]) until the next
//! one would push the running total past the available width. Columns past
//! that point are not rendered this frame.
//!
//! The first planned column is always rendered. If it alone does not fit,
//! its width is cut down to what is available.

use crate::model::{CellValue, Change};
use serde::Deserialize;
use std::ops::Range;
use tracing::debug;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Row-and-column data behind a table view.
pub trait TableSource {
    /// Number of data rows.
    fn row_count(&self) -> usize;

    /// Number of columns.
    fn column_count(&self) -> usize;

    /// Header text of a column.
    fn column_name(&self, column: usize) -> &str;

    /// Value at a cell. Out-of-range cells are `Null`.
    fn cell(&self, row: usize, column: usize) -> CellValue;
}

/// In-memory table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VecTable {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl VecTable {
    /// Empty table with the given headers.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row, padding with `Null` or dropping extra cells so it
    /// matches the column count.
    pub fn push_row(&mut self, mut row: Vec<CellValue>) {
        row.resize(self.columns.len(), CellValue::Null);
        self.rows.push(row);
    }

    /// Append a column, filling existing rows with `Null`. Returns its index.
    pub fn push_column(&mut self, name: impl Into<String>) -> usize {
        self.columns.push(name.into());
        for row in &mut self.rows {
            row.push(CellValue::Null);
        }
        self.columns.len() - 1
    }

    /// Index of a column by header.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

impl TableSource for VecTable {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn column_count(&self) -> usize {
        self.columns.len()
    }

    fn column_name(&self, column: usize) -> &str {
        self.columns.get(column).map_or("", String::as_str)
    }

    fn cell(&self, row: usize, column: usize) -> CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .cloned()
            .unwrap_or(CellValue::Null)
    }
}

/// Presentation knobs for a table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableStyle {
    /// Upper bound on any column's width.
    pub max_cell_width: u16,
    /// Lower bound on any column's width.
    pub min_cell_width: u16,
    /// Text shown for null cells.
    pub null_symbol: String,
    /// Blank cells after each column.
    pub padding: u16,
    /// Draw the header row.
    pub show_header: bool,
    /// Draw a rule under the header.
    pub header_underline: bool,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            max_cell_width: 100,
            min_cell_width: 1,
            null_symbol: "-".to_string(),
            padding: 1,
            show_header: true,
            header_underline: true,
        }
    }
}

impl TableStyle {
    /// Screen rows taken by the header block.
    pub fn header_rows(&self) -> u16 {
        match (self.show_header, self.header_underline) {
            (false, _) => 0,
            (true, false) => 1,
            (true, true) => 2,
        }
    }
}

/// One column placed on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnToRender {
    /// Column index in the source.
    pub column: usize,
    /// Screen x of the first cell, relative to the table area.
    pub x: u16,
    /// Cells available for text.
    pub width: u16,
}

/// Columns chosen for one frame, left to right.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnPlan {
    columns: Vec<ColumnToRender>,
    used: u16,
}

impl ColumnPlan {
    /// Planned columns in screen order.
    pub fn iter(&self) -> impl Iterator<Item = &ColumnToRender> {
        self.columns.iter()
    }

    /// Number of planned columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// True when nothing fits.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Whether a source column made it on screen.
    pub fn contains(&self, column: usize) -> bool {
        self.get(column).is_some()
    }

    /// Placement of a source column.
    pub fn get(&self, column: usize) -> Option<&ColumnToRender> {
        self.columns.iter().find(|c| c.column == column)
    }

    /// Screen x of a source column.
    pub fn x_of(&self, column: usize) -> Option<u16> {
        self.get(column).map(|c| c.x)
    }

    /// Cells consumed, padding included, never above the available width.
    pub fn used_width(&self) -> u16 {
        self.used
    }

    /// Placed column under screen column `x`. Padding cells belong to no
    /// column.
    pub fn column_at(&self, x: u16) -> Option<&ColumnToRender> {
        self.columns
            .iter()
            .find(|c| x >= c.x && x < c.x.saturating_add(c.width))
    }
}

/// Lay out columns of known natural width into `available` cells.
///
/// Column `i` is kept iff the running total through `i` (each column plus
/// `padding`) is at most `available`; layout stops at the first column that
/// does not fit. The first column is the exception: it is always kept and
/// narrowed if needed.
pub fn fit_columns<I>(widths: I, available: u16, padding: u16) -> ColumnPlan
where
    I: IntoIterator<Item = (usize, u16)>,
{
    let mut plan = ColumnPlan::default();
    if available == 0 {
        return plan;
    }
    let available_cells = u32::from(available);
    let mut used: u32 = 0;
    for (column, natural) in widths {
        let needed = u32::from(natural) + u32::from(padding);
        let width = if used + needed <= available_cells {
            natural
        } else if plan.columns.is_empty() {
            let room = available.saturating_sub(padding).max(1);
            natural.min(room)
        } else {
            break;
        };
        // only the narrowed first column can push `used` past `available`
        plan.columns.push(ColumnToRender {
            column,
            x: used as u16,
            width,
        });
        used += u32::from(width) + u32::from(padding);
    }
    plan.used = used.min(available_cells) as u16;
    plan
}

/// Natural width of a column over the given rows: the wider of its header
/// and its cells, clamped to the style's bounds.
pub fn column_width(
    source: &dyn TableSource,
    column: usize,
    rows: Range<usize>,
    style: &TableStyle,
) -> u16 {
    let header = source.column_name(column).width();
    let widest_cell = rows
        .map(|row| source.cell(row, column).render(&style.null_symbol).width())
        .max()
        .unwrap_or(0);
    let natural = header.max(widest_cell);
    let capped = natural.min(usize::from(style.max_cell_width)) as u16;
    capped.max(style.min_cell_width)
}

/// Plan columns from `column_offset` on, sizing each by the rows in `rows`.
pub fn plan_columns(
    source: &dyn TableSource,
    style: &TableStyle,
    column_offset: usize,
    rows: Range<usize>,
    available: u16,
) -> ColumnPlan {
    let widths = (column_offset..source.column_count())
        .map(|column| (column, column_width(source, column, rows.clone(), style)));
    fit_columns(widths, available, style.padding)
}

/// Longest prefix of `text` whose display width is at most `width`.
///
/// A wide character that would straddle the boundary is dropped whole.
pub fn truncate_to_width(text: &str, width: usize) -> &str {
    let mut used = 0;
    for (index, ch) in text.char_indices() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            return &text[..index];
        }
        used += w;
    }
    text
}

/// A cell coordinate in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct CellPosition {
    /// Data row.
    pub row: usize,
    /// Source column.
    pub column: usize,
}

impl CellPosition {
    /// Create a position.
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// Notifications emitted by [`TableViewState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableEvent {
    /// The selected cell moved.
    SelectedCellChanged(Change<CellPosition>),
}

/// Scroll offsets and selection for a table.
///
/// Offsets and the selection are clamped to `[0, count - 1]` on every write.
/// Cursor moves keep the selected cell on screen.
#[derive(Debug, Clone)]
pub struct TableViewState {
    row_offset: usize,
    column_offset: usize,
    selected: CellPosition,
    width: u16,
    height: u16,
    style: TableStyle,
    events: Vec<TableEvent>,
    needs_display: bool,
}

impl Default for TableViewState {
    fn default() -> Self {
        Self::new(TableStyle::default())
    }
}

impl TableViewState {
    /// State at the top-left cell.
    pub fn new(style: TableStyle) -> Self {
        Self {
            row_offset: 0,
            column_offset: 0,
            selected: CellPosition::default(),
            width: 0,
            height: 0,
            style,
            events: Vec::new(),
            needs_display: true,
        }
    }

    /// Presentation settings.
    pub fn style(&self) -> &TableStyle {
        &self.style
    }

    /// Replace the presentation settings.
    pub fn set_style(&mut self, source: &dyn TableSource, style: TableStyle) {
        if self.style != style {
            self.style = style;
            self.needs_display = true;
            self.ensure_selection_visible(source);
        }
    }

    /// First data row on screen.
    pub fn row_offset(&self) -> usize {
        self.row_offset
    }

    /// First column considered for the plan.
    pub fn column_offset(&self) -> usize {
        self.column_offset
    }

    /// Selected cell.
    pub fn selected(&self) -> CellPosition {
        self.selected
    }

    /// Push the table area size.
    pub fn set_viewport_size(&mut self, source: &dyn TableSource, width: u16, height: u16) {
        if (self.width, self.height) != (width, height) {
            self.width = width;
            self.height = height;
            self.needs_display = true;
            self.ensure_selection_visible(source);
        }
    }

    /// Screen rows taken by the header block.
    pub fn header_rows(&self) -> u16 {
        self.style.header_rows().min(self.height)
    }

    /// Screen rows left for data.
    pub fn data_rows_visible(&self) -> usize {
        usize::from(self.height - self.header_rows())
    }

    /// Data rows currently on screen.
    pub fn visible_rows(&self, source: &dyn TableSource) -> Range<usize> {
        let end = (self.row_offset + self.data_rows_visible()).min(source.row_count());
        self.row_offset.min(end)..end
    }

    /// Columns for the current frame.
    pub fn plan(&self, source: &dyn TableSource) -> ColumnPlan {
        plan_columns(
            source,
            &self.style,
            self.column_offset,
            self.visible_rows(source),
            self.width,
        )
    }

    /// Set the first data row, clamped.
    pub fn set_row_offset(&mut self, source: &dyn TableSource, row: usize) -> bool {
        let clamped = clamp_index(row, source.row_count());
        if clamped == self.row_offset {
            return false;
        }
        debug!(requested = row, row_offset = clamped, "table row offset");
        self.row_offset = clamped;
        self.needs_display = true;
        true
    }

    /// Set the first planned column, clamped.
    pub fn set_column_offset(&mut self, source: &dyn TableSource, column: usize) -> bool {
        let clamped = clamp_index(column, source.column_count());
        if clamped == self.column_offset {
            return false;
        }
        self.column_offset = clamped;
        self.needs_display = true;
        true
    }

    /// Select a cell, clamped, and scroll it into view.
    pub fn set_selected(&mut self, source: &dyn TableSource, row: usize, column: usize) -> bool {
        let target = CellPosition::new(
            clamp_index(row, source.row_count()),
            clamp_index(column, source.column_count()),
        );
        let Some(change) = Change::between(self.selected, target) else {
            return false;
        };
        self.selected = target;
        self.events.push(TableEvent::SelectedCellChanged(change));
        self.needs_display = true;
        self.ensure_selection_visible(source);
        true
    }

    /// Select the row above.
    pub fn move_up(&mut self, source: &dyn TableSource) -> bool {
        self.move_rows(source, -1)
    }

    /// Select the row below.
    pub fn move_down(&mut self, source: &dyn TableSource) -> bool {
        self.move_rows(source, 1)
    }

    /// Select the column to the left.
    pub fn move_left(&mut self, source: &dyn TableSource) -> bool {
        let column = self.selected.column.saturating_sub(1);
        self.set_selected(source, self.selected.row, column)
    }

    /// Select the column to the right.
    pub fn move_right(&mut self, source: &dyn TableSource) -> bool {
        self.set_selected(source, self.selected.row, self.selected.column + 1)
    }

    /// Move the selection one screenful up.
    pub fn page_up(&mut self, source: &dyn TableSource) -> bool {
        self.move_rows(source, -(self.page_len() as isize))
    }

    /// Move the selection one screenful down.
    pub fn page_down(&mut self, source: &dyn TableSource) -> bool {
        self.move_rows(source, self.page_len() as isize)
    }

    /// Select the first column of the current row.
    pub fn home(&mut self, source: &dyn TableSource) -> bool {
        self.set_selected(source, self.selected.row, 0)
    }

    /// Select the last column of the current row.
    pub fn end(&mut self, source: &dyn TableSource) -> bool {
        self.set_selected(source, self.selected.row, usize::MAX)
    }

    /// Select the first row.
    pub fn first_row(&mut self, source: &dyn TableSource) -> bool {
        self.set_selected(source, 0, self.selected.column)
    }

    /// Select the last row.
    pub fn last_row(&mut self, source: &dyn TableSource) -> bool {
        self.set_selected(source, usize::MAX, self.selected.column)
    }

    /// Scroll rows without a cursor move; the selection is pulled back on
    /// screen if it falls off.
    pub fn scroll_by(&mut self, source: &dyn TableSource, rows: isize) -> bool {
        let max_offset = source
            .row_count()
            .saturating_sub(self.data_rows_visible().max(1));
        let target = super::types::offset_by(self.row_offset, rows).min(max_offset);
        if !self.set_row_offset(source, target) {
            return false;
        }
        let visible = self.visible_rows(source);
        if !visible.is_empty() && !visible.contains(&self.selected.row) {
            let row = self.selected.row.clamp(visible.start, visible.end - 1);
            self.set_selected(source, row, self.selected.column);
        }
        true
    }

    /// Source cell under a screen position relative to the table area.
    pub fn cell_at(&self, source: &dyn TableSource, x: u16, y: u16) -> Option<CellPosition> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let data_y = y.checked_sub(self.header_rows())?;
        let row = self.row_offset + usize::from(data_y);
        if row >= source.row_count() {
            return None;
        }
        let plan = self.plan(source);
        plan.column_at(x).map(|c| CellPosition::new(row, c.column))
    }

    /// Display text for a cell, cut to `width` cells.
    pub fn cell_text(&self, source: &dyn TableSource, row: usize, column: usize, width: u16) -> String {
        let value = source.cell(row, column);
        let rendered = value.render(&self.style.null_symbol);
        truncate_to_width(&rendered, usize::from(width)).to_string()
    }

    /// Drain pending events.
    pub fn take_events(&mut self) -> Vec<TableEvent> {
        std::mem::take(&mut self.events)
    }

    /// Whether something on screen changed since the last call.
    pub fn take_needs_display(&mut self) -> bool {
        std::mem::take(&mut self.needs_display)
    }

    fn page_len(&self) -> usize {
        self.data_rows_visible().max(1)
    }

    fn move_rows(&mut self, source: &dyn TableSource, delta: isize) -> bool {
        let row = super::types::offset_by(self.selected.row, delta);
        self.set_selected(source, row, self.selected.column)
    }

    fn ensure_selection_visible(&mut self, source: &dyn TableSource) {
        let rows = self.data_rows_visible();
        let row = self.selected.row;
        if row < self.row_offset {
            self.set_row_offset(source, row);
        } else if rows > 0 && row >= self.row_offset + rows {
            self.set_row_offset(source, row + 1 - rows);
        }

        let column = self.selected.column;
        if column < self.column_offset {
            self.set_column_offset(source, column);
            return;
        }
        if self.width == 0 {
            return;
        }
        while self.column_offset < column && !self.plan(source).contains(column) {
            self.column_offset += 1;
            self.needs_display = true;
        }
    }
}

fn clamp_index(value: usize, count: usize) -> usize {
    value.min(count.saturating_sub(1))
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod tests;
