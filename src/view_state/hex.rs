//! Hex/ASCII view over a seekable byte stream with an in-memory edit overlay.
//!
//! Edits never touch the stream until [`HexViewState::apply_edits`]. Every
//! read goes through the overlay first, so an edited offset always shows its
//! pending value.
//!
//! # Screen layout
//! ```text
//! 00000010 48 65 6c 6c  6f 2c 20 77  Hello, w
//! ^address ^4-byte blocks (13 cells)  ^text pane (1 cell per byte)
//! ```
//! `bytes_per_line = 4 * max(1, (width - 9) / 17)`.

use crate::model::{Change, CoreError};
use std::collections::BTreeMap;
use std::io::{self, Read, Seek, SeekFrom, Write};
use tracing::{debug, info, warn};

/// Cells taken by the address column, trailing space included.
pub const ADDRESS_WIDTH: u16 = 9;
/// Bytes in one display block.
pub const BLOCK_BYTES: usize = 4;
/// Hex cells per block: three per byte plus a separator.
pub const BLOCK_HEX_WIDTH: u16 = 13;
/// Screen cells per block across both panes.
pub const BLOCK_WIDTH: u16 = BLOCK_HEX_WIDTH + BLOCK_BYTES as u16;

/// Bytes shown per line for a viewport `width` cells wide.
pub fn bytes_per_line_for(width: u16) -> usize {
    let blocks = usize::from(width.saturating_sub(ADDRESS_WIDTH) / BLOCK_WIDTH);
    BLOCK_BYTES * blocks.max(1)
}

/// Screen column of the first nibble of the `index`-th byte on a line.
pub fn hex_column(index: usize) -> u16 {
    let block = (index / BLOCK_BYTES) as u16;
    let within = (index % BLOCK_BYTES) as u16;
    ADDRESS_WIDTH + block * BLOCK_HEX_WIDTH + within * 3
}

/// Screen column of the `index`-th byte in the text pane.
pub fn text_column(index: usize, bytes_per_line: usize) -> u16 {
    let blocks = (bytes_per_line / BLOCK_BYTES) as u16;
    ADDRESS_WIDTH + blocks * BLOCK_HEX_WIDTH + index as u16
}

/// Which pane the cursor is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    /// Hex digits; typing edits nibbles.
    #[default]
    Hex,
    /// Printable characters; typing edits whole bytes.
    Text,
}

impl Side {
    /// The other pane.
    pub fn other(self) -> Self {
        match self {
            Side::Hex => Side::Text,
            Side::Text => Side::Hex,
        }
    }
}

/// Pending byte edits keyed by absolute offset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditOverlay {
    edits: BTreeMap<u64, u8>,
}

impl EditOverlay {
    /// Empty overlay.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pending value at `offset`.
    pub fn get(&self, offset: u64) -> Option<u8> {
        self.edits.get(&offset).copied()
    }

    /// Record an edit, returning the previous pending value.
    pub fn insert(&mut self, offset: u64, value: u8) -> Option<u8> {
        self.edits.insert(offset, value)
    }

    /// Whether `offset` has a pending edit.
    pub fn contains(&self, offset: u64) -> bool {
        self.edits.contains_key(&offset)
    }

    /// Number of edited offsets.
    pub fn len(&self) -> usize {
        self.edits.len()
    }

    /// True when nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Edits in ascending offset order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, u8)> + '_ {
        self.edits.iter().map(|(&offset, &value)| (offset, value))
    }

    /// Drop everything, returning how many edits were pending.
    pub fn clear(&mut self) -> usize {
        let count = self.edits.len();
        self.edits.clear();
        count
    }

    /// Overwrite `buf` (holding the stream bytes from `start`) with pending
    /// values.
    pub fn apply_to(&self, start: u64, buf: &mut [u8]) {
        let end = start + buf.len() as u64;
        for (&offset, &value) in self.edits.range(start..end) {
            buf[(offset - start) as usize] = value;
        }
    }
}

/// One displayed byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexCell {
    /// Absolute offset.
    pub offset: u64,
    /// Overlay-aware value.
    pub value: u8,
    /// Whether the value is a pending edit.
    pub edited: bool,
    /// Whether the cursor is on this byte.
    pub selected: bool,
}

/// One displayed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexRow {
    /// Offset of the first byte.
    pub address: u64,
    /// Bytes on the line; the last line may be short.
    pub cells: Vec<HexCell>,
}

/// Notifications emitted by [`HexViewState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HexEvent {
    /// The cursor moved to another byte.
    PositionChanged(Change<u64>),
    /// A byte was edited in the overlay.
    Edited {
        /// Edited offset.
        offset: u64,
        /// Value before the edit (overlay-aware).
        old: u8,
        /// Value after the edit.
        new: u8,
    },
    /// Pending edits were written to the stream.
    EditsApplied(usize),
    /// Pending edits were dropped.
    EditsDiscarded(usize),
}

/// Cursor, window and pending edits over a seekable stream.
pub struct HexViewState<S> {
    stream: S,
    length: u64,
    overlay: EditOverlay,
    position: u64,
    first_nibble: bool,
    side: Side,
    display_start: u64,
    width: u16,
    height: u16,
    bytes_per_line: usize,
    allow_edits: bool,
    events: Vec<HexEvent>,
    needs_display: bool,
}

impl<S: Read + Seek> HexViewState<S> {
    /// Wrap `stream`, probing that it can seek.
    ///
    /// # Errors
    /// [`CoreError::NotSeekable`] if either probe seek fails.
    pub fn new(mut stream: S) -> Result<Self, CoreError> {
        let length = stream
            .seek(SeekFrom::End(0))
            .map_err(CoreError::NotSeekable)?;
        stream
            .seek(SeekFrom::Start(0))
            .map_err(CoreError::NotSeekable)?;
        debug!(length, "hex view opened stream");
        Ok(Self {
            stream,
            length,
            overlay: EditOverlay::new(),
            position: 0,
            first_nibble: true,
            side: Side::Hex,
            display_start: 0,
            width: 0,
            height: 0,
            bytes_per_line: BLOCK_BYTES,
            allow_edits: true,
            events: Vec::new(),
            needs_display: true,
        })
    }

    /// Stream length in bytes, as probed at construction.
    pub fn length(&self) -> u64 {
        self.length
    }

    /// Byte under the cursor.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Whether the next hex digit goes to the high nibble.
    pub fn is_first_nibble(&self) -> bool {
        self.first_nibble
    }

    /// Pane holding the cursor.
    pub fn side(&self) -> Side {
        self.side
    }

    /// Offset of the first byte on screen.
    pub fn display_start(&self) -> u64 {
        self.display_start
    }

    /// Bytes per line for the current width.
    pub fn bytes_per_line(&self) -> usize {
        self.bytes_per_line
    }

    /// Viewport height in lines.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Pending edits.
    pub fn overlay(&self) -> &EditOverlay {
        &self.overlay
    }

    /// Whether typing edits bytes.
    pub fn allow_edits(&self) -> bool {
        self.allow_edits
    }

    /// Enable or disable editing.
    pub fn set_allow_edits(&mut self, allow: bool) {
        self.allow_edits = allow;
    }

    /// Shared access to the stream.
    pub fn stream(&self) -> &S {
        &self.stream
    }

    /// Push the viewport size. A width change realigns the display start to
    /// a line boundary.
    pub fn set_viewport_size(&mut self, width: u16, height: u16) {
        if (self.width, self.height) == (width, height) {
            return;
        }
        self.width = width;
        self.height = height;
        let bytes_per_line = bytes_per_line_for(width);
        if bytes_per_line != self.bytes_per_line {
            self.bytes_per_line = bytes_per_line;
            self.display_start -= self.display_start % bytes_per_line as u64;
        }
        self.needs_display = true;
        if !self.in_window(self.position) {
            self.align_display_start(self.position);
        }
    }

    /// Byte at `offset`, pending edits first. `None` past the end.
    pub fn read_byte(&mut self, offset: u64) -> Result<Option<u8>, CoreError> {
        if let Some(value) = self.overlay.get(offset) {
            return Ok(Some(value));
        }
        if offset >= self.length {
            return Ok(None);
        }
        self.stream.seek(SeekFrom::Start(offset))?;
        let mut byte = [0u8; 1];
        match self.stream.read(&mut byte)? {
            0 => Ok(None),
            _ => Ok(Some(byte[0])),
        }
    }

    /// The displayed page as rows of cells, with one seek and one read.
    pub fn read_window(&mut self) -> Result<Vec<HexRow>, CoreError> {
        let start = self.display_start.min(self.length);
        let wanted = (self.page_bytes() as u64).min(self.length - start);
        self.stream.seek(SeekFrom::Start(start))?;
        let mut buf = Vec::with_capacity(wanted as usize);
        (&mut self.stream).take(wanted).read_to_end(&mut buf)?;
        self.overlay.apply_to(start, &mut buf);

        let rows = buf
            .chunks(self.bytes_per_line)
            .enumerate()
            .map(|(line, chunk)| {
                let address = start + (line * self.bytes_per_line) as u64;
                let cells = chunk
                    .iter()
                    .enumerate()
                    .map(|(i, &value)| {
                        let offset = address + i as u64;
                        HexCell {
                            offset,
                            value,
                            edited: self.overlay.contains(offset),
                            selected: offset == self.position,
                        }
                    })
                    .collect();
                HexRow { address, cells }
            })
            .collect();
        Ok(rows)
    }

    /// Type a hex digit (0-15) at the cursor.
    ///
    /// Combines with the other nibble of the current value and advances the
    /// cursor. Returns whether anything was written.
    pub fn write_nibble(&mut self, nibble: u8) -> Result<bool, CoreError> {
        if !self.allow_edits || self.position >= self.length {
            return Ok(false);
        }
        let old = self.read_byte(self.position)?.unwrap_or(0);
        let nibble = nibble & 0x0f;
        let new = if self.first_nibble {
            (nibble << 4) | (old & 0x0f)
        } else {
            (old & 0xf0) | nibble
        };
        self.record_edit(old, new);
        if self.first_nibble {
            self.first_nibble = false;
        } else {
            self.first_nibble = true;
            self.step_forward();
        }
        Ok(true)
    }

    /// Type a whole byte at the cursor (text pane) and advance.
    pub fn write_char(&mut self, value: u8) -> Result<bool, CoreError> {
        if !self.allow_edits || self.position >= self.length {
            return Ok(false);
        }
        let old = self.read_byte(self.position)?.unwrap_or(0);
        self.record_edit(old, value);
        self.first_nibble = true;
        self.step_forward();
        Ok(true)
    }

    /// Drop pending edits without writing. Returns how many were dropped.
    pub fn discard_edits(&mut self) -> usize {
        let count = self.overlay.clear();
        if count > 0 {
            info!(count, "discarded pending edits");
            self.events.push(HexEvent::EditsDiscarded(count));
            self.needs_display = true;
        }
        count
    }

    /// Move one nibble (hex pane) or byte (text pane) left.
    pub fn move_left(&mut self) -> bool {
        if self.side == Side::Hex && !self.first_nibble {
            self.first_nibble = true;
            self.needs_display = true;
            return true;
        }
        if self.position == 0 {
            return false;
        }
        self.first_nibble = self.side == Side::Text;
        self.step_to(self.position - 1, self.bytes_per_line as u64);
        true
    }

    /// Move one nibble (hex pane) or byte (text pane) right.
    pub fn move_right(&mut self) -> bool {
        if self.side == Side::Hex && self.first_nibble && self.position < self.length {
            self.first_nibble = false;
            self.needs_display = true;
            return true;
        }
        if self.position + 1 >= self.length {
            return false;
        }
        self.first_nibble = true;
        self.step_to(self.position + 1, self.bytes_per_line as u64);
        true
    }

    /// Move one line up, if there is one.
    pub fn move_up(&mut self) -> bool {
        let line = self.bytes_per_line as u64;
        if self.position < line {
            return false;
        }
        self.step_to(self.position - line, line);
        true
    }

    /// Move one line down, if the target byte exists.
    pub fn move_down(&mut self) -> bool {
        let line = self.bytes_per_line as u64;
        if self.position + line >= self.length {
            return false;
        }
        self.step_to(self.position + line, line);
        true
    }

    /// Move one page up, stopping at the first byte.
    pub fn page_up(&mut self) -> bool {
        let page = self.page_bytes() as u64;
        let target = self.position.saturating_sub(page);
        if target == self.position {
            return false;
        }
        self.step_to(target, page);
        true
    }

    /// Move one page down, stopping at the last byte.
    pub fn page_down(&mut self) -> bool {
        let page = self.page_bytes() as u64;
        let target = (self.position + page).min(self.last_offset());
        if target == self.position {
            return false;
        }
        self.step_to(target, page);
        true
    }

    /// Jump to the first byte.
    pub fn move_start(&mut self) -> bool {
        self.set_position(0)
    }

    /// Jump to the last byte.
    pub fn move_end(&mut self) -> bool {
        self.set_position(self.last_offset())
    }

    /// Put the cursor on `offset` (clamped), aligning the window to the
    /// line that contains it when it is off screen.
    pub fn set_position(&mut self, offset: u64) -> bool {
        let target = offset.min(self.last_offset());
        self.first_nibble = true;
        if !self.in_window(target) {
            self.align_display_start(target);
        }
        self.replace_position(target)
    }

    /// Switch between the hex and text panes.
    pub fn toggle_side(&mut self) {
        self.side = self.side.other();
        self.first_nibble = true;
        self.needs_display = true;
    }

    /// Byte and pane under a screen cell relative to the view area.
    pub fn offset_at(&self, column: u16, row: u16) -> Option<(u64, Side)> {
        if row >= self.height || column < ADDRESS_WIDTH {
            return None;
        }
        let blocks = (self.bytes_per_line / BLOCK_BYTES) as u16;
        let rel = column - ADDRESS_WIDTH;
        let hex_end = blocks * BLOCK_HEX_WIDTH;
        let (index, side) = if rel < hex_end {
            let within = rel % BLOCK_HEX_WIDTH;
            if within >= 12 || within % 3 == 2 {
                return None;
            }
            let block = usize::from(rel / BLOCK_HEX_WIDTH);
            (block * BLOCK_BYTES + usize::from(within / 3), Side::Hex)
        } else if rel < hex_end + blocks * BLOCK_BYTES as u16 {
            (usize::from(rel - hex_end), Side::Text)
        } else {
            return None;
        };
        let offset = self.display_start
            + u64::from(row) * self.bytes_per_line as u64
            + index as u64;
        (offset < self.length).then_some((offset, side))
    }

    /// Move the cursor to a clicked cell. Returns whether it landed on a byte.
    pub fn click(&mut self, column: u16, row: u16) -> bool {
        let Some((offset, side)) = self.offset_at(column, row) else {
            return false;
        };
        if self.side != side {
            self.side = side;
            self.needs_display = true;
        }
        self.first_nibble = true;
        self.replace_position(offset);
        true
    }

    /// Screen cell of the cursor relative to the view area, if on screen.
    pub fn cursor_cell(&self) -> Option<(u16, u16)> {
        if !self.in_window(self.position) {
            return None;
        }
        let rel = (self.position - self.display_start) as usize;
        let row = (rel / self.bytes_per_line) as u16;
        let index = rel % self.bytes_per_line;
        let column = match self.side {
            Side::Hex => hex_column(index) + u16::from(!self.first_nibble),
            Side::Text => text_column(index, self.bytes_per_line),
        };
        Some((column, row))
    }

    /// Drain pending events.
    pub fn take_events(&mut self) -> Vec<HexEvent> {
        std::mem::take(&mut self.events)
    }

    /// Whether something on screen changed since the last call.
    pub fn take_needs_display(&mut self) -> bool {
        std::mem::take(&mut self.needs_display)
    }

    fn page_bytes(&self) -> usize {
        self.bytes_per_line * usize::from(self.height.max(1))
    }

    fn last_offset(&self) -> u64 {
        self.length.saturating_sub(1)
    }

    fn in_window(&self, offset: u64) -> bool {
        offset >= self.display_start && offset < self.display_start + self.page_bytes() as u64
    }

    fn align_display_start(&mut self, offset: u64) {
        let line = self.bytes_per_line as u64;
        let line_start = offset - offset % line;
        self.display_start = if offset < self.display_start {
            line_start
        } else {
            line_start.saturating_sub(u64::from(self.height.saturating_sub(1)) * line)
        };
        self.needs_display = true;
    }

    /// Move to `target`, shifting the window by exactly `shift` bytes when
    /// the target leaves it.
    fn step_to(&mut self, target: u64, shift: u64) {
        if target < self.display_start {
            self.display_start = self.display_start.saturating_sub(shift);
            self.needs_display = true;
        } else if !self.in_window(target) {
            self.display_start += shift;
            self.needs_display = true;
        }
        self.replace_position(target);
    }

    fn step_forward(&mut self) {
        if self.position + 1 < self.length {
            self.step_to(self.position + 1, self.bytes_per_line as u64);
        }
    }

    fn replace_position(&mut self, target: u64) -> bool {
        self.needs_display = true;
        let Some(change) = Change::between(self.position, target) else {
            return false;
        };
        self.position = target;
        self.events.push(HexEvent::PositionChanged(change));
        true
    }

    fn record_edit(&mut self, old: u8, new: u8) {
        self.overlay.insert(self.position, new);
        self.events.push(HexEvent::Edited {
            offset: self.position,
            old,
            new,
        });
        self.needs_display = true;
    }
}

impl<S: Read + Write + Seek> HexViewState<S> {
    /// Write pending edits to the stream, flush, and clear them.
    ///
    /// Returns the number of bytes written. See
    /// [`apply_edits_with_mirror`](Self::apply_edits_with_mirror) for the
    /// failure policy.
    pub fn apply_edits(&mut self) -> Result<usize, CoreError> {
        self.apply_edits_with_mirror::<io::Cursor<Vec<u8>>>(None)
    }

    /// Write pending edits to the stream and then to `mirror`.
    ///
    /// The stream's current bytes at every edited offset are read first. If a
    /// write or the flush fails, those bytes are written back (best effort),
    /// the edits stay pending and [`CoreError::ApplyFailed`] or
    /// [`CoreError::FlushFailed`] is returned. The mirror is only written
    /// once the stream is committed; a mirror failure leaves the edits
    /// cleared and returns [`CoreError::MirrorFailed`].
    pub fn apply_edits_with_mirror<W: Write + Seek>(
        &mut self,
        mirror: Option<&mut W>,
    ) -> Result<usize, CoreError> {
        if self.overlay.is_empty() {
            return Ok(0);
        }
        let edits: Vec<(u64, u8)> = self.overlay.iter().collect();
        let originals = self.stage_originals(&edits)?;

        for (written, &(offset, value)) in edits.iter().enumerate() {
            if let Err(source) = write_at(&mut self.stream, offset, value) {
                warn!(offset, error = %source, "edit write failed, rolling back");
                self.roll_back(&originals[..written]);
                return Err(CoreError::ApplyFailed { offset, source });
            }
        }
        if let Err(source) = self.stream.flush() {
            warn!(error = %source, "flush failed, rolling back");
            self.roll_back(&originals);
            return Err(CoreError::FlushFailed(source));
        }

        let count = self.overlay.clear();
        info!(count, "applied pending edits");
        self.events.push(HexEvent::EditsApplied(count));
        self.needs_display = true;

        if let Some(mirror) = mirror {
            for &(offset, value) in &edits {
                write_at(&mut *mirror, offset, value)
                    .map_err(|source| CoreError::MirrorFailed { offset, source })?;
            }
            mirror.flush().map_err(|source| CoreError::MirrorFailed {
                offset: edits.last().map_or(0, |&(offset, _)| offset),
                source,
            })?;
        }
        Ok(count)
    }

    fn stage_originals(&mut self, edits: &[(u64, u8)]) -> Result<Vec<(u64, u8)>, CoreError> {
        edits
            .iter()
            .map(|&(offset, _)| {
                self.stream.seek(SeekFrom::Start(offset))?;
                let mut byte = [0u8; 1];
                self.stream.read_exact(&mut byte)?;
                Ok((offset, byte[0]))
            })
            .collect()
    }

    fn roll_back(&mut self, originals: &[(u64, u8)]) {
        for &(offset, value) in originals {
            if let Err(error) = write_at(&mut self.stream, offset, value) {
                warn!(offset, %error, "rollback write failed");
            }
        }
        if let Err(error) = self.stream.flush() {
            warn!(%error, "rollback flush failed");
        }
    }
}

fn write_at<W: Write + Seek>(target: &mut W, offset: u64, value: u8) -> io::Result<()> {
    target.seek(SeekFrom::Start(offset))?;
    target.write_all(&[value])
}

#[cfg(test)]
#[path = "hex_tests.rs"]
mod tests;
