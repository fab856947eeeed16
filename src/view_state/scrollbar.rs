//! Scroll bar state and thumb geometry.
//!
//! The thumb maps the viewport's position within the content onto the bar's
//! track:
//!
//! - `thumb_size = clamp(track² / content, 1, track)`
//! - `thumb_location = clamp(offset * track / content, 0, track - thumb_size)`
//!
//! and dragging inverts the location mapping:
//! `offset = location * content / track`.
//!
//! Locations are kept fractional so the inverse recovers the offset; cell
//! positions for drawing are derived from them by flooring.

use super::types::Axis;
use serde::Deserialize;
use std::ops::Range;

/// When a scroll bar is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBarPolicy {
    /// Shown only while the content overflows the available length.
    #[default]
    Auto,
    /// Always shown (reserves its row/column even when nothing scrolls).
    Always,
    /// Never shown; the axis can still scroll by keyboard.
    Never,
}

impl ScrollBarPolicy {
    /// Whether the bar is shown given whether the content overflows.
    pub fn shows(self, overflows: bool) -> bool {
        match self {
            ScrollBarPolicy::Auto => overflows,
            ScrollBarPolicy::Always => true,
            ScrollBarPolicy::Never => false,
        }
    }
}

/// Which part of a bar a track cell falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarHit {
    /// Track before the thumb (page back).
    BeforeThumb,
    /// On the thumb (start of a drag).
    Thumb,
    /// Track after the thumb (page forward).
    AfterThumb,
}

/// One axis' scroll bar, derived from content, track and offset.
///
/// Recomputed by the owning scroller whenever any input changes; never
/// persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollBarState {
    axis: Axis,
    position: usize,
    content_len: usize,
    track_len: usize,
    visible: bool,
}

impl ScrollBarState {
    /// An empty, hidden bar.
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            position: 0,
            content_len: 0,
            track_len: 0,
            visible: false,
        }
    }

    /// Build a bar directly from its inputs.
    pub fn with(
        axis: Axis,
        position: usize,
        content_len: usize,
        track_len: usize,
        visible: bool,
    ) -> Self {
        Self {
            axis,
            position,
            content_len,
            track_len,
            visible,
        }
    }

    pub(crate) fn update(
        &mut self,
        position: usize,
        content_len: usize,
        track_len: usize,
        visible: bool,
    ) {
        self.position = position;
        self.content_len = content_len;
        self.track_len = track_len;
        self.visible = visible;
    }

    /// Axis this bar scrolls.
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Current content offset along the axis.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Content length along the axis.
    pub fn content_len(&self) -> usize {
        self.content_len
    }

    /// Viewport length along the axis (the bar's track).
    pub fn track_len(&self) -> usize {
        self.track_len
    }

    /// Whether the bar is drawn.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Thumb length in cells, or `None` before layout / with no content.
    pub fn thumb_size(&self) -> Option<f64> {
        if self.track_len == 0 || self.content_len == 0 {
            return None;
        }
        let track = self.track_len as f64;
        Some((track * track / self.content_len as f64).clamp(1.0, track))
    }

    /// Fractional thumb location for the current position.
    pub fn thumb_location(&self) -> Option<f64> {
        self.thumb_location_for(self.position)
    }

    /// Fractional thumb location for an arbitrary content offset.
    pub fn thumb_location_for(&self, offset: usize) -> Option<f64> {
        let size = self.thumb_size()?;
        let track = self.track_len as f64;
        let location = offset as f64 * track / self.content_len as f64;
        Some(location.clamp(0.0, track - size))
    }

    /// Inverse of [`thumb_location_for`](Self::thumb_location_for).
    ///
    /// The result is rounded to the nearest content unit but not clamped;
    /// the owning scroller clamps it.
    pub fn offset_for_location(&self, location: f64) -> Option<usize> {
        if self.track_len == 0 || self.content_len == 0 {
            return None;
        }
        let offset = location * self.content_len as f64 / self.track_len as f64;
        Some(offset.round().max(0.0) as usize)
    }

    /// Track cells covered by the thumb.
    pub fn thumb_cells(&self) -> Option<Range<usize>> {
        let size = self.thumb_size()?;
        let location = self.thumb_location()?;
        let start = (location.floor() as usize).min(self.track_len - 1);
        let len = (size.round() as usize).max(1);
        Some(start..(start + len).min(self.track_len))
    }

    /// Classify a track cell relative to the thumb.
    pub fn hit(&self, cell: usize) -> Option<BarHit> {
        if cell >= self.track_len {
            return None;
        }
        let thumb = self.thumb_cells()?;
        Some(if cell < thumb.start {
            BarHit::BeforeThumb
        } else if cell < thumb.end {
            BarHit::Thumb
        } else {
            BarHit::AfterThumb
        })
    }
}
