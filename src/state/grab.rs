//! Pointer grab for drag gestures.
//!
//! A component that starts a drag (a scroll bar thumb) takes the grab. Until
//! the button is released, drag events are delivered to that component
//! only; every other component must ignore them. The grab lives in the
//! input layer and is passed by `&mut` into mouse handlers.

use crate::model::ComponentId;
use crate::view_state::Axis;
use tracing::debug;

/// Who holds the pointer and where the drag is anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrabInfo {
    /// Component receiving drag events.
    pub owner: ComponentId,
    /// Axis of the bar being dragged.
    pub axis: Axis,
    /// Last pointer coordinate along `axis`, in screen cells.
    pub anchor: u16,
}

/// Exclusive pointer ownership.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PointerGrab {
    current: Option<GrabInfo>,
}

impl PointerGrab {
    /// No one holds the pointer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the pointer. Fails if another component already holds it.
    pub fn grab(&mut self, info: GrabInfo) -> bool {
        match self.current {
            Some(held) if held.owner != info.owner => false,
            _ => {
                debug!(owner = %info.owner, axis = ?info.axis, anchor = info.anchor, "pointer grabbed");
                self.current = Some(info);
                true
            }
        }
    }

    /// Release the pointer if `owner` holds it.
    pub fn release(&mut self, owner: ComponentId) -> Option<GrabInfo> {
        if self.owner() != Some(owner) {
            return None;
        }
        debug!(%owner, "pointer released");
        self.current.take()
    }

    /// Current holder.
    pub fn owner(&self) -> Option<ComponentId> {
        self.current.map(|info| info.owner)
    }

    /// Whether nothing holds the pointer.
    pub fn is_free(&self) -> bool {
        self.current.is_none()
    }

    /// Grab details if `owner` holds the pointer.
    pub fn held_by(&mut self, owner: ComponentId) -> Option<&mut GrabInfo> {
        self.current.as_mut().filter(|info| info.owner == owner)
    }
}
