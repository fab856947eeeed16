//! Outbound change notifications.

/// An old/new value pair carried by every component event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Change<T> {
    /// Value before the mutation.
    pub old: T,
    /// Value after the mutation.
    pub new: T,
}

impl<T: PartialEq> Change<T> {
    /// Build a change, or `None` if nothing actually changed.
    pub fn between(old: T, new: T) -> Option<Self> {
        if old == new {
            None
        } else {
            Some(Self { old, new })
        }
    }
}
