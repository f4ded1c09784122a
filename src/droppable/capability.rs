//! Enablement and publish/subscribe capabilities composed into the
//! drop-target controller. Two independent concerns kept separate so either
//! can be reused by other interaction roles.

use std::collections::HashMap;

use crate::events::{DragUi, DropNotice, NoticeKind};

/// Callback invoked with a published notice and the dragged-item descriptor.
pub type DropCallback = Box<dyn FnMut(&DropNotice, &DragUi)>;

/// Enable/disable flag with change detection.
#[derive(Clone, Copy, Debug, Default)]
pub struct Enablement {
    disabled: bool,
}

impl Enablement {
    /// True while disabled.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Switch to enabled. Returns false when already enabled.
    pub fn enable(&mut self) -> bool {
        if !self.disabled {
            return false;
        }
        self.disabled = false;
        true
    }

    /// Switch to disabled. Returns false when already disabled.
    pub fn disable(&mut self) -> bool {
        if self.disabled {
            return false;
        }
        self.disabled = true;
        true
    }
}

/// One subscriber per notice kind, replaced on re-subscribe.
#[derive(Default)]
pub struct NoticeHub {
    subscribers: HashMap<NoticeKind, DropCallback>,
}

impl NoticeHub {
    /// Subscribe to a notice kind, replacing any previous subscriber.
    pub fn on(&mut self, kind: NoticeKind, callback: DropCallback) {
        self.subscribers.insert(kind, callback);
    }

    /// Drop the subscriber for a notice kind.
    pub fn off(&mut self, kind: NoticeKind) {
        self.subscribers.remove(&kind);
    }

    /// Drop every subscriber.
    pub fn clear(&mut self) {
        self.subscribers.clear();
    }

    pub(crate) fn publish(&mut self, notice: &DropNotice, ui: &DragUi) {
        if let Some(callback) = self.subscribers.get_mut(&notice.kind) {
            callback(notice, ui);
        }
    }
}

impl std::fmt::Debug for NoticeHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoticeHub")
            .field("subscribed", &self.subscribers.keys().collect::<Vec<_>>())
            .finish()
    }
}
