//! Drop-target controller.
//!
//! Translates native-style drag events into enter/over/leave/drop
//! transitions, keeps the visible class markers in sync, and publishes
//! normalized notices to user callbacks and subscribers. Events are expected
//! to bubble up from descendants; the controller guards itself against the
//! re-delivery that bubbling causes.

pub mod accept;
pub mod capability;
#[cfg(test)]
mod test_support;
#[cfg(test)]
mod tests;

use egui::Pos2;
use tracing::debug;

use crate::events::{DragEvent, DragEventKind, DragUi, DropNotice, NoticeKind};
use crate::session::DragSession;
use crate::style::{StyleHandle, SuppressionScope};
use crate::tree::{ElementTree, NodeId};

use accept::AcceptPredicate;
pub use accept::AcceptRule;
pub use capability::{DropCallback, Enablement, NoticeHub};

/// Class present on a node for the lifetime of its drop target.
pub const ATTACHED_CLASS: &str = "drop-target";
/// Class present while the drop target is disabled.
pub const DISABLED_CLASS: &str = "drop-target-disabled";
/// Class present only during an active hover.
pub const HOVER_CLASS: &str = "drop-target-over";

/// User-facing configuration, merged on update: present fields replace the
/// current value, absent fields keep it.
#[derive(Default)]
pub struct DroppableOptions {
    /// Which dragged nodes this target accepts. `AcceptRule::Any` clears a
    /// previously configured rule.
    pub accept: Option<AcceptRule>,
    /// Invoked on a successful drop.
    pub on_drop: Option<DropCallback>,
    /// Invoked when an acceptable hover starts.
    pub on_over: Option<DropCallback>,
    /// Invoked when a hover ends, via leave or post-drop cleanup.
    pub on_out: Option<DropCallback>,
}

impl std::fmt::Debug for DroppableOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DroppableOptions")
            .field("accept", &self.accept)
            .field("on_drop", &self.on_drop.is_some())
            .field("on_over", &self.on_over.is_some())
            .field("on_out", &self.on_out.is_some())
            .finish()
    }
}

/// The state a drop target is in. Exactly one holds at any time.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DropState {
    /// Waiting for an enter; only the enter listener is armed.
    Idle,
    /// Hovered by something this target rejects; hover marker only.
    EnteredUnacceptable,
    /// Hovered by an acceptable item; over/drop listeners armed.
    EnteredAcceptable,
    /// Enablement is off; nothing is armed.
    Disabled,
}

/// Which native event kinds the target currently reacts to. The armed set is
/// the stable per-instance stand-in for handler registration, so disarm
/// always matches the original arm.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct ListenerSet {
    enter: bool,
    over: bool,
    leave: bool,
    drop: bool,
}

impl ListenerSet {
    fn arm(&mut self, kind: DragEventKind) {
        *self.slot(kind) = true;
    }

    fn disarm(&mut self, kind: DragEventKind) {
        *self.slot(kind) = false;
    }

    fn is_armed(&self, kind: DragEventKind) -> bool {
        match kind {
            DragEventKind::Enter => self.enter,
            DragEventKind::Over => self.over,
            DragEventKind::Leave => self.leave,
            DragEventKind::Drop => self.drop,
        }
    }

    fn slot(&mut self, kind: DragEventKind) -> &mut bool {
        match kind {
            DragEventKind::Enter => &mut self.enter,
            DragEventKind::Over => &mut self.over,
            DragEventKind::Leave => &mut self.leave,
            DragEventKind::Drop => &mut self.drop,
        }
    }
}

/// Makes one tree node a valid destination for drag-and-drop gestures.
pub struct Droppable {
    node: NodeId,
    options: DroppableOptions,
    accept: AcceptPredicate,
    /// Evaluated once at enter, held fixed for the hover, cleared on exit.
    acceptable: Option<bool>,
    /// Dragged-item descriptor captured at enter alongside `acceptable`.
    hover_ui: Option<DragUi>,
    listeners: ListenerSet,
    style: Option<StyleHandle>,
    enablement: Enablement,
    notices: NoticeHub,
}

impl Droppable {
    /// Attach a drop target to `node`: applies the attached marker, arms the
    /// enter listener and injects the hit-test suppression scope.
    pub fn new(tree: &mut ElementTree, node: NodeId, options: DroppableOptions) -> Self {
        let accept = AcceptPredicate::compile(options.accept.as_ref().unwrap_or(&AcceptRule::Any));
        tree.add_class(node, ATTACHED_CLASS);
        let style = tree.styles_mut().insert(SuppressionScope {
            scope: node,
            hover_class: HOVER_CLASS.to_string(),
            exempt_class: ATTACHED_CLASS.to_string(),
        });
        let mut listeners = ListenerSet::default();
        listeners.arm(DragEventKind::Enter);
        debug!("Drop target attached to {node:?}");
        Self {
            node,
            options,
            accept,
            acceptable: None,
            hover_ui: None,
            listeners,
            style: Some(style),
            enablement: Enablement::default(),
            notices: NoticeHub::default(),
        }
    }

    /// The node this target is attached to.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Current state of the interaction machine.
    pub fn state(&self) -> DropState {
        if self.enablement.is_disabled() {
            return DropState::Disabled;
        }
        match self.acceptable {
            None => DropState::Idle,
            Some(true) => DropState::EnteredAcceptable,
            Some(false) => DropState::EnteredUnacceptable,
        }
    }

    /// Subscribe to a published notice kind.
    pub fn on(&mut self, kind: NoticeKind, callback: DropCallback) {
        self.notices.on(kind, callback);
    }

    /// Drop the subscriber for a notice kind.
    pub fn off(&mut self, kind: NoticeKind) {
        self.notices.off(kind);
    }

    /// Merge new options in place. An in-progress hover keeps the acceptance
    /// it was entered with; the merged rule governs the next hover.
    pub fn update_options(&mut self, update: DroppableOptions) {
        let DroppableOptions {
            accept,
            on_drop,
            on_over,
            on_out,
        } = update;
        if let Some(rule) = accept {
            self.options.accept = Some(rule);
        }
        if let Some(callback) = on_drop {
            self.options.on_drop = Some(callback);
        }
        if let Some(callback) = on_over {
            self.options.on_over = Some(callback);
        }
        if let Some(callback) = on_out {
            self.options.on_out = Some(callback);
        }
        self.accept =
            AcceptPredicate::compile(self.options.accept.as_ref().unwrap_or(&AcceptRule::Any));
    }

    /// Re-arm the target after a disable. No-op when already enabled.
    pub fn enable(&mut self, tree: &mut ElementTree) {
        if !self.enablement.enable() {
            return;
        }
        tree.remove_class(self.node, DISABLED_CLASS);
        self.listeners.arm(DragEventKind::Enter);
        debug!("Drop target {:?} enabled", self.node);
    }

    /// Disable the target. A hover in progress is terminated with the same
    /// cleanup a genuine leave performs, so no armed listener outlives the
    /// disable.
    pub fn disable(&mut self, tree: &mut ElementTree) {
        if self.enablement.is_disabled() {
            return;
        }
        if self.acceptable.is_some() {
            let position = self
                .hover_ui
                .as_ref()
                .and_then(|ui| ui.position)
                .unwrap_or(Pos2::ZERO);
            let mut leave = DragEvent::new(DragEventKind::Leave, self.node, position);
            self.drag_leave(tree, &mut leave);
        }
        self.enablement.disable();
        tree.add_class(self.node, DISABLED_CLASS);
        self.listeners.disarm(DragEventKind::Enter);
        debug!("Drop target {:?} disabled", self.node);
    }

    /// Detach from the tree: removes every marker class, disarms all
    /// listeners, removes the injected suppression scope and clears
    /// subscribers. The node is back to its pre-attachment state.
    pub fn destroy(mut self, tree: &mut ElementTree) {
        tree.remove_class(self.node, ATTACHED_CLASS);
        tree.remove_class(self.node, DISABLED_CLASS);
        tree.remove_class(self.node, HOVER_CLASS);
        self.listeners = ListenerSet::default();
        if let Some(handle) = self.style.take() {
            tree.styles_mut().remove(handle);
        }
        self.notices.clear();
        debug!("Drop target detached from {:?}", self.node);
    }

    /// Offer a native-style event to this target. Events whose kind is not
    /// currently armed are ignored, which is what keeps bubbled re-delivery
    /// from descendants harmless.
    pub fn dispatch(&mut self, tree: &mut ElementTree, session: &DragSession, event: &mut DragEvent) {
        if !self.listeners.is_armed(event.kind) {
            return;
        }
        match event.kind {
            DragEventKind::Enter => self.drag_enter(tree, session, event),
            DragEventKind::Over => self.drag_over(event),
            DragEventKind::Leave => self.drag_leave(tree, event),
            DragEventKind::Drop => self.drag_drop(tree, event),
        }
    }

    /// Hover start. Acceptance is decided here, exactly once per hover.
    fn drag_enter(&mut self, tree: &mut ElementTree, session: &DragSession, event: &mut DragEvent) {
        // Disarm first: the same gesture keeps bubbling enters out of
        // descendants, and those must not restart the hover.
        self.listeners.disarm(DragEventKind::Enter);
        let acceptable = self.can_drop(tree, session);
        self.acceptable = Some(acceptable);
        debug!(
            "Drop target {:?} entered, acceptable={acceptable}",
            self.node
        );
        if acceptable {
            event.prevent_default();
            self.hover_ui = session.describe();
            let notice = DropNotice::synthesized(event, NoticeKind::Over, self.node);
            self.notify(notice);
            self.listeners.arm(DragEventKind::Over);
            self.listeners.arm(DragEventKind::Drop);
        }
        tree.add_class(self.node, HOVER_CLASS);
        self.listeners.arm(DragEventKind::Leave);
    }

    /// Keeping the drop permitted requires preventing the default on every
    /// over. Not re-published: it fires at pointer-move frequency.
    fn drag_over(&mut self, event: &mut DragEvent) {
        event.prevent_default();
        event.stop_propagation();
    }

    /// Hover end. Leaves whose related node is still inside the target are
    /// bubbling between the target's own children and must not end the hover.
    fn drag_leave(&mut self, tree: &mut ElementTree, event: &mut DragEvent) {
        if event
            .related
            .is_some_and(|related| tree.contains(self.node, related))
        {
            return;
        }
        self.listeners.disarm(DragEventKind::Leave);
        tree.remove_class(self.node, HOVER_CLASS);
        if self.acceptable == Some(true) {
            event.prevent_default();
            self.listeners.disarm(DragEventKind::Over);
            self.listeners.disarm(DragEventKind::Drop);
            let notice = DropNotice::synthesized(event, NoticeKind::Out, self.node);
            self.notify(notice);
        }
        debug!("Drop target {:?} left", self.node);
        self.acceptable = None;
        self.hover_ui = None;
        if !self.enablement.is_disabled() {
            self.listeners.arm(DragEventKind::Enter);
        }
    }

    /// Release over an acceptable hover, followed by the same cleanup a
    /// genuine leave performs. No native leave will arrive after a drop, so
    /// the cleanup runs with a forced empty related node.
    fn drag_drop(&mut self, tree: &mut ElementTree, event: &mut DragEvent) {
        event.prevent_default();
        let notice = DropNotice::synthesized(event, NoticeKind::Drop, self.node);
        debug!("Drop target {:?} received a drop", self.node);
        self.notify(notice);
        let mut cleanup = DragEvent::new(DragEventKind::Leave, event.target, event.position);
        self.drag_leave(tree, &mut cleanup);
    }

    fn can_drop(&self, tree: &ElementTree, session: &DragSession) -> bool {
        session
            .dragged()
            .is_some_and(|item| self.accept.matches(tree, item.node))
    }

    /// Route a notice to the matching user callback, then to subscribers.
    fn notify(&mut self, notice: DropNotice) {
        let Some(ui) = self.hover_ui.clone() else {
            return;
        };
        let callback = match notice.kind {
            NoticeKind::Over => self.options.on_over.as_mut(),
            NoticeKind::Out => self.options.on_out.as_mut(),
            NoticeKind::Drop => self.options.on_drop.as_mut(),
        };
        if let Some(callback) = callback {
            callback(&notice, &ui);
        }
        self.notices.publish(&notice, &ui);
    }
}

impl std::fmt::Debug for Droppable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Droppable")
            .field("node", &self.node)
            .field("state", &self.state())
            .field("accept", &self.accept)
            .field("listeners", &self.listeners)
            .finish()
    }
}
