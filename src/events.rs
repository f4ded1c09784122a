//! Native-style drag events and the notices published to subscribers.

use egui::Pos2;

use crate::tree::NodeId;

/// Raw event kinds a host delivers while a drag is live.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum DragEventKind {
    /// Pointer moved onto a node (bubbles to ancestors).
    Enter,
    /// Pointer is moving inside the current node (high frequency).
    Over,
    /// Pointer moved off a node; `related` is where it went.
    Leave,
    /// The dragged item was released over the current node.
    Drop,
}

/// One native-style event as delivered to a drop target.
#[derive(Clone, Debug)]
pub struct DragEvent {
    /// What happened.
    pub kind: DragEventKind,
    /// The node the event originated on (the deepest node under the pointer).
    pub target: NodeId,
    /// For leave/enter: the node the pointer moved to/from.
    pub related: Option<NodeId>,
    /// Pointer position at delivery time.
    pub position: Pos2,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl DragEvent {
    /// Build an event with no related node.
    pub fn new(kind: DragEventKind, target: NodeId, position: Pos2) -> Self {
        Self::with_related(kind, target, position, None)
    }

    /// Build an event carrying a related node.
    pub fn with_related(
        kind: DragEventKind,
        target: NodeId,
        position: Pos2,
        related: Option<NodeId>,
    ) -> Self {
        Self {
            kind,
            target,
            related,
            position,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Suppress the host's default reaction (a rejected drop).
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// True once a handler prevented the default reaction.
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Stop the event from bubbling to ancestor drop targets.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// True once a handler stopped propagation.
    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Kinds of notices a drop target publishes to its subscribers.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum NoticeKind {
    /// An acceptable hover started.
    Over,
    /// A hover ended, via leave or post-drop cleanup.
    Out,
    /// The dragged item was released on the target.
    Drop,
}

/// Published event: the native event's fields with target and kind overridden.
#[derive(Clone, Debug)]
pub struct DropNotice {
    /// What is being announced.
    pub kind: NoticeKind,
    /// The drop target's own node, regardless of which descendant originated
    /// the native event.
    pub target: NodeId,
    /// Carried over from the native event.
    pub related: Option<NodeId>,
    /// Carried over from the native event.
    pub position: Pos2,
}

impl DropNotice {
    pub(crate) fn synthesized(event: &DragEvent, kind: NoticeKind, target: NodeId) -> Self {
        Self {
            kind,
            target,
            related: event.related,
            position: event.position,
        }
    }
}

/// Descriptor of the dragged item handed to callbacks alongside each notice.
#[derive(Clone, Debug, PartialEq)]
pub struct DragUi {
    /// The node being dragged.
    pub dragged: NodeId,
    /// Human-readable label supplied when the drag started.
    pub label: String,
    /// Last known pointer position, when the session tracked one.
    pub position: Option<Pos2>,
}
