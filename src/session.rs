//! Shared drag-session context.
//!
//! One session exists per host; it records which node is currently being
//! dragged. Drop targets only read it — the drag origin (host, tests, or an
//! embedding application) is the single writer. Passing it explicitly keeps
//! the controller free of global state and makes substituting a fake session
//! in tests trivial.

use egui::Pos2;

use crate::events::DragUi;
use crate::tree::NodeId;

/// The item currently being dragged.
#[derive(Clone, Debug, PartialEq)]
pub struct DragItem {
    /// The dragged node.
    pub node: NodeId,
    /// Label shown next to the drag cursor by embedding UIs.
    pub label: String,
    /// Last pointer position reported while dragging.
    pub position: Option<Pos2>,
}

/// Tracks the active drag, if any.
#[derive(Clone, Debug, Default)]
pub struct DragSession {
    current: Option<DragItem>,
}

impl DragSession {
    /// Begin a drag for `node`. Replaces any drag already in flight.
    pub fn begin(&mut self, node: NodeId, label: impl Into<String>) {
        self.current = Some(DragItem {
            node,
            label: label.into(),
            position: None,
        });
    }

    /// End the drag, returning the item that was in flight.
    pub fn end(&mut self) -> Option<DragItem> {
        self.current.take()
    }

    /// The item in flight, if a drag is live.
    pub fn dragged(&self) -> Option<&DragItem> {
        self.current.as_ref()
    }

    /// True while a drag is live.
    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    /// Record the pointer position for the in-flight item.
    pub fn set_position(&mut self, position: Pos2) {
        if let Some(item) = &mut self.current {
            item.position = Some(position);
        }
    }

    /// Descriptor handed to drop-target callbacks.
    pub fn describe(&self) -> Option<DragUi> {
        self.current.as_ref().map(|item| DragUi {
            dragged: item.node,
            label: item.label.clone(),
            position: item.position,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::DragSession;
    use crate::tree::ElementTree;
    use egui::{Pos2, Rect, pos2, vec2};

    #[test]
    fn describe_reflects_the_item_in_flight() {
        let mut tree = ElementTree::new(Rect::from_min_size(Pos2::ZERO, vec2(10.0, 10.0)));
        let node = tree.add_child(tree.root(), "div", tree.rect(tree.root()));
        let mut session = DragSession::default();
        assert!(session.describe().is_none());

        session.begin(node, "sample.wav");
        session.set_position(pos2(3.0, 4.0));
        let ui = session.describe().unwrap();
        assert_eq!(ui.dragged, node);
        assert_eq!(ui.label, "sample.wav");
        assert_eq!(ui.position, Some(pos2(3.0, 4.0)));

        let item = session.end().unwrap();
        assert_eq!(item.node, node);
        assert!(!session.is_active());
        assert!(session.end().is_none());
    }
}
