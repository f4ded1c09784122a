//! Event bridge between pointer input and the drop targets.
//!
//! `DropHost` owns the tree, the drag session and the registered drop
//! targets. From plain pointer movement it synthesizes the event sequences a
//! native host would deliver: hit-testing the deepest node, bubbling events
//! along the ancestor chain, and pairing every enter with a leave carrying
//! the right related node. The enter on the new node precedes the leave on
//! the old one, matching native delivery order.

use std::collections::HashMap;

use egui::Pos2;
use tracing::debug;

use crate::droppable::{DropState, Droppable, DroppableOptions};
use crate::events::{DragEvent, DragEventKind};
use crate::session::DragSession;
use crate::tree::{ElementTree, NodeId};

/// Owns one tree, one session and the drop targets attached to the tree.
pub struct DropHost {
    tree: ElementTree,
    session: DragSession,
    droppables: HashMap<NodeId, Droppable>,
    /// Node the pointer is currently over (the last hit-test result).
    hovered: Option<NodeId>,
    pointer: Option<Pos2>,
}

impl DropHost {
    /// Wrap a tree. Nodes become drop targets via [`DropHost::register`].
    pub fn new(tree: ElementTree) -> Self {
        Self {
            tree,
            session: DragSession::default(),
            droppables: HashMap::new(),
            hovered: None,
            pointer: None,
        }
    }

    /// The element tree.
    pub fn tree(&self) -> &ElementTree {
        &self.tree
    }

    /// Mutable access to the element tree.
    pub fn tree_mut(&mut self) -> &mut ElementTree {
        &mut self.tree
    }

    /// The shared drag session (read-only; the host is the single writer).
    pub fn session(&self) -> &DragSession {
        &self.session
    }

    /// Attach a drop target to `node`. Registering a node twice destroys the
    /// previous target first.
    pub fn register(&mut self, node: NodeId, options: DroppableOptions) {
        if let Some(previous) = self.droppables.remove(&node) {
            previous.destroy(&mut self.tree);
        }
        let droppable = Droppable::new(&mut self.tree, node, options);
        self.droppables.insert(node, droppable);
    }

    /// Detach and destroy the drop target on `node`.
    pub fn deregister(&mut self, node: NodeId) -> bool {
        match self.droppables.remove(&node) {
            Some(droppable) => {
                droppable.destroy(&mut self.tree);
                true
            }
            None => false,
        }
    }

    /// The drop target attached to `node`, if any.
    pub fn droppable(&self, node: NodeId) -> Option<&Droppable> {
        self.droppables.get(&node)
    }

    /// Mutable access, for subscriptions and option updates.
    pub fn droppable_mut(&mut self, node: NodeId) -> Option<&mut Droppable> {
        self.droppables.get_mut(&node)
    }

    /// Begin dragging `node`. Replaces any drag already in flight.
    pub fn start_drag(&mut self, node: NodeId, label: impl Into<String>) {
        let label = label.into();
        debug!("Drag started for {node:?} ({label})");
        self.session.begin(node, label);
    }

    /// Report pointer movement. Only routes while a drag is live.
    pub fn pointer_move(&mut self, pos: Pos2) {
        if !self.session.is_active() {
            return;
        }
        self.session.set_position(pos);
        self.pointer = Some(pos);
        let hit = self.tree.hit_test(pos);
        let previous = self.hovered;
        if hit != previous {
            debug!("Pointer hit changed {previous:?} -> {hit:?}");
            self.hovered = hit;
            if let Some(entered) = hit {
                self.bubble(DragEvent::with_related(
                    DragEventKind::Enter,
                    entered,
                    pos,
                    previous,
                ));
            }
            if let Some(left) = previous {
                self.bubble(DragEvent::with_related(
                    DragEventKind::Leave,
                    left,
                    pos,
                    hit,
                ));
            }
        }
        if let Some(current) = self.hovered {
            self.bubble(DragEvent::new(DragEventKind::Over, current, pos));
        }
    }

    /// Release the dragged item at the current pointer position, then end
    /// the session. Entered targets the drop did not reach are settled with
    /// a synthetic leave.
    pub fn finish_drag(&mut self) {
        if !self.session.is_active() {
            return;
        }
        let pos = self.pointer.unwrap_or(Pos2::ZERO);
        if let Some(node) = self.hovered {
            debug!("Drag released over {node:?}");
            self.bubble(DragEvent::new(DragEventKind::Drop, node, pos));
        }
        self.settle_entered(pos);
        self.session.end();
        self.hovered = None;
        self.pointer = None;
    }

    /// Abandon the drag without a drop. Entered targets receive their
    /// terminating leave so none is left stuck mid-hover.
    pub fn end_drag(&mut self) {
        if !self.session.is_active() {
            return;
        }
        debug!("Drag ended without a drop");
        let pos = self.pointer.unwrap_or(Pos2::ZERO);
        self.settle_entered(pos);
        self.session.end();
        self.hovered = None;
        self.pointer = None;
    }

    /// Deliver `event` along the bubble path from its target to the root,
    /// offering it to the drop target registered at each node until a
    /// handler stops propagation.
    fn bubble(&mut self, mut event: DragEvent) {
        let path: Vec<NodeId> = self.tree.ancestors(event.target).collect();
        for node in path {
            if let Some(droppable) = self.droppables.get_mut(&node) {
                droppable.dispatch(&mut self.tree, &self.session, &mut event);
                if event.propagation_stopped() {
                    break;
                }
            }
        }
    }

    /// Session-wide end-of-drag signal: deliver a synthetic leave directly
    /// to every target still mid-hover.
    fn settle_entered(&mut self, pos: Pos2) {
        let entered: Vec<NodeId> = self
            .droppables
            .iter()
            .filter(|(_, droppable)| {
                matches!(
                    droppable.state(),
                    DropState::EnteredAcceptable | DropState::EnteredUnacceptable
                )
            })
            .map(|(node, _)| *node)
            .collect();
        for node in entered {
            if let Some(droppable) = self.droppables.get_mut(&node) {
                let mut leave = DragEvent::new(DragEventKind::Leave, node, pos);
                droppable.dispatch(&mut self.tree, &self.session, &mut leave);
            }
        }
    }
}

impl std::fmt::Debug for DropHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DropHost")
            .field("droppables", &self.droppables.len())
            .field("hovered", &self.hovered)
            .field("drag_active", &self.session.is_active())
            .finish()
    }
}
