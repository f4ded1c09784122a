use std::cell::RefCell;
use std::rc::Rc;

use egui::{Pos2, Rect, pos2, vec2};

use super::{DropCallback, Droppable, DroppableOptions};
use crate::events::{DragEvent, DragEventKind, NoticeKind};
use crate::session::DragSession;
use crate::tree::{ElementTree, NodeId};

/// Tree with one drop target, a child inside it, and a draggable card with
/// class `item` sitting outside the target.
pub(super) struct Fixture {
    pub(super) tree: ElementTree,
    pub(super) session: DragSession,
    pub(super) target: NodeId,
    pub(super) child: NodeId,
    pub(super) card: NodeId,
}

pub(super) fn fixture() -> Fixture {
    let mut tree = ElementTree::new(Rect::from_min_size(Pos2::ZERO, vec2(200.0, 200.0)));
    let target = tree.add_child(
        tree.root(),
        "bin",
        Rect::from_min_size(pos2(0.0, 0.0), vec2(100.0, 100.0)),
    );
    let child = tree.add_child(
        target,
        "div",
        Rect::from_min_size(pos2(10.0, 10.0), vec2(40.0, 40.0)),
    );
    let card = tree.add_child(
        tree.root(),
        "card",
        Rect::from_min_size(pos2(150.0, 150.0), vec2(20.0, 20.0)),
    );
    tree.add_class(card, "item");
    Fixture {
        tree,
        session: DragSession::default(),
        target,
        child,
        card,
    }
}

impl Fixture {
    pub(super) fn droppable(&mut self, options: DroppableOptions) -> Droppable {
        Droppable::new(&mut self.tree, self.target, options)
    }

    pub(super) fn start_drag(&mut self) {
        self.session.begin(self.card, "card");
    }

    /// Deliver one event of `kind` targeted at the droppable's own node.
    pub(super) fn deliver(&mut self, droppable: &mut Droppable, kind: DragEventKind) -> DragEvent {
        let mut event = DragEvent::new(kind, droppable.node(), pos2(5.0, 5.0));
        droppable.dispatch(&mut self.tree, &self.session, &mut event);
        event
    }

    /// Deliver a leave whose related node is `related`.
    pub(super) fn deliver_leave(
        &mut self,
        droppable: &mut Droppable,
        related: Option<NodeId>,
    ) -> DragEvent {
        let mut event = DragEvent::with_related(
            DragEventKind::Leave,
            droppable.node(),
            pos2(5.0, 5.0),
            related,
        );
        droppable.dispatch(&mut self.tree, &self.session, &mut event);
        event
    }
}

/// Shared log of published notice kinds, filled by [`recorder`] callbacks.
pub(super) type NoticeLog = Rc<RefCell<Vec<NoticeKind>>>;

pub(super) fn notice_log() -> NoticeLog {
    Rc::new(RefCell::new(Vec::new()))
}

pub(super) fn recorder(log: &NoticeLog) -> DropCallback {
    let log = log.clone();
    Box::new(move |notice, _ui| log.borrow_mut().push(notice.kind))
}
