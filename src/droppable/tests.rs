use std::cell::Cell;
use std::rc::Rc;

use super::test_support::{fixture, notice_log, recorder};
use super::{
    ATTACHED_CLASS, AcceptRule, DISABLED_CLASS, DropState, DroppableOptions, HOVER_CLASS,
};
use crate::events::{DragEventKind, NoticeKind};

#[test]
fn construction_applies_marker_and_injects_style() {
    let mut fx = fixture();
    let droppable = fx.droppable(DroppableOptions::default());
    assert!(fx.tree.has_class(fx.target, ATTACHED_CLASS));
    assert_eq!(fx.tree.styles().len(), 1);
    assert_eq!(droppable.state(), DropState::Idle);
}

#[test]
fn acceptable_enter_publishes_over_and_prevents_default() {
    let mut fx = fixture();
    let log = notice_log();
    let mut droppable = fx.droppable(DroppableOptions::default());
    droppable.on(NoticeKind::Over, recorder(&log));
    fx.start_drag();

    let event = fx.deliver(&mut droppable, DragEventKind::Enter);
    assert!(event.default_prevented());
    assert_eq!(droppable.state(), DropState::EnteredAcceptable);
    assert!(fx.tree.has_class(fx.target, HOVER_CLASS));
    assert_eq!(log.borrow().as_slice(), &[NoticeKind::Over]);
}

#[test]
fn unacceptable_enter_marks_hover_without_over() {
    let mut fx = fixture();
    let log = notice_log();
    let mut droppable = fx.droppable(DroppableOptions {
        accept: Some(AcceptRule::Selector(".slot".to_string())),
        ..Default::default()
    });
    droppable.on(NoticeKind::Over, recorder(&log));
    fx.start_drag();

    let event = fx.deliver(&mut droppable, DragEventKind::Enter);
    assert!(!event.default_prevented(), "host default rejects the drop");
    assert_eq!(droppable.state(), DropState::EnteredUnacceptable);
    assert!(fx.tree.has_class(fx.target, HOVER_CLASS));
    assert!(log.borrow().is_empty());

    // Drop listeners never armed: a release does nothing.
    let drop = fx.deliver(&mut droppable, DragEventKind::Drop);
    assert!(!drop.default_prevented());
    assert_eq!(droppable.state(), DropState::EnteredUnacceptable);
}

#[test]
fn enter_without_active_drag_is_unacceptable() {
    let mut fx = fixture();
    let mut droppable = fx.droppable(DroppableOptions::default());
    fx.deliver(&mut droppable, DragEventKind::Enter);
    assert_eq!(droppable.state(), DropState::EnteredUnacceptable);
}

#[test]
fn selector_rule_governs_acceptance() {
    let mut fx = fixture();
    let mut droppable = fx.droppable(DroppableOptions {
        accept: Some(AcceptRule::Selector(".item".to_string())),
        ..Default::default()
    });
    fx.start_drag();
    fx.deliver(&mut droppable, DragEventKind::Enter);
    assert_eq!(droppable.state(), DropState::EnteredAcceptable);
}

#[test]
fn bubbled_second_enter_is_ignored() {
    let mut fx = fixture();
    let evaluations = Rc::new(Cell::new(0));
    let counter = evaluations.clone();
    let log = notice_log();
    let mut droppable = fx.droppable(DroppableOptions {
        accept: Some(AcceptRule::predicate(move |_, _| {
            counter.set(counter.get() + 1);
            true
        })),
        ..Default::default()
    });
    droppable.on(NoticeKind::Over, recorder(&log));
    fx.start_drag();

    fx.deliver(&mut droppable, DragEventKind::Enter);
    fx.deliver(&mut droppable, DragEventKind::Enter);
    assert_eq!(evaluations.get(), 1);
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn acceptance_is_cached_for_the_hover() {
    let mut fx = fixture();
    let evaluations = Rc::new(Cell::new(0));
    let counter = evaluations.clone();
    let mut droppable = fx.droppable(DroppableOptions {
        accept: Some(AcceptRule::predicate(move |_, _| {
            counter.set(counter.get() + 1);
            true
        })),
        ..Default::default()
    });
    fx.start_drag();
    fx.deliver(&mut droppable, DragEventKind::Enter);
    for _ in 0..5 {
        let over = fx.deliver(&mut droppable, DragEventKind::Over);
        assert!(over.default_prevented());
        assert!(over.propagation_stopped());
    }
    assert_eq!(evaluations.get(), 1, "over events never re-evaluate");

    // Swapping the rule mid-hover does not retroactively change acceptance.
    droppable.update_options(DroppableOptions {
        accept: Some(AcceptRule::Selector(".nothing".to_string())),
        ..Default::default()
    });
    assert_eq!(droppable.state(), DropState::EnteredAcceptable);
}

#[test]
fn updated_rule_governs_the_next_hover_only() {
    let mut fx = fixture();
    let mut droppable = fx.droppable(DroppableOptions::default());
    fx.start_drag();
    fx.deliver(&mut droppable, DragEventKind::Enter);
    assert_eq!(droppable.state(), DropState::EnteredAcceptable);
    fx.deliver_leave(&mut droppable, None);
    assert_eq!(droppable.state(), DropState::Idle);

    droppable.update_options(DroppableOptions {
        accept: Some(AcceptRule::Selector(".slot".to_string())),
        ..Default::default()
    });
    fx.deliver(&mut droppable, DragEventKind::Enter);
    assert_eq!(droppable.state(), DropState::EnteredUnacceptable);
}

#[test]
fn genuine_leave_returns_to_idle() {
    let mut fx = fixture();
    let log = notice_log();
    let mut droppable = fx.droppable(DroppableOptions::default());
    droppable.on(NoticeKind::Out, recorder(&log));
    fx.start_drag();

    fx.deliver(&mut droppable, DragEventKind::Enter);
    let leave = fx.deliver_leave(&mut droppable, Some(fx.card));
    assert!(leave.default_prevented());
    assert_eq!(droppable.state(), DropState::Idle);
    assert!(!fx.tree.has_class(fx.target, HOVER_CLASS));
    assert_eq!(log.borrow().as_slice(), &[NoticeKind::Out]);

    // The enter listener is restored: the next hover works again.
    fx.deliver(&mut droppable, DragEventKind::Enter);
    assert_eq!(droppable.state(), DropState::EnteredAcceptable);
}

#[test]
fn leave_to_a_descendant_is_a_no_op() {
    let mut fx = fixture();
    let log = notice_log();
    let mut droppable = fx.droppable(DroppableOptions::default());
    droppable.on(NoticeKind::Out, recorder(&log));
    fx.start_drag();

    fx.deliver(&mut droppable, DragEventKind::Enter);
    let child = fx.child;
    fx.deliver_leave(&mut droppable, Some(child));
    assert_eq!(droppable.state(), DropState::EnteredAcceptable);
    assert!(fx.tree.has_class(fx.target, HOVER_CLASS));
    assert!(log.borrow().is_empty());

    // Leaving to the target itself is also still inside it.
    let target = fx.target;
    fx.deliver_leave(&mut droppable, Some(target));
    assert_eq!(droppable.state(), DropState::EnteredAcceptable);
}

#[test]
fn drop_publishes_then_cleans_up_exactly_once() {
    let mut fx = fixture();
    let log = notice_log();
    let mut droppable = fx.droppable(DroppableOptions::default());
    droppable.on(NoticeKind::Over, recorder(&log));
    droppable.on(NoticeKind::Drop, recorder(&log));
    droppable.on(NoticeKind::Out, recorder(&log));
    fx.start_drag();

    fx.deliver(&mut droppable, DragEventKind::Enter);
    let drop = fx.deliver(&mut droppable, DragEventKind::Drop);
    assert!(drop.default_prevented());
    assert_eq!(
        log.borrow().as_slice(),
        &[NoticeKind::Over, NoticeKind::Drop, NoticeKind::Out]
    );
    assert_eq!(droppable.state(), DropState::Idle);
    assert!(!fx.tree.has_class(fx.target, HOVER_CLASS));

    // No further cleanup if a stray leave arrives afterwards.
    fx.deliver_leave(&mut droppable, None);
    assert_eq!(
        log.borrow().as_slice(),
        &[NoticeKind::Over, NoticeKind::Drop, NoticeKind::Out]
    );
}

#[test]
fn drop_callback_receives_the_dragged_descriptor() {
    let mut fx = fixture();
    let seen = Rc::new(Cell::new(None));
    let card = fx.card;
    let sink = seen.clone();
    let mut droppable = fx.droppable(DroppableOptions {
        on_drop: Some(Box::new(move |_notice, ui| sink.set(Some(ui.dragged)))),
        ..Default::default()
    });
    fx.start_drag();
    fx.deliver(&mut droppable, DragEventKind::Enter);
    fx.deliver(&mut droppable, DragEventKind::Drop);
    assert_eq!(seen.get(), Some(card));
}

#[test]
fn entered_target_without_terminal_event_stays_entered() {
    let mut fx = fixture();
    let mut droppable = fx.droppable(DroppableOptions::default());
    fx.start_drag();
    fx.deliver(&mut droppable, DragEventKind::Enter);
    // The drag origin ends the session, but no leave or drop ever arrives.
    fx.session.end();
    assert_eq!(droppable.state(), DropState::EnteredAcceptable);
    assert!(fx.tree.has_class(fx.target, HOVER_CLASS));
}

#[test]
fn disable_detaches_enter_and_marks_the_node() {
    let mut fx = fixture();
    let mut droppable = fx.droppable(DroppableOptions::default());
    droppable.disable(&mut fx.tree);
    assert_eq!(droppable.state(), DropState::Disabled);
    assert!(fx.tree.has_class(fx.target, DISABLED_CLASS));
    fx.start_drag();
    fx.deliver(&mut droppable, DragEventKind::Enter);
    assert_eq!(droppable.state(), DropState::Disabled);

    droppable.enable(&mut fx.tree);
    assert!(!fx.tree.has_class(fx.target, DISABLED_CLASS));
    fx.deliver(&mut droppable, DragEventKind::Enter);
    assert_eq!(droppable.state(), DropState::EnteredAcceptable);
}

#[test]
fn disable_mid_hover_cleans_up_immediately() {
    let mut fx = fixture();
    let log = notice_log();
    let mut droppable = fx.droppable(DroppableOptions::default());
    droppable.on(NoticeKind::Out, recorder(&log));
    fx.start_drag();

    fx.deliver(&mut droppable, DragEventKind::Enter);
    droppable.disable(&mut fx.tree);
    assert_eq!(droppable.state(), DropState::Disabled);
    assert!(!fx.tree.has_class(fx.target, HOVER_CLASS));
    assert_eq!(log.borrow().as_slice(), &[NoticeKind::Out]);

    // Nothing stayed armed: neither a drop nor another leave does anything.
    fx.deliver(&mut droppable, DragEventKind::Drop);
    fx.deliver_leave(&mut droppable, None);
    assert_eq!(log.borrow().as_slice(), &[NoticeKind::Out]);
}

#[test]
fn destroy_restores_the_node_and_removes_the_style() {
    let mut fx = fixture();
    let mut droppable = fx.droppable(DroppableOptions::default());
    fx.start_drag();
    fx.deliver(&mut droppable, DragEventKind::Enter);
    droppable.destroy(&mut fx.tree);
    assert!(!fx.tree.has_class(fx.target, ATTACHED_CLASS));
    assert!(!fx.tree.has_class(fx.target, HOVER_CLASS));
    assert!(!fx.tree.has_class(fx.target, DISABLED_CLASS));
    assert!(fx.tree.styles().is_empty());
}

#[test]
fn state_is_always_exactly_one_of_four() {
    let mut fx = fixture();
    let mut droppable = fx.droppable(DroppableOptions::default());
    let mut states = vec![droppable.state()];
    fx.start_drag();
    fx.deliver(&mut droppable, DragEventKind::Enter);
    states.push(droppable.state());
    fx.deliver(&mut droppable, DragEventKind::Over);
    states.push(droppable.state());
    fx.deliver(&mut droppable, DragEventKind::Drop);
    states.push(droppable.state());
    droppable.disable(&mut fx.tree);
    states.push(droppable.state());
    assert_eq!(
        states,
        vec![
            DropState::Idle,
            DropState::EnteredAcceptable,
            DropState::EnteredAcceptable,
            DropState::Idle,
            DropState::Disabled,
        ]
    );
}
