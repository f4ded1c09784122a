#![deny(missing_docs)]
#![deny(warnings)]

//! Scripted demo: drags a card across two bins and a nested slot, tracing
//! every transition. Run with `RUST_LOG=debug` to see the raw event flow.

use egui::{Pos2, Rect, pos2, vec2};
use tracing::info;

use dropsite::droppable::{AcceptRule, DroppableOptions};
use dropsite::host::DropHost;
use dropsite::logging;
use dropsite::tree::ElementTree;

fn main() {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let mut tree = ElementTree::new(Rect::from_min_size(Pos2::ZERO, vec2(640.0, 360.0)));
    let shelf = tree.add_child(
        tree.root(),
        "shelf",
        Rect::from_min_size(pos2(20.0, 260.0), vec2(600.0, 80.0)),
    );
    let card = tree.add_child(
        shelf,
        "card",
        Rect::from_min_size(pos2(40.0, 280.0), vec2(60.0, 40.0)),
    );
    tree.add_class(card, "item");

    let picky_bin = tree.add_child(
        tree.root(),
        "bin",
        Rect::from_min_size(pos2(20.0, 20.0), vec2(280.0, 200.0)),
    );
    tree.add_child(
        picky_bin,
        "label",
        Rect::from_min_size(pos2(40.0, 40.0), vec2(240.0, 40.0)),
    );
    let open_bin = tree.add_child(
        tree.root(),
        "bin",
        Rect::from_min_size(pos2(340.0, 20.0), vec2(280.0, 200.0)),
    );
    let nested_slot = tree.add_child(
        open_bin,
        "bin",
        Rect::from_min_size(pos2(380.0, 120.0), vec2(200.0, 80.0)),
    );

    let mut host = DropHost::new(tree);
    host.register(
        picky_bin,
        DroppableOptions {
            accept: Some(AcceptRule::Selector(".archive".to_string())),
            on_over: Some(Box::new(|_, ui| info!("Picky bin would take {}", ui.label))),
            ..Default::default()
        },
    );
    host.register(
        open_bin,
        DroppableOptions {
            on_drop: Some(Box::new(|_, ui| info!("Open bin caught {}", ui.label))),
            on_out: Some(Box::new(|_, ui| info!("Open bin lost {}", ui.label))),
            ..Default::default()
        },
    );
    host.register(
        nested_slot,
        DroppableOptions {
            on_drop: Some(Box::new(|notice, ui| {
                info!("Nested slot caught {} at {:?}", ui.label, notice.position)
            })),
            ..Default::default()
        },
    );

    info!("Dragging the card over the picky bin (it only takes .archive)");
    host.start_drag(card, "card");
    host.pointer_move(pos2(60.0, 60.0));
    report(&host, picky_bin, "picky bin");

    info!("Crossing to the open bin");
    host.pointer_move(pos2(360.0, 60.0));
    report(&host, picky_bin, "picky bin");
    report(&host, open_bin, "open bin");

    info!("Descending into the nested slot and releasing");
    host.pointer_move(pos2(400.0, 150.0));
    report(&host, nested_slot, "nested slot");
    host.finish_drag();
    report(&host, open_bin, "open bin");
    report(&host, nested_slot, "nested slot");
}

fn report(host: &DropHost, node: dropsite::tree::NodeId, name: &str) {
    let Some(droppable) = host.droppable(node) else {
        return;
    };
    info!("{name}: {:?}", droppable.state());
}
