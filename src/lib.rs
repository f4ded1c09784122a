//! Headless drop-target interaction core for retained element trees.
/// Drop-target controller and its capabilities.
pub mod droppable;
/// Native-style drag events and published notices.
pub mod events;
/// Pointer-to-event bridge owning tree, session and targets.
pub mod host;
/// Tracing setup for the demo binary.
pub mod logging;
/// Minimal selector matching for accept rules.
pub mod selector;
/// Shared drag-session context.
pub mod session;
/// Scoped hit-test suppression rules.
pub mod style;
/// The retained element tree the targets attach to.
pub mod tree;
