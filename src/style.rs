//! Scoped hit-test suppression rules injected by drop targets.
//!
//! Native-style dispatch always targets the deepest node under the pointer,
//! so while a drop target is hovered its own descendants would swallow the
//! events meant for it. Each drop target registers one scope here; the tree's
//! hit test consults the registry and refuses to resolve to suppressed nodes.

use crate::tree::NodeId;

/// Handle to one injected scope, used to remove it again on destroy.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct StyleHandle(u64);

/// While `hover_class` is present on `scope`, proper descendants of `scope`
/// without `exempt_class` do not hit-test.
#[derive(Clone, Debug)]
pub(crate) struct SuppressionScope {
    pub(crate) scope: NodeId,
    pub(crate) hover_class: String,
    pub(crate) exempt_class: String,
}

/// Registry of active suppression scopes, one per constructed drop target.
#[derive(Debug, Default)]
pub struct ScopedStyles {
    next_handle: u64,
    rules: Vec<(StyleHandle, SuppressionScope)>,
}

impl ScopedStyles {
    pub(crate) fn insert(&mut self, rule: SuppressionScope) -> StyleHandle {
        let handle = StyleHandle(self.next_handle);
        self.next_handle += 1;
        self.rules.push((handle, rule));
        handle
    }

    /// Remove a previously injected scope. Returns false if it was already gone.
    pub(crate) fn remove(&mut self, handle: StyleHandle) -> bool {
        let before = self.rules.len();
        self.rules.retain(|(existing, _)| *existing != handle);
        self.rules.len() != before
    }

    pub(crate) fn scopes(&self) -> impl Iterator<Item = &SuppressionScope> {
        self.rules.iter().map(|(_, rule)| rule)
    }

    /// Number of injected scopes currently registered.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when no scope is registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
