//! Acceptance rules deciding whether a dragged node may drop on a target.

use std::fmt;
use std::rc::Rc;

use tracing::warn;

use crate::selector::Selector;
use crate::tree::{ElementTree, NodeId};

/// Predicate form of an accept rule.
pub type AcceptFn = Rc<dyn Fn(&ElementTree, NodeId) -> bool>;

/// Configured accept rule, as supplied through the options.
#[derive(Clone, Default)]
pub enum AcceptRule {
    /// Accept any dragged node.
    #[default]
    Any,
    /// Accept nodes matching a selector string.
    Selector(String),
    /// Accept nodes the predicate approves.
    Predicate(AcceptFn),
}

impl AcceptRule {
    /// Convenience constructor for predicate rules.
    pub fn predicate(f: impl Fn(&ElementTree, NodeId) -> bool + 'static) -> Self {
        Self::Predicate(Rc::new(f))
    }
}

impl fmt::Debug for AcceptRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("Any"),
            Self::Selector(text) => f.debug_tuple("Selector").field(text).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// Compiled form consulted on every hover start.
#[derive(Clone)]
pub(crate) enum AcceptPredicate {
    Any,
    Matches(Selector),
    Custom(AcceptFn),
}

impl AcceptPredicate {
    /// Compile a rule. An invalid selector logs a warning and degrades to
    /// accept-any instead of failing.
    pub(crate) fn compile(rule: &AcceptRule) -> Self {
        match rule {
            AcceptRule::Any => Self::Any,
            AcceptRule::Selector(text) => match Selector::parse(text) {
                Ok(selector) => Self::Matches(selector),
                Err(error) => {
                    warn!("Ignoring accept selector {text:?}: {error}");
                    Self::Any
                }
            },
            AcceptRule::Predicate(f) => Self::Custom(f.clone()),
        }
    }

    pub(crate) fn matches(&self, tree: &ElementTree, candidate: NodeId) -> bool {
        match self {
            Self::Any => true,
            Self::Matches(selector) => tree.matches(candidate, selector),
            Self::Custom(f) => f(tree, candidate),
        }
    }
}

impl fmt::Debug for AcceptPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("Any"),
            Self::Matches(selector) => f.debug_tuple("Matches").field(selector).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
