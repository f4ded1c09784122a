//! Retained element tree the drop-target machinery operates on.
//!
//! This is a deliberately small host model: an arena of nodes with a tag, an
//! optional id, a class set and a rectangle. It provides exactly what the
//! interaction code consumes: containment checks, selector matching, class
//! markers and a deepest-node hit test that honors suppression scopes.

use std::collections::BTreeSet;

use egui::{Pos2, Rect};

use crate::selector::Selector;
use crate::style::ScopedStyles;

/// Arena handle for one node. Only valid for the tree that created it.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Clone, Debug)]
struct Element {
    tag: String,
    id: Option<String>,
    classes: BTreeSet<String>,
    rect: Rect,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Element arena plus the per-tree registry of injected suppression scopes.
#[derive(Debug)]
pub struct ElementTree {
    nodes: Vec<Element>,
    styles: ScopedStyles,
}

impl ElementTree {
    /// Create a tree whose root covers the given viewport rectangle.
    pub fn new(viewport: Rect) -> Self {
        let root = Element {
            tag: "root".to_string(),
            id: None,
            classes: BTreeSet::new(),
            rect: viewport,
            parent: None,
            children: Vec::new(),
        };
        Self {
            nodes: vec![root],
            styles: ScopedStyles::default(),
        }
    }

    /// The root node.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append a child under `parent`. Later siblings sit on top for hit-testing.
    pub fn add_child(&mut self, parent: NodeId, tag: &str, rect: Rect) -> NodeId {
        let node = NodeId(self.nodes.len());
        self.nodes.push(Element {
            tag: tag.to_string(),
            id: None,
            classes: BTreeSet::new(),
            rect,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(node);
        node
    }

    /// Assign the author-visible id used by `#id` selectors.
    pub fn set_id(&mut self, node: NodeId, id: &str) {
        self.nodes[node.0].id = Some(id.to_string());
    }

    /// Add a class marker. Adding an already present class is a no-op.
    pub fn add_class(&mut self, node: NodeId, class: &str) {
        self.nodes[node.0].classes.insert(class.to_string());
    }

    /// Remove a class marker if present.
    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        self.nodes[node.0].classes.remove(class);
    }

    /// True when the node currently carries the class.
    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.nodes[node.0].classes.contains(class)
    }

    /// The node's tag name.
    pub fn tag(&self, node: NodeId) -> &str {
        &self.nodes[node.0].tag
    }

    /// The node's rectangle.
    pub fn rect(&self, node: NodeId) -> Rect {
        self.nodes[node.0].rect
    }

    /// Move or resize a node.
    pub fn set_rect(&mut self, node: NodeId, rect: Rect) {
        self.nodes[node.0].rect = rect;
    }

    /// Parent of the node, `None` for the root.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    /// Children in insertion order.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    /// The node followed by its ancestors up to the root; the bubble path.
    pub fn ancestors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut current = Some(node);
        std::iter::from_fn(move || {
            let node = current?;
            current = self.parent(node);
            Some(node)
        })
    }

    /// True when `node` is `ancestor` itself or sits below it.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.ancestors(node).any(|candidate| candidate == ancestor)
    }

    /// Match a node against a parsed selector.
    pub fn matches(&self, node: NodeId, selector: &Selector) -> bool {
        let element = &self.nodes[node.0];
        selector.matches(&element.tag, element.id.as_deref(), &element.classes)
    }

    /// Deepest node under `pos`, honoring active suppression scopes.
    ///
    /// Suppressed nodes never become the hit result themselves, but their
    /// subtrees are still searched so nested exempt nodes stay reachable.
    pub fn hit_test(&self, pos: Pos2) -> Option<NodeId> {
        self.hit_descend(self.root(), pos)
    }

    fn hit_descend(&self, node: NodeId, pos: Pos2) -> Option<NodeId> {
        if !self.rect(node).contains(pos) {
            return None;
        }
        for child in self.children(node).iter().rev() {
            if let Some(hit) = self.hit_descend(*child, pos) {
                return Some(hit);
            }
        }
        if self.hit_suppressed(node) {
            None
        } else {
            Some(node)
        }
    }

    fn hit_suppressed(&self, node: NodeId) -> bool {
        self.styles.scopes().any(|rule| {
            rule.scope != node
                && self.has_class(rule.scope, &rule.hover_class)
                && !self.has_class(node, &rule.exempt_class)
                && self.contains(rule.scope, node)
        })
    }

    /// Read access to the injected scopes, mainly for assertions.
    pub fn styles(&self) -> &ScopedStyles {
        &self.styles
    }

    pub(crate) fn styles_mut(&mut self) -> &mut ScopedStyles {
        &mut self.styles
    }
}
