//! The owned presentation tree.
//!
//! The tree is the retained-mode equivalent of the deck's DOM: one
//! container node per group, one slide node per sub-slide. Nodes carry a
//! stable [`NodeId`] that survives in-place re-renders, which is what lets
//! the presentation engine keep its indexing and animation state across
//! document edits. Ids are monotonic and never reused.
//!
//! The tree exclusively owns its nodes; removal drops them.

/// Stable identity of a tree node across updates.
pub type NodeId = u64;

/// A rendered element: an id attribute plus inner markup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    id: String,
    html: String,
}

impl Element {
    /// Create an empty element with the given id attribute.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            html: String::new(),
        }
    }

    /// The element's id attribute.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The element's inner markup.
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Replace the element's inner markup.
    pub fn set_html(&mut self, html: impl Into<String>) {
        self.html = html.into();
    }
}

/// A rendered slide: the element plus the source text it was rendered from.
#[derive(Debug, Clone)]
pub struct SlideNode {
    node: NodeId,
    element: Element,
    source: String,
    content_hash: String,
}

impl SlideNode {
    /// The node's stable identity.
    pub fn node_id(&self) -> NodeId {
        self.node
    }

    /// The rendered element.
    pub fn element(&self) -> &Element {
        &self.element
    }

    /// The markdown this slide was last rendered from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Hash of the source text, used as the element id suffix.
    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }

    /// Replace the rendered content in place, keeping the node identity.
    pub fn replace(&mut self, element: Element, source: String, content_hash: String) {
        self.element = element;
        self.source = source;
        self.content_hash = content_hash;
    }
}

/// A group container holding sub-slides.
#[derive(Debug, Clone)]
pub struct GroupNode {
    node: NodeId,
    slides: Vec<SlideNode>,
}

impl GroupNode {
    /// The group's stable identity.
    pub fn node_id(&self) -> NodeId {
        self.node
    }

    /// The group's slides in order.
    pub fn slides(&self) -> &[SlideNode] {
        &self.slides
    }
}

/// The deck's presentation tree.
#[derive(Debug, Clone, Default)]
pub struct DeckTree {
    next_id: NodeId,
    groups: Vec<GroupNode>,
}

impl DeckTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self) -> NodeId {
        self.next_id += 1;
        self.next_id
    }

    /// Number of groups currently in the tree.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// The group at the given index.
    pub fn group(&self, group: usize) -> Option<&GroupNode> {
        self.groups.get(group)
    }

    /// The slide at `(group, slide)`.
    pub fn slide(&self, group: usize, slide: usize) -> Option<&SlideNode> {
        self.groups.get(group)?.slides.get(slide)
    }

    /// Mutable access to the slide at `(group, slide)`.
    pub fn slide_mut(&mut self, group: usize, slide: usize) -> Option<&mut SlideNode> {
        self.groups.get_mut(group)?.slides.get_mut(slide)
    }

    /// All groups in order.
    pub fn groups(&self) -> &[GroupNode] {
        &self.groups
    }

    /// Ensure a group container exists at `group`, appending new containers
    /// as needed. Returns the group's node id.
    pub fn ensure_group(&mut self, group: usize) -> NodeId {
        while self.groups.len() <= group {
            let node = self.allocate();
            self.groups.push(GroupNode {
                node,
                slides: Vec::new(),
            });
        }
        self.groups[group].node
    }

    /// Append a new slide to `group`, creating the group if needed.
    /// Returns the new slide's node id.
    pub fn append_slide(
        &mut self,
        group: usize,
        element: Element,
        source: String,
        content_hash: String,
    ) -> NodeId {
        self.ensure_group(group);
        let node = self.allocate();
        self.groups[group].slides.push(SlideNode {
            node,
            element,
            source,
            content_hash,
        });
        node
    }

    /// Remove the slide at `(group, slide)`, if present.
    pub fn remove_slide(&mut self, group: usize, slide: usize) -> bool {
        match self.groups.get_mut(group) {
            Some(g) if slide < g.slides.len() => {
                g.slides.remove(slide);
                true
            }
            _ => false,
        }
    }

    /// Remove the group at `group` and every slide it contains, if present.
    pub fn remove_group(&mut self, group: usize) -> bool {
        if group < self.groups.len() {
            self.groups.remove(group);
            true
        } else {
            false
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
