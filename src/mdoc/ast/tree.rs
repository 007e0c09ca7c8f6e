//! Arena of nodes and the tree mutation primitives
//!
//! All link bookkeeping (parent, siblings, child counts and the block's
//! head/body/tail references) happens here; validators only ever call these
//! primitives.

use super::node::{Node, NodeFlags, NodeId, NodeKind};
use super::range::Position;
use std::ops::{Index, IndexMut};

#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Option<Node>>,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// A tree holding only the root node.
    pub fn new() -> Self {
        let root = Node::new(NodeKind::Root, None, Position::default());
        Self {
            nodes: vec![Some(root)],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Store a detached node. The id stays valid until the node is deleted.
    pub fn alloc(&mut self, mut node: Node) -> NodeId {
        node.parent = None;
        node.prev = None;
        node.next = None;
        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(node));
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Whether `id` refers to a node that has not been deleted.
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.first_child)
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.last_child)
    }

    pub fn prev(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.prev)
    }

    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next)
    }

    pub fn child_count(&self, id: NodeId) -> usize {
        self.get(id).map_or(0, |n| n.nchild)
    }

    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.first_child(id),
        }
    }

    /// Pre-order walk of the subtree rooted at `id`, with depths relative to it.
    pub fn walk(&self, id: NodeId) -> Vec<(NodeId, usize)> {
        let mut out = Vec::new();
        let mut stack = vec![(id, 0)];
        while let Some((current, depth)) = stack.pop() {
            if !self.contains(current) {
                continue;
            }
            out.push((current, depth));
            let kids: Vec<NodeId> = self.children(current).collect();
            for kid in kids.into_iter().rev() {
                stack.push((kid, depth + 1));
            }
        }
        out
    }

    /// The block that owns the normalized data for `id`: the node itself for
    /// blocks, the closed block for end-of-block markers, the parent for other
    /// heads, bodies and tails.
    pub fn block_of(&self, id: NodeId) -> Option<NodeId> {
        let node = self.get(id)?;
        match node.kind {
            NodeKind::Block => Some(id),
            NodeKind::Head | NodeKind::Body | NodeKind::Tail => node.pending.or(node.parent),
            _ => None,
        }
    }

    /// Word of a text node.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| n.string.as_deref())
    }

    /// Concatenate the words below `id`, each trimmed of surrounding
    /// whitespace and joined by single spaces. `None` when there are no words.
    pub fn deroff(&self, id: NodeId) -> Option<String> {
        let words: Vec<&str> = self
            .walk(id)
            .into_iter()
            .filter_map(|(n, _)| self.text(n))
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .collect();
        if words.is_empty() {
            None
        } else {
            Some(words.join(" "))
        }
    }

    /// Link a detached (or linked, it is unlinked first) node as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.unlink(child);
        let last = self[parent].last_child;
        {
            let node = &mut self[child];
            node.parent = Some(parent);
            node.prev = last;
            node.next = None;
        }
        match last {
            Some(last) => self[last].next = Some(child),
            None => self[parent].first_child = Some(child),
        }
        self[parent].last_child = Some(child);
        self.attach(parent, child);
    }

    pub fn prepend_child(&mut self, parent: NodeId, child: NodeId) {
        match self.first_child(parent) {
            Some(first) => self.insert_before(first, child),
            None => self.append_child(parent, child),
        }
    }

    /// Link `id` as the next sibling of `anchor`.
    pub fn insert_after(&mut self, anchor: NodeId, id: NodeId) {
        self.unlink(id);
        let Some(parent) = self[anchor].parent else {
            return;
        };
        let next = self[anchor].next;
        {
            let node = &mut self[id];
            node.parent = Some(parent);
            node.prev = Some(anchor);
            node.next = next;
        }
        self[anchor].next = Some(id);
        match next {
            Some(next) => self[next].prev = Some(id),
            None => self[parent].last_child = Some(id),
        }
        self.attach(parent, id);
    }

    /// Link `id` as the previous sibling of `anchor`.
    pub fn insert_before(&mut self, anchor: NodeId, id: NodeId) {
        self.unlink(id);
        let Some(parent) = self[anchor].parent else {
            return;
        };
        let prev = self[anchor].prev;
        {
            let node = &mut self[id];
            node.parent = Some(parent);
            node.prev = prev;
            node.next = Some(anchor);
        }
        self[anchor].prev = Some(id);
        match prev {
            Some(prev) => self[prev].next = Some(id),
            None => self[parent].first_child = Some(id),
        }
        self.attach(parent, id);
    }

    /// Move `id` (with its subtree) to directly after `anchor`.
    pub fn move_after(&mut self, id: NodeId, anchor: NodeId) {
        self.insert_after(anchor, id);
    }

    /// Move `id` (with its subtree) to directly before `anchor`.
    pub fn move_before(&mut self, id: NodeId, anchor: NodeId) {
        self.insert_before(anchor, id);
    }

    /// Detach `id` from its parent and siblings. The subtree stays allocated.
    pub fn unlink(&mut self, id: NodeId) {
        let Some(node) = self.get(id) else {
            return;
        };
        let (parent, prev, next) = (node.parent, node.prev, node.next);
        if let Some(prev) = prev {
            self[prev].next = next;
        }
        if let Some(next) = next {
            self[next].prev = prev;
        }
        if let Some(parent) = parent {
            let p = &mut self[parent];
            p.nchild = p.nchild.saturating_sub(1);
            if p.first_child == Some(id) {
                p.first_child = next;
            }
            if p.last_child == Some(id) {
                p.last_child = prev;
            }
            if p.head == Some(id) {
                p.head = None;
            }
            if p.body == Some(id) {
                p.body = None;
            }
            if p.tail == Some(id) {
                p.tail = None;
            }
        }
        let node = &mut self[id];
        node.parent = None;
        node.prev = None;
        node.next = None;
    }

    /// Unlink `id` and free it with its whole subtree.
    pub fn delete(&mut self, id: NodeId) {
        if !self.contains(id) || id == self.root() {
            return;
        }
        self.unlink(id);
        let doomed: Vec<NodeId> = self.walk(id).into_iter().map(|(n, _)| n).collect();
        for n in doomed {
            self.nodes[n.0] = None;
        }
    }

    /// Append a synthesized word to `parent`. The word counts as validated so
    /// that no validation step ever runs on it.
    pub fn append_text(&mut self, parent: NodeId, word: impl Into<String>, pos: Position) -> NodeId {
        let mut node = Node::text(word, pos);
        let parent_node = &self[parent];
        node.sec = parent_node.sec;
        node.flags = NodeFlags {
            validated: true,
            line: false,
            ..parent_node.flags
        };
        let id = self.alloc(node);
        self.append_child(parent, id);
        id
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        let (kind, pending) = {
            let c = &self[child];
            (c.kind, c.pending)
        };
        let p = &mut self[parent];
        p.nchild += 1;
        match kind {
            NodeKind::Head => p.head = Some(child),
            NodeKind::Body if pending.is_none() => p.body = Some(child),
            NodeKind::Tail => p.tail = Some(child),
            _ => {}
        }
    }
}

impl Index<NodeId> for Tree {
    type Output = Node;

    /// Panics if the node was deleted; use [`Tree::get`] for ids that may be stale.
    fn index(&self, id: NodeId) -> &Node {
        match self.get(id) {
            Some(node) => node,
            None => panic!("node {id} was deleted"),
        }
    }
}

impl IndexMut<NodeId> for Tree {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        match self.get_mut(id) {
            Some(node) => node,
            None => panic!("node {id} was deleted"),
        }
    }
}

/// Iterator over the children of a node, first to last.
pub struct Children<'a> {
    tree: &'a Tree,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.next(current);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mdoc::ast::Macro;

    fn elem(tree: &mut Tree, parent: NodeId, tok: Macro) -> NodeId {
        let id = tree.alloc(Node::new(NodeKind::Elem, Some(tok), Position::new(1, 1)));
        tree.append_child(parent, id);
        id
    }

    fn names(tree: &Tree, parent: NodeId) -> Vec<String> {
        tree.children(parent).map(|c| tree[c].label()).collect()
    }

    #[test]
    fn test_append_and_iterate() {
        let mut tree = Tree::new();
        let root = tree.root();
        elem(&mut tree, root, Macro::Ar);
        elem(&mut tree, root, Macro::Fl);
        elem(&mut tree, root, Macro::Cm);
        assert_eq!(names(&tree, root), vec!["Ar", "Fl", "Cm"]);
        assert_eq!(tree.child_count(root), 3);
    }

    #[test]
    fn test_unlink_middle_and_ends() {
        let mut tree = Tree::new();
        let root = tree.root();
        let a = elem(&mut tree, root, Macro::Ar);
        let b = elem(&mut tree, root, Macro::Fl);
        let c = elem(&mut tree, root, Macro::Cm);
        tree.unlink(b);
        assert_eq!(names(&tree, root), vec!["Ar", "Cm"]);
        assert_eq!(tree.next(a), Some(c));
        assert_eq!(tree.prev(c), Some(a));
        tree.unlink(a);
        tree.unlink(c);
        assert_eq!(tree.first_child(root), None);
        assert_eq!(tree.last_child(root), None);
        assert_eq!(tree.child_count(root), 0);
        assert!(tree.contains(b));
    }

    #[test]
    fn test_delete_frees_subtree() {
        let mut tree = Tree::new();
        let root = tree.root();
        let a = elem(&mut tree, root, Macro::Ar);
        let word = tree.append_text(a, "file", Position::new(1, 4));
        tree.delete(a);
        assert!(!tree.contains(a));
        assert!(!tree.contains(word));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_move_after_and_before() {
        let mut tree = Tree::new();
        let root = tree.root();
        let a = elem(&mut tree, root, Macro::Ar);
        let b = elem(&mut tree, root, Macro::Fl);
        let c = elem(&mut tree, root, Macro::Cm);
        tree.move_after(a, c);
        assert_eq!(names(&tree, root), vec!["Fl", "Cm", "Ar"]);
        tree.move_before(a, b);
        assert_eq!(names(&tree, root), vec!["Ar", "Fl", "Cm"]);
        assert_eq!(tree.child_count(root), 3);
    }

    #[test]
    fn test_block_parts_registered_and_cleared() {
        let mut tree = Tree::new();
        let root = tree.root();
        let block = tree.alloc(Node::new(NodeKind::Block, Some(Macro::Sh), Position::new(1, 1)));
        tree.append_child(root, block);
        let head = tree.alloc(Node::new(NodeKind::Head, Some(Macro::Sh), Position::new(1, 1)));
        tree.append_child(block, head);
        let body = tree.alloc(Node::new(NodeKind::Body, Some(Macro::Sh), Position::new(1, 1)));
        tree.append_child(block, body);
        assert_eq!(tree[block].head(), Some(head));
        assert_eq!(tree[block].body(), Some(body));
        assert_eq!(tree.block_of(head), Some(block));
        tree.delete(body);
        assert_eq!(tree[block].body(), None);
    }

    #[test]
    fn test_end_marker_uses_pending_block() {
        let mut tree = Tree::new();
        let root = tree.root();
        let block = tree.alloc(Node::new(NodeKind::Block, Some(Macro::Bl), Position::new(1, 1)));
        tree.append_child(root, block);
        let mut marker = Node::new(NodeKind::Body, Some(Macro::Bl), Position::new(3, 1));
        marker.pending = Some(block);
        let marker = tree.alloc(marker);
        tree.append_child(root, marker);
        assert_eq!(tree.block_of(marker), Some(block));
        assert_eq!(tree[block].body(), None);
    }

    #[test]
    fn test_deroff() {
        let mut tree = Tree::new();
        let root = tree.root();
        let a = elem(&mut tree, root, Macro::Nm);
        tree.append_text(a, "  mandoc ", Position::new(1, 4));
        tree.append_text(a, "", Position::new(1, 4));
        tree.append_text(a, "tool", Position::new(1, 4));
        assert_eq!(tree.deroff(a).as_deref(), Some("mandoc tool"));
        let empty = elem(&mut tree, root, Macro::Nm);
        assert_eq!(tree.deroff(empty), None);
    }
}
