//! Bibliographic references (`Rs` blocks)
//!
//! Renderers expect the `%` fields of a reference in a fixed order, so the
//! body of an `Rs` block is sorted once it is complete.

use super::{Comparison, Validator};
use crate::mdoc::ast::{Macro, NodeId, NodeKind, Tree};
use crate::mdoc::diagnostics::{DiagnosticCode, DiagnosticSeverity, DiagnosticSink};
use crate::mdoc::error::ValidationResult;

const ORDER: [Macro; 14] = [
    Macro::RefA,
    Macro::RefT,
    Macro::RefB,
    Macro::RefI,
    Macro::RefJ,
    Macro::RefR,
    Macro::RefN,
    Macro::RefV,
    Macro::RefU,
    Macro::RefP,
    Macro::RefQ,
    Macro::RefC,
    Macro::RefD,
    Macro::RefO,
];

/// Sort rank of a reference field; `None` for anything else.
pub fn rank(tok: Option<Macro>) -> Option<usize> {
    let tok = tok?;
    ORDER.iter().position(|m| *m == tok)
}

/// Unknown children sort before every known field.
fn sort_key(tree: &Tree, id: NodeId) -> isize {
    rank(tree[id].tok).map_or(-1, |r| r as isize)
}

/// Stable insertion sort of the children of `parent` by reference rank.
pub fn sort_references(tree: &mut Tree, parent: NodeId) {
    let mut next = tree.first_child(parent).and_then(|first| tree.next(first));
    while let Some(current) = next {
        next = tree.next(current);
        let key = sort_key(tree, current);
        let mut prev = tree.prev(current);
        tree.unlink(current);
        while let Some(p) = prev {
            if sort_key(tree, p) <= key {
                break;
            }
            prev = tree.prev(p);
        }
        match prev {
            Some(p) => tree.insert_after(p, current),
            None => tree.prepend_child(parent, current),
        }
    }
}

impl<S: DiagnosticSink> Validator<S> {
    pub(crate) fn post_rs(&mut self, id: NodeId) -> ValidationResult {
        match self.tree[id].kind {
            NodeKind::Head => {
                self.check_count(id, NodeKind::Head, DiagnosticSeverity::Warning, Comparison::Eq, 0);
                return Ok(());
            }
            NodeKind::Body if self.tree.first_child(id).is_none() => {
                self.check_count(id, NodeKind::Body, DiagnosticSeverity::Warning, Comparison::Gt, 0);
                return Ok(());
            }
            NodeKind::Body => {}
            _ => return Ok(()),
        }

        let children: Vec<NodeId> = self.tree.children(id).collect();
        let mut quoted = 0;
        for child in children {
            let node = &self.tree[child];
            match node.tok {
                Some(Macro::RefJ | Macro::RefB) => quoted += 1,
                tok if rank(tok).is_none() => {
                    let (pos, label) = (node.pos, node.label());
                    self.emit(DiagnosticCode::ReferenceBad, pos, label);
                }
                _ => {}
            }
        }
        if let Some(block) = self.tree.block_of(id) {
            self.tree[block].reference_mut().quote_titles += quoted;
        }
        sort_references(&mut self.tree, id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mdoc::ast::{Node, Position};
    use proptest::prelude::*;

    fn build(toks: &[Option<Macro>]) -> (Tree, NodeId) {
        let mut tree = Tree::new();
        let root = tree.root();
        for tok in toks {
            let node = match tok {
                Some(tok) => Node::new(NodeKind::Elem, Some(*tok), Position::new(1, 1)),
                None => Node::text("stray", Position::new(1, 1)),
            };
            let id = tree.alloc(node);
            tree.append_child(root, id);
        }
        (tree, root)
    }

    fn toks(tree: &Tree, parent: NodeId) -> Vec<Option<Macro>> {
        tree.children(parent).map(|c| tree[c].tok).collect()
    }

    #[test]
    fn test_sorts_into_canonical_order() {
        let (mut tree, root) = build(&[
            Some(Macro::Em),
            Some(Macro::RefD),
            Some(Macro::RefA),
            Some(Macro::RefT),
        ]);
        sort_references(&mut tree, root);
        assert_eq!(
            toks(&tree, root),
            vec![
                Some(Macro::Em),
                Some(Macro::RefA),
                Some(Macro::RefT),
                Some(Macro::RefD)
            ]
        );
    }

    #[test]
    fn test_equal_ranks_keep_their_order() {
        let (mut tree, root) = build(&[Some(Macro::RefT), Some(Macro::RefA), Some(Macro::RefA)]);
        let before: Vec<NodeId> = tree.children(root).collect();
        sort_references(&mut tree, root);
        let after: Vec<NodeId> = tree.children(root).collect();
        assert_eq!(after, vec![before[1], before[2], before[0]]);
    }

    fn any_field() -> impl Strategy<Value = Option<Macro>> {
        prop_oneof![
            Just(None),
            Just(Some(Macro::Em)),
            proptest::sample::select(ORDER.to_vec()).prop_map(Some),
        ]
    }

    proptest! {
        #[test]
        fn sorted_output_is_ordered_and_stable_under_resort(fields in proptest::collection::vec(any_field(), 0..12)) {
            let (mut tree, root) = build(&fields);
            sort_references(&mut tree, root);
            let ids: Vec<NodeId> = tree.children(root).collect();
            prop_assert_eq!(ids.len(), fields.len());
            prop_assert_eq!(tree.child_count(root), fields.len());
            let keys: Vec<isize> = ids.iter().map(|id| sort_key(&tree, *id)).collect();
            prop_assert!(keys.windows(2).all(|w| w[0] <= w[1]));
            sort_references(&mut tree, root);
            let again: Vec<NodeId> = tree.children(root).collect();
            prop_assert_eq!(again, ids);
        }
    }
}
