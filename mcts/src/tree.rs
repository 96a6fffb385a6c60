use generational_arena::{Arena, Index};
use itertools::{EitherOrBoth, Itertools};

use crate::node::Node;
use crate::node_state::NodeState;

/// Arena-backed search tree. Node relations are expressed as arena
/// indices, so a child's back-reference to its parent carries no
/// ownership and the structure stays acyclic from the borrow checker's
/// point of view.
#[derive(Clone, Debug)]
pub struct Tree<M, B> {
    arena: Arena<Node<M, B>>,
    root: Index,
}

impl<M, B> Tree<M, B> {
    pub fn new(mov: M, board: B) -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(Node::new(mov, board, None));

        Self { arena, root }
    }

    pub fn root(&self) -> Index {
        self.root
    }

    pub fn node(&self, index: Index) -> &Node<M, B> {
        &self.arena[index]
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Appends a child produced by expansion. Children keep the order in
    /// which they are added.
    pub fn add_child(&mut self, parent: Index, mov: M, board: B) -> Index {
        let child = self.arena.insert(Node::new(mov, board, Some(parent)));
        self.arena[parent].push_child(child);

        child
    }

    /// Backpropagation: adds `state` to the node, then walks up the parent
    /// chain adding the inverted record at each level, since every ply
    /// flips perspective.
    pub fn update_state(&mut self, index: Index, state: NodeState) {
        let mut current = Some(index);
        let mut state = state;

        while let Some(node_index) = current {
            let node = &mut self.arena[node_index];
            node.state_mut().update(&state);

            current = node.parent();
            state = state.invert();
        }
    }
}

impl<M, B> Tree<M, B>
where
    M: Clone,
    B: Clone,
{
    /// A fresh single-node tree carrying only the root's move and board.
    /// Seeds the private replicas a parallel build runs on.
    pub fn shallow_copy(&self) -> Self {
        let root = self.node(self.root);

        Self::new(root.mov().clone(), root.board().clone())
    }

    /// Folds another tree built from the same root position into this one.
    /// Child groups are combined positionally; the per-pair summation is
    /// associative and commutative, so the aggregate is independent of the
    /// order trees are folded in.
    pub fn merge(&mut self, other: Tree<M, B>) {
        let other_root_state = *other.node(other.root).state();
        self.arena[self.root].state_mut().update(&other_root_state);

        self.merge_children(self.root, &other, other.root);
    }

    fn merge_children(&mut self, into: Index, other: &Tree<M, B>, from: Index) {
        if self.arena[into].is_leaf() {
            for &donor in other.node(from).children() {
                self.adopt_subtree(other, donor, into);
            }
            return;
        }

        let pairs = self.arena[into]
            .children()
            .iter()
            .copied()
            .zip_longest(other.node(from).children().iter().copied())
            .collect::<Vec<_>>();

        for pair in pairs {
            match pair {
                EitherOrBoth::Both(receiver, donor) => {
                    let donor_state = *other.node(donor).state();
                    self.arena[receiver].state_mut().update(&donor_state);
                    self.merge_children(receiver, other, donor);
                }
                EitherOrBoth::Left(_) => {}
                EitherOrBoth::Right(donor) => {
                    self.adopt_subtree(other, donor, into);
                }
            }
        }
    }

    /// Copies a subtree out of another arena, reparenting its root to
    /// `parent` here.
    fn adopt_subtree(&mut self, other: &Tree<M, B>, from: Index, parent: Index) -> Index {
        let donor = other.node(from);
        let adopted = self.arena.insert(Node::with_state(
            donor.mov().clone(),
            donor.board().clone(),
            *donor.state(),
            Some(parent),
        ));
        self.arena[parent].push_child(adopted);

        for &child in other.node(from).children() {
            self.adopt_subtree(other, child, adopted);
        }

        adopted
    }

    /// Re-roots the tree at a descendant, keeping that subtree's
    /// accumulated statistics and pruning every abandoned branch from the
    /// arena.
    pub fn promote(mut self, new_root: Index) -> Self {
        self.arena[new_root].set_parent(None);
        Self::remove_branch(&mut self.arena, self.root, new_root);
        self.root = new_root;

        self
    }

    fn remove_branch(arena: &mut Arena<Node<M, B>>, index: Index, keep: Index) {
        if index == keep {
            return;
        }

        let children = arena[index].children().to_vec();
        arena.remove(index);

        for child in children {
            Self::remove_branch(arena, child, keep);
        }
    }

    /// Clones the subtree under `index` into a tree of its own.
    pub fn subtree(&self, index: Index) -> Self {
        let source = self.node(index);

        let mut arena = Arena::new();
        let root = arena.insert(Node::with_state(
            source.mov().clone(),
            source.board().clone(),
            *source.state(),
            None,
        ));

        let mut tree = Self { arena, root };
        for &child in source.children() {
            tree.adopt_subtree(self, child, root);
        }

        tree
    }
}

impl<M, B> Tree<M, B>
where
    M: PartialEq,
{
    pub fn child_with_move(&self, parent: Index, mov: &M) -> Option<Index> {
        self.node(parent)
            .children()
            .iter()
            .copied()
            .find(|&child| self.node(child).mov() == mov)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf_states(tree: &Tree<u8, ()>, parent: Index) -> Vec<NodeState> {
        tree.node(parent)
            .children()
            .iter()
            .map(|&child| *tree.node(child).state())
            .collect()
    }

    #[test]
    fn test_update_state_inverts_per_ply() {
        let mut tree = Tree::new(0u8, ());
        let child = tree.add_child(tree.root(), 1, ());
        let grandchild = tree.add_child(child, 2, ());

        tree.update_state(grandchild, NodeState::with_counts(1, 1));

        assert_eq!(
            *tree.node(grandchild).state(),
            NodeState::with_counts(1, 1)
        );
        assert_eq!(*tree.node(child).state(), NodeState::with_counts(1, 0));
        assert_eq!(*tree.node(tree.root()).state(), NodeState::with_counts(1, 1));
    }

    #[test]
    fn test_merge_sums_matching_children_pairwise() {
        let mut left = Tree::new(0u8, ());
        let left_a = left.add_child(left.root(), 1, ());
        let left_b = left.add_child(left.root(), 2, ());
        left.update_state(left_a, NodeState::with_counts(3, 2));
        left.update_state(left_b, NodeState::with_counts(2, 0));

        let mut right = Tree::new(0u8, ());
        let right_a = right.add_child(right.root(), 1, ());
        let right_b = right.add_child(right.root(), 2, ());
        right.update_state(right_a, NodeState::with_counts(4, 1));
        right.update_state(right_b, NodeState::with_counts(1, 1));

        left.merge(right);

        assert_eq!(
            leaf_states(&left, left.root()),
            vec![NodeState::with_counts(7, 3), NodeState::with_counts(3, 1)]
        );
    }

    #[test]
    fn test_merge_into_childless_root_adopts_and_reparents() {
        let mut receiver: Tree<u8, ()> = Tree::new(0, ());

        let mut donor = Tree::new(0u8, ());
        let donor_a = donor.add_child(donor.root(), 1, ());
        donor.add_child(donor_a, 3, ());
        donor.add_child(donor.root(), 2, ());
        donor.update_state(donor_a, NodeState::with_counts(5, 4));

        receiver.merge(donor);

        let root = receiver.root();
        let children = receiver.node(root).children().to_vec();
        assert_eq!(children.len(), 2);

        let adopted_a = children[0];
        assert_eq!(*receiver.node(adopted_a).mov(), 1);
        assert_eq!(*receiver.node(adopted_a).state(), NodeState::with_counts(5, 4));
        assert_eq!(receiver.node(adopted_a).parent(), Some(root));
        assert_eq!(receiver.node(adopted_a).children().len(), 1);

        let adopted_b = children[1];
        assert_eq!(*receiver.node(adopted_b).mov(), 2);
        assert_eq!(receiver.node(adopted_b).parent(), Some(root));
    }

    #[test]
    fn test_merge_root_states_aggregate() {
        let mut left: Tree<u8, ()> = Tree::new(0, ());
        left.update_state(left.root(), NodeState::with_counts(4, 3));

        let mut right: Tree<u8, ()> = Tree::new(0, ());
        right.update_state(right.root(), NodeState::with_counts(6, 1));

        left.merge(right);

        assert_eq!(*left.node(left.root()).state(), NodeState::with_counts(10, 4));
    }

    #[test]
    fn test_shallow_copy_resets_state_and_children() {
        let mut tree = Tree::new(7u8, ());
        tree.add_child(tree.root(), 1, ());
        tree.update_state(tree.root(), NodeState::with_counts(3, 1));

        let copy = tree.shallow_copy();

        assert_eq!(copy.len(), 1);
        assert_eq!(*copy.node(copy.root()).mov(), 7);
        assert_eq!(*copy.node(copy.root()).state(), NodeState::new());
        assert!(copy.node(copy.root()).is_leaf());
    }

    #[test]
    fn test_promote_keeps_subtree_and_prunes_the_rest() {
        let mut tree = Tree::new(0u8, ());
        let keep = tree.add_child(tree.root(), 1, ());
        let discard = tree.add_child(tree.root(), 2, ());
        let kept_leaf = tree.add_child(keep, 3, ());
        tree.add_child(discard, 4, ());
        tree.update_state(kept_leaf, NodeState::with_counts(2, 2));

        let promoted = tree.promote(keep);

        assert_eq!(promoted.len(), 2);
        assert_eq!(*promoted.node(promoted.root()).mov(), 1);
        assert_eq!(promoted.node(promoted.root()).parent(), None);

        let leaf = promoted.node(promoted.root()).children()[0];
        assert_eq!(*promoted.node(leaf).mov(), 3);
        assert_eq!(*promoted.node(leaf).state(), NodeState::with_counts(2, 2));
    }

    #[test]
    fn test_subtree_clone_preserves_statistics() {
        let mut tree = Tree::new(0u8, ());
        let child = tree.add_child(tree.root(), 1, ());
        let grandchild = tree.add_child(child, 2, ());
        tree.update_state(grandchild, NodeState::with_counts(3, 1));

        let sub = tree.subtree(child);

        assert_eq!(sub.len(), 2);
        assert_eq!(*sub.node(sub.root()).state(), *tree.node(child).state());
        assert_eq!(sub.node(sub.root()).parent(), None);

        // The original is untouched.
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_child_with_move_finds_matching_child() {
        let mut tree = Tree::new(0u8, ());
        tree.add_child(tree.root(), 1, ());
        let wanted = tree.add_child(tree.root(), 2, ());

        assert_eq!(tree.child_with_move(tree.root(), &2), Some(wanted));
        assert_eq!(tree.child_with_move(tree.root(), &9), None);
    }
}
