use engine::GameRules;
use log::debug;

use common::fan_out_join;

use crate::terminator::Terminator;
use crate::tree::Tree;

/// Grows a search tree in place. A strategy's `pass` runs one or more MCTS
/// iterations against the root; strategies nest, so a pass of an outer
/// strategy may drive many passes of an inner one.
pub trait BuildStrategy<E: GameRules> {
    fn pass(&self, rules: &E, tree: &mut Tree<E::Move, E::Board>);
}

/// Repeats the inner strategy until the terminator fires. The terminator
/// is consulted before every pass with the index of the pass about to run.
pub struct IterativeBuilder<B, T> {
    inner: B,
    terminator: T,
}

impl<B, T> IterativeBuilder<B, T> {
    pub fn new(inner: B, terminator: T) -> Self {
        Self { inner, terminator }
    }
}

impl<E, B, T> BuildStrategy<E> for IterativeBuilder<B, T>
where
    E: GameRules,
    B: BuildStrategy<E>,
    T: Terminator,
{
    fn pass(&self, rules: &E, tree: &mut Tree<E::Move, E::Board>) {
        let mut pass_index = 0;

        while !self.terminator.is_building_terminated(pass_index) {
            self.inner.pass(rules, tree);
            pass_index += 1;
        }
    }
}

/// Runs the inner strategy to completion on private shallow copies of the
/// root, one per worker, then folds every copy back into the original
/// root. Workers share no tree state, so the fan-out needs no locking;
/// only the fold touches the shared root, single-threaded after the join.
/// Every copy receives the inner strategy's full budget.
pub struct ParallelBuilder<B> {
    inner: B,
    concurrency: usize,
}

impl<B> ParallelBuilder<B> {
    pub fn new(inner: B, concurrency: usize) -> Self {
        Self { inner, concurrency }
    }
}

impl<E, B> BuildStrategy<E> for ParallelBuilder<B>
where
    E: GameRules + Sync,
    E::Move: Send + Sync,
    E::Board: Send + Sync,
    B: BuildStrategy<E> + Sync,
{
    fn pass(&self, rules: &E, tree: &mut Tree<E::Move, E::Board>) {
        let copies = (0..self.concurrency)
            .map(|_| tree.shallow_copy())
            .collect::<Vec<_>>();

        let built = fan_out_join(copies, |mut copy| {
            self.inner.pass(rules, &mut copy);
            copy
        });

        debug!("folding {} build replicas into the root", built.len());
        for replica in built {
            tree.merge(replica);
        }
    }
}
