use generational_arena::Index;
use parking_lot::Mutex;
use rand::Rng;

use crate::scorer::Scorer;
use crate::tree::Tree;

/// Picks one node out of an ordered group.
pub trait Selector<M, B> {
    fn select(&self, tree: &Tree<M, B>, group: &[Index]) -> Option<Index>;
}

/// Scans the group tracking a running maximum and keeps the first node
/// whose score strictly exceeds it. Ties therefore resolve to the
/// earliest-encountered node; descent depends on that being deterministic.
#[derive(Clone, Copy, Debug)]
pub struct MaximalSelector<S> {
    scorer: S,
}

impl<S> MaximalSelector<S> {
    pub fn new(scorer: S) -> Self {
        Self { scorer }
    }
}

impl<M, B, S> Selector<M, B> for MaximalSelector<S>
where
    S: Scorer<M, B>,
{
    fn select(&self, tree: &Tree<M, B>, group: &[Index]) -> Option<Index> {
        let mut best = None;
        let mut best_score = f64::NEG_INFINITY;

        for &candidate in group {
            let score = self.scorer.score(tree, candidate);
            if score > best_score {
                best_score = score;
                best = Some(candidate);
            }
        }

        best
    }
}

/// Uniformly random choice. The generator is injected for reproducibility
/// and sits behind a mutex so one selector instance can serve concurrent
/// build workers.
#[derive(Debug)]
pub struct RandomSelector<R> {
    rng: Mutex<R>,
}

impl<R> RandomSelector<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl<M, B, R> Selector<M, B> for RandomSelector<R>
where
    R: Rng,
{
    fn select(&self, _tree: &Tree<M, B>, group: &[Index]) -> Option<Index> {
        if group.is_empty() {
            return None;
        }

        let chosen = self.rng.lock().gen_range(0..group.len());

        Some(group[chosen])
    }
}
