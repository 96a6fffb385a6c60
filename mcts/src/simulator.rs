use engine::GameRules;
use parking_lot::Mutex;
use rand::Rng;

use common::fan_out_join_n;

use crate::game_result::GameResult;
use crate::node_state::NodeState;

/// Estimates the outcome of the position a leaf node holds. The returned
/// record is expressed from the perspective of the side to move at the
/// leaf.
pub trait Simulator<E: GameRules> {
    fn simulate(&self, rules: &E, mov: &E::Move, board: &E::Board) -> NodeState;
}

/// Chooses the next move during a rollout.
pub trait MoveSelector<M> {
    fn select_move<'a>(&self, moves: &'a [M]) -> Option<&'a M>;
}

/// Uniformly random rollout moves from an injected generator.
#[derive(Debug)]
pub struct RandomMoveSelector<R> {
    rng: Mutex<R>,
}

impl<R> RandomMoveSelector<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl<M, R> MoveSelector<M> for RandomMoveSelector<R>
where
    R: Rng,
{
    fn select_move<'a>(&self, moves: &'a [M]) -> Option<&'a M> {
        if moves.is_empty() {
            return None;
        }

        let chosen = self.rng.lock().gen_range(0..moves.len());

        Some(&moves[chosen])
    }
}

/// Plays the position out move by move until the rules collaborator raises
/// a terminal signal, then converts that signal into a single-game record.
pub struct RolloutSimulator<P> {
    move_selector: P,
}

impl<P> RolloutSimulator<P> {
    pub fn new(move_selector: P) -> Self {
        Self { move_selector }
    }
}

impl<E, P> Simulator<E> for RolloutSimulator<P>
where
    E: GameRules,
    P: MoveSelector<E::Move>,
{
    fn simulate(&self, rules: &E, mov: &E::Move, board: &E::Board) -> NodeState {
        let leaf_to_move = rules.move_color(mov).negate();
        let mut board = board.clone();
        let mut prev = mov.clone();

        loop {
            let to_move = rules.move_color(&prev).negate();

            let result = match rules.legal_moves(&board, &prev) {
                Err(signal) => GameResult::from(signal),
                Ok(moves) => match self.move_selector.select_move(&moves) {
                    Some(next) => {
                        board = rules.apply_move(&board, next);
                        prev = next.clone();
                        continue;
                    }
                    // An empty legal list without a terminal signal: the
                    // side to move has nothing to play, which counts
                    // against it.
                    None => GameResult::Loss,
                },
            };

            // The signal speaks for the side to move where the playout
            // ended; re-express it for the side to move at the leaf.
            let result = if to_move == leaf_to_move {
                result
            } else {
                result.invert()
            };

            return NodeState::from(result);
        }
    }
}

/// Fans `concurrency` independent rollouts of the inner simulator out
/// against the same position and sums the records: more simulated games,
/// not a majority vote.
pub struct ParallelSimulator<S> {
    inner: S,
    concurrency: usize,
}

impl<S> ParallelSimulator<S> {
    pub fn new(inner: S, concurrency: usize) -> Self {
        Self { inner, concurrency }
    }
}

impl<E, S> Simulator<E> for ParallelSimulator<S>
where
    E: GameRules + Sync,
    E::Move: Sync,
    E::Board: Sync,
    S: Simulator<E> + Sync,
{
    fn simulate(&self, rules: &E, mov: &E::Move, board: &E::Board) -> NodeState {
        let results = fan_out_join_n(self.concurrency, |_| self.inner.simulate(rules, mov, board));

        let mut total = NodeState::new();
        for result in &results {
            total.update(result);
        }

        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filling_game::{board, FillingRules, Placement};
    use common::create_rng_from_seed;
    use engine::Color;

    fn rollout() -> RolloutSimulator<RandomMoveSelector<rand::rngs::StdRng>> {
        RolloutSimulator::new(RandomMoveSelector::new(create_rng_from_seed(3)))
    }

    #[test]
    fn test_rollout_reads_a_win_signal_directly() {
        // Board full, white majority, black moved last: white is to move
        // at the leaf and has already won.
        let full = board(&[4], &[0, 1, 2, 3, 5, 6, 7, 8]);
        let last = Placement::new(Color::Black, 4);

        let state = rollout().simulate(&FillingRules::new(), &last, &full);

        assert_eq!(state, NodeState::with_counts(1, 1));
    }

    #[test]
    fn test_rollout_reads_a_loss_signal_directly() {
        // Same full board, but white moved last: black is to move at the
        // leaf and white holds the majority.
        let full = board(&[4], &[0, 1, 2, 3, 5, 6, 7, 8]);
        let last = Placement::new(Color::White, 0);

        let state = rollout().simulate(&FillingRules::new(), &last, &full);

        assert_eq!(state, NodeState::with_counts(1, 0));
    }

    #[test]
    fn test_rollout_plays_out_and_inverts_the_far_signal() {
        // One empty cell. Black, to move at the leaf, fills it; the
        // terminal signal then speaks for white and must be inverted back
        // to the leaf's perspective.
        let open = board(&[], &[0, 1, 2, 3, 4, 5, 6, 7]);
        let last = Placement::new(Color::White, 0);

        let state = rollout().simulate(&FillingRules::new(), &last, &open);

        assert_eq!(state, NodeState::with_counts(1, 0));
    }

    #[test]
    fn test_parallel_simulator_sums_records() {
        let full = board(&[4], &[0, 1, 2, 3, 5, 6, 7, 8]);
        let last = Placement::new(Color::Black, 4);

        let simulator = ParallelSimulator::new(rollout(), 8);
        let state = simulator.simulate(&FillingRules::new(), &last, &full);

        assert_eq!(state, NodeState::with_counts(8, 8));
    }
}
