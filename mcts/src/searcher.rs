use engine::GameRules;
use generational_arena::Index;
use log::warn;

use crate::builder::BuildStrategy;
use crate::error::SearchError;
use crate::selector::Selector;
use crate::tree::Tree;

/// Turns a built tree into a move decision: the returned index is the root
/// child holding the chosen move.
pub trait Searcher<E: GameRules> {
    fn search_move(
        &mut self,
        rules: &E,
        tree: &mut Tree<E::Move, E::Board>,
    ) -> Result<Index, SearchError>;
}

/// Runs one full build against the root, then applies the selector to the
/// root's children. A terminal position fails before any building starts.
pub struct MoveSearcher<B, S> {
    build: B,
    selector: S,
}

impl<B, S> MoveSearcher<B, S> {
    pub fn new(build: B, selector: S) -> Self {
        Self { build, selector }
    }
}

impl<E, B, S> Searcher<E> for MoveSearcher<B, S>
where
    E: GameRules,
    B: BuildStrategy<E>,
    S: Selector<E::Move, E::Board>,
{
    fn search_move(
        &mut self,
        rules: &E,
        tree: &mut Tree<E::Move, E::Board>,
    ) -> Result<Index, SearchError> {
        let root = tree.root();

        {
            let node = tree.node(root);
            rules.legal_moves(node.board(), node.mov())?;
        }

        self.build.pass(rules, tree);

        let children = tree.node(root).children();
        if children.is_empty() {
            return Err(SearchError::FailedBuilding);
        }

        self.selector
            .select(tree, children)
            .ok_or(SearchError::FailedBuilding)
    }
}

/// Remembers the subtree under the move it chose last time. When the next
/// root arrives, the opponent's actual move is looked up among that
/// subtree's children and search resumes from there, keeping the
/// accumulated statistics. A miss means the opponent played a move this
/// searcher never explored; that is an error for the composition layer to
/// recover from.
pub struct ReusedSearcher<E, S>
where
    E: GameRules,
{
    base: S,
    previous: Option<Tree<E::Move, E::Board>>,
}

impl<E, S> ReusedSearcher<E, S>
where
    E: GameRules,
{
    pub fn new(base: S) -> Self {
        Self {
            base,
            previous: None,
        }
    }
}

impl<E, S> Searcher<E> for ReusedSearcher<E, S>
where
    E: GameRules,
    S: Searcher<E>,
{
    fn search_move(
        &mut self,
        rules: &E,
        tree: &mut Tree<E::Move, E::Board>,
    ) -> Result<Index, SearchError> {
        if let Some(previous) = self.previous.take() {
            let played = tree.node(tree.root()).mov().clone();

            match previous.child_with_move(previous.root(), &played) {
                Some(index) => *tree = previous.promote(index),
                None => return Err(SearchError::NotFoundPreviousMove),
            }
        }

        let chosen = self.base.search_move(rules, tree)?;
        self.previous = Some(tree.subtree(chosen));

        Ok(chosen)
    }
}

/// Composes two searchers: terminal-game signals from the primary pass
/// through untouched, while any other failure restores the tree and
/// retries from scratch with the fallback.
pub struct FallbackSearcher<P, F> {
    primary: P,
    fallback: F,
}

impl<P, F> FallbackSearcher<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<E, P, F> Searcher<E> for FallbackSearcher<P, F>
where
    E: GameRules,
    P: Searcher<E>,
    F: Searcher<E>,
{
    fn search_move(
        &mut self,
        rules: &E,
        tree: &mut Tree<E::Move, E::Board>,
    ) -> Result<Index, SearchError> {
        let snapshot = tree.clone();

        match self.primary.search_move(rules, tree) {
            Ok(chosen) => Ok(chosen),
            Err(error) if error.is_terminal() => Err(error),
            Err(error) => {
                warn!("primary search failed: {}; retrying with the fallback", error);
                *tree = snapshot;
                self.fallback.search_move(rules, tree)
            }
        }
    }
}
