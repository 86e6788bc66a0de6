//! Generic game-tree search: minimax and negamax, each with and without
//! alpha-beta pruning.
//!
//! The algorithms are parametric over node, move, and player types so any
//! two-player zero-sum game can instantiate them. Accumulators live in the
//! [`Extended`] domain, which keeps "no child seen yet" representable
//! without sentinel integers.

use crate::extended::Extended;

/// Counters filled in by every search call.
///
/// This is the observability hook: callers that care about visited nodes
/// or cutoff behavior read these instead of the search printing anything.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes entered, including the root.
    pub nodes: u64,
    /// Nodes evaluated with the heuristic (depth exhausted or terminal).
    pub leaves: u64,
    /// Branches abandoned by an alpha-beta cutoff.
    pub cutoffs: u64,
    /// Times negamax found no moves at a node its rules did not call
    /// terminal. Nonzero means move generation and the terminal test
    /// disagree; the node is scored as a leaf instead of crashing.
    pub fallback_leaves: u64,
}

/// Rules bundle for the move-selecting searches.
///
/// `apply` is only ever called with moves returned by `moves`, so
/// implementations may skip validation there. `moves` must enumerate in a
/// deterministic order: ties between equally scored moves are broken by
/// keeping the first one encountered.
pub trait GameSpec {
    type Node: Clone;
    type Move: Copy;
    type Player: Copy;

    fn moves(&self, node: &Self::Node) -> Vec<Self::Move>;
    fn apply(&self, player: Self::Player, node: &Self::Node, mv: Self::Move) -> Self::Node;
    /// Score of `node` from `player`'s perspective. Higher is better.
    fn score(&self, player: Self::Player, node: &Self::Node) -> i32;
    fn is_terminal(&self, node: &Self::Node) -> bool;
    fn opponent(&self, player: Self::Player) -> Self::Player;
}

/// Plain minimax value search, no move selection.
///
/// Descends until `depth == 0` or a childless node and returns the
/// heuristic there. Maximizing layers fold with `max` seeded at `NegInf`,
/// minimizing layers with `min` seeded at `PosInf`.
pub fn minimax<N>(
    node: &N,
    depth: u8,
    maximizing: bool,
    heuristic: &impl Fn(&N) -> i32,
    children: &impl Fn(&N) -> Vec<N>,
    stats: &mut SearchStats,
) -> Extended<i32> {
    stats.nodes += 1;

    if depth == 0 {
        stats.leaves += 1;
        return Extended::Value(heuristic(node));
    }

    let kids = children(node);
    if kids.is_empty() {
        stats.leaves += 1;
        return Extended::Value(heuristic(node));
    }

    if maximizing {
        let mut best = Extended::NegInf;
        for child in &kids {
            best = best.max(minimax(child, depth - 1, false, heuristic, children, stats));
        }
        best
    } else {
        let mut best = Extended::PosInf;
        for child in &kids {
            best = best.min(minimax(child, depth - 1, true, heuristic, children, stats));
        }
        best
    }
}

/// Minimax threading an `(alpha, beta)` window.
///
/// `alpha` is the best value the maximizer can already guarantee, `beta`
/// the best for the minimizer. Sibling enumeration stops as soon as
/// `alpha >= beta`: a beta-cutoff on the maximizing side, an alpha-cutoff
/// on the minimizing side. Pruning never changes the result, only the
/// number of nodes visited.
#[allow(clippy::too_many_arguments)]
pub fn minimax_alpha_beta<N>(
    node: &N,
    depth: u8,
    mut alpha: Extended<i32>,
    mut beta: Extended<i32>,
    maximizing: bool,
    heuristic: &impl Fn(&N) -> i32,
    children: &impl Fn(&N) -> Vec<N>,
    stats: &mut SearchStats,
) -> Extended<i32> {
    stats.nodes += 1;

    if depth == 0 {
        stats.leaves += 1;
        return Extended::Value(heuristic(node));
    }

    let kids = children(node);
    if kids.is_empty() {
        stats.leaves += 1;
        return Extended::Value(heuristic(node));
    }

    if maximizing {
        let mut best = Extended::NegInf;
        for child in &kids {
            best = best.max(minimax_alpha_beta(
                child,
                depth - 1,
                alpha,
                beta,
                false,
                heuristic,
                children,
                stats,
            ));
            alpha = alpha.max(best);
            if alpha >= beta {
                stats.cutoffs += 1;
                break; // Beta cutoff
            }
        }
        best
    } else {
        let mut best = Extended::PosInf;
        for child in &kids {
            best = best.min(minimax_alpha_beta(
                child,
                depth - 1,
                alpha,
                beta,
                true,
                heuristic,
                children,
                stats,
            ));
            beta = beta.min(best);
            if alpha >= beta {
                stats.cutoffs += 1;
                break; // Alpha cutoff
            }
        }
        best
    }
}

/// Negamax move selection without pruning.
///
/// Exploits the zero-sum symmetry `value(player) = -value(opponent)`: each
/// root move is applied, the child searched at `depth - 1` for the
/// opponent, and the negated value compared. The strictly-greater test
/// keeps the first move encountered on ties, making results reproducible
/// for a deterministic `moves` order.
///
/// Returns `None` when there are no legal moves. That is game over, not a
/// failure.
pub fn negamax<G: GameSpec>(
    game: &G,
    player: G::Player,
    node: &G::Node,
    depth: u8,
    stats: &mut SearchStats,
) -> Option<(G::Move, Extended<i32>)> {
    stats.nodes += 1;

    let moves = game.moves(node);
    if moves.is_empty() {
        return None;
    }

    let opponent = game.opponent(player);
    let mut best = Extended::NegInf;
    let mut best_move = None;

    for mv in moves {
        let child = game.apply(player, node, mv);
        let value = -negamax_value(game, opponent, &child, depth.saturating_sub(1), stats);
        if value > best {
            best = value;
            best_move = Some(mv);
        }
    }

    best_move.map(|mv| (mv, best))
}

fn negamax_value<G: GameSpec>(
    game: &G,
    player: G::Player,
    node: &G::Node,
    depth: u8,
    stats: &mut SearchStats,
) -> Extended<i32> {
    stats.nodes += 1;

    // The leaf scores the current node for the player to move; negation
    // happens one level up, in the caller.
    if depth == 0 || game.is_terminal(node) {
        stats.leaves += 1;
        return Extended::Value(game.score(player, node));
    }

    let moves = game.moves(node);
    if moves.is_empty() {
        // Rules said non-terminal but produced no moves. Score here and
        // record it; tests watch this counter.
        stats.fallback_leaves += 1;
        stats.leaves += 1;
        return Extended::Value(game.score(player, node));
    }

    let opponent = game.opponent(player);
    let mut best = Extended::NegInf;
    for mv in moves {
        let child = game.apply(player, node, mv);
        best = best.max(-negamax_value(game, opponent, &child, depth - 1, stats));
    }
    best
}

/// Negamax with alpha-beta window narrowing.
///
/// Recursive calls receive `(-beta, -alpha)`. Children are pre-sorted
/// best-first by the immediate score of the resulting position, which
/// maximizes the chance of an early cutoff; the sort is stable, so the
/// first-in-generation-order tie-break is preserved.
pub fn negamax_alpha_beta<G: GameSpec>(
    game: &G,
    player: G::Player,
    node: &G::Node,
    depth: u8,
    stats: &mut SearchStats,
) -> Option<(G::Move, Extended<i32>)> {
    stats.nodes += 1;

    let mut moves = game.moves(node);
    if moves.is_empty() {
        return None;
    }
    order_moves(game, player, node, &mut moves);

    let opponent = game.opponent(player);
    let beta = Extended::PosInf;
    let mut alpha = Extended::NegInf;
    let mut best = Extended::NegInf;
    let mut best_move = None;

    for mv in moves {
        let child = game.apply(player, node, mv);
        let value = -negamax_alpha_beta_value(
            game,
            opponent,
            &child,
            depth.saturating_sub(1),
            -beta,
            -alpha,
            stats,
        );
        if value > best {
            best = value;
            best_move = Some(mv);
        }
        alpha = alpha.max(value);
        if alpha >= beta {
            stats.cutoffs += 1;
            break;
        }
    }

    best_move.map(|mv| (mv, best))
}

fn negamax_alpha_beta_value<G: GameSpec>(
    game: &G,
    player: G::Player,
    node: &G::Node,
    depth: u8,
    mut alpha: Extended<i32>,
    beta: Extended<i32>,
    stats: &mut SearchStats,
) -> Extended<i32> {
    stats.nodes += 1;

    if depth == 0 || game.is_terminal(node) {
        stats.leaves += 1;
        return Extended::Value(game.score(player, node));
    }

    let mut moves = game.moves(node);
    if moves.is_empty() {
        stats.fallback_leaves += 1;
        stats.leaves += 1;
        return Extended::Value(game.score(player, node));
    }
    order_moves(game, player, node, &mut moves);

    let opponent = game.opponent(player);
    let mut best = Extended::NegInf;
    for mv in moves {
        let child = game.apply(player, node, mv);
        best = best.max(-negamax_alpha_beta_value(
            game,
            opponent,
            &child,
            depth - 1,
            -beta,
            -alpha,
            stats,
        ));
        alpha = alpha.max(best);
        if alpha >= beta {
            stats.cutoffs += 1;
            break;
        }
    }
    best
}

/// Sorts moves so the highest immediate score for `player` comes first.
/// Stable: equally scored moves keep their generation order.
fn order_moves<G: GameSpec>(game: &G, player: G::Player, node: &G::Node, moves: &mut [G::Move]) {
    moves.sort_by_cached_key(|&mv| {
        std::cmp::Reverse(game.score(player, &game.apply(player, node, mv)))
    });
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
