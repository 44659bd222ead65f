//! Minimax search with alpha-beta pruning over board copies.
//!
//! Scores are from the mover's point of view: `WIN_SCORE - depth` for a win,
//! `LOSS_SCORE + depth` for a loss and `DRAW_SCORE` for a draw, where `depth`
//! is 0 for the position right after the root move. Faster wins and slower
//! losses therefore score strictly better.

use super::board::Board;
use super::types::{Mark, Position};

pub const WIN_SCORE: i32 = 10;
pub const LOSS_SCORE: i32 = -10;
pub const DRAW_SCORE: i32 = 0;

const SCORE_BOUND: i32 = 1_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchDepth {
    Full,
    /// Lookahead in plies, counting the root move as the first ply.
    Limited(usize),
}

impl SearchDepth {
    fn reaches_horizon(&self, depth: usize) -> bool {
        match self {
            SearchDepth::Full => false,
            SearchDepth::Limited(plies) => depth + 1 >= *plies,
        }
    }
}

impl From<Option<usize>> for SearchDepth {
    fn from(limit: Option<usize>) -> Self {
        limit.map_or(SearchDepth::Full, SearchDepth::Limited)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchOptions {
    pub depth: SearchDepth,
    pub pruning: bool,
}

impl SearchOptions {
    pub fn full() -> Self {
        Self {
            depth: SearchDepth::Full,
            pruning: true,
        }
    }

    pub fn limited(plies: usize) -> Self {
        Self {
            depth: SearchDepth::Limited(plies),
            pruning: true,
        }
    }

    pub fn without_pruning(self) -> Self {
        Self {
            pruning: false,
            ..self
        }
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self::full()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub cutoffs: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchOutcome {
    /// `None` when the board has no empty cell.
    pub best_move: Option<Position>,
    pub score: i32,
    pub stats: SearchStats,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoredMove {
    pub position: Position,
    pub score: i32,
}

/// How a leaf of the search tree was scored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Leaf {
    /// Game over; exact score adjusted by depth.
    Terminal(i32),
    /// Depth cap reached on a live position; static evaluation only.
    Horizon(i32),
}

impl Leaf {
    fn score(self) -> i32 {
        match self {
            Leaf::Terminal(score) | Leaf::Horizon(score) => score,
        }
    }
}

/// Line and fill status only, no lookahead and no depth adjustment.
pub fn static_evaluate(board: &Board, mover: Mark, opponent: Mark) -> i32 {
    if board.has_line(mover) {
        WIN_SCORE
    } else if board.has_line(opponent) {
        LOSS_SCORE
    } else {
        DRAW_SCORE
    }
}

/// First cell in row-major order that completes a line for `mark`.
pub fn find_winning_move(board: &Board, mark: Mark) -> Option<Position> {
    board.legal_moves().into_iter().find(|&position| {
        board
            .with_move(position, mark)
            .is_some_and(|next| next.has_line(mark))
    })
}

struct Searcher {
    mover: Mark,
    opponent: Mark,
    options: SearchOptions,
    stats: SearchStats,
}

impl Searcher {
    fn new(mover: Mark, opponent: Mark, options: SearchOptions) -> Self {
        Self {
            mover,
            opponent,
            options,
            stats: SearchStats::default(),
        }
    }

    fn leaf(&self, board: &Board, depth: usize) -> Option<Leaf> {
        let plies = depth as i32;
        if board.has_line(self.mover) {
            return Some(Leaf::Terminal(WIN_SCORE - plies));
        }
        if board.has_line(self.opponent) {
            return Some(Leaf::Terminal(LOSS_SCORE + plies));
        }
        if board.is_full() {
            return Some(Leaf::Terminal(DRAW_SCORE));
        }
        if self.options.depth.reaches_horizon(depth) {
            return Some(Leaf::Horizon(static_evaluate(board, self.mover, self.opponent)));
        }
        None
    }

    /// Scores `board`, which was reached after `depth + 1` plies from the root.
    fn minimax(&mut self, board: Board, depth: usize, maximizing: bool, mut alpha: i32, mut beta: i32) -> i32 {
        self.stats.nodes += 1;

        if let Some(leaf) = self.leaf(&board, depth) {
            return leaf.score();
        }

        let mark = if maximizing { self.mover } else { self.opponent };
        let mut best = if maximizing { -SCORE_BOUND } else { SCORE_BOUND };

        for position in board.legal_moves() {
            let Some(child) = board.with_move(position, mark) else {
                continue;
            };
            let score = self.minimax(child, depth + 1, !maximizing, alpha, beta);

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }

            if self.options.pruning && beta <= alpha {
                self.stats.cutoffs += 1;
                break;
            }
        }

        best
    }

    fn score_root_move(&mut self, board: &Board, position: Position, alpha: i32) -> Option<i32> {
        let child = board.with_move(position, self.mover)?;
        Some(self.minimax(child, 0, false, alpha, SCORE_BOUND))
    }
}

/// Best move for `mover`. Ties go to the earliest move in row-major order.
///
/// The board is only read; every branch works on its own copy.
pub fn best_move(board: &Board, mover: Mark, opponent: Mark, options: SearchOptions) -> SearchOutcome {
    let mut searcher = Searcher::new(mover, opponent, options);
    let mut best: Option<ScoredMove> = None;
    let mut alpha = -SCORE_BOUND;

    for position in board.legal_moves() {
        let Some(score) = searcher.score_root_move(board, position, alpha) else {
            continue;
        };

        // Strictly greater keeps the first of equal moves. A pruned sibling
        // can only return a bound at or below alpha, so it never wins here.
        if best.is_none_or(|current| score > current.score) {
            best = Some(ScoredMove { position, score });
        }
        if options.pruning {
            alpha = alpha.max(score);
        }
    }

    SearchOutcome {
        best_move: best.map(|scored| scored.position),
        score: best.map_or(DRAW_SCORE, |scored| scored.score),
        stats: searcher.stats,
    }
}

/// Every legal move with its exact score, best first. Equal scores keep
/// row-major order.
pub fn rank_moves(board: &Board, mover: Mark, opponent: Mark, options: SearchOptions) -> Vec<ScoredMove> {
    let mut searcher = Searcher::new(mover, opponent, options);

    let mut ranked: Vec<ScoredMove> = board
        .legal_moves()
        .into_iter()
        .filter_map(|position| {
            searcher
                .score_root_move(board, position, -SCORE_BOUND)
                .map(|score| ScoredMove { position, score })
        })
        .collect();

    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::test_support::reachable_positions;

    fn board(text: &str) -> Board {
        text.parse().unwrap()
    }

    #[test]
    fn test_empty_board_opening_is_a_draw() {
        let outcome = best_move(&Board::new(), Mark::X, Mark::O, SearchOptions::full());

        let position = outcome.best_move.unwrap();
        let is_corner = (position.row == 0 || position.row == 2) && (position.col == 0 || position.col == 2);
        let is_center = position == Position::new(1, 1);
        assert!(is_corner || is_center);
        assert_eq!(position, Position::new(0, 0));
        assert_eq!(outcome.score, DRAW_SCORE);
    }

    #[test]
    fn test_immediate_win_is_taken() {
        let outcome = best_move(&board("XX. / OO. / ..."), Mark::X, Mark::O, SearchOptions::full());

        assert_eq!(outcome.best_move, Some(Position::new(0, 2)));
        assert_eq!(outcome.score, WIN_SCORE);
    }

    #[test]
    fn test_threat_is_blocked() {
        let outcome = best_move(&board("X.. / OO. / ..X"), Mark::X, Mark::O, SearchOptions::full());

        assert_eq!(outcome.best_move, Some(Position::new(1, 2)));
    }

    #[test]
    fn test_equal_wins_break_ties_in_row_major_order() {
        // Both (0, 2) and (1, 1) complete a line for X.
        let position = board("XX. / O.O / XXO");
        assert_eq!(find_winning_move(&position, Mark::X), Some(Position::new(0, 2)));

        let outcome = best_move(&position, Mark::X, Mark::O, SearchOptions::full());

        assert_eq!(outcome.best_move, Some(Position::new(0, 2)));
        assert_eq!(outcome.score, WIN_SCORE);
    }

    #[test]
    fn test_fork_scores_as_win_two_plies_later() {
        let outcome = best_move(&board("XO. / .X. / ..O"), Mark::X, Mark::O, SearchOptions::full());

        assert_eq!(outcome.best_move, Some(Position::new(1, 0)));
        assert_eq!(outcome.score, WIN_SCORE - 2);
    }

    #[test]
    fn test_no_legal_moves_returns_sentinel() {
        let outcome = best_move(&board("XOX / XOO / OXX"), Mark::X, Mark::O, SearchOptions::full());

        assert_eq!(outcome.best_move, None);
    }

    #[test]
    fn test_caller_board_is_not_mutated() {
        let position = board("X.. / .O. / ...");
        let snapshot = position;

        best_move(&position, Mark::X, Mark::O, SearchOptions::full());
        rank_moves(&position, Mark::X, Mark::O, SearchOptions::full());

        assert_eq!(position, snapshot);
    }

    #[test]
    fn test_one_ply_horizon_misses_the_block() {
        let position = board("X.. / OO. / ..X");

        let shallow = best_move(&position, Mark::X, Mark::O, SearchOptions::limited(1));
        let two_ply = best_move(&position, Mark::X, Mark::O, SearchOptions::limited(2));

        assert_eq!(shallow.best_move, Some(Position::new(0, 1)));
        assert_eq!(shallow.score, DRAW_SCORE);
        assert_eq!(two_ply.best_move, Some(Position::new(1, 2)));
    }

    #[test]
    fn test_horizon_still_sees_immediate_wins() {
        let outcome = best_move(&board("XX. / OO. / ..."), Mark::X, Mark::O, SearchOptions::limited(1));

        assert_eq!(outcome.best_move, Some(Position::new(0, 2)));
        assert_eq!(outcome.score, WIN_SCORE);
    }

    #[test]
    fn test_static_evaluate_ignores_depth() {
        assert_eq!(static_evaluate(&board("XXX / OO. / ..."), Mark::X, Mark::O), WIN_SCORE);
        assert_eq!(static_evaluate(&board("XXX / OO. / ..."), Mark::O, Mark::X), LOSS_SCORE);
        assert_eq!(static_evaluate(&board("X.. / .O. / ..."), Mark::X, Mark::O), DRAW_SCORE);
    }

    #[test]
    fn test_rank_moves_orders_best_first_and_keeps_ties_stable() {
        let ranked = rank_moves(&board("X.. / OO. / ..X"), Mark::X, Mark::O, SearchOptions::full());

        assert_eq!(ranked.len(), 5);
        assert_eq!(ranked[0].position, Position::new(1, 2));
        assert!(ranked.windows(2).all(|pair| pair[0].score >= pair[1].score));
        for pair in ranked.windows(2) {
            if pair[0].score == pair[1].score {
                let first = (pair[0].position.row, pair[0].position.col);
                let second = (pair[1].position.row, pair[1].position.col);
                assert!(first < second);
            }
        }
    }

    #[test]
    fn test_rank_moves_top_matches_best_move() {
        for (position, mover) in reachable_positions().into_iter().step_by(37) {
            let opponent = mover.opponent().unwrap();
            let ranked = rank_moves(&position, mover, opponent, SearchOptions::full());
            let best = best_move(&position, mover, opponent, SearchOptions::full());

            assert_eq!(Some(ranked[0].position), best.best_move);
            assert_eq!(ranked[0].score, best.score);
        }
    }

    #[test]
    fn test_pruning_visits_fewer_nodes() {
        let pruned = best_move(&Board::new(), Mark::X, Mark::O, SearchOptions::full());
        let exhaustive = best_move(&Board::new(), Mark::X, Mark::O, SearchOptions::full().without_pruning());

        assert!(pruned.stats.cutoffs > 0);
        assert_eq!(exhaustive.stats.cutoffs, 0);
        assert!(pruned.stats.nodes < exhaustive.stats.nodes);
    }

    #[test]
    fn test_pruning_matches_exhaustive_search_on_every_reachable_board() {
        for (position, mover) in reachable_positions() {
            let opponent = mover.opponent().unwrap();
            for options in [SearchOptions::full(), SearchOptions::limited(2), SearchOptions::limited(4)] {
                let pruned = best_move(&position, mover, opponent, options);
                let exhaustive = best_move(&position, mover, opponent, options.without_pruning());

                assert_eq!(pruned.best_move, exhaustive.best_move, "board:\n{}", position);
                assert_eq!(pruned.score, exhaustive.score, "board:\n{}", position);
            }
        }
    }

    #[test]
    fn test_scores_stay_in_bounds() {
        for (position, mover) in reachable_positions().into_iter().step_by(11) {
            let opponent = mover.opponent().unwrap();
            let outcome = best_move(&position, mover, opponent, SearchOptions::full());

            assert!(outcome.score >= LOSS_SCORE && outcome.score <= WIN_SCORE);
        }
    }
}
