use log::debug;
use serde::Serialize;
use web_time::Instant;

use crate::ai::eval::evaluate;
use crate::board::Board;
use crate::clock::{Clock, Deadline};
use crate::config::SearchConfig;
use crate::types::{Color, Decision, Move};

pub const INF: i32 = 1_000_000_000;
/// Score of a decided game; dominates any material/mobility score.
pub const SENTINEL: i32 = INF / 2;

/// Outcome of one `Searcher::search` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub decision: Decision,
    /// Root score of the last fully completed depth.
    pub score: Option<i32>,
    /// Last fully completed depth, 0 when none completed.
    pub depth: u8,
    pub nodes: u64,
    pub elapsed_ms: u64,
}

#[derive(Debug, Clone, Copy)]
struct ScoredMove {
    mv: Move,
    next: Board,
    score: i32,
}

/// Iterative-deepening negamax with alpha-beta pruning.
///
/// The clock is polled at every node and before every root candidate; a depth
/// that was interrupted is thrown away rather than merged into the answer.
pub struct Searcher<C: Clock = Deadline> {
    clock: C,
    config: SearchConfig,
    nodes: u64,
}

impl Searcher<Deadline> {
    pub fn new(config: SearchConfig) -> Self {
        Self::with_clock(config, Deadline::new(config.time_budget))
    }
}

impl<C: Clock> Searcher<C> {
    pub fn with_clock(config: SearchConfig, clock: C) -> Self {
        Self {
            clock,
            config,
            nodes: 0,
        }
    }

    /// Picks a move for `root`, or `Decision::Pass` when no depth completed.
    pub fn search(&mut self, board: &Board, root: Color) -> SearchResult {
        let started = Instant::now();
        self.clock.restart();
        self.nodes = 0;

        let candidates = order_moves(board, root, self.config.fan_out_cap);
        let mut completed: Option<(Move, i32, u8)> = None;

        for depth in 1..=self.config.max_depth {
            if self.clock.is_exhausted() {
                break;
            }

            let mut best: Option<(Move, i32)> = None;
            for candidate in &candidates {
                if self.clock.is_exhausted() {
                    break;
                }
                let score = -self.negamax(&candidate.next, root, root.other(), depth - 1, -INF, INF);
                if best.is_none_or(|(_, best_score)| score > best_score) {
                    best = Some((candidate.mv, score));
                }
            }

            match best {
                Some((mv, score)) if !self.clock.is_exhausted() => {
                    debug!(
                        "depth {depth} complete: best {mv} score {score} nodes {}",
                        self.nodes
                    );
                    completed = Some((mv, score, depth));
                }
                Some(_) => {
                    debug!("depth {depth} interrupted, keeping previous result");
                    break;
                }
                None => break,
            }
        }

        let elapsed_ms = started.elapsed().as_millis() as u64;
        match completed {
            Some((mv, score, depth)) => SearchResult {
                decision: Decision::Move(mv),
                score: Some(score),
                depth,
                nodes: self.nodes,
                elapsed_ms,
            },
            None => SearchResult {
                decision: Decision::Pass,
                score: None,
                depth: 0,
                nodes: self.nodes,
                elapsed_ms,
            },
        }
    }

    fn negamax(
        &mut self,
        board: &Board,
        root: Color,
        mover: Color,
        depth: u8,
        alpha: i32,
        beta: i32,
    ) -> i32 {
        self.nodes += 1;

        if depth == 0 || self.clock.is_exhausted() {
            return evaluate(board, root);
        }

        if !board.has_any_move(mover) {
            if !board.has_any_move(mover.other()) {
                return terminal_score(board, root);
            }
            // A forced pass does not consume depth.
            return -self.negamax(board, root, mover.other(), depth, -beta, -alpha);
        }

        let mut best = -INF;
        let mut alpha = alpha;

        for candidate in order_moves(board, mover, self.config.fan_out_cap) {
            let value = -self.negamax(&candidate.next, root, mover.other(), depth - 1, -beta, -alpha);
            best = best.max(value);
            alpha = alpha.max(best);
            if alpha >= beta || self.clock.is_exhausted() {
                break;
            }
        }

        best
    }
}

fn terminal_score(board: &Board, root: Color) -> i32 {
    let mine = board.count(root);
    let theirs = board.count(root.other());
    match mine.cmp(&theirs) {
        std::cmp::Ordering::Greater => SENTINEL,
        std::cmp::Ordering::Less => -SENTINEL,
        std::cmp::Ordering::Equal => 0,
    }
}

/// Legal moves for `mover`, best static score first (ties keep generation
/// order), truncated to `fan_out_cap`.
fn order_moves(board: &Board, mover: Color, fan_out_cap: Option<usize>) -> Vec<ScoredMove> {
    let mut scored: Vec<ScoredMove> = board
        .legal_moves(mover)
        .into_iter()
        .map(|mv| {
            let next = board.apply(&mv, mover);
            // Ordering heuristic from the mover's own perspective.
            let score = evaluate(&next, mover);
            ScoredMove { mv, next, score }
        })
        .collect();

    scored.sort_by(|left, right| right.score.cmp(&left.score));
    if let Some(cap) = fan_out_cap {
        scored.truncate(cap);
    }
    scored
}
