use ttt_core::{Board, Player, LINES};

/// Terminal bonus dwarfing every positional component, so a forced win
/// always beats the best non-winning position.
pub const WIN_SCORE: i32 = 1_000;

/// Positional weight per cell, row-major: center 3, corners 2, edges 1.
const CELL_WEIGHTS: [i32; 9] = [2, 1, 2, 1, 3, 1, 2, 1, 2];

/// Scores `board` from `player`'s perspective. Higher is better.
///
/// Terminal positions get the win/loss bonus (a draw is 0). Non-terminal
/// positions combine open-line counting (a line without opposing marks is
/// worth the square of the marks in it, times 10) with the positional
/// cell weights.
pub fn evaluate(player: Player, board: &Board) -> i32 {
    if let Some(winner) = board.winner() {
        return if winner == player {
            WIN_SCORE
        } else {
            -WIN_SCORE
        };
    }
    if board.is_full() {
        return 0;
    }

    let mut score = 0;
    for line in LINES {
        let mut mine = 0i32;
        let mut theirs = 0i32;
        for idx in line {
            match board.cell_by_index(idx) {
                Some(p) if p == player => mine += 1,
                Some(_) => theirs += 1,
                None => {}
            }
        }
        if theirs == 0 {
            score += mine * mine * 10;
        }
        if mine == 0 {
            score -= theirs * theirs * 10;
        }
    }

    for (idx, weight) in CELL_WEIGHTS.iter().enumerate() {
        match board.cell_by_index(idx) {
            Some(p) if p == player => score += weight,
            Some(_) => score -= weight,
            None => {}
        }
    }

    score
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
