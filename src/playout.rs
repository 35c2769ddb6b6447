//! Monte Carlo playouts (random game simulation).
//!
//! A playout plays uniformly random moves for the side to move until a king
//! is captured, the side to move has no moves, or an optional ply cap is
//! reached. The final state is scored from the point of view of the player
//! to move at the start of the playout.

use fastrand::Rng;
use log::trace;

use crate::movegen::Move;
use crate::position::GameState;

/// Perform a random playout from `state` and return its reward.
///
/// The reward is `+1`, `-1` or `0` from `state.current_player`'s perspective,
/// fixed at the start and not flipped as turns alternate.
pub fn mcplayout(state: &GameState, rng: &mut Rng, max_plies: Option<usize>) -> f64 {
    let perspective = state.current_player;
    let mut current = state.clone();
    let mut plies = 0;

    while !current.is_game_over() && max_plies.is_none_or(|cap| plies < cap) {
        let Some(mv) = choose_random_move(&current, rng) else {
            break;
        };
        current = current.apply(mv);
        plies += 1;
    }

    let reward = current.evaluate(perspective);
    trace!("playout finished after {plies} plies, reward {reward}");
    reward
}

/// Choose a uniformly random move for the side to move.
fn choose_random_move(state: &GameState, rng: &mut Rng) -> Option<Move> {
    let moves = state.legal_moves();
    if moves.is_empty() {
        return None;
    }
    Some(moves[rng.usize(..moves.len())])
}
