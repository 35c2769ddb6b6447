//! Kriegspiel-MCTS: Monte Carlo Tree Search over a simplified chess.
//!
//! This crate provides move generation for a reduced chess rule set (no
//! check filtering, castling, en-passant or promotion; the game ends when a
//! king is captured) and an MCTS engine that picks moves by random playouts.
//!
//! ## Modules
//!
//! - [`constants`] - Board size, movement tables and search defaults
//! - [`board`] - 8x8 board of cells, text parsing and rendering
//! - [`movegen`] - Per-piece move generation
//! - [`position`] - Game state, terminal detection and evaluation
//! - [`playout`] - Random game simulation for position evaluation
//! - [`mcts`] - Monte Carlo Tree Search with UCB1
//! - [`player`] - Masked per-side board views
//!
//! ## Example
//!
//! ```
//! use kriegspiel_mcts::board::{Board, Side};
//! use kriegspiel_mcts::mcts::{Mcts, SearchConfig};
//! use kriegspiel_mcts::position::GameState;
//!
//! let board: Board = "\
//! . . . . BK . . .
//! . . . . . . . .
//! . . . . . . . .
//! . . . . . . . .
//! . . . . . . . .
//! . . . . . . . .
//! . . . . . . . .
//! WQ . . . WK . . ."
//!     .parse()
//!     .unwrap();
//! let state = GameState::from_board(board, Side::White);
//!
//! let config = SearchConfig {
//!     simulations: 100,
//!     seed: Some(1),
//!     max_rollout_plies: Some(50),
//!     ..SearchConfig::default()
//! };
//! let result = Mcts::new(config).search(&state);
//! println!("Best move: {:?}", result.mv);
//! println!("{}", result.state);
//! ```

pub mod board;
pub mod constants;
pub mod mcts;
pub mod movegen;
pub mod player;
pub mod playout;
pub mod position;
