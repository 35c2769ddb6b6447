//! Kriegspiel-MCTS: pick chess moves with Monte Carlo Tree Search.
//!
//! ## Usage
//!
//! - `kriegspiel-mcts` - Show a demo
//! - `kriegspiel-mcts moves <BOARD>` - List generated moves
//! - `kriegspiel-mcts view <BOARD> --side W` - Show one side's masked view
//! - `kriegspiel-mcts search <BOARD>` - Search for the best move

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use flexi_logger::Logger;
use log::info;

use kriegspiel_mcts::board::{Board, Side};
use kriegspiel_mcts::constants::{EXPLORATION_WEIGHT, N_SIMS};
use kriegspiel_mcts::mcts::{Mcts, SearchConfig};
use kriegspiel_mcts::player::PlayerView;
use kriegspiel_mcts::position::GameState;

/// Kriegspiel-MCTS: Monte Carlo Tree Search for simplified chess
#[derive(Parser)]
#[command(name = "kriegspiel-mcts")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a search on a built-in position
    Demo(SearchArgs),
    /// List the moves generated for one side
    Moves {
        /// Board file: 8 lines of 8 tokens
        board: PathBuf,
        /// Side to list moves for (also the side to move)
        #[arg(long, default_value = "W")]
        side: Side,
    },
    /// Print the board as seen by one side
    View {
        board: PathBuf,
        #[arg(long, default_value = "W")]
        side: Side,
    },
    /// Search for the best move from a board file
    Search {
        board: PathBuf,
        /// Side to move
        #[arg(long, default_value = "W")]
        side: Side,
        #[command(flatten)]
        search: SearchArgs,
    },
}

#[derive(Args, Clone)]
struct SearchArgs {
    /// Number of MCTS iterations
    #[arg(long, default_value_t = N_SIMS)]
    simulations: usize,
    /// UCB1 exploration weight
    #[arg(long, default_value_t = EXPLORATION_WEIGHT)]
    exploration_weight: f64,
    /// Random seed for reproducible searches
    #[arg(long)]
    seed: Option<u64>,
    /// Stop playouts after this many plies
    #[arg(long)]
    max_rollout_plies: Option<usize>,
    /// Playouts per iteration (run in parallel when above 1)
    #[arg(long, default_value_t = 1)]
    rollouts_per_leaf: usize,
}

impl From<SearchArgs> for SearchConfig {
    fn from(args: SearchArgs) -> Self {
        SearchConfig {
            exploration_weight: args.exploration_weight,
            simulations: args.simulations,
            seed: args.seed,
            max_rollout_plies: args.max_rollout_plies,
            rollouts_per_leaf: args.rollouts_per_leaf,
        }
    }
}

const DEMO_BOARD: &str = "\
. . . . BK . . .
. . . BP BP BP . .
. . . . . . . .
. . . . . . . .
. . . . . . . .
. . . . . . . .
. . . WP WP WP . .
WQ . . . WK . . .";

fn main() -> Result<()> {
    let _logger = Logger::try_with_env_or_str("info")?.start()?;

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Moves { board, side }) => {
            let state = GameState::from_board(load_board(&board)?, side);
            for mv in state.get_legal_moves(side) {
                println!("{mv}");
            }
        }
        Some(Commands::View { board, side }) => {
            let view = PlayerView::new(&load_board(&board)?, side);
            println!("{view}");
        }
        Some(Commands::Search {
            board,
            side,
            search,
        }) => {
            let state = GameState::from_board(load_board(&board)?, side);
            run_search(&state, search.into());
        }
        Some(Commands::Demo(search)) => {
            let state = GameState::from_board(DEMO_BOARD.parse()?, Side::White);
            run_search(&state, search.into());
        }
        None => {
            let state = GameState::from_board(DEMO_BOARD.parse()?, Side::White);
            run_search(&state, SearchConfig::default());
        }
    }
    Ok(())
}

fn load_board(path: &Path) -> Result<Board> {
    Board::from_file(path).with_context(|| format!("loading board {}", path.display()))
}

fn run_search(state: &GameState, config: SearchConfig) {
    println!("Initial board ({} to move):", state.current_player);
    println!("{state}\n");

    info!("running {} MCTS iterations", config.simulations);
    let mut mcts = Mcts::new(config);
    let result = mcts.search(state);

    match result.mv {
        Some(mv) => println!("Best move: {mv}"),
        None => println!("No move available"),
    }
    println!("Visits: {} value: {:.1}\n", result.visits, result.value);
    println!("Resulting board:");
    println!("{}", result.state);
}
