//! tui-2048: the 2048 sliding-tile game for the terminal
//!
//! This crate provides:
//! - A `Board` engine with pure moves (`apply_move`, `shift`), tile spawning and
//!   game-over detection (`engine` module)
//! - An interactive `Session` that owns the board and reads W/A/S/D/Q commands (`session` module)
//! - Terminal rendering (`terminal` module) and TOML settings (`config` module)
//!
//! Quick start:
//! ```
//! use tui_2048::engine::{self, apply_move, Move};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! // Deterministic board initialization with a seeded RNG
//! let mut rng = StdRng::seed_from_u64(42);
//! let b0 = engine::new_game(&mut rng);
//! assert_eq!(b0.count_empty(), 14);
//!
//! let res = apply_move(b0, Move::Left);
//! let b1 = if res.changed { res.board.with_random_tile(&mut rng) } else { b0 };
//! assert!(b1.tile_sum() >= b0.tile_sum());
//! ```
//!
//! Randomness is always passed in (`&mut impl Rng`), so a seeded RNG replays a game exactly.
//!
pub mod config;
pub mod engine;
pub mod session;
pub mod terminal;
