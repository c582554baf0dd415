//! Interactive session: owns the single board, reads commands, drives the engine.

use std::io::{self, BufRead, Write};

use log::{debug, info};
use rand::Rng;

use crate::engine::{self, Board, Move, MoveResult};
use crate::terminal::{self, Screen};

/// A parsed line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Move),
    Quit,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum InputError {
    #[error("no key entered")]
    Empty,
    #[error("unrecognized input {0:?}")]
    Unrecognized(String),
}

/// Map one line of input to a command. Keys are case-insensitive; only the
/// line ending is stripped, so surrounding spaces make the input invalid.
pub fn parse_command(input: &str) -> Result<Command, InputError> {
    let key = input.trim_end_matches(['\r', '\n']);
    let mut chars = key.chars();
    let (Some(c), None) = (chars.next(), chars.next()) else {
        return Err(if key.is_empty() {
            InputError::Empty
        } else {
            InputError::Unrecognized(key.to_string())
        });
    };
    match c.to_ascii_uppercase() {
        'W' => Ok(Command::Move(Move::Up)),
        'A' => Ok(Command::Move(Move::Left)),
        'S' => Ok(Command::Move(Move::Down)),
        'D' => Ok(Command::Move(Move::Right)),
        'Q' => Ok(Command::Quit),
        _ => Err(InputError::Unrecognized(key.to_string())),
    }
}

/// What happened to the board in one accepted turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Turn {
    pub changed: bool,
    pub game_over: bool,
}

/// Why a session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Quit,
    GameOver,
    EndOfInput,
}

/// Owner of the only mutable board and of the random source.
pub struct Session<R: Rng> {
    board: Board,
    rng: R,
    turns: u64,
}

impl<R: Rng> Session<R> {
    /// Start a fresh game with two tiles drawn from `rng`.
    pub fn new(mut rng: R) -> Self {
        let board = engine::new_game(&mut rng);
        Self { board, rng, turns: 0 }
    }

    /// Continue from an arbitrary board.
    pub fn with_board(board: Board, rng: R) -> Self {
        Self { board, rng, turns: 0 }
    }

    pub fn board(&self) -> Board { self.board }

    /// Number of effective moves made so far.
    pub fn turns(&self) -> u64 { self.turns }

    /// Apply one move. Spawning and the terminal check only happen when the
    /// board actually changed.
    pub fn step(&mut self, dir: Move) -> Turn {
        let MoveResult { board, changed } = engine::apply_move(self.board, dir);
        debug!("move {dir:?} changed={changed}");
        if !changed {
            return Turn { changed, game_over: false };
        }
        self.board = board.with_random_tile(&mut self.rng);
        self.turns += 1;
        let game_over = self.board.is_game_over();
        Turn { changed, game_over }
    }

    /// Run the read-render loop until quit, game over or end of input.
    pub fn play<I: BufRead, O: Write>(
        &mut self,
        input: &mut I,
        out: &mut O,
        screen: Screen,
    ) -> io::Result<Outcome> {
        let mut line = String::new();
        let outcome = loop {
            screen.render(out, &self.board)?;
            let command = loop {
                screen.prompt(out)?;
                line.clear();
                if input.read_line(&mut line)? == 0 {
                    break None;
                }
                match parse_command(&line) {
                    Ok(cmd) => break Some(cmd),
                    Err(e) => {
                        debug!("rejected input: {e}");
                        screen.message(out, terminal::INVALID_INPUT)?;
                    }
                }
            };
            match command {
                None => {
                    writeln!(out)?;
                    break Outcome::EndOfInput;
                }
                Some(Command::Quit) => {
                    screen.message(out, terminal::FAREWELL)?;
                    break Outcome::Quit;
                }
                Some(Command::Move(dir)) => {
                    if self.step(dir).game_over {
                        screen.render(out, &self.board)?;
                        screen.message(out, terminal::GAME_OVER)?;
                        break Outcome::GameOver;
                    }
                }
            }
        };
        info!(
            "session ended: {outcome:?} after {} turns, highest tile {}",
            self.turns,
            self.board.highest_tile()
        );
        Ok(outcome)
    }
}
