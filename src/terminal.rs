use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};

use crate::engine::Board;

pub const BANNER: &str = "2048 Game - Use W/A/S/D to move. Press Q to quit.";
pub const PROMPT: &str = "Move (W/A/S/D): ";
pub const INVALID_INPUT: &str = "Invalid input. Use W/A/S/D to move.";
pub const GAME_OVER: &str = "Game Over!";
pub const FAREWELL: &str = "Thanks for playing!";

/// Draws the board and messages onto any writer.
///
/// With `clear` set, each frame wipes the screen and homes the cursor first;
/// otherwise frames are appended, which is what tests and piped output want.
#[derive(Debug, Clone, Copy)]
pub struct Screen {
    clear: bool,
}

impl Screen {
    pub fn new(clear: bool) -> Self {
        Self { clear }
    }

    pub fn render(&self, out: &mut impl Write, board: &Board) -> io::Result<()> {
        if self.clear {
            execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        write!(out, "\n{BANNER}\n\n{board}")?;
        out.flush()
    }

    pub fn prompt(&self, out: &mut impl Write) -> io::Result<()> {
        write!(out, "{PROMPT}")?;
        out.flush()
    }

    pub fn message(&self, out: &mut impl Write, msg: &str) -> io::Result<()> {
        writeln!(out, "{msg}")?;
        out.flush()
    }
}
