use rand::Rng;
use std::fmt;

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// Every direction, in the order terminal detection tries them.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];
}

/// Side length of the board. Not configurable.
pub const SIZE: usize = 4;

pub type Tile = u32;
/// Largest tile that can merge without saturating.
pub const MAX_TILE: Tile = 1 << 30;
pub type Line = [Tile; SIZE];
type BoardRaw = [Line; SIZE];

/// 4x4 2048 board stored as row-major tile values (0 = empty).
///
/// `Board` is `Copy`; every operation takes it by value and hands back a new
/// board, so callers never observe in-place mutation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board(BoardRaw);

/// Outcome of sliding a board in one direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveResult {
    pub board: Board,
    /// True iff at least one cell differs from the input board.
    pub changed: bool,
}

impl Board {
    /// A constant empty board (all zeros).
    pub const EMPTY: Board = Board([[0; SIZE]; SIZE]);

    /// Construct a `Board` from its rows.
    ///
    /// Tiles are expected to stay at or below `MAX_TILE`; merging two larger
    /// tiles saturates at `Tile::MAX` instead of overflowing.
    #[inline]
    pub fn from_rows(rows: BoardRaw) -> Self { Board(rows) }

    /// Borrow the rows of this board.
    #[inline]
    pub fn rows(&self) -> &BoardRaw { &self.0 }

    /// Return the board resulting from sliding/merging tiles in `dir` (no random insert).
    ///
    /// ```
    /// use tui_2048::engine::{Board, Move};
    /// let b = Board::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
    /// assert_eq!(b.shift(Move::Right).rows()[0], [0, 0, 0, 4]);
    /// ```
    #[inline]
    pub fn shift(self, dir: Move) -> Self { apply_move(self, dir).board }

    /// Insert a random 2 (90%) or 4 (10%) tile into a random empty slot, using the provided RNG.
    ///
    /// A full board is returned unchanged.
    ///
    /// ```
    /// use tui_2048::engine::Board;
    /// use rand::{SeedableRng, rngs::StdRng};
    /// let mut rng = StdRng::seed_from_u64(123);
    /// let b = Board::EMPTY.with_random_tile(&mut rng).with_random_tile(&mut rng);
    /// assert_eq!(b.count_empty(), 14);
    /// ```
    pub fn with_random_tile<R: Rng + ?Sized>(self, rng: &mut R) -> Self {
        let empty = self.empty_cells();
        if empty.is_empty() {
            return self;
        }
        let (row, col) = empty[rng.gen_range(0..empty.len())];
        let mut next = self;
        next.0[row][col] = generate_random_tile(rng);
        next
    }

    /// Perform a move then insert a random tile if the move changed the board,
    /// using the provided RNG.
    #[inline]
    pub fn make_move<R: Rng + ?Sized>(self, direction: Move, rng: &mut R) -> Self {
        let MoveResult { board, changed } = apply_move(self, direction);
        if changed { board.with_random_tile(rng) } else { self }
    }

    /// Return true if no legal moves remain.
    ///
    /// ```
    /// use tui_2048::engine::Board;
    /// // Nothing slides on an empty board either.
    /// assert!(Board::EMPTY.is_game_over());
    /// ```
    #[inline]
    pub fn is_game_over(self) -> bool { is_game_over(self) }

    /// Return the highest tile value present on the board (0 if empty).
    #[inline]
    pub fn highest_tile(self) -> Tile { get_highest_tile_val(self) }

    /// Count the number of empty cells on the board.
    #[inline]
    pub fn count_empty(self) -> usize { count_empty(self) }

    /// Coordinates `(row, col)` of every empty cell, row-major.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        let mut cells = Vec::with_capacity(SIZE * SIZE);
        for (r, row) in self.0.iter().enumerate() {
            for (c, &val) in row.iter().enumerate() {
                if val == 0 {
                    cells.push((r, c));
                }
            }
        }
        cells
    }

    /// Get the value at index. Index runs 0..16 row-major.
    #[inline]
    pub fn tile_value(self, idx: usize) -> Tile { self.0[idx / SIZE][idx % SIZE] }

    /// Sum of all tile values.
    pub fn tile_sum(self) -> u64 {
        self.0.iter().flatten().map(|&t| u64::from(t)).sum()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({:?})", self.0)
    }
}

const ROW_SEPARATOR: &str = "+------+------+------+------+";
const CELL_WIDTH: usize = 6;

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.0 {
            writeln!(f, "{ROW_SEPARATOR}")?;
            for &val in row {
                write!(f, "|{}", format_val(val))?;
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "{ROW_SEPARATOR}")
    }
}

/// Start a game: an empty board with two tiles drawn one after the other.
pub fn new_game<R: Rng + ?Sized>(rng: &mut R) -> Board {
    Board::EMPTY.with_random_tile(rng).with_random_tile(rng)
}

/// Slide/merge tiles in the given direction and report whether anything moved.
///
/// Every direction is reduced to a left shift of each row:
///
/// | Direction | Forward                   | Inverse                   |
/// |-----------|---------------------------|---------------------------|
/// | Left      | identity                  | identity                  |
/// | Right     | reverse rows              | reverse rows              |
/// | Up        | transpose                 | transpose                 |
/// | Down      | transpose, reverse rows   | reverse rows, transpose   |
pub fn apply_move(board: Board, direction: Move) -> MoveResult {
    let forward = match direction {
        Move::Left => board,
        Move::Right => reverse_rows(board),
        Move::Up => transpose(board),
        Move::Down => reverse_rows(transpose(board)),
    };
    let (shifted, changed) = shift_rows_left(forward);
    let board = match direction {
        Move::Left => shifted,
        Move::Right => reverse_rows(shifted),
        Move::Up => transpose(shifted),
        Move::Down => transpose(reverse_rows(shifted)),
    };
    MoveResult { board, changed }
}

/// Slide/merge tiles in the given direction. No randomness.
pub fn shift(board: Board, direction: Move) -> Board { apply_move(board, direction).board }

/// Swap rows and columns. Its own inverse.
pub fn transpose(board: Board) -> Board {
    let mut out = [[0; SIZE]; SIZE];
    for (r, row) in board.0.iter().enumerate() {
        for (c, &val) in row.iter().enumerate() {
            out[c][r] = val;
        }
    }
    Board(out)
}

/// Mirror every row left-to-right. Its own inverse.
pub fn reverse_rows(board: Board) -> Board {
    let mut out = board.0;
    for row in out.iter_mut() {
        row.reverse();
    }
    Board(out)
}

fn shift_rows_left(board: Board) -> (Board, bool) {
    let mut out = board.0;
    let mut changed = false;
    for row in out.iter_mut() {
        let (line, line_changed) = shift_line_left(*row);
        *row = line;
        changed |= line_changed;
    }
    (Board(out), changed)
}

/// Compress, merge, compress again. The flag is set iff the line changed.
pub fn shift_line_left(line: Line) -> (Line, bool) {
    let shifted = compress(merge(compress(line)));
    (shifted, shifted != line)
}

/// Move non-zero tiles to the front, keeping their order.
pub fn compress(line: Line) -> Line {
    let mut out = [0; SIZE];
    for (slot, val) in out.iter_mut().zip(line.into_iter().filter(|&v| v != 0)) {
        *slot = val;
    }
    out
}

/// One left-to-right pass over adjacent pairs; a merged pair leaves a zero
/// on its right, so a tile takes part in at most one merge per pass.
pub fn merge(mut line: Line) -> Line {
    for i in 0..SIZE - 1 {
        if line[i] != 0 && line[i] == line[i + 1] {
            line[i] = line[i].saturating_mul(2);
            line[i + 1] = 0;
        }
    }
    line
}

/// True if no move in any direction changes the board.
pub fn is_game_over(board: Board) -> bool {
    Move::ALL.iter().all(|&dir| !apply_move(board, dir).changed)
}

/// Count the number of zero tiles.
pub fn count_empty(board: Board) -> usize {
    board.0.iter().flatten().filter(|&&v| v == 0).count()
}

pub fn get_highest_tile_val(board: Board) -> Tile {
    board.0.iter().flatten().copied().max().unwrap_or(0)
}

fn generate_random_tile<R: Rng + ?Sized>(rng: &mut R) -> Tile {
    if rng.gen_range(0..10) < 9 { 2 } else { 4 }
}

fn format_val(val: Tile) -> String {
    match val {
        0 => " ".repeat(CELL_WIDTH),
        x => format!("{:^width$}", x, width = CELL_WIDTH),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn row_board(row: Line) -> Board {
        Board::from_rows([row, [0; 4], [0; 4], [0; 4]])
    }

    #[test]
    fn it_compress() {
        assert_eq!(compress([0, 0, 0, 0]), [0, 0, 0, 0]);
        assert_eq!(compress([0, 2, 0, 4]), [2, 4, 0, 0]);
        assert_eq!(compress([2, 0, 2, 2]), [2, 2, 2, 0]);
        assert_eq!(compress([8, 4, 2, 2]), [8, 4, 2, 2]);
    }

    #[test]
    fn it_merge() {
        assert_eq!(merge([2, 2, 2, 0]), [4, 0, 2, 0]);
        assert_eq!(merge([2, 2, 2, 2]), [4, 0, 4, 0]);
        assert_eq!(merge([4, 2, 2, 4]), [4, 4, 0, 4]);
        assert_eq!(merge([2, 4, 8, 16]), [2, 4, 8, 16]);
        assert_eq!(merge([0, 0, 0, 0]), [0, 0, 0, 0]);
    }

    #[test]
    fn it_shift_line_left() {
        assert_eq!(shift_line_left([0, 0, 0, 0]), ([0, 0, 0, 0], false));
        assert_eq!(shift_line_left([2, 4, 2, 4]), ([2, 4, 2, 4], false));
        assert_eq!(shift_line_left([2, 2, 0, 0]), ([4, 0, 0, 0], true));
        assert_eq!(shift_line_left([2, 2, 2, 2]), ([4, 4, 0, 0], true));
        assert_eq!(shift_line_left([2, 0, 2, 2]), ([4, 2, 0, 0], true));
        assert_eq!(shift_line_left([2, 0, 0, 2]), ([4, 0, 0, 0], true));
        assert_eq!(shift_line_left([0, 0, 0, 2]), ([2, 0, 0, 0], true));
        assert_eq!(shift_line_left([4, 4, 8, 0]), ([8, 8, 0, 0], true));
    }

    #[test]
    fn test_transpose() {
        let b = Board::from_rows([[1, 2, 3, 4], [5, 6, 7, 8], [9, 10, 11, 12], [13, 14, 15, 16]]);
        let t = transpose(b);
        assert_eq!(t.rows()[0], [1, 5, 9, 13]);
        assert_eq!(t.rows()[3], [4, 8, 12, 16]);
        assert_eq!(transpose(t), b);
    }

    #[test]
    fn test_reverse_rows() {
        let b = Board::from_rows([[1, 2, 3, 4], [5, 6, 7, 8], [9, 10, 11, 12], [13, 14, 15, 16]]);
        let r = reverse_rows(b);
        assert_eq!(r.rows()[0], [4, 3, 2, 1]);
        assert_eq!(r.rows()[2], [12, 11, 10, 9]);
        assert_eq!(reverse_rows(r), b);
    }

    #[test]
    fn test_shift_left() {
        assert_eq!(shift(row_board([2, 2, 0, 0]), Move::Left), row_board([4, 0, 0, 0]));
        assert_eq!(shift(row_board([0, 0, 0, 2]), Move::Left), row_board([2, 0, 0, 0]));
        assert_eq!(shift(row_board([2, 8, 8, 4]), Move::Left), row_board([2, 16, 4, 0]));
        assert_eq!(shift(row_board([2, 4, 8, 16]), Move::Left), row_board([2, 4, 8, 16]));
    }

    #[test]
    fn test_shift_right() {
        assert_eq!(shift(row_board([2, 2, 0, 0]), Move::Right), row_board([0, 0, 0, 4]));
        assert_eq!(shift(row_board([2, 2, 2, 2]), Move::Right), row_board([0, 0, 4, 4]));
        assert_eq!(shift(row_board([2, 2, 2, 0]), Move::Right), row_board([0, 0, 2, 4]));
        assert_eq!(shift(row_board([2, 0, 0, 0]), Move::Right), row_board([0, 0, 0, 2]));
    }

    #[test]
    fn test_move_up() {
        let game = Board::from_rows([[2, 0, 4, 0], [2, 0, 0, 0], [0, 8, 4, 0], [4, 8, 4, 2]]);
        let res = apply_move(game, Move::Up);
        assert!(res.changed);
        assert_eq!(
            res.board,
            Board::from_rows([[4, 16, 8, 2], [4, 0, 4, 0], [0, 0, 0, 0], [0, 0, 0, 0]])
        );
    }

    #[test]
    fn test_move_down() {
        let game = Board::from_rows([[2, 0, 4, 0], [2, 0, 0, 0], [0, 8, 4, 0], [4, 8, 4, 2]]);
        let res = apply_move(game, Move::Down);
        assert!(res.changed);
        assert_eq!(
            res.board,
            Board::from_rows([[0, 0, 0, 0], [0, 0, 0, 0], [4, 0, 4, 0], [4, 16, 8, 2]])
        );
    }

    #[test]
    fn test_move_left_right_full_board() {
        let game = Board::from_rows([[2, 4, 8, 16], [2, 8, 8, 4], [4, 0, 0, 4], [2, 0, 0, 2]]);
        assert_eq!(
            shift(game, Move::Left),
            Board::from_rows([[2, 4, 8, 16], [2, 16, 4, 0], [8, 0, 0, 0], [4, 0, 0, 0]])
        );
        assert_eq!(
            shift(game, Move::Right),
            Board::from_rows([[2, 4, 8, 16], [0, 2, 16, 4], [0, 0, 0, 8], [0, 0, 0, 4]])
        );
    }

    #[test]
    fn unchanged_move_reports_false() {
        let game = Board::from_rows([[2, 4, 0, 0], [8, 0, 0, 0], [0; 4], [0; 4]]);
        let res = apply_move(game, Move::Left);
        assert!(!res.changed);
        assert_eq!(res.board, game);
        assert!(apply_move(game, Move::Right).changed);
    }

    #[test]
    fn it_is_game_over() {
        let packed = Board::from_rows([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        assert!(is_game_over(packed));
        let mergeable = Board::from_rows([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 4]]);
        assert!(!is_game_over(mergeable));
        let one_gap = Board::from_rows([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 0, 4], [4, 2, 4, 2]]);
        assert!(!is_game_over(one_gap));
    }

    #[test]
    fn it_fills_board_with_random_tiles() {
        let mut rng = StdRng::seed_from_u64(16);
        let mut game = Board::EMPTY;
        for _ in 0..16 {
            game = game.with_random_tile(&mut rng);
        }
        assert_eq!(count_empty(game), 0);
        assert!(game.rows().iter().flatten().all(|&v| v == 2 || v == 4));
        // Full board: no-op.
        assert_eq!(game.with_random_tile(&mut rng), game);
    }

    #[test]
    fn oversized_merge_saturates() {
        let big = 1u32 << 31;
        assert_eq!(merge([big, big, 0, 0]), [Tile::MAX, 0, 0, 0]);
        let res = apply_move(row_board([big, big, 0, 0]), Move::Left);
        assert!(res.changed);
        assert_eq!(res.board, row_board([Tile::MAX, 0, 0, 0]));
        assert_eq!(merge([MAX_TILE, MAX_TILE, 0, 0]), [MAX_TILE * 2, 0, 0, 0]);
    }

    #[test]
    fn random_tile_lands_on_the_only_gap() {
        let mut rng = StdRng::seed_from_u64(5);
        let game = Board::from_rows([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 0, 4], [4, 2, 4, 2]]);
        let next = game.with_random_tile(&mut rng);
        assert_eq!(count_empty(next), 0);
        for idx in (0..16).filter(|&i| i != 10) {
            assert_eq!(next.tile_value(idx), game.tile_value(idx));
        }
        assert!(matches!(next.tile_value(10), 2 | 4));
    }

    #[test]
    fn it_new_game() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let b = new_game(&mut rng);
            let tiles: Vec<_> = b.rows().iter().flatten().copied().filter(|&v| v != 0).collect();
            assert_eq!(tiles.len(), 2);
            assert!(tiles.iter().all(|&v| v == 2 || v == 4));
        }
    }

    #[test]
    fn make_move_skips_spawn_when_nothing_moves() {
        let mut rng = StdRng::seed_from_u64(1);
        let game = Board::from_rows([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
        assert_eq!(game.make_move(Move::Left, &mut rng), game);
        let moved = game.make_move(Move::Right, &mut rng);
        assert_eq!(moved.count_empty(), 14);
        assert_eq!(moved.tile_value(3), 2);
    }

    #[test]
    fn it_count_empty() {
        let game = Board::from_rows([[2, 2, 2, 2], [0; 4], [2, 2, 2, 2], [0; 4]]);
        assert_eq!(count_empty(game), 8);
        assert_eq!(count_empty(Board::EMPTY), 16);
    }

    #[test]
    fn it_get_tile_val() {
        let game = Board::from_rows([
            [0, 2, 4, 8],
            [16, 32, 64, 128],
            [256, 512, 1024, 2048],
            [0; 4],
        ]);
        assert_eq!(game.tile_value(3), 8);
        assert_eq!(game.tile_value(10), 1024);
        assert_eq!(game.tile_value(15), 0);
        assert_eq!(game.highest_tile(), 2048);
        assert_eq!(Board::EMPTY.highest_tile(), 0);
    }

    #[test]
    fn display_draws_bordered_cells() {
        let game = Board::from_rows([[2, 0, 0, 0], [0, 2048, 0, 0], [0; 4], [0, 0, 0, 16]]);
        let out = game.to_string();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], ROW_SEPARATOR);
        assert_eq!(lines[1], "|  2   |      |      |      |");
        assert_eq!(lines[3], "|      | 2048 |      |      |");
        assert_eq!(lines[7], "|      |      |      |  16  |");
        assert_eq!(lines[8], ROW_SEPARATOR);
    }
}
