use rand::Rng;
use std::fmt;

use super::ops;
use serde::{Deserialize, Serialize};

// Internal type aliases for packed representation
pub(crate) type BoardRaw = u64;
pub(crate) type Line = u64;
pub(crate) type Tile = u64;

/// Points earned by merges. Monotonically accumulated by a game session.
pub type Score = u64;

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

/// Packed 4x4 board as 16 4-bit nibbles in a `u64`.
///
/// Each nibble holds a tile exponent: 0 for empty, k >= 1 for a tile of
/// value 2^k. Public methods provide ergonomic, safe operations while
/// preserving an escape hatch to the raw packed representation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board(pub(crate) BoardRaw);

impl Board {
    /// A constant empty board (all zeros).
    pub const EMPTY: Board = Board(0);

    /// Construct a `Board` from its raw packed representation.
    #[inline]
    pub fn from_raw(raw: BoardRaw) -> Self {
        Board(raw)
    }

    /// Consume this `Board`, returning the raw packed `u64`.
    #[inline]
    pub fn into_raw(self) -> BoardRaw {
        self.0
    }

    /// Borrow the raw packed `u64` for this `Board`.
    #[inline]
    pub fn raw(&self) -> BoardRaw {
        self.0
    }

    /// Return the board resulting from sliding/merging tiles in `dir` (no random insert).
    ///
    /// Example
    /// ```
    /// use twenty48::engine::{Board, Move};
    /// let b = Board::from_raw(0x0011);
    /// assert_eq!(b.shift(Move::Left), Board::from_raw(0x2000));
    /// ```
    #[inline]
    pub fn shift(self, dir: Move) -> Self {
        ops::shift(self, dir)
    }

    /// Like `shift`, but also returns the points earned by merges performed
    /// during the move (the sum of every merged tile's post-doubling value).
    ///
    /// ```
    /// use twenty48::engine::{Board, Move};
    /// // Row of four 2s merges into two 4s: 4 + 4 = 8 points.
    /// let (b, points) = Board::from_raw(0x1111).shift_scored(Move::Left);
    /// assert_eq!(b, Board::from_raw(0x2200));
    /// assert_eq!(points, 8);
    /// ```
    #[inline]
    pub fn shift_scored(self, dir: Move) -> (Self, Score) {
        ops::shift_scored(self, dir)
    }

    /// Insert a random 2 (90%) or 4 (10%) tile into a uniformly random empty
    /// slot, using the provided RNG. Returns `self` unchanged when the board
    /// is full; a missing slot is never an error.
    ///
    /// Deterministic example using a seeded RNG:
    /// ```
    /// use twenty48::engine::Board;
    /// use rand::{SeedableRng, rngs::StdRng};
    /// let mut rng = StdRng::seed_from_u64(123);
    /// let b = Board::EMPTY.with_random_tile(&mut rng).with_random_tile(&mut rng);
    /// assert_eq!(b.count_empty(), 14);
    /// ```
    #[inline]
    pub fn with_random_tile<R: Rng + ?Sized>(self, rng: &mut R) -> Self {
        let empty = ops::count_empty(self);
        if empty == 0 {
            return self;
        }
        let mut index = rng.gen_range(0..empty);
        let mut tmp = self.0;
        let mut tile = ops::generate_random_tile(rng);
        loop {
            while (tmp & 0xf) != 0 {
                tmp >>= 4;
                tile <<= 4;
            }
            if index == 0 {
                break;
            }
            index -= 1;
            tmp >>= 4;
            tile <<= 4;
        }
        Board(self.0 | tile)
    }

    /// True iff the board is completely full and no two orthogonally
    /// adjacent tiles are equal, i.e. no move can change anything.
    ///
    /// ```
    /// use twenty48::engine::Board;
    /// assert!(!Board::EMPTY.is_stuck());
    /// assert!(Board::from_raw(0x1212_2121_1212_2121).is_stuck());
    /// ```
    #[inline]
    pub fn is_stuck(self) -> bool {
        ops::is_stuck(self)
    }

    /// Count the number of empty cells on the board.
    #[inline]
    pub fn count_empty(self) -> u64 {
        ops::count_empty(self)
    }

    /// Get the actual value at index (2^exponent stored at nibble).
    ///
    /// Index runs 0..16 row-major. Empty cells return 0.
    #[inline]
    pub fn tile_value(self, idx: usize) -> u16 {
        ops::get_tile_val(self, idx)
    }

    /// Iterate over tile exponents (nibbles) in row-major order.
    /// Returns 0 for empty, 1 for 2, 2 for 4, etc.
    #[inline]
    pub fn tiles(self) -> TilesIter {
        TilesIter {
            raw: self.0,
            idx: 0,
        }
    }

    /// Convenience: collect tile exponents into a `Vec<u8>`.
    #[inline]
    pub fn to_vec(self) -> Vec<u8> {
        self.tiles().collect()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({:#018x})", self.0)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board: Vec<_> = self.tiles().map(|n| super::ops::format_val(&n)).collect();
        write!(
            f,
            "\n{}|{}|{}|{}\n--------------------------------\n{}|{}|{}|{}\n--------------------------------\n{}|{}|{}|{}\n--------------------------------\n{}|{}|{}|{}\n",
            board[0],
            board[1],
            board[2],
            board[3],
            board[4],
            board[5],
            board[6],
            board[7],
            board[8],
            board[9],
            board[10],
            board[11],
            board[12],
            board[13],
            board[14],
            board[15]
        )
    }
}

impl From<BoardRaw> for Board {
    fn from(v: BoardRaw) -> Self {
        Board::from_raw(v)
    }
}
impl From<Board> for BoardRaw {
    fn from(b: Board) -> Self {
        b.into_raw()
    }
}

/// Iterator over board tiles (exponents) in row-major order.
pub struct TilesIter {
    pub raw: BoardRaw,
    pub idx: usize,
}

impl Iterator for TilesIter {
    type Item = u8;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.idx >= 16 {
            return None;
        }
        let n = ((self.raw >> (60 - (4 * self.idx))) & 0xf) as u8;
        self.idx += 1;
        Some(n)
    }
}

impl IntoIterator for Board {
    type Item = u8;
    type IntoIter = TilesIter;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.tiles()
    }
}

impl IntoIterator for &Board {
    type Item = u8;
    type IntoIter = TilesIter;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.tiles()
    }
}
