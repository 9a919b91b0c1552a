use rand::Rng;

use super::state::{Board, BoardRaw, Line, Move, Score, Tile};
use super::tables::{get_line_entry, get_points_entry, stores};

/// Slide/merge tiles in the given direction. No randomness, no scoring.
pub fn shift(board: Board, direction: Move) -> Board {
    shift_scored(board, direction).0
}

/// Slide/merge tiles in the given direction, returning the new board and the
/// points earned by merges (each merged pair contributes its post-doubling
/// value exactly once).
pub fn shift_scored(board: Board, direction: Move) -> (Board, Score) {
    match direction {
        Move::Left | Move::Right => shift_rows(board, direction),
        Move::Up | Move::Down => shift_cols(board, direction),
    }
}

// Credit to Nneonneo
pub(crate) fn transpose(x: BoardRaw) -> BoardRaw {
    let a1 = x & 0xF0F00F0FF0F00F0F;
    let a2 = x & 0x0000F0F00000F0F0;
    let a3 = x & 0x0F0F00000F0F0000;
    let a = a1 | (a2 << 12) | (a3 >> 12);
    let b1 = a & 0xFF00FF0000FF00FF;
    let b2 = a & 0x00FF00FF00000000;
    let b3 = a & 0x00000000FF00FF00;
    b1 | (b2 >> 24) | (b3 << 24)
}

pub(crate) fn extract_line(board: BoardRaw, line_idx: u64) -> Line {
    (board >> ((3 - line_idx) * 16)) & 0xffff
}

/// Return the cell's actual value (0 if empty), e.g., 2, 4, 8, ...
pub fn get_tile_val(board: Board, idx: usize) -> u16 {
    let raw_val = (board.0 >> (60 - (4 * idx))) & 0xf;
    if raw_val == 0 {
        0
    } else {
        2_u16.pow(raw_val as u32)
    }
}

pub(crate) fn line_to_vec(line: Line) -> Vec<Tile> {
    (0..4).fold(Vec::new(), |mut tiles, tile_idx| {
        tiles.push(line >> ((3 - tile_idx) * 4) & 0xf);
        tiles
    })
}

/// True iff the board is full and no orthogonally adjacent pair is equal.
///
/// On a full board a horizontal merge exists iff a Left shift changes the
/// board, and a vertical merge exists iff an Up shift does (the adjacency
/// relation is undirected), so two shift probes cover all four directions.
pub fn is_stuck(board: Board) -> bool {
    count_empty(board) == 0 && shift(board, Move::Left) == board && shift(board, Move::Up) == board
}

// https://stackoverflow.com/questions/38225571/count-number-of-zero-nibbles-in-an-unsigned-64-bit-integer
/// Count the number of zero tiles.
pub fn count_empty(board: Board) -> u64 {
    16 - count_non_empty(board)
}

pub(crate) fn generate_random_tile<R: Rng + ?Sized>(rng: &mut R) -> Tile {
    if rng.gen_range(0..10) < 9 { 1 } else { 2 }
}

fn shift_rows(board: Board, move_dir: Move) -> (Board, Score) {
    let s = stores();
    let table: &[u64] = match move_dir {
        Move::Left => &s.shift_left,
        Move::Right => &s.shift_right,
        _ => panic!("Trying to move up or down in shift rows"),
    };
    (0..4).fold((Board(0), 0), |(new_board, points), row_idx| {
        let row_val = extract_line(board.0, row_idx) as u16;
        let new_row_val = get_line_entry(table, row_val);
        (
            Board(new_board.0 | (new_row_val << (48 - (16 * row_idx)))),
            points + get_points_entry(row_val),
        )
    })
}

fn shift_cols(board: Board, move_dir: Move) -> (Board, Score) {
    let transpose_board = transpose(board.0);
    let s = stores();
    let table: &[u64] = match move_dir {
        Move::Up => &s.shift_up,
        Move::Down => &s.shift_down,
        _ => panic!("Trying to move left or right in shift cols"),
    };
    (0..4).fold((Board(0), 0), |(new_board, points), col_idx| {
        let col_val = extract_line(transpose_board, col_idx) as u16;
        let new_col_val = get_line_entry(table, col_val);
        (
            Board(new_board.0 | (new_col_val << (12 - (4 * col_idx)))),
            points + get_points_entry(col_val),
        )
    })
}

pub(crate) fn shift_line(line: Line, direction: Move) -> Line {
    let tiles = line_to_vec(line);
    match direction {
        Move::Left | Move::Right => vec_to_row(shift_vec(tiles, direction)),
        Move::Up | Move::Down => vec_to_col(shift_vec(tiles, direction)),
    }
}

/// Points earned by merging this line. The merge multiset is invariant under
/// reversal (merges pair up within runs of equal exponents), so one table
/// indexed by the pre-move line serves all four directions.
pub(crate) fn merge_points(line: Line) -> Score {
    shift_vec_left(line_to_vec(line)).1
}

fn vec_to_row(tiles: Vec<Tile>) -> Line {
    tiles[0] << 12 | tiles[1] << 8 | tiles[2] << 4 | tiles[3]
}

fn vec_to_col(tiles: Vec<Tile>) -> Line {
    tiles[0] << 48 | tiles[1] << 32 | tiles[2] << 16 | tiles[3]
}

fn shift_vec(vec: Vec<Tile>, direction: Move) -> Vec<Tile> {
    match direction {
        Move::Left | Move::Up => shift_vec_left(vec).0,
        Move::Right | Move::Down => shift_vec_right(vec),
    }
}

fn shift_vec_right(vec: Vec<Tile>) -> Vec<Tile> {
    let rev_vec: Vec<Tile> = vec.into_iter().rev().collect();
    shift_vec_left(rev_vec).0.iter().rev().copied().collect()
}

fn shift_vec_left(mut vec: Vec<Tile>) -> (Vec<Tile>, Score) {
    let mut points = 0;
    for i in 0..4 {
        points += calculate_left_shift(&mut vec[i..]);
    }
    (vec, points)
}

/// Advance the leading tile of `slice` as far left as it goes: skip empties,
/// merge into an equal neighbor at most once, otherwise stop at the blocker.
/// Returns the points earned if a merge happened.
fn calculate_left_shift(slice: &mut [Tile]) -> Score {
    let mut acc = 0;
    let mut points = 0;
    for s in slice.iter_mut() {
        let val = *s;
        if acc != 0 && acc == val {
            // A merged slot is locked: the scan stops here, so nothing can
            // merge into it again this move.
            *s = 0;
            acc += 1;
            points = 1 << acc;
            break;
        } else if acc != 0 && val != 0 && acc != val {
            break;
        } else if acc == 0 && val != 0 {
            *s = 0;
            acc = val;
        }
        // continue scan otherwise
    }
    slice[0] = acc;
    points
}

fn count_non_empty(board: Board) -> u64 {
    let mut board_copy = board.0;
    board_copy |= board_copy >> 1;
    board_copy |= board_copy >> 2;
    board_copy &= 0x1111111111111111;
    board_copy.count_ones() as u64
}

pub(crate) fn format_val(val: &u8) -> String {
    match val {
        0 => String::from("       "),
        &x => {
            let mut x = (2_i32.pow(x as u32)).to_string();
            while x.len() < 7 {
                match x.len() {
                    6 => x = format!(" {}", x),
                    _ => x = format!(" {} ", x),
                }
            }
            x
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_shift_vec_left() {
        assert_eq!(shift_vec_left(vec![0, 0, 0, 0]), (vec![0, 0, 0, 0], 0));
        assert_eq!(shift_vec_left(vec![1, 2, 1, 2]), (vec![1, 2, 1, 2], 0));
        assert_eq!(shift_vec_left(vec![1, 1, 2, 2]), (vec![2, 3, 0, 0], 12));
        assert_eq!(shift_vec_left(vec![1, 0, 0, 1]), (vec![2, 0, 0, 0], 4));
        assert_eq!(shift_vec_left(vec![1, 1, 1, 1]), (vec![2, 2, 0, 0], 8));
        assert_eq!(shift_vec_left(vec![1, 1, 1, 0]), (vec![2, 1, 0, 0], 4));
    }

    #[test]
    fn it_shift_vec_right() {
        assert_eq!(shift_vec_right(vec![0, 0, 0, 0]), vec![0, 0, 0, 0]);
        assert_eq!(shift_vec_right(vec![1, 2, 1, 2]), vec![1, 2, 1, 2]);
        assert_eq!(shift_vec_right(vec![1, 1, 2, 2]), vec![0, 0, 2, 3]);
        assert_eq!(shift_vec_right(vec![5, 0, 0, 5]), vec![0, 0, 0, 6]);
        assert_eq!(shift_vec_right(vec![0, 2, 2, 2]), vec![0, 0, 2, 3]);
    }

    #[test]
    fn merge_points_direction_independent() {
        for line in 0..=0xffff_u64 {
            let left = shift_vec_left(line_to_vec(line)).1;
            let rev: Vec<Tile> = line_to_vec(line).into_iter().rev().collect();
            let right = shift_vec_left(rev).1;
            assert_eq!(left, right, "line {:#06x}", line);
        }
    }

    #[test]
    fn test_shift_left() {
        assert_eq!(
            shift(Board::from_raw(0x0000), Move::Left),
            Board::from_raw(0x0000)
        );
        assert_eq!(
            shift(Board::from_raw(0x0002), Move::Left),
            Board::from_raw(0x2000)
        );
        assert_eq!(
            shift(Board::from_raw(0x2020), Move::Left),
            Board::from_raw(0x3000)
        );
        assert_eq!(
            shift(Board::from_raw(0x1332), Move::Left),
            Board::from_raw(0x1420)
        );
        assert_eq!(
            shift(Board::from_raw(0x1234), Move::Left),
            Board::from_raw(0x1234)
        );
        assert_eq!(
            shift(Board::from_raw(0x1002), Move::Left),
            Board::from_raw(0x1200)
        );
        assert_ne!(
            shift(Board::from_raw(0x1210), Move::Left),
            Board::from_raw(0x2200)
        );
    }

    #[test]
    fn test_shift_right() {
        assert_eq!(
            shift(Board::from_raw(0x0000), Move::Right),
            Board::from_raw(0x0000)
        );
        assert_eq!(
            shift(Board::from_raw(0x2000), Move::Right),
            Board::from_raw(0x0002)
        );
        assert_eq!(
            shift(Board::from_raw(0x2020), Move::Right),
            Board::from_raw(0x0003)
        );
        assert_eq!(
            shift(Board::from_raw(0x1332), Move::Right),
            Board::from_raw(0x0142)
        );
        assert_eq!(
            shift(Board::from_raw(0x1234), Move::Right),
            Board::from_raw(0x1234)
        );
        assert_eq!(
            shift(Board::from_raw(0x1002), Move::Right),
            Board::from_raw(0x0012)
        );
        assert_ne!(
            shift(Board::from_raw(0x0121), Move::Right),
            Board::from_raw(0x0022)
        );
    }

    #[test]
    fn test_move_left() {
        let game = Board::from_raw(0x1234133220021002);
        let game = shift(game, Move::Left);
        assert_eq!(game, Board::from_raw(0x1234142030001200));
    }

    #[test]
    fn test_move_up() {
        let game = Board::from_raw(0x1121230033004222);
        let game = shift(game, Move::Up);
        assert_eq!(game, Board::from_raw(0x1131240232004000));
    }

    #[test]
    fn test_move_right() {
        let game = Board::from_raw(0x1234133220021002);
        let game = shift(game, Move::Right);
        assert_eq!(game, Board::from_raw(0x1234014200030012));
    }

    #[test]
    fn test_move_down() {
        let game = Board::from_raw(0x1121230033004222);
        let game = shift(game, Move::Down);
        assert_eq!(game, Board::from_raw(0x1000210034014232));
    }

    #[test]
    fn test_shift_scored_rows() {
        // Row [2,2,0,0] merges into [4,0,0,0] for 4 points.
        assert_eq!(
            shift_scored(Board::from_raw(0x1100), Move::Left),
            (Board::from_raw(0x2000), 4)
        );
        // Row of four 2s: two independent pair merges, 8 points total.
        assert_eq!(
            shift_scored(Board::from_raw(0x1111), Move::Left),
            (Board::from_raw(0x2200), 8)
        );
        // Three 2s merge exactly one pair.
        assert_eq!(
            shift_scored(Board::from_raw(0x1110), Move::Left),
            (Board::from_raw(0x2100), 4)
        );
        // Merges in two different rows accumulate.
        assert_eq!(
            shift_scored(Board::from_raw(0x1100_0000_2200_0000), Move::Left),
            (Board::from_raw(0x2000_0000_3000_0000), 4 + 8)
        );
        // No merge, no points, even when tiles slide.
        assert_eq!(
            shift_scored(Board::from_raw(0x0102), Move::Left),
            (Board::from_raw(0x1200), 0)
        );
    }

    #[test]
    fn test_shift_scored_cols() {
        // Column 0 holds [2,2,0,0]; moving up merges for 4 points.
        assert_eq!(
            shift_scored(Board::from_raw(0x1000_1000_0000_0000), Move::Up),
            (Board::from_raw(0x2000_0000_0000_0000), 4)
        );
        assert_eq!(
            shift_scored(Board::from_raw(0x1000_1000_0000_0000), Move::Down),
            (Board::from_raw(0x0000_0000_0000_2000), 4)
        );
    }

    #[test]
    fn it_test_insert_random_tile() {
        let mut rng = rand::thread_rng();
        let mut game = Board::EMPTY;
        for _ in 0..16 {
            game = game.with_random_tile(&mut rng);
        }
        assert_eq!(count_empty(game), 0);
        // Board is full: inserting is silently skipped.
        assert_eq!(game.with_random_tile(&mut rng), game);
    }

    #[test]
    fn it_count_empty() {
        let game = Board::from_raw(0x1111000011110000);
        assert_eq!(count_empty(game), 8);
        let game = Board::from_raw(0x1100000000000000);
        assert_eq!(count_empty(game), 14);
    }

    #[test]
    fn it_get_tile_val() {
        let game = Board::from_raw(0x0123456789abcdef);
        assert_eq!(get_tile_val(game, 3), 8);
        assert_eq!(get_tile_val(game, 10), 1024);
        assert_eq!(get_tile_val(game, 15), 32768);

        // Empty tiles return 0
        let empty_board = Board::from_raw(0x0000000000000000);
        assert_eq!(get_tile_val(empty_board, 0), 0);
        assert_eq!(get_tile_val(empty_board, 8), 0);
        assert_eq!(get_tile_val(empty_board, 15), 0);
    }

    /// Reference predicate: the original forward scan, checking only each
    /// cell's right and down neighbor. Equivalent to "no adjacent equal pair
    /// in any direction" because adjacency is symmetric.
    fn is_stuck_reference(board: Board) -> bool {
        let cells = board.to_vec();
        for i in 0..4 {
            for j in 0..4 {
                let v = cells[i * 4 + j];
                if v == 0 {
                    return false;
                }
                if i < 3 && v == cells[(i + 1) * 4 + j] {
                    return false;
                }
                if j < 3 && v == cells[i * 4 + j + 1] {
                    return false;
                }
            }
        }
        true
    }

    #[test]
    fn is_stuck_matches_adjacency_scan() {
        // Exhaust all 2^16 full boards whose tiles are drawn from {2, 4},
        // plus a punctured variant of each (never stuck).
        for mask in 0..=0xffff_u64 {
            let mut raw: u64 = 0;
            for bit in 0..16 {
                let exp = 1 + ((mask >> bit) & 1);
                raw |= exp << (60 - 4 * bit);
            }
            let board = Board::from_raw(raw);
            assert_eq!(
                is_stuck(board),
                is_stuck_reference(board),
                "board {:?}",
                board
            );
            let punctured = Board::from_raw(raw & !(0xf << 60));
            assert!(!is_stuck(punctured));
        }
    }

    #[test]
    fn it_is_stuck_fixtures() {
        assert!(!is_stuck(Board::EMPTY));
        // Full checkerboard: no adjacent pair equal.
        assert!(is_stuck(Board::from_raw(0x1212_2121_1212_2121)));
        // Full board with one horizontal pair.
        assert!(!is_stuck(Board::from_raw(0x1212_2121_1212_2122)));
        // Full board with one vertical pair (col 0, rows 2-3).
        assert!(!is_stuck(Board::from_raw(0x1212_2121_1212_1121)));
    }
}
