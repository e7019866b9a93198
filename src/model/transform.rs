//! # Geometric transforms
//!
//! Every transform is a coordinate map `(x, y) -> (x, y)` fed to
//! [`Board::remap`]. Coordinates are file and row, with row 0 on the eighth
//! rank, so `(0, 0)` is a8 and `(7, 7)` is h1.
//!
//! Squares mapped off the board lose their occupant. Rotations and mirrors
//! never do that, shifts do.

use std::sync::LazyLock;

use indexmap::IndexSet;
use regex::{Captures, Regex};
use strum::{EnumIter, EnumString, IntoStaticStr};

use crate::model::{Square, board::Board, mailbox::Mailbox};

/// A coordinate map.
pub type CoordMap<'a> = dyn Fn(i8, i8) -> (i8, i8) + 'a;

#[inline]
fn image(sq: Square, f: &CoordMap<'_>) -> Option<Square> {
    let (x, y) = sq.coords();
    let (x, y) = f(x, y);
    Square::from_coords(x, y)
}

impl Board {
    /// Rebuild the board with every piece and imitator moved through `f`.
    ///
    /// The new cells are assembled off to the side and swapped in whole.
    /// If two squares land on the same target the later one in index
    /// order wins.
    pub fn remap(&mut self, f: &CoordMap<'_>) {
        let mut cells = Mailbox::default();
        for (sq, cell) in self.cells.iter_mut() {
            if cell.is_none() {
                continue;
            }
            if let Some(to) = image(sq, f) {
                cells.set(to, cell.take());
            }
        }

        let imitators = self
            .imitators
            .iter()
            .filter_map(|&sq| image(sq, f))
            .collect::<IndexSet<_>>();

        self.cells = cells;
        self.imitators = imitators;
    }

    /// Quarter turn `(x, y) -> (y, 7 - x)`, applied once per 90 degrees.
    ///
    /// Any angle other than 90, 180 and 270 leaves the board alone.
    pub fn rotate(&mut self, angle: u16) {
        let turns = match angle {
            90 => 1,
            180 => 2,
            270 => 3,
            _ => 0,
        };
        for _ in 0..turns {
            self.remap(&|x, y| (y, 7 - x));
        }
    }

    /// Reflect the board so that corner `a` and corner `b` change places.
    ///
    /// Only the pairs a1-h1, a1-a8, a1-h8 and h1-a8 (in either order) name
    /// an axis. Anything else is ignored.
    pub fn mirror(&mut self, a: Square, b: Square) {
        use Square::*;
        let f: fn(i8, i8) -> (i8, i8) = match (a, b) {
            (a1, h1) | (h1, a1) => |x, y| (7 - x, y),
            (a1, a8) | (a8, a1) => |x, y| (x, 7 - y),
            (a1, h8) | (h8, a1) => |x, y| (y, x),
            (h1, a8) | (a8, h1) => |x, y| (7 - y, 7 - x),
            _ => return,
        };
        self.remap(&f);
    }

    /// Translate everything by the vector from `from` to `to`.
    pub fn shift(&mut self, from: Square, to: Square) {
        let (fx, fy) = from.coords();
        let (tx, ty) = to.coords();
        let (dx, dy) = (tx - fx, ty - fy);
        self.remap(&move |x, y| (x + dx, y + dy));
    }

    /// White becomes black and black white; neutral pieces stay.
    pub fn invert_colors(&mut self) {
        for (_, p) in self.pieces_mut() {
            p.invert_color();
        }
    }

    pub fn apply(&mut self, transform: NamedTransform) {
        self.remap(&move |x, y| transform.map(x, y));
    }
}

/// Board operations by the names the editor sends them under.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, IntoStaticStr)]
pub enum NamedTransform {
    Shift_up,
    Shift_down,
    Shift_left,
    Shift_right,
    Rotate_CW,
    Rotate_CCW,
    Mirror_horizontal,
    Mirror_vertical,
}

impl NamedTransform {
    /// The coordinate formula of this transform.
    pub fn map(self, x: i8, y: i8) -> (i8, i8) {
        match self {
            Self::Shift_up => (x, y - 1),
            Self::Shift_down => (x, y + 1),
            Self::Shift_left => (x - 1, y),
            Self::Shift_right => (x + 1, y),
            Self::Rotate_CW => (7 - y, x),
            Self::Rotate_CCW => (y, 7 - x),
            Self::Mirror_horizontal => (x, 7 - y),
            Self::Mirror_vertical => (7 - x, y),
        }
    }

    #[inline]
    pub fn name(self) -> &'static str {
        self.into()
    }
}

static ALGEBRAIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[a-h][1-8]").unwrap());

/// Move every square mentioned in `text` through `transform`.
///
/// Used on twin lines and condition arguments that travel with a diagram.
/// Results wrap around the edges so the text always names real squares.
pub fn rewrite_squares(text: &str, transform: NamedTransform) -> String {
    ALGEBRAIC
        .replace_all(text, |caps: &Captures| {
            let b = caps[0].as_bytes();
            let x = (b[0] - b'a') as i8;
            let y = (b'8' - b[1]) as i8;
            let (x, y) = transform.map(x, y);
            let (x, y) = (x.rem_euclid(8), y.rem_euclid(8));
            format!("{}{}", (b'a' + x as u8) as char, 8 - y)
        })
        .into_owned()
}

#[cfg(test)]
use crate::model::{
    Color,
    catalog::{Role, Specifier},
    piece::Piece,
};

#[cfg(test)]
fn sample() -> Board {
    let mut board = Board::new();
    board.add(Piece::new(Role::KING, Color::WHITE), Square::e1);
    board.add(Piece::new(Role::ROOK, Color::BLACK).with([Specifier::ROYAL]), Square::a1);
    board.add(Piece::new(Role::GRASSHOPPER, Color::NEUTRAL), Square::c6);
    board.add_imitator(Square::h7);
    board
}

#[test]
fn quarter_turn_moves_corners() {
    let mut board = sample();
    board.rotate(90);
    assert_eq!(board.get(Square::h1).map(|p| p.role), Some(Role::ROOK));
    assert_eq!(board.get(Square::h5).map(|p| p.role), Some(Role::KING));
    assert!(board.is_imitator(Square::b8));
    assert_eq!(board.get(Square::c3).map(|p| p.color), Some(Color::NEUTRAL));

    let mut four = sample();
    for _ in 0..4 {
        four.rotate(90);
    }
    assert_eq!(four, sample());

    let mut twice = sample();
    twice.rotate(180);
    let mut half = sample();
    half.rotate(90);
    half.rotate(90);
    assert_eq!(twice, half);

    let mut odd = sample();
    odd.rotate(45);
    assert_eq!(odd, sample());
}

#[test]
fn mirrors_swap_their_corners() {
    use Square::*;
    for (a, b) in [(a1, h1), (a1, a8), (a1, h8), (h1, a8)] {
        let mut board = Board::new();
        board.add(Piece::new(Role::QUEEN, Color::WHITE), a);
        board.mirror(a, b);
        assert_eq!(board.get(b).map(|p| p.role), Some(Role::QUEEN), "{a:?} {b:?}");
        assert_eq!(board.get(a), None);

        let mut twice = sample();
        twice.mirror(b, a);
        twice.mirror(a, b);
        assert_eq!(twice, sample());
    }

    let mut board = sample();
    board.mirror(a1, e4);
    assert_eq!(board, sample());
}

#[test]
fn shift_drops_pieces_off_the_edge() {
    let mut board = sample();
    board.shift(Square::b1, Square::a1);
    assert_eq!(board.get(Square::d1).map(|p| p.role), Some(Role::KING));
    assert_eq!(board.pieces().count(), 2);
    assert!(board.is_imitator(Square::g7));

    let mut board = sample();
    board.shift(Square::a1, Square::a2);
    assert_eq!(board.get(Square::a2).map(|p| p.color), Some(Color::BLACK));
    assert_eq!(board.get(Square::c7).map(|p| p.role), Some(Role::GRASSHOPPER));
    assert!(board.is_imitator(Square::h8));
    assert!(board.black_to_move());

    let mut board = sample();
    board.shift(Square::a8, Square::a1);
    assert_eq!(board.pieces().count(), 0);
    assert!(board.imitators().is_empty());
}

#[test]
fn colors_invert_in_place() {
    let mut board = sample();
    board.invert_colors();
    assert_eq!(board.get(Square::e1).map(|p| p.color), Some(Color::BLACK));
    assert_eq!(board.get(Square::a1).map(|p| p.color), Some(Color::WHITE));
    assert_eq!(board.get(Square::c6).map(|p| p.color), Some(Color::NEUTRAL));
    board.invert_colors();
    assert_eq!(board, sample());
}

#[test]
fn named_transforms() {
    use strum::IntoEnumIterator;

    let mut board = sample();
    board.apply("Shift_right".parse().unwrap());
    assert_eq!(board.get(Square::f1).map(|p| p.role), Some(Role::KING));

    let mut cw = sample();
    cw.apply(NamedTransform::Rotate_CW);
    let mut three_quarters = sample();
    three_quarters.rotate(270);
    assert_eq!(cw, three_quarters);

    let mut ccw = sample();
    ccw.apply(NamedTransform::Rotate_CCW);
    let mut quarter = sample();
    quarter.rotate(90);
    assert_eq!(ccw, quarter);

    let mut flipped = sample();
    flipped.apply(NamedTransform::Mirror_horizontal);
    let mut mirrored = sample();
    mirrored.mirror(Square::a1, Square::a8);
    assert_eq!(flipped, mirrored);

    for t in NamedTransform::iter() {
        assert_eq!(t.name().parse::<NamedTransform>(), Ok(t));
    }
}

#[test]
fn remap_with_borrowed_offset() {
    let (dx, dy) = (2i8, -1i8);
    let offset = (dx, dy);
    let mut board = sample();
    board.remap(&|x, y| (x + offset.0, y + offset.1));
    let mut shifted = sample();
    shifted.shift(Square::e1, Square::g2);
    assert_eq!(board, shifted);
    assert_eq!(board.get(Square::g2).map(|p| p.role), Some(Role::KING));
}

#[test]
fn rewrite_wraps_around() {
    assert_eq!(rewrite_squares("rex b2-c3", NamedTransform::Shift_up), "rex b3-c4");
    assert_eq!(rewrite_squares("a8 h1", NamedTransform::Shift_up), "a1 h2");
    assert_eq!(rewrite_squares("a1", NamedTransform::Shift_left), "h1");
    assert_eq!(rewrite_squares("a1 h8", NamedTransform::Mirror_vertical), "h1 a8");
    assert_eq!(rewrite_squares("a8", NamedTransform::Rotate_CW), "h8");
    assert_eq!(rewrite_squares("no squares", NamedTransform::Rotate_CW), "no squares");
}
