use serde::{Deserialize, Serialize};
use strum::{EnumIs, EnumIter, EnumString, FromRepr, IntoStaticStr, VariantNames};

pub mod board;
pub mod catalog;
pub mod mailbox;
pub mod piece;
pub mod transform;

/// Representation of the squares on a diagram.
///
/// This enum uses the convention of numbering squares
/// starting with a8 = 0 and then counting over the files
/// first, b8 = 1, c8 = 2, ... and then down the ranks,
/// a7 = 8, a6 = 16, ... ending with h1 = 63.
///
/// That is the reading order of a printed diagram, and the order
/// in which the compact notation lists the squares.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
    FromRepr, VariantNames, EnumIter, Serialize, Deserialize)]
#[repr(u8)]
#[rustfmt::skip]
pub enum Square {
    a8 = 0o00, b8 = 0o01, c8 = 0o02, d8 = 0o03, e8 = 0o04, f8 = 0o05, g8 = 0o06, h8 = 0o07,
    a7 = 0o10, b7 = 0o11, c7 = 0o12, d7 = 0o13, e7 = 0o14, f7 = 0o15, g7 = 0o16, h7 = 0o17,
    a6 = 0o20, b6 = 0o21, c6 = 0o22, d6 = 0o23, e6 = 0o24, f6 = 0o25, g6 = 0o26, h6 = 0o27,
    a5 = 0o30, b5 = 0o31, c5 = 0o32, d5 = 0o33, e5 = 0o34, f5 = 0o35, g5 = 0o36, h5 = 0o37,
    a4 = 0o40, b4 = 0o41, c4 = 0o42, d4 = 0o43, e4 = 0o44, f4 = 0o45, g4 = 0o46, h4 = 0o47,
    a3 = 0o50, b3 = 0o51, c3 = 0o52, d3 = 0o53, e3 = 0o54, f3 = 0o55, g3 = 0o56, h3 = 0o57,
    a2 = 0o60, b2 = 0o61, c2 = 0o62, d2 = 0o63, e2 = 0o64, f2 = 0o65, g2 = 0o66, h2 = 0o67,
    a1 = 0o70, b1 = 0o71, c1 = 0o72, d1 = 0o73, e1 = 0o74, f1 = 0o75, g1 = 0o76, h1 = 0o77,
}

impl Square {
    /// Use this Square as an array index.
    #[inline]
    pub fn ix(self) -> usize {
        self as usize
    }

    /// Checked conversion from an unchecked linear index.
    #[inline]
    pub fn new(ix: i32) -> Option<Self> {
        u8::try_from(ix).ok().and_then(Self::from_repr)
    }

    /// Split a square into file (0 = a) and row (0 = eighth rank).
    #[inline]
    pub fn coords(self) -> (i8, i8) {
        ((self as u8 & 0x7) as i8, ((self as u8 & 0x38) >> 3) as i8)
    }

    /// Join file and row, `None` when either falls off the board.
    #[inline]
    pub fn from_coords(x: i8, y: i8) -> Option<Self> {
        if (0..8).contains(&x) && (0..8).contains(&y) {
            Self::from_repr((x | y << 3) as u8)
        } else {
            None
        }
    }

    #[inline]
    pub fn file(self) -> char {
        (b'a' + (self as u8 & 0x7)) as char
    }

    #[inline]
    pub fn rank(self) -> u8 {
        8 - ((self as u8 & 0x38) >> 3)
    }

    /// Display shade only; a1 and h8 are dark.
    #[inline]
    pub fn is_light(self) -> bool {
        (self.ix() + (self.ix() >> 3)) % 2 == 0
    }
}

#[test]
fn square_coords_roundtrip() {
    use strum::IntoEnumIterator;
    for sq in Square::iter() {
        let (x, y) = sq.coords();
        assert_eq!(Square::from_coords(x, y), Some(sq));
        assert_eq!(Square::new(sq.ix() as i32), Some(sq));
    }
    assert_eq!(Square::e1.coords(), (4, 7));
    assert_eq!(Square::from_coords(-1, 7), None);
    assert_eq!(Square::from_coords(0, 8), None);
    assert_eq!(Square::new(64), None);
    assert_eq!(Square::new(-1), None);
}

#[test]
fn square_file_rank() {
    assert_eq!((Square::a8.file(), Square::a8.rank()), ('a', 8));
    assert_eq!((Square::h1.file(), Square::h1.rank()), ('h', 1));
    assert_eq!((Square::e4.file(), Square::e4.rank()), ('e', 4));
    assert!(Square::a8.is_light());
    assert!(!Square::a1.is_light());
    assert!(Square::h1.is_light());
}

/// Color of a piece on a problem diagram.
///
/// Neutral pieces belong to both sides at once and are
/// the reason this is not simply a boolean.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
    EnumIs, EnumIter, EnumString, IntoStaticStr, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Color {
    WHITE = 0,
    BLACK = 1,
    NEUTRAL = 2,
}

impl Color {
    /// Opposing color. Neutral opposes itself.
    #[inline]
    pub fn opp(self) -> Self {
        match self {
            Self::WHITE => Self::BLACK,
            Self::BLACK => Self::WHITE,
            Self::NEUTRAL => Self::NEUTRAL,
        }
    }

    /// Associated array index.
    #[inline]
    pub fn ix(self) -> usize {
        self as usize
    }

    /// Full lowercase name, as written in the pieces clause.
    #[inline]
    pub fn name(self) -> &'static str {
        self.into()
    }
}

#[test]
fn color_names() {
    assert_eq!("white".parse::<Color>(), Ok(Color::WHITE));
    assert_eq!("Neutral".parse::<Color>(), Ok(Color::NEUTRAL));
    assert!("red".parse::<Color>().is_err());
    assert_eq!(Color::BLACK.name(), "black");
    assert_eq!(Color::WHITE.opp(), Color::BLACK);
    assert_eq!(Color::NEUTRAL.opp(), Color::NEUTRAL);
}
