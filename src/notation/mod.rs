//! # Diagram notations
//!
//! Text forms of a diagram, each in its own module:
//!
//! - [`xfen`]: the compact, FEN-like board string handed to the solver
//! - [`pieces_clause`]: the Popeye `Pieces` clause a human edits
//! - [`algebraic`]: a color-to-token-list map for structured consumers
//! - [`snapshot`]: lossless session save and restore
//! - [`stipulation`]: reading the side to move off a stipulation
//!
//! The first three are permissive. They decode whatever they can and report
//! what they stepped over as [`Warning`](crate::error::Warning)s.

pub mod algebraic;
pub mod pieces_clause;
pub mod snapshot;
pub mod stipulation;
pub mod xfen;

use std::{fmt::Display, str::FromStr};

use chumsky::prelude::*;
use strum::VariantNames;

use crate::{
    error::SquareParseError,
    model::{Color, Square, catalog::Role, piece::Piece},
};

/// Types with a canonical text form that can be read back.
pub trait Parsable: Sized {
    fn parser<'s>() -> impl Parser<'s, &'s str, Self>;
}

impl Parsable for Square {
    fn parser<'s>() -> impl Parser<'s, &'s str, Self> {
        one_of("abcdefghABCDEFGH")
            .then(one_of("12345678"))
            .try_map(|(f, r): (char, char), _| {
                let x = (f.to_ascii_lowercase() as u8 - b'a') as i8;
                let y = (b'8' - r as u8) as i8;
                Square::from_coords(x, y).ok_or(EmptyErr::default())
            })
            .labelled("expected a board square a1 ... h8")
    }
}

impl FromStr for Square {
    type Err = SquareParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Square::parser()
            .then_ignore(end())
            .parse(s)
            .into_output()
            .ok_or_else(|| SquareParseError(s.to_string()))
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(Square::VARIANTS[self.ix()])
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if f.alternate() {
            write!(f, "{}", &self.name()[..1])
        } else {
            f.write_str(self.name())
        }
    }
}

/// Popeye code, or with `{:#}` the long name.
impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if f.alternate() {
            f.write_str(self.name())
        } else {
            f.write_str(self.code())
        }
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.color)?;
        for s in &self.specifiers {
            write!(f, " {}", s.keyword())?;
        }
        write!(f, " {:#}", self.role)
    }
}

#[test]
fn square_text_roundtrip() {
    use strum::IntoEnumIterator;
    for sq in Square::iter() {
        let text = sq.to_string();
        assert_eq!(text.parse::<Square>(), Ok(sq), "{text}");
        assert_eq!(text.len(), 2);
    }
    assert_eq!("E4".parse::<Square>(), Ok(Square::e4));
    assert_eq!(Square::a8.to_string(), "a8");
    assert_eq!(Square::h1.to_string(), "h1");
    assert!("i1".parse::<Square>().is_err());
    assert!("a9".parse::<Square>().is_err());
    assert!("a1b".parse::<Square>().is_err());
    assert!("".parse::<Square>().is_err());
}

#[test]
fn display_forms() {
    use crate::model::catalog::Specifier;
    assert_eq!(format!("{}", Color::NEUTRAL), "neutral");
    assert_eq!(format!("{:#}", Color::BLACK), "b");
    assert_eq!(format!("{}", Role::CAMEL), "CA");
    assert_eq!(format!("{:#}", Role::CAMEL), "camel");
    let p = Piece::new(Role::QUEEN, Color::WHITE).with([Specifier::ROYAL]);
    assert_eq!(p.to_string(), "white royal queen");
    assert_eq!(Piece::new(Role::PAWN, Color::BLACK).to_string(), "black pawn");
}
