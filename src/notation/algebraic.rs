//! # Structured color map
//!
//! The diagram as three lists of `<code><square>` tokens, one per color:
//!
//! ```toml
//! white = ["Ke1", "Qd1"]
//! black = ["Ke8"]
//! neutral = ["G2a1"]
//! ```
//!
//! Meant for programs rather than people. Specifiers and imitators are not
//! written. On the way in a token may name several squares (`Pa2b2c2`) and
//! may be preceded by specifier keywords (`royal Ke1`).

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::{
    config::DiagramConfig,
    error::{StrictError, Warning},
    model::{
        Color,
        board::Board,
        catalog::{Role, Specifier},
        piece::Piece,
    },
    notation::pieces_clause::parse_group,
};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorMap {
    pub white: Vec<String>,
    pub black: Vec<String>,
    pub neutral: Vec<String>,
}

impl ColorMap {
    pub fn tokens(&self, color: Color) -> &Vec<String> {
        match color {
            Color::WHITE => &self.white,
            Color::BLACK => &self.black,
            Color::NEUTRAL => &self.neutral,
        }
    }

    pub fn tokens_mut(&mut self, color: Color) -> &mut Vec<String> {
        match color {
            Color::WHITE => &mut self.white,
            Color::BLACK => &mut self.black,
            Color::NEUTRAL => &mut self.neutral,
        }
    }
}

/// One token per piece, in square order.
pub fn encode(board: &Board) -> ColorMap {
    let mut res = ColorMap::default();
    for (sq, p) in board.pieces() {
        res.tokens_mut(p.color).push(format!("{}{sq}", p.role));
    }
    res
}

/// Clear `board` and place the pieces of `map`.
pub fn decode_into(board: &mut Board, map: &ColorMap) -> Vec<Warning> {
    use strum::IntoEnumIterator;

    board.clear();
    let mut warnings = vec![];

    for color in Color::iter() {
        for token in map.tokens(color) {
            let token = token.to_lowercase();
            let mut words = token.split_whitespace().collect::<Vec<_>>();
            let Some(group) = words.pop() else {
                continue;
            };

            let mut specs = IndexSet::new();
            for word in words {
                match word.parse::<Specifier>() {
                    Ok(spec) => {
                        specs.insert(spec);
                    }
                    Err(_) => warnings.push(Warning::UnparsedWord {
                        word: word.to_string(),
                    }),
                }
            }

            let Some((code, squares)) = parse_group(group) else {
                warnings.push(Warning::UnparsedWord {
                    word: group.to_string(),
                });
                continue;
            };
            let Some(role) = Role::from_code(code) else {
                warnings.push(Warning::UnknownRole {
                    code: code.to_uppercase(),
                });
                continue;
            };

            for sq in squares {
                board.add(Piece::new(role, color).with(specs.iter().copied()), sq);
            }
        }
    }

    warnings
}

pub fn decode_with(map: &ColorMap, config: &DiagramConfig) -> (Board, Vec<Warning>) {
    let mut board = Board::with_config(config);
    let warnings = decode_into(&mut board, map);
    (board, warnings)
}

pub fn decode(map: &ColorMap) -> (Board, Vec<Warning>) {
    decode_with(map, &DiagramConfig::default())
}

pub fn decode_strict(map: &ColorMap) -> Result<Board, StrictError> {
    let (board, warnings) = decode(map);
    StrictError::check(board, warnings)
}

impl Board {
    #[inline]
    pub fn to_color_map(&self) -> ColorMap {
        encode(self)
    }
}

#[cfg(test)]
use crate::model::Square;

#[test]
fn tokens_per_color() {
    let mut board = Board::new();
    board.add(Piece::new(Role::KING, Color::WHITE), Square::e1);
    board.add(Piece::new(Role::KING, Color::BLACK), Square::e8);
    board.add(Piece::new(Role::CAMEL, Color::NEUTRAL).with([Specifier::MAGIC]), Square::c3);
    board.add_imitator(Square::h4);

    let map = board.to_color_map();
    assert_eq!(map.white, vec!["Ke1"]);
    assert_eq!(map.black, vec!["Ke8"]);
    assert_eq!(map.neutral, vec!["CAc3"]);

    let (back, warnings) = decode(&map);
    assert!(warnings.is_empty());
    assert_eq!(back.pieces().count(), 3);
    assert_eq!(back.get(Square::c3), Some(&Piece::new(Role::CAMEL, Color::NEUTRAL)));
    assert!(back.imitators().is_empty());
}

#[test]
fn decoding_accepts_specifiers_and_runs() {
    let map = ColorMap {
        white: vec!["royal Ke1".to_string(), "Pa2b2c2".to_string()],
        black: vec!["ke8".to_string(), "Zz9".to_string(), "XYa1".to_string()],
        neutral: vec![],
    };
    let (board, warnings) = decode(&map);
    assert_eq!(
        board.get(Square::e1),
        Some(&Piece::new(Role::KING, Color::WHITE).with([Specifier::ROYAL]))
    );
    assert_eq!(board.get(Square::c2).map(|p| p.role), Some(Role::PAWN));
    assert_eq!(board.get(Square::e8).map(|p| p.color), Some(Color::BLACK));
    assert_eq!(warnings.len(), 2);
    assert!(decode_strict(&map).is_err());
}

#[test]
fn color_map_serde() {
    let map: ColorMap = toml::from_str("white = [\"Ke1\"]\n").unwrap();
    assert_eq!(map.white, vec!["Ke1"]);
    assert!(map.black.is_empty());
}
