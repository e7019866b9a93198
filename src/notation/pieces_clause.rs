//! # Popeye pieces clause
//!
//! The human readable diagram text, one line per color and set of
//! specifiers:
//!
//! ```text
//! white Ke1 Qd1 Sb1g1
//! white royal Ga4
//! black Ke8 Pa7b7
//! neutral Ia1
//! ```
//!
//! Each group is a piece code directly followed by one or more squares.
//! The code `I` places imitators rather than pieces. Keywords and codes are
//! case-insensitive.
//!
//! Encoding groups pieces in the order they are first met on the board, so
//! decoding then encoding need not give back the same text, only the same
//! diagram.

use std::sync::LazyLock;

use indexmap::{IndexMap, IndexSet};
use regex::Regex;

use crate::{
    config::DiagramConfig,
    error::{StrictError, Warning},
    model::{
        Color, Square,
        board::Board,
        catalog::{Role, Specifier},
        piece::Piece,
    },
};

/// Piece code of imitator groups.
pub const IMITATOR_CODE: &str = "i";

static GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-z][0-9a-z]?)((?:[a-h][1-8])+)$").unwrap());

/// Split a lower-case group like `sb1g1` into its code and squares.
pub(crate) fn parse_group(word: &str) -> Option<(&str, Vec<Square>)> {
    let caps = GROUP.captures(word)?;
    let code = caps.get(1)?.as_str();
    let squares = caps
        .get(2)?
        .as_str()
        .as_bytes()
        .chunks(2)
        .filter_map(|pair| std::str::from_utf8(pair).ok()?.parse().ok())
        .collect();
    Some((code, squares))
}

pub fn encode(board: &Board) -> String {
    encode_with(board, &DiagramConfig::default())
}

/// Write the pieces clause, each line prefixed with the configured indent.
pub fn encode_with(board: &Board, config: &DiagramConfig) -> String {
    let indent = &config.pieces_clause.indent;
    let mut groups = IndexMap::<(Color, String), IndexMap<Role, String>>::new();

    for (sq, p) in board.pieces() {
        let specs = p
            .specifiers
            .iter()
            .map(|s| s.keyword())
            .collect::<Vec<_>>()
            .join(" ");
        groups
            .entry((p.color, specs))
            .or_default()
            .entry(p.role)
            .or_default()
            .push_str(&sq.to_string());
    }

    let mut lines = groups
        .into_iter()
        .map(|((color, specs), roles)| {
            let mut line = format!("{indent}{color}");
            if !specs.is_empty() {
                line.push(' ');
                line.push_str(&specs);
            }
            for (role, squares) in roles {
                line.push_str(&format!(" {role}{squares}"));
            }
            line
        })
        .collect::<Vec<_>>();

    if !board.imitators().is_empty() {
        let squares = board
            .imitators()
            .iter()
            .map(|sq| sq.to_string())
            .collect::<String>();
        lines.push(format!(
            "{indent}{} {}{squares}",
            Color::NEUTRAL,
            IMITATOR_CODE.to_uppercase()
        ));
    }

    lines.join("\n")
}

/// Clear `board` and fill it from a pieces clause.
///
/// A line not starting with a color is skipped, except that a leading
/// `pieces` keyword passes without a warning. Within a line, specifier
/// keywords are read until the first word that is not one; from there on
/// every word must be a group, and the first that is not ends the line.
pub fn decode_into(board: &mut Board, text: &str) -> Vec<Warning> {
    board.clear();
    let mut warnings = vec![];
    let text = text.to_lowercase();

    for line in text.lines() {
        let mut words = line.split_whitespace().peekable();
        let Some(first) = words.next() else {
            continue;
        };

        let Ok(color) = first.parse::<Color>() else {
            if !first.starts_with("piec") {
                warnings.push(Warning::SkippedLine {
                    line: line.trim().to_string(),
                });
            }
            continue;
        };

        let mut specs = IndexSet::new();
        while let Some(spec) = words.peek().and_then(|w| w.parse::<Specifier>().ok()) {
            specs.insert(spec);
            words.next();
        }

        for word in words {
            let Some((code, squares)) = parse_group(word) else {
                warnings.push(Warning::UnparsedWord {
                    word: word.to_string(),
                });
                break;
            };

            if code == IMITATOR_CODE {
                for sq in squares {
                    board.add_imitator(sq);
                }
                continue;
            }

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

pub fn decode_with(text: &str, config: &DiagramConfig) -> (Board, Vec<Warning>) {
    let mut board = Board::with_config(config);
    let warnings = decode_into(&mut board, text);
    (board, warnings)
}

pub fn decode(text: &str) -> (Board, Vec<Warning>) {
    decode_with(text, &DiagramConfig::default())
}

pub fn decode_strict(text: &str) -> Result<Board, StrictError> {
    let (board, warnings) = decode(text);
    StrictError::check(board, warnings)
}

impl Board {
    #[inline]
    pub fn to_pieces_clause(&self) -> String {
        encode(self)
    }

    /// Permissive decoding, warnings dropped.
    pub fn from_pieces_clause(text: &str) -> Self {
        decode(text).0
    }
}

#[test]
fn kings_clause() {
    let mut board = Board::new();
    board.add(Piece::new(Role::KING, Color::WHITE), Square::e1);
    board.add(Piece::new(Role::KING, Color::BLACK), Square::e8);

    let text = board.to_pieces_clause();
    let mut lines = text.lines().collect::<Vec<_>>();
    lines.sort();
    assert_eq!(lines, vec!["black Ke8", "white Ke1"]);
    assert_eq!(decode_strict(&text), Ok(board));
}

#[test]
fn groups_and_specifiers() {
    let (board, warnings) = decode(
        "Pieces\n  White Ke1 Sb1g1 caA1\n  white royal Paralysing Ga4\n  neutral Ia1h8 Pe2\n",
    );
    assert!(warnings.is_empty(), "{warnings:?}");
    assert_eq!(board.get(Square::g1), Some(&Piece::new(Role::KNIGHT, Color::WHITE)));
    assert_eq!(board.get(Square::a1), Some(&Piece::new(Role::CAMEL, Color::WHITE)));
    assert_eq!(
        board.get(Square::a4),
        Some(&Piece::new(Role::GRASSHOPPER, Color::WHITE)
            .with([Specifier::ROYAL, Specifier::PARALYSING]))
    );
    assert_eq!(board.get(Square::e2), Some(&Piece::new(Role::PAWN, Color::NEUTRAL)));
    assert_eq!(board.imitators().iter().copied().collect::<Vec<_>>(), vec![Square::a1, Square::h8]);
    assert_eq!(board.pieces().count(), 6);
}

#[test]
fn encoding_groups_by_color_and_specifiers() {
    let mut board = Board::new();
    board.add(Piece::new(Role::PAWN, Color::BLACK), Square::a7);
    board.add(Piece::new(Role::KING, Color::BLACK), Square::e8);
    board.add(Piece::new(Role::PAWN, Color::BLACK), Square::b7);
    board.add(Piece::new(Role::QUEEN, Color::WHITE).with([Specifier::ROYAL]), Square::d4);
    board.add(Piece::new(Role::GRASSHOPPER, Color::NEUTRAL), Square::b2);
    board.add_imitator(Square::c3);

    let cfg = DiagramConfig::from_toml("[pieces_clause]\nindent = \"  \"").unwrap();
    assert_eq!(
        encode_with(&board, &cfg),
        "  black Ke8 Pa7b7\n  white royal Qd4\n  neutral Gb2\n  neutral Ic3"
    );
    assert_eq!(Board::from_pieces_clause(&encode_with(&board, &cfg)), board);
}

#[test]
fn permissive_lines() {
    let (board, warnings) = decode("stipulation #2\nwhite Ke1 XYa1 Qd1 junk Rh1\n\nblack Ke8");
    assert_eq!(board.pieces().count(), 3);
    assert_eq!(board.get(Square::h1), None);
    assert_eq!(
        warnings,
        vec![
            Warning::SkippedLine {
                line: "stipulation #2".to_string()
            },
            Warning::UnknownRole {
                code: "XY".to_string()
            },
            Warning::UnparsedWord {
                word: "junk".to_string()
            },
        ]
    );
    assert!(decode_strict("white Ke1 junk").is_err());
}

#[test]
fn group_splitting() {
    assert_eq!(parse_group("sb1g1"), Some(("s", vec![Square::b1, Square::g1])));
    assert_eq!(parse_group("cae4"), Some(("ca", vec![Square::e4])));
    assert_eq!(parse_group("bh1"), Some(("b", vec![Square::h1])));
    assert_eq!(parse_group("ke9"), None);
    assert_eq!(parse_group("k"), None);
}
