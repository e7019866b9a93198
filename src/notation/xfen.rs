//! # Compact diagram notation
//!
//! The board part of a FEN string, stretched to cover fairy chess the way
//! the problem databases and the Popeye `forsyth` command do:
//!
//! - Ranks from the 8th down, separated by `/`, files a to h within a rank.
//! - Runs of empty squares as the digits `1` to `8`.
//! - Pieces as figurine glyphs, upper case for white and lower case for
//!   black. Fairy roles use rotated orthodox figurines such as `q2`.
//! - A `!` in front marks a neutral piece and a `b` in front a piece with
//!   some specifier.
//! - Glyphs longer than one character are put in parentheses, so a neutral
//!   grasshopper is `(!q2)` and a royal white queen `(bQ)`.
//! - An imitator square is written `(!o)`.
//!
//! The notation is lossy. It cannot say which specifier a `b` stands for,
//! fairy roles sharing a figurine come back as the same role, and a neutral
//! orphan is indistinguishable from an imitator. When a square holds both a
//! piece and an imitator only the piece is written.
//!
//! Decoding is forgiving. Rank separators are not checked against the
//! square count, unknown glyphs leave their square empty, an unclosed `(` is
//! skipped, and text past h1 is ignored. Each of those is reported as a
//! [`Warning`].

use chumsky::prelude::*;
use strum::IntoEnumIterator;

use crate::{
    config::DiagramConfig,
    error::{StrictError, Warning},
    model::{
        Color, Square,
        board::Board,
        catalog::{Catalog, Specifier},
        piece::Piece,
    },
};

/// Glyph of an imitator square, without parentheses.
pub const IMITATOR: &str = "!o";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'s> {
    Blanks(u8),
    Rank,
    Glyph(&'s str),
    Stray,
}

fn tokens<'s>() -> impl Parser<'s, &'s str, Vec<(Token<'s>, usize)>> {
    choice((
        one_of("12345678").map(|c: char| Token::Blanks(c as u8 - b'0')),
        just('/').to(Token::Rank),
        none_of(")")
            .repeated()
            .to_slice()
            .delimited_by(just('('), just(')'))
            .map(Token::Glyph),
        just('(').to(Token::Stray),
        any().to_slice().map(Token::Glyph),
    ))
    .map_with(|t, e| {
        let span: SimpleSpan = e.span();
        (t, span.start)
    })
    .repeated()
    .collect()
}

enum Content {
    Piece(Piece),
    Imitator,
}

fn read_piece(glyph: &str) -> Option<Piece> {
    let (color, figurine) = match glyph.strip_prefix('!') {
        Some(rest) => (Color::NEUTRAL, rest),
        None if glyph.starts_with(|c: char| c.is_ascii_uppercase()) => (Color::WHITE, glyph),
        None => (Color::BLACK, glyph),
    };
    let role = Catalog::get().by_glyph(figurine)?;
    Some(Piece::new(role, color))
}

fn read_glyph(glyph: &str, marked: Specifier) -> Option<Content> {
    if glyph == IMITATOR {
        return Some(Content::Imitator);
    }

    read_piece(glyph)
        .or_else(|| read_piece(glyph.strip_prefix('b')?).map(|p| p.with([marked])))
        .map(Content::Piece)
}

/// Write a board in compact notation.
pub fn encode(board: &Board) -> String {
    let mut res = String::new();
    let mut blanks = 0;

    for sq in Square::iter() {
        if sq.ix() > 0 && sq.ix() % 8 == 0 {
            if blanks > 0 {
                res.push_str(&blanks.to_string());
            }
            res.push('/');
            blanks = 0;
        }

        let glyph = match board.get(sq) {
            Some(p) => p.glyph(),
            None if board.is_imitator(sq) => format!("({IMITATOR})"),
            None => {
                blanks += 1;
                continue;
            }
        };

        if blanks > 0 {
            res.push_str(&blanks.to_string());
        }
        res.push_str(&glyph);
        blanks = 0;
    }

    if blanks > 0 {
        res.push_str(&blanks.to_string());
    }
    res
}

/// Clear `board` and fill it from compact notation.
///
/// The side to move is left alone; the compact notation has no field
/// for it.
pub fn decode_into(board: &mut Board, text: &str, config: &DiagramConfig) -> Vec<Warning> {
    board.clear();
    let mut warnings = vec![];
    let mut cursor = 0i32;

    for (token, offset) in tokens().parse(text).into_output().unwrap_or_default() {
        let Some(sq) = Square::new(cursor) else {
            let rest = text[offset..].trim_matches(|c: char| c == '/' || c.is_whitespace());
            if !rest.is_empty() {
                warnings.push(Warning::Overflow {
                    rest: rest.to_string(),
                });
            }
            break;
        };

        match token {
            Token::Blanks(n) => cursor += n as i32,
            Token::Rank => {}
            Token::Stray => warnings.push(Warning::UnbalancedParen { offset }),
            Token::Glyph(glyph) => {
                match read_glyph(glyph, config.compact.marked_specifier) {
                    Some(Content::Piece(p)) => board.add(p, sq),
                    Some(Content::Imitator) => {
                        board.add_imitator(sq);
                    }
                    None => warnings.push(Warning::UnknownGlyph {
                        glyph: glyph.to_string(),
                        square: sq,
                    }),
                }
                cursor += 1;
            }
        }
    }

    warnings
}

pub fn decode_with(text: &str, config: &DiagramConfig) -> (Board, Vec<Warning>) {
    let mut board = Board::with_config(config);
    let warnings = decode_into(&mut board, text, config);
    (board, warnings)
}

pub fn decode(text: &str) -> (Board, Vec<Warning>) {
    decode_with(text, &DiagramConfig::default())
}

/// Like [`decode`], but anything stepped over is an error.
pub fn decode_strict(text: &str) -> Result<Board, StrictError> {
    let (board, warnings) = decode(text);
    StrictError::check(board, warnings)
}

impl Board {
    #[inline]
    pub fn to_xfen(&self) -> String {
        encode(self)
    }

    /// Permissive decoding, warnings dropped.
    pub fn from_xfen(text: &str) -> Self {
        decode(text).0
    }
}

#[cfg(test)]
use crate::model::catalog::Role;

#[test]
fn empty_and_kings() {
    assert_eq!(Board::new().to_xfen(), "8/8/8/8/8/8/8/8");

    let mut board = Board::new();
    board.add(Piece::new(Role::KING, Color::WHITE), Square::e1);
    board.add(Piece::new(Role::KING, Color::BLACK), Square::e8);
    assert_eq!(board.to_xfen(), "4k3/8/8/8/8/8/8/4K3");
    assert_eq!(Board::from_xfen("4k3/8/8/8/8/8/8/4K3"), board);

    let (empty, warnings) = decode("8/8/8/8/8/8/8/8");
    assert!(empty.is_empty());
    assert!(warnings.is_empty());
}

#[test]
fn fairy_glyphs_roundtrip() {
    let mut board = Board::new();
    board.add(Piece::new(Role::GRASSHOPPER, Color::WHITE), Square::a8);
    board.add(Piece::new(Role::KING, Color::BLACK), Square::e8);
    board.add(Piece::new(Role::QUEEN, Color::NEUTRAL), Square::d5);
    board.add_imitator(Square::c3);
    board.add(Piece::new(Role::KING, Color::WHITE), Square::e1);
    board.add(Piece::new(Role::ROOK, Color::BLACK).with([Specifier::ROYAL]), Square::h1);

    let text = board.to_xfen();
    assert_eq!(text, "(Q2)3k3/8/8/3(!q)4/8/2(!o)5/8/4K2(br)");
    assert_eq!(decode_strict(&text), Ok(board));
}

#[test]
fn glyph_readings() {
    let (board, _) = decode("(B2)(b2)(bb2)(b!r)(!s3)nN");
    assert_eq!(board.get(Square::a8), Some(&Piece::new(Role::PRINCESS, Color::WHITE)));
    assert_eq!(board.get(Square::b8), Some(&Piece::new(Role::PRINCESS, Color::BLACK)));
    assert_eq!(
        board.get(Square::c8),
        Some(&Piece::new(Role::PRINCESS, Color::BLACK).with([Specifier::ROYAL]))
    );
    assert_eq!(
        board.get(Square::d8),
        Some(&Piece::new(Role::ROOK, Color::NEUTRAL).with([Specifier::ROYAL]))
    );
    assert_eq!(board.get(Square::e8), Some(&Piece::new(Role::ZEBRA, Color::NEUTRAL)));
    assert_eq!(board.get(Square::f8), Some(&Piece::new(Role::KNIGHT, Color::BLACK)));
    assert_eq!(board.get(Square::g8), Some(&Piece::new(Role::KNIGHT, Color::WHITE)));
}

#[test]
fn shared_figurines_are_lossy() {
    let mut board = Board::new();
    board.add(Piece::new(Role::CAMEL, Color::WHITE), Square::a1);
    board.add(Piece::new(Role::ORPHAN, Color::NEUTRAL), Square::h8);
    let (back, warnings) = decode(&board.to_xfen());
    assert!(warnings.is_empty());
    assert_eq!(back.get(Square::a1).map(|p| p.role), Some(Role::ZEBRA));
    assert_eq!(back.get(Square::h8), None);
    assert!(back.is_imitator(Square::h8));
}

#[test]
fn piece_wins_over_imitator() {
    let mut board = Board::new();
    board.add(Piece::new(Role::PAWN, Color::WHITE), Square::a8);
    board.add_imitator(Square::a8);
    assert_eq!(board.to_xfen(), "P7/8/8/8/8/8/8/8");
}

#[test]
fn permissive_decoding() {
    let (board, warnings) = decode("x3k3/(Q2");
    assert_eq!(board.get(Square::e8).map(|p| p.role), Some(Role::KING));
    assert_eq!(
        warnings,
        vec![
            Warning::UnknownGlyph {
                glyph: "x".to_string(),
                square: Square::a8
            },
            Warning::UnbalancedParen { offset: 5 },
        ]
    );
    // the stray parenthesis is dropped, the rest reads as glyphs
    assert_eq!(board.get(Square::a7).map(|p| p.color), Some(Color::WHITE));
    assert_eq!(board.get(Square::b7), None);

    let (_, warnings) = decode("(Q2)7/(");
    assert_eq!(warnings, vec![Warning::UnbalancedParen { offset: 6 }]);

    let (shifted, _) = decode("k/K");
    assert_eq!(shifted.get(Square::a8).map(|p| p.color), Some(Color::BLACK));
    assert_eq!(shifted.get(Square::b8).map(|p| p.color), Some(Color::WHITE));

    let (_, warnings) = decode("8/8/8/8/8/8/8/8/K");
    assert_eq!(
        warnings,
        vec![Warning::Overflow {
            rest: "K".to_string()
        }]
    );
    assert!(decode("8/8/8/8/8/8/8/8/").1.is_empty());
    assert!(decode_strict("4k3/(Q2").is_err());
}

#[test]
fn decode_keeps_side_to_move_and_config() {
    let mut board = Board::new();
    board.flip();
    board.add(Piece::new(Role::PAWN, Color::WHITE), Square::a2);
    let warnings = decode_into(&mut board, "(bK)", &DiagramConfig::default());
    assert!(warnings.is_empty());
    assert!(!board.black_to_move());
    assert_eq!(board.get(Square::a2), None);

    let cfg = DiagramConfig::from_toml("[compact]\nmarked_specifier = \"magic\"\n[board]\nblack_to_move = false").unwrap();
    let (board, _) = decode_with("(bK)", &cfg);
    assert_eq!(
        board.get(Square::a8),
        Some(&Piece::new(Role::KING, Color::WHITE).with([Specifier::MAGIC]))
    );
    assert_eq!(board.side_to_move(), Color::WHITE);
}
