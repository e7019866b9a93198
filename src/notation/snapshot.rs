//! # Session snapshots
//!
//! Everything on a [`Board`] written out as TOML so an editing session can
//! be resumed exactly. Unlike the diagram notations nothing is lost here:
//! specifiers keep their identity and order, imitators may share a square
//! with a piece, and the side to move is recorded.
//!
//! ```toml
//! black_to_move = true
//! imitators = ["c3"]
//!
//! [[pieces]]
//! square = "e1"
//! role = "king"
//! color = "white"
//! specifiers = ["royal"]
//! ```
//!
//! The format belongs to this crate and is not meant for exchange.

use serde::{Deserialize, Serialize};

use crate::{
    error::SnapshotError,
    model::{
        Color, Square,
        board::Board,
        catalog::{Role, Specifier},
        piece::Piece,
    },
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedPiece {
    pub square: Square,
    pub role: Role,
    pub color: Color,
    #[serde(default)]
    pub specifiers: Vec<Specifier>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default = "default_black_to_move")]
    pub black_to_move: bool,
    #[serde(default)]
    pub imitators: Vec<Square>,
    #[serde(default)]
    pub pieces: Vec<PlacedPiece>,
}

fn default_black_to_move() -> bool {
    true
}

impl Snapshot {
    pub fn to_text(&self) -> Result<String, SnapshotError> {
        Ok(toml::to_string(self)?)
    }

    pub fn from_text(text: &str) -> Result<Self, SnapshotError> {
        Ok(toml::from_str(text)?)
    }
}

impl Board {
    /// Structural copy of the whole board.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            black_to_move: self.black_to_move,
            imitators: self.imitators.iter().copied().collect(),
            pieces: self
                .pieces()
                .map(|(square, p)| PlacedPiece {
                    square,
                    role: p.role,
                    color: p.color,
                    specifiers: p.specifiers.iter().copied().collect(),
                })
                .collect(),
        }
    }

    /// Rebuild a board from a snapshot. Later entries for the same square
    /// overwrite earlier ones.
    pub fn restore(snapshot: &Snapshot) -> Self {
        let mut board = Board::new();
        board.black_to_move = snapshot.black_to_move;
        board.imitators.extend(snapshot.imitators.iter().copied());
        for placed in &snapshot.pieces {
            board.add(
                Piece::new(placed.role, placed.color).with(placed.specifiers.iter().copied()),
                placed.square,
            );
        }
        board
    }

    pub fn save(&self) -> Result<String, SnapshotError> {
        self.snapshot().to_text()
    }

    pub fn load(text: &str) -> Result<Self, SnapshotError> {
        Ok(Self::restore(&Snapshot::from_text(text)?))
    }
}

#[test]
fn snapshot_keeps_everything() {
    let mut board = Board::new();
    board.flip();
    board.add(
        Piece::new(Role::CAMEL, Color::NEUTRAL).with([Specifier::MAGIC, Specifier::ROYAL]),
        Square::c3,
    );
    board.add(Piece::new(Role::KING, Color::WHITE), Square::e1);
    board.add_imitator(Square::c3);
    board.add_imitator(Square::a8);

    let text = board.save().unwrap();
    let back = Board::load(&text).unwrap();
    assert_eq!(back, board);
    assert_eq!(back.imitators().iter().copied().collect::<Vec<_>>(), vec![Square::c3, Square::a8]);
    assert_eq!(
        back.get(Square::c3).map(|p| p.specifiers.iter().copied().collect::<Vec<_>>()),
        Some(vec![Specifier::MAGIC, Specifier::ROYAL])
    );
}

#[test]
fn snapshot_text_shape() {
    let board = Board::load(
        "black_to_move = false\nimitators = [\"h8\"]\n\n[[pieces]]\nsquare = \"e1\"\nrole = \"king\"\ncolor = \"white\"\n",
    )
    .unwrap();
    assert_eq!(board.side_to_move(), Color::WHITE);
    assert!(board.is_imitator(Square::h8));
    assert_eq!(board.get(Square::e1), Some(&Piece::new(Role::KING, Color::WHITE)));

    assert!(Board::load("").unwrap().is_empty());
    assert!(Board::load("").unwrap().black_to_move());
    assert!(Board::load("[[pieces]]\nsquare = \"z9\"\nrole = \"king\"\ncolor = \"white\"\n").is_err());
    assert!(Board::load("black_to_move = ").is_err());
}
