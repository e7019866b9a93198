//! # The problem diagram
//!
//! A [`Board`] is a free placement of pieces. Nothing here checks that the
//! position could arise in a game: two white kings, pawns on the first rank
//! and a board full of neutral grasshoppers are all fine.
//!
//! Besides the pieces a diagram carries a set of imitator squares and the
//! side to move. Imitators are markers for the fairy condition of the same
//! name and live independently of the pieces; nothing stops a square from
//! holding both.

use indexmap::{IndexMap, IndexSet};

use crate::{
    config::DiagramConfig,
    model::{Color, Square, mailbox::Mailbox, piece::Piece},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub(crate) cells: Mailbox<Option<Piece>>,
    pub(crate) imitators: IndexSet<Square>,
    pub(crate) black_to_move: bool,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Empty board, black to move.
    pub fn new() -> Self {
        Self {
            cells: Mailbox::default(),
            imitators: IndexSet::new(),
            black_to_move: true,
        }
    }

    /// Empty board with the configured side to move.
    pub fn with_config(config: &DiagramConfig) -> Self {
        Self {
            black_to_move: config.board.black_to_move,
            ..Self::new()
        }
    }

    #[inline]
    pub fn get(&self, sq: Square) -> Option<&Piece> {
        self.cells[sq].as_ref()
    }

    /// Overwrite a square; the previous occupant, if any, is gone.
    #[inline]
    pub fn place(&mut self, piece: Option<Piece>, sq: Square) {
        self.cells.set(sq, piece)
    }

    /// Like [`Board::place`] for an unchecked index. Indices outside
    /// `0..64` are ignored.
    pub fn place_at(&mut self, piece: Option<Piece>, ix: i32) {
        if let Some(sq) = Square::new(ix) {
            self.place(piece, sq)
        }
    }

    #[inline]
    pub fn add(&mut self, piece: Piece, sq: Square) {
        self.place(Some(piece), sq)
    }

    /// Empty a square, handing back what stood there.
    #[inline]
    pub fn remove(&mut self, sq: Square) -> Option<Piece> {
        self.cells.take(sq)
    }

    /// Move whatever stands on `from` to `to`.
    ///
    /// Moving from an empty square empties `to` as well.
    pub fn move_piece(&mut self, from: Square, to: Square) {
        let piece = self.remove(from);
        self.place(piece, to);
    }

    /// Editor click semantics: a piece of the same role and color goes
    /// away, anything else is replaced.
    pub fn toggle(&mut self, piece: Piece, sq: Square) {
        match self.get(sq) {
            Some(old) if old.equals_ignoring_specifiers(&piece) => {
                self.remove(sq);
            }
            _ => self.add(piece, sq),
        }
    }

    /// Remove every piece and imitator. The side to move is kept.
    pub fn clear(&mut self) {
        self.cells = Mailbox::default();
        self.imitators.clear();
    }

    /// Occupied squares in index order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, &Piece)> {
        self.cells
            .iter()
            .filter_map(|(sq, p)| p.as_ref().map(|p| (sq, p)))
    }

    pub fn pieces_mut(&mut self) -> impl Iterator<Item = (Square, &mut Piece)> {
        self.cells
            .iter_mut()
            .filter_map(|(sq, p)| p.as_mut().map(|p| (sq, p)))
    }

    /// No pieces and no imitators.
    pub fn is_empty(&self) -> bool {
        self.pieces().next().is_none() && self.imitators.is_empty()
    }

    #[inline]
    pub fn imitators(&self) -> &IndexSet<Square> {
        &self.imitators
    }

    /// Returns false if the square already was an imitator square.
    #[inline]
    pub fn add_imitator(&mut self, sq: Square) -> bool {
        self.imitators.insert(sq)
    }

    #[inline]
    pub fn remove_imitator(&mut self, sq: Square) -> bool {
        self.imitators.shift_remove(&sq)
    }

    #[inline]
    pub fn is_imitator(&self, sq: Square) -> bool {
        self.imitators.contains(&sq)
    }

    #[inline]
    pub fn black_to_move(&self) -> bool {
        self.black_to_move
    }

    /// Hand the move to the other side.
    #[inline]
    pub fn flip(&mut self) {
        self.black_to_move = !self.black_to_move
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        if self.black_to_move {
            Color::BLACK
        } else {
            Color::WHITE
        }
    }

    /// Neutral has no move of its own and is ignored.
    pub fn set_side_to_move(&mut self, color: Color) {
        match color {
            Color::WHITE => self.black_to_move = false,
            Color::BLACK => self.black_to_move = true,
            Color::NEUTRAL => {}
        }
    }

    /// Piece count as printed under a diagram: `white+black`, with
    /// `+neutral` appended when there are any.
    pub fn pieces_count(&self) -> String {
        let mut counts = [0usize; 3];
        for (_, p) in self.pieces() {
            counts[p.color.ix()] += 1;
        }

        let [w, b, n] = counts;
        if n > 0 {
            format!("{w}+{b}+{n}")
        } else {
            format!("{w}+{b}")
        }
    }

    /// Explanations to print beside a diagram for every piece a plain
    /// chess reader would not recognize, keyed by description, e.g.
    /// `"Royal Queen" => [d4]` or `"Neutral Grasshopper" => [a1, b2]`.
    pub fn legend(&self) -> IndexMap<String, Vec<Square>> {
        let mut legend = IndexMap::<String, Vec<Square>>::new();

        for (sq, p) in self.pieces() {
            if !p.is_fairy() {
                continue;
            }

            let mut words = p.specifiers.iter().map(|s| s.title().to_string()).collect::<Vec<_>>();
            if p.color.is_neutral() {
                words.push("Neutral".to_string());
            }
            words.push(title_case(p.role.name()));

            legend.entry(words.join(" ")).or_default().push(sq);
        }

        legend
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
use crate::model::catalog::{Role, Specifier};

#[test]
fn place_overwrites_and_ignores_out_of_range() {
    let mut board = Board::new();
    board.add(Piece::new(Role::KING, Color::WHITE), Square::e1);
    board.add(Piece::new(Role::QUEEN, Color::BLACK), Square::e1);
    assert_eq!(board.get(Square::e1), Some(&Piece::new(Role::QUEEN, Color::BLACK)));

    let before = board.clone();
    board.place_at(Some(Piece::new(Role::ROOK, Color::WHITE)), 64);
    board.place_at(Some(Piece::new(Role::ROOK, Color::WHITE)), -1);
    assert_eq!(board, before);

    board.place_at(None, Square::e1 as i32);
    assert!(board.is_empty());
}

#[test]
fn move_from_empty_clears_target() {
    let mut board = Board::new();
    board.add(Piece::new(Role::ROOK, Color::WHITE), Square::a1);
    board.move_piece(Square::a1, Square::a8);
    assert_eq!(board.get(Square::a1), None);
    assert_eq!(board.get(Square::a8).map(|p| p.role), Some(Role::ROOK));

    board.move_piece(Square::h4, Square::a8);
    assert_eq!(board.get(Square::a8), None);
}

#[test]
fn toggle_removes_matching_piece() {
    let mut board = Board::new();
    let royal = Piece::new(Role::QUEEN, Color::WHITE).with([Specifier::ROYAL]);
    board.toggle(royal.clone(), Square::d4);
    assert_eq!(board.get(Square::d4), Some(&royal));

    board.toggle(Piece::new(Role::QUEEN, Color::WHITE), Square::d4);
    assert_eq!(board.get(Square::d4), None);

    board.toggle(royal, Square::d4);
    board.toggle(Piece::new(Role::QUEEN, Color::BLACK), Square::d4);
    assert_eq!(board.get(Square::d4).map(|p| p.color), Some(Color::BLACK));
}

#[test]
fn clear_keeps_side_to_move() {
    let mut board = Board::new();
    board.flip();
    board.add(Piece::new(Role::PAWN, Color::WHITE), Square::e2);
    board.add_imitator(Square::c3);
    board.clear();
    assert!(board.is_empty());
    assert_eq!(board.side_to_move(), Color::WHITE);
    board.set_side_to_move(Color::NEUTRAL);
    assert_eq!(board.side_to_move(), Color::WHITE);
    board.set_side_to_move(Color::BLACK);
    assert!(board.black_to_move());
}

#[test]
fn imitators_are_a_set() {
    let mut board = Board::new();
    assert!(board.add_imitator(Square::c3));
    assert!(!board.add_imitator(Square::c3));
    assert_eq!(board.imitators().len(), 1);
    assert!(board.remove_imitator(Square::c3));
    assert!(!board.is_imitator(Square::c3));
}

#[test]
fn counts_and_legend() {
    let mut board = Board::new();
    board.add(Piece::new(Role::KING, Color::WHITE), Square::e1);
    board.add(Piece::new(Role::KING, Color::BLACK), Square::e8);
    assert_eq!(board.pieces_count(), "1+1");

    board.add(Piece::new(Role::GRASSHOPPER, Color::NEUTRAL), Square::a1);
    board.add(Piece::new(Role::GRASSHOPPER, Color::NEUTRAL), Square::b2);
    board.add(Piece::new(Role::QUEEN, Color::WHITE).with([Specifier::ROYAL]), Square::d4);
    assert_eq!(board.pieces_count(), "2+1+2");

    let legend = board.legend();
    assert_eq!(legend.len(), 2);
    assert_eq!(legend["Royal Queen"], vec![Square::d4]);
    assert_eq!(legend["Neutral Grasshopper"], vec![Square::b2, Square::a1]);
}
