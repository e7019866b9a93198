use fairy_diagram::{
    Board, Color, NamedTransform, Piece, Role, Specifier, Square,
    notation::{pieces_clause, xfen},
};
use strum::IntoEnumIterator;

fn problem() -> Board {
    let mut board = Board::new();
    board.add(Piece::new(Role::KING, Color::WHITE), Square::b1);
    board.add(Piece::new(Role::KING, Color::BLACK), Square::h8);
    board.add(Piece::new(Role::GRASSHOPPER, Color::WHITE), Square::d4);
    board.add(Piece::new(Role::NIGHTRIDER, Color::BLACK), Square::a5);
    board.add(
        Piece::new(Role::QUEEN, Color::NEUTRAL).with([Specifier::ROYAL]),
        Square::f6,
    );
    board.add(
        Piece::new(Role::ROOK, Color::WHITE).with([Specifier::PARALYSING, Specifier::KAMIKAZE]),
        Square::c7,
    );
    board.add(Piece::new(Role::PAWN, Color::BLACK), Square::g2);
    board.add(Piece::new(Role::FRIEND, Color::BLACK), Square::c3);
    board.add_imitator(Square::e5);
    board
}

/// Orthodox pieces only, one per role and color, spread over the board.
fn orthodox() -> Board {
    let mut board = Board::new();
    let roles = [Role::KING, Role::QUEEN, Role::ROOK, Role::BISHOP, Role::KNIGHT, Role::PAWN];
    for (i, role) in roles.iter().enumerate() {
        for (j, color) in [Color::WHITE, Color::BLACK].into_iter().enumerate() {
            if let Some(sq) = Square::new((i * 11 + j * 5) as i32) {
                board.add(Piece::new(*role, color), sq);
            }
        }
    }
    board
}

#[test]
fn square_indexing_is_a_bijection() {
    for sq in Square::iter() {
        assert_eq!(sq.to_string().parse::<Square>(), Ok(sq));
        let (x, y) = sq.coords();
        assert_eq!(Square::from_coords(x, y), Some(sq));
        assert_eq!(sq.ix(), (x + 8 * y) as usize);
    }
}

#[test]
fn four_quarter_turns_are_identity() {
    let mut board = problem();
    for _ in 0..4 {
        board.rotate(90);
    }
    assert_eq!(board, problem());

    let mut board = problem();
    for _ in 0..4 {
        board.apply(NamedTransform::Rotate_CW);
    }
    assert_eq!(board, problem());
}

#[test]
fn mirror_twice_is_identity() {
    use Square::*;
    for (a, b) in [(a1, h1), (a1, a8), (a1, h8), (h1, a8)] {
        let mut board = problem();
        board.mirror(a, b);
        assert_ne!(board, problem());
        board.mirror(a, b);
        assert_eq!(board, problem());
    }
}

#[test]
fn snapshot_roundtrip() {
    let mut board = problem();
    board.flip();
    board.add_imitator(Square::d4);
    let back = Board::load(&board.save().unwrap()).unwrap();
    assert_eq!(back, board);
    assert_eq!(back.snapshot(), board.snapshot());

    let empty = Board::new();
    assert_eq!(Board::restore(&empty.snapshot()), empty);
}

#[test]
fn compact_roundtrip_for_plain_glyphs() {
    let board = orthodox();
    let (back, warnings) = xfen::decode(&board.to_xfen());
    assert!(warnings.is_empty());
    assert_eq!(back, board);
}

#[test]
fn compact_roundtrip_for_every_one_letter_role() {
    let mut board = Board::new();
    let pieces = Role::iter()
        .flat_map(|role| [Color::WHITE, Color::BLACK].map(|color| Piece::new(role, color)))
        .filter(|p| p.glyph().len() == 1)
        .collect::<Vec<_>>();
    assert!(pieces.len() >= 16);
    for (i, p) in pieces.into_iter().enumerate() {
        board.add(p, Square::new(i as i32).unwrap());
    }

    let text = board.to_xfen();
    let (back, warnings) = xfen::decode(&text);
    assert!(warnings.is_empty(), "{text}");
    assert_eq!(back, board, "{text}");
}

#[test]
fn compact_keeps_roles_with_own_figurines() {
    let board = problem();
    let (back, warnings) = xfen::decode(&board.to_xfen());
    assert!(warnings.is_empty());
    for (sq, p) in board.pieces() {
        let q = back.get(sq).unwrap();
        assert!(q.equals_ignoring_specifiers(p), "{sq}");
        assert_eq!(q.specifiers.is_empty(), p.specifiers.is_empty());
    }
    assert_eq!(back.imitators(), board.imitators());
}

#[test]
fn pieces_clause_roundtrip() {
    for board in [problem(), orthodox(), Board::new()] {
        let text = board.to_pieces_clause();
        let (back, warnings) = pieces_clause::decode(&text);
        assert!(warnings.is_empty(), "{text}");
        assert_eq!(back, board, "{text}");
    }
}

#[test]
fn empty_board() {
    assert_eq!(Board::new().to_xfen(), "8/8/8/8/8/8/8/8");
    assert_eq!(Board::new().to_pieces_clause(), "");
    assert_eq!(Board::new().pieces_count(), "0+0");
}

#[test]
fn two_kings() {
    let mut board = Board::new();
    board.add(Piece::new(Role::KING, Color::WHITE), "e1".parse().unwrap());
    board.add(Piece::new(Role::KING, Color::BLACK), "e8".parse().unwrap());
    assert_eq!(board.to_xfen(), "4k3/8/8/8/8/8/8/4K3");

    let text = board.to_pieces_clause();
    let lines = text.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 2);
    assert!(lines.contains(&"white Ke1"));
    assert!(lines.contains(&"black Ke8"));
}

#[test]
fn shifting_left_drops_the_a_file() {
    let mut board = Board::new();
    board.add(Piece::new(Role::ROOK, Color::WHITE), Square::a1);
    board.add(Piece::new(Role::KING, Color::WHITE), Square::c1);
    board.shift(Square::b1, Square::a1);
    assert_eq!(board.pieces().count(), 1);
    assert_eq!(board.get(Square::b1).map(|p| p.role), Some(Role::KING));

    let mut board = Board::new();
    board.add(Piece::new(Role::ROOK, Color::WHITE), Square::a1);
    board.apply(NamedTransform::Shift_left);
    assert!(board.is_empty());
}

#[test]
fn twin_by_color_inversion() {
    let mut board = problem();
    board.invert_colors();
    assert_eq!(board.get(Square::b1).map(|p| p.color), Some(Color::BLACK));
    assert_eq!(board.get(Square::f6).map(|p| p.color), Some(Color::NEUTRAL));
    assert_eq!(board.pieces_count(), "4+3+1");
    board.invert_colors();
    assert_eq!(board, problem());
}
