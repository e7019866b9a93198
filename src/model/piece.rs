use indexmap::IndexSet;

use crate::model::{
    Color,
    catalog::{Role, Specifier},
};

/// One occupant of a diagram square.
///
/// The specifiers keep the order they were added in, which is the order
/// the notations write them, but compare as a set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub role: Role,
    pub color: Color,
    pub specifiers: IndexSet<Specifier>,
}

impl Piece {
    pub fn new(role: Role, color: Color) -> Self {
        Self {
            role,
            color,
            specifiers: IndexSet::new(),
        }
    }

    /// Builder style addition of specifiers; duplicates collapse.
    pub fn with(mut self, specifiers: impl IntoIterator<Item = Specifier>) -> Self {
        self.specifiers.extend(specifiers);
        self
    }

    /// Same role and color, whatever the specifiers.
    #[inline]
    pub fn equals_ignoring_specifiers(&self, other: &Piece) -> bool {
        self.role == other.role && self.color == other.color
    }

    /// Swap white and black in place. Neutral pieces stay neutral.
    #[inline]
    pub fn invert_color(&mut self) {
        self.color = self.color.opp();
    }

    /// Compact notation glyph.
    ///
    /// Upper case for white, lower case otherwise, `!` in front of neutral
    /// pieces, `b` in front of pieces carrying any specifier, and the whole
    /// thing in parentheses once it is longer than one character.
    pub fn glyph(&self) -> String {
        let mut glyph = match self.color {
            Color::WHITE => self.role.glyph().to_ascii_uppercase(),
            _ => self.role.glyph().to_ascii_lowercase(),
        };

        if self.color.is_neutral() {
            glyph.insert(0, '!');
        }

        if !self.specifiers.is_empty() {
            glyph.insert(0, 'b');
        }

        if glyph.len() > 1 {
            format!("({glyph})")
        } else {
            glyph
        }
    }

    /// Run-together text form: `n` for neutral, the specifier codes, then
    /// the long name, e.g. `nrking` for a neutral royal king.
    pub fn long_text(&self) -> String {
        let mut res = String::new();
        if self.color.is_neutral() {
            res.push('n');
        }
        res.extend(self.specifiers.iter().map(|s| s.code()));
        res.push_str(self.role.name());
        res
    }

    /// Anything a plain chess reader would need explained.
    #[inline]
    pub fn is_fairy(&self) -> bool {
        self.color.is_neutral() || !self.specifiers.is_empty() || !self.role.is_orthodox()
    }
}

#[test]
fn glyph_rules() {
    assert_eq!(Piece::new(Role::KING, Color::WHITE).glyph(), "K");
    assert_eq!(Piece::new(Role::KNIGHT, Color::BLACK).glyph(), "s");
    assert_eq!(Piece::new(Role::GRASSHOPPER, Color::WHITE).glyph(), "(Q2)");
    assert_eq!(Piece::new(Role::QUEEN, Color::NEUTRAL).glyph(), "(!q)");
    assert_eq!(Piece::new(Role::FRIEND, Color::WHITE).glyph(), "(O1)");
    assert_eq!(Piece::new(Role::ORPHAN, Color::BLACK).glyph(), "o");
    assert_eq!(
        Piece::new(Role::QUEEN, Color::WHITE).with([Specifier::ROYAL]).glyph(),
        "(bQ)"
    );
    assert_eq!(
        Piece::new(Role::ROOK, Color::NEUTRAL).with([Specifier::ROYAL]).glyph(),
        "(b!r)"
    );
}

#[test]
fn long_text_and_equality() {
    let a = Piece::new(Role::KING, Color::NEUTRAL).with([Specifier::ROYAL, Specifier::MAGIC]);
    assert_eq!(a.long_text(), "nrmking");
    let b = Piece::new(Role::KING, Color::NEUTRAL).with([Specifier::MAGIC, Specifier::ROYAL]);
    assert_eq!(a, b);
    assert!(a.equals_ignoring_specifiers(&Piece::new(Role::KING, Color::NEUTRAL)));
    assert!(!a.equals_ignoring_specifiers(&Piece::new(Role::KING, Color::WHITE)));
}

#[test]
fn invert_color_keeps_neutral() {
    let mut p = Piece::new(Role::PAWN, Color::WHITE);
    p.invert_color();
    assert_eq!(p.color, Color::BLACK);
    let mut n = Piece::new(Role::PAWN, Color::NEUTRAL);
    n.invert_color();
    assert_eq!(n.color, Color::NEUTRAL);
    assert!(n.is_fairy());
    assert!(!p.is_fairy());
}
