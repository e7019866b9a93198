//! # Fairy piece catalog
//!
//! Static lookup tables shared by the piece model and both notations:
//!
//! - The Popeye piece code of every role (`K`, `S`, `G`, `CA`, ...)
//! - Its long-form name (`king`, `knight`, `grasshopper`, `camel`, ...)
//! - Its figurine glyph in compact notation. Fairy roles borrow rotated
//!   orthodox figurines, so `q2` is an upside-down queen, `s3` a knight
//!   turned to the left, and several roles share one figurine. A
//!   one-letter figurine always belongs to a single role.
//! - Which role a shared figurine decodes back to.
//! - The piece properties ("specifiers") Popeye understands.
//!
//! The tables are checked for completeness the first time the catalog is
//! consulted; a missing or duplicated row is a bug in this file and panics.

use std::{collections::HashMap, sync::LazyLock};

use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, FromRepr, IntoEnumIterator, IntoStaticStr, VariantArray};

/// Identity of a piece, independent of its color.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
    EnumIter, FromRepr, VariantArray, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Role {
    KING,
    QUEEN,
    ROOK,
    BISHOP,
    KNIGHT,
    PAWN,
    GRASSHOPPER,
    NIGHTRIDER,
    ZEBRA,
    CAMEL,
    GIRAFFE,
    AMAZON,
    EMPRESS,
    PRINCESS,
    LEO,
    LION,
    PAO,
    VAO,
    EQUIHOPPER,
    ROOKHOPPER,
    BISHOPHOPPER,
    KINGHOPPER,
    MAO,
    MOA,
    ANTELOPE,
    ORPHAN,
    FRIEND,
    DUMMY,
}

impl Role {
    /// Use as an array index.
    #[inline]
    pub fn ix(self) -> usize {
        self as usize
    }

    /// Popeye piece code, upper case.
    #[inline]
    pub fn code(self) -> &'static str {
        Catalog::get().info(self).code
    }

    /// Long-form name, lower case.
    #[inline]
    pub fn name(self) -> &'static str {
        Catalog::get().info(self).name
    }

    /// Compact notation figurine, lower case.
    #[inline]
    pub fn glyph(self) -> &'static str {
        Catalog::get().info(self).glyph
    }

    /// Case-insensitive lookup by Popeye piece code.
    pub fn from_code(code: &str) -> Option<Self> {
        Catalog::get().by_code(code)
    }

    /// The six roles of orthodox chess.
    #[inline]
    pub fn is_orthodox(self) -> bool {
        self <= Self::PAWN
    }
}

/// One row of the role table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleInfo {
    pub role: Role,
    pub code: &'static str,
    pub name: &'static str,
    pub glyph: &'static str,
    /// This role is what its glyph decodes to.
    pub canonical: bool,
}

const fn row(
    role: Role,
    code: &'static str,
    name: &'static str,
    glyph: &'static str,
    canonical: bool,
) -> RoleInfo {
    RoleInfo {
        role,
        code,
        name,
        glyph,
        canonical,
    }
}

#[rustfmt::skip]
pub static ROLES: &[RoleInfo] = &[
    row(Role::KING,         "K",  "king",         "k",  true),
    row(Role::QUEEN,        "Q",  "queen",        "q",  true),
    row(Role::ROOK,         "R",  "rook",         "r",  true),
    row(Role::BISHOP,       "B",  "bishop",       "b",  true),
    row(Role::KNIGHT,       "S",  "knight",       "s",  true),
    row(Role::PAWN,         "P",  "pawn",         "p",  true),
    row(Role::GRASSHOPPER,  "G",  "grasshopper",  "q2", true),
    row(Role::NIGHTRIDER,   "N",  "nightrider",   "s2", true),
    row(Role::ZEBRA,        "Z",  "zebra",        "s3", true),
    row(Role::CAMEL,        "CA", "camel",        "s3", false),
    row(Role::GIRAFFE,      "GI", "giraffe",      "s1", true),
    row(Role::AMAZON,       "AM", "amazon",       "a",  true),
    row(Role::EMPRESS,      "EM", "empress",      "r2", true),
    row(Role::PRINCESS,     "PR", "princess",     "b2", true),
    row(Role::LEO,          "LE", "leo",          "q3", true),
    row(Role::LION,         "LI", "lion",         "q3", false),
    row(Role::PAO,          "PA", "pao",          "r3", true),
    row(Role::VAO,          "VA", "vao",          "b3", true),
    row(Role::EQUIHOPPER,   "EQ", "equihopper",   "e",  true),
    row(Role::ROOKHOPPER,   "RH", "rookhopper",   "r2", false),
    row(Role::BISHOPHOPPER, "BH", "bishophopper", "b2", false),
    row(Role::KINGHOPPER,   "KH", "kinghopper",   "k2", true),
    row(Role::MAO,          "MA", "mao",          "s1", false),
    row(Role::MOA,          "MO", "moa",          "s3", false),
    row(Role::ANTELOPE,     "AN", "antelope",     "s1", false),
    row(Role::ORPHAN,       "O",  "orphan",       "o",  true),
    row(Role::FRIEND,       "F",  "friend",       "o1", true),
    row(Role::DUMMY,        "DU", "dummy",        "p1", true),
];

/// Glyphs that decode to a role without being its figurine.
///
/// Plain FEN writes knights as `n`.
pub static GLYPH_ALIASES: &[(&str, Role)] = &[("n", Role::KNIGHT)];

/// Piece properties a Popeye pieces clause may put before the piece groups.
///
/// The keyword is the lower-case name; the one-letter code is its first
/// letter.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
    EnumIter, EnumString, IntoStaticStr, VariantArray, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Specifier {
    CHAMELEON,
    JIGGER,
    KAMIKAZE,
    PARALYSING,
    ROYAL,
    VOLAGE,
    FUNCTIONARY,
    HALFNEUTRAL,
    HURDLECOLOURCHANGING,
    PROTEAN,
    MAGIC,
    UNCAPTURABLE,
}

impl Specifier {
    /// Lower-case keyword.
    #[inline]
    pub fn keyword(self) -> &'static str {
        self.into()
    }

    /// One-letter code used in the compact long-text form.
    #[inline]
    pub fn code(self) -> char {
        self.keyword().as_bytes()[0] as char
    }

    /// Popeye spelling, used for legends.
    pub fn title(self) -> &'static str {
        match self {
            Self::CHAMELEON => "Chameleon",
            Self::JIGGER => "Jigger",
            Self::KAMIKAZE => "Kamikaze",
            Self::PARALYSING => "Paralysing",
            Self::ROYAL => "Royal",
            Self::VOLAGE => "Volage",
            Self::FUNCTIONARY => "Functionary",
            Self::HALFNEUTRAL => "HalfNeutral",
            Self::HURDLECOLOURCHANGING => "HurdleColourChanging",
            Self::PROTEAN => "Protean",
            Self::MAGIC => "Magic",
            Self::UNCAPTURABLE => "Uncapturable",
        }
    }
}

/// Validated, indexed view of the static tables.
#[derive(Debug)]
pub struct Catalog {
    info: Vec<&'static RoleInfo>,
    codes: HashMap<&'static str, Role>,
    glyphs: HashMap<&'static str, Role>,
}

static CATALOG: LazyLock<Catalog> = LazyLock::new(Catalog::build);

impl Catalog {
    /// The process-wide catalog.
    #[inline]
    pub fn get() -> &'static Catalog {
        &CATALOG
    }

    fn build() -> Self {
        let mut info = Vec::with_capacity(Role::VARIANTS.len());
        let mut codes = HashMap::new();
        let mut glyphs = HashMap::new();

        for role in Role::iter() {
            let rows = ROLES.iter().filter(|r| r.role == role).collect::<Vec<_>>();
            assert_eq!(rows.len(), 1, "catalog needs exactly one row for {role:?}");
            let row = rows[0];

            assert!(
                codes.insert(row.code, role).is_none(),
                "piece code {} is used twice",
                row.code
            );
            if row.glyph.len() == 1 {
                assert_eq!(
                    ROLES.iter().filter(|r| r.glyph == row.glyph).count(),
                    1,
                    "one-letter glyph {} is shared",
                    row.glyph
                );
            }
            if row.canonical {
                assert!(
                    glyphs.insert(row.glyph, role).is_none(),
                    "glyph {} has two canonical roles",
                    row.glyph
                );
            }
            info.push(row);
        }

        for (glyph, role) in GLYPH_ALIASES {
            assert!(
                glyphs.insert(*glyph, *role).is_none(),
                "alias {glyph} shadows a figurine"
            );
        }

        for role in Role::iter() {
            assert!(
                glyphs.contains_key(info[role.ix()].glyph),
                "figurine of {role:?} has no canonical role"
            );
        }

        Self {
            info,
            codes,
            glyphs,
        }
    }

    #[inline]
    pub fn info(&self, role: Role) -> &'static RoleInfo {
        self.info[role.ix()]
    }

    /// Case-insensitive lookup by Popeye code.
    pub fn by_code(&self, code: &str) -> Option<Role> {
        self.codes.get(code.to_ascii_uppercase().as_str()).copied()
    }

    /// Case-insensitive lookup by figurine, aliases included.
    pub fn by_glyph(&self, glyph: &str) -> Option<Role> {
        self.glyphs.get(glyph.to_ascii_lowercase().as_str()).copied()
    }
}

#[test]
fn catalog_is_complete() {
    let cat = Catalog::get();
    for role in Role::iter() {
        assert_eq!(cat.info(role).role, role);
        assert_eq!(Role::from_code(role.code()), Some(role));
    }
}

#[test]
fn catalog_lookups() {
    assert_eq!(Role::from_code("ca"), Some(Role::CAMEL));
    assert_eq!(Role::from_code("S"), Some(Role::KNIGHT));
    assert_eq!(Role::from_code("XX"), None);
    assert_eq!(Catalog::get().by_glyph("Q2"), Some(Role::GRASSHOPPER));
    assert_eq!(Catalog::get().by_glyph("s3"), Some(Role::ZEBRA));
    assert_eq!(Catalog::get().by_glyph("n"), Some(Role::KNIGHT));
    assert_eq!(Catalog::get().by_glyph("x"), None);
    assert_eq!(Role::GRASSHOPPER.name(), "grasshopper");
    assert!(Role::PAWN.is_orthodox());
    assert!(!Role::GRASSHOPPER.is_orthodox());
}

#[test]
fn one_letter_figurines_decode_to_their_role() {
    let cat = Catalog::get();
    for role in Role::iter().filter(|r| r.glyph().len() == 1) {
        assert_eq!(cat.by_glyph(role.glyph()), Some(role), "{role:?}");
    }
    assert_eq!(cat.by_glyph("o"), Some(Role::ORPHAN));
    assert_eq!(cat.by_glyph("O1"), Some(Role::FRIEND));
}

#[test]
fn specifier_keywords() {
    assert_eq!("Royal".parse::<Specifier>(), Ok(Specifier::ROYAL));
    assert_eq!("hurdlecolourchanging".parse::<Specifier>(), Ok(Specifier::HURDLECOLOURCHANGING));
    assert!("white".parse::<Specifier>().is_err());
    assert_eq!(Specifier::PARALYSING.code(), 'p');
    assert_eq!(Specifier::HALFNEUTRAL.keyword(), "halfneutral");
    assert_eq!(Specifier::HALFNEUTRAL.title(), "HalfNeutral");
}
