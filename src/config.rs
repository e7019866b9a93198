//! # Diagram configuration
//!
//! House style knobs for the codecs, read from TOML:
//!
//! ```toml
//! [board]
//! black_to_move = false
//!
//! [compact]
//! marked_specifier = "paralysing"
//!
//! [pieces_clause]
//! indent = "  "
//! ```
//!
//! Every key is optional.

use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, model::catalog::Specifier};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramConfig {
    pub board: BoardConfig,
    pub compact: CompactConfig,
    pub pieces_clause: ClauseConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Side to move on a fresh board.
    pub black_to_move: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            black_to_move: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompactConfig {
    /// What a `b`-marked glyph decodes to. The compact notation only
    /// records that some specifier is present, not which.
    pub marked_specifier: Specifier,
}

impl Default for CompactConfig {
    fn default() -> Self {
        Self {
            marked_specifier: Specifier::ROYAL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClauseConfig {
    /// Prefix of every encoded line.
    pub indent: String,
}

impl DiagramConfig {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}

#[test]
fn config_defaults_and_overrides() {
    let cfg = DiagramConfig::from_toml("").unwrap();
    assert_eq!(cfg, DiagramConfig::default());
    assert!(cfg.board.black_to_move);
    assert_eq!(cfg.compact.marked_specifier, Specifier::ROYAL);
    assert_eq!(cfg.pieces_clause.indent, "");

    let cfg = DiagramConfig::from_toml(
        "[board]\nblack_to_move = false\n[compact]\nmarked_specifier = \"magic\"\n[pieces_clause]\nindent = \"  \"\n",
    )
    .unwrap();
    assert!(!cfg.board.black_to_move);
    assert_eq!(cfg.compact.marked_specifier, Specifier::MAGIC);
    assert_eq!(cfg.pieces_clause.indent, "  ");

    assert!(DiagramConfig::from_toml("[board]\nblack_to_move = 3\n").is_err());
}
