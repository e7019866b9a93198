use thiserror::Error;

use crate::model::Square;

/// Something a permissive decoder stepped over.
///
/// Decoders never fail on diagram text; they collect these instead and
/// leave it to the caller whether to show, ignore or reject them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// Compact glyph with no catalog entry; the square stays empty
    #[error("unknown glyph {glyph:?} on {square}")]
    UnknownGlyph { glyph: String, square: Square },
    /// `(` without a closing `)`; the parenthesis is skipped
    #[error("unclosed parenthesis at offset {offset}")]
    UnbalancedParen { offset: usize },
    /// Compact text left over once h1 is filled
    #[error("text past the last square: {rest:?}")]
    Overflow { rest: String },
    /// Pieces clause group with a piece code the catalog does not know
    #[error("unknown piece code {code:?}")]
    UnknownRole { code: String },
    /// Word that is neither a specifier nor a piece group; the rest of
    /// its line is skipped
    #[error("cannot read {word:?}")]
    UnparsedWord { word: String },
    /// Non-blank line not starting with a color
    #[error("not a piece line: {line:?}")]
    SkippedLine { line: String },
}

/// Warnings promoted to an error by a strict decoder.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{} problem(s) in diagram text: {}", .warnings.len(), join(.warnings))]
pub struct StrictError {
    pub warnings: Vec<Warning>,
}

fn join(warnings: &[Warning]) -> String {
    warnings
        .iter()
        .map(|w| w.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl StrictError {
    /// `Ok` when nothing was stepped over.
    pub fn check<T>(value: T, warnings: Vec<Warning>) -> Result<T, Self> {
        if warnings.is_empty() {
            Ok(value)
        } else {
            Err(Self { warnings })
        }
    }
}

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("cannot write snapshot: {0}")]
    Write(#[from] toml::ser::Error),
    #[error("cannot read snapshot: {0}")]
    Read(#[from] toml::de::Error),
}

#[derive(Error, Debug)]
#[error("invalid diagram configuration: {0}")]
pub struct ConfigError(#[from] toml::de::Error);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("not a square: {0:?}")]
pub struct SquareParseError(pub String);

#[test]
fn strict_error_lists_warnings() {
    let err = StrictError::check(
        (),
        vec![
            Warning::UnbalancedParen { offset: 3 },
            Warning::UnknownRole {
                code: "xx".to_string(),
            },
        ],
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "2 problem(s) in diagram text: unclosed parenthesis at offset 3; unknown piece code \"xx\""
    );
    assert_eq!(StrictError::check(7, vec![]), Ok(7));
}
