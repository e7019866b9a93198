//! Chess problem diagrams with fairy pieces, neutral men and imitators, and
//! the text forms they travel in between an editor and a solving engine.

pub use crate::{
    config::DiagramConfig,
    error::{SnapshotError, StrictError, Warning},
    model::{
        Color, Square,
        board::Board,
        catalog::{Role, Specifier},
        piece::Piece,
        transform::NamedTransform,
    },
};

pub mod config;
pub mod error;
/// Modeling the problem diagram.
pub mod model;
pub mod notation;
