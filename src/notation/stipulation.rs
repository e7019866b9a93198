//! # Stipulations
//!
//! Just enough of the Popeye stipulation grammar to tell who moves first
//! and who delivers the final blow: `h#2`, `ser-hs#5`, `3->h=2.5`, `s#3`.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::Color;

static STIPULATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<intro>[0-9]+->)?(?P<reci>reci-)?(?P<serial>p?h?ser-)?(?P<play>h|s|r|semi-r|hs|pg|)(?P<aim>[#=+]?|==) *(?P<length>[0-9.]+)$",
    )
    .unwrap()
});

/// Side to move in the diagram position.
///
/// Helpplay and series help-selfplay start with black, as do the
/// studies written `= black to move` or `+ black to move`. Anything
/// unrecognised is taken to start with white.
pub fn side_to_move(stipulation: &str) -> Color {
    let text = stipulation.trim().to_lowercase();
    if text == "= black to move" || text == "+ black to move" {
        return Color::BLACK;
    }

    let Some(caps) = STIPULATION.captures(&text) else {
        return Color::WHITE;
    };
    let serial = caps.name("serial").map(|m| m.as_str());
    let play = caps.name("play").map_or("", |m| m.as_str());

    match (serial, play) {
        (Some("ser-"), "hs") | (_, "h") => Color::BLACK,
        _ => Color::WHITE,
    }
}

/// Side whose move ends the solution.
pub fn side_to_complete(stipulation: &str) -> Color {
    let text = stipulation.trim().to_lowercase();
    match STIPULATION
        .captures(&text)
        .and_then(|caps| caps.name("play"))
        .map(|m| m.as_str())
    {
        Some("s" | "r" | "hs") => Color::BLACK,
        _ => Color::WHITE,
    }
}

#[test]
fn who_moves_first() {
    assert_eq!(side_to_move("#2"), Color::WHITE);
    assert_eq!(side_to_move("h#2"), Color::BLACK);
    assert_eq!(side_to_move("H#2.5"), Color::BLACK);
    assert_eq!(side_to_move("ser-hs#5"), Color::BLACK);
    assert_eq!(side_to_move("hs#3"), Color::WHITE);
    assert_eq!(side_to_move("3->h=2"), Color::BLACK);
    assert_eq!(side_to_move("s#3"), Color::WHITE);
    assert_eq!(side_to_move("= black to move"), Color::BLACK);
    assert_eq!(side_to_move("+ Black to move"), Color::BLACK);
    assert_eq!(side_to_move("proof game in 4"), Color::WHITE);
}

#[test]
fn who_finishes() {
    assert_eq!(side_to_complete("s#3"), Color::BLACK);
    assert_eq!(side_to_complete("r#2"), Color::BLACK);
    assert_eq!(side_to_complete("ser-hs#5"), Color::BLACK);
    assert_eq!(side_to_complete("h#2"), Color::WHITE);
    assert_eq!(side_to_complete("#2"), Color::WHITE);
    assert_eq!(side_to_complete("semi-r#2"), Color::WHITE);
    assert_eq!(side_to_complete("nonsense"), Color::WHITE);
}
