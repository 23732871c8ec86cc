use serde::Serialize;

/// Symbolic color of an entry. How it is drawn is up to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Red,
    Green,
    Yellow,
    Blue,
    Cyan,
    Magenta,
}
