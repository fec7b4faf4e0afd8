//! Transition timing functions.

use std::fmt;

/// Timing function written into item transitions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
    /// The CSS `ease` keyword, used for opacity and transform.
    Ease,
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Curve used for item moves: a soft ease-out.
    pub const ITEM_MOVE: Easing = Easing::CubicBezier(0.25, 0.46, 0.45, 0.94);

    /// CSS `<easing-function>` text.
    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Easing::Ease => f.write_str("ease"),
            Easing::CubicBezier(x1, y1, x2, y2) => {
                write!(f, "cubic-bezier({}, {}, {}, {})", x1, y1, x2, y2)
            }
        }
    }
}
