//! Changing-line transformation.
//!
//! A changing line flips its polarity in the transformed hexagram and is
//! stable there; stable lines pass through unchanged. A reading with no
//! changing lines has no transformed hexagram.

use crate::line::Line;
use crate::pattern::LinePattern;

/// Derive the transformed pattern from six cast lines.
///
/// Returns `None` when no line is changing. Deterministic; consumes no
/// randomness.
pub fn transformed_pattern(lines: &[Line; 6]) -> Option<LinePattern> {
    if !lines.iter().any(|l| l.changing) {
        return None;
    }
    let mut kinds = [lines[0].kind; 6];
    for (i, line) in lines.iter().enumerate() {
        kinds[i] = if line.changing {
            line.kind.flipped()
        } else {
            line.kind
        };
    }
    Some(LinePattern::from_kinds(kinds))
}
