//! Drawing metrics used to size condition pictograms.

use crate::core::Condition;

/// Sizes the renderer uses for pictograms, in canvas units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PictoMetrics {
    pub event_width: f64,
    pub event_height: f64,
    pub event_margin: f64,
    pub text_padding: f64,
    pub px_per_char: f64,
}

impl Default for PictoMetrics {
    fn default() -> Self {
        Self {
            event_width: 100.0,
            event_height: 40.0,
            event_margin: 10.0,
            text_padding: 5.0,
            px_per_char: 15.0,
        }
    }
}

impl PictoMetrics {
    /// Width of a condition laid out on one row.
    pub fn condition_width(&self, condition: &Condition) -> f64 {
        match condition {
            Condition::Component(_) => self.event_width,
            Condition::Value(text) => self.text_padding * 2.0 + text.chars().count() as f64 * self.px_per_char,
            Condition::Binary(_, left, right) => {
                self.condition_width(left)
                    + self.condition_width(right)
                    + self.event_height
                    + self.event_margin
            }
        }
    }

    /// Width of a top-level comparison: left side, operator icon, right side,
    /// with margins between. Anything but a comparison measures zero.
    pub fn full_condition_width(&self, condition: &Condition) -> f64 {
        match condition {
            Condition::Binary(_, left, right) => {
                let left = self.condition_width(left) + self.event_margin;
                let icon = self.event_height + self.event_margin;
                left + icon + self.condition_width(right)
            }
            Condition::Value(_) | Condition::Component(_) => 0.0,
        }
    }
}
