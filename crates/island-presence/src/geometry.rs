//! Target surface geometry for each presence state.

use std::time::Duration;

use crate::machine::PresenceState;

/// How long the host animates between geometries (ease-in-out).
pub const TRANSITION_DURATION: Duration = Duration::from_millis(500);

/// Extra width added beside the physical notch to show the avatar head.
const NOTCH_CONTENT_WIDTH: f64 = 90.0;
const MIN_COMPACT_WIDTH: f64 = 200.0;
const FALLBACK_MENU_BAR_HEIGHT: f64 = 32.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceGeometry {
    pub width: f64,
    pub height: f64,
    pub top_radius: f64,
    pub bottom_radius: f64,
}

impl SurfaceGeometry {
    pub const EXPANDED: Self = Self {
        width: 640.0,
        height: 190.0,
        top_radius: 19.0,
        bottom_radius: 24.0,
    };

    /// Compact size used when the screen metrics are unknown.
    pub const COMPACT: Self = Self {
        width: 220.0,
        height: 32.0,
        top_radius: 6.0,
        bottom_radius: 14.0,
    };

    /// Compact geometry sized around a physical notch.
    ///
    /// `notch_width` is the screen width minus both menu-bar side areas;
    /// `top_inset` is the safe-area inset (zero on notchless screens).
    pub fn compact_for_screen(notch_width: Option<f64>, top_inset: Option<f64>) -> Self {
        let Some(notch_width) = notch_width else {
            return Self::COMPACT;
        };
        let height = match top_inset {
            Some(inset) if inset > 0.0 => inset,
            _ => FALLBACK_MENU_BAR_HEIGHT,
        };
        Self {
            width: (notch_width + NOTCH_CONTENT_WIDTH).max(MIN_COMPACT_WIDTH),
            height,
            ..Self::COMPACT
        }
    }

    /// Center point relative to the surface's top-left corner.
    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }
}

impl PresenceState {
    pub fn geometry(self) -> SurfaceGeometry {
        match self {
            Self::Closed => SurfaceGeometry::COMPACT,
            Self::Expanded => SurfaceGeometry::EXPANDED,
        }
    }
}
