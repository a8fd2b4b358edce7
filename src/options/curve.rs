use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Which ends of a swept tube get closed.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum CurveCover {
    /// Open tube.
    None,
    /// Close the first cross-section only.
    Top,
    /// Close the last cross-section only.
    Bottom,
    /// Close both ends.
    #[default]
    Both,
}

impl CurveCover {
    /// Whether the first cross-section is closed.
    #[must_use]
    pub fn covers_top(self) -> bool {
        matches!(self, Self::Top | Self::Both)
    }

    /// Whether the last cross-section is closed.
    #[must_use]
    pub fn covers_bottom(self) -> bool {
        matches!(self, Self::Bottom | Self::Both)
    }
}

/// Spline sampling and frame-propagation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Curve", inline)]
#[serde(default)]
pub struct CurveOptions {
    /// Samples generated between consecutive control points.
    #[schemars(title = "Segments Per Span", range(min = 1, max = 128))]
    pub segments_per_span: usize,
    /// Cross-product magnitude below which a frame is carried forward.
    #[schemars(skip)]
    pub frame_epsilon: f32,
    /// End caps for swept tubes.
    #[schemars(title = "Cover")]
    pub cover: CurveCover,
}

impl Default for CurveOptions {
    fn default() -> Self {
        Self {
            segments_per_span: 10,
            frame_epsilon: 1e-4,
            cover: CurveCover::Both,
        }
    }
}
