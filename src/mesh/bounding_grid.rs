//! Grid-shaded box around another mesh's bounds.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use super::{cuboid, BoundingBox, GlyphAtlas, Mesh, TextBoard};

/// Shader parameters carried alongside the grid geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundingGridStyle {
    /// Line color.
    pub grid_color: [f32; 3],
    /// Lines per axis.
    pub num_lines: u32,
    /// Line width in pixels.
    pub line_width: f32,
    /// Draw tick marks only instead of full grid lines.
    pub ticks_only: bool,
    /// Fractional growth applied to the bounds of transparent targets.
    pub slack: f32,
    /// Uniform scale of the axis labels.
    pub label_scale: f32,
}

impl Default for BoundingGridStyle {
    fn default() -> Self {
        Self {
            grid_color: [1.0, 1.0, 1.0],
            num_lines: 10,
            line_width: 1.2,
            ticks_only: true,
            slack: 0.02,
            label_scale: 0.3,
        }
    }
}

/// Box mesh around a bounding box plus origin/axis label anchors.
#[derive(Debug, Clone)]
pub struct BoundingGrid {
    /// Box geometry in the target's coordinate space.
    pub mesh: Mesh,
    /// Label text and anchor: "0" at the min corner, then "x", "y", "z"
    /// at the far end of each axis.
    pub labels: Vec<(String, Vec3)>,
    /// Shader parameters.
    pub style: BoundingGridStyle,
}

impl BoundingGrid {
    /// Grid around `bounds`. Transparent targets get `style.slack` extra
    /// room so the grid does not z-fight with their surface.
    #[must_use]
    pub fn new(
        bounds: &BoundingBox,
        transparent: bool,
        style: BoundingGridStyle,
    ) -> Self {
        let bb = if transparent {
            bounds.grown(style.slack)
        } else {
            *bounds
        };
        let mesh = cuboid(bb.size(), false)
            .transformed(&Mat4::from_translation(bb.center()))
            .with_label("Bounding Grid");
        let (min, max) = (bb.min, bb.max);
        let labels = vec![
            ("0".to_owned(), min - Vec3::new(0.1, 0.0, 0.0)),
            ("x".to_owned(), Vec3::new(max.x + 0.1, min.y, min.z)),
            ("y".to_owned(), Vec3::new(min.x - 0.1, max.y, min.z)),
            ("z".to_owned(), Vec3::new(min.x - 0.1, min.y, max.z)),
        ];
        Self {
            mesh,
            labels,
            style,
        }
    }

    /// Text meshes for the labels, scaled and moved to their anchors.
    #[must_use]
    pub fn label_meshes(&self, atlas: &GlyphAtlas) -> Vec<Mesh> {
        self.labels
            .iter()
            .map(|(text, anchor)| {
                let board = TextBoard::new(text.clone(), atlas);
                let transform = Mat4::from_translation(*anchor)
                    * Mat4::from_scale(Vec3::splat(self.style.label_scale));
                board.mesh().transformed(&transform).with_label(text.clone())
            })
            .collect()
    }
}
