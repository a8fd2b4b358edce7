//! Billboard text quads over a glyph atlas.

use glam::{Vec2, Vec3};
use rustc_hash::FxHashMap;

use super::Mesh;

/// Atlas rectangle and horizontal advance of one glyph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphCell {
    /// Top-left texcoord of the glyph in the atlas.
    pub uv_min: Vec2,
    /// Bottom-right texcoord of the glyph in the atlas.
    pub uv_max: Vec2,
    /// Distance to the next glyph origin, in quad widths.
    pub advance: f32,
}

/// Glyph lookup table for text meshes.
///
/// Built once by the caller and passed to every [`TextBoard`]; there is no
/// process-wide font cache.
#[derive(Debug, Clone)]
pub struct GlyphAtlas {
    glyphs: FxHashMap<char, GlyphCell>,
    fallback: GlyphCell,
}

impl GlyphAtlas {
    /// Grid atlas of `columns` x `rows` equal cells holding consecutive
    /// code points starting at `first`, row-major from the top-left.
    /// Characters outside the grid render with the first cell.
    #[must_use]
    pub fn monospace(columns: u32, rows: u32, first: char) -> Self {
        let columns = columns.max(1);
        let rows = rows.max(1);
        let cell = Vec2::new(1.0 / columns as f32, 1.0 / rows as f32);
        let mut glyphs = FxHashMap::default();
        for index in 0..columns * rows {
            let Some(ch) = char::from_u32(u32::from(first) + index) else {
                continue;
            };
            let origin = Vec2::new(
                (index % columns) as f32 * cell.x,
                (index / columns) as f32 * cell.y,
            );
            let _ = glyphs.insert(
                ch,
                GlyphCell {
                    uv_min: origin,
                    uv_max: origin + cell,
                    advance: 1.0,
                },
            );
        }
        let fallback = GlyphCell {
            uv_min: Vec2::ZERO,
            uv_max: cell,
            advance: 1.0,
        };
        Self { glyphs, fallback }
    }

    /// Override the advance of one glyph (proportional fonts).
    #[must_use]
    pub fn with_advance(mut self, ch: char, advance: f32) -> Self {
        if let Some(cell) = self.glyphs.get_mut(&ch) {
            cell.advance = advance;
        }
        self
    }

    /// Cell for `ch`, or the fallback cell.
    #[must_use]
    pub fn glyph(&self, ch: char) -> &GlyphCell {
        self.glyphs.get(&ch).unwrap_or(&self.fallback)
    }

    /// One unit quad per character in the XY plane, advancing along +X;
    /// newlines start a new row one unit below.
    #[must_use]
    pub fn mesh_for_str(&self, text: &str) -> Mesh {
        let mut mesh = Mesh::new("TextBoard");
        let mut base = Vec2::ZERO;
        for ch in text.chars() {
            if ch == '\n' {
                base = Vec2::new(0.0, base.y - 1.0);
                continue;
            }
            let g = self.glyph(ch);
            let start = mesh.vertex_count() as u32;
            let corners = [
                (Vec2::new(0.0, 0.0), Vec2::new(g.uv_min.x, g.uv_max.y)),
                (Vec2::new(1.0, 0.0), g.uv_max),
                (Vec2::new(1.0, 1.0), Vec2::new(g.uv_max.x, g.uv_min.y)),
                (Vec2::new(0.0, 1.0), g.uv_min),
            ];
            for (offset, uv) in corners {
                let p = base + offset;
                let _ = mesh.push_vertex(p.extend(0.0), Vec3::Z, uv);
            }
            mesh.indices.extend([
                start,
                start + 1,
                start + 2,
                start,
                start + 2,
                start + 3,
            ]);
            base.x += g.advance;
        }
        mesh
    }
}

/// Text label whose mesh is rebuilt only when its content changes.
#[derive(Debug, Clone)]
pub struct TextBoard {
    text: String,
    mesh: Mesh,
    /// Glyph color (RGBA).
    pub font_color: [f32; 4],
    /// Board color behind the glyphs when not transparent (RGBA).
    pub background_color: [f32; 4],
    /// Draw without the background quad.
    pub transparent: bool,
}

impl TextBoard {
    /// Board showing `text`.
    #[must_use]
    pub fn new(text: impl Into<String>, atlas: &GlyphAtlas) -> Self {
        let text = text.into();
        let mesh = atlas.mesh_for_str(&text);
        Self {
            text,
            mesh,
            font_color: [0.5, 0.5, 0.5, 1.0],
            background_color: [1.0, 1.0, 1.0, 1.0],
            transparent: true,
        }
    }

    /// Current text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Current mesh.
    #[must_use]
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Replace the text. Returns whether the mesh was regenerated.
    pub fn set_text(&mut self, text: &str, atlas: &GlyphAtlas) -> bool {
        if text == self.text {
            return false;
        }
        log::debug!("updating text board mesh to '{text}'");
        text.clone_into(&mut self.text);
        self.mesh = atlas.mesh_for_str(text);
        true
    }
}
