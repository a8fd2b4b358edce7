//! Mesh buffers and stateless primitive generators.
//!
//! Every generator is a pure function of its shape parameters and returns a
//! [`Mesh`]: plain position/normal/texcoord/index arrays plus a caller-
//! assigned label. An empty index buffer means the mesh is drawn
//! non-indexed, three consecutive vertices per triangle.

mod arrow;
mod bounding_grid;
mod cuboid;
mod cylinder;
mod icosphere;
mod plane;
mod sphere;
mod text;

pub use arrow::{arrow, ARROW_HEAD_POSITION, ARROW_HEAD_WIDTH};
pub use bounding_grid::{BoundingGrid, BoundingGridStyle};
pub use cuboid::cuboid;
pub use cylinder::{cylinder, cylinder_between_points, orient_between_points};
pub use icosphere::Icosphere;
pub use plane::{infinite_plane, plane};
pub use sphere::sphere;
pub use text::{GlyphAtlas, GlyphCell, TextBoard};

use glam::{Mat3, Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Primitive assembly mode of a mesh.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
pub enum Topology {
    /// Independent triangles.
    #[default]
    Triangles,
    /// Line strip with one adjacency vertex at each end.
    LineStripAdjacency,
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl BoundingBox {
    /// Tight box around a set of points. `None` for an empty set.
    #[must_use]
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let first = *points.first()?;
        let (min, max) = points
            .iter()
            .fold((first, first), |(lo, hi), &p| (lo.min(p), hi.max(p)));
        Some(Self { min, max })
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Edge lengths.
    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Box grown about its center by `slack` times its size.
    #[must_use]
    pub fn grown(&self, slack: f32) -> Self {
        let pad = self.size() * slack * 0.5;
        Self {
            min: self.min - pad,
            max: self.max + pad,
        }
    }

    /// Smallest box containing both.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

/// Interleaved vertex for GPU upload.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Unit normal.
    pub normal: [f32; 3],
    /// Texture coordinate.
    pub texcoord: [f32; 2],
}

/// Generated geometry buffers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Caller-assigned name, e.g. an atom identifier.
    pub label: String,
    /// Primitive assembly mode.
    pub topology: Topology,
    /// Vertex positions.
    pub positions: Vec<Vec3>,
    /// Per-vertex normals, parallel to `positions`.
    pub normals: Vec<Vec3>,
    /// Per-vertex texture coordinates, parallel to `positions`.
    pub texcoords: Vec<Vec2>,
    /// Triangle indices; empty for non-indexed meshes.
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Empty triangle mesh with a label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    /// Replace the label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// True when the mesh holds no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// True when triangles are assembled through `indices`.
    #[must_use]
    pub fn is_indexed(&self) -> bool {
        !self.indices.is_empty()
    }

    /// Number of triangles; line topologies have none.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        match self.topology {
            Topology::LineStripAdjacency => 0,
            Topology::Triangles if self.is_indexed() => self.indices.len() / 3,
            Topology::Triangles => self.positions.len() / 3,
        }
    }

    /// Bounding box of all positions.
    #[must_use]
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(&self.positions)
    }

    /// Append one vertex and return its index.
    pub fn push_vertex(&mut self, position: Vec3, normal: Vec3, uv: Vec2) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position);
        self.normals.push(normal);
        self.texcoords.push(uv);
        index
    }

    /// Triangle vertex positions, resolving indices when present.
    #[must_use]
    pub fn triangles(&self) -> Vec<[Vec3; 3]> {
        if self.topology != Topology::Triangles {
            return Vec::new();
        }
        if self.is_indexed() {
            self.indices
                .chunks_exact(3)
                .map(|t| {
                    [
                        self.positions[t[0] as usize],
                        self.positions[t[1] as usize],
                        self.positions[t[2] as usize],
                    ]
                })
                .collect()
        } else {
            self.positions
                .chunks_exact(3)
                .map(|t| [t[0], t[1], t[2]])
                .collect()
        }
    }

    /// Concatenate another triangle mesh into this one.
    ///
    /// Mixing indexed and non-indexed input yields an indexed result; the
    /// non-indexed side gets sequential indices.
    pub fn append(&mut self, other: &Mesh) {
        if other.is_empty() {
            return;
        }
        if self.is_empty() {
            let label = std::mem::take(&mut self.label);
            *self = other.clone();
            self.label = label;
            return;
        }
        let base = self.positions.len() as u32;
        if self.is_indexed() || other.is_indexed() {
            if !self.is_indexed() {
                self.indices = (0..base).collect();
            }
            if other.is_indexed() {
                self.indices.extend(other.indices.iter().map(|i| i + base));
            } else {
                let count = other.positions.len() as u32;
                self.indices.extend(base..base + count);
            }
        }
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.texcoords.extend_from_slice(&other.texcoords);
    }

    /// Copy of this mesh with positions and normals transformed.
    #[must_use]
    pub fn transformed(&self, transform: &Mat4) -> Mesh {
        let normal_matrix = Mat3::from_mat4(*transform).inverse().transpose();
        Mesh {
            label: self.label.clone(),
            topology: self.topology,
            positions: self
                .positions
                .iter()
                .map(|&p| transform.transform_point3(p))
                .collect(),
            normals: self
                .normals
                .iter()
                .map(|&n| (normal_matrix * n).normalize_or_zero())
                .collect(),
            texcoords: self.texcoords.clone(),
            indices: self.indices.clone(),
        }
    }

    /// Interleaved vertices for upload.
    #[must_use]
    pub fn vertices(&self) -> Vec<MeshVertex> {
        self.positions
            .iter()
            .enumerate()
            .map(|(i, p)| MeshVertex {
                position: p.to_array(),
                normal: self.normals.get(i).copied().unwrap_or(Vec3::ZERO).to_array(),
                texcoord: self
                    .texcoords
                    .get(i)
                    .copied()
                    .unwrap_or(Vec2::ZERO)
                    .to_array(),
            })
            .collect()
    }
}

/// Any unit vector perpendicular to `v`.
pub(crate) fn find_perpendicular(v: Vec3) -> Vec3 {
    if v.length_squared() < 1e-8 {
        return Vec3::X;
    }
    let n = v.normalize();
    let candidate = if n.x.abs() < 0.9 { Vec3::X } else { Vec3::Y };
    n.cross(candidate).normalize()
}
