//! Planar layout of ring paths.
//!
//! Each ring is a regular polygon through its anchor atom: for a path of
//! `k` atoms the walk turns by `2π/(k+1)` at every vertex, so the last path
//! atom lands one bond length from the anchor. Two rings anchored at the
//! same atom share the atom placed straight ahead and are walked on
//! opposite sides of that bond. A ring atom that anchors its own ring
//! either fuses it along an edge with a neighbouring ring atom or grows it
//! outward.

use std::f32::consts::{PI, TAU};

use glam::{Quat, Vec3};

use super::element::ElementTable;
use super::geometry::RingMembers;
use super::tree::{NodeId, RING_CLOSURE_ORDER};
use super::vsepr::{slot_directions, Frame, Layout};

/// Positions after `start` of a polygon walk: step along `first_edge`,
/// then rotate the step by `turn` about `axis` before each further step.
fn walk(start: Vec3, first_edge: Vec3, axis: Vec3, turn: f32, edge: f32, count: usize) -> Vec<Vec3> {
    let rotation = Quat::from_axis_angle(axis, turn);
    let mut direction = first_edge;
    let mut position = start;
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        position += direction * edge;
        out.push(position);
        direction = (rotation * direction).normalize();
    }
    out
}

/// Path positions of a ring of `len` atoms sharing the edge from `anchor`
/// to `shared`, with the shared atom first in the result. The polygon
/// turns toward `sign * axis × edge`.
fn fused_walk(anchor: Vec3, shared: Vec3, len: usize, axis: Vec3, sign: f32) -> Vec<Vec3> {
    let theta = TAU / (len + 1) as f32;
    let delta = shared - anchor;
    let edge = delta.length();
    walk(anchor, delta / edge, axis, sign * theta, edge, len)
}

impl<T: ElementTable> Layout<'_, T> {
    /// Lay out every ring anchored at `anchor`, entered along `frame.z`.
    pub(crate) fn layout_ring(&mut self, anchor: NodeId, position: Vec3, frame: Frame, is_root: bool) {
        let tree = self.tree;
        let node = tree.node(anchor);
        let d = frame.z;
        let x = (Quat::from_axis_angle(d, self.options.ring_initial_angle) * frame.x).normalize();
        let normal = x.cross(d).normalize();
        self.anchor_substituents(anchor, position, d, normal, is_root);

        match node.ring_paths() {
            [] => log::warn!(
                "ring at {} '{}' has no cycle",
                node.atom.element,
                node.atom.identifier
            ),
            [path] => {
                let k = path.len();
                let theta = TAU / (k + 1) as f32;
                let alpha = (PI - theta) / 2.0;
                let first_edge = d * alpha.cos() + x * alpha.sin();
                let positions =
                    walk(position, first_edge, normal, theta, self.options.bond_length, k);
                self.finish_ring(anchor, position, path, &positions, normal, None);
            }
            [first, second, rest @ ..] => {
                if !rest.is_empty() {
                    log::warn!(
                        "{} rings share {} '{}'; only two fused rings are laid out",
                        rest.len() + 2,
                        node.atom.element,
                        node.atom.identifier
                    );
                }
                self.layout_fused_pair(anchor, position, d, normal, first, second);
            }
        }
    }

    /// Substituents of a ring anchor: behind the root ring, or above and
    /// below the plane for a ring entered through a bond.
    fn anchor_substituents(&mut self, anchor: NodeId, position: Vec3, d: Vec3, normal: Vec3, is_root: bool) {
        let tree = self.tree;
        let node = tree.node(anchor);
        let children = &node.children;
        if children.is_empty() {
            return;
        }
        let directions = if is_root {
            slot_directions(children.len(), &Frame::along(-d, normal))
        } else {
            if children.len() > 2 {
                log::warn!(
                    "ring anchor {} '{}' has {} substituents; only two fit",
                    node.atom.element,
                    node.atom.identifier,
                    children.len()
                );
            }
            Some(vec![normal, -normal])
        };
        let Some(directions) = directions else {
            log::warn!(
                "too many substituents ({}) on ring root {} '{}'",
                children.len(),
                node.atom.element,
                node.atom.identifier
            );
            return;
        };
        self.attach_substituents(anchor, position, children, &directions, d);
    }

    /// Substituents of a ring member around its outward bisector.
    fn member_substituents(&mut self, member: NodeId, position: Vec3, outward: Vec3, normal: Vec3) {
        let tree = self.tree;
        let node = tree.node(member);
        let mut children = node.children.as_slice();
        if children.len() > 3 {
            log::warn!(
                "too many substituents ({}) on ring atom {} '{}'",
                children.len(),
                node.atom.element,
                node.atom.identifier
            );
            children = &children[..3];
        }
        let Some(directions) = slot_directions(children.len(), &Frame::along(outward, normal)) else {
            return;
        };
        self.attach_substituents(member, position, children, &directions, normal);
    }

    fn layout_fused_pair(
        &mut self,
        anchor: NodeId,
        position: Vec3,
        d: Vec3,
        normal: Vec3,
        first: &[NodeId],
        second: &[NodeId],
    ) {
        let tree = self.tree;
        let Some((ia, ib)) = self.shared_atom(first, second) else {
            let atom = tree.atom(anchor);
            log::warn!(
                "fused rings at {} '{}' share no atom",
                atom.element,
                atom.identifier
            );
            return;
        };
        let shared = first[ia];
        self.alias(second[ib], shared);
        let shared_position = position + d * self.options.bond_length;
        if self.place_atom(shared, shared_position, Some(anchor)) {
            let order = tree.atom(shared).bond_order;
            self.add_bond(anchor, position, shared, shared_position, order, normal.cross(d));
            self.member_substituents(shared, shared_position, d, normal);
        }
        for (path, index, sign) in [(first, ia, 1.0), (second, ib, -1.0)] {
            if index != 0 && index + 1 != path.len() {
                let atom = tree.atom(path[index]);
                log::warn!(
                    "shared atom {} '{}' sits inside a ring path; ring skipped",
                    atom.element,
                    atom.identifier
                );
                continue;
            }
            let mut positions = fused_walk(position, shared_position, path.len(), normal, sign);
            if index != 0 {
                positions.reverse();
            }
            self.finish_ring(anchor, position, path, &positions, normal, Some(path[index]));
        }
    }

    /// Last atoms of `first` and `second` that are the same atom, searched
    /// from the path ends.
    fn shared_atom(&self, first: &[NodeId], second: &[NodeId]) -> Option<(usize, usize)> {
        first.iter().enumerate().rev().find_map(|(ia, &a)| {
            second
                .iter()
                .enumerate()
                .rev()
                .find(|&(_, &b)| self.same_atom(a, b))
                .map(|(ib, _)| (ia, ib))
        })
    }

    fn same_atom(&self, a: NodeId, b: NodeId) -> bool {
        a == b || self.tree.subtree_eq(a, self.tree, b)
    }

    /// Place and bond the atoms of one ring path at `positions`. `shared`
    /// names a path atom that belongs to a neighbouring ring: it is neither
    /// placed here nor bonded to the anchor.
    fn finish_ring(
        &mut self,
        anchor: NodeId,
        anchor_position: Vec3,
        path: &[NodeId],
        positions: &[Vec3],
        normal: Vec3,
        shared: Option<NodeId>,
    ) {
        let tree = self.tree;
        let k = path.len();
        if k == 0 || positions.len() != k {
            return;
        }
        let center = (anchor_position + positions.iter().copied().sum::<Vec3>()) / (k + 1) as f32;
        let neighbour = |i: usize, forward: bool| -> (NodeId, Vec3) {
            if forward {
                if i + 1 == k { (anchor, anchor_position) } else { (path[i + 1], positions[i + 1]) }
            } else if i == 0 {
                (anchor, anchor_position)
            } else {
                (path[i - 1], positions[i - 1])
            }
        };

        for i in 0..k {
            let (node, position) = (path[i], positions[i]);
            let (prev, prev_position) = neighbour(i, false);
            let (next, next_position) = neighbour(i, true);
            let is_shared = shared == Some(node);

            if !(i == 0 && is_shared) {
                let order = tree.atom(node).bond_order;
                let axis = normal.cross(position - prev_position);
                self.add_bond(prev, prev_position, node, position, order, axis);
            }
            if is_shared || !self.place_atom(node, position, Some(prev)) {
                continue;
            }
            let outward = ((position - prev_position).normalize()
                - (next_position - position).normalize())
            .normalize_or_zero();
            if tree.node(node).is_ring() {
                let neighbours = [(prev, prev_position), (next, next_position)];
                self.nested_ring(node, position, outward, normal, neighbours, center);
            } else {
                self.member_substituents(node, position, outward, normal);
            }
        }

        let last = path[k - 1];
        if shared != Some(last) {
            let closing = positions[k - 1];
            let axis = normal.cross(anchor_position - closing);
            self.add_bond(last, closing, anchor, anchor_position, RING_CLOSURE_ORDER, axis);
        }

        let mut members = Vec::with_capacity(k + 1);
        members.push(self.canonical(anchor));
        members.extend(path.iter().map(|&p| self.canonical(p)));
        self.geometry.rings.push(RingMembers {
            anchor: self.canonical(anchor),
            members,
            center,
            normal,
        });
    }

    /// Ring anchored at a member of an enclosing ring.
    fn nested_ring(
        &mut self,
        node: NodeId,
        position: Vec3,
        outward: Vec3,
        normal: Vec3,
        neighbours: [(NodeId, Vec3); 2],
        outer_center: Vec3,
    ) {
        let tree = self.tree;
        let paths = tree.node(node).ring_paths();
        let Some(inner) = paths.first().filter(|p| !p.is_empty()) else {
            return;
        };
        let k = inner.len();
        let fused = [0, k - 1].into_iter().find_map(|index| {
            neighbours
                .iter()
                .find(|&&(n, _)| self.same_atom(inner[index], n))
                .map(|&(n, p)| (index, n, p))
        });
        let Some((index, outer_atom, shared_position)) = fused else {
            let frame = Frame::along(outward, normal.cross(outward));
            self.layout_ring(node, position, frame, false);
            return;
        };
        if paths.len() > 1 {
            let atom = tree.atom(node);
            log::warn!(
                "{} rings at fused atom {} '{}'; only the first is laid out",
                paths.len(),
                atom.element,
                atom.identifier
            );
        }
        self.alias(inner[index], outer_atom);
        self.anchor_substituents(node, position, outward, normal, false);

        let edge = shared_position - position;
        let midpoint = position + edge * 0.5;
        let sign = if normal.cross(edge).dot(midpoint - outer_center) >= 0.0 { 1.0 } else { -1.0 };
        let mut positions = fused_walk(position, shared_position, k, normal, sign);
        if index != 0 {
            positions.reverse();
        }
        self.finish_ring(node, position, inner, &positions, normal, Some(inner[index]));
    }
}
