// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Point sequences and component sets produced by the samplers

use nalgebra::{Point2, Point3};
use smallvec::SmallVec;

/// One connected, drawable piece of a curve. Order is drawing order.
pub type PointSequence = Vec<Point2<f64>>;

/// Height function that keeps everything in the z = 0 plane
#[inline]
pub fn flat_height(_x: f64, _y: f64) -> f64 {
    0.0
}

/// Lift a 2D sequence into 3D with `z = height(x, y)`
pub fn lift_points<H>(points: &[Point2<f64>], height: H) -> Vec<Point3<f64>>
where
    H: Fn(f64, f64) -> f64,
{
    points
        .iter()
        .map(|p| Point3::new(p.x, p.y, height(p.x, p.y)))
        .collect()
}

/// Disjoint visible pieces of a sampled graph.
///
/// Graphs rarely split into more than a handful of pieces inside one window,
/// so the components live inline until a fifth one shows up.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentSet {
    components: SmallVec<[PointSequence; 4]>,
}

impl ComponentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a finished component; empty sequences are dropped
    pub fn push(&mut self, component: PointSequence) {
        if !component.is_empty() {
            self.components.push(component);
        }
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PointSequence> {
        self.components.iter()
    }

    /// Total number of points across all components
    pub fn point_count(&self) -> usize {
        self.components.iter().map(Vec::len).sum()
    }

    /// Lift every component into 3D
    pub fn lift<H>(&self, height: H) -> Vec<Vec<Point3<f64>>>
    where
        H: Fn(f64, f64) -> f64,
    {
        self.components
            .iter()
            .map(|c| lift_points(c, &height))
            .collect()
    }

    pub fn into_vec(self) -> Vec<PointSequence> {
        self.components.into_vec()
    }
}

impl std::ops::Index<usize> for ComponentSet {
    type Output = PointSequence;

    fn index(&self, index: usize) -> &Self::Output {
        &self.components[index]
    }
}

impl<'a> IntoIterator for &'a ComponentSet {
    type Item = &'a PointSequence;
    type IntoIter = std::slice::Iter<'a, PointSequence>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.iter()
    }
}

/// Lattice coordinate plus the point it maps to in the plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    pub i: i64,
    pub j: i64,
    pub position: Point2<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_skips_empty_components() {
        let mut set = ComponentSet::new();
        set.push(Vec::new());
        assert!(set.is_empty());

        set.push(vec![Point2::new(0.0, 0.0), Point2::new(1.0, 1.0)]);
        set.push(vec![Point2::new(2.0, 0.0)]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.point_count(), 3);
        assert_eq!(set[1][0], Point2::new(2.0, 0.0));
    }

    #[test]
    fn test_lift_uses_height_function() {
        let pts = vec![Point2::new(1.0, 2.0), Point2::new(3.0, 4.0)];
        let lifted = lift_points(&pts, |x, y| x + y);
        assert_eq!(lifted[0], Point3::new(1.0, 2.0, 3.0));
        assert_eq!(lifted[1], Point3::new(3.0, 4.0, 7.0));

        let flat = lift_points(&pts, flat_height);
        assert!(flat.iter().all(|p| p.z == 0.0));
    }
}
