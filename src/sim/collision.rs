//! Separating Axis Theorem helpers
//!
//! Two convex polygons are disjoint iff some axis exists on which their
//! projections do not overlap. For rectangles in 2D only the two edge normals
//! of each shape need checking, so an OBB pair needs exactly four axes.

use glam::Vec2;

/// A closed interval `[min, max]` on the real line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Closed-interval overlap: touching endpoints count as overlapping
    #[inline]
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.min <= other.max && other.min <= self.max
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.max - self.min
    }
}

/// Project a point set onto `axis`, returning the covered interval
pub fn project_points(points: &[Vec2], axis: Vec2) -> Interval {
    points.iter().fold(
        Interval::new(f32::INFINITY, f32::NEG_INFINITY),
        |acc, p| {
            let d = p.dot(axis);
            Interval::new(acc.min.min(d), acc.max.max(d))
        },
    )
}

/// Whether `axis` separates the two point sets
#[inline]
pub fn separates(axis: Vec2, a: &[Vec2], b: &[Vec2]) -> bool {
    !project_points(a, axis).overlaps(&project_points(b, axis))
}

/// SAT test: the point sets overlap iff no candidate axis separates them
pub fn sat_overlap(axes: &[Vec2], a: &[Vec2], b: &[Vec2]) -> bool {
    !axes.iter().any(|&axis| separates(axis, a, b))
}
