//! Oriented bounding boxes
//!
//! An OBB is a rectangle with arbitrary rotation:
//! - center: world-space midpoint
//! - extents: FULL width (local x) and height (local y)
//! - rotation: radians, counter-clockwise from world x
//!
//! Corners are derived from these three fields on demand and never stored.

use glam::{Affine2, Vec2};
use serde::{Deserialize, Serialize};

use super::collision::{Interval, project_points, sat_overlap};

/// An oriented rectangle used as a collision proxy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obb {
    pub center: Vec2,
    pub extents: Vec2,
    pub rotation: f32,
}

/// Corners of the unit square, in the order returned by [`Obb::corners`]
const UNIT_CORNERS: [Vec2; 4] = [
    Vec2::new(-0.5, -0.5),
    Vec2::new(0.5, -0.5),
    Vec2::new(-0.5, 0.5),
    Vec2::new(0.5, 0.5),
];

impl Obb {
    pub fn new(center: Vec2, extents: Vec2, rotation: f32) -> Self {
        Self {
            center,
            extents,
            rotation,
        }
    }

    pub fn axis_aligned(center: Vec2, extents: Vec2) -> Self {
        Self::new(center, extents, 0.0)
    }

    /// Model transform: translate * rotate * scale, mapping the unit square to the box
    pub fn model(&self) -> Affine2 {
        Affine2::from_scale_angle_translation(self.extents, self.rotation, self.center)
    }

    /// World-space corners: bottom-left, bottom-right, top-left, top-right
    /// in local space. Indices 0-1 and 2-3 share an edge along local x.
    pub fn corners(&self) -> [Vec2; 4] {
        let model = self.model();
        UNIT_CORNERS.map(|c| model.transform_point2(c))
    }

    /// Local x and y unit axes in world space
    pub fn axes(&self) -> [Vec2; 2] {
        let x = Vec2::from_angle(self.rotation);
        [x, x.perp()]
    }

    /// Interval covered by this box when projected onto `axis`
    pub fn project(&self, axis: Vec2) -> Interval {
        project_points(&self.corners(), axis)
    }

    /// SAT test over the two local axes of each box.
    ///
    /// Touching boxes count as intersecting.
    pub fn intersects(&self, other: &Obb) -> bool {
        let [x0, y0] = self.axes();
        let [x1, y1] = other.axes();
        sat_overlap(&[x0, y0, x1, y1], &self.corners(), &other.corners())
    }
}
