//! Chain segments
//!
//! Each segment is a rigid link hanging off an anchor point. Every tick it is
//! pulled toward a target (the head's steering point, or the parent's anchor)
//! and slides along the pull direction so the target stays exactly `length`
//! away. Chaining these updates head-to-tail gives the IK-style follow motion.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::obb::Obb;
use crate::consts::{DEGENERATE_EPSILON, MAX_WIDTH, MIN_WIDTH, TAPER_EXPONENT};
use crate::heading;

/// One rigid link of the snake
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Rear end of the link; the link extends `length` along `orientation` from here
    pub anchor: Vec2,
    /// Facing (radians)
    pub orientation: f32,
    pub length: f32,
    pub width: f32,
    /// Index of the preceding segment in the chain (`None` for the head)
    pub parent: Option<usize>,
    /// Distance from the head in links
    pub depth: u32,
    /// Collision box, recomputed after every move
    bounds: Obb,
}

impl Segment {
    /// Create the head segment
    pub fn root(anchor: Vec2, orientation: f32, length: f32, width: f32) -> Self {
        Self::new(anchor, orientation, length, width, None)
    }

    /// Create a segment. `parent` is the parent's chain index and depth.
    pub fn new(
        anchor: Vec2,
        orientation: f32,
        length: f32,
        width: f32,
        parent: Option<(usize, u32)>,
    ) -> Self {
        let mut segment = Self {
            anchor,
            orientation,
            length,
            width,
            parent: parent.map(|(index, _)| index),
            depth: parent.map_or(0, |(_, depth)| depth + 1),
            bounds: Obb::axis_aligned(anchor, Vec2::ZERO),
        };
        segment.bounds = segment.compute_bounds();
        segment
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Cached collision box
    #[inline]
    pub fn bounds(&self) -> &Obb {
        &self.bounds
    }

    /// Box laid along the segment, starting at the anchor.
    ///
    /// The head's box is shortened to `length/2 + width` and pushed forward by
    /// `width/4` so the rounded snout lines up with the body. Non-root boxes are
    /// `length` long, centered half a length ahead of the anchor.
    pub fn compute_bounds(&self) -> Obb {
        let dir = heading(self.orientation);
        if self.is_root() {
            Obb::new(
                self.anchor + dir * (self.length / 2.0 + self.width / 4.0),
                Vec2::new(self.length / 2.0 + self.width, self.width),
                self.orientation,
            )
        } else {
            Obb::new(
                self.anchor + dir * (self.length / 2.0),
                Vec2::new(self.length, self.width),
                self.orientation,
            )
        }
    }

    /// Extent of the collision box along the segment
    #[inline]
    pub fn span(&self) -> f32 {
        self.bounds.extents.x
    }

    /// Front end of the link
    #[inline]
    pub fn tip(&self) -> Vec2 {
        self.anchor + heading(self.orientation) * self.length
    }

    /// Turn to face `target` and slide so the target sits exactly `length` ahead.
    ///
    /// If the target coincides with the anchor the facing is kept and the
    /// anchor is placed `length` behind the target along it.
    pub fn track_target(&mut self, target: Vec2) {
        let v = target - self.anchor;
        let distance = v.length();

        if distance > DEGENERATE_EPSILON {
            self.orientation = v.y.atan2(v.x);
            let dir = v / distance;
            self.anchor += dir * (distance - self.length);
        } else {
            self.anchor = target - heading(self.orientation) * self.length;
        }

        self.bounds = self.compute_bounds();
    }

    /// Width of a segment at `depth`: power-law taper with a floor
    pub fn tapered_width(depth: u32) -> f32 {
        (MAX_WIDTH / ((depth + 1) as f32).powf(TAPER_EXPONENT)).max(MIN_WIDTH)
    }

    /// Spawn a new tail link behind this one.
    ///
    /// `self_index` is this segment's position in the chain; the new segment
    /// records it as its parent.
    pub fn grow(&self, self_index: usize) -> Segment {
        let offset = -heading(self.orientation) * (self.length * 2.0);
        Segment::new(
            self.anchor + offset,
            0.0,
            MAX_WIDTH,
            Self::tapered_width(self.depth + 1),
            Some((self_index, self.depth)),
        )
    }

    /// Suggested overlay intensity for debug drawing, fading with depth
    pub fn debug_alpha(&self) -> f32 {
        1.0 / (0.25 * (self.depth + 1) as f32)
    }
}
