//! Debug overlay support
//!
//! Anything with a collision box can be drawn as an overlay. Purely
//! informational; nothing here feeds back into the simulation.

use glam::Vec2;
use serde::Serialize;

use super::obb::Obb;
use super::segment::Segment;
use super::state::Food;

/// An entity that exposes an OBB for collision queries and debug drawing
pub trait Bounded {
    fn bounds(&self) -> &Obb;

    /// Overlay intensity
    fn debug_alpha(&self) -> f32 {
        1.0
    }

    fn debug_box(&self) -> DebugBox {
        DebugBox::new(self.bounds(), self.debug_alpha())
    }

    /// Collision query against another bounded entity
    fn overlaps<B: Bounded + ?Sized>(&self, other: &B) -> bool {
        self.bounds().intersects(other.bounds())
    }
}

impl Bounded for Segment {
    fn bounds(&self) -> &Obb {
        Segment::bounds(self)
    }

    fn debug_alpha(&self) -> f32 {
        Segment::debug_alpha(self)
    }
}

impl Bounded for Food {
    fn bounds(&self) -> &Obb {
        &self.bounds
    }
}

/// One box of the debug overlay
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebugBox {
    pub center: Vec2,
    pub corners: [Vec2; 4],
    /// Local x/y axes scaled to the box's full extents (red/green guide lines)
    pub axes: [Vec2; 2],
    pub alpha: f32,
}

impl DebugBox {
    pub fn new(obb: &Obb, alpha: f32) -> Self {
        let [x, y] = obb.axes();
        Self {
            center: obb.center,
            corners: obb.corners(),
            axes: [x * obb.extents.x, y * obb.extents.y],
            alpha,
        }
    }
}
