//! Square regions used to subdivide space.
//!
//! Sub-quadrant indices follow compass order:
//!
//! ```text
//! +----+----+
//! | NW | NE |   0 | 1
//! +----+----+
//! | SW | SE |   2 | 3
//! +----+----+
//! ```

use super::states::NVec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubQuad {
    NW = 0,
    NE = 1,
    SW = 2,
    SE = 3,
}

impl SubQuad {
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Axis-aligned square with `origin` at its lower-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quadrant {
    pub origin: NVec2,
    pub width: f64,
}

impl Quadrant {
    pub fn new(origin: NVec2, width: f64) -> Self {
        Self { origin, width }
    }

    pub fn center(&self) -> NVec2 {
        let half = 0.5 * self.width;
        NVec2::new(self.origin.x + half, self.origin.y + half)
    }

    /// True if `p` lies in the square, edges included
    pub fn contains(&self, p: &NVec2) -> bool {
        let (x0, y0) = (self.origin.x, self.origin.y);
        p.x >= x0 && p.x <= x0 + self.width && p.y >= y0 && p.y <= y0 + self.width
    }

    /// Which sub-quadrant `p` falls into.
    ///
    /// North needs `y > center.y` and west needs `x < center.x`, so points on
    /// a dividing line go south/east.
    pub fn which_sub_quad(&self, p: &NVec2) -> SubQuad {
        let c = self.center();
        match (p.y > c.y, p.x < c.x) {
            (true, true) => SubQuad::NW,
            (true, false) => SubQuad::NE,
            (false, true) => SubQuad::SW,
            (false, false) => SubQuad::SE,
        }
    }

    /// The half-width square for `q`
    pub fn sub_quadrant(&self, q: SubQuad) -> Quadrant {
        let half = 0.5 * self.width;
        let offset = match q {
            SubQuad::NW => NVec2::new(0.0, half),
            SubQuad::NE => NVec2::new(half, half),
            SubQuad::SW => NVec2::new(0.0, 0.0),
            SubQuad::SE => NVec2::new(half, 0.0),
        };
        Quadrant::new(self.origin + offset, half)
    }
}
