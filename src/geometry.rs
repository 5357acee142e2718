//! Geometric primitives: currently only the axis-aligned bounding box used by the bbox pre-pass
//! backend. Shaped after a generic `BBox<U>`, dropping the unit type parameter since this crate
//! has a single concrete [`Unit`].

use crate::dimensions::Unit;

/// An axis-aligned bounding box. The origin is the baseline (`y = 0`); points above the baseline
/// have positive `y`, matching [`crate::node`]'s height/depth convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    pub x_min: Unit,
    pub x_max: Unit,
    pub y_min: Unit,
    pub y_max: Unit,
}

impl BBox {
    /// Does not check `x_min <= x_max`/`y_min <= y_max`.
    pub fn new(x_min: Unit, y_min: Unit, x_max: Unit, y_max: Unit) -> Self {
        BBox { x_min, x_max, y_min, y_max }
    }

    pub fn from_typo(x: Unit, width: Unit, height: Unit, depth: Unit) -> Self {
        BBox { x_min: x, x_max: x + width, y_min: -depth, y_max: height }
    }

    pub fn from_dims(x: Unit, y: Unit, width: Unit, height: Unit) -> Self {
        BBox { x_min: x, x_max: x + width, y_min: y, y_max: y + height }
    }

    pub fn single_point(x: Unit, y: Unit) -> Self {
        BBox { x_min: x, x_max: x, y_min: y, y_max: y }
    }

    pub fn translate(&self, t_x: Unit, t_y: Unit) -> Self {
        BBox {
            x_min: self.x_min + t_x,
            x_max: self.x_max + t_x,
            y_min: self.y_min + t_y,
            y_max: self.y_max + t_y,
        }
    }

    pub fn enclose(&self, x: Unit, y: Unit) -> Self {
        self.union(BBox::single_point(x, y))
    }

    pub fn union(&self, other: Self) -> Self {
        BBox {
            x_min: Unit::min(self.x_min, other.x_min),
            x_max: Unit::max(self.x_max, other.x_max),
            y_min: Unit::min(self.y_min, other.y_min),
            y_max: Unit::max(self.y_max, other.y_max),
        }
    }

    pub fn width(&self) -> Unit {
        self.x_max - self.x_min
    }

    pub fn total_height(&self) -> Unit {
        self.y_max - self.y_min
    }

    /// Approximate equality, relative to the magnitude of each coordinate pair.
    pub fn close_to(&self, other: &Self, epsilon: f64) -> bool {
        let close = |a: Unit, b: Unit| (a - b).value().abs() * 2.0 <= epsilon * (a.value().abs() + b.value().abs()).max(epsilon);
        close(self.x_min, other.x_min)
            && close(self.x_max, other.x_max)
            && close(self.y_min, other.y_min)
            && close(self.y_max, other.y_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_grows_to_enclose_both() {
        let a = BBox::from_dims(Unit::ZERO, Unit::ZERO, Unit::new(5.0), Unit::new(5.0));
        let b = BBox::from_dims(Unit::new(10.0), Unit::new(-2.0), Unit::new(1.0), Unit::new(1.0));
        let u = a.union(b);
        assert_eq!(u.x_min, Unit::ZERO);
        assert_eq!(u.x_max, Unit::new(11.0));
        assert_eq!(u.y_min, Unit::new(-2.0));
        assert_eq!(u.y_max, Unit::new(5.0));
    }

    #[test]
    fn translate_shifts_all_corners() {
        let b = BBox::from_dims(Unit::ZERO, Unit::ZERO, Unit::new(2.0), Unit::new(3.0));
        let t = b.translate(Unit::new(1.0), Unit::new(1.0));
        assert_eq!(t.x_min, Unit::new(1.0));
        assert_eq!(t.y_max, Unit::new(4.0));
    }
}
