//! Drawing-space geometry for rendered trees.
//!
//! Layout works on a grid of columns and levels; the SVG renderer turns a
//! grid cell into a [`Point`], sizes each token box with a [`Size`] and
//! tracks the drawn area with [`Bounds`]. The y axis grows downwards, as
//! in SVG.

/// A position in drawing space.
///
/// # Examples
///
/// ```
/// # use coptree_core::geometry::Point;
/// let head = Point::new(10.0, 20.0);
/// let dependent = Point::new(5.0, 5.0);
///
/// let label_anchor = head.midpoint(dependent);
/// assert_eq!(label_anchor.x(), 7.5);
/// assert_eq!(label_anchor.y(), 12.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn x(self) -> f32 {
        self.x
    }

    pub fn y(self) -> f32 {
        self.y
    }

    /// Halfway between two points; arc labels sit here.
    pub fn midpoint(self, other: Point) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// The box of `size` centred on this point.
    pub fn to_bounds(self, size: Size) -> Bounds {
        let half_width = size.width / 2.0;
        let half_height = size.height / 2.0;
        Bounds {
            min_x: self.x - half_width,
            min_y: self.y - half_height,
            max_x: self.x + half_width,
            max_y: self.y + half_height,
        }
    }
}

/// Width and height of a drawn element.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn width(self) -> f32 {
        self.width
    }

    pub fn height(self) -> f32 {
        self.height
    }
}

/// Axis-aligned box, built with [`Point::to_bounds`] and grown with
/// [`Bounds::merge`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    pub fn min_y(self) -> f32 {
        self.min_y
    }

    pub fn max_x(self) -> f32 {
        self.max_x
    }

    pub fn max_y(self) -> f32 {
        self.max_y
    }

    pub fn center_x(self) -> f32 {
        (self.min_x + self.max_x) / 2.0
    }

    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn to_size(self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Smallest box holding both.
    ///
    /// # Examples
    ///
    /// ```
    /// # use coptree_core::geometry::{Point, Size};
    /// let first = Point::new(0.0, 0.0).to_bounds(Size::new(10.0, 10.0));
    /// let second = Point::new(20.0, 0.0).to_bounds(Size::new(10.0, 10.0));
    ///
    /// let row = first.merge(&second);
    /// assert_eq!(row.min_x(), -5.0);
    /// assert_eq!(row.max_x(), 25.0);
    /// ```
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_midpoint() {
        let mid = Point::new(0.0, 0.0).midpoint(Point::new(10.0, 20.0));
        assert_eq!(mid, Point::new(5.0, 10.0));
    }

    #[test]
    fn test_token_box_around_grid_point() {
        let bounds = Point::new(50.0, 20.0).to_bounds(Size::new(40.0, 10.0));
        assert_eq!(bounds.min_x(), 30.0);
        assert_eq!(bounds.max_x(), 70.0);
        assert_eq!(bounds.min_y(), 15.0);
        assert_eq!(bounds.max_y(), 25.0);
        assert_eq!(bounds.center_x(), 50.0);
        assert_eq!(bounds.to_size(), Size::new(40.0, 10.0));
    }
}

#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn token_box() -> impl Strategy<Value = Bounds> {
        (
            -1000.0f32..1000.0,
            -1000.0f32..1000.0,
            1.0f32..500.0,
            1.0f32..500.0,
        )
            .prop_map(|(x, y, w, h)| Point::new(x, y).to_bounds(Size::new(w, h)))
    }

    fn check_merge_is_commutative(a: Bounds, b: Bounds) -> Result<(), TestCaseError> {
        let ab = a.merge(&b);
        let ba = b.merge(&a);

        prop_assert!(approx_eq!(f32, ab.min_x(), ba.min_x()));
        prop_assert!(approx_eq!(f32, ab.min_y(), ba.min_y()));
        prop_assert!(approx_eq!(f32, ab.max_x(), ba.max_x()));
        prop_assert!(approx_eq!(f32, ab.max_y(), ba.max_y()));
        Ok(())
    }

    fn check_merge_contains_both(a: Bounds, b: Bounds) -> Result<(), TestCaseError> {
        let merged = a.merge(&b);

        for part in [a, b] {
            prop_assert!(merged.min_x() <= part.min_x());
            prop_assert!(merged.min_y() <= part.min_y());
            prop_assert!(merged.max_x() >= part.max_x());
            prop_assert!(merged.max_y() >= part.max_y());
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn merge_is_commutative(a in token_box(), b in token_box()) {
            check_merge_is_commutative(a, b)?;
        }

        #[test]
        fn merge_contains_both(a in token_box(), b in token_box()) {
            check_merge_contains_both(a, b)?;
        }
    }
}
