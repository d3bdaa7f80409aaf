//! # Geometry
//!
//! Integer vectors and bounding boxes used for positions, movement deltas,
//! camera views and map bounds.

use crate::{BurrowError, BurrowResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

/// An integer 2D vector.
///
/// Vectors combine component-wise with another vector, a `(x, y)` tuple or a
/// scalar (a scalar `s` acts as `(s, s)`).
///
/// # Examples
///
/// ```
/// use burrow::Vector;
///
/// let v = Vector::new(3, 4);
/// assert_eq!(v + (1, 1), Vector::new(4, 5));
/// assert_eq!(v * 2, Vector::new(6, 8));
/// assert_eq!(Vector::new(-3, 3) / 2, Vector::new(-2, 1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Vector {
    pub x: i32,
    pub y: i32,
}

impl Vector {
    /// Creates a new vector.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The zero vector.
    pub const fn zero() -> Self {
        Self::new(0, 0)
    }

    /// Returns true for the zero vector (a "wait" when used as a direction).
    pub fn is_zero(self) -> bool {
        self.x == 0 && self.y == 0
    }

    /// Manhattan length of the vector.
    pub fn manhattan(self) -> i32 {
        self.x.abs() + self.y.abs()
    }

    /// Restricts both components into `[min, max)`.
    ///
    /// Requires `min.x < max.x` and `min.y < max.y`.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::Vector;
    ///
    /// let clamped = Vector::new(12, -4).clamp(Vector::new(0, 0), Vector::new(10, 10));
    /// assert_eq!(clamped, Vector::new(9, 0));
    /// ```
    pub fn clamp(self, min: Vector, max: Vector) -> Vector {
        Vector::new(
            self.x.max(min.x).min(max.x - 1),
            self.y.max(min.y).min(max.y - 1),
        )
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Vector {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl From<i32> for Vector {
    fn from(s: i32) -> Self {
        Self::new(s, s)
    }
}

impl<T: Into<Vector>> Add<T> for Vector {
    type Output = Vector;

    fn add(self, other: T) -> Vector {
        let other = other.into();
        Vector::new(self.x + other.x, self.y + other.y)
    }
}

impl<T: Into<Vector>> Sub<T> for Vector {
    type Output = Vector;

    fn sub(self, other: T) -> Vector {
        let other = other.into();
        Vector::new(self.x - other.x, self.y - other.y)
    }
}

impl<T: Into<Vector>> Mul<T> for Vector {
    type Output = Vector;

    fn mul(self, other: T) -> Vector {
        let other = other.into();
        Vector::new(self.x * other.x, self.y * other.y)
    }
}

/// Floor division, rounding towards negative infinity.
impl<T: Into<Vector>> Div<T> for Vector {
    type Output = Vector;

    fn div(self, other: T) -> Vector {
        let other = other.into();
        Vector::new(floor_div(self.x, other.x), floor_div(self.y, other.y))
    }
}

fn floor_div(a: i32, b: i32) -> i32 {
    let q = a / b;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        q - 1
    } else {
        q
    }
}

/// A rectangle spanning `[top_left, bottom_right)`.
///
/// Note that [`BoundingBox::contains`] is inclusive on all four edges, so a
/// point on the bottom or right edge counts as inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    pub top_left: Vector,
    pub bottom_right: Vector,
}

impl BoundingBox {
    /// Creates a box from its two corners.
    pub fn new(top_left: Vector, bottom_right: Vector) -> Self {
        Self {
            top_left,
            bottom_right,
        }
    }

    /// Creates a box whose top left corner is `point`, `height` tall and
    /// `width` wide.
    pub fn from_top_left(point: Vector, height: i32, width: i32) -> Self {
        Self::new(point, point + (width, height))
    }

    /// Creates a box centered on `point`, `height` tall and `width` wide.
    ///
    /// Odd sizes put the extra cell on the bottom/right side.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::{BoundingBox, Vector};
    ///
    /// let b = BoundingBox::centered(Vector::new(5, 5), 3, 4);
    /// assert_eq!(b.top_left, Vector::new(3, 4));
    /// assert_eq!(b.bottom_right, Vector::new(7, 7));
    /// assert_eq!(b.center(), Vector::new(5, 5));
    /// ```
    pub fn centered(point: Vector, height: i32, width: i32) -> Self {
        let top_left = point - (width / 2, height / 2);
        let bottom_right = point + (width / 2 + width % 2, height / 2 + height % 2);
        Self::new(top_left, bottom_right)
    }

    pub fn top(&self) -> i32 {
        self.top_left.y
    }

    pub fn left(&self) -> i32 {
        self.top_left.x
    }

    pub fn right(&self) -> i32 {
        self.bottom_right.x
    }

    pub fn bottom(&self) -> i32 {
        self.bottom_right.y
    }

    pub fn height(&self) -> i32 {
        self.bottom() - self.top()
    }

    pub fn width(&self) -> i32 {
        self.right() - self.left()
    }

    pub fn center(&self) -> Vector {
        (self.top_left + self.bottom_right) / 2
    }

    /// Inclusive containment test: `top <= y <= bottom` and `left <= x <= right`.
    pub fn contains(&self, point: Vector) -> bool {
        self.top() <= point.y
            && point.y <= self.bottom()
            && self.left() <= point.x
            && point.x <= self.right()
    }

    /// Returns this box shifted by `delta`.
    pub fn translate(&self, delta: Vector) -> Self {
        Self::new(self.top_left + delta, self.bottom_right + delta)
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.top_left, self.bottom_right)
    }
}

/// Repositions `inner` so that it lies within `outer`.
///
/// The result has the same size as `inner` and sits flush against `outer` on
/// every side where `inner` stuck out. Fails if `inner` is larger than
/// `outer` in either dimension.
///
/// # Examples
///
/// ```
/// use burrow::{move_inside, BoundingBox, Vector};
///
/// let inner = BoundingBox::new(Vector::new(3, 3), Vector::new(6, 6));
/// let outer = BoundingBox::new(Vector::new(1, 1), Vector::new(5, 5));
/// let moved = move_inside(inner, outer).unwrap();
/// assert_eq!(moved, BoundingBox::new(Vector::new(2, 2), Vector::new(5, 5)));
/// ```
pub fn move_inside(inner: BoundingBox, outer: BoundingBox) -> BurrowResult<BoundingBox> {
    if inner.width() > outer.width() || inner.height() > outer.height() {
        return Err(BurrowError::Geometry(format!(
            "box {} does not fit inside {}",
            inner, outer
        )));
    }

    let d_top = inner.top_left - outer.top_left;
    let d_bottom = inner.bottom_right - outer.bottom_right;

    let dx = if d_top.x < 0 {
        -d_top.x
    } else if d_bottom.x > 0 {
        -d_bottom.x
    } else {
        0
    };
    let dy = if d_top.y < 0 {
        -d_top.y
    } else if d_bottom.y > 0 {
        -d_bottom.y
    } else {
        0
    };

    Ok(inner.translate(Vector::new(dx, dy)))
}
