//! Planar points and stylus tilt vectors

use std::ops::{Add, AddAssign, Mul, Sub};

/// Position on the canvas in pixel units
///
/// Also used for displacement vectors between two positions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    /// Horizontal coordinate, growing to the right
    pub x: f64,
    /// Vertical coordinate, growing downwards
    pub y: f64,
}

impl Point {
    /// Create a point from its coordinates
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length when the point is read as a vector
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Whether both components are exactly zero
    pub const fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Rotate around the origin by `radians`
    pub fn rotated(self, radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self {
            x: self.x.mul_add(cos, -self.y * sin),
            y: self.x.mul_add(sin, self.y * cos),
        }
    }

    /// Integer cell containing this point, truncating toward zero
    pub fn cell(self) -> [i64; 2] {
        [self.x as i64, self.y as i64]
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

/// Stylus tilt as reported by the tablet, each axis in [-1, 1]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Tilt {
    /// Tilt along the horizontal axis
    pub x: f64,
    /// Tilt along the vertical axis
    pub y: f64,
}

impl Tilt {
    /// Create a tilt reading
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}
