//! Geometric primitives used by the sampling and integration pipeline.
//!
//! All types in this module live in the mesh's planar coordinate system.
//! Vertical structure enters the computation only through the scalar depth
//! dataset, never through the geometry.

/// A point in mesh coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// X value in mesh coordinates.
    pub x: f64,
    /// Y value in mesh coordinates.
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A displacement in mesh coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
}

impl Vector {
    /// Create a new vector.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Displacement from `from` to `to`.
    pub fn between(from: Point, to: Point) -> Self {
        Self::new(to.x - from.x, to.y - from.y)
    }

    /// Dot product with another vector.
    pub fn dot(&self, other: Vector) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Euclidean length.
    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Rotate 90 degrees counter-clockwise.
    pub fn perpendicular(&self) -> Self {
        Self::new(-self.y, self.x)
    }

    /// Scale to unit length.
    ///
    /// Returns `None` for a zero-length or non-finite vector, where the
    /// direction is undefined.
    pub fn normalized(&self) -> Option<Self> {
        let length = self.length();
        if length > 0.0 && length.is_finite() {
            Some(Self::new(self.x / length, self.y / length))
        } else {
            None
        }
    }
}

/// A polyline in mesh coordinates.
///
/// The profile line drawn by the user arrives here as an immutable vertex
/// snapshot. Coincident consecutive vertices are allowed; they contribute no
/// arc length and are skipped during sampling.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    vertices: Vec<Point>,
}

/// A position on a polyline resolved from an arc-length offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    /// The interpolated point at the offset.
    pub point: Point,
    /// Index of the segment's start vertex.
    pub segment: usize,
}

impl Polyline {
    /// Create a polyline from vertices.
    pub fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    /// Access the vertices.
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Number of line segments.
    pub fn segment_count(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }

    /// Direction of the segment starting at vertex `index`.
    pub fn segment_direction(&self, index: usize) -> Option<Vector> {
        let start = self.vertices.get(index)?;
        let end = self.vertices.get(index + 1)?;
        Some(Vector::between(*start, *end))
    }

    /// Total arc length.
    pub fn length(&self) -> f64 {
        self.vertices
            .windows(2)
            .map(|pair| Vector::between(pair[0], pair[1]).length())
            .sum()
    }

    /// Resolve the point at an arc-length offset from the start.
    ///
    /// Returns `None` when the offset falls outside `[0, length)` or the
    /// polyline has no segments.
    pub fn locate(&self, offset: f64) -> Option<Location> {
        if offset < 0.0 || !offset.is_finite() {
            return None;
        }
        let mut walked = 0.0;
        for (segment, pair) in self.vertices.windows(2).enumerate() {
            let direction = Vector::between(pair[0], pair[1]);
            let segment_length = direction.length();
            if offset < walked + segment_length {
                let t = (offset - walked) / segment_length;
                let point = Point::new(pair[0].x + direction.x * t, pair[0].y + direction.y * t);
                return Some(Location { point, segment });
            }
            walked += segment_length;
        }
        None
    }
}
