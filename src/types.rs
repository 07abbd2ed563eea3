//! Core geometric types for the navigation arena.
//!
//! Everything lives in the horizontal XZ plane. The vertical axis only
//! matters when positions are exported to a host (see [`Vec2::to_world`]).

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A point or vector in the XZ plane.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vec2 {
    pub x: f64,
    pub z: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, z: 0.0 };

    /// Creates a new vector.
    pub fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    /// Unit vector for a heading measured in degrees from +Z toward +X.
    pub fn from_heading_deg(degrees: f64) -> Self {
        let rad = degrees.to_radians();
        Self::new(rad.sin(), rad.cos())
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.z * self.z).sqrt()
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Vec2) -> f64 {
        (*other - *self).length()
    }

    /// Returns the unit vector in this direction, or zero below `epsilon`.
    pub fn normalized_or_zero(&self, epsilon: f64) -> Vec2 {
        let len = self.length();
        if len > epsilon {
            Vec2::new(self.x / len, self.z / len)
        } else {
            Vec2::ZERO
        }
    }

    /// Scales the vector down so its length does not exceed `max_len`.
    pub fn clamp_length(&self, max_len: f64) -> Vec2 {
        let len = self.length();
        if len > max_len && len > 0.0 {
            *self * (max_len / len)
        } else {
            *self
        }
    }

    /// Linear interpolation with `t` clamped to `[0, 1]`.
    pub fn lerp(&self, other: &Vec2, t: f64) -> Vec2 {
        let t = t.clamp(0.0, 1.0);
        Vec2::new(
            self.x + (other.x - self.x) * t,
            self.z + (other.z - self.z) * t,
        )
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.z.is_finite()
    }

    /// Lifts the point into world space `[x, y, z]` at the given height.
    pub fn to_world(&self, y: f64) -> [f64; 3] {
        [self.x, y, self.z]
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.z + rhs.z)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.z += rhs.z;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.z * rhs)
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.z)
    }
}

/// Which axes were clamped by [`Bounds::clamp`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AxisHits {
    pub x: bool,
    pub z: bool,
}

impl AxisHits {
    pub fn any(&self) -> bool {
        self.x || self.z
    }
}

/// Axis-aligned rectangle centered on the arena origin.
///
/// Built from the arena half extents minus an inset margin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    /// Rectangle `[-hx + margin, hx - margin] × [-hz + margin, hz - margin]`.
    pub fn inset(half_extent_x: f64, half_extent_z: f64, margin: f64) -> Self {
        Self {
            min: Vec2::new(-half_extent_x + margin, -half_extent_z + margin),
            max: Vec2::new(half_extent_x - margin, half_extent_z - margin),
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.z + self.max.z) * 0.5,
        )
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: &Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.z >= self.min.z && p.z <= self.max.z
    }

    /// Clamps `p` in place and reports which axes were out of range.
    pub fn clamp(&self, p: &mut Vec2) -> AxisHits {
        let hits = AxisHits {
            x: p.x < self.min.x || p.x > self.max.x,
            z: p.z < self.min.z || p.z > self.max.z,
        };
        if hits.x {
            p.x = p.x.clamp(self.min.x, self.max.x);
        }
        if hits.z {
            p.z = p.z.clamp(self.min.z, self.max.z);
        }
        hits
    }
}

/// Axis-aligned square footprint of a box obstacle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vec2,
    pub half_size: f64,
}

impl Aabb {
    pub fn new(center: Vec2, half_size: f64) -> Self {
        Self { center, half_size }
    }

    fn min(&self) -> Vec2 {
        Vec2::new(
            self.center.x - self.half_size,
            self.center.z - self.half_size,
        )
    }

    fn max(&self) -> Vec2 {
        Vec2::new(
            self.center.x + self.half_size,
            self.center.z + self.half_size,
        )
    }

    /// Distance along the ray to the first hit, within `max_distance`.
    ///
    /// `direction` must be a unit vector. A ray starting inside the box hits
    /// at distance zero.
    pub fn ray_hit(&self, origin: &Vec2, direction: &Vec2, max_distance: f64) -> Option<f64> {
        let (min, max) = (self.min(), self.max());
        let mut t_near = 0.0_f64;
        let mut t_far = max_distance;

        for (o, d, lo, hi) in [
            (origin.x, direction.x, min.x, max.x),
            (origin.z, direction.z, min.z, max.z),
        ] {
            if d.abs() < 1e-12 {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / d;
            let (mut t0, mut t1) = ((lo - o) * inv, (hi - o) * inv);
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_near = t_near.max(t0);
            t_far = t_far.min(t1);
            if t_near > t_far {
                return None;
            }
        }

        Some(t_near)
    }

    /// True if a circle overlaps this box (touching counts).
    pub fn overlaps_circle(&self, center: &Vec2, radius: f64) -> bool {
        let (min, max) = (self.min(), self.max());
        let closest = Vec2::new(center.x.clamp(min.x, max.x), center.z.clamp(min.z, max.z));
        closest.distance_to(center) <= radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(3.0, 4.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn heading_zero_points_forward() {
        let d = Vec2::from_heading_deg(0.0);
        assert!(d.x.abs() < 1e-12);
        assert!((d.z - 1.0).abs() < 1e-12);

        let right = Vec2::from_heading_deg(90.0);
        assert!((right.x - 1.0).abs() < 1e-12);
        assert!(right.z.abs() < 1e-12);
    }

    #[test]
    fn normalized_or_zero_tiny_vector() {
        assert_eq!(Vec2::new(1e-7, 0.0).normalized_or_zero(1e-5), Vec2::ZERO);
        let n = Vec2::new(0.0, 2.0).normalized_or_zero(1e-5);
        assert_eq!(n, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn clamp_length_keeps_direction() {
        let v = Vec2::new(6.0, 8.0).clamp_length(5.0);
        assert!((v.length() - 5.0).abs() < 1e-10);
        assert!((v.x - 3.0).abs() < 1e-10);
        assert_eq!(Vec2::new(1.0, 0.0).clamp_length(5.0), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn lerp_clamps_t() {
        let a = Vec2::ZERO;
        let b = Vec2::new(10.0, 0.0);
        assert_eq!(a.lerp(&b, 0.2), Vec2::new(2.0, 0.0));
        assert_eq!(a.lerp(&b, 3.0), b);
    }

    #[test]
    fn bounds_clamp_reports_axes() {
        let b = Bounds::inset(12.0, 10.0, 0.5);
        let mut p = Vec2::new(20.0, 0.0);
        let hits = b.clamp(&mut p);
        assert!(hits.x);
        assert!(!hits.z);
        assert_eq!(p.x, 11.5);

        let mut inside = Vec2::new(1.0, 1.0);
        assert!(!b.clamp(&mut inside).any());
    }

    #[test]
    fn ray_hits_box_in_front() {
        let b = Aabb::new(Vec2::new(0.0, 5.0), 1.0);
        let hit = b.ray_hit(&Vec2::ZERO, &Vec2::new(0.0, 1.0), 8.0);
        assert!((hit.unwrap() - 4.0).abs() < 1e-10);
    }

    #[test]
    fn ray_misses_box_behind_or_out_of_range() {
        let b = Aabb::new(Vec2::new(0.0, 5.0), 1.0);
        assert!(b.ray_hit(&Vec2::ZERO, &Vec2::new(0.0, -1.0), 8.0).is_none());
        assert!(b.ray_hit(&Vec2::ZERO, &Vec2::new(0.0, 1.0), 3.0).is_none());
        assert!(b.ray_hit(&Vec2::ZERO, &Vec2::new(1.0, 0.0), 8.0).is_none());
    }

    #[test]
    fn ray_from_inside_hits_at_zero() {
        let b = Aabb::new(Vec2::ZERO, 1.0);
        assert_eq!(b.ray_hit(&Vec2::ZERO, &Vec2::new(1.0, 0.0), 8.0), Some(0.0));
    }

    #[test]
    fn circle_overlap() {
        let b = Aabb::new(Vec2::ZERO, 1.0);
        assert!(b.overlaps_circle(&Vec2::new(1.4, 0.0), 0.5));
        assert!(!b.overlaps_circle(&Vec2::new(1.6, 0.0), 0.5));
        // corner: distance from (1,1) to (1.3,1.3) is ~0.424
        assert!(b.overlaps_circle(&Vec2::new(1.3, 1.3), 0.5));
        assert!(!b.overlaps_circle(&Vec2::new(1.4, 1.4), 0.5));
    }
}
