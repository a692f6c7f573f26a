use rand::Rng;
use std::fmt::Debug;

pub type Point3 = [f32; 3];

pub trait Shape: Debug {
    fn bounding_box(&self) -> Aabb3;
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Sphere {
    pub center: Point3,
    pub radius: f32,
    pub bounding_box: Aabb3,
}

impl Sphere {
    pub fn new(center: Point3, radius: f32) -> Self {
        Self {
            center,
            radius,
            bounding_box: Aabb3::from_center(center, [radius; 3]),
        }
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl Default for Sphere {
    fn default() -> Self {
        Self::new([0.0; 3], 0.0)
    }
}

impl Shape for Sphere {
    fn bounding_box(&self) -> Aabb3 {
        self.bounding_box
    }
}

/// Axis-aligned box stored as its two corners.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb3 {
    pub min: Point3,
    pub max: Point3,
}

impl Aabb3 {
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    pub fn from_center(center: Point3, half_extents: Point3) -> Self {
        let mut min = center;
        let mut max = center;
        for i in 0..3 {
            min[i] -= half_extents[i];
            max[i] += half_extents[i];
        }
        Self { min, max }
    }

    /// Degenerate box covering a single point.
    pub fn point(point: Point3) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    #[inline(always)]
    pub fn mid(&self) -> Point3 {
        [
            (self.min[0] + self.max[0]) / 2.0,
            (self.min[1] + self.max[1]) / 2.0,
            (self.min[2] + self.max[2]) / 2.0,
        ]
    }

    pub fn size(&self) -> Point3 {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }

    /// Finite corners with `min <= max` on every axis.
    pub fn is_valid(&self) -> bool {
        (0..3).all(|i| {
            self.min[i].is_finite() && self.max[i].is_finite() && self.min[i] <= self.max[i]
        })
    }

    pub fn get_random_sphere_inside<R: Rng>(&self, max_radius: f32, rng: &mut R) -> Sphere {
        let radius = self._safe_randf32(rng, 0.0, max_radius);
        let center = [
            self._safe_randf32(rng, self.min[0] + radius, self.max[0] - radius),
            self._safe_randf32(rng, self.min[1] + radius, self.max[1] - radius),
            self._safe_randf32(rng, self.min[2] + radius, self.max[2] - radius),
        ];
        Sphere::new(center, radius)
    }

    fn _safe_randf32<R: Rng>(&self, rng: &mut R, min: f32, max: f32) -> f32 {
        if min >= max {
            return min;
        }
        rng.gen_range(min..=max)
    }
}

impl Default for Aabb3 {
    fn default() -> Self {
        Self {
            min: [0.0; 3],
            max: [0.0; 3],
        }
    }
}

impl Shape for Aabb3 {
    fn bounding_box(&self) -> Aabb3 {
        *self
    }
}
