use common::shapes::{Aabb3, Point3};

/// Octant code: bit `i` set means the upper half along axis `i`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Octant(u8);

impl Octant {
    pub const ALL: [Octant; 8] = [
        Octant(0),
        Octant(1),
        Octant(2),
        Octant(3),
        Octant(4),
        Octant(5),
        Octant(6),
        Octant(7),
    ];

    pub fn new(code: u8) -> Option<Self> {
        if code < 8 {
            Some(Octant(code))
        } else {
            None
        }
    }

    #[inline(always)]
    pub fn code(self) -> u8 {
        self.0
    }

    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline(always)]
    pub fn is_upper(self, axis: usize) -> bool {
        self.0 & (1 << axis) != 0
    }
}

/// Ties go to the upper half.
#[inline(always)]
pub fn classify_point(mid: &Point3, point: &Point3) -> Octant {
    let mut code = 0u8;
    for i in 0..3 {
        if point[i] >= mid[i] {
            code |= 1 << i;
        }
    }
    Octant(code)
}

/// `None` when the box straddles `mid` on at least one axis.
#[inline(always)]
pub fn classify_aabb(mid: &Point3, aabb: &Aabb3) -> Option<Octant> {
    let lo = classify_point(mid, &aabb.min);
    let hi = classify_point(mid, &aabb.max);
    if lo == hi {
        Some(lo)
    } else {
        None
    }
}

pub fn child_bounds(bounds: &Aabb3, mid: &Point3, octant: Octant) -> Aabb3 {
    let mut child = *bounds;
    for i in 0..3 {
        if octant.is_upper(i) {
            child.min[i] = mid[i];
        } else {
            child.max[i] = mid[i];
        }
    }
    child
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_on_mid_goes_upper() {
        let mid = [4.0, 4.0, 4.0];
        assert_eq!(classify_point(&mid, &[4.0, 4.0, 4.0]).code(), 7);
        assert_eq!(classify_point(&mid, &[4.0, 1.0, 1.0]).code(), 1);
        assert_eq!(classify_point(&mid, &[1.0, 4.0, 1.0]).code(), 2);
        assert_eq!(classify_point(&mid, &[1.0, 1.0, 4.0]).code(), 4);
        assert_eq!(classify_point(&mid, &[3.999, 3.999, 3.999]).code(), 0);
    }

    #[test]
    fn straddling_box_has_no_octant() {
        let mid = [4.0, 4.0, 4.0];
        assert_eq!(classify_aabb(&mid, &Aabb3::new([3.0; 3], [5.0; 3])), None);
        assert_eq!(
            classify_aabb(&mid, &Aabb3::new([1.0, 1.0, 3.0], [2.0, 2.0, 5.0])),
            None
        );
        assert_eq!(
            classify_aabb(&mid, &Aabb3::new([5.0, 1.0, 5.0], [6.0, 2.0, 6.0])),
            Octant::new(5)
        );
    }

    #[test]
    fn box_touching_mid_from_above_stays_in_octant() {
        let mid = [4.0, 4.0, 4.0];
        let aabb = Aabb3::new([4.0, 4.0, 4.0], [8.0, 8.0, 8.0]);
        assert_eq!(classify_aabb(&mid, &aabb), Octant::new(7));
        // Touching from below crosses into the upper half.
        let aabb = Aabb3::new([0.0; 3], [4.0; 3]);
        assert_eq!(classify_aabb(&mid, &aabb), None);
    }

    #[test]
    fn children_partition_parent() {
        let bounds = Aabb3::new([-2.0, 0.0, 10.0], [2.0, 8.0, 14.0]);
        let mid = bounds.mid();
        for octant in Octant::ALL {
            let child = child_bounds(&bounds, &mid, octant);
            for i in 0..3 {
                if octant.is_upper(i) {
                    assert_eq!(child.min[i], mid[i]);
                    assert_eq!(child.max[i], bounds.max[i]);
                } else {
                    assert_eq!(child.min[i], bounds.min[i]);
                    assert_eq!(child.max[i], mid[i]);
                }
            }
            assert_eq!(classify_aabb(&mid, &Aabb3::point(child.mid())), Some(octant));
        }
    }

    #[test]
    fn octant_codes_out_of_range_are_rejected() {
        assert!(Octant::new(8).is_none());
        assert_eq!(Octant::new(3).map(Octant::index), Some(3));
    }
}
