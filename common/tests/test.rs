use common::shapes::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_new_and_getters() {
    let aabb = Aabb3::new([0.0, 2.0, 4.0], [4.0, 6.0, 12.0]);
    assert_eq!(aabb.mid(), [2.0, 4.0, 8.0]);
    assert_eq!(aabb.size(), [4.0, 4.0, 8.0]);
    assert!(aabb.is_valid());
}

#[test]
fn test_from_center() {
    let aabb = Aabb3::from_center([1.0, 2.0, 3.0], [1.0, 0.5, 0.0]);
    assert_eq!(aabb.min, [0.0, 1.5, 3.0]);
    assert_eq!(aabb.max, [2.0, 2.5, 3.0]);
}

#[test]
fn test_point_is_degenerate() {
    let aabb = Aabb3::point([1.0, 1.0, 1.0]);
    assert_eq!(aabb.min, aabb.max);
    assert_eq!(aabb.size(), [0.0; 3]);
    assert!(aabb.is_valid());
}

#[test]
fn test_is_valid_rejects_inverted_and_non_finite() {
    assert!(!Aabb3::new([1.0, 0.0, 0.0], [0.0, 1.0, 1.0]).is_valid());
    assert!(!Aabb3::new([f32::NAN, 0.0, 0.0], [1.0, 1.0, 1.0]).is_valid());
    assert!(!Aabb3::new([0.0, 0.0, 0.0], [1.0, f32::INFINITY, 1.0]).is_valid());
}

#[test]
fn test_sphere_bounding_box() {
    let sphere = Sphere::new([1.0, 2.0, 3.0], 0.5);
    assert_eq!(sphere.bounding_box().min, [0.5, 1.5, 2.5]);
    assert_eq!(sphere.bounding_box().max, [1.5, 2.5, 3.5]);
    assert_eq!(sphere.bounding_box().mid(), sphere.center());
}

#[test]
fn test_box_is_its_own_bounding_box() {
    let aabb = Aabb3::new([0.0, 1.0, 2.0], [3.0, 4.0, 5.0]);
    assert_eq!(aabb.bounding_box(), aabb);
}

#[test]
fn test_get_random_sphere_inside() {
    let aabb = Aabb3::new([0.0; 3], [10.0; 3]);

    // Use a fixed seed for reproducibility.
    let mut rng: StdRng = SeedableRng::seed_from_u64(123);

    for _ in 0..32 {
        let sphere = aabb.get_random_sphere_inside(2.0, &mut rng);
        let radius = sphere.radius();
        assert!(radius <= 2.0);
        for i in 0..3 {
            assert!(sphere.center()[i] >= radius);
            assert!(sphere.center()[i] <= 10.0 - radius);
        }
        assert!(sphere.bounding_box().is_valid());
    }
}

#[test]
fn test_get_random_sphere_inside_small_box() {
    let aabb = Aabb3::new([0.0; 3], [0.0; 3]);
    let mut rng: StdRng = SeedableRng::seed_from_u64(123);
    let sphere = aabb.get_random_sphere_inside(0.0, &mut rng);
    assert_eq!(sphere.center(), [0.0; 3]);
}
