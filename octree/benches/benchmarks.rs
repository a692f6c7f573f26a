use criterion::{black_box, criterion_group, criterion_main, Criterion};
use octree::shapes::Aabb3;
use octree::{Config, ObjectId, Octree, Scene};
use rand::prelude::*;

const WORLD: f32 = 100.0;

fn random_box<R: Rng>(rng: &mut R) -> Aabb3 {
    let center = [
        rng.gen_range(0.0..WORLD),
        rng.gen_range(0.0..WORLD),
        rng.gen_range(0.0..WORLD),
    ];
    Aabb3::from_center(center, [1.0; 3])
}

fn populated(count: usize, rng: &mut StdRng) -> (Octree, Scene, Vec<ObjectId>) {
    let config = Config {
        pool_size: 50_000,
        ..Config::default()
    };
    let mut tree = Octree::new_with_config(Aabb3::new([0.0; 3], [WORLD; 3]), config).unwrap();
    let mut scene = Scene::with_capacity(count + 1);
    let mut ids = Vec::with_capacity(count);
    for _ in 0..count {
        let id = scene.spawn(random_box(rng));
        tree.add(&mut scene, id).unwrap();
        ids.push(id);
    }
    (tree, scene, ids)
}

fn add_benchmark(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(1);
    let (mut tree, mut scene, _) = populated(10_000, &mut rng);
    let extra = scene.spawn(random_box(&mut rng));

    c.bench_function("octree_add", |b| {
        b.iter(|| {
            tree.add(&mut scene, black_box(extra)).unwrap();
            tree.remove(&mut scene, extra);
        })
    });
}

fn remove_benchmark(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(2);
    let (mut tree, mut scene, ids) = populated(10_000, &mut rng);

    c.bench_function("octree_remove", |b| {
        b.iter(|| {
            let id = ids[rng.gen_range(0..ids.len())];
            tree.remove(&mut scene, black_box(id));
            tree.add(&mut scene, id).unwrap();
        })
    });
}

fn churn_benchmark(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(3);
    let (mut tree, mut scene, ids) = populated(10_000, &mut rng);

    c.bench_function("octree_churn", |b| {
        b.iter(|| {
            for _ in 0..100 {
                let id = ids[rng.gen_range(0..ids.len())];
                tree.remove(&mut scene, id);
                scene.set_aabb(id, random_box(&mut rng));
                tree.add(&mut scene, black_box(id)).unwrap();
            }
        })
    });
}

criterion_group!(benches, add_benchmark, remove_benchmark, churn_benchmark);
criterion_main!(benches);
