//! Initial partitions for the live engine
//!
//! Both policies build a deliberately rough partition; the reassignment passes
//! in `engine` are what turn it into a sensible one.
//!
//! - k = 2: seed with two far-apart points found by two farthest-point scans
//! - any other k: seed with k distinct random points, everything else goes to cluster 0

use rand::seq::index::sample;
use rand_chacha::ChaCha20Rng;
use tracing::debug;

use crate::{
    cluster::Cluster,
    types::{Color, Point, distance},
};

/// Find two far-apart points starting from the anchor at index 0
///
/// # Returns
/// * `(a, b)` where `a` is the point farthest from the anchor (the anchor itself
///   is not a candidate) and `b` is the point farthest from `a` over the whole
///   population. `b` may be the anchor. Ties keep the first index.
/// * `None` if there are fewer than two points
pub fn two_furthest_points(points: &[Point]) -> Option<(usize, usize)> {
    let anchor = points.first()?.xy();

    let mut max_distance = -1.0;
    let mut a = None;
    for (i, point) in points.iter().enumerate().skip(1) {
        let d = distance(anchor, point.xy());
        if d > max_distance {
            max_distance = d;
            a = Some(i);
        }
    }
    let a = a?;

    let mut max_distance = -1.0;
    let mut b = a;
    for (i, point) in points.iter().enumerate() {
        let d = distance(points[a].xy(), point.xy());
        if d > max_distance {
            max_distance = d;
            b = i;
        }
    }
    Some((a, b))
}

/// Two clusters: cluster 0 = {A, B}, cluster 1 = every other point
pub fn seed_farthest_pair(points: &[Point], rng: &mut ChaCha20Rng) -> Vec<Cluster> {
    let Some((a, b)) = two_furthest_points(points) else {
        return Vec::new();
    };
    debug!(a, b, "farthest pair seeds");

    // b is never a: index 0 is taken first and a only ties with itself at 0
    let mut first = Cluster::new(0, vec![a], Color::random(&mut *rng), points);
    let mut second = Cluster::new(1, Vec::new(), Color::random(&mut *rng), points);
    first.add_node(b, points);
    for i in (0..points.len()).filter(|i| *i != a && *i != b) {
        second.add_node(i, points);
    }
    vec![first, second]
}

/// `k` singleton clusters on random distinct seeds, the rest dumped into cluster 0
pub fn seed_random(points: &[Point], k: usize, rng: &mut ChaCha20Rng) -> Vec<Cluster> {
    let seeds = sample(&mut *rng, points.len(), k).into_vec();
    debug!(?seeds, "random seeds");

    let mut clusters: Vec<Cluster> = seeds
        .iter()
        .enumerate()
        .map(|(id, seed)| Cluster::new(id, vec![*seed], Color::random(&mut *rng), points))
        .collect();

    if let Some(pool) = clusters.first_mut() {
        for i in (0..points.len()).filter(|i| !seeds.contains(i)) {
            pool.add_node(i, points);
        }
    }
    clusters
}
