use kmeans_live::{Point, types::BLACK};
use rand::{RngExt, SeedableRng};
use rand_chacha::ChaChaRng;

/// `n` black points uniform in [0, extent)²
///
/// `extent` must be finite and positive.
pub fn uniform(n: usize, extent: f64, seed: u64) -> Result<Vec<Point>, String> {
    if !(extent.is_finite() && extent > 0.0) {
        return Err(format!("extent must be a positive finite number, got {}", extent));
    }
    let mut rng = ChaChaRng::seed_from_u64(seed);
    Ok((0..n)
        .map(|_| {
            Point::new(rng.random_range(0.0..extent), rng.random_range(0.0..extent), BLACK)
        })
        .collect())
}
