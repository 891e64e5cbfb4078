use std::time::Duration;

use criterion::{Criterion, Throughput};
use glam::DVec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const SAMPLE_SIZE: usize = 20;
pub const WARM_UP: Duration = Duration::from_secs(1);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(3);

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

pub fn elements_throughput(elements: usize) -> Throughput {
    Throughput::Elements(elements.max(1) as u64)
}

/// `count` seeded points uniformly spread over `[min, max]`.
#[allow(dead_code)]
pub fn random_points(count: usize, min: DVec2, max: DVec2, seed: u64) -> Vec<DVec2> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut unit = || rng.next_u32() as f64 / (u32::MAX as f64 + 1.0);
    (0..count)
        .map(|_| {
            let t = DVec2::new(unit(), unit());
            min + (max - min) * t
        })
        .collect()
}
