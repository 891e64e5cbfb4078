#![forbid(unsafe_code)]

use glam::DVec2;
use robot_primitives::field::Field;
use tracing_subscriber::EnvFilter;

/// Installs a `fmt` subscriber filtered by `RUST_LOG` (default `info`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// Prints `field` sampled at `p` together with the sample magnitude.
pub fn print_sample(field: &impl Field, p: impl Into<DVec2>) {
    let p = p.into();
    let v = field.sample(p);
    println!("({}, {}) vec: ({:.6}, {:.6}), mag: {:.6}", p.x, p.y, v.x, v.y, v.length());
}
