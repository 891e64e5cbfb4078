use robot_primitives::prelude::*;
use robot_primitives_examples::{init_tracing, print_sample};

fn main() -> anyhow::Result<()> {
    init_tracing();

    // A basin wrapped around a headland at the origin, open to the west.
    let basin = Domain::from_vertices([
        (-10.0, -10.0),
        (10.0, -10.0),
        (10.0, 10.0),
        (-10.0, 10.0),
        (-10.0, 4.0),
        (4.0, 4.0),
        (4.0, -4.0),
        (-10.0, -4.0),
    ])?;

    let radial = BoundedVectorField::radial_channel_flow_model(&basin, (0.0, 0.0), 2.0, 0.5)?;
    let skewed = BoundedVectorField::asymmetric_radial_channel_flow_model(
        &basin,
        (0.0, 0.0),
        2.0,
        0.5,
        (0.3, 0.7),
    )?;

    for p in [(0.0, 7.0), (7.0, 0.0), (7.0, 7.0), (-5.0, -7.0)] {
        print_sample(&radial, p);
        print_sample(&skewed, p);
    }

    Ok(())
}
