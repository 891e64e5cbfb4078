use robot_primitives::prelude::*;
use robot_primitives_examples::{init_tracing, print_sample};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let flow_field = VectorField::from_channel_flow_with_pylon(20.0, -2.0, (8.0, 12.0))?;

    for x in [0.0, 6.0, 8.0, 10.0, 12.0] {
        print_sample(&flow_field, (x, 0.0));
    }

    Ok(())
}
