use robot_primitives::prelude::*;
use robot_primitives_examples::{init_tracing, print_sample};

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Diamond domain with a channel running along its diagonal.
    let domain = Domain::from_vertices([(5.0, 0.0), (10.0, 5.0), (5.0, 10.0), (0.0, 5.0)])?;
    let center_axis = ((2.5, 2.5), (7.5, 7.5));
    let flow_field = BoundedVectorField::channel_flow_model(&domain, center_axis, 2.0, None)?;

    print_sample(&flow_field, (5.0, 5.0));
    print_sample(&flow_field, (7.0, 4.0));
    print_sample(&flow_field, (12.0, 5.0));

    Ok(())
}
