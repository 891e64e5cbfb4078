use robot_primitives::prelude::*;
use robot_primitives_examples::{init_tracing, print_sample};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let domain = Domain::from_vertices([(4.0, 2.0), (3.0, 11.0), (10.0, 12.0), (11.0, 3.0)])?;
    let flow_axis = ((9.0, 2.0), (8.0, 13.0));
    let flow_field = BoundedVectorField::linear_flow_model(&domain, flow_axis, 0.5, 1.5)?;

    // Just inside the two extremes across the flow axis.
    print_sample(&flow_field, (3.0001, 11.0));
    print_sample(&flow_field, (10.99999, 3.0));

    Ok(())
}
