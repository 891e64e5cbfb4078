use glam::DVec2;
use robot_primitives::prelude::*;
use robot_primitives_examples::init_tracing;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let domain = Domain::from_box((0.0, 0.0), (20.0, 10.0))?;
    let field =
        BoundedVectorField::channel_flow_model(&domain, ((0.0, 5.0), (20.0, 5.0)), 0.4, None)?;
    let energy = OpposingFlowEnergy::new(&field, FlowEnergyConfig::default())?;
    let euclidean = EuclideanDistance;
    let across = DirectedDistance::perpendicular((1.0, 0.0))?;

    let edges = [
        (DVec2::new(2.0, 5.0), DVec2::new(18.0, 5.0)),
        (DVec2::new(18.0, 5.0), DVec2::new(2.0, 5.0)),
        (DVec2::new(18.0, 1.0), DVec2::new(2.0, 1.0)),
        (DVec2::new(10.0, 1.0), DVec2::new(10.0, 9.0)),
    ];
    for (a, b) in edges {
        println!(
            "{a} -> {b}: distance {:.3}, across {:.3}, energy {:.3}, energy at 1.0 {:.3}",
            euclidean.compute_cost(a, b),
            across.compute_cost(a, b),
            energy.compute_cost(a, b),
            energy.compute_cost_at_speed(a, b, 1.0)?,
        );
    }

    Ok(())
}
