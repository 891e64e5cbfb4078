use robot_primitives::prelude::*;
use robot_primitives_examples::init_tracing;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let dir = std::env::temp_dir();

    let mut domain = Domain::from_box((0.0, 0.0), (20.0, 10.0))?.with_egress_point((20.0, 10.0));
    domain.create_obstacle([(8.0, 4.0), (12.0, 4.0), (12.0, 6.0), (8.0, 6.0)])?;
    let domain_file = dir.join("robot-primitives-domain.json");
    domain.save(&domain_file)?;
    let loaded = Domain::from_file(&domain_file)?;
    println!("{}", loaded.to_json_string()?);

    let mut path = ConstrainedPath::new([(1.0, 1.0), (6.0, 1.0)])
        .with_attribute("speed", vec![Some(0.5), Some(0.8)])?;
    path.add_point((6.0, 8.0), &[("depth", 2.5)]);
    path += ConstrainedPath::new([(14.0, 8.0), (19.0, 9.0)]);
    let path_file = dir.join("robot-primitives-path.json");
    path.save(&path_file)?;
    let loaded = ConstrainedPath::from_file(&path_file)?;
    println!("{} points, length {:.3}", loaded.len(), loaded.length());
    println!("{}", loaded.to_json_string()?);

    if let Err(err) = domain.save(dir.join("robot-primitives-domain.yaml")) {
        println!("expected failure: {err}");
    }

    Ok(())
}
