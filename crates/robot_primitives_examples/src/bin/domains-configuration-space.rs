use glam::DVec2;
use robot_primitives::prelude::*;
use tracing::info;

fn main() -> anyhow::Result<()> {
    robot_primitives_examples::init_tracing();

    let mut domain = Domain::from_box_with_access(
        (0.0, 0.0),
        (40.0, 20.0),
        Some(DVec2::new(1.0, 1.0)),
        None,
    )?;
    domain.create_obstacle([(10.0, 5.0), (14.0, 5.0), (14.0, 15.0), (10.0, 15.0)])?;
    domain.create_obstacle([(25.0, 8.0), (30.0, 8.0), (27.5, 12.0)])?;

    for radius in [0.0, 0.5, 1.5] {
        let space = domain.configuration_space(radius)?;
        let free = space.free_space();
        info!(
            "radius {}: boundary area {:.2}, {} obstacles, free area {:.2}",
            radius,
            space.boundary.area(),
            free.hole_count(),
            free.area()
        );
    }

    let p1 = (2.0, 10.0);
    for p2 in [(8.0, 10.0), (20.0, 10.0), (38.0, 18.0)] {
        println!("line of sight {:?} -> {:?}: {}", p1, p2, domain.line_of_sight(p1, p2));
    }

    let crossing = Segment::new((-5.0, 10.0), (45.0, 10.0));
    for hit in domain.compute_intersection_with_obstacles(&crossing) {
        println!("area {} at ({:.2}, {:.2})", hit.area_id, hit.point.x, hit.point.y);
    }

    Ok(())
}
