use approx::assert_relative_eq;
use softbody2d::{Body, BodyConfig, IntegrationMode, Point, Vec2, World, WorldConfig};

fn two_points(a: Vec2<f64>, b: Vec2<f64>, config: BodyConfig<f64>) -> Body<f64> {
    Body::new(config, vec![Point::new(a), Point::new(b)], &[(0, 1)]).unwrap()
}

#[test]
fn stretched_pair_single_euler_step() {
    let config = BodyConfig::new()
        .with_point_mass(1.0)
        .with_stiffness(10.0)
        .with_damping(0.0);
    // Rest length is measured at 1, then B is dragged out to extension 1.
    let mut body = two_points(Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), config);
    body.move_point(1, Vec2::new(2.0, 0.0)).unwrap();
    assert_eq!(body.springs()[0].rest_length, 1.0);

    let dt = 0.1;
    body.reset_forces();
    body.apply_spring_forces(dt, IntegrationMode::Euler);
    assert_eq!(body.points()[0].force, Vec2::new(10.0, 0.0));
    assert_eq!(body.points()[1].force, Vec2::new(-10.0, 0.0));

    body.integrate(dt, IntegrationMode::Euler);
    let a = &body.points()[0];
    let b = &body.points()[1];
    // v = F/m * dt, x += v * dt
    assert_eq!(a.velocity, Vec2::new(10.0 * dt, 0.0));
    assert_eq!(b.velocity, Vec2::new(-10.0 * dt, 0.0));
    assert_eq!(a.position, Vec2::new(0.0 + (10.0 * dt) * dt, 0.0));
    assert_eq!(b.position, Vec2::new(2.0 + (-10.0 * dt) * dt, 0.0));
    assert_relative_eq!(a.position.x, 0.1, epsilon = 1e-12);
    assert_relative_eq!(b.position.x, 1.9, epsilon = 1e-12);
}

#[test]
fn spring_at_rest_stays_put() {
    for mode in [IntegrationMode::Euler, IntegrationMode::Verlet] {
        let config = BodyConfig::new().with_stiffness(500.0).with_damping(0.0);
        let mut world = World::new(WorldConfig::new().with_mode(mode).with_sub_steps(4)).unwrap();
        let pair = world.register(two_points(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0), config));
        let square = world.register(
            Body::rectangle(config, Vec2::new(10.0, 10.0), 2.0, 3.0).unwrap(),
        );
        let before_pair = world.body(pair).unwrap().positions();
        let before_square = world.body(square).unwrap().positions();

        for _ in 0..500 {
            world.step(1.0 / 60.0).unwrap();
        }

        assert_eq!(world.body(pair).unwrap().positions(), before_pair, "{mode:?}");
        assert_eq!(world.body(square).unwrap().positions(), before_square, "{mode:?}");
    }
}

#[test]
fn pinned_points_never_move() {
    for mode in [IntegrationMode::Euler, IntegrationMode::Verlet] {
        let config = WorldConfig::new()
            .with_gravity(9.81)
            .with_mode(mode)
            .with_sub_steps(2)
            .with_intra_body_collisions(true);
        let mut world = World::new(config).unwrap();
        let config = BodyConfig::new().with_damping(5.0);
        let mut body = Body::circle(config, Vec2::new(0.0f32, 5.0), 1.0, 10).unwrap();
        body.set_pinned(0, true).unwrap();
        body.set_pinned(5, true).unwrap();
        let h = world.register(body);
        let free_before = world.body(h).unwrap().points()[7].position.y;
        let pinned_before = [
            world.body(h).unwrap().points()[0].position,
            world.body(h).unwrap().points()[5].position,
        ];

        for _ in 0..200 {
            world.step(1.0 / 60.0).unwrap();
        }

        let body = world.body(h).unwrap();
        assert_eq!(body.points()[0].position, pinned_before[0]);
        assert_eq!(body.points()[5].position, pinned_before[1]);
        assert_eq!(body.points()[0].previous_position, pinned_before[0]);
        // Free points sag under gravity.
        assert!(body.points()[7].position.y < free_before - 0.01);
    }
}

#[test]
fn verlet_free_fall_gravity() {
    let mut world = World::new(
        WorldConfig::new()
            .with_gravity(9.81)
            .with_mode(IntegrationMode::Verlet),
    )
    .unwrap();
    let h = world.register(
        Body::new(BodyConfig::new(), vec![Point::new(Vec2::new(0.0f32, 100.0))], &[]).unwrap(),
    );

    for _ in 0..60 {
        world.step(1.0 / 60.0).unwrap();
    }

    let y = world.body(h).unwrap().points()[0].position.y;
    let expected_y = 100.0 - 0.5 * 9.81 * 1.0;
    assert!((y - expected_y).abs() < 0.2, "pos.y = {}, expected ~ {}", y, expected_y);
}

#[test]
fn euler_and_verlet_agree_on_free_fall() {
    let fall = |mode| {
        let mut world = World::new(
            WorldConfig::new().with_gravity(9.81).with_mode(mode).with_sub_steps(10),
        )
        .unwrap();
        let h = world.register(
            Body::new(BodyConfig::new(), vec![Point::new(Vec2::new(0.0f64, 0.0))], &[]).unwrap(),
        );
        for _ in 0..60 {
            world.step(1.0 / 60.0).unwrap();
        }
        world.body(h).unwrap().points()[0].position.y
    };
    let euler = fall(IntegrationMode::Euler);
    let verlet = fall(IntegrationMode::Verlet);
    assert!((euler - verlet).abs() < 0.05, "euler {} vs verlet {}", euler, verlet);
}

#[test]
fn damped_spring_settles_at_rest_length() {
    for mode in [IntegrationMode::Euler, IntegrationMode::Verlet] {
        let config = BodyConfig::new().with_stiffness(50.0).with_damping(2.0);
        let mut body = two_points(Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), config);
        body.move_point(1, Vec2::new(1.5, 0.0)).unwrap();
        let mut world = World::new(WorldConfig::new().with_mode(mode).with_sub_steps(4)).unwrap();
        let h = world.register(body);

        for _ in 0..600 {
            world.step(1.0 / 60.0).unwrap();
        }

        let body = world.body(h).unwrap();
        let length = body.points()[0].position.distance(body.points()[1].position);
        assert!((length - 1.0).abs() < 1e-3, "{mode:?}: length {}", length);
    }
}

#[test]
fn switching_mode_mid_run_stays_finite() {
    let mut world = World::new(WorldConfig::new().with_gravity(9.81).with_sub_steps(4)).unwrap();
    let h = world.register(Body::circle(BodyConfig::new(), Vec2::new(0.0f32, 0.0), 1.0, 12).unwrap());

    for _ in 0..30 {
        world.step(1.0 / 60.0).unwrap();
    }
    let before = world.body(h).unwrap().centroid();
    world.config_mut().mode = IntegrationMode::Verlet;
    world.step(1.0 / 60.0).unwrap();
    let after = world.body(h).unwrap().centroid();

    assert!(world.body(h).unwrap().points().iter().all(|p| p.position.is_finite()));
    // Still falling, and by no more than one frame of fall speed.
    assert!(after.y < before.y);
    assert!(before.y - after.y < 0.2);
}
