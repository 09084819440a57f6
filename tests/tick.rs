use eframe::egui::Color32;
use glam::DVec2;
use ideal_gas::error::Result;
use ideal_gas::{GroupSpec, Particle, ParticleGroup, SimulationParams, SimulationSpace};
use rand::SeedableRng;
use rand::rngs::StdRng;

const TOL: f64 = 1e-9;

fn close(a: DVec2, b: DVec2) -> bool {
    (a - b).abs().max_element() < TOL
}

/// A 200x200 container holding a single group whose members are given as
/// `(position, velocity)` pairs.
fn single_group_space(
    mass: u32,
    radius: u32,
    members: &[((f64, f64), (f64, f64))],
) -> Result<SimulationSpace> {
    let group = group_of(mass, radius, Color32::WHITE, members)?;
    Ok(SimulationSpace::from_groups(DVec2::splat(100.0), vec![group], 200, 200))
}

fn group_of(
    mass: u32,
    radius: u32,
    tag: Color32,
    members: &[((f64, f64), (f64, f64))],
) -> Result<ParticleGroup> {
    let bound = 200.0 - 2.0 * f64::from(radius);
    let mut group = ParticleGroup::empty(mass, radius, tag, bound, bound, 1.0)?;
    for &((x, y), (vx, vy)) in members {
        group.add(Particle::new(DVec2::new(x, y), DVec2::new(vx, vy), mass, radius, tag)?)?;
    }
    Ok(group)
}

fn velocity(space: &SimulationSpace, group: usize, index: usize) -> Result<DVec2> {
    Ok(space.group(group)?.get(index)?.velocity)
}

fn position(space: &SimulationSpace, group: usize, index: usize) -> Result<DVec2> {
    Ok(space.group(group)?.get(index)?.position)
}

#[test]
fn free_particle_moves_by_its_velocity() -> Result<()> {
    let members = [((50.0, 50.0), (0.4, 0.5)), ((80.0, 80.0), (0.0, 0.0))];
    let mut space = single_group_space(1, 1, &members)?;
    space.tick()?;
    assert!(close(position(&space, 0, 0)?, DVec2::new(50.4, 50.5)));

    for _ in 0..25 {
        space.tick()?;
    }
    assert_eq!(position(&space, 0, 1)?, DVec2::new(80.0, 80.0));
    Ok(())
}

#[test]
fn walls_reflect_before_moving() -> Result<()> {
    // (start, velocity, expected velocity, expected position) in a 198 bound
    let cases = [
        ((50.0, 0.0), (0.4, 0.5), (0.4, 0.5), (50.4, 0.5)),
        ((50.0, 0.0), (0.4, -0.5), (0.4, 0.5), (50.4, 0.5)),
        ((50.0, 198.0), (0.4, -0.5), (0.4, -0.5), (50.4, 197.5)),
        ((50.0, 198.0), (0.4, 0.5), (0.4, -0.5), (50.4, 197.5)),
        ((0.0, 50.0), (0.4, 0.5), (0.4, 0.5), (0.4, 50.5)),
        ((0.0, 50.0), (-0.4, 0.5), (0.4, 0.5), (0.4, 50.5)),
        ((198.0, 50.0), (-0.4, 0.5), (-0.4, 0.5), (197.6, 50.5)),
        ((198.0, 50.0), (0.4, 0.5), (-0.4, 0.5), (197.6, 50.5)),
    ];
    for (start, vel, want_vel, want_pos) in cases {
        let mut space = single_group_space(1, 1, &[(start, vel)])?;
        space.tick()?;
        assert!(
            close(velocity(&space, 0, 0)?, DVec2::new(want_vel.0, want_vel.1)),
            "velocity from {start:?} moving {vel:?}"
        );
        assert!(
            close(position(&space, 0, 0)?, DVec2::new(want_pos.0, want_pos.1)),
            "position from {start:?} moving {vel:?}"
        );
    }
    Ok(())
}

#[test]
fn separating_particles_keep_their_velocities() -> Result<()> {
    let members = [((50.0, 50.0), (-1.0, -1.0)), ((52.0, 50.0), (1.0, 1.0))];
    let mut space = single_group_space(1, 1, &members)?;
    assert_eq!(space.tick()?, 0);
    assert_eq!(velocity(&space, 0, 0)?, DVec2::new(-1.0, -1.0));
    assert_eq!(velocity(&space, 0, 1)?, DVec2::new(1.0, 1.0));
    Ok(())
}

#[test]
fn equal_masses_swap_normal_components() -> Result<()> {
    let members = [((50.0, 50.0), (1.0, 1.0)), ((52.0, 50.0), (-1.0, -1.0))];
    let mut space = single_group_space(1, 1, &members)?;
    assert_eq!(space.tick()?, 1);

    assert!(close(velocity(&space, 0, 0)?, DVec2::new(-1.0, 1.0)));
    assert!(close(velocity(&space, 0, 1)?, DVec2::new(1.0, -1.0)));
    // positions move with the post-collision velocities
    assert!(close(position(&space, 0, 0)?, DVec2::new(49.0, 51.0)));
    assert!(close(position(&space, 0, 1)?, DVec2::new(53.0, 49.0)));
    Ok(())
}

#[test]
fn collisions_cross_group_boundaries_with_unequal_masses() -> Result<()> {
    let light = group_of(1, 2, Color32::YELLOW, &[((50.0, 50.0), (1.0, 1.0))])?;
    let heavy = group_of(2, 2, Color32::RED, &[((54.0, 50.0), (-1.0, -1.0))])?;
    let mut space = SimulationSpace::from_groups(DVec2::ZERO, vec![light, heavy], 200, 200);
    assert_eq!(space.tick()?, 1);

    let v_light = velocity(&space, 0, 0)?;
    let v_heavy = velocity(&space, 1, 0)?;
    assert!(close(v_light, DVec2::new(-5.0 / 3.0, 1.0)));
    assert!(close(v_heavy, DVec2::new(1.0 / 3.0, -1.0)));
    assert!(close(v_light + 2.0 * v_heavy, DVec2::new(-1.0, -1.0)));
    Ok(())
}

#[test]
fn only_the_colliding_pair_changes() -> Result<()> {
    let members = [
        ((10.0, 10.0), (0.3, 0.2)),
        ((50.0, 50.0), (1.0, 1.0)),
        ((52.0, 50.0), (-1.0, -1.0)),
        ((150.0, 150.0), (-0.1, 0.7)),
    ];
    let mut space = single_group_space(1, 1, &members)?;
    assert_eq!(space.tick()?, 1);

    assert_eq!(velocity(&space, 0, 0)?, DVec2::new(0.3, 0.2));
    assert_eq!(velocity(&space, 0, 3)?, DVec2::new(-0.1, 0.7));
    assert!(close(velocity(&space, 0, 1)?, DVec2::new(-1.0, 1.0)));
    assert!(close(velocity(&space, 0, 2)?, DVec2::new(1.0, -1.0)));
    Ok(())
}

#[test]
fn three_body_contact_resolves_in_index_order() -> Result<()> {
    // particle 0 touches both others; it meets 1 first, then 2 with its updated velocity
    let members = [
        ((50.0, 50.0), (1.0, 1.0)),
        ((52.0, 50.0), (-1.0, 0.0)),
        ((50.0, 52.0), (0.0, -1.0)),
    ];
    let mut space = single_group_space(1, 1, &members)?;
    assert_eq!(space.tick()?, 2);

    assert!(close(velocity(&space, 0, 0)?, DVec2::new(-1.0, -1.0)));
    assert!(close(velocity(&space, 0, 1)?, DVec2::new(1.0, 0.0)));
    assert!(close(velocity(&space, 0, 2)?, DVec2::new(0.0, 1.0)));
    Ok(())
}

#[test]
fn resolved_particle_is_still_hit_by_a_later_one() -> Result<()> {
    // 0 hits 1 first; 1 is then struck again by 2 on 2's turn
    let members = [
        ((50.0, 50.0), (1.0, 0.0)),
        ((52.0, 50.0), (0.0, 0.0)),
        ((54.0, 50.0), (-1.0, 0.0)),
    ];
    let mut space = single_group_space(1, 1, &members)?;
    assert_eq!(space.tick()?, 2);

    assert!(close(velocity(&space, 0, 0)?, DVec2::new(0.0, 0.0)));
    assert!(close(velocity(&space, 0, 1)?, DVec2::new(-1.0, 0.0)));
    assert!(close(velocity(&space, 0, 2)?, DVec2::new(1.0, 0.0)));
    Ok(())
}

#[test]
fn particle_resolved_before_its_turn_never_acts_as_current() -> Result<()> {
    // 0 hits both 1 and 2; those two still touch and close on each other,
    // but neither gets a turn this tick
    let members = [
        ((50.0, 50.0), (0.0, 0.0)),
        ((54.0, 50.0), (-1.0, 1.0)),
        ((50.0, 54.0), (1.0, -1.0)),
    ];
    let mut space = single_group_space(1, 3, &members)?;
    assert_eq!(space.tick()?, 2);

    assert!(close(velocity(&space, 0, 0)?, DVec2::new(-1.0, -1.0)));
    assert!(close(velocity(&space, 0, 1)?, DVec2::new(0.0, 1.0)));
    assert!(close(velocity(&space, 0, 2)?, DVec2::new(1.0, 0.0)));
    Ok(())
}

#[test]
fn flattened_view_follows_group_order() -> Result<()> {
    let members = [((1.0, 1.0), (0.0, 0.0)), ((2.0, 2.0), (0.0, 0.0))];
    let a = group_of(1, 1, Color32::YELLOW, &members)?;
    let b = group_of(3, 2, Color32::RED, &[((3.0, 3.0), (0.0, 0.0))])?;
    let space = SimulationSpace::from_groups(DVec2::ZERO, vec![a, b], 200, 200);

    let xs: Vec<f64> = space.particles().map(|p| p.position.x).collect();
    assert_eq!(xs, vec![1.0, 2.0, 3.0]);
    assert_eq!(space.particle_count(), 3);
    Ok(())
}

#[test]
fn new_groups_share_one_initial_velocity() -> Result<()> {
    let params = SimulationParams::default();
    let mut rng = StdRng::seed_from_u64(99);
    let space = SimulationSpace::new(
        DVec2::splat(50.0),
        &params.groups,
        params.container_width,
        params.container_height,
        &mut rng,
    )?;

    for group in space.groups() {
        let v0 = group.get(0)?.velocity;
        let limit = group.max_speed();
        assert!(v0.x.abs() <= limit && v0.y.abs() <= limit);
        assert!(group.particles().iter().all(|p| p.velocity == v0));
    }
    Ok(())
}

#[test]
fn same_seed_same_trajectory() -> Result<()> {
    let specs = [
        GroupSpec {
            count: 40,
            mass: 2,
            radius: 5,
            tag: Color32::YELLOW,
        },
        GroupSpec {
            count: 10,
            mass: 5,
            radius: 10,
            tag: Color32::RED,
        },
    ];
    let build = |seed| -> Result<SimulationSpace> {
        SimulationSpace::new(DVec2::ZERO, &specs, 300, 300, &mut StdRng::seed_from_u64(seed))
    };
    let mut a = build(5)?;
    let mut b = build(5)?;
    for _ in 0..50 {
        a.tick()?;
        b.tick()?;
    }
    assert!(a.particles().eq(b.particles()));
    Ok(())
}

#[test]
fn kinetic_energy_is_conserved() -> Result<()> {
    let params = SimulationParams::default();
    let mut rng = StdRng::seed_from_u64(2024);
    let mut space = SimulationSpace::new(
        DVec2::ZERO,
        &params.groups,
        params.container_width,
        params.container_height,
        &mut rng,
    )?;
    let e0 = space.kinetic_energy();

    let mut collisions = 0;
    for _ in 0..200 {
        collisions += space.tick()?;
    }
    let e1 = space.kinetic_energy();
    assert!(collisions > 0, "a dense default gas should collide within 200 ticks");
    assert!(
        ((e1 - e0) / e0).abs() < 1e-9,
        "relative energy drift too large (E0={e0}, E1={e1})"
    );
    Ok(())
}
