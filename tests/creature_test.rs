use bevy::math::Vec2;
use natural_selection::config::{DEFAULT_ENERGY_SPEND, DEFAULT_MAX_VELOCITY, DEFAULT_VISION_RADIUS};
use natural_selection::creature::{
    reset_all_creatures, spawn_creatures, speed_energy_spend, vision_energy_spend,
};
use natural_selection::{Arena, Creature, CreatureType, Food, MutationMode, SimulationError};
use rand::SeedableRng;
use rand::rngs::StdRng;

const EPSILON: f32 = 1e-4;

fn creature_at(kind: CreatureType, position: Vec2) -> Creature {
    Creature::new(kind, position, Vec2::ZERO, 5.0, 10.0, 100.0)
}

fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {} but got {}",
        expected,
        actual
    );
}

/// Spawned creatures sit on a wall and head straight into the arena
#[test]
fn test_spawned_creatures_start_on_walls_heading_inward() {
    let arena = Arena::default();
    let mut rng = StdRng::seed_from_u64(1);
    let creatures = spawn_creatures(CreatureType::Speed, 200, 5.0, 10.0, 100.0, &arena, &mut rng);

    assert_eq!(creatures.len(), 200);
    for creature in &creatures {
        assert!(arena.is_touching_boundary(creature.position));
        assert_close(creature.velocity.length(), DEFAULT_MAX_VELOCITY);
        assert!(
            (creature.velocity.x == 0.0) != (creature.velocity.y == 0.0),
            "Velocity {:?} should be axis aligned",
            creature.velocity
        );

        let next = creature.position + creature.velocity;
        assert!(next.x >= arena.left() && next.x <= arena.right(), "{:?} leaves the arena", next);
        assert!(next.y >= arena.top() && next.y <= arena.bottom(), "{:?} leaves the arena", next);

        assert_eq!(creature.energy, 100.0);
        assert_eq!(creature.food_eaten, 0);
        assert_eq!(creature.color, CreatureType::Speed.base_color());
    }
}

/// Resetting restores energy, food, color and a wall position
#[test]
fn test_reset_restores_generation_start_state() {
    let arena = Arena::default();
    let mut rng = StdRng::seed_from_u64(2);
    let mut creatures = vec![creature_at(CreatureType::Both, arena.center())];
    creatures[0].add_food();
    creatures[0].energy = 12.0;
    creatures[0].needs_movement = false;
    creatures[0].max_velocity = 3.0;

    reset_all_creatures(&mut creatures, 100.0, &arena, &mut rng);

    let creature = &creatures[0];
    assert!(arena.is_touching_boundary(creature.position));
    assert_close(creature.velocity.length(), 3.0);
    assert_eq!(creature.energy, 100.0);
    assert_eq!(creature.food_eaten, 0);
    assert_eq!(creature.color, CreatureType::Both.base_color());
    assert!(creature.needs_movement);
}

/// Speed children vary speed within ten percent and pay the speed cost
#[test]
fn test_speed_child_mutates_speed_only() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut parent = creature_at(CreatureType::Speed, Vec2::new(300.0, 300.0));
    parent.food_eaten = 2;

    for _ in 0..100 {
        let child = parent.create_child(MutationMode::Faithful, &mut rng);
        assert_eq!(child.kind, CreatureType::Speed);
        assert!(child.max_velocity >= 2.25 - EPSILON && child.max_velocity <= 2.75 + EPSILON);
        assert_eq!(child.vision_radius, DEFAULT_VISION_RADIUS);
        assert_close(child.energy_spend, speed_energy_spend(child.max_velocity));
        assert_eq!(child.position, Vec2::ZERO);
        assert_eq!(child.velocity, Vec2::ZERO);
        assert_eq!(child.energy, 0.0);
        assert_eq!(child.food_eaten, 0);
        assert_eq!(child.radius, parent.radius);
        assert_eq!(child.mass, parent.mass);
    }
}

/// Faithful intelligence children pay for the parent's vision, corrected
/// ones for their own
#[test]
fn test_intelligence_child_cost_basis_depends_on_mode() {
    let mut rng = StdRng::seed_from_u64(4);
    let parent = creature_at(CreatureType::Intelligence, Vec2::new(300.0, 300.0)).with_traits(
        DEFAULT_MAX_VELOCITY,
        30.0,
        vision_energy_spend(30.0),
    );

    for _ in 0..50 {
        let faithful = parent.create_child(MutationMode::Faithful, &mut rng);
        assert!(faithful.vision_radius >= 15.0 - EPSILON && faithful.vision_radius <= 45.0 + EPSILON);
        assert_eq!(faithful.max_velocity, DEFAULT_MAX_VELOCITY);
        assert_close(faithful.energy_spend, vision_energy_spend(30.0));

        let corrected = parent.create_child(MutationMode::Corrected, &mut rng);
        assert!(corrected.vision_radius >= 15.0 - EPSILON && corrected.vision_radius <= 45.0 + EPSILON);
        assert_close(corrected.energy_spend, vision_energy_spend(corrected.vision_radius));
    }
}

/// Faithful hybrids mutate vision from the default and pay the default cost
#[test]
fn test_faithful_hybrid_child_starts_from_default_vision() {
    let mut rng = StdRng::seed_from_u64(5);
    let parent =
        creature_at(CreatureType::Both, Vec2::new(300.0, 300.0)).with_traits(2.6, 40.0, 0.3);

    for _ in 0..50 {
        let child = parent.create_child(MutationMode::Faithful, &mut rng);
        assert_eq!(child.kind, CreatureType::Both);
        assert!(child.max_velocity >= 2.34 - EPSILON && child.max_velocity <= 2.86 + EPSILON);
        assert!(child.vision_radius >= 12.5 - EPSILON && child.vision_radius <= 37.5 + EPSILON);
        assert_close(child.energy_spend, DEFAULT_ENERGY_SPEND);
    }
}

/// Corrected hybrids inherit the parent's vision and pay for both traits
#[test]
fn test_corrected_hybrid_child_pays_for_both_traits() {
    let mut rng = StdRng::seed_from_u64(6);
    let parent =
        creature_at(CreatureType::Both, Vec2::new(300.0, 300.0)).with_traits(2.6, 40.0, 0.3);

    for _ in 0..50 {
        let child = parent.create_child(MutationMode::Corrected, &mut rng);
        assert!(child.vision_radius >= 20.0 - EPSILON && child.vision_radius <= 60.0 + EPSILON);
        let expected = speed_energy_spend(child.max_velocity) * vision_energy_spend(child.vision_radius)
            / DEFAULT_ENERGY_SPEND;
        assert_close(child.energy_spend, expected);
    }
}

/// Faster or farther-sighted creatures pay more per step
#[test]
fn test_energy_costs_grow_with_traits() {
    assert_close(speed_energy_spend(DEFAULT_MAX_VELOCITY), DEFAULT_ENERGY_SPEND);
    assert!(speed_energy_spend(2.0) < DEFAULT_ENERGY_SPEND);
    assert!(speed_energy_spend(3.0) > DEFAULT_ENERGY_SPEND);
    assert!(speed_energy_spend(2.75) > speed_energy_spend(2.6));

    assert_close(vision_energy_spend(DEFAULT_VISION_RADIUS), DEFAULT_ENERGY_SPEND);
    assert!(vision_energy_spend(12.5) < DEFAULT_ENERGY_SPEND);
    assert!(vision_energy_spend(37.5) > DEFAULT_ENERGY_SPEND);
    assert!(vision_energy_spend(37.5) > vision_energy_spend(30.0));

    // Quadratic above the default: 3.0 is 1.2x the default speed.
    assert_close(speed_energy_spend(3.0), DEFAULT_ENERGY_SPEND * 1.44);
}

/// Heading for the far corner, with ties going to the top-left
#[test]
fn test_furthest_corner_heading() {
    let arena = Arena::default();

    let mut creature = creature_at(CreatureType::Speed, Vec2::new(110.0, 110.0));
    creature.change_velocity_towards_furthest_corner(&arena);
    let expected = (Vec2::new(800.0, 600.0) - Vec2::new(110.0, 110.0)).normalize() * DEFAULT_MAX_VELOCITY;
    assert_close(creature.velocity.x, expected.x);
    assert_close(creature.velocity.y, expected.y);

    let mut centred = creature_at(CreatureType::Speed, arena.center());
    centred.change_velocity_towards_furthest_corner(&arena);
    assert!(centred.velocity.x < 0.0 && centred.velocity.y < 0.0, "Tie should pick top-left");
}

#[test]
fn test_nearest_wall_heading() {
    let arena = Arena::default();
    let mut creature = creature_at(CreatureType::Speed, Vec2::new(105.0, 300.0));
    creature.change_velocity_towards_nearest_wall(&arena);
    assert_eq!(creature.velocity, Vec2::new(-DEFAULT_MAX_VELOCITY, 0.0));

    let mut creature = creature_at(CreatureType::Speed, Vec2::new(400.0, 590.0));
    creature.change_velocity_towards_nearest_wall(&arena);
    assert_eq!(creature.velocity, Vec2::new(0.0, DEFAULT_MAX_VELOCITY));
}

/// Food is only chased once it is inside the vision radius
#[test]
fn test_food_is_chased_within_vision() {
    let creature_position = Vec2::new(300.0, 300.0);
    let mut creature = creature_at(CreatureType::Intelligence, creature_position);

    let far = [Food::new(Vec2::new(330.0, 300.0), 2.0)];
    assert!(!creature.change_velocity_towards_nearest_food(&far));
    assert_eq!(creature.velocity, Vec2::ZERO);

    let near = [
        Food::new(Vec2::new(330.0, 300.0), 2.0),
        Food::new(Vec2::new(300.0, 320.0), 2.0),
    ];
    assert!(creature.change_velocity_towards_nearest_food(&near));
    assert_eq!(creature.velocity, Vec2::new(0.0, DEFAULT_MAX_VELOCITY));
}

#[test]
fn test_nearest_food_on_empty_set_is_an_error() {
    let creature = creature_at(CreatureType::Speed, Vec2::new(300.0, 300.0));
    assert_eq!(creature.find_nearest_food(&[]), Err(SimulationError::NoFood));

    let mut creature = creature;
    assert!(!creature.change_velocity_towards_nearest_food(&[]));
}

#[test]
fn test_touching_food_uses_both_radii() {
    let creature = creature_at(CreatureType::Speed, Vec2::new(300.0, 300.0));
    assert!(creature.is_touching_food(&Food::new(Vec2::new(307.0, 300.0), 2.0)));
    assert!(!creature.is_touching_food(&Food::new(Vec2::new(307.5, 300.0), 2.0)));
}

/// Food intake saturates at two and tints the creature
#[test]
fn test_food_intake_caps_at_two() {
    let mut creature = creature_at(CreatureType::Speed, Vec2::new(300.0, 300.0));
    creature.add_food();
    assert_eq!(creature.food_eaten, 1);
    assert_eq!(creature.color, CreatureType::Speed.fed_color(1));
    assert!(!creature.is_full());

    creature.add_food();
    creature.add_food();
    assert_eq!(creature.food_eaten, 2);
    assert!(creature.is_full());

    let arena = Arena::default();
    assert!(creature.change_velocity_if_enough_food(&arena));
}

/// Energy never goes negative, and spent creatures still move
#[test]
fn test_energy_floors_at_zero() {
    let mut creature = creature_at(CreatureType::Speed, Vec2::new(300.0, 300.0));
    creature.energy = 0.1;
    creature.velocity = Vec2::new(1.0, 0.0);

    creature.advance();
    assert_eq!(creature.energy, 0.0);
    assert!(creature.is_exhausted());
    assert_eq!(creature.position, Vec2::new(301.0, 300.0));

    creature.advance();
    assert_eq!(creature.energy, 0.0);
    assert_eq!(creature.position, Vec2::new(302.0, 300.0));
}

/// Creatures turn home once the trip to the nearest wall uses up their energy
#[test]
fn test_low_energy_turns_home() {
    let arena = Arena::default();
    // Fifty units from the left wall: 20 steps at 0.25 each.
    let mut creature = creature_at(CreatureType::Speed, Vec2::new(150.0, 300.0));
    creature.velocity = Vec2::new(DEFAULT_MAX_VELOCITY, 0.0);

    creature.energy = 6.0;
    creature.change_velocity_if_not_enough_energy(&arena);
    assert_eq!(creature.velocity, Vec2::new(DEFAULT_MAX_VELOCITY, 0.0));

    creature.energy = 5.0;
    creature.change_velocity_if_not_enough_energy(&arena);
    assert_eq!(creature.velocity, Vec2::new(-DEFAULT_MAX_VELOCITY, 0.0));
}
