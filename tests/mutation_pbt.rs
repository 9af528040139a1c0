use bevy::math::Vec2;
use natural_selection::config::{
    DEFAULT_MAX_VELOCITY, DEFAULT_VISION_RADIUS, MAX_FOOD_EATEN, SPEED_MUTATION_MARGIN,
    VISION_MUTATION_MARGIN,
};
use natural_selection::creature::{speed_energy_spend, vision_energy_spend};
use natural_selection::{Arena, Creature, CreatureType, MutationMode};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

const TOLERANCE: f32 = 1e-3;

prop_compose! {
    fn arb_parent()(
        kind in prop::sample::select(CreatureType::ALL.to_vec()),
        max_velocity in 1.0f32..5.0,
        vision_radius in 5.0f32..60.0,
    ) -> Creature {
        Creature::new(kind, Vec2::new(300.0, 300.0), Vec2::ZERO, 5.0, 10.0, 0.0)
            .with_traits(max_velocity, vision_radius, 0.25)
    }
}

fn arb_mode() -> impl Strategy<Value = MutationMode> {
    prop_oneof![Just(MutationMode::Faithful), Just(MutationMode::Corrected)]
}

fn within(value: f32, center: f32, margin: f32) -> bool {
    let spread = center * margin;
    value >= center - spread - TOLERANCE && value <= center + spread + TOLERANCE
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn test_child_traits_stay_within_mutation_margins(
        parent in arb_parent(),
        mode in arb_mode(),
        seed in any::<u64>()
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let child = parent.create_child(mode, &mut rng);

        prop_assert_eq!(child.kind, parent.kind);
        prop_assert_eq!(child.food_eaten, 0);
        prop_assert_eq!(child.energy, 0.0);
        prop_assert!(child.energy_spend > 0.0, "spend {} must stay positive", child.energy_spend);

        match (parent.kind, mode) {
            (CreatureType::Speed, _) => {
                prop_assert!(within(child.max_velocity, parent.max_velocity, SPEED_MUTATION_MARGIN));
                prop_assert_eq!(child.vision_radius, DEFAULT_VISION_RADIUS);
            }
            (CreatureType::Intelligence, _) => {
                prop_assert_eq!(child.max_velocity, DEFAULT_MAX_VELOCITY);
                prop_assert!(within(child.vision_radius, parent.vision_radius, VISION_MUTATION_MARGIN));
            }
            (CreatureType::Both, MutationMode::Faithful) => {
                prop_assert!(within(child.max_velocity, parent.max_velocity, SPEED_MUTATION_MARGIN));
                prop_assert!(within(child.vision_radius, DEFAULT_VISION_RADIUS, VISION_MUTATION_MARGIN));
            }
            (CreatureType::Both, MutationMode::Corrected) => {
                prop_assert!(within(child.max_velocity, parent.max_velocity, SPEED_MUTATION_MARGIN));
                prop_assert!(within(child.vision_radius, parent.vision_radius, VISION_MUTATION_MARGIN));
            }
        }
    }

    #[test]
    fn test_energy_costs_are_monotonic(
        low in 0.5f32..5.0,
        step in 0.01f32..2.0
    ) {
        let high = low + step;
        prop_assert!(speed_energy_spend(high) > speed_energy_spend(low));

        let low_vision = low * 10.0;
        let high_vision = high * 10.0;
        prop_assert!(vision_energy_spend(high_vision) > vision_energy_spend(low_vision));
    }

    #[test]
    fn test_energy_never_goes_negative(
        energy in 0.0f32..5.0,
        spend in 0.01f32..1.0,
        steps in 1usize..50
    ) {
        let mut creature = Creature::new(
            CreatureType::Speed,
            Vec2::new(300.0, 300.0),
            Vec2::ZERO,
            5.0,
            10.0,
            energy,
        )
        .with_traits(DEFAULT_MAX_VELOCITY, DEFAULT_VISION_RADIUS, spend);

        for _ in 0..steps {
            creature.advance();
            prop_assert!(creature.energy >= 0.0);
        }
    }

    #[test]
    fn test_food_intake_never_exceeds_cap(meals in 0usize..10) {
        let mut creature = Creature::new(
            CreatureType::Both,
            Vec2::new(300.0, 300.0),
            Vec2::ZERO,
            5.0,
            10.0,
            100.0,
        );
        for _ in 0..meals {
            creature.add_food();
        }
        prop_assert_eq!(creature.food_eaten as usize, meals.min(MAX_FOOD_EATEN as usize));
    }

    #[test]
    fn test_wall_heading_is_axis_aligned_at_full_speed(
        x in 100.0f32..800.0,
        y in 100.0f32..600.0
    ) {
        let arena = Arena::default();
        let mut creature = Creature::new(
            CreatureType::Speed,
            Vec2::new(x, y),
            Vec2::ZERO,
            5.0,
            10.0,
            100.0,
        );
        creature.change_velocity_towards_nearest_wall(&arena);
        let (wall, _) = arena.nearest_wall(creature.position);

        prop_assert_eq!(creature.velocity, wall.heading() * DEFAULT_MAX_VELOCITY);
        prop_assert!((creature.velocity.length() - DEFAULT_MAX_VELOCITY).abs() < TOLERANCE);
    }
}
