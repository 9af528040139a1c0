use bevy::prelude::*;

use natural_selection::{CreatureType, Environment};

/// Number keys that toggle a species in or out of the arena.
const SPECIES_KEYS: [(KeyCode, CreatureType); 3] = [
    (KeyCode::Digit0, CreatureType::Speed),
    (KeyCode::Digit1, CreatureType::Intelligence),
    (KeyCode::Digit2, CreatureType::Both),
];

/// Routes key presses to environment commands. Everything except start and
/// quit is ignored by the environment while a generation is running.
pub fn handle_keyboard(
    keys: Res<ButtonInput<KeyCode>>,
    mut environment: ResMut<Environment>,
    mut exit: EventWriter<AppExit>,
) {
    if keys.any_just_pressed([KeyCode::Delete, KeyCode::Escape]) {
        exit.send(AppExit::Success);
        return;
    }

    if keys.just_pressed(KeyCode::Enter) {
        environment.start();
    }

    for (key, kind) in SPECIES_KEYS {
        if keys.just_pressed(key) {
            environment.toggle_species(kind);
        }
    }

    if keys.just_pressed(KeyCode::ArrowUp) && environment.increase_food_count() {
        environment.refresh_food();
    }
    if keys.just_pressed(KeyCode::ArrowDown) && environment.decrease_food_count() {
        environment.refresh_food();
    }
}
