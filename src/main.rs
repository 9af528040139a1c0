mod camera;
mod input;
mod render;

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPlugin};
use camera::{ViewState, camera_pan, camera_zoom, reset_view, setup_camera};
use input::handle_keyboard;
use natural_selection::config::{CONFIG_FILE, POPULATION_SEPARATOR_LIMIT};
use natural_selection::environment::advance_simulation;
use natural_selection::physics::{highest_speed, lowest_speed};
use natural_selection::stats::{
    Histogram, SpeciesCounts, average, highest_population, hybrid_scatter, population_series,
    speeds_of, visions_of,
};
use natural_selection::{CreatureType, Environment, SimulationConfig};
use render::{draw_overlays, setup_sprite_assets, sync_creature_sprites, sync_food_sprites};

const CHART_SIZE: egui::Vec2 = egui::vec2(260.0, 140.0);

fn main() -> AppExit {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Natural Selection".to_string(),
                resolution: (1600.0, 900.0).into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin)
        .insert_resource(ClearColor(Color::BLACK))
        .init_resource::<ViewState>()
        .add_systems(
            Startup,
            (
                setup_environment,
                setup_sprite_assets,
                setup_camera.run_if(resource_exists::<Environment>),
            )
                .chain(),
        )
        .add_systems(Update, (camera_zoom, camera_pan, reset_view))
        .add_systems(
            Update,
            (
                handle_keyboard,
                advance_simulation,
                sync_creature_sprites,
                sync_food_sprites,
                draw_overlays,
                ui_system,
            )
                .chain()
                .run_if(resource_exists::<Environment>),
        )
        .run()
}

fn setup_environment(mut commands: Commands, mut exit: EventWriter<AppExit>) {
    let config = SimulationConfig::load_or_default(CONFIG_FILE);
    let environment = Environment::new(config).or_else(|err| {
        warn!(error = %err, "falling back to default simulation settings");
        Environment::new(SimulationConfig::default())
    });

    match environment {
        Ok(environment) => commands.insert_resource(environment),
        Err(err) => {
            error!(error = %err, "could not build the environment");
            exit.send(AppExit::error());
        }
    }
}

fn ui_system(mut contexts: EguiContexts, environment: Res<Environment>) {
    egui::Window::new("Natural Selection")
        .default_pos(egui::pos2(10.0, 10.0))
        .show(contexts.ctx_mut(), |ui| {
            let state_text = if environment.is_running() { "Running" } else { "Paused" };
            ui.label(format!("State: {}", state_text));
            ui.label(format!(
                "Speed: {}, Intelligence: {}, Both: {}",
                environment.species_count(CreatureType::Speed),
                environment.species_count(CreatureType::Intelligence),
                environment.species_count(CreatureType::Both),
            ));
            ui.label(format!(
                "Food: {} (next generation: {})",
                environment.food().len(),
                environment.food_count()
            ));
            ui.label(format!("Trials Run: {}", environment.trials_run()));
            ui.label(format!(
                "Current speed range: {:.2} - {:.2}",
                lowest_speed(environment.creatures()),
                highest_speed(environment.creatures()),
            ));

            ui.separator();
            ui.label("Controls:");
            ui.label("• 0 / 1 / 2 - Toggle speed / intelligence / hybrid creatures");
            ui.label("• Up / Down - More / less food");
            ui.label("• Enter - Simulate one generation");
            ui.label("• R - Reset view, Mouse Wheel - Zoom, Middle Mouse - Pan");
            ui.label("• Delete / Escape - Quit");

            let records = environment.live_records();

            ui.separator();
            ui.heading("Traits");
            for kind in CreatureType::ALL {
                let speeds = speeds_of(&records, kind);
                let visions = visions_of(&records, kind);
                ui.label(format!(
                    "{}: avg speed {}, avg vision {}",
                    kind.label(),
                    format_average(average(&speeds)),
                    format_average(average(&visions)),
                ));
            }

            egui::CollapsingHeader::new("Speed histogram")
                .default_open(true)
                .show(ui, |ui| {
                    let speeds = speeds_of(&records, CreatureType::Speed);
                    draw_histogram(ui, Histogram::from_values(&speeds), egui::Color32::RED);
                });

            egui::CollapsingHeader::new("Vision histogram")
                .default_open(true)
                .show(ui, |ui| {
                    let visions = visions_of(&records, CreatureType::Intelligence);
                    draw_histogram(ui, Histogram::from_values(&visions), egui::Color32::BLUE);
                });

            egui::CollapsingHeader::new("Hybrid speed vs vision").show(ui, |ui| {
                draw_scatter(ui, &hybrid_scatter(&records));
            });

            egui::CollapsingHeader::new("Population")
                .default_open(true)
                .show(ui, |ui| {
                    draw_population(ui, environment.population_history());
                });
        });
}

fn format_average(value: Option<f32>) -> String {
    value.map_or_else(|| "n/a".to_string(), |value| format!("{:.2}", value))
}

fn draw_histogram(ui: &mut egui::Ui, histogram: Option<Histogram>, color: egui::Color32) {
    let Some(histogram) = histogram else {
        ui.colored_label(egui::Color32::GRAY, "  (no creatures)");
        return;
    };

    let (response, painter) = ui.allocate_painter(CHART_SIZE, egui::Sense::hover());
    let rect = response.rect;
    let bar_width = rect.width() / histogram.bins() as f32;
    let unit_height = rect.height() / histogram.tallest().max(1) as f32;

    for (index, &count) in histogram.counts.iter().enumerate() {
        let left = rect.left() + bar_width * index as f32;
        if count > 0 {
            let bar = egui::Rect::from_min_max(
                egui::pos2(left, rect.bottom() - unit_height * count as f32),
                egui::pos2(left + bar_width, rect.bottom()),
            );
            painter.rect_filled(bar, 0.0, color);
        }
        painter.line_segment(
            [egui::pos2(left + bar_width, rect.top()), egui::pos2(left + bar_width, rect.bottom())],
            egui::Stroke::new(1.0, egui::Color32::WHITE),
        );
    }
    painter.rect_stroke(rect, 0.0, egui::Stroke::new(1.0, egui::Color32::WHITE));

    ui.label(format!(
        "{:.2} .. {:.2} (bin width {:.2})",
        histogram.min,
        histogram.max,
        histogram.bin_width
    ));
}

fn draw_scatter(ui: &mut egui::Ui, points: &[(f32, f32)]) {
    if points.is_empty() {
        ui.colored_label(egui::Color32::GRAY, "  (no hybrids)");
        return;
    }

    let (min_speed, max_speed) = bounds(points.iter().map(|point| point.0));
    let (min_vision, max_vision) = bounds(points.iter().map(|point| point.1));

    let (response, painter) = ui.allocate_painter(CHART_SIZE, egui::Sense::hover());
    let rect = response.rect.shrink(4.0);
    for &(speed, vision) in points {
        let x = rect.left() + rect.width() * normalized(speed, min_speed, max_speed);
        let y = rect.bottom() - rect.height() * normalized(vision, min_vision, max_vision);
        painter.circle_filled(egui::pos2(x, y), 2.5, egui::Color32::from_rgb(204, 0, 204));
    }
    painter.rect_stroke(response.rect, 0.0, egui::Stroke::new(1.0, egui::Color32::WHITE));

    ui.label(format!(
        "speed {:.2} .. {:.2}, vision {:.1} .. {:.1}",
        min_speed, max_speed, min_vision, max_vision
    ));
}

fn draw_population(ui: &mut egui::Ui, history: &[natural_selection::PopulationSnapshot]) {
    let highest = highest_population(history);
    if highest == 0 {
        ui.colored_label(egui::Color32::GRAY, "  (no population yet)");
        return;
    }

    let series = population_series(history);
    let (response, painter) = ui.allocate_painter(CHART_SIZE, egui::Sense::hover());
    let rect = response.rect;
    let bar_width = rect.width() / series.len() as f32;
    let unit_height = rect.height() / highest as f32;

    // Stacked: hybrids on top of intelligence on top of speed.
    let layers = |counts: &SpeciesCounts| {
        [
            (counts.total(), egui::Color32::from_rgb(255, 0, 255)),
            (counts.speed + counts.intelligence, egui::Color32::BLUE),
            (counts.speed, egui::Color32::RED),
        ]
    };

    for (index, counts) in series.iter().enumerate() {
        let left = rect.left() + bar_width * index as f32;
        for (height, color) in layers(counts) {
            if height == 0 {
                continue;
            }
            let bar = egui::Rect::from_min_max(
                egui::pos2(left, rect.bottom() - unit_height * height as f32),
                egui::pos2(left + bar_width, rect.bottom()),
            );
            painter.rect_filled(bar, 0.0, color);
        }
        if series.len() < POPULATION_SEPARATOR_LIMIT {
            painter.line_segment(
                [egui::pos2(left + bar_width, rect.top()), egui::pos2(left + bar_width, rect.bottom())],
                egui::Stroke::new(1.0, egui::Color32::WHITE),
            );
        }
    }
    painter.rect_stroke(rect, 0.0, egui::Stroke::new(1.0, egui::Color32::WHITE));
    ui.label(format!("Peak population: {}", highest));
}

fn bounds(values: impl Iterator<Item = f32>) -> (f32, f32) {
    values.fold((f32::INFINITY, f32::NEG_INFINITY), |(low, high), value| {
        (low.min(value), high.max(value))
    })
}

fn normalized(value: f32, min: f32, max: f32) -> f32 {
    if max > min { (value - min) / (max - min) } else { 0.5 }
}
