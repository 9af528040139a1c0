use bevy::color::Alpha;
use bevy::math::Isometry2d;
use bevy::prelude::*;

use natural_selection::{Arena, Environment};

const FOOD_LAYER: f32 = 0.0;
const CREATURE_LAYER: f32 = 1.0;

/// Shared unit circle; sprites scale it to their radius.
#[derive(Resource)]
pub struct SpriteAssets {
    circle: Handle<Mesh>,
}

/// Mirrors the creature at this index of the live population.
#[derive(Component)]
pub struct CreatureSprite(usize);

/// Mirrors the food particle at this index of the live food set.
#[derive(Component)]
pub struct FoodSprite(usize);

trait IndexedSprite: Component {
    fn at(index: usize) -> Self;
    fn index(&self) -> usize;
}

impl IndexedSprite for CreatureSprite {
    fn at(index: usize) -> Self {
        Self(index)
    }

    fn index(&self) -> usize {
        self.0
    }
}

impl IndexedSprite for FoodSprite {
    fn at(index: usize) -> Self {
        Self(index)
    }

    fn index(&self) -> usize {
        self.0
    }
}

/// One circle to draw, already in world space.
struct Disc {
    center: Vec2,
    radius: f32,
    color: Color,
}

/// Arena coordinates have y growing downward and an offset origin; the world
/// is centred on the arena with y up.
pub fn to_world(arena: &Arena, point: Vec2) -> Vec2 {
    let center = arena.center();
    Vec2::new(point.x - center.x, center.y - point.y)
}

pub fn setup_sprite_assets(mut commands: Commands, mut meshes: ResMut<Assets<Mesh>>) {
    commands.insert_resource(SpriteAssets {
        circle: meshes.add(Circle::new(1.0)),
    });
}

pub fn sync_creature_sprites(
    mut commands: Commands,
    assets: Res<SpriteAssets>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    environment: Res<Environment>,
    mut sprites: Query<(Entity, &CreatureSprite, &mut Transform, &MeshMaterial2d<ColorMaterial>)>,
) {
    let arena = environment.arena();
    let discs: Vec<Disc> = environment
        .creatures()
        .iter()
        .map(|creature| Disc {
            center: to_world(arena, creature.position),
            radius: creature.radius,
            color: creature.color,
        })
        .collect();
    sync_discs(&mut commands, &assets, &mut materials, &mut sprites, &discs, CREATURE_LAYER);
}

pub fn sync_food_sprites(
    mut commands: Commands,
    assets: Res<SpriteAssets>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    environment: Res<Environment>,
    mut sprites: Query<(Entity, &FoodSprite, &mut Transform, &MeshMaterial2d<ColorMaterial>)>,
) {
    let arena = environment.arena();
    let discs: Vec<Disc> = environment
        .food()
        .iter()
        .map(|food| Disc {
            center: to_world(arena, food.position),
            radius: food.radius,
            color: food.color,
        })
        .collect();
    sync_discs(&mut commands, &assets, &mut materials, &mut sprites, &discs, FOOD_LAYER);
}

/// Updates sprites that still have a disc, despawns the rest and spawns the
/// missing ones. Sprite indices stay contiguous from zero.
fn sync_discs<S: IndexedSprite>(
    commands: &mut Commands,
    assets: &SpriteAssets,
    materials: &mut Assets<ColorMaterial>,
    sprites: &mut Query<(Entity, &S, &mut Transform, &MeshMaterial2d<ColorMaterial>)>,
    discs: &[Disc],
    layer: f32,
) {
    let mut matched = 0;
    for (entity, sprite, mut transform, material) in sprites.iter_mut() {
        let Some(disc) = discs.get(sprite.index()) else {
            commands.entity(entity).despawn();
            continue;
        };
        matched += 1;
        transform.translation = disc.center.extend(layer);
        transform.scale = Vec3::splat(disc.radius);
        if let Some(material) = materials.get_mut(&material.0) {
            material.color = disc.color;
        }
    }

    for (index, disc) in discs.iter().enumerate().skip(matched) {
        commands.spawn((
            S::at(index),
            Mesh2d(assets.circle.clone()),
            MeshMaterial2d(materials.add(ColorMaterial::from_color(disc.color))),
            Transform::from_translation(disc.center.extend(layer)).with_scale(Vec3::splat(disc.radius)),
        ));
    }
}

/// Arena border and each creature's vision ring.
pub fn draw_overlays(mut gizmos: Gizmos, environment: Res<Environment>) {
    let arena = environment.arena();
    gizmos.rect_2d(
        Isometry2d::from_translation(to_world(arena, arena.center())),
        Vec2::new(arena.width, arena.height),
        Color::WHITE,
    );

    for creature in environment.creatures() {
        gizmos.circle_2d(
            Isometry2d::from_translation(to_world(arena, creature.position)),
            creature.vision_radius,
            creature.color.with_alpha(0.35),
        );
    }
}
