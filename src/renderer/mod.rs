//! Draw boundary
//!
//! Entities describe themselves as [`DrawCommand`]s in screen space; a backend
//! implementing [`DrawTarget`] turns them into pixels. [`DrawList`] simply
//! records the commands (headless runs and tests).

use glam::Vec2;

use crate::sim::{Entity, Kind, World};

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.086, 0.184, 0.294, 1.0];
    pub const SINGULARITY: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const BULLET: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const TURRET_BASE: [f32; 4] = [0.39, 0.39, 0.39, 1.0];
    pub const PARTICLE: [f32; 4] = [0.97, 0.91, 0.75, 1.0];
    pub const HIT_TINT: [f32; 4] = [1.0, 0.2, 0.2, 1.0];
    pub const SAFE_ZONE: [f32; 4] = [0.2, 0.8, 0.4, 0.25];
    pub const NO_FLY_ZONE: [f32; 4] = [0.9, 0.2, 0.2, 0.25];
    pub const TEXT: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
}

/// One primitive, positioned in screen space
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Circle {
        center: Vec2,
        radius: f32,
        color: [f32; 4],
    },
    Rect {
        min: Vec2,
        max: Vec2,
        color: [f32; 4],
    },
    /// Asset-backed shape; the asset data is opaque to the core
    Sprite {
        asset: String,
        view_box: String,
        center: Vec2,
        half_extents: Vec2,
        angle: f32,
        tint: Option<[f32; 4]>,
    },
    Text {
        position: Vec2,
        text: String,
        color: [f32; 4],
    },
}

/// Rendering backend
pub trait DrawTarget {
    fn submit(&mut self, command: DrawCommand);
}

/// Backend that records commands in order
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawTarget for DrawList {
    fn submit(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

/// Something that can describe itself to a draw target
pub trait Drawable {
    /// `camera` is the world-space top-left of the screen
    fn draw(&self, camera: Vec2, target: &mut dyn DrawTarget);
}

impl Drawable for Entity {
    fn draw(&self, camera: Vec2, target: &mut dyn DrawTarget) {
        for particle in &self.emitter.particles {
            let mut color = colors::PARTICLE;
            color[3] = particle.alpha();
            target.submit(DrawCommand::Circle {
                center: particle.position - camera,
                radius: particle.size / 2.0,
                color,
            });
        }

        let center = self.position - camera;
        match self.kind {
            Kind::Explosion => {}
            Kind::Singularity => target.submit(DrawCommand::Circle {
                center,
                radius: self.radius,
                color: colors::SINGULARITY,
            }),
            Kind::Bullet => target.submit(DrawCommand::Circle {
                center,
                radius: self.radius,
                color: colors::BULLET,
            }),
            Kind::Turret => target.submit(DrawCommand::Circle {
                center,
                radius: self.radius,
                color: colors::TURRET_BASE,
            }),
            Kind::SafeZone | Kind::NoFlyZone => target.submit(DrawCommand::Rect {
                min: center - self.half_extents,
                max: center + self.half_extents,
                color: if self.kind == Kind::SafeZone {
                    colors::SAFE_ZONE
                } else {
                    colors::NO_FLY_ZONE
                },
            }),
            _ => {
                let Some(skin) = &self.skin else {
                    return;
                };
                let tinted = self.pilot.as_ref().is_some_and(|p| p.tint_ticks > 0);
                target.submit(DrawCommand::Sprite {
                    asset: skin.asset.clone(),
                    view_box: skin.view_box.clone(),
                    center,
                    half_extents: self.half_extents,
                    angle: self.angle,
                    tint: tinted.then_some(colors::HIT_TINT),
                });
            }
        }
    }
}

/// Draw one frame: on-screen entities, singularities, the craft, the pointer
/// and the endgame banner
pub fn draw_world(world: &World, target: &mut dyn DrawTarget) {
    let camera = world.screen_top_left;

    for id in &world.objects_on_screen {
        if let Some(entity) = world.get(*id) {
            entity.draw(camera, target);
        }
    }
    for singularity in &world.singularities {
        singularity.draw(camera, target);
    }
    if let Some(craft) = world.craft() {
        craft.draw(camera, target);
    }

    match world.endgame {
        Some(endgame) => target.submit(DrawCommand::Text {
            position: world.viewport / 2.0,
            text: endgame.message().to_string(),
            color: colors::TEXT,
        }),
        None => {
            if let Some(pointer) = &world.pointer {
                pointer.draw(camera, target);
            }
        }
    }
}
