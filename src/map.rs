//! World definition
//!
//! A map is a flat list of already-parsed shape records. Circles are point
//! markers selected by their `kind` attribute, polygons are ordered target
//! chains and rects are area volumes. Map coordinates become world
//! coordinates as `map * unit - offset`.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::radians;
use crate::settings::Settings;
use crate::sim::{EntityId, Kind, World};

/// One shape record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapElement {
    /// Shape tag: `circle`, `polygon` or `rect`
    pub tag: String,
    #[serde(default)]
    pub attributes: HashMap<String, String>,
}

impl MapElement {
    pub fn new(tag: &str, attributes: &[(&str, &str)]) -> Self {
        Self {
            tag: tag.to_string(),
            attributes: attributes
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    fn attribute(&self, name: &str) -> Result<&str> {
        self.attributes
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| Error::MissingAttribute {
                tag: self.tag.clone(),
                attribute: name.to_string(),
            })
    }

    fn number(&self, name: &str) -> Result<f32> {
        let value = self.attribute(name)?;
        parse_number(name, value)
    }

    fn number_or(&self, name: &str, default: f32) -> Result<f32> {
        match self.attributes.get(name) {
            Some(value) => parse_number(name, value),
            None => Ok(default),
        }
    }

    fn unknown_kind(&self, kind: &str) -> Error {
        Error::UnknownKind {
            tag: self.tag.clone(),
            kind: kind.to_string(),
        }
    }
}

fn parse_number(attribute: &str, value: &str) -> Result<f32> {
    value.trim().parse().map_err(|_| Error::InvalidNumber {
        attribute: attribute.to_string(),
        value: value.to_string(),
    })
}

/// Parse an SVG-style `points` list ("x1,y1 x2,y2 ..." or "x1 y1 x2 y2 ...")
pub fn parse_points(points: &str) -> Result<Vec<Vec2>> {
    let numbers = points
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<f32>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|_| Error::InvalidPoints(points.to_string()))?;
    if numbers.is_empty() || numbers.len() % 2 != 0 {
        return Err(Error::InvalidPoints(points.to_string()));
    }
    Ok(numbers.chunks_exact(2).map(|p| Vec2::new(p[0], p[1])).collect())
}

/// Declarative initial layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapDefinition {
    /// World units per map unit
    #[serde(default = "default_unit")]
    pub unit: f32,
    /// Subtracted after scaling
    #[serde(default)]
    pub offset: Vec2,
    pub elements: Vec<MapElement>,
}

fn default_unit() -> f32 {
    1.0
}

impl MapDefinition {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let map = Self::from_json(&fs::read_to_string(path)?)?;
        log::info!("Loaded map {} ({} elements)", path.display(), map.elements.len());
        Ok(map)
    }

    pub fn to_world(&self, point: Vec2) -> Vec2 {
        point * self.unit - self.offset
    }
}

/// Build a fresh world from a map definition.
///
/// Targets are queued on the craft in the order they appear. Every other
/// entity waits in the store until the camera window picks it up.
pub fn build_world(map: &MapDefinition, settings: &Settings) -> Result<World> {
    let mut world = World::new(settings.tuning(), settings.seed);
    world.storm_interval_ms = settings.storm_interval_ms;

    let mut start = None;
    let mut targets: Vec<EntityId> = Vec::new();

    for element in &map.elements {
        match element.tag.as_str() {
            "circle" => {
                let position = map.to_world(Vec2::new(element.number("cx")?, element.number("cy")?));
                let kind = element.attribute("kind")?;
                let factory = &world.factory;
                let entity = match kind {
                    "start" => {
                        start = Some(position);
                        continue;
                    }
                    "enemy" => {
                        let angle = radians(element.number_or("angle", 0.0)?);
                        factory.create_enemy_craft(position, angle)
                    }
                    "mine" => factory.create_mine(position),
                    "asteroid" => factory.create_default_rock(position),
                    "target" => factory.create_target(position),
                    "power-up" => factory.create_power_up(position, 0.0),
                    "singularity" => factory.create_singularity(position),
                    "turret" => factory.create_turret(position),
                    other => return Err(element.unknown_kind(other)),
                };
                let id = world.add(entity);
                if kind == "target" {
                    targets.push(id);
                }
            }
            "polygon" => {
                for point in parse_points(element.attribute("points")?)? {
                    let target = world.factory.create_target(map.to_world(point));
                    targets.push(world.add(target));
                }
            }
            "rect" => {
                let top_left = map.to_world(Vec2::new(element.number("x")?, element.number("y")?));
                let extent = Vec2::new(element.number("width")?, element.number("height")?) * map.unit;
                let kind = match element.attribute("kind")? {
                    "safe-zone" => Kind::SafeZone,
                    "no-fly-zone" => Kind::NoFlyZone,
                    "decoration" => Kind::Decoration,
                    other => return Err(element.unknown_kind(other)),
                };
                let zone = world.factory.create_zone(kind, top_left, extent);
                world.add(zone);
            }
            other => log::debug!("Skipping map element <{other}>"),
        }
    }

    let start = start.ok_or(Error::MissingStart)?;
    let craft = world.factory.create_craft(start);
    world.set_craft(craft, targets);
    world.reset_camera();
    world.update_pointer();

    log::info!(
        "World built: {} bodies, {} singularities, {} on screen",
        world.coordinates.len(),
        world.singularities.len(),
        world.objects_on_screen.len()
    );
    Ok(world)
}
