use crate::framebuffer::Color;
use crate::ray::RayMarch;
use glam::Vec2;
use std::f32::consts::FRAC_PI_4;

/// Startup configuration. Built once and never changed while running.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Config {
    /// world units per tile, unless the map declares its own
    pub tile_size: f32,
    pub width: u32,
    pub height: u32,
    /// field of view in radians
    pub fov: f32,
    /// rays give up after travelling this far
    pub max_ray: f32,
    /// distances are capped here before projection, and fog is total here
    pub max_projection: f32,
    /// numerator constant of the height projection, in pixels per tile
    pub projection_scale: f32,
    pub ray_march: RayMarch,

    // player
    pub spawn: Vec2,
    pub spawn_direction: f32,
    /// world units per tick
    pub speed: f32,
    pub radius: f32,
    /// radians per tick
    pub turn_rate: f32,

    // minimap
    /// world units per minimap pixel
    pub minimap_scale: f32,
    pub show_minimap: bool,

    /// simulation ticks per second
    pub tick_rate: u32,
    /// most ticks run to catch up in one frame
    pub max_substeps: u32,

    pub wall_color: Color,
    pub floor_color: Color,
    pub ceiling_color: Color,
    pub minimap_wall_color: Color,
    pub minimap_player_color: Color,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tile_size: 80.,
            width: 800,
            height: 500,
            fov: FRAC_PI_4,
            max_ray: 300.,
            max_projection: 500.,
            projection_scale: 300.,
            ray_march: RayMarch::Step,

            spawn: Vec2::new(150., 150.),
            spawn_direction: 0.,
            speed: 2.,
            radius: 10.,
            turn_rate: 0.05,

            minimap_scale: 8.,
            show_minimap: true,

            tick_rate: 60,
            max_substeps: 8,

            wall_color: Color::BROWN,
            floor_color: Color::GREEN,
            ceiling_color: Color::BLACK,
            minimap_wall_color: Color::WHITE,
            minimap_player_color: Color::RED,
        }
    }
}
