use crate::config::Config;
use crate::framebuffer::{Color, DrawCommand};
use crate::map::Map;
use crate::player::Player;
use crate::ray::{RayCast, RayMarch};

/// corrected distances are clamped to this before dividing
pub(crate) const MIN_DISTANCE: f32 = 1e-3;

/// One screen column: a wall strip centred vertically with floor below it.
#[derive(Clone, Copy, PartialEq, Debug)]
pub(crate) struct ColumnCommand {
    pub x: u32,
    pub wall_top: f32,
    pub wall_height: f32,
    pub wall_color: Color,
    pub floor_height: f32,
    pub floor_color: Color,
}

impl ColumnCommand {
    pub fn draw_commands(&self) -> [DrawCommand; 2] {
        [
            DrawCommand::Rect {
                x: self.x as f32,
                y: self.wall_top,
                w: 1.,
                h: self.wall_height,
                color: self.wall_color,
            },
            DrawCommand::Rect {
                x: self.x as f32,
                y: self.wall_top + self.wall_height,
                w: 1.,
                h: self.floor_height,
                color: self.floor_color,
            },
        ]
    }
}

/// Scale a raw ray length by the cosine of its offset from the view direction,
/// after capping it at `max_projection`.
pub(crate) fn correct_fisheye(
    distance: f32,
    ray_angle: f32,
    facing: f32,
    max_projection: f32,
) -> f32 {
    distance.min(max_projection) * (ray_angle - facing).cos()
}

pub(crate) fn wall_height(
    corrected: f32,
    tile_size: f32,
    scale: f32,
    viewport_height: f32,
) -> f32 {
    ((tile_size * scale) / corrected.max(MIN_DISTANCE)).min(viewport_height)
}

/// linear fog: 1 at the eye, 0 at `max_projection` and beyond
pub(crate) fn shade(corrected: f32, max_projection: f32) -> f32 {
    (1. - corrected / max_projection).clamp(0., 1.)
}

/// Turns a player pose into per-column wall/floor strips.
#[derive(Clone, Copy, PartialEq, Debug)]
pub(crate) struct Projector {
    pub fov: f32,
    pub max_ray: f32,
    pub max_projection: f32,
    pub projection_scale: f32,
    pub wall_color: Color,
    pub floor_color: Color,
    pub march: RayMarch,
}

impl Projector {
    pub fn new(config: &Config) -> Self {
        Self {
            fov: config.fov,
            max_ray: config.max_ray,
            max_projection: config.max_projection,
            projection_scale: config.projection_scale,
            wall_color: config.wall_color,
            floor_color: config.floor_color,
            march: config.ray_march,
        }
    }

    /// Cast one ray per column across the field of view. Nothing is retained between
    /// calls; iterating again recasts every ray.
    pub fn project<'a>(
        &'a self,
        map: &'a Map,
        player: &'a Player,
        width: u32,
        height: u32,
    ) -> impl Iterator<Item = ColumnCommand> + Clone + 'a {
        let ray_delta = self.fov / width as f32;
        let first = player.direction - self.fov / 2.;

        (0..width).map(move |x| {
            let angle = first + x as f32 * ray_delta;
            let ray = self.march.cast(map, player.pos, angle, self.max_ray);
            self.column(x, ray, player.direction, map.tile_size, height as f32)
        })
    }

    pub fn column(
        &self,
        x: u32,
        ray: RayCast,
        facing: f32,
        tile_size: f32,
        viewport_height: f32,
    ) -> ColumnCommand {
        let corrected = correct_fisheye(ray.distance, ray.angle, facing, self.max_projection);
        let line_height =
            wall_height(corrected, tile_size, self.projection_scale, viewport_height);
        let wall_top = viewport_height / 2. - line_height / 2.;

        ColumnCommand {
            x,
            wall_top,
            wall_height: line_height,
            wall_color: self.wall_color.shaded(shade(corrected, self.max_projection)),
            floor_height: (viewport_height - wall_top - line_height).max(0.),
            floor_color: self.floor_color,
        }
    }
}
