use crate::map::Map;
use glam::Vec2;

/// Move a circular body of `radius` by `delta`, resolving each axis on its own.
///
/// The x displacement is taken only when both probes `(x ± radius, pos.y)` land
/// on open tiles. The y displacement is then probed from the possibly updated x,
/// so a diagonal move into a corner can still slide along one wall.
pub(crate) fn attempt_move(map: &Map, pos: Vec2, delta: Vec2, radius: f32) -> Vec2 {
    let mut pos = pos;
    let new_x = pos.x + delta.x;
    let new_y = pos.y + delta.y;

    if !map.is_wall(Vec2::new(new_x - radius, pos.y))
        && !map.is_wall(Vec2::new(new_x + radius, pos.y))
    {
        pos.x = new_x;
    }

    if !map.is_wall(Vec2::new(pos.x, new_y - radius))
        && !map.is_wall(Vec2::new(pos.x, new_y + radius))
    {
        pos.y = new_y;
    }

    pos
}
