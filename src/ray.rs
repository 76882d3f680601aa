use crate::map::Map;
use glam::Vec2;
use std::str::FromStr;

/// how rays walk the grid
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub(crate) enum RayMarch {
    /// unit-length steps, checking the tile under each sample point
    #[default]
    Step,
    /// exact traversal of tile boundaries
    GridLine,
}

impl FromStr for RayMarch {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "step" => Ok(RayMarch::Step),
            "gridline" | "grid" | "dda" => Ok(RayMarch::GridLine),
            other => anyhow::bail!("unknown ray march mode: {other}"),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub(crate) struct RayCast {
    pub angle: f32,
    pub distance: f32,
}

impl RayMarch {
    pub fn cast(self, map: &Map, origin: Vec2, angle: f32, max_distance: f32) -> RayCast {
        let distance = match self {
            RayMarch::Step => cast(map, origin, angle, max_distance),
            RayMarch::GridLine => cast_exact(map, origin, angle, max_distance),
        };
        RayCast { angle, distance }
    }
}

/// March from `origin` along `angle` one world unit at a time until a solid tile
/// is sampled or `max_distance` has been travelled. The origin itself is never sampled.
pub(crate) fn cast(map: &Map, origin: Vec2, angle: f32, max_distance: f32) -> f32 {
    let max_distance = max_distance.max(0.);
    let step = Vec2::from_angle(angle);
    let mut ray = origin;
    let mut distance = 0.;

    while distance < max_distance {
        ray += step;
        distance += 1.;
        if map.is_wall(ray) {
            break;
        }
    }

    distance.min(max_distance)
}

// (first boundary distance, per-tile distance, cell step) along one axis
fn axis_start(origin: f32, dir: f32, cell: i64, tile: f32) -> (f32, f32, i64) {
    if dir == 0. {
        return (f32::INFINITY, f32::INFINITY, 0);
    }

    let per_tile = tile / dir.abs();
    if dir < 0. {
        ((origin - cell as f32 * tile) / -dir, per_tile, -1)
    } else {
        (((cell + 1) as f32 * tile - origin) / dir, per_tile, 1)
    }
}

/// Walk tile boundaries from `origin` along `angle` and return the distance to the
/// first solid tile entered, saturating at `max_distance`. Starting inside a solid
/// tile yields 0.
pub(crate) fn cast_exact(map: &Map, origin: Vec2, angle: f32, max_distance: f32) -> f32 {
    let max_distance = max_distance.max(0.);
    let tile = map.tile_size;
    let dir = Vec2::from_angle(angle);

    let mut col = (origin.x / tile).floor() as i64;
    let mut row = (origin.y / tile).floor() as i64;
    if map.is_wall_cell(col, row) {
        return 0.;
    }

    let (mut side_x, delta_x, step_col) = axis_start(origin.x, dir.x, col, tile);
    let (mut side_y, delta_y, step_row) = axis_start(origin.y, dir.y, row, tile);

    loop {
        let distance = side_x.min(side_y);
        if distance >= max_distance {
            return max_distance;
        }

        if side_x < side_y {
            col += step_col;
            side_x += delta_x;
        } else {
            row += step_row;
            side_y += delta_y;
        }

        if map.is_wall_cell(col, row) {
            return distance;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::tests::level;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn hits_wall_one_tile_away() {
        let map = level();
        // tile (7, 4) is open; column 8 is the east wall starting at x = 640
        let distance = cast(&map, Vec2::new(560., 360.), 0., 300.);
        assert!((distance - 80.).abs() <= 1., "got {distance}");
        assert_eq!(cast_exact(&map, Vec2::new(560., 360.), 0., 300.), 80.);
    }

    #[test]
    fn open_space_saturates_at_max_distance() {
        let map = level();
        // row 1 is open from x = 80 to x = 640
        assert_eq!(cast(&map, Vec2::new(90., 120.), 0., 300.), 300.);
        assert_eq!(cast_exact(&map, Vec2::new(90., 120.), 0., 300.), 300.);
        assert_eq!(cast(&map, Vec2::new(90., 120.), 0., 12.5), 12.5);
    }

    #[test]
    fn step_overshoots_by_at_most_one_unit() {
        let map = level();
        let origin = Vec2::new(150., 150.);
        for angle in [0., FRAC_PI_2, PI, -FRAC_PI_2] {
            let stepped = cast(&map, origin, angle, 300.);
            let exact = cast_exact(&map, origin, angle, 300.);
            assert!(
                (-1e-3..=1. + 1e-3).contains(&(stepped - exact)),
                "angle {angle}: stepped {stepped}, exact {exact}"
            );
        }
        assert!((70.0..=71.).contains(&cast(&map, origin, PI, 300.)));
        assert!((cast_exact(&map, origin, PI, 300.) - 70.).abs() < 1e-3);
    }

    #[test]
    fn origin_inside_wall() {
        let map = level();
        // tile (2, 2) is a pillar; the first sample is still inside it
        assert_eq!(cast(&map, Vec2::new(160., 160.), 0., 300.), 1.);
        assert_eq!(cast_exact(&map, Vec2::new(160., 160.), 0., 300.), 0.);
    }

    #[test]
    fn march_mode_keeps_angle() {
        let map = level();
        let hit = RayMarch::GridLine.cast(&map, Vec2::new(560., 360.), 0., 300.);
        assert_eq!(
            hit,
            RayCast {
                angle: 0.,
                distance: 80.
            }
        );
        assert_eq!(RayMarch::default(), RayMarch::Step);
        assert_eq!("DDA".parse::<RayMarch>().unwrap(), RayMarch::GridLine);
        assert!("bogus".parse::<RayMarch>().is_err());
    }
}
