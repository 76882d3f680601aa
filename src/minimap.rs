use crate::config::Config;
use crate::framebuffer::{Color, DrawCommand};
use crate::map::Map;
use crate::player::Player;
use std::iter;

/// top-down overlay of the grid, drawn from the top-left corner of the viewport
#[derive(Clone, Copy, PartialEq, Debug)]
pub(crate) struct Minimap {
    /// world units per minimap pixel
    pub scale: f32,
    pub wall_color: Color,
    pub player_color: Color,
}

impl Minimap {
    pub fn new(config: &Config) -> Self {
        Self {
            scale: config.minimap_scale,
            wall_color: config.minimap_wall_color,
            player_color: config.minimap_player_color,
        }
    }

    /// one square per wall tile followed by the player's disc
    pub fn commands<'a>(
        &'a self,
        map: &'a Map,
        player: &'a Player,
    ) -> impl Iterator<Item = DrawCommand> + 'a {
        let size = map.tile_size / self.scale;
        let walls = map.walls().map(move |(col, row)| {
            let corner = map.cell_origin(col, row) / self.scale;
            DrawCommand::Rect {
                x: corner.x,
                y: corner.y,
                w: size,
                h: size,
                color: self.wall_color,
            }
        });

        walls.chain(iter::once(DrawCommand::Circle {
            x: player.pos.x / self.scale,
            y: player.pos.y / self.scale,
            r: player.radius / self.scale,
            color: self.player_color,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::tests::level;
    use glam::Vec2;

    #[test]
    fn walls_then_player() {
        let config = Config::default();
        let map = level();
        let player = Player::new(&config, Vec2::new(150., 150.), 0.);
        let minimap = Minimap::new(&config);
        let commands = minimap.commands(&map, &player).collect::<Vec<_>>();

        assert_eq!(commands.len(), map.walls().count() + 1);
        assert_eq!(
            commands[0],
            DrawCommand::Rect {
                x: 0.,
                y: 0.,
                w: 10.,
                h: 10.,
                color: Color::WHITE
            }
        );
        assert!(commands.contains(&DrawCommand::Rect {
            x: 20.,
            y: 30.,
            w: 10.,
            h: 10.,
            color: Color::WHITE
        }));
        assert_eq!(
            commands.last(),
            Some(&DrawCommand::Circle {
                x: 18.75,
                y: 18.75,
                r: 1.25,
                color: Color::RED
            })
        );
    }

    #[test]
    fn open_tiles_are_not_drawn() {
        let config = Config::default();
        let map = level();
        let player = Player::new(&config, Vec2::new(150., 150.), 0.);
        let minimap = Minimap::new(&config);
        let open_corner = DrawCommand::Rect {
            x: 10.,
            y: 10.,
            w: 10.,
            h: 10.,
            color: Color::WHITE,
        };
        assert!(!minimap.commands(&map, &player).any(|c| c == open_corner));
    }
}
