use crate::collision::attempt_move;
use crate::config::Config;
use crate::map::Map;
use glam::Vec2;

/// Snapshot of the held movement commands for one tick.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub(crate) struct InputState {
    pub forward: bool,
    pub backward: bool,
    pub turn_left: bool,
    pub turn_right: bool,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub(crate) struct Player {
    pub pos: Vec2,
    /// facing in radians, never wrapped
    pub direction: f32,
    pub speed: f32,
    pub radius: f32,
    pub turn_rate: f32,
}

impl Player {
    pub fn new(config: &Config, pos: Vec2, direction: f32) -> Self {
        Self {
            pos,
            direction,
            speed: config.speed,
            radius: config.radius,
            turn_rate: config.turn_rate,
        }
    }

    fn step(&self) -> Vec2 {
        Vec2::from_angle(self.direction) * self.speed
    }

    /// Apply one tick of input. Forward and backward are resolved as two separate
    /// moves in that order, so holding both does not simply cancel out against a wall.
    /// Turning uses the facing after movement and does not affect this tick's moves.
    pub fn tick(&mut self, map: &Map, input: InputState) {
        if input.forward {
            self.pos = attempt_move(map, self.pos, self.step(), self.radius);
        }
        if input.backward {
            self.pos = attempt_move(map, self.pos, -self.step(), self.radius);
        }

        if input.turn_left {
            self.direction -= self.turn_rate;
        }
        if input.turn_right {
            self.direction += self.turn_rate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::tests::level;

    fn spawn() -> Player {
        Player::new(&Config::default(), Vec2::new(150., 150.), 0.)
    }

    #[test]
    fn turn_left_only_rotates() {
        let map = level();
        let mut player = spawn();
        player.tick(
            &map,
            InputState {
                turn_left: true,
                ..Default::default()
            },
        );
        assert_eq!(player.direction, -0.05);
        assert_eq!(player.pos, Vec2::new(150., 150.));
    }

    #[test]
    fn opposite_turns_cancel() {
        let map = level();
        let mut player = spawn();
        player.tick(
            &map,
            InputState {
                turn_left: true,
                turn_right: true,
                ..Default::default()
            },
        );
        assert_eq!(player.direction, 0.);
    }

    #[test]
    fn forward_moves_along_facing() {
        let map = level();
        let mut player = spawn();
        player.tick(
            &map,
            InputState {
                forward: true,
                ..Default::default()
            },
        );
        assert!((player.pos - Vec2::new(152., 150.)).length() < 1e-4);
        assert_eq!(player.direction, 0.);
    }

    #[test]
    fn backward_moves_against_facing() {
        let map = level();
        let mut player = spawn();
        player.tick(
            &map,
            InputState {
                backward: true,
                ..Default::default()
            },
        );
        assert!((player.pos - Vec2::new(148., 150.)).length() < 1e-4);
    }

    #[test]
    fn facing_is_not_wrapped() {
        let map = level();
        let mut player = spawn();
        let input = InputState {
            turn_left: true,
            ..Default::default()
        };
        for _ in 0..200 {
            player.tick(&map, input);
        }
        assert!(player.direction < -6.3);
    }

    // Forward and backward held together are two sequential moves rather than a
    // cancelled one. Against the east wall forward is blocked but backward still applies.
    #[test]
    fn forward_and_backward_resolve_sequentially() {
        let map = level();
        let mut player = Player::new(&Config::default(), Vec2::new(629., 120.), 0.);
        player.tick(
            &map,
            InputState {
                forward: true,
                backward: true,
                ..Default::default()
            },
        );
        assert_eq!(player.pos, Vec2::new(627., 120.));

        let mut open = spawn();
        open.tick(
            &map,
            InputState {
                forward: true,
                backward: true,
                ..Default::default()
            },
        );
        assert_eq!(open.pos, Vec2::new(150., 150.));
    }
}
