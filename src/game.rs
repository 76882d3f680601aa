use crate::config::Config;
use crate::framebuffer::{Color, Framebuffer};
use crate::map::Map;
use crate::minimap::Minimap;
use crate::player::{InputState, Player};
use crate::scene::Projector;
use std::time::Duration;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum GameState {
    Playing,
    Paused,
    Exit,
}

/// one-shot commands, as opposed to the held movement in `InputState`
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Command {
    TogglePause,
    ToggleMinimap,
    Quit,
}

/// Owns the world and runs one update + render cycle per tick.
pub(crate) struct Game {
    map: Map,
    pub player: Player,
    pub game_state: GameState,
    pub show_minimap: bool,
    projector: Projector,
    minimap: Minimap,
    ceiling_color: Color,
    pub ticks: u64,
}

impl Game {
    /// initialize game
    pub fn new(config: &Config, map: Map) -> Self {
        let (pos, direction) = match map.spawn {
            Some(spawn) => (spawn.pos, spawn.direction),
            None => (config.spawn, config.spawn_direction),
        };
        if map.is_wall(pos) {
            log::warn!("player spawns inside a wall at ({}, {})", pos.x, pos.y);
        }

        Self {
            map,
            player: Player::new(config, pos, direction),
            game_state: GameState::Playing,
            show_minimap: config.show_minimap,
            projector: Projector::new(config),
            minimap: Minimap::new(config),
            ceiling_color: config.ceiling_color,
            ticks: 0,
        }
    }

    pub fn command(&mut self, command: Command) {
        match command {
            Command::TogglePause => {
                self.game_state = match self.game_state {
                    GameState::Playing => GameState::Paused,
                    GameState::Paused => GameState::Playing,
                    GameState::Exit => GameState::Exit,
                };
                log::debug!("game state now {:?}", self.game_state);
            }
            Command::ToggleMinimap => self.show_minimap = !self.show_minimap,
            Command::Quit => self.game_state = GameState::Exit,
        }
    }

    /// advance the simulation by one tick; a paused game holds still
    pub fn advance(&mut self, input: InputState) {
        if self.game_state != GameState::Playing {
            return;
        }

        self.player.tick(&self.map, input);
        self.ticks += 1;
        log::trace!(
            "tick {}: pos ({:.2}, {:.2}) facing {:.3}",
            self.ticks,
            self.player.pos.x,
            self.player.pos.y,
            self.player.direction
        );
    }

    /// redraw the whole viewport
    pub fn render(&self, fb: &mut impl Framebuffer) -> anyhow::Result<()> {
        let (width, height) = fb.size();
        fb.clear(self.ceiling_color)?;

        let columns = self
            .projector
            .project(&self.map, &self.player, width, height);
        for column in columns {
            for command in column.draw_commands() {
                fb.draw(&command)?;
            }
        }

        if self.show_minimap {
            for command in self.minimap.commands(&self.map, &self.player) {
                fb.draw(&command)?;
            }
        }

        Ok(())
    }

    pub fn tick(&mut self, input: InputState, fb: &mut impl Framebuffer) -> anyhow::Result<()> {
        self.advance(input);
        self.render(fb)
    }
}

/// Fixed-timestep driver: turns elapsed wall-clock time into a number of ticks.
#[derive(Clone, Copy, PartialEq, Debug)]
pub(crate) struct FixedStep {
    step: Duration,
    max_substeps: u32,
    accumulator: Duration,
}

impl FixedStep {
    pub fn new(tick_rate: u32, max_substeps: u32) -> Self {
        Self {
            step: Duration::from_secs(1) / tick_rate.max(1),
            max_substeps: max_substeps.max(1),
            accumulator: Duration::ZERO,
        }
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    /// Add `elapsed` and return how many ticks are due now, at most `max_substeps`.
    /// Any backlog beyond that is dropped.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed;

        let mut due = 0;
        while self.accumulator >= self.step && due < self.max_substeps {
            self.accumulator -= self.step;
            due += 1;
        }

        if self.accumulator >= self.step {
            log::debug!("dropping {:?} of simulation backlog", self.accumulator);
            self.accumulator = Duration::ZERO;
        }

        due
    }
}
