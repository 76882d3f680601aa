use crate::config::Config;
use crate::framebuffer::{Color, Framebuffer};
use crate::game::{Command, FixedStep, Game, GameState};
use crate::player::InputState;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;
use std::collections::HashSet;
use std::time::{Duration, Instant};

const TARGET_FPS: u64 = 60;

// helper trait to convert strings into std::error types
trait StringToAnyhow<T> {
    fn ah(self) -> anyhow::Result<T>;
}

impl<T> StringToAnyhow<T> for Result<T, String> {
    fn ah(self) -> anyhow::Result<T> {
        self.map_err(|err| anyhow::anyhow!("{err}"))
    }
}

impl Framebuffer for Canvas<Window> {
    fn size(&self) -> (u32, u32) {
        self.window().size()
    }

    fn clear(&mut self, color: Color) -> anyhow::Result<()> {
        self.set_draw_color(color);
        Canvas::clear(self);
        Ok(())
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) -> anyhow::Result<()> {
        let (x0, y0) = (x.round(), y.round());
        let (x1, y1) = ((x + w).round(), (y + h).round());
        if x1 <= x0 || y1 <= y0 {
            return Ok(());
        }

        self.set_draw_color(color);
        Canvas::fill_rect(
            self,
            Rect::new(x0 as i32, y0 as i32, (x1 - x0) as u32, (y1 - y0) as u32),
        )
        .ah()
    }

    fn fill_circle(&mut self, x: f32, y: f32, r: f32, color: Color) -> anyhow::Result<()> {
        // one horizontal span per scanline
        let rects = ((y - r).floor() as i32..=(y + r).ceil() as i32)
            .filter_map(|row| {
                let dy = row as f32 + 0.5 - y;
                let half = (r * r - dy * dy).sqrt();
                let (x0, x1) = ((x - half).round(), (x + half).round());
                (x1 > x0).then(|| Rect::new(x0 as i32, row, (x1 - x0) as u32, 1))
            })
            .collect::<Vec<_>>();

        self.set_draw_color(color);
        self.fill_rects(&rects).ah()
    }
}

/// held keys → movement snapshot; arrows and WASD both work
fn input_state(keys: &HashSet<Keycode>) -> InputState {
    let held = |a: Keycode, b: Keycode| keys.contains(&a) || keys.contains(&b);
    InputState {
        forward: held(Keycode::Up, Keycode::W),
        backward: held(Keycode::Down, Keycode::S),
        turn_left: held(Keycode::Left, Keycode::A),
        turn_right: held(Keycode::Right, Keycode::D),
    }
}

fn command(key: Keycode) -> Option<Command> {
    match key {
        Keycode::Escape | Keycode::P => Some(Command::TogglePause),
        Keycode::M => Some(Command::ToggleMinimap),
        Keycode::Q => Some(Command::Quit),
        _ => None,
    }
}

pub(crate) fn run(config: &Config, mut game: Game) -> anyhow::Result<()> {
    // sdl boilerplate
    log::info!("initializing sdl2");
    let sdl_ctx = sdl2::init().ah()?;
    log::info!("initializing video");
    let video = sdl_ctx.video().ah()?;

    log::info!("initializing window");
    let mut window = video
        .window("raycast", config.width, config.height)
        .position_centered()
        .build()?;
    window.set_resizable(false);
    log::info!("creating canvas");
    let mut canvas = window.into_canvas().build()?;
    log::info!("pumping events");
    let mut events = sdl_ctx.event_pump().ah()?;

    let mut keys = HashSet::new();
    let mut clock = FixedStep::new(config.tick_rate, config.max_substeps);
    let delta = Duration::from_millis(1_000 / TARGET_FPS);
    let mut last = Instant::now();

    'main_loop: loop {
        let prev = Instant::now();

        // handle events
        for ev in events.poll_iter() {
            match ev {
                Event::Quit { .. } => break 'main_loop,
                Event::KeyDown {
                    keycode: Some(k),
                    repeat,
                    ..
                } => {
                    keys.insert(k);

                    if !repeat {
                        match command(k) {
                            Some(command) => game.command(command),
                            None => log::debug!("no command bound to {k:?}"),
                        }
                    }
                }
                Event::KeyUp {
                    keycode: Some(k), ..
                } => {
                    keys.remove(&k);
                }
                _ => {}
            }
        }

        if game.game_state == GameState::Exit {
            break;
        }

        // simulate
        let input = input_state(&keys);
        let now = Instant::now();
        for _ in 0..clock.advance(now - last) {
            game.advance(input);
        }
        last = now;

        // draw game
        if let Err(err) = game.render(&mut canvas) {
            log::error!("error while in game state {:?}: {err}", game.game_state);
            return Err(err);
        }
        canvas.present();

        let diff = prev.elapsed();
        if diff < delta {
            std::thread::sleep(delta - diff);
        }
    }

    log::info!("exiting after {} ticks", game.ticks);
    Ok(())
}
