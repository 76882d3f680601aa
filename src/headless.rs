use crate::config::Config;
use crate::framebuffer::{Framebuffer, PixelBuffer};
use crate::game::{Command, FixedStep, Game, GameState};
use crate::player::InputState;
use std::io::Write;

/// ticks simulated without a window
const HEADLESS_TICKS: u32 = 120;
const ASCII_COLS: u32 = 100;
const ASCII_ROWS: u32 = 31;
const RAMP: &[u8] = b" .:-=+*#%@";

/// Sample the buffer on a `cols` x `rows` grid and map brightness onto `RAMP`.
pub(crate) fn ascii(fb: &PixelBuffer, cols: u32, rows: u32) -> String {
    let (width, height) = fb.size();
    let mut out = String::with_capacity(((cols + 1) * rows) as usize);

    for row in 0..rows {
        for col in 0..cols {
            let x = ((col as f32 + 0.5) * width as f32 / cols as f32) as u32;
            let y = ((row as f32 + 0.5) * height as f32 / rows as f32) as u32;
            let luma = fb.pixel(x, y).map_or(0., |color| color.luma());
            let idx = (luma * (RAMP.len() - 1) as f32).round() as usize;
            out.push(RAMP[idx.min(RAMP.len() - 1)] as char);
        }
        out.push('\n');
    }

    out
}

/// Walk forward for a fixed number of ticks and print the last frame.
pub(crate) fn run(config: &Config, mut game: Game) -> anyhow::Result<()> {
    log::info!("no window available, running {HEADLESS_TICKS} ticks headless");
    let mut fb = PixelBuffer::new(config.width, config.height);
    let input = InputState {
        forward: true,
        ..Default::default()
    };

    // frames arrive exactly one tick apart on the simulated clock
    let mut clock = FixedStep::new(config.tick_rate, config.max_substeps);
    while game.game_state != GameState::Exit {
        for _ in 0..clock.advance(clock.step()) {
            game.tick(input, &mut fb)?;
        }
        if game.ticks >= u64::from(HEADLESS_TICKS) {
            game.command(Command::Quit);
        }
    }

    log::info!(
        "finished at ({:.1}, {:.1}) facing {:.3}",
        game.player.pos.x,
        game.player.pos.y,
        game.player.direction
    );

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(ascii(&fb, ASCII_COLS, ASCII_ROWS).as_bytes())?;
    stdout.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::Color;
    use crate::map::tests::level;

    #[test]
    fn ascii_maps_brightness() {
        let mut fb = PixelBuffer::new(40, 20);
        fb.clear(Color::WHITE).unwrap();
        fb.fill_rect(0., 10., 40., 10., Color::BLACK).unwrap();

        let art = ascii(&fb, 4, 2);
        assert_eq!(art, "@@@@\n    \n");
    }

    #[test]
    fn headless_frame_has_walls_and_floor() {
        let config = Config::default();
        let mut game = Game::new(&config, level());
        let mut fb = PixelBuffer::new(config.width, config.height);
        game.tick(InputState::default(), &mut fb).unwrap();

        let art = ascii(&fb, ASCII_COLS, ASCII_ROWS);
        assert_eq!(art.lines().count(), ASCII_ROWS as usize);
        assert!(art.lines().all(|line| line.len() == ASCII_COLS as usize));

        // the centre column looks down the open corridor and has floor under its wall
        assert_eq!(fb.pixel(400, 499), Some(Color::GREEN));
        assert_ne!(fb.pixel(400, 250), Some(Color::GREEN));

        // column 700 hits the near face of the (2, 2) pillar, so its wall fills the column
        let pillar = fb.pixel(700, 250).unwrap();
        assert_ne!(pillar, Color::GREEN);
        assert_ne!(pillar, Color::BLACK);
        assert!((0..500).all(|y| fb.pixel(700, y) == Some(pillar)));
    }
}
