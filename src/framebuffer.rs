#[cfg(any(test, not(feature = "sdl")))]
use std::ops::Range;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub(crate) struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const RED: Color = Color::rgb(0xff, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 0x80, 0);
    pub const BROWN: Color = Color::rgb(139, 69, 19);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// scale every channel by `shade` (clamped to 0..=1), rounding down
    pub fn shaded(self, shade: f32) -> Self {
        let shade = shade.clamp(0., 1.);
        let scale = |channel: u8| (channel as f32 * shade).floor() as u8;
        Self::rgb(scale(self.r), scale(self.g), scale(self.b))
    }

    /// perceived brightness in 0..=1
    #[cfg(not(feature = "sdl"))]
    pub fn luma(self) -> f32 {
        (0.299 * self.r as f32 + 0.587 * self.g as f32 + 0.114 * self.b as f32) / 255.
    }
}

#[cfg(feature = "sdl")]
impl From<Color> for sdl2::pixels::Color {
    fn from(color: Color) -> Self {
        sdl2::pixels::Color::RGB(color.r, color.g, color.b)
    }
}

/// A primitive in pixel space, origin top-left, y pointing down.
#[derive(Clone, Copy, PartialEq, Debug)]
pub(crate) enum DrawCommand {
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Color,
    },
    Circle {
        x: f32,
        y: f32,
        r: f32,
        color: Color,
    },
}

/// Pixel output sink the renderer draws into.
pub(crate) trait Framebuffer {
    /// viewport size in pixels
    fn size(&self) -> (u32, u32);

    fn clear(&mut self, color: Color) -> anyhow::Result<()>;

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) -> anyhow::Result<()>;

    fn fill_circle(&mut self, x: f32, y: f32, r: f32, color: Color) -> anyhow::Result<()>;

    fn draw(&mut self, command: &DrawCommand) -> anyhow::Result<()> {
        match *command {
            DrawCommand::Rect { x, y, w, h, color } => self.fill_rect(x, y, w, h, color),
            DrawCommand::Circle { x, y, r, color } => self.fill_circle(x, y, r, color),
        }
    }
}

// pixels in 0..limit whose centres fall inside [start, start + len)
#[cfg(any(test, not(feature = "sdl")))]
fn span(start: f32, len: f32, limit: u32) -> Range<u32> {
    if start.is_nan() || !(len > 0.) {
        return 0..0;
    }

    let lo = (start - 0.5).ceil().max(0.);
    let hi = (start + len - 0.5).ceil().min(limit as f32);
    if hi <= lo {
        0..0
    } else {
        lo as u32..hi as u32
    }
}

/// software framebuffer
#[cfg(any(test, not(feature = "sdl")))]
#[derive(Clone, PartialEq, Debug)]
pub(crate) struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

#[cfg(any(test, not(feature = "sdl")))]
impl PixelBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::BLACK; width as usize * height as usize],
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    fn fill_span(&mut self, y: u32, cols: Range<u32>, color: Color) {
        let row = y as usize * self.width as usize;
        self.pixels[row + cols.start as usize..row + cols.end as usize].fill(color);
    }
}

#[cfg(any(test, not(feature = "sdl")))]
impl Framebuffer for PixelBuffer {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Color) -> anyhow::Result<()> {
        self.pixels.fill(color);
        Ok(())
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) -> anyhow::Result<()> {
        let cols = span(x, w, self.width);
        if cols.is_empty() {
            return Ok(());
        }
        for row in span(y, h, self.height) {
            self.fill_span(row, cols.clone(), color);
        }
        Ok(())
    }

    fn fill_circle(&mut self, x: f32, y: f32, r: f32, color: Color) -> anyhow::Result<()> {
        for row in span(y - r, 2. * r, self.height) {
            let dy = row as f32 + 0.5 - y;
            let half = (r * r - dy * dy).sqrt();
            if half.is_nan() {
                continue;
            }
            let cols = span(x - half, 2. * half, self.width);
            self.fill_span(row, cols, color);
        }
        Ok(())
    }
}
