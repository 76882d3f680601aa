use anyhow::Context;
use glam::Vec2;
use std::collections::HashMap;
use std::fs::read_to_string;
use std::path::Path;

/// level compiled into the binary, used when no map path is given
pub(crate) const DEFAULT_LEVEL: &str = include_str!("../map/default.map");

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Tile {
    Empty,
    Wall,
}

/// player start pose as declared by a map file
#[derive(Clone, Copy, PartialEq, Debug)]
pub(crate) struct Spawn {
    pub pos: Vec2,
    pub direction: f32,
}

/// Static occupancy grid. Row-major, `width` columns by `height` rows, each
/// tile covering `tile_size` world units on a side.
#[derive(Clone, PartialEq, Debug)]
pub(crate) struct Map {
    pub width: usize,
    pub height: usize,
    pub tile_size: f32,
    pub tiles: Vec<Tile>,
    pub spawn: Option<Spawn>,
}

fn param(params: &HashMap<&str, &str>, key: &str) -> anyhow::Result<f32> {
    let raw = params
        .get(key)
        .with_context(|| format!("missing parameter: {key}"))?;
    raw.trim()
        .parse()
        .with_context(|| format!("invalid value for {key}: {raw}"))
}

impl Map {
    pub fn load(name: &Path, tile_size: f32) -> anyhow::Result<Self> {
        log::info!("loading map at {}", name.display());
        let file = read_to_string(name)
            .with_context(|| format!("could not read map {}", name.display()))?;
        Self::parse(&file, tile_size)
    }

    /// parse a map from source text; `tile_size` applies unless the META section overrides it
    pub fn parse(src: &str, tile_size: f32) -> anyhow::Result<Self> {
        if tile_size <= 0. {
            anyhow::bail!("tile size must be positive, got {tile_size}");
        }

        let mut lines = src.lines();
        let mut this = Self {
            width: 0,
            height: 0,
            tile_size,
            tiles: vec![],
            spawn: None,
        };

        while let Some(line) = lines.by_ref().next() {
            match line.trim_end() {
                "" => continue,
                "!!!!META" => this.parse_meta(&mut lines)?,
                "!!!!MAIN" => this.parse_main(&mut lines)?,
                other => anyhow::bail!("unrecognized directive: {other}"),
            }
        }

        if this.tiles.is_empty() {
            anyhow::bail!("map has no tiles");
        }

        Ok(this)
    }

    fn parse_meta<'lines>(
        &mut self,
        mut lines: impl Iterator<Item = &'lines str>,
    ) -> anyhow::Result<()> {
        for line in lines.by_ref() {
            let line = line.trim_end();
            if line.is_empty() {
                break;
            }

            let mut chunks = line.split(',');
            let directive = chunks.by_ref().next().context("empty meta line")?;
            let params = chunks
                .map(|param| param.split_once('='))
                .collect::<Option<HashMap<_, _>>>()
                .context("incorrectly formatted meta")?;
            match directive {
                "tile" => {
                    let size = param(&params, "size")?;
                    if !(size > 0.) {
                        anyhow::bail!("tile size must be positive, got {size}");
                    }
                    self.tile_size = size;
                }
                "spawn" => {
                    self.spawn = Some(Spawn {
                        pos: Vec2::new(param(&params, "x")?, param(&params, "y")?),
                        direction: if params.contains_key("angle") {
                            param(&params, "angle")?
                        } else {
                            0.
                        },
                    });
                }
                other => anyhow::bail!("unrecognized meta directive: {other}"),
            }
        }

        Ok(())
    }

    fn parse_main<'lines>(
        &mut self,
        mut lines: impl Iterator<Item = &'lines str>,
    ) -> anyhow::Result<()> {
        let mut width = None;
        let mut height = 0;
        let mut tiles = vec![];
        for line in lines.by_ref() {
            let line = line.trim_end_matches('\r');
            if line.is_empty() {
                break;
            }

            height += 1;
            let mut row_width = 0;
            for tile in line.chars() {
                tiles.push(match tile {
                    '1' | '#' => Tile::Wall,
                    '0' | '.' | ' ' => Tile::Empty,
                    other => anyhow::bail!("invalid tile in map row {height}: {other:?}"),
                });
                row_width += 1;
            }

            match width {
                None => width = Some(row_width),
                Some(w) if w != row_width => {
                    anyhow::bail!("map row {height} has {row_width} tiles, expected {w}")
                }
                Some(_) => {}
            }
        }

        self.width = width.unwrap_or(0);
        self.height = height;
        self.tiles = tiles;

        Ok(())
    }

    /// Solidity of the tile under a world position. Anything outside the grid is solid.
    pub fn is_wall(&self, pos: Vec2) -> bool {
        let col = (pos.x / self.tile_size).floor();
        let row = (pos.y / self.tile_size).floor();
        self.is_wall_cell(col as i64, row as i64)
    }

    pub fn is_wall_cell(&self, col: i64, row: i64) -> bool {
        if col < 0 || row < 0 || col >= self.width as i64 || row >= self.height as i64 {
            return true;
        }
        self.tiles[row as usize * self.width + col as usize] == Tile::Wall
    }

    pub fn idx_to_cell(&self, idx: usize) -> (usize, usize) {
        (idx % self.width, idx / self.width)
    }

    /// world coordinates of a cell's top-left corner
    pub fn cell_origin(&self, col: usize, row: usize) -> Vec2 {
        Vec2::new(col as f32 * self.tile_size, row as f32 * self.tile_size)
    }

    /// `(col, row)` of every wall tile, row-major
    pub fn walls(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, tile)| **tile == Tile::Wall)
            .map(|(idx, _)| self.idx_to_cell(idx))
    }

    pub fn world_size(&self) -> Vec2 {
        Vec2::new(
            self.width as f32 * self.tile_size,
            self.height as f32 * self.tile_size,
        )
    }
}
