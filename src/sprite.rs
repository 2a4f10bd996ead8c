//! Character-art sprites.  A sprite's footprint is its longest line by its
//! line count, and that footprint becomes the entity's bounding box.

use std::{fs, path::Path};

use anyhow::{bail, Context};

use crate::entities::Size;

pub const SHIP_SPRITE_PATH: &str = "assets/ship.txt";
pub const ALIEN_SPRITE_PATH: &str = "assets/alien.txt";

#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub rows: Vec<String>,
    pub size: Size,
}

impl Sprite {
    /// Trailing blank lines are dropped; leading spaces are kept as part of
    /// the art.
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let mut rows: Vec<String> = text
            .lines()
            .map(|l| l.trim_end_matches('\r').to_string())
            .collect();
        while rows.last().is_some_and(|r| r.trim().is_empty()) {
            rows.pop();
        }
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        if width == 0 {
            bail!("sprite has no visible rows");
        }
        let size = Size {
            width: width as i32,
            height: rows.len() as i32,
        };
        Ok(Sprite { rows, size })
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("load sprite {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parse sprite {}", path.display()))
    }
}
