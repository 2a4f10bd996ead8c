//! All game entity types: plain data plus bounding-box geometry.

use crate::settings::Settings;

// ── Geometry ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

/// Axis-aligned bounding box in field cells.  `y` grows downward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Rect { x, y, width, height }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> i32 {
        self.x + self.width / 2
    }

    /// Strict overlap: shared edges do not count, empty rects never collide.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.width > 0
            && self.height > 0
            && other.width > 0
            && other.height > 0
            && self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    pub fn contains_point(&self, px: i32, py: i32) -> bool {
        px >= self.left() && px < self.right() && py >= self.top() && py < self.bottom()
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Ship {
    /// Sub-cell horizontal position; `rect.x` is its floor.
    pub x: f32,
    pub rect: Rect,
    pub moving_left: bool,
    pub moving_right: bool,
}

impl Ship {
    /// A ship resting mid-bottom of a `screen_width` × `screen_height` field.
    pub fn new(size: Size, screen_width: i32, screen_height: i32) -> Self {
        let mut ship = Ship {
            x: 0.0,
            rect: Rect::new(0, 0, size.width, size.height),
            moving_left: false,
            moving_right: false,
        };
        ship.center(screen_width, screen_height);
        ship
    }

    /// Move to mid-bottom.  Movement intent is left alone.
    pub fn center(&mut self, screen_width: i32, screen_height: i32) {
        self.rect.x = screen_width / 2 - self.rect.width / 2;
        self.rect.y = screen_height - self.rect.height;
        self.x = self.rect.x as f32;
    }
}

// ── Enemies & projectiles ─────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Alien {
    pub x: f32,
    pub y: f32,
    pub rect: Rect,
}

impl Alien {
    pub fn new(x: f32, y: f32, size: Size) -> Self {
        Alien {
            x,
            y,
            rect: Rect::new(x.floor() as i32, y.floor() as i32, size.width, size.height),
        }
    }

    pub fn sync_rect(&mut self) {
        self.rect.x = self.x.floor() as i32;
        self.rect.y = self.y.floor() as i32;
    }

    /// Touching or past either side wall.
    pub fn at_edge(&self, screen_width: i32) -> bool {
        self.rect.right() >= screen_width || self.rect.left() <= 0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub y: f32,
    pub rect: Rect,
}

impl Bullet {
    /// A bullet whose mid-top sits on the ship's mid-top.
    pub fn from_ship(ship: &Ship, settings: &Settings) -> Self {
        let rect = Rect::new(
            ship.rect.center_x() - settings.bullet_width / 2,
            ship.rect.top(),
            settings.bullet_width,
            settings.bullet_height,
        );
        Bullet {
            y: rect.y as f32,
            rect,
        }
    }
}

// ── Menu ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Button {
    pub rect: Rect,
    pub label: String,
}

impl Button {
    pub const WIDTH: i32 = 12;
    pub const HEIGHT: i32 = 3;

    /// A button centred in the field.
    pub fn centered(label: &str, screen_width: i32, screen_height: i32) -> Self {
        Button {
            rect: Rect::new(
                screen_width / 2 - Self::WIDTH / 2,
                screen_height / 2 - Self::HEIGHT / 2,
                Self::WIDTH,
                Self::HEIGHT,
            ),
            label: label.to_string(),
        }
    }
}

// ── Session ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct GameStats {
    pub ships_left: u32,
    pub game_active: bool,
}

impl GameStats {
    pub fn new(settings: &Settings) -> Self {
        GameStats {
            ships_left: settings.ship_limit,
            game_active: false,
        }
    }

    pub fn reset_stats(&mut self, settings: &Settings) {
        self.ships_left = settings.ship_limit;
    }
}

/// The whole session.  Cloneable so pure update functions can return a new
/// copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub settings: Settings,
    pub stats: GameStats,
    pub ship: Ship,
    pub aliens: Vec<Alien>,
    pub bullets: Vec<Bullet>,
    pub play_button: Button,
    /// Footprint of a single alien, used whenever a fleet is rebuilt.
    pub alien_size: Size,
    pub cursor_visible: bool,
    /// Frames left in the freeze that follows a lost ship.
    pub hit_pause: u32,
    pub frame: u64,
}

impl GameState {
    pub fn is_paused(&self) -> bool {
        self.hit_pause > 0
    }
}
