//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` and returns a brand-new `GameState`.  The only side effect is
//! logging.

use crate::entities::{Alien, Bullet, Button, GameState, GameStats, Ship, Size};
use crate::input::{InputEvent, Key};
use crate::settings::Settings;

pub const PLAY_LABEL: &str = "Play";

// ── Fleet construction ───────────────────────────────────────────────────────

/// Columns and rows of a full fleet.  Zero when the field cannot fit one.
pub fn fleet_dimensions(settings: &Settings, alien: Size, ship_height: i32) -> (i32, i32) {
    if alien.width <= 0 || alien.height <= 0 {
        return (0, 0);
    }
    // i64 so oversized configs cannot overflow the spacing arithmetic
    let (aw, ah) = (alien.width as i64, alien.height as i64);
    let space_x = settings.screen_width as i64 - 2 * aw;
    let columns = space_x.div_euclid(2 * aw).max(0);

    let space_y = settings.screen_height as i64 - 3 * ah - ship_height as i64;
    let rows = space_y.div_euclid(2 * ah).max(0);

    (
        i32::try_from(columns).unwrap_or(i32::MAX),
        i32::try_from(rows).unwrap_or(i32::MAX),
    )
}

/// A full fleet laid out on a grid with one alien-width (height) of spacing.
pub fn create_fleet(settings: &Settings, alien: Size, ship_height: i32) -> Vec<Alien> {
    let (columns, rows) = fleet_dimensions(settings, alien, ship_height);
    let mut fleet = Vec::with_capacity((columns as usize).saturating_mul(rows as usize));
    for row in 0..rows {
        for col in 0..columns {
            let x = alien.width + 2 * alien.width * col;
            let y = alien.height + 2 * alien.height * row;
            fleet.push(Alien::new(x as f32, y as f32, alien));
        }
    }
    fleet
}

fn rebuild_fleet(state: &GameState) -> Vec<Alien> {
    create_fleet(&state.settings, state.alien_size, state.ship.rect.height)
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// A fresh session waiting at the play button, with the fleet already on
/// screen.
pub fn init_state(settings: Settings, ship_size: Size, alien_size: Size) -> GameState {
    let (w, h) = (settings.screen_width, settings.screen_height);
    let ship = Ship::new(ship_size, w, h);
    let aliens = create_fleet(&settings, alien_size, ship.rect.height);
    GameState {
        stats: GameStats::new(&settings),
        ship,
        aliens,
        bullets: Vec::new(),
        play_button: Button::centered(PLAY_LABEL, w, h),
        alien_size,
        cursor_visible: true,
        hit_pause: 0,
        frame: 0,
        settings,
    }
}

// ── Game-state transitions ───────────────────────────────────────────────────

/// Reset everything for a new round.
pub fn start_game(state: &GameState) -> GameState {
    let mut next = state.clone();
    next.settings.initialize_dynamic_settings();
    next.stats.reset_stats(&next.settings);
    next.stats.game_active = true;

    next.bullets.clear();
    next.aliens = rebuild_fleet(&next);
    next.ship.center(next.settings.screen_width, next.settings.screen_height);
    next.cursor_visible = false;
    next.hit_pause = 0;

    log::info!(
        "new game: {} ships, {} aliens",
        next.stats.ships_left,
        next.aliens.len()
    );
    next
}

/// Start a new game if the click landed on the play button while inactive.
pub fn check_play_button(state: &GameState, x: i32, y: i32) -> GameState {
    if state.play_button.rect.contains_point(x, y) && !state.stats.game_active {
        start_game(state)
    } else {
        state.clone()
    }
}

/// Lose a ship.  Either restart the wave with the ship recentred and a short
/// freeze, or end the game leaving the fleet where it is.
pub fn ship_hit(state: &GameState) -> GameState {
    let mut next = state.clone();
    next.stats.ships_left = next.stats.ships_left.saturating_sub(1);

    if next.stats.ships_left > 0 {
        next.aliens = rebuild_fleet(&next);
        next.bullets.clear();
        next.ship.center(next.settings.screen_width, next.settings.screen_height);
        next.hit_pause = next.settings.hit_pause_frames();
        log::info!("ship hit, {} left", next.stats.ships_left);
    } else {
        next.stats.game_active = false;
        next.cursor_visible = true;
        log::info!("game over at frame {}", next.frame);
    }
    next
}

// ── Input-driven state transitions ───────────────────────────────────────────

/// What the main loop does after an input event.
#[derive(Debug)]
pub enum Flow {
    Continue(GameState),
    Quit,
}

/// Fire a bullet from the ship, capped at `bullets_allowed` on screen.
pub fn fire_bullet(state: &GameState) -> GameState {
    if state.bullets.len() >= state.settings.bullets_allowed {
        return state.clone();
    }
    let mut bullets = state.bullets.clone();
    bullets.push(Bullet::from_ship(&state.ship, &state.settings));
    GameState {
        bullets,
        ..state.clone()
    }
}

pub fn handle_event(state: &GameState, event: &InputEvent) -> Flow {
    let mut next = state.clone();
    match *event {
        InputEvent::Quit => return Flow::Quit,
        InputEvent::KeyDown(Key::Right) => next.ship.moving_right = true,
        InputEvent::KeyDown(Key::Left) => next.ship.moving_left = true,
        InputEvent::KeyDown(Key::Fire) => next = fire_bullet(state),
        InputEvent::KeyDown(Key::NewGame) if !state.stats.game_active => next = start_game(state),
        InputEvent::KeyUp(Key::Right) => next.ship.moving_right = false,
        InputEvent::KeyUp(Key::Left) => next.ship.moving_left = false,
        InputEvent::MouseDown { x, y } => next = check_play_button(state, x, y),
        _ => {}
    }
    Flow::Continue(next)
}

// ── Per-frame updates ────────────────────────────────────────────────────────

/// Both clamps are checked against the rect from the start of the tick, so
/// holding both keys away from a wall leaves the ship where it is.
pub fn update_ship(ship: &Ship, settings: &Settings) -> Ship {
    let mut x = ship.x;
    if ship.moving_right && ship.rect.right() < settings.screen_width {
        x += settings.dynamic.ship_speed;
    }
    if ship.moving_left && ship.rect.left() > 0 {
        x -= settings.dynamic.ship_speed;
    }
    let mut rect = ship.rect;
    rect.x = x.floor() as i32;
    Ship {
        x,
        rect,
        ..ship.clone()
    }
}

/// Move bullets, drop the ones past the top edge, then resolve hits.
pub fn update_bullets(state: &GameState) -> GameState {
    let speed = state.settings.dynamic.bullet_speed;
    let bullets: Vec<Bullet> = state
        .bullets
        .iter()
        .map(|b| {
            let y = b.y - speed;
            let mut rect = b.rect;
            rect.y = y.floor() as i32;
            Bullet { y, rect }
        })
        .filter(|b| b.rect.bottom() > 0)
        .collect();

    check_bullet_alien_collisions(&GameState {
        bullets,
        ..state.clone()
    })
}

/// Remove every bullet touching an alien and every alien touched by a
/// bullet.  Clearing the last alien starts the next, faster wave.
pub fn check_bullet_alien_collisions(state: &GameState) -> GameState {
    let bullets: Vec<Bullet> = state
        .bullets
        .iter()
        .filter(|b| !state.aliens.iter().any(|a| b.rect.intersects(&a.rect)))
        .cloned()
        .collect();
    let aliens: Vec<Alien> = state
        .aliens
        .iter()
        .filter(|a| !state.bullets.iter().any(|b| b.rect.intersects(&a.rect)))
        .cloned()
        .collect();

    let destroyed = state.aliens.len() - aliens.len();
    let mut next = GameState {
        bullets,
        aliens,
        ..state.clone()
    };

    if destroyed > 0 && next.aliens.is_empty() {
        next.bullets.clear();
        next.aliens = rebuild_fleet(&next);
        next.settings.increase_speed();
        log::info!(
            "fleet cleared; speeds ship={:.3} bullet={:.3} alien={:.3}",
            next.settings.dynamic.ship_speed,
            next.settings.dynamic.bullet_speed,
            next.settings.dynamic.alien_speed
        );
    }
    next
}

/// Drop the fleet and reverse it if any alien touches a side wall.
pub fn check_fleet_edges(state: &GameState) -> GameState {
    let width = state.settings.screen_width;
    if state.aliens.iter().any(|a| a.at_edge(width)) {
        change_fleet_direction(state)
    } else {
        state.clone()
    }
}

fn change_fleet_direction(state: &GameState) -> GameState {
    let mut next = state.clone();
    let drop = next.settings.fleet_drop_speed;
    for alien in &mut next.aliens {
        alien.y += drop;
        alien.sync_rect();
    }
    next.settings.dynamic.fleet_direction = next.settings.dynamic.fleet_direction.reversed();
    next
}

/// Edge check, fleet movement, then at most one ship hit: contact with the
/// ship first, otherwise an alien reaching the bottom.
pub fn update_aliens(state: &GameState) -> GameState {
    let mut next = check_fleet_edges(state);
    let step = next.settings.dynamic.alien_speed * next.settings.dynamic.fleet_direction.sign();
    for alien in &mut next.aliens {
        alien.x += step;
        alien.sync_rect();
    }

    if next.aliens.iter().any(|a| a.rect.intersects(&next.ship.rect)) {
        return ship_hit(&next);
    }
    let bottom = next.settings.screen_height;
    if next.aliens.iter().any(|a| a.rect.bottom() >= bottom) {
        return ship_hit(&next);
    }
    next
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame.  Does nothing while inactive; while
/// the post-hit freeze runs it only counts the freeze down.
pub fn tick(state: &GameState) -> GameState {
    if !state.stats.game_active {
        return state.clone();
    }
    if state.is_paused() {
        return GameState {
            hit_pause: state.hit_pause - 1,
            ..state.clone()
        };
    }

    let moved = GameState {
        ship: update_ship(&state.ship, &state.settings),
        ..state.clone()
    };
    let next = update_bullets(&moved);
    let next = update_aliens(&next);

    GameState {
        frame: state.frame + 1,
        ..next
    }
}
