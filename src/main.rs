mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::Path;
use std::sync::mpsc::{self, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};

use alien_invasion::compute::{handle_event, init_state, tick, Flow};
use alien_invasion::entities::GameState;
use alien_invasion::input::KeyTracker;
use alien_invasion::settings::Settings;
use alien_invasion::sprite::{Sprite, ALIEN_SPRITE_PATH, SHIP_SPRITE_PATH};

use display::{Layout, Sprites};

const CONFIG_PATH: &str = "alien_invasion.toml";
/// stdout and stderr belong to the game screen, so logs go to a file, and
/// only when `RUST_LOG` asks for them.
const LOG_PATH: &str = "alien_invasion.log";

fn init_logging() -> anyhow::Result<()> {
    if std::env::var_os("RUST_LOG").is_none() {
        return Ok(());
    }
    let file = File::create(LOG_PATH).with_context(|| format!("create {LOG_PATH}"))?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn load_settings() -> Settings {
    if !Path::new(CONFIG_PATH).exists() {
        log::info!("no {CONFIG_PATH}, using default settings");
        return Settings::default();
    }
    let (settings, err) = Settings::load_or_default(CONFIG_PATH);
    match err {
        Some(e) => log::warn!("falling back to default settings: {e}"),
        None => log::info!("settings loaded from {CONFIG_PATH}"),
    }
    for warning in settings.validate() {
        log::warn!("config: {warning}");
    }
    settings
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until a quit event.  Each frame: drain input, expire held keys,
/// advance the simulation while active, render unless frozen after a hit.
fn game_loop<W: Write>(
    out: &mut W,
    mut state: GameState,
    sprites: &Sprites,
    rx: &mpsc::Receiver<Event>,
    release_events: bool,
) -> anyhow::Result<()> {
    let frame_len = Duration::from_millis(state.settings.frame_ms);
    let (tw, th) = terminal::size()?;
    let mut layout = Layout::fit(tw, th, &state.settings);
    let mut keys = KeyTracker::new(release_events);
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        loop {
            let event = match rx.try_recv() {
                Ok(event) => event,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => bail!("terminal input reader stopped"),
            };
            if let Event::Resize(w, h) = event {
                layout = Layout::fit(w, h, &state.settings);
                log::debug!("resized to {w}x{h}, field fits: {}", layout.is_some());
                continue;
            }
            let origin = layout.map(|l| l.origin).unwrap_or((0, 0));
            let Some(input) = keys.translate(&event, frame, origin) else {
                continue;
            };
            match handle_event(&state, &input) {
                Flow::Continue(next) => state = next,
                Flow::Quit => return Ok(()),
            }
        }

        for input in keys.expire(frame) {
            if let Flow::Continue(next) = handle_event(&state, &input) {
                state = next;
            }
        }

        if state.stats.game_active {
            state = tick(&state);
        }

        if !state.is_paused() {
            display::render(out, &state, sprites, layout.as_ref())?;
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_len {
            thread::sleep(frame_len - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    init_logging()?;

    let settings = load_settings();
    let sprites = Sprites {
        ship: Sprite::load(SHIP_SPRITE_PATH)?,
        alien: Sprite::load(ALIEN_SPRITE_PATH)?,
    };
    let state = init_state(settings, sprites.ship.size, sprites.alien.size);
    if state.aliens.is_empty() {
        log::warn!(
            "a {}x{} field has no room for a {}x{} alien fleet",
            state.settings.screen_width,
            state.settings.screen_height,
            state.alien_size.width,
            state.alien_size.height
        );
    }

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Key-release events need the kitty keyboard protocol; other terminals
    // fall back to hold-window expiry in `KeyTracker`.
    let keyboard_enhanced = matches!(terminal::supports_keyboard_enhancement(), Ok(true))
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
    log::info!("keyboard enhancement: {keyboard_enhanced}");

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(e) => {
                log::error!("terminal read failed: {e}");
                break;
            }
        }
    });

    let result = game_loop(&mut out, state, &sprites, &rx, keyboard_enhanced);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    log::info!("exit");
    result
}
