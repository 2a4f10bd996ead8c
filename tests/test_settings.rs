use std::io::Write;

use alien_invasion::settings::*;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

#[test]
fn defaults_start_dynamic_at_base() {
    let s = Settings::default();
    assert_eq!(s.dynamic.ship_speed, s.ship_speed);
    assert_eq!(s.dynamic.bullet_speed, s.bullet_speed);
    assert_eq!(s.dynamic.alien_speed, s.alien_speed);
    assert_eq!(s.dynamic.fleet_direction, FleetDirection::Right);
    assert!(s.validate().is_empty());
}

#[test]
fn increase_speed_scales_dynamic_only() {
    let mut s = Settings::default();
    s.increase_speed();
    s.increase_speed();
    assert!(approx(s.dynamic.ship_speed, 0.5 * 1.1 * 1.1));
    assert!(approx(s.dynamic.bullet_speed, 0.4 * 1.1 * 1.1));
    assert!(approx(s.dynamic.alien_speed, 0.15 * 1.1 * 1.1));
    assert_eq!(s.ship_speed, 0.5);
}

#[test]
fn initialize_dynamic_settings_undoes_speedups_and_heading() {
    let mut s = Settings::default();
    s.increase_speed();
    s.dynamic.fleet_direction = FleetDirection::Left;
    s.initialize_dynamic_settings();
    assert_eq!(s.dynamic, Settings::default().dynamic);
}

#[test]
fn fleet_direction_sign_and_reverse() {
    assert_eq!(FleetDirection::Right.sign(), 1.0);
    assert_eq!(FleetDirection::Left.sign(), -1.0);
    assert_eq!(FleetDirection::Right.reversed(), FleetDirection::Left);
    assert_eq!(FleetDirection::Left.reversed().reversed(), FleetDirection::Left);
}

#[test]
fn hit_pause_rounds_up_to_whole_frames() {
    let s = Settings::default();
    assert_eq!(s.hit_pause_frames(), 31); // 1000 / 33 = 30.3
    let even = Settings {
        frame_ms: 50,
        ..Settings::default()
    };
    assert_eq!(even.hit_pause_frames(), 20);
    let no_frames = Settings {
        frame_ms: 0,
        ..Settings::default()
    };
    assert_eq!(no_frames.hit_pause_frames(), 0);
}

#[test]
fn hit_pause_saturates_instead_of_wrapping() {
    let s = Settings {
        hit_pause_ms: u64::MAX,
        frame_ms: 1,
        ..Settings::default()
    };
    assert_eq!(s.hit_pause_frames(), u32::MAX);
}

// ── file loading ──────────────────────────────────────────────────────────────

#[test]
fn partial_file_overrides_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"screen_width = 90\nalien_speed = 0.3\nship_limit = 5\n")
        .unwrap();
    let s = Settings::load_from_file(file.path()).unwrap();
    assert_eq!(s.screen_width, 90);
    assert_eq!(s.ship_limit, 5);
    assert!(approx(s.alien_speed, 0.3));
    // dynamic block follows the loaded base values
    assert!(approx(s.dynamic.alien_speed, 0.3));
    // untouched keys keep their defaults
    assert_eq!(s.screen_height, Settings::default().screen_height);
    assert_eq!(s.bullets_allowed, 3);
}

#[test]
fn load_or_default_invalid_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"screen_width = \"wide\"\n").unwrap();
    let (s, err) = Settings::load_or_default(file.path());
    assert!(err.unwrap().contains("parse config"));
    assert_eq!(s, Settings::default());
}

#[test]
fn load_or_default_missing_file() {
    let (s, err) = Settings::load_or_default("this/file/does/not/exist.toml");
    assert!(err.unwrap().contains("read config"));
    assert_eq!(s, Settings::default());
}

// ── validation ────────────────────────────────────────────────────────────────

#[test]
fn validate_flags_suspicious_values() {
    let s = Settings {
        alien_speed: 0.0,
        speedup_scale: 0.9,
        bullets_allowed: 0,
        ship_limit: 0,
        bullet_width: 0,
        frame_ms: 0,
        ..Settings::default()
    };
    let warnings = s.validate();
    let joined = warnings.join("\n");
    assert!(joined.contains("alien_speed must be > 0"));
    assert!(joined.contains("speedup_scale"));
    assert!(joined.contains("bullets_allowed"));
    assert!(joined.contains("ship_limit"));
    assert!(joined.contains("bullet size"));
    assert!(joined.contains("frame_ms"));
    assert_eq!(warnings.len(), 6, "{joined}");
}

#[test]
fn validate_flags_oversized_field() {
    let s = Settings {
        screen_width: 70_000,
        ..Settings::default()
    };
    let warnings = s.validate();
    assert_eq!(warnings.len(), 1, "{warnings:?}");
    assert!(warnings[0].contains("exceeds"));

    let edge = Settings {
        screen_width: MAX_FIELD_SIDE,
        screen_height: MAX_FIELD_SIDE,
        ..Settings::default()
    };
    assert!(edge.validate().is_empty());
}
