//! Integration tests for the process-wide font and texture dictionaries
//!
//! The dictionaries are shared by every `Splash`, so these tests run serially.

use std::fs;
use std::time::Duration;

use serial_test::serial;
use splashdeck::resources;
use splashdeck::{Color, Font, HeadlessFactory, PlayState, Slide, Splash, SplashError, Texture};

const TTF_HEADER: [u8; 8] = [0x00, 0x01, 0x00, 0x00, 0x00, 0x0A, 0x00, 0x80];

fn splash() -> Splash<HeadlessFactory> {
    Splash::new(HeadlessFactory::new().with_frame_interval(Duration::from_millis(1)))
}

fn held_slide() -> Slide {
    Slide::new()
        .with_color(Color::BLACK)
        .with_transition(Duration::ZERO)
        .with_duration(Duration::ZERO)
}

#[test]
#[serial]
fn test_load_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let font_path = dir.path().join("arial.ttf");
    let logo_path = dir.path().join("logo.png");
    fs::write(&font_path, TTF_HEADER).unwrap();
    fs::write(&logo_path, b"\x89PNG\r\n\x1a\n").unwrap();

    let splash = splash();
    splash.clear_all_resources().unwrap();
    splash.load_font("arial", &font_path).unwrap();
    splash.load_texture("logo", &logo_path).unwrap();

    assert_eq!(splash.font("arial").unwrap().format(), "ttf");
    assert_eq!(splash.texture("logo").unwrap().format(), "png");
    assert!(splash.font("missing").is_none());

    assert!(matches!(
        splash.load_font("broken", dir.path().join("nope.ttf")),
        Err(SplashError::Io { .. })
    ));
    assert!(matches!(
        splash.load_texture("broken", &font_path),
        Err(SplashError::UnsupportedAsset { .. })
    ));
    assert!(splash.texture("broken").is_none());

    splash.clear_all_resources().unwrap();
}

#[test]
#[serial]
fn test_shared_between_instances() {
    let first = splash();
    let second = splash();
    first.clear_all_resources().unwrap();

    first.add_texture("photo", Texture::from_bytes(vec![1, 2, 3], "jpg").unwrap()).unwrap();
    assert!(second.texture("photo").is_some());
    assert_eq!(resources::lock().texture_count(), 1);

    second.remove_texture("photo").unwrap();
    assert!(first.texture("photo").is_none());
}

#[test]
#[serial]
fn test_refused_while_playing() {
    let mut splash = splash();
    splash.clear_all_resources().unwrap();
    splash.add_font("arial", Font::from_bytes(TTF_HEADER.to_vec()).unwrap()).unwrap();
    splash.add_slide(held_slide()).unwrap();
    splash.play().unwrap();

    let font = Font::from_bytes(TTF_HEADER.to_vec()).unwrap();
    assert!(matches!(splash.add_font("other", font), Err(SplashError::Playing)));
    assert!(matches!(splash.remove_font("arial"), Err(SplashError::Playing)));
    assert!(matches!(splash.clear_all_resources(), Err(SplashError::Playing)));
    assert!(matches!(splash.load_texture("x", "missing.png"), Err(SplashError::Playing)));
    assert!(splash.font("arial").is_none());

    // Another, idle presentation may still look things up
    assert!(self::splash().font("arial").is_some());

    splash.quit();
    assert_eq!(splash.wait(), PlayState::Quit);
    assert!(splash.font("arial").is_some());

    splash.remove_font("arial").unwrap();
    assert!(splash.font("arial").is_none());
}
