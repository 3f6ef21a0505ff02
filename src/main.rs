//! Loading splash demo
//!
//! Shows a progress bar over a photo while "loading" files picked at
//! random, then a logo slide until loading is done, and fades out.
//! Escape quits.

use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use splashdeck::constants::DEFAULT_CHARACTER_SIZE;
use splashdeck::texture_loader::{is_font, is_image, load_sorted_asset_paths};
use splashdeck::{
    Color, ControlAction, Key, PlayState, RaylibFactory, RectangleShape, Slide, Splash, Text, Transform, Vec2,
    WindowSettings,
};

const PROGRESS_BAR_SIZE: Vec2 = Vec2::new(400.0, 50.0);  // Progress bar at 100%
const LOGO_SIZE: Vec2 = Vec2::new(128.0, 128.0);         // Logo is stretched to this
const GLYPH_ADVANCE: f32 = 0.6;                          // Average glyph width per pixel of text size
const WIDEST_PROGRESS: &str = "PROGRESS: 100%";

#[derive(Parser, Debug)]
#[command(version, about = "Loading splash screen demo")]
struct Args {
    /// Directory whose images and fonts are loaded, and used for any asset not given below
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Number of files to load
    #[arg(long, default_value_t = 100)]
    files: usize,

    /// Seed for picking the files, for a repeatable run
    #[arg(long)]
    seed: Option<u64>,

    /// Times each file is read, to stretch the loading
    #[arg(long, default_value_t = 200)]
    passes: usize,

    #[arg(long, default_value_t = 800)]
    width: u32,

    #[arg(long, default_value_t = 600)]
    height: u32,

    #[arg(long, default_value = "Loading")]
    title: String,

    /// TrueType/OpenType font for the progress text
    #[arg(long)]
    font: Option<PathBuf>,

    /// Image shown on the logo slide
    #[arg(long)]
    logo: Option<PathBuf>,

    /// Background image of the loading slide
    #[arg(long)]
    photo: Option<PathBuf>,
}

/// `count` paths drawn with replacement, none when `paths` is empty.
fn pick_files<R: Rng>(paths: &[PathBuf], count: usize, rng: &mut R) -> Vec<PathBuf> {
    if paths.is_empty() {
        return Vec::new();
    }
    (0..count).map(|_| paths[rng.random_range(0..paths.len())].clone()).collect()
}

/// Rough middle of `text` drawn at `character_size`, fonts are only measured
/// by the player thread.
fn text_origin(text: &str, character_size: u32) -> Vec2 {
    let size = character_size as f32;
    Vec2::new(text.chars().count() as f32 * size * GLYPH_ADVANCE, size).scaled(Vec2::new(0.5, 0.5))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let scanned = match &args.assets {
        Some(dir) => load_sorted_asset_paths(dir).with_context(|| format!("no assets to load in {}", dir.display()))?,
        None => Vec::new(),
    };
    let images: Vec<&PathBuf> = scanned.iter().filter(|p| is_image(p)).collect();
    log::info!("found {} assets ({} images)", scanned.len(), images.len());

    let font_path = args.font.clone().or_else(|| scanned.iter().find(|p| is_font(p)).cloned());
    let photo_path = args.photo.clone().or_else(|| images.first().map(|p| p.to_path_buf()));
    let logo_path = args.logo.clone().or_else(|| images.get(1).map(|p| p.to_path_buf()));

    let (width, height) = (args.width as f32, args.height as f32);
    let mut splash = Splash::with_settings(RaylibFactory, WindowSettings::new(args.width, args.height, &args.title));
    splash.add_global_control_action(ControlAction::Quit, Key::Escape)?;

    // --- Resources ---
    if let Some(path) = &font_path {
        splash.load_font("main", path)?;
    }
    if let Some(path) = &photo_path {
        splash.load_texture("photo", path)?;
    }
    if let Some(path) = &logo_path {
        splash.load_texture("logo", path)?;
    }

    // --- Drawables ---
    let bar_transform = Transform {
        position: Vec2::new((width - PROGRESS_BAR_SIZE.x) / 2.0, height - 100.0),
        origin: Vec2::new(0.0, PROGRESS_BAR_SIZE.y / 2.0),
        ..Transform::default()
    };
    splash.add_drawable(
        "photo",
        RectangleShape::new(Vec2::new(width, height)).with_texture("photo"),
        0,
    )?;
    splash.add_drawable(
        "progress bar outline",
        RectangleShape::new(PROGRESS_BAR_SIZE)
            .with_fill_color(Color::new(0, 0, 128, 128))
            .with_outline(Color::WHITE, 5.0)
            .with_transform(bar_transform),
        1,
    )?;
    splash.add_drawable(
        "progress bar",
        RectangleShape::new(PROGRESS_BAR_SIZE)
            .with_fill_color(Color::BLUE)
            .with_transform(Transform { scale: Vec2::new(0.0, 1.0), ..bar_transform }),
        2,
    )?;
    let mut progress_text = Text::new("PROGRESS: 0%").with_transform(Transform {
        position: Vec2::new(width / 2.0, height - 100.0),
        origin: text_origin(WIDEST_PROGRESS, DEFAULT_CHARACTER_SIZE),
        ..Transform::default()
    });
    if font_path.is_some() {
        progress_text = progress_text.with_font("main");
    }
    splash.add_drawable("progress text", progress_text, 3)?;
    splash.add_drawable(
        "logo",
        RectangleShape::new(LOGO_SIZE).with_texture("logo").with_transform(Transform {
            position: Vec2::new(width / 2.0, height / 3.0),
            origin: LOGO_SIZE.scaled(Vec2::new(0.5, 0.5)),
            ..Transform::default()
        }),
        4,
    )?;

    // --- Slides ---
    let mut slide = Slide::new().with_duration(Duration::from_secs(1));
    for id in ["photo", "progress bar", "progress bar outline", "progress text"] {
        slide.add(id);
    }
    splash.add_slide(slide.clone())?;

    // Stays up until loading is done
    slide = slide.with_duration(Duration::ZERO);
    slide.add("logo");
    splash.add_slide(slide.clone())?;

    // Empty slide so the last one fades out
    slide.clear();
    slide = slide
        .with_duration(Duration::from_micros(100))
        .with_transition(Duration::from_millis(500));
    splash.add_slide(slide)?;

    splash.play()?;

    // --- Loading ---
    let candidates: Vec<PathBuf> = if scanned.is_empty() {
        [&font_path, &photo_path, &logo_path].into_iter().flatten().cloned().collect()
    } else {
        scanned.clone()
    };
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let files: Vec<(PathBuf, u64)> = pick_files(&candidates, args.files, &mut rng)
        .into_iter()
        .map(|path| {
            let size = fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
            (path, size)
        })
        .collect();
    let total: u64 = files.iter().map(|(_, size)| size).sum();

    let mut loaded = 0u64;
    for (path, size) in &files {
        let ratio = if total == 0 { 1.0 } else { loaded as f32 / total as f32 };
        splash.set_drawable_scale("progress bar", Vec2::new(ratio, 1.0))?;
        splash.set_drawable_string("progress text", &format!("PROGRESS: {}%", (ratio * 100.0).ceil() as u32))?;

        if splash.play_state() == PlayState::Quit {
            break;
        }

        read_passes(path, args.passes)?;
        loaded += size;
    }
    splash.set_drawable_scale("progress bar", Vec2::new(1.0, 1.0))?;
    splash.set_drawable_string("progress text", WIDEST_PROGRESS)?;

    if splash.play_state() == PlayState::Quit {
        log::info!("splash closed, leaving");
        return Ok(());
    }

    // Wait for the logo slide to have faded in before moving on
    while splash.is_playing() && (splash.current_slide_index() < 1 || splash.slide_time() < Duration::from_secs(2)) {
        thread::sleep(Duration::from_millis(100));
    }
    splash.next();

    let state = splash.wait();
    log::info!("splash finished: {:?}", state);

    // ... the application proper would start here

    Ok(())
}

fn read_passes(path: &Path, passes: usize) -> Result<()> {
    for _ in 0..passes {
        let data = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        drop(data);
    }
    Ok(())
}
