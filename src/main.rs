//! Spritestage demo window.
//!
//! Presents the engine canvas in a raylib window: the recorded draw calls
//! are replayed every frame, scaled by the display scale, and raylib mouse
//! state is fed back into the pointer router.

use clap::Parser;
use log::{info, warn};
use raylib::prelude::*;
use rustc_hash::FxHashMap;
use std::path::PathBuf;

use spritestage::builder::SpriteBuilder;
use spritestage::engine::Engine;
use spritestage::events::cursor::{CursorEventKind, Modifiers, PointerSample};
use spritestage::resources::canvas::DrawCall;
use spritestage::resources::engineconfig::EngineConfig;
use spritestage::resources::fontstore::FontOptions;
use spritestage::script::{StepStatus, animate_cells, from_fn, shake};
use spritestage::texture::{PixelData, Texture, TextureId};

/// Spritestage 2D sprite engine demo
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// INI configuration file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Fixed display scale; disables fitting the canvas to the window.
    #[arg(long)]
    scale: Option<f32>,
}

/// GPU copies of engine textures, uploaded on first use.
struct TextureCache {
    uploaded: FxHashMap<TextureId, Texture2D>,
}

impl TextureCache {
    fn new() -> Self {
        Self {
            uploaded: FxHashMap::default(),
        }
    }

    fn get(
        &mut self,
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        texture: &Texture,
    ) -> Option<&Texture2D> {
        if !self.uploaded.contains_key(&texture.id()) {
            let pixels = texture.pixels()?;
            let mut image =
                Image::gen_image_color(pixels.width() as i32, pixels.height() as i32, Color::BLANK);
            for y in 0..pixels.height() {
                for x in 0..pixels.width() {
                    if let Some([r, g, b, a]) = pixels.pixel(x, y) {
                        image.draw_pixel(x as i32, y as i32, Color::new(r, g, b, a));
                    }
                }
            }
            match rl.load_texture_from_image(thread, &image) {
                Ok(uploaded) => {
                    self.uploaded.insert(texture.id(), uploaded);
                }
                Err(e) => {
                    warn!("failed to upload texture `{}`: {e}", texture.label());
                    return None;
                }
            }
        }
        self.uploaded.get(&texture.id())
    }
}

/// Four 16x16 cells in a row, each a differently colored frame.
fn demo_sheet() -> Texture {
    const COLORS: [[u8; 4]; 4] = [
        [230, 80, 80, 255],
        [80, 200, 90, 255],
        [80, 120, 230, 255],
        [230, 210, 70, 255],
    ];
    let pixels = PixelData::from_fn(64, 16, |x, y| {
        let cell = (x / 16) as usize;
        let (cx, cy) = (x % 16, y % 16);
        if cx < 2 || cy < 2 || cx > 13 || cy > 13 || (cx + cy) % 6 == 0 {
            COLORS[cell]
        } else {
            [0, 0, 0, 0]
        }
    });
    Texture::from_pixels("demo-sheet", pixels)
}

/// Glyph strip for "ABC": a fallback row plus three solid bars of
/// growing width, 5 pixels tall.
fn demo_font() -> Texture {
    const WIDTHS: [u32; 4] = [2, 3, 4, 5];
    let pixels = PixelData::from_fn(6, 23, |x, y| {
        let row = (y / 6) as usize;
        if y % 6 < 5 && x < WIDTHS[row] {
            [255, 255, 255, 255]
        } else {
            [0, 0, 0, 0]
        }
    });
    Texture::from_pixels("demo-font", pixels)
}

fn build_scene(engine: &mut Engine) {
    let sheet = demo_sheet();
    engine.create_bitmap_font("demo", "ABC", demo_font(), FontOptions::default());

    for i in 0..4 {
        let sprite = engine.spawn_sprite(
            SpriteBuilder::new()
                .texture(sheet.clone())
                .width(16.0)
                .index(i)
                .at(40.0 + 60.0 * i as f32, 80.0)
                .layer(i as i32 % 2)
                .script(animate_cells([0, 1, 2, 3], 8 + 4 * i, true)),
        );
        engine.on(sprite, CursorEventKind::Down, |ctx, _| {
            ctx.add_process(shake(20, 3.0));
        });
        engine.on(sprite, CursorEventKind::Enter, |ctx, _| ctx.set_layer(5));
        engine.on(sprite, CursorEventKind::Leave, |ctx, _| ctx.set_layer(0));
    }

    // Caption: drawn every frame from a process on a hidden sprite.
    engine.spawn_sprite(SpriteBuilder::new().hidden(true).process(from_fn(|ctx| {
        ctx.draw_string("demo", "ABC CAB\nBAC", Some((8.0, 8.0)));
        StepStatus::Running
    })));
}

fn modifiers(rl: &RaylibHandle) -> Modifiers {
    Modifiers {
        alt: rl.is_key_down(KeyboardKey::KEY_LEFT_ALT) || rl.is_key_down(KeyboardKey::KEY_RIGHT_ALT),
        ctrl: rl.is_key_down(KeyboardKey::KEY_LEFT_CONTROL)
            || rl.is_key_down(KeyboardKey::KEY_RIGHT_CONTROL),
        shift: rl.is_key_down(KeyboardKey::KEY_LEFT_SHIFT)
            || rl.is_key_down(KeyboardKey::KEY_RIGHT_SHIFT),
    }
}

/// Scale to the window (unless fixed) and center the canvas in it.
fn place_canvas(engine: &mut Engine, rl: &RaylibHandle, fixed_scale: Option<f32>) {
    let (win_w, win_h) = (rl.get_screen_width() as f32, rl.get_screen_height() as f32);
    let scale = match fixed_scale {
        Some(scale) => {
            engine.set_scale(scale);
            scale
        }
        None => engine.fit_to_window(win_w, win_h),
    };
    let canvas = engine.canvas();
    let origin_x = ((win_w - canvas.width() as f32 * scale) / 2.0).max(0.0);
    let origin_y = ((win_h - canvas.height() as f32 * scale) / 2.0).max(0.0);
    engine.set_origin(origin_x, origin_y);
}

fn feed_pointer(engine: &mut Engine, rl: &RaylibHandle, was_on_canvas: &mut bool) {
    let position = rl.get_mouse_position();
    let delta = rl.get_mouse_delta();
    let buttons = [
        MouseButton::MOUSE_BUTTON_LEFT,
        MouseButton::MOUSE_BUTTON_RIGHT,
        MouseButton::MOUSE_BUTTON_MIDDLE,
    ]
    .iter()
    .enumerate()
    .filter(|(_, button)| rl.is_mouse_button_down(**button))
    .fold(0, |mask, (bit, _)| mask | (1 << bit));

    let sample = PointerSample::at(position.x, position.y)
        .with_movement(delta.x, delta.y)
        .with_buttons(buttons)
        .with_modifiers(modifiers(rl))
        .with_timestamp(rl.get_time() * 1000.0);

    let on_canvas = rl.is_cursor_on_screen() && engine.pointer_on_canvas(position.x, position.y);
    match (*was_on_canvas, on_canvas) {
        (false, true) => engine.pointer_enter(&sample),
        (true, false) => engine.pointer_leave(&sample),
        _ => {}
    }
    *was_on_canvas = on_canvas;

    if delta.x != 0.0 || delta.y != 0.0 {
        engine.pointer_move(&sample);
    }
    if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
        engine.pointer_down(&sample);
    }
    if rl.is_mouse_button_released(MouseButton::MOUSE_BUTTON_LEFT) {
        engine.pointer_up(&sample);
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => EngineConfig::with_path(path),
        None => EngineConfig::new(),
    };
    if let Err(e) = config.load_from_file() {
        warn!("{e}; using defaults");
    }
    if let Some(scale) = cli.scale {
        config.auto_scale = false;
        config.scale = scale;
    }
    let fixed_scale = (!config.auto_scale).then_some(config.scale);

    let mut engine = match Engine::from_config(&config) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    build_scene(&mut engine);

    let (mut rl, thread) = raylib::init()
        .size(config.window_width as i32, config.window_height as i32)
        .resizable()
        .title("Spritestage")
        .build();
    rl.set_target_fps(config.target_fps);
    info!("Spritestage running");

    let mut textures = TextureCache::new();
    let mut pointer_on_canvas = false;
    place_canvas(&mut engine, &rl, fixed_scale);

    while !rl.window_should_close() {
        if rl.is_window_resized() {
            place_canvas(&mut engine, &rl, fixed_scale);
        }
        feed_pointer(&mut engine, &rl, &mut pointer_on_canvas);
        engine.tick();

        let display = engine.display_scale();
        let calls = engine.take_draw_calls();
        for call in &calls {
            if let DrawCall::Image { texture, .. } = call {
                textures.get(&mut rl, &thread, texture);
            }
        }

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLACK);
        for call in &calls {
            match call {
                DrawCall::Clear => d.clear_background(Color::new(24, 24, 32, 255)),
                DrawCall::Image { texture, src, dest } => {
                    let Some(uploaded) = textures.uploaded.get(&texture.id()) else {
                        continue;
                    };
                    d.draw_texture_pro(
                        uploaded,
                        Rectangle::new(src.x, src.y, src.width, src.height),
                        Rectangle::new(
                            display.origin_x + dest.x * display.scale,
                            display.origin_y + dest.y * display.scale,
                            dest.width * display.scale,
                            dest.height * display.scale,
                        ),
                        Vector2::zero(),
                        0.0,
                        Color::WHITE,
                    );
                }
            }
        }
    }
}
