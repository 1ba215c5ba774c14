//! Frame loop integration tests: layer order, script/process stepping and
//! drawing through the public engine API.

use bevy_ecs::prelude::*;
use std::sync::{Arc, Mutex};

use spritestage::builder::SpriteBuilder;
use spritestage::engine::Engine;
use spritestage::resources::canvas::{DrawCall, Rect};
use spritestage::script::{
    Step, StepStatus, boxed, from_fn, once, run_parallel, run_sequential, skip_frames,
};
use spritestage::texture::{PixelData, Texture};

type Trace = Arc<Mutex<Vec<String>>>;

const EPSILON: f32 = 1e-6;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn texture(label: &str, width: u32, height: u32) -> Texture {
    Texture::from_pixels(label, PixelData::transparent(width, height))
}

/// Step that logs `name:frame` with the engine frame it ran in and completes
/// after `frames` resumptions.
fn logged(name: &'static str, frames: u32, trace: &Trace) -> impl Step {
    let trace = Arc::clone(trace);
    let mut resumed = 0;
    from_fn(move |_| {
        resumed += 1;
        trace.lock().unwrap().push(format!("{name}{resumed}"));
        (resumed >= frames).into()
    })
}

fn drawn_textures(engine: &Engine) -> Vec<String> {
    engine
        .canvas()
        .images()
        .map(|(texture, _, _)| texture.label().to_string())
        .collect()
}

#[test]
fn layers_sort_stably_and_draw_bottom_up() {
    let mut engine = Engine::new(64, 64).unwrap();
    let sprites: Vec<Entity> = [("a", 2), ("b", 1), ("c", 1), ("d", 0)]
        .into_iter()
        .map(|(label, layer)| {
            engine.spawn_sprite(SpriteBuilder::new().texture(texture(label, 4, 4)).layer(layer))
        })
        .collect();

    engine.tick();

    assert_eq!(
        engine.sprites(),
        &[sprites[3], sprites[1], sprites[2], sprites[0]]
    );
    assert_eq!(drawn_textures(&engine), vec!["d", "b", "c", "a"]);
    assert_eq!(engine.canvas().calls()[0], DrawCall::Clear);
}

#[test]
fn layer_change_takes_effect_next_frame() {
    let mut engine = Engine::new(64, 64).unwrap();
    engine.spawn_sprite(
        SpriteBuilder::new()
            .texture(texture("low", 4, 4))
            .script(once(|ctx| ctx.set_layer(10))),
    );
    engine.spawn_sprite(SpriteBuilder::new().texture(texture("high", 4, 4)).layer(5));

    engine.tick();
    assert_eq!(drawn_textures(&engine), vec!["low", "high"]);
    engine.tick();
    assert_eq!(drawn_textures(&engine), vec!["high", "low"]);
}

#[test]
fn scripts_queue_and_processes_run_together() {
    let mut engine = Engine::new(64, 64).unwrap();
    let trace = Trace::default();
    let sprite = engine.spawn_sprite(
        SpriteBuilder::new()
            .script(logged("s", 2, &trace))
            .script(logged("t", 1, &trace))
            .process(logged("p", 3, &trace)),
    );

    for _ in 0..4 {
        engine.tick();
    }

    assert_eq!(
        *trace.lock().unwrap(),
        vec!["s1", "p1", "s2", "p2", "t1", "p3"]
    );
    assert!(engine.push_script(sprite, skip_frames(1)));
}

#[test]
fn parallel_completes_with_its_longest_step() {
    let mut engine = Engine::new(64, 64).unwrap();
    let trace = Trace::default();
    let done = Arc::clone(&trace);
    engine.spawn_sprite(SpriteBuilder::new().script(run_sequential([
        boxed(run_parallel([
            boxed(logged("one", 1, &trace)),
            boxed(logged("three", 3, &trace)),
        ])),
        boxed(once(move |_| done.lock().unwrap().push("after".into()))),
    ])));

    for _ in 0..3 {
        engine.tick();
    }

    assert_eq!(
        *trace.lock().unwrap(),
        vec!["one1", "three1", "three2", "three3", "after"]
    );
}

#[test]
fn skip_frames_delays_a_move() {
    let mut engine = Engine::new(64, 64).unwrap();
    let sprite = engine.spawn_sprite(SpriteBuilder::new().script(run_sequential([
        boxed(skip_frames(3)),
        boxed(once(|ctx| ctx.translate(5.0, 0.0))),
    ])));

    engine.tick();
    engine.tick();
    assert!(approx_eq(engine.position(sprite).unwrap().x, 0.0));
    engine.tick();
    assert!(approx_eq(engine.position(sprite).unwrap().x, 5.0));
}

#[test]
fn hidden_sprites_still_run_their_scripts() {
    let mut engine = Engine::new(64, 64).unwrap();
    let sprite = engine.spawn_sprite(
        SpriteBuilder::new()
            .texture(texture("ghost", 4, 4))
            .hidden(true)
            .script(run_sequential([
                boxed(skip_frames(2)),
                boxed(once(|ctx| ctx.set_hidden(false))),
            ])),
    );

    engine.tick();
    assert!(drawn_textures(&engine).is_empty());
    engine.tick();
    assert_eq!(drawn_textures(&engine), vec!["ghost"]);
    assert!(!engine.sprite(sprite).unwrap().hidden);
}

#[test]
fn sheet_cells_and_render_offset() {
    let mut engine = Engine::new(64, 64).unwrap();
    engine.set_render_offset(-2.0, 3.0);
    // 24x16 sheet of 8x16 cells: three columns, one row
    engine.spawn_sprite(
        SpriteBuilder::new()
            .texture(texture("sheet", 24, 16))
            .width(8.0)
            .height(16.0)
            .index(2)
            .at(10.0, 10.0),
    );
    // no cell size: the whole texture at its natural size
    engine.spawn_sprite(SpriteBuilder::new().texture(texture("whole", 5, 7)));

    engine.tick();

    let images: Vec<(Rect, Rect)> = engine
        .canvas()
        .images()
        .map(|(_, src, dest)| (src, dest))
        .collect();
    assert_eq!(
        images,
        vec![
            (Rect::new(16.0, 0.0, 8.0, 16.0), Rect::new(8.0, 13.0, 8.0, 16.0)),
            (Rect::new(0.0, 0.0, 5.0, 7.0), Rect::new(-2.0, 3.0, 5.0, 7.0)),
        ]
    );
}

#[test]
fn sprites_spawned_mid_frame_start_next_frame() {
    let mut engine = Engine::new(64, 64).unwrap();
    let trace = Trace::default();
    let child_trace = Arc::clone(&trace);
    engine.spawn_sprite(SpriteBuilder::new().script(once(move |ctx| {
        let trace = Arc::clone(&child_trace);
        ctx.spawn(SpriteBuilder::new().script(once(move |_| {
            trace.lock().unwrap().push("child".into());
        })));
    })));

    engine.tick();
    assert_eq!(engine.sprites().len(), 2);
    assert!(trace.lock().unwrap().is_empty());
    engine.tick();
    assert_eq!(*trace.lock().unwrap(), vec!["child"]);
}

#[test]
fn removed_sprite_is_skipped_later_in_the_frame() {
    let mut engine = Engine::new(64, 64).unwrap();
    let trace = Trace::default();
    let victim = engine.spawn_sprite(
        SpriteBuilder::new()
            .texture(texture("victim", 4, 4))
            .layer(1)
            .process(logged("victim", 10, &trace)),
    );
    engine.spawn_sprite(SpriteBuilder::new().hidden(true).script(once(move |ctx| {
        ctx.remove_sprite(victim);
    })));

    engine.tick();

    assert!(!engine.is_alive(victim));
    assert!(trace.lock().unwrap().is_empty());
    assert!(drawn_textures(&engine).is_empty());
    assert_eq!(engine.sprites().len(), 1);
}

#[test]
fn step_status_from_bool() {
    assert_eq!(StepStatus::from(true), StepStatus::Done);
    assert_eq!(StepStatus::from(false), StepStatus::Running);
}

#[test]
fn directly_despawned_sprites_leave_the_live_list() {
    let mut engine = Engine::new(64, 64).unwrap();
    let keeper = engine.spawn_sprite(SpriteBuilder::new().layer(1));
    for _ in 0..100 {
        engine.spawn_sprite(SpriteBuilder::new().script(once(|ctx| {
            let me = ctx.sprite();
            ctx.world_mut().despawn(me);
        })));
    }

    for _ in 0..5 {
        engine.tick();
    }

    assert_eq!(engine.sprites(), &[keeper]);
    assert!(engine.is_alive(keeper));
}
