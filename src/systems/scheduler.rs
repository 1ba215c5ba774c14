//! Per-sprite step scheduling.
//!
//! Each frame every live sprite gets, in order:
//! 1. one resumption of the head of its [`Scripts`] queue (popped when it
//!    completes, so the next script starts on the following frame), then
//! 2. one resumption of every one of its [`Processes`]; completed processes
//!    are dropped after the whole pass.
//!
//! Steps are taken out of their component while they run, so they may queue
//! scripts, start processes or remove their own sprite. Work added during a
//! pass is merged back behind the existing work and first runs next frame.

use bevy_ecs::prelude::*;
use std::mem;

use crate::components::scripts::{Processes, Scripts};
use crate::components::sprite::Sprite;
use crate::context::SpriteContext;
use crate::script::StepStatus;

/// Resume the head script of `sprite` once.
pub fn advance_scripts(world: &mut World, sprite: Entity) {
    let Some(mut head) = world
        .get_mut::<Scripts>(sprite)
        .and_then(|mut scripts| scripts.0.pop_front())
    else {
        return;
    };

    let status = head.resume(&mut SpriteContext::new(world, sprite));
    if status == StepStatus::Done {
        return;
    }
    if let Some(mut scripts) = world.get_mut::<Scripts>(sprite) {
        scripts.0.push_front(head);
    }
}

/// Resume every process of `sprite` once.
pub fn advance_processes(world: &mut World, sprite: Entity) {
    let Some(mut running) = world
        .get_mut::<Processes>(sprite)
        .map(|mut processes| mem::take(&mut processes.0))
    else {
        return;
    };
    if running.is_empty() {
        return;
    }

    let mut ctx = SpriteContext::new(world, sprite);
    running.retain_mut(|step| step.resume(&mut ctx) == StepStatus::Running);

    if let Some(mut processes) = world.get_mut::<Processes>(sprite) {
        let added = mem::replace(&mut processes.0, running);
        processes.0.extend(added);
    }
}

/// Scripts then processes. A sprite removed by its own script skips its
/// processes for the rest of the frame.
pub fn advance_sprite(world: &mut World, sprite: Entity) {
    advance_scripts(world, sprite);
    if world.get::<Sprite>(sprite).is_some() {
        advance_processes(world, sprite);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::SpriteBuilder;
    use crate::resources::spritelist::SpriteList;
    use crate::script::{Step, from_fn, once, skip_frames};
    use crate::systems::lifecycle::spawn_sprite;
    use std::sync::{Arc, Mutex};

    type Trace = Arc<Mutex<Vec<String>>>;

    fn recorder(name: &'static str, frames: u32, trace: &Trace) -> impl Step {
        let trace = Arc::clone(trace);
        let mut resumed = 0;
        from_fn(move |_| {
            resumed += 1;
            trace.lock().unwrap().push(format!("{name}{resumed}"));
            (resumed >= frames).into()
        })
    }

    fn setup() -> World {
        let mut world = World::new();
        world.insert_resource(SpriteList::default());
        world
    }

    #[test]
    fn test_scripts_run_one_at_a_time() {
        let mut world = setup();
        let trace = Trace::default();
        let sprite = spawn_sprite(
            &mut world,
            SpriteBuilder::new()
                .script(recorder("a", 2, &trace))
                .script(recorder("b", 1, &trace)),
        );

        for _ in 0..4 {
            advance_scripts(&mut world, sprite);
        }
        // `b` starts on the frame after `a` completes
        assert_eq!(*trace.lock().unwrap(), vec!["a1", "a2", "b1"]);
        assert!(world.get::<Scripts>(sprite).unwrap().is_empty());
    }

    #[test]
    fn test_processes_removed_after_pass() {
        let mut world = setup();
        let trace = Trace::default();
        let sprite = spawn_sprite(
            &mut world,
            SpriteBuilder::new()
                .process(recorder("p", 1, &trace))
                .process(recorder("q", 2, &trace))
                .process(recorder("r", 1, &trace)),
        );

        advance_processes(&mut world, sprite);
        assert_eq!(world.get::<Processes>(sprite).unwrap().len(), 1);
        advance_processes(&mut world, sprite);
        assert!(world.get::<Processes>(sprite).unwrap().is_empty());
        assert_eq!(*trace.lock().unwrap(), vec!["p1", "q1", "r1", "q2"]);
    }

    #[test]
    fn test_process_added_mid_pass_runs_next_frame() {
        let mut world = setup();
        let trace = Trace::default();
        let inner = Arc::clone(&trace);
        let sprite = spawn_sprite(
            &mut world,
            SpriteBuilder::new().process(once(move |ctx| {
                let trace = Arc::clone(&inner);
                ctx.add_process(once(move |_| trace.lock().unwrap().push("late".into())));
            })),
        );

        advance_processes(&mut world, sprite);
        assert!(trace.lock().unwrap().is_empty());
        assert_eq!(world.get::<Processes>(sprite).unwrap().len(), 1);
        advance_processes(&mut world, sprite);
        assert_eq!(*trace.lock().unwrap(), vec!["late"]);
    }

    #[test]
    fn test_script_removing_its_sprite() {
        let mut world = setup();
        let trace = Trace::default();
        let sprite = spawn_sprite(
            &mut world,
            SpriteBuilder::new()
                .script(once(|ctx| {
                    ctx.remove();
                }))
                .script(skip_frames(5))
                .process(recorder("p", 3, &trace)),
        );

        advance_sprite(&mut world, sprite);
        assert!(world.get::<Sprite>(sprite).is_none());
        assert!(trace.lock().unwrap().is_empty());
        // later frames are harmless
        advance_sprite(&mut world, sprite);
        assert!(world.resource::<SpriteList>().is_empty());
    }
}
