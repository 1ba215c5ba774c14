//! Step combinators.
//!
//! - [`run_sequential`]: each step runs to completion before the next one
//!   starts. When a step completes, the next one is resumed within the same
//!   resumption, so a frame boundary only ever falls where an underlying
//!   step suspends.
//! - [`run_parallel`]: every remaining step is resumed once per resumption;
//!   finished ones are dropped after the pass. Completes on the resumption in
//!   which the last step completes.
//! - [`skip_frames`]: suspends `n - 1` times, completes on the `n`-th
//!   resumption.
//! - [`from_fn`] / [`once`]: closures as steps.

use std::collections::VecDeque;

use crate::context::SpriteContext;
use crate::script::{Step, StepStatus};

pub struct Sequence {
    steps: VecDeque<Box<dyn Step>>,
}

impl Sequence {
    /// Steps not yet completed, including the current one.
    pub fn remaining(&self) -> usize {
        self.steps.len()
    }
}

impl Step for Sequence {
    fn resume(&mut self, ctx: &mut SpriteContext<'_>) -> StepStatus {
        while let Some(current) = self.steps.front_mut() {
            if current.resume(ctx) == StepStatus::Running {
                return StepStatus::Running;
            }
            self.steps.pop_front();
        }
        StepStatus::Done
    }
}

pub fn run_sequential(steps: impl IntoIterator<Item = Box<dyn Step>>) -> Sequence {
    Sequence {
        steps: steps.into_iter().collect(),
    }
}

pub struct Parallel {
    steps: Vec<Box<dyn Step>>,
}

impl Parallel {
    /// Steps still running.
    pub fn remaining(&self) -> usize {
        self.steps.len()
    }
}

impl Step for Parallel {
    fn resume(&mut self, ctx: &mut SpriteContext<'_>) -> StepStatus {
        // retain_mut visits in order and compacts after each decision, so a
        // finished step never shifts one that has not been resumed yet.
        self.steps
            .retain_mut(|step| step.resume(ctx) == StepStatus::Running);
        self.steps.is_empty().into()
    }
}

pub fn run_parallel(steps: impl IntoIterator<Item = Box<dyn Step>>) -> Parallel {
    Parallel {
        steps: steps.into_iter().collect(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkipFrames {
    frames: u32,
    resumed: u32,
}

impl Step for SkipFrames {
    fn resume(&mut self, _ctx: &mut SpriteContext<'_>) -> StepStatus {
        self.resumed = self.resumed.saturating_add(1);
        (self.resumed >= self.frames).into()
    }
}

/// A delay of `frames` resumptions. `0` and `1` both complete immediately.
pub fn skip_frames(frames: u32) -> SkipFrames {
    SkipFrames { frames, resumed: 0 }
}

pub struct FnStep<F>(F);

impl<F> Step for FnStep<F>
where
    F: FnMut(&mut SpriteContext<'_>) -> StepStatus + Send + Sync + 'static,
{
    fn resume(&mut self, ctx: &mut SpriteContext<'_>) -> StepStatus {
        (self.0)(ctx)
    }
}

/// A step driven by a closure; the closure's captures are the step's state.
pub fn from_fn<F>(f: F) -> FnStep<F>
where
    F: FnMut(&mut SpriteContext<'_>) -> StepStatus + Send + Sync + 'static,
{
    FnStep(f)
}

pub struct Once<F>(Option<F>);

impl<F> Step for Once<F>
where
    F: FnOnce(&mut SpriteContext<'_>) + Send + Sync + 'static,
{
    fn resume(&mut self, ctx: &mut SpriteContext<'_>) -> StepStatus {
        if let Some(action) = self.0.take() {
            action(ctx);
        }
        StepStatus::Done
    }
}

/// Run `action` on the first resumption and complete.
pub fn once<F>(action: F) -> Once<F>
where
    F: FnOnce(&mut SpriteContext<'_>) + Send + Sync + 'static,
{
    Once(Some(action))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::boxed;
    use bevy_ecs::prelude::*;
    use std::sync::{Arc, Mutex};

    type Trace = Arc<Mutex<Vec<&'static str>>>;

    /// Completes on its `n`-th resumption, logging its name every time.
    fn counted(name: &'static str, n: u32, trace: &Trace) -> Box<dyn Step> {
        let trace = Arc::clone(trace);
        let mut resumed = 0;
        boxed(from_fn(move |_| {
            trace.lock().unwrap().push(name);
            resumed += 1;
            (resumed >= n).into()
        }))
    }

    fn frame(step: &mut dyn Step, world: &mut World, sprite: Entity) -> StepStatus {
        step.resume(&mut SpriteContext::new(world, sprite))
    }

    fn setup() -> (World, Entity, Trace) {
        let mut world = World::new();
        let sprite = world.spawn_empty().id();
        (world, sprite, Trace::default())
    }

    #[test]
    fn test_skip_frames_completes_on_nth_resumption() {
        let (mut world, sprite, _) = setup();
        let mut step = skip_frames(3);
        assert_eq!(frame(&mut step, &mut world, sprite), StepStatus::Running);
        assert_eq!(frame(&mut step, &mut world, sprite), StepStatus::Running);
        assert_eq!(frame(&mut step, &mut world, sprite), StepStatus::Done);
    }

    #[test]
    fn test_skip_zero_or_one_frame_is_immediate() {
        let (mut world, sprite, _) = setup();
        assert!(frame(&mut skip_frames(0), &mut world, sprite).is_done());
        assert!(frame(&mut skip_frames(1), &mut world, sprite).is_done());
    }

    #[test]
    fn test_parallel_drops_finished_and_completes_with_last() {
        let (mut world, sprite, trace) = setup();
        let mut step = run_parallel([counted("s1", 1, &trace), counted("s2", 3, &trace)]);

        assert_eq!(frame(&mut step, &mut world, sprite), StepStatus::Running);
        assert_eq!(step.remaining(), 1);
        assert_eq!(frame(&mut step, &mut world, sprite), StepStatus::Running);
        assert_eq!(frame(&mut step, &mut world, sprite), StepStatus::Done);
        assert_eq!(step.remaining(), 0);

        assert_eq!(*trace.lock().unwrap(), vec!["s1", "s2", "s2", "s2"]);
    }

    #[test]
    fn test_parallel_finished_step_does_not_skip_its_neighbour() {
        let (mut world, sprite, trace) = setup();
        let mut step = run_parallel([
            counted("a", 1, &trace),
            counted("b", 1, &trace),
            counted("c", 2, &trace),
        ]);
        frame(&mut step, &mut world, sprite);
        assert_eq!(*trace.lock().unwrap(), vec!["a", "b", "c"]);
        assert!(frame(&mut step, &mut world, sprite).is_done());
    }

    #[test]
    fn test_empty_parallel_and_sequence_complete_immediately() {
        let (mut world, sprite, _) = setup();
        assert!(frame(&mut run_parallel([]), &mut world, sprite).is_done());
        assert!(frame(&mut run_sequential([]), &mut world, sprite).is_done());
    }

    #[test]
    fn test_sequence_hands_off_within_the_same_resumption() {
        let (mut world, sprite, trace) = setup();
        let mut step = run_sequential([counted("a", 2, &trace), counted("b", 2, &trace)]);

        assert_eq!(frame(&mut step, &mut world, sprite), StepStatus::Running);
        assert_eq!(*trace.lock().unwrap(), vec!["a"]);
        // `a` completes, `b` gets its first resumption in the same call.
        assert_eq!(frame(&mut step, &mut world, sprite), StepStatus::Running);
        assert_eq!(*trace.lock().unwrap(), vec!["a", "a", "b"]);
        assert_eq!(step.remaining(), 1);
        assert_eq!(frame(&mut step, &mut world, sprite), StepStatus::Done);
    }

    #[test]
    fn test_sequence_with_skip_frames_delays() {
        let (mut world, sprite, trace) = setup();
        let mut step = run_sequential([boxed(skip_frames(3)), counted("after", 1, &trace)]);
        assert!(!frame(&mut step, &mut world, sprite).is_done());
        assert!(!frame(&mut step, &mut world, sprite).is_done());
        assert!(trace.lock().unwrap().is_empty());
        assert!(frame(&mut step, &mut world, sprite).is_done());
        assert_eq!(*trace.lock().unwrap(), vec!["after"]);
    }

    #[test]
    fn test_once_runs_action_a_single_time() {
        let (mut world, sprite, trace) = setup();
        let log = Arc::clone(&trace);
        let mut step = once(move |_| log.lock().unwrap().push("fired"));
        assert!(frame(&mut step, &mut world, sprite).is_done());
        assert!(frame(&mut step, &mut world, sprite).is_done());
        assert_eq!(trace.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_nested_composites() {
        let (mut world, sprite, trace) = setup();
        let mut step = run_parallel([
            boxed(run_sequential([counted("x", 1, &trace), counted("y", 1, &trace)])),
            counted("z", 2, &trace),
        ]);
        assert!(!frame(&mut step, &mut world, sprite).is_done());
        assert!(frame(&mut step, &mut world, sprite).is_done());
        assert_eq!(*trace.lock().unwrap(), vec!["x", "y", "z", "z"]);
    }
}
