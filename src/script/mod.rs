//! Cooperative steps.
//!
//! A [`Step`] is a resumable unit of per-frame work owned by a sprite. The
//! scheduler calls [`Step::resume`] at most once per frame; the step does a
//! slice of work, keeps whatever state it needs in `self`, and reports whether
//! it has finished. Nothing preempts a step: a step that never returns
//! [`StepStatus::Done`] runs forever, and a step that never returns at all
//! stalls the whole frame.
//!
//! Steps compose: [`run_sequential`], [`run_parallel`] and [`skip_frames`]
//! build steps out of steps, so a composite can itself be queued as a script
//! or started as a process.
//!
//! # Example
//!
//! ```ignore
//! let walk = run_sequential([
//!     boxed(from_fn(|ctx| { ctx.translate(1.0, 0.0); StepStatus::Done })),
//!     boxed(skip_frames(10)),
//!     boxed(animate_cells([0, 1, 2, 3], 6, false)),
//! ]);
//! engine.push_script(hero, walk);
//! engine.add_process(hero, shake(30, 2.0));
//! ```

pub mod combinators;
pub mod effects;

pub use combinators::{
    FnStep, Once, Parallel, Sequence, SkipFrames, from_fn, once, run_parallel, run_sequential,
    skip_frames,
};
pub use effects::{AnimateCells, Shake, animate_cells, shake};

use crate::context::SpriteContext;

/// Outcome of one resumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// Suspended; resume again next frame.
    Running,
    /// Finished; the owner drops the step.
    Done,
}

impl StepStatus {
    pub fn is_done(self) -> bool {
        self == StepStatus::Done
    }
}

impl From<bool> for StepStatus {
    /// `true` means completed.
    fn from(done: bool) -> Self {
        if done {
            StepStatus::Done
        } else {
            StepStatus::Running
        }
    }
}

/// Resumable per-frame work.
pub trait Step: Send + Sync + 'static {
    fn resume(&mut self, ctx: &mut SpriteContext<'_>) -> StepStatus;
}

/// Box a step for the combinators.
pub fn boxed(step: impl Step) -> Box<dyn Step> {
    Box::new(step)
}
