//! Ready-made steps for common sprite effects.

use crate::context::SpriteContext;
use crate::script::{Step, StepStatus};

/// Sprite-sheet cycle: shows each cell of `cells` for `frames_per_cell`
/// frames by writing the sprite's `index`.
pub struct AnimateCells {
    cells: Vec<u32>,
    frames_per_cell: u32,
    looping: bool,
    cursor: usize,
    shown: u32,
}

impl Step for AnimateCells {
    fn resume(&mut self, ctx: &mut SpriteContext<'_>) -> StepStatus {
        if self.cells.is_empty() {
            return StepStatus::Done;
        }
        if self.shown == 0 {
            ctx.set_index(self.cells[self.cursor]);
        }
        self.shown += 1;
        if self.shown < self.frames_per_cell {
            return StepStatus::Running;
        }

        self.shown = 0;
        self.cursor += 1;
        if self.cursor < self.cells.len() {
            return StepStatus::Running;
        }
        if self.looping {
            self.cursor = 0;
            StepStatus::Running
        } else {
            StepStatus::Done
        }
    }
}

/// Cycle through `cells`, `frames_per_cell` frames each (at least one).
/// A non-looping cycle completes on the last frame of its last cell.
pub fn animate_cells(
    cells: impl IntoIterator<Item = u32>,
    frames_per_cell: u32,
    looping: bool,
) -> AnimateCells {
    AnimateCells {
        cells: cells.into_iter().collect(),
        frames_per_cell: frames_per_cell.max(1),
        looping,
        cursor: 0,
        shown: 0,
    }
}

/// Jitters the sprite around wherever it currently is. Each frame the
/// previous offset is undone before a new one is applied, so movement from
/// other scripts or processes is preserved.
pub struct Shake {
    frames: u32,
    amplitude: f32,
    resumed: u32,
    applied: (f32, f32),
}

impl Step for Shake {
    fn resume(&mut self, ctx: &mut SpriteContext<'_>) -> StepStatus {
        let (ox, oy) = self.applied;
        ctx.translate(-ox, -oy);
        self.applied = (0.0, 0.0);

        self.resumed = self.resumed.saturating_add(1);
        if self.resumed >= self.frames {
            return StepStatus::Done;
        }

        let dx = (fastrand::f32() * 2.0 - 1.0) * self.amplitude;
        let dy = (fastrand::f32() * 2.0 - 1.0) * self.amplitude;
        ctx.translate(dx, dy);
        self.applied = (dx, dy);
        StepStatus::Running
    }
}

/// Shake for `frames` frames by at most `amplitude` pixels per axis; the
/// sprite is back in place on the frame the shake completes.
pub fn shake(frames: u32, amplitude: f32) -> Shake {
    Shake {
        frames,
        amplitude: amplitude.abs(),
        resumed: 0,
        applied: (0.0, 0.0),
    }
}
