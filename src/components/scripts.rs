//! Per-sprite cooperative task containers.
//!
//! - [`Scripts`] is a FIFO timeline: only the head is resumed, once per
//!   frame, and the next one starts on the frame after the head completes.
//! - [`Processes`] is an unordered set of concurrent effects: every process
//!   is resumed once per frame and dropped when it completes.
//!
//! See [`crate::systems::scheduler`] for the per-frame stepping rules.

use bevy_ecs::prelude::Component;
use std::collections::VecDeque;

use crate::script::Step;

#[derive(Component, Default)]
pub struct Scripts(pub VecDeque<Box<dyn Step>>);

impl Scripts {
    /// Queue `step` behind the current scripts.
    pub fn push(&mut self, step: impl Step) {
        self.0.push_back(Box::new(step));
    }

    /// Number of queued scripts.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no script is queued.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Drop every queued script.
    pub fn clear(&mut self) {
        self.0.clear();
    }
}

#[derive(Component, Default)]
pub struct Processes(pub Vec<Box<dyn Step>>);

impl Processes {
    /// Start `step` running alongside the other processes.
    pub fn push(&mut self, step: impl Step) {
        self.0.push(Box::new(step));
    }

    /// Number of running processes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no process is running.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Stop every process.
    pub fn clear(&mut self) {
        self.0.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::skip_frames;

    #[test]
    fn test_push_len_clear() {
        let mut scripts = Scripts::default();
        assert!(scripts.is_empty());
        scripts.push(skip_frames(1));
        scripts.push(skip_frames(2));
        assert_eq!(scripts.len(), 2);
        scripts.clear();
        assert!(scripts.is_empty());

        let mut processes = Processes::default();
        processes.push(skip_frames(1));
        assert_eq!(processes.len(), 1);
        processes.clear();
        assert!(processes.is_empty());
    }
}
