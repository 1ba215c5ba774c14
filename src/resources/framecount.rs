use bevy_ecs::prelude::Resource;

/// Number of frames the loop has completed.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameCount(pub u64);
