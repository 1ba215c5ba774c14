use bevy_ecs::prelude::*;

use crate::components::mapposition::MapPosition;
use crate::components::sprite::Sprite;
use crate::components::zindex::ZIndex;
use crate::resources::canvas::Canvas;
use crate::resources::framecount::FrameCount;
use crate::resources::renderoffset::RenderOffset;
use crate::resources::spritelist::SpriteList;
use crate::systems::scheduler::advance_sprite;

/// One frame: clear the canvas, stably sort the live list by layer, then for
/// each sprite in that order advance its scripts and processes and, unless
/// hidden, draw it.
///
/// Exclusive system: steps get the whole world. Sprites spawned during the
/// frame are first stepped and drawn next frame; removed ones are skipped
/// from the moment they are removed.
pub fn frame_loop(world: &mut World) {
    world.resource_mut::<Canvas>().clear();
    sort_sprites_by_layer(world);

    let order = world.resource::<SpriteList>().snapshot();
    for sprite in order {
        if world.get::<Sprite>(sprite).is_none() {
            continue;
        }
        advance_sprite(world, sprite);
        draw_sprite(world, sprite);
    }

    world.resource_mut::<FrameCount>().0 += 1;
}

/// Drop entries whose entity is gone (despawned without going through
/// [`remove_sprite`](crate::systems::lifecycle::remove_sprite)), then
/// stable sort: sprites sharing a layer keep their previous relative order.
pub fn sort_sprites_by_layer(world: &mut World) {
    world.resource_scope(|world, mut list: Mut<SpriteList>| {
        list.0.retain(|sprite| world.get::<Sprite>(*sprite).is_some());
        list.0
            .sort_by_key(|sprite| world.get::<ZIndex>(*sprite).copied().unwrap_or_default());
    });
}

/// Record the sprite's image (whole texture or current sheet cell) at its
/// position plus the global [`RenderOffset`]. Hidden or removed sprites draw
/// nothing.
pub fn draw_sprite(world: &mut World, sprite: Entity) {
    let offset = world
        .get_resource::<RenderOffset>()
        .copied()
        .unwrap_or_default();
    let Some(data) = world.get::<Sprite>(sprite) else {
        return;
    };
    if data.hidden {
        return;
    }
    let Some(at) = world.get::<MapPosition>(sprite).copied() else {
        return;
    };
    let texture = data.texture.clone();
    let src = data.source_rect();

    world
        .resource_mut::<Canvas>()
        .draw_image(texture, src, at.x + offset.x, at.y + offset.y);
}
