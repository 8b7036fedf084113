use std::collections::HashSet;

use crate::{
    resource_system::file_formats::animationfile::Property,
    rig::{AnimationClip, ChannelId},
};

/// Appended to the source clip's name so the derived clip never collides with it.
pub const CLIP_SUFFIX: &str = "_root";

/// Builds a copy of `source` whose hip location channels now drive `root`.
///
/// The copy keeps every other channel as is. Hip location channels are re-created on `root`
/// under a group named after it, first occurrence per axis wins, and are then dropped from the hip.
/// `source` is left untouched.
pub fn migrate(source: &AnimationClip, hip: &str, root: &str) -> AnimationClip {
    let mut clip = source.clone();
    clip.name = format!("{}{}", source.name, CLIP_SUFFIX);

    let mut created = HashSet::<ChannelId>::new();
    for channel in source.channels_for(hip, Property::Location) {
        let id = channel.id.retarget(root);
        if !created.insert(id.clone()) {
            log::debug!(
                "clip `{}`: skipping duplicate {}.{}[{}]",
                source.name, hip, channel.id.property, channel.id.index
            );
            continue;
        }
        clip.add_channel(id, Some(root.to_string()))
            .keyframes
            .extend_from_slice(&channel.keyframes);
    }

    let removed = clip.remove_channels_for(hip, Property::Location);
    log::debug!(
        "clip `{}`: moved {} of {} location channels from `{}` to `{}`",
        clip.name,
        created.len(),
        removed,
        hip,
        root
    );
    clip
}
