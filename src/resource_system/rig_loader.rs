use std::{collections::HashSet, fs::File, io::BufReader, path::Path};

use glam::{Quat, Vec3};

use crate::{
    error::{FormatError, LoadError, SkeletonError},
    rig::{AnimationClip, ChannelId, PoseBone, Rig, Skeleton},
};

use super::file_formats::{animationfile, rigfile, skeletonfile};

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> LoadError {
    let path = path.to_path_buf();
    move |source| LoadError::Io { path, source }
}

fn load_json<T>(path: &Path) -> Result<T, LoadError>
where
    T: serde::de::DeserializeOwned,
{
    let json_file = File::open(path).map_err(io_error(path))?;
    let json_reader = BufReader::new(json_file);
    let value: T = serde_json::from_reader(json_reader)?;
    Ok(value)
}

pub fn ensure_parent_dir_exists(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

pub fn load_rigs(path: &Path) -> Result<Vec<Rig>, LoadError> {
    let file: rigfile::RigFile = load_json(path)?;
    let rigs = file
        .rigs
        .into_iter()
        .map(rig_from_file)
        .collect::<Result<Vec<_>, _>>()?;
    log::debug!("loaded {} rigs from {}", rigs.len(), path.display());
    Ok(rigs)
}

pub fn save_rigs(path: &Path, rigs: &[Rig]) -> Result<(), LoadError> {
    let file = rigfile::RigFile {
        rigs: rigs.iter().map(rig_to_file).collect(),
    };
    let json = serde_json::to_string_pretty(&file)?;
    ensure_parent_dir_exists(path).map_err(io_error(path))?;
    std::fs::write(path, json).map_err(io_error(path))?;
    Ok(())
}

fn skeleton_from_file(rig: &str, file: skeletonfile::Skeleton) -> Result<Skeleton, FormatError> {
    let skeleton_err = |source: SkeletonError| FormatError::Skeleton {
        rig: rig.to_string(),
        source,
    };
    let mut skeleton = if file.pose.is_some() {
        Skeleton::with_pose()
    } else {
        Skeleton::new()
    };

    // all bones first, parents may be listed after their children
    let mut ids = Vec::with_capacity(file.bones.len());
    for bone in &file.bones {
        let id = skeleton
            .add_bone(
                bone.name.clone(),
                Vec3::from_array(bone.head),
                Vec3::from_array(bone.tail),
                bone.roll,
            )
            .map_err(skeleton_err)?;
        ids.push(id);
    }
    for (bone, id) in file.bones.iter().zip(ids) {
        let Some(parent_name) = &bone.parent else {
            continue;
        };
        let parent = skeleton
            .find(parent_name)
            .ok_or_else(|| FormatError::UnknownParent {
                rig: rig.to_string(),
                bone: bone.name.clone(),
                parent: parent_name.clone(),
            })?;
        skeleton.set_parent(id, Some(parent)).map_err(skeleton_err)?;
    }

    for entry in file.pose.into_iter().flatten() {
        let pose_bone = skeleton
            .pose_bone_mut(&entry.bone)
            .ok_or_else(|| FormatError::UnknownPoseBone {
                rig: rig.to_string(),
                bone: entry.bone.clone(),
            })?;
        *pose_bone = PoseBone {
            location: Vec3::from_array(entry.location),
            rotation: Quat::from_array(entry.rotation),
            scale: Vec3::from_array(entry.scale),
        };
    }

    Ok(skeleton)
}

fn clip_from_file(rig: &str, file: animationfile::AnimationClip) -> Result<AnimationClip, FormatError> {
    let mut clip = AnimationClip::new(file.name);
    for channel in file.channels {
        if channel.index as usize >= channel.property.component_count() {
            return Err(FormatError::ComponentOutOfRange {
                rig: rig.to_string(),
                clip: clip.name.clone(),
                target: channel.target,
                property: channel.property,
                index: channel.index,
            });
        }
        let id = ChannelId::new(channel.target, channel.property, channel.index);
        clip.add_channel(id, channel.group).keyframes = channel.keyframes;
    }
    Ok(clip)
}

/// Converts a file rig into a runtime rig, validating names, hierarchy, clips and channel axes.
pub fn rig_from_file(file: rigfile::Rig) -> Result<Rig, FormatError> {
    let skeleton = skeleton_from_file(&file.name, file.skeleton)?;
    let mut rig = Rig::new(file.name, skeleton);

    let mut clip_names = HashSet::new();
    for clip in file.clips {
        if !clip_names.insert(clip.name.clone()) {
            return Err(FormatError::DuplicateClip {
                rig: rig.name.clone(),
                clip: clip.name,
            });
        }
        let clip = clip_from_file(&rig.name, clip)?;
        rig.add_clip(clip);
    }

    if let Some(active) = file.active_clip {
        let id = rig
            .clip_by_name(&active)
            .ok_or_else(|| FormatError::UnknownActiveClip {
                rig: rig.name.clone(),
                clip: active.clone(),
            })?;
        rig.set_active_clip(Some(id));
    }

    Ok(rig)
}

fn skeleton_to_file(skeleton: &Skeleton) -> skeletonfile::Skeleton {
    let bones = skeleton
        .iter()
        .map(|(id, bone)| skeletonfile::Bone {
            name: bone.name().to_string(),
            head: bone.head.to_array(),
            tail: bone.tail.to_array(),
            roll: bone.roll,
            parent: skeleton.parent_name(id).map(str::to_string),
        })
        .collect();
    let pose = skeleton.pose().map(|pose| {
        skeleton
            .iter()
            .filter_map(|(id, bone)| {
                pose.get(id).map(|pose_bone| skeletonfile::PoseBone {
                    bone: bone.name().to_string(),
                    location: pose_bone.location.to_array(),
                    rotation: pose_bone.rotation.to_array(),
                    scale: pose_bone.scale.to_array(),
                })
            })
            .collect()
    });
    skeletonfile::Skeleton { bones, pose }
}

fn clip_to_file(clip: &AnimationClip) -> animationfile::AnimationClip {
    animationfile::AnimationClip {
        name: clip.name.clone(),
        channels: clip
            .channels()
            .iter()
            .map(|channel| animationfile::Channel {
                target: channel.id.target.clone(),
                property: channel.id.property,
                index: channel.id.index,
                group: channel.group.clone(),
                keyframes: channel.keyframes.clone(),
            })
            .collect(),
    }
}

pub fn rig_to_file(rig: &Rig) -> rigfile::Rig {
    rigfile::Rig {
        name: rig.name.clone(),
        skeleton: skeleton_to_file(&rig.skeleton),
        clips: rig.clips().map(|(_, clip)| clip_to_file(clip)).collect(),
        active_clip: rig.active_clip().map(|clip| clip.name.clone()),
    }
}
