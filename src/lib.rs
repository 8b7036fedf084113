use std::path::{Path, PathBuf};

pub mod config;
pub mod error;
pub mod job_system;
pub mod naming;
pub mod resource_system;
pub mod retarget;
pub mod rig;

pub use retarget::{retarget_all, retarget_rig, Outcome, RetargetRequest};
pub use rig::{AnimationClip, Rig, Skeleton};

pub fn strip_extension(path: &Path) -> PathBuf {
    let stem = path.file_stem();

    match (path.parent(), stem) {
        (Some(parent), Some(stem)) => parent.join(stem),
        (None, Some(stem)) => PathBuf::from(stem),
        _ => path.to_path_buf(),
    }
}

/// Where a baked copy of `input` goes when no output path is given: `walk.json` -> `walk_root.json`.
pub fn default_output_path(input: &Path) -> PathBuf {
    let mut stem = strip_extension(input).into_os_string();
    stem.push(retarget::CLIP_SUFFIX);
    stem.push(".json");
    PathBuf::from(stem)
}
