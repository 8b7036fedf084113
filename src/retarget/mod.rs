//! Root-motion retargeting: move a hip bone's translation onto a freshly inserted root bone.
//!
//! Runs in three steps per rig. [`bone_graph::insert_root_bone`] always runs,
//! [`channel_migrator::migrate`] and [`rest_pose::zero_hip_rest_location`] only when the rig
//! has an active clip. The steps are not transactional: a rig without animation still gets
//! its new bone and reports [`Outcome::StructuralOnly`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{error::GraphError, rig::Rig};

pub mod bone_graph;
pub mod channel_migrator;
pub mod rest_pose;

pub use bone_graph::insert_root_bone;
pub use channel_migrator::{migrate, CLIP_SUFFIX};
pub use rest_pose::zero_hip_rest_location;

pub const DEFAULT_HIP_BONE: &str = "mixamorig:Hips";
pub const DEFAULT_ROOT_BONE: &str = "root_bone";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct RetargetRequest {
    pub hip_bone_name: String,
    pub root_bone_name: String,
}
impl Default for RetargetRequest {
    fn default() -> Self {
        Self {
            hip_bone_name: DEFAULT_HIP_BONE.to_string(),
            root_bone_name: DEFAULT_ROOT_BONE.to_string(),
        }
    }
}

/// What happened to one rig. None of these abort a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// root bone already present, nothing changed
    AlreadyApplied,
    /// hip bone missing, nothing changed
    HipNotFound,
    /// root bone inserted, the rig had no active clip
    StructuralOnly,
    FullyRetargeted,
}

impl Outcome {
    /// True when the rig was changed.
    pub fn mutated(self) -> bool {
        matches!(self, Outcome::StructuralOnly | Outcome::FullyRetargeted)
    }
}

impl From<GraphError> for Outcome {
    fn from(err: GraphError) -> Self {
        match err {
            GraphError::AlreadyApplied { .. } => Outcome::AlreadyApplied,
            GraphError::HipNotFound { .. } => Outcome::HipNotFound,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Outcome::AlreadyApplied => "already applied",
            Outcome::HipNotFound => "hip not found",
            Outcome::StructuralOnly => "root bone added, no animation",
            Outcome::FullyRetargeted => "retargeted",
        };
        f.write_str(text)
    }
}

pub fn retarget_rig(rig: &mut Rig, request: &RetargetRequest) -> Outcome {
    let hip = request.hip_bone_name.as_str();
    let root = request.root_bone_name.as_str();

    if let Err(err) = insert_root_bone(&mut rig.skeleton, hip, root) {
        log::warn!("{}: {}", rig.name, err);
        return err.into();
    }

    let Some(source) = rig.active_clip() else {
        log::info!("{}: no animation found, only the bone hierarchy changed", rig.name);
        return Outcome::StructuralOnly;
    };
    let mut clip = migrate(source, hip, root);
    clip.name = unique_clip_name(rig, clip.name);
    let clip_name = clip.name.clone();
    let clip_id = rig.add_clip(clip);
    rig.set_active_clip(Some(clip_id));

    zero_hip_rest_location(&mut rig.skeleton, hip);

    log::info!(
        "{}: moved `{}` translation onto `{}`, active clip is now `{}`",
        rig.name,
        hip,
        root,
        clip_name
    );
    Outcome::FullyRetargeted
}

/// Numbers `name` as `name.001`, `name.002`, ... while the rig already owns a clip called that.
fn unique_clip_name(rig: &Rig, name: String) -> String {
    if rig.clip_by_name(&name).is_none() {
        return name;
    }
    let mut n = 1;
    loop {
        let candidate = format!("{}.{:03}", name, n);
        if rig.clip_by_name(&candidate).is_none() {
            return candidate;
        }
        n += 1;
    }
}

/// Retargets every rig in order, one outcome per rig.
pub fn retarget_all<'a, I>(rigs: I, request: &RetargetRequest) -> Vec<Outcome>
where
    I: IntoIterator<Item = &'a mut Rig>,
{
    rigs.into_iter()
        .map(|rig| retarget_rig(rig, request))
        .collect()
}
