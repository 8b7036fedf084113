use serde::{Deserialize, Serialize};

use super::{animationfile, skeletonfile};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Rig {
    pub name: String,
    pub skeleton: skeletonfile::Skeleton,
    #[serde(default)]
    pub clips: Vec<animationfile::AnimationClip>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_clip: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct RigFile {
    pub rigs: Vec<Rig>,
}
