use generational_arena::Arena;

pub mod animation;
pub mod skeleton;

pub use animation::{AnimationClip, Channel, ChannelId, ClipId};
pub use skeleton::{Bone, BoneId, Pose, PoseBone, Skeleton};

/// One armature: its skeleton plus every clip it owns. At most one clip is active.
#[derive(Clone, Debug)]
pub struct Rig {
    pub name: String,
    pub skeleton: Skeleton,
    clips: Arena<AnimationClip>,
    active_clip: Option<ClipId>,
}

impl Rig {
    pub fn new(name: impl Into<String>, skeleton: Skeleton) -> Self {
        Self {
            name: name.into(),
            skeleton,
            clips: Arena::new(),
            active_clip: None,
        }
    }

    pub fn add_clip(&mut self, clip: AnimationClip) -> ClipId {
        ClipId(self.clips.insert(clip))
    }

    pub fn clip(&self, id: ClipId) -> Option<&AnimationClip> {
        self.clips.get(id.0)
    }

    pub fn clip_by_name(&self, name: &str) -> Option<ClipId> {
        self.clips().find(|(_, clip)| clip.name == name).map(|(id, _)| id)
    }

    pub fn clips(&self) -> impl Iterator<Item = (ClipId, &AnimationClip)> {
        self.clips.iter().map(|(idx, clip)| (ClipId(idx), clip))
    }

    pub fn clip_count(&self) -> usize {
        self.clips.len()
    }

    pub fn active_clip_id(&self) -> Option<ClipId> {
        self.active_clip
    }

    pub fn active_clip(&self) -> Option<&AnimationClip> {
        self.active_clip.and_then(|id| self.clip(id))
    }

    /// Points the rig at another clip. The previous one stays owned by the rig.
    /// Returns false, leaving the rig as it was, for a handle from another rig.
    pub fn set_active_clip(&mut self, id: Option<ClipId>) -> bool {
        if let Some(id) = id {
            if !self.clips.contains(id.0) {
                return false;
            }
        }
        self.active_clip = id;
        true
    }
}
