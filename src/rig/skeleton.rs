use std::collections::HashMap;

use generational_arena::{Arena, Index};
use glam::{Quat, Vec3};

use crate::error::SkeletonError;

#[derive(Hash, Eq, PartialEq, Clone, Copy, Debug)]
pub struct BoneId(pub Index);
impl From<BoneId> for Index {
    fn from(id: BoneId) -> Self {
        id.0
    }
}

/// Rest-pose (edit space) bone.
#[derive(Clone, Debug, PartialEq)]
pub struct Bone {
    name: String,
    pub head: Vec3,
    pub tail: Vec3,
    pub roll: f32,
    parent: Option<BoneId>,
}
impl Bone {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<BoneId> {
        self.parent
    }
}

/// Default transform used when no channel drives the bone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PoseBone {
    pub location: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}
impl Default for PoseBone {
    fn default() -> Self {
        Self {
            location: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Pose {
    bones: HashMap<BoneId, PoseBone>,
}
impl Pose {
    pub fn get(&self, id: BoneId) -> Option<&PoseBone> {
        self.bones.get(&id)
    }

    pub fn get_mut(&mut self, id: BoneId) -> Option<&mut PoseBone> {
        self.bones.get_mut(&id)
    }

    pub fn insert(&mut self, id: BoneId, pose_bone: PoseBone) {
        self.bones.insert(id, pose_bone);
    }

    pub fn len(&self) -> usize {
        self.bones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }
}

/// Tree-like structure of bones. Bones are never removed, so arena order is insertion order.
#[derive(Clone, Debug, Default)]
pub struct Skeleton {
    bones: Arena<Bone>,
    by_name: HashMap<String, BoneId>,
    pose: Option<Pose>,
}

impl Skeleton {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skeleton that tracks a default pose for every bone.
    pub fn with_pose() -> Self {
        Self {
            pose: Some(Pose::default()),
            ..Self::default()
        }
    }

    /// Adds a top-level bone. With pose data present it also gets an identity pose bone.
    pub fn add_bone(
        &mut self,
        name: impl Into<String>,
        head: Vec3,
        tail: Vec3,
        roll: f32,
    ) -> Result<BoneId, SkeletonError> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(SkeletonError::DuplicateBone(name));
        }
        let id = BoneId(self.bones.insert(Bone {
            name: name.clone(),
            head,
            tail,
            roll,
            parent: None,
        }));
        self.by_name.insert(name, id);
        if let Some(pose) = self.pose.as_mut() {
            pose.insert(id, PoseBone::default());
        }
        Ok(id)
    }

    /// Replaces whatever parent `child` had.
    pub fn set_parent(&mut self, child: BoneId, parent: Option<BoneId>) -> Result<(), SkeletonError> {
        if !self.bones.contains(child.into()) {
            return Err(SkeletonError::UnknownBone);
        }
        if let Some(parent) = parent {
            if !self.bones.contains(parent.into()) {
                return Err(SkeletonError::UnknownBone);
            }
            if self.ancestors_and_self(parent).any(|id| id == child) {
                return Err(SkeletonError::Cycle {
                    child: self.bones[child.0].name.clone(),
                    parent: self.bones[parent.0].name.clone(),
                });
            }
        }
        self.bones[child.0].parent = parent;
        Ok(())
    }

    fn ancestors_and_self(&self, id: BoneId) -> impl Iterator<Item = BoneId> + '_ {
        std::iter::successors(Some(id), move |id| self.bones.get(id.0).and_then(|b| b.parent))
    }

    pub fn find(&self, name: &str) -> Option<BoneId> {
        self.by_name.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn bone(&self, id: BoneId) -> Option<&Bone> {
        self.bones.get(id.0)
    }

    pub fn bone_mut(&mut self, id: BoneId) -> Option<&mut Bone> {
        self.bones.get_mut(id.0)
    }

    pub fn bone_by_name(&self, name: &str) -> Option<&Bone> {
        self.find(name).and_then(|id| self.bone(id))
    }

    pub fn parent_name(&self, id: BoneId) -> Option<&str> {
        self.bone(id)
            .and_then(|bone| bone.parent)
            .and_then(|parent| self.bone(parent))
            .map(Bone::name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (BoneId, &Bone)> {
        self.bones.iter().map(|(idx, bone)| (BoneId(idx), bone))
    }

    pub fn len(&self) -> usize {
        self.bones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    pub fn pose(&self) -> Option<&Pose> {
        self.pose.as_ref()
    }

    pub fn pose_mut(&mut self) -> Option<&mut Pose> {
        self.pose.as_mut()
    }

    /// Starts tracking pose data, giving every existing bone an identity pose bone.
    pub fn enable_pose(&mut self) -> &mut Pose {
        let ids: Vec<BoneId> = self.iter().map(|(id, _)| id).collect();
        self.pose.get_or_insert_with(|| {
            let mut pose = Pose::default();
            for id in ids {
                pose.insert(id, PoseBone::default());
            }
            pose
        })
    }

    /// Pose-space lookup. `None` when there is no pose data or no entry for the bone.
    pub fn pose_bone(&self, name: &str) -> Option<&PoseBone> {
        let id = self.find(name)?;
        self.pose.as_ref()?.get(id)
    }

    pub fn pose_bone_mut(&mut self, name: &str) -> Option<&mut PoseBone> {
        let id = self.find(name)?;
        self.pose.as_mut()?.get_mut(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> (Skeleton, BoneId, BoneId, BoneId) {
        let mut skeleton = Skeleton::with_pose();
        let a = skeleton.add_bone("a", Vec3::ZERO, Vec3::Y, 0.0).unwrap();
        let b = skeleton.add_bone("b", Vec3::Y, Vec3::Y * 2.0, 0.0).unwrap();
        let c = skeleton.add_bone("c", Vec3::Y * 2.0, Vec3::Y * 3.0, 0.0).unwrap();
        skeleton.set_parent(b, Some(a)).unwrap();
        skeleton.set_parent(c, Some(b)).unwrap();
        (skeleton, a, b, c)
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let (mut skeleton, ..) = chain();
        let err = skeleton.add_bone("b", Vec3::ZERO, Vec3::X, 0.0).unwrap_err();
        assert_eq!(err, SkeletonError::DuplicateBone("b".to_string()));
        assert_eq!(skeleton.len(), 3);
    }

    #[test]
    fn reparenting_into_a_descendant_is_a_cycle() {
        let (mut skeleton, a, _, c) = chain();
        let err = skeleton.set_parent(a, Some(c)).unwrap_err();
        assert!(matches!(err, SkeletonError::Cycle { .. }));
        assert_eq!(skeleton.bone(a).unwrap().parent(), None);

        assert!(matches!(
            skeleton.set_parent(a, Some(a)),
            Err(SkeletonError::Cycle { .. })
        ));
    }

    #[test]
    fn reparent_overwrites_and_clears() {
        let (mut skeleton, a, _, c) = chain();
        skeleton.set_parent(c, Some(a)).unwrap();
        assert_eq!(skeleton.parent_name(c), Some("a"));
        skeleton.set_parent(c, None).unwrap();
        assert_eq!(skeleton.parent_name(c), None);
    }

    #[test]
    fn iteration_follows_insertion_order() {
        let (skeleton, ..) = chain();
        let names: Vec<_> = skeleton.iter().map(|(_, b)| b.name()).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn pose_tracks_new_bones() {
        let (mut skeleton, ..) = chain();
        assert_eq!(skeleton.pose().unwrap().len(), 3);
        skeleton.add_bone("d", Vec3::ZERO, Vec3::X, 0.0).unwrap();
        assert_eq!(skeleton.pose_bone("d"), Some(&PoseBone::default()));

        let mut bare = Skeleton::new();
        bare.add_bone("x", Vec3::ZERO, Vec3::X, 0.0).unwrap();
        assert!(bare.pose_bone("x").is_none());
        bare.enable_pose();
        assert_eq!(bare.pose_bone("x"), Some(&PoseBone::default()));
    }
}
