use glam::Vec3;

use crate::rig::Skeleton;

/// Clears the hip's default location once its location channels are gone from the active clip,
/// so a stale offset cannot leak into playback. Does nothing without a pose entry for the hip.
pub fn zero_hip_rest_location(skeleton: &mut Skeleton, hip: &str) {
    match skeleton.pose_bone_mut(hip) {
        Some(pose_bone) => pose_bone.location = Vec3::ZERO,
        None => log::debug!("no pose data for `{}`, rest location left as is", hip),
    }
}

#[cfg(test)]
mod tests {
    use glam::Quat;

    use super::*;

    #[test]
    fn only_location_is_reset() {
        let mut skeleton = Skeleton::with_pose();
        skeleton.add_bone("hips", Vec3::ZERO, Vec3::Y, 0.0).unwrap();
        let rotation = Quat::from_rotation_y(0.5);
        {
            let pose_bone = skeleton.pose_bone_mut("hips").unwrap();
            pose_bone.location = Vec3::new(0.3, 98.0, -2.0);
            pose_bone.rotation = rotation;
            pose_bone.scale = Vec3::splat(2.0);
        }

        zero_hip_rest_location(&mut skeleton, "hips");

        let pose_bone = skeleton.pose_bone("hips").unwrap();
        assert_eq!(pose_bone.location, Vec3::ZERO);
        assert_eq!(pose_bone.rotation, rotation);
        assert_eq!(pose_bone.scale, Vec3::splat(2.0));
    }

    #[test]
    fn missing_pose_is_a_no_op() {
        let mut skeleton = Skeleton::new();
        skeleton.add_bone("hips", Vec3::ZERO, Vec3::Y, 0.0).unwrap();
        zero_hip_rest_location(&mut skeleton, "hips");
        zero_hip_rest_location(&mut skeleton, "nobody");
        assert!(skeleton.pose().is_none());
    }
}
