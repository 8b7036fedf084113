use glam::Vec3;
use root_motion::{
    job_system::{retarget_batch, CancelToken},
    resource_system::{
        file_formats::animationfile::{Interpolation, Keyframe, Property},
        load_rigs,
        rig_loader::{rig_from_file, rig_to_file},
        save_rigs,
    },
    retarget_all,
    rig::{AnimationClip, ChannelId},
    Outcome, RetargetRequest, Rig, Skeleton,
};

const HIP: &str = "mixamorig:Hips";
const ROOT: &str = "root_bone";

fn frames(axis: u8) -> Vec<Keyframe> {
    (0..10)
        .map(|i| Keyframe {
            time: i as f32 / 30.0,
            value: axis as f32 * 100.0 + i as f32,
            interpolation: if i == 9 { Interpolation::Constant } else { Interpolation::Bezier },
        })
        .collect()
}

fn mocap_rig(name: &str, hip: &str) -> Rig {
    let mut skeleton = Skeleton::with_pose();
    let hips = skeleton
        .add_bone(hip, Vec3::new(0.0, 0.95, 0.02), Vec3::new(0.0, 1.05, 0.02), 0.1)
        .unwrap();
    let spine = skeleton
        .add_bone("mixamorig:Spine", Vec3::new(0.0, 1.05, 0.02), Vec3::new(0.0, 1.2, 0.02), 0.0)
        .unwrap();
    skeleton.set_parent(spine, Some(hips)).unwrap();
    skeleton.pose_bone_mut(hip).unwrap().location = Vec3::new(1.0, 2.0, 3.0);

    let mut clip = AnimationClip::new("mixamo.com");
    for axis in 0..3 {
        clip.add_channel(ChannelId::new(hip, Property::Location, axis), Some(hip.to_string()))
            .keyframes = frames(axis);
    }
    for axis in 0..4 {
        clip.add_channel(ChannelId::new(hip, Property::RotationQuaternion, axis), Some(hip.to_string()))
            .keyframes = frames(axis);
    }

    let mut rig = Rig::new(name, skeleton);
    let id = rig.add_clip(clip);
    rig.set_active_clip(Some(id));
    rig
}

fn batch() -> Vec<Rig> {
    let request = RetargetRequest::default();
    let no_hip = mocap_rig("A", "Hips");
    let mut done = mocap_rig("B", HIP);
    assert_eq!(root_motion::retarget_rig(&mut done, &request), Outcome::FullyRetargeted);
    let fresh = mocap_rig("C", HIP);
    vec![no_hip, done, fresh]
}

fn check_fresh_rig(rig: &Rig) {
    let clip = rig.active_clip().unwrap();
    assert_eq!(clip.name, "mixamo.com_root");
    // 7 channels, 3 hip location channels swapped for 3 root ones
    assert_eq!(clip.len(), 7);
    assert_eq!(clip.channels_for(HIP, Property::Location).count(), 0);
    for axis in 0..3 {
        let channel = clip.find(&ChannelId::new(ROOT, Property::Location, axis)).unwrap();
        assert_eq!(channel.keyframes.len(), 10);
        assert_eq!(channel.keyframes, frames(axis));
    }
    assert_eq!(rig.skeleton.pose_bone(HIP).unwrap().location, Vec3::ZERO);

    let root = rig.skeleton.bone_by_name(ROOT).unwrap();
    assert_eq!(root.head, Vec3::new(0.0, 0.95, 0.02));
    assert_eq!(root.tail, Vec3::new(0.0, 1.05, 0.02));
    assert_eq!(root.roll, 0.1);
    assert_eq!(rig.skeleton.parent_name(rig.skeleton.find(HIP).unwrap()), Some(ROOT));
}

#[test]
fn batch_isolation() {
    let mut rigs = batch();
    let before_b = rigs[1].active_clip().cloned();

    let outcomes = retarget_all(rigs.iter_mut(), &RetargetRequest::default());

    assert_eq!(
        outcomes,
        [Outcome::HipNotFound, Outcome::AlreadyApplied, Outcome::FullyRetargeted]
    );
    assert_eq!(rigs[0].skeleton.len(), 2);
    assert_eq!(rigs[0].clip_count(), 1);
    assert_eq!(rigs[1].active_clip().cloned(), before_b);
    check_fresh_rig(&rigs[2]);
}

#[test]
fn parallel_batch_matches_sequential() {
    let responses = retarget_batch(batch(), &RetargetRequest::default(), 3, &CancelToken::new());
    let outcomes: Vec<_> = responses.iter().map(|r| r.outcome).collect();
    assert_eq!(
        outcomes,
        [Some(Outcome::HipNotFound), Some(Outcome::AlreadyApplied), Some(Outcome::FullyRetargeted)]
    );
    check_fresh_rig(&responses[2].rig);
}

#[test]
fn retargeted_rig_survives_a_file_round_trip() {
    let mut rig = mocap_rig("C", HIP);
    root_motion::retarget_rig(&mut rig, &RetargetRequest::default());

    let file = rig_to_file(&rig);
    assert_eq!(file.active_clip.as_deref(), Some("mixamo.com_root"));
    assert_eq!(file.clips.len(), 2);

    let mut reloaded = rig_from_file(file).unwrap();
    check_fresh_rig(&reloaded);
    // the original clip is still there, untouched
    let original = reloaded.clip_by_name("mixamo.com").unwrap();
    assert_eq!(reloaded.clip(original).unwrap().channels_for(HIP, Property::Location).count(), 3);

    assert_eq!(
        root_motion::retarget_rig(&mut reloaded, &RetargetRequest::default()),
        Outcome::AlreadyApplied
    );
}

#[test]
fn taken_root_clip_name_still_saves_and_loads() {
    let mut rig = mocap_rig("A", HIP);
    rig.add_clip(AnimationClip::new("mixamo.com_root"));
    assert_eq!(
        root_motion::retarget_rig(&mut rig, &RetargetRequest::default()),
        Outcome::FullyRetargeted
    );

    let dir = std::env::temp_dir().join(format!("root-motion-batch-{}", std::process::id()));
    let path = dir.join("rigs.json");
    save_rigs(&path, &[rig]).unwrap();
    let loaded = load_rigs(&path).unwrap();
    std::fs::remove_dir_all(&dir).unwrap();

    let clip = loaded[0].active_clip().unwrap();
    assert_eq!(clip.name, "mixamo.com_root.001");
    assert_eq!(clip.channels_for(ROOT, Property::Location).count(), 3);
    assert_eq!(loaded[0].clip_count(), 3);
    let taken = loaded[0].clip_by_name("mixamo.com_root").unwrap();
    assert!(loaded[0].clip(taken).unwrap().is_empty());
}
