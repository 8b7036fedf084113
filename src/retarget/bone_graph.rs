use crate::{
    error::GraphError,
    rig::{BoneId, Skeleton},
};

/// Inserts `root` as a top-level copy of the hip bone's rest segment and parents the hip under it.
///
/// Fails without touching the skeleton if `root` already exists or `hip` is missing.
/// The hip's previous parent, if any, is dropped.
pub fn insert_root_bone(skeleton: &mut Skeleton, hip: &str, root: &str) -> Result<BoneId, GraphError> {
    if skeleton.contains(root) {
        return Err(GraphError::AlreadyApplied { root: root.to_string() });
    }
    let (hip_id, head, tail, roll) = match skeleton.find(hip).and_then(|id| Some((id, skeleton.bone(id)?))) {
        Some((id, bone)) => (id, bone.head, bone.tail, bone.roll),
        None => return Err(GraphError::HipNotFound { hip: hip.to_string() }),
    };

    // neither can fail: the name was checked above and the new root has no ancestors
    let root_id = skeleton
        .add_bone(root, head, tail, roll)
        .map_err(|_| GraphError::AlreadyApplied { root: root.to_string() })?;
    if let Some(previous) = skeleton.parent_name(hip_id) {
        log::debug!("detaching `{}` from `{}`", hip, previous);
    }
    skeleton
        .set_parent(hip_id, Some(root_id))
        .map_err(|_| GraphError::HipNotFound { hip: hip.to_string() })?;

    Ok(root_id)
}
