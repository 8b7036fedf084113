use std::path::PathBuf;

use thiserror::Error;

use crate::resource_system::file_formats::animationfile::Property;

/// Reasons a root bone cannot be inserted. Neither leaves a trace on the skeleton.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("bone `{root}` already exists")]
    AlreadyApplied { root: String },
    #[error("hip bone `{hip}` not found")]
    HipNotFound { hip: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkeletonError {
    #[error("bone `{0}` already exists")]
    DuplicateBone(String),
    #[error("bone handle does not belong to this skeleton")]
    UnknownBone,
    #[error("parenting `{child}` under `{parent}` would create a cycle")]
    Cycle { child: String, parent: String },
}

/// Structural problems found while turning a rig file into runtime rigs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    #[error("rig `{rig}`: {source}")]
    Skeleton {
        rig: String,
        #[source]
        source: SkeletonError,
    },
    #[error("rig `{rig}`: bone `{bone}` has unknown parent `{parent}`")]
    UnknownParent {
        rig: String,
        bone: String,
        parent: String,
    },
    #[error("rig `{rig}`: pose entry for unknown bone `{bone}`")]
    UnknownPoseBone { rig: String, bone: String },
    #[error("rig `{rig}`: duplicate clip `{clip}`")]
    DuplicateClip { rig: String, clip: String },
    #[error("rig `{rig}`: active clip `{clip}` not found")]
    UnknownActiveClip { rig: String, clip: String },
    #[error("rig `{rig}`, clip `{clip}`: channel {target}.{property}[{index}] is out of range")]
    ComponentOutOfRange {
        rig: String,
        clip: String,
        target: String,
        property: Property,
        index: u8,
    },
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to access `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed JSON")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Format(#[from] FormatError),
}
