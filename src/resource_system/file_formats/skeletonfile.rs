use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Bone {
    pub name: String,
    pub head: [f32; 3],
    pub tail: [f32; 3],
    #[serde(default)]
    pub roll: f32,
    /// name of the parent bone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

fn identity_rotation() -> [f32; 4] {
    [0.0, 0.0, 0.0, 1.0]
}

fn unit_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PoseBone {
    pub bone: String,
    #[serde(default)]
    pub location: [f32; 3],
    /// xyzw
    #[serde(default = "identity_rotation")]
    pub rotation: [f32; 4],
    #[serde(default = "unit_scale")]
    pub scale: [f32; 3],
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Skeleton {
    /// parents may appear after their children
    pub bones: Vec<Bone>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pose: Option<Vec<PoseBone>>,
}
