use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    Location,
    /// Euler rotation
    Rotation,
    RotationQuaternion,
    Scale,
}

impl Property {
    /// Number of scalar axes a channel of this property may address.
    pub fn component_count(self) -> usize {
        match self {
            Property::RotationQuaternion => 4,
            Property::Location | Property::Rotation | Property::Scale => 3,
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Property::Location => "location",
            Property::Rotation => "rotation",
            Property::RotationQuaternion => "rotation_quaternion",
            Property::Scale => "scale",
        };
        f.write_str(name)
    }
}

/// Never evaluated here, only carried from one keyframe to its copy.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    Constant,
    Linear,
    Bezier,
    Sine,
    Quad,
    Cubic,
    Quart,
    Quint,
    Expo,
    Circ,
    Back,
    Bounce,
    Elastic,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Keyframe {
    pub time: f32,
    pub value: f32,
    pub interpolation: Interpolation,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Channel {
    pub target: String,
    pub property: Property,
    pub index: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub keyframes: Vec<Keyframe>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AnimationClip {
    pub name: String,
    pub channels: Vec<Channel>,
}
