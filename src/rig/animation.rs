// Runtime animation clips

use generational_arena::Index;

use crate::resource_system::file_formats::animationfile::{Keyframe, Property};

#[derive(Hash, Eq, PartialEq, Clone, Copy, Debug)]
pub struct ClipId(pub Index);
impl From<ClipId> for Index {
    fn from(id: ClipId) -> Self {
        id.0
    }
}

/// Identity of one animated scalar: bone, property and axis.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChannelId {
    pub target: String,
    pub property: Property,
    pub index: u8,
}
impl ChannelId {
    pub fn new(target: impl Into<String>, property: Property, index: u8) -> Self {
        Self {
            target: target.into(),
            property,
            index,
        }
    }

    /// Same property and axis, driving `bone` instead.
    pub fn retarget(&self, bone: &str) -> Self {
        Self::new(bone, self.property, self.index)
    }

    pub fn drives(&self, bone: &str, property: Property) -> bool {
        self.target == bone && self.property == property
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Channel {
    pub id: ChannelId,
    pub group: Option<String>,
    /// time ordered
    pub keyframes: Vec<Keyframe>,
}
impl Channel {
    pub fn new(id: ChannelId) -> Self {
        Self {
            id,
            group: None,
            keyframes: vec![],
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AnimationClip {
    pub name: String,
    channels: Vec<Channel>,
}

impl AnimationClip {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            channels: vec![],
        }
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Appends an empty channel. Identities are not checked for uniqueness, matching what scene files may contain.
    pub fn add_channel(&mut self, id: ChannelId, group: Option<String>) -> &mut Channel {
        self.channels.push(Channel {
            group,
            ..Channel::new(id)
        });
        let last = self.channels.len() - 1;
        &mut self.channels[last]
    }

    /// First channel with this identity.
    pub fn find(&self, id: &ChannelId) -> Option<&Channel> {
        self.channels.iter().find(|channel| &channel.id == id)
    }

    pub fn channels_for<'a>(
        &'a self,
        bone: &'a str,
        property: Property,
    ) -> impl Iterator<Item = &'a Channel> + 'a {
        self.channels
            .iter()
            .filter(move |channel| channel.id.drives(bone, property))
    }

    /// Drops every channel driving `property` of `bone`, returning how many went.
    pub fn remove_channels_for(&mut self, bone: &str, property: Property) -> usize {
        let before = self.channels.len();
        self.channels
            .retain(|channel| !channel.id.drives(bone, property));
        before - self.channels.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource_system::file_formats::animationfile::Interpolation;

    #[test]
    fn remove_only_touches_matching_property() {
        let mut clip = AnimationClip::new("walk");
        for index in 0..3 {
            clip.add_channel(ChannelId::new("hips", Property::Location, index), None);
            clip.add_channel(ChannelId::new("hips", Property::Rotation, index), None);
        }
        clip.add_channel(ChannelId::new("spine", Property::Location, 0), None);

        assert_eq!(clip.remove_channels_for("hips", Property::Location), 3);
        assert_eq!(clip.len(), 4);
        assert_eq!(clip.channels_for("hips", Property::Rotation).count(), 3);
        assert!(clip.find(&ChannelId::new("spine", Property::Location, 0)).is_some());
    }

    #[test]
    fn find_returns_first_duplicate() {
        let mut clip = AnimationClip::new("walk");
        let id = ChannelId::new("hips", Property::Location, 1);
        clip.add_channel(id.clone(), None).keyframes.push(Keyframe {
            time: 0.0,
            value: 1.0,
            interpolation: Interpolation::Linear,
        });
        clip.add_channel(id.clone(), None);

        assert_eq!(clip.find(&id).unwrap().keyframes.len(), 1);
        assert_eq!(id.retarget("root"), ChannelId::new("root", Property::Location, 1));
    }
}
