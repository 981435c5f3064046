use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const CAN_VIEW: &str = "view";
pub const CAN_EDIT: &str = "edit";

bitflags! {
    /// Capabilities a viewer may hold on a policy-guarded object.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct Capability: u32 {
        const VIEW = 1 << 0;
        const EDIT = 1 << 1;

        const ALL = Self::VIEW.bits() | Self::EDIT.bits();
    }
}

impl From<&str> for Capability {
    fn from(s: &str) -> Self {
        match s {
            CAN_VIEW => Self::VIEW,
            CAN_EDIT => Self::EDIT,
            "all" | "*" => Self::ALL,
            _ => Self::empty(),
        }
    }
}

impl Serialize for Capability {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u32(self.bits())
    }
}

impl<'de> Deserialize<'de> for Capability {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bits = u32::deserialize(deserializer)?;
        Ok(Self::from_bits_truncate(bits))
    }
}
