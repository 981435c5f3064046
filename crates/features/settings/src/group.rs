use crate::order::OrderVector;
use std::fmt::Debug;

/// A display grouping for panels. Membership is declared by each panel's `group_key`.
pub trait PanelGroup: Debug + Send + Sync {
    fn key(&self) -> &str;

    fn name(&self) -> &str;

    fn order_vector(&self) -> OrderVector {
        OrderVector::from_name(self.name())
    }
}

/// A group defined entirely by constants, pinned by an explicit position.
#[derive(Debug, Clone)]
pub struct StaticGroup {
    key: &'static str,
    name: &'static str,
    position: i64,
}

impl StaticGroup {
    #[must_use]
    pub const fn new(key: &'static str, name: &'static str, position: i64) -> Self {
        Self { key, name, position }
    }
}

impl PanelGroup for StaticGroup {
    fn key(&self) -> &str {
        self.key
    }

    fn name(&self) -> &str {
        self.name
    }

    fn order_vector(&self) -> OrderVector {
        OrderVector::new().int(self.position).string(self.name)
    }
}
