//! Sort keys for panels and groups.

use std::fmt;

/// One component of an [`OrderVector`]. Integers sort before strings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OrderComponent {
    Int(i64),
    Str(String),
}

/// Lexicographically compared sequence of sort components.
///
/// The default vector for a panel or group is just its display name; implementations
/// override it to pin themselves ahead of (or behind) alphabetical neighbours:
///
/// ```rust
/// use panelkit_settings::order::OrderVector;
///
/// let pinned = OrderVector::new().int(0).string("Zebra");
/// let plain = OrderVector::new().int(1).string("Alpha");
/// assert!(pinned < plain);
/// assert!(OrderVector::from_name("Alpha") < OrderVector::from_name("Beta"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OrderVector(Vec<OrderComponent>);

impl OrderVector {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn from_name(name: &str) -> Self {
        Self::new().string(name)
    }

    #[must_use]
    pub fn int(mut self, value: i64) -> Self {
        self.0.push(OrderComponent::Int(value));
        self
    }

    #[must_use]
    pub fn string(mut self, value: impl Into<String>) -> Self {
        self.0.push(OrderComponent::Str(value.into()));
        self
    }

    #[must_use]
    pub fn components(&self) -> &[OrderComponent] {
        &self.0
    }
}

impl fmt::Display for OrderVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for component in &self.0 {
            if !first {
                f.write_str(" / ")?;
            }
            first = false;
            match component {
                OrderComponent::Int(i) => write!(f, "{i}")?,
                OrderComponent::Str(s) => f.write_str(s)?,
            }
        }
        Ok(())
    }
}
