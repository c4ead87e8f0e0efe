use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Scope token binding the routes registered in one configuration call.
///
/// Every call to [`RoutingTable::register`](crate::router::RoutingTable::register)
/// mints a fresh one, so identical pattern text registered by different calls
/// never lands in the same pattern group.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub struct SessionId(pub ulid::Ulid);

impl SessionId {
    #[must_use]
    pub fn new() -> Self {
        Self(ulid::Ulid::new())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for SessionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = ulid::Ulid::from_string(s)?;
        Ok(SessionId(id))
    }
}
