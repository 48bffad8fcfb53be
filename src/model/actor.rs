//! Requesting identity

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Host user identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The identity making the request
///
/// Capabilities are the role-based grants resolved by the host for this
/// request; they are only consulted for the ownership-or-role check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Actor {
    #[default]
    Anonymous,
    Authenticated {
        id: UserId,
        #[serde(default)]
        capabilities: BTreeSet<String>,
    },
}

impl Actor {
    pub fn user(id: u64) -> Self {
        Actor::Authenticated {
            id: UserId(id),
            capabilities: BTreeSet::new(),
        }
    }

    pub fn with_capability(self, capability: &str) -> Self {
        match self {
            Actor::Anonymous => Actor::Anonymous,
            Actor::Authenticated {
                id,
                mut capabilities,
            } => {
                capabilities.insert(capability.to_string());
                Actor::Authenticated { id, capabilities }
            }
        }
    }

    pub fn id(&self) -> Option<UserId> {
        match self {
            Actor::Anonymous => None,
            Actor::Authenticated { id, .. } => Some(*id),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Actor::Authenticated { .. })
    }

    /// Whether the actor holds the named capability
    pub fn can(&self, capability: &str) -> bool {
        match self {
            Actor::Anonymous => false,
            Actor::Authenticated { capabilities, .. } => capabilities.contains(capability),
        }
    }

    /// Whether the actor holds any of the named capabilities
    pub fn can_any(&self, capabilities: &[&str]) -> bool {
        capabilities.iter().any(|c| self.can(c))
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Actor::Anonymous => write!(f, "anonymous"),
            Actor::Authenticated { id, .. } => write!(f, "user:{id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_has_no_capabilities() {
        let actor = Actor::Anonymous.with_capability("gravityforms_edit_entries");
        assert!(!actor.is_authenticated());
        assert!(!actor.can("gravityforms_edit_entries"));
        assert_eq!(actor.id(), None);
    }

    #[test]
    fn test_capability_lookup() {
        let actor = Actor::user(7).with_capability("gravityforms_edit_entries");
        assert!(actor.can("gravityforms_edit_entries"));
        assert!(!actor.can("manage_options"));
        assert!(actor.can_any(&["manage_options", "gravityforms_edit_entries"]));
        assert_eq!(actor.id(), Some(UserId(7)));
    }

    #[test]
    fn test_actor_json_shape() {
        let actor: Actor = serde_json::from_str(
            r#"{"kind": "authenticated", "id": 9, "capabilities": ["read"]}"#,
        )
        .unwrap();
        assert_eq!(actor.to_string(), "user:9");
        assert!(actor.can("read"));

        let anon: Actor = serde_json::from_str(r#"{"kind": "anonymous"}"#).unwrap();
        assert_eq!(anon, Actor::Anonymous);
    }
}
