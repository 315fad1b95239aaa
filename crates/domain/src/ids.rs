use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Parse the hyphenated string form used in storage and config files.
            pub fn parse(value: &str) -> Result<Self, crate::DomainError> {
                Uuid::parse_str(value.trim())
                    .map(Self)
                    .map_err(|e| crate::DomainError::invalid_id(format!("{value}: {e}")))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// Profile key stamped on every persisted record
define_id!(PlayerId);

// One settled session in the history log
define_id!(SessionId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_display_form() {
        let id = PlayerId::new();
        let parsed = PlayerId::parse(&id.to_string()).expect("valid id");
        assert_eq!(parsed, id);
    }

    #[test]
    fn parse_rejects_garbage() {
        let err = SessionId::parse("not-a-uuid").unwrap_err();
        assert!(err.to_string().contains("not-a-uuid"));
    }
}
