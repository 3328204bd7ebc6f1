//! Domain identifier types with validation
//!
//! Users, library items and integrations are identified by opaque strings
//! issued by the API. The newtypes below keep them from being mixed up and
//! reject blank values at the boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, rejecting blank values
            pub fn new(id: impl Into<String>) -> Result<Self, String> {
                let id = id.into();
                if id.trim().is_empty() {
                    return Err(concat!($label, " cannot be empty").to_string());
                }
                Ok(Self(id))
            }

            /// Returns the identifier as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consumes self and returns the inner String
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = String;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

opaque_id!(
    /// Owner of library items and integrations
    ///
    /// # Examples
    ///
    /// ```
    /// use ferry::domain::ids::UserId;
    /// use std::str::FromStr;
    ///
    /// let user_id = UserId::from_str("0b8b4c56-5d4c-4f4e-9d5e-0c3f7c2a1b10").unwrap();
    /// assert_eq!(user_id.as_str(), "0b8b4c56-5d4c-4f4e-9d5e-0c3f7c2a1b10");
    /// ```
    UserId,
    "User ID"
);

opaque_id!(
    /// Identifier of a saved article, page or document
    LibraryItemId,
    "Library item ID"
);

opaque_id!(
    /// Identifier of a configured third-party integration
    IntegrationId,
    "Integration ID"
);

opaque_id!(
    /// Identifier of a highlight inside a library item
    HighlightId,
    "Highlight ID"
);
