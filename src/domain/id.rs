//! Protocol identifier types.
//!
//! Identifiers in the bulk protocol are opaque strings. Incoming identifiers
//! are echoed verbatim; outgoing ones are generated as UUID v4.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing identifier.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Create an identifier with a generated UUID.
            #[must_use]
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }

            /// Get the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

string_id!(
    /// Identifier of an individual quote inside a bulk quote.
    QuoteId
);

string_id!(
    /// Identifier of an individual transfer inside a bulk transfer.
    TransferId
);

string_id!(
    /// Identifier of a bulk quote request.
    BulkQuoteId
);

string_id!(
    /// Identifier of a bulk transfer request.
    BulkTransferId
);

string_id!(
    /// Caller-side correlation id required by the outbound SDK API.
    HomeTransactionId
);

impl BulkTransferId {
    /// Short prefix used in progress output.
    #[must_use]
    pub fn short(&self) -> &str {
        self.0.get(..8).unwrap_or(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_id_serializes_as_plain_string() {
        let id = QuoteId::new("Q1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"Q1\"");
    }

    #[test]
    fn generated_ids_are_unique_uuids() {
        let a = TransferId::generate();
        let b = TransferId::generate();

        assert_ne!(a, b);
        assert!(uuid::Uuid::parse_str(a.as_str()).is_ok());
    }

    #[test]
    fn short_prefix_handles_short_ids() {
        assert_eq!(BulkTransferId::new("abc").short(), "abc");
        assert_eq!(BulkTransferId::new("0123456789").short(), "01234567");
    }
}
