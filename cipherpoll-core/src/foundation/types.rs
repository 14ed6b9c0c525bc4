use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

macro_rules! define_id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Deserialize, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl Deref for $name {
            type Target = str;
            fn deref(&self) -> &Self::Target {
                self.as_str()
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

define_id_type!(
    /// Stable unique identifier of a questionnaire record on the ledger.
    RecordId
);

define_id_type!(
    /// Account address of a connected wallet. Comparison of ownership must go
    /// through [`AccountAddress::matches`] because ledgers are inconsistent
    /// about address casing.
    AccountAddress
);

define_id_type!(
    /// Address of the record-store contract the client talks to.
    ContractAddress
);

define_id_type!(
    /// Opaque reference to a ciphertext held by the confidential compute
    /// service. Exchanged instead of the ciphertext itself.
    EncryptedHandle
);

define_id_type!(
    /// Ledger transaction identifier.
    TxId
);

impl AccountAddress {
    /// Case-insensitive ownership comparison.
    pub fn matches(&self, other: &AccountAddress) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}
