//! Strongly-typed identifiers for claim snapshot data
//!
//! Using newtype wrappers around the raw reference strings provides type
//! safety and prevents accidental mixing of policy and claim references.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_ref {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new reference from the raw source value
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the underlying reference string
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns true if the reference carries no usable value
            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

define_ref!(PolicyRef);
define_ref!(ClaimRef);

/// Year of account a claim was written against
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct YearOfAccount(i32);

impl YearOfAccount {
    pub fn new(year: i32) -> Self {
        Self(year)
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for YearOfAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for YearOfAccount {
    fn from(year: i32) -> Self {
        Self(year)
    }
}

/// Major line of business a claim is categorised under (e.g. MOTOR, PROPERTY)
///
/// Source systems are inconsistent about casing, so the code is uppercased on
/// construction. Ordering is lexicographic, which fixes the group order of
/// every ranked report.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LobCode(String);

impl LobCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LobCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for LobCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

/// The triple that identifies a single claim across snapshots
///
/// A claim keeps the same (policy_ref, claim_ref, yoa) triple on every
/// snapshot date; everything else about it may change. The triple is the
/// alignment key for novelty detection and movement calculation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClaimIdentity {
    pub policy_ref: PolicyRef,
    pub claim_ref: ClaimRef,
    pub yoa: YearOfAccount,
}

impl ClaimIdentity {
    pub fn new(policy_ref: PolicyRef, claim_ref: ClaimRef, yoa: YearOfAccount) -> Self {
        Self {
            policy_ref,
            claim_ref,
            yoa,
        }
    }

    /// Returns true if any identity component is missing its value
    pub fn is_incomplete(&self) -> bool {
        self.policy_ref.is_blank() || self.claim_ref.is_blank()
    }
}

impl fmt::Display for ClaimIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.policy_ref, self.claim_ref, self.yoa)
    }
}
