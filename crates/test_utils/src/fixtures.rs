//! Pre-built Test Fixtures
//!
//! Ready-to-use test data for the reporting pipeline. These fixtures are
//! designed to be consistent and predictable for unit tests.

use chrono::NaiveDate;
use core_kernel::{ClaimRef, LobCode, PolicyRef};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Fixture for snapshot date test data
pub struct DateFixtures;

impl DateFixtures {
    /// Standard previous snapshot date (Jan month-end)
    pub fn january_eom() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()
    }

    /// Standard current snapshot date (Feb month-end)
    pub fn february_eom() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
    }

    /// A later snapshot date for three-date scenarios
    pub fn march_eom() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()
    }

    /// A date with no snapshot data
    pub fn empty_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 15).unwrap()
    }
}

/// Fixture for incurred amount test data
pub struct AmountFixtures;

impl AmountFixtures {
    /// A typical attritional claim amount
    pub fn attritional() -> Decimal {
        dec!(12500.00)
    }

    /// A large loss amount that should top any ranking
    pub fn large_loss() -> Decimal {
        dec!(2500000.00)
    }

    /// A negative incurred amount (recoveries exceed payments)
    pub fn recovery() -> Decimal {
        dec!(-7300.00)
    }
}

/// Fixture for reference test data
pub struct RefFixtures;

impl RefFixtures {
    /// A numbered policy reference
    pub fn policy(n: u32) -> PolicyRef {
        PolicyRef::new(format!("POL-{:04}", n))
    }

    /// A numbered claim reference
    pub fn claim(n: u32) -> ClaimRef {
        ClaimRef::new(format!("CLM-{:04}", n))
    }

    /// The lines of business used across the test suite
    pub fn lobs() -> Vec<LobCode> {
        vec![
            LobCode::new("CASUALTY"),
            LobCode::new("MOTOR"),
            LobCode::new("PROPERTY"),
        ]
    }
}
