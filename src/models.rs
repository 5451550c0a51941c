//! Candidate records and fixed defaults for the SB import batch.
//!
//! Every value the source sheet does not carry is defaulted here, so a row
//! reduces to a name, an account number and two balances.

use crate::normalize::extract_digits;
use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use std::str::FromStr;

/// Category tag carried by every user created in this batch.
pub const USER_TYPE_SB: &str = "SB";
/// Category tag carried by every account created in this batch.
pub const ACCOUNT_TYPE_SB: &str = "SB";
/// Identification document type recorded for imported users.
pub const ID_TYPE_CITIZENSHIP: &str = "CITIZENSHIP";
/// Country-code prefix used when synthesizing contact numbers.
pub const CONTACT_COUNTRY_CODE: &str = "+977";
/// Address recorded when the source carries none.
pub const DEFAULT_ADDRESS: &str = "Kathmandu, Nepal";
/// Status assigned to newly created accounts.
pub const ACCOUNT_STATUS_ACTIVE: &str = "ACTIVE";

/// Default annual interest rate for SB accounts.
pub fn default_interest_rate() -> BigDecimal {
    BigDecimal::from_str("4.0").expect("literal decimal")
}

/// Date of birth recorded when the source carries none.
pub fn default_date_of_birth() -> NaiveDate {
    NaiveDate::from_ymd_opt(1990, 1, 1).expect("valid date")
}

/// Opening date recorded for imported accounts.
pub fn default_opening_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date")
}

/// Candidate user row, fully defaulted, ready for insertion.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub full_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Option<String>,
    pub contact_number: String,
    pub email: Option<String>,
    pub address: String,
    pub id_type: String,
    pub id_number: String,
    pub user_type: String,
    pub is_active: bool,
}

impl NewUser {
    /// Build the candidate user for one SB account row.
    ///
    /// The identification number is derived from the digits of the account
    /// number; the contact number prefixes the same digits with the country
    /// code, so one derivation feeds both natural keys.
    pub fn for_sb_account(full_name: &str, account_number: &str) -> Self {
        let id_number = extract_digits(Some(account_number));
        let contact_number = format!("{}{}", CONTACT_COUNTRY_CODE, id_number);

        Self {
            full_name: full_name.to_string(),
            date_of_birth: default_date_of_birth(),
            gender: None,
            contact_number,
            email: None,
            address: DEFAULT_ADDRESS.to_string(),
            id_type: ID_TYPE_CITIZENSHIP.to_string(),
            id_number,
            user_type: USER_TYPE_SB.to_string(),
            is_active: true,
        }
    }
}

/// Candidate account row, linked to a resolved user at insert time.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub account_number: String,
    pub balance: BigDecimal,
    pub interest_rate: BigDecimal,
    pub opening_date: NaiveDate,
    pub last_transaction_date: DateTime<Utc>,
    pub status: String,
    pub account_type: String,
}

impl NewAccount {
    pub fn for_sb_row(account_number: &str, balance: BigDecimal) -> Self {
        Self {
            account_number: account_number.to_string(),
            balance,
            interest_rate: default_interest_rate(),
            opening_date: default_opening_date(),
            last_transaction_date: Utc::now(),
            status: ACCOUNT_STATUS_ACTIVE.to_string(),
            account_type: ACCOUNT_TYPE_SB.to_string(),
        }
    }
}
