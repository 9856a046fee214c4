//! User model and related types.
//!
//! Users are owned by the persistence collaborator; the ledger reads them
//! and never mutates them.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The role a user holds in the leave system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// A regular employee who files requests for themself.
    #[default]
    Member,
    /// A reviewer who approves requests, rosters duty and settles balances.
    Admin,
}

/// An employee whose leave and comp time are tracked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user.
    pub id: String,
    /// Display name, denormalized onto every record the user owns.
    pub name: String,
    /// The user's role.
    #[serde(default)]
    pub role: Role,
    /// The date the user was hired. Anchors both cycle and tenure.
    #[serde(default)]
    pub hire_date: Option<NaiveDate>,
    /// Comp-time hours carried in from outside the ledger.
    #[serde(default)]
    pub comp_baseline: Decimal,
    /// Monthly salary used to value cash-outs.
    #[serde(default)]
    pub salary: Option<Decimal>,
}

impl User {
    /// Returns true if the user holds the admin role.
    ///
    /// # Examples
    ///
    /// ```
    /// use leave_ledger::models::{Role, User};
    /// use rust_decimal::Decimal;
    ///
    /// let admin = User {
    ///     id: "u_admin".to_string(),
    ///     name: "Office Manager".to_string(),
    ///     role: Role::Admin,
    ///     hire_date: None,
    ///     comp_baseline: Decimal::ZERO,
    ///     salary: None,
    /// };
    /// assert!(admin.is_admin());
    /// ```
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// The monthly salary, defaulting to zero when unset.
    pub fn monthly_salary(&self) -> Decimal {
        self.salary.unwrap_or(Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_member_with_defaults() {
        let json = r#"{
            "id": "u_001",
            "name": "Chen"
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.role, Role::Member);
        assert_eq!(user.hire_date, None);
        assert_eq!(user.comp_baseline, Decimal::ZERO);
        assert_eq!(user.monthly_salary(), Decimal::ZERO);
        assert!(!user.is_admin());
    }

    #[test]
    fn test_deserialize_full_user() {
        let json = r#"{
            "id": "u_002",
            "name": "Lin",
            "role": "admin",
            "hire_date": "2019-03-10",
            "comp_baseline": "12.5",
            "salary": "30000"
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert!(user.is_admin());
        assert_eq!(user.hire_date, NaiveDate::from_ymd_opt(2019, 3, 10));
        assert_eq!(user.comp_baseline, Decimal::new(125, 1));
        assert_eq!(user.monthly_salary(), Decimal::from(30000));
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::Member).unwrap(), "\"member\"");
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
    }
}
