//! Entitlement and balance ledger for employee leave and overtime.
//!
//! This crate resolves each employee's rolling entitlement cycle from their
//! hire date, computes annual-leave entitlement by tenure, replays approved
//! records into annual and comp-time balances, and settles unused hours at
//! cycle end by deferral or cash-out.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
pub mod service;
pub mod store;
