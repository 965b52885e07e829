#![doc(test(attr(deny(warnings))))]

//! Onboard Core implements a multi-step onboarding wizard: credentials, a
//! user-type choice and the employee/company profile forms, together with the
//! validation rules, step controller and local persistence behind them.

pub mod cli;
pub mod config;
pub mod errors;
pub mod storage;
pub mod utils;
pub mod validation;
pub mod wizard;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Onboard Core tracing initialized.");
    });
}
