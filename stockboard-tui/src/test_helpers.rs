//! Test helpers for creating app state against offline providers

use chrono::NaiveDate;
use stockboard_core::testing::FailingProvider;
use stockboard_core::{DashboardParams, SyntheticProvider, TickerRegistry};

use crate::app::AppState;

pub fn synthetic() -> SyntheticProvider {
    SyntheticProvider::new(42, NaiveDate::from_ymd_opt(2024, 3, 29).unwrap())
}

/// App with default parameters over the synthetic provider.
pub fn test_app() -> AppState {
    AppState::new(
        Box::new(synthetic()),
        TickerRegistry::default(),
        DashboardParams::default(),
    )
}

/// App whose provider fails for AMZN.
pub fn failing_app() -> AppState {
    AppState::new(
        Box::new(FailingProvider::new(synthetic(), "AMZN")),
        TickerRegistry::default(),
        DashboardParams::default(),
    )
}
