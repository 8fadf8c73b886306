//! Recorded skill scores of the spread model on past fires.

use wildfire_risk_server_models::{BacktestCase, BacktestMetrics};

/// Aggregate scores across all recorded cases.
pub const SUMMARY: BacktestMetrics = BacktestMetrics {
    precision: 0.82,
    recall: 0.74,
    lead_time_h: 6.3,
};

/// Per-fire scores.
pub fn cases() -> Vec<BacktestCase> {
    vec![
        BacktestCase {
            id: "case_colville",
            region: "Colville",
            start: "2024-07-01",
            end: "2024-07-07",
            metrics: BacktestMetrics {
                precision: 0.84,
                recall: 0.72,
                lead_time_h: 7.1,
            },
        },
        BacktestCase {
            id: "case_sonoma",
            region: "Sonoma",
            start: "2024-09-11",
            end: "2024-09-16",
            metrics: BacktestMetrics {
                precision: 0.79,
                recall: 0.75,
                lead_time_h: 5.5,
            },
        },
    ]
}
