//! Static sustainability (ESG) KPIs shown with the farm analytics.

use serde::Serialize;

/// Carbon footprint above this score (kg CO₂e/kg) is flagged.
pub const CARBON_FOOTPRINT_ALERT: f64 = 4.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SustainabilityMetric {
    pub title: &'static str,
    pub value: f64,
    pub unit: &'static str,
    pub is_alert: bool,
}

pub fn sustainability_metrics() -> Vec<SustainabilityMetric> {
    let carbon_footprint = 4.2;
    vec![
        SustainabilityMetric {
            title: "Water Reduction Target",
            value: 35.0,
            unit: "%",
            is_alert: false,
        },
        SustainabilityMetric {
            title: "Carbon Footprint Score",
            value: carbon_footprint,
            unit: "kg CO₂e/kg",
            is_alert: carbon_footprint > CARBON_FOOTPRINT_ALERT,
        },
        SustainabilityMetric {
            title: "Energy Consumption",
            value: 850.0,
            unit: "kWh/day",
            is_alert: false,
        },
    ]
}
