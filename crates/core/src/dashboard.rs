//! Dashboard view models composed from the sensor snapshot and tier.
//!
//! Every region is built here as plain data; gated regions come back as
//! [`Gated`] so the rendering surface shows a placeholder instead of
//! silently dropping them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::esg::{sustainability_metrics, SustainabilityMetric};
use crate::metrics::{
    moisture_out_of_band, quality_risk, shock_warning, yield_outlook, QualityRisk, YieldOutlook,
};
use crate::sensor::SensorReading;
use crate::tier::{gate, Gated, Tier};
use crate::timeline::{BatchMetadata, BatchRecord, MilestoneView};
use crate::types::Timestamp;

/// Masked key shown on the Enterprise data-access card. No key is ever issued.
pub const MASKED_API_KEY: &str = "************23BCDE7890";

// ---------------------------------------------------------------------------
// DashboardView
// ---------------------------------------------------------------------------

/// Which half of the dashboard is on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardView {
    Farm,
    #[default]
    Logistics,
}

impl DashboardView {
    pub fn as_str(self) -> &'static str {
        match self {
            DashboardView::Farm => "farm",
            DashboardView::Logistics => "logistics",
        }
    }
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DashboardView {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "farm" => Ok(DashboardView::Farm),
            "logistics" => Ok(DashboardView::Logistics),
            other => Err(CoreError::Validation(format!(
                "Unknown dashboard view: '{other}'. Valid views: farm, logistics"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Farm panel
// ---------------------------------------------------------------------------

/// Live farm sensor network (Basic tier).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FarmLiveReadings {
    pub soil_moisture: f64,
    /// Moisture is outside the optimal `[40, 55]` band.
    pub soil_moisture_alert: bool,
    pub weather_temp: f64,
    pub light_intensity: i64,
    pub last_received_at: Timestamp,
}

/// AI analytics and ESG metrics (Advanced tier).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FarmAnalytics {
    pub outlook: YieldOutlook,
    pub sustainability: Vec<SustainabilityMetric>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FarmPanel {
    pub live: FarmLiveReadings,
    pub analytics: Gated<FarmAnalytics>,
}

pub fn farm_panel(reading: &SensorReading, tier: Tier, received_at: Timestamp) -> FarmPanel {
    FarmPanel {
        live: FarmLiveReadings {
            soil_moisture: reading.soil_moisture,
            soil_moisture_alert: moisture_out_of_band(reading.soil_moisture),
            weather_temp: reading.weather_temp,
            light_intensity: reading.light_intensity,
            last_received_at: received_at,
        },
        analytics: gate(tier, Tier::Advanced, || FarmAnalytics {
            outlook: yield_outlook(reading.soil_moisture),
            sustainability: sustainability_metrics(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Logistics panel
// ---------------------------------------------------------------------------

/// Live logistics status (Basic tier).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogisticsLiveStatus {
    pub container_temp: f64,
    /// Quality risk is critical at this container temperature.
    pub container_temp_alert: bool,
    pub shock_index: f64,
    pub shock_warning: bool,
    pub gps_location: String,
    pub quality_risk_score: u8,
}

/// Warehouse record summary and journey milestones (Basic tier).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Traceability {
    pub record_id: &'static str,
    pub kezad_storage_temp: f64,
    pub milestones: Vec<MilestoneView>,
}

/// Data access placeholders (Enterprise tier).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnterpriseAccess {
    pub masked_api_key: &'static str,
    pub export_formats: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogisticsPanel {
    pub quality_prediction: Gated<QualityRisk>,
    pub live: LogisticsLiveStatus,
    pub traceability: Traceability,
    pub enterprise: Gated<EnterpriseAccess>,
}

pub fn logistics_panel(reading: &SensorReading, tier: Tier, batch: &BatchRecord) -> LogisticsPanel {
    let risk = quality_risk(reading.container_temp);

    LogisticsPanel {
        live: LogisticsLiveStatus {
            container_temp: reading.container_temp,
            container_temp_alert: risk.is_critical,
            shock_index: reading.shock_index,
            shock_warning: shock_warning(reading.shock_index),
            gps_location: reading.gps_location.clone(),
            quality_risk_score: risk.risk_score,
        },
        quality_prediction: gate(tier, Tier::Advanced, || risk),
        traceability: Traceability {
            record_id: batch.metadata.record_id,
            kezad_storage_temp: reading.kezad_storage_temp,
            milestones: batch.timeline_view(tier),
        },
        enterprise: gate(tier, Tier::Enterprise, || EnterpriseAccess {
            masked_api_key: MASKED_API_KEY,
            export_formats: vec!["json"],
        }),
    }
}

// ---------------------------------------------------------------------------
// Full page
// ---------------------------------------------------------------------------

/// The active half of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", content = "panel", rename_all = "snake_case")]
pub enum ActivePanel {
    Farm(FarmPanel),
    Logistics(LogisticsPanel),
}

/// Header plus the active panel, ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardPage {
    pub batch: BatchMetadata,
    pub tier: Tier,
    pub tier_label: &'static str,
    pub simulation_running: bool,
    #[serde(flatten)]
    pub active: ActivePanel,
}

/// Everything the page builder needs from the controller.
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    pub reading: &'a SensorReading,
    pub batch: &'a BatchRecord,
    pub tier: Tier,
    pub view: DashboardView,
    pub simulation_running: bool,
    pub received_at: Timestamp,
}

pub fn dashboard_page(ctx: PageContext<'_>) -> DashboardPage {
    let active = match ctx.view {
        DashboardView::Farm => ActivePanel::Farm(farm_panel(ctx.reading, ctx.tier, ctx.received_at)),
        DashboardView::Logistics => {
            ActivePanel::Logistics(logistics_panel(ctx.reading, ctx.tier, ctx.batch))
        }
    };

    DashboardPage {
        batch: ctx.batch.metadata.clone(),
        tier: ctx.tier,
        tier_label: ctx.tier.label(),
        simulation_running: ctx.simulation_running,
        active,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::Severity;
    use assert_matches::assert_matches;
    use chrono::Utc;

    fn batch() -> BatchRecord {
        BatchRecord::load().unwrap()
    }

    #[test]
    fn basic_tier_locks_farm_analytics() {
        let panel = farm_panel(&SensorReading::default(), Tier::Basic, Utc::now());
        assert_matches!(panel.analytics, Gated::Locked(ref p) if p.required_tier == Tier::Advanced);
        assert_eq!(panel.live.soil_moisture, 45.0);
        assert!(!panel.live.soil_moisture_alert);
    }

    #[test]
    fn advanced_tier_sees_yield_outlook() {
        let reading = SensorReading {
            soil_moisture: 35.0,
            ..SensorReading::default()
        };
        let panel = farm_panel(&reading, Tier::Advanced, Utc::now());
        assert!(panel.live.soil_moisture_alert);

        let analytics = panel.analytics.content().expect("analytics should be unlocked");
        assert_eq!(analytics.outlook.yield_risk, 75);
        assert_eq!(analytics.outlook.yield_forecast, 70);
        assert_eq!(analytics.sustainability.len(), 3);
    }

    #[test]
    fn basic_logistics_still_shows_risk_score() {
        let reading = SensorReading {
            container_temp: 25.0,
            ..SensorReading::default()
        };
        let panel = logistics_panel(&reading, Tier::Basic, &batch());

        assert!(panel.quality_prediction.is_locked());
        assert!(panel.enterprise.is_locked());
        assert_eq!(panel.live.quality_risk_score, 85);
        assert!(panel.live.container_temp_alert);
        assert_eq!(panel.traceability.milestones.len(), 6);
    }

    #[test]
    fn enterprise_unlocks_everything() {
        let panel = logistics_panel(&SensorReading::default(), Tier::Enterprise, &batch());

        let prediction = panel.quality_prediction.content().unwrap();
        assert_eq!(prediction.severity, Severity::Normal);
        assert_eq!(
            panel.enterprise.content().unwrap().masked_api_key,
            MASKED_API_KEY
        );
        assert!(panel
            .traceability
            .milestones
            .iter()
            .all(|m| m.stream_label.is_some()));
    }

    #[test]
    fn advanced_tier_locks_enterprise_region() {
        let panel = logistics_panel(&SensorReading::default(), Tier::Advanced, &batch());
        assert!(!panel.quality_prediction.is_locked());
        assert_matches!(panel.enterprise, Gated::Locked(ref p) if p.required_tier == Tier::Enterprise);
    }

    #[test]
    fn shock_warning_tracks_reading() {
        let reading = SensorReading {
            shock_index: 1.1,
            ..SensorReading::default()
        };
        assert!(logistics_panel(&reading, Tier::Basic, &batch()).live.shock_warning);
    }

    #[test]
    fn page_follows_active_view() {
        let reading = SensorReading::default();
        let batch = batch();
        let ctx = PageContext {
            reading: &reading,
            batch: &batch,
            tier: Tier::Basic,
            view: DashboardView::Farm,
            simulation_running: true,
            received_at: Utc::now(),
        };

        let page = dashboard_page(ctx);
        assert_matches!(page.active, ActivePanel::Farm(_));
        assert_eq!(page.tier_label, "Basic Tier");

        let page = dashboard_page(PageContext {
            view: DashboardView::Logistics,
            ..ctx
        });
        assert_matches!(page.active, ActivePanel::Logistics(_));

        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["view"], "logistics");
        assert_eq!(json["batch"]["batch_id"], "SDR-M-042-2025");
        assert_eq!(json["panel"]["quality_prediction"]["status"], "locked");
    }

    #[test]
    fn view_parses_case_insensitively() {
        assert_eq!("Farm".parse::<DashboardView>().unwrap(), DashboardView::Farm);
        assert!("warehouse".parse::<DashboardView>().is_err());
    }
}
