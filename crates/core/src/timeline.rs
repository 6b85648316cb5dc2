//! Static batch record: product metadata and the shipment timeline.
//!
//! The record is loaded once at startup via [`BatchRecord::load`] and never
//! mutated afterwards.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::CoreError;
use crate::tier::Tier;
use crate::types::{LocalTimestamp, MilestoneId};

/// Format of the raw milestone timestamps.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Position (1-based) of the milestone the shipment is currently at.
pub const CURRENT_MILESTONE_ID: MilestoneId = 4;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Which data stream a milestone was recorded on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneCategory {
    Farm,
    Operation,
    Logistics,
    Warehouse,
}

impl MilestoneCategory {
    pub fn label(self) -> &'static str {
        match self {
            MilestoneCategory::Farm => "Farm",
            MilestoneCategory::Operation => "Operation",
            MilestoneCategory::Logistics => "Logistics",
            MilestoneCategory::Warehouse => "Warehouse",
        }
    }
}

/// A fixed checkpoint in the shipment's recorded journey.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineMilestone {
    pub id: MilestoneId,
    pub name: &'static str,
    pub recorded_at: LocalTimestamp,
    pub location: &'static str,
    pub category: MilestoneCategory,
    pub icon: &'static str,
}

/// Product and record identifiers for the tracked batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchMetadata {
    pub product: &'static str,
    pub batch_id: &'static str,
    pub record_id: &'static str,
}

pub const BATCH_METADATA: BatchMetadata = BatchMetadata {
    product: "Medjool Dates (Morocco)",
    batch_id: "SDR-M-042-2025",
    record_id: "AL-SIDR-DH/Record/00A9F",
};

struct RawMilestone {
    name: &'static str,
    recorded_at: &'static str,
    location: &'static str,
    category: MilestoneCategory,
    icon: &'static str,
}

const RAW_TIMELINE: &[RawMilestone] = &[
    RawMilestone {
        name: "Harvest Complete",
        recorded_at: "2025-10-28 08:00",
        location: "Pilot Farm, Morocco",
        category: MilestoneCategory::Farm,
        icon: "🌾",
    },
    RawMilestone {
        name: "Quality Inspection & Prep",
        recorded_at: "2025-10-28 14:30",
        location: "Processing Facility",
        category: MilestoneCategory::Operation,
        icon: "🔎",
    },
    RawMilestone {
        name: "Container Loaded & Sealed",
        recorded_at: "2025-10-29 06:00",
        location: "Casablanca Loading Dock",
        category: MilestoneCategory::Logistics,
        icon: "📦",
    },
    RawMilestone {
        name: "Vessel Departure",
        recorded_at: "2025-10-29 10:00",
        location: "Port of Casablanca (Anomaly Start)",
        category: MilestoneCategory::Logistics,
        icon: "🚢",
    },
    RawMilestone {
        name: "KEZAD Inbound Processing",
        recorded_at: "2025-11-06 14:00",
        location: "KEZAD Hub, Abu Dhabi",
        category: MilestoneCategory::Warehouse,
        icon: "🏗️",
    },
    RawMilestone {
        name: "Ready for Re-Export",
        recorded_at: "2025-11-07 10:00",
        location: "KEZAD Hub, Abu Dhabi",
        category: MilestoneCategory::Warehouse,
        icon: "✅",
    },
];

// ---------------------------------------------------------------------------
// BatchRecord
// ---------------------------------------------------------------------------

/// Immutable batch metadata plus its ordered timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchRecord {
    pub metadata: BatchMetadata,
    pub timeline: Vec<TimelineMilestone>,
}

impl BatchRecord {
    /// Build the batch record from the static milestone table.
    pub fn load() -> Result<Self, CoreError> {
        let timeline = RAW_TIMELINE
            .iter()
            .zip(1..)
            .map(|(raw, id)| {
                let recorded_at = NaiveDateTime::parse_from_str(raw.recorded_at, TIMESTAMP_FORMAT)
                    .map_err(|e| {
                        CoreError::Internal(format!(
                            "Invalid timestamp '{}' for milestone '{}': {e}",
                            raw.recorded_at, raw.name
                        ))
                    })?;
                Ok::<_, CoreError>(TimelineMilestone {
                    id,
                    name: raw.name,
                    recorded_at,
                    location: raw.location,
                    category: raw.category,
                    icon: raw.icon,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            metadata: BATCH_METADATA,
            timeline,
        })
    }

    /// Look up a milestone by its sequence position.
    pub fn milestone(&self, id: MilestoneId) -> Result<&TimelineMilestone, CoreError> {
        self.timeline
            .iter()
            .find(|m| m.id == id)
            .ok_or_else(|| CoreError::NotFound {
                entity: "TimelineMilestone",
                id: id.to_string(),
            })
    }

    /// Timeline entries as presented to a viewer at `tier`.
    pub fn timeline_view(&self, tier: Tier) -> Vec<MilestoneView> {
        let last_id = self.timeline.len() as MilestoneId;
        self.timeline
            .iter()
            .map(|m| MilestoneView {
                milestone: m.clone(),
                is_current: m.id == CURRENT_MILESTONE_ID,
                is_last: m.id == last_id,
                stream_label: stream_label(tier, m.category),
            })
            .collect()
    }
}

/// A milestone decorated for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MilestoneView {
    #[serde(flatten)]
    pub milestone: TimelineMilestone,
    pub is_current: bool,
    pub is_last: bool,
    /// e.g. `"(Logistics Data Stream)"`; only shown to Enterprise viewers.
    pub stream_label: Option<String>,
}

/// Data-stream label for a milestone, visible at Enterprise tier only.
pub fn stream_label(tier: Tier, category: MilestoneCategory) -> Option<String> {
    (tier == Tier::Enterprise).then(|| format!("({} Data Stream)", category.label()))
}
