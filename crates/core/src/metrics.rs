//! Derived metrics: yield forecast, irrigation advice and quality risk.
//!
//! Both computations are pure functions of a single sensor value. They do not
//! validate their input; out-of-range readings flow straight through the
//! arithmetic. Validation belongs at the point a reading enters the system
//! (see [`SensorReading::validate`](crate::sensor::SensorReading::validate)).

use serde::Serialize;

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

/// Below this moisture level the crop is under drought stress.
pub const MOISTURE_OPTIMAL_MIN: f64 = 40.0;
/// Above this moisture level the soil is oversaturated.
pub const MOISTURE_OPTIMAL_MAX: f64 = 55.0;

/// Yield risk (percent) when moisture is below the optimal band.
pub const YIELD_RISK_DROUGHT: u8 = 75;
/// Yield risk (percent) when moisture is above the optimal band.
pub const YIELD_RISK_OVERSATURATED: u8 = 50;
/// Yield risk (percent) inside the optimal band.
pub const YIELD_RISK_LOW: u8 = 10;

/// Best achievable yield forecast (percent) before risk is subtracted.
pub const YIELD_CEILING: u8 = 95;
/// The yield forecast is never reported below this value.
pub const YIELD_FLOOR: u8 = 70;

/// Container temperature above which quality starts degrading (°C).
pub const QUALITY_RISK_ONSET_TEMP: f64 = 18.5;
/// Risk score assigned as soon as the onset temperature is exceeded.
pub const QUALITY_RISK_BASE: f64 = 20.0;
/// Risk added per degree above the onset temperature.
pub const QUALITY_RISK_PER_DEGREE: f64 = 10.0;
/// Upper bound of the quality risk score.
pub const QUALITY_RISK_CAP: u8 = 95;

/// Risk score at or above which a quality alert is critical.
pub const QUALITY_CRITICAL_SCORE: u8 = 75;
/// Risk score at or above which a quality alert is a warning.
pub const QUALITY_WARNING_SCORE: u8 = 50;

/// Shock index above which the logistics view raises a warning.
pub const SHOCK_WARNING_THRESHOLD: f64 = 1.0;

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Discrete risk band derived from a continuous sensor value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Normal,
    Warning,
    Critical,
}

// ---------------------------------------------------------------------------
// Yield / water
// ---------------------------------------------------------------------------

/// What the irrigation system should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IrrigationAction {
    ImmediateIrrigation,
    PauseIrrigation,
    MaintainSchedule,
}

impl IrrigationAction {
    /// Human-readable action name.
    pub fn label(self) -> &'static str {
        match self {
            IrrigationAction::ImmediateIrrigation => "Immediate Irrigation",
            IrrigationAction::PauseIrrigation => "Pause Irrigation",
            IrrigationAction::MaintainSchedule => "Maintain Schedule",
        }
    }
}

/// Irrigation advice for the current soil moisture.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaterRecommendation {
    pub action: IrrigationAction,
    /// Recommended flow rate in litres per minute.
    pub rate_l_per_min: f64,
    pub severity: Severity,
    pub message: &'static str,
}

/// Yield forecast and irrigation advice derived from soil moisture.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YieldOutlook {
    /// Risk of yield loss (percent).
    pub yield_risk: u8,
    /// Forecast yield (integer percent).
    pub yield_forecast: u8,
    /// `true` when the yield risk exceeds the oversaturation band.
    pub is_alert: bool,
    pub water: WaterRecommendation,
}

/// Risk of yield loss for a soil moisture level.
///
/// The bounds 40 and 55 belong to the optimal band.
pub fn yield_risk(moisture: f64) -> u8 {
    if moisture < MOISTURE_OPTIMAL_MIN {
        YIELD_RISK_DROUGHT
    } else if moisture > MOISTURE_OPTIMAL_MAX {
        YIELD_RISK_OVERSATURATED
    } else {
        YIELD_RISK_LOW
    }
}

/// `max(95 - risk, 70)`, saturating so a risk above 95 still yields the floor.
pub fn yield_forecast(risk: u8) -> u8 {
    YIELD_CEILING.saturating_sub(risk).max(YIELD_FLOOR)
}

/// Irrigation advice for a soil moisture level.
pub fn water_recommendation(moisture: f64) -> WaterRecommendation {
    if moisture < MOISTURE_OPTIMAL_MIN {
        WaterRecommendation {
            action: IrrigationAction::ImmediateIrrigation,
            rate_l_per_min: 2.5,
            severity: Severity::Critical,
            message: "Recommended: Immediate Irrigation (Low Moisture)",
        }
    } else if moisture > MOISTURE_OPTIMAL_MAX {
        WaterRecommendation {
            action: IrrigationAction::PauseIrrigation,
            rate_l_per_min: 0.0,
            severity: Severity::Warning,
            message: "Recommended: Pause Irrigation (High Saturation)",
        }
    } else {
        WaterRecommendation {
            action: IrrigationAction::MaintainSchedule,
            rate_l_per_min: 1.2,
            severity: Severity::Normal,
            message: "Recommended: Maintain Schedule (Optimal)",
        }
    }
}

/// Full yield/water computation for one moisture reading.
pub fn yield_outlook(moisture: f64) -> YieldOutlook {
    let yield_risk = yield_risk(moisture);
    YieldOutlook {
        yield_risk,
        yield_forecast: yield_forecast(yield_risk),
        is_alert: yield_risk > YIELD_RISK_OVERSATURATED,
        water: water_recommendation(moisture),
    }
}

/// `true` when soil moisture sits outside the optimal `[40, 55]` band.
pub fn moisture_out_of_band(moisture: f64) -> bool {
    moisture < MOISTURE_OPTIMAL_MIN || moisture > MOISTURE_OPTIMAL_MAX
}

// ---------------------------------------------------------------------------
// Quality risk
// ---------------------------------------------------------------------------

/// Predicted quality degradation for the current container temperature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityRisk {
    /// Predicted degradation (percent, `0..=95`).
    pub risk_score: u8,
    pub severity: Severity,
    pub is_critical: bool,
    pub message: String,
}

/// Quality risk score for a container temperature.
///
/// Zero up to and including 18.5 °C. Strictly above it the score is
/// `round((t - 18.5) * 10 + 20)`, rounded first and then capped at 95, so
/// the score jumps from 0 straight to 20 just past the onset.
pub fn quality_risk_score(temp: f64) -> u8 {
    if temp > QUALITY_RISK_ONSET_TEMP {
        let raw = ((temp - QUALITY_RISK_ONSET_TEMP) * QUALITY_RISK_PER_DEGREE + QUALITY_RISK_BASE)
            .round();
        raw.min(f64::from(QUALITY_RISK_CAP)) as u8
    } else {
        0
    }
}

/// Risk band for a quality risk score.
pub fn quality_severity(score: u8) -> Severity {
    if score >= QUALITY_CRITICAL_SCORE {
        Severity::Critical
    } else if score >= QUALITY_WARNING_SCORE {
        Severity::Warning
    } else {
        Severity::Normal
    }
}

/// Full quality-risk computation for one container temperature.
pub fn quality_risk(container_temp: f64) -> QualityRisk {
    let risk_score = quality_risk_score(container_temp);
    let severity = quality_severity(risk_score);
    let message = match severity {
        Severity::Critical => {
            format!("CRITICAL ALERT! Predicted Quality Degradation: {risk_score}%")
        }
        Severity::Warning => format!("High Temp Anomaly Detected. Risk Score: {risk_score}%"),
        Severity::Normal => {
            "Quality Outlook: Excellent. All metrics within target range.".to_string()
        }
    };

    QualityRisk {
        risk_score,
        severity,
        is_critical: severity == Severity::Critical,
        message,
    }
}

/// `true` when the shock index is high enough to flag on the logistics view.
pub fn shock_warning(shock_index: f64) -> bool {
    shock_index > SHOCK_WARNING_THRESHOLD
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- Yield / water --

    #[test]
    fn dry_soil_is_high_risk_and_needs_irrigation() {
        for m in [-5.0, 0.0, 30.0, 39.9, 39.999] {
            let outlook = yield_outlook(m);
            assert_eq!(outlook.yield_risk, 75, "moisture {m}");
            assert_eq!(outlook.water.action, IrrigationAction::ImmediateIrrigation);
            assert_eq!(outlook.water.action.label(), "Immediate Irrigation");
            assert_eq!(outlook.water.rate_l_per_min, 2.5);
            assert_eq!(outlook.water.severity, Severity::Critical);
        }
    }

    #[test]
    fn optimal_band_is_inclusive() {
        for m in [40.0, 45.0, 47.5, 55.0] {
            let outlook = yield_outlook(m);
            assert_eq!(outlook.yield_risk, 10, "moisture {m}");
            assert_eq!(outlook.water.action, IrrigationAction::MaintainSchedule);
            assert_eq!(outlook.water.rate_l_per_min, 1.2);
            assert_eq!(outlook.water.severity, Severity::Normal);
            assert!(!moisture_out_of_band(m));
        }
    }

    #[test]
    fn wet_soil_pauses_irrigation() {
        for m in [55.001, 60.0, 100.0, 250.0] {
            let outlook = yield_outlook(m);
            assert_eq!(outlook.yield_risk, 50, "moisture {m}");
            assert_eq!(outlook.water.action, IrrigationAction::PauseIrrigation);
            assert_eq!(outlook.water.rate_l_per_min, 0.0);
            assert_eq!(outlook.water.severity, Severity::Warning);
        }
    }

    #[test]
    fn yield_forecast_follows_max_formula() {
        assert_eq!(yield_forecast(75), 70);
        assert_eq!(yield_forecast(50), 70);
        assert_eq!(yield_forecast(10), 85);
        assert_eq!(yield_forecast(0), 95);
        assert_eq!(yield_forecast(200), 70);
    }

    #[test]
    fn yield_alert_only_for_drought() {
        assert!(yield_outlook(20.0).is_alert);
        assert!(!yield_outlook(70.0).is_alert);
        assert!(!yield_outlook(45.0).is_alert);
    }

    #[test]
    fn nan_moisture_falls_into_optimal_branch() {
        let outlook = yield_outlook(f64::NAN);
        assert_eq!(outlook.yield_risk, YIELD_RISK_LOW);
    }

    // -- Quality risk --

    #[test]
    fn no_risk_at_or_below_onset() {
        for t in [-10.0, 0.0, 18.0, 18.5] {
            assert_eq!(quality_risk_score(t), 0, "temp {t}");
            assert_eq!(quality_risk(t).severity, Severity::Normal);
        }
    }

    #[test]
    fn onset_comparison_is_strict() {
        assert_eq!(quality_risk_score(18.5), 0);
        assert_eq!(quality_risk_score(18.5001), 20);
    }

    #[test]
    fn score_at_nineteen_point_five() {
        let risk = quality_risk(19.5);
        assert_eq!(risk.risk_score, 30);
        assert_eq!(risk.severity, Severity::Normal);
        assert!(!risk.is_critical);
        assert!(risk.message.contains("Excellent"));
    }

    #[test]
    fn score_at_twenty_five_is_critical() {
        let risk = quality_risk(25.0);
        assert_eq!(risk.risk_score, 85);
        assert_eq!(risk.severity, Severity::Critical);
        assert!(risk.is_critical);
        assert_eq!(risk.message, "CRITICAL ALERT! Predicted Quality Degradation: 85%");
    }

    #[test]
    fn warning_band() {
        // (21.5 - 18.5) * 10 + 20 = 50
        let risk = quality_risk(21.5);
        assert_eq!(risk.risk_score, 50);
        assert_eq!(risk.severity, Severity::Warning);
        assert_eq!(risk.message, "High Temp Anomaly Detected. Risk Score: 50%");

        // (24.0 - 18.5) * 10 + 20 = 75
        assert_eq!(quality_risk(24.0).severity, Severity::Critical);
    }

    #[test]
    fn score_is_capped() {
        assert_eq!(quality_risk_score(26.0), 95);
        assert_eq!(quality_risk_score(26.3), 95);
        assert_eq!(quality_risk_score(400.0), 95);
    }

    #[test]
    fn shock_warning_is_strict() {
        assert!(!shock_warning(1.0));
        assert!(shock_warning(1.05));
    }
}
