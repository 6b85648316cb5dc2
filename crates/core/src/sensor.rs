//! Sensor telemetry record and the simulated update rules.
//!
//! [`SensorReading`] is always replaced wholesale: [`SensorReading::next`]
//! derives a fully populated successor from the previous record, so readers
//! never observe a half-updated snapshot.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Target container temperature in °C.
pub const CONTAINER_TARGET_TEMP: f64 = 18.0;
/// Container temperature at which the simulated ramp stops climbing.
pub const CONTAINER_RAMP_LIMIT: f64 = 23.5;
/// Container temperature the ramp settles at once past the limit.
pub const CONTAINER_PLATEAU_TEMP: f64 = 24.0;
/// Per-tick container temperature increase.
pub const CONTAINER_TEMP_STEP: f64 = 0.5;

/// Upper clamp for the shock index (g-force).
pub const SHOCK_INDEX_MAX: f64 = 1.2;
/// Per-tick shock index increase.
pub const SHOCK_INDEX_STEP: f64 = 0.05;

/// Soil moisture never drops below this floor (percent).
pub const SOIL_MOISTURE_FLOOR: f64 = 30.0;
/// Per-tick soil moisture decrease.
pub const SOIL_MOISTURE_STEP: f64 = 1.5;

/// Per-tick light intensity perturbation (lux).
pub const LIGHT_INTENSITY_STEP: i64 = 1000;

/// Ambient temperature the weather jitter is centred on (°C).
pub const WEATHER_BASE_TEMP: f64 = 28.0;
/// Half-width of the weather jitter window (°C).
pub const WEATHER_JITTER: f64 = 0.25;

// ---------------------------------------------------------------------------
// SensorReading
// ---------------------------------------------------------------------------

/// A complete snapshot of the farm, logistics and warehouse data streams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Reefer container temperature (°C).
    pub container_temp: f64,
    /// Accumulated shock, clamped to `[0, 1.2]` g-force.
    pub shock_index: f64,
    /// Free-form position description.
    pub gps_location: String,
    /// Soil moisture (percent).
    pub soil_moisture: f64,
    /// Light intensity (lux).
    pub light_intensity: i64,
    /// Ambient farm temperature (°C).
    pub weather_temp: f64,
    /// KEZAD warehouse storage temperature (°C). Never changes after startup.
    pub kezad_storage_temp: f64,
}

impl Default for SensorReading {
    /// The reading the dashboard starts from.
    fn default() -> Self {
        Self {
            container_temp: 18.5,
            shock_index: 0.1,
            gps_location: "28.52 N, -9.1 W (Mid-Voyage)".to_string(),
            soil_moisture: 45.0,
            light_intensity: 65_000,
            weather_temp: WEATHER_BASE_TEMP,
            kezad_storage_temp: 17.5,
        }
    }
}

impl SensorReading {
    /// Derive the next simulated reading.
    ///
    /// - container temperature ramps by 0.5 °C until it reaches 23.5, then
    ///   holds at 24.0
    /// - shock index creeps up by 0.05, clamped to `[0, 1.2]`
    /// - soil moisture dries out by 1.5 %, never below 30
    /// - light intensity moves ±1000 lux on a coin flip
    /// - weather temperature jitters within ±0.25 °C of 28.0
    ///
    /// Location and warehouse temperature are carried over untouched.
    pub fn next<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        let container_temp = if self.container_temp < CONTAINER_RAMP_LIMIT {
            self.container_temp + CONTAINER_TEMP_STEP
        } else {
            CONTAINER_PLATEAU_TEMP
        };

        let shock_index = (self.shock_index + SHOCK_INDEX_STEP).clamp(0.0, SHOCK_INDEX_MAX);

        let soil_moisture = if self.soil_moisture > SOIL_MOISTURE_FLOOR {
            (self.soil_moisture - SOIL_MOISTURE_STEP).max(SOIL_MOISTURE_FLOOR)
        } else {
            SOIL_MOISTURE_FLOOR
        };

        let light_intensity = if rng.random_bool(0.5) {
            self.light_intensity + LIGHT_INTENSITY_STEP
        } else {
            self.light_intensity - LIGHT_INTENSITY_STEP
        };

        let weather_temp = WEATHER_BASE_TEMP + rng.random_range(-WEATHER_JITTER..WEATHER_JITTER);

        Self {
            container_temp,
            shock_index,
            gps_location: self.gps_location.clone(),
            soil_moisture,
            light_intensity,
            weather_temp,
            kezad_storage_temp: self.kezad_storage_temp,
        }
    }

    /// Validate a reading that did not come from the simulator.
    ///
    /// Every numeric field must be finite. Moisture, shock, and light
    /// intensity must also be non-negative, and the shock index may not
    /// exceed [`SHOCK_INDEX_MAX`]. Temperatures may legitimately be negative.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_finite(self.container_temp, "container_temp")?;
        validate_finite(self.weather_temp, "weather_temp")?;
        validate_finite(self.kezad_storage_temp, "kezad_storage_temp")?;

        validate_non_negative(self.soil_moisture, "soil_moisture")?;
        validate_non_negative(self.shock_index, "shock_index")?;
        if self.shock_index > SHOCK_INDEX_MAX {
            return Err(CoreError::Validation(format!(
                "shock_index must be at most {SHOCK_INDEX_MAX}, got {}",
                self.shock_index
            )));
        }

        if self.light_intensity < 0 {
            return Err(CoreError::Validation(format!(
                "light_intensity must be non-negative, got {}",
                self.light_intensity
            )));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Validation helpers
// ---------------------------------------------------------------------------

/// Reject NaN and infinities.
pub fn validate_finite(value: f64, name: &str) -> Result<(), CoreError> {
    if !value.is_finite() {
        return Err(CoreError::Validation(format!(
            "{name} must be a finite number, got {value}"
        )));
    }
    Ok(())
}

/// Reject non-finite and negative values.
pub fn validate_non_negative(value: f64, name: &str) -> Result<(), CoreError> {
    validate_finite(value, name)?;
    if value < 0.0 {
        return Err(CoreError::Validation(format!(
            "{name} must be non-negative, got {value}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
