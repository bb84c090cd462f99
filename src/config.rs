// src/config.rs - YAML alert definitions

use crate::alert::{Alert, DEFAULT_ALERT_PRIORITY, DEFAULT_SILENCE_SECONDS, MAX_OCCURRENCE_THRESHOLD};
use crate::error::{AlertError, Result};
use crate::text::ALERT_TEXT_CAPACITY;
use crate::threshold::Threshold;
use crate::timer::{Clock, MonotonicClock};
use crate::types::{AlertCategory, AlertType, Language, TriggerCondition, YesNo};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

// ============================================================================
// MAIN CONFIGURATION
// ============================================================================

/// Alert definitions for one node
///
/// ```yaml
/// alerts:
///   - id: 1
///     type: warning
///     category: technical
///     support:
///       temporary_silence: true
///       acknowledge: true
///     system:
///       system: 5
///       subsystem: 1
///       description: "Coolant temperature high"
///       location: "Engine room"
///     data_source:
///       instance: 0
///       network_id: 0x1122334455667788
///     threshold:
///       method: greater
///       level: 60
///     occurrence_threshold: 3
///     silence_seconds: 600
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Alert definitions
    #[serde(default)]
    pub alerts: Vec<AlertConfig>,
}

impl Config {
    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Check the definitions for operator mistakes.
    ///
    /// Duplicate alert ids and texts that would be cut on the wire are
    /// rejected. Out-of-range occurrence thresholds are only reported; the
    /// alert normalizes them when built.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for alert in &self.alerts {
            if !seen.insert(alert.id) {
                return Err(AlertError::Config(format!("Duplicate alert id {}", alert.id)));
            }
            alert.validate()?;
        }
        Ok(())
    }

    /// Build every configured alert on the process monotonic clock
    pub fn build_alerts(&self) -> Result<Vec<Alert>> {
        self.validate()?;
        Ok(self.alerts.iter().map(AlertConfig::build).collect())
    }
}

// ============================================================================
// ALERT CONFIGURATION
// ============================================================================

/// One alert definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertConfig {
    /// Alert id, unique on the bus
    pub id: u16,

    /// Alert type
    #[serde(rename = "type")]
    pub alert_type: AlertType,

    /// Alert category
    pub category: AlertCategory,

    /// Alert priority
    #[serde(default = "default_priority")]
    pub priority: u8,

    /// How the alert is triggered
    #[serde(default)]
    pub trigger_condition: TriggerCondition,

    /// Supported responses
    #[serde(default)]
    pub support: SupportConfig,

    /// Reporting system and texts
    #[serde(default)]
    pub system: SystemConfig,

    /// Data source linkage
    #[serde(default)]
    pub data_source: DataSourceConfig,

    /// Threshold evaluation
    #[serde(default)]
    pub threshold: Threshold,

    /// Consecutive exceeding samples before the alert is raised
    #[serde(default = "default_occurrence_threshold")]
    pub occurrence_threshold: u8,

    /// Temporary silence duration in seconds
    #[serde(default = "default_silence_seconds")]
    pub silence_seconds: u16,
}

impl AlertConfig {
    /// Check this definition on its own
    pub fn validate(&self) -> Result<()> {
        for (field, text) in [
            ("description", &self.system.description),
            ("location", &self.system.location),
        ] {
            if text.len() > ALERT_TEXT_CAPACITY {
                return Err(AlertError::Config(format!(
                    "Alert {} {} is {} bytes, limit is {}",
                    self.id,
                    field,
                    text.len(),
                    ALERT_TEXT_CAPACITY
                )));
            }
        }

        if self.occurrence_threshold == 0 || self.occurrence_threshold > MAX_OCCURRENCE_THRESHOLD {
            warn!(
                "Alert {} occurrence_threshold {} out of range, using 1",
                self.id, self.occurrence_threshold
            );
        }
        Ok(())
    }

    /// Build the alert on the process monotonic clock
    pub fn build(&self) -> Alert {
        self.build_with_clock(MonotonicClock::new())
    }

    /// Build the alert on `clock`
    pub fn build_with_clock<C: Clock>(&self, clock: C) -> Alert<C> {
        let mut alert = Alert::with_clock(self.alert_type, self.category, self.id, clock)
            .with_priority(self.priority)
            .with_trigger_condition(self.trigger_condition)
            .with_support(
                YesNo::from(self.support.temporary_silence),
                YesNo::from(self.support.acknowledge),
                YesNo::from(self.support.escalation),
            )
            .with_occurrence_threshold(self.occurrence_threshold);

        alert.set_system(
            self.system.system,
            self.system.subsystem,
            self.system.acknowledge_network_id,
            self.system.language,
            &self.system.description,
            &self.system.location,
        );
        alert.set_data_source(
            self.data_source.instance,
            self.data_source.index,
            self.data_source.network_id,
        );
        alert.set_threshold(self.threshold.method, self.threshold.format, self.threshold.level);
        alert.set_temporary_silence_time(self.silence_seconds);
        alert
    }
}

/// Responses an alert accepts
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SupportConfig {
    /// Temporary silence supported
    #[serde(default)]
    pub temporary_silence: bool,

    /// Acknowledge supported
    #[serde(default)]
    pub acknowledge: bool,

    /// Escalation supported
    #[serde(default)]
    pub escalation: bool,
}

/// Reporting system, acknowledge routing and texts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SystemConfig {
    /// Alert system
    #[serde(default)]
    pub system: u8,

    /// Alert subsystem
    #[serde(default)]
    pub subsystem: u8,

    /// Network id allowed to acknowledge
    #[serde(default)]
    pub acknowledge_network_id: u64,

    /// Language of the texts
    #[serde(default)]
    pub language: Language,

    /// Alert description
    #[serde(default)]
    pub description: String,

    /// Alert location
    #[serde(default)]
    pub location: String,
}

/// Device and sensor feeding the alert
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DataSourceConfig {
    /// Device instance
    #[serde(default)]
    pub instance: u8,

    /// Sensor index on the device
    #[serde(default)]
    pub index: u8,

    /// Network id of the device
    #[serde(default)]
    pub network_id: u64,
}

// ============================================================================
// DEFAULT VALUE FUNCTIONS
// ============================================================================

fn default_priority() -> u8 { DEFAULT_ALERT_PRIORITY }
fn default_occurrence_threshold() -> u8 { 1 }
fn default_silence_seconds() -> u16 { DEFAULT_SILENCE_SECONDS }
