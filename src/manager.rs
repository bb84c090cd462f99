// src/manager.rs - Owns the alerts of one node and routes bus traffic to them
use crate::alert::Alert;
use crate::codec::AlertResponse;
use crate::config::Config;
use crate::error::{AlertError, Result};
use crate::message::N2kMessage;
use crate::timer::{Clock, MonotonicClock};
use crate::types::ThresholdStatus;
use log::{debug, info, trace};
use std::collections::BTreeMap;

/// Alerts keyed by alert id.
///
/// Iteration, [`notifications`](Self::notifications) and
/// [`texts`](Self::texts) follow ascending alert id.
#[derive(Debug, Clone)]
pub struct AlertManager<C: Clock = MonotonicClock> {
    alerts: BTreeMap<u16, Alert<C>>,
}

impl<C: Clock> Default for AlertManager<C> {
    fn default() -> Self {
        Self {
            alerts: BTreeMap::new(),
        }
    }
}

impl AlertManager<MonotonicClock> {
    /// Validate `config` and build every alert it defines
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut manager = Self::new();
        for alert in config.build_alerts()? {
            manager.add(alert)?;
        }
        info!("Loaded {} alert(s)", manager.len());
        Ok(manager)
    }
}

impl<C: Clock> AlertManager<C> {
    /// Empty manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an alert. Alert ids must be unique.
    pub fn add(&mut self, alert: Alert<C>) -> Result<()> {
        let id = alert.alert_id();
        if self.alerts.contains_key(&id) {
            return Err(AlertError::Config(format!("Duplicate alert id {}", id)));
        }
        debug!("Registered alert {} ({})", id, alert.alert_type());
        self.alerts.insert(id, alert);
        Ok(())
    }

    /// Alert with `alert_id`
    pub fn get(&self, alert_id: u16) -> Option<&Alert<C>> {
        self.alerts.get(&alert_id)
    }

    /// Mutable alert with `alert_id`
    pub fn get_mut(&mut self, alert_id: u16) -> Option<&mut Alert<C>> {
        self.alerts.get_mut(&alert_id)
    }

    /// Number of registered alerts
    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    /// `true` when no alert is registered
    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    /// Alerts in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = &Alert<C>> {
        self.alerts.values()
    }

    /// Feed one sample to the alert with `alert_id`
    pub fn test_threshold(&mut self, alert_id: u16, sample: u64) -> Result<ThresholdStatus> {
        self.alerts
            .get_mut(&alert_id)
            .map(|alert| alert.test_threshold(sample))
            .ok_or(AlertError::UnknownAlert(alert_id))
    }

    /// Offer an inbound message to every alert.
    ///
    /// Returns `true` if it was an Alert Response, whether or not any alert
    /// matched its system and subsystem.
    pub fn handle_message(&mut self, msg: &N2kMessage) -> bool {
        let response = match AlertResponse::decode(msg) {
            Ok(response) => response,
            Err(e) => {
                trace!("Ignoring message: {}", e);
                return false;
            }
        };

        let mut handled = false;
        for alert in self.alerts.values_mut() {
            handled |= alert.handle_response(&response);
        }
        if !handled {
            debug!(
                "Response for system {}/{} matched no alert",
                response.header.alert_system, response.header.alert_subsystem
            );
        }
        true
    }

    /// Encoded Alert Notifications of every alert
    pub fn notifications(&self) -> Vec<N2kMessage> {
        self.alerts.values().map(Alert::encode_notification).collect()
    }

    /// Encoded Alert Texts of every alert
    pub fn texts(&self) -> Vec<N2kMessage> {
        self.alerts.values().map(Alert::encode_text).collect()
    }
}
