// src/alert.rs - Alert state machine
//
// One `Alert` per monitored condition. It is configured once, then driven for
// the rest of the program by `test_threshold` samples and inbound Alert
// Response messages. Nothing here blocks or spawns; the owner polls.

use crate::codec::{AlertHeader, AlertNotification, AlertResponse, AlertText};
use crate::message::N2kMessage;
use crate::text::AlertString;
use crate::threshold::Threshold;
use crate::timer::{Clock, MonotonicClock, SilenceTimer};
use crate::types::{
    AlertCategory, AlertState, AlertType, Language, ResponseCommand, ThresholdMethod,
    ThresholdStatus, TriggerCondition, YesNo,
};
use log::{debug, info, trace};
use std::time::Duration;

/// Priority given to alerts that do not set one
pub const DEFAULT_ALERT_PRIORITY: u8 = 100;

/// Temporary silence time of a new alert, in seconds
pub const DEFAULT_SILENCE_SECONDS: u16 = 3600;

/// Largest accepted occurrence threshold
pub const MAX_OCCURRENCE_THRESHOLD: u8 = 250;

/// The occurrence counter restarts from zero once it passes this value
const OCCURRENCE_ROLLOVER: u8 = 250;

/// A monitored condition with threshold, silence and acknowledge handling.
///
/// # State transitions
///
/// On every [`test_threshold`](Self::test_threshold) call the sample is
/// compared against the configured [`Threshold`]:
///
/// - **exceeded**: while the threshold status is `Normal` the occurrence
///   counter is incremented; once it reaches the occurrence threshold the status
///   becomes `Exceeded`. An `Exceeded` alert is `Active`, `Silenced` while
///   temporary silence is on, and `Acknowledged` (status and state) once
///   acknowledged. Acknowledge wins over silence.
/// - **not exceeded**: status and state return to `Normal`, the acknowledge
///   flag and the occurrence counter are cleared. Silence is left alone.
///
/// Independently, an expired silence timer clears the silence flag.
///
/// # Examples
///
/// ```rust
/// use n2k_alert::{Alert, AlertCategory, AlertState, AlertType, ThresholdMethod, ThresholdStatus};
///
/// let mut alert = Alert::new(AlertType::Warning, AlertCategory::Technical, 1);
/// alert.set_threshold(ThresholdMethod::Greater, 0, 60);
///
/// assert_eq!(alert.test_threshold(65), ThresholdStatus::Exceeded);
/// assert_eq!(alert.state(), AlertState::Active);
///
/// assert_eq!(alert.test_threshold(55), ThresholdStatus::Normal);
/// assert_eq!(alert.occurrence(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct Alert<C: Clock = MonotonicClock> {
    // identity and classification
    alert_id: u16,
    alert_type: AlertType,
    alert_category: AlertCategory,
    priority: u8,
    trigger_condition: TriggerCondition,

    // lifecycle
    state: AlertState,
    threshold_status: ThresholdStatus,
    occurrence: u8,
    occurrence_threshold: u8,

    // presentation
    language: Language,
    description: AlertString,
    location: AlertString,

    // routing
    alert_system: u8,
    alert_subsystem: u8,
    acknowledge_network_id: u64,
    data_source_network_id: u64,
    data_source_instance: u8,
    data_source_index: u8,

    temporary_silence_support: YesNo,
    acknowledge_support: YesNo,
    escalation_support: YesNo,
    temporary_silence_status: YesNo,
    acknowledge_status: YesNo,
    escalation_status: YesNo,

    threshold: Threshold,

    silence_timer: SilenceTimer,
    silence_delay: Duration,
    clock: C,
}

impl Alert<MonotonicClock> {
    /// Create an alert timed by the process monotonic clock
    pub fn new(alert_type: AlertType, alert_category: AlertCategory, alert_id: u16) -> Self {
        Self::with_clock(alert_type, alert_category, alert_id, MonotonicClock::new())
    }
}

impl<C: Clock> Alert<C> {
    /// Create an alert timed by `clock`
    pub fn with_clock(
        alert_type: AlertType,
        alert_category: AlertCategory,
        alert_id: u16,
        clock: C,
    ) -> Self {
        Self {
            alert_id,
            alert_type,
            alert_category,
            priority: DEFAULT_ALERT_PRIORITY,
            trigger_condition: TriggerCondition::Auto,
            state: AlertState::Normal,
            threshold_status: ThresholdStatus::Normal,
            occurrence: 0,
            occurrence_threshold: 1,
            language: Language::EnglishUs,
            description: AlertString::default(),
            location: AlertString::default(),
            alert_system: 0,
            alert_subsystem: 0,
            acknowledge_network_id: 0,
            data_source_network_id: 0,
            data_source_instance: 0,
            data_source_index: 0,
            temporary_silence_support: YesNo::No,
            acknowledge_support: YesNo::No,
            escalation_support: YesNo::No,
            temporary_silence_status: YesNo::No,
            acknowledge_status: YesNo::No,
            escalation_status: YesNo::No,
            threshold: Threshold::default(),
            silence_timer: SilenceTimer::new(),
            silence_delay: silence_delay(DEFAULT_SILENCE_SECONDS),
            clock,
        }
    }

    /// Set the alert priority
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    /// Set how the alert is triggered
    pub fn with_trigger_condition(mut self, trigger_condition: TriggerCondition) -> Self {
        self.trigger_condition = trigger_condition;
        self
    }

    /// Declare which responses the alert supports
    pub fn with_support(
        mut self,
        temporary_silence: YesNo,
        acknowledge: YesNo,
        escalation: YesNo,
    ) -> Self {
        self.temporary_silence_support = temporary_silence;
        self.acknowledge_support = acknowledge;
        self.escalation_support = escalation;
        self
    }

    /// Set the occurrence threshold, see [`set_occurrence_threshold`](Self::set_occurrence_threshold)
    pub fn with_occurrence_threshold(mut self, threshold: u8) -> Self {
        self.set_occurrence_threshold(threshold);
        self
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    /// Set the reporting system, acknowledge routing and texts.
    ///
    /// Description and location are cut to [`ALERT_TEXT_CAPACITY`](crate::text::ALERT_TEXT_CAPACITY) bytes.
    pub fn set_system(
        &mut self,
        alert_system: u8,
        alert_subsystem: u8,
        acknowledge_network_id: u64,
        language: Language,
        description: &str,
        location: &str,
    ) {
        self.alert_system = alert_system;
        self.alert_subsystem = alert_subsystem;
        self.acknowledge_network_id = acknowledge_network_id;
        self.language = language;
        self.description.set(description);
        self.location.set(location);
    }

    /// Link the alert to the device and sensor that feed it
    pub fn set_data_source(&mut self, instance: u8, index: u8, network_id: u64) {
        self.data_source_instance = instance;
        self.data_source_index = index;
        self.data_source_network_id = network_id;
    }

    /// Configure threshold evaluation
    pub fn set_threshold(&mut self, method: ThresholdMethod, format: u8, level: u64) {
        self.threshold = Threshold::new(method, format, level);
    }

    /// Set how many consecutive exceeding samples raise the alert.
    ///
    /// 0 and values above [`MAX_OCCURRENCE_THRESHOLD`] both fall back to 1.
    pub fn set_occurrence_threshold(&mut self, threshold: u8) {
        self.occurrence_threshold = if threshold == 0 || threshold > MAX_OCCURRENCE_THRESHOLD {
            1
        } else {
            threshold
        };
    }

    /// Set how long a temporary silence lasts
    pub fn set_temporary_silence_time(&mut self, seconds: u16) {
        self.silence_delay = silence_delay(seconds);
    }

    // ------------------------------------------------------------------
    // Evaluation
    // ------------------------------------------------------------------

    /// Evaluate one sample and return the resulting threshold status
    pub fn test_threshold(&mut self, sample: u64) -> ThresholdStatus {
        if self.threshold.is_exceeded(sample) {
            self.exceed();
        } else {
            self.reset();
        }

        if self.silence_timer.is_elapsed(self.clock.now()) {
            if self.temporary_silence_status.is_yes() {
                debug!("Alert {} temporary silence expired", self.alert_id);
            }
            self.temporary_silence_status = YesNo::No;
            self.silence_timer.disarm();
        }

        self.threshold_status
    }

    fn exceed(&mut self) {
        if self.occurrence > OCCURRENCE_ROLLOVER {
            self.occurrence = 0;
        }

        if self.threshold_status == ThresholdStatus::Normal {
            self.occurrence += 1;
            if self.occurrence >= self.occurrence_threshold {
                self.threshold_status = ThresholdStatus::Exceeded;
                debug!(
                    "Alert {} threshold exceeded after {} occurrence(s)",
                    self.alert_id, self.occurrence
                );
            }
        }

        if self.threshold_status == ThresholdStatus::Exceeded {
            self.state = AlertState::Active;
            if self.temporary_silence_status.is_yes() {
                self.state = AlertState::Silenced;
            }
            if self.acknowledge_status.is_yes() {
                self.state = AlertState::Acknowledged;
                self.threshold_status = ThresholdStatus::Acknowledged;
            }
        }
    }

    fn reset(&mut self) {
        if self.threshold_status != ThresholdStatus::Normal {
            debug!("Alert {} back to normal", self.alert_id);
        }
        self.threshold_status = ThresholdStatus::Normal;
        self.state = AlertState::Normal;
        self.acknowledge_status = YesNo::No;
        self.occurrence = 0;
    }

    // ------------------------------------------------------------------
    // Responses
    // ------------------------------------------------------------------

    /// Apply an inbound message if it is an Alert Response.
    ///
    /// Returns `false` only when the message is not PGN 126984. Any 126984
    /// payload is accepted; fields missing from a short payload read as "not
    /// available". Responses meant for another alert return `true` and leave
    /// this alert untouched.
    pub fn apply_response(&mut self, msg: &N2kMessage) -> bool {
        match AlertResponse::decode(msg) {
            Ok(response) => {
                self.handle_response(&response);
                true
            }
            Err(e) => {
                trace!("Alert {} ignoring message: {}", self.alert_id, e);
                false
            }
        }
    }

    /// Apply a decoded response. Returns `true` if it addressed this alert.
    pub fn handle_response(&mut self, response: &AlertResponse) -> bool {
        let header = &response.header;
        if header.alert_system != self.alert_system || header.alert_subsystem != self.alert_subsystem
        {
            trace!(
                "Alert {} skipping response for system {}/{}",
                self.alert_id,
                header.alert_system,
                header.alert_subsystem
            );
            return false;
        }

        match response.command {
            ResponseCommand::Acknowledge => {
                info!(
                    "Alert {} acknowledged by {:#018x}",
                    self.alert_id, response.acknowledge_network_id
                );
                self.acknowledge_status = YesNo::Yes;
            }
            ResponseCommand::TemporarySilence => {
                info!(
                    "Alert {} silenced for {}s",
                    self.alert_id,
                    self.silence_delay.as_secs()
                );
                self.temporary_silence_status = YesNo::Yes;
                self.silence_timer.arm(self.clock.now(), self.silence_delay);
            }
            ResponseCommand::TestCommandOff
            | ResponseCommand::TestCommandOn
            | ResponseCommand::Unknown(_) => {
                trace!("Alert {} ignoring command {}", self.alert_id, response.command);
            }
        }
        true
    }

    // ------------------------------------------------------------------
    // Encoding
    // ------------------------------------------------------------------

    /// Identification block for outgoing messages
    pub fn header(&self) -> AlertHeader {
        AlertHeader {
            alert_type: self.alert_type,
            alert_category: self.alert_category,
            alert_system: self.alert_system,
            alert_subsystem: self.alert_subsystem,
            alert_id: self.alert_id,
            source_network_id: self.data_source_network_id,
            data_source_instance: self.data_source_instance,
            data_source_index: self.data_source_index,
            occurrence: self.occurrence,
        }
    }

    /// Current status as an Alert Notification
    pub fn notification(&self) -> AlertNotification {
        AlertNotification {
            header: self.header(),
            temporary_silence_status: self.temporary_silence_status,
            acknowledge_status: self.acknowledge_status,
            escalation_status: self.escalation_status,
            temporary_silence_support: self.temporary_silence_support,
            acknowledge_support: self.acknowledge_support,
            escalation_support: self.escalation_support,
            acknowledge_network_id: self.acknowledge_network_id,
            trigger_condition: self.trigger_condition,
            threshold_status: self.threshold_status,
            priority: self.priority,
            state: self.state,
        }
    }

    /// Texts as an Alert Text
    pub fn text(&self) -> AlertText {
        AlertText {
            header: self.header(),
            language: self.language,
            description: self.description,
            location: self.location,
        }
    }

    /// Encoded PGN 126983
    pub fn encode_notification(&self) -> N2kMessage {
        self.notification().encode()
    }

    /// Encoded PGN 126985
    pub fn encode_text(&self) -> N2kMessage {
        self.text().encode()
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// `true` while the threshold status is anything but `Normal`
    pub fn is_alert(&self) -> bool {
        self.threshold_status != ThresholdStatus::Normal
    }

    /// `true` once acknowledged
    pub fn is_acknowledged(&self) -> bool {
        self.acknowledge_status.is_yes()
    }

    /// `true` while temporarily silenced
    pub fn is_silent(&self) -> bool {
        self.temporary_silence_status.is_yes()
    }

    /// Time left on the silence timer, `None` when not armed
    pub fn silence_remaining(&self) -> Option<Duration> {
        self.silence_timer.remaining(self.clock.now())
    }

    /// Alert id
    pub fn alert_id(&self) -> u16 {
        self.alert_id
    }

    /// Alert type
    pub fn alert_type(&self) -> AlertType {
        self.alert_type
    }

    /// Alert category
    pub fn alert_category(&self) -> AlertCategory {
        self.alert_category
    }

    /// Alert priority
    pub fn priority(&self) -> u8 {
        self.priority
    }

    /// How the alert is triggered
    pub fn trigger_condition(&self) -> TriggerCondition {
        self.trigger_condition
    }

    /// Lifecycle state
    pub fn state(&self) -> AlertState {
        self.state
    }

    /// Threshold status after the last evaluation
    pub fn threshold_status(&self) -> ThresholdStatus {
        self.threshold_status
    }

    /// Consecutive exceeding samples counted so far
    pub fn occurrence(&self) -> u8 {
        self.occurrence
    }

    /// Exceeding samples needed to raise the alert
    pub fn occurrence_threshold(&self) -> u8 {
        self.occurrence_threshold
    }

    /// Threshold configuration
    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    /// Language of the texts
    pub fn language(&self) -> Language {
        self.language
    }

    /// Alert description
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Alert location
    pub fn location(&self) -> &str {
        self.location.as_str()
    }

    /// Reporting system
    pub fn alert_system(&self) -> u8 {
        self.alert_system
    }

    /// Reporting subsystem
    pub fn alert_subsystem(&self) -> u8 {
        self.alert_subsystem
    }

    /// Network id allowed to acknowledge
    pub fn acknowledge_network_id(&self) -> u64 {
        self.acknowledge_network_id
    }

    /// Network id of the data source
    pub fn data_source_network_id(&self) -> u64 {
        self.data_source_network_id
    }

    /// Instance of the data source
    pub fn data_source_instance(&self) -> u8 {
        self.data_source_instance
    }

    /// Sensor index on the data source
    pub fn data_source_index(&self) -> u8 {
        self.data_source_index
    }

    /// Temporary silence supported
    pub fn temporary_silence_support(&self) -> YesNo {
        self.temporary_silence_support
    }

    /// Acknowledge supported
    pub fn acknowledge_support(&self) -> YesNo {
        self.acknowledge_support
    }

    /// Escalation supported
    pub fn escalation_support(&self) -> YesNo {
        self.escalation_support
    }

    /// Temporary silence active
    pub fn temporary_silence_status(&self) -> YesNo {
        self.temporary_silence_status
    }

    /// Acknowledged by a peer
    pub fn acknowledge_status(&self) -> YesNo {
        self.acknowledge_status
    }

    /// Escalated
    pub fn escalation_status(&self) -> YesNo {
        self.escalation_status
    }

    /// Configured temporary silence duration
    pub fn temporary_silence_delay(&self) -> Duration {
        self.silence_delay
    }
}

fn silence_delay(seconds: u16) -> Duration {
    Duration::from_millis(u64::from(seconds) * 1000)
}
