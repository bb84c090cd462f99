//! N2K-ALERT - NMEA 2000 alert subsystem
//!
//! Threshold evaluation, the alert lifecycle (active, silenced,
//! acknowledged) and the wire codec for the three alert PGNs:
//!
//! - **126983** Alert (notification)
//! - **126984** Alert Response
//! - **126985** Alert Text
//!
//! Transport, addressing and scheduling belong to the surrounding bus stack;
//! this crate only produces and consumes [`N2kMessage`] payloads.
//!
//! # Examples
//!
//! ```rust
//! use n2k_alert::{
//!     Alert, AlertCategory, AlertResponse, AlertState, AlertType, ResponseCommand,
//!     ThresholdMethod, YesNo,
//! };
//!
//! let mut alert = Alert::new(AlertType::Alarm, AlertCategory::Technical, 12)
//!     .with_support(YesNo::Yes, YesNo::Yes, YesNo::No);
//! alert.set_threshold(ThresholdMethod::Lower, 0, 20);
//!
//! alert.test_threshold(5);
//! let payload = alert.encode_notification();
//! assert_eq!(payload.len(), 28);
//!
//! let ack = AlertResponse {
//!     header: alert.header(),
//!     acknowledge_network_id: 0x42,
//!     command: ResponseCommand::Acknowledge,
//! };
//! assert!(alert.apply_response(&ack.encode()));
//! alert.test_threshold(5);
//! assert_eq!(alert.state(), AlertState::Acknowledged);
//! ```

#![warn(missing_docs)]

// ============================================================================
// CORE MODULES
// ============================================================================

/// Error type and result alias
pub mod error;

/// Wire enumerations (alert type, state, language, ...)
pub mod types;

/// Fixed-capacity alert strings
pub mod text;

/// Monotonic clock and silence deadline
pub mod timer;

/// Sample comparison
pub mod threshold;

/// Alert state machine
pub mod alert;

// ============================================================================
// WIRE MODULES
// ============================================================================

/// PGN payload buffer and reader
pub mod message;

/// Alert PGN encoders and decoders
pub mod codec;

// ============================================================================
// SYSTEM MODULES
// ============================================================================

/// YAML alert definitions
pub mod config;

/// Alert registry and message routing
pub mod manager;

// ============================================================================
// PUBLIC API EXPORTS
// ============================================================================

pub use alert::Alert;
pub use codec::{
    AlertHeader, AlertMessage, AlertNotification, AlertResponse, AlertText,
    PGN_ALERT_NOTIFICATION, PGN_ALERT_RESPONSE, PGN_ALERT_TEXT,
};
pub use config::{AlertConfig, Config};
pub use error::{AlertError, Result};
pub use manager::AlertManager;
pub use message::N2kMessage;
pub use text::AlertString;
pub use threshold::Threshold;
pub use timer::{Clock, ManualClock, MonotonicClock};
pub use types::{
    AlertCategory, AlertState, AlertType, Language, ResponseCommand, ThresholdMethod,
    ThresholdStatus, TriggerCondition, YesNo,
};

// ============================================================================
// VERSION INFORMATION
// ============================================================================

/// Crate version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Install the `env_logger` backend.
///
/// `RUST_LOG` wins when set; otherwise the filter is `n2k_alert=info`.
/// Calling this more than once is harmless.
pub fn init() {
    let env = env_logger::Env::default().default_filter_or("n2k_alert=info");
    if env_logger::Builder::from_env(env).try_init().is_ok() {
        log::debug!("n2k-alert {} logging initialized", VERSION);
    }
}
