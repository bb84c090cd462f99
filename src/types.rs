// src/types.rs - Wire enumerations for the NMEA 2000 alert PGNs
//
// Every enumeration is a closed set plus an `Unknown(u8)` case. Decoders never
// reject a field value: a raw byte outside the known set is carried through as
// `Unknown` and re-encoded unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $raw:literal => $label:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// Raw value outside the known set, kept for wire compatibility
            Unknown(u8),
        }

        impl $name {
            /// Map a raw wire value, keeping unrecognized values as `Unknown`
            pub const fn from_raw(raw: u8) -> Self {
                match raw {
                    $( $raw => Self::$variant, )+
                    other => Self::Unknown(other),
                }
            }

            /// Raw wire value
            pub const fn raw(self) -> u8 {
                match self {
                    $( Self::$variant => $raw, )+
                    Self::Unknown(raw) => raw,
                }
            }

            /// Human readable label, `None` for values outside the known set
            pub fn label(self) -> Option<&'static str> {
                match Self::from_raw(self.raw()) {
                    $( Self::$variant => Some($label), )+
                    Self::Unknown(_) => None,
                }
            }
        }

        impl From<u8> for $name {
            fn from(raw: u8) -> Self {
                Self::from_raw(raw)
            }
        }

        impl From<$name> for u8 {
            fn from(value: $name) -> u8 {
                value.raw()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self.label() {
                    Some(label) => f.write_str(label),
                    None => write!(f, "unknown ({})", self.raw()),
                }
            }
        }
    };
}

wire_enum! {
    /// Alert type, most severe first
    pub enum AlertType {
        /// Emergency alarm
        EmergencyAlarm = 1 => "emergency alarm",
        /// Alarm
        Alarm = 2 => "alarm",
        /// Warning
        Warning = 5 => "warning",
        /// Caution
        Caution = 8 => "caution",
    }
}

wire_enum! {
    /// Alert category
    pub enum AlertCategory {
        /// Navigational alert
        Navigational = 0 => "navigational",
        /// Technical alert
        Technical = 1 => "technical",
    }
}

wire_enum! {
    /// How the alert is triggered
    pub enum TriggerCondition {
        /// Raised manually
        Manual = 0 => "manual",
        /// Raised automatically by threshold evaluation
        Auto = 1 => "auto",
        /// Raised as a test
        Test = 2 => "test",
        /// Triggering disabled
        Disabled = 3 => "disabled",
    }
}

wire_enum! {
    /// Threshold status reported in the Alert Notification
    pub enum ThresholdStatus {
        /// Within bounds
        Normal = 0 => "normal",
        /// Threshold exceeded
        Exceeded = 1 => "exceeded",
        /// Extreme threshold exceeded
        ExtremeExceeded = 2 => "extreme exceeded",
        /// Low threshold exceeded
        LowExceeded = 3 => "low exceeded",
        /// Exceeded and acknowledged
        Acknowledged = 4 => "acknowledged",
        /// Exceeded, waiting for acknowledgement
        AwaitingAcknowledge = 5 => "awaiting acknowledge",
    }
}

wire_enum! {
    /// Alert lifecycle state
    pub enum AlertState {
        /// Alert disabled
        Disabled = 0 => "disabled",
        /// No alert condition
        Normal = 1 => "normal",
        /// Alert active
        Active = 2 => "active",
        /// Active but temporarily silenced
        Silenced = 3 => "silenced",
        /// Active and acknowledged
        Acknowledged = 4 => "acknowledged",
        /// Active, waiting for acknowledgement
        AwaitingAcknowledge = 5 => "awaiting acknowledge",
    }
}

wire_enum! {
    /// Language of the Alert Text strings
    pub enum Language {
        /// English (US)
        EnglishUs = 0 => "English US",
        /// English (UK)
        EnglishUk = 1 => "English UK",
        /// Arabic
        Arabic = 2 => "Arabic",
        /// Chinese (simplified)
        ChineseSimplified = 3 => "Chinese simplified",
        /// Croatian
        Croatian = 4 => "Croatian",
        /// Danish
        Danish = 5 => "Danish",
        /// Dutch
        Dutch = 6 => "Dutch",
        /// Finnish
        Finnish = 7 => "Finnish",
        /// French
        French = 8 => "French",
        /// German
        German = 9 => "German",
        /// Greek
        Greek = 10 => "Greek",
        /// Italian
        Italian = 11 => "Italian",
        /// Japanese
        Japanese = 12 => "Japanese",
        /// Korean
        Korean = 13 => "Korean",
        /// Norwegian
        Norwegian = 14 => "Norwegian",
        /// Polish
        Polish = 15 => "Polish",
        /// Portuguese
        Portuguese = 16 => "Portuguese",
        /// Russian
        Russian = 17 => "Russian",
        /// Spanish
        Spanish = 18 => "Spanish",
        /// Swedish
        Swedish = 19 => "Swedish",
    }
}

wire_enum! {
    /// Command carried by an Alert Response
    pub enum ResponseCommand {
        /// Acknowledge the alert
        Acknowledge = 0 => "acknowledge",
        /// Silence the alert for the configured time
        TemporarySilence = 1 => "temporary silence",
        /// End a test
        TestCommandOff = 2 => "test command off",
        /// Start a test
        TestCommandOn = 3 => "test command on",
    }
}

wire_enum! {
    /// Single-bit support/status flag
    pub enum YesNo {
        /// Not set
        No = 0 => "no",
        /// Set
        Yes = 1 => "yes",
    }
}

wire_enum! {
    /// Comparison used by threshold evaluation (not defined by NMEA 2000, never on the wire)
    pub enum ThresholdMethod {
        /// Exceeded when the sample equals the level
        Equal = 0 => "equal",
        /// Exceeded when the sample is below the level
        Lower = 1 => "lower than",
        /// Exceeded when the sample is above the level
        Greater = 2 => "greater than",
    }
}

impl YesNo {
    /// `true` when the packed bit is set, matching what goes on the wire
    pub fn is_yes(self) -> bool {
        self.bit() == 1
    }

    /// Value of the flag as a single packed bit
    pub(crate) fn bit(self) -> u8 {
        self.raw() & 0x01
    }
}

impl From<bool> for YesNo {
    fn from(value: bool) -> Self {
        if value {
            YesNo::Yes
        } else {
            YesNo::No
        }
    }
}

impl Default for YesNo {
    fn default() -> Self {
        YesNo::No
    }
}

impl Default for TriggerCondition {
    fn default() -> Self {
        TriggerCondition::Auto
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::EnglishUs
    }
}

impl Default for ThresholdMethod {
    fn default() -> Self {
        ThresholdMethod::Equal
    }
}
