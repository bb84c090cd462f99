// src/codec/mod.rs - Wire codec for the NMEA 2000 alert PGNs
//
// All three PGNs open with the same identification block (see `AlertHeader`).
// What follows is laid out explicitly per message in its own module so each
// layout can be checked byte for byte against the PGN field list.

use crate::error::{AlertError, Result};
use crate::message::{MessageReader, N2kMessage};
use crate::types::{AlertCategory, AlertType};
use serde::{Deserialize, Serialize};

mod notification;
mod response;
mod text;

pub use notification::AlertNotification;
pub use response::AlertResponse;
pub use text::AlertText;

/// PGN 126983, Alert
pub const PGN_ALERT_NOTIFICATION: u32 = 126983;

/// PGN 126984, Alert Response
pub const PGN_ALERT_RESPONSE: u32 = 126984;

/// PGN 126985, Alert Text
pub const PGN_ALERT_TEXT: u32 = 126985;

/// Default bus priority of the alert PGNs
pub const DEFAULT_PRIORITY: u8 = 2;

/// Identification block shared by all alert PGNs
///
/// | Byte  | Field                                          |
/// |-------|------------------------------------------------|
/// | 0     | bits 0-3 alert type, bits 4-7 alert category   |
/// | 1     | alert system                                   |
/// | 2     | alert subsystem                                |
/// | 3-4   | alert id                                       |
/// | 5-12  | data source network id (NAME)                  |
/// | 13    | data source instance                           |
/// | 14    | data source index                              |
/// | 15    | alert occurrence number                        |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertHeader {
    /// Alert type
    pub alert_type: AlertType,
    /// Alert category
    pub alert_category: AlertCategory,
    /// Reporting system
    pub alert_system: u8,
    /// Reporting subsystem
    pub alert_subsystem: u8,
    /// Alert id
    pub alert_id: u16,
    /// Network id of the device providing the monitored data
    pub source_network_id: u64,
    /// Instance of the data source
    pub data_source_instance: u8,
    /// Index of the sensor on the data source
    pub data_source_index: u8,
    /// Occurrence counter
    pub occurrence: u8,
}

impl AlertHeader {
    pub(crate) fn encode(&self, msg: &mut N2kMessage) {
        msg.add_byte(pack_type_category(self.alert_type, self.alert_category));
        msg.add_byte(self.alert_system);
        msg.add_byte(self.alert_subsystem);
        msg.add_u16(self.alert_id);
        msg.add_u64(self.source_network_id);
        msg.add_byte(self.data_source_instance);
        msg.add_byte(self.data_source_index);
        msg.add_byte(self.occurrence);
    }

    pub(crate) fn decode(reader: &mut MessageReader<'_>) -> Self {
        let (alert_type, alert_category) = unpack_type_category(reader.get_byte());
        Self {
            alert_type,
            alert_category,
            alert_system: reader.get_byte(),
            alert_subsystem: reader.get_byte(),
            alert_id: reader.get_u16(),
            source_network_id: reader.get_u64(),
            data_source_instance: reader.get_byte(),
            data_source_index: reader.get_byte(),
            occurrence: reader.get_byte(),
        }
    }
}

/// Type in the low nibble, category in the high nibble
fn pack_type_category(alert_type: AlertType, category: AlertCategory) -> u8 {
    ((category.raw() & 0x0F) << 4) | (alert_type.raw() & 0x0F)
}

fn unpack_type_category(byte: u8) -> (AlertType, AlertCategory) {
    (
        AlertType::from_raw(byte & 0x0F),
        AlertCategory::from_raw((byte >> 4) & 0x0F),
    )
}

fn expect_pgn(msg: &N2kMessage, expected: u32) -> Result<()> {
    if msg.pgn() != expected {
        return Err(AlertError::PgnMismatch {
            expected,
            actual: msg.pgn(),
        });
    }
    Ok(())
}

/// Any of the three alert messages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AlertMessage {
    /// PGN 126983
    Notification(AlertNotification),
    /// PGN 126984
    Response(AlertResponse),
    /// PGN 126985
    Text(AlertText),
}

impl AlertMessage {
    /// Decode `msg` with whichever decoder owns its PGN.
    ///
    /// Fails with [`AlertError::PgnMismatch`] (against the notification PGN)
    /// when the message is not an alert PGN at all.
    pub fn decode(msg: &N2kMessage) -> Result<Self> {
        match msg.pgn() {
            PGN_ALERT_RESPONSE => AlertResponse::decode(msg).map(Self::Response),
            PGN_ALERT_TEXT => AlertText::decode(msg).map(Self::Text),
            _ => AlertNotification::decode(msg).map(Self::Notification),
        }
    }

    /// Encode whichever message this is
    pub fn encode(&self) -> N2kMessage {
        match self {
            Self::Notification(notification) => notification.encode(),
            Self::Response(response) => response.encode(),
            Self::Text(text) => text.encode(),
        }
    }

    /// Shared identification block
    pub fn header(&self) -> &AlertHeader {
        match self {
            Self::Notification(notification) => &notification.header,
            Self::Response(response) => &response.header,
            Self::Text(text) => &text.header,
        }
    }
}
