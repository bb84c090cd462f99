// src/codec/notification.rs - PGN 126983 Alert
use super::{expect_pgn, AlertHeader, DEFAULT_PRIORITY, PGN_ALERT_NOTIFICATION};
use crate::error::Result;
use crate::message::N2kMessage;
use crate::types::{AlertState, ThresholdStatus, TriggerCondition, YesNo};
use serde::{Deserialize, Serialize};

/// Reserved bits 6-7 of the status byte, always set on the wire
const STATUS_RESERVED: u8 = 0b1100_0000;

/// Alert Notification, broadcast by the device that owns an alert.
///
/// Layout after the [`AlertHeader`]:
///
/// | Byte  | Field                                                   |
/// |-------|---------------------------------------------------------|
/// | 16    | bit 0 temporary silence status                          |
/// |       | bit 1 acknowledge status                                |
/// |       | bit 2 escalation status                                 |
/// |       | bit 3 temporary silence support                         |
/// |       | bit 4 acknowledge support                               |
/// |       | bit 5 escalation support                                |
/// |       | bits 6-7 reserved (1)                                   |
/// | 17-24 | acknowledge source network id                           |
/// | 25    | bits 0-3 trigger condition, bits 4-7 threshold status   |
/// | 26    | alert priority                                          |
/// | 27    | alert state                                             |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertNotification {
    /// Identification block
    pub header: AlertHeader,
    /// Temporary silence currently active
    pub temporary_silence_status: YesNo,
    /// Alert acknowledged
    pub acknowledge_status: YesNo,
    /// Alert escalated
    pub escalation_status: YesNo,
    /// Temporary silence supported
    pub temporary_silence_support: YesNo,
    /// Acknowledge supported
    pub acknowledge_support: YesNo,
    /// Escalation supported
    pub escalation_support: YesNo,
    /// Network id allowed to acknowledge
    pub acknowledge_network_id: u64,
    /// How the alert is triggered
    pub trigger_condition: TriggerCondition,
    /// Threshold status
    pub threshold_status: ThresholdStatus,
    /// Alert priority
    pub priority: u8,
    /// Lifecycle state
    pub state: AlertState,
}

impl AlertNotification {
    /// Build the PGN 126983 message
    pub fn encode(&self) -> N2kMessage {
        let mut msg = N2kMessage::new(PGN_ALERT_NOTIFICATION, DEFAULT_PRIORITY);
        self.header.encode(&mut msg);
        msg.add_byte(self.status_byte());
        msg.add_u64(self.acknowledge_network_id);
        msg.add_byte(
            ((self.threshold_status.raw() & 0x0F) << 4) | (self.trigger_condition.raw() & 0x0F),
        );
        msg.add_byte(self.priority);
        msg.add_byte(self.state.raw());
        msg
    }

    /// Parse a PGN 126983 message
    pub fn decode(msg: &N2kMessage) -> Result<Self> {
        expect_pgn(msg, PGN_ALERT_NOTIFICATION)?;
        let mut reader = msg.reader();
        let header = AlertHeader::decode(&mut reader);

        let status = reader.get_byte();
        let acknowledge_network_id = reader.get_u64();
        let trigger = reader.get_byte();

        Ok(Self {
            header,
            temporary_silence_status: YesNo::from_raw(status & 0x01),
            acknowledge_status: YesNo::from_raw((status >> 1) & 0x01),
            escalation_status: YesNo::from_raw((status >> 2) & 0x01),
            temporary_silence_support: YesNo::from_raw((status >> 3) & 0x01),
            acknowledge_support: YesNo::from_raw((status >> 4) & 0x01),
            escalation_support: YesNo::from_raw((status >> 5) & 0x01),
            acknowledge_network_id,
            trigger_condition: TriggerCondition::from_raw(trigger & 0x0F),
            threshold_status: ThresholdStatus::from_raw((trigger >> 4) & 0x0F),
            priority: reader.get_byte(),
            state: AlertState::from_raw(reader.get_byte()),
        })
    }

    fn status_byte(&self) -> u8 {
        STATUS_RESERVED
            | (self.escalation_support.bit() << 5)
            | (self.acknowledge_support.bit() << 4)
            | (self.temporary_silence_support.bit() << 3)
            | (self.escalation_status.bit() << 2)
            | (self.acknowledge_status.bit() << 1)
            | self.temporary_silence_status.bit()
    }
}
