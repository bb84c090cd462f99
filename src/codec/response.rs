// src/codec/response.rs - PGN 126984 Alert Response
use super::{expect_pgn, AlertHeader, DEFAULT_PRIORITY, PGN_ALERT_RESPONSE};
use crate::error::Result;
use crate::message::N2kMessage;
use crate::types::ResponseCommand;
use serde::{Deserialize, Serialize};

/// Reserved bits 2-7 of the response byte, always set on the wire
const RESPONSE_RESERVED: u8 = 0xFC;

/// Alert Response, sent by a peer to acknowledge or silence an alert.
///
/// Layout after the [`AlertHeader`]:
///
/// | Byte  | Field                                         |
/// |-------|-----------------------------------------------|
/// | 16-23 | acknowledge source network id                 |
/// | 24    | bits 0-1 response command, bits 2-7 reserved  |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertResponse {
    /// Identification block of the alert being answered
    pub header: AlertHeader,
    /// Network id of the responding device
    pub acknowledge_network_id: u64,
    /// Requested action
    pub command: ResponseCommand,
}

impl AlertResponse {
    /// Build the PGN 126984 message
    pub fn encode(&self) -> N2kMessage {
        let mut msg = N2kMessage::new(PGN_ALERT_RESPONSE, DEFAULT_PRIORITY);
        self.header.encode(&mut msg);
        msg.add_u64(self.acknowledge_network_id);
        msg.add_byte(RESPONSE_RESERVED | (self.command.raw() & 0x03));
        msg
    }

    /// Parse a PGN 126984 message
    pub fn decode(msg: &N2kMessage) -> Result<Self> {
        expect_pgn(msg, PGN_ALERT_RESPONSE)?;
        let mut reader = msg.reader();
        Ok(Self {
            header: AlertHeader::decode(&mut reader),
            acknowledge_network_id: reader.get_u64(),
            command: ResponseCommand::from_raw(reader.get_byte() & 0x03),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::tests::sample_header;
    use crate::codec::PGN_ALERT_NOTIFICATION;
    use crate::error::AlertError;

    #[test]
    fn test_encode_layout() {
        let response = AlertResponse {
            header: sample_header(),
            acknowledge_network_id: 0x0807_0605_0403_0201,
            command: ResponseCommand::TemporarySilence,
        };
        let msg = response.encode();
        assert_eq!(msg.pgn(), PGN_ALERT_RESPONSE);
        assert_eq!(msg.len(), 25);
        assert_eq!(&msg.data()[16..24], &[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(msg.data()[24], 0xFD);
    }

    #[test]
    fn test_roundtrip_every_command() {
        for raw in 0..4 {
            let response = AlertResponse {
                header: sample_header(),
                acknowledge_network_id: 7,
                command: ResponseCommand::from_raw(raw),
            };
            assert_eq!(AlertResponse::decode(&response.encode()).unwrap(), response);
        }
    }

    #[test]
    fn test_reserved_bits_ignored_on_decode() {
        let response = AlertResponse {
            header: sample_header(),
            acknowledge_network_id: 7,
            command: ResponseCommand::TestCommandOn,
        };
        let mut payload = response.encode().data().to_vec();
        payload[24] = 0x03;
        let msg = N2kMessage::from_payload(PGN_ALERT_RESPONSE, 2, &payload);
        assert_eq!(AlertResponse::decode(&msg).unwrap(), response);
    }

    #[test]
    fn test_short_payload_reads_as_not_available() {
        let response = AlertResponse {
            header: sample_header(),
            acknowledge_network_id: 7,
            command: ResponseCommand::Acknowledge,
        };
        let msg = N2kMessage::from_payload(PGN_ALERT_RESPONSE, 2, &response.encode().data()[..24]);
        let decoded = AlertResponse::decode(&msg).unwrap();
        assert_eq!(decoded.header, sample_header());
        assert_eq!(decoded.acknowledge_network_id, 7);
        assert_eq!(decoded.command, ResponseCommand::TestCommandOn);
    }

    #[test]
    fn test_wrong_pgn_is_rejected() {
        let msg = N2kMessage::from_payload(PGN_ALERT_NOTIFICATION, 2, &[0; 25]);
        assert!(matches!(
            AlertResponse::decode(&msg),
            Err(AlertError::PgnMismatch { expected: PGN_ALERT_RESPONSE, .. })
        ));
    }
}
