// src/codec/text.rs - PGN 126985 Alert Text
use super::{expect_pgn, AlertHeader, DEFAULT_PRIORITY, PGN_ALERT_TEXT};
use crate::error::Result;
use crate::message::N2kMessage;
use crate::text::AlertString;
use crate::types::Language;
use serde::{Deserialize, Serialize};

/// Alert Text, the human readable description of an alert.
///
/// Layout after the [`AlertHeader`]:
///
/// | Byte | Field                                    |
/// |------|------------------------------------------|
/// | 16   | language                                 |
/// | 17.. | description (variable-length string)     |
/// | ..   | location (variable-length string)        |
///
/// Both strings are limited to the capacity of [`AlertString`] on decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertText {
    /// Identification block
    pub header: AlertHeader,
    /// Language of both strings
    pub language: Language,
    /// What the alert is about
    pub description: AlertString,
    /// Where the alert originates
    pub location: AlertString,
}

impl AlertText {
    /// Build the PGN 126985 message
    pub fn encode(&self) -> N2kMessage {
        let mut msg = N2kMessage::new(PGN_ALERT_TEXT, DEFAULT_PRIORITY);
        self.header.encode(&mut msg);
        msg.add_byte(self.language.raw());
        msg.add_var_str(self.description.as_str());
        msg.add_var_str(self.location.as_str());
        msg
    }

    /// Parse a PGN 126985 message
    pub fn decode(msg: &N2kMessage) -> Result<Self> {
        expect_pgn(msg, PGN_ALERT_TEXT)?;
        let mut reader = msg.reader();
        Ok(Self {
            header: AlertHeader::decode(&mut reader),
            language: Language::from_raw(reader.get_byte()),
            description: AlertString::from_wire(reader.get_var_str()),
            location: AlertString::from_wire(reader.get_var_str()),
        })
    }
}
