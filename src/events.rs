use crate::layout::{LayoutError, ViewerDimensions};
use crate::update::UpdateEvent;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

crate::string_newtype! {
    #[derive(Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct ShabadId;
}

crate::string_newtype! {
    #[derive(Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct LineId;
}

/// Notifications accepted from the host process.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundMessage {
    PresenterView(ViewerDimensions),
    RemoveScaleViewer,
    Update(UpdateEvent),
    /// A line picked elsewhere, e.g. by a remote navigator.
    ShowLine(LinePayload),
    ShowText(TextPayload),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinePayload {
    #[serde(rename = "shabadID")]
    pub shabad_id: ShabadId,
    #[serde(rename = "lineID")]
    pub line_id: LineId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPayload {
    pub text: String,
}

/// Notifications sent to the host process. None of them expect a reply.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "payload", rename_all = "kebab-case")]
pub enum OutboundMessage {
    ShowLine {
        #[serde(rename = "shabadID")]
        shabad_id: ShabadId,
        #[serde(rename = "lineID")]
        line_id: LineId,
    },
    ShowText {
        text: String,
    },
    CheckForUpdates {
        manual: bool,
    },
    InstallAndRestart,
    OpenChangelog,
    TogglePreferences,
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    Message(InboundMessage),
    ConfigReload,
}

#[derive(Error, Debug)]
pub enum MessageError {
    #[error("Malformed message: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unknown event '{0}'")]
    UnknownEvent(String),
    #[error("Invalid payload for '{event}': {source}")]
    InvalidPayload {
        event: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

#[derive(Deserialize)]
struct Envelope {
    event: String,
    #[serde(default)]
    payload: serde_json::Value,
}

impl InboundMessage {
    /// Decodes one `{"event": ..., "payload": ...}` frame.
    pub fn decode(line: &str) -> Result<Self, MessageError> {
        let Envelope { event, payload: value } = serde_json::from_str(line)?;
        match event.as_str() {
            "presenter-view" => payload(value, "presenter-view").map(Self::PresenterView),
            "remove-scale-viewer" => Ok(Self::RemoveScaleViewer),
            "show-line" => payload(value, "show-line").map(Self::ShowLine),
            "show-text" => payload(value, "show-text").map(Self::ShowText),
            other => UpdateEvent::from_str(other)
                .map(Self::Update)
                .map_err(|_| MessageError::UnknownEvent(other.to_string())),
        }
    }
}

fn payload<T: DeserializeOwned>(
    value: serde_json::Value,
    event: &'static str,
) -> Result<T, MessageError> {
    serde_json::from_value(value)
        .map_err(|source| MessageError::InvalidPayload { event, source })
}

impl OutboundMessage {
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_inbound_messages() {
        let cases = vec![
            (
                r#"{"event":"presenter-view","payload":{"width":1920,"height":1080}}"#,
                InboundMessage::PresenterView(ViewerDimensions::new(1920.0, 1080.0).unwrap()),
            ),
            (
                r#"{"event":"remove-scale-viewer","payload":{}}"#,
                InboundMessage::RemoveScaleViewer,
            ),
            (
                r#"{"event":"remove-scale-viewer"}"#,
                InboundMessage::RemoveScaleViewer,
            ),
            (
                r#"{"event":"checking-for-update"}"#,
                InboundMessage::Update(UpdateEvent::CheckingForUpdate),
            ),
            (
                r#"{"event":"update-available","payload":null}"#,
                InboundMessage::Update(UpdateEvent::UpdateAvailable),
            ),
            (
                r#"{"event":"update-not-available"}"#,
                InboundMessage::Update(UpdateEvent::UpdateNotAvailable),
            ),
            (
                r#"{"event":"update-downloaded"}"#,
                InboundMessage::Update(UpdateEvent::UpdateDownloaded),
            ),
            (
                r#"{"event":"show-line","payload":{"shabadID":"1234","lineID":"56"}}"#,
                InboundMessage::ShowLine(LinePayload {
                    shabad_id: ShabadId::new("1234"),
                    line_id: LineId::new("56"),
                }),
            ),
            (
                r#"{"event":"show-text","payload":{"text":"Waheguru"}}"#,
                InboundMessage::ShowText(TextPayload {
                    text: "Waheguru".to_string(),
                }),
            ),
        ];

        for (line, expected) in cases {
            assert_eq!(InboundMessage::decode(line).unwrap(), expected, "{line}");
        }
    }

    #[test]
    fn test_decode_rejects_bad_frames() {
        assert!(matches!(
            InboundMessage::decode(r#"{"event":"open-sesame"}"#),
            Err(MessageError::UnknownEvent(name)) if name == "open-sesame"
        ));
        assert!(matches!(
            InboundMessage::decode(r#"{"event":"presenter-view","payload":{"width":0,"height":1080}}"#),
            Err(MessageError::InvalidPayload { event: "presenter-view", .. })
        ));
        assert!(matches!(
            InboundMessage::decode(r#"{"event":"presenter-view"}"#),
            Err(MessageError::InvalidPayload { .. })
        ));
        assert!(matches!(
            InboundMessage::decode(r#"{"event":"show-line","payload":{"shabadID":"1234"}}"#),
            Err(MessageError::InvalidPayload { event: "show-line", .. })
        ));
        assert!(matches!(
            InboundMessage::decode("show"),
            Err(MessageError::Json(_))
        ));
    }

    #[test]
    fn test_encode_outbound_messages() {
        let line = OutboundMessage::ShowLine {
            shabad_id: ShabadId::new("1234"),
            line_id: LineId::new("56"),
        };
        let value: serde_json::Value = serde_json::from_str(&line.encode().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({"event": "show-line", "payload": {"shabadID": "1234", "lineID": "56"}})
        );

        let text = OutboundMessage::ShowText {
            text: "Waheguru".to_string(),
        };
        let value: serde_json::Value = serde_json::from_str(&text.encode().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({"event": "show-text", "payload": {"text": "Waheguru"}})
        );

        let value: serde_json::Value =
            serde_json::from_str(&OutboundMessage::OpenChangelog.encode().unwrap()).unwrap();
        assert_eq!(value, json!({"event": "open-changelog"}));
    }
}
