use serde::{Deserialize, Serialize};

use crate::services::Clipboard;

/// Component name reported with every copy click.
pub const COPY_EVENT_COMPONENT: &str = "Copy Button (azd init)";

/// The transient "Copied" acknowledgement next to a copy button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CalloutState {
    #[default]
    Hidden,
    Shown,
}

#[derive(Serialize)]
struct CopyEvent<'a> {
    id: &'a str,
    #[serde(rename = "cN")]
    component: &'a str,
}

/// Analytics payload attached to a copy button, e.g.
/// `{"id":"azd up","cN":"Copy Button (azd init)"}`.
pub fn copy_event_payload(text: &str) -> String {
    serde_json::to_string(&CopyEvent {
        id: text,
        component: COPY_EVENT_COMPONENT,
    })
    .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyButton {
    pub text: String,
    pub event_name: String,
    pub callout: CalloutState,
}

impl CopyButton {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        CopyButton {
            event_name: copy_event_payload(&text),
            text,
            callout: CalloutState::Hidden,
        }
    }

    /// Copy the text and flip the acknowledgement callout.
    pub fn click(&mut self, clipboard: &mut dyn Clipboard) {
        clipboard.copy_to_clipboard(&self.text);
        self.callout = match self.callout {
            CalloutState::Hidden => CalloutState::Shown,
            CalloutState::Shown => CalloutState::Hidden,
        };
    }

    pub fn dismiss(&mut self) {
        self.callout = CalloutState::Hidden;
    }
}
