//! Prompt descriptions handed to the presentation boundary.

/// How the presentation layer should treat a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// Single acknowledgement; no decision is reported back.
    Info,
    /// The operator must accept or decline before the attempt continues.
    Confirm,
}

/// What to render after a session transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanPrompt {
    pub kind: PromptKind,
    pub title: String,
    pub message: String,
    /// Label for the accept button of a [`PromptKind::Confirm`] prompt.
    pub confirm_label: Option<String>,
}

impl ScanPrompt {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        ScanPrompt {
            kind: PromptKind::Info,
            title: title.into(),
            message: message.into(),
            confirm_label: None,
        }
    }

    pub fn confirm(
        title: impl Into<String>,
        message: impl Into<String>,
        confirm_label: impl Into<String>,
    ) -> Self {
        ScanPrompt {
            kind: PromptKind::Confirm,
            title: title.into(),
            message: message.into(),
            confirm_label: Some(confirm_label.into()),
        }
    }
}

/// Operator decision reported back for a [`PromptKind::Confirm`] prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accepted,
    Declined,
    Dismissed,
}
