//! Blocking notifications shown over the console.

/// Whether an alert reports success or failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    /// The service confirmed an action.
    Success,
    /// An action failed or input was rejected.
    Error,
}

/// A one-shot notification dismissed by any key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    /// Success or error.
    pub kind: AlertKind,
    /// Text shown to the operator.
    pub message: String,
}

impl Alert {
    /// Creates a success alert.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Success,
            message: message.into(),
        }
    }

    /// Creates an error alert.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Error,
            message: message.into(),
        }
    }

    /// Title line for the alert box.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self.kind {
            AlertKind::Success => "Success",
            AlertKind::Error => "Error",
        }
    }
}
