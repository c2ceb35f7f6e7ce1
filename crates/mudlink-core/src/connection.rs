#![forbid(unsafe_code)]

//! Connection lifecycle and its visible status.
//!
//! There is exactly one socket per page and no reconnection: the lifecycle
//! is `Connecting → Open → Closed`, and `Closed` is terminal.

/// Socket lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Connecting,
    Open,
    Closed,
}

/// Rendered status label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connected,
    Disconnected,
}

impl ConnectionStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Connected => "connected",
            Self::Disconnected => "disconnected",
        }
    }

    /// Text content of the status element, e.g. `[connected]`.
    #[must_use]
    pub fn label(self) -> String {
        format!("[{}]", self.as_str())
    }

    /// CSS class of the status element.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        self.as_str()
    }
}

/// What a socket event changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Opened,
    Closed,
    /// Event arrived in a state where it has no effect.
    Ignored,
}

#[derive(Debug, Clone, Default)]
pub struct ConnectionTracker {
    state: ConnectionState,
}

impl ConnectionTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn state(&self) -> ConnectionState {
        self.state
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state == ConnectionState::Closed
    }

    pub fn on_open(&mut self) -> Transition {
        match self.state {
            ConnectionState::Connecting => {
                self.state = ConnectionState::Open;
                Transition::Opened
            }
            ConnectionState::Open | ConnectionState::Closed => Transition::Ignored,
        }
    }

    /// A socket may close without ever opening (refused connection); that
    /// still counts as a disconnect.
    pub fn on_close(&mut self) -> Transition {
        match self.state {
            ConnectionState::Connecting | ConnectionState::Open => {
                self.state = ConnectionState::Closed;
                Transition::Closed
            }
            ConnectionState::Closed => Transition::Ignored,
        }
    }
}
