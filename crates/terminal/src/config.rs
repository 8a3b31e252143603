//! Configuration options for a terminal

/// Name reported by a terminal when none is configured
pub const DEFAULT_NAME: &str = "DummyTerminal";

/// Intent action broadcast on secure element state changes
pub const DEFAULT_SE_STATE_CHANGED_ACTION: &str = "org.simalliance.openmobileapi.DummyTerminalEvent";

/// Configuration options for a [`Terminal`](crate::Terminal)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalConfig {
    /// Name the terminal reports
    pub name: String,

    /// Event action string for secure element state changes
    pub se_state_changed_action: String,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            se_state_changed_action: DEFAULT_SE_STATE_CHANGED_ACTION.to_string(),
        }
    }
}

impl TerminalConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the terminal name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the state change event action
    pub fn with_se_state_changed_action(mut self, action: impl Into<String>) -> Self {
        self.se_state_changed_action = action.into();
        self
    }
}
