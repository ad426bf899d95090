//! Color-scheme preference port

/// Source of the system light/dark preference
pub trait ColorSchemePreference: Send + Sync {
    fn prefers_light(&self) -> bool;
}

/// A fixed answer
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPreference(pub bool);

impl ColorSchemePreference for FixedPreference {
    fn prefers_light(&self) -> bool {
        self.0
    }
}

/// Terminal background read from `COLORFGBG` (`"fg;bg"`, ANSI color indices)
#[derive(Debug, Clone, Default)]
pub struct TerminalPreference {
    colorfgbg: Option<String>,
}

impl TerminalPreference {
    pub fn from_env() -> Self {
        Self {
            colorfgbg: std::env::var("COLORFGBG").ok(),
        }
    }

    pub fn from_value(colorfgbg: impl Into<String>) -> Self {
        Self {
            colorfgbg: Some(colorfgbg.into()),
        }
    }
}

impl ColorSchemePreference for TerminalPreference {
    fn prefers_light(&self) -> bool {
        let background = self
            .colorfgbg
            .as_deref()
            .and_then(|v| v.rsplit(';').next())
            .and_then(|bg| bg.trim().parse::<u8>().ok());
        // 7 is light gray, 9..=15 are the bright colors; 8 is dark gray
        matches!(background, Some(7) | Some(9..=15))
    }
}
