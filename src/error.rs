//! Error types
//!
//! Nothing in a script is fatal. Trigger failures are reported as
//! [`TriggerError`] values that the interpreter logs before moving on; only
//! loading a case can fail outright.

use thiserror::Error;

/// How loudly a diagnostic is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The script is broken at this point
    Critical,
    /// Something the author probably did not intend
    Warning,
    /// Harmless, noted for completeness
    Info,
}

/// Why a trigger did not take effect
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TriggerError {
    #[error("unknown trigger '{op}'")]
    UnknownTrigger { op: String },

    #[error("malformed '{op}' command '{command}': {reason}")]
    Malformed {
        op: String,
        command: String,
        reason: String,
    },

    #[error("'{op}' references unknown {kind} '{id}'")]
    Unresolved {
        op: String,
        kind: &'static str,
        id: String,
    },

    #[error("'{op}' had nothing to do: {reason}")]
    Redundant { op: String, reason: String },
}

impl TriggerError {
    pub fn unknown(op: impl Into<String>) -> Self {
        Self::UnknownTrigger { op: op.into() }
    }

    pub fn malformed(
        op: impl Into<String>,
        command: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Malformed {
            op: op.into(),
            command: command.into(),
            reason: reason.into(),
        }
    }

    pub fn unresolved(op: impl Into<String>, kind: &'static str, id: impl Into<String>) -> Self {
        Self::Unresolved {
            op: op.into(),
            kind,
            id: id.into(),
        }
    }

    pub fn redundant(op: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Redundant {
            op: op.into(),
            reason: reason.into(),
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::UnknownTrigger { .. } | Self::Malformed { .. } => Severity::Critical,
            Self::Unresolved { .. } => Severity::Warning,
            Self::Redundant { .. } => Severity::Info,
        }
    }

    /// Send this error to the log at its severity
    pub fn report(&self) {
        match self.severity() {
            Severity::Critical => log::error!("{self}"),
            Severity::Warning => log::warn!("{self}"),
            Severity::Info => log::info!("{self}"),
        }
    }
}

/// Failures while loading a case file
#[derive(Debug, Error)]
pub enum CaseError {
    #[error("case not found: {name}")]
    NotFound { name: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("case file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid case: {reason}")]
    Invalid { reason: String },
}

impl CaseError {
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::Invalid {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_follows_error_kind() {
        assert_eq!(TriggerError::unknown("dance").severity(), Severity::Critical);
        assert_eq!(
            TriggerError::malformed("goto", "", "missing block").severity(),
            Severity::Critical
        );
        assert_eq!(
            TriggerError::unresolved("add_profile", "character", "x").severity(),
            Severity::Warning
        );
        assert_eq!(
            TriggerError::redundant("add_evidence", "already visible").severity(),
            Severity::Info
        );
    }

    #[test]
    fn messages_name_the_trigger() {
        let err = TriggerError::unresolved("set_location", "location", "lobby");
        assert_eq!(
            err.to_string(),
            "'set_location' references unknown location 'lobby'"
        );
    }
}
