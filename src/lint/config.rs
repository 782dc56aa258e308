//! Lint configuration

use serde::{Deserialize, Serialize};

/// Lint configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LintConfig {
    /// Syntax check settings
    pub syntax: SyntaxConfig,
    /// Reference check settings
    pub references: ReferencesConfig,
    /// Flow analysis settings
    pub flow: FlowConfig,
}

/// Syntax checking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntaxConfig {
    /// Enable syntax checks
    pub enabled: bool,
    /// Report tags that are neither colours nor text styles
    pub check_tags: bool,
}

impl Default for SyntaxConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            check_tags: true,
        }
    }
}

/// Reference checking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferencesConfig {
    /// Enable reference checks
    pub enabled: bool,
    /// Report triggers that would do nothing, like adding evidence twice
    pub report_redundant: bool,
}

impl Default for ReferencesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            report_redundant: false,
        }
    }
}

/// Flow analysis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    /// Enable flow analysis
    pub enabled: bool,
    /// Report blocks nothing can lead to
    pub check_unreachable: bool,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            check_unreachable: true,
        }
    }
}
