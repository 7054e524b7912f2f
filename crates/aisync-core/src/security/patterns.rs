//! Secret detection patterns

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Kind of credential a pattern detects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecretKind {
    /// `api_key = ...`
    ApiKey,
    /// `secret_key = ...`
    SecretKey,
    /// `password = ...`
    Password,
    /// `token = ...`
    Token,
    /// `Bearer ...`
    BearerToken,
    /// PEM private key header
    PrivateKey,
    /// PEM certificate header
    Certificate,
    /// `sk-` followed by 48 characters
    OpenaiKey,
    /// `ghp_` personal access token
    GithubToken,
    /// `gho_` OAuth token
    GithubOauth,
    /// `xox[baprs]-` token
    SlackToken,
}

impl SecretKind {
    /// Stable identifier
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ApiKey => "api_key",
            Self::SecretKey => "secret_key",
            Self::Password => "password",
            Self::Token => "token",
            Self::BearerToken => "bearer_token",
            Self::PrivateKey => "private_key",
            Self::Certificate => "certificate",
            Self::OpenaiKey => "openai_key",
            Self::GithubToken => "github_token",
            Self::GithubOauth => "github_oauth",
            Self::SlackToken => "slack_token",
        }
    }
}

impl fmt::Display for SecretKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detection patterns in evaluation order
pub(super) const SECRET_PATTERNS: &[(SecretKind, &str)] = &[
    (
        SecretKind::ApiKey,
        r#"(?i)api[_-]?key\s*[=:]\s*["']?[a-zA-Z0-9_-]{20,}"#,
    ),
    (
        SecretKind::SecretKey,
        r#"(?i)secret[_-]?key\s*[=:]\s*["']?[a-zA-Z0-9_-]{20,}"#,
    ),
    (
        SecretKind::Password,
        r#"(?i)password\s*[=:]\s*["']?[^\s"']{8,}"#,
    ),
    (
        SecretKind::Token,
        r#"(?i)token\s*[=:]\s*["']?[a-zA-Z0-9_-]{20,}"#,
    ),
    (SecretKind::BearerToken, r"(?i)bearer\s+[a-zA-Z0-9_-]{20,}"),
    (
        SecretKind::PrivateKey,
        r"-----BEGIN\s+(RSA\s+)?PRIVATE\s+KEY-----",
    ),
    (SecretKind::Certificate, r"-----BEGIN\s+CERTIFICATE-----"),
    (SecretKind::OpenaiKey, r"sk-[a-zA-Z0-9]{48}"),
    (SecretKind::GithubToken, r"ghp_[a-zA-Z0-9]{36}"),
    (SecretKind::GithubOauth, r"gho_[a-zA-Z0-9]{36}"),
    (SecretKind::SlackToken, r"xox[baprs]-[a-zA-Z0-9-]{10,}"),
];

/// A raw match that also matches one of these is discarded
pub(super) const SAFE_PATTERNS: &[&str] = &[
    r"(?m)^#.*$",
    r#""description":"#,
    r#""name":"#,
    r#""version":"#,
];

/// Compiled detection pattern
#[derive(Debug, Clone)]
pub struct SecretPattern {
    /// What the pattern detects
    pub kind: SecretKind,
    /// Compiled expression
    pub regex: Regex,
}

impl SecretPattern {
    /// Compile a pattern
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`] if the expression does not compile.
    pub fn new(kind: SecretKind, pattern: &str) -> Result<Self> {
        Ok(Self {
            kind,
            regex: compile(pattern)?,
        })
    }
}

pub(super) fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| Error::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}
