//! Source-connection identifiers.

use derive_more::Display;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::{Error, Result};

static ARN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^arn:aws:codestar-connections:(?<region>[a-z0-9-]+):(?<account>\d{12}):connection/[0-9a-fA-F-]{36}$",
    )
    .expect("connection ARN pattern")
});

/// A validated ARN referencing a source-control connection credential.
///
/// The connection itself lives in the external connection service; this type
/// only guarantees the reference is well-formed before it reaches synthesis.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{_0}")]
#[serde(transparent)]
pub struct ConnectionArn(String);

impl ConnectionArn {
    /// Parse and validate a connection ARN.
    pub fn parse(arn: impl Into<String>) -> Result<Self> {
        let arn = arn.into();
        if ARN_RE.is_match(&arn) {
            Ok(Self(arn))
        } else {
            Err(Error::InvalidConnectionArn(arn))
        }
    }

    /// The full ARN string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The region segment of the ARN.
    pub fn region(&self) -> &str {
        self.capture("region")
    }

    /// The twelve-digit account segment of the ARN.
    pub fn account(&self) -> &str {
        self.capture("account")
    }

    fn capture(&self, group: &str) -> &str {
        // Validated at construction, so the pattern always matches.
        ARN_RE
            .captures(&self.0)
            .and_then(|c| c.name(group))
            .map(|m| m.as_str())
            .unwrap_or_default()
    }
}

impl std::str::FromStr for ConnectionArn {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARN: &str = "arn:aws:codestar-connections:ap-northeast-1:948669373988:connection/868491e5-ad8b-4ec1-bdb3-43b676d9021b";

    #[test]
    fn test_parse_valid_arn() {
        let arn = ConnectionArn::parse(ARN).unwrap();
        assert_eq!(arn.as_str(), ARN);
        assert_eq!(arn.region(), "ap-northeast-1");
        assert_eq!(arn.account(), "948669373988");
    }

    #[test]
    fn test_reject_malformed_arn() {
        assert!(ConnectionArn::parse("arn:aws:iam::123:role/foo").is_err());
        assert!(ConnectionArn::parse("not-an-arn").is_err());
        assert!(
            ConnectionArn::parse(
                "arn:aws:codestar-connections:ap-northeast-1:12345:connection/868491e5-ad8b-4ec1-bdb3-43b676d9021b"
            )
            .is_err()
        );
    }
}
