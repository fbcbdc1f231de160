use std::fmt;

use miette::Diagnostic;
use serde::Deserialize;
use url::Url;

use crate::{client::Team, logger::Logger, utils::IntoDiagnosticShorthand};

#[derive(Deserialize, Clone, PartialEq, Eq)]
pub struct Token {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

impl Token {
    pub fn header_value(&self) -> String {
        format!("{} {}", self.kind, self.value)
    }
}

// keep token values out of logs and reports
impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token").field("kind", &self.kind).finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
pub struct Target {
    pub name: String,
    pub api: Url,
    pub team: String,
    pub token: Option<Token>,
    pub insecure: bool,
}

#[derive(thiserror::Error, Debug, Diagnostic, PartialEq, Eq)]
pub enum InvalidTarget {
    #[error("target {target} has unsupported api url scheme {scheme}")]
    #[diagnostic(code(hangar::target::scheme), help("use an http:// or https:// url"))]
    Scheme { target: String, scheme: String },
    #[error("target {target} has an api url without a host")]
    #[diagnostic(code(hangar::target::host))]
    MissingHost { target: String },
    #[error("target {target} has no team")]
    #[diagnostic(code(hangar::target::team), help("set team in the target's config, e.g. team = \"main\""))]
    MissingTeam { target: String },
    #[error("target {target} has an empty token")]
    #[diagnostic(code(hangar::target::token), help("remove the token or give it a value"))]
    EmptyToken { target: String },
}

impl Target {
    pub fn validate(&self) -> Result<(), InvalidTarget> {
        let target = self.name.clone();
        match self.api.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(InvalidTarget::Scheme {
                    target,
                    scheme: scheme.to_string(),
                })
            }
        }
        if self.api.host_str().map_or(true, str::is_empty) {
            return Err(InvalidTarget::MissingHost { target });
        }
        if self.team.trim().is_empty() {
            return Err(InvalidTarget::MissingTeam { target });
        }
        if self.token.as_ref().is_some_and(|token| token.value.trim().is_empty()) {
            return Err(InvalidTarget::EmptyToken { target });
        }
        Ok(())
    }

    pub fn client(&self, logger: &Logger) -> miette::Result<reqwest::Client> {
        if self.insecure {
            logger.trace(format!("TLS verification disabled for target {}", self.name));
        }
        reqwest::Client::builder()
            .user_agent(concat!("hangar/", env!("CARGO_PKG_VERSION")))
            .danger_accept_invalid_certs(self.insecure)
            .build()
            .d()
    }

    pub fn team(&self, logger: &Logger) -> miette::Result<Team> {
        Ok(Team::new(
            self.client(logger)?,
            self.api.clone(),
            self.team.clone(),
            self.token.clone(),
            logger.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(api: &str) -> Target {
        Target {
            name: "ci".into(),
            api: Url::parse(api).unwrap(),
            team: "main".into(),
            token: Some(Token {
                kind: "Bearer".into(),
                value: "secret".into(),
            }),
            insecure: false,
        }
    }

    #[test]
    fn accepts_http_and_https() {
        assert_eq!(target("http://localhost:8080").validate(), Ok(()));
        assert_eq!(target("https://ci.example.com/").validate(), Ok(()));
    }

    #[test]
    fn rejects_other_schemes() {
        assert_eq!(
            target("ftp://ci.example.com").validate(),
            Err(InvalidTarget::Scheme {
                target: "ci".into(),
                scheme: "ftp".into()
            })
        );
    }

    #[test]
    fn rejects_blank_team_and_token() {
        let mut no_team = target("https://ci.example.com");
        no_team.team = " ".into();
        assert_eq!(
            no_team.validate(),
            Err(InvalidTarget::MissingTeam { target: "ci".into() })
        );

        let mut empty_token = target("https://ci.example.com");
        empty_token.token.as_mut().unwrap().value = String::new();
        assert_eq!(
            empty_token.validate(),
            Err(InvalidTarget::EmptyToken { target: "ci".into() })
        );

        let mut anonymous = target("https://ci.example.com");
        anonymous.token = None;
        assert_eq!(anonymous.validate(), Ok(()));
    }

    #[test]
    fn token_debug_hides_value() {
        let token = Token {
            kind: "Bearer".into(),
            value: "secret".into(),
        };
        assert_eq!(token.header_value(), "Bearer secret");
        assert!(!format!("{token:?}").contains("secret"));
    }
}
