use miette::Diagnostic;
use reqwest::{header::AUTHORIZATION, StatusCode};
use url::Url;

use crate::{logger::Logger, model::Container, target::Token};

#[derive(thiserror::Error, Debug, Diagnostic)]
pub enum ClientError {
    #[error("request to {url} failed")]
    #[diagnostic(code(hangar::client::request))]
    Request {
        url: Url,
        #[source]
        source: reqwest::Error,
    },
    #[error("not authorized")]
    #[diagnostic(code(hangar::client::unauthorized), help("refresh the token configured for this target"))]
    Unauthorized,
    #[error("forbidden")]
    #[diagnostic(code(hangar::client::forbidden))]
    Forbidden,
    #[error("team {team} not found")]
    #[diagnostic(code(hangar::client::not_found))]
    NotFound { team: String },
    #[error("Unexpected Response\nStatus: {status}\nBody:\n{body}")]
    #[diagnostic(code(hangar::client::unexpected_response))]
    UnexpectedResponse { status: StatusCode, body: String },
    #[error("could not decode response from {url}")]
    #[diagnostic(code(hangar::client::decode))]
    Decode {
        url: Url,
        #[source]
        source: serde_json::Error,
    },
    #[error("api url {url} cannot carry a path")]
    #[diagnostic(code(hangar::client::url), help("use an http:// or https:// url"))]
    CannotBeABase { url: Url },
}

/// Team-scoped view of the server API.
pub struct Team {
    http: reqwest::Client,
    api: Url,
    name: String,
    token: Option<Token>,
    logger: Logger,
}

impl Team {
    pub fn new(http: reqwest::Client, api: Url, name: String, token: Option<Token>, logger: Logger) -> Team {
        Team {
            http,
            api,
            name,
            token,
            logger,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn endpoint(&self, resource: &str) -> Result<Url, ClientError> {
        let mut url = self.api.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::CannotBeABase { url: self.api.clone() })?
            .pop_if_empty()
            .extend(["api", "v1", "teams", self.name.as_str(), resource]);
        Ok(url)
    }

    /// Lists every container the team owns. `filter` is passed through as query parameters.
    pub async fn list_containers(&self, filter: &[(&str, &str)]) -> Result<Vec<Container>, ClientError> {
        let mut url = self.endpoint("containers")?;
        if !filter.is_empty() {
            url.query_pairs_mut().extend_pairs(filter);
        }

        self.logger.trace(format!("GET {url}"));
        let mut request = self.http.get(url.clone());
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, token.header_value());
        }
        let response = request.send().await.map_err(|source| ClientError::Request {
            url: url.clone(),
            source,
        })?;

        let status = response.status();
        self.logger.trace(format!("{status} {url}"));
        let body = response
            .text()
            .await
            .map_err(|source| ClientError::Request { url: url.clone(), source })?;

        match status {
            status if status.is_success() => {
                serde_json::from_str(&body).map_err(|source| ClientError::Decode { url, source })
            }
            StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
            StatusCode::FORBIDDEN => Err(ClientError::Forbidden),
            StatusCode::NOT_FOUND => Err(ClientError::NotFound {
                team: self.name.clone(),
            }),
            status => Err(ClientError::UnexpectedResponse { status, body }),
        }
    }
}
