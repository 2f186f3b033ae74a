use okta_browser::{Directory, DirectoryEntry, DirectoryError, EntryId, ProfileRecord};
use reqwest::{StatusCode, Url};

use crate::user::UserResponse;

/// Connection settings for an Okta organization.
#[derive(Debug, Clone)]
pub struct OktaDirectoryConfig {
    /// Organization URL, e.g. `https://example.okta.com`.
    pub org_url: String,
    /// API token sent as `Authorization: SSWS <token>`.
    pub api_token: String,
}

/// Reads users from an Okta organization's Users API.
pub struct OktaDirectory {
    base_url: Url,
    label: String,
    api_token: String,
    client: reqwest::Client,
}

impl OktaDirectory {
    pub fn new(config: OktaDirectoryConfig) -> Result<Self, DirectoryError> {
        let base_url = Url::parse(&config.org_url).map_err(|e| {
            DirectoryError::InvalidConfig(format!("org URL {:?}: {e}", config.org_url))
        })?;

        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(DirectoryError::InvalidConfig(format!(
                "org URL {:?} must be an http(s) URL",
                config.org_url
            )));
        }

        if config.api_token.trim().is_empty() {
            return Err(DirectoryError::InvalidConfig("API token is empty".into()));
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!("okta-browser/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DirectoryError::InvalidConfig(format!("HTTP client: {e}")))?;

        let label = base_url.host_str().unwrap_or("okta").to_owned();

        Ok(Self {
            base_url,
            label,
            api_token: config.api_token,
            client,
        })
    }

    /// `{org}/api/v1/users[/{segment}]`, with the segment percent-encoded.
    fn users_url(&self, segment: Option<&str>) -> Result<Url, DirectoryError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| DirectoryError::InvalidConfig("org URL cannot be a base".into()))?;
            segments.pop_if_empty().extend(["api", "v1", "users"]);
            if let Some(segment) = segment {
                segments.push(segment);
            }
        }
        Ok(url)
    }

    fn build_request(&self, url: Url) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .header("Authorization", format!("SSWS {}", self.api_token))
            .header("Accept", "application/json")
    }

    async fn send(
        &self,
        url: Url,
        id: Option<&EntryId>,
    ) -> Result<reqwest::Response, DirectoryError> {
        tracing::debug!(%url, "okta request");

        let response = self
            .build_request(url)
            .send()
            .await
            .map_err(|e| DirectoryError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_else(|_| "unknown".into());
        tracing::warn!(status = status.as_u16(), "okta request failed");

        Err(match (status, id) {
            (StatusCode::NOT_FOUND, Some(id)) => DirectoryError::NotFound(id.clone()),
            (StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN, _) => {
                DirectoryError::Unauthorized(format!("HTTP {status}"))
            }
            _ => DirectoryError::Http {
                status: status.as_u16(),
                body,
            },
        })
    }
}

#[async_trait::async_trait]
impl Directory for OktaDirectory {
    fn label(&self) -> &str {
        &self.label
    }

    async fn list_entries(&self) -> Result<Vec<DirectoryEntry>, DirectoryError> {
        let url = self.users_url(None)?;
        let users: Vec<UserResponse> = self
            .send(url, None)
            .await?
            .json()
            .await
            .map_err(|e| DirectoryError::Parse(e.to_string()))?;

        tracing::info!(count = users.len(), "listed okta users");
        Ok(users.iter().map(UserResponse::to_entry).collect())
    }

    async fn get_profile(&self, id: &EntryId) -> Result<ProfileRecord, DirectoryError> {
        let url = self.users_url(Some(id.as_str()))?;
        let user: UserResponse = self
            .send(url, Some(id))
            .await?
            .json()
            .await
            .map_err(|e| DirectoryError::Parse(e.to_string()))?;

        Ok(user.into_profile())
    }
}
