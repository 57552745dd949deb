//! Reqwest-backed source for the JSON placeholder API.
//!
//! This adapter owns transport details only: URL joining, optional request
//! timeout, HTTP error mapping, and JSON decoding into domain records.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::dto::{CommentDto, PostDto, UserDto};
use crate::domain::ports::{RemoteSource, RemoteSourceError};
use crate::domain::{Comment, Post, User};

/// Public API the dashboard reads by default.
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";
const USER_AGENT: &str = concat!("dashboard/", env!("CARGO_PKG_VERSION"));

/// Remote source performing HTTP GET requests below one base URL.
#[derive(Debug, Clone)]
pub struct PlaceholderHttpSource {
    client: Client,
    base: Url,
}

impl PlaceholderHttpSource {
    /// Build an adapter for `base_url`. Without `timeout` requests wait
    /// indefinitely.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(limit) = timeout {
            builder = builder.timeout(limit);
        }
        Ok(Self {
            client: builder.build()?,
            base: with_trailing_slash(base_url),
        })
    }

    /// URL of one collection endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteSourceError::Transport`] when the URL cannot be
    /// joined.
    pub fn endpoint(&self, resource: &str) -> Result<Url, RemoteSourceError> {
        self.base.join(resource).map_err(|err| {
            RemoteSourceError::transport(format!("invalid endpoint for {resource}: {err}"))
        })
    }

    async fn get_list<D, T>(&self, resource: &str) -> Result<Vec<T>, RemoteSourceError>
    where
        D: DeserializeOwned,
        T: From<D>,
    {
        let url = self.endpoint(resource)?;
        debug!(%url, "fetching remote collection");
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        parse_list::<D, T>(resource, body.as_ref())
    }
}

#[async_trait]
impl RemoteSource for PlaceholderHttpSource {
    async fn fetch_users(&self) -> Result<Vec<User>, RemoteSourceError> {
        self.get_list::<UserDto, User>("users").await
    }

    async fn fetch_posts(&self) -> Result<Vec<Post>, RemoteSourceError> {
        self.get_list::<PostDto, Post>("posts").await
    }

    async fn fetch_comments(&self) -> Result<Vec<Comment>, RemoteSourceError> {
        self.get_list::<CommentDto, Comment>("comments").await
    }
}

fn with_trailing_slash(url: Url) -> Url {
    if url.path().ends_with('/') {
        return url;
    }
    let mut normalised = url;
    let path = format!("{}/", normalised.path());
    normalised.set_path(&path);
    normalised
}

fn parse_list<D, T>(resource: &str, body: &[u8]) -> Result<Vec<T>, RemoteSourceError>
where
    D: DeserializeOwned,
    T: From<D>,
{
    let decoded: Vec<D> = serde_json::from_slice(body).map_err(|error| {
        RemoteSourceError::decode(format!("invalid {resource} payload: {error}"))
    })?;
    Ok(decoded.into_iter().map(T::from).collect())
}

fn map_transport_error(error: reqwest::Error) -> RemoteSourceError {
    if error.is_timeout() {
        RemoteSourceError::timeout(error.to_string())
    } else {
        RemoteSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> RemoteSourceError {
    let preview = body_preview(body);
    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            RemoteSourceError::timeout(format!("status {}", status.as_u16()))
        }
        _ => RemoteSourceError::status(status.as_u16(), preview),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if compact.chars().count() <= PREVIEW_CHAR_LIMIT {
        return compact;
    }
    let truncated: String = compact.chars().take(PREVIEW_CHAR_LIMIT).collect();
    format!("{truncated}...")
}

#[cfg(test)]
mod tests {
    //! Coverage for the non-network helpers.
    #![expect(clippy::expect_used, reason = "test assertions fail fast")]

    use rstest::rstest;

    use super::*;
    use crate::domain::{PostId, UserId};

    fn source(base: &str) -> PlaceholderHttpSource {
        let url = Url::parse(base).expect("valid url");
        PlaceholderHttpSource::new(url, None).expect("client builds")
    }

    #[rstest]
    #[case::bare_host("https://api.example.com", "https://api.example.com/posts")]
    #[case::nested_without_slash("https://api.example.com/v1", "https://api.example.com/v1/posts")]
    #[case::nested_with_slash("https://api.example.com/v1/", "https://api.example.com/v1/posts")]
    fn endpoints_stay_below_the_base_path(#[case] base: &str, #[case] expected: &str) {
        let url = source(base).endpoint("posts").expect("join");
        assert_eq!(url.as_str(), expected);
    }

    #[rstest]
    #[case::request_timeout(StatusCode::REQUEST_TIMEOUT, true)]
    #[case::gateway_timeout(StatusCode::GATEWAY_TIMEOUT, true)]
    #[case::not_found(StatusCode::NOT_FOUND, false)]
    #[case::server_error(StatusCode::INTERNAL_SERVER_ERROR, false)]
    fn maps_statuses(#[case] status: StatusCode, #[case] is_timeout: bool) {
        let error = map_status_error(status, b"{\"error\": \"nope\"}");
        if is_timeout {
            assert!(matches!(error, RemoteSourceError::Timeout { .. }));
        } else {
            assert_eq!(
                error,
                RemoteSourceError::status(status.as_u16(), "{\"error\": \"nope\"}")
            );
        }
    }

    #[test]
    fn decodes_posts_with_camel_case_foreign_keys() {
        let body = br#"[{"userId": 1, "id": 3, "title": "t", "body": "b"}]"#;
        let posts = parse_list::<PostDto, Post>("posts", body).expect("decode");
        assert_eq!(
            posts,
            vec![Post {
                id: PostId::new(3),
                user_id: UserId::new(1),
                title: "t".to_owned(),
                body: "b".to_owned(),
            }]
        );
    }

    #[test]
    fn decodes_users_ignoring_nested_objects() {
        let body = br#"[{
            "id": 1, "name": "Leanne Graham", "username": "Bret",
            "email": "Sincere@april.biz", "phone": "1-770-736-8031",
            "website": "hildegard.org",
            "address": {"street": "Kulas Light", "geo": {"lat": "-37.3159"}},
            "company": {"name": "Romaguera-Crona"}
        }]"#;
        let users = parse_list::<UserDto, User>("users", body).expect("decode");
        assert_eq!(users.len(), 1);
        assert_eq!(users.first().map(|u| u.website.as_str()), Some("hildegard.org"));
    }

    #[test]
    fn non_array_payload_is_a_decode_error() {
        let error = parse_list::<CommentDto, Comment>("comments", br#"{"id": 1}"#)
            .expect_err("object is not a list");
        assert!(matches!(error, RemoteSourceError::Decode { .. }));
    }

    #[test]
    fn long_bodies_are_truncated_in_previews() {
        let body = "x".repeat(400);
        let preview = body_preview(body.as_bytes());
        assert_eq!(preview.chars().count(), 163);
        assert!(preview.ends_with("..."));
    }
}
