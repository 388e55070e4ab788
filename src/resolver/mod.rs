//! Remote location resolution for dependencies
//!
//! This module provides:
//! - SSH and HTTPS remotes derived from an import path
//! - Vanity-import redirection through go-import meta tags
//! - The HTTP client used for discovery

mod client;
pub mod meta;

pub use client::{HttpClient, DEFAULT_TIMEOUT};

use crate::domain::{Dependency, RemoteLocation};
use crate::error::{RedirectError, ResolutionError};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};
use url::Url;

/// Looks up where a vanity import path really lives
#[async_trait]
pub trait RedirectProbe: Send + Sync {
    /// Return the redirected HTTPS remote for `https_url`, if the page declares one
    async fn probe(&self, https_url: &str) -> Result<Option<String>, RedirectError>;
}

/// Probe that reads the go-import meta tag of the import path's web page
pub struct MetaTagProbe {
    client: HttpClient,
}

impl MetaTagProbe {
    /// Create a new probe on top of `client`
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RedirectProbe for MetaTagProbe {
    async fn probe(&self, https_url: &str) -> Result<Option<String>, RedirectError> {
        let Some(body) = self.client.get_page(https_url).await? else {
            return Ok(None);
        };

        let Some(content) = meta::go_import_content(&body) else {
            return Ok(None);
        };
        debug!("go-import for {}: {}", https_url, content);

        Ok(meta::redirect_target(&content))
    }
}

/// Derive the SSH and HTTPS remotes for an import path
///
/// `github.com/foo/bar` becomes `git@github.com:foo/bar.git` and
/// `https://github.com/foo/bar`.
pub fn constructed_remotes(name: &str) -> Result<(String, String), ResolutionError> {
    let https = format!("https://{}", name);
    let parsed = Url::parse(&https).map_err(|e| ResolutionError::new(name, e.to_string()))?;

    let host = parsed
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| ResolutionError::new(name, "missing host"))?;
    let path = parsed.path().trim_start_matches('/');
    if path.is_empty() {
        return Err(ResolutionError::new(name, "missing repository path"));
    }

    let ssh = format!("git@{}:{}.git", host, path);
    Ok((ssh, https))
}

/// Computes where each dependency should be fetched from
#[derive(Clone, Default)]
pub struct SourceResolver {
    probe: Option<Arc<dyn RedirectProbe>>,
}

impl SourceResolver {
    /// Create a resolver; without a probe no redirect discovery happens
    pub fn new(probe: Option<Arc<dyn RedirectProbe>>) -> Self {
        Self { probe }
    }

    /// Create a resolver that never performs discovery
    pub fn without_discovery() -> Self {
        Self { probe: None }
    }

    /// Resolve the remote location of `dependency`
    ///
    /// An explicit source is used as-is with no fallback. Otherwise the SSH
    /// remote is primary and the HTTPS remote is fallback, unless the HTTPS
    /// page declares a go-import redirect, which then becomes primary.
    pub async fn resolve(&self, dependency: &Dependency) -> Result<RemoteLocation, ResolutionError> {
        if let Some(source) = dependency.explicit_source() {
            debug!("{}: using explicit source {}", dependency.name, source);
            return Ok(RemoteLocation::explicit(source));
        }

        let (ssh, https) = constructed_remotes(&dependency.name)?;

        let primary = match self.discover(&https).await {
            Some(redirect) => {
                info!("{}: redirected to {}", dependency.name, redirect);
                redirect
            }
            None => ssh,
        };

        Ok(RemoteLocation::with_fallback(primary, https))
    }

    async fn discover(&self, https: &str) -> Option<String> {
        let probe = self.probe.as_ref()?;
        match probe.probe(https).await {
            Ok(found) => found,
            Err(e) => {
                warn!("error receiving meta tag: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Probe returning a fixed answer and counting calls
    struct StubProbe {
        answer: Result<Option<String>, String>,
        calls: AtomicUsize,
    }

    impl StubProbe {
        fn new(answer: Result<Option<String>, String>) -> Arc<Self> {
            Arc::new(Self {
                answer,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl RedirectProbe for StubProbe {
        async fn probe(&self, https_url: &str) -> Result<Option<String>, RedirectError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.answer.clone().map_err(|message| RedirectError::Request {
                url: https_url.to_string(),
                message,
            })
        }
    }

    #[test]
    fn test_constructed_remotes() {
        let (ssh, https) = constructed_remotes("github.com/foo/bar").unwrap();
        assert_eq!(ssh, "git@github.com:foo/bar.git");
        assert_eq!(https, "https://github.com/foo/bar");
    }

    #[test]
    fn test_constructed_remotes_nested_path() {
        let (ssh, _) = constructed_remotes("gitlab.com/group/sub/project").unwrap();
        assert_eq!(ssh, "git@gitlab.com:group/sub/project.git");
    }

    #[test]
    fn test_constructed_remotes_without_path() {
        let err = constructed_remotes("github.com").unwrap_err();
        assert_eq!(err.name, "github.com");
        assert!(err.message.contains("path"));
    }

    #[test]
    fn test_constructed_remotes_malformed() {
        assert!(constructed_remotes("").is_err());
        assert!(constructed_remotes("bad host/x").is_err());
    }

    #[tokio::test]
    async fn test_resolve_explicit_source_skips_discovery() {
        let probe = StubProbe::new(Ok(Some("https://elsewhere/x.git".to_string())));
        let resolver = SourceResolver::new(Some(probe.clone()));
        let dep = Dependency::new("x", "1.0.0").with_source("git@example.com:x.git");

        let remote = resolver.resolve(&dep).await.unwrap();

        assert_eq!(remote, RemoteLocation::explicit("git@example.com:x.git"));
        assert_eq!(probe.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_resolve_explicit_source_does_not_parse_name() {
        let resolver = SourceResolver::without_discovery();
        let dep = Dependency::new("x", "1.0.0").with_source("git@example.com:x.git");
        assert!(resolver.resolve(&dep).await.is_ok());
    }

    #[tokio::test]
    async fn test_resolve_without_redirect() {
        let probe = StubProbe::new(Ok(None));
        let resolver = SourceResolver::new(Some(probe.clone()));
        let dep = Dependency::new("github.com/foo/bar", "1.0.0");

        let remote = resolver.resolve(&dep).await.unwrap();

        assert_eq!(remote.primary, "git@github.com:foo/bar.git");
        assert_eq!(remote.fallback.as_deref(), Some("https://github.com/foo/bar"));
        assert_eq!(probe.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_resolve_redirect_replaces_primary() {
        let probe = StubProbe::new(Ok(Some("https://go.googlesource.com/net.git".to_string())));
        let resolver = SourceResolver::new(Some(probe));
        let dep = Dependency::new("golang.org/x/net", "0.1.0");

        let remote = resolver.resolve(&dep).await.unwrap();

        assert_eq!(remote.primary, "https://go.googlesource.com/net.git");
        assert_eq!(remote.fallback.as_deref(), Some("https://golang.org/x/net"));
    }

    #[tokio::test]
    async fn test_resolve_discovery_error_falls_back_to_ssh() {
        let probe = StubProbe::new(Err("connection reset".to_string()));
        let resolver = SourceResolver::new(Some(probe));
        let dep = Dependency::new("github.com/foo/bar", "1.0.0");

        let remote = resolver.resolve(&dep).await.unwrap();

        assert_eq!(remote.primary, "git@github.com:foo/bar.git");
        assert_eq!(remote.fallback.as_deref(), Some("https://github.com/foo/bar"));
    }

    #[tokio::test]
    async fn test_resolve_malformed_name() {
        let resolver = SourceResolver::without_discovery();
        let dep = Dependency::new("github.com", "1.0.0");
        assert!(resolver.resolve(&dep).await.is_err());
    }

    #[tokio::test]
    async fn test_meta_tag_probe_finds_redirect() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/x/net")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body(
                r#"<html><head><meta name="go-import" content="golang.org/x/net git https://go.googlesource.com/net"></head><body></body></html>"#,
            )
            .create_async()
            .await;

        let probe = MetaTagProbe::new(HttpClient::new().unwrap());
        let found = probe
            .probe(&format!("{}/x/net", server.url()))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(found.as_deref(), Some("https://go.googlesource.com/net.git"));
    }

    #[tokio::test]
    async fn test_meta_tag_probe_page_without_tag() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/foo/bar")
            .with_status(200)
            .with_body("<html><head><title>bar</title></head><body></body></html>")
            .create_async()
            .await;

        let probe = MetaTagProbe::new(HttpClient::new().unwrap());
        let found = probe
            .probe(&format!("{}/foo/bar", server.url()))
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_meta_tag_probe_non_200() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/gone")
            .with_status(500)
            .with_body(r#"<html><head><meta name="go-import" content="a git https://b"></head></html>"#)
            .create_async()
            .await;

        let probe = MetaTagProbe::new(HttpClient::new().unwrap());
        let found = probe.probe(&format!("{}/gone", server.url())).await.unwrap();

        mock.assert_async().await;
        assert!(found.is_none());
    }
}
