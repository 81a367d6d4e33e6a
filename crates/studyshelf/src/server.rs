use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower_http::cors::{Any, CorsLayer};

use crate::comments::CommentStore;
use crate::config::SiteConfig;
use crate::content::ContentTree;
use crate::error::{SiteError, SiteResult};
use crate::search::SearchIndex;

pub mod api;
pub mod error;
pub mod pages;
pub mod templates;

/// Shared, read-only request state: the tree is loaded once at startup
/// and every derived view is computed from it per request.
pub struct ServerState {
    pub config: SiteConfig,
    pub content: ContentTree,
    pub index: SearchIndex,
    pub comments: Option<CommentStore>,
}

#[derive(Debug)]
pub struct Server {
    addr: std::net::SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
}

impl Server {
    /// Loads the content tree (fatal on failure), builds the search
    /// index, and starts serving. The listener task runs until
    /// [`Server::shutdown`] or drop.
    pub async fn new(config: SiteConfig) -> SiteResult<Self> {
        let content = ContentTree::load(&config.content_path)?;
        let index = SearchIndex::build(&content);
        let comments = config
            .comments
            .as_ref()
            .map(|c| CommentStore::new(&c.base_url, &c.api_key));
        let bind = config.bind.clone();
        let state = Arc::new(ServerState {
            config,
            content,
            index,
            comments,
        });
        let app = router(state);
        let listener = TcpListener::bind(&bind)
            .await
            .map_err(|error| SiteError::Internal(format!("failed to bind {bind}: {error}")))?;
        let addr = listener
            .local_addr()
            .map_err(|error| SiteError::Internal(error.to_string()))?;
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await;
        });
        tracing::info!("serving on http://{addr}");

        Ok(Server {
            addr,
            shutdown: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> std::net::SocketAddr {
        self.addr
    }

    pub fn shutdown(&mut self) -> SiteResult<()> {
        if let Some(sender) = self.shutdown.take() {
            sender
                .send(())
                .map_err(|_| SiteError::Internal("failed to send shutdown signal".to_string()))
        } else {
            Ok(())
        }
    }
}

impl Drop for Server {
    fn drop(&mut self) {
        let _ = self.shutdown();
    }
}

fn router(state: Arc<ServerState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    Router::new()
        .route("/health", get(health))
        .route("/", get(pages::home))
        .route("/select", get(pages::select_semester))
        .route("/api/search", get(api::search))
        .route("/api/comments", get(api::list_comments).post(api::post_comment))
        .route("/*path", get(pages::content_page))
        .with_state(state)
        .layer(cors)
}

async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CommentsConfig;
    use std::path::Path;

    const FIXTURE: &str = r#"{
        "sem1": {
            "cs": {
                "unit1": {
                    "notes": [
                        {"title": "A", "url": "https://drive.google.com/file/d/XYZ/view"},
                        {"title": "B", "url": "https://drive.google.com/file/d/ABC/view"}
                    ],
                    "slides": [
                        {"title": "Intro Deck", "url": "https://docs.google.com/presentation/d/DECK1/edit"}
                    ]
                }
            },
            "math": {
                "unit1": {
                    "short-notes": [
                        {"title": "Calculus Basics", "url": "https://drive.google.com/file/d/CALC/view"}
                    ]
                }
            }
        },
        "sem2": {
            "physics": {
                "unit1": {
                    "notes": [
                        {"title": "Waves", "url": "https://drive.google.com/file/d/WAV/view"}
                    ]
                }
            }
        }
    }"#;

    fn fixture_config(dir: &Path) -> SiteConfig {
        let content_path = dir.join("content.json");
        std::fs::write(&content_path, FIXTURE).expect("write fixture");
        SiteConfig {
            content_path,
            bind: "127.0.0.1:0".to_string(),
            ..SiteConfig::default()
        }
    }

    async fn start() -> (tempfile::TempDir, Server) {
        let dir = tempfile::tempdir().expect("tempdir");
        let server = Server::new(fixture_config(dir.path())).await.expect("start");
        (dir, server)
    }

    fn no_redirect_client() -> reqwest::Client {
        reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("client")
    }

    #[tokio::test]
    async fn missing_content_file_is_fatal() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = SiteConfig {
            content_path: dir.path().join("missing.json"),
            bind: "127.0.0.1:0".to_string(),
            ..SiteConfig::default()
        };
        let err = Server::new(config).await.expect_err("must fail");
        assert!(matches!(err, SiteError::ConfigLoad(_)));
    }

    #[tokio::test]
    async fn home_redirects_to_first_semester() {
        let (_dir, mut server) = start().await;
        let response = no_redirect_client()
            .get(format!("http://{}/", server.addr()))
            .send()
            .await
            .expect("request");
        assert!(response.status().is_redirection());
        assert_eq!(
            response.headers()["location"].to_str().expect("location"),
            "/sem1"
        );
        server.shutdown().expect("shutdown");
    }

    #[tokio::test]
    async fn home_honors_the_semester_cookie() {
        let (_dir, mut server) = start().await;
        let response = no_redirect_client()
            .get(format!("http://{}/", server.addr()))
            .header("cookie", "semester=sem2")
            .send()
            .await
            .expect("request");
        assert_eq!(
            response.headers()["location"].to_str().expect("location"),
            "/sem2"
        );
        server.shutdown().expect("shutdown");
    }

    #[tokio::test]
    async fn select_sets_cookie_and_redirects() {
        let (_dir, mut server) = start().await;
        let response = no_redirect_client()
            .get(format!("http://{}/select?semester=sem2", server.addr()))
            .send()
            .await
            .expect("request");
        assert!(response.status().is_redirection());
        let cookie = response.headers()["set-cookie"].to_str().expect("cookie");
        assert!(cookie.starts_with("semester=sem2"));
        let missing = no_redirect_client()
            .get(format!("http://{}/select?semester=sem9", server.addr()))
            .send()
            .await
            .expect("request");
        assert_eq!(missing.status(), 404);
        server.shutdown().expect("shutdown");
    }

    #[tokio::test]
    async fn content_pages_render_each_depth() {
        let (_dir, mut server) = start().await;
        let base = format!("http://{}", server.addr());

        let listing = reqwest::get(format!("{base}/sem1")).await.expect("request");
        assert_eq!(listing.status(), 200);
        let body = listing.text().await.expect("body");
        assert!(body.contains("/sem1/cs"));
        assert!(body.contains("/sem1/math"));

        let unit = reqwest::get(format!("{base}/sem1/cs/unit1"))
            .await
            .expect("request")
            .text()
            .await
            .expect("body");
        assert!(unit.contains("2 files"));

        let detail = reqwest::get(format!("{base}/sem1/cs/unit1/notes?note=0"))
            .await
            .expect("request")
            .text()
            .await
            .expect("body");
        assert!(detail.contains("https://drive.google.com/file/d/XYZ/preview"));
        server.shutdown().expect("shutdown");
    }

    #[tokio::test]
    async fn unresolved_paths_are_not_found() {
        let (_dir, mut server) = start().await;
        let base = format!("http://{}", server.addr());
        for path in [
            "/sem9",
            "/sem1/biology",
            "/sem1/cs/unit1/notes/extra",
            "/sem1/cs/unit1/notes?note=9",
            "/sem1/cs/unit1/notes?note=abc",
        ] {
            let response = reqwest::get(format!("{base}{path}")).await.expect("request");
            assert_eq!(response.status(), 404, "path {path}");
        }
        server.shutdown().expect("shutdown");
    }

    #[tokio::test]
    async fn search_endpoint_returns_json_results() {
        let (_dir, mut server) = start().await;
        let base = format!("http://{}", server.addr());
        let results: Vec<serde_json::Value> =
            reqwest::get(format!("{base}/api/search?q=calc"))
                .await
                .expect("request")
                .json()
                .await
                .expect("json");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["title"], "Calculus Basics");
        assert_eq!(results[0]["kind"], "note");

        let empty: Vec<serde_json::Value> =
            reqwest::get(format!("{base}/api/search?q="))
                .await
                .expect("request")
                .json()
                .await
                .expect("json");
        assert!(empty.is_empty());
        server.shutdown().expect("shutdown");
    }

    #[tokio::test]
    async fn comments_degrade_without_a_store() {
        let (_dir, mut server) = start().await;
        let base = format!("http://{}", server.addr());
        let comments: Vec<serde_json::Value> =
            reqwest::get(format!("{base}/api/comments?path=sem1/cs/unit1"))
                .await
                .expect("request")
                .json()
                .await
                .expect("json");
        assert!(comments.is_empty());

        let response = reqwest::Client::new()
            .post(format!("{base}/api/comments"))
            .json(&serde_json::json!({
                "path": "sem1/cs/unit1",
                "content": "hello"
            }))
            .send()
            .await
            .expect("request");
        assert_eq!(response.status(), 503);
        server.shutdown().expect("shutdown");
    }

    #[tokio::test]
    async fn unreachable_store_still_lists_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut config = fixture_config(dir.path());
        config.comments = Some(CommentsConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            api_key: "key".to_string(),
        });
        let mut server = Server::new(config).await.expect("start");
        let comments: Vec<serde_json::Value> = reqwest::get(format!(
            "http://{}/api/comments?path=sem1/cs/unit1",
            server.addr()
        ))
        .await
        .expect("request")
        .json()
        .await
        .expect("json");
        assert!(comments.is_empty());
        server.shutdown().expect("shutdown");
    }

    #[tokio::test]
    async fn blank_comment_content_is_rejected() {
        let (_dir, mut server) = start().await;
        let response = reqwest::Client::new()
            .post(format!("http://{}/api/comments", server.addr()))
            .json(&serde_json::json!({ "path": "sem1/cs/unit1", "content": "  " }))
            .send()
            .await
            .expect("request");
        assert_eq!(response.status(), 400);
        let body: serde_json::Value = response.json().await.expect("json");
        assert_eq!(body["ok"], false);
        assert_eq!(body["error"]["code"], "bad_request");
        server.shutdown().expect("shutdown");
    }
}
