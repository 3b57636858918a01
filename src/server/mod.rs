//! HTTP server: the posts API, page routes and static files

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::api::{self, PostQuery};
use crate::content::{MarkdownRenderer, Post, PostRepository};
use crate::pages;
use crate::templates::TemplateRenderer;
use crate::Blog;

/// Server state, shared read-only between requests
struct ServerState {
    blog: Blog,
    templates: TemplateRenderer,
    markdown: MarkdownRenderer,
}

impl ServerState {
    fn repository(&self) -> PostRepository {
        self.blog.repository()
    }
}

/// Build the application router
pub fn router(blog: &Blog) -> Result<Router> {
    let state = Arc::new(ServerState {
        blog: blog.clone(),
        templates: TemplateRenderer::new()?,
        markdown: MarkdownRenderer::with_config(&blog.config.highlight),
    });

    Ok(Router::new()
        .route("/api/posts", get(list_posts_handler))
        .route("/", get(home_handler))
        .route("/posts", get(posts_handler))
        .route("/posts/:slug", get(post_handler))
        .fallback_service(ServeDir::new(&blog.static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Start the server and run until Ctrl+C
pub async fn start(blog: &Blog, ip: &str, port: u16) -> Result<()> {
    let app = router(blog)?;

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
    }
}

/// Error returned from handlers
#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    message: String,
}

impl HttpError {
    fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }
}

impl From<anyhow::Error> for HttpError {
    fn from(err: anyhow::Error) -> Self {
        tracing::error!("Request failed: {:#}", err);
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let payload = ErrorBody {
            error: self
                .status
                .canonical_reason()
                .unwrap_or("error")
                .to_string(),
            message: self.message,
        };
        (self.status, Json(payload)).into_response()
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    message: String,
}

type HttpResult<T> = Result<T, HttpError>;

/// Run blocking file-system work off the async runtime
async fn blocking<T, F>(f: F) -> HttpResult<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(anyhow::Error::from)?
        .map_err(HttpError::from)
}

/// `GET /api/posts[?category=...]`
async fn list_posts_handler(
    State(state): State<Arc<ServerState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> HttpResult<Json<Vec<Post>>> {
    let repo = state.repository();
    let query = PostQuery::from_pairs(pairs);
    let posts = blocking(move || api::list_posts(&repo, &query)).await?;
    Ok(Json(posts))
}

/// `GET /` - the latest post
async fn home_handler(State(state): State<Arc<ServerState>>) -> HttpResult<Html<String>> {
    let repo = state.repository();
    let page = blocking(move || pages::latest_page(&repo)).await?;
    let html = state
        .templates
        .render("home.html", &state.blog.config, &page)?;
    Ok(Html(html))
}

/// `GET /posts[?category=...]` - the post listing
async fn posts_handler(
    State(state): State<Arc<ServerState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> HttpResult<Html<String>> {
    let repo = state.repository();
    let page = blocking(move || pages::list_page(&repo, pairs)).await?;
    let html = state
        .templates
        .render("posts.html", &state.blog.config, &page)?;
    Ok(Html(html))
}

/// `GET /posts/:slug` - a single rendered post
async fn post_handler(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> HttpResult<Html<String>> {
    let page = {
        let state = state.clone();
        let slug = slug.clone();
        blocking(move || pages::post_page(&state.repository(), &state.markdown, &slug)).await?
    };
    let Some(page) = page else {
        return Err(HttpError::not_found(format!("No post named {}", slug)));
    };
    let html = state
        .templates
        .render("post.html", &state.blog.config, &page)?;
    Ok(Html(html))
}
