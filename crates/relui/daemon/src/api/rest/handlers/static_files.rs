//! Static file handler
//!
//! Serves files below the configured static root for every path no route
//! claims. The site root is the home page, never a file.

use super::pages::home;
use crate::api::rest::state::AppState;
use crate::error::{ApiError, ApiResult};
use axum::{
    body::Body,
    extract::State,
    http::{header, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use std::path::{Component, Path, PathBuf};
use tokio_util::io::ReaderStream;

/// Cache policy for every served file
pub const NO_CACHE: &str = "no-cache, private, max-age=0";

/// What a request path maps to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StaticTarget {
    /// The site root
    Home,
    /// Nothing servable at this path
    NotFound,
    /// A regular file below the root
    File(PathBuf),
}

/// Map a request path onto the static root
///
/// `/` resolves without touching the filesystem. Paths with `..` components
/// or that leave the root through a link are not found; a directory resolves
/// to its `index.html` when it has one.
pub async fn resolve(root: &Path, request_path: &str) -> StaticTarget {
    if request_path == "/" {
        return StaticTarget::Home;
    }

    let mut path = root.to_path_buf();
    for component in Path::new(request_path.trim_start_matches('/')).components() {
        match component {
            Component::Normal(part) => path.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return StaticTarget::NotFound
            }
        }
    }

    let path = match tokio::fs::metadata(&path).await {
        Ok(meta) if meta.is_file() => path,
        Ok(meta) if meta.is_dir() => path.join("index.html"),
        _ => return StaticTarget::NotFound,
    };

    // Symlinks may point anywhere; only serve what stays under the root.
    let (Ok(root), Ok(resolved)) = (
        tokio::fs::canonicalize(root).await,
        tokio::fs::canonicalize(&path).await,
    ) else {
        return StaticTarget::NotFound;
    };
    if !resolved.starts_with(&root) {
        return StaticTarget::NotFound;
    }

    match tokio::fs::metadata(&resolved).await {
        Ok(meta) if meta.is_file() => StaticTarget::File(path),
        _ => StaticTarget::NotFound,
    }
}

/// Fallback handler: the home page for `/`, otherwise a file under the static root
pub async fn serve_static(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
) -> ApiResult<Response> {
    if method != Method::GET && method != Method::HEAD {
        return Ok(StatusCode::METHOD_NOT_ALLOWED.into_response());
    }

    match resolve(&state.static_root, uri.path()).await {
        StaticTarget::Home => Ok(home(State(state)).await?.into_response()),
        StaticTarget::NotFound => Err(ApiError::NotFound(format!("{} not found", uri.path()))),
        StaticTarget::File(path) => {
            let file = tokio::fs::File::open(&path).await.map_err(|e| {
                tracing::error!(operation = "serve_static", path = %path.display(), error = %e, "Failed to open static file");
                ApiError::Internal(e.to_string())
            })?;

            let mime = mime_guess::from_path(&path).first_or_octet_stream();
            Ok((
                [
                    (header::CONTENT_TYPE, mime.to_string()),
                    (header::CACHE_CONTROL, NO_CACHE.to_string()),
                ],
                Body::from_stream(ReaderStream::new(file)),
            )
                .into_response())
        }
    }
}
