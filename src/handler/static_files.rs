//! Static file serving module
//!
//! Maps a request path onto the document root, then serves the file, the
//! directory's index file, or a directory listing.

use crate::config::AppState;
use crate::handler::listing;
use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime};
use crate::logger;
use chrono::{DateTime, Utc};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::fs::Metadata;
use std::io;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// Serve a GET or HEAD request from the document root
pub async fn serve(ctx: &RequestContext, state: &AppState) -> Response<Full<Bytes>> {
    let target = match resolve_path(&state.root, &ctx.path).await {
        Ok(path) => path,
        Err(e) => return error_response(&ctx.path, &e),
    };

    let metadata = match fs::metadata(&target).await {
        Ok(m) => m,
        Err(e) => return error_response(&ctx.path, &e),
    };

    if metadata.is_dir() {
        return serve_directory(ctx, state, &target).await;
    }

    // A file never has children
    if ctx.path.ends_with('/') {
        return http::build_404_response();
    }

    // Typed by the name the client asked for, not by a symlink's target
    let requested = urlencoding::decode(&ctx.path).unwrap_or_else(|_| ctx.path.as_str().into());
    let content_type = mime::content_type_for(Path::new(&*requested));
    serve_file(ctx, &target, &metadata, content_type).await
}

/// Serve a directory: redirect to the slash form, then index file, then listing
async fn serve_directory(
    ctx: &RequestContext,
    state: &AppState,
    dir: &Path,
) -> Response<Full<Bytes>> {
    if !ctx.path.ends_with('/') {
        let location = match &ctx.query {
            Some(q) => format!("{}/?{q}", ctx.path),
            None => format!("{}/", ctx.path),
        };
        return http::build_redirect_response(&location);
    }

    for index_file in &state.config.http.index_files {
        let Ok(index_path) = contain(&state.root, &dir.join(index_file)).await else {
            continue;
        };
        if let Ok(metadata) = fs::metadata(&index_path).await {
            if metadata.is_file() {
                let content_type = mime::content_type_for(Path::new(index_file));
                return serve_file(ctx, &index_path, &metadata, content_type).await;
            }
        }
    }

    if state.config.http.directory_listing {
        return match listing::render(dir, &ctx.path).await {
            Ok(html) => http::build_html_response(html, ctx.is_head),
            Err(e) => error_response(&ctx.path, &e),
        };
    }

    http::build_404_response()
}

/// Serve a single regular file
async fn serve_file(
    ctx: &RequestContext,
    path: &Path,
    metadata: &Metadata,
    content_type: &str,
) -> Response<Full<Bytes>> {
    let last_modified = metadata.modified().ok().map(DateTime::<Utc>::from);

    if let Some(modified) = last_modified {
        if cache::is_not_modified(
            ctx.if_modified_since.as_deref(),
            ctx.has_if_none_match,
            modified,
        ) {
            return http::build_304_response(&cache::format_http_date(modified));
        }
    }

    let content = match fs::read(path).await {
        Ok(c) => c,
        Err(e) => return error_response(&ctx.path, &e),
    };

    http::build_file_response(
        Bytes::from(content),
        content_type,
        last_modified.map(cache::format_http_date).as_deref(),
        ctx.is_head,
    )
}

/// Translate a URL path into a canonical path under `root`
///
/// The path is percent-decoded and split on `/`. Empty and `.` segments
/// (and anything that is not a single plain path component on this
/// platform) are dropped; `..` removes the previous segment but stops at the
/// root. The result is canonicalized so symlinks that leave the root are
/// caught too.
pub async fn resolve_path(root: &Path, request_path: &str) -> io::Result<PathBuf> {
    let decoded = urlencoding::decode(request_path)
        .map_err(|_| io::Error::new(io::ErrorKind::NotFound, "path is not valid UTF-8"))?;

    let mut segments = Vec::new();
    for segment in decoded.split('/') {
        let mut components = Path::new(segment).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(part)), None) => segments.push(part),
            (Some(Component::ParentDir), None) => {
                segments.pop();
            }
            _ => {}
        }
    }

    let path: PathBuf = std::iter::once(root.as_os_str()).chain(segments).collect();
    contain(root, &path).await
}

/// Canonicalize `path` and require it to stay below `root`
async fn contain(root: &Path, path: &Path) -> io::Result<PathBuf> {
    let canonical = fs::canonicalize(path).await.map_err(|e| {
        if e.kind() == io::ErrorKind::PermissionDenied {
            e
        } else {
            io::Error::new(io::ErrorKind::NotFound, e)
        }
    })?;

    if !canonical.starts_with(root) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            path.display(),
            canonical.display()
        ));
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            "path escapes the document root",
        ));
    }

    Ok(canonical)
}

/// Map a filesystem error to a response
fn error_response(request_path: &str, err: &io::Error) -> Response<Full<Bytes>> {
    match err.kind() {
        // Missing files are routine; the access log already records the 404
        io::ErrorKind::NotFound => http::build_404_response(),
        io::ErrorKind::PermissionDenied => {
            logger::log_warning(&format!("Permission denied for '{request_path}': {err}"));
            http::build_403_response()
        }
        _ => {
            logger::log_error(&format!("Failed to serve '{request_path}': {err}"));
            http::build_500_response()
        }
    }
}
