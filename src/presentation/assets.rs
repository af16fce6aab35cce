use crate::presentation::error::ApiError;
use crate::presentation::routes::AppState;
use actix_web::{HttpResponse, web};
use anyhow::{Context, Result};
use std::path::Path;
use strict_path::{PathBoundary, StrictPath};
use tracing::{debug, instrument, warn};

/// Marker for paths proven to stay inside the static root.
pub struct StaticRoot;

/// Files served to the browser front end.
pub struct StaticAssets {
    root: PathBoundary<StaticRoot>,
}

/// A file read from the static root.
#[derive(Debug)]
pub struct Asset {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl StaticAssets {
    pub fn new(dir: &Path) -> Result<Self> {
        let root = PathBoundary::try_new(dir)
            .with_context(|| format!("static directory {} is not usable", dir.display()))?;
        Ok(Self { root })
    }

    fn join(&self, relative: &str) -> Option<StrictPath<StaticRoot>> {
        match self.root.strict_join(relative) {
            Ok(path) => Some(path),
            Err(e) => {
                warn!(path = relative, error = %e, "Rejected path outside static root");
                None
            }
        }
    }

    fn is_file(&self, relative: &str) -> bool {
        self.join(relative).is_some_and(|p| p.is_file())
    }

    pub async fn read(&self, relative: &str) -> Result<Asset, ApiError> {
        let path = self.join(relative).ok_or(ApiError::NotFound)?;
        let bytes = tokio::fs::read(path.interop_path()).await.map_err(|e| {
            debug!(path = relative, error = %e, "Static file not readable");
            ApiError::NotFound
        })?;
        let content_type = mime_guess::from_path(relative)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Ok(Asset {
            content_type,
            bytes,
        })
    }

    /// The literal path if it is a file, else `path.html`, else the literal
    /// path again so a missing file surfaces as not found.
    pub async fn resolve(&self, relative: &str) -> Result<Asset, ApiError> {
        if self.is_file(relative) {
            return self.read(relative).await;
        }
        let html = format!("{relative}.html");
        if self.is_file(&html) {
            return self.read(&html).await;
        }
        self.read(relative).await
    }
}

fn is_api_path(path: &str) -> bool {
    path == "api" || path.starts_with("api/")
}

fn asset_response(asset: Asset) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(asset.content_type)
        .body(asset.bytes)
}

pub async fn index(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    Ok(asset_response(state.assets.read("index.html").await?))
}

/// Browsers ask for this unprompted; answer 204 rather than 404 when absent.
pub async fn favicon(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    if state.assets.is_file("favicon.ico") {
        return Ok(asset_response(state.assets.read("favicon.ico").await?));
    }
    Ok(HttpResponse::NoContent().finish())
}

#[instrument(skip(state))]
pub async fn serve(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let path = path.into_inner();
    if is_api_path(&path) {
        return Err(ApiError::NotFound);
    }
    Ok(asset_response(state.assets.resolve(&path).await?))
}

/// Fallback for anything no route matched.
pub async fn not_found() -> Result<HttpResponse, ApiError> {
    Err(ApiError::NotFound)
}
