use crate::config::Config;
use crate::error::{AppError, MapToAppError};
use crate::utils::state::AppState;
use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Response, StatusCode};
use axum::response::IntoResponse;
use regex::Regex;
use sha2::{Digest, Sha256};
use std::path::Path;
use std::sync::{Arc, LazyLock};

static VERSION_SHORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"VERSION_SHORT\s+"([^"]+)""#).unwrap());

/// GET /
pub async fn index_handler() -> impl IntoResponse {
    "Hello World!"
}

/// GET /firmware.bin
pub async fn get_firmware_handler(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let path = &state.config.firmware_path;
    let bytes = match tokio::fs::read(path).await {
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::NotFound(path.clone()));
        }
        other => other.map_to_io("Could not read firmware")?,
    };
    let digest = hex::encode(Sha256::digest(&bytes));
    tracing::info!(path = %path, size = bytes.len(), %digest, "serving firmware");

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(header::CONTENT_LENGTH, bytes.len())
        .header("X-Firmware-Digest", format!("sha256:{digest}"))
        .body(Body::from(bytes))
        .unwrap())
}

/// GET /version
pub async fn get_version_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match resolve_version(&state.config).await {
        Ok(version) => version,
        Err(err) => {
            tracing::error!("Error getting version: {err}");
            "unknown".to_string()
        }
    }
}

/// Prefers `VERSION_SHORT` from the header, falling back to `v0.1.<build number>`.
///
/// The build number file is read first either way, so its absence is always an error.
pub async fn resolve_version(config: &Config) -> Result<String, AppError> {
    let build_no = tokio::fs::read_to_string(&config.build_number_file)
        .await
        .map_to_io("Could not read build number")?;
    let build_no = build_no.trim();

    if Path::new(&config.version_header).exists() {
        let header = tokio::fs::read_to_string(&config.version_header)
            .await
            .map_to_io("Could not read version header")?;
        if let Some(version) = version_from_header(&header) {
            return Ok(version);
        }
    }

    Ok(format!("v0.1.{build_no}"))
}

fn version_from_header(header: &str) -> Option<String> {
    VERSION_SHORT
        .captures(header)
        .map(|caps| caps[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_in(dir: &TempDir) -> Config {
        Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            root_dir: dir.path().join("files").display().to_string(),
            firmware_path: dir.path().join("firmware.bin").display().to_string(),
            build_number_file: dir.path().join("versioning").display().to_string(),
            version_header: dir.path().join("version.h").display().to_string(),
        }
    }

    #[test]
    fn header_version_is_extracted() {
        let header = "#pragma once\n#define VERSION_SHORT   \"v1.4.27\"\n#define VERSION \"v1.4.27+abc\"\n";
        assert_eq!(version_from_header(header).as_deref(), Some("v1.4.27"));
        assert_eq!(version_from_header("#define VERSION \"v2\""), None);
    }

    #[tokio::test]
    async fn falls_back_to_build_number() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("versioning"), "42\n").unwrap();
        assert_eq!(resolve_version(&config_in(&dir)).await.unwrap(), "v0.1.42");
    }

    #[tokio::test]
    async fn header_without_version_short_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("versioning"), "7").unwrap();
        std::fs::write(dir.path().join("version.h"), "#define BUILD 7\n").unwrap();
        assert_eq!(resolve_version(&config_in(&dir)).await.unwrap(), "v0.1.7");
    }

    #[tokio::test]
    async fn header_wins_over_build_number() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("versioning"), "7").unwrap();
        std::fs::write(dir.path().join("version.h"), "#define VERSION_SHORT \"v0.2.7\"\n").unwrap();
        assert_eq!(resolve_version(&config_in(&dir)).await.unwrap(), "v0.2.7");
    }

    #[tokio::test]
    async fn missing_build_number_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("version.h"), "#define VERSION_SHORT \"v0.2.7\"\n").unwrap();
        assert!(matches!(
            resolve_version(&config_in(&dir)).await,
            Err(AppError::Io { .. })
        ));
    }
}
