use filerepo::api::create_router;
use filerepo::config::Config;
use filerepo::utils::state::AppState;
use reqwest::StatusCode;
use sha2::{Digest, Sha256};
use std::path::Path;
use std::sync::Arc;

async fn spawn_server(dir: &Path) -> String {
    let config = Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        root_dir: dir.join("files").display().to_string(),
        firmware_path: dir.join("firmware.bin").display().to_string(),
        build_number_file: dir.join("versioning").display().to_string(),
        version_header: dir.join("version.h").display().to_string(),
    };
    let app = create_router(Arc::new(AppState::new(config)));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn get_text(url: &str) -> String {
    reqwest::get(url).await.unwrap().text().await.unwrap()
}

#[tokio::test]
async fn test_index_says_hello() {
    let dir = tempfile::tempdir().unwrap();
    let base = spawn_server(dir.path()).await;
    let resp = reqwest::get(format!("{base}/")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "Hello World!");
}

#[tokio::test]
async fn test_firmware_is_served_as_octet_stream() {
    let dir = tempfile::tempdir().unwrap();
    let image: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
    std::fs::write(dir.path().join("firmware.bin"), &image).unwrap();
    let base = spawn_server(dir.path()).await;

    let resp = reqwest::get(format!("{base}/firmware.bin")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["content-type"], "application/octet-stream");
    assert_eq!(resp.headers()["content-length"], "4096");
    let expected = format!("sha256:{}", hex::encode(Sha256::digest(&image)));
    assert_eq!(resp.headers()["x-firmware-digest"], expected.as_str());
    assert_eq!(resp.bytes().await.unwrap().as_ref(), image.as_slice());
}

#[tokio::test]
async fn test_missing_firmware_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let base = spawn_server(dir.path()).await;
    let resp = reqwest::get(format!("{base}/firmware.bin")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_version_endpoint() {
    let dir = tempfile::tempdir().unwrap();
    let base = spawn_server(dir.path()).await;

    let url = format!("{base}/version");
    assert_eq!(get_text(&url).await, "unknown");

    std::fs::write(dir.path().join("versioning"), "13\n").unwrap();
    assert_eq!(get_text(&url).await, "v0.1.13");

    std::fs::write(dir.path().join("version.h"), "#define VERSION_SHORT \"v0.1.13-rc\"\n").unwrap();
    assert_eq!(get_text(&url).await, "v0.1.13-rc");
}
