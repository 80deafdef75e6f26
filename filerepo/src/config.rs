use std::path::Path;

use crate::utils::cli::Args;

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub root_dir: String,
    pub firmware_path: String,
    pub build_number_file: String,
    pub version_header: String,
}

impl Config {
    /// Validates the parsed flags, creating the root directory when it is missing.
    ///
    /// Every problem found is returned, not just the first.
    pub async fn from_args(args: &Args) -> Result<Config, Vec<String>> {
        let mut validation_errors = Vec::new();

        let root_dir = Path::new(&args.root);
        match tokio::fs::metadata(root_dir).await {
            Ok(meta) => {
                if !meta.is_dir() {
                    validation_errors.push(format!(
                        "FILE_REPO_ROOTDIR `{}` exists but is not a directory",
                        args.root,
                    ));
                }
            }
            Err(_) => match tokio::fs::create_dir_all(root_dir).await {
                Ok(()) => tracing::info!("Created directory: {}", args.root),
                Err(err) => validation_errors.push(format!(
                    "FILE_REPO_ROOTDIR `{}` could not be created: {err}",
                    args.root,
                )),
            },
        }

        if !Path::new(&args.firmware).exists() {
            tracing::warn!("firmware image `{}` does not exist yet", args.firmware);
        }

        if !validation_errors.is_empty() {
            return Err(validation_errors);
        }

        Ok(Config {
            host: args.host.clone(),
            port: args.port,
            root_dir: args.root.clone(),
            firmware_path: args.firmware.clone(),
            build_number_file: args.build_number_file.clone(),
            version_header: args.version_header.clone(),
        })
    }
}
