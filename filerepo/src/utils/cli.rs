use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Listening host
    #[arg(long, env = "FILE_REPO_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Listening port
    #[arg(short, long, env = "FILE_REPO_PORT", default_value_t = 5000)]
    pub port: u16,

    /// Directory holding the managed files, created if absent
    #[arg(long, env = "FILE_REPO_ROOTDIR", default_value = "managed_files")]
    pub root: String,

    /// Firmware image served on `/firmware.bin`
    #[arg(
        long,
        env = "FILE_REPO_FIRMWARE",
        default_value = ".pio/build/esp-wrover-kit/firmware.bin"
    )]
    pub firmware: String,

    /// File holding the current build number
    #[arg(long, env = "FILE_REPO_BUILD_NUMBER_FILE", default_value = "versioning")]
    pub build_number_file: String,

    /// Header that may define `VERSION_SHORT`
    #[arg(
        long,
        env = "FILE_REPO_VERSION_HEADER",
        default_value = "include/version.h"
    )]
    pub version_header: String,
}
