/// Crate-level error types for cyrscan diagnostics.
use std::path::PathBuf;

/// Every error names the file it concerns so the diagnostic can be acted on
/// without rerunning under a debugger.
#[allow(clippy::error_impl_error, reason = "crate-internal error type in binary")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The replacer refuses to overwrite an earlier backup.
    #[error("backup already exists: {}", path.display())]
    BackupExists {
        /// Path of the existing `.bak` file.
        path: PathBuf,
    },

    /// The input file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// Underlying I/O error from the filesystem.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// Report serialization failed.
    #[error("json serialize: {0}")]
    JsonSer(
        /// The wrapped JSON error.
        #[from]
        serde_json::Error,
    ),

    /// The scanner pattern failed to compile.
    #[error("pattern: {0}")]
    Pattern(
        /// The wrapped regex error.
        #[from]
        regex::Error,
    ),

    /// The report to apply is missing or is not a valid JSON report.
    #[error("report unreadable: {}: {reason}", path.display())]
    ReportUnreadable {
        /// Path of the report that could not be loaded.
        path: PathBuf,
        /// Description of the read or parse failure.
        reason: String,
    },

    /// TOML deserialization of `.cyrscan.toml` failed.
    #[error("toml deserialize: {0}")]
    TomlDe(
        /// The wrapped TOML deserialization error.
        #[from]
        toml::de::Error,
    ),
}
