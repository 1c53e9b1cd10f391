//! Centralized directory structure management for blockdeck
//!
//! Directory layout:
//! ```text
//! blockdeck_data/
//! ├── data/       # SQLite database
//! └── uploads/    # Uploaded assets, served under /uploads
//! ```

use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Get the BLOCKDECK_ROOT directory from environment or default
pub fn root() -> PathBuf {
    if let Ok(val) = std::env::var("BLOCKDECK_ROOT") {
        return PathBuf::from(val);
    }
    PathBuf::from("blockdeck_data")
}

/// SQLite database directory
pub fn data_dir() -> PathBuf {
    root().join("data")
}

/// Uploaded asset directory
pub fn uploads_dir() -> PathBuf {
    root().join("uploads")
}

/// Create the directory structure, returning the root.
pub fn init_structure() -> anyhow::Result<PathBuf> {
    let root = root();
    fs::create_dir_all(data_dir())?;
    fs::create_dir_all(uploads_dir())?;
    info!("Initialized storage at {:?}", root);
    Ok(root)
}
