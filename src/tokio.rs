//! Tokio async runtime integration for dat-rs.

use std::path::Path;

use tracing::debug;

use crate::reader::{Archive, ArchiveLocation, ArchiveReader};
use crate::Result;

/// Load an archive from a boards root directory.
///
/// The file is read from `{root}/{board}/dat/{file}.dat`, then decoded,
/// parsed and graphed by `reader`.
///
/// # Example
///
/// ```no_run
/// use dat_rs::reader::{ArchiveLocation, ArchiveReader};
/// use dat_rs::tokio::load_archive;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let location = ArchiveLocation::new("news", "1234567890")?;
/// let archive = load_archive("/srv/bbs", &location, ArchiveReader::new()).await?;
/// println!("{} posts", archive.len());
/// # Ok(())
/// # }
/// ```
pub async fn load_archive(
    root: impl AsRef<Path>,
    location: &ArchiveLocation,
    mut reader: ArchiveReader,
) -> Result<Archive> {
    let path = root.as_ref().join(location.relative_path());
    debug!(path = %path.display(), "reading dat archive");

    let data = tokio::fs::read(&path).await?;
    reader.feed_bytes(&data);
    reader.finish()
}
