//! Whole-file writes through a `.part` sibling.

use super::temp_path;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Write `data` to `final_path` atomically: the bytes go to `<final>.part`,
/// are synced, then renamed over the final name. A stale `.part` from an
/// interrupted run is truncated. An existing file at `final_path` is replaced.
pub fn write_atomic(final_path: &Path, data: &[u8]) -> io::Result<()> {
    let tmp = temp_path(final_path);
    let result = write_and_sync(&tmp, data).and_then(|()| std::fs::rename(&tmp, final_path));
    if result.is_err() {
        let _ = std::fs::remove_file(&tmp);
    }
    result
}

fn write_and_sync(path: &Path, data: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data)?;
    file.sync_all()
}
