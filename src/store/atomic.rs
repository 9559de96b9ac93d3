use std::path::Path;

use rand::Rng;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use super::StoreError;

/// Write `content` to `target` through a temp file in the same directory
/// followed by a rename, so readers see either the old file or the new one.
///
/// Temp names start with `.` and carry a random suffix; concurrent writers
/// to the same target never share a temp file.
pub async fn atomic_write(target: &Path, content: &[u8]) -> Result<(), StoreError> {
    let dir = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)
        .await
        .map_err(|e| StoreError::io("create_dir", dir, e))?;

    let file_name = target
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("record");
    let nonce: u64 = rand::rng().random();
    let temp = dir.join(format!(".{file_name}.{nonce:016x}.tmp"));

    if let Err(e) = write_synced(&temp, content).await {
        let _ = fs::remove_file(&temp).await;
        return Err(StoreError::io("write_temp", &temp, e));
    }

    if let Err(e) = fs::rename(&temp, target).await {
        let _ = fs::remove_file(&temp).await;
        return Err(StoreError::io("rename_temp", target, e));
    }

    Ok(())
}

async fn write_synced(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(content).await?;
    file.sync_all().await
}
