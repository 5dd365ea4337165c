use crate::db::log::audit_quiet;
use crate::errors::AppResult;
use crate::ui::messages::{confirm, info, success, warning};
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Copy the database to `dest_file`, optionally zipped.
    /// Returns the path written, or `None` if the user declined to overwrite.
    pub fn backup(db_path: &str, dest_file: &str, compress: bool) -> AppResult<Option<PathBuf>> {
        let src = Path::new(db_path);
        let dest = Path::new(dest_file);

        // 1️⃣ Check DB exists
        if !src.exists() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Database not found: {}", src.display()),
            )
            .into());
        }

        // 2️⃣ Ensure destination folder exists
        if let Some(parent) = dest.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        // ⛔ 2.5️⃣ If destination file exists → ask confirmation
        if dest.exists() {
            warning(format!("The file '{}' already exists.", dest.display()));
            if !confirm("Do you want to overwrite it?")? {
                warning("Backup cancelled by user.");
                return Ok(None);
            }
        }

        // 3️⃣ Copy database
        fs::copy(src, dest)?;
        success(format!("Backup created: {}", dest.display()));

        // 4️⃣ Optional compression
        let final_path = if compress {
            let compressed = compress_backup(dest)?;

            if compressed != dest {
                // remove uncompressed copy
                if let Err(e) = fs::remove_file(dest) {
                    warning(format!("Failed to remove uncompressed backup: {}", e));
                } else {
                    info(format!("Removed uncompressed backup: {}", dest.display()));
                }
            }

            compressed
        } else {
            dest.to_path_buf()
        };

        // 5️⃣ Log in DB
        if let Ok(conn) = Connection::open(src) {
            audit_quiet(
                &conn,
                "backup",
                &final_path.to_string_lossy(),
                if compress {
                    "Backup created and compressed"
                } else {
                    "Backup created"
                },
            );
        }

        Ok(Some(final_path))
    }
}

/// Compress a backup using .zip
fn compress_backup(path: &Path) -> AppResult<PathBuf> {
    let zip_path = path.with_extension("zip");
    let file = fs::File::create(&zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let entry = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "rworkhistory.sqlite".to_string());

    let mut f = fs::File::open(path)?;
    zip.start_file(entry, options)
        .map_err(std::io::Error::other)?;

    std::io::copy(&mut f, &mut zip)?;
    zip.finish().map_err(std::io::Error::other)?;

    info(format!("Compressed: {}", zip_path.display()));

    Ok(zip_path)
}
