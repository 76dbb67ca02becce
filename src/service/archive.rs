use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use log::{debug, info, warn};
use pathdiff::diff_paths;
use walkdir::WalkDir;
use zip::write::{SimpleFileOptions, ZipWriter};
use zip::{CompressionMethod, ZipArchive};
use crate::error::{ExtractError, PackError};
use crate::models::format::SupportedFormat;
use crate::utils::cancel::CancelToken;
use crate::utils::utils::format_file_size;

const MIMETYPE: &str = "mimetype";
const OPTIMAL_LEVEL: i64 = 9;

/// 將壓縮檔解到 `dest_dir`；無法開啟或格式錯誤都歸為解壓失敗
pub fn extract(archive_path: &Path, dest_dir: &Path) -> Result<(), ExtractError> {
    let file = File::open(archive_path).map_err(|source| ExtractError::Open {
        path: archive_path.to_path_buf(),
        source,
    })?;
    let mut archive = ZipArchive::new(file)?;
    let entries = archive.len();
    archive.extract(dest_dir)?;
    info!("解壓縮 {}，共 {} 個項目", archive_path.display(), entries);
    Ok(())
}

enum EntryKind {
    File,
    EmptyDir,
}

struct PackEntry {
    path: PathBuf,
    name: String,
    kind: EntryKind,
}

/// 依檔名排序收集工作目錄內的檔案與空目錄，項目名稱以 `/` 分隔且不含工作目錄本身
fn collect_entries(working_dir: &Path) -> io::Result<Vec<PackEntry>> {
    let mut entries = Vec::new();
    for entry in WalkDir::new(working_dir).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(io::Error::from)?;
        let Some(relative) = diff_paths(entry.path(), working_dir) else {
            continue;
        };
        let name = relative.to_string_lossy().replace('\\', "/").trim_start_matches("./").to_string();
        let kind = if entry.file_type().is_dir() {
            if fs::read_dir(entry.path())?.next().is_some() {
                continue;
            }
            EntryKind::EmptyDir
        } else {
            EntryKind::File
        };
        entries.push(PackEntry { path: entry.path().to_path_buf(), name, kind });
    }
    Ok(entries)
}

fn write_entry(
    zip: &mut ZipWriter<File>,
    entry: &PackEntry,
    options: SimpleFileOptions,
) -> Result<(), PackError> {
    match entry.kind {
        EntryKind::EmptyDir => {
            zip.add_directory(entry.name.as_str(), options)?;
        }
        EntryKind::File => {
            zip.start_file(entry.name.as_str(), options)?;
            let mut source = File::open(&entry.path)?;
            io::copy(&mut source, zip)?;
        }
    }
    Ok(())
}

fn write_archive(
    working_dir: &Path,
    format: SupportedFormat,
    dest: &Path,
    cancel: &CancelToken,
) -> Result<usize, PackError> {
    let entries = collect_entries(working_dir)?;
    let deflated = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(OPTIMAL_LEVEL));

    let mut zip = ZipWriter::new(File::create(dest)?);
    let mut written = 0;

    if format.requires_mimetype_first() {
        let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        let mimetype = PackEntry {
            path: working_dir.join(MIMETYPE),
            name: MIMETYPE.to_string(),
            kind: EntryKind::File,
        };
        write_entry(&mut zip, &mimetype, stored)?;
        written += 1;
    }

    for entry in &entries {
        if cancel.is_cancelled() {
            return Err(PackError::Cancelled);
        }
        if format.requires_mimetype_first() && entry.name == MIMETYPE {
            continue;
        }
        write_entry(&mut zip, entry, deflated)?;
        written += 1;
    }

    zip.finish()?;
    Ok(written)
}

/// 將工作目錄重新打包到 `dest`，已存在的檔案會被覆寫。
///
/// EPUB 的第一個項目一定是未壓縮的 `mimetype`；缺少時在建立輸出檔前就失敗。
/// 其他格式以最高壓縮等級打包整個目錄。失敗或取消時會刪除寫到一半的輸出檔。
pub fn repackage(
    working_dir: &Path,
    format: SupportedFormat,
    dest: &Path,
    cancel: &CancelToken,
) -> Result<(), PackError> {
    if format.requires_mimetype_first() && !working_dir.join(MIMETYPE).is_file() {
        return Err(PackError::MissingMimetype);
    }
    if cancel.is_cancelled() {
        return Err(PackError::Cancelled);
    }
    if dest.exists() {
        debug!("移除既有輸出檔：{}", dest.display());
        fs::remove_file(dest)?;
    }
    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    match write_archive(working_dir, format, dest, cancel) {
        Ok(written) => {
            let size = fs::metadata(dest).map(|m| m.len()).unwrap_or(0);
            info!("重新打包完成：{}（{}），共 {} 個項目", dest.display(), format_file_size(size), written);
            Ok(())
        }
        Err(e) => {
            if dest.exists() {
                if let Err(remove_err) = fs::remove_file(dest) {
                    warn!("刪除未完成的輸出檔 {} 失敗: {}", dest.display(), remove_err);
                }
            }
            Err(e)
        }
    }
}
