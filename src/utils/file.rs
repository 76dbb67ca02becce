use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use jwalk::WalkDir;
use log::warn;
use crate::utils::utils::generate_random_suffix;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// 以 UTF-8 讀取文字檔，去除開頭的 BOM
pub fn read_utf8_text(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes);
    String::from_utf8(body.to_vec())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("{} 不是有效的 UTF-8: {}", path.display(), e)))
}

/// 以不含 BOM 的 UTF-8 覆寫檔案。
///
/// 先寫到同目錄的暫存檔再改名覆蓋，失敗時原檔保持不變。
pub fn write_utf8_text(path: &Path, text: &str) -> io::Result<()> {
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, format!("無效的檔案路徑: {}", path.display())))?;
    let temp = path.with_file_name(format!(
        ".{}.{}.tmp",
        file_name.to_string_lossy(),
        generate_random_suffix(8)
    ));
    let result = fs::write(&temp, text.as_bytes()).and_then(|()| fs::rename(&temp, path));
    if result.is_err() && temp.exists() {
        if let Err(e) = fs::remove_file(&temp) {
            warn!("刪除暫存檔 {} 失敗: {}", temp.display(), e);
        }
    }
    result
}

/// 待轉換的輸入檔，`relative` 為相對於所屬輸入根目錄的路徑
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub path: PathBuf,
    pub relative: PathBuf,
}

/// 展開輸入路徑：檔案直接收入，目錄遞迴收集其下所有檔案（排序後）。
///
/// 直接指定的檔案 `relative` 只有檔名；目錄下的檔案保留子目錄結構。
pub fn collect_input_files(inputs: &[PathBuf]) -> io::Result<Vec<InputFile>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_file() {
            let relative = input.file_name().map(PathBuf::from).unwrap_or_else(|| input.clone());
            files.push(InputFile { path: input.clone(), relative });
        } else if input.is_dir() {
            for entry in WalkDir::new(input).sort(true) {
                match entry {
                    Ok(entry) if entry.file_type().is_file() => {
                        let path = entry.path();
                        let relative = path
                            .strip_prefix(input)
                            .map(Path::to_path_buf)
                            .unwrap_or_else(|_| PathBuf::from(entry.file_name()));
                        files.push(InputFile { path, relative });
                    }
                    Ok(_) => {}
                    Err(e) => warn!("無法讀取 {} 中的項目: {}", input.display(), e),
                }
            }
        } else {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("輸入路徑 '{}' 不存在", input.display()),
            ));
        }
    }
    Ok(files)
}
