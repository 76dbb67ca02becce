use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use log::{debug, warn};
use crate::models::format::SupportedFormat;
use crate::utils::utils::generate_random_suffix;

const MAX_CREATE_ATTEMPTS: usize = 8;

/// 單一請求獨占的暫存解壓目錄，Drop 時無條件刪除
#[derive(Debug)]
pub struct WorkingDir {
    path: PathBuf,
}

impl WorkingDir {
    /// 在 `root` 下建立 `<format>_temp_<隨機字串>`，名稱衝突時重試
    pub fn create(root: &Path, format: SupportedFormat) -> io::Result<Self> {
        fs::create_dir_all(root)?;
        for _ in 0..MAX_CREATE_ATTEMPTS {
            let path = root.join(format!("{}_temp_{}", format, generate_random_suffix(16)));
            match fs::create_dir(&path) {
                Ok(()) => {
                    debug!("建立工作目錄：{}", path.display());
                    return Ok(WorkingDir { path });
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e),
            }
        }
        Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("無法在 {} 建立唯一的工作目錄", root.display()),
        ))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for WorkingDir {
    fn drop(&mut self) {
        if !self.path.exists() {
            return;
        }
        match fs::remove_dir_all(&self.path) {
            Ok(()) => debug!("已清除工作目錄：{}", self.path.display()),
            Err(e) => warn!("清除工作目錄 {} 失敗: {}", self.path.display(), e),
        }
    }
}
