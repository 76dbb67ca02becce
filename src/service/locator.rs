use std::path::{Path, PathBuf};
use log::{debug, warn};
use pathdiff::diff_paths;
use walkdir::WalkDir;
use crate::models::format::{FragmentRule, SupportedFormat};
use crate::models::fragment::FragmentSet;

/// 列出工作目錄中要轉換的片段（相對路徑）。
///
/// 固定規則只保留實際存在的檔案；掃描規則依檔名排序遞迴列舉。
/// 結果為空是正常情況，由呼叫端轉成「找不到片段」的結果。
pub fn locate(format: SupportedFormat, working_dir: &Path) -> FragmentSet {
    let paths = match format.fragment_rule() {
        FragmentRule::Static(parts) => parts
            .iter()
            .map(PathBuf::from)
            .filter(|relative| {
                let exists = working_dir.join(relative).is_file();
                if !exists {
                    debug!("{} 文件缺少 {}，略過", format, relative.display());
                }
                exists
            })
            .collect(),
        FragmentRule::Scan { root, include } => scan(working_dir, root, include),
    };
    debug!("{} 文件找到 {} 個片段", format, paths.len());
    FragmentSet::new(paths)
}

fn scan(working_dir: &Path, root: &str, include: fn(&Path) -> bool) -> Vec<PathBuf> {
    let scan_root = working_dir.join(root);
    if !scan_root.is_dir() {
        return Vec::new();
    }
    let mut paths = Vec::new();
    for entry in WalkDir::new(&scan_root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("掃描 {} 時發生錯誤: {}", scan_root.display(), e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(under_root) = diff_paths(entry.path(), &scan_root) else {
            continue;
        };
        if !include(&under_root) {
            continue;
        }
        if let Some(relative) = diff_paths(entry.path(), working_dir) {
            paths.push(relative);
        }
    }
    paths
}
