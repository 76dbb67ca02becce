use std::path::{Path, PathBuf};

/// 單一請求中要轉換的片段，路徑皆相對於工作目錄
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FragmentSet {
    paths: Vec<PathBuf>,
}

impl FragmentSet {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        FragmentSet { paths }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().map(PathBuf::as_path)
    }

    #[cfg(test)]
    pub fn contains(&self, relative: &Path) -> bool {
        self.paths.iter().any(|p| p == relative)
    }
}

impl<'a> IntoIterator for &'a FragmentSet {
    type Item = &'a PathBuf;
    type IntoIter = std::slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}
