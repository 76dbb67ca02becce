use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;
use log::{debug, info, warn};
use crate::config::settings::Settings;
use crate::service::traits::i_service::TextConverter;

/// 原樣輸出，用於測試與試跑
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityConverter;

impl TextConverter for IdentityConverter {
    fn convert(&self, text: &str, _config: &str, _punctuation: bool) -> String {
        text.to_string()
    }
}

#[derive(Debug, Default)]
struct Dictionary {
    entries: HashMap<String, String>,
    max_chars: usize,
}

impl Dictionary {
    fn insert(&mut self, key: String, value: String) {
        self.max_chars = self.max_chars.max(key.chars().count());
        self.entries.insert(key, value);
    }

    /// 從 `chars[i]` 開始找最長的詞，回傳（消耗字元數, 替換文字）
    fn longest_match<'a>(&'a self, text: &str, chars: &[(usize, char)], i: usize) -> Option<(usize, &'a str)> {
        let start = chars[i].0;
        let longest = self.max_chars.min(chars.len() - i);
        (1..=longest).rev().find_map(|len| {
            let end = chars.get(i + len).map_or(text.len(), |(idx, _)| *idx);
            self.entries.get(&text[start..end]).map(|v| (len, v.as_str()))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PunctuationDirection {
    Forward,
    Reverse,
}

fn punctuation_direction(config: &str) -> Option<PunctuationDirection> {
    let lowered = config.to_ascii_lowercase();
    let (source, target) = lowered.split_once('2')?;
    if target.starts_with('s') {
        Some(PunctuationDirection::Reverse)
    } else if source.starts_with('s') {
        Some(PunctuationDirection::Forward)
    } else {
        None
    }
}

/// 以詞典做最長匹配替換的轉換器。
///
/// 每個轉換設定各有一份詞典（OpenCC 文字格式：`詞<TAB>候選 [其他候選…]`），
/// 只取第一個候選。標點對應來自設定檔，轉為繁體時正向套用，轉為簡體時反向套用。
#[derive(Debug, Default)]
pub struct DictionaryConverter {
    dictionaries: HashMap<String, Dictionary>,
    forward_punctuation: HashMap<char, char>,
    reverse_punctuation: HashMap<char, char>,
}

impl DictionaryConverter {
    pub fn new(settings: &Settings) -> Self {
        let mut converter = DictionaryConverter::default();
        for (from, to) in &settings.punctuations {
            let mut from_chars = from.chars();
            let mut to_chars = to.chars();
            match (from_chars.next(), from_chars.next(), to_chars.next(), to_chars.next()) {
                (Some(f), None, Some(t), None) => {
                    converter.forward_punctuation.insert(f, t);
                    converter.reverse_punctuation.insert(t, f);
                }
                _ => warn!("忽略非單一字元的標點對應：{} -> {}", from, to),
            }
        }
        converter
    }

    pub fn add_entries<I, K, V>(&mut self, config: &str, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let dictionary = self.dictionaries.entry(config.to_string()).or_default();
        for (key, value) in entries {
            let key = key.into();
            if !key.is_empty() {
                dictionary.insert(key, value.into());
            }
        }
    }

    /// 載入 OpenCC 文字格式的詞典檔，回傳載入的詞條數
    pub fn load_dictionary(&mut self, config: &str, path: &Path) -> io::Result<usize> {
        let text = fs::read_to_string(path)?;
        let entries: Vec<(String, String)> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| {
                let (key, candidates) = line.split_once('\t')?;
                let value = candidates.split_whitespace().next()?;
                Some((key.trim().to_string(), value.to_string()))
            })
            .collect();
        let count = entries.len();
        self.add_entries(config, entries);
        info!("載入詞典 {}（{}），共 {} 個詞條", path.display(), config, count);
        Ok(count)
    }

    fn punctuation_table(&self, config: &str) -> Option<&HashMap<char, char>> {
        match punctuation_direction(config)? {
            PunctuationDirection::Forward => Some(&self.forward_punctuation),
            PunctuationDirection::Reverse => Some(&self.reverse_punctuation),
        }
    }
}

impl TextConverter for DictionaryConverter {
    fn convert(&self, text: &str, config: &str, punctuation: bool) -> String {
        let dictionary = self.dictionaries.get(config).filter(|d| !d.entries.is_empty());
        let punct = if punctuation { self.punctuation_table(config) } else { None };
        if dictionary.is_none() && punct.is_none() {
            debug!("設定 {} 沒有詞典或標點規則，文字保持不變", config);
            return text.to_string();
        }

        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let mut out = String::with_capacity(text.len());
        let mut i = 0;
        while i < chars.len() {
            if let Some((consumed, value)) = dictionary.and_then(|d| d.longest_match(text, &chars, i)) {
                out.push_str(value);
                i += consumed;
                continue;
            }
            let c = chars[i].1;
            out.push(punct.and_then(|p| p.get(&c)).copied().unwrap_or(c));
            i += 1;
        }
        out
    }
}
