use crate::utils::error::{Error, Result};

use log::info;
use std::{collections::HashMap, fs, path::Path};

/// 已经改名或废弃的时区 -> 替换后的时区。
///
/// 边界数据更新不及时，新的改名需要手动加进来（或者用 `--overrides` 传入）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideTable {
    entries: HashMap<String, String>,
}

impl Default for OverrideTable {
    fn default() -> Self {
        Self::from_pairs([("Asia/Qostanay", "Asia/Qyzylorda")])
    }
}

impl OverrideTable {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(from, to)| (from.into(), to.into()))
                .collect(),
        }
    }

    // JSON 文件，格式: {"旧时区": "新时区", ...}
    pub fn from_json_file<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let text = fs::read_to_string(&path)?;
        let table = Self::from_json_str(&text)?;
        info!(
            "从{}读取了{}条时区替换规则",
            path.as_ref().display(),
            table.len()
        );
        Ok(table)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let entries: HashMap<String, String> = serde_json::from_str(text)
            .map_err(|e| Error::InvalidOverrides(e.to_string()))?;
        let blank = entries
            .iter()
            .find(|(from, to)| from.is_empty() || to.is_empty());
        if let Some((from, _)) = blank {
            return Err(Error::InvalidOverrides(format!("'{}' 的替换规则为空", from)));
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // 不在表里的时区原样返回
    pub fn apply(&self, zone: String) -> String {
        match self.entries.get(&zone) {
            Some(replacement) => replacement.clone(),
            None => zone,
        }
    }
}
