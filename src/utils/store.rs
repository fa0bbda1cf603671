use crate::utils::{
    error::{Error, Result},
    models::{AirportRecord, Snapshot, ZoneOffsets, NOT_AVAILABLE},
};

use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use std::{collections::BTreeMap, fs, path::PathBuf};

pub const DEFAULT_STORE_PATH: &str = "airport-db.json";

// 文件里每条记录的顺序:
// [名称, 时区, 纬度, 经度, 标准偏移, 夏令时秒数, [切换日期]]
#[derive(Debug, Serialize, Deserialize)]
struct StoredEntry(String, Option<String>, String, String, String, String, Vec<String>);

impl From<&AirportRecord> for StoredEntry {
    fn from(record: &AirportRecord) -> Self {
        StoredEntry(
            record.name.clone(),
            record.timezone.clone(),
            record.latitude.clone(),
            record.longitude.clone(),
            record.standard_offset_text().to_string(),
            record.seasonal_seconds_text(),
            record.transition_dates.clone(),
        )
    }
}

impl StoredEntry {
    // 两个占位值总是一起出现；没有时区就不能有偏移和切换日期
    fn into_record(self, code: String) -> Result<AirportRecord> {
        let StoredEntry(name, timezone, latitude, longitude, standard, seasonal, transition_dates) =
            self;
        let timezone = timezone.filter(|zone| zone != NOT_AVAILABLE);

        if transition_dates.len() > 2 {
            return Err(Error::invalid_store(
                code,
                format!("切换日期最多两个，实际有{}个", transition_dates.len()),
            ));
        }

        let offsets = match &timezone {
            None => {
                if standard != NOT_AVAILABLE || !seasonal.is_empty() {
                    return Err(Error::invalid_store(code, "没有时区，但有偏移信息"));
                }
                if !transition_dates.is_empty() {
                    return Err(Error::invalid_store(code, "没有时区，但有切换日期"));
                }
                None
            }
            Some(_) => {
                if !is_offset_text(&standard) {
                    return Err(Error::invalid_store(
                        code,
                        format!("标准偏移 '{}' 不是 ±HH:MM:SS 格式", standard),
                    ));
                }
                let seasonal_seconds = match parse_seasonal(&seasonal) {
                    Some(seconds) => seconds,
                    None => {
                        return Err(Error::invalid_store(
                            code,
                            format!("夏令时秒数 '{}' 无效", seasonal),
                        ))
                    }
                };
                Some(ZoneOffsets {
                    standard,
                    seasonal_seconds,
                })
            }
        };

        Ok(AirportRecord {
            code,
            name,
            timezone,
            latitude,
            longitude,
            offsets,
            transition_dates,
        })
    }
}

// 空文本表示0，其余必须是正整数
fn parse_seasonal(text: &str) -> Option<i32> {
    if text.is_empty() {
        return Some(0);
    }
    text.parse::<i32>().ok().filter(|seconds| *seconds > 0)
}

fn is_offset_text(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 9
        && matches!(bytes[0], b'+' | b'-')
        && bytes[3] == b':'
        && bytes[6] == b':'
        && [1, 2, 4, 5, 7, 8].iter().all(|&i| bytes[i].is_ascii_digit())
}

/// 快照与文件内容之间的编码
pub trait SnapshotCodec {
    fn encode(&self, snapshot: &Snapshot) -> Result<String>;
    fn decode(&self, text: &str) -> Result<Snapshot>;
}

/// 单层: 文件内容就是缩进4格的 JSON 对象
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainCodec;

impl SnapshotCodec for PlainCodec {
    fn encode(&self, snapshot: &Snapshot) -> Result<String> {
        let entries: BTreeMap<&str, StoredEntry> = snapshot
            .iter()
            .map(|(code, record)| (code.as_str(), StoredEntry::from(record)))
            .collect();

        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        entries.serialize(&mut ser)?;
        Ok(String::from_utf8(buf)?)
    }

    fn decode(&self, text: &str) -> Result<Snapshot> {
        let entries: BTreeMap<String, StoredEntry> = serde_json::from_str(text)?;
        entries
            .into_iter()
            .map(|(code, entry)| entry.into_record(code.clone()).map(|record| (code, record)))
            .collect()
    }
}

/// 双层: 先按 `PlainCodec` 编码，再把这段文本整体作为一个 JSON 字符串写出。
/// 已有的数据库文件都是这个格式。
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvelopeCodec;

impl SnapshotCodec for EnvelopeCodec {
    fn encode(&self, snapshot: &Snapshot) -> Result<String> {
        let inner = PlainCodec.encode(snapshot)?;
        Ok(serde_json::to_string(&inner)?)
    }

    fn decode(&self, text: &str) -> Result<Snapshot> {
        let inner: String = serde_json::from_str(text)?;
        PlainCodec.decode(&inner)
    }
}

pub struct RecordStore {
    path: PathBuf,
    codec: Box<dyn SnapshotCodec>,
}

impl RecordStore {
    pub fn new<P, C>(path: P, codec: C) -> Self
    where
        P: Into<PathBuf>,
        C: SnapshotCodec + 'static,
    {
        Self {
            path: path.into(),
            codec: Box::new(codec),
        }
    }

    // 整体覆盖，中途失败可能留下不完整的文件
    pub fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let text = self.codec.encode(snapshot)?;
        fs::write(&self.path, text)?;
        info!("数据库已更新: {}（{}条）", self.path.display(), snapshot.len());
        Ok(())
    }

    pub fn load(&self) -> Result<Snapshot> {
        let text = fs::read_to_string(&self.path)?;
        let snapshot = self.codec.decode(&text)?;
        info!("读取数据库: {}（{}条）", self.path.display(), snapshot.len());
        Ok(snapshot)
    }

    // 找不到只记录日志，不算错误
    pub fn lookup(&self, code: &str) -> Result<Option<AirportRecord>> {
        let mut snapshot = self.load()?;
        let record = snapshot.remove(code);
        if record.is_none() {
            warn!("数据库中没有 '{}'", code);
        }
        Ok(record)
    }
}
