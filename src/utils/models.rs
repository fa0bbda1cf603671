use std::collections::BTreeMap;

// 时区解析失败时，各字段统一使用的占位值
pub const NOT_AVAILABLE: &str = "NA";

/// 代码 -> 记录，整体保存、整体读取
pub type Snapshot = BTreeMap<String, AirportRecord>;

/// 有时区时才存在的偏移信息。标准偏移和夏令时秒数总是成对出现。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneOffsets {
    /// `±HH:MM:SS`，秒固定为 `00`
    pub standard: String,
    /// 夏令时调整量（不是总偏移），0 表示没有
    pub seasonal_seconds: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AirportRecord {
    pub code: String,
    pub name: String,
    pub timezone: Option<String>,
    pub latitude: String,
    pub longitude: String,
    pub offsets: Option<ZoneOffsets>,
    pub transition_dates: Vec<String>,
}

impl AirportRecord {
    pub fn timezone_text(&self) -> &str {
        self.timezone.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn standard_offset_text(&self) -> &str {
        match &self.offsets {
            Some(offsets) => &offsets.standard,
            None => NOT_AVAILABLE,
        }
    }

    pub fn seasonal_seconds_text(&self) -> String {
        match &self.offsets {
            Some(offsets) if offsets.seasonal_seconds != 0 => offsets.seasonal_seconds.to_string(),
            _ => String::new(),
        }
    }
}

/// 表格中各字段所在的列（从0开始），第一行是表头
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub code: usize,
    pub name: usize,
    pub latitude: usize,
    pub longitude: usize,
    pub transition_start: usize,
    pub transition_end: usize,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            code: 0,
            name: 1,
            latitude: 3,
            longitude: 4,
            transition_start: 6,
            transition_end: 7,
        }
    }
}

impl ColumnLayout {
    // 原样返回单元格文本，超出行长度的单元格视为空
    pub fn cell<'a>(&self, row: &'a [String], column: usize) -> &'a str {
        row.get(column).map(String::as_str).unwrap_or("")
    }

    pub fn code<'a>(&self, row: &'a [String]) -> Option<&'a str> {
        Some(self.cell(row, self.code).trim()).filter(|code| !code.is_empty())
    }

    // 补丁阶段需要的最小列数
    pub fn patch_width(&self) -> usize {
        self.code.max(self.transition_start).max(self.transition_end) + 1
    }
}
