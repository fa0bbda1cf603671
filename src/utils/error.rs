use std::io;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Utf8(#[from] std::string::FromUtf8Error),
    // 时区标识无效，或者时区数据库里计算失败
    #[error("时区 '{zone}' 计算失败: {source}")]
    Timezone {
        zone: String,
        #[source]
        source: jiff::Error,
    },
    // 补丁阶段，表格里的代码在数据库中找不到
    #[error("数据库中找不到代码 '{code}'，请先重建数据库")]
    MissingRecord { code: String },
    #[error("第{row}行的坐标 '{value}' 不是有效的数字")]
    InvalidCoordinate { row: usize, value: String },
    // 数据库里的记录不满足字段之间的约束
    #[error("数据库记录 '{code}' 无效: {reason}")]
    InvalidStore { code: String, reason: String },
    #[error("时区替换表格式错误: {0}")]
    InvalidOverrides(String),
}

impl Error {
    pub fn invalid_store<C, R>(code: C, reason: R) -> Self
    where
        C: Into<String>,
        R: Into<String>,
    {
        Self::InvalidStore {
            code: code.into(),
            reason: reason.into(),
        }
    }

    pub fn timezone<S>(zone: S, source: jiff::Error) -> Self
    where
        S: Into<String>,
    {
        Self::Timezone {
            zone: zone.into(),
            source,
        }
    }
}
