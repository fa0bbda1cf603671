use crate::utils::{
    error::{Error, Result},
    files::Sheet,
    geo::{BoundaryLookup, GeoTimezoneResolver, TimezoneLookup},
    models::{AirportRecord, ColumnLayout, Snapshot},
    offset, transitions,
};

use log::{debug, info};

pub struct RecordBuilder<L = BoundaryLookup> {
    resolver: GeoTimezoneResolver<L>,
    layout: ColumnLayout,
}

impl<L: TimezoneLookup> RecordBuilder<L> {
    pub fn new(resolver: GeoTimezoneResolver<L>, layout: ColumnLayout) -> Self {
        Self { resolver, layout }
    }

    /// 由一行数据生成一条记录；没有代码的行跳过。`row_number` 只用于报错。
    pub fn build(
        &self,
        row: &[String],
        row_number: usize,
        year: &str,
    ) -> Result<Option<AirportRecord>> {
        let code = match self.layout.code(row) {
            Some(code) => code,
            None => return Ok(None),
        };
        // 坐标原样保存，只在解析时去掉空白
        let latitude = self.layout.cell(row, self.layout.latitude);
        let longitude = self.layout.cell(row, self.layout.longitude);

        let timezone = self.resolver.resolve(
            parse_coordinate(latitude.trim(), row_number)?,
            parse_coordinate(longitude.trim(), row_number)?,
        );
        let offsets = offset::compute(timezone.as_deref())?;
        let transition_dates = match &timezone {
            Some(zone) => transitions::find(zone, year)?,
            None => Vec::new(),
        };

        let record = AirportRecord {
            code: code.to_string(),
            name: self.layout.cell(row, self.layout.name).to_string(),
            timezone,
            latitude: latitude.to_string(),
            longitude: longitude.to_string(),
            offsets,
            transition_dates,
        };
        debug!(
            "{} | {} | {} | {} | {:?}",
            record.code,
            record.timezone_text(),
            record.standard_offset_text(),
            record.seasonal_seconds_text(),
            record.transition_dates
        );
        Ok(Some(record))
    }

    /// 对整个表格跑一遍，同一代码出现多次时以后面的为准
    pub fn build_all(&self, sheet: &Sheet, year: &str) -> Result<Snapshot> {
        info!("正在收集机场信息（{}年）...", year);
        let mut snapshot = Snapshot::new();
        for (index, row) in sheet.rows.iter().enumerate() {
            // 表头占第1行
            if let Some(record) = self.build(row, index + 2, year)? {
                snapshot.insert(record.code.clone(), record);
            }
        }
        info!("共生成{}条机场记录", snapshot.len());
        Ok(snapshot)
    }
}

fn parse_coordinate(value: &str, row: usize) -> Result<f64> {
    value
        .parse::<f64>()
        .ok()
        .filter(|coordinate| coordinate.is_finite())
        .ok_or_else(|| Error::InvalidCoordinate {
            row,
            value: value.to_string(),
        })
}
