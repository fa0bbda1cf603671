use crate::utils::{
    error::{Error, Result},
    files::Sheet,
    models::{AirportRecord, ColumnLayout, Snapshot},
};

use log::{debug, info};

pub struct RowPatcher {
    layout: ColumnLayout,
}

impl RowPatcher {
    pub fn new(layout: ColumnLayout) -> Self {
        Self { layout }
    }

    /// 只改写切换日期两列，返回是否改动了这一行
    pub fn patch(&self, row: &mut Vec<String>, record: &AirportRecord) -> bool {
        let (start, end) = match record.transition_dates.as_slice() {
            [] => return false,
            // 这一年取消或开始实行夏令时，只有一个日期
            [start] => (start, None),
            [start, end, ..] => (start, Some(end)),
        };
        if row.len() < self.layout.patch_width() {
            row.resize(self.layout.patch_width(), String::new());
        }
        row[self.layout.transition_start] = start.clone();
        if let Some(end) = end {
            row[self.layout.transition_end] = end.clone();
        }
        true
    }

    /// 用数据库里的日期更新整个表格。表格里的代码在数据库里不存在时直接报错。
    pub fn patch_all(&self, sheet: &mut Sheet, snapshot: &Snapshot) -> Result<usize> {
        info!("正在更新表格中的夏令时信息...");
        let mut patched = 0;
        for row in sheet.rows.iter_mut() {
            let code = match self.layout.code(row) {
                Some(code) => code.to_string(),
                None => continue,
            };
            let record = snapshot
                .get(&code)
                .ok_or_else(|| Error::MissingRecord { code: code.clone() })?;
            if self.patch(row, record) {
                debug!("{} -> {:?}", code, record.transition_dates);
                patched += 1;
            }
        }
        info!("共更新{}行", patched);
        Ok(patched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|cell| cell.to_string()).collect()
    }

    fn record(code: &str, dates: &[&str]) -> AirportRecord {
        AirportRecord {
            code: code.into(),
            name: String::new(),
            timezone: None,
            latitude: String::new(),
            longitude: String::new(),
            offsets: None,
            transition_dates: dates.iter().map(|date| date.to_string()).collect(),
        }
    }

    fn existing() -> Vec<String> {
        row(&["JFK", "Kennedy", "", "40.6", "-73.7", "", "old-start", "old-end"])
    }

    #[test]
    fn no_dates_leaves_row_untouched() {
        let mut target = existing();
        let patcher = RowPatcher::new(ColumnLayout::default());
        assert!(!patcher.patch(&mut target, &record("JFK", &[])));
        assert_eq!(target, existing());
    }

    #[test]
    fn one_date_sets_start_only() {
        let mut target = existing();
        let patcher = RowPatcher::new(ColumnLayout::default());
        assert!(patcher.patch(&mut target, &record("JFK", &["27/03/16"])));
        assert_eq!(target[6], "27/03/16");
        assert_eq!(target[7], "old-end");
    }

    #[test]
    fn two_dates_set_both_in_order() {
        let mut target = existing();
        let patcher = RowPatcher::new(ColumnLayout::default());
        patcher.patch(&mut target, &record("JFK", &["14/03/21", "07/11/21"]));
        assert_eq!(target[6], "14/03/21");
        assert_eq!(target[7], "07/11/21");
        assert_eq!(target[..6], existing()[..6]);
    }

    #[test]
    fn short_row_is_widened() {
        let mut target = row(&["JFK", "Kennedy"]);
        let patcher = RowPatcher::new(ColumnLayout::default());
        patcher.patch(&mut target, &record("JFK", &["14/03/21", "07/11/21"]));
        assert_eq!(target.len(), 8);
        assert_eq!(target[7], "07/11/21");
    }

    #[test]
    fn patch_all_skips_blank_codes_and_counts_changes() {
        let mut sheet = Sheet {
            header: row(&["iata"]),
            rows: vec![existing(), row(&["", "blank"]), row(&["NRT", "Narita"])],
        };
        let snapshot: Snapshot = [record("JFK", &["14/03/21", "07/11/21"]), record("NRT", &[])]
            .into_iter()
            .map(|record| (record.code.clone(), record))
            .collect();

        let patched = RowPatcher::new(ColumnLayout::default())
            .patch_all(&mut sheet, &snapshot)
            .unwrap();
        assert_eq!(patched, 1);
        assert_eq!(sheet.rows[0][6], "14/03/21");
        assert_eq!(sheet.rows[1], row(&["", "blank"]));
        assert_eq!(sheet.rows[2], row(&["NRT", "Narita"]));
    }

    #[test]
    fn code_missing_from_store_is_fatal() {
        let mut sheet = Sheet {
            header: Vec::new(),
            rows: vec![existing()],
        };
        let err = RowPatcher::new(ColumnLayout::default())
            .patch_all(&mut sheet, &Snapshot::new())
            .unwrap_err();
        assert!(matches!(err, Error::MissingRecord { ref code } if code == "JFK"));
    }
}
