use crate::utils::{
    error::Result,
    history::{load_zone, zone_history, DEFAULT_HORIZON_YEAR},
};

use log::warn;

pub const DATE_FORMAT: &str = "%d/%m/%y";

/// 找出某一年的夏令时切换日期（当地日期，`DD/MM/YY`），按时间顺序。
///
/// 年份按转换时刻的 UTC 年份文本比较，年底附近的转换可能被算到 UTC 所在的那一年。
/// 一年超过两次切换时只保留第一次和最后一次。
pub fn find(zone: &str, year: &str) -> Result<Vec<String>> {
    let tz = load_zone(zone)?;
    let until = year
        .parse::<i16>()
        .map(|year| year.max(DEFAULT_HORIZON_YEAR))
        .unwrap_or(DEFAULT_HORIZON_YEAR);

    let mut dates: Vec<String> = zone_history(&tz, until)
        .into_iter()
        .skip(1) // 第一条是时区最初的状态，不是切换
        .filter(|transition| transition.at.strftime("%Y").to_string() == year)
        .map(|transition| {
            transition
                .at
                .to_zoned(tz.clone())
                .strftime(DATE_FORMAT)
                .to_string()
        })
        .collect();

    if dates.len() > 2 {
        warn!(
            "{} 在{}年有{}次切换，只保留第一次和最后一次: {:?}",
            zone,
            year,
            dates.len(),
            dates
        );
        let last = dates.len() - 1;
        dates.drain(1..last);
    }
    Ok(dates)
}
