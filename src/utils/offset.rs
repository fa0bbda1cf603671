use crate::utils::{
    error::{Error, Result},
    history::{load_zone, zone_history, DEFAULT_HORIZON_YEAR},
    models::{ZoneOffsets, NOT_AVAILABLE},
};

use jiff::civil::date;
use log::debug;

// 标准偏移统一取 2011-01-01 当地零点时的偏移
const REFERENCE_YEAR: i16 = 2011;

/// 时区 -> (标准偏移, 夏令时调整量)。没有时区时返回 None，对应 ("NA", "")。
pub fn compute(zone: Option<&str>) -> Result<Option<ZoneOffsets>> {
    let zone = match zone {
        Some(zone) if zone != NOT_AVAILABLE => zone,
        _ => return Ok(None),
    };
    let tz = load_zone(zone)?;

    let reference = date(REFERENCE_YEAR, 1, 1)
        .to_zoned(tz.clone())
        .map_err(|e| Error::timezone(zone, e))?;
    let standard = format_offset(reference.offset().seconds());

    // 取倒数第二条记录的夏令时调整量
    let history = zone_history(&tz, DEFAULT_HORIZON_YEAR);
    let seasonal_seconds = match history.len().checked_sub(2).map(|index| &history[index]) {
        Some(entry) => {
            debug!(
                "{} 倒数第二条记录: {} {}s (夏令时 {}s)",
                zone, entry.abbreviation, entry.offset_seconds, entry.seasonal_seconds
            );
            entry.seasonal_seconds
        }
        None => 0,
    };

    Ok(Some(ZoneOffsets {
        standard,
        seasonal_seconds,
    }))
}

// ±HH:MM:00，偏移里的秒数直接丢弃
pub fn format_offset(seconds: i32) -> String {
    let sign = if seconds < 0 { '-' } else { '+' };
    let seconds = seconds.unsigned_abs();
    format!("{}{:02}:{:02}:00", sign, seconds / 3600, seconds % 3600 / 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_offset_pads_and_signs() {
        assert_eq!(format_offset(-5 * 3600), "-05:00:00");
        assert_eq!(format_offset(0), "+00:00:00");
        assert_eq!(format_offset(5 * 3600 + 45 * 60), "+05:45:00");
        assert_eq!(format_offset(-(3 * 3600 + 30 * 60)), "-03:30:00");
        assert_eq!(format_offset(3600 + 15 * 60 + 7), "+01:15:00");
    }

    #[test]
    fn missing_zone_is_sentinel() {
        assert_eq!(compute(None).unwrap(), None);
        assert_eq!(compute(Some("NA")).unwrap(), None);
    }

    #[test]
    fn new_york() {
        let offsets = compute(Some("America/New_York")).unwrap().unwrap();
        assert_eq!(offsets.standard, "-05:00:00");
        assert_eq!(offsets.seasonal_seconds, 3600);
    }

    #[test]
    fn winter_flagged_as_dst_still_gives_positive_seconds() {
        let dublin = compute(Some("Europe/Dublin")).unwrap().unwrap();
        assert_eq!(dublin.standard, "+00:00:00");
        assert_eq!(dublin.seasonal_seconds, 3600);

        let casablanca = compute(Some("Africa/Casablanca")).unwrap().unwrap();
        assert_eq!(casablanca.seasonal_seconds, 3600);

        let london = compute(Some("Europe/London")).unwrap().unwrap();
        assert_eq!(london.seasonal_seconds, 3600);
    }

    #[test]
    fn southern_summer_is_used_for_reference() {
        // 1月1日悉尼处于夏令时
        let offsets = compute(Some("Australia/Sydney")).unwrap().unwrap();
        assert_eq!(offsets.standard, "+11:00:00");
    }

    #[test]
    fn repeated_calls_are_identical() {
        let first = compute(Some("Europe/London")).unwrap();
        let second = compute(Some("Europe/London")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn zone_without_transitions_has_no_seasonal_seconds() {
        let offsets = compute(Some("Etc/GMT+2")).unwrap().unwrap();
        assert_eq!(offsets.standard, "-02:00:00");
        assert_eq!(offsets.seasonal_seconds, 0);
    }

    #[test]
    fn unknown_zone_is_fatal() {
        assert!(matches!(compute(Some("Nowhere/Atlantis")), Err(Error::Timezone { .. })));
    }
}
