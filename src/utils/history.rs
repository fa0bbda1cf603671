use crate::utils::error::{Error, Result};

use jiff::{civil::Date, tz::TimeZone, Timestamp};

// 旧版 32 位时区数据只覆盖到这一年，之后的转换由规则推算
pub const DEFAULT_HORIZON_YEAR: i16 = 2037;

// 超过这个值的夏令时调整量一般是跨日期变更线造成的，不可信
const MAX_SEASONAL_SECONDS: i32 = 3 * 3600;

/// 时区历史上的一次状态切换（第一条是时区最初的状态）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneTransition {
    pub at: Timestamp,
    pub offset_seconds: i32,
    pub seasonal_seconds: i32,
    pub abbreviation: String,
}

struct LocalState {
    at: Timestamp,
    offset_seconds: i32,
    is_dst: bool,
    abbreviation: String,
}

pub fn load_zone(zone: &str) -> Result<TimeZone> {
    TimeZone::get(zone).map_err(|e| Error::timezone(zone, e))
}

// 某年1月1日 00:00 UTC；超出范围时用最大时间戳
pub fn year_start_utc(year: i16) -> Timestamp {
    Date::new(year, 1, 1)
        .and_then(|date| date.to_zoned(TimeZone::UTC))
        .map(|zoned| zoned.timestamp())
        .unwrap_or(Timestamp::MAX)
}

/// 按时间顺序列出时区最初的状态以及截止到 `until_year` 年底的所有转换
pub fn zone_history(tz: &TimeZone, until_year: i16) -> Vec<ZoneTransition> {
    let limit = year_start_utc(until_year.saturating_add(1));

    let initial = tz.to_offset_info(Timestamp::MIN);
    let mut states = vec![LocalState {
        at: Timestamp::MIN,
        offset_seconds: initial.offset().seconds(),
        is_dst: initial.dst().is_dst(),
        abbreviation: initial.abbreviation().to_string(),
    }];
    states.extend(
        tz.following(Timestamp::MIN)
            .take_while(|transition| transition.timestamp() < limit)
            .map(|transition| LocalState {
                at: transition.timestamp(),
                offset_seconds: transition.offset().seconds(),
                is_dst: transition.dst().is_dst(),
                abbreviation: transition.abbreviation().to_string(),
            }),
    );

    (0..states.len())
        .map(|i| ZoneTransition {
            at: states[i].at,
            offset_seconds: states[i].offset_seconds,
            seasonal_seconds: seasonal_delta(&states, i),
            abbreviation: states[i].abbreviation.clone(),
        })
        .collect()
}

// 夏令时状态相对于标准时间多出来的秒数，标准时间为0。
// 有的时区把冬季标成夏令时（负调整量，如都柏林、摩洛哥斋月），
// 这种情况按偏移较大的一方作为季节性状态，调整量取正数。
fn seasonal_delta(states: &[LocalState], index: usize) -> i32 {
    let state = &states[index];
    if state.is_dst {
        return dst_delta(states, index).abs();
    }

    let neighbours = [index.checked_sub(1), Some(index + 1)];
    neighbours
        .into_iter()
        .flatten()
        .filter(|&i| i < states.len() && states[i].is_dst && dst_delta(states, i) < 0)
        .map(|i| state.offset_seconds - states[i].offset_seconds)
        .find(|delta| *delta > 0)
        .unwrap_or(0)
}

// 夏令时状态与标准时间的偏移差，可能为负
fn dst_delta(states: &[LocalState], index: usize) -> i32 {
    let state = &states[index];
    let mut delta = states[..index]
        .iter()
        .rev()
        .find(|earlier| !earlier.is_dst)
        .map(|standard| state.offset_seconds - standard.offset_seconds)
        .unwrap_or(0);

    if delta <= 0 || delta > MAX_SEASONAL_SECONDS {
        // 往后找第一个能给出正数调整量的标准时间
        if let Some(later) = states[index + 1..]
            .iter()
            .filter(|later| !later.is_dst)
            .map(|standard| state.offset_seconds - standard.offset_seconds)
            .find(|later| *later > 0)
        {
            delta = later;
        }
    }
    delta
}
