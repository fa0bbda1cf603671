use crate::utils::overrides::OverrideTable;

use log::debug;
use tzf_rs::Finder;

// 边界数据里海洋区域的命名前缀
const OCEAN_ZONE_PREFIX: &str = "Etc/";

/// 坐标 -> 时区名称的边界查找
pub trait TimezoneLookup {
    fn zone_at(&self, latitude: f64, longitude: f64) -> Option<String>;
}

/// 基于 tzf-rs 内置边界数据的查找
pub struct BoundaryLookup {
    finder: Finder,
}

impl BoundaryLookup {
    pub fn new() -> Self {
        Self {
            finder: Finder::new(),
        }
    }
}

impl Default for BoundaryLookup {
    fn default() -> Self {
        Self::new()
    }
}

impl TimezoneLookup for BoundaryLookup {
    fn zone_at(&self, latitude: f64, longitude: f64) -> Option<String> {
        // 注意 tzf-rs 的参数顺序是经度在前
        let name = self.finder.get_tz_name(longitude, latitude);
        if name.is_empty() || name.starts_with(OCEAN_ZONE_PREFIX) {
            return None;
        }
        Some(name.to_string())
    }
}

pub struct GeoTimezoneResolver<L = BoundaryLookup> {
    lookup: L,
    overrides: OverrideTable,
}

impl GeoTimezoneResolver<BoundaryLookup> {
    pub fn with_boundaries(overrides: OverrideTable) -> Self {
        Self::new(BoundaryLookup::new(), overrides)
    }
}

impl<L: TimezoneLookup> GeoTimezoneResolver<L> {
    pub fn new(lookup: L, overrides: OverrideTable) -> Self {
        Self { lookup, overrides }
    }

    // 找不到时区（比如在海上）返回 None，不算错误
    pub fn resolve(&self, latitude: f64, longitude: f64) -> Option<String> {
        let zone = self.lookup.zone_at(latitude, longitude)?;
        let zone = self.overrides.apply(zone);
        debug!("({}, {}) -> {}", latitude, longitude, zone);
        Some(zone)
    }
}
