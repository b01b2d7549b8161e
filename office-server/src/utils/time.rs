//! 时间工具函数: UTC 日历日转换
//!
//! 所有日期→时间戳转换统一在 API handler 层完成，
//! repository 层只接收 `i64` Unix millis。
//!
//! 考勤/工资周期边界一律按 UTC 日历日计算；UTC 之外时区的
//! 组织本地日界尚未处理 (见 DESIGN.md)。

use chrono::{Datelike, NaiveDate, TimeZone, Utc};

use super::{AppError, AppResult};

/// 解析日期字符串 (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// 当前时刻 Unix millis
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// 今天的日期 (UTC)
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// 日期开始 (00:00:00 UTC) → Unix millis
pub fn day_start_millis(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc().timestamp_millis())
        .unwrap_or_default()
}

/// 日期结束 → 次日 00:00:00 UTC 的 Unix millis
///
/// 返回次日零点时间戳，调用方使用 `< end` (不含) 语义。
pub fn day_end_millis(date: NaiveDate) -> i64 {
    let next_day = date.succ_opt().unwrap_or(date);
    day_start_millis(next_day)
}

/// 任意时刻 → 所在 UTC 日历日 00:00:00 的 Unix millis
pub fn normalize_day_millis(millis: i64) -> i64 {
    Utc.timestamp_millis_opt(millis)
        .single()
        .map(|dt| day_start_millis(dt.date_naive()))
        .unwrap_or(millis)
}

/// 枚举 [from, to] 范围内每个日历日的零点 millis (含两端)
///
/// `from > to` 时返回空序列。
pub fn enumerate_days(from: NaiveDate, to: NaiveDate) -> Vec<i64> {
    let mut days = Vec::new();
    let mut current = from;
    while current <= to {
        days.push(day_start_millis(current));
        match current.succ_opt() {
            Some(next) => current = next,
            None => break,
        }
    }
    days
}

/// 月份周期 → `[start, end)` Unix millis 区间
///
/// `month` 取 1-12，`end` 为次月 1 日零点 (不含)。
pub fn month_range(year: i32, month: u32) -> AppResult<(i64, i64)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AppError::validation(format!("Invalid period: {}-{}", year, month)))?;
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let end = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .ok_or_else(|| AppError::validation(format!("Invalid period: {}-{}", year, month)))?;
    Ok((day_start_millis(start), day_start_millis(end)))
}

/// Unix millis → 所在月份 (year, month)，仅用于展示
pub fn millis_to_year_month(millis: i64) -> Option<(i32, u32)> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .map(|dt| (dt.year(), dt.month()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2025-03-01").unwrap(), date(2025, 3, 1));
        assert!(parse_date("03/01/2025").is_err());
        assert!(parse_date("2025-13-01").is_err());
    }

    #[test]
    fn test_day_bounds_are_exclusive_end() {
        let d = date(2025, 3, 1);
        let start = day_start_millis(d);
        let end = day_end_millis(d);
        assert_eq!(end - start, 24 * 60 * 60 * 1000);
        assert_eq!(end, day_start_millis(date(2025, 3, 2)));
    }

    #[test]
    fn test_normalize_day_millis() {
        let noon = day_start_millis(date(2025, 3, 1)) + 12 * 60 * 60 * 1000;
        assert_eq!(normalize_day_millis(noon), day_start_millis(date(2025, 3, 1)));
        // already-midnight input is a fixed point
        let midnight = day_start_millis(date(2025, 3, 1));
        assert_eq!(normalize_day_millis(midnight), midnight);
    }

    #[test]
    fn test_enumerate_days() {
        let days = enumerate_days(date(2025, 2, 27), date(2025, 3, 2));
        assert_eq!(days.len(), 4);
        assert_eq!(days[0], day_start_millis(date(2025, 2, 27)));
        assert_eq!(days[3], day_start_millis(date(2025, 3, 2)));

        assert!(enumerate_days(date(2025, 3, 2), date(2025, 3, 1)).is_empty());
        assert_eq!(enumerate_days(date(2025, 3, 1), date(2025, 3, 1)).len(), 1);
    }

    #[test]
    fn test_month_range() {
        let (start, end) = month_range(2025, 2).unwrap();
        assert_eq!(start, day_start_millis(date(2025, 2, 1)));
        assert_eq!(end, day_start_millis(date(2025, 3, 1)));

        let (start, end) = month_range(2024, 12).unwrap();
        assert_eq!(start, day_start_millis(date(2024, 12, 1)));
        assert_eq!(end, day_start_millis(date(2025, 1, 1)));

        assert!(month_range(2025, 13).is_err());
    }
}
