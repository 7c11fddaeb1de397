//! `#date{FMT}#` 的日期格式化
//!
//! FMT 使用 PHP `date()` 风格的单字母格式，例如 `Y-m-d H:i:s`。
//! 反斜杠转义下一个字符，其余未识别字符原样输出。
//! `e` 与 `T` 没有时区名可用，输出偏移量；`I` 只比较一月与七月的偏移量判断夏令时。

use chrono::{DateTime, Datelike, NaiveDate, Offset, TimeZone, Timelike};
use std::fmt::{Display, Write};

/// 按格式串格式化时间
pub fn format_date<Tz>(format: &str, dt: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = String::with_capacity(format.len() * 2);
    let mut chars = format.chars();

    while let Some(c) = chars.next() {
        // 写入 String 不会失败
        let _ = match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
                Ok(())
            }
            // 日
            'd' => write!(out, "{:02}", dt.day()),
            'D' => write!(out, "{}", dt.format("%a")),
            'j' => write!(out, "{}", dt.day()),
            'l' => write!(out, "{}", dt.format("%A")),
            'N' => write!(out, "{}", dt.weekday().number_from_monday()),
            'S' => write!(out, "{}", ordinal_suffix(dt.day())),
            'w' => write!(out, "{}", dt.weekday().num_days_from_sunday()),
            'z' => write!(out, "{}", dt.ordinal0()),
            // 周
            'W' => write!(out, "{:02}", dt.iso_week().week()),
            // 月
            'F' => write!(out, "{}", dt.format("%B")),
            'm' => write!(out, "{:02}", dt.month()),
            'M' => write!(out, "{}", dt.format("%b")),
            'n' => write!(out, "{}", dt.month()),
            't' => write!(out, "{}", days_in_month(dt.year(), dt.month())),
            // 年
            'L' => write!(out, "{}", u8::from(is_leap_year(dt.year()))),
            'o' => write!(out, "{}", dt.iso_week().year()),
            'Y' => write!(out, "{:04}", dt.year()),
            'y' => write!(out, "{:02}", dt.year().rem_euclid(100)),
            // 时间
            'a' => out.write_str(if dt.hour() < 12 { "am" } else { "pm" }),
            'A' => out.write_str(if dt.hour() < 12 { "AM" } else { "PM" }),
            'g' => write!(out, "{}", dt.hour12().1),
            'G' => write!(out, "{}", dt.hour()),
            'h' => write!(out, "{:02}", dt.hour12().1),
            'H' => write!(out, "{:02}", dt.hour()),
            'i' => write!(out, "{:02}", dt.minute()),
            's' => write!(out, "{:02}", dt.second()),
            'u' => write!(out, "{:06}", dt.timestamp_subsec_micros() % 1_000_000),
            'v' => write!(out, "{:03}", dt.timestamp_subsec_millis() % 1_000),
            'B' => write!(out, "{:03}", swatch_beat(dt.timestamp())),
            // 时区（本地时区没有名称，统一输出偏移量）
            'I' => write!(out, "{}", u8::from(is_dst(dt))),
            'e' | 'P' => write!(out, "{}", dt.format("%:z")),
            'T' => write!(out, "{}", dt.format("%Z")),
            'p' => {
                if dt.offset().fix().local_minus_utc() == 0 {
                    out.write_str("Z")
                } else {
                    write!(out, "{}", dt.format("%:z"))
                }
            }
            'O' => write!(out, "{}", dt.format("%z")),
            'Z' => write!(out, "{}", dt.offset().fix().local_minus_utc()),
            // 完整日期/时间
            'c' => write!(out, "{}", dt.format("%Y-%m-%dT%H:%M:%S%:z")),
            'r' => out.write_str(&dt.to_rfc2822()),
            'U' => write!(out, "{}", dt.timestamp()),
            other => {
                out.push(other);
                Ok(())
            }
        };
    }

    out
}

/// Swatch Internet Time，以 UTC+1 为基准，一天 1000 beat
fn swatch_beat(timestamp: i64) -> i64 {
    (timestamp + 3600).rem_euclid(86_400) * 1000 / 86_400
}

/// 偏移量大于当年一月与七月中较小的那个即视为夏令时
fn is_dst<Tz: TimeZone>(dt: &DateTime<Tz>) -> bool {
    let tz = dt.timezone();
    let offset_on = |month| {
        NaiveDate::from_ymd_opt(dt.year(), month, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|utc| tz.offset_from_utc_datetime(&utc).fix().local_minus_utc())
    };
    match (offset_on(1), offset_on(7)) {
        (Some(jan), Some(jul)) => dt.offset().fix().local_minus_utc() > jan.min(jul),
        _ => false,
    }
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (1, n) if n != 11 => "st",
        (2, n) if n != 12 => "nd",
        (3, n) if n != 13 => "rd",
        _ => "th",
    }
}

fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}

fn days_in_month(year: i32, month: u32) -> u32 {
    (28..=31)
        .rev()
        .find(|&day| NaiveDate::from_ymd_opt(year, month, day).is_some())
        .unwrap_or(28)
}
