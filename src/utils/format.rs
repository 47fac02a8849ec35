use std::time::Duration;

/// 格式化耗时 (例如: "850ms", "12.40s", "3m 5s")
pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    let seconds = duration.as_secs();

    match seconds {
        0 => format!("{}ms", millis),
        1..=59 => format!("{:.2}s", duration.as_secs_f64()),
        _ => format!("{}m {}s", seconds / 60, seconds % 60),
    }
}

/// 按指定小数位数格式化百分数，不带 `%`
pub fn format_percent(value: f64, precision: usize) -> String {
    format!("{:.*}", precision, value)
}
