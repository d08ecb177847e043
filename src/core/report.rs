use crate::models::{DailyUploadCount, SegmentTally};
use std::io::{self, Write};
use std::time::Duration;

/// `33.33%` style percentage, or `None` when there is nothing to divide by.
pub fn format_percent(count: u64, denominator: u64) -> Option<String> {
    if denominator == 0 {
        return None;
    }
    Some(format!("{:.2}%", count as f64 / denominator as f64 * 100.0))
}

pub fn format_support_line(capability: &str, count: u64, denominator: u64) -> String {
    match format_percent(count, denominator) {
        Some(percent) => format!(
            "{}: {}/{} ({})   not-supported count:{}",
            capability,
            count,
            denominator,
            percent,
            denominator.saturating_sub(count)
        ),
        None => format!("{}: {}/{} (no data)", capability, count, denominator),
    }
}

pub fn format_elapsed(elapsed: Duration) -> String {
    format!("query time: {:.4}s", elapsed.as_secs_f64())
}

pub fn write_daily_counts(
    out: &mut impl Write,
    cli_type: &str,
    days: &[DailyUploadCount],
    elapsed: Duration,
) -> io::Result<()> {
    writeln!(out, "[{}]:", cli_type)?;
    for day in days {
        writeln!(out, "{} : {}", day.date_key, day.count)?;
    }
    writeln!(out, "{}", format_elapsed(elapsed))?;
    writeln!(out)?;
    Ok(())
}

pub fn write_totals(out: &mut impl Write, total_devices: u64, uploads: u64) -> io::Result<()> {
    writeln!(
        out,
        "total devices: {}, devices with client configuration: {}",
        total_devices, uploads
    )
}

pub fn write_segment(out: &mut impl Write, segment: &SegmentTally) -> io::Result<()> {
    writeln!(out, "category: {}, devices: {}", segment.label, segment.uploads)?;
    for entry in segment.counters.iter() {
        writeln!(
            out,
            "{}",
            format_support_line(&entry.name, entry.supported, segment.uploads)
        )?;
    }
    Ok(())
}
