use crate::core::aggregator::SupportAggregator;
use crate::core::{report, upload_db};
use crate::models::Settings;
use anyhow::{anyhow, Context, Result};
use std::io::Write;
use std::path::Path;
use std::time::Instant;

/// Prints the daily upload counts and the capability support tables for `db_path`.
pub fn show_support(
    db_path: &Path,
    settings: &Settings,
    out: &mut impl Write,
) -> Result<SupportAggregator> {
    let conn = upload_db::open_read_conn(db_path).map_err(|e| anyhow!(e))?;
    upload_db::ensure_upload_table(&conn).map_err(|e| anyhow!(e))?;

    for client in &settings.client_types {
        let start = Instant::now();
        let days = upload_db::load_daily_upload_counts(&conn, &client.cli_type)
            .map_err(|e| anyhow!(e))
            .with_context(|| format!("daily upload counts for cli_type {}", client.cli_type))?;
        // Daily sections are headed by the raw cli_type; labels are used for the category tables.
        report::write_daily_counts(out, &client.cli_type, &days, start.elapsed())
            .context("Failed to write daily counts")?;
    }

    let start = Instant::now();
    let mut agg = SupportAggregator::new(settings);
    let scanned = upload_db::scan_upload_records(&conn, |record| agg.fold_record(record))
        .map_err(|e| anyhow!(e))?;
    drop(conn);

    log::info!(
        "scanned {} uploads, {} with configuration, {} unparseable",
        scanned,
        agg.all.uploads,
        agg.malformed_uploads()
    );

    write_summary(out, &agg).context("Failed to write support report")?;
    writeln!(out, "{}", report::format_elapsed(start.elapsed()))?;
    Ok(agg)
}

fn write_summary(out: &mut impl Write, agg: &SupportAggregator) -> std::io::Result<()> {
    report::write_totals(out, agg.total_devices, agg.all.uploads)?;
    report::write_segment(out, &agg.all)?;
    for segment in &agg.segments {
        report::write_segment(out, segment)?;
    }
    Ok(())
}
