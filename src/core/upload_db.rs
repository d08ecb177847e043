use crate::models::{DailyUploadCount, UploadRecord};
use rusqlite::{params, Connection, OpenFlags};
use std::path::Path;
use std::time::Duration;

pub const UPLOAD_TABLE: &str = "upload_statistics_cli_cfg";

pub fn open_read_conn(path: &Path) -> Result<Connection, String> {
    if !path.exists() {
        return Err(format!("Database file not found: {}", path.display()));
    }
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|e| format!("Failed to open sqlite db (read-only) {}: {}", path.display(), e))?;
    // The upload server may still be writing; wait briefly instead of failing on SQLITE_BUSY.
    let _ = conn.busy_timeout(Duration::from_secs(2));
    Ok(conn)
}

pub fn ensure_upload_table(conn: &Connection) -> Result<(), String> {
    let found: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
            params![UPLOAD_TABLE],
            |row| row.get(0),
        )
        .map_err(|e| format!("Failed to inspect sqlite schema: {}", e))?;
    if found == 0 {
        return Err(format!("Table {} not found", UPLOAD_TABLE));
    }
    Ok(())
}

/// Upload counts per calendar day for one client type, oldest first.
pub fn load_daily_upload_counts(
    conn: &Connection,
    cli_type: &str,
) -> Result<Vec<DailyUploadCount>, String> {
    let mut stmt = conn
        .prepare(
            r#"
SELECT DATE(time) AS date, COUNT(*) AS player_count
FROM upload_statistics_cli_cfg
WHERE cli_type = ?1
GROUP BY DATE(time)
ORDER BY DATE(time)
"#,
        )
        .map_err(|e| format!("Failed to prepare daily upload count query: {}", e))?;

    let rows = stmt
        .query_map(params![cli_type], |row| {
            Ok((row.get::<_, Option<String>>(0)?, row.get::<_, i64>(1)?))
        })
        .map_err(|e| format!("Failed to query daily upload counts: {}", e))?;

    let mut out = Vec::new();
    for row in rows {
        let (date_key, count) =
            row.map_err(|e| format!("Failed to read daily upload count row: {}", e))?;
        let day = DailyUploadCount::new(
            date_key.unwrap_or_default(),
            u64::try_from(count).unwrap_or(0),
        );
        if day.date.is_none() {
            log::warn!(
                "cli_type={} has {} uploads with an unparseable time ({:?})",
                cli_type,
                day.count,
                day.date_key
            );
        }
        out.push(day);
    }
    Ok(out)
}

/// Streams every upload row through `f` one at a time; returns the number of rows read.
pub fn scan_upload_records(
    conn: &Connection,
    mut f: impl FnMut(&UploadRecord),
) -> Result<u64, String> {
    let mut stmt = conn
        .prepare("SELECT configuration_info, cli_type FROM upload_statistics_cli_cfg")
        .map_err(|e| format!("Failed to prepare upload scan: {}", e))?;
    let mut rows = stmt
        .query([])
        .map_err(|e| format!("Failed to scan {}: {}", UPLOAD_TABLE, e))?;

    let mut scanned: u64 = 0;
    while let Some(row) = rows
        .next()
        .map_err(|e| format!("Failed to read {} row: {}", UPLOAD_TABLE, e))?
    {
        // NULL columns read as empty strings.
        let configuration_info: Option<String> = row
            .get(0)
            .map_err(|e| format!("Failed to read configuration_info: {}", e))?;
        let cli_type: Option<String> = row
            .get(1)
            .map_err(|e| format!("Failed to read cli_type: {}", e))?;

        f(&UploadRecord {
            configuration_info: configuration_info.unwrap_or_default(),
            cli_type: cli_type.unwrap_or_default(),
        });
        scanned = scanned.saturating_add(1);
    }
    Ok(scanned)
}


#[cfg(test)]
mod tests {
    use super::test_support::create_upload_db;
    use super::*;

    #[test]
    fn daily_counts_are_grouped_filtered_and_ordered() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("data.db");
        create_upload_db(
            &path,
            &[
                ("2024-03-02 10:00:00", Some("999"), Some("")),
                ("2024-03-01 23:59:59", Some("999"), Some("")),
                ("2024-03-02 08:00:00", Some("999"), Some("")),
                ("2024-03-01 12:00:00", Some("h5"), Some("")),
            ],
        );

        let conn = open_read_conn(&path).expect("open");
        ensure_upload_table(&conn).expect("table exists");

        let days = load_daily_upload_counts(&conn, "999").expect("daily counts");
        let summary: Vec<(&str, u64)> = days.iter().map(|d| (d.date_key.as_str(), d.count)).collect();
        assert_eq!(summary, vec![("2024-03-01", 1), ("2024-03-02", 2)]);
        assert!(days.iter().all(|d| d.date.is_some()));

        let h5 = load_daily_upload_counts(&conn, "h5").expect("h5 counts");
        assert_eq!(h5.len(), 1);
        assert!(load_daily_upload_counts(&conn, "nope").expect("empty").is_empty());
    }

    #[test]
    fn scan_visits_every_row_and_reads_nulls_as_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("data.db");
        create_upload_db(
            &path,
            &[
                ("2024-03-01 00:00:00", Some("999"), Some("{supports_ETC1: true}")),
                ("2024-03-01 00:00:00", None, None),
                ("not a time", Some("h5"), Some("")),
            ],
        );

        let conn = open_read_conn(&path).expect("open");
        let mut seen = Vec::new();
        let scanned = scan_upload_records(&conn, |r| seen.push(r.clone())).expect("scan");

        assert_eq!(scanned, 3);
        assert!(seen.contains(&UploadRecord::new("999", "{supports_ETC1: true}")));
        assert!(seen.contains(&UploadRecord::new("", "")));
        assert!(seen.contains(&UploadRecord::new("h5", "")));

        let h5 = load_daily_upload_counts(&conn, "h5").expect("h5 counts");
        assert_eq!(h5[0].date_key, "");
        assert_eq!(h5[0].date, None);
    }

    #[test]
    fn missing_file_or_table_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("missing.db");
        let err = open_read_conn(&missing).expect_err("missing file");
        assert!(err.contains("not found"));

        let empty = dir.path().join("empty.db");
        Connection::open(&empty)
            .and_then(|c| c.execute_batch("CREATE TABLE other(x INTEGER);"))
            .expect("create other table");
        let conn = open_read_conn(&empty).expect("open");
        let err = ensure_upload_table(&conn).expect_err("no table");
        assert!(err.contains(UPLOAD_TABLE));
    }
}
