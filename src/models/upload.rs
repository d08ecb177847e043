use chrono::NaiveDate;

/// One row of `upload_statistics_cli_cfg` as seen by the scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadRecord {
    pub configuration_info: String,
    pub cli_type: String,
}

impl UploadRecord {
    pub fn new(cli_type: &str, configuration_info: &str) -> Self {
        Self {
            configuration_info: configuration_info.to_string(),
            cli_type: cli_type.to_string(),
        }
    }

    pub fn has_configuration(&self) -> bool {
        !self.configuration_info.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyUploadCount {
    /// `DATE(time)` as returned by sqlite; empty when `time` is not a date.
    pub date_key: String,
    pub date: Option<NaiveDate>,
    pub count: u64,
}

impl DailyUploadCount {
    pub fn new(date_key: String, count: u64) -> Self {
        let date = NaiveDate::parse_from_str(&date_key, "%Y-%m-%d").ok();
        Self {
            date_key,
            date,
            count,
        }
    }
}
