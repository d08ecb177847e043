use super::config_parser::{is_supported, parse_configuration, ParsedConfig};
use crate::models::{SegmentTally, Settings, UploadRecord};

/// Running support counters for one scan: every device with a configuration goes into
/// `all`, and additionally into the segment of its client type when one is configured.
#[derive(Debug, Clone)]
pub struct SupportAggregator {
    pub total_devices: u64,
    pub all: SegmentTally,
    pub segments: Vec<SegmentTally>,
    malformed: u64,
}

impl SupportAggregator {
    pub fn new(settings: &Settings) -> Self {
        let capabilities = settings.capabilities.as_slice();
        Self {
            total_devices: 0,
            all: SegmentTally::new(&settings.all_label, None, capabilities),
            segments: settings
                .client_types
                .iter()
                .map(|ct| SegmentTally::new(&ct.label, Some(ct.cli_type.as_str()), capabilities))
                .collect(),
            malformed: 0,
        }
    }

    pub fn fold_record(&mut self, record: &UploadRecord) {
        self.total_devices = self.total_devices.saturating_add(1);
        if !record.has_configuration() {
            return;
        }

        let parsed = parse_configuration(&record.configuration_info);
        if parsed.is_empty() {
            self.malformed = self.malformed.saturating_add(1);
            log::debug!(
                "configuration from cli_type={:?} yielded no entries: {:?}",
                record.cli_type,
                record.configuration_info
            );
        }

        fold_parsed(&mut self.all, &parsed);
        if let Some(seg) = self
            .segments
            .iter_mut()
            .find(|seg| seg.matches(&record.cli_type))
        {
            fold_parsed(seg, &parsed);
        }
    }

    pub fn segment(&self, cli_type: &str) -> Option<&SegmentTally> {
        self.segments.iter().find(|seg| seg.matches(cli_type))
    }

    /// Uploads that carried a configuration string but parsed to nothing.
    pub fn malformed_uploads(&self) -> u64 {
        self.malformed
    }
}

/// Counts one upload into `segment`; capabilities absent from `parsed` are unsupported.
pub fn fold_parsed(segment: &mut SegmentTally, parsed: &ParsedConfig) {
    segment.uploads = segment.uploads.saturating_add(1);
    segment
        .counters
        .add_supported(|name| is_supported(parsed, name));
}
