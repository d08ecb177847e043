#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilityCount {
    pub name: String,
    pub supported: u64,
}

/// Per-capability support counters, kept in configured order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilityCounters {
    pub entries: Vec<CapabilityCount>,
}

impl CapabilityCounters {
    pub fn new<S: AsRef<str>>(capabilities: &[S]) -> Self {
        Self {
            entries: capabilities
                .iter()
                .map(|name| CapabilityCount {
                    name: name.as_ref().to_string(),
                    supported: 0,
                })
                .collect(),
        }
    }

    /// Bumps every capability for which `is_supported` answers true.
    pub fn add_supported(&mut self, mut is_supported: impl FnMut(&str) -> bool) {
        for entry in &mut self.entries {
            if is_supported(&entry.name) {
                entry.supported = entry.supported.saturating_add(1);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.supported)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CapabilityCount> {
        self.entries.iter()
    }
}

/// Counters plus the number of uploads folded into them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentTally {
    pub label: String,
    pub cli_type: Option<String>,
    pub uploads: u64,
    pub counters: CapabilityCounters,
}

impl SegmentTally {
    pub fn new<S: AsRef<str>>(label: &str, cli_type: Option<&str>, capabilities: &[S]) -> Self {
        Self {
            label: label.to_string(),
            cli_type: cli_type.map(|v| v.to_string()),
            uploads: 0,
            counters: CapabilityCounters::new(capabilities),
        }
    }

    pub fn matches(&self, cli_type: &str) -> bool {
        self.cli_type.as_deref() == Some(cli_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_supported_only_touches_matching_entries() {
        let mut counters = CapabilityCounters::new(&["A", "B"]);
        counters.add_supported(|name| name == "A");
        counters.add_supported(|name| name == "A");
        assert_eq!(counters.get("A"), Some(2));
        assert_eq!(counters.get("B"), Some(0));
        assert_eq!(counters.get("C"), None);
    }

    #[test]
    fn segment_keeps_configured_order_and_exact_cli_type() {
        let mut seg = SegmentTally::new("H5", Some("h5"), &["z_last", "a_first"]);
        seg.counters.add_supported(|_| true);

        let names: Vec<&str> = seg.counters.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["z_last", "a_first"]);
        assert_eq!(seg.counters.get("a_first"), Some(1));
        assert!(seg.matches("h5"));
        assert!(!seg.matches("H5"));
        assert!(!SegmentTally::new("all", None, &["a"]).matches(""));
    }
}
