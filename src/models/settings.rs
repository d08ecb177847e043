use serde::Deserialize;

pub const DEFAULT_CAPABILITIES: [&str; 13] = [
    "supports_ETC1",
    "supports_ETC2",
    "supports_PVRTC",
    "supports_ATITC",
    "supports_ASTC",
    "supports_S3TC",
    "supports_BGRA8888",
    "supports_NPOT",
    "supports_vertex_array_object",
    "supports_OES_depth24",
    "supports_OES_packed_depth_stencil",
    "supports_discard_framebuffer",
    "supports_OES_map_buffer",
];

const DEFAULT_ALL_LABEL: &str = "all";

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ClientType {
    pub cli_type: String,
    pub label: String,
}

impl ClientType {
    pub fn new(cli_type: &str, label: &str) -> Self {
        Self {
            cli_type: cli_type.to_string(),
            label: label.to_string(),
        }
    }
}

fn default_client_types() -> Vec<ClientType> {
    vec![ClientType::new("999", "999"), ClientType::new("h5", "H5")]
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub capabilities: Vec<String>,
    pub client_types: Vec<ClientType>,
    pub all_label: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            capabilities: DEFAULT_CAPABILITIES.iter().map(|s| s.to_string()).collect(),
            client_types: default_client_types(),
            all_label: DEFAULT_ALL_LABEL.to_string(),
        }
    }
}

fn normalize_capabilities(raw: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(raw.len());
    for name in raw {
        let trimmed = name.trim();
        if trimmed.is_empty() || out.iter().any(|v| v == trimmed) {
            continue;
        }
        out.push(trimmed.to_string());
    }
    if out.is_empty() {
        return Settings::default().capabilities;
    }
    out
}

fn normalize_client_types(raw: Vec<ClientType>) -> Vec<ClientType> {
    let mut out: Vec<ClientType> = Vec::with_capacity(raw.len());
    for ct in raw {
        // cli_type is matched exactly against the stored column, so only blank values are dropped.
        if ct.cli_type.is_empty() || out.iter().any(|v| v.cli_type == ct.cli_type) {
            continue;
        }
        let label = match ct.label.trim() {
            "" => ct.cli_type.clone(),
            l => l.to_string(),
        };
        out.push(ClientType {
            cli_type: ct.cli_type,
            label,
        });
    }
    if out.is_empty() {
        return default_client_types();
    }
    out
}

fn normalize_all_label(label: String) -> String {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        DEFAULT_ALL_LABEL.to_string()
    } else {
        trimmed.to_string()
    }
}

impl Settings {
    /// Trims and dedupes user supplied lists; an empty list falls back to the defaults.
    pub fn normalized(self) -> Self {
        Self {
            capabilities: normalize_capabilities(self.capabilities),
            client_types: normalize_client_types(self.client_types),
            all_label: normalize_all_label(self.all_label),
        }
    }
}
