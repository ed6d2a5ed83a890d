pub const DEFAULT_UPSTREAM_URL: &str = "http://localhost:8001";
pub const DEFAULT_UPSTREAM_MODEL: &str = "private-gpt";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_STATIC_DIR: &str = "static";
pub const DEFAULT_INDEX_FILE: &str = "index.html";
pub const DEFAULT_LOG_DIR: &str = "logs";
pub const DEFAULT_LOG_LEVEL: &str = "info";

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 << 20;

pub const DEFAULT_SHORT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MEDIUM_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_LONG_TIMEOUT_SECS: u64 = 120;

pub fn default_allowed_extensions() -> Vec<String> {
    [
        "pdf", "docx", "doc", "txt", "md", "html", "csv", "json", "pptx", "ppt", "epub", "ipynb",
    ]
    .iter()
    .map(|ext| ext.to_string())
    .collect()
}
