//! CSV import limits.

use serde::{Deserialize, Serialize};

/// Lines longer than this are logged as suspicious.
const fn default_long_line_warn_chars() -> usize {
    5000
}

/// Upload body cap (10 MiB).
const fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ImportConfig {
    /// Character length above which an input line is reported with a warning.
    #[serde(default = "default_long_line_warn_chars")]
    pub long_line_warn_chars: usize,

    /// Maximum accepted size of a multipart upload, in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            long_line_warn_chars: default_long_line_warn_chars(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = ImportConfig::default();
        assert_eq!(config.long_line_warn_chars, 5000);
        assert_eq!(config.max_upload_bytes, 10_485_760);
    }
}
