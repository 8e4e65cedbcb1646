//! INI file configuration adapter.

use crate::domain::error::TickerTrackError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

#[derive(Debug)]
pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TickerTrackError> {
        let path = path.as_ref();
        let mut config = Ini::new();
        config
            .load(path)
            .map_err(|reason| TickerTrackError::ConfigParse {
                file: path.display().to_string(),
                reason,
            })?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }

    /// No sections at all; every lookup falls back to its default.
    pub fn empty() -> Self {
        Self { config: Ini::new() }
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.to_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Some(true),
            "false" | "no" | "off" | "0" => Some(false),
            _ => None,
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.config
            .get(section, key)
            .as_ref()
            .and_then(|v| Self::parse_bool(v))
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    const FULL_INI: &str = r#"
[extraction]
density_threshold = 3
ignore_words = SYMBOL, TICKER ,NAME
case_sensitive_subtokens = no

[sqlite]
path = /var/lib/tickertrack/positions.db
pool_size = 2

[quotes]
path = /srv/quotes

[ocr]
command = tesseract
"#;

    #[test]
    fn from_string_parses_all_sections() {
        let adapter = FileConfigAdapter::from_string(FULL_INI).unwrap();
        assert_eq!(
            adapter.get_string("sqlite", "path"),
            Some("/var/lib/tickertrack/positions.db".to_string())
        );
        assert_eq!(adapter.get_int("sqlite", "pool_size", 4), 2);
        assert_eq!(
            adapter.get_string("quotes", "path"),
            Some("/srv/quotes".to_string())
        );
        assert_eq!(adapter.get_int("extraction", "density_threshold", 2), 3);
        assert!(!adapter.get_bool("extraction", "case_sensitive_subtokens", true));
    }

    #[test]
    fn get_list_splits_and_trims() {
        let adapter = FileConfigAdapter::from_string(FULL_INI).unwrap();
        assert_eq!(
            adapter.get_list("extraction", "ignore_words"),
            Some(vec![
                "SYMBOL".to_string(),
                "TICKER".to_string(),
                "NAME".to_string()
            ])
        );
        assert_eq!(adapter.get_list("extraction", "missing"), None);
    }

    #[test]
    fn get_string_returns_none_for_missing_key() {
        let adapter = FileConfigAdapter::from_string("[sqlite]\npath = a.db\n").unwrap();
        assert_eq!(adapter.get_string("sqlite", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "key"), None);
    }

    #[test]
    fn get_int_returns_default_for_missing_or_non_numeric() {
        let adapter =
            FileConfigAdapter::from_string("[extraction]\nheader_scan_rows = abc\n").unwrap();
        assert_eq!(adapter.get_int("extraction", "header_scan_rows", 15), 15);
        assert_eq!(adapter.get_int("extraction", "missing", 42), 42);
    }

    #[test]
    fn get_bool_accepts_common_spellings() {
        let adapter = FileConfigAdapter::from_string(
            "[extraction]\na = true\nb = yes\nc = on\nd = 0\ne = maybe\n",
        )
        .unwrap();
        assert!(adapter.get_bool("extraction", "a", false));
        assert!(adapter.get_bool("extraction", "b", false));
        assert!(adapter.get_bool("extraction", "c", false));
        assert!(!adapter.get_bool("extraction", "d", true));
        assert!(adapter.get_bool("extraction", "e", true));
        assert!(!adapter.get_bool("extraction", "e", false));
    }

    #[test]
    fn empty_adapter_returns_defaults() {
        let adapter = FileConfigAdapter::empty();
        assert_eq!(adapter.get_string("sqlite", "path"), None);
        assert_eq!(adapter.get_int("extraction", "density_threshold", 2), 2);
    }

    #[test]
    fn from_file_reads_config() {
        let file = create_temp_config("[ocr]\ncommand = /usr/bin/tesseract\n");
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("ocr", "command"),
            Some("/usr/bin/tesseract".to_string())
        );
    }

    #[test]
    fn from_file_returns_config_parse_error_for_missing_file() {
        let result = FileConfigAdapter::from_file("/nonexistent/path/config.ini");
        assert!(matches!(
            result,
            Err(TickerTrackError::ConfigParse { file, .. }) if file.contains("config.ini")
        ));
    }
}
