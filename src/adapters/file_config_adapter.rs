//! INI configuration adapter.

use std::collections::HashMap;
use std::path::Path;

use configparser::ini::Ini;

use crate::domain::error::JournalError;
use crate::ports::config_port::ConfigPort;

type Sections = HashMap<String, HashMap<String, Option<String>>>;

/// A parsed INI document. Section and key names are case-insensitive and
/// values are trimmed.
#[derive(Debug)]
pub struct FileConfigAdapter {
    sections: Sections,
}

impl FileConfigAdapter {
    pub fn load(path: &Path) -> Result<Self, JournalError> {
        let mut ini = Ini::new();
        let sections = ini.load(path).map_err(|reason| JournalError::ConfigParse {
            file: path.display().to_string(),
            reason,
        })?;
        Ok(Self { sections })
    }

    pub fn parse(content: &str) -> Result<Self, JournalError> {
        let mut ini = Ini::new();
        let sections = ini
            .read(content.to_string())
            .map_err(|reason| JournalError::ConfigParse {
                file: "<inline>".to_string(),
                reason,
            })?;
        Ok(Self { sections })
    }

    fn value(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(&section.to_lowercase())?
            .get(&key.to_lowercase())?
            .as_deref()
            .map(str::trim)
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.value(section, key).map(str::to_string)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.value(section, key)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        match self.value(section, key).map(str::to_ascii_lowercase).as_deref() {
            Some("true" | "yes" | "1") => true,
            Some("false" | "no" | "0") => false,
            _ => default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn sections_and_keys_ignore_case() {
        let adapter = FileConfigAdapter::parse(
            "[Journal]\nStore = csv\ntrades_file =  /var/journal/trades.csv  \n",
        )
        .unwrap();
        assert_eq!(adapter.get_string("journal", "store").as_deref(), Some("csv"));
        assert_eq!(
            adapter.get_string("JOURNAL", "trades_file").as_deref(),
            Some("/var/journal/trades.csv")
        );
        assert_eq!(adapter.get_string("journal", "missing"), None);
        assert_eq!(adapter.get_string("nowhere", "store"), None);
    }

    #[test]
    fn unparseable_int_falls_back() {
        let adapter =
            FileConfigAdapter::parse("[analytics]\ntop_symbols = 7\nmax_trades = lots\n").unwrap();
        assert_eq!(adapter.get_int("analytics", "top_symbols", 5), 7);
        assert_eq!(adapter.get_int("analytics", "max_trades", 42), 42);
        assert_eq!(adapter.get_int("analytics", "recent_trades", 3), 3);
    }

    #[test]
    fn bools() {
        let adapter =
            FileConfigAdapter::parse("[report]\na = Yes\nb = 0\nc = maybe\n").unwrap();
        assert!(adapter.get_bool("report", "a", false));
        assert!(!adapter.get_bool("report", "b", true));
        assert!(adapter.get_bool("report", "c", true));
        assert!(!adapter.get_bool("report", "missing", false));
    }

    #[test]
    fn load_reads_file_and_reports_missing_ones() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[report]\ntemplate_path = /path/to/template.typ\n").unwrap();
        let adapter = FileConfigAdapter::load(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("report", "template_path").as_deref(),
            Some("/path/to/template.typ")
        );

        let err = FileConfigAdapter::load(Path::new("/nonexistent/journal.ini")).unwrap_err();
        assert!(matches!(err, JournalError::ConfigParse { file, .. } if file == "/nonexistent/journal.ini"));
    }
}
