//! Access log format module
//!
//! Supports multiple log formats:
//! - `default` (`<ISO-8601 timestamp> - <method> <uri>`)
//! - `common` (Common Log Format without status/size)
//! - `json` (JSON structured logging)
//! - Custom patterns with variables
//!
//! Entries are written when a request arrives, before it is dispatched, so
//! they carry no response information.

use chrono::{DateTime, SecondsFormat, Utc};

/// Access log entry describing an incoming request
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    /// Client address
    pub remote_addr: String,
    /// Arrival time
    pub time: DateTime<Utc>,
    /// HTTP method (GET, POST, etc.)
    pub method: String,
    /// Request target including the query string
    pub uri: String,
    /// HTTP version (1.0, 1.1)
    pub http_version: String,
}

impl AccessLogEntry {
    /// Create a new access log entry with current timestamp
    pub fn new(remote_addr: String, method: String, uri: String) -> Self {
        Self {
            remote_addr,
            time: Utc::now(),
            method,
            uri,
            http_version: "1.1".to_string(),
        }
    }

    /// Format the log entry according to the specified format
    pub fn format(&self, format: &str) -> String {
        match format {
            "default" => self.format_default(),
            "common" => self.format_common(),
            "json" => self.format_json(),
            custom => self.format_custom(custom),
        }
    }

    /// Millisecond-precision UTC timestamp, e.g. `2024-05-01T12:00:00.000Z`
    fn time_iso8601(&self) -> String {
        self.time.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    fn format_default(&self) -> String {
        format!("{} - {} {}", self.time_iso8601(), self.method, self.uri)
    }

    /// `$remote_addr - - [$time_local] "$request"`
    fn format_common(&self) -> String {
        format!(
            "{} - - [{}] \"{} {} HTTP/{}\"",
            self.remote_addr,
            self.time.format("%d/%b/%Y:%H:%M:%S %z"),
            self.method,
            self.uri,
            self.http_version,
        )
    }

    fn format_json(&self) -> String {
        serde_json::json!({
            "remote_addr": self.remote_addr,
            "time": self.time_iso8601(),
            "method": self.method,
            "uri": self.uri,
            "http_version": self.http_version,
        })
        .to_string()
    }

    /// Custom format with variable substitution
    ///
    /// Supported variables:
    /// - `$remote_addr` - Client address
    /// - `$time_local` - Time in Common Log Format
    /// - `$time_iso8601` - ISO 8601 timestamp
    /// - `$request` - Full request line ("METHOD /path HTTP/version")
    /// - `$request_method` - HTTP method
    /// - `$request_uri` - Request URI with query string
    fn format_custom(&self, pattern: &str) -> String {
        let request_line = format!("{} {} HTTP/{}", self.method, self.uri, self.http_version);

        // $request_* must be replaced before $request
        pattern
            .replace("$remote_addr", &self.remote_addr)
            .replace(
                "$time_local",
                &self.time.format("%d/%b/%Y:%H:%M:%S %z").to_string(),
            )
            .replace("$time_iso8601", &self.time_iso8601())
            .replace("$request_method", &self.method)
            .replace("$request_uri", &self.uri)
            .replace("$request", &request_line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn create_test_entry() -> AccessLogEntry {
        let mut entry = AccessLogEntry::new(
            "192.168.1.1:50000".to_string(),
            "GET".to_string(),
            "/api/users?page=1".to_string(),
        );
        entry.time = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        entry
    }

    #[test]
    fn test_format_default() {
        let entry = create_test_entry();
        assert_eq!(
            entry.format("default"),
            "2024-05-01T12:30:00.000Z - GET /api/users?page=1"
        );
    }

    #[test]
    fn test_format_common() {
        let entry = create_test_entry();
        let log = entry.format("common");
        assert!(log.starts_with("192.168.1.1:50000 - - [01/May/2024:12:30:00 +0000]"));
        assert!(log.contains("\"GET /api/users?page=1 HTTP/1.1\""));
    }

    #[test]
    fn test_format_json() {
        let mut entry = create_test_entry();
        entry.uri = "/files/\"quoted\"".to_string();
        let log = entry.format("json");
        let value: serde_json::Value = serde_json::from_str(&log).unwrap();
        assert_eq!(value["method"], "GET");
        assert_eq!(value["uri"], "/files/\"quoted\"");
        assert_eq!(value["time"], "2024-05-01T12:30:00.000Z");
    }

    #[test]
    fn test_format_custom() {
        let entry = create_test_entry();
        let log = entry.format("$request_method $request_uri | $request");
        assert_eq!(
            log,
            "GET /api/users?page=1 | GET /api/users?page=1 HTTP/1.1"
        );
    }
}
