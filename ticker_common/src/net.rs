//! Shared networking constants and helpers used by server and client.

/// Default HTTP port of the ticker server.
pub const DEFAULT_PORT: u16 = 8080;
/// Path of the series query endpoint.
pub const DATA_PATH: &str = "/data";

/// Helper to format a host and port like "host:port".
pub fn addr(host: &str, port: u16) -> String {
    format!("{}:{}", host, port)
}

/// Build the full `/data` URL from a server base URL, tolerating a trailing slash.
pub fn data_url(base: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), DATA_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_url_strips_trailing_slash() {
        assert_eq!(data_url("http://localhost:8080/"), "http://localhost:8080/data");
        assert_eq!(data_url("http://localhost:8080"), "http://localhost:8080/data");
    }

    #[test]
    fn addr_joins_host_and_port() {
        assert_eq!(addr("0.0.0.0", DEFAULT_PORT), "0.0.0.0:8080");
    }
}
