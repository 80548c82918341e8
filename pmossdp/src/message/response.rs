//! Réponse SSDP (`HTTP/1.1 200 OK`)

use super::{DEFAULT_VERSION, split_message, to_wire_bytes, write_message};
use crate::error::{Result, SsdpError};
use crate::headers::Headers;
use std::fmt;
use std::str::FromStr;

/// Conversion vers un code de statut entier.
///
/// Implémenté pour les entiers et pour les chaînes numériques, si bien que
/// `SsdpResponse::new(200, "OK")` et `SsdpResponse::new("200", "OK")` donnent
/// la même réponse.
pub trait IntoStatusCode {
    fn into_status_code(self) -> Result<u16>;
}

impl IntoStatusCode for u16 {
    fn into_status_code(self) -> Result<u16> {
        Ok(self)
    }
}

macro_rules! impl_int_status_code {
    ($($ty:ty),*) => {
        $(
            impl IntoStatusCode for $ty {
                fn into_status_code(self) -> Result<u16> {
                    u16::try_from(self).map_err(|_| SsdpError::InvalidStatusCode {
                        value: self.to_string(),
                    })
                }
            }
        )*
    };
}

impl_int_status_code!(u8, i16, i32, i64, u32, u64, usize);

impl IntoStatusCode for &str {
    fn into_status_code(self) -> Result<u16> {
        self.trim()
            .parse::<u16>()
            .map_err(|_| SsdpError::InvalidStatusCode {
                value: self.to_string(),
            })
    }
}

impl IntoStatusCode for String {
    fn into_status_code(self) -> Result<u16> {
        self.as_str().into_status_code()
    }
}

impl IntoStatusCode for &String {
    fn into_status_code(self) -> Result<u16> {
        self.as_str().into_status_code()
    }
}

/// Réponse SSDP : `<version> <status_code> <reason>` suivie des en-têtes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SsdpResponse {
    pub version: String,
    pub status_code: u16,
    pub reason: String,
    pub headers: Headers,
}

impl SsdpResponse {
    /// Crée une réponse sans en-têtes, en version `HTTP/1.1`
    pub fn new(status_code: impl IntoStatusCode, reason: impl Into<String>) -> Result<Self> {
        Ok(Self {
            version: DEFAULT_VERSION.to_string(),
            status_code: status_code.into_status_code()?,
            reason: reason.into(),
            headers: Headers::new(),
        })
    }

    /// Réponse `200 OK` à un M-SEARCH
    pub fn search_response(st: &str, usn: &str, location: &str, server: &str, max_age: u32) -> Self {
        Self {
            version: DEFAULT_VERSION.to_string(),
            status_code: 200,
            reason: "OK".to_string(),
            headers: Headers::from([
                ("CACHE-CONTROL", format!("max-age={}", max_age)),
                ("EXT", String::new()),
                ("LOCATION", location.to_string()),
                ("SERVER", server.to_string()),
                ("ST", st.to_string()),
                ("USN", usn.to_string()),
            ]),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_headers(mut self, headers: impl Into<Headers>) -> Self {
        self.headers = headers.into();
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(name, value);
        self
    }

    /// Parse une réponse : la première ligne doit contenir exactement
    /// `version`, `status_code` et `reason`.
    pub fn parse(raw: &str) -> Result<Self> {
        let ([version, status_code, reason], headers) = split_message(raw)?;
        Ok(Self {
            version: version.to_string(),
            status_code: status_code.into_status_code()?,
            reason: reason.to_string(),
            headers,
        })
    }

    /// Réponse complète en octets, fins de ligne `\r\n`
    pub fn to_bytes(&self) -> Vec<u8> {
        to_wire_bytes(&self.to_string())
    }
}

impl fmt::Display for SsdpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status_code = self.status_code.to_string();
        write_message(
            f,
            [self.version.as_str(), status_code.as_str(), self.reason.as_str()],
            &self.headers,
        )
    }
}

impl FromStr for SsdpResponse {
    type Err = SsdpError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_coercion() {
        let from_str = SsdpResponse::new("200", "OK").unwrap();
        let from_int = SsdpResponse::new(200, "OK").unwrap();
        let from_string = SsdpResponse::new(String::from(" 200 "), "OK").unwrap();
        assert_eq!(from_str, from_int);
        assert_eq!(from_str, from_string);
        assert_eq!(from_int.status_code, 200);
    }

    #[test]
    fn test_invalid_status_code() {
        assert_eq!(
            SsdpResponse::new("OK", "OK").unwrap_err(),
            SsdpError::InvalidStatusCode {
                value: "OK".to_string()
            }
        );
        assert!(SsdpResponse::new(-1, "Nope").is_err());
        assert!(SsdpResponse::new(70_000u32, "Nope").is_err());
    }

    #[test]
    fn test_parse_response() {
        let raw = "HTTP/1.1 200 OK\r\n\
                   CACHE-CONTROL: max-age=1800\r\n\
                   EXT:\r\n\
                   LOCATION: http://192.168.1.42:8080/device.xml\r\n\
                   ST: upnp:rootdevice\r\n\
                   USN: uuid:1234::upnp:rootdevice\r\n\
                   \r\n";
        let response = SsdpResponse::parse(raw).unwrap();
        assert_eq!(response.version, "HTTP/1.1");
        assert_eq!(response.status_code, 200);
        assert_eq!(response.reason, "OK");
        assert_eq!(response.headers.len(), 5);
        assert_eq!(
            response.headers.get("location"),
            Some("http://192.168.1.42:8080/device.xml")
        );
        assert_eq!(response.headers.get("EXT"), Some(""));
    }

    #[test]
    fn test_parse_keeps_headers_after_whitespace_line() {
        let response = SsdpResponse::parse("HTTP/1.1 200 OK\r\nST: a\r\n \r\nUSN: b").unwrap();
        assert_eq!(response.headers.get("ST"), Some("a"));
        assert_eq!(response.headers.get("USN"), Some("b"));
    }

    #[test]
    fn test_parse_non_numeric_status() {
        assert!(matches!(
            SsdpResponse::parse("HTTP/1.1 abc OK\r\n"),
            Err(SsdpError::InvalidStatusCode { .. })
        ));
    }

    #[test]
    fn test_parse_requires_three_tokens() {
        assert!(matches!(
            SsdpResponse::parse("HTTP/1.1 200\r\nST: ssdp:all"),
            Err(SsdpError::MalformedStartLine { .. })
        ));
    }

    #[test]
    fn test_display() {
        let response = SsdpResponse::new(200, "OK")
            .unwrap()
            .with_header("ST", "upnp:rootdevice")
            .with_header("EXT", "");
        assert_eq!(
            response.to_string(),
            "HTTP/1.1 200 OK\nST: upnp:rootdevice\nEXT: "
        );
        assert_eq!(
            response.to_bytes(),
            b"HTTP/1.1 200 OK\r\nST: upnp:rootdevice\r\nEXT: ".to_vec()
        );
    }

    #[test]
    fn test_search_response_headers() {
        let response = SsdpResponse::search_response(
            "upnp:rootdevice",
            "uuid:abcd::upnp:rootdevice",
            "http://10.0.0.2/desc.xml",
            "Linux UPnP/1.1 PMOSSDP/0.1",
            900,
        );
        let names: Vec<&str> = response.headers.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["CACHE-CONTROL", "EXT", "LOCATION", "SERVER", "ST", "USN"]);
        assert_eq!(response.headers.get("CACHE-CONTROL"), Some("max-age=900"));
    }
}
