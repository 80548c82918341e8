//! Requête SSDP (`NOTIFY`, `M-SEARCH`)

use super::{DEFAULT_VERSION, split_message, to_wire_bytes, write_message};
use crate::error::{Result, SsdpError};
use crate::headers::Headers;
use crate::transport::DatagramTransport;
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use tracing::debug;

/// Requête SSDP : `<method> <uri> <version>` suivie des en-têtes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SsdpRequest {
    pub method: String,
    pub uri: String,
    pub version: String,
    pub headers: Headers,
}

impl SsdpRequest {
    /// Crée une requête `<method> * HTTP/1.1` sans en-têtes
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            uri: "*".to_string(),
            version: DEFAULT_VERSION.to_string(),
            headers: Headers::new(),
        }
    }

    /// M-SEARCH vers `target` pour le type de service `st`.
    ///
    /// `mx` est ramené à 1 au minimum.
    pub fn m_search(target: SocketAddr, st: &str, mx: u32) -> Self {
        Self::new("M-SEARCH").with_headers([
            ("HOST", target.to_string()),
            ("MAN", "\"ssdp:discover\"".to_string()),
            ("MX", mx.max(1).to_string()),
            ("ST", st.to_string()),
        ])
    }

    /// NOTIFY `ssdp:alive`
    pub fn notify_alive(
        target: SocketAddr,
        nt: &str,
        usn: &str,
        location: &str,
        server: &str,
        max_age: u32,
    ) -> Self {
        Self::new("NOTIFY").with_headers([
            ("HOST", target.to_string()),
            ("CACHE-CONTROL", format!("max-age={}", max_age)),
            ("LOCATION", location.to_string()),
            ("NT", nt.to_string()),
            ("NTS", "ssdp:alive".to_string()),
            ("SERVER", server.to_string()),
            ("USN", usn.to_string()),
        ])
    }

    /// NOTIFY `ssdp:byebye` (ni LOCATION, ni SERVER, ni CACHE-CONTROL)
    pub fn notify_byebye(target: SocketAddr, nt: &str, usn: &str) -> Self {
        Self::new("NOTIFY").with_headers([
            ("HOST", target.to_string()),
            ("NT", nt.to_string()),
            ("NTS", "ssdp:byebye".to_string()),
            ("USN", usn.to_string()),
        ])
    }

    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = uri.into();
        self
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

    /// Parse une requête : la première ligne doit contenir exactement
    /// `method`, `uri` et `version`, dans cet ordre.
    pub fn parse(raw: &str) -> Result<Self> {
        let ([method, uri, version], headers) = split_message(raw)?;
        Ok(Self {
            method: method.to_string(),
            uri: uri.to_string(),
            version: version.to_string(),
            headers,
        })
    }

    /// Requête complète en octets, fins de ligne `\r\n`
    pub fn to_bytes(&self) -> Vec<u8> {
        to_wire_bytes(&self.to_string())
    }

    /// Datagramme complet : message en octets suivi de la fin d'en-têtes
    pub fn to_datagram(&self) -> Vec<u8> {
        let mut payload = self.to_bytes();
        payload.extend_from_slice(b"\r\n\r\n");
        payload
    }

    /// Envoie la requête à `addr` via `transport`.
    ///
    /// Le texte sérialisé ne termine pas sa dernière ligne : on ajoute sa fin
    /// de ligne puis la ligne vide qui clôt les en-têtes (`\r\n\r\n`), le
    /// message n'ayant pas de corps. Un seul envoi, sans nouvelle tentative :
    /// l'erreur du transport est renvoyée telle quelle.
    pub fn send_to<T>(&self, transport: &T, addr: SocketAddr) -> Result<(), T::Error>
    where
        T: DatagramTransport + ?Sized,
    {
        let payload = self.to_datagram();

        debug!("📤 {} < {:?}", addr, self);
        transport.send_datagram(&payload, addr)
    }
}

impl fmt::Display for SsdpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_message(
            f,
            [self.method.as_str(), self.uri.as_str(), self.version.as_str()],
            &self.headers,
        )
    }
}

impl FromStr for SsdpRequest {
    type Err = SsdpError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
