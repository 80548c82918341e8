//! Messages SSDP
//!
//! Un message est soit une requête (`NOTIFY`, `M-SEARCH`, ...), soit une
//! réponse (`HTTP/1.1 200 OK`). Seules les réponses commencent par le jeton
//! `HTTP/`, c'est le seul discriminant entre les deux formes.
//!
//! Le texte d'un message est construit avec des fins de ligne `\n` ; la
//! conversion en `\r\n` n'a lieu qu'au rendu en octets ([`SsdpMessage::to_bytes`]).

mod request;
mod response;

pub use request::SsdpRequest;
pub use response::{IntoStatusCode, SsdpResponse};

use crate::error::{Result, SsdpError};
use crate::headers::{Headers, parse_header_lines};
use std::fmt;
use std::str::FromStr;

/// Version de protocole par défaut
pub const DEFAULT_VERSION: &str = "HTTP/1.1";

/// Message SSDP lu depuis le réseau
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SsdpMessage {
    Request(SsdpRequest),
    Response(SsdpResponse),
}

/// Indique si `raw` est une réponse (commence par `HTTP/`)
pub fn is_response(raw: &str) -> bool {
    raw.starts_with("HTTP/")
}

impl SsdpMessage {
    /// Parse un message en choisissant requête ou réponse selon la première ligne
    pub fn parse(raw: &str) -> Result<Self> {
        if is_response(raw) {
            SsdpResponse::parse(raw).map(SsdpMessage::Response)
        } else {
            SsdpRequest::parse(raw).map(SsdpMessage::Request)
        }
    }

    pub fn version(&self) -> &str {
        match self {
            SsdpMessage::Request(r) => &r.version,
            SsdpMessage::Response(r) => &r.version,
        }
    }

    pub fn headers(&self) -> &Headers {
        match self {
            SsdpMessage::Request(r) => &r.headers,
            SsdpMessage::Response(r) => &r.headers,
        }
    }

    pub fn as_request(&self) -> Option<&SsdpRequest> {
        match self {
            SsdpMessage::Request(r) => Some(r),
            SsdpMessage::Response(_) => None,
        }
    }

    pub fn as_response(&self) -> Option<&SsdpResponse> {
        match self {
            SsdpMessage::Request(_) => None,
            SsdpMessage::Response(r) => Some(r),
        }
    }

    pub fn is_request(&self) -> bool {
        matches!(self, SsdpMessage::Request(_))
    }

    /// Message complet en octets, fins de ligne `\r\n`
    pub fn to_bytes(&self) -> Vec<u8> {
        to_wire_bytes(&self.to_string())
    }
}

impl fmt::Display for SsdpMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SsdpMessage::Request(r) => fmt::Display::fmt(r, f),
            SsdpMessage::Response(r) => fmt::Display::fmt(r, f),
        }
    }
}

impl FromStr for SsdpMessage {
    type Err = SsdpError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<SsdpRequest> for SsdpMessage {
    fn from(request: SsdpRequest) -> Self {
        SsdpMessage::Request(request)
    }
}

impl From<SsdpResponse> for SsdpMessage {
    fn from(response: SsdpResponse) -> Self {
        SsdpMessage::Response(response)
    }
}

/// Découpe la ligne de départ en exactement trois jetons et parse les en-têtes
/// qui suivent.
fn split_message(raw: &str) -> Result<([&str; 3], Headers)> {
    let mut lines = raw.lines();
    let start_line = lines.next().unwrap_or_default();

    let tokens: Vec<&str> = start_line.split_whitespace().collect();
    let tokens: [&str; 3] = tokens
        .try_into()
        .map_err(|_| SsdpError::MalformedStartLine {
            line: start_line.to_string(),
        })?;

    let headers = parse_header_lines(lines, 2)?;
    Ok((tokens, headers))
}

/// Écrit la ligne de départ puis un `Nom: valeur` par en-tête, séparés par `\n`
fn write_message(
    f: &mut fmt::Formatter<'_>,
    start_line: [&str; 3],
    headers: &Headers,
) -> fmt::Result {
    write!(f, "{} {} {}", start_line[0], start_line[1], start_line[2])?;
    for (name, value) in headers.iter() {
        write!(f, "\n{}: {}", name, value)?;
    }
    Ok(())
}

fn to_wire_bytes(text: &str) -> Vec<u8> {
    text.replace('\n', "\r\n").into_bytes()
}
