//! # PMOSSDP - Messages SSDP
//!
//! Ce crate implémente la couche message du protocole SSDP (Simple Service
//! Discovery Protocol) : lecture du texte reçu sur le réseau vers des
//! requêtes/réponses typées, et écriture de ces objets vers des datagrammes
//! conformes.
//!
//! ## Fonctionnalités
//!
//! - ✅ Parsing des requêtes (`NOTIFY`, `M-SEARCH`) et des réponses (`HTTP/1.1 200 OK`)
//! - ✅ En-têtes ordonnés, doublons autorisés
//! - ✅ Sérialisation texte (`\n`) puis octets (`\r\n`)
//! - ✅ Envoi d'une requête via n'importe quel transport datagramme
//! - ✅ Adresses multicast IPv4 et IPv6 (lien, site, organisation, global)
//!
//! ## Architecture
//!
//! - [`SsdpMessage`] : requête ou réponse, choisie d'après la ligne de départ
//! - [`SsdpRequest`] / [`SsdpResponse`] : les deux formes de message
//! - [`Headers`] : liste ordonnée des en-têtes
//! - [`DatagramTransport`] : primitive d'envoi consommée par [`SsdpRequest::send_to`]
//! - [`SsdpConfig`] : paramètres des messages émis
//!
//! ## Exemple
//!
//! ```
//! use pmossdp::SsdpMessage;
//!
//! let raw = "HTTP/1.1 200 OK\r\nST: upnp:rootdevice\r\nUSN: uuid:1234::upnp:rootdevice\r\n\r\n";
//! match SsdpMessage::parse(raw)? {
//!     SsdpMessage::Response(response) => {
//!         assert_eq!(response.status_code, 200);
//!         assert_eq!(response.headers.get("ST"), Some("upnp:rootdevice"));
//!     }
//!     SsdpMessage::Request(_) => unreachable!(),
//! }
//! # Ok::<(), pmossdp::SsdpError>(())
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod headers;
pub mod message;
pub mod socket;
pub mod transport;

pub use config::SsdpConfig;
pub use constants::{MulticastScope, NetworkConstants};
pub use error::{Result, SsdpError};
pub use headers::{Headers, parse_headers};
pub use message::{IntoStatusCode, SsdpMessage, SsdpRequest, SsdpResponse, is_response};
pub use transport::DatagramTransport;
