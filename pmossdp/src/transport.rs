//! Transport de datagrammes
//!
//! Le modèle de messages n'a besoin que d'une primitive d'envoi : pousser un
//! tampon d'octets vers une adresse. L'ouverture des sockets, l'adhésion aux
//! groupes multicast et la boucle de réception restent à la charge de
//! l'appelant (voir [`crate::socket`]).

use std::io;
use std::net::{SocketAddr, UdpSocket};
use std::sync::Arc;

/// Primitive `sendto` consommée par [`crate::SsdpRequest::send_to`]
pub trait DatagramTransport {
    type Error;

    fn send_datagram(&self, payload: &[u8], addr: SocketAddr) -> Result<(), Self::Error>;
}

impl DatagramTransport for UdpSocket {
    type Error = io::Error;

    fn send_datagram(&self, payload: &[u8], addr: SocketAddr) -> io::Result<()> {
        self.send_to(payload, addr).map(|_| ())
    }
}

/// Envoi non bloquant : renvoie `WouldBlock` si le socket n'est pas prêt.
#[cfg(feature = "tokio")]
impl DatagramTransport for tokio::net::UdpSocket {
    type Error = io::Error;

    fn send_datagram(&self, payload: &[u8], addr: SocketAddr) -> io::Result<()> {
        self.try_send_to(payload, addr).map(|_| ())
    }
}

impl<T: DatagramTransport + ?Sized> DatagramTransport for &T {
    type Error = T::Error;

    fn send_datagram(&self, payload: &[u8], addr: SocketAddr) -> Result<(), Self::Error> {
        (**self).send_datagram(payload, addr)
    }
}

impl<T: DatagramTransport + ?Sized> DatagramTransport for Arc<T> {
    type Error = T::Error;

    fn send_datagram(&self, payload: &[u8], addr: SocketAddr) -> Result<(), Self::Error> {
        (**self).send_datagram(payload, addr)
    }
}
