//! Sockets multicast SSDP
//!
//! Un control point ne doit **pas** écouter sur le port 1900 : si un serveur
//! SSDP local y est déjà lié, le noyau répartit les datagrammes entrants
//! entre les deux sockets et des réponses sont perdues. On passe donc `0`
//! comme `bind_port` pour un client (port éphémère) et
//! [`NetworkConstants::PORT`](crate::NetworkConstants::PORT) pour un device
//! qui doit recevoir les M-SEARCH.

use crate::constants::MulticastScope;
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Délai de lecture appliqué aux sockets créés ici
pub const READ_TIMEOUT: Duration = Duration::from_secs(1);

/// Crée un socket UDP abonné au groupe multicast de `scope`.
///
/// En IPv4 le groupe est rejoint sur chaque interface non loopback ; les
/// échecs sont journalisés puis ignorés. Si aucune interface n'a pu être
/// utilisée, le choix est laissé au système.
pub fn multicast_socket(scope: MulticastScope, bind_port: u16) -> io::Result<UdpSocket> {
    let socket = match scope.address() {
        IpAddr::V4(group) => multicast_socket_v4(group, bind_port)?,
        IpAddr::V6(group) => multicast_socket_v6(group, bind_port)?,
    };

    socket.set_read_timeout(Some(READ_TIMEOUT))?;
    info!(
        "✅ SSDP socket ready on {} (group {})",
        socket.local_addr()?,
        scope.address()
    );
    Ok(socket)
}

fn multicast_socket_v4(group: Ipv4Addr, bind_port: u16) -> io::Result<UdpSocket> {
    let socket2 = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))?;
    socket2.set_reuse_address(true)?;

    let bind_addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), bind_port);
    socket2.bind(&bind_addr.into())?;

    let socket: UdpSocket = socket2.into();
    socket.set_multicast_loop_v4(true)?;

    let mut joined = 0;
    for iface in get_if_addrs::get_if_addrs()? {
        if let IpAddr::V4(ipv4) = iface.ip() {
            if ipv4.is_loopback() {
                continue;
            }
            match socket.join_multicast_v4(&group, &ipv4) {
                Ok(()) => {
                    debug!("SSDP: joined {} on {} ({})", group, ipv4, iface.name);
                    joined += 1;
                }
                Err(e) => {
                    warn!("SSDP: failed to join {} on {}: {}", group, ipv4, e);
                }
            }
        }
    }

    if joined == 0 {
        socket.join_multicast_v4(&group, &Ipv4Addr::UNSPECIFIED)?;
        debug!("SSDP: joined {} on default interface", group);
    }

    Ok(socket)
}

fn multicast_socket_v6(group: Ipv6Addr, bind_port: u16) -> io::Result<UdpSocket> {
    let socket2 = Socket::new(Domain::IPV6, Type::DGRAM, Some(Protocol::UDP))?;
    socket2.set_only_v6(true)?;
    socket2.set_reuse_address(true)?;

    let bind_addr = SocketAddr::new(IpAddr::V6(Ipv6Addr::UNSPECIFIED), bind_port);
    socket2.bind(&bind_addr.into())?;

    let socket: UdpSocket = socket2.into();
    socket.set_multicast_loop_v6(true)?;
    socket.join_multicast_v6(&group, 0)?;
    debug!("SSDP: joined {} on default interface", group);

    Ok(socket)
}
