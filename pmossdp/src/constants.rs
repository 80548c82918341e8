//! Constantes réseau SSDP
//!
//! Adresses multicast définies par le protocole (une IPv4, quatre portées IPv6)
//! et port UDP bien connu.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

/// Adresses et port normalisés du protocole SSDP
pub struct NetworkConstants;

impl NetworkConstants {
    /// Groupe multicast IPv4 (`239.255.255.250`)
    pub const MULTICAST_ADDRESS_IPV4: Ipv4Addr = Ipv4Addr::new(239, 255, 255, 250);

    /// Groupe multicast IPv6 de portée lien (`ff02::c`)
    pub const MULTICAST_ADDRESS_IPV6_LINK_LOCAL: Ipv6Addr =
        Ipv6Addr::new(0xff02, 0, 0, 0, 0, 0, 0, 0xc);

    /// Groupe multicast IPv6 de portée site (`ff05::c`)
    pub const MULTICAST_ADDRESS_IPV6_SITE_LOCAL: Ipv6Addr =
        Ipv6Addr::new(0xff05, 0, 0, 0, 0, 0, 0, 0xc);

    /// Groupe multicast IPv6 de portée organisation (`ff08::c`)
    pub const MULTICAST_ADDRESS_IPV6_ORG_LOCAL: Ipv6Addr =
        Ipv6Addr::new(0xff08, 0, 0, 0, 0, 0, 0, 0xc);

    /// Groupe multicast IPv6 de portée globale (`ff0e::c`)
    pub const MULTICAST_ADDRESS_IPV6_GLOBAL: Ipv6Addr =
        Ipv6Addr::new(0xff0e, 0, 0, 0, 0, 0, 0, 0xc);

    /// Port UDP SSDP
    pub const PORT: u16 = 1900;
}

/// Portée multicast sur laquelle annoncer ou rechercher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MulticastScope {
    #[default]
    Ipv4,
    LinkLocal,
    SiteLocal,
    OrgLocal,
    Global,
}

impl MulticastScope {
    pub const ALL: [MulticastScope; 5] = [
        MulticastScope::Ipv4,
        MulticastScope::LinkLocal,
        MulticastScope::SiteLocal,
        MulticastScope::OrgLocal,
        MulticastScope::Global,
    ];

    /// Adresse du groupe multicast de cette portée
    pub fn address(self) -> IpAddr {
        match self {
            MulticastScope::Ipv4 => IpAddr::V4(NetworkConstants::MULTICAST_ADDRESS_IPV4),
            MulticastScope::LinkLocal => {
                IpAddr::V6(NetworkConstants::MULTICAST_ADDRESS_IPV6_LINK_LOCAL)
            }
            MulticastScope::SiteLocal => {
                IpAddr::V6(NetworkConstants::MULTICAST_ADDRESS_IPV6_SITE_LOCAL)
            }
            MulticastScope::OrgLocal => {
                IpAddr::V6(NetworkConstants::MULTICAST_ADDRESS_IPV6_ORG_LOCAL)
            }
            MulticastScope::Global => IpAddr::V6(NetworkConstants::MULTICAST_ADDRESS_IPV6_GLOBAL),
        }
    }

    /// Destination `groupe:port` pour cette portée
    pub fn socket_addr(self, port: u16) -> SocketAddr {
        SocketAddr::new(self.address(), port)
    }

    pub fn is_ipv6(self) -> bool {
        !matches!(self, MulticastScope::Ipv4)
    }
}

impl fmt::Display for MulticastScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MulticastScope::Ipv4 => "ipv4",
            MulticastScope::LinkLocal => "link_local",
            MulticastScope::SiteLocal => "site_local",
            MulticastScope::OrgLocal => "org_local",
            MulticastScope::Global => "global",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port() {
        assert_eq!(NetworkConstants::PORT, 1900);
    }

    #[test]
    fn test_addresses_match_literals() {
        assert_eq!(
            NetworkConstants::MULTICAST_ADDRESS_IPV4,
            "239.255.255.250".parse::<Ipv4Addr>().unwrap()
        );
        assert_eq!(
            NetworkConstants::MULTICAST_ADDRESS_IPV6_LINK_LOCAL,
            "ff02::c".parse::<Ipv6Addr>().unwrap()
        );
        assert_eq!(
            NetworkConstants::MULTICAST_ADDRESS_IPV6_SITE_LOCAL,
            "ff05::c".parse::<Ipv6Addr>().unwrap()
        );
        assert_eq!(
            NetworkConstants::MULTICAST_ADDRESS_IPV6_ORG_LOCAL,
            "ff08::c".parse::<Ipv6Addr>().unwrap()
        );
        assert_eq!(
            NetworkConstants::MULTICAST_ADDRESS_IPV6_GLOBAL,
            "ff0e::c".parse::<Ipv6Addr>().unwrap()
        );
    }

    #[test]
    fn test_addresses_are_multicast() {
        for scope in MulticastScope::ALL {
            assert!(scope.address().is_multicast(), "{} is not multicast", scope);
            assert_eq!(scope.is_ipv6(), scope.address().is_ipv6());
        }
    }

    #[test]
    fn test_scope_socket_addr() {
        assert_eq!(
            MulticastScope::Ipv4.socket_addr(NetworkConstants::PORT).to_string(),
            "239.255.255.250:1900"
        );
        assert_eq!(
            MulticastScope::LinkLocal.socket_addr(NetworkConstants::PORT).to_string(),
            "[ff02::c]:1900"
        );
    }
}
