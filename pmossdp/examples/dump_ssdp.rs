use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::Result;
use pmossdp::socket::multicast_socket;
use pmossdp::{SsdpConfig, SsdpMessage};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    tracing::info!("Starting raw SSDP dump helper...");

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = SsdpConfig::load(config_path.as_deref())?;

    let socket = multicast_socket(config.scope, 0)?;
    config.m_search().send_to(&socket, config.target())?;

    println!(
        "Listening for SSDP messages on {}. Press Ctrl+C to stop.",
        config.target()
    );

    let mut buf = vec![0u8; config.recv_buffer_size];
    loop {
        match socket.recv_from(&mut buf) {
            Ok((n, from)) => {
                let data = String::from_utf8_lossy(&buf[..n]);
                match SsdpMessage::parse(&data) {
                    Ok(SsdpMessage::Response(response)) => {
                        println!(
                            "[RESPONSE {}] from={} st={} usn={} location={}",
                            response.status_code,
                            from,
                            response.headers.get("ST").unwrap_or("-"),
                            response.headers.get("USN").unwrap_or("-"),
                            response.headers.get("LOCATION").unwrap_or("-"),
                        );
                    }
                    Ok(SsdpMessage::Request(request)) => {
                        println!(
                            "[{}] from={} nt={} nts={} usn={}",
                            request.method,
                            from,
                            request.headers.get("NT").unwrap_or("-"),
                            request.headers.get("NTS").unwrap_or("-"),
                            request.headers.get("USN").unwrap_or("-"),
                        );
                    }
                    Err(e) => {
                        debug!("Ignoring datagram from {}: {}", from, e);
                    }
                }
            }
            Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                continue;
            }
            Err(e) => {
                warn!("❌ SSDP read error: {}", e);
            }
        }
    }
}
