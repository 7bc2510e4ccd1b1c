use dohgate_infrastructure::dns::DnsServerHandler;
use socket2::{Domain, Protocol, Socket, Type};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tracing::{debug, error, info};

const RECV_BUFFER_SIZE: usize = 4096;

pub async fn start_dns_server(
    bind_addr: SocketAddr,
    handler: DnsServerHandler,
) -> anyhow::Result<()> {
    let socket = Arc::new(create_udp_socket(bind_addr)?);

    info!(bind_address = %bind_addr, "DNS server ready");

    run_udp_listener(socket, Arc::new(handler), async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Shutdown signal received"),
            Err(e) => {
                error!(error = %e, "Unable to listen for shutdown signal");
                std::future::pending::<()>().await;
            }
        }
    })
    .await;

    Ok(())
}

/// Receives until `shutdown` resolves. Each datagram is handled on its own
/// task so a slow upstream never blocks the receive loop; tasks still in
/// flight at shutdown are abandoned.
pub async fn run_udp_listener<F>(
    socket: Arc<UdpSocket>,
    handler: Arc<DnsServerHandler>,
    shutdown: F,
) where
    F: Future<Output = ()>,
{
    let mut recv_buf = [0u8; RECV_BUFFER_SIZE];
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            result = socket.recv_from(&mut recv_buf) => {
                let (n, from) = match result {
                    Ok(received) => received,
                    Err(e) => {
                        // ICMP port-unreachable from an earlier reply surfaces here on some platforms.
                        debug!(error = %e, "UDP recv error");
                        continue;
                    }
                };

                let datagram: Arc<[u8]> = Arc::from(&recv_buf[..n]);
                let handler = handler.clone();
                let socket = socket.clone();
                tokio::spawn(async move {
                    if let Some(reply) = handler.handle_datagram(&datagram, from).await {
                        if let Err(e) = socket.send_to(&reply, from).await {
                            debug!(client = %from, error = %e, "Failed to send reply");
                        }
                    }
                });
            }
        }
    }
}

pub fn create_udp_socket(socket_addr: SocketAddr) -> anyhow::Result<UdpSocket> {
    let domain = if socket_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.set_recv_buffer_size(512 * 1024)?;
    socket.set_send_buffer_size(512 * 1024)?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;

    Ok(UdpSocket::from_std(socket.into())?)
}
