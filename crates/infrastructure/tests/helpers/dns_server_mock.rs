use hickory_proto::op::{Message, MessageType, ResponseCode};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{RData, Record};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

/// Loopback nameserver answering every query with a fixed A record, or
/// staying silent when built with `silent`.
pub struct MockNameserver {
    addr: SocketAddr,
    queries: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockNameserver {
    pub async fn answering(ip: Ipv4Addr) -> std::io::Result<Self> {
        Self::start(Some(ip), ResponseCode::NoError).await
    }

    pub async fn refusing() -> std::io::Result<Self> {
        Self::start(None, ResponseCode::Refused).await
    }

    pub async fn silent() -> std::io::Result<Self> {
        Self::start(None, ResponseCode::NoError).await
    }

    async fn start(ip: Option<Ipv4Addr>, rcode: ResponseCode) -> std::io::Result<Self> {
        let socket = UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = socket.local_addr()?;
        let queries = Arc::new(AtomicUsize::new(0));
        let counter = queries.clone();

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            counter.fetch_add(1, Ordering::SeqCst);
                            let silent = ip.is_none() && rcode == ResponseCode::NoError;
                            if silent {
                                continue;
                            }
                            if let Some(response) = Self::build_response(&buf[..len], ip, rcode) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            queries,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    fn build_response(query: &[u8], ip: Option<Ipv4Addr>, rcode: ResponseCode) -> Option<Vec<u8>> {
        let request = Message::from_vec(query).ok()?;
        let question = request.queries().first()?.clone();

        let mut response = Message::new();
        response
            .set_id(request.id())
            .set_message_type(MessageType::Response)
            .set_recursion_desired(true)
            .set_recursion_available(true)
            .set_response_code(rcode);
        response.add_query(question.clone());

        if let Some(ip) = ip {
            response.add_answer(Record::from_rdata(
                question.name().clone(),
                60,
                RData::A(A(ip)),
            ));
        }

        response.to_vec().ok()
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

impl Drop for MockNameserver {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
