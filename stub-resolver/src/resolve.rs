use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;

use bytes::BytesMut;
use dns::{DnsError, NameQuery, Query, ResourceRecord};
use thiserror::Error;
use tokio::net::UdpSocket;
use tokio::time::Instant;

// https://datatracker.ietf.org/doc/html/rfc1035#section-4.2.1
//
// Messages carried by UDP are restricted to 512 bytes, the buffer leaves room
// for servers that ignore that.
const MAX_RESPONSE_SIZE: usize = 1024;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Dns(#[from] DnsError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no response within {0:?}")]
    Timeout(Duration),
}

/// Sends queries to one server over a UDP socket and waits for the matching
/// response, one query at a time.
pub struct Resolver {
    sock: UdpSocket,
    server_addr: SocketAddr,
    timeout: Option<Duration>,
}

impl Resolver {
    pub async fn bind(server_addr: SocketAddr, timeout: Option<Duration>) -> std::io::Result<Self> {
        let local_addr = match server_addr {
            SocketAddr::V4(_) => SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0)),
            SocketAddr::V6(_) => SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0)),
        };
        let sock = UdpSocket::bind(local_addr).await?;

        Ok(Self {
            sock,
            server_addr,
            timeout,
        })
    }

    pub async fn resolve(&self, name_query: NameQuery) -> Result<Vec<ResourceRecord>, ResolveError> {
        let query = dns::encode_request(name_query)?;
        let name_query = query.name_query();
        tracing::debug!("resolving {} {}, id: {}", name_query.q_type, name_query.name, query.id());

        let send_size = self.sock.send_to(query.request_bytes(), self.server_addr).await?;
        tracing::debug!(server = %self.server_addr, send_size, "sent udp query");

        // 整个等待过程共用一个截止时间
        let deadline = self.timeout.map(|t| Instant::now() + t);
        let mut resp_buf = BytesMut::with_capacity(MAX_RESPONSE_SIZE);

        loop {
            resp_buf.clear();
            let (response_size, from) = self.recv(&mut resp_buf, deadline).await?;
            let response_bytes = &resp_buf[0..response_size];
            tracing::debug!("received udp response from {}, length: {}, {:?}", from, response_size, response_bytes);

            if from != self.server_addr {
                tracing::warn!(expected = %self.server_addr, received_from = %from, "udp response from unexpected source");
            }

            match accept(&query, response_bytes) {
                Ok(records) => {
                    tracing::debug!("received udp response has {} answers", records.len());
                    return Ok(records);
                }
                Err(e) if e.is_terminal() => return Err(e.into()),
                Err(e) => {
                    tracing::warn!(error = %e, "discarding datagram, waiting for the next one");
                }
            }
        }
    }

    async fn recv(&self, buf: &mut BytesMut, deadline: Option<Instant>) -> Result<(usize, SocketAddr), ResolveError> {
        let received = match (deadline, self.timeout) {
            (Some(deadline), Some(timeout)) => tokio::time::timeout_at(deadline, self.sock.recv_buf_from(buf))
                .await
                .map_err(|_| ResolveError::Timeout(timeout))??,
            _ => self.sock.recv_buf_from(buf).await?,
        };

        Ok(received)
    }
}

fn accept(query: &Query, response: &[u8]) -> dns::Result<Vec<ResourceRecord>> {
    let resp = query.check_response(response)?;
    resp.answer_records()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dns::{QType, Rcode};

    // A 1.2.3.4, name points at the question
    const A_RECORD: &[u8] = &[0xc0, 12, 0, 1, 0, 1, 0, 0, 0x0e, 0x10, 0, 4, 1, 2, 3, 4];

    fn reply(request: &[u8], flags2: u8, records: &[&[u8]]) -> Vec<u8> {
        let mut bytes = request.to_vec();
        bytes[2] |= 0x80;
        bytes[3] = flags2;
        bytes[7] = records.len() as u8;
        for record in records {
            bytes.extend_from_slice(record);
        }
        bytes
    }

    async fn fake_server() -> (UdpSocket, SocketAddr) {
        let sock = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = sock.local_addr().unwrap();
        (sock, addr)
    }

    #[tokio::test]
    async fn test_resolve_skips_strays() {
        let (server, server_addr) = fake_server().await;
        let resolver = Resolver::bind(server_addr, Some(Duration::from_secs(5))).await.unwrap();

        let task = tokio::spawn(async move {
            let mut buf = [0u8; 512];
            let (n, client) = server.recv_from(&mut buf).await.unwrap();
            let request = &buf[..n];

            let mut wrong_id = reply(request, 0, &[A_RECORD]);
            wrong_id[1] = 9;
            server.send_to(&wrong_id, client).await.unwrap();

            let mut bad_record = reply(request, 0, &[A_RECORD]);
            bad_record[request.len() + 3] = 99;
            server.send_to(&bad_record, client).await.unwrap();

            server.send_to(&reply(request, 0, &[A_RECORD, A_RECORD]), client).await.unwrap();
        });

        let records = resolver.resolve(NameQuery::a_record("z.cn")).await.unwrap();
        assert_eq!(2, records.len());
        assert_eq!("z.cn", records[0].domain);
        assert_eq!(3600, records[0].ttl);
        assert_eq!("1.2.3.4", records[1].rdata.to_string());

        task.await.unwrap();
    }

    #[tokio::test]
    async fn test_resolve_name_error() {
        let (server, server_addr) = fake_server().await;
        let resolver = Resolver::bind(server_addr, Some(Duration::from_secs(5))).await.unwrap();

        tokio::spawn(async move {
            let mut buf = [0u8; 512];
            let (n, client) = server.recv_from(&mut buf).await.unwrap();
            server.send_to(&reply(&buf[..n], 0x03, &[]), client).await.unwrap();
        });

        let ret = resolver.resolve(NameQuery::new("qwertyuiop.cn", QType::Txt)).await;
        assert!(matches!(
            ret,
            Err(ResolveError::Dns(DnsError::ServerReportedError(Rcode::NameError)))
        ));
    }

    #[tokio::test]
    async fn test_resolve_question_mismatch() {
        let (server, server_addr) = fake_server().await;
        let resolver = Resolver::bind(server_addr, Some(Duration::from_secs(5))).await.unwrap();

        tokio::spawn(async move {
            let mut buf = [0u8; 512];
            let (n, client) = server.recv_from(&mut buf).await.unwrap();
            let mut bytes = reply(&buf[..n], 0, &[A_RECORD]);
            bytes[13] = b'x';
            server.send_to(&bytes, client).await.unwrap();
        });

        let ret = resolver.resolve(NameQuery::a_record("z.cn")).await;
        assert!(matches!(ret, Err(ResolveError::Dns(DnsError::QuestionMismatch))));
    }

    #[tokio::test]
    async fn test_resolve_timeout() {
        let (_server, server_addr) = fake_server().await;
        let resolver = Resolver::bind(server_addr, Some(Duration::from_millis(100))).await.unwrap();

        let ret = resolver.resolve(NameQuery::a_record("z.cn")).await;
        assert!(matches!(ret, Err(ResolveError::Timeout(_))));
    }

    #[tokio::test]
    async fn test_invalid_name_is_not_sent() {
        let (server, server_addr) = fake_server().await;
        let resolver = Resolver::bind(server_addr, None).await.unwrap();

        let ret = resolver.resolve(NameQuery::a_record("z..cn")).await;
        assert!(matches!(ret, Err(ResolveError::Dns(DnsError::InvalidName { .. }))));

        let mut buf = [0u8; 512];
        let nothing = tokio::time::timeout(Duration::from_millis(50), server.recv_from(&mut buf)).await;
        assert!(nothing.is_err());
    }
}
