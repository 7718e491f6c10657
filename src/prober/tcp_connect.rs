use anyhow::Result;
use tokio::net::TcpStream;
use tokio::time::{timeout, Duration, Instant};

/// Times one TCP handshake against `host:port`.
///
/// The connection is closed before returning. Any failure (resolution,
/// refusal, unreachable network or the timeout expiring) is an error.
pub async fn probe_tcp(host: &str, port: u16, connect_timeout: Duration) -> Result<Duration> {
    let start = Instant::now();
    let conn_fut = TcpStream::connect((host, port));
    let conn = timeout(connect_timeout, conn_fut).await??;
    drop(conn);
    let elapsed = start.elapsed();
    Ok(elapsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn connects_to_local_listener() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let elapsed = probe_tcp("127.0.0.1", port, Duration::from_secs(5))
            .await
            .unwrap();
        assert!(elapsed > Duration::ZERO);
    }

    #[tokio::test]
    async fn unresolvable_host_is_an_error() {
        let res = probe_tcp("does-not-exist.invalid", 443, Duration::from_secs(5)).await;
        assert!(res.is_err());
    }
}
