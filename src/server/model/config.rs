use std::net::SocketAddrV4;
use std::time::Duration;

/// Server configs
#[derive(Debug, Clone)]
pub(crate) struct ServerConfig {
    pub addr: SocketAddrV4,
    /// base url of the restaurant backend, without trailing slash
    pub backend_base_url: String,
    pub upstream_timeout: Duration,
    pub history_poll_interval: Duration,
}

impl ServerConfig {
    pub fn new(
        addr: SocketAddrV4,
        backend_base_url: String,
        upstream_timeout: Duration,
        history_poll_interval: Duration,
    ) -> Self {
        Self {
            addr,
            backend_base_url: backend_base_url.trim_end_matches('/').to_string(),
            upstream_timeout,
            history_poll_interval,
        }
    }
}
