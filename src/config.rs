//! Runtime configuration from command-line flags and environment.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// In-memory user CRUD service with generated OpenAPI docs.
#[derive(Parser, Debug, Clone)]
#[command(name = "roster", version, about)]
pub struct Config {
    /// Address to listen on.
    #[arg(long, env = "ROSTER_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Log filter used when `RUST_LOG` is not set (e.g. `debug`, `roster=trace`).
    #[arg(long, env = "ROSTER_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Config {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// `RUST_LOG` when set, otherwise `--log-level`.
    ///
    /// # Errors
    ///
    /// Returns an error if the fallback directive does not parse.
    pub fn env_filter(&self) -> Result<EnvFilter, tracing_subscriber::filter::ParseError> {
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&self.log_level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_socket_address_from_flags() {
        let config = Config::try_parse_from(["roster", "--host", "127.0.0.1", "--port", "8080"]).unwrap();
        assert_eq!(config.addr(), SocketAddr::from(([127, 0, 0, 1], 8080)));
    }

    #[test]
    fn rejects_invalid_port() {
        assert!(Config::try_parse_from(["roster", "--port", "http"]).is_err());
        assert!(Config::try_parse_from(["roster", "--port", "70000"]).is_err());
    }

    #[test]
    fn log_level_flag_is_kept() {
        let config = Config::try_parse_from(["roster", "--log-level", "roster=debug"]).unwrap();
        assert_eq!(config.log_level, "roster=debug");
    }
}
