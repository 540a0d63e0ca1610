//! Server configuration (command-line flags and environment variables).

use std::{path::PathBuf, time::Duration};

use clap::Parser;

/// Roomcast server configuration
#[derive(Parser, Debug, Clone)]
#[command(name = "roomcast-server")]
#[command(about = "Room-scoped WebSocket chat relay", long_about = None)]
pub struct ServerConfig {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Directory served as static files at `/`
    #[arg(long, env = "STATIC_DIR", default_value = "./public")]
    pub static_dir: PathBuf,

    /// Capacity of each client's outbound queue
    #[arg(long, default_value_t = 64, value_parser = clap::value_parser!(u32).range(1..))]
    pub outbound_buffer: u32,

    /// Capacity of each fan-out lane queue
    #[arg(long, default_value_t = 1024, value_parser = clap::value_parser!(u32).range(1..))]
    pub fanout_queue: u32,

    /// Per-frame socket write timeout in milliseconds
    #[arg(long, default_value_t = 5000, value_parser = clap::value_parser!(u64).range(1..))]
    pub write_timeout_ms: u64,

    /// UTC offset (hours) used to render `sentAt`
    #[arg(
        long,
        default_value_t = -3,
        allow_negative_numbers = true,
        value_parser = clap::value_parser!(i32).range(-23..=23)
    )]
    pub utc_offset_hours: i32,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_millis(self.write_timeout_ms)
    }

    pub fn outbound_buffer(&self) -> usize {
        self.outbound_buffer as usize
    }

    pub fn fanout_queue(&self) -> usize {
        self.fanout_queue as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        // テスト項目: 引数なしの場合はデフォルト値が使われる
        // given (前提条件):
        let args = ["roomcast-server"];

        // when (操作):
        let config = ServerConfig::try_parse_from(args).unwrap();

        // then (期待する結果):
        assert_eq!(config.port, 3000);
        assert_eq!(config.static_dir, PathBuf::from("./public"));
        assert_eq!(config.outbound_buffer(), 64);
        assert_eq!(config.fanout_queue(), 1024);
        assert_eq!(config.write_timeout(), Duration::from_secs(5));
        assert_eq!(config.utc_offset_hours, -3);
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = ServerConfig::try_parse_from([
            "roomcast-server",
            "--host",
            "127.0.0.1",
            "-p",
            "8080",
            "--utc-offset-hours",
            "-5",
            "--write-timeout-ms",
            "250",
        ])
        .unwrap();

        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert_eq!(config.utc_offset_hours, -5);
        assert_eq!(config.write_timeout(), Duration::from_millis(250));
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        // テスト項目: 範囲外の値は拒否される
        assert!(ServerConfig::try_parse_from(["roomcast-server", "--utc-offset-hours", "30"]).is_err());
        assert!(ServerConfig::try_parse_from(["roomcast-server", "--outbound-buffer", "0"]).is_err());
    }
}
