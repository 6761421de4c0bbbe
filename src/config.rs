use std::{env, net::SocketAddr};

use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub bind_port: u16,
    pub rpc_path: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("BIND_PORT must be a valid u16")]
    InvalidPort,
    #[error("RPC_PATH must start with '/' and must not be /health")]
    InvalidRpcPath,
    #[error("invalid bind address or port")]
    InvalidSocket,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
        let bind_port = env::var("BIND_PORT")
            .ok()
            .map(|value| value.parse::<u16>().map_err(|_| ConfigError::InvalidPort))
            .transpose()?
            .unwrap_or(8080);
        let rpc_path = env::var("RPC_PATH")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| "/rpc".to_string());

        if !rpc_path.starts_with('/') || rpc_path == "/health" {
            return Err(ConfigError::InvalidRpcPath);
        }

        let config = Self {
            bind_addr,
            bind_port,
            rpc_path,
        };

        let _ = config.bind_socket()?;
        Ok(config)
    }

    pub fn bind_socket(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.bind_addr, self.bind_port)
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidSocket)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    // Tests in this module mutate process-wide environment variables.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("BIND_ADDR");
        env::remove_var("BIND_PORT");
        env::remove_var("RPC_PATH");
    }

    #[test]
    fn parse_defaults() {
        let _guard = ENV_LOCK.lock().expect("env lock");
        clear_env();

        let config = Config::from_env().expect("config should parse");
        assert_eq!(config.bind_addr, "127.0.0.1");
        assert_eq!(config.bind_port, 8080);
        assert_eq!(config.rpc_path, "/rpc");
        assert_eq!(
            config.bind_socket().expect("valid socket"),
            "127.0.0.1:8080".parse().expect("valid addr")
        );
    }

    #[test]
    fn custom_values_are_used() {
        let _guard = ENV_LOCK.lock().expect("env lock");
        clear_env();
        env::set_var("BIND_ADDR", "0.0.0.0");
        env::set_var("BIND_PORT", "9000");
        env::set_var("RPC_PATH", "/jsonrpc");

        let config = Config::from_env().expect("config should parse");
        assert_eq!(config.bind_port, 9000);
        assert_eq!(config.rpc_path, "/jsonrpc");
        clear_env();
    }

    #[test]
    fn invalid_port_fails() {
        let _guard = ENV_LOCK.lock().expect("env lock");
        clear_env();
        env::set_var("BIND_PORT", "not-a-port");

        let err = Config::from_env().expect_err("expected invalid port error");
        assert!(matches!(err, ConfigError::InvalidPort));
        clear_env();
    }

    #[test]
    fn invalid_rpc_path_fails() {
        let _guard = ENV_LOCK.lock().expect("env lock");
        clear_env();
        env::set_var("RPC_PATH", "rpc");

        let err = Config::from_env().expect_err("expected invalid path error");
        assert!(matches!(err, ConfigError::InvalidRpcPath));

        env::set_var("RPC_PATH", "/health");
        let err = Config::from_env().expect_err("health path is reserved");
        assert!(matches!(err, ConfigError::InvalidRpcPath));
        clear_env();
    }

    #[test]
    fn invalid_bind_addr_fails() {
        let _guard = ENV_LOCK.lock().expect("env lock");
        clear_env();
        env::set_var("BIND_ADDR", "not an address");

        let err = Config::from_env().expect_err("expected invalid socket error");
        assert!(matches!(err, ConfigError::InvalidSocket));
        clear_env();
    }
}
