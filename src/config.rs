use crate::service::DEFAULT_AUTHORIZED_TAGS;
use eyre::{Result, WrapErr};
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub server: Server,
    pub authorization: Authorization,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Server {
    pub address: IpAddr,
    pub port: u16,
}

impl Default for Server {
    fn default() -> Server {
        Server {
            address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8080,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Authorization {
    pub tags: Vec<String>,
}

impl Default for Authorization {
    fn default() -> Authorization {
        Authorization {
            tags: DEFAULT_AUTHORIZED_TAGS.map(String::from).to_vec(),
        }
    }
}

impl Config {
    /// Load the configuration from `file_name`, or use the defaults if no
    /// file has been given.
    pub fn load(file_name: Option<&Path>) -> Result<Config> {
        let Some(file_name) = file_name else {
            return Ok(Config::default());
        };
        let content = std::fs::read_to_string(file_name)
            .wrap_err_with(|| format!("cannot load configuration file {}", file_name.display()))?;
        Config::parse(&content)
            .wrap_err_with(|| format!("cannot parse configuration file {}", file_name.display()))
    }

    pub fn parse(content: &str) -> Result<Config> {
        Ok(toml::from_str(content)?)
    }

    pub fn listen_address(&self) -> SocketAddr {
        SocketAddr::new(self.server.address, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::load(None).unwrap();
        assert_eq!(config.listen_address(), "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.authorization.tags, vec!["39:68:B3:B9:5B".to_owned()]);
    }

    #[test]
    fn test_partial_file() {
        let config = Config::parse("[server]\nport = 3000\n").unwrap();
        assert_eq!(config.listen_address(), "0.0.0.0:3000".parse().unwrap());
        assert_eq!(config.authorization.tags.len(), 1);
    }

    #[test]
    fn test_full_file() {
        let config = Config::parse(
            r#"
            [server]
            address = "127.0.0.1"
            port = 80

            [authorization]
            tags = ["AA:BB:CC:DD:EE", "11:22:33:44:55"]
            "#,
        )
        .unwrap();
        assert_eq!(config.listen_address(), "127.0.0.1:80".parse().unwrap());
        assert_eq!(
            config.authorization.tags,
            vec!["AA:BB:CC:DD:EE".to_owned(), "11:22:33:44:55".to_owned()]
        );
    }

    #[test]
    fn test_invalid_file() {
        assert!(Config::parse("[server]\nport = \"http\"\n").is_err());
        assert!(Config::parse("[solver]\nloader = \"mysql\"\n").is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load(Some(Path::new("/nonexistent/rvote.toml"))).unwrap_err();
        assert!(err.to_string().contains("cannot load configuration file"));
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("rvote.toml");
        std::fs::write(&path, "[server]\nport = 9000\n\n[authorization]\ntags = [\"AA:BB\"]\n")
            .unwrap();
        let config = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(config.listen_address(), "0.0.0.0:9000".parse().unwrap());
        assert_eq!(config.authorization.tags, vec!["AA:BB".to_owned()]);
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("rvote.toml");
        std::fs::write(&path, "[server]\nport = -1\n").unwrap();
        let err = Config::load(Some(path.as_path())).unwrap_err();
        assert!(err.to_string().contains("cannot parse configuration file"));
    }
}
