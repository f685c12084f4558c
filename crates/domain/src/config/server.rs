use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// HTTP listener
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Where the chat API listens and which browser origins may call it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "d_host")]
    pub host: String,
    #[serde(default = "d_8080")]
    pub port: u16,
    #[serde(default)]
    pub cors: CorsConfig,
}

impl ServerConfig {
    /// `host:port`, ready for `TcpListener::bind`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: d_host(),
            port: d_8080(),
            cors: CorsConfig::default(),
        }
    }
}

/// Browser origins allowed to call the API.
///
/// An entry ending in `:*` matches any port on that host. A lone `"*"`
/// allows every origin and is flagged by `Config::validate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    #[serde(default = "d_cors_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: d_cors_origins(),
        }
    }
}

// ── serde default helpers ───────────────────────────────────────────

fn d_host() -> String {
    "127.0.0.1".into()
}
fn d_8080() -> u16 {
    8080
}
fn d_cors_origins() -> Vec<String> {
    vec!["http://localhost:*".into(), "http://127.0.0.1:*".into()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_joins_host_and_port() {
        let cfg: ServerConfig = toml::from_str(
            r#"
            host = "0.0.0.0"
            port = 9090
        "#,
        )
        .unwrap();
        assert_eq!(cfg.bind_addr(), "0.0.0.0:9090");
    }

    #[test]
    fn cors_defaults_to_local_wildcard_ports() {
        let cfg: ServerConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.bind_addr(), "127.0.0.1:8080");
        assert!(cfg
            .cors
            .allowed_origins
            .iter()
            .all(|o| o.ends_with(":*")));
    }

    #[test]
    fn explicit_origins_replace_defaults() {
        let cfg: ServerConfig = toml::from_str(
            r#"
            [cors]
            allowed_origins = ["https://forum.example.com"]
        "#,
        )
        .unwrap();
        assert_eq!(cfg.cors.allowed_origins, vec!["https://forum.example.com"]);
    }
}
