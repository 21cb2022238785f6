//! Descriptor of the remote CloudApp endpoint.

use std::fmt;

use serde::{Deserialize, Serialize};

const MY_CL_LY_SCHEME: &str = "http";
const MY_CL_LY_HOST: &str = "my.cl.ly";
const MY_CL_LY_PORT: u16 = 80;

/// Immutable scheme/host/port/auth tuple identifying a CloudApp service.
///
/// The auth token is opaque to this crate: it is carried for whoever
/// configures the transport and never written into request URIs or logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Host {
    scheme: String,
    host: String,
    port: u16,
    auth: String,
}

impl Host {
    pub fn new(scheme: &str, host: &str, port: u16, auth: &str) -> Self {
        Self {
            scheme: scheme.to_string(),
            host: host.to_string(),
            port,
            auth: auth.to_string(),
        }
    }

    /// The public CloudApp endpoint.
    pub fn my_cl_ly(auth: &str) -> Self {
        Self::new(MY_CL_LY_SCHEME, MY_CL_LY_HOST, MY_CL_LY_PORT, auth)
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn auth(&self) -> &str {
        &self.auth
    }

    /// Format `scheme://host:port{path}`. `path` is appended verbatim.
    pub fn uri(&self, path: &str) -> String {
        format!("{}://{}:{}{}", self.scheme, self.host, self.port, path)
    }
}

impl fmt::Debug for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Host")
            .field("scheme", &self.scheme)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("auth", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uri_joins_all_parts() {
        let host = Host::new("https", "api.example.com", 8443, "token");
        assert_eq!(host.uri("/items/1"), "https://api.example.com:8443/items/1");
    }

    #[test]
    fn uri_appends_path_verbatim() {
        let host = Host::new("http", "localhost", 3000, "");
        assert_eq!(host.uri("items"), "http://localhost:3000items");
        assert_eq!(host.uri(""), "http://localhost:3000");
    }

    #[test]
    fn my_cl_ly_defaults() {
        let host = Host::my_cl_ly("secret");
        assert_eq!(host.scheme(), "http");
        assert_eq!(host.host(), "my.cl.ly");
        assert_eq!(host.port(), 80);
        assert_eq!(host.auth(), "secret");
    }

    #[test]
    fn debug_redacts_auth() {
        let host = Host::new("http", "localhost", 3000, "super-secret");
        let rendered = format!("{host:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("localhost"));
    }

    #[test]
    fn deserializes_from_config_json() {
        let host: Host = serde_json::from_str(
            r#"{"scheme":"http","host":"localhost","port":3000,"auth":"abc"}"#,
        )
        .unwrap();
        assert_eq!(host, Host::new("http", "localhost", 3000, "abc"));
    }
}
