//! Authentication strategies for Elasticsearch requests.

use reqwest::RequestBuilder;
use secrecy::{ExposeSecret, SecretString};

/// How requests authenticate against the cluster.
#[derive(Debug, Clone)]
pub enum AuthStrategy {
    /// HTTP basic authentication.
    Basic {
        username: String,
        password: SecretString,
    },
    /// Base64-encoded API key sent as `Authorization: ApiKey <key>`.
    ApiKey { key: SecretString },
    /// No credentials (security disabled, or a proxy handles auth).
    Anonymous,
}

impl AuthStrategy {
    /// Attach credentials to an outgoing request.
    pub(crate) fn apply(&self, builder: RequestBuilder) -> RequestBuilder {
        match self {
            Self::Basic { username, password } => {
                builder.basic_auth(username, Some(password.expose_secret()))
            }
            Self::ApiKey { key } => {
                builder.header("Authorization", format!("ApiKey {}", key.expose_secret()))
            }
            Self::Anonymous => builder,
        }
    }

    /// Short label used in logs. Never includes secret material.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Basic { .. } => "basic",
            Self::ApiKey { .. } => "api_key",
            Self::Anonymous => "anonymous",
        }
    }
}

impl From<&estack_config::AuthStrategy> for AuthStrategy {
    fn from(strategy: &estack_config::AuthStrategy) -> Self {
        match strategy {
            estack_config::AuthStrategy::Basic { username, password } => Self::Basic {
                username: username.clone(),
                password: password.clone(),
            },
            estack_config::AuthStrategy::ApiKey { key } => Self::ApiKey { key: key.clone() },
            estack_config::AuthStrategy::Anonymous => Self::Anonymous,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_header() {
        let auth = AuthStrategy::ApiKey {
            key: SecretString::new("abc123".to_string().into()),
        };
        let request = auth
            .apply(reqwest::Client::new().get("http://localhost:9200/"))
            .build()
            .unwrap();
        assert_eq!(
            request.headers().get("Authorization").unwrap(),
            "ApiKey abc123"
        );
    }

    #[test]
    fn test_basic_auth_header() {
        let auth = AuthStrategy::Basic {
            username: "elastic".to_string(),
            password: SecretString::new("changeme".to_string().into()),
        };
        let request = auth
            .apply(reqwest::Client::new().get("http://localhost:9200/"))
            .build()
            .unwrap();
        let header = request.headers().get("Authorization").unwrap();
        assert!(header.to_str().unwrap().starts_with("Basic "));
    }

    #[test]
    fn test_anonymous_adds_no_header() {
        let request = AuthStrategy::Anonymous
            .apply(reqwest::Client::new().get("http://localhost:9200/"))
            .build()
            .unwrap();
        assert!(request.headers().get("Authorization").is_none());
    }

    #[test]
    fn test_debug_does_not_leak_secret() {
        let auth = AuthStrategy::ApiKey {
            key: SecretString::new("super-secret".to_string().into()),
        };
        assert!(!format!("{auth:?}").contains("super-secret"));
    }
}
