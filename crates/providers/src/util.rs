//! Shared helpers for provider adapters: error conversion and API key
//! resolution.

use fc_domain::config::AuthConfig;
use fc_domain::error::{Error, Result};

/// Convert a [`reqwest::Error`] into the domain [`Error`] type.
///
/// Timeouts map to [`Error::Timeout`]; everything else to [`Error::Http`].
pub fn from_reqwest(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Timeout(e.to_string())
    } else {
        Error::Http(e.to_string())
    }
}

/// Resolve the API key from an [`AuthConfig`].
///
/// Precedence:
/// 1. `key` field (plaintext, warns)
/// 2. `service` + `account` → OS keychain via `keyring`
/// 3. `env` field
/// 4. Keychain headless fallback: env var `{SERVICE}_{ACCOUNT}` uppercased
pub fn resolve_api_key(auth: &AuthConfig) -> Result<String> {
    if let Some(ref key) = auth.key {
        tracing::warn!("API key loaded from plaintext config field 'key'; prefer 'env' or keychain");
        return Ok(key.clone());
    }

    let keychain = auth.service.as_deref().zip(auth.account.as_deref());

    if let Some((service, account)) = keychain {
        match resolve_from_keychain(service, account) {
            Ok(secret) => return Ok(secret),
            Err(e) => tracing::warn!(
                service = %service,
                account = %account,
                error = %e,
                "keychain lookup failed, falling through to env"
            ),
        }
    }

    let env_err = match auth.env {
        Some(ref var) => match std::env::var(var) {
            Ok(value) if !value.is_empty() => return Ok(value),
            _ => Some(Error::Auth(format!(
                "environment variable '{var}' not set or empty"
            ))),
        },
        None => None,
    };

    if let Some((service, account)) = keychain {
        let fallback = keychain_fallback_env_name(service, account);
        if let Ok(value) = std::env::var(&fallback) {
            tracing::info!(env_var = %fallback, "API key resolved from keychain fallback env var");
            return Ok(value);
        }
    }

    Err(env_err.unwrap_or_else(|| {
        Error::Auth("no API key configured: set 'key', 'env', or keychain 'service'+'account'".into())
    }))
}

/// Read a secret from the OS keychain (macOS Keychain, Windows Credential
/// Manager, Linux Secret Service).
pub fn resolve_from_keychain(service: &str, account: &str) -> Result<String> {
    let entry = keyring::Entry::new(service, account)
        .map_err(|e| Error::Auth(format!("keyring entry creation failed: {e}")))?;
    entry
        .get_password()
        .map_err(|e| Error::Auth(format!("keyring get_password failed: {e}")))
}

/// `("forumchat", "openai-key")` → `"FORUMCHAT_OPENAI_KEY"`.
pub fn keychain_fallback_env_name(service: &str, account: &str) -> String {
    format!(
        "{}_{}",
        service.to_uppercase().replace('-', "_"),
        account.to_uppercase().replace('-', "_"),
    )
}
