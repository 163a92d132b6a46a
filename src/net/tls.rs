//! TLS configuration and certificate loading.

use std::io;
use std::path::Path;

use axum_server::tls_rustls::RustlsConfig;

use crate::config::TlsConfig;

/// Load the listener's rustls config from PEM certificate and key files.
///
/// The certificate and key may live in the same file.
pub async fn load_tls_config(config: &TlsConfig) -> Result<RustlsConfig, io::Error> {
    let cert_path = Path::new(&config.cert_path);
    let key_path = Path::new(&config.key_path);

    ensure_exists(cert_path, "Certificate")?;
    ensure_exists(key_path, "Private key")?;

    let tls = RustlsConfig::from_pem_file(cert_path, key_path).await?;
    tracing::info!(
        cert_path = %cert_path.display(),
        key_path = %key_path.display(),
        "TLS certificate loaded"
    );
    Ok(tls)
}

fn ensure_exists(path: &Path, what: &str) -> Result<(), io::Error> {
    if path.exists() {
        Ok(())
    } else {
        Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{what} file not found: {}", path.display()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_certificate_is_not_found() {
        let config = TlsConfig {
            cert_path: "/nonexistent/testing.pem".into(),
            key_path: "/nonexistent/testing.pem".into(),
        };

        let err = load_tls_config(&config).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(err.to_string().contains("Certificate file not found"));
    }
}
