//! Target URL validation
//!
//! A mapping target must be an absolute URL: a scheme plus a host.

use url::Url;

#[derive(Debug)]
pub enum UrlValidationError {
    EmptyUrl,
    MissingHost(String),
    InvalidFormat(String),
}

impl std::fmt::Display for UrlValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyUrl => write!(f, "URL cannot be empty"),
            Self::MissingHost(url) => {
                write!(f, "URL has no host: {}", url)
            }
            Self::InvalidFormat(msg) => write!(f, "Invalid URL format: {}", msg),
        }
    }
}

impl std::error::Error for UrlValidationError {}

/// 验证目标 URL
///
/// 检查项目：
/// 1. URL 不为空
/// 2. 必须是绝对 URL（可解析，含 scheme）
/// 3. 必须有 host
pub fn validate_url(url: &str) -> Result<(), UrlValidationError> {
    let url = url.trim();

    if url.is_empty() {
        return Err(UrlValidationError::EmptyUrl);
    }

    let parsed = Url::parse(url).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    if !parsed.has_host() {
        return Err(UrlValidationError::MissingHost(url.to_string()));
    }

    Ok(())
}
