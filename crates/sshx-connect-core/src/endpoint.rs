//! Endpoint reference parsing.

use thiserror::Error;

/// Endpoint parsing error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EndpointError {
    #[error("no session token in endpoint: {0}")]
    MissingToken(String),
}

/// Extract the session token from an endpoint reference.
///
/// An endpoint looks like `https://sshx.io/s/WlfhyC1F1t#kVTAZ6tyn1dY3G`:
/// the token is the path segment after the last `/s/`, with the fragment
/// secret (everything from `#` on) stripped. The join tool takes the token;
/// the browser takes the full endpoint.
///
/// # Errors
/// Returns [`EndpointError::MissingToken`] if the endpoint has no `/s/`
/// segment or the segment is empty.
pub fn session_token(endpoint: &str) -> Result<&str, EndpointError> {
    let (_, tail) = endpoint
        .rsplit_once("/s/")
        .ok_or_else(|| EndpointError::MissingToken(endpoint.to_string()))?;

    let token = match tail.find('#') {
        Some(pos) => &tail[..pos],
        None => tail,
    };

    if token.is_empty() {
        return Err(EndpointError::MissingToken(endpoint.to_string()));
    }
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_with_secret() {
        let token = session_token("https://sshx.io/s/WlfhyC1F1t#kVTAZ6tyn1dY3G").unwrap();
        assert_eq!(token, "WlfhyC1F1t");
    }

    #[test]
    fn test_token_without_secret() {
        let token = session_token("https://sshx.io/s/WlfhyC1F1t").unwrap();
        assert_eq!(token, "WlfhyC1F1t");
    }

    #[test]
    fn test_last_segment_wins() {
        // A host path that itself contains /s/ must not confuse the parser.
        let token = session_token("https://mirror.example/s/proxy/s/abc123#x").unwrap();
        assert_eq!(token, "abc123");
    }

    #[test]
    fn test_missing_segment_is_rejected() {
        let err = session_token("https://sshx.io/about").unwrap_err();
        assert!(matches!(err, EndpointError::MissingToken(_)));
    }

    #[test]
    fn test_empty_token_is_rejected() {
        let err = session_token("https://sshx.io/s/#secret").unwrap_err();
        assert!(matches!(err, EndpointError::MissingToken(_)));
    }
}
