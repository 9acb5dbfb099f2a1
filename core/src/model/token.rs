use {
    sha3::{Digest, Sha3_256},
    std::fmt,
    thiserror::Error,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Enter your Canvas access token!")]
    Empty,
}

/// An LMS personal access token.
///
/// Never blank, otherwise kept exactly as entered. Formatting prints a short fingerprint instead of the secret;
/// the raw value is only reachable through [`Token::expose`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Token(String);

impl Token {
    pub fn new(raw: &str) -> Result<Self, TokenError> {
        if raw.trim().is_empty() {
            return Err(TokenError::Empty);
        }
        Ok(Self(raw.into()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// First 8 hex characters of the SHA3-256 digest, for log correlation.
    pub fn fingerprint(&self) -> String {
        let digest: [u8; 32] = Sha3_256::digest(self.0.as_bytes()).into();
        hex::encode(&digest[..4])
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({})", self.fingerprint())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fingerprint())
    }
}

#[test]
fn test_token() {
    assert_eq!(Token::new(""), Err(TokenError::Empty));
    assert_eq!(Token::new("  \n"), Err(TokenError::Empty));

    let token = Token::new("1234~secret").unwrap();
    assert_eq!(token.expose(), "1234~secret");

    // Opaque: surrounding whitespace is not ours to strip
    assert_eq!(Token::new(" 1234~secret ").unwrap().expose(), " 1234~secret ");

    let fingerprint = token.fingerprint();
    assert_eq!(fingerprint.len(), 8);
    assert!(!format!("{token:?}").contains("secret"));
    assert_eq!(token.to_string(), fingerprint);
}
