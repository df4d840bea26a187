//! Signed bearer tokens handed out on login.
//!
//! The token only carries the user id and the id of the `auth_token` row; a
//! token is accepted as long as its signature is valid, it has not expired and
//! the row still exists.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User id
    pub sub: String,
    /// Auth token row id
    pub jti: String,
    pub exp: u64,
}

pub fn encode_token(
    user_id: i64,
    token_id: impl Into<String>,
    secret: &str,
    lifetime_seconds: u64,
) -> anyhow::Result<String> {
    let now: u64 = foodgram_shared::now().try_into()?;
    let claims = Claims {
        sub: user_id.to_string(),
        jti: token_id.into(),
        exp: now + lifetime_seconds,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}

pub fn decode_token(token: &str, secret: &str) -> anyhow::Result<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-32-bytes-long!!!";

    #[test]
    fn test_encode_decode() {
        let token = encode_token(42, "01J0000000000000000000000A", SECRET, 3600).unwrap();
        let claims = decode_token(&token, SECRET).unwrap();

        assert_eq!(claims.sub, "42");
        assert_eq!(claims.jti, "01J0000000000000000000000A");
    }

    #[test]
    fn test_decode_wrong_secret() {
        let token = encode_token(42, "token", SECRET, 3600).unwrap();

        assert!(decode_token(&token, "another-secret-key-32-bytes-long").is_err());
    }

    #[test]
    fn test_decode_garbage() {
        assert!(decode_token("not-a-token", SECRET).is_err());
    }
}
