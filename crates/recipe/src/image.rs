use base64::{Engine, engine::general_purpose::STANDARD};

/// An image received inline as `data:image/<type>;base64,<payload>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataImage {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl DataImage {
    pub fn parse(value: &str) -> Option<Self> {
        let rest = value.trim().strip_prefix("data:")?;
        let (meta, payload) = rest.split_once(',')?;
        let content_type = meta.strip_suffix(";base64")?;

        let subtype = content_type.strip_prefix("image/")?;
        if subtype.is_empty()
            || !subtype
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        {
            return None;
        }

        let bytes = STANDARD.decode(payload).ok()?;
        if bytes.is_empty() {
            return None;
        }

        Some(Self {
            content_type: content_type.to_ascii_lowercase(),
            bytes,
        })
    }
}
