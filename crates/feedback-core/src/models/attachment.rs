use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

/// MIME type assumed when the client does not send one.
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// A normalized attachment descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attachment {
    pub file_name: String,
    pub file_size: u64,
    pub mime_type: String,
    /// Base64 payload, bare or as a `data:` URI. Only used for image previews.
    pub file_data: Option<String>,
}

impl Attachment {
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AttachmentDescriptor {
    file_name: Option<String>,
    #[serde(default, deserialize_with = "byte_count")]
    file_size: Option<u64>,
    mime_type: Option<String>,
    file_data: Option<String>,
}

/// Normalize the raw attachment list.
///
/// Entries that are not objects, have no (or an empty) `fileName`, or have
/// no whole-number `fileSize` are dropped. Order of the remaining entries is
/// preserved. Never fails.
pub fn normalize_attachments(raw: Vec<serde_json::Value>) -> Vec<Attachment> {
    raw.into_iter()
        .enumerate()
        .filter_map(|(index, value)| {
            let descriptor: AttachmentDescriptor = match serde_json::from_value(value) {
                Ok(d) => d,
                Err(e) => {
                    debug!(index, error = %e, "dropping malformed attachment");
                    return None;
                }
            };

            let (Some(file_name), Some(file_size)) = (
                descriptor.file_name.filter(|n| !n.is_empty()),
                descriptor.file_size,
            ) else {
                debug!(index, "dropping attachment without fileName or fileSize");
                return None;
            };

            Some(Attachment {
                file_name,
                file_size,
                mime_type: descriptor
                    .mime_type
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string()),
                file_data: descriptor.file_data.filter(|d| !d.is_empty()),
            })
        })
        .collect()
}

/// A non-negative whole number. JSON encoders sometimes emit sizes as
/// `1536.0`, so floats without a fractional part are accepted too.
fn byte_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(number) = Option::<serde_json::Number>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if let Some(size) = number.as_u64() {
        return Ok(Some(size));
    }
    match number.as_f64() {
        Some(f) if f >= 0.0 && f.fract() == 0.0 && f < u64::MAX as f64 => Ok(Some(f as u64)),
        _ => Err(D::Error::custom(format!("fileSize {number} is not a byte count"))),
    }
}
