use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// MIME type of every captured selfie.
pub const JPEG_MIME_TYPE: &str = "image/jpeg";

/// The single image a session produces.
///
/// Ownership moves to the caller on completion; the session keeps no copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedImage {
    pub id: Uuid,
    pub encoded_bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub captured_at: DateTime<Utc>,
    /// Lowercase hex SHA-256 of `encoded_bytes`.
    pub checksum: String,
}

impl CapturedImage {
    pub fn new(encoded_bytes: Vec<u8>, width: u32, height: u32) -> Self {
        let checksum = hex_sha256(&encoded_bytes);
        Self {
            id: Uuid::new_v4(),
            encoded_bytes,
            width,
            height,
            captured_at: Utc::now(),
            checksum,
        }
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.encoded_bytes)
    }

    /// `data:image/jpeg;base64,...`, the form the report stores.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", JPEG_MIME_TYPE, self.to_base64())
    }

    pub fn metadata(&self) -> CaptureMetadata {
        CaptureMetadata {
            id: self.id.to_string(),
            mime_type: JPEG_MIME_TYPE.to_string(),
            width: self.width,
            height: self.height,
            size_bytes: self.encoded_bytes.len() as u64,
            checksum: self.checksum.clone(),
            created_at: self.captured_at.to_rfc3339(),
        }
    }
}

/// Serializable description of a capture, for logs and the delegate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureMetadata {
    pub id: String,
    pub mime_type: String,
    pub width: u32,
    pub height: u32,
    pub size_bytes: u64,
    pub checksum: String,
    pub created_at: String,
}

fn hex_sha256(data: &[u8]) -> String {
    Sha256::digest(data)
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}
