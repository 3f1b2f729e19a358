//! Length-prefixed request/response shim for handing one record to
//! another process (e.g. a browser extension's native-messaging host).
//!
//! Each message is a 4-byte little-endian length followed by that many
//! bytes of UTF-8 JSON.
//!
//! Request:  `{"site": "example.com", "password": "<master password>"}`
//! Response: `{"success": true, "entry": {...}}` or
//!           `{"success": false, "error": "..."}`

use std::io::{self, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::errors::{VaultError, Result};
use crate::vault::{CredentialRecord, VaultSession};

/// Largest accepted message body (1 MiB).
pub const MAX_MESSAGE_SIZE: usize = 1024 * 1024;

/// A lookup request from the calling process.
#[derive(Default, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct HostRequest {
    #[serde(default)]
    pub site: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// The single response written back.
#[derive(Debug, Serialize)]
pub struct HostResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<CredentialRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HostResponse {
    pub fn found(entry: CredentialRecord) -> Self {
        Self {
            success: true,
            entry: Some(entry),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            entry: None,
            error: Some(message.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Framing
// ---------------------------------------------------------------------------

/// Read one framed message.  Returns `Ok(None)` on a clean EOF before the
/// length prefix.
pub fn read_frame<R: Read>(reader: &mut R) -> Result<Option<Vec<u8>>> {
    let mut len_buf = [0u8; 4];
    match reader.read_exact(&mut len_buf) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e.into()),
    }

    let len = u32::from_le_bytes(len_buf) as usize;
    if len > MAX_MESSAGE_SIZE {
        return Err(VaultError::HostProtocol(format!(
            "message of {len} bytes exceeds the {MAX_MESSAGE_SIZE} byte limit"
        )));
    }

    let mut body = vec![0u8; len];
    reader
        .read_exact(&mut body)
        .map_err(|e| VaultError::HostProtocol(format!("truncated message body: {e}")))?;
    Ok(Some(body))
}

/// Write one framed message and flush.
pub fn write_frame<W: Write>(writer: &mut W, body: &[u8]) -> Result<()> {
    let len = u32::try_from(body.len()).map_err(|_| {
        VaultError::HostProtocol(format!("message of {} bytes is too large", body.len()))
    })?;
    writer.write_all(&len.to_le_bytes())?;
    writer.write_all(body)?;
    writer.flush()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Request handling
// ---------------------------------------------------------------------------

/// Answer one request body against the vault at `vault_path`.
///
/// Every failure, including a bad password, becomes an error response.
pub fn handle_request(body: &[u8], vault_path: &Path) -> HostResponse {
    match lookup(body, vault_path) {
        Ok(response) => response,
        Err(e) => HostResponse::failure(e.to_string()),
    }
}

fn lookup(body: &[u8], vault_path: &Path) -> Result<HostResponse> {
    let request: HostRequest = serde_json::from_slice(body)
        .map_err(|e| VaultError::HostProtocol(format!("invalid request JSON: {e}")))?;

    let (site, password) = match (request.site.as_deref(), request.password.as_deref()) {
        (Some(site), Some(password)) if !site.is_empty() && !password.is_empty() => {
            (site, password)
        }
        _ => {
            return Err(VaultError::HostProtocol(
                "missing 'site' or 'password' in request".into(),
            ))
        }
    };

    let mut session = VaultSession::new(vault_path);
    let _guard = session.lock_shared()?;
    session.load(password)?;

    Ok(match session.get(site) {
        Some(record) => HostResponse::found(record.clone()),
        None => HostResponse::failure("site not found"),
    })
}

/// Serve a single request from `reader` and write the response to `writer`.
///
/// A clean EOF with no request writes nothing.
pub fn serve<R: Read, W: Write>(reader: &mut R, writer: &mut W, vault_path: &Path) -> Result<()> {
    let response = match read_frame(reader) {
        Ok(Some(body)) => handle_request(&body, vault_path),
        Ok(None) => return Ok(()),
        Err(e) => HostResponse::failure(e.to_string()),
    };

    tracing::debug!(success = response.success, "host request handled");

    let body = serde_json::to_vec(&response)
        .map_err(|e| VaultError::SerializationError(format!("host response: {e}")))?;
    write_frame(writer, &body)
}
