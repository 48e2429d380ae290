//! Content and name hashing

use crate::Result;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// SHA-256 of a file's content, hex encoded
pub fn file_checksum(path: &Path) -> Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Hex SHA-256 of a short string
pub(crate) fn id_digest(text: &str) -> String {
    hex::encode(Sha256::digest(text.as_bytes()))
}

/// Cheap stand-in checksum for local files, derived from the file name only
pub fn name_checksum(name: &str) -> String {
    format!("local_{}", &id_digest(name)[..16])
}
