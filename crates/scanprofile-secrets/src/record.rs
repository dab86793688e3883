//! Fixed-layout binary record for the plaintext profile.
//!
//! Layout (version 1), all integers little-endian:
//!
//! ```text
//! u8  version = 1
//! u8  field count = 4
//! u32 len | server (UTF-8)
//! u16 port
//! u32 len | username (UTF-8)
//! u32 len | password (UTF-8)
//! ```
//!
//! The encoder returns a [`Zeroizing`] buffer because it holds the password.

use scanprofile_core::SecretString;
use zeroize::Zeroizing;

use crate::error::{ProfileError, Result};
use crate::types::Profile;

pub const RECORD_VERSION: u8 = 1;
const FIELD_COUNT: u8 = 4;

/// Bytes taken by everything except the three variable-length fields.
const FIXED_LEN: usize = 1 + 1 + 4 + 2 + 4 + 4;

/// Serialize a profile into a version 1 record.
///
/// Fails with [`ProfileError::Encoding`] when the record would exceed
/// `max_len` bytes.
pub fn encode_record(profile: &Profile, max_len: usize) -> Result<Zeroizing<Vec<u8>>> {
    let server = profile.server.as_bytes();
    let username = profile.username.as_bytes();
    let password = profile.password.expose_bytes();

    let total = FIXED_LEN + server.len() + username.len() + password.len();
    if total > max_len {
        return Err(ProfileError::Encoding(format!(
            "record of {total} bytes exceeds limit of {max_len} bytes"
        )));
    }

    let mut buf = Zeroizing::new(Vec::with_capacity(total));
    buf.push(RECORD_VERSION);
    buf.push(FIELD_COUNT);
    put_bytes(&mut buf, server, "server")?;
    buf.extend_from_slice(&profile.port.to_le_bytes());
    put_bytes(&mut buf, username, "username")?;
    put_bytes(&mut buf, password, "password")?;
    Ok(buf)
}

fn put_bytes(buf: &mut Vec<u8>, value: &[u8], field: &str) -> Result<()> {
    let len = u32::try_from(value.len())
        .map_err(|_| ProfileError::Encoding(format!("{field} is too long")))?;
    buf.extend_from_slice(&len.to_le_bytes());
    buf.extend_from_slice(value);
    Ok(())
}

/// Parse a version 1 record.
///
/// Either every field parses and the whole buffer is consumed, or
/// [`ProfileError::CorruptRecord`] is returned and nothing is kept.
pub fn decode_record(bytes: &[u8]) -> Result<Profile> {
    let mut reader = RecordReader::new(bytes);

    let version = reader.read_u8("version")?;
    if version != RECORD_VERSION {
        return Err(corrupt(format!("unsupported record version {version}")));
    }
    let fields = reader.read_u8("field count")?;
    if fields != FIELD_COUNT {
        return Err(corrupt(format!(
            "expected {FIELD_COUNT} fields, found {fields}"
        )));
    }

    let server = reader.read_string("server")?;
    let port = reader.read_u16("port")?;
    let username = reader.read_string("username")?;
    let password = SecretString::from_utf8(reader.read_bytes("password")?.to_vec())
        .map_err(|_| corrupt("password is not valid UTF-8"))?;

    if !reader.is_empty() {
        return Err(corrupt(format!(
            "{} trailing bytes after last field",
            reader.remaining()
        )));
    }

    let profile = Profile {
        server,
        port,
        username,
        password,
    };
    profile
        .validate()
        .map_err(|e| corrupt(format!("decoded profile is invalid ({e})")))?;
    Ok(profile)
}

fn corrupt(msg: impl Into<String>) -> ProfileError {
    ProfileError::CorruptRecord(msg.into())
}

/// Bounds-checked cursor over a record buffer.
struct RecordReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> RecordReader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    fn take(&mut self, n: usize, field: &str) -> Result<&'a [u8]> {
        if n > self.remaining() {
            return Err(corrupt(format!(
                "{field} needs {n} bytes but only {} remain",
                self.remaining()
            )));
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn read_u8(&mut self, field: &str) -> Result<u8> {
        Ok(self.take(1, field)?[0])
    }

    fn read_u16(&mut self, field: &str) -> Result<u16> {
        let b = self.take(2, field)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    fn read_u32(&mut self, field: &str) -> Result<u32> {
        let b = self.take(4, field)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn read_bytes(&mut self, field: &str) -> Result<&'a [u8]> {
        let len = self.read_u32(field)? as usize;
        self.take(len, field)
    }

    fn read_string(&mut self, field: &str) -> Result<String> {
        let bytes = self.read_bytes(field)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| corrupt(format!("{field} is not valid UTF-8")))
    }
}
