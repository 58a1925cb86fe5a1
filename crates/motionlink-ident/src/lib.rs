//! Device identifiers for motionlink devices.
//!
//! A device identity is a 128-bit random UUID (version 4, variant 1). It is
//! generated once, persisted by the host, and sent to the device with
//! `SET_UUID`. Stored identifiers are re-serialized byte for byte; only
//! freshly generated ones get their version and variant bits forced.

pub mod error;

use std::fmt;
use std::str::FromStr;

use rand::RngCore;
use uuid::Uuid;

pub use error::{IdentError, Result};

/// Length of a binary identifier in bytes.
pub const ID_LEN: usize = 16;

/// Length of the hyphenated text form.
pub const TEXT_LEN: usize = 36;

/// A 128-bit device identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeviceId([u8; ID_LEN]);

impl DeviceId {
    /// Generate a fresh random identifier from the thread-local generator.
    pub fn generate() -> Self {
        Self::generate_with(&mut rand::rng())
    }

    /// Generate a fresh random identifier from `rng`.
    pub fn generate_with<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        let mut bytes = [0u8; ID_LEN];
        rng.fill_bytes(&mut bytes);
        mark_random_v4(&mut bytes);
        Self(bytes)
    }

    /// Wrap existing identifier bytes unchanged.
    pub const fn from_bytes(bytes: [u8; ID_LEN]) -> Self {
        Self(bytes)
    }

    /// Wrap existing identifier bytes, checking the length.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; ID_LEN] = bytes
            .try_into()
            .map_err(|_| IdentError::InvalidLength(bytes.len()))?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; ID_LEN] {
        &self.0
    }

    /// Lowercase hyphenated `8-4-4-4-12` text form.
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    /// Returns true if the version and variant bits mark a random identifier.
    pub fn is_random_v4(&self) -> bool {
        self.0[6] >> 4 == 0x4 && self.0[8] >> 6 == 0b10
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Uuid::from_bytes(self.0).hyphenated(), f)
    }
}

impl FromStr for DeviceId {
    type Err = IdentError;

    fn from_str(s: &str) -> Result<Self> {
        // Only the hyphenated form is a valid identifier on the wire.
        if s.len() != TEXT_LEN {
            return Err(IdentError::InvalidText(s.to_string()));
        }
        let uuid = Uuid::try_parse(s).map_err(|_| IdentError::InvalidText(s.to_string()))?;
        Ok(Self(uuid.into_bytes()))
    }
}

impl From<[u8; ID_LEN]> for DeviceId {
    fn from(bytes: [u8; ID_LEN]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for DeviceId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for DeviceId {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for DeviceId {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let text = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Output form requested from [`generate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdFormat {
    Binary,
    #[default]
    Text,
}

/// An identifier in the requested output form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    Binary([u8; ID_LEN]),
    Text(String),
}

impl Identifier {
    fn render(id: DeviceId, format: IdFormat) -> Self {
        match format {
            IdFormat::Binary => Identifier::Binary(id.0),
            IdFormat::Text => Identifier::Text(id.to_text()),
        }
    }
}

/// Generate a fresh identifier, or re-serialize `seed` when given.
pub fn generate(seed: Option<&[u8]>, format: IdFormat) -> Result<Identifier> {
    generate_with(&mut rand::rng(), seed, format)
}

/// Like [`generate`], drawing fresh bytes from `rng`.
pub fn generate_with<R: RngCore + ?Sized>(
    rng: &mut R,
    seed: Option<&[u8]>,
    format: IdFormat,
) -> Result<Identifier> {
    let id = match seed {
        Some(bytes) => DeviceId::from_slice(bytes)?,
        None => DeviceId::generate_with(rng),
    };
    Ok(Identifier::render(id, format))
}

/// Force version 4 into the high nibble of byte 6 and variant `10` into
/// the top bits of byte 8.
fn mark_random_v4(bytes: &mut [u8; ID_LEN]) {
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;
}
