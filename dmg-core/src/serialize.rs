//! Serde support for the fixed-size RAM arrays. serde's derive cannot handle
//! arrays of this size on its own, so the snapshot derives route them through
//! these helpers, which write the bytes as a plain sequence and check the
//! length on the way back in.

use serde::de::Error;
use serde::{Deserialize, Deserializer, Serializer};

pub fn serialize_byte_array<S, const N: usize>(
    array: &[u8; N],
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_seq(array)
}

pub fn deserialize_byte_array<'de, D, const N: usize>(deserializer: D) -> Result<[u8; N], D::Error>
where
    D: Deserializer<'de>,
{
    let bytes = Vec::<u8>::deserialize(deserializer)?;
    let len = bytes.len();
    <[u8; N]>::try_from(bytes).map_err(|_| D::Error::custom(format!("expected {N} bytes, got {len}")))
}
