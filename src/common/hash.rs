//! Hashing utilities for rendezkv
//!
//! - 128-bit placement digests (truncated BLAKE3) for rendezvous hashing
//! - Reversible key encoding for URL/filesystem usage
//! - Two-level storage path derivation to bound directory fan-out

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

/// Compute the 128-bit placement digest of the concatenated parts.
///
/// The digest is the first 16 bytes of BLAKE3 over the raw input bytes.
/// Byte order is fixed: comparing digests byte-wise is a big-endian total
/// order, which is what placement ranking relies on.
pub fn digest128(parts: &[&[u8]]) -> [u8; 16] {
    let mut hasher = blake3::Hasher::new();
    for part in parts {
        hasher.update(part);
    }
    let mut out = [0u8; 16];
    out.copy_from_slice(&hasher.finalize().as_bytes()[..16]);
    out
}

/// Encode raw key bytes for use as a single path component.
///
/// URL-safe base64 without padding: never contains `/`, and decoding
/// recovers the original bytes exactly.
pub fn encode_key(key: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(key)
}

/// Decode a key previously encoded with [`encode_key`]
pub fn decode_key(encoded: &str) -> crate::Result<Vec<u8>> {
    URL_SAFE_NO_PAD
        .decode(encoded)
        .map_err(|e| crate::Error::InvalidKey(format!("failed to decode key: {}", e)))
}

/// Derive the storage path for a key inside a volume.
///
/// Format: `/{aa}/{bb}/{encoded-key}` where `aa` and `bb` are the first two
/// bytes of the key digest in lowercase hex. The two nested levels cap any
/// single directory at 256x256 buckets. The path depends on the key alone,
/// so every volume is addressed with the same path shape.
pub fn key_path(key: &[u8]) -> String {
    let digest = digest128(&[key]);
    format!("/{:02x}/{:02x}/{}", digest[0], digest[1], encode_key(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest128_deterministic() {
        let a = digest128(&[b"key", b"volume"]);
        let b = digest128(&[b"key", b"volume"]);
        assert_eq!(a, b);
        assert_ne!(a, digest128(&[b"key", b"other"]));
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let keys: Vec<&[u8]> = vec![
            b"plain-key",
            b"path/with/slashes",
            b"spaces and %percent",
            b"\x00\x01\xfe\xff",
            b"",
        ];
        for key in keys {
            let encoded = encode_key(key);
            assert!(!encoded.contains('/'), "encoded key contains separator");
            assert_eq!(decode_key(&encoded).unwrap(), key);
        }
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_key("not base64!!!").is_err());
    }

    #[test]
    fn test_key_path_stable() {
        let p1 = key_path(b"/foo");
        let p2 = key_path(b"/foo");
        assert_eq!(p1, p2);
    }

    #[test]
    fn test_key_path_shape() {
        let path = key_path(b"my/key");
        let parts: Vec<&str> = path.split('/').collect();
        // leading slash yields an empty first element
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[1].len(), 2);
        assert_eq!(parts[2].len(), 2);

        // final segment round-trips to the original key
        assert_eq!(decode_key(parts[3]).unwrap(), b"my/key");
    }
}
