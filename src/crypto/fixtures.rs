//! Fixed key material shared by the in-crate tests.
//!
//! The files live in `tests/data/` so the integration tests read the same
//! bytes. NEVER use these keys for anything but tests.

/// 2048-bit PKCS#1 private key
pub const FIXED_PRIVATE_PEM: &str = include_str!("../../tests/data/fixed_private.pem");

/// Public half of [`FIXED_PRIVATE_PEM`]
pub const FIXED_PUBLIC_PEM: &str = include_str!("../../tests/data/fixed_public.pem");

/// `"hello world"` encrypted for [`FIXED_PUBLIC_PEM`] with PKCS#1 v1.5 by an
/// independent implementation
pub const HELLO_WORLD_PKCS1: &str = include_str!("../../tests/data/hello_world_pkcs1.b64");

/// `"hello world"` encrypted for [`FIXED_PUBLIC_PEM`] with OAEP-SHA256 by an
/// independent implementation
pub const HELLO_WORLD_OAEP: &str = include_str!("../../tests/data/hello_world_oaep.b64");

/// 512-bit PKCS#1 private key, too small for OAEP-SHA256
pub const SMALL_PRIVATE_PEM: &str = include_str!("../../tests/data/small_512.pem");
