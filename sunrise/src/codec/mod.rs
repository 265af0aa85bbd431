//! Field codec packing an identity record into an opaque, randomized string.
//!
//! Encoding interleaves the six identity fields with the hyphen groups of a
//! random UUID, reverses the result character by character, and prefixes a
//! random lowercase decoy onto every entry whose index is a multiple of a
//! random stride (2..=9). Entries are comma-terminated and the stride digit
//! is appended last:
//!
//! ```text
//! record ─┬─ interleave(field>nonce>...) ─ reverse ─ decoys every k-th ─ "e,qx,...,k"
//! nonce ──┘
//! ```
//!
//! This is obfuscation only. Anyone holding an encoded string can recover the
//! record; confidentiality and integrity come from the signed session token
//! that carries it.
//!
//! ## Known defect
//!
//! Empty fields are dropped during decode, so a record with an empty field
//! comes back shifted (and, having fewer than six fields, fails to decode).
//! Fields containing `>` or `,` cannot be represented and are refused by
//! [`encode`], as are creation timestamps outside years 0000..=9999. Every
//! record `encode` accepts without an empty field decodes back to itself.
//!
//! ## Example
//!
//! ```
//! use sunrise::auth::IdentityRecord;
//! use sunrise::codec;
//!
//! let record = IdentityRecord {
//!     id: "507f1f77bcf86cd799439011".to_string(),
//!     name: "Sun".to_string(),
//!     email: "sun@test.com".to_string(),
//!     user_id: "sunrise".to_string(),
//!     is_admin: true,
//!     created_at: "2024-01-01T00:00:00Z".parse().unwrap(),
//! };
//!
//! let encoded = codec::encode(&record, &mut rand::rng()).unwrap();
//! assert_eq!(codec::decode(encoded.as_str()).unwrap(), record);
//! ```

pub mod errors;
pub mod field_codec;
pub mod nonce;
pub mod stride;

pub use errors::{CodecError, CodecResult};
pub use field_codec::{
    ENTRY_DELIMITER, EncodedIdentity, FIELD_COUNT, SLOT_SEPARATOR, decode, encode, encode_with,
    recover_fields,
};
pub use nonce::Nonce;
pub use stride::Stride;
