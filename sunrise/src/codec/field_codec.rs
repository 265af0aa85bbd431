//! Encode and decode of identity records.

use super::{
    errors::{CodecError, CodecResult},
    nonce::Nonce,
    stride::Stride,
};
use crate::auth::IdentityRecord;
use chrono::{DateTime, Datelike, SecondsFormat, Utc};
use rand::Rng;
use std::fmt;

/// Separates field and nonce slots in the interleaved string
pub const SLOT_SEPARATOR: char = '>';

/// Terminates every entry of the scrambled string
pub const ENTRY_DELIMITER: char = ',';

/// Number of identity fields carried on the wire
pub const FIELD_COUNT: usize = 6;

/// Creation years RFC 3339 can carry
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 0..=9999;

const FIELD_NAMES: [&str; FIELD_COUNT] = ["id", "name", "email", "userId", "isAdmin", "createdAt"];

/// Opaque output of [`encode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedIdentity(String);

impl EncodedIdentity {
    /// Borrow the wire string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take the wire string
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for EncodedIdentity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EncodedIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Encode a record with a fresh nonce, stride and decoys drawn from `rng`
///
/// # Arguments
///
/// * `record` - Identity to encode
/// * `rng` - Randomness source for the nonce, the stride and the decoy letters
///
/// # Errors
///
/// * `CodecError::ReservedCharacter` - A field contains `>` or `,`
/// * `CodecError::TimestampOutOfRange` - `created_at` falls outside years 0000..=9999
pub fn encode<R: Rng + ?Sized>(record: &IdentityRecord, rng: &mut R) -> CodecResult<EncodedIdentity> {
    let nonce = Nonce::generate(rng);
    let stride = Stride::random(rng);
    encode_with(record, &nonce, stride, rng)
}

/// Encode a record with an injected nonce and stride
///
/// `rng` only supplies the decoy letters.
///
/// # Errors
///
/// * `CodecError::ReservedCharacter` - A field contains `>` or `,`
/// * `CodecError::TimestampOutOfRange` - `created_at` falls outside years 0000..=9999
pub fn encode_with<R: Rng + ?Sized>(
    record: &IdentityRecord,
    nonce: &Nonce,
    stride: Stride,
    rng: &mut R,
) -> CodecResult<EncodedIdentity> {
    let year = record.created_at.year();
    if !YEAR_RANGE.contains(&year) {
        return Err(CodecError::TimestampOutOfRange(year));
    }

    let fields = field_texts(record);
    for (&name, text) in FIELD_NAMES.iter().zip(&fields) {
        if let Some(ch) = text.chars().find(|&c| c == SLOT_SEPARATOR || c == ENTRY_DELIMITER) {
            return Err(CodecError::ReservedCharacter { field: name, ch });
        }
    }

    let interleaved = interleave(&fields, &nonce.segments());
    Ok(EncodedIdentity(scramble(&interleaved, stride, rng)))
}

/// Decode an encoded string back into a record
///
/// # Errors
///
/// * `CodecError::MissingStride` / `CodecError::InvalidStride` - Bad trailing key
/// * `CodecError::TooFewFields` - Fewer than six non-empty fields recovered
/// * `CodecError::InvalidFlag` / `CodecError::InvalidTimestamp` - Unparseable field text
pub fn decode(encoded: &str) -> CodecResult<IdentityRecord> {
    let fields = recover_fields(encoded)?;
    if fields.len() < FIELD_COUNT {
        return Err(CodecError::TooFewFields {
            found: fields.len(),
        });
    }

    let mut fields = fields.into_iter();
    // Length checked above.
    let mut next = || fields.next().unwrap_or_default();

    let id = next();
    let name = next();
    let email = next();
    let user_id = next();
    let is_admin = parse_flag(&next())?;
    let created_at = parse_timestamp(&next())?;

    Ok(IdentityRecord {
        id,
        name,
        email,
        user_id,
        is_admin,
        created_at,
    })
}

/// Recover the raw field texts of an encoded string
///
/// Empty fields are dropped, so a record with an empty field comes back with
/// every later field shifted one slot to the left.
///
/// # Errors
///
/// * `CodecError::MissingStride` / `CodecError::InvalidStride` - Bad trailing key
pub fn recover_fields(encoded: &str) -> CodecResult<Vec<String>> {
    let mut chars = encoded.chars();
    let key = chars.next_back().ok_or(CodecError::MissingStride)?;
    let stride = Stride::from_key(key)?;

    let entries: Vec<&str> = chars
        .as_str()
        .split(ENTRY_DELIMITER)
        .enumerate()
        .map(|(index, entry)| {
            if stride.marks(index) {
                strip_decoy(entry)
            } else {
                entry
            }
        })
        .collect();

    let restored: String = entries.into_iter().rev().collect();

    Ok(restored
        .split(SLOT_SEPARATOR)
        .step_by(2)
        .filter(|field| !field.is_empty())
        .map(str::to_string)
        .collect())
}

/// Canonical text of each field, in wire order
fn field_texts(record: &IdentityRecord) -> [String; FIELD_COUNT] {
    [
        record.id.clone(),
        record.name.clone(),
        record.email.clone(),
        record.user_id.clone(),
        record.is_admin.to_string(),
        format_timestamp(&record.created_at),
    ]
}

/// `field>segment>` for every slot, padding the shorter side with empty text
fn interleave(fields: &[String], segments: &[&str]) -> String {
    let slots = fields.len().max(segments.len());
    let mut out = String::new();

    for i in 0..slots {
        out.push_str(fields.get(i).map(String::as_str).unwrap_or(""));
        out.push(SLOT_SEPARATOR);
        out.push_str(segments.get(i).copied().unwrap_or(""));
        out.push(SLOT_SEPARATOR);
    }

    out
}

/// Reverse, prefix a decoy on every marked entry, delimit, append the key
fn scramble<R: Rng + ?Sized>(interleaved: &str, stride: Stride, rng: &mut R) -> String {
    let mut out = String::with_capacity(interleaved.len() * 3 + 1);

    for (index, ch) in interleaved.chars().rev().enumerate() {
        if stride.marks(index) {
            out.push(decoy_letter(rng));
        }
        out.push(ch);
        out.push(ENTRY_DELIMITER);
    }

    out.push(stride.as_key());
    out
}

fn decoy_letter<R: Rng + ?Sized>(rng: &mut R) -> char {
    char::from(rng.random_range(b'a'..=b'z'))
}

/// Second character of a decorated entry, or empty text when there is none
fn strip_decoy(entry: &str) -> &str {
    let mut chars = entry.char_indices().skip(1);
    match chars.next() {
        Some((start, ch)) => &entry[start..start + ch.len_utf8()],
        None => "",
    }
}

fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn parse_flag(text: &str) -> CodecResult<bool> {
    match text {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(CodecError::InvalidFlag(other.to_string())),
    }
}

fn parse_timestamp(text: &str) -> CodecResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|_| CodecError::InvalidTimestamp(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};
    use uuid::Uuid;

    fn sample_record() -> IdentityRecord {
        IdentityRecord {
            id: "507f1f77bcf86cd799439011".to_string(),
            name: "Sun".to_string(),
            email: "sun@test.com".to_string(),
            user_id: "sunrise".to_string(),
            is_admin: true,
            created_at: "2024-01-01T00:00:00Z".parse().unwrap(),
        }
    }

    fn fixed_nonce() -> Nonce {
        Nonce::from_uuid(Uuid::parse_str("9b2e6c1a-3f4d-4e8a-b1c2-0d9e8f7a6b5c").unwrap())
    }

    #[test]
    fn test_interleave_alternates_fields_and_segments() {
        let fields = vec!["a".to_string(), "b".to_string()];
        assert_eq!(interleave(&fields, &["x"]), "a>x>b>>");
    }

    #[test]
    fn test_interleave_always_ends_in_separator() {
        let record = sample_record();
        let nonce = fixed_nonce();
        let out = interleave(&field_texts(&record), &nonce.segments());
        assert!(out.ends_with(">>"));
        assert!(out.starts_with("507f1f77bcf86cd799439011>9b2e6c1a>Sun>"));
    }

    #[test]
    fn test_scramble_marks_exact_positions() {
        let mut rng = StdRng::seed_from_u64(3);
        let stride = Stride::new(4).unwrap();
        // "abcdefghij" reversed is "jihgfedcba"
        let out = scramble("abcdefghij", stride, &mut rng);
        assert!(out.ends_with(",4"));

        let body = &out[..out.len() - 1];
        let entries: Vec<&str> = body.split(',').collect();
        assert_eq!(entries.len(), 11);
        assert_eq!(entries[10], "");

        let reversed: Vec<char> = "jihgfedcba".chars().collect();
        for (index, entry) in entries[..10].iter().enumerate() {
            let chars: Vec<char> = entry.chars().collect();
            if index % 4 == 0 {
                assert_eq!(chars.len(), 2, "entry {index} should carry a decoy");
                assert!(chars[0].is_ascii_lowercase());
                assert_eq!(chars[1], reversed[index]);
            } else {
                assert_eq!(chars, vec![reversed[index]]);
            }
        }
    }

    #[test]
    fn test_roundtrip_every_stride() {
        let record = sample_record();
        let nonce = fixed_nonce();
        let mut rng = StdRng::seed_from_u64(11);

        for stride in Stride::ALL {
            let encoded = encode_with(&record, &nonce, stride, &mut rng).unwrap();
            assert!(encoded.as_str().ends_with(stride.as_key()));
            assert_eq!(decode(encoded.as_str()).unwrap(), record, "stride {stride}");
        }
    }

    #[test]
    fn test_roundtrip_non_admin_and_fractional_timestamp() {
        let record = IdentityRecord {
            is_admin: false,
            created_at: "2023-06-15T08:30:12.345678Z".parse().unwrap(),
            ..sample_record()
        };
        let mut rng = StdRng::seed_from_u64(5);
        let encoded = encode(&record, &mut rng).unwrap();
        assert_eq!(decode(encoded.as_str()).unwrap(), record);
    }

    #[test]
    fn test_roundtrip_multibyte_text() {
        let record = IdentityRecord {
            name: "태양".to_string(),
            email: "sün@gmail.com".to_string(),
            ..sample_record()
        };
        let mut rng = StdRng::seed_from_u64(8);
        for stride in Stride::ALL {
            let encoded = encode_with(&record, &fixed_nonce(), stride, &mut rng).unwrap();
            assert_eq!(decode(encoded.as_str()).unwrap(), record);
        }
    }

    #[test]
    fn test_encode_rejects_reserved_characters() {
        let mut rng = StdRng::seed_from_u64(0);

        let record = IdentityRecord {
            name: "Sun, Jr".to_string(),
            ..sample_record()
        };
        assert_eq!(
            encode(&record, &mut rng),
            Err(CodecError::ReservedCharacter {
                field: "name",
                ch: ','
            })
        );

        let record = IdentityRecord {
            user_id: "a>b".to_string(),
            ..sample_record()
        };
        assert_eq!(
            encode(&record, &mut rng),
            Err(CodecError::ReservedCharacter {
                field: "userId",
                ch: '>'
            })
        );
    }

    #[test]
    fn test_encode_rejects_years_beyond_four_digits() {
        let mut rng = StdRng::seed_from_u64(9);

        // 10000-01-01T00:00:00Z
        let record = IdentityRecord {
            created_at: DateTime::from_timestamp(253_402_300_800, 0).unwrap(),
            ..sample_record()
        };
        let err = encode(&record, &mut rng).unwrap_err();
        assert_eq!(err, CodecError::TimestampOutOfRange(10000));
        assert!(err.is_encode_failure());

        let record = IdentityRecord {
            created_at: chrono::NaiveDate::from_ymd_opt(-1, 6, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
                .and_utc(),
            ..sample_record()
        };
        assert_eq!(
            encode(&record, &mut rng),
            Err(CodecError::TimestampOutOfRange(-1))
        );
    }

    #[test]
    fn test_roundtrip_at_year_bounds() {
        let mut rng = StdRng::seed_from_u64(10);
        for created_at in ["0000-01-01T00:00:00Z", "9999-12-31T23:59:59.999999999Z"] {
            let record = IdentityRecord {
                created_at: created_at.parse().unwrap(),
                ..sample_record()
            };
            let encoded = encode(&record, &mut rng).unwrap();
            assert_eq!(decode(encoded.as_str()).unwrap(), record, "{created_at}");
        }
    }

    #[test]
    fn test_decode_rejects_bad_stride_key() {
        assert_eq!(decode(""), Err(CodecError::MissingStride));
        assert_eq!(decode("a,b,c,"), Err(CodecError::InvalidStride(',')));
        assert_eq!(decode("a,b,c,1"), Err(CodecError::InvalidStride('1')));
        assert_eq!(decode("a,b,c,x"), Err(CodecError::InvalidStride('x')));
    }

    #[test]
    fn test_decode_rejects_too_few_fields() {
        assert_eq!(decode("5"), Err(CodecError::TooFewFields { found: 0 }));

        let mut rng = StdRng::seed_from_u64(2);
        let encoded = scramble("a>n>b>n>c>n>d>>", Stride::new(5).unwrap(), &mut rng);
        assert_eq!(decode(&encoded), Err(CodecError::TooFewFields { found: 4 }));
    }

    #[test]
    fn test_decode_rejects_unparseable_flag() {
        let interleaved = "i>n>n>n>e>n>u>n>yes>n>2024-01-01T00:00:00Z>>";
        let mut rng = StdRng::seed_from_u64(4);
        let encoded = scramble(interleaved, Stride::new(9).unwrap(), &mut rng);
        assert_eq!(
            decode(&encoded),
            Err(CodecError::InvalidFlag("yes".to_string()))
        );
    }

    #[test]
    fn test_empty_field_shifts_later_fields_left() {
        let record = IdentityRecord {
            name: String::new(),
            ..sample_record()
        };
        let mut rng = StdRng::seed_from_u64(6);
        let encoded = encode(&record, &mut rng).unwrap();

        let fields = recover_fields(encoded.as_str()).unwrap();
        assert_eq!(
            fields,
            vec![
                "507f1f77bcf86cd799439011",
                "sun@test.com",
                "sunrise",
                "true",
                "2024-01-01T00:00:00Z",
            ]
        );
        assert_eq!(
            decode(encoded.as_str()),
            Err(CodecError::TooFewFields { found: 5 })
        );
    }

    #[test]
    fn test_strip_decoy_takes_second_character() {
        assert_eq!(strip_decoy("qx"), "x");
        assert_eq!(strip_decoy("q양"), "양");
        assert_eq!(strip_decoy(""), "");
        assert_eq!(strip_decoy("q"), "");
    }
}
