//! Identifier encoding in resource paths.
//!
//! SensorThings addresses a single entity as `<EntitySet>(<id>)`:
//!
//! - Integer ids are written verbatim: `Things(42)`
//! - String ids are single-quoted, with embedded quotes doubled: `Sensors('it''s')`
//!
//! The quoted form is then percent-encoded so it survives as one path segment.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use sensorthings_core::{EntityType, Id};

/// Characters that must be percent-encoded inside a quoted id.
/// Quotes and parentheses stay literal.
const ID_ESCAPE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'?')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'\\')
    .add(b'&')
    .add(b'+');

/// Encode an id for use between the parentheses of an entity path.
///
/// # Examples
///
/// ```
/// use sensorthings_core::Id;
/// use sensorthings_dao::encode_id;
///
/// assert_eq!(encode_id(&Id::Long(42)), "42");
/// assert_eq!(encode_id(&Id::from("it's")), "'it''s'");
/// assert_eq!(encode_id(&Id::from("a/b c")), "'a%2Fb%20c'");
/// ```
#[must_use]
pub fn encode_id(id: &Id) -> String {
    match id {
        Id::Long(value) => value.to_string(),
        Id::Text(value) => {
            let quoted = format!("'{}'", value.replace('\'', "''"));
            utf8_percent_encode(&quoted, ID_ESCAPE).to_string()
        }
    }
}

/// Decode the text between the parentheses of an entity path.
///
/// # Errors
///
/// Returns error if the text is neither an integer nor a quoted string, or
/// contains invalid UTF-8 sequences.
pub fn decode_id(encoded: &str) -> Result<Id, EncodingError> {
    let decoded = percent_decode_str(encoded)
        .decode_utf8()
        .map_err(|e| EncodingError::Utf8Decode(e.to_string()))?;

    if let Some(inner) = decoded
        .strip_prefix('\'')
        .and_then(|rest| rest.strip_suffix('\''))
    {
        return Ok(Id::Text(inner.replace("''", "'")));
    }

    decoded
        .parse::<i64>()
        .map(Id::Long)
        .map_err(|_| EncodingError::InvalidId(decoded.into_owned()))
}

/// Path of one entity relative to the service root, e.g. `Things(1)`.
///
/// Singular kinds are written as their entity set.
#[must_use]
pub fn entity_path(kind: EntityType, id: &Id) -> String {
    format!("{}({})", kind.plural().name(), encode_id(id))
}

/// Split an entity path into its entity set and id.
///
/// Only the last segment is inspected, so full URLs and nested paths such
/// as `Things(1)/Datastreams(2)` are accepted. A trailing `/` is ignored.
///
/// # Errors
///
/// Returns error if the last segment is not of the form `<EntitySet>(<id>)`.
///
/// # Examples
///
/// ```
/// use sensorthings_core::{EntityType, Id};
/// use sensorthings_dao::parse_entity_path;
///
/// let (kind, id) = parse_entity_path("http://x/v1.1/Things(1)/Datastreams('a')/").unwrap();
/// assert_eq!(kind, EntityType::Datastreams);
/// assert_eq!(id, Id::from("a"));
/// ```
pub fn parse_entity_path(path: &str) -> Result<(EntityType, Id), EncodingError> {
    let trimmed = path.strip_suffix('/').unwrap_or(path);
    let segment = trimmed.rsplit('/').next().unwrap_or(trimmed);

    let (name, rest) = segment
        .split_once('(')
        .ok_or_else(|| EncodingError::InvalidPath(path.to_string()))?;
    let encoded = rest
        .strip_suffix(')')
        .ok_or_else(|| EncodingError::InvalidPath(path.to_string()))?;

    let kind = EntityType::by_name(name)
        .filter(|kind| kind.is_collection())
        .ok_or_else(|| EncodingError::UnknownEntitySet(name.to_string()))?;

    Ok((kind, decode_id(encoded)?))
}

/// Errors that can occur during encoding/decoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    /// UTF-8 decoding failed
    #[error("UTF-8 decode error: {0}")]
    Utf8Decode(String),
    /// Id is neither an integer nor quoted
    #[error("invalid id: {0}")]
    InvalidId(String),
    /// Not an entity path
    #[error("not an entity path: {0}")]
    InvalidPath(String),
    /// Segment names no entity set
    #[error("unknown entity set: {0}")]
    UnknownEntitySet(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_ids_are_verbatim() {
        assert_eq!(encode_id(&Id::Long(0)), "0");
        assert_eq!(encode_id(&Id::Long(-7)), "-7");
        assert_eq!(entity_path(EntityType::Things, &Id::Long(1)), "Things(1)");
    }

    #[test]
    fn singular_kind_uses_entity_set() {
        assert_eq!(
            entity_path(EntityType::FeatureOfInterest, &Id::Long(3)),
            "FeaturesOfInterest(3)"
        );
    }

    #[test]
    fn string_ids_are_quoted() {
        assert_eq!(encode_id(&Id::from("abc")), "'abc'");
        assert_eq!(encode_id(&Id::from("o'neil")), "'o''neil'");
        assert_eq!(encode_id(&Id::from("")), "''");
    }

    #[test]
    fn string_ids_are_percent_encoded() {
        let encoded = encode_id(&Id::from("urn:x/y?z#1 2%"));
        assert!(!encoded.contains('/'), "/ should be encoded: {encoded}");
        assert!(!encoded.contains('?'), "? should be encoded: {encoded}");
        assert!(!encoded.contains('#'), "# should be encoded: {encoded}");
        assert!(!encoded.contains(' '), "space should be encoded: {encoded}");
        assert!(encoded.starts_with('\'') && encoded.ends_with('\''));
    }

    #[test]
    fn decodes_what_was_encoded() {
        for id in [
            Id::Long(42),
            Id::from("plain"),
            Id::from("it's"),
            Id::from("urn:x/y?z#1 2%"),
            Id::from("资产"),
        ] {
            assert_eq!(decode_id(&encode_id(&id)).unwrap(), id);
        }
    }

    #[test]
    fn integer_text_stays_text() {
        assert_eq!(decode_id("'42'").unwrap(), Id::from("42"));
        assert_eq!(decode_id("42").unwrap(), Id::Long(42));
    }

    #[test]
    fn rejects_unquoted_text() {
        assert_eq!(
            decode_id("abc"),
            Err(EncodingError::InvalidId("abc".to_string()))
        );
        assert!(decode_id("'open").is_err());
    }

    #[test]
    fn parses_entity_paths() {
        assert_eq!(
            parse_entity_path("Things(1)").unwrap(),
            (EntityType::Things, Id::Long(1))
        );
        assert_eq!(
            parse_entity_path("http://x/v1.1/Sensors('s%201')/").unwrap(),
            (EntityType::Sensors, Id::from("s 1"))
        );
    }

    #[test]
    fn rejects_non_entity_paths() {
        assert!(matches!(
            parse_entity_path("Things"),
            Err(EncodingError::InvalidPath(_))
        ));
        assert!(matches!(
            parse_entity_path("Things(1"),
            Err(EncodingError::InvalidPath(_))
        ));
        assert_eq!(
            parse_entity_path("Thing(1)"),
            Err(EncodingError::UnknownEntitySet("Thing".to_string()))
        );
        assert_eq!(
            parse_entity_path("Widgets(1)"),
            Err(EncodingError::UnknownEntitySet("Widgets".to_string()))
        );
    }
}
