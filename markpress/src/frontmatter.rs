//! Code for splitting YAML- or TOML-style frontmatter from the Markdown body of a post.

use crate::PostMetadata;
use anyhow::{anyhow, Context, Result};
use gray_matter::{
    engine::{Engine, TOML, YAML},
    Matter,
};
use jiff::{
    civil::{Date, DateTime, Time},
    tz::TimeZone,
    Timestamp,
};
use serde::{
    de::{Error as DeError, Unexpected},
    Deserialize, Deserializer,
};
use std::io::Read;

const YAML_DELIMITER: &str = "---";
const TOML_DELIMITER: &str = "+++";

/// Parses the frontmatter at the start of a post and returns it with the rest of the text.
/// A block fenced by `---` is read as YAML; a block fenced by `+++` is read as TOML.
///
/// # Errors
/// This function returns an error if:
/// - the input is not valid UTF-8
/// - no frontmatter is found in the text
/// - frontmatter cannot be parsed due to invalid syntax, missing fields, invalid field values, etc.
pub fn split(mut input: impl Read) -> Result<(PostMetadata, String)> {
    let mut text = String::new();
    input
        .read_to_string(&mut text)
        .context("failed to read post as UTF-8 text")?;

    if text.starts_with(TOML_DELIMITER) {
        parse_with::<TOML>(&text, TOML_DELIMITER)
    } else {
        parse_with::<YAML>(&text, YAML_DELIMITER)
    }
}

fn parse_with<T: Engine>(text: &str, delimiter: &str) -> Result<(PostMetadata, String)> {
    let mut matter = Matter::<T>::new();
    matter.delimiter = delimiter.to_owned();

    let parsed = matter.parse(text);

    let metadata = parsed
        .data
        .ok_or_else(|| anyhow!("post frontmatter not found"))?
        .deserialize()
        .context("failed to parse post frontmatter")?;

    Ok((metadata, parsed.content))
}

/// Accepts an RFC 3339 timestamp, a civil date-time, or a bare date.
/// Values without an offset are taken to be in UTC.
pub(crate) fn deserialize_date<'de, D>(deserializer: D) -> Result<Timestamp, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: String = Deserialize::deserialize(deserializer)?;

    parse_date(&raw).ok_or_else(|| {
        DeError::invalid_value(Unexpected::Str(&raw), &"Expected a date in string form")
    })
}

fn parse_date(raw: &str) -> Option<Timestamp> {
    let raw = raw.trim();

    if let Ok(timestamp) = raw.parse::<Timestamp>() {
        return Some(timestamp);
    }

    let datetime = match raw.parse::<DateTime>() {
        Ok(datetime) => datetime,
        Err(_) => raw.parse::<Date>().ok()?.to_datetime(Time::midnight()),
    };

    datetime
        .to_zoned(TimeZone::UTC)
        .ok()
        .map(|zoned| zoned.timestamp())
}

#[cfg(test)]
mod test {
    use super::split;
    use crate::PostMetadata;
    use jiff::Timestamp;

    fn ts(raw: &str) -> Timestamp {
        raw.parse().expect("test timestamp should be valid")
    }

    #[test]
    fn yaml_frontmatter() {
        let (metadata, body) = split(
            "---\ntitle: Hello\ndescription: First post\ndate: 2024-01-01\nlanguage: en\ntags: [rust, web, rust]\n---\n# Hi\n"
                .as_bytes(),
        )
        .expect("parsing should succeed");

        assert_eq!(
            metadata,
            PostMetadata {
                slug: String::new(),
                title: "Hello".into(),
                description: "First post".into(),
                date: ts("2024-01-01T00:00:00Z"),
                language: "en".into(),
                tags: vec!["rust".into(), "web".into(), "rust".into()],
            }
        );
        assert_eq!(body.trim(), "# Hi");
    }

    #[test]
    fn toml_frontmatter() {
        let (metadata, body) = split(
            "+++\ntitle = \"Hello\"\ndate = 2024-01-01\ntags = [\"b\", \"a\"]\n+++\n# Hi\n".as_bytes(),
        )
        .expect("parsing should succeed");

        assert_eq!(metadata.title, "Hello");
        assert_eq!(metadata.date, ts("2024-01-01T00:00:00Z"));
        assert_eq!(metadata.tags, ["b", "a"], "tags should keep authored order");
        assert!(metadata.description.is_empty());
        assert_eq!(body.trim(), "# Hi");
    }

    #[test]
    fn toml_datetime_with_offset() {
        let (metadata, _) =
            split("+++\ntitle = \"t\"\ndate = 2024-02-01T10:30:00+02:00\n+++\n".as_bytes())
                .expect("parsing should succeed");

        assert_eq!(metadata.date, ts("2024-02-01T08:30:00Z"));
    }

    #[test]
    fn civil_datetime() {
        let (metadata, _) = split("---\ntitle: t\ndate: 2024-02-01T10:30:00\n---\n".as_bytes())
            .expect("parsing should succeed");

        assert_eq!(metadata.date, ts("2024-02-01T10:30:00Z"));
    }

    #[test]
    fn slug_is_read_but_not_required() {
        let (metadata, _) = split("---\nslug: custom\ntitle: t\ndate: 2024-01-01\n---\n".as_bytes())
            .expect("parsing should succeed");

        assert_eq!(metadata.slug, "custom");
    }

    #[test]
    fn missing_frontmatter() {
        // Parsing should fail if frontmatter is absent
        assert!(split("# Just a heading\n".as_bytes()).is_err());
    }

    #[test]
    fn missing_fields() {
        // Parsing should fail if the title or date is absent
        assert!(split("---\ntitle: abc\n---\n".as_bytes()).is_err());
        assert!(split("---\ndate: 2024-01-01\n---\n".as_bytes()).is_err());
    }

    #[test]
    fn invalid_date() {
        assert!(split("---\ntitle: abc\ndate: 123xyz\n---\n".as_bytes()).is_err());
        assert!(split("---\ntitle: abc\ndate: 2000-02-30\n---\n".as_bytes()).is_err());
    }

    #[test]
    fn invalid_utf8() {
        assert!(split(&b"---\ntitle: \xff\n---\n"[..]).is_err());
    }
}
