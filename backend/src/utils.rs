use lazy_static::lazy_static;
use regex::Regex;
use url::{ParseError, Url};

lazy_static! {
    static ref ISO8601_DURATION: Regex =
        Regex::new(r"PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?").expect("valid duration pattern");
}

/// Parse ISO8601 duration string (PT1H2M3S) to total seconds.
///
/// Never fails: anything that does not look like `PT..` yields 0, and a
/// group that cannot be represented counts as 0.
pub fn parse_iso8601_duration_to_seconds(duration_str: &str) -> u64 {
    let Some(captures) = ISO8601_DURATION.captures(duration_str) else {
        return 0;
    };

    let group = |index: usize| -> u64 {
        captures
            .get(index)
            .and_then(|m| m.as_str().parse::<u64>().ok())
            .unwrap_or(0)
    };

    group(1)
        .saturating_mul(3600)
        .saturating_add(group(2).saturating_mul(60))
        .saturating_add(group(3))
}

/// Returns the `list` query parameter of a playlist URL.
///
/// URLs pasted without a scheme (`youtube.com/playlist?list=..`) are
/// resolved as relative references.
pub fn extract_youtube_playlist_id(url: &str) -> Option<String> {
    let input = url.trim();
    let parsed_url = match Url::parse(input) {
        Ok(parsed_url) => parsed_url,
        Err(ParseError::RelativeUrlWithoutBase) => {
            Url::parse("https://www.youtube.com/").ok()?.join(input).ok()?
        }
        Err(_) => return None,
    };

    parsed_url
        .query_pairs()
        .find(|(key, _)| key == "list")
        .map(|(_, value)| value.into_owned())
        .filter(|id| !id.is_empty())
}
