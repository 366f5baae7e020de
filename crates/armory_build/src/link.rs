//! Share links carrying a build token in their query string.

/// Query parameter holding the token.
pub const SHARE_QUERY_KEY: &str = "build";

/// Append a token to `base_url` as the `build` query parameter.
///
/// ```
/// use armory_build::share_link;
///
/// assert_eq!(
///     share_link("https://example.com/planner", "AQ"),
///     "https://example.com/planner?build=AQ"
/// );
/// ```
pub fn share_link(base_url: &str, token: &str) -> String {
    let separator = if !base_url.contains('?') {
        "?"
    } else if base_url.ends_with('?') || base_url.ends_with('&') {
        ""
    } else {
        "&"
    };

    format!("{base_url}{separator}{SHARE_QUERY_KEY}={token}")
}

/// Extract a token from user input.
///
/// Accepts either a bare token or a link with a `build` parameter in its
/// query string or fragment. Input without such a parameter is returned
/// trimmed, as-is.
pub fn token_from_input(input: &str) -> &str {
    let input = input.trim();
    let key = format!("{SHARE_QUERY_KEY}=");

    for (index, _) in input.match_indices(&key) {
        let at_parameter_start =
            index == 0 || matches!(input.as_bytes()[index - 1], b'?' | b'&' | b'#');
        if !at_parameter_start {
            continue;
        }

        let value = &input[index + key.len()..];
        let end = value
            .find(|c: char| c == '&' || c == '#')
            .unwrap_or(value.len());
        return &value[..end];
    }

    input
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_link_separators() {
        assert_eq!(share_link("https://a.io/p", "T"), "https://a.io/p?build=T");
        assert_eq!(
            share_link("https://a.io/p?lang=en", "T"),
            "https://a.io/p?lang=en&build=T"
        );
        assert_eq!(share_link("https://a.io/p?", "T"), "https://a.io/p?build=T");
    }

    #[test]
    fn test_token_from_input() {
        assert_eq!(token_from_input("  AQ-_x  "), "AQ-_x");
        assert_eq!(token_from_input("https://a.io/p?build=AQ-_x"), "AQ-_x");
        assert_eq!(
            token_from_input("https://a.io/p?lang=en&build=AQ-_x&tab=stats"),
            "AQ-_x"
        );
        assert_eq!(token_from_input("https://a.io/p#build=AQ-_x"), "AQ-_x");
        assert_eq!(token_from_input("build=AQ"), "AQ");
    }

    #[test]
    fn test_token_from_input_ignores_lookalike_parameters() {
        assert_eq!(
            token_from_input("https://a.io/p?rebuild=1&build=AQ"),
            "AQ"
        );
        assert_eq!(token_from_input("https://a.io/p?rebuild=1"), "https://a.io/p?rebuild=1");
    }

    #[test]
    fn test_link_round_trip() {
        let link = share_link("https://a.io/p?lang=en", "AQ-_x");
        assert_eq!(token_from_input(&link), "AQ-_x");
    }
}
