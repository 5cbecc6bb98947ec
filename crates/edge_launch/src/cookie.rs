//! Cookie string handling for the saved custom command line.
//!
//! Only what the player needs: finding one value in a `document.cookie`
//! header and formatting the assignment that writes one back. Plain
//! string slicing, host-testable.

/// Extracts `name`'s value from a raw `document.cookie` header.
///
/// Entries are `;`-separated and may carry leading padding. Returns
/// `None` when the cookie is absent; a present-but-empty cookie is
/// `Some("")`, which callers treat the same as absent.
pub fn value_from_header(header: &str, name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    header
        .split(';')
        .map(str::trim_start)
        .find_map(|entry| entry.strip_prefix(prefix.as_str()))
        .map(str::to_string)
}

/// Formats the assignment written back to `document.cookie`. The
/// cross-site attributes keep the cookie working when the player page is
/// embedded under another origin.
pub fn set_string(name: &str, value: &str) -> String {
    format!("{name}={value}; SameSite=None; Secure")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_a_value_amid_other_cookies() {
        let header = "theme=dark; customCommandLineCookie=-warp map01; session=abc";
        assert_eq!(
            value_from_header(header, "customCommandLineCookie").as_deref(),
            Some("-warp map01")
        );
    }

    #[test]
    fn tolerates_padding_after_separators() {
        let header = "a=1;   customCommandLineCookie=-nomonsters";
        assert_eq!(
            value_from_header(header, "customCommandLineCookie").as_deref(),
            Some("-nomonsters")
        );
    }

    #[test]
    fn name_prefix_collisions_do_not_match() {
        let header = "customx=wrong; customCommandLineCookieX=also wrong; customCommandLineCookie=right";
        assert_eq!(
            value_from_header(header, "customCommandLineCookie").as_deref(),
            Some("right")
        );
        assert_eq!(value_from_header("custom=1", "customCommandLineCookie"), None);
    }

    #[test]
    fn missing_cookie_is_none_and_empty_value_is_empty() {
        assert_eq!(value_from_header("a=1; b=2", "c"), None);
        assert_eq!(value_from_header("", "c"), None);
        assert_eq!(value_from_header("c=; a=1", "c").as_deref(), Some(""));
    }

    #[test]
    fn values_may_contain_equals_signs() {
        assert_eq!(
            value_from_header("c=a=b", "c").as_deref(),
            Some("a=b")
        );
    }

    #[test]
    fn set_string_carries_the_cross_site_attributes() {
        assert_eq!(
            set_string("customCommandLineCookie", "-warp map01"),
            "customCommandLineCookie=-warp map01; SameSite=None; Secure"
        );
        assert_eq!(
            set_string("customCommandLineCookie", ""),
            "customCommandLineCookie=; SameSite=None; Secure"
        );
    }
}
