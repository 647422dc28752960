//! Generic version scheme and PEAR/Maven version conversion.
//!
//! [`GenericVersion`] gives every version string the planner encounters a
//! total order. Versions are split into numeric and qualifier items on `.`,
//! `-`, `+` and on digit/letter transitions, so `1.5.0RC1`, `1.5.0-rc-1` and
//! `1.5.0.rc.1` all compare equal.

use crate::error::{Error, Result};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// One component of a parsed version.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Item {
    /// Digits with leading zeros stripped (`"0"` for zero).
    Number(String),
    /// Lower-cased qualifier such as `beta` or `snapshot`.
    Qualifier(String),
}

impl Item {
    fn number(digits: &str) -> Self {
        let trimmed = digits.trim_start_matches('0');
        Self::Number(if trimmed.is_empty() {
            "0".to_string()
        } else {
            trimmed.to_string()
        })
    }

    fn qualifier(text: &str) -> Self {
        Self::Qualifier(text.to_ascii_lowercase())
    }

    /// Items that compare equal to a missing item.
    fn is_null(&self) -> bool {
        match self {
            Self::Number(n) => n == "0",
            Self::Qualifier(q) => qualifier_rank(q) == RELEASE_RANK,
        }
    }
}

const RELEASE_RANK: u8 = 6;

fn qualifier_rank(q: &str) -> u8 {
    match q {
        "dev" => 0,
        "alpha" | "a" => 1,
        "beta" | "b" => 2,
        "milestone" | "m" => 3,
        "rc" | "cr" => 4,
        "snapshot" => 5,
        "" | "ga" | "final" | "release" | "stable" => RELEASE_RANK,
        "sp" | "pl" => 7,
        _ => 8,
    }
}

fn compare_numbers(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn compare_qualifiers(a: &str, b: &str) -> Ordering {
    let (ra, rb) = (qualifier_rank(a), qualifier_rank(b));
    ra.cmp(&rb).then_with(|| if ra == 8 { a.cmp(b) } else { Ordering::Equal })
}

fn compare_items(a: Option<&Item>, b: Option<&Item>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (Some(Item::Number(n)), None) => compare_numbers(n, "0"),
        (None, Some(Item::Number(n))) => compare_numbers("0", n),
        (Some(Item::Qualifier(q)), None) => compare_qualifiers(q, ""),
        (None, Some(Item::Qualifier(q))) => compare_qualifiers("", q),
        (Some(Item::Number(x)), Some(Item::Number(y))) => compare_numbers(x, y),
        (Some(Item::Qualifier(x)), Some(Item::Qualifier(y))) => compare_qualifiers(x, y),
        (Some(Item::Number(_)), Some(Item::Qualifier(_))) => Ordering::Greater,
        (Some(Item::Qualifier(_)), Some(Item::Number(_))) => Ordering::Less,
    }
}

/// A version in the generic (Maven-like) scheme.
#[derive(Debug, Clone)]
pub struct GenericVersion {
    raw: String,
    items: Vec<Item>,
}

impl GenericVersion {
    /// Parse a version string.
    pub fn parse(version: &str) -> Result<Self> {
        let trimmed = version.trim();
        if trimmed.is_empty() {
            return Err(Error::invalid_version(version, "empty version"));
        }
        if let Some(bad) = trimmed
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '+' | '_')))
        {
            return Err(Error::invalid_version(
                version,
                format!("unexpected character '{bad}'"),
            ));
        }

        let mut items = Vec::new();
        let mut token = String::new();
        let mut token_is_digit = false;

        let flush = |token: &mut String, is_digit: bool, items: &mut Vec<Item>| {
            if token.is_empty() {
                return;
            }
            items.push(if is_digit {
                Item::number(token)
            } else {
                Item::qualifier(token)
            });
            token.clear();
        };

        for c in trimmed.chars() {
            if matches!(c, '.' | '-' | '+' | '_') {
                flush(&mut token, token_is_digit, &mut items);
                continue;
            }
            let is_digit = c.is_ascii_digit();
            if !token.is_empty() && is_digit != token_is_digit {
                flush(&mut token, token_is_digit, &mut items);
            }
            token_is_digit = is_digit;
            token.push(c);
        }
        flush(&mut token, token_is_digit, &mut items);

        while items.last().is_some_and(Item::is_null) {
            items.pop();
        }

        Ok(Self {
            raw: trimmed.to_string(),
            items,
        })
    }

    /// The version string as given.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl PartialEq for GenericVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for GenericVersion {}

impl PartialOrd for GenericVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GenericVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.items.len().max(other.items.len());
        (0..len)
            .map(|i| compare_items(self.items.get(i), other.items.get(i)))
            .find(|o| *o != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }
}

impl fmt::Display for GenericVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for GenericVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Convert a Maven version (`1.5.0-alpha-1`) to its PEAR spelling (`1.5.0a1`).
pub fn maven_to_pear_version(src: &str) -> Result<String> {
    let chars: Vec<char> = src.chars().collect();
    let mut out = String::with_capacity(src.len());
    let mut in_extra = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if in_extra {
            if c != '-' {
                out.push(c);
            }
        } else if c.is_ascii_digit() || c == '.' {
            out.push(c);
        } else if c == '-' {
            in_extra = true;
            let rest: String = chars[i..].iter().collect();
            let skip = if rest.starts_with("-alpha") {
                out.push('a');
                6
            } else if rest.starts_with("-beta") {
                out.push('b');
                5
            } else {
                0
            };
            if skip > 0 {
                i += skip;
                if chars.get(i) == Some(&'-') {
                    i += 1;
                }
                continue;
            }
        } else {
            return Err(Error::InvalidMavenVersion(src.to_string()));
        }
        i += 1;
    }

    Ok(out)
}

/// Convert a PEAR version (`1.2.2beta1`) to its Maven spelling (`1.2.2-beta-1`).
#[must_use]
pub fn pear_to_maven_version(src: &str) -> String {
    let chars: Vec<char> = src.chars().collect();
    let n = chars.len();
    let mut out = String::with_capacity(src.len() + 4);
    let mut dots = 0;
    let mut in_extra = false;
    let mut starting_extra = true;
    let mut i = 0;

    let matches_word = |at: usize, word: &str| {
        let end = at + word.len();
        end <= n
            && chars[at..end]
                .iter()
                .collect::<String>()
                .eq_ignore_ascii_case(word)
    };

    while i < n {
        let c = chars[i];
        let stability = match c {
            'a' | 'A' => Some("alpha"),
            'b' | 'B' => Some("beta"),
            _ => None,
        };

        if let Some(word) = stability
            && starting_extra
        {
            if !in_extra {
                out.push('-');
                in_extra = true;
            }
            if i + word.len() - 1 < n && matches_word(i, word) {
                i += word.len() - 1;
            }
            if i + 1 == n {
                out.push_str(word);
            } else if chars[i + 1].is_ascii_digit() {
                out.push_str(word);
                out.push('-');
            } else {
                out.push(c);
            }
            starting_extra = false;
        } else if in_extra {
            starting_extra = false;
            out.push(c);
        } else if c.is_ascii_digit() {
            out.push(c);
        } else if c == '.' {
            out.push(c);
            dots += 1;
            if dots == 3 {
                in_extra = true;
            }
        } else if c == '-' {
            out.push('-');
            in_extra = true;
        } else {
            in_extra = true;
            out.push('-');
            out.push(c);
        }
        i += 1;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn v(s: &str) -> GenericVersion {
        GenericVersion::parse(s).unwrap()
    }

    #[test_case("1.0", "2.0" ; "major")]
    #[test_case("1.9", "1.10" ; "numeric not lexical")]
    #[test_case("1.0-alpha", "1.0-beta" ; "alpha before beta")]
    #[test_case("1.0-beta2", "1.0-rc1" ; "beta before rc")]
    #[test_case("1.0RC1", "1.0" ; "rc before release")]
    #[test_case("1.0-SNAPSHOT", "1.0" ; "snapshot before release")]
    #[test_case("1.0", "1.0.1" ; "patch")]
    #[test_case("1.0-beta", "1.0.1" ; "number beats qualifier")]
    #[test_case("0.9.7dev", "0.9.7a1" ; "dev before alpha")]
    fn ordering(lower: &str, higher: &str) {
        assert!(v(lower) < v(higher), "{lower} < {higher}");
        assert!(v(higher) > v(lower), "{higher} > {lower}");
    }

    #[test]
    fn trailing_zeros_are_insignificant() {
        assert_eq!(v("1.0"), v("1.0.0"));
        assert_eq!(v("1"), v("1.0.0-final"));
        assert_eq!(v("1.5.0RC1"), v("1.5.0-rc-1"));
    }

    #[test]
    fn invalid_versions() {
        assert!(GenericVersion::parse("").is_err());
        assert!(GenericVersion::parse("1.0 beta").is_err());
        assert!(GenericVersion::parse("1.0/2").is_err());
    }

    #[test]
    fn display_keeps_raw() {
        assert_eq!(v("1.5.0RC1").to_string(), "1.5.0RC1");
    }

    #[test_case("0.10-b1", "0.10-beta-1")]
    #[test_case("1.5.0RC1", "1.5.0-RC1")]
    #[test_case("1.3.0r3", "1.3.0-r3")]
    #[test_case("2.0.0dev1", "2.0.0-dev1")]
    #[test_case("1.2.2beta1", "1.2.2-beta-1")]
    #[test_case("0.9.7dev", "0.9.7-dev")]
    #[test_case("0.5.2beta", "0.5.2-beta")]
    #[test_case("1.4b1", "1.4-beta-1")]
    #[test_case("1.5.0a1", "1.5.0-alpha-1")]
    #[test_case("1.3.7", "1.3.7")]
    fn pear_to_maven(pear: &str, maven: &str) {
        assert_eq!(pear_to_maven_version(pear), maven);
    }

    #[test_case("1.5.0-alpha-1", "1.5.0a1")]
    #[test_case("1.4-beta-1", "1.4b1")]
    #[test_case("1.5.0-RC1", "1.5.0RC1")]
    #[test_case("2.0.0-SNAPSHOT", "2.0.0SNAPSHOT")]
    #[test_case("1.3.7", "1.3.7")]
    fn maven_to_pear(maven: &str, pear: &str) {
        assert_eq!(maven_to_pear_version(maven).unwrap(), pear);
    }

    #[test]
    fn maven_to_pear_rejects_letters_in_release() {
        assert!(matches!(
            maven_to_pear_version("1.x"),
            Err(Error::InvalidMavenVersion(_))
        ));
    }
}
