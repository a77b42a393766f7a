//! Version identifiers and version constraints.
//!
//! Interpreters on disk are named `python{major}.{minor}`. The same `X.Y`
//! grammar is used by `$PY_PYTHON`, by the `-X.Y` command line specifier and
//! by shebang lines, so all of the parsing lives here.

use crate::error::{Error, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Every interpreter executable starts with this.
pub const PYTHON_EXE_PREFIX: &str = "python";

static FILE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(r"^{}([0-9]+)\.([0-9]+)$", regex::escape(PYTHON_EXE_PREFIX));
    Regex::new(&pattern).expect("file name regex")
});
static EXACT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)\.([0-9]+)$").expect("exact version regex"));
static MAJOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)$").expect("major version regex"));
static MAJOR_SPECIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-([0-9])$").expect("major specifier regex"));
static EXACT_SPECIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-([0-9]+)\.([0-9]+)$").expect("exact specifier regex"));

/// A `(major, minor)` pair.
///
/// Ordering is lexicographic on `(major, minor)` with each component compared
/// as an integer, so `3.10 > 3.9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionTag {
    pub major: u32,
    pub minor: u32,
}

impl VersionTag {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Extract the version from an interpreter's base name.
    ///
    /// Only names of the exact form `python{digits}.{digits}` are accepted.
    /// `python` and `python3` are rejected on purpose: those usually point at
    /// the system interpreter, which should never be picked by accident.
    pub fn from_file_name(name: &str) -> Result<Self> {
        let caps = FILE_NAME
            .captures(name)
            .ok_or_else(|| Error::MalformedVersion(name.to_string()))?;
        Self::from_parts(&caps[1], &caps[2]).ok_or_else(|| Error::MalformedVersion(name.to_string()))
    }

    fn from_parts(major: &str, minor: &str) -> Option<Self> {
        Some(Self::new(major.parse().ok()?, minor.parse().ok()?))
    }
}

impl FromStr for VersionTag {
    type Err = Error;

    /// Parse a bare `X.Y` string, e.g. the value of `$PY_PYTHON`.
    fn from_str(s: &str) -> Result<Self> {
        EXACT
            .captures(s)
            .and_then(|caps| Self::from_parts(&caps[1], &caps[2]))
            .ok_or_else(|| Error::MalformedVersion(s.to_string()))
    }
}

impl fmt::Display for VersionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// A constraint on which interpreters are acceptable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VersionRequest {
    /// Any interpreter with this major version, e.g. `-3`.
    Major(u32),
    /// Exactly this major and minor version, e.g. `-3.10`.
    Exact(u32, u32),
}

impl VersionRequest {
    /// Does `version` satisfy this constraint?
    pub fn matches(&self, version: &VersionTag) -> bool {
        match *self {
            VersionRequest::Major(major) => version.major == major,
            VersionRequest::Exact(major, minor) => version.major == major && version.minor == minor,
        }
    }

    /// Recognise a command line version specifier.
    ///
    /// `-X` takes exactly one digit, `-X.Y` takes any number of digits on
    /// either side of the dot. Returns `None` for anything else, which the
    /// caller then forwards to the interpreter untouched.
    pub fn from_specifier(arg: &str) -> Option<Self> {
        if let Some(caps) = MAJOR_SPECIFIER.captures(arg) {
            return caps[1].parse().ok().map(VersionRequest::Major);
        }
        let caps = EXACT_SPECIFIER.captures(arg)?;
        VersionTag::from_parts(&caps[1], &caps[2]).map(VersionRequest::from)
    }

    /// Interpret the version remainder of a shebang line, e.g. `3` or `3.9`.
    pub fn from_hint(hint: &str) -> Option<Self> {
        if let Some(caps) = MAJOR.captures(hint) {
            return caps[1].parse().ok().map(VersionRequest::Major);
        }
        hint.parse::<VersionTag>().ok().map(VersionRequest::from)
    }
}

impl From<VersionTag> for VersionRequest {
    fn from(version: VersionTag) -> Self {
        VersionRequest::Exact(version.major, version.minor)
    }
}

impl fmt::Display for VersionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionRequest::Major(major) => write!(f, "{major}"),
            VersionRequest::Exact(major, minor) => write!(f, "{major}.{minor}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn accepts_versioned_file_names() {
        let cases = [
            ("python3.7", (3, 7)),
            ("python3.9", (3, 9)),
            ("python3.10", (3, 10)),
            ("python4.0", (4, 0)),
            ("python2.7", (2, 7)),
        ];
        for (name, (major, minor)) in cases {
            let v = VersionTag::from_file_name(name).unwrap();
            assert_eq!(v, VersionTag::new(major, minor), "{name}");
        }
    }

    #[test]
    fn rejects_unversioned_and_malformed_file_names() {
        let bad = [
            "python",
            "python3",
            "dingle3.7",
            "pythonp.7",
            "python3.f",
            "python 3.7",
            "python3.7 ",
            " python3.7",
            "python3.7.1",
            "python3.",
            "python.7",
            "python3.7-config",
            "python-3.7",
            "python99999999999.1",
        ];
        for name in bad {
            assert!(
                matches!(VersionTag::from_file_name(name), Err(Error::MalformedVersion(_))),
                "{name:?} should be rejected"
            );
        }
    }

    #[test]
    fn file_names_need_the_exe_prefix() {
        let v = VersionTag::from_file_name(&format!("{PYTHON_EXE_PREFIX}3.12")).unwrap();
        assert_eq!(v, VersionTag::new(3, 12));
        assert!(VersionTag::from_file_name("3.12").is_err());
        assert!(VersionTag::from_file_name("pypy3.12").is_err());
    }

    #[test]
    fn minor_is_an_integer_not_a_fraction() {
        let ten = VersionTag::from_file_name("python3.10").unwrap();
        let nine = VersionTag::from_file_name("python3.9").unwrap();
        assert!(ten > nine);
    }

    #[test]
    fn parses_default_version_values() {
        assert_eq!("3.10".parse::<VersionTag>().unwrap(), VersionTag::new(3, 10));
        assert!("3".parse::<VersionTag>().is_err());
        assert!("3.x".parse::<VersionTag>().is_err());
        assert!("-3.10".parse::<VersionTag>().is_err());
        assert!(" 3.10".parse::<VersionTag>().is_err());
    }

    #[test]
    fn recognises_specifiers() {
        assert_eq!(VersionRequest::from_specifier("-3"), Some(VersionRequest::Major(3)));
        assert_eq!(VersionRequest::from_specifier("-3.10"), Some(VersionRequest::Exact(3, 10)));
        assert_eq!(VersionRequest::from_specifier("-10"), None);
        assert_eq!(VersionRequest::from_specifier("-m"), None);
        assert_eq!(VersionRequest::from_specifier("3.10"), None);
        assert_eq!(VersionRequest::from_specifier("-3.10.1"), None);
        assert_eq!(VersionRequest::from_specifier("--list"), None);
    }

    #[test]
    fn recognises_hints() {
        assert_eq!(VersionRequest::from_hint("3"), Some(VersionRequest::Major(3)));
        assert_eq!(VersionRequest::from_hint("3.9"), Some(VersionRequest::Exact(3, 9)));
        assert_eq!(VersionRequest::from_hint(""), None);
        assert_eq!(VersionRequest::from_hint(" -u"), None);
    }

    #[test]
    fn constraint_predicates() {
        let v = VersionTag::new(3, 8);
        assert!(VersionRequest::Major(3).matches(&v));
        assert!(!VersionRequest::Major(2).matches(&v));
        assert!(VersionRequest::Exact(3, 8).matches(&v));
        assert!(!VersionRequest::Exact(3, 9).matches(&v));
    }

    proptest! {
        #[test]
        fn file_name_round_trips(major in 0u32..1000, minor in 0u32..1000) {
            let v = VersionTag::from_file_name(&format!("python{major}.{minor}")).unwrap();
            prop_assert_eq!(v.major, major);
            prop_assert_eq!(v.minor, minor);
        }

        #[test]
        fn whitespace_is_never_accepted(
            major in 0u32..100,
            minor in 0u32..100,
            at in 0usize..12,
            ws in prop::sample::select(vec![" ", "\t", "\n"]),
        ) {
            let mut name = format!("python{major}.{minor}");
            let at = at.min(name.len());
            name.insert_str(at, ws);
            prop_assert!(VersionTag::from_file_name(&name).is_err());
        }
    }
}
