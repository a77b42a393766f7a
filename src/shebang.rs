use crate::version::VersionRequest;

/// Interpreter paths recognised in a shebang line, checked in this order.
const ACCEPTED_PREFIXES: [&str; 4] = ["python", "/usr/bin/python", "/usr/local/bin/python", "/usr/bin/env python"];

/// Pull the version part out of a python shebang line.
///
/// `#!/usr/local/bin/python3.9` gives `Some("3.9")`, `#!/usr/bin/python` gives
/// `Some("")`. Whitespace is allowed between `#!` and the path. Lines that do
/// not name a python interpreter give `None`.
pub fn parse_shebang(line: &str) -> Option<&str> {
    let line = line.strip_prefix("#!").unwrap_or(line).trim();
    ACCEPTED_PREFIXES
        .iter()
        .find_map(|prefix| line.strip_prefix(prefix))
}

/// The version a file's first line asks for, if any.
pub fn hint_request(line: &str) -> Option<VersionRequest> {
    parse_shebang(line).and_then(VersionRequest::from_hint)
}
