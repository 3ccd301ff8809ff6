//! Lexical resolution of virtual paths.

/// Whether `path` is an already-normalized absolute path.
///
/// A leading `/` alone is not enough: the path must also contain no `.` or
/// `..` segment. Anything failing this test is resolved relative to the
/// current directory, even when it starts with `/`.
pub fn is_absolute(path: &str) -> bool {
    path.starts_with('/')
        && !path.contains("/./")
        && !path.contains("/../")
        && !path.ends_with("/.")
        && !path.ends_with("/..")
}

/// Resolve `target` against `cwd`, collapsing `.` and `..` segments.
///
/// The result always starts with `/`, never contains empty, `.` or `..`
/// segments, and has no trailing slash unless it is the root.
pub fn resolve(cwd: &str, target: &str) -> String {
    let raw = if is_absolute(target) {
        target.to_string()
    } else {
        format!("{cwd}/{target}")
    };

    let mut parts: Vec<&str> = Vec::new();
    for component in raw.split('/') {
        match component {
            "" | "." => {},
            ".." => {
                parts.pop();
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", parts.join("/"))
    }
}

/// Parent directory of `path`. The root is its own parent.
pub fn parent(path: &str) -> String {
    resolve(path, "..")
}
