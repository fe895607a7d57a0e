//! Asset path helpers.
//!
//! Asset paths are relative, forward-slash separated strings such as
//! `Animations/Hero/idle.anim`. An empty string is the asset root.

/// Returns the safety problems of an asset path (empty when safe).
pub fn asset_path_errors(path: &str) -> Vec<String> {
    let mut errors = Vec::new();

    if path.starts_with('/') || path.starts_with('\\') {
        errors.push(format!("asset path must be relative: '{}'", path));
    }

    if path.len() >= 2 && path.chars().nth(1) == Some(':') {
        errors.push(format!("asset path must not contain drive letter: '{}'", path));
    }

    if path.contains('\\') {
        errors.push(format!(
            "asset path must use forward slashes only: '{}'",
            path
        ));
    }

    if path.split('/').any(|segment| segment == "..") {
        errors.push(format!("asset path must not contain '..': '{}'", path));
    }

    errors
}

/// Returns true if the path stays inside the asset root.
pub fn is_safe_asset_path(path: &str) -> bool {
    asset_path_errors(path).is_empty()
}

/// Returns true if `name` is a single path segment that stays inside its
/// directory.
pub fn is_safe_file_name(name: &str) -> bool {
    !name.contains(['/', '\\', ':']) && name != ".." && is_safe_asset_path(name)
}

/// Joins a directory and a file name.
pub fn join(directory: &str, name: &str) -> String {
    let directory = directory.trim_end_matches('/');
    if directory.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", directory, name)
    }
}

/// Directory part of a path (`""` for root-level files).
pub fn parent(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[..idx],
        None => "",
    }
}

/// File name without directory and extension.
pub fn file_stem(path: &str) -> &str {
    let name = &path[path.rfind('/').map_or(0, |i| i + 1)..];
    match name.rfind('.') {
        Some(0) | None => name,
        Some(idx) => &name[..idx],
    }
}

/// Extension without the dot, if any.
pub fn extension(path: &str) -> Option<&str> {
    let name = &path[path.rfind('/').map_or(0, |i| i + 1)..];
    match name.rfind('.') {
        Some(0) | None => None,
        Some(idx) => Some(&name[idx + 1..]),
    }
}

/// Path with a numeric suffix before the extension (`a/b.anim`, 2 -> `a/b_2.anim`).
pub fn with_suffix(path: &str, n: usize) -> String {
    let stem = file_stem(path);
    let name = match extension(path) {
        Some(ext) => format!("{}_{}.{}", stem, n, ext),
        None => format!("{}_{}", stem, n),
    };
    join(parent(path), &name)
}

/// First path among `path`, `path_1`, `path_2`, ... for which `exists` is false.
pub fn unique_path(path: &str, exists: impl Fn(&str) -> bool) -> String {
    if !exists(path) {
        return path.to_string();
    }
    (1..)
        .map(|n| with_suffix(path, n))
        .find(|candidate| !exists(candidate))
        .unwrap_or_else(|| path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_and_split() {
        assert_eq!(join("Animations/", "idle.anim"), "Animations/idle.anim");
        assert_eq!(join("", "idle.anim"), "idle.anim");
        assert_eq!(parent("Animations/Hero/idle.anim"), "Animations/Hero");
        assert_eq!(parent("idle.anim"), "");
        assert_eq!(file_stem("Animations/Hero.controller"), "Hero");
        assert_eq!(extension("Animations/Hero.controller"), Some("controller"));
        assert_eq!(extension("Animations/Hero"), None);
    }

    #[test]
    fn suffix_goes_before_extension() {
        assert_eq!(with_suffix("A/idle.anim", 2), "A/idle_2.anim");
        assert_eq!(with_suffix("idle", 1), "idle_1");
    }

    #[test]
    fn unique_path_skips_taken_names() {
        let taken = ["A/idle.anim", "A/idle_1.anim"];
        let path = unique_path("A/idle.anim", |p| taken.contains(&p));
        assert_eq!(path, "A/idle_2.anim");
        assert_eq!(unique_path("A/run.anim", |p| taken.contains(&p)), "A/run.anim");
    }

    #[test]
    fn unsafe_paths_rejected() {
        assert!(is_safe_asset_path("Animations/Hero/idle.anim"));
        assert!(!is_safe_asset_path("/etc/passwd"));
        assert!(!is_safe_asset_path("../outside.anim"));
        assert!(!is_safe_asset_path("C:/x.anim"));
        assert!(!is_safe_asset_path("a\\b.anim"));
    }

    #[test]
    fn file_names_are_single_segments() {
        assert!(is_safe_file_name("idle"));
        assert!(is_safe_file_name("run..fast"));
        assert!(!is_safe_file_name("../evil"));
        assert!(!is_safe_file_name(".."));
        assert!(!is_safe_file_name("a/b"));
        assert!(!is_safe_file_name("a\\b"));
        assert!(!is_safe_file_name("C:idle"));
    }
}
