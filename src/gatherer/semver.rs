use semver::Version;

/// Strips a single leading `v` or `V` from a release identifier.
pub fn normalize_identifier(identifier: &str) -> &str {
    identifier
        .strip_prefix('v')
        .or_else(|| identifier.strip_prefix('V'))
        .unwrap_or(identifier)
}

/// Parse a release identifier into a semver::Version, normalizing partial versions.
///
/// Handles a leading 'v' and partial versions like "1" or "1.2" by padding
/// with zeros. Pre-release and build suffixes are kept on full versions.
///
/// Examples:
/// - "v1" -> Version(1, 0, 0)
/// - "1.2" -> Version(1, 2, 0)
/// - "v1.2.3-rc.1" -> Version(1, 2, 3-rc.1)
pub fn parse_identifier(identifier: &str) -> Option<Version> {
    let version = normalize_identifier(identifier.trim());
    let parts: Vec<&str> = version.split('.').collect();
    let normalized = match parts.len() {
        1 => format!("{}.0.0", parts[0]),
        2 => format!("{}.{}.0", parts[0], parts[1]),
        _ => version.to_string(),
    };
    Version::parse(&normalized).ok()
}
