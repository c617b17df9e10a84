/// Strips an optional `Bearer ` scheme prefix (case-insensitive) from an `Authorization` header value.
pub fn strip_bearer_prefix(value: &str) -> &str {
    let value = value.trim();
    match value.get(..7) {
        Some(scheme) if scheme.eq_ignore_ascii_case("bearer ") => value[7..].trim_start(),
        _ => value,
    }
}
