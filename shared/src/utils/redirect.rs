//! Validation of post-login redirect targets

/// Check a redirect target against the allowed origins
///
/// A target is accepted when it equals an allowed origin or starts with the
/// origin followed by `/`, so `http://app.example.com.evil.io` never passes
/// for `http://app.example.com`.
pub fn is_allowed_redirect(target: &str, allowed_origins: &[String]) -> bool {
    if target.is_empty() {
        return false;
    }
    allowed_origins.iter().any(|origin| {
        let origin = origin.trim_end_matches('/');
        !origin.is_empty()
            && (target == origin
                || target
                    .strip_prefix(origin)
                    .map_or(false, |rest| rest.starts_with('/')))
    })
}
