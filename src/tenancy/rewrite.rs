// src/tenancy/rewrite.rs

/// Path prefixes that are never rewritten onto a tenant route:
/// API, static assets and the service's own health endpoint.
const EXCLUDED_PREFIXES: &[&str] = &["/api", "/static", "/assets", "/backend_health"];

const EXCLUDED_EXACT: &[&str] = &["/favicon.ico", "/manifest.json"];

/// Whether a path is exempt from tenant rewriting (and from session
/// refresh in the middleware, to keep auth I/O off asset requests).
pub fn is_excluded_path(path: &str) -> bool {
    if EXCLUDED_EXACT.contains(&path) {
        return true;
    }
    if EXCLUDED_PREFIXES
        .iter()
        .any(|p| path == *p || path.starts_with(&format!("{}/", p)))
    {
        return true;
    }
    // Any segment with a dot implies a file extension.
    path.split('/').any(|segment| segment.contains('.'))
}

/// Map an original path onto its tenant-scoped internal route.
/// Excluded paths come back unchanged; the query string is re-appended
/// verbatim when non-empty. Pure: no request state involved.
pub fn rewrite_path(slug: &str, path: &str, query: &str) -> String {
    if is_excluded_path(path) {
        return if query.is_empty() {
            path.to_string()
        } else {
            format!("{}?{}", path, query)
        };
    }

    let internal = format!("/{}{}", slug, path);
    if query.is_empty() {
        internal
    } else {
        format!("{}?{}", internal, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrites_plain_paths_under_the_slug() {
        assert_eq!(rewrite_path("fc1984", "/", ""), "/fc1984/");
        assert_eq!(
            rewrite_path("fc1984", "/dashboard", ""),
            "/fc1984/dashboard"
        );
    }

    #[test]
    fn preserves_the_query_string() {
        assert_eq!(
            rewrite_path("fc1984", "/fixtures", "round=3&leg=first"),
            "/fc1984/fixtures?round=3&leg=first"
        );
    }

    #[test]
    fn excluded_prefixes_pass_unchanged() {
        assert_eq!(rewrite_path("fc1984", "/api/teams", ""), "/api/teams");
        assert_eq!(rewrite_path("fc1984", "/static/app.css", ""), "/static/app.css");
        assert_eq!(rewrite_path("fc1984", "/favicon.ico", ""), "/favicon.ico");
    }

    #[test]
    fn dotted_segments_are_treated_as_files() {
        assert!(is_excluded_path("/logo.svg"));
        assert!(is_excluded_path("/img/crest.png"));
        assert!(!is_excluded_path("/dashboard"));
    }

    #[test]
    fn same_inputs_same_output() {
        let a = rewrite_path("fc1984", "/dashboard", "tab=teams");
        let b = rewrite_path("fc1984", "/dashboard", "tab=teams");
        assert_eq!(a, b);
    }
}
