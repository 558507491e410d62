pub(crate) fn redacted(s: &str) -> String {
    s.chars().map(|_| 'x').collect()
}

pub(crate) fn trim_path(s: &str) -> &str {
    const HEAD: &str = "/";
    const TAIL: &str = "/?";
    s.trim()
        .trim_start_matches(|c| HEAD.contains(c))
        .trim_end_matches(|c| TAIL.contains(c))
}

pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), trim_path(path))
}
