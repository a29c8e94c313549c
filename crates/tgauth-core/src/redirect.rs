use tgauth_canonical::AuthField;
use url::form_urlencoded;
use url::Url;

/// Returns `uri` with every assertion parameter removed from its query.
///
/// The widget redirects back to this URI with the assertion appended, so
/// stale `id`/`hash`/... parameters from a previous attempt must not leak
/// into it. Other parameters keep their order and their original encoding;
/// an empty query is dropped.
pub fn sanitize_redirect_uri(uri: &Url) -> Url {
    let Some(query) = uri.query() else {
        return uri.clone();
    };
    let segments: Vec<&str> = query.split('&').collect();
    let kept: Vec<&str> = segments
        .iter()
        .copied()
        .filter(|segment| !is_assertion_parameter(segment))
        .collect();
    if kept.len() == segments.len() {
        return uri.clone();
    }

    let mut sanitized = uri.clone();
    if kept.iter().all(|segment| segment.is_empty()) {
        sanitized.set_query(None);
    } else {
        sanitized.set_query(Some(&kept.join("&")));
    }
    sanitized
}

fn is_assertion_parameter(segment: &str) -> bool {
    form_urlencoded::parse(segment.as_bytes())
        .next()
        .is_some_and(|(name, _)| AuthField::from_name(&name).is_some())
}
