//! HTTP route labels.

/// Collapse numeric path segments so labels stay low-cardinality.
pub(super) fn route_label(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let mut label = String::from("/");

    for (index, segment) in path.trim_start_matches('/').split('/').enumerate() {
        if index > 0 {
            label.push('/');
        }

        if !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()) {
            label.push_str("{pk}");
        } else {
            label.push_str(segment);
        }
    }

    label
}
