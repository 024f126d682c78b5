//! Request path normalization.

/// Collapse runs of `/` into one and guarantee exactly one leading slash.
///
/// Idempotent: `normalize(normalize(p)) == normalize(p)` for any `p`.
pub fn normalize(path: &str) -> String {
    let mut out = String::with_capacity(path.len() + 1);
    out.push('/');
    let mut prev_slash = true;
    for c in path.chars() {
        if c == '/' {
            if !prev_slash {
                out.push('/');
            }
            prev_slash = true;
        } else {
            out.push(c);
            prev_slash = false;
        }
    }
    out
}
