/// Fixed prefix prepended to every logical path before it reaches the
/// backend. Leading slashes are stripped when the prefix is set; a non-empty
/// prefix always carries a trailing `/`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathPrefix {
    prefix: String,
}

impl PathPrefix {
    pub fn new(prefix: &str) -> Self {
        let trimmed = prefix.trim_start_matches('/');

        let prefix = if trimmed.is_empty() || trimmed.ends_with('/') {
            trimmed.to_string()
        } else {
            format!("{}/", trimmed)
        };

        Self { prefix }
    }

    /// Compose the backend object name for a logical path. Leading slashes
    /// on the caller's path never reach the backend.
    pub fn apply(&self, path: &str) -> String {
        format!("{}{}", self.prefix, path.trim_start_matches('/'))
    }

    pub fn as_str(&self) -> &str {
        &self.prefix
    }
}

/// The marker name for a directory key: trimmed of trailing slashes, then a
/// single `/` appended. The bucket root has no marker and stays empty.
pub fn as_directory(key: &str) -> String {
    let trimmed = key.trim_end_matches('/');

    if trimmed.is_empty() {
        return String::new();
    }

    format!("{}/", trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_apply() {
        let cases = vec![
            ("root/", "a.txt", "root/a.txt"),
            ("root/", "/a.txt", "root/a.txt"),
            ("root", "a.txt", "root/a.txt"),
            ("/root/", "a.txt", "root/a.txt"),
            ("//root", "//a.txt", "root/a.txt"),
            ("", "a.txt", "a.txt"),
            ("", "/a.txt", "a.txt"),
            ("root/", "docs/readme.txt", "root/docs/readme.txt"),
        ];

        for (prefix, path, expected) in cases {
            let result = PathPrefix::new(prefix).apply(path);
            assert_eq!(
                result, expected,
                "failed for case: {} + {}",
                prefix, path
            );
        }
    }

    #[test]
    fn test_prefix_as_str() {
        let cases = vec![
            ("root/", "root/"),
            ("root", "root/"),
            ("/root", "root/"),
            ("", ""),
            ("/", ""),
        ];

        for (prefix, expected) in cases {
            let result = PathPrefix::new(prefix);
            assert_eq!(result.as_str(), expected, "failed for case: {}", prefix);
        }
    }

    #[test]
    fn test_as_directory() {
        let cases = vec![
            ("docs", "docs/"),
            ("docs/", "docs/"),
            ("docs//", "docs/"),
            ("root/docs", "root/docs/"),
            ("", ""),
            ("/", ""),
        ];

        for (key, expected) in cases {
            let result = as_directory(key);
            assert_eq!(result, expected, "failed for case: {}", key);
        }
    }
}
