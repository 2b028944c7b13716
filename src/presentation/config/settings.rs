use std::path::PathBuf;

/// Upload size cap for the multipart endpoint.
pub const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

const DEFAULT_PORT: u16 = 5000;

/// Service configuration, read from the environment exactly once at
/// startup and passed into the components that need it.
#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    /// Model-provider credential; absence degrades synthesis to the
    /// deterministic fallback.
    pub huggingface_api_token: Option<String>,
    /// Search-provider credential; absence degrades search to the
    /// sentinel fallback result.
    pub serpapi_api_key: Option<String>,
    /// Where generated report artifacts are written.
    pub artifact_dir: PathBuf,
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            huggingface_api_token: non_empty_var("HUGGINGFACE_API_TOKEN"),
            serpapi_api_key: non_empty_var("SERPAPI_API_KEY"),
            artifact_dir: std::env::var("ARTIFACT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| std::env::temp_dir()),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_credentials_count_as_absent() {
        // Var name is unique to this test so parallel tests cannot race.
        std::env::set_var("REPORTAL_TEST_BLANK_VAR", "   ");
        assert_eq!(non_empty_var("REPORTAL_TEST_BLANK_VAR"), None);
        assert_eq!(non_empty_var("REPORTAL_TEST_UNSET_VAR"), None);
    }
}
