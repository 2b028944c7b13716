use std::path::PathBuf;

/// A generated PDF written to the artifact directory. Read at most once by
/// the download handler; files are never swept (accepted limitation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportArtifact {
    pub filename: String,
    pub path: PathBuf,
}

impl ReportArtifact {
    pub fn new(filename: String, path: PathBuf) -> Self {
        Self { filename, path }
    }

    /// The download route serving this artifact.
    pub fn download_url(&self) -> String {
        format!("/api/download/{}", self.filename)
    }
}
