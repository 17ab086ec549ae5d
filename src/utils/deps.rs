use crate::config::{Backend, Binaries};
use std::process::Stdio;
use tokio::process::Command;

/// Availability of the tools a backend needs
#[derive(Debug, Clone)]
pub struct DependencyStatus {
    /// Tools that did not answer a version query
    pub missing: Vec<String>,
}

impl DependencyStatus {
    /// Check the writer and prober of a backend
    pub async fn check(backend: Backend, binaries: &Binaries) -> Self {
        let mut tools = vec![binaries.writer(backend)];
        if binaries.prober(backend) != binaries.writer(backend) {
            tools.push(binaries.prober(backend));
        }

        let version_flag = match backend {
            Backend::Mkvmerge => "--version",
            Backend::Ffmpeg => "-version",
        };

        let mut missing = Vec::new();
        for tool in tools {
            if !check_command(tool, &[version_flag]).await {
                missing.push(tool.to_string());
            }
        }

        Self { missing }
    }

    pub fn is_ready(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Check if a command is available
async fn check_command(cmd: &str, args: &[&str]) -> bool {
    Command::new(cmd)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .is_ok_and(|s| s.success())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_tools_are_listed() {
        let binaries = Binaries {
            mkvmerge: "mkvcleaner-missing-mkvmerge".to_string(),
            ffmpeg: "mkvcleaner-missing-ffmpeg".to_string(),
            ffprobe: "mkvcleaner-missing-ffprobe".to_string(),
        };

        let remux = DependencyStatus::check(Backend::Mkvmerge, &binaries).await;
        assert!(!remux.is_ready());
        assert_eq!(remux.missing, vec!["mkvcleaner-missing-mkvmerge"]);

        let copy = DependencyStatus::check(Backend::Ffmpeg, &binaries).await;
        assert_eq!(copy.missing, vec!["mkvcleaner-missing-ffmpeg", "mkvcleaner-missing-ffprobe"]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_available_tool_is_not_missing() {
        let binaries = Binaries {
            mkvmerge: "true".to_string(),
            ffmpeg: "true".to_string(),
            ffprobe: "true".to_string(),
        };
        assert!(DependencyStatus::check(Backend::Mkvmerge, &binaries).await.is_ready());
    }
}
