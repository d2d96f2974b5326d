use std::time::Duration;

#[derive(Debug, Clone)]
pub enum DownloadProgress {
    Started {
        url: String,
        total_bytes: Option<u64>,
    },
    Progress {
        bytes_received: u64,
        total_bytes: Option<u64>,
    },
    Completed {
        decompressed_bytes: u64,
        duration: Duration,
    },
    Failed {
        url: String,
        error: String,
    },
}

impl DownloadProgress {
    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            DownloadProgress::Completed { .. } | DownloadProgress::Failed { .. }
        )
    }
}

pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.0 MB");
    }

    #[test]
    fn test_finished_events() {
        let done = DownloadProgress::Completed {
            decompressed_bytes: 40,
            duration: Duration::from_millis(5),
        };
        let running = DownloadProgress::Progress {
            bytes_received: 10,
            total_bytes: None,
        };
        assert!(done.is_finished());
        assert!(!running.is_finished());
    }
}
