use anyhow::Result;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, BufReader};
use tracing::{debug, warn};

/// Configuration for draft reading behavior
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Whether to fail fast on first error or continue processing
    pub fail_fast: bool,
    /// Buffer size for async reading (default: 8KB)
    pub buffer_size: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            fail_fast: false,
            buffer_size: 8192,
        }
    }
}

/// Statistics for a draft read
#[derive(Debug, Clone)]
pub struct ReadStats {
    pub file_path: String,
    pub bytes_read: u64,
    pub duration_ms: u64,
    pub read_error: Option<String>,
}

/// Async reader that loads whole drafts and validates UTF-8
pub struct AsyncDraftReader {
    config: ReaderConfig,
}

impl AsyncDraftReader {
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Read a draft with async buffered I/O
    ///
    /// Without `fail_fast`, open and decode errors are reported in the stats
    /// alongside empty content.
    pub async fn read_draft<P: AsRef<Path>>(&self, file_path: P) -> Result<(String, ReadStats)> {
        let path = file_path.as_ref();
        let start_time = std::time::Instant::now();

        debug!("Starting async read of draft: {}", path.display());

        let mut bytes = Vec::new();
        let outcome = match File::open(path).await {
            Ok(file) => {
                let mut reader = BufReader::with_capacity(self.config.buffer_size, file);
                reader.read_to_end(&mut bytes).await
                    .map_err(|e| format!("Failed to read draft {}: {}", path.display(), e))
                    .and_then(|_| {
                        String::from_utf8(std::mem::take(&mut bytes))
                            .map_err(|e| format!("UTF-8 decoding error in {}: {}", path.display(), e))
                    })
            }
            Err(e) => Err(format!("Failed to open draft {}: {}", path.display(), e)),
        };

        let mut stats = ReadStats {
            file_path: path.display().to_string(),
            bytes_read: 0,
            duration_ms: start_time.elapsed().as_millis() as u64,
            read_error: None,
        };

        match outcome {
            Ok(content) => {
                stats.bytes_read = content.len() as u64;
                debug!("Read {} bytes from {} in {}ms", stats.bytes_read, path.display(), stats.duration_ms);
                Ok((content, stats))
            }
            Err(error_msg) => {
                warn!("{}", error_msg);
                if self.config.fail_fast {
                    return Err(anyhow::anyhow!(error_msg));
                }
                stats.read_error = Some(error_msg);
                Ok((String::new(), stats))
            }
        }
    }
}
