//! Incremental line reader
//!
//! Reads the bytes appended to a file since a recorded offset and writes every
//! complete, non-blank line to an output sink.

use crate::error::TailError;
use crate::platform::FileOpener;
use serde::{Deserialize, Serialize};
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::Path;
use tracing::{debug, warn};

/// Longest line accepted before the scan gives up on a file
pub const DEFAULT_MAX_LINE_BYTES: usize = 64 * 1024;

/// What to do with an unterminated fragment at end of file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartialLinePolicy {
    /// Leave the offset before the fragment so it is read again once completed
    #[default]
    Hold,
    /// Advance past the fragment without emitting it
    Discard,
}

/// Emitter tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmitterConfig {
    pub partial_lines: PartialLinePolicy,
    pub max_line_bytes: usize,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            partial_lines: PartialLinePolicy::default(),
            max_line_bytes: DEFAULT_MAX_LINE_BYTES,
        }
    }
}

/// Reads appended lines from tailed files
pub struct LineEmitter {
    opener: Box<dyn FileOpener>,
    config: EmitterConfig,
}

impl LineEmitter {
    pub fn new(opener: impl FileOpener + 'static, config: EmitterConfig) -> Self {
        Self {
            opener: Box::new(opener),
            config,
        }
    }

    /// Emit the lines appended to `path` after `from` and return the offset to record next.
    ///
    /// - Open failure: logged, `from` is returned so the next event retries.
    /// - Scan failure: logged, the end-of-stream offset is returned and the
    ///   rest of the file is skipped.
    /// - Output failure: logged, the offset after the last line fully written
    ///   is returned.
    pub fn read_appended(&self, path: &Path, from: u64, out: &mut dyn Write) -> u64 {
        let file = match self.opener.open_read_only(path) {
            Ok(file) => file,
            Err(source) => {
                let err = TailError::Open {
                    path: path.to_path_buf(),
                    source,
                };
                warn!(error = %err, "skipping read");
                return from;
            }
        };

        let mut reader = BufReader::new(file);
        let mut progress = Progress {
            offset: from,
            emitted: 0,
        };
        match scan(&mut reader, path, &self.config, out, &mut progress) {
            Ok(()) => {
                debug!(
                    path = %path.display(),
                    from,
                    offset = progress.offset,
                    emitted = progress.emitted,
                    "read appended lines"
                );
                progress.offset
            }
            Err(err @ TailError::Output(_)) => {
                warn!(
                    error = %err,
                    path = %path.display(),
                    offset = progress.offset,
                    "output failed, keeping offset of last written line"
                );
                progress.offset
            }
            Err(err) => {
                warn!(error = %err, "scan stopped, skipping to end of file");
                match reader.seek(SeekFrom::End(0)) {
                    Ok(end) => end.max(from),
                    Err(_) => from,
                }
            }
        }
    }
}

/// How far a scan got before it finished or failed
struct Progress {
    /// End of the last line consumed (emitted or blank)
    offset: u64,
    emitted: usize,
}

/// Scan from `progress.offset` to end of stream, advancing `progress` line by line.
fn scan<R: BufRead + Seek>(
    reader: &mut R,
    path: &Path,
    config: &EmitterConfig,
    out: &mut dyn Write,
    progress: &mut Progress,
) -> Result<(), TailError> {
    let from = progress.offset;
    reader
        .seek(SeekFrom::Start(from))
        .map_err(|source| TailError::Seek {
            path: path.to_path_buf(),
            offset: from,
            source,
        })?;

    let limit = config.max_line_bytes;
    let mut line = Vec::new();

    loop {
        line.clear();
        let read = reader
            .by_ref()
            .take(limit as u64 + 1)
            .read_until(b'\n', &mut line)
            .map_err(|source| TailError::Scan {
                path: path.to_path_buf(),
                offset: progress.offset,
                source,
            })?;
        if read == 0 {
            break;
        }

        if line.last() != Some(&b'\n') {
            if line.len() > limit {
                return Err(TailError::LineTooLong {
                    path: path.to_path_buf(),
                    offset: progress.offset,
                    limit,
                });
            }
            // Unterminated fragment at end of stream
            if config.partial_lines == PartialLinePolicy::Discard {
                progress.offset += read as u64;
            }
            break;
        }

        let content = strip_terminator(&line);
        if !is_blank(content) {
            out.write_all(content).map_err(TailError::Output)?;
            out.write_all(b"\n").map_err(TailError::Output)?;
            progress.emitted += 1;
        }
        progress.offset += read as u64;
    }

    out.flush().map_err(TailError::Output)
}

fn strip_terminator(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

fn is_blank(content: &[u8]) -> bool {
    String::from_utf8_lossy(content).trim().is_empty()
}
