//! Reverse-chunk file tailer.
//!
//! Reads the file backward in 32 KiB blocks from EOF so that tailing a
//! multi-gigabyte log costs memory proportional to the requested tail,
//! not the file.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use fleetcheck_core::LogError;

/// Block size for backward reads.
const CHUNK: u64 = 32 * 1024;

/// Extra newlines accumulated beyond the request before stopping. Reading
/// a little too much is cheaper than another seek cycle.
const MARGIN: usize = 5;

/// Return the last `lines` lines of the file at `path`, or the whole file
/// if it has fewer. An empty file yields an empty string.
pub fn tail_file(path: &Path, lines: u32) -> Result<String, LogError> {
    let mut file = File::open(path).map_err(|e| io_err(path, e))?;
    let size = file.metadata().map_err(|e| io_err(path, e))?.len();
    if size == 0 {
        return Ok(String::new());
    }
    let lines = lines as usize;

    let mut buf: Vec<u8> = Vec::new();
    let mut pos = size;
    let mut newlines = 0usize;

    while pos > 0 && newlines <= lines {
        let read_size = CHUNK.min(pos);
        pos -= read_size;

        let mut block = vec![0u8; read_size as usize];
        file.seek(SeekFrom::Start(pos)).map_err(|e| io_err(path, e))?;
        file.read_exact(&mut block).map_err(|e| io_err(path, e))?;

        block.extend_from_slice(&buf);
        buf = block;

        newlines = buf.iter().filter(|&&b| b == b'\n').count();
        if newlines > lines + MARGIN {
            break;
        }
    }

    let text = String::from_utf8_lossy(&buf);
    // A trailing newline would otherwise count as one extra empty line.
    let text = text.strip_suffix('\n').unwrap_or(&*text);
    let parts: Vec<&str> = text.split('\n').collect();
    let keep_from = parts.len().saturating_sub(lines);
    Ok(parts[keep_from..].join("\n"))
}

fn io_err(path: &Path, source: std::io::Error) -> LogError {
    LogError::Io {
        path: path.display().to_string(),
        source,
    }
}
