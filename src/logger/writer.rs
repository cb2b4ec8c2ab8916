//! Size-rotating file writer for the file layer

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::MakeWriter;

use crate::logger::config::FileConfig;

/// Log file writer that rotates `app.log` into `app.log.1` .. `app.log.N`.
///
/// Cloned handles share the same file. When the file cannot be written the writer
/// switches to stderr so that log lines are not lost.
#[derive(Clone)]
pub struct RotatingFileWriter {
    state: Arc<Mutex<WriterState>>,
}

struct WriterState {
    file: File,
    path: PathBuf,
    current_size: u64,
    max_size: u64,
    max_files: usize,
    fallback_mode: bool,
}

impl RotatingFileWriter {
    pub fn new(config: &FileConfig) -> anyhow::Result<Self> {
        if let Some(parent) = config.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let file = open_log_file(&config.path, config.append)?;
        let current_size = file.metadata().map(|m| m.len()).unwrap_or(0);

        Ok(Self {
            state: Arc::new(Mutex::new(WriterState {
                file,
                path: config.path.clone(),
                current_size,
                max_size: config.rotation.max_size,
                max_files: config.rotation.max_files,
                fallback_mode: false,
            })),
        })
    }

    #[cfg(test)]
    fn is_in_fallback_mode(&self) -> bool {
        self.state.lock().map(|s| s.fallback_mode).unwrap_or(false)
    }
}

impl<'a> MakeWriter<'a> for RotatingFileWriter {
    type Writer = RotatingWriterGuard;

    fn make_writer(&'a self) -> Self::Writer {
        RotatingWriterGuard {
            state: self.state.clone(),
        }
    }
}

/// Per-event writer handed out to the fmt layer
pub struct RotatingWriterGuard {
    state: Arc<Mutex<WriterState>>,
}

impl Write for RotatingWriterGuard {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| io::Error::other("Failed to acquire writer lock"))?;

        if state.fallback_mode {
            return io::stderr().write(buf);
        }

        if state.needs_rotation(buf.len())
            && let Err(e) = state.rotate()
        {
            eprintln!("Log rotation failed, falling back to stderr: {e}");
            state.fallback_mode = true;
            return io::stderr().write(buf);
        }

        match state.file.write(buf) {
            Ok(written) => {
                state.current_size += written as u64;
                Ok(written)
            }
            Err(e) => {
                eprintln!("Log file write failed, falling back to stderr: {e}");
                state.fallback_mode = true;
                io::stderr().write(buf)
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| io::Error::other("Failed to acquire writer lock"))?;

        if state.fallback_mode {
            return io::stderr().flush();
        }
        state.file.flush()
    }
}

impl WriterState {
    fn needs_rotation(&self, incoming: usize) -> bool {
        self.current_size > 0 && self.current_size + incoming as u64 > self.max_size
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;

        let oldest = rotated_path(&self.path, self.max_files);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (1..self.max_files).rev() {
            let from = rotated_path(&self.path, index);
            if from.exists() {
                fs::rename(&from, rotated_path(&self.path, index + 1))?;
            }
        }
        fs::rename(&self.path, rotated_path(&self.path, 1))?;

        self.file = open_log_file(&self.path, false)?;
        self.current_size = 0;
        Ok(())
    }
}

/// `app.log` -> `app.log.3`
pub fn rotated_path(path: &Path, index: usize) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(format!(".{index}"));
    PathBuf::from(name)
}

fn open_log_file(path: &Path, append: bool) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.create(true);
    if append {
        options.append(true);
    } else {
        options.write(true).truncate(true);
    }
    options.open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::config::RotationConfig;
    use tempfile::TempDir;

    fn file_config(dir: &TempDir, max_size: u64, max_files: usize) -> FileConfig {
        FileConfig {
            enabled: true,
            path: dir.path().join("logs").join("app.log"),
            append: true,
            rotation: RotationConfig {
                max_size,
                max_files,
            },
            ..FileConfig::default()
        }
    }

    fn write_line(writer: &RotatingFileWriter, line: &str) {
        let mut guard = writer.make_writer();
        guard.write_all(line.as_bytes()).unwrap();
        guard.flush().unwrap();
    }

    #[test]
    fn test_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let config = file_config(&dir, 1024, 2);
        let writer = RotatingFileWriter::new(&config).unwrap();

        write_line(&writer, "hello\n");

        assert_eq!(fs::read_to_string(&config.path).unwrap(), "hello\n");
        assert!(!writer.is_in_fallback_mode());
    }

    #[test]
    fn test_rotates_when_size_exceeded() {
        let dir = TempDir::new().unwrap();
        let config = file_config(&dir, 10, 3);
        let writer = RotatingFileWriter::new(&config).unwrap();

        write_line(&writer, "first-08\n");
        write_line(&writer, "second-8\n");

        assert_eq!(fs::read_to_string(&config.path).unwrap(), "second-8\n");
        assert_eq!(
            fs::read_to_string(rotated_path(&config.path, 1)).unwrap(),
            "first-08\n"
        );
    }

    #[test]
    fn test_keeps_at_most_max_files() {
        let dir = TempDir::new().unwrap();
        let config = file_config(&dir, 4, 2);
        let writer = RotatingFileWriter::new(&config).unwrap();

        for line in ["aaa\n", "bbb\n", "ccc\n", "ddd\n"] {
            write_line(&writer, line);
        }

        assert_eq!(fs::read_to_string(&config.path).unwrap(), "ddd\n");
        assert_eq!(fs::read_to_string(rotated_path(&config.path, 1)).unwrap(), "ccc\n");
        assert_eq!(fs::read_to_string(rotated_path(&config.path, 2)).unwrap(), "bbb\n");
        assert!(!rotated_path(&config.path, 3).exists());
    }

    #[test]
    fn test_append_mode_keeps_existing_content() {
        let dir = TempDir::new().unwrap();
        let config = file_config(&dir, 1024, 2);
        fs::create_dir_all(config.path.parent().unwrap()).unwrap();
        fs::write(&config.path, "old\n").unwrap();

        let writer = RotatingFileWriter::new(&config).unwrap();
        write_line(&writer, "new\n");
        assert_eq!(fs::read_to_string(&config.path).unwrap(), "old\nnew\n");

        let truncating = FileConfig {
            append: false,
            ..config.clone()
        };
        let writer = RotatingFileWriter::new(&truncating).unwrap();
        write_line(&writer, "fresh\n");
        assert_eq!(fs::read_to_string(&config.path).unwrap(), "fresh\n");
    }

    #[test]
    fn test_falls_back_to_stderr_when_rotation_fails() {
        let dir = TempDir::new().unwrap();
        let config = file_config(&dir, 10, 2);
        let writer = RotatingFileWriter::new(&config).unwrap();

        write_line(&writer, "first-08\n");
        fs::remove_dir_all(dir.path().join("logs")).unwrap();
        write_line(&writer, "second-8\n");

        assert!(writer.is_in_fallback_mode());
        write_line(&writer, "third-08\n");
        assert!(!config.path.exists());
    }

    #[test]
    fn test_rotated_path_naming() {
        assert_eq!(
            rotated_path(Path::new("logs/app.log"), 2),
            PathBuf::from("logs/app.log.2")
        );
    }
}
