use std::{
    env,
    fs::File,
    io::{self, BufRead, BufReader, Write},
    path::{Path, PathBuf},
};

use log::{debug, info};

use crate::error::{BatchError, PromptError};

pub trait LineSource {
    fn describe(&self) -> String;

    /// `Ok(None)` means no source was chosen.
    fn open(&mut self) -> Result<Option<Box<dyn BufRead>>, BatchError>;
}

/// Read up to the next `\n` and return the lines it holds.
///
/// `\n`, `\r\n` and a lone `\r` all end a line. Bytes that are not UTF-8 are
/// replaced rather than rejected. `Ok(None)` at end of input.
pub fn next_lines(reader: &mut dyn BufRead) -> io::Result<Option<Vec<String>>> {
    let mut buf = Vec::new();
    if reader.read_until(b'\n', &mut buf)? == 0 {
        return Ok(None);
    }

    let decoded = String::from_utf8_lossy(&buf);
    let mut text: &str = &decoded;
    text = text.strip_suffix('\n').unwrap_or(text);
    text = text.strip_suffix('\r').unwrap_or(text);

    Ok(Some(text.split('\r').map(str::to_owned).collect()))
}

fn open_file(path: &Path) -> Result<Box<dyn BufRead>, BatchError> {
    let file = File::open(path).map_err(|source| BatchError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    info!("reading {}", path.display());
    Ok(Box::new(BufReader::new(file)))
}

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        FileSource {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl LineSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn open(&mut self) -> Result<Option<Box<dyn BufRead>>, BatchError> {
        open_file(&self.path).map(Some)
    }
}

/// Asks on the console which file to read. An empty answer cancels.
pub struct PromptedFileSource<R, W> {
    input: R,
    output: W,
    base: PathBuf,
    chosen: Option<PathBuf>,
}

impl PromptedFileSource<io::StdinLock<'static>, io::Stdout> {
    pub fn console() -> io::Result<Self> {
        Ok(PromptedFileSource::new(
            io::stdin().lock(),
            io::stdout(),
            env::current_dir()?,
        ))
    }
}

impl<R: BufRead, W: Write> PromptedFileSource<R, W> {
    pub fn new(input: R, output: W, base: PathBuf) -> Self {
        PromptedFileSource {
            input,
            output,
            base,
            chosen: None,
        }
    }

    fn choose(&mut self) -> Result<Option<PathBuf>, PromptError> {
        writeln!(self.output, "Looking in {}", self.base.display())?;
        write!(self.output, "File to read (leave empty to cancel): ")?;
        self.output.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            return Ok(None);
        }

        let answer = answer.trim();
        if answer.is_empty() {
            return Ok(None);
        }

        Ok(Some(self.base.join(answer)))
    }
}

impl<R: BufRead, W: Write> LineSource for PromptedFileSource<R, W> {
    fn describe(&self) -> String {
        match &self.chosen {
            Some(path) => path.display().to_string(),
            None => "<no file selected>".to_owned(),
        }
    }

    fn open(&mut self) -> Result<Option<Box<dyn BufRead>>, BatchError> {
        let Some(path) = self.choose()? else {
            debug!("file selection cancelled");
            return Ok(None);
        };

        let reader = open_file(&path)?;
        self.chosen = Some(path);
        Ok(Some(reader))
    }
}

/// Lines held in memory.
#[cfg(test)]
pub struct ReaderSource {
    name: String,
    data: Option<Vec<u8>>,
}

#[cfg(test)]
impl ReaderSource {
    pub fn new(name: &str, data: impl Into<Vec<u8>>) -> Self {
        ReaderSource {
            name: name.to_owned(),
            data: Some(data.into()),
        }
    }

    pub fn cancelled() -> Self {
        ReaderSource {
            name: "<cancelled>".to_owned(),
            data: None,
        }
    }
}

#[cfg(test)]
impl LineSource for ReaderSource {
    fn describe(&self) -> String {
        self.name.clone()
    }

    fn open(&mut self) -> Result<Option<Box<dyn BufRead>>, BatchError> {
        Ok(self
            .data
            .take()
            .map(|data| Box::new(io::Cursor::new(data)) as Box<dyn BufRead>))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    fn read_all(mut reader: Box<dyn BufRead>) -> String {
        let mut text = String::new();
        reader.read_to_string(&mut text).unwrap();
        text
    }

    #[test]
    fn file_source_reads_fixture() {
        let mut source = FileSource::new("test-inputs/persons.txt");
        let text = read_all(source.open().unwrap().unwrap());
        assert!(text.starts_with("12, Jane, Doe, Dr., 1980"));
    }

    #[test]
    fn missing_file_is_an_open_error() {
        let mut source = FileSource::new("test-inputs/does-not-exist.txt");
        assert!(matches!(source.open(), Err(BatchError::Open { .. })));
    }

    #[test]
    fn prompted_source_resolves_relative_answer() {
        let base = env::current_dir().unwrap();
        let mut source = PromptedFileSource::new(
            Cursor::new(b"test-inputs/products.txt\n".to_vec()),
            Vec::new(),
            base.clone(),
        );

        let text = read_all(source.open().unwrap().unwrap());
        assert!(text.contains("Widget"));
        assert_eq!(
            source.describe(),
            base.join("test-inputs/products.txt").display().to_string()
        );
    }

    #[test]
    fn prompted_source_empty_answer_cancels() {
        let mut source =
            PromptedFileSource::new(Cursor::new(b"\n".to_vec()), Vec::new(), PathBuf::from("."));
        assert!(source.open().unwrap().is_none());

        let mut source =
            PromptedFileSource::new(Cursor::new(Vec::new()), Vec::new(), PathBuf::from("."));
        assert!(source.open().unwrap().is_none());
    }

    fn all_lines(data: &[u8]) -> Vec<String> {
        let mut reader = Cursor::new(data.to_vec());
        let mut lines = Vec::new();
        while let Some(chunk) = next_lines(&mut reader).unwrap() {
            lines.extend(chunk);
        }
        lines
    }

    #[test]
    fn every_line_ending_splits() {
        assert_eq!(all_lines(b"a\nb\r\nc\rd\r"), vec!["a", "b", "c", "d"]);
        assert_eq!(all_lines(b"a\r\r\nb"), vec!["a", "", "b"]);
        assert_eq!(all_lines(b"\n\n"), vec!["", ""]);
        assert!(all_lines(b"").is_empty());
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let lines = all_lines(b"13, Jos\xE9, Roe\n14, Ann\n");
        assert_eq!(lines, vec!["13, Jos\u{FFFD}, Roe", "14, Ann"]);
    }

    #[test]
    fn reader_source_yields_once() {
        let mut source = ReaderSource::new("memory", "a\nb\n");
        assert_eq!(read_all(source.open().unwrap().unwrap()), "a\nb\n");
        assert!(source.open().unwrap().is_none());
        assert!(ReaderSource::cancelled().open().unwrap().is_none());
    }
}
