use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor};
use std::iter;
use std::path::PathBuf;
use std::vec;

use errors::*;

/// The `RecordSource` trait describes anything a stage can read its input records from.
///
/// `open` is called once per run. The returned iterator is a single forward pass over the input;
/// a read failure part way through is reported as an `Err` item.
pub trait RecordSource {
    type Record: Send + 'static;
    type Records: Iterator<Item = Result<Self::Record>>;

    fn open(self) -> Result<Self::Records>;
}

/// `LineRecord` is one line of text input.
///
/// `offset` is the byte offset of the line within the file (or stream) it was read from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRecord {
    pub offset: u64,
    pub line: String,
}

impl LineRecord {
    pub fn new<S: Into<String>>(offset: u64, line: S) -> Self {
        LineRecord {
            offset,
            line: line.into(),
        }
    }
}

/// `TextSource` is the line-oriented input adapter used by the text jobs.
pub enum TextSource {
    /// Standard input of the process.
    Stdin,
    /// A list of files read one after another, in the given order.
    Files(Vec<PathBuf>),
    /// In-memory text.
    Text(String),
}

impl TextSource {
    pub fn from_text<S: Into<String>>(text: S) -> Self {
        TextSource::Text(text.into())
    }
}

impl RecordSource for TextSource {
    type Record = LineRecord;
    type Records = LineRecords;

    fn open(self) -> Result<LineRecords> {
        let mut readers: VecDeque<(String, Box<dyn BufRead>)> = VecDeque::new();
        match self {
            TextSource::Stdin => {
                readers.push_back(("<stdin>".to_owned(), Box::new(BufReader::new(io::stdin()))));
            }
            TextSource::Files(paths) => {
                if paths.is_empty() {
                    warn!("No input files given");
                }
                // Every file is opened up front so a bad path fails before any record is mapped.
                for path in paths {
                    let name = path.display().to_string();
                    let file = File::open(&path)
                        .chain_err(|| ErrorKind::SourceUnavailable(name.clone()))?;
                    readers.push_back((name, Box::new(BufReader::new(file))));
                }
            }
            TextSource::Text(text) => {
                readers.push_back(("<text>".to_owned(), Box::new(Cursor::new(text.into_bytes()))));
            }
        }
        Ok(LineRecords { readers, offset: 0 })
    }
}

/// `LineRecords` yields one `LineRecord` per line across a sequence of readers.
///
/// Line terminators (`\n` or `\r\n`) are trimmed; everything else is kept verbatim.
pub struct LineRecords {
    readers: VecDeque<(String, Box<dyn BufRead>)>,
    offset: u64,
}

impl LineRecords {
    #[cfg(test)]
    fn from_reader<R: BufRead + 'static>(name: &str, reader: R) -> Self {
        let mut readers: VecDeque<(String, Box<dyn BufRead>)> = VecDeque::new();
        readers.push_back((name.to_owned(), Box::new(reader)));
        LineRecords { readers, offset: 0 }
    }
}

fn trim_line_terminator(line: &mut String) {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
}

impl Iterator for LineRecords {
    type Item = Result<LineRecord>;

    fn next(&mut self) -> Option<Result<LineRecord>> {
        loop {
            let mut line = String::new();
            let read = {
                let (name, reader) = self.readers.front_mut()?;
                match reader.read_line(&mut line) {
                    Ok(read) => read,
                    Err(err) => {
                        let name = name.clone();
                        self.readers.clear();
                        return Some(Err(err).chain_err(|| ErrorKind::SourceUnavailable(name)));
                    }
                }
            };

            if read == 0 {
                self.readers.pop_front();
                self.offset = 0;
                continue;
            }

            let offset = self.offset;
            self.offset += read as u64;
            trim_line_terminator(&mut line);
            return Some(Ok(LineRecord { offset, line }));
        }
    }
}

/// Records already held in memory. Stage outputs are fed to the next stage this way.
impl<T: Send + 'static> RecordSource for Vec<T> {
    type Record = T;
    type Records = iter::Map<vec::IntoIter<T>, fn(T) -> Result<T>>;

    fn open(self) -> Result<Self::Records> {
        Ok(self.into_iter().map(Ok as fn(T) -> Result<T>))
    }
}
