//! Conversation file parsing.
//!
//! A conversation is UTF-8 text with one `Speaker: text` utterance per line.
//! Only the first `:` separates speaker from text. Lines without a colon and
//! lines whose text is blank are skipped silently; speaker labels are not
//! validated here.

use dialogue_voice_domain::{DialogueError, Result, SpeakerLabel, Utterance};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::trace;

const DELIMITER: char = ':';
const BOM: char = '\u{feff}';

/// Split one line into trimmed `(speaker, text)`.
///
/// Returns `None` when the line has no delimiter or the text is empty.
pub fn parse_line(line: &str) -> Option<(&str, &str)> {
    let (speaker, text) = line.split_once(DELIMITER)?;
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Some((speaker.trim(), text))
}

/// Handle on a conversation file.
///
/// Iteration always starts from the top of the file: every call to
/// [`Conversation::utterances`] reopens it.
#[derive(Debug, Clone)]
pub struct Conversation {
    path: PathBuf,
}

impl Conversation {
    /// Fails with [`DialogueError::FileNotFound`] if `path` does not exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DialogueError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lazily parse the file from the beginning.
    pub fn utterances(&self) -> Result<Utterances<BufReader<File>>> {
        let file = File::open(&self.path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => DialogueError::FileNotFound {
                path: self.path.clone(),
            },
            _ => DialogueError::io(&self.path, e),
        })?;
        Ok(Utterances::new(BufReader::new(file), self.path.clone()))
    }

    /// Parse the whole file eagerly.
    pub fn read_all(&self) -> Result<Vec<Utterance>> {
        self.utterances()?.collect()
    }
}

/// Iterator of utterances over any buffered reader.
#[derive(Debug)]
pub struct Utterances<R> {
    reader: R,
    source: PathBuf,
    line_no: usize,
    buf: String,
}

impl<R: BufRead> Utterances<R> {
    fn new(reader: R, source: PathBuf) -> Self {
        Self {
            reader,
            source,
            line_no: 0,
            buf: String::new(),
        }
    }

    /// Parse text that is already in memory or comes from a non-file source.
    pub fn from_reader(reader: R) -> Self {
        Self::new(reader, PathBuf::from("<memory>"))
    }
}

impl<R: BufRead> Iterator for Utterances<R> {
    type Item = Result<Utterance>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(DialogueError::io(&self.source, e))),
            }
            self.line_no += 1;

            let mut line = self.buf.as_str();
            if self.line_no == 1 {
                line = line.trim_start_matches(BOM);
            }

            match parse_line(line) {
                Some((speaker, text)) => {
                    return Some(Ok(Utterance::new(
                        self.line_no,
                        SpeakerLabel::new(speaker),
                        text,
                    )));
                }
                None => trace!(line = self.line_no, "skipping line without utterance"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse(text: &str) -> Vec<Utterance> {
        Utterances::from_reader(Cursor::new(text.as_bytes().to_vec()))
            .collect::<Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn splits_on_first_colon_only() {
        assert_eq!(
            parse_line("PersonA: Meet me at 10:30: sharp"),
            Some(("PersonA", "Meet me at 10:30: sharp"))
        );
    }

    #[test]
    fn trims_speaker_and_text() {
        assert_eq!(parse_line("  PersonB  :   Hello back.  \n"), Some(("PersonB", "Hello back.")));
    }

    #[test]
    fn skips_lines_without_delimiter_or_text() {
        assert_eq!(parse_line("just narration"), None);
        assert_eq!(parse_line("PersonA:    "), None);
        assert_eq!(parse_line(""), None);
    }

    #[test]
    fn keeps_line_numbers_and_order() {
        let utterances = parse("PersonA: Hi there.\n\nnoise\nPersonB: Hello back.\r\nPersonA:\n");
        assert_eq!(utterances.len(), 2);
        assert_eq!(utterances[0], Utterance::new(1, "PersonA", "Hi there."));
        assert_eq!(utterances[1], Utterance::new(4, "PersonB", "Hello back."));
    }

    #[test]
    fn unknown_labels_are_not_rejected_while_parsing() {
        let utterances = parse("Narrator: Once upon a time\n: no speaker\n");
        assert_eq!(utterances[0].speaker.as_str(), "Narrator");
        assert_eq!(utterances[1].speaker.as_str(), "");
    }

    #[test]
    fn strips_byte_order_mark() {
        let utterances = parse("\u{feff}PersonA: Hi");
        assert_eq!(utterances[0].speaker.as_str(), "PersonA");
    }

    #[test]
    fn missing_file_is_reported() {
        let err = Conversation::open("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, DialogueError::FileNotFound { .. }));
    }

    #[test]
    fn iteration_restarts_from_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conversation.txt");
        std::fs::write(&path, "PersonA: One\nPersonB: Two\n").unwrap();

        let conversation = Conversation::open(&path).unwrap();
        let mut first = conversation.utterances().unwrap();
        assert_eq!(first.next().unwrap().unwrap().text, "One");

        let again = conversation.read_all().unwrap();
        assert_eq!(again.len(), 2);
        assert_eq!(again[0].text, "One");
        assert_eq!(first.next().unwrap().unwrap().text, "Two");
    }
}
