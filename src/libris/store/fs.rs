use super::{Collection, DataStore};
use crate::config::LibrisConfig;
use crate::error::{LibrisError, Result};
use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

pub struct FileStore {
    root: PathBuf,
    books_file: String,
    users_file: String,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        let defaults = LibrisConfig::default();
        Self {
            root,
            books_file: defaults.books_file,
            users_file: defaults.users_file,
        }
    }

    pub fn with_config(mut self, config: &LibrisConfig) -> Self {
        self.books_file = config.books_file.clone();
        self.users_file = config.users_file.clone();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn collection_path(&self, collection: Collection) -> PathBuf {
        match collection {
            Collection::Books => self.root.join(&self.books_file),
            Collection::Users => self.root.join(&self.users_file),
        }
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(LibrisError::Io)?;
        }
        Ok(())
    }
}

impl DataStore for FileStore {
    fn read_lines(&self, collection: Collection) -> Result<Vec<String>> {
        let path = self.collection_path(collection);
        if !path.exists() {
            log::debug!("{} does not exist, starting empty", path.display());
            return Ok(Vec::new());
        }

        let file = fs::File::open(&path).map_err(LibrisError::Io)?;
        let mut lines = Vec::new();
        for (n, raw) in BufReader::new(file).split(b'\n').enumerate() {
            let mut raw = raw.map_err(LibrisError::Io)?;
            if raw.last() == Some(&b'\r') {
                raw.pop();
            }
            // Invalid UTF-8 must not sink the whole collection.
            let line = match String::from_utf8(raw) {
                Ok(line) => line,
                Err(e) => {
                    log::warn!(
                        "{} line {} is not valid UTF-8, replacing bad bytes",
                        path.display(),
                        n + 1
                    );
                    String::from_utf8_lossy(e.as_bytes()).into_owned()
                }
            };
            lines.push(line);
        }
        Ok(lines)
    }

    fn write_lines(&mut self, collection: Collection, lines: &[String]) -> Result<()> {
        self.ensure_dir(&self.root)?;
        let path = self.collection_path(collection);

        let tmp_path = self.root.join(format!(".{}.tmp", collection));
        {
            let mut tmp = fs::File::create(&tmp_path).map_err(LibrisError::Io)?;
            for line in lines {
                writeln!(tmp, "{}", line).map_err(LibrisError::Io)?;
            }
            tmp.sync_all().map_err(LibrisError::Io)?;
        }
        fs::rename(&tmp_path, &path).map_err(LibrisError::Io)?;
        log::debug!("wrote {} line(s) to {}", lines.len(), path.display());
        Ok(())
    }
}
