use crate::error;
use crate::lang::{Error, Line, MAX_LINE_NUMBER};
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// ## Program store
///
/// Numbered lines in ascending order.

#[derive(Debug, Clone, Default)]
pub struct Listing {
    source: BTreeMap<u32, Rc<Line>>,
}

impl Listing {
    pub fn clear(&mut self) {
        self.source.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    pub fn len(&self) -> usize {
        self.source.len()
    }

    /// Store a numbered line. An empty line deletes its number.
    pub fn insert(&mut self, line: Line) -> Option<Rc<Line>> {
        let number = match line.number() {
            Some(number) => number,
            None => return None,
        };
        if line.is_empty() {
            self.source.remove(&number)
        } else {
            self.source.insert(number, Rc::new(line))
        }
    }

    pub fn remove(&mut self, number: u32) -> Option<Rc<Line>> {
        self.source.remove(&number)
    }

    pub fn get(&self, number: u32) -> Option<Rc<Line>> {
        self.source.get(&number).cloned()
    }

    pub fn line_order(&self) -> Vec<u32> {
        self.source.keys().cloned().collect()
    }

    pub fn lines(&self) -> impl Iterator<Item = &Rc<Line>> {
        self.source.values()
    }

    pub fn range(&self, range: RangeInclusive<u32>) -> impl Iterator<Item = &Rc<Line>> {
        self.source.range(range).map(|(_, line)| line)
    }

    /// Number the lines `start`, `start + step`, ... and rewrite the
    /// line references they contain.
    pub fn renum(&mut self, start: u32, step: u32) -> Result<()> {
        if start < 1 || step < 1 {
            return Err(error!(NumberNotInAllowedRange));
        }
        let mut changes: HashMap<u32, u32> = HashMap::default();
        let mut new_num = start as u64;
        for &old in self.source.keys() {
            if new_num > MAX_LINE_NUMBER as u64 {
                return Err(error!(LineNumberOutOfRange));
            }
            changes.insert(old, new_num as u32);
            new_num += step as u64;
        }
        let mut source: BTreeMap<u32, Rc<Line>> = BTreeMap::default();
        for (old, line) in self.source.iter() {
            let number = changes[old];
            source.insert(number, Rc::new(line.renum(number, &changes)));
        }
        self.source = source;
        Ok(())
    }

    /// Used for loading a new Listing from a file.
    pub fn load_str(&mut self, s: &str) -> Result<()> {
        if s.trim().is_empty() {
            return Ok(());
        }
        let line = Line::new(s)?;
        if line.is_direct() {
            return Err(error!(LineNumberExpected, ..0));
        }
        self.insert(line);
        Ok(())
    }

    pub fn save(&self, filename: &str) -> Result<PathBuf> {
        let path = file_path(filename)?;
        if path.is_dir() {
            return Err(error!(FilenameIsADirectory));
        }
        let mut file = match File::create(&path) {
            Ok(file) => file,
            Err(_) => return Err(error!(FileOperationFailure)),
        };
        for line in self.lines() {
            if writeln!(file, "{}", line).is_err() {
                return Err(error!(FileOperationFailure));
            }
        }
        Ok(path)
    }

    pub fn load(filename: &str) -> Result<Listing> {
        let path = file_path(filename)?;
        if path.is_dir() {
            return Err(error!(FilenameIsADirectory));
        }
        let reader = match File::open(&path) {
            Ok(file) => BufReader::new(file),
            Err(_) => return Err(error!(UnableToOpenNamedFile)),
        };
        let mut listing = Listing::default();
        for line in reader.lines() {
            match line {
                Ok(line) => listing.load_str(&line)?,
                Err(_) => return Err(error!(FileOperationFailure)),
            }
        }
        Ok(listing)
    }
}

/// Program files carry a `.BAS` extension; wildcards are refused.
fn file_path(filename: &str) -> Result<PathBuf> {
    let filename = filename.trim();
    if filename.is_empty() || filename.contains('*') || filename.contains('?') {
        return Err(error!(ExactFilenameIsNeeded));
    }
    let path = Path::new(filename);
    if path.is_dir() {
        return Err(error!(FilenameIsADirectory));
    }
    if filename.to_ascii_uppercase().ends_with(".BAS") {
        Ok(path.to_path_buf())
    } else {
        Ok(PathBuf::from(format!("{}.BAS", filename)))
    }
}
