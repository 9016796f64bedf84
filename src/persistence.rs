// File: src/persistence.rs
use crate::core::trie::FuzzyTrie;
use crate::error::{GateError, GateResult};
use crate::vocabulary::Vocabulary;
use serde_json::Value;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Reads a vocabulary file: a flat JSON array of strings. Non-string and
/// blank entries are skipped with a warning; the rest are normalized and
/// deduplicated.
pub fn load_vocabulary(path: &Path) -> GateResult<Vocabulary> {
    let file = File::open(path)?;
    let value: Value = serde_json::from_reader(BufReader::new(file))?;
    let vocabulary = vocabulary_from_json(value)?;
    log::info!("loaded {} terms from {}", vocabulary.len(), path.display());
    Ok(vocabulary)
}

pub fn vocabulary_from_json(value: Value) -> GateResult<Vocabulary> {
    let Value::Array(entries) = value else {
        return Err(GateError::Vocabulary(
            "expected a flat JSON array of strings".to_string(),
        ));
    };

    let mut skipped = 0usize;
    let terms: Vec<String> = entries
        .into_iter()
        .filter_map(|entry| match entry {
            Value::String(s) if !s.trim().is_empty() => Some(s),
            other => {
                log::warn!("skipping vocabulary entry {}", other);
                skipped += 1;
                None
            }
        })
        .collect();
    if skipped > 0 {
        log::warn!("skipped {} malformed vocabulary entries", skipped);
    }
    Ok(Vocabulary::from_terms(terms))
}

/// Reads a vocabulary from CSV: the first field of every non-empty row is a
/// term. A quoted first field may contain commas and doubled quotes.
pub fn load_vocabulary_csv(path: &Path) -> GateResult<Vocabulary> {
    let file = File::open(path)?;
    let mut terms = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let term = first_csv_field(&line);
        if term.trim().is_empty() {
            log::warn!("skipping CSV row with empty first field: {:?}", line);
            continue;
        }
        terms.push(term);
    }
    let vocabulary = Vocabulary::from_terms(terms);
    log::info!("loaded {} terms from {}", vocabulary.len(), path.display());
    Ok(vocabulary)
}

fn first_csv_field(line: &str) -> String {
    let Some(rest) = line.strip_prefix('"') else {
        return line.split(',').next().unwrap_or_default().to_string();
    };
    let mut field = String::new();
    let mut chars = rest.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '"' {
            if chars.peek() == Some(&'"') {
                field.push('"');
                chars.next();
            } else {
                break;
            }
        } else {
            field.push(c);
        }
    }
    field
}

/// Writes the vocabulary as a sorted JSON array, atomically.
pub fn save_vocabulary(vocabulary: &Vocabulary, path: &Path) -> GateResult<()> {
    write_atomic(path, |writer| {
        serde_json::to_writer(&mut *writer, &vocabulary.sorted())?;
        Ok(())
    })?;
    log::info!("saved {} terms to {}", vocabulary.len(), path.display());
    Ok(())
}

/// Snapshot of a built trie, so the offline build can skip re-insertion.
pub fn save_trie(trie: &FuzzyTrie, path: &Path) -> GateResult<()> {
    write_atomic(path, |writer| {
        bincode::serialize_into(writer, trie)?;
        Ok(())
    })
}

pub fn load_trie(path: &Path) -> GateResult<FuzzyTrie> {
    let file = File::open(path)?;
    let trie: FuzzyTrie = bincode::deserialize_from(BufReader::new(file))?;
    crate::config::check_distance(trie.max_errors())?;
    trie.validate()?;
    Ok(trie)
}

fn write_atomic<F>(path: &Path, write: F) -> GateResult<()>
where
    F: FnOnce(&mut BufWriter<&NamedTempFile>) -> GateResult<()>,
{
    let parent_dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(&temp_file);
        write(&mut writer)?;
        writer.flush()?;
    }
    temp_file.persist(path).map_err(|e| GateError::Io(e.error))?;
    Ok(())
}
