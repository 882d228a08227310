use std::{io::Read, path::Path};

use crate::catalog::CatalogEntry;

/// Separator for multi-value columns.
const LIST_SEP: char = '|';

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Validation(String),
}

/// Load catalog entries from a CSV file.
///
/// Each row is `name,alt_names,synonyms` where the last two columns are
/// optional and hold `|` separated lists. Lines starting with `#` are skipped.
pub fn load_csv(path: &Path) -> Result<Vec<CatalogEntry>, LoadError> {
    log::info!("loading catalog from {} ...", path.display());

    let file = std::fs::File::open(path)?;
    let entries = read_csv(file)?;

    log::info!("loaded {} entries from {}", entries.len(), path.display());
    Ok(entries)
}

/// Read catalog entries from any CSV source.
pub fn read_csv<R: Read>(r: R) -> Result<Vec<CatalogEntry>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_reader(r);

    let mut entries = Vec::new();
    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let get = |i: usize| record.get(i).unwrap_or("");

        let name = get(0).to_string();
        if name.is_empty() {
            return Err(LoadError::Validation(format!(
                "line {}: name (column 0) is empty",
                line
            )));
        }

        entries.push(CatalogEntry {
            name,
            alt_names: split_list(get(1)),
            synonyms: split_list(get(2)),
        });
    }

    Ok(entries)
}

/// Split a `|` separated cell into trimmed, non-empty values.
fn split_list(s: &str) -> Vec<String> {
    s.split(LIST_SEP)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_csv() {
        let data = "\
# name,alt_names,synonyms
Мята,mint,мятный лист|перечная мята
 Шалфей , sage
Крапива,,жгучка
";
        let entries = read_csv(data.as_bytes()).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].name, "Мята");
        assert_eq!(entries[0].alt_names, ["mint"]);
        assert_eq!(entries[0].synonyms, ["мятный лист", "перечная мята"]);
        assert_eq!(entries[1].name, "Шалфей");
        assert_eq!(entries[1].alt_names, ["sage"]);
        assert!(entries[1].synonyms.is_empty());
        assert!(entries[2].alt_names.is_empty());
        assert_eq!(entries[2].synonyms, ["жгучка"]);
    }

    #[test]
    fn test_empty_name() {
        let data = "Мята,mint\n,sage\n";
        match read_csv(data.as_bytes()) {
            Err(LoadError::Validation(msg)) => assert_eq!(msg, "line 2: name (column 0) is empty"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_missing_file() {
        let err = load_csv(Path::new("/nonexistent/catalog.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }
}
