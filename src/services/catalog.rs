use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::RecommenderError;
use crate::models::{CatalogRecord, MediaType};

const REQUIRED_COLUMNS: [&str; 3] = ["title", "genres", "description"];

/// Cell values treated as missing, matching the usual CSV/dataframe NA markers
const MISSING_MARKERS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Movies followed by shows; a record's position is its row id in the index
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<CatalogRecord>,
}

impl Catalog {
    pub fn new(records: Vec<CatalogRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CatalogRecord> {
        self.records.get(index)
    }

    pub fn records(&self) -> &[CatalogRecord] {
        &self.records
    }

    pub fn count(&self, media_type: MediaType) -> usize {
        self.records.iter().filter(|r| r.media_type == media_type).count()
    }

    /// Composite text of every record, in row order
    pub fn contents(&self) -> Vec<String> {
        self.records.iter().map(derive_content).collect()
    }
}

/// `title genres description`, with missing fields already empty
pub fn derive_content(record: &CatalogRecord) -> String {
    record.content()
}

/// Loads and merges the movie and show tables from CSV readers.
pub fn load<M: Read, S: Read>(movies: M, shows: S) -> Result<Catalog, RecommenderError> {
    let mut records = read_table("movies", movies, MediaType::Movie)?;
    records.extend(read_table("shows", shows, MediaType::TvShow)?);
    Ok(Catalog::new(records))
}

/// Loads and merges the movie and show tables from CSV files.
pub fn load_from_paths(
    movies_path: impl AsRef<Path>,
    shows_path: impl AsRef<Path>,
) -> Result<Catalog, RecommenderError> {
    let movies_path = movies_path.as_ref();
    let shows_path = shows_path.as_ref();
    let movies = open(movies_path)?;
    let shows = open(shows_path)?;

    let mut records = read_table(&movies_path.display().to_string(), movies, MediaType::Movie)?;
    records.extend(read_table(&shows_path.display().to_string(), shows, MediaType::TvShow)?);
    Ok(Catalog::new(records))
}

fn open(path: &Path) -> Result<File, RecommenderError> {
    File::open(path).map_err(|e| RecommenderError::data_load(path.display().to_string(), e))
}

fn read_table<R: Read>(
    source_name: &str,
    reader: R,
    media_type: MediaType,
) -> Result<Vec<CatalogRecord>, RecommenderError> {
    // Short rows are padded with empty cells rather than rejected
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| RecommenderError::data_load(source_name, e))?
        .clone();

    let mut positions = [0usize; 3];
    for (slot, column) in positions.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h.trim() == column)
            .ok_or_else(|| {
                RecommenderError::data_load(source_name, format!("missing column `{}`", column))
            })?;
    }
    let [title, genres, description] = positions;

    let mut records = Vec::new();
    for row in csv_reader.records() {
        let row = row.map_err(|e| RecommenderError::data_load(source_name, e))?;
        let cell = |i: usize| normalize_cell(row.get(i).unwrap_or_default());
        records.push(CatalogRecord::new(cell(title), cell(genres), cell(description), media_type));
    }

    tracing::debug!(source = source_name, rows = records.len(), "Read catalog table");

    Ok(records)
}

/// Missing-value markers become empty strings; everything else is kept verbatim.
fn normalize_cell(value: &str) -> String {
    if MISSING_MARKERS.contains(&value) {
        String::new()
    } else {
        value.to_string()
    }
}
