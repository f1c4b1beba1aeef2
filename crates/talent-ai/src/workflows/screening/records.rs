use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::domain::Candidate;

/// Header spellings accepted for each candidate column, compared without case or spaces.
const NAME_ALIASES: &[&str] = &["name", "имя", "кандидат", "candidate"];
const LANGUAGE_ALIASES: &[&str] = &[
    "language",
    "languages",
    "язык",
    "языкпрограммирования",
    "programminglanguage",
    "skills",
];
const LEVEL_ALIASES: &[&str] = &["level", "уровень", "уровеньопыта", "experiencelevel"];
const YEARS_ALIASES: &[&str] = &[
    "years",
    "опытработы",
    "years_of_experience",
    "стаж",
    "experience",
    "опыт",
];
const FORMAT_ALIASES: &[&str] = &["format", "формат", "форматработы", "work_format", "workformat"];
const SALARY_ALIASES: &[&str] = &["salary", "зарплата", "ожидаемаязарплата", "expectedsalary"];

#[derive(Debug, thiserror::Error)]
pub enum CandidateImportError {
    #[error("failed to open candidate export {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid candidate CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("candidate CSV has no '{0}' column")]
    MissingColumn(&'static str),
}

/// Column positions resolved from the header row.
#[derive(Debug, Default)]
struct ColumnMap {
    name: usize,
    language: Option<usize>,
    level: Option<usize>,
    years: Option<usize>,
    format: Option<usize>,
    salary: Option<usize>,
}

impl ColumnMap {
    fn resolve(headers: &csv::StringRecord) -> Result<Self, CandidateImportError> {
        let find = |aliases: &[&str]| {
            headers.iter().position(|header| {
                let header = normalize_header(header);
                aliases.iter().any(|alias| *alias == header)
            })
        };

        Ok(Self {
            name: find(NAME_ALIASES).ok_or(CandidateImportError::MissingColumn("name"))?,
            language: find(LANGUAGE_ALIASES),
            level: find(LEVEL_ALIASES),
            years: find(YEARS_ALIASES),
            format: find(FORMAT_ALIASES),
            salary: find(SALARY_ALIASES),
        })
    }
}

/// Read candidates from a CSV export at `path`.
pub fn load_candidates(path: &Path) -> Result<Vec<Candidate>, CandidateImportError> {
    let file = File::open(path).map_err(|source| CandidateImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let candidates = read_candidates(file)?;
    info!(path = %path.display(), candidates = candidates.len(), "candidate export loaded");
    Ok(candidates)
}

/// Parse candidate rows. Rows without a name are skipped; unreadable numbers are left empty.
pub fn read_candidates<R: Read>(reader: R) -> Result<Vec<Candidate>, CandidateImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let columns = ColumnMap::resolve(csv_reader.headers()?)?;
    let mut candidates = Vec::new();

    for (row, record) in csv_reader.records().enumerate() {
        let record = record?;
        let name = record.get(columns.name).unwrap_or_default();
        if name.is_empty() || name.eq_ignore_ascii_case("nan") {
            warn!(row = row + 1, "skipping candidate row without a name");
            continue;
        }

        let cell = |index: Option<usize>| index.and_then(|index| record.get(index)).unwrap_or("");
        let id = format!("cand-{:04}", candidates.len() + 1);

        let mut candidate = Candidate::new(id, name)
            .with_skills(split_list(cell(columns.language)))
            .with_work_formats(split_list(cell(columns.format)));
        candidate.level = Some(cell(columns.level))
            .filter(|level| !level.is_empty())
            .map(str::to_string);
        candidate.years_experience = parse_count(cell(columns.years));
        candidate.expected_salary = parse_count(cell(columns.salary));

        candidates.push(candidate);
    }

    Ok(candidates)
}

fn normalize_header(header: &str) -> String {
    header
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

fn split_list(cell: &str) -> Vec<String> {
    cell.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Whole non-negative number; decimal spellings such as `4.0` are truncated.
fn parse_count(cell: &str) -> Option<u32> {
    if let Ok(value) = cell.parse::<u32>() {
        return Some(value);
    }
    cell.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0 && *value <= f64::from(u32::MAX))
        .map(|value| value.trunc() as u32)
}
