use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::{Candidate, JobLabel, JobPayload, ScoreMap};
use crate::services::score_cell::{parse_score_cell, ParsedCell};

/// Column holding the job title in tabular job files
pub const TITLE_COLUMN: &str = "job_title";

/// Passthrough columns that never become skills
const LABEL_COLUMNS: &[&str] = &[TITLE_COLUMN, "company", "recruiter"];

/// Errors that can occur while loading job data
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("Failed to read job file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported job file type: {0}")]
    UnsupportedFormat(String),

    #[error("Job file is missing required column: {0}")]
    MissingColumn(String),

    #[error("Malformed row at line {line}: {reason}")]
    MalformedRow { line: usize, reason: String },

    #[error("Invalid JSON job file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Job file formats the loader understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobFileFormat {
    Csv,
    Json,
}

impl JobFileFormat {
    pub fn from_path(path: &Path) -> Result<Self, LoaderError> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "csv" => Ok(JobFileFormat::Csv),
            "json" => Ok(JobFileFormat::Json),
            other => Err(LoaderError::UnsupportedFormat(if other.is_empty() {
                path.display().to_string()
            } else {
                format!(".{}", other)
            })),
        }
    }
}

/// Loads the job list from the file configured at construction time
///
/// The file is re-read on every call so edits take effect without a restart.
#[derive(Debug, Clone)]
pub struct JobLoader {
    path: PathBuf,
}

impl JobLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<Vec<Candidate>, LoaderError> {
        let format = JobFileFormat::from_path(&self.path)?;

        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| LoaderError::Io {
                path: self.path.display().to_string(),
                source,
            })?;

        let jobs = parse_jobs(format, &contents)?;

        tracing::debug!("Loaded {} jobs from {}", jobs.len(), self.path.display());

        Ok(jobs)
    }
}

pub fn parse_jobs(format: JobFileFormat, contents: &str) -> Result<Vec<Candidate>, LoaderError> {
    match format {
        JobFileFormat::Csv => parse_csv_jobs(contents),
        JobFileFormat::Json => parse_json_jobs(contents),
    }
}

/// Parse a JSON array of job payloads
pub fn parse_json_jobs(contents: &str) -> Result<Vec<Candidate>, LoaderError> {
    let payloads: Vec<JobPayload> = serde_json::from_str(contents)?;
    Ok(payloads.into_iter().map(Candidate::from).collect())
}

/// Parse a CSV job table: one row per job, one column per skill
///
/// The header must contain `job_title`. `company` and `recruiter` columns are
/// carried as labels. Short rows are padded with empty cells; rows with more
/// cells than the header are rejected.
pub fn parse_csv_jobs(contents: &str) -> Result<Vec<Candidate>, LoaderError> {
    let mut records = read_records(contents)?.into_iter();

    let header = records
        .next()
        .ok_or_else(|| LoaderError::MissingColumn(TITLE_COLUMN.to_string()))?;

    let column_index = |name: &str| header.fields.iter().position(|column| column == name);
    let title_idx =
        column_index(TITLE_COLUMN).ok_or_else(|| LoaderError::MissingColumn(TITLE_COLUMN.to_string()))?;
    let company_idx = column_index("company");
    let recruiter_idx = column_index("recruiter");

    let skill_columns: Vec<(usize, &str)> = header
        .fields
        .iter()
        .enumerate()
        .filter(|(_, column)| !LABEL_COLUMNS.contains(&column.as_str()))
        .map(|(idx, column)| (idx, column.as_str()))
        .collect();

    let mut jobs = Vec::new();
    for record in records {
        if record.fields.len() > header.fields.len() {
            return Err(LoaderError::MalformedRow {
                line: record.line,
                reason: format!(
                    "expected {} fields, found {}",
                    header.fields.len(),
                    record.fields.len()
                ),
            });
        }

        let cell = |idx: usize| record.fields.get(idx).map(String::as_str).unwrap_or("");
        let label_cell = |idx: Option<usize>| {
            idx.map(|idx| cell(idx).trim())
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        let mut skills = ScoreMap::with_capacity(skill_columns.len());
        for (idx, column) in &skill_columns {
            let parsed = parse_score_cell(cell(*idx));
            if let ParsedCell::Unparseable(raw) = &parsed {
                tracing::warn!(
                    "Unparseable score {:?} for '{}' at line {}, using 0",
                    raw,
                    column,
                    record.line
                );
            }
            skills.insert(column.to_string(), parsed.value());
        }

        let label = JobLabel {
            job_title: cell(title_idx).to_string(),
            company: label_cell(company_idx),
            recruiter: label_cell(recruiter_idx),
        };
        jobs.push(Candidate::new(label, skills));
    }

    Ok(jobs)
}

#[derive(Debug)]
struct CsvRecord {
    /// 1-based line the record starts on
    line: usize,
    fields: Vec<String>,
}

/// Split CSV text into records, honouring quoted fields with embedded commas,
/// newlines, and doubled quotes. Blank lines are skipped.
fn read_records(contents: &str) -> Result<Vec<CsvRecord>, LoaderError> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut record_line = 1;

    let mut chars = contents.trim_start_matches('\u{feff}').chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            // A quote only opens a quoted field as its first character
            '"' if field.is_empty() => in_quotes = true,
            ',' => fields.push(std::mem::take(&mut field)),
            '\r' => {}
            '\n' => {
                fields.push(std::mem::take(&mut field));
                push_record(&mut records, record_line, std::mem::take(&mut fields));
                line += 1;
                record_line = line;
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(LoaderError::MalformedRow {
            line: record_line,
            reason: "unterminated quoted field".to_string(),
        });
    }

    if !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        push_record(&mut records, record_line, fields);
    }

    Ok(records)
}

fn push_record(records: &mut Vec<CsvRecord>, line: usize, fields: Vec<String>) {
    let blank = fields.len() == 1 && fields[0].trim().is_empty();
    if !blank {
        records.push(CsvRecord { line, fields });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_rows_become_candidates() {
        let csv = "job_title,python,sql,excel\n\
                   Data Analyst,12,15,10\n\
                   Backend Engineer,18,12-14,\n";

        let jobs = parse_csv_jobs(csv).unwrap();

        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].label.job_title, "Data Analyst");
        assert_eq!(jobs[0].skills.get("sql"), Some(&15.0));
        assert_eq!(jobs[1].skills.get("sql"), Some(&13.0));
        assert_eq!(jobs[1].skills.get("excel"), Some(&0.0));
        assert!(!jobs[0].skills.contains_key(TITLE_COLUMN));
    }

    #[test]
    fn test_csv_label_columns_are_not_skills() {
        let csv = "company,job_title,recruiter,rust\nAcme,Engineer,,9\n";

        let jobs = parse_csv_jobs(csv).unwrap();

        assert_eq!(jobs[0].label.company.as_deref(), Some("Acme"));
        assert_eq!(jobs[0].label.recruiter, None);
        assert_eq!(jobs[0].skills.len(), 1);
        assert_eq!(jobs[0].skills.get("rust"), Some(&9.0));
    }

    #[test]
    fn test_csv_quoted_fields() {
        let csv = "job_title,\"data, analysis\"\r\n\"Analyst, \"\"Senior\"\"\",\"7\"\r\n";

        let jobs = parse_csv_jobs(csv).unwrap();

        assert_eq!(jobs[0].label.job_title, "Analyst, \"Senior\"");
        assert_eq!(jobs[0].skills.get("data, analysis"), Some(&7.0));
    }

    #[test]
    fn test_csv_inner_quote_is_literal() {
        let csv = "job_title,5\" display,rust\nKiosk Dev,4,8\n";

        let jobs = parse_csv_jobs(csv).unwrap();

        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].skills.get("5\" display"), Some(&4.0));
        assert_eq!(jobs[0].skills.get("rust"), Some(&8.0));
    }

    #[test]
    fn test_csv_short_rows_are_padded() {
        let jobs = parse_csv_jobs("job_title,a,b\nShort,4\n\n").unwrap();

        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].skills.get("b"), Some(&0.0));
    }

    #[test]
    fn test_csv_long_row_is_rejected() {
        let err = parse_csv_jobs("job_title,a\nFirst,1\nSecond,1,2\n").unwrap_err();

        match err {
            LoaderError::MalformedRow { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_csv_without_title_column() {
        assert!(matches!(
            parse_csv_jobs("title,a\nx,1\n"),
            Err(LoaderError::MissingColumn(_))
        ));
        assert!(matches!(parse_csv_jobs(""), Err(LoaderError::MissingColumn(_))));
    }

    #[test]
    fn test_csv_unterminated_quote() {
        assert!(matches!(
            parse_csv_jobs("job_title,a\n\"Broken,1\n"),
            Err(LoaderError::MalformedRow { .. })
        ));
    }

    #[test]
    fn test_json_jobs() {
        let json = r#"[
            {"job_title": "Analyst", "skills": {"sql": 10}},
            {"job_title": "Engineer", "skills": [{"name": "rust", "score": 15, "required": true}]}
        ]"#;

        let jobs = parse_json_jobs(json).unwrap();

        assert_eq!(jobs.len(), 2);
        assert!(jobs[1].is_required("rust"));
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(JobFileFormat::from_path(Path::new("jobs.CSV")).unwrap(), JobFileFormat::Csv);
        assert_eq!(JobFileFormat::from_path(Path::new("data/jobs.json")).unwrap(), JobFileFormat::Json);
        assert!(matches!(
            JobFileFormat::from_path(Path::new("job_data.xlsx")),
            Err(LoaderError::UnsupportedFormat(ext)) if ext == ".xlsx"
        ));
        assert!(matches!(
            JobFileFormat::from_path(Path::new("jobs")),
            Err(LoaderError::UnsupportedFormat(_))
        ));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let loader = JobLoader::new("definitely/not/here.csv");

        assert!(matches!(loader.load().await, Err(LoaderError::Io { .. })));
    }

    #[tokio::test]
    async fn test_load_from_disk() {
        let path = std::env::temp_dir().join(format!("skill_match_loader_{}.csv", std::process::id()));
        tokio::fs::write(&path, "job_title,python\nAnalyst,10-12\n").await.unwrap();

        let jobs = JobLoader::new(&path).load().await.unwrap();
        let _ = tokio::fs::remove_file(&path).await;

        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].skills.get("python"), Some(&11.0));
    }
}
