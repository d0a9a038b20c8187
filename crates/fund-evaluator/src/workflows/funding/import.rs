use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::domain::EvaluationRequest;

#[derive(Debug)]
pub enum BatchImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for BatchImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchImportError::Io(err) => write!(f, "failed to read batch file: {}", err),
            BatchImportError::Csv(err) => write!(f, "invalid batch CSV header: {}", err),
        }
    }
}

impl std::error::Error for BatchImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BatchImportError::Io(err) => Some(err),
            BatchImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for BatchImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for BatchImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Rows of a batch file: accepted requests and rows that could not be read or validated.
#[derive(Debug, Default)]
pub struct BatchImport {
    pub requests: Vec<BatchEntry>,
    pub rejected: Vec<RejectedRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchEntry {
    pub line: u64,
    pub request: EvaluationRequest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRow {
    pub line: u64,
    pub reason: String,
}

/// Reads a CSV export whose headers use the request's camelCase field names.
pub struct BatchImporter;

impl BatchImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<BatchImport, BatchImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<BatchImport, BatchImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);
        // fail fast on an unreadable header; row errors are collected instead
        let headers = csv_reader.headers()?.clone();

        let mut import = BatchImport::default();
        let mut last_line = 1;
        for record in csv_reader.records() {
            // physical line where the record starts; quoted newlines and blank lines shift it
            let (line, row) = match record {
                Ok(record) => {
                    let line = record.position().map_or(last_line + 1, |pos| pos.line());
                    (line, record.deserialize::<BatchRow>(Some(&headers)))
                }
                Err(err) => {
                    let line = err.position().map_or(last_line + 1, |pos| pos.line());
                    (line, Err(err))
                }
            };
            last_line = line;

            let request = match row {
                Ok(row) => EvaluationRequest::from(row),
                Err(err) => {
                    import.rejected.push(RejectedRow {
                        line,
                        reason: err.to_string(),
                    });
                    continue;
                }
            };

            match request.validate() {
                Ok(()) => import.requests.push(BatchEntry { line, request }),
                Err(err) => import.rejected.push(RejectedRow {
                    line,
                    reason: err.to_string(),
                }),
            }
        }

        Ok(import)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BatchRow {
    #[serde(default)]
    company_name: String,
    #[serde(default)]
    team_size: String,
    #[serde(default)]
    technical_team: String,
    #[serde(default)]
    product_stage: String,
    #[serde(default)]
    ip_status: String,
    #[serde(default)]
    market_size: String,
    #[serde(default)]
    current_revenue: String,
    #[serde(default)]
    monthly_users: String,
    #[serde(default)]
    cac: String,
    #[serde(default)]
    ltv: String,
    #[serde(default)]
    funding_request: String,
    #[serde(default)]
    traction: String,
}

impl From<BatchRow> for EvaluationRequest {
    fn from(row: BatchRow) -> Self {
        Self {
            company_name: row.company_name,
            team_size: row.team_size,
            technical_team: row.technical_team,
            product_stage: row.product_stage,
            ip_status: row.ip_status,
            market_size: row.market_size,
            current_revenue: row.current_revenue,
            monthly_users: row.monthly_users,
            cac: row.cac,
            ltv: row.ltv,
            funding_request: row.funding_request,
            traction: row.traction,
        }
    }
}
