//! Import/export formats and the on-disk document shape.
//!
//! Two wire shapes exist: the structured JSON document (lossless, also the
//! primary/backup file format) and a flat CSV table (a documented-lossy
//! subset: subtasks, progress and the sharing list are omitted and tags are
//! joined with `;`).

use crate::storage::error::{Result, StorageError};
use crate::storage::task::Task;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current version written into the document metadata.
pub const FORMAT_VERSION: &str = "1.0";

/// Delimiter used to join tags inside a single CSV cell.
const TAG_DELIMITER: &str = ";";

const CSV_HEADER: [&str; 11] = [
    "id", "name", "description", "status", "priority", "category", "created_at", "updated_at", "due_date", "completed_at", "tags",
];

/// Supported exchange formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    /// Structured document preserving every field.
    Json,
    /// Flat table for spreadsheets; drops subtasks, progress and sharing.
    Csv,
}

/// Metadata block of the structured document.
#[derive(Debug, Serialize, Deserialize)]
pub struct Metadata {
    pub version: String,
    pub last_updated: DateTime<Utc>,
    pub task_count: usize,
    pub max_id: u64,
}

/// The structured document: metadata plus the full ordered task list.
#[derive(Debug, Serialize, Deserialize)]
pub struct StoreDocument {
    pub metadata: Metadata,
    pub tasks: Vec<Task>,
}

impl StoreDocument {
    pub fn new(tasks: Vec<Task>, max_id: u64) -> Self {
        StoreDocument {
            metadata: Metadata {
                version: FORMAT_VERSION.to_string(),
                last_updated: Utc::now(),
                task_count: tasks.len(),
                max_id,
            },
            tasks,
        }
    }
}

/// Serializes the given records in the requested format.
pub fn encode(tasks: Vec<Task>, max_id: u64, format: ExportFormat) -> Result<Vec<u8>> {
    match format {
        ExportFormat::Json => {
            let document = StoreDocument::new(tasks, max_id);
            serde_json::to_vec_pretty(&document).map_err(|e| StorageError::Format(e.to_string()))
        }
        ExportFormat::Csv => encode_csv(&tasks),
    }
}

/// Parses records from the requested format.
pub fn decode(data: &[u8], format: ExportFormat) -> Result<Vec<Task>> {
    match format {
        ExportFormat::Json => {
            let document: StoreDocument = serde_json::from_slice(data).map_err(|e| StorageError::Format(e.to_string()))?;
            Ok(document.tasks)
        }
        ExportFormat::Csv => decode_csv(data),
    }
}

fn encode_csv(tasks: &[Task]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER).map_err(|e| StorageError::Format(e.to_string()))?;

    for task in tasks {
        writer
            .write_record([
                task.id.to_string(),
                task.name.clone(),
                task.description.clone(),
                task.status.to_string(),
                task.priority.to_string(),
                task.category.clone(),
                task.created_at.to_rfc3339(),
                task.updated_at.to_rfc3339(),
                task.due_date.map(|d| d.to_rfc3339()).unwrap_or_default(),
                task.completed_at.map(|d| d.to_rfc3339()).unwrap_or_default(),
                task.tags.join(TAG_DELIMITER),
            ])
            .map_err(|e| StorageError::Format(e.to_string()))?;
    }

    writer.into_inner().map_err(|e| StorageError::Format(e.to_string()))
}

fn decode_csv(data: &[u8]) -> Result<Vec<Task>> {
    let mut reader = csv::Reader::from_reader(data);
    let mut tasks = Vec::new();

    for record in reader.records() {
        let record = record.map_err(|e| StorageError::Format(e.to_string()))?;
        if record.len() < CSV_HEADER.len() {
            return Err(StorageError::Format(format!("expected {} columns, got {}", CSV_HEADER.len(), record.len())));
        }

        let mut task = Task::new(&record[1]);
        task.id = record[0].parse().map_err(|_| StorageError::Format(format!("invalid task id: {}", &record[0])))?;
        task.description = record[2].to_string();
        task.status = record[3].parse()?;
        task.priority = record[4].parse()?;
        task.category = record[5].to_string();
        task.created_at = parse_timestamp(&record[6])?.ok_or_else(|| StorageError::Format("missing created_at".into()))?;
        task.updated_at = parse_timestamp(&record[7])?.ok_or_else(|| StorageError::Format("missing updated_at".into()))?;
        task.due_date = parse_timestamp(&record[8])?;
        task.completed_at = parse_timestamp(&record[9])?;
        task.tags = if record[10].is_empty() {
            Vec::new()
        } else {
            record[10].split(TAG_DELIMITER).map(str::to_string).collect()
        };
        tasks.push(task);
    }

    Ok(tasks)
}

fn parse_timestamp(value: &str) -> Result<Option<DateTime<Utc>>> {
    if value.is_empty() {
        return Ok(None);
    }
    DateTime::parse_from_rfc3339(value)
        .map(|d| Some(d.with_timezone(&Utc)))
        .map_err(|_| StorageError::Format(format!("malformed timestamp: {}", value)))
}
