//! One-shot dataset ingestion.
//!
//! Reads the labeled Task 2 CSV, validates each row, formats accepted rows
//! into reference documents, embeds them, and upserts the index in
//! fixed-size batches. The accumulated document set is persisted to a
//! local JSON snapshot after every batch; an inter-batch delay keeps the
//! embedding provider's rate limit happy.

pub mod error;


pub use error::IngestError;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::embedding::EssayEmbedder;
use crate::preprocess;
use crate::retrieval::{EssayDocument, EssayIndex, EssayPoint, WriteConsistency, essay_point_id};

/// Snapshot file written next to the index after each batch.
pub const DEFAULT_SNAPSHOT_FILENAME: &str = "essays_snapshot.json";

/// Rows upserted per batch unless configured otherwise.
pub const DEFAULT_BATCH_SIZE: usize = 2;

/// Pause between batches unless configured otherwise.
pub const DEFAULT_BATCH_DELAY_MS: u64 = 3000;

/// Ingestion settings.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    pub collection: String,
    pub batch_size: usize,
    pub batch_delay: Duration,
    pub snapshot_path: std::path::PathBuf,
}

/// Counters reported after a full pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestSummary {
    pub total_rows: u64,
    pub accepted: u64,
    pub skipped: u64,
}

/// What gets persisted after each batch.
#[derive(Debug, Serialize, Deserialize)]
pub struct IngestSnapshot {
    pub saved_at: DateTime<Utc>,
    pub documents: Vec<EssayDocument>,
}

/// Loads a labeled essay dataset into the index.
pub struct DatasetIngestor<R: EssayIndex> {
    index: Arc<R>,
    embedder: Arc<EssayEmbedder>,
    config: IngestConfig,
}

impl<R: EssayIndex> DatasetIngestor<R> {
    pub fn new(index: Arc<R>, embedder: Arc<EssayEmbedder>, config: IngestConfig) -> Self {
        Self {
            index,
            embedder,
            config,
        }
    }

    /// Ingests the CSV file at `path`.
    pub async fn run_from_path(&self, path: &Path) -> Result<IngestSummary, IngestError> {
        let file = std::fs::File::open(path)?;
        self.run(file).await
    }

    /// Ingests CSV data from any reader. Per-row problems skip the row;
    /// index, embedding, and snapshot failures abort the run.
    pub async fn run(&self, input: impl std::io::Read) -> Result<IngestSummary, IngestError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(input);

        let mut documents = Vec::new();
        let mut total_rows = 0u64;
        let mut skipped = 0u64;

        for (offset, record) in reader.records().enumerate() {
            // Row 1 is the header; data starts on line 2.
            let source_line = offset as u64 + 2;
            total_rows += 1;

            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    warn!(line = source_line, error = %e, "skipping unreadable CSV row");
                    skipped += 1;
                    continue;
                }
            };

            match parse_row(&record, source_line) {
                Some(document) => documents.push(document),
                None => skipped += 1,
            }
        }

        if documents.is_empty() {
            return Err(IngestError::NoValidRows);
        }

        let accepted = documents.len() as u64;
        info!(total_rows, accepted, skipped, "dataset rows validated");

        self.index
            .ensure_collection(&self.config.collection, self.embedder.embedding_dim() as u64)
            .await?;

        let total = documents.len();
        let mut ingested: Vec<EssayDocument> = Vec::with_capacity(total);

        for (batch_index, batch) in documents.chunks(self.config.batch_size).enumerate() {
            let mut points = Vec::with_capacity(batch.len());
            for document in batch {
                let vector = self.embedder.embed(&document.content).await?;
                points.push(EssayPoint {
                    id: essay_point_id(&document.question, document.source_line),
                    vector,
                    document: document.clone(),
                });
            }

            self.index
                .upsert(&self.config.collection, points, WriteConsistency::Strong)
                .await?;

            ingested.extend_from_slice(batch);
            self.save_snapshot(&ingested)?;

            info!(
                batch = batch_index + 1,
                done = ingested.len(),
                total,
                "ingested batch"
            );

            if ingested.len() < total {
                tokio::time::sleep(self.config.batch_delay).await;
            }
        }

        Ok(IngestSummary {
            total_rows,
            accepted,
            skipped,
        })
    }

    fn save_snapshot(&self, documents: &[EssayDocument]) -> Result<(), IngestError> {
        let path = &self.config.snapshot_path;

        let snapshot = IngestSnapshot {
            saved_at: Utc::now(),
            documents: documents.to_vec(),
        };

        let wrap = |message: String| IngestError::SnapshotFailed {
            path: path.clone(),
            message,
        };

        let json = serde_json::to_vec_pretty(&snapshot).map_err(|e| wrap(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| wrap(e.to_string()))?;
        }
        std::fs::write(path, json).map_err(|e| wrap(e.to_string()))?;

        debug!(path = %path.display(), documents = documents.len(), "saved ingest snapshot");
        Ok(())
    }
}

/// Validates one CSV row; `None` (with a logged reason) skips it.
///
/// Expected columns: `[taskType, question, essay, examinerComment, trScore,
/// ccScore, lrScore, graScore, overallScore, ...]`.
fn parse_row(record: &csv::StringRecord, source_line: u64) -> Option<EssayDocument> {
    if record.len() < 9 {
        warn!(
            line = source_line,
            columns = record.len(),
            "skipping row with too few columns"
        );
        return None;
    }

    let task_type = record.get(0).unwrap_or_default().trim();
    if !task_type.eq_ignore_ascii_case("2") {
        warn!(line = source_line, task_type, "skipping non-Task-2 row");
        return None;
    }

    let question = record.get(1).unwrap_or_default().trim();
    let raw_essay = record.get(2).unwrap_or_default().trim();
    let overall_score = record.get(8).unwrap_or_default().trim();

    if question.is_empty() || raw_essay.is_empty() || overall_score.is_empty() {
        warn!(line = source_line, "skipping row with missing required fields");
        return None;
    }

    let essay = preprocess::clean_essay(raw_essay);
    let topic = preprocess::extract_main_topic(question);
    let word_count = preprocess::count_words(&essay);

    let content = format_document(
        question,
        &essay,
        record.get(3).unwrap_or_default().trim(),
        record.get(4).unwrap_or_default().trim(),
        record.get(5).unwrap_or_default().trim(),
        record.get(6).unwrap_or_default().trim(),
        record.get(7).unwrap_or_default().trim(),
        overall_score,
    );

    Some(EssayDocument {
        content,
        band: overall_score.to_string(),
        question: question.to_string(),
        topic,
        word_count,
        source_line,
    })
}

/// Renders the fixed document template stored in the index.
#[allow(clippy::too_many_arguments)]
fn format_document(
    question: &str,
    essay: &str,
    examiner_comment: &str,
    tr_score: &str,
    cc_score: &str,
    lr_score: &str,
    gra_score: &str,
    overall_score: &str,
) -> String {
    format!(
        "IELTS Writing Task 2 Essay (Band {overall_score})\n\n\
         Question:\n{question}\n\n\
         Essay:\n{essay}\n\n\
         Examiner Comments:\n{examiner_comment}\n\n\
         Scores:\n\
         - Task Response: {tr_score}\n\
         - Coherence & Cohesion: {cc_score}\n\
         - Lexical Resource: {lr_score}\n\
         - Grammatical Range & Accuracy: {gra_score}\n\
         - Overall: {overall_score}"
    )
}
