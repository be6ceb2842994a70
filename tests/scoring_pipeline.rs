//! Full-pipeline tests over the mock stack: stub embedder, in-memory
//! index, canned completions.

use std::sync::Arc;
use std::time::Duration;

use bandscore::completion::CompletionClient;
use bandscore::embedding::EssayEmbedder;
use bandscore::ingest::{DEFAULT_SNAPSHOT_FILENAME, DatasetIngestor, IngestConfig};
use bandscore::metrics::EvaluationMetrics;
use bandscore::retrieval::MockEssayIndex;
use bandscore::scoring::{EssayRequest, EssayScorer};
use tempfile::TempDir;

const COLLECTION: &str = "pipeline_test_essays";

const DATASET: &str = "\
taskType,question,essay,examinerComment,trScore,ccScore,lrScore,graScore,overallScore
2,Some people think students should learn online. Discuss.,Online learning   has grown quickly .,Well organized,6,6,6,6,6.5
1,Describe the chart below.,A chart essay.,n/a,5,5,5,5,5
2,Do you agree that cities need fewer cars?,Cars dominate   modern cities .,Strong position,7,7,6,7,7
";

async fn ingest_dataset(
    index: Arc<MockEssayIndex>,
    embedder: Arc<EssayEmbedder>,
    dir: &TempDir,
) -> bandscore::ingest::IngestSummary {
    let config = IngestConfig {
        collection: COLLECTION.to_string(),
        batch_size: 2,
        batch_delay: Duration::from_millis(0),
        snapshot_path: dir.path().join(DEFAULT_SNAPSHOT_FILENAME),
    };

    DatasetIngestor::new(index, embedder, config)
        .run(DATASET.as_bytes())
        .await
        .expect("ingestion should succeed")
}

#[tokio::test]
async fn test_ingest_then_score_end_to_end() {
    let dir = TempDir::new().unwrap();
    let embedder = Arc::new(EssayEmbedder::stub_with_dim(16));
    let index = Arc::new(MockEssayIndex::new());

    let summary = ingest_dataset(Arc::clone(&index), Arc::clone(&embedder), &dir).await;
    assert_eq!(summary.accepted, 2);
    assert_eq!(summary.skipped, 1);
    assert_eq!(index.point_count(COLLECTION), Some(2));

    let metrics = Arc::new(EvaluationMetrics::new());
    let scorer = EssayScorer::new(
        index,
        embedder,
        CompletionClient::mock(),
        Arc::clone(&metrics),
        COLLECTION,
    )
    // Stub embeddings carry no real similarity signal; retrieve everything.
    .with_retrieval_limits(5, -1.0);

    let request = EssayRequest {
        question: "Do you agree that cities need fewer cars?".to_string(),
        essay: "Many cities  struggle with traffic .".to_string(),
    };

    let evaluation = scorer.score_essay(&request).await.unwrap();

    assert_eq!(evaluation.overall_band, 6.0);
    assert_eq!(evaluation.suggestions.len(), 4);
    assert!(!evaluation.examiner_feedback.is_empty());

    // All four criteria land in metrics under the reply's overall band.
    assert_eq!(metrics.band_distribution().get("6"), Some(&4));
    assert_eq!(metrics.average_scores_by_band().len(), 4);
}

#[tokio::test]
async fn test_snapshot_written_during_ingestion() {
    let dir = TempDir::new().unwrap();
    let embedder = Arc::new(EssayEmbedder::stub_with_dim(16));
    let index = Arc::new(MockEssayIndex::new());

    ingest_dataset(index, embedder, &dir).await;

    let snapshot_path = dir.path().join(DEFAULT_SNAPSHOT_FILENAME);
    assert!(snapshot_path.exists());

    let raw = std::fs::read_to_string(&snapshot_path).unwrap();
    assert!(raw.contains("IELTS Writing Task 2 Essay (Band 6.5)"));
    assert!(raw.contains("IELTS Writing Task 2 Essay (Band 7)"));
}

#[tokio::test]
async fn test_scoring_is_reentrant_across_requests() {
    let dir = TempDir::new().unwrap();
    let embedder = Arc::new(EssayEmbedder::stub_with_dim(16));
    let index = Arc::new(MockEssayIndex::new());

    ingest_dataset(Arc::clone(&index), Arc::clone(&embedder), &dir).await;

    let metrics = Arc::new(EvaluationMetrics::new());
    let scorer = Arc::new(EssayScorer::new(
        index,
        embedder,
        CompletionClient::mock(),
        Arc::clone(&metrics),
        COLLECTION,
    ));

    let mut handles = Vec::new();
    for i in 0..4 {
        let scorer = Arc::clone(&scorer);
        handles.push(tokio::spawn(async move {
            let request = EssayRequest {
                question: format!("Question number {i}?"),
                essay: format!("Essay body number {i}."),
            };
            scorer.score_essay(&request).await
        }));
    }

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    // 4 requests x 4 criteria, all under the mock reply's band.
    assert_eq!(metrics.band_distribution().get("6"), Some(&16));
}
