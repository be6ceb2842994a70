use qdrant_client::qdrant::ScoredPoint;
use serde::{Deserialize, Serialize};

/// A labeled dataset essay, formatted for indexing.
///
/// `content` is the full document text submitted to the index; the other
/// fields are carried as payload metadata and in the ingest snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EssayDocument {
    pub content: String,
    /// Overall band score as labeled in the dataset, e.g. `"6.5"`.
    pub band: String,
    pub question: String,
    pub topic: String,
    pub word_count: usize,
    /// 1-based line in the source CSV, for traceability.
    pub source_line: u64,
}

/// A vector point ready for upsert.
#[derive(Debug, Clone)]
pub struct EssayPoint {
    pub id: u64,
    pub vector: Vec<f32>,
    pub document: EssayDocument,
}

/// A scored search hit.
#[derive(Debug, Clone)]
pub struct RetrievedEssay {
    pub id: u64,
    pub score: f32,
    pub band: String,
    pub content: String,
}

impl RetrievedEssay {
    /// Decodes a Qdrant scored point; `None` if the payload is unusable.
    pub fn from_scored_point(point: ScoredPoint) -> Option<Self> {
        use qdrant_client::qdrant::point_id::PointIdOptions;

        let id = match point.id.and_then(|pid| pid.point_id_options) {
            Some(PointIdOptions::Num(n)) => n,
            _ => return None,
        };

        let payload = point.payload;

        let content = payload.get("content").and_then(|v| v.as_str())?.to_string();

        let band = payload
            .get("band")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown")
            .to_string();

        Some(RetrievedEssay {
            id,
            score: point.score,
            band,
            content,
        })
    }

    /// Reduces the hit to what the prompt needs.
    pub fn into_excerpt(self) -> ReferenceExcerpt {
        ReferenceExcerpt {
            band: self.band,
            text: self.content,
        }
    }
}

/// A reference essay rendered into the scoring prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceExcerpt {
    pub band: String,
    pub text: String,
}

/// Derives a stable point id from the question text and source line.
pub fn essay_point_id(question: &str, source_line: u64) -> u64 {
    let mut hasher = blake3::Hasher::new();
    hasher.update(question.as_bytes());
    hasher.update(&source_line.to_le_bytes());

    let hash = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash.as_bytes()[..8]);
    u64::from_le_bytes(bytes)
}
