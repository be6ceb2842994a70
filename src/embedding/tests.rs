use super::*;

#[tokio::test]
async fn test_stub_embedding_is_deterministic() {
    let embedder = EssayEmbedder::stub_with_dim(16);

    let a = embedder.embed("some essay text").await.unwrap();
    let b = embedder.embed("some essay text").await.unwrap();
    let c = embedder.embed("different text").await.unwrap();

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(a.len(), 16);
}

#[tokio::test]
async fn test_stub_embedding_is_normalized() {
    let embedder = EssayEmbedder::stub_with_dim(64);

    let embedding = embedder.embed("normalize me").await.unwrap();
    let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();

    assert!((norm - 1.0).abs() < 1e-5, "norm was {norm}");
}

#[test]
fn test_backend_selection_flags() {
    let stub = EssayEmbedder::stub();
    assert!(stub.is_stub());
    assert_eq!(stub.embedding_dim(), DEFAULT_EMBEDDING_DIM);

    let remote = EssayEmbedder::remote(
        "https://api.mistral.ai/v1/embeddings",
        "mistral-embed",
        "key",
    );
    assert!(!remote.is_stub());
    assert_eq!(remote.embedding_dim(), DEFAULT_EMBEDDING_DIM);
}
