//! Custom assertion helpers over response chunks.

use ag_protocol::response_models::{ChunkType, ResponseChunk};

/// Chunk types in order.
#[allow(dead_code)]
pub fn chunk_types(chunks: &[ResponseChunk]) -> Vec<ChunkType> {
    chunks.iter().map(|c| c.chunk_type).collect()
}

/// Assert the session framing: `session_info` first, `session_end` last,
/// and exactly one terminal `complete` or `error` chunk just before it.
#[allow(dead_code)]
pub fn assert_framed(chunks: &[ResponseChunk]) {
    assert!(chunks.len() >= 3, "Expected at least 3 chunks, got {:?}", chunks);
    assert_eq!(chunks[0].chunk_type, ChunkType::SessionInfo);
    assert_eq!(chunks[chunks.len() - 1].chunk_type, ChunkType::SessionEnd);

    let terminal = chunks[chunks.len() - 2].chunk_type;
    assert!(
        terminal == ChunkType::Complete || terminal == ChunkType::Error,
        "Expected complete or error before session_end, got {:?}",
        terminal
    );

    let middle = &chunks[1..chunks.len() - 2];
    assert!(
        middle.iter().all(ResponseChunk::is_content),
        "Only content chunks may appear mid-stream: {:?}",
        middle
    );
}

/// Concatenated content of every `content` chunk.
#[allow(dead_code)]
pub fn streamed_text(chunks: &[ResponseChunk]) -> String {
    chunks
        .iter()
        .filter(|c| c.is_content())
        .map(|c| c.content.as_str())
        .collect()
}
