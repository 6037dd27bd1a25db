// Chunking properties: determinism, coverage and bounded overlap
//
// Every property is checked on ASCII, CJK, emoji and mixed text so a
// boundary can never split a multi-byte character.

use docrag::core::ingest::Chunker;
use docrag::core::types::{Chunk, TextBlock};

fn samples() -> Vec<String> {
    vec![
        "The sky is blue. ".repeat(40),
        "中文注释和测试字符串。".repeat(30),
        "🚀🦀🎉 emoji ✅❌⚠️ ".repeat(25),
        "fn main() { // Привет мир 🌍 日本語 }\n".repeat(15),
        "x".to_string(),
    ]
}

/// Rebuild the text by dropping each chunk's shared prefix
fn reconstruct(chunks: &[Chunk], overlap: usize) -> String {
    let mut text = String::new();
    for (i, chunk) in chunks.iter().enumerate() {
        let skip = if i == 0 { 0 } else { overlap };
        text.extend(chunk.text.chars().skip(skip));
    }
    text
}

#[test]
fn test_chunking_is_deterministic() {
    let chunker = Chunker::new(50, 10).unwrap();

    for text in samples() {
        let block = TextBlock::new("doc.txt", text);
        assert_eq!(chunker.split(&block), chunker.split(&block));
    }
}

#[test]
fn test_chunks_cover_the_whole_text() {
    for (size, overlap) in [(50, 10), (7, 0), (13, 12), (200, 100)] {
        let chunker = Chunker::new(size, overlap).unwrap();

        for text in samples() {
            let chunks = chunker.split(&TextBlock::new("doc.txt", text.as_str()));
            assert_eq!(
                reconstruct(&chunks, overlap),
                text,
                "size {size}, overlap {overlap}"
            );
        }
    }
}

#[test]
fn test_consecutive_chunks_share_exactly_overlap() {
    let chunker = Chunker::new(40, 8).unwrap();

    for text in samples() {
        let chunks = chunker.split(&TextBlock::new("doc.txt", text));
        for pair in chunks.windows(2) {
            assert_eq!(pair[0].end_offset() - pair[1].start_offset, 8);
            assert_eq!(pair[0].length, 40);
        }
    }
}

#[test]
fn test_chunk_lengths_never_exceed_size() {
    let chunker = Chunker::new(33, 5).unwrap();

    for text in samples() {
        for chunk in chunker.split(&TextBlock::new("doc.txt", text)) {
            assert!(chunk.length <= 33);
            assert!(chunk.length > 0);
            assert_eq!(chunk.text.chars().count(), chunk.length);
        }
    }
}

#[test]
fn test_offsets_index_into_original_characters() {
    let text = "Hello 👋 World 🌍 Rust 🦀 and 中文 more text";
    let chars: Vec<char> = text.chars().collect();
    let chunker = Chunker::new(9, 3).unwrap();

    for chunk in chunker.split(&TextBlock::new("doc.txt", text)) {
        let expected: String = chars[chunk.start_offset..chunk.end_offset()].iter().collect();
        assert_eq!(chunk.text, expected);
    }
}

#[test]
fn test_default_chunker_on_long_document() {
    // 17,000 chars with the 7500/100 defaults: starts at 0, 7400, 14800
    let text = "The sky is blue. ".repeat(1000);
    let chunks = Chunker::default().split(&TextBlock::new("sky.txt", text));

    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks[1].start_offset, 7400);
    assert_eq!(chunks[2].start_offset, 14800);
    assert_eq!(chunks[2].end_offset(), 17000);
}

#[test]
fn test_zero_overlap_partitions_text() {
    let chunker = Chunker::new(10, 0).unwrap();
    let chunks = chunker.split(&TextBlock::new("doc.txt", "0123456789abcdefghij"));

    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].text, "0123456789");
    assert_eq!(chunks[1].text, "abcdefghij");
}
