//! Hashed bag-of-words embeddings
//!
//! Each non-stop-word token is hashed with 32-bit FNV-1a over its lowercase
//! UTF-8 bytes and assigned to bucket `hash % dimensions`. The token adds a
//! position-decayed weight `1 / (1 + 0.1 * index)` to its bucket and half of
//! that to each neighboring bucket. The result is L2-normalized, so any
//! implementation using the same hash produces identical vectors.

use super::text::{is_stop_word, words};

pub const DEFAULT_DIMENSIONS: usize = 384;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// 32-bit FNV-1a
pub fn fnv1a_32(bytes: &[u8]) -> u32 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, &byte| {
        (hash ^ byte as u32).wrapping_mul(FNV_PRIME)
    })
}

/// Embed `text` into a unit vector of `dimensions` floats.
///
/// Returns the zero vector when no token survives stop-word filtering.
pub fn embed(text: &str, dimensions: usize) -> Vec<f32> {
    let mut embedding = vec![0.0f32; dimensions];
    if dimensions == 0 {
        return embedding;
    }

    let lower = text.to_lowercase();
    let tokens = words(&lower).filter(|w| !is_stop_word(w));

    for (index, token) in tokens.enumerate() {
        let bucket = fnv1a_32(token.as_bytes()) as usize % dimensions;
        let weight = 1.0 / (1.0 + index as f32 * 0.1);

        embedding[bucket] += weight;
        if bucket > 0 {
            embedding[bucket - 1] += weight * 0.5;
        }
        if bucket + 1 < dimensions {
            embedding[bucket + 1] += weight * 0.5;
        }
    }

    normalize(&mut embedding);
    embedding
}

fn normalize(embedding: &mut [f32]) {
    let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for val in embedding {
            *val /= norm;
        }
    }
}

/// Cosine similarity, 0 for mismatched lengths or zero vectors
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fnv1a_reference_values() {
        assert_eq!(fnv1a_32(b""), 0x811c9dc5);
        assert_eq!(fnv1a_32(b"a"), 0xe40c292c);
        assert_eq!(fnv1a_32(b"foobar"), 0xbf9cf968);
    }

    fn assert_close(actual: &[f32], expected: &[f32]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-6, "{:?} != {:?}", actual, expected);
        }
    }

    #[test]
    fn test_reference_vector_with_position_decay() {
        let v = embed("alpha beta", DEFAULT_DIMENSIONS);
        let alpha = fnv1a_32(b"alpha") as usize % DEFAULT_DIMENSIONS;
        let beta = fnv1a_32(b"beta") as usize % DEFAULT_DIMENSIONS;
        assert_eq!((alpha, beta), (299, 71));

        // raw weights: alpha 1.0 with 0.5 neighbors, beta 1/1.1 with halves
        let beta_weight = 1.0 / 1.1f32;
        let norm = (1.5f32 + 1.5 * beta_weight * beta_weight).sqrt();

        assert!((v[alpha] - 1.0 / norm).abs() < 1e-6);
        assert!((v[alpha - 1] - 0.5 / norm).abs() < 1e-6);
        assert!((v[alpha + 1] - 0.5 / norm).abs() < 1e-6);
        assert!((v[beta] - beta_weight / norm).abs() < 1e-6);
        assert!((v[beta - 1] - 0.5 * beta_weight / norm).abs() < 1e-6);
        assert!((v[beta + 1] - 0.5 * beta_weight / norm).abs() < 1e-6);
        assert!((v[alpha] - 0.604_152).abs() < 1e-5);
        assert!((v[beta] - 0.549_229).abs() < 1e-5);

        let nonzero = v.iter().filter(|&&x| x != 0.0).count();
        assert_eq!(nonzero, 6);
    }

    #[test]
    fn test_last_bucket_has_no_upper_neighbor() {
        // both tokens land in bucket 2 of 3
        assert_close(&embed("alpha beta", 3), &[0.0, 0.447_213_6, 0.894_427_2]);
    }

    #[test]
    fn test_first_bucket_has_no_lower_neighbor() {
        assert_eq!(fnv1a_32(b"gamma") % 3, 0);
        assert_close(&embed("gamma", 3), &[0.894_427_2, 0.447_213_6, 0.0]);
    }

    #[test]
    fn test_embedding_is_unit_length() {
        let v = embed("Photosynthesis converts light into chemical energy", DEFAULT_DIMENSIONS);
        assert_eq!(v.len(), DEFAULT_DIMENSIONS);
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_stop_words_only_gives_zero_vector() {
        let v = embed("the and of it", DEFAULT_DIMENSIONS);
        assert!(v.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_embedding_is_case_insensitive_and_deterministic() {
        let a = embed("Light Energy", 64);
        let b = embed("light energy", 64);
        assert_eq!(a, b);
    }

    #[test]
    fn test_similar_texts_score_higher() {
        let base = embed("plants convert light into energy", DEFAULT_DIMENSIONS);
        let close = embed("plants convert sunlight into energy", DEFAULT_DIMENSIONS);
        let far = embed("the stock market closed lower on friday", DEFAULT_DIMENSIONS);

        assert!(cosine_similarity(&base, &close) > cosine_similarity(&base, &far));
    }

    #[test]
    fn test_cosine_similarity_edge_cases() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
        assert!((cosine_similarity(&[1.0, 2.0], &[2.0, 4.0]) - 1.0).abs() < 1e-6);
    }
}
