use serde::{Deserialize, Serialize};

/// BM25 relevance parameters.
///
/// `d` is the BM25+ lower-bound bonus; at 0 the formula degenerates to
/// plain BM25.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BM25Params {
    pub k1: f64, // term frequency saturation
    pub b: f64,  // field length normalization strength
    pub d: f64,  // BM25+ bonus
}

impl Default for BM25Params {
    fn default() -> Self {
        BM25Params {
            k1: 1.2,
            b: 0.75,
            d: 0.5,
        }
    }
}

/// Score one (term, document, property) triple.
///
/// `tf` is the pre-normalized term frequency (count / field token count),
/// `df` the number of documents containing the term on this property,
/// `docs_count` the corpus size, and `field_length`/`avg_field_length`
/// the token counts driving length normalization.
pub fn bm25(
    tf: f64,
    df: u32,
    docs_count: usize,
    field_length: usize,
    avg_field_length: f64,
    params: &BM25Params,
) -> f64 {
    let df = df as f64;
    let idf = (1.0 + (docs_count as f64 - df + 0.5) / (df + 0.5)).ln();

    let normalized_length = if avg_field_length > 0.0 {
        field_length as f64 / avg_field_length
    } else {
        0.0
    };

    (idf * (params.d + tf * (params.k1 + 1.0)))
        / (tf + params.k1 * (1.0 - params.b + params.b * normalized_length))
}
