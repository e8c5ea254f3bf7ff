use crate::models::{RecommendationRequest, SeedCategory};

/// Spotify's hard quota of seeds per recommendations request
pub const MAX_SEEDS_PER_REQUEST: usize = 5;

/// Split a seed list into recommendation requests that each respect the
/// 5-seed quota, distributing `total_limit` across them.
///
/// Every full chunk of 5 seeds gets an even share of the target
/// (`round(total_limit / full_chunk_count)`, clamped to what is still
/// unallocated); the trailing partial chunk gets whatever remains. Chunks
/// whose share works out to 0 are skipped so no zero-limit request is ever
/// issued. The chunks exactly partition the input: no seed is dropped or
/// duplicated.
pub fn allocate(
    seeds: &[String],
    category: SeedCategory,
    total_limit: u32,
) -> Vec<RecommendationRequest> {
    if seeds.is_empty() {
        return Vec::new();
    }

    if seeds.len() < MAX_SEEDS_PER_REQUEST {
        return vec![RecommendationRequest {
            category,
            seeds: seeds.to_vec(),
            limit: total_limit,
        }];
    }

    let full_chunks = (seeds.len() / MAX_SEEDS_PER_REQUEST) as u32;
    let per_chunk = (total_limit as f64 / full_chunks as f64).round() as u32;

    let mut remaining = total_limit;
    let mut requests = Vec::new();

    for chunk in seeds.chunks(MAX_SEEDS_PER_REQUEST) {
        if remaining == 0 {
            break;
        }

        let limit = if chunk.len() == MAX_SEEDS_PER_REQUEST {
            per_chunk.min(remaining)
        } else {
            remaining
        };

        if limit == 0 {
            continue;
        }

        remaining -= limit;
        requests.push(RecommendationRequest {
            category,
            seeds: chunk.to_vec(),
            limit,
        });
    }

    requests
}
