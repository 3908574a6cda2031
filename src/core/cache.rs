use crate::core::{BoundaryFilter, CollectionQuery};
use std::collections::HashMap;

/// 會談期間的記憶快取：以原始輸入 tuple 當 key
///
/// Append-only, no eviction: the input domain is tiny (≤38 provinces × ~13
/// years × 101 cloud values), so unbounded growth is fine.
#[derive(Debug, Default)]
pub struct SessionCache {
    boundaries: HashMap<String, BoundaryFilter>,
    queries: HashMap<(String, i32, u8), CollectionQuery>,
    hits: u64,
    misses: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

impl SessionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn boundary_for(
        &mut self,
        province: &str,
        build: impl FnOnce() -> BoundaryFilter,
    ) -> BoundaryFilter {
        if let Some(boundary) = self.boundaries.get(province) {
            self.hits += 1;
            return boundary.clone();
        }

        self.misses += 1;
        let boundary = build();
        self.boundaries
            .insert(province.to_string(), boundary.clone());
        boundary
    }

    pub fn query_for(
        &mut self,
        province: &str,
        year: i32,
        max_cloud_cover: u8,
        build: impl FnOnce() -> CollectionQuery,
    ) -> CollectionQuery {
        let key = (province.to_string(), year, max_cloud_cover);
        if let Some(query) = self.queries.get(&key) {
            self.hits += 1;
            return query.clone();
        }

        self.misses += 1;
        let query = build();
        self.queries.insert(key, query.clone());
        query
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.boundaries.len() + self.queries.len(),
        }
    }
}
