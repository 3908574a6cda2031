use crate::core::{BoundaryFilter, EarthEngine, FieldFilter};

pub const GAUL_DATASET: &str = "FAO/GAUL/2015/level1";
pub const COUNTRY_NAME: &str = "Indonesia";
pub const COUNTRY_FIELD: &str = "ADM0_NAME";
pub const PROVINCE_FIELD: &str = "ADM1_NAME";

/// 離線備援清單：38 個省份，順序保持硬編碼原樣（不排序）
pub const FALLBACK_PROVINCES: [&str; 38] = [
    "Aceh",
    "Bali",
    "Banten",
    "Bengkulu",
    "DI Yogyakarta",
    "DKI Jakarta",
    "Gorontalo",
    "Jambi",
    "Jawa Barat",
    "Jawa Tengah",
    "Jawa Timur",
    "Kalimantan Barat",
    "Kalimantan Selatan",
    "Kalimantan Tengah",
    "Kalimantan Timur",
    "Kalimantan Utara",
    "Kepulauan Bangka Belitung",
    "Kepulauan Riau",
    "Lampung",
    "Maluku",
    "Maluku Utara",
    "Nusa Tenggara Barat",
    "Nusa Tenggara Timur",
    "Papua",
    "Papua Barat",
    "Papua Pegunungan",
    "Papua Tengah",
    "Papua Selatan",
    "Papua Barat Daya",
    "Riau",
    "Sulawesi Barat",
    "Sulawesi Selatan",
    "Sulawesi Tengah",
    "Sulawesi Tenggara",
    "Sulawesi Utara",
    "Sumatera Barat",
    "Sumatera Selatan",
    "Sumatera Utara",
];

/// 把省份名稱變成邊界過濾器。純函數，不檢查存在性。
pub fn resolve_province(province_name: &str) -> BoundaryFilter {
    BoundaryFilter {
        dataset: GAUL_DATASET.to_string(),
        country: COUNTRY_NAME.to_string(),
        province: province_name.to_string(),
    }
}

/// Enumerate Indonesian provinces from the boundary dataset, sorted.
///
/// Falls back to the static list on any engine failure; the fallback keeps
/// its hardcoded order (the live path sorts, the fallback does not).
pub async fn list_provinces<E: EarthEngine>(engine: &E) -> Vec<String> {
    let filters = vec![FieldFilter::eq(COUNTRY_FIELD, COUNTRY_NAME)];

    match engine
        .aggregate_strings(GAUL_DATASET, &filters, PROVINCE_FIELD)
        .await
    {
        Ok(mut names) => {
            names.sort();
            names
        }
        Err(e) => {
            tracing::warn!("⚠️ Province enumeration failed ({}), using built-in list", e);
            FALLBACK_PROVINCES.iter().map(|s| s.to_string()).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        BoundaryGeometry, CollectionQuery, CompositeHandle, Result, VisParams,
    };
    use crate::utils::error::DashError;
    use async_trait::async_trait;

    struct StubEngine {
        provinces: Result<Vec<String>>,
    }

    #[async_trait]
    impl EarthEngine for StubEngine {
        async fn aggregate_strings(
            &self,
            dataset: &str,
            filters: &[FieldFilter],
            field: &str,
        ) -> Result<Vec<String>> {
            assert_eq!(dataset, GAUL_DATASET);
            assert_eq!(field, PROVINCE_FIELD);
            assert_eq!(filters, &[FieldFilter::eq(COUNTRY_FIELD, COUNTRY_NAME)][..]);
            match &self.provinces {
                Ok(names) => Ok(names.clone()),
                Err(_) => Err(DashError::DatasetUnavailable {
                    message: "service down".to_string(),
                }),
            }
        }

        async fn collection_size(&self, _query: &CollectionQuery) -> Result<u64> {
            unimplemented!("not used by enumeration tests")
        }

        async fn median_composite(
            &self,
            _query: &CollectionQuery,
            _clip: &BoundaryFilter,
            _vis: &VisParams,
        ) -> Result<CompositeHandle> {
            unimplemented!("not used by enumeration tests")
        }

        async fn boundary_geometry(&self, _boundary: &BoundaryFilter) -> Result<BoundaryGeometry> {
            unimplemented!("not used by enumeration tests")
        }
    }

    #[test]
    fn test_resolve_produces_country_and_province_filters() {
        // 備援清單裡的每個名字都要能產生結構正確的過濾器
        for name in FALLBACK_PROVINCES {
            let boundary = resolve_province(name);
            assert_eq!(boundary.dataset, GAUL_DATASET);

            let filters = boundary.filters();
            assert_eq!(filters.len(), 2);
            assert_eq!(filters[0], FieldFilter::eq("ADM0_NAME", "Indonesia"));
            assert_eq!(filters[1], FieldFilter::eq("ADM1_NAME", name));
        }
    }

    #[test]
    fn test_resolve_does_not_check_existence() {
        let boundary = resolve_province("Atlantis");
        assert_eq!(boundary.province, "Atlantis");
    }

    #[tokio::test]
    async fn test_list_provinces_sorts_live_results() {
        let engine = StubEngine {
            provinces: Ok(vec![
                "Jawa Timur".to_string(),
                "Aceh".to_string(),
                "Bali".to_string(),
            ]),
        };

        let names = list_provinces(&engine).await;
        assert_eq!(names, vec!["Aceh", "Bali", "Jawa Timur"]);
    }

    #[tokio::test]
    async fn test_list_provinces_falls_back_unsorted_on_failure() {
        let engine = StubEngine {
            provinces: Err(DashError::DatasetUnavailable {
                message: "unreachable".to_string(),
            }),
        };

        let names = list_provinces(&engine).await;
        assert_eq!(names.len(), 38);
        // 備援順序照硬編碼，不做排序
        assert_eq!(names[0], "Aceh");
        assert_eq!(names[27], "Papua Selatan");
        assert_eq!(names[28], "Papua Barat Daya");
        assert_eq!(names[37], "Sumatera Utara");
    }
}
