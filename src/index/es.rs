//! Elasticsearch-backed implementation of the [`GeoIndex`] contract.

use anyhow::{Context, Result};
use elasticsearch::http::transport::{SingleNodeConnectionPool, TransportBuilder};
use elasticsearch::{Elasticsearch, SearchParts};
use serde_json::{json, Value};
use tracing::{debug, warn};
use url::Url;

use super::GeoIndex;
use crate::models::{Feature, FeatureType, GeoPoint, RelatedFeatures};

/// Result cap for containment queries; an address point sits inside a
/// handful of shapes at most.
const CONTAINS_QUERY_SIZE: usize = 20;

/// Search window for related same-type objects
const RELATED_RADIUS_M: u32 = 100;
const RELATED_LIMIT: usize = 10;

/// Elasticsearch client bound to one feature index.
#[derive(Clone)]
pub struct EsGeoIndex {
    client: Elasticsearch,
    index_name: String,
    resend_on_fail: bool,
}

impl EsGeoIndex {
    /// Connect to a single-node cluster.
    ///
    /// When `resend_on_fail` is set, a failed query is re-issued once
    /// before the failure is surfaced.
    pub fn connect(es_url: &str, index_name: &str, resend_on_fail: bool) -> Result<Self> {
        let url = Url::parse(es_url)?;
        let conn_pool = SingleNodeConnectionPool::new(url);
        let transport = TransportBuilder::new(conn_pool).disable_proxy().build()?;

        Ok(Self {
            client: Elasticsearch::new(transport),
            index_name: index_name.to_string(),
            resend_on_fail,
        })
    }

    /// Check if the cluster is healthy
    pub async fn health_check(&self) -> Result<bool> {
        let response = self
            .client
            .cluster()
            .health(elasticsearch::cluster::ClusterHealthParts::None)
            .send()
            .await?;

        Ok(response.status_code().is_success())
    }

    /// Document count in the feature index
    pub async fn doc_count(&self) -> Result<u64> {
        let response = self
            .client
            .count(elasticsearch::CountParts::Index(&[&self.index_name]))
            .send()
            .await?;

        let body = response.json::<Value>().await?;
        Ok(body["count"].as_u64().unwrap_or(0))
    }

    async fn search(&self, body: Value) -> Result<Vec<Feature>> {
        debug!("index query: {}", body);

        let hits = with_resend(self.resend_on_fail, || self.search_once(&body)).await?;

        // Hits that fail to decode are dropped rather than failing the
        // whole answer
        Ok(hits.into_iter().filter_map(parse_hit).collect())
    }

    async fn search_once(&self, body: &Value) -> Result<Vec<Value>> {
        let response = self
            .client
            .search(SearchParts::Index(&[&self.index_name]))
            .body(body.clone())
            .send()
            .await
            .context("index search request failed")?;

        let response_body = response
            .json::<Value>()
            .await
            .context("failed to decode index response")?;

        Ok(response_body["hits"]["hits"]
            .as_array()
            .map(|a| a.to_vec())
            .unwrap_or_default())
    }
}

impl GeoIndex for EsGeoIndex {
    async fn contains_point(
        &self,
        types: &[FeatureType],
        point: GeoPoint,
    ) -> Result<Vec<Feature>> {
        let mut filters = type_filters(types);
        filters.push(json!({
            "geo_shape": {
                "full_geometry": {
                    "shape": {
                        "type": "point",
                        "coordinates": [point.lon, point.lat]
                    },
                    "relation": "intersects"
                }
            }
        }));

        self.search(json!({
            "query": { "bool": { "filter": filters } },
            "size": CONTAINS_QUERY_SIZE
        }))
        .await
    }

    async fn nearest_by_distance(
        &self,
        types: &[FeatureType],
        point: GeoPoint,
        max_radius_m: u32,
        limit: usize,
    ) -> Result<Vec<Feature>> {
        let mut filters = type_filters(types);
        filters.push(json!({
            "geo_distance": {
                "distance": format!("{}m", max_radius_m),
                "center_point": { "lat": point.lat, "lon": point.lon }
            }
        }));

        self.search(json!({
            "query": { "bool": { "filter": filters } },
            "sort": [
                {
                    "_geo_distance": {
                        "center_point": { "lat": point.lat, "lon": point.lon },
                        "order": "asc",
                        "unit": "m"
                    }
                }
            ],
            "size": limit
        }))
        .await
    }

    async fn intersects_shape(
        &self,
        types: &[FeatureType],
        point: GeoPoint,
        radius_m: u32,
        limit: usize,
    ) -> Result<Vec<Feature>> {
        let mut filters = type_filters(types);
        filters.push(json!({
            "geo_shape": {
                "full_geometry": {
                    "shape": {
                        "type": "circle",
                        "coordinates": [point.lon, point.lat],
                        "radius": format!("{}m", radius_m)
                    },
                    "relation": "intersects"
                }
            }
        }));

        self.search(json!({
            "query": { "bool": { "filter": filters } },
            "size": limit
        }))
        .await
    }

    async fn related(&self, feature: &Feature) -> Result<Option<RelatedFeatures>> {
        let point = feature.center_point;

        // Objects sharing the main feature's footprint
        let same_building: Vec<Feature> = self
            .contains_point(&[FeatureType::AddressPoint, FeatureType::PoiPoint], point)
            .await?
            .into_iter()
            .filter(|f| f.id != feature.id)
            .collect();

        // Objects of the same type close by
        let same_type: Vec<Feature> = self
            .nearest_by_distance(&[feature.feature_type], point, RELATED_RADIUS_M, RELATED_LIMIT)
            .await?
            .into_iter()
            .filter(|f| f.id != feature.id)
            .collect();

        if same_building.is_empty() && same_type.is_empty() {
            return Ok(None);
        }

        Ok(Some(RelatedFeatures {
            same_type: (!same_type.is_empty()).then_some(same_type),
            same_building: (!same_building.is_empty()).then_some(same_building),
        }))
    }
}

/// Run `op`, re-issuing it once on failure when `resend` is set.
async fn with_resend<T, F, Fut>(resend: bool, op: F) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<T>>,
{
    match op().await {
        Ok(value) => Ok(value),
        Err(err) if resend => {
            warn!("index query failed, resending once: {:#}", err);
            op().await
        }
        Err(err) => Err(err),
    }
}

fn type_filters(types: &[FeatureType]) -> Vec<Value> {
    if types.is_empty() {
        return Vec::new();
    }
    let names: Vec<&str> = types.iter().map(FeatureType::as_str).collect();
    vec![json!({ "terms": { "type": names } })]
}

fn parse_hit(mut hit: Value) -> Option<Feature> {
    let source = hit.get_mut("_source")?.take();
    serde_json::from_value(source).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_type_filters() {
        assert!(type_filters(&[]).is_empty());

        let filters = type_filters(&[FeatureType::Highway, FeatureType::HighwayNetwork]);
        assert_eq!(filters.len(), 1);
        assert_eq!(filters[0]["terms"]["type"], json!(["hghway", "hghnet"]));
    }

    #[test]
    fn test_parse_hit() {
        let hit = json!({
            "_score": 1.0,
            "_source": {
                "id": "adrpnt-1",
                "type": "adrpnt",
                "center_point": { "lat": 1.0, "lon": 2.0 },
                "housenumber": "15A",
                "custom_tag": "kept"
            }
        });

        let feature = parse_hit(hit).unwrap();
        assert_eq!(feature.id, "adrpnt-1");
        assert_eq!(feature.feature_type, FeatureType::AddressPoint);
        assert_eq!(feature.housenumber.as_deref(), Some("15A"));
        assert_eq!(feature.extra["custom_tag"], "kept");
    }

    #[test]
    fn test_parse_hit_without_source() {
        assert!(parse_hit(json!({"_score": 1.0})).is_none());
    }

    #[tokio::test]
    async fn test_resend_recovers_from_one_failure() {
        let calls = AtomicUsize::new(0);

        let result = with_resend(true, || async {
            if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(anyhow::anyhow!("transient"))
            } else {
                Ok(42)
            }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_resend_gives_up_after_second_failure() {
        let calls = AtomicUsize::new(0);

        let result: Result<()> = with_resend(true, || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(anyhow::anyhow!("down"))
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_no_resend_when_disabled() {
        let calls = AtomicUsize::new(0);

        let result: Result<()> = with_resend(false, || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(anyhow::anyhow!("down"))
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
