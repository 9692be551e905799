//! HTTP client wrapper - one GET per logical read, decoded and validated

use std::time::Duration;

use reqwest::StatusCode;

use crate::error::FetchError;
use crate::models::{Listing, Record};

/// Read-only client for one remote API
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        ApiClient { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of `GET /{collection}`, with the page-size hint when given
    pub fn collection_url<R: Record>(&self, limit: Option<usize>) -> String {
        match limit {
            Some(n) => format!("{}/{}?limit={}", self.base_url, R::COLLECTION, n),
            None => format!("{}/{}", self.base_url, R::COLLECTION),
        }
    }

    /// URL of `GET /{collection}/{id}`
    pub fn record_url<R: Record>(&self, id: u64) -> String {
        format!("{}/{}/{}", self.base_url, R::COLLECTION, id)
    }

    /// Fetch the first page of a collection in source order
    pub async fn list_collection<R: Record>(
        &self,
        limit: Option<usize>,
    ) -> Result<Listing<R>, FetchError> {
        let url = self.collection_url::<R>(limit);
        let body = self.get_body(&url).await?;
        decode_listing::<R>(&body)
    }

    /// Fetch one record by id, always a fresh round-trip
    pub async fn get_by_id<R: Record>(&self, id: u64) -> Result<R, FetchError> {
        let url = self.record_url::<R>(id);
        let body = self.get_body(&url).await?;
        decode_record::<R>(&body, id)
    }

    async fn get_body(&self, url: &str) -> Result<String, FetchError> {
        let resp = self
            .http
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(format!("{} returned 404", url)));
        }
        if !status.is_success() {
            return Err(FetchError::Network(format!("{} returned HTTP {}", url, status.as_u16())));
        }

        resp.text()
            .await
            .map_err(|e| FetchError::Network(format!("Error reading body: {}", e)))
    }
}

/// Decode a list body and validate every record
pub fn decode_listing<R: Record>(body: &str) -> Result<Listing<R>, FetchError> {
    let envelope: R::Envelope = serde_json::from_str(body)?;
    let listing = R::into_listing(envelope);
    for item in &listing.items {
        item.validate().map_err(FetchError::Decode)?;
    }
    Ok(listing)
}

/// Decode a single-record body.
///
/// An empty or `null` body means the source has no record for `id`.
pub fn decode_record<R: Record>(body: &str, id: u64) -> Result<R, FetchError> {
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Err(FetchError::NotFound(format!("no {} with id {}", R::COLLECTION, id)));
    }

    let record: R = serde_json::from_str(trimmed)?;
    record.validate().map_err(FetchError::Decode)?;
    if record.id() != id {
        return Err(FetchError::Decode(format!(
            "asked for {} {} but got {}",
            R::COLLECTION,
            id,
            record.id()
        )));
    }
    Ok(record)
}

/// Create an HTTP client with the given request timeout
pub fn create_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::models::fixtures::{character_json, product_json};
    use crate::models::{Character, Product};
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(create_client(Duration::from_secs(5)), server.uri())
    }

    fn ten_products() -> serde_json::Value {
        let items: Vec<_> = (1..=10)
            .map(|i| product_json(i, &format!("Product {}", i), 10.0 * i as f64 + 0.99))
            .collect();
        json!(items)
    }

    #[test]
    fn test_urls() {
        let client = ApiClient::new(reqwest::Client::new(), "https://fakestoreapi.com/");
        assert_eq!(client.base_url(), "https://fakestoreapi.com");
        assert_eq!(
            client.collection_url::<Product>(Some(10)),
            "https://fakestoreapi.com/products?limit=10"
        );
        assert_eq!(
            client.collection_url::<Product>(None),
            "https://fakestoreapi.com/products"
        );
        assert_eq!(
            client.record_url::<Character>(7),
            "https://fakestoreapi.com/character/7"
        );
    }

    #[test]
    fn test_decode_record_empty_body_is_not_found() {
        let err = decode_record::<Product>("", 99).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        let err = decode_record::<Product>("null", 99).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_decode_listing_rejects_invalid_record() {
        let body = json!([product_json(1, "Ok", 1.0), product_json(2, "", 1.0)]).to_string();
        let err = decode_listing::<Product>(&body).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[tokio::test]
    async fn test_list_products_with_limit_keeps_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .and(query_param("limit", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ten_products()))
            .expect(1)
            .mount(&server)
            .await;

        let listing = client_for(&server)
            .list_collection::<Product>(Some(10))
            .await
            .unwrap();

        assert_eq!(listing.items.len(), 10);
        assert_eq!(listing.total, None);
        let ids: Vec<u64> = listing.items.iter().map(|p| p.id).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<u64>>());
        assert!(listing.items.iter().all(|p| p.price > 0.0));
    }

    #[tokio::test]
    async fn test_detail_matches_list_entry() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ten_products()))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/products/1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(product_json(1, "Product 1", 10.99)),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let listing = client.list_collection::<Product>(Some(10)).await.unwrap();
        let first = &listing.items[0];
        let detail = client.get_by_id::<Product>(first.id).await.unwrap();

        assert_eq!(detail.id, first.id);
        assert_eq!(detail.title, first.title);
    }

    #[tokio::test]
    async fn test_get_by_id_is_idempotent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/character/1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(character_json(1, "Rick Sanchez", "Alive")),
            )
            .expect(2)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let a = client.get_by_id::<Character>(1).await.unwrap();
        let b = client.get_by_id::<Character>(1).await.unwrap();
        assert_eq!(a, b);
        assert_eq!(a.id, 1);
    }

    #[tokio::test]
    async fn test_list_characters_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/character"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "info": { "count": 826, "pages": 42, "next": null, "prev": null },
                "results": [
                    character_json(1, "Rick Sanchez", "Alive"),
                    character_json(2, "Morty Smith", "Alive"),
                    character_json(3, "Summer Smith", "Alive")
                ]
            })))
            .mount(&server)
            .await;

        let listing = client_for(&server)
            .list_collection::<Character>(None)
            .await
            .unwrap();
        assert_eq!(listing.total, Some(826));
        let names: Vec<&str> = listing.items.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Rick Sanchez", "Morty Smith", "Summer Smith"]);
    }

    #[tokio::test]
    async fn test_404_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/character/9999"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({ "error": "Character not found" })),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .get_by_id::<Character>(9999)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_empty_200_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products/500"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .get_by_id::<Product>(500)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .list_collection::<Product>(Some(10))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[tokio::test]
    async fn test_server_error_is_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .list_collection::<Product>(None)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        // Bind then drop a listener to get a port nobody is serving
        let addr = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();
        let client = ApiClient::new(
            create_client(Duration::from_secs(2)),
            format!("http://{}", addr),
        );
        let err = client.get_by_id::<Product>(1).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
    }
}
