//! Request builder and response parser for the CMS resource collection.
//!
//! `CatalogClient` holds only the CMS base URL. The listing is revalidated
//! with a `HEAD` whose `last-modified` header is compared against the cached
//! copy; both list and single fetches ask the CMS to populate every relation.

use crate::error::ApiError;
use crate::http::{check_status, parse_json, HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CatalogEnvelope, Resource};

const COLLECTION: &str = "recurso-aprendizajes";
const POPULATE_ALL: &str = "populate=*";

#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// CMS origin, used to absolutize relative media URLs.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/api/{COLLECTION}", self.base_url)
    }

    pub fn build_resources_head(&self) -> HttpRequest {
        HttpRequest::new(HttpMethod::Head, self.collection_url())
    }

    pub fn build_list_resources(&self) -> HttpRequest {
        HttpRequest::new(
            HttpMethod::Get,
            format!("{}?{POPULATE_ALL}", self.collection_url()),
        )
    }

    pub fn build_get_resource(&self, id: u64) -> HttpRequest {
        HttpRequest::new(
            HttpMethod::Get,
            format!("{}/{id}?{POPULATE_ALL}", self.collection_url()),
        )
    }

    /// The collection's `last-modified` value, if the CMS sent one.
    pub fn parse_resources_head(&self, response: HttpResponse) -> Result<Option<String>, ApiError> {
        check_status(&response, 200)?;
        Ok(response.header("last-modified").map(str::to_string))
    }

    pub fn parse_list_resources(&self, response: HttpResponse) -> Result<Vec<Resource>, ApiError> {
        check_status(&response, 200)?;
        let envelope: CatalogEnvelope<Vec<Resource>> = parse_json(&response)?;
        Ok(envelope.data)
    }

    pub fn parse_get_resource(&self, response: HttpResponse) -> Result<Resource, ApiError> {
        check_status(&response, 200)?;
        let envelope: CatalogEnvelope<Option<Resource>> = parse_json(&response)?;
        envelope.data.ok_or(ApiError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESOURCE: &str = r#"{"id":3,"attributes":{"titulo":"Ownership","tipo_recurso":"artículo",
        "createdAt":"2024-03-01T09:00:00.000Z","updatedAt":"2024-03-01T09:00:00.000Z",
        "publishedAt":"2024-03-01T09:00:00.000Z"}}"#;

    fn client() -> CatalogClient {
        CatalogClient::new("http://localhost:1337")
    }

    fn ok(body: String) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: Vec::new(),
            body,
        }
    }

    #[test]
    fn build_head_targets_collection() {
        let req = client().build_resources_head();
        assert_eq!(req.method, HttpMethod::Head);
        assert_eq!(req.url, "http://localhost:1337/api/recurso-aprendizajes");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_list_populates_relations() {
        let req = client().build_list_resources();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(
            req.url,
            "http://localhost:1337/api/recurso-aprendizajes?populate=*"
        );
    }

    #[test]
    fn build_get_includes_id() {
        let req = client().build_get_resource(7);
        assert_eq!(
            req.url,
            "http://localhost:1337/api/recurso-aprendizajes/7?populate=*"
        );
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = CatalogClient::new("http://cms.local/");
        assert_eq!(client.base_url(), "http://cms.local");
        assert_eq!(
            client.build_resources_head().url,
            "http://cms.local/api/recurso-aprendizajes"
        );
    }

    #[test]
    fn parse_head_reads_last_modified() {
        let response = HttpResponse {
            status: 200,
            headers: vec![(
                "Last-Modified".to_string(),
                "Tue, 05 Mar 2024 10:00:00 GMT".to_string(),
            )],
            body: String::new(),
        };
        let last_modified = client().parse_resources_head(response).unwrap();
        assert_eq!(last_modified.as_deref(), Some("Tue, 05 Mar 2024 10:00:00 GMT"));
    }

    #[test]
    fn parse_head_without_header() {
        let last_modified = client().parse_resources_head(ok(String::new())).unwrap();
        assert!(last_modified.is_none());
    }

    #[test]
    fn parse_list_unwraps_data() {
        let body = format!(r#"{{"data":[{RESOURCE}],"meta":{{"pagination":{{"total":1}}}}}}"#);
        let resources = client().parse_list_resources(ok(body)).unwrap();
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].id, 3);
        assert_eq!(resources[0].attributes.title, "Ownership");
    }

    #[test]
    fn parse_get_null_data_is_not_found() {
        let err = client()
            .parse_get_resource(ok(r#"{"data":null}"#.to_string()))
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_get_404() {
        let response = HttpResponse {
            status: 404,
            headers: Vec::new(),
            body: r#"{"data":null,"error":{"status":404}}"#.to_string(),
        };
        let err = client().parse_get_resource(response).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_list_bad_json() {
        let err = client()
            .parse_list_resources(ok("not json".to_string()))
            .unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn parse_list_server_error() {
        let response = HttpResponse {
            status: 500,
            headers: Vec::new(),
            body: "internal error".to_string(),
        };
        let err = client().parse_list_resources(response).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
    }
}
