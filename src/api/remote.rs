use super::client::HttpClient;
use super::error::ApiError;
use super::types::{
    Product, ProductPage, SearchRequest, SimilarityOpts, SimilarityRequest,
    UserTextSimilarityRequest,
};

/// The backend seam: one method per remote endpoint. Implemented by
/// [`RemoteProducts`] for the real service and by fakes in tests.
pub trait ProductBackend: Send + Sync {
    /// Catalog listing with optional gender/category filters.
    fn list_products(
        &self,
        limit: usize,
        skip: usize,
        gender: &str,
        category: &str,
    ) -> Result<ProductPage, ApiError>;

    /// Provider-v0 free-text search. Returns a bare list on the wire;
    /// callers derive a total from its length.
    fn text_search(
        &self,
        text: &str,
        number_of_results: usize,
        is_openai: bool,
    ) -> Result<Vec<Product>, ApiError>;

    /// Products visually similar to the given product.
    fn similar_by_image(
        &self,
        product_id: u64,
        opts: &SimilarityOpts,
    ) -> Result<ProductPage, ApiError>;

    /// Products semantically similar to the given product.
    fn similar_by_text(
        &self,
        product_id: u64,
        opts: &SimilarityOpts,
    ) -> Result<ProductPage, ApiError>;

    /// Products semantically similar to free text.
    fn search_user_text(
        &self,
        text: &str,
        opts: &SimilarityOpts,
    ) -> Result<ProductPage, ApiError>;
}

/// Builds the listing query string. The backend distinguishes four
/// parameter shapes depending on which filters are set.
pub fn listing_params(limit: usize, skip: usize, gender: &str, category: &str) -> String {
    if gender.is_empty() && category.is_empty() {
        format!("?limit={limit}&skip={skip}")
    } else if !gender.is_empty() && !category.is_empty() {
        format!("?limit={limit}&skip={skip}&gender={gender}&category={category}")
    } else if !gender.is_empty() {
        format!("?limit={limit}&skip={skip}&gender={gender}")
    } else {
        format!("?limit={limit}&skip={skip}&category={category}")
    }
}

/// Query functions against the real service. Each is a pure request
/// builder plus one dispatch through the HTTP wrapper: no retries, no
/// caching, no client-side page merging.
pub struct RemoteProducts {
    http: HttpClient,
}

impl RemoteProducts {
    pub fn new(http: HttpClient) -> Self {
        RemoteProducts { http }
    }
}

impl ProductBackend for RemoteProducts {
    fn list_products(
        &self,
        limit: usize,
        skip: usize,
        gender: &str,
        category: &str,
    ) -> Result<ProductPage, ApiError> {
        let params = listing_params(limit, skip, gender, category);
        self.http.get_json(&format!("/{params}"))
    }

    fn text_search(
        &self,
        text: &str,
        number_of_results: usize,
        is_openai: bool,
    ) -> Result<Vec<Product>, ApiError> {
        let body = SearchRequest::new(text, number_of_results, is_openai);
        self.http
            .post_json(&format!("/search?limit={number_of_results}"), &body)
    }

    fn similar_by_image(
        &self,
        product_id: u64,
        opts: &SimilarityOpts,
    ) -> Result<ProductPage, ApiError> {
        let body = SimilarityRequest::new(product_id, opts);
        self.http.post_json("/vectorsearch/image", &body)
    }

    fn similar_by_text(
        &self,
        product_id: u64,
        opts: &SimilarityOpts,
    ) -> Result<ProductPage, ApiError> {
        let body = SimilarityRequest::new(product_id, opts);
        self.http.post_json("/vectorsearch/text", &body)
    }

    fn search_user_text(
        &self,
        text: &str,
        opts: &SimilarityOpts,
    ) -> Result<ProductPage, ApiError> {
        let body = UserTextSimilarityRequest::new(text, opts);
        self.http.post_json("/vectorsearch/user", &body)
    }
}
