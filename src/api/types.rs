use serde::{Deserialize, Serialize};

/// Fields the backend is asked to return for similarity hits.
pub const DEFAULT_RETURN_FIELDS: [&str; 3] = ["product_id", "product_pk", "vector_score"];

fn default_return_fields() -> Vec<String> {
    DEFAULT_RETURN_FIELDS.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ProductMetadata {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub image_url: String,
}

/// A catalog item as the backend returns it. Immutable once received;
/// `similarity_score` is only present in similarity-search results.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Product {
    #[serde(default)]
    pub pk: String,
    #[serde(default)]
    pub product_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity_score: Option<f64>,
    #[serde(default)]
    pub product_metadata: ProductMetadata,
}

/// A page of results with the authoritative total. The two always travel
/// together so the displayed count cannot disagree with the visible items.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ProductPage {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub total: usize,
}

impl ProductPage {
    /// Wraps a bare product list, using its length as the total. The
    /// provider-v0 text search endpoint returns an unenveloped list.
    pub fn from_list(products: Vec<Product>) -> Self {
        let total = products.len();
        Self { products, total }
    }
}

/// Knobs shared by the similarity endpoints: filters, result count,
/// search mode and embedding provider.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityOpts {
    pub search_type: String,
    pub gender: String,
    pub category: String,
    pub number_of_results: usize,
    pub is_openai: bool,
}

impl Default for SimilarityOpts {
    fn default() -> Self {
        Self {
            search_type: "KNN".to_string(),
            gender: String::new(),
            category: String::new(),
            number_of_results: 15,
            is_openai: false,
        }
    }
}

/// Body for `POST /search` (provider-v0 text search).
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    pub text: String,
    pub number_of_results: usize,
    pub is_openai: bool,
    pub return_fields: Vec<String>,
}

impl SearchRequest {
    pub fn new(text: &str, number_of_results: usize, is_openai: bool) -> Self {
        Self {
            text: text.to_string(),
            number_of_results,
            is_openai,
            return_fields: default_return_fields(),
        }
    }
}

/// Body for `POST /vectorsearch/image` and `POST /vectorsearch/text`.
#[derive(Debug, Clone, Serialize)]
pub struct SimilarityRequest {
    pub product_id: u64,
    pub search_type: String,
    pub gender: String,
    pub category: String,
    pub number_of_results: usize,
    pub is_openai: bool,
    pub return_fields: Vec<String>,
}

impl SimilarityRequest {
    pub fn new(product_id: u64, opts: &SimilarityOpts) -> Self {
        Self {
            product_id,
            search_type: opts.search_type.clone(),
            gender: opts.gender.clone(),
            category: opts.category.clone(),
            number_of_results: opts.number_of_results,
            is_openai: opts.is_openai,
            return_fields: default_return_fields(),
        }
    }
}

/// Body for `POST /vectorsearch/user` (semantic search over free text).
#[derive(Debug, Clone, Serialize)]
pub struct UserTextSimilarityRequest {
    pub user_text: String,
    pub search_type: String,
    pub number_of_results: usize,
    pub gender: String,
    pub category: String,
    pub is_openai: bool,
    pub return_fields: Vec<String>,
}

impl UserTextSimilarityRequest {
    pub fn new(user_text: &str, opts: &SimilarityOpts) -> Self {
        Self {
            user_text: user_text.to_string(),
            search_type: opts.search_type.clone(),
            number_of_results: opts.number_of_results,
            gender: opts.gender.clone(),
            category: opts.category.clone(),
            is_openai: opts.is_openai,
            return_fields: default_return_fields(),
        }
    }
}
