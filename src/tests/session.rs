use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::api::{
    ApiError, Product, ProductBackend, ProductMetadata, ProductPage, SimilarityOpts,
};
use crate::session::{Chip, Session};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    List {
        limit: usize,
        skip: usize,
        gender: String,
        category: String,
    },
    TextSearch {
        text: String,
        number_of_results: usize,
        is_openai: bool,
    },
    SimilarImage {
        product_id: u64,
        opts: SimilarityOpts,
    },
    SimilarText {
        product_id: u64,
        opts: SimilarityOpts,
    },
    UserText {
        text: String,
        opts: SimilarityOpts,
    },
}

/// Records every backend call and serves canned pages; flipping `fail`
/// makes every call error.
struct FakeBackend {
    calls: Arc<Mutex<Vec<Call>>>,
    page: ProductPage,
    fail: Arc<AtomicBool>,
}

impl FakeBackend {
    fn check_fail(&self) -> Result<(), ApiError> {
        if self.fail.load(Ordering::SeqCst) {
            Err(ApiError::Server)
        } else {
            Ok(())
        }
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl ProductBackend for FakeBackend {
    fn list_products(
        &self,
        limit: usize,
        skip: usize,
        gender: &str,
        category: &str,
    ) -> Result<ProductPage, ApiError> {
        self.record(Call::List {
            limit,
            skip,
            gender: gender.to_string(),
            category: category.to_string(),
        });
        self.check_fail()?;
        Ok(self.page.clone())
    }

    fn text_search(
        &self,
        text: &str,
        number_of_results: usize,
        is_openai: bool,
    ) -> Result<Vec<Product>, ApiError> {
        self.record(Call::TextSearch {
            text: text.to_string(),
            number_of_results,
            is_openai,
        });
        self.check_fail()?;
        Ok(self.page.products.clone())
    }

    fn similar_by_image(
        &self,
        product_id: u64,
        opts: &SimilarityOpts,
    ) -> Result<ProductPage, ApiError> {
        self.record(Call::SimilarImage {
            product_id,
            opts: opts.clone(),
        });
        self.check_fail()?;
        Ok(self.page.clone())
    }

    fn similar_by_text(
        &self,
        product_id: u64,
        opts: &SimilarityOpts,
    ) -> Result<ProductPage, ApiError> {
        self.record(Call::SimilarText {
            product_id,
            opts: opts.clone(),
        });
        self.check_fail()?;
        Ok(self.page.clone())
    }

    fn search_user_text(
        &self,
        text: &str,
        opts: &SimilarityOpts,
    ) -> Result<ProductPage, ApiError> {
        self.record(Call::UserText {
            text: text.to_string(),
            opts: opts.clone(),
        });
        self.check_fail()?;
        Ok(self.page.clone())
    }
}

fn canned_page() -> ProductPage {
    let products = (1..=3)
        .map(|i| Product {
            pk: format!("pk{i}"),
            product_id: i,
            similarity_score: None,
            product_metadata: ProductMetadata {
                name: format!("Product {i}"),
                text: String::new(),
                image_url: String::new(),
            },
        })
        .collect();
    ProductPage {
        products,
        total: 42,
    }
}

fn create_session() -> (Session, Arc<Mutex<Vec<Call>>>, Arc<AtomicBool>) {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let fail = Arc::new(AtomicBool::new(false));
    let backend = FakeBackend {
        calls: calls.clone(),
        page: canned_page(),
        fail: fail.clone(),
    };
    let session = Session::new(Box::new(backend), 15, "KNN", false);
    (session, calls, fail)
}

fn last_call(calls: &Arc<Mutex<Vec<Call>>>) -> Call {
    calls.lock().unwrap().last().unwrap().clone()
}

#[test]
fn test_initial_load_lists_first_page_without_filters() {
    let (mut session, calls, _) = create_session();
    session.initial_load();

    assert_eq!(
        last_call(&calls),
        Call::List {
            limit: 15,
            skip: 0,
            gender: String::new(),
            category: String::new(),
        }
    );
    assert_eq!(session.page.total, 42);
    assert_eq!(session.page.products.len(), 3);
    assert_eq!(session.last_error, None);
}

#[test]
fn test_load_more_advances_cursor_and_replaces_page() {
    let (mut session, calls, _) = create_session();
    session.initial_load();

    session.load_more();
    assert_eq!(session.skip, 15);
    session.load_more();
    assert_eq!(session.skip, 30);

    assert_eq!(
        last_call(&calls),
        Call::List {
            limit: 15,
            skip: 30,
            gender: String::new(),
            category: String::new(),
        }
    );
    // replaced wholesale, not appended
    assert_eq!(session.page.products.len(), 3);
}

#[test]
fn test_filter_change_resets_cursor() {
    let (mut session, calls, _) = create_session();
    session.initial_load();
    session.load_more();
    assert_eq!(session.skip, 15);

    session.set_gender("Men");

    assert_eq!(session.skip, 0);
    assert_eq!(
        last_call(&calls),
        Call::List {
            limit: 15,
            skip: 0,
            gender: "Men".to_string(),
            category: String::new(),
        }
    );
}

#[test]
fn test_removing_chip_keeps_other_filter() {
    let (mut session, calls, _) = create_session();
    session.initial_load();
    session.set_gender("Men");
    session.set_category("Apparel");

    let gender_chip = Chip::Gender("Men".to_string());
    session.remove_chip(&gender_chip);

    assert_eq!(
        last_call(&calls),
        Call::List {
            limit: 15,
            skip: 0,
            gender: String::new(),
            category: "Apparel".to_string(),
        }
    );
    assert_eq!(session.chips(), vec![Chip::Category("Apparel".to_string())]);
}

#[test]
fn test_search_records_label_and_passes_filters() {
    let (mut session, calls, _) = create_session();
    session.initial_load();
    session.set_gender("Women");
    session.set_openai(true);

    session.search("red shoes");

    match last_call(&calls) {
        Call::UserText { text, opts } => {
            assert_eq!(text, "red shoes");
            assert_eq!(opts.gender, "Women");
            assert_eq!(opts.category, "");
            assert_eq!(opts.search_type, "KNN");
            assert_eq!(opts.number_of_results, 15);
            assert!(opts.is_openai);
        }
        other => panic!("expected user text call, got {other:?}"),
    }
    assert_eq!(session.search_text, "red shoes");
    assert_eq!(
        session.chips(),
        vec![
            Chip::Gender("Women".to_string()),
            Chip::SearchText("red shoes".to_string()),
        ]
    );
}

#[test]
fn test_search_failure_keeps_previous_page() {
    let (mut session, _, fail) = create_session();
    session.initial_load();
    let before = session.page.clone();

    fail.store(true, Ordering::SeqCst);
    session.search("red shoes");

    assert_eq!(session.page, before);
    assert_eq!(
        session.last_error.as_deref(),
        Some("Internal server error")
    );
    // the label only changes on success
    assert_eq!(session.search_text, "");
}

#[test]
fn test_error_cleared_on_next_success() {
    let (mut session, _, fail) = create_session();
    session.initial_load();

    fail.store(true, Ordering::SeqCst);
    session.search("red shoes");
    assert!(session.last_error.is_some());

    fail.store(false, Ordering::SeqCst);
    session.load_more();
    assert_eq!(session.last_error, None);
}

#[test]
fn test_search_v0_wraps_bare_list() {
    let (mut session, calls, _) = create_session();
    session.initial_load();

    session.search_v0("shirt");

    assert_eq!(
        last_call(&calls),
        Call::TextSearch {
            text: "shirt".to_string(),
            number_of_results: 15,
            is_openai: false,
        }
    );
    // bare list: total derived from length, not the canned 42
    assert_eq!(session.page.total, 3);
    assert_eq!(session.search_text, "shirt");
}

#[test]
fn test_similar_clears_search_label() {
    let (mut session, calls, _) = create_session();
    session.initial_load();
    session.search("red shoes");
    assert_eq!(session.search_text, "red shoes");

    session.similar_by_text(11);

    match last_call(&calls) {
        Call::SimilarText { product_id, .. } => assert_eq!(product_id, 11),
        other => panic!("expected similar-by-text call, got {other:?}"),
    }
    assert_eq!(session.search_text, "");

    session.search("red shoes");
    session.similar_by_image(12);
    match last_call(&calls) {
        Call::SimilarImage { product_id, .. } => assert_eq!(product_id, 12),
        other => panic!("expected similar-by-image call, got {other:?}"),
    }
    assert_eq!(session.search_text, "");
}

#[test]
fn test_listing_clears_search_label() {
    let (mut session, _, _) = create_session();
    session.initial_load();
    session.search("red shoes");

    session.load_more();

    assert_eq!(session.search_text, "");
    assert!(session.chips().is_empty());
}
