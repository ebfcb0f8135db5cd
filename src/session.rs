use crate::api::{ApiError, ProductBackend, ProductPage, SimilarityOpts};

/// A removable filter/tag shown above the result grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chip {
    Gender(String),
    Category(String),
    SearchText(String),
}

impl Chip {
    pub fn label(&self) -> String {
        match self {
            Chip::Gender(v) => format!("Gender: {v}"),
            Chip::Category(v) => format!("Category: {v}"),
            Chip::SearchText(v) => format!("Search Text: {v}"),
        }
    }
}

/// Search state controller: owns the active filters, the pagination cursor,
/// the provider flag, and the currently displayed page.
///
/// The page and its total are replaced together as one value on every
/// successful query; on failure the previous page stays visible and the
/// error string is retained for display. Queries run one at a time on the
/// blocking client, so a stale response can never overwrite a newer one.
pub struct Session {
    backend: Box<dyn ProductBackend>,

    pub gender: String,
    pub category: String,
    /// Label of the active free-text search; empty when browsing.
    pub search_text: String,
    pub limit: usize,
    pub skip: usize,
    /// Embedding provider flag sent with search/similarity queries.
    pub openai: bool,
    search_type: String,

    pub page: ProductPage,
    pub last_error: Option<String>,
}

impl Session {
    pub fn new(
        backend: Box<dyn ProductBackend>,
        limit: usize,
        search_type: &str,
        openai: bool,
    ) -> Self {
        Session {
            backend,
            gender: String::new(),
            category: String::new(),
            search_text: String::new(),
            limit,
            skip: 0,
            openai,
            search_type: search_type.to_string(),
            page: ProductPage::default(),
            last_error: None,
        }
    }

    /// Clears both filters, resets the cursor and loads the first page.
    pub fn initial_load(&mut self) {
        self.gender.clear();
        self.category.clear();
        self.skip = 0;
        self.run_listing();
    }

    pub fn set_gender(&mut self, gender: &str) {
        self.gender = gender.to_string();
        self.reset_and_query();
    }

    pub fn set_category(&mut self, category: &str) {
        self.category = category.to_string();
        self.reset_and_query();
    }

    pub fn clear_gender(&mut self) {
        self.gender.clear();
        self.reset_and_query();
    }

    pub fn clear_category(&mut self) {
        self.category.clear();
        self.reset_and_query();
    }

    /// Chip removal for the text chip: back to plain listing with the
    /// remaining filters.
    pub fn clear_search(&mut self) {
        self.reset_and_query();
    }

    /// Shows the next page. Replaces the visible items rather than
    /// appending to them.
    pub fn load_more(&mut self) {
        self.skip += self.limit;
        self.run_listing();
    }

    pub fn set_openai(&mut self, openai: bool) {
        self.openai = openai;
    }

    /// Semantic search over free text with the current filters. On success
    /// the query becomes the active search label.
    pub fn search(&mut self, text: &str) {
        match self.backend.search_user_text(text, &self.opts()) {
            Ok(page) => {
                self.apply_page(page);
                self.search_text = text.to_string();
            }
            Err(err) => self.fail(err),
        }
    }

    /// Provider-v0 text search. The endpoint returns a bare list; its
    /// length stands in for the total.
    pub fn search_v0(&mut self, text: &str) {
        match self
            .backend
            .text_search(text, self.limit, self.openai)
        {
            Ok(products) => {
                self.apply_page(ProductPage::from_list(products));
                self.search_text = text.to_string();
            }
            Err(err) => self.fail(err),
        }
    }

    pub fn similar_by_image(&mut self, product_id: u64) {
        match self.backend.similar_by_image(product_id, &self.opts()) {
            Ok(page) => {
                self.apply_page(page);
                self.search_text.clear();
            }
            Err(err) => self.fail(err),
        }
    }

    pub fn similar_by_text(&mut self, product_id: u64) {
        match self.backend.similar_by_text(product_id, &self.opts()) {
            Ok(page) => {
                self.apply_page(page);
                self.search_text.clear();
            }
            Err(err) => self.fail(err),
        }
    }

    /// Active chips, in display order.
    pub fn chips(&self) -> Vec<Chip> {
        let mut chips = Vec::new();
        if !self.category.is_empty() {
            chips.push(Chip::Category(self.category.clone()));
        }
        if !self.gender.is_empty() {
            chips.push(Chip::Gender(self.gender.clone()));
        }
        if !self.search_text.is_empty() {
            chips.push(Chip::SearchText(self.search_text.clone()));
        }
        chips
    }

    pub fn remove_chip(&mut self, chip: &Chip) {
        match chip {
            Chip::Gender(_) => self.clear_gender(),
            Chip::Category(_) => self.clear_category(),
            Chip::SearchText(_) => self.clear_search(),
        }
    }

    fn opts(&self) -> SimilarityOpts {
        SimilarityOpts {
            search_type: self.search_type.clone(),
            gender: self.gender.clone(),
            category: self.category.clone(),
            number_of_results: self.limit,
            is_openai: self.openai,
        }
    }

    /// Filter changes land here: cursor back to zero, then a listing query
    /// with whatever filters remain. Distinct from [`Self::load_more`] so a
    /// filter change can never drift the offset.
    fn reset_and_query(&mut self) {
        self.skip = 0;
        self.run_listing();
    }

    fn run_listing(&mut self) {
        match self
            .backend
            .list_products(self.limit, self.skip, &self.gender, &self.category)
        {
            Ok(page) => {
                self.apply_page(page);
                self.search_text.clear();
            }
            Err(err) => self.fail(err),
        }
    }

    fn apply_page(&mut self, page: ProductPage) {
        self.page = page;
        self.last_error = None;
    }

    fn fail(&mut self, err: ApiError) {
        log::warn!("query failed: {err}");
        self.last_error = Some(err.to_string());
    }
}
