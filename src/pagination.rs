use foodgram_shared::pagination::{Page, PageArgs};
use serde::{Deserialize, Serialize};

use crate::config::PaginationConfig;

#[derive(Debug, Serialize)]
pub struct PageResponse<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

pub fn page_args(page: Option<u32>, limit: Option<u32>, config: &PaginationConfig) -> PageArgs {
    PageArgs::new(page, limit, config.page_size, config.max_page_size)
}

impl<T> PageResponse<T> {
    /// Links keep every other query parameter; the first page has no `page`
    /// parameter at all.
    pub fn new(page: Page<T>, base_url: &str, path: &str, query: Option<&str>) -> Self {
        let next = page
            .has_next()
            .then(|| page_url(base_url, path, query, page.args.page + 1))
            .flatten();

        let previous = page
            .has_previous()
            .then(|| page_url(base_url, path, query, page.args.page - 1))
            .flatten();

        Self {
            count: page.count,
            next,
            previous,
            results: page.items,
        }
    }
}

fn page_url(base_url: &str, path: &str, query: Option<&str>, page: u32) -> Option<String> {
    let mut url = url::Url::parse(&format!("{}{}", base_url.trim_end_matches('/'), path)).ok()?;

    let mut pairs = url::form_urlencoded::parse(query.unwrap_or_default().as_bytes())
        .into_owned()
        .filter(|(k, _)| k != "page")
        .collect::<Vec<_>>();

    if page > 1 {
        pairs.push(("page".to_owned(), page.to_string()));
    }

    if pairs.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(pairs);
    }

    Some(url.to_string())
}
