mod categories;
mod questions;
mod quizzes;

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quizzes_router;

use serde::Deserialize;

pub const QUESTIONS_PER_PAGE: usize = 10;

#[derive(Deserialize)]
pub struct PageQuery {
    page: Option<u32>,
}

impl PageQuery {
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1) as usize
    }
}

/// Returns the 1-based page `page` of `items`: a slice of at most
/// [`QUESTIONS_PER_PAGE`] elements, empty when the page is past the end.
pub fn paginate<T>(items: Vec<T>, page: usize) -> Vec<T> {
    let start = (page - 1) * QUESTIONS_PER_PAGE;
    items
        .into_iter()
        .skip(start)
        .take(QUESTIONS_PER_PAGE)
        .collect()
}
