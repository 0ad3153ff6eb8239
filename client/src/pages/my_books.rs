use common::{BookDto, Borrower};

use crate::api::ApiClient;

pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this book?";

/// Books the signed-in user added, with edit and delete.
#[derive(Debug, Default)]
pub struct MyBooksPage {
    pub books: Vec<BookDto>,
    pub loading: bool,
    pub error: Option<String>,
}

impl MyBooksPage {
    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    pub async fn load(&mut self, api: &ApiClient) {
        self.begin_load();
        match api.my_created_books().await {
            Ok(books) => {
                self.books = books;
                self.error = None;
            }
            Err(e) => {
                tracing::error!("Error fetching created books: {}", e);
                self.error = Some("Failed to fetch your books. Please try again later.".to_string());
            }
        }
        self.loading = false;
    }

    /// Deletes a book the user already confirmed. It leaves the list only
    /// after the server agreed.
    pub async fn delete(&mut self, api: &ApiClient, book_id: &str) -> bool {
        match api.delete_book(book_id).await {
            Ok(()) => {
                self.books.retain(|book| book.id != book_id);
                true
            }
            Err(e) => {
                tracing::warn!("Error deleting book {}: {}", book_id, e);
                self.error = Some("Failed to delete the book. Please try again.".to_string());
                false
            }
        }
    }

    pub fn loading_message(&self) -> Option<&'static str> {
        self.loading.then_some("Loading...")
    }

    pub fn empty_message(&self) -> Option<&'static str> {
        (!self.loading && self.books.is_empty())
            .then_some("You have not added any books yet.")
    }
}

/// One line per borrower, `name (email)` when the API populated them.
pub fn borrower_lines(book: &BookDto) -> Vec<String> {
    if book.borrowed_by.is_empty() {
        return vec!["Not borrowed yet".to_string()];
    }
    book.borrowed_by
        .iter()
        .map(|borrower| match borrower {
            Borrower::User(summary) => match (&summary.name, &summary.email) {
                (Some(name), Some(email)) => format!("{name} ({email})"),
                (Some(name), None) => name.clone(),
                (None, Some(email)) => email.clone(),
                (None, None) => summary.id.clone(),
            },
            Borrower::Id(id) => id.clone(),
        })
        .collect()
}

pub fn status_label(book: &BookDto) -> &'static str {
    if book.available.unwrap_or(book.available_copies > 0) {
        "Available"
    } else {
        "Not Available"
    }
}
