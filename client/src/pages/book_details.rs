use common::{BookDto, UserDto};

use crate::api::ApiClient;

/// What the borrow area of the details screen offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorrowAction {
    Return,
    Borrow,
    NoCopies,
    LoginRequired,
}

impl BorrowAction {
    pub fn label(&self) -> &'static str {
        match self {
            BorrowAction::Return => "Return Book",
            BorrowAction::Borrow => "Borrow Book",
            BorrowAction::NoCopies => "No copies available for borrowing",
            BorrowAction::LoginRequired => "Please log in to borrow this book.",
        }
    }

    /// Whether the action is a button rather than a notice.
    pub fn is_button(&self) -> bool {
        matches!(self, BorrowAction::Return | BorrowAction::Borrow)
    }
}

#[derive(Debug, Default)]
pub struct BookDetailsPage {
    pub book: Option<BookDto>,
    /// Whether the signed-in user currently holds a copy.
    pub is_borrowed: bool,
    pub loading: bool,
    pub error: Option<String>,
}

impl BookDetailsPage {
    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    pub async fn load(&mut self, api: &ApiClient, id: &str, user: Option<&UserDto>) {
        self.begin_load();
        match api.get_book(id).await {
            Ok(book) => {
                self.is_borrowed = user.is_some_and(|u| book.is_borrowed_by(&u.id));
                self.book = Some(book);
                self.error = None;
            }
            Err(e) => {
                tracing::error!("Error fetching book {}: {}", id, e);
                self.error = Some("Error fetching book details".to_string());
            }
        }
        self.loading = false;
    }

    pub fn loading_message(&self) -> Option<&'static str> {
        self.loading.then_some("Loading book details...")
    }

    pub fn action(&self, signed_in: bool) -> Option<BorrowAction> {
        let book = self.book.as_ref()?;
        Some(if !signed_in {
            BorrowAction::LoginRequired
        } else if self.is_borrowed {
            BorrowAction::Return
        } else if book.available_copies > 0 {
            BorrowAction::Borrow
        } else {
            BorrowAction::NoCopies
        })
    }

    /// Borrows the shown book. The copy count is adjusted locally once the
    /// server accepts.
    pub async fn borrow(&mut self, api: &ApiClient) {
        let Some(id) = self.book.as_ref().map(|b| b.id.clone()) else {
            return;
        };
        match api.borrow_book(&id).await {
            Ok(()) => {
                self.is_borrowed = true;
                if let Some(book) = self.book.as_mut() {
                    book.available_copies = book.available_copies.saturating_sub(1);
                }
            }
            Err(e) => {
                tracing::warn!("Error borrowing book {}: {}", id, e);
                self.error = Some("Error borrowing book".to_string());
            }
        }
    }

    pub async fn return_book(&mut self, api: &ApiClient) {
        let Some(id) = self.book.as_ref().map(|b| b.id.clone()) else {
            return;
        };
        match api.return_book(&id).await {
            Ok(()) => {
                self.is_borrowed = false;
                if let Some(book) = self.book.as_mut() {
                    book.available_copies += 1;
                }
            }
            Err(e) => {
                tracing::warn!("Error returning book {}: {}", id, e);
                self.error = Some("Error returning book".to_string());
            }
        }
    }
}
