//! State behind each screen of the app.
//!
//! A page owns whatever the screen shows and exposes async operations that
//! talk to the API. Operations never return errors: a failure is recorded in
//! the page's `error` field as text for the user.

pub mod auth_forms;
pub mod book_details;
pub mod book_form;
pub mod home;
pub mod my_books;
pub mod my_borrowed_books;

use common::UserDto;

pub use auth_forms::{LoginForm, RegisterForm};
pub use book_details::{BookDetailsPage, BorrowAction};
pub use book_form::{BookFormPage, FormMode};
pub use home::HomePage;
pub use my_books::MyBooksPage;
pub use my_borrowed_books::MyBorrowedBooksPage;

pub const APP_TITLE: &str = "E-Library App";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    BookDetails(String),
    AddBook,
    EditBook(String),
    MyBooks,
    MyBorrowedBooks,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::BookDetails(id) => format!("/books/{id}"),
            Route::AddBook => "/add-book".to_string(),
            Route::EditBook(id) => format!("/edit-book/{id}"),
            Route::MyBooks => "/my-books".to_string(),
            Route::MyBorrowedBooks => "/my-borrowed-books".to_string(),
        }
    }

    pub fn parse(path: &str) -> Option<Route> {
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').skip(1).collect();
        match segments.as_slice() {
            [] => Some(Route::Home),
            ["login"] => Some(Route::Login),
            ["register"] => Some(Route::Register),
            ["books", id] if !id.is_empty() => Some(Route::BookDetails(id.to_string())),
            ["add-book"] => Some(Route::AddBook),
            ["edit-book", id] if !id.is_empty() => Some(Route::EditBook(id.to_string())),
            ["my-books"] => Some(Route::MyBooks),
            ["my-borrowed-books"] => Some(Route::MyBorrowedBooks),
            _ => None,
        }
    }

    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Route::AddBook | Route::EditBook(_) | Route::MyBooks | Route::MyBorrowedBooks
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub route: Route,
}

/// Header links. Managing books is only offered to a signed-in user.
pub fn nav_links(user: Option<&UserDto>) -> Vec<NavLink> {
    let link = |label, route| NavLink { label, route };
    match user {
        Some(_) => vec![
            link("All Books", Route::Home),
            link("Add E-book", Route::AddBook),
            link("View My E-books", Route::MyBooks),
            link("My Borrowed Books", Route::MyBorrowedBooks),
        ],
        None => vec![link("Login", Route::Login), link("Register", Route::Register)],
    }
}

pub fn greeting(user: Option<&UserDto>) -> Option<String> {
    user.map(|u| format!("Hello, {}", u.username))
}
