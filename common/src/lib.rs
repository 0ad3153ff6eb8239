use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

pub mod filter;
pub mod utils;

/// A book as the library API returns it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookDto {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub author: String,
    pub genre: String,
    /// ISO-8601 date or date-time, exactly as the server sent it.
    pub publication_date: String,
    pub available_copies: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub borrowed_by: Vec<Borrower>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl BookDto {
    pub fn is_borrowed_by(&self, user_id: &str) -> bool {
        self.borrowed_by.iter().any(|b| b.id() == user_id)
    }
}

/// Entry of a book's `borrowedBy` list.
///
/// Most endpoints send plain user ids; the "my created books" listing
/// populates them with the borrower's name and email.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum Borrower {
    Id(String),
    User(BorrowerSummary),
}

impl Borrower {
    pub fn id(&self) -> &str {
        match self {
            Borrower::Id(id) => id,
            Borrower::User(summary) => &summary.id,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BorrowerSummary {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct UserDto {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub email: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Validate)]
pub struct Credentials {
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Validate)]
pub struct RegisterPayload {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Body of a successful login or registration.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserDto,
}

/// Error body sent by the API. Some routes use `message`, others `error`.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiMessage {
    pub fn into_text(self) -> Option<String> {
        self.message
            .or(self.error)
            .filter(|text| !text.is_empty())
    }
}

/// Cover image attached to a book form.
#[derive(Clone, Debug, PartialEq)]
pub struct CoverImage {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl CoverImage {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime = utils::guess_image_mime(&file_name).to_string();
        CoverImage {
            file_name,
            mime,
            bytes,
        }
    }
}

/// The add/edit book form as the user fills it in.
#[derive(Clone, Debug, Default, PartialEq, Validate)]
pub struct BookForm {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    #[validate(length(min = 1, message = "Genre is required"))]
    pub genre: String,
    /// `YYYY-MM-DD`, the value of a date input.
    #[validate(custom(function = "validate_date_input"))]
    pub publication_date: String,
    #[validate(range(min = 1, message = "At least one copy is required"))]
    pub available_copies: u32,
    pub image: Option<CoverImage>,
}

impl BookForm {
    /// Prefills the form from an existing book. The cover is left empty so
    /// that an update only replaces it when the user picks a new one.
    pub fn from_book(book: &BookDto) -> Self {
        BookForm {
            title: book.title.clone(),
            author: book.author.clone(),
            genre: book.genre.clone(),
            publication_date: utils::date_input_value(&book.publication_date).to_string(),
            available_copies: book.available_copies,
            image: None,
        }
    }

    /// Text fields in the order the API expects them in a multipart body.
    pub fn text_fields(&self) -> [(&'static str, String); 5] {
        [
            ("title", self.title.clone()),
            ("author", self.author.clone()),
            ("genre", self.genre.clone()),
            ("publicationDate", self.publication_date.clone()),
            ("availableCopies", self.available_copies.to_string()),
        ]
    }
}

fn validate_date_input(value: &str) -> Result<(), ValidationError> {
    chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| {
            let mut err = ValidationError::new("date");
            err.message = Some("Publication date must be YYYY-MM-DD".into());
            err
        })
}
