use common::{BookForm, CoverImage};
use validator::ValidationErrors;

use crate::api::ApiClient;
use crate::error::ClientError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit(String),
}

/// Shared by the "add book" and "edit book" screens.
#[derive(Debug)]
pub struct BookFormPage {
    pub mode: FormMode,
    pub form: BookForm,
    pub loading: bool,
    pub submitting: bool,
    pub error: Option<String>,
}

impl BookFormPage {
    pub fn add() -> Self {
        BookFormPage {
            mode: FormMode::Add,
            form: BookForm {
                available_copies: 1,
                ..BookForm::default()
            },
            loading: false,
            submitting: false,
            error: None,
        }
    }

    /// An edit form, empty until [`BookFormPage::load`] fills it.
    pub fn edit(book_id: impl Into<String>) -> Self {
        BookFormPage {
            mode: FormMode::Edit(book_id.into()),
            form: BookForm::default(),
            loading: true,
            submitting: false,
            error: None,
        }
    }

    pub fn loading_message(&self) -> Option<&'static str> {
        self.loading.then_some("Loading...")
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Add => "Add New Book",
            FormMode::Edit(_) => "Edit Book",
        }
    }

    /// Prefills an edit form from the server. Does nothing in add mode.
    pub async fn load(&mut self, api: &ApiClient) {
        let FormMode::Edit(id) = &self.mode else {
            return;
        };
        self.loading = true;
        match api.get_book(id).await {
            Ok(book) => {
                self.form = BookForm::from_book(&book);
                self.error = None;
            }
            Err(e) => {
                tracing::error!("Error fetching book {} for edit: {}", id, e);
                self.error = Some("Failed to load book details.".to_string());
            }
        }
        self.loading = false;
    }

    /// Number inputs hand over text; anything that is not a count leaves
    /// zero, which validation rejects.
    pub fn set_available_copies_input(&mut self, input: &str) {
        self.form.available_copies = input.trim().parse().unwrap_or(0);
    }

    /// Replaces the cover to upload. `None` drops one attached earlier.
    pub fn set_image(&mut self, image: Option<CoverImage>) {
        self.form.image = image;
    }

    /// Sends the form. Returns `true` when the book was saved, after which
    /// the UI moves on to the user's books.
    pub async fn submit(&mut self, api: &ApiClient) -> bool {
        self.error = None;
        self.submitting = true;
        let result = match &self.mode {
            FormMode::Add => api.create_book(&self.form).await,
            FormMode::Edit(id) => api.update_book(id, &self.form).await,
        };
        self.submitting = false;

        match result {
            Ok(()) => true,
            Err(ClientError::Validation(errors)) => {
                self.error = Some(validation_summary(&errors));
                false
            }
            Err(e) => {
                tracing::warn!("Saving book failed: {}", e);
                self.error = Some(match self.mode {
                    FormMode::Add => e.user_message("Failed to add book"),
                    FormMode::Edit(_) => "Failed to update the book. Please try again.".to_string(),
                });
                false
            }
        }
    }
}

/// One sentence per invalid field, in field order.
fn validation_summary(errors: &ValidationErrors) -> String {
    let fields = errors.field_errors();
    let mut names: Vec<_> = fields.keys().collect();
    names.sort();
    names
        .into_iter()
        .flat_map(|name| {
            fields[name].iter().map(move |err| match &err.message {
                Some(message) => message.to_string(),
                None => format!("Invalid {name}"),
            })
        })
        .collect::<Vec<_>>()
        .join(". ")
}
