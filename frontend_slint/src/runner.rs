// --- File: frontend_slint/src/runner.rs ---

use std::future::Future;
use std::sync::Arc;

use client::pages::{
    self,
    my_books::{borrower_lines, status_label, DELETE_CONFIRMATION},
    BookDetailsPage, BookFormPage, BorrowAction, HomePage, LoginForm, MyBooksPage,
    MyBorrowedBooksPage, RegisterForm, Route,
};
use client::{ApiClient, ClientError, FrontendConfig, Session};
use common::utils::{cover_url, display_date};
use common::BookDto;
use slint::{ModelRc, VecModel};
use tokio::sync::Mutex;

slint::slint! {
    import { Button, LineEdit, ListView, VerticalBox, HorizontalBox } from "std-widgets.slint";

    export struct BookRow {
        id: string,
        title: string,
        author: string,
        genre: string,
        published: string,
        copies: int,
        cover: string,
        borrowers: string,
        status: string,
        description: string,
    }

    export struct NavItem {
        label: string,
        path: string,
    }

    component BookSummary inherits VerticalLayout {
        in property <BookRow> book;
        spacing: 2px;
        Text { text: root.book.title; font-size: 18px; font-weight: 700; color: #ff5500; }
        Text { text: "By: " + root.book.author; }
        Text { text: "Genre: " + root.book.genre; }
        Text { text: "Published: " + root.book.published; }
        Text { text: "Available Copies: " + root.book.copies; }
        Text { text: "Cover: " + root.book.cover; font-size: 10px; color: #888888; }
    }

    export component App inherits Window {
        in property <string> app-title;
        title: root.app-title;
        preferred-width: 960px;
        preferred-height: 720px;

        in property <string> page: "home";
        in property <bool> signed-in;
        in property <string> greeting;
        in property <[NavItem]> nav;
        in property <string> error-text;
        in property <bool> loading;
        in property <string> loading-text;

        in property <[BookRow]> books;
        in property <string> empty-message;
        in-out property <string> genre-filter;
        in-out property <string> author-filter;
        in-out property <string> year-filter;

        in property <bool> has-detail;
        in property <BookRow> detail;
        in property <string> borrow-label;
        in property <bool> borrow-is-button;
        in property <bool> borrow-is-return;

        in property <[BookRow]> my-books;
        in property <[BookRow]> borrowed-books;
        in property <string> delete-question;
        property <string> pending-delete;

        in property <string> form-heading;
        in-out property <string> form-title;
        in-out property <string> form-author;
        in-out property <string> form-genre;
        in-out property <string> form-date;
        in-out property <string> form-copies;
        in-out property <string> form-image-path;

        in-out property <string> login-email;
        in-out property <string> login-password;
        in-out property <string> register-username;
        in-out property <string> register-email;
        in-out property <string> register-password;

        callback navigate(string);
        callback logout();
        callback filters-changed();
        callback borrow();
        callback give-back();
        callback give-back-borrowed(string);
        callback delete-book(string);
        callback submit-book();
        callback submit-login();
        callback submit-register();

        VerticalBox {
            HorizontalBox {
                Button {
                    text: root.app-title;
                    clicked => { root.navigate("/"); }
                }
                for item in root.nav : Button {
                    text: item.label;
                    clicked => { root.navigate(item.path); }
                }
                Rectangle { horizontal-stretch: 1; }
                if root.signed-in : Text {
                    text: root.greeting;
                    vertical-alignment: center;
                }
                if root.signed-in : Button {
                    text: "Logout";
                    clicked => { root.logout(); }
                }
            }

            if root.error-text != "" : Text {
                text: root.error-text;
                color: #ef4444;
            }
            if root.loading : Text { text: root.loading-text; }

            if root.page == "home" : VerticalLayout {
                spacing: 8px;
                Text { text: "Filter Books"; font-size: 20px; }
                HorizontalLayout {
                    spacing: 8px;
                    LineEdit {
                        placeholder-text: "Filter by Genre";
                        text <=> root.genre-filter;
                        edited => { root.filters-changed(); }
                    }
                    LineEdit {
                        placeholder-text: "Filter by Author";
                        text <=> root.author-filter;
                        edited => { root.filters-changed(); }
                    }
                    LineEdit {
                        placeholder-text: "Filter by Year";
                        text <=> root.year-filter;
                        edited => { root.filters-changed(); }
                    }
                }
                if root.empty-message != "" : Text { text: root.empty-message; }
                ListView {
                    for book in root.books : VerticalLayout {
                        padding: 8px;
                        BookSummary { book: book; }
                        Button {
                            text: "View Details";
                            clicked => { root.navigate("/books/" + book.id); }
                        }
                    }
                }
            }

            if root.page == "details" && root.has-detail : VerticalLayout {
                spacing: 8px;
                Text { text: "Book Details"; font-size: 24px; }
                BookSummary { book: root.detail; }
                if root.detail.description != "" : Text {
                    text: root.detail.description;
                    wrap: word-wrap;
                }
                if root.borrow-is-button : Button {
                    text: root.borrow-label;
                    clicked => {
                        if (root.borrow-is-return) {
                            root.give-back();
                        } else {
                            root.borrow();
                        }
                    }
                }
                if !root.borrow-is-button : Text {
                    text: root.borrow-label;
                    color: #eab308;
                }
            }

            if root.page == "my-books" : VerticalLayout {
                spacing: 8px;
                Text { text: "This is your bookshelf"; font-size: 24px; }
                if root.empty-message != "" : Text { text: root.empty-message; }
                ListView {
                    for book in root.my-books : VerticalLayout {
                        padding: 8px;
                        BookSummary { book: book; }
                        Text { text: "Status: " + book.status; }
                        Text { text: "Borrowed by: " + book.borrowers; }
                        HorizontalLayout {
                            spacing: 8px;
                            Button {
                                text: "Edit";
                                clicked => { root.navigate("/edit-book/" + book.id); }
                            }
                            Button {
                                text: "Delete";
                                clicked => { root.pending-delete = book.id; }
                            }
                        }
                        if root.pending-delete == book.id : HorizontalLayout {
                            spacing: 8px;
                            Text {
                                text: root.delete-question;
                                vertical-alignment: center;
                            }
                            Button {
                                text: "Yes";
                                clicked => {
                                    root.pending-delete = "";
                                    root.delete-book(book.id);
                                }
                            }
                            Button {
                                text: "No";
                                clicked => { root.pending-delete = ""; }
                            }
                        }
                    }
                }
            }

            if root.page == "borrowed" : VerticalLayout {
                spacing: 8px;
                Text { text: "My Borrowed Books"; font-size: 24px; }
                if root.empty-message != "" : Text { text: root.empty-message; }
                ListView {
                    for book in root.borrowed-books : VerticalLayout {
                        padding: 8px;
                        BookSummary { book: book; }
                        Button {
                            text: "Return Book";
                            clicked => { root.give-back-borrowed(book.id); }
                        }
                    }
                }
            }

            if root.page == "form" : VerticalLayout {
                spacing: 6px;
                Text { text: root.form-heading; font-size: 24px; }
                Text { text: "Title"; }
                LineEdit { text <=> root.form-title; }
                Text { text: "Author"; }
                LineEdit { text <=> root.form-author; }
                Text { text: "Genre"; }
                LineEdit { text <=> root.form-genre; }
                Text { text: "Publication Date (YYYY-MM-DD)"; }
                LineEdit { text <=> root.form-date; }
                Text { text: "Available Copies"; }
                LineEdit { text <=> root.form-copies; }
                Text { text: "Book Cover Image (file path)"; }
                LineEdit { text <=> root.form-image-path; }
                Button {
                    text: "Save";
                    clicked => { root.submit-book(); }
                }
            }

            if root.page == "login" : VerticalLayout {
                spacing: 6px;
                Text { text: "Login"; font-size: 24px; }
                Text { text: "Welcome back! Please login to your account."; }
                LineEdit {
                    placeholder-text: "Email";
                    text <=> root.login-email;
                }
                LineEdit {
                    placeholder-text: "Password";
                    input-type: InputType.password;
                    text <=> root.login-password;
                }
                Button {
                    text: "Login";
                    clicked => { root.submit-login(); }
                }
                Button {
                    text: "Don't have an account? Register";
                    clicked => { root.navigate("/register"); }
                }
            }

            if root.page == "register" : VerticalLayout {
                spacing: 6px;
                Text { text: "Register"; font-size: 24px; }
                LineEdit {
                    placeholder-text: "Username";
                    text <=> root.register-username;
                }
                LineEdit {
                    placeholder-text: "Email";
                    text <=> root.register-email;
                }
                LineEdit {
                    placeholder-text: "Password";
                    input-type: InputType.password;
                    text <=> root.register-password;
                }
                Button {
                    text: "Register";
                    clicked => { root.submit-register(); }
                }
                Button {
                    text: "Already have an account? Login";
                    clicked => { root.navigate("/login"); }
                }
            }
        }
    }
}

// Helper to spawn async tasks differently for native and wasm
#[cfg(not(target_arch = "wasm32"))]
fn spawn<F: Future<Output = ()> + Send + 'static>(fut: F) {
    tokio::spawn(fut);
}

// Browser futures hold JS handles, so they stay on the UI thread.
#[cfg(target_arch = "wasm32")]
fn spawn<F: Future<Output = ()> + 'static>(fut: F) {
    wasm_bindgen_futures::spawn_local(fut);
}

fn book_row(book: &BookDto, asset_base_url: &str) -> BookRow {
    BookRow {
        id: book.id.as_str().into(),
        title: book.title.as_str().into(),
        author: book.author.as_str().into(),
        genre: book.genre.as_str().into(),
        published: display_date(&book.publication_date).into(),
        copies: i32::try_from(book.available_copies).unwrap_or(i32::MAX),
        cover: cover_url(asset_base_url, book.image_url.as_deref()).into(),
        borrowers: borrower_lines(book).join(", ").into(),
        status: status_label(book).into(),
        description: book.description.as_deref().unwrap_or_default().into(),
    }
}

/// Every screen's state plus the session, guarded as one unit so a request
/// and the re-render that follows it see a consistent picture.
struct Frontend {
    config: FrontendConfig,
    session: Session,
    route: Route,
    home: HomePage,
    details: BookDetailsPage,
    my_books: MyBooksPage,
    borrowed: MyBorrowedBooksPage,
    form: BookFormPage,
    login: LoginForm,
    register: RegisterForm,
}

type SharedFrontend = Arc<Mutex<Frontend>>;

impl Frontend {
    fn new(config: FrontendConfig) -> Result<Self, ClientError> {
        let api = ApiClient::from_config(&config.api)?;
        let session = match &config.session.store_path {
            Some(path) => Session::with_store(api, path)?,
            None => Session::new(api),
        };
        Ok(Frontend {
            config,
            session,
            route: Route::Home,
            home: HomePage::default(),
            details: BookDetailsPage::default(),
            my_books: MyBooksPage::default(),
            borrowed: MyBorrowedBooksPage::default(),
            form: BookFormPage::add(),
            login: LoginForm::default(),
            register: RegisterForm::default(),
        })
    }

    /// Switches screens and fetches what the new one shows. The screen is
    /// rendered once in its loading state and again when the data is in.
    async fn open(&mut self, path: &str, app_weak: &slint::Weak<App>) {
        let mut route = Route::parse(path).unwrap_or(Route::Home);
        if route.requires_auth() && !self.session.is_authenticated() {
            tracing::info!("{} needs a signed-in user", route.path());
            route = Route::Login;
        }
        tracing::debug!("Opening {}", route.path());

        match &route {
            Route::Home => self.home.begin_load(),
            Route::BookDetails(_) => {
                self.details = BookDetailsPage::default();
                self.details.begin_load();
            }
            Route::AddBook => self.form = BookFormPage::add(),
            Route::EditBook(id) => self.form = BookFormPage::edit(id.clone()),
            Route::MyBooks => self.my_books.begin_load(),
            Route::MyBorrowedBooks => self.borrowed.begin_load(),
            Route::Login => self.login = LoginForm::default(),
            Route::Register => self.register = RegisterForm::default(),
        }
        self.route = route.clone();
        show(app_weak, self.snapshot_with_inputs());

        let api = self.session.api().clone();
        match &route {
            Route::Home => self.home.load(&api).await,
            Route::BookDetails(id) => {
                self.details
                    .load(&api, id, self.session.current_user())
                    .await;
            }
            Route::EditBook(_) => self.form.load(&api).await,
            Route::MyBooks => self.my_books.load(&api).await,
            Route::MyBorrowedBooks => self.borrowed.load(&api).await,
            Route::AddBook | Route::Login | Route::Register => return,
        }
        show(app_weak, self.snapshot_with_inputs());
    }

    fn snapshot(&self) -> Snapshot {
        let asset_base_url = self.config.api.asset_base_url.as_str();
        let row = |book: &BookDto| book_row(book, asset_base_url);
        let user = self.session.current_user();

        let mut snapshot = Snapshot {
            signed_in: self.session.is_authenticated(),
            greeting: pages::greeting(user).unwrap_or_default(),
            nav: pages::nav_links(user)
                .into_iter()
                .map(|link| NavItem {
                    label: link.label.into(),
                    path: link.route.path().into(),
                })
                .collect(),
            ..Snapshot::default()
        };

        match &self.route {
            Route::Home => {
                snapshot.page = "home";
                snapshot.loading = self.home.loading_message();
                snapshot.error = self.home.error.clone();
                snapshot.books = self.home.visible_books().into_iter().map(&row).collect();
                snapshot.empty_message = self.home.empty_message().unwrap_or_default().into();
            }
            Route::BookDetails(_) => {
                snapshot.page = "details";
                snapshot.loading = self.details.loading_message();
                snapshot.error = self.details.error.clone();
                snapshot.detail = self.details.book.as_ref().map(&row);
                snapshot.borrow_action = self.details.action(snapshot.signed_in);
            }
            Route::MyBooks => {
                snapshot.page = "my-books";
                snapshot.loading = self.my_books.loading_message();
                snapshot.error = self.my_books.error.clone();
                snapshot.my_books = self.my_books.books.iter().map(&row).collect();
                snapshot.empty_message = self.my_books.empty_message().unwrap_or_default().into();
            }
            Route::MyBorrowedBooks => {
                snapshot.page = "borrowed";
                snapshot.loading = self.borrowed.loading_message();
                snapshot.error = self.borrowed.error.clone();
                snapshot.borrowed_books = self.borrowed.books.iter().map(&row).collect();
                snapshot.empty_message = self.borrowed.empty_message().unwrap_or_default().into();
            }
            Route::AddBook | Route::EditBook(_) => {
                snapshot.page = "form";
                snapshot.loading = self
                    .form
                    .loading_message()
                    .or(self.form.submitting.then_some("Saving..."));
                snapshot.error = self.form.error.clone();
                snapshot.form_heading = self.form.title();
            }
            Route::Login => {
                snapshot.page = "login";
                snapshot.error = self.login.error.clone();
            }
            Route::Register => {
                snapshot.page = "register";
                snapshot.error = self.register.error.clone();
            }
        }
        snapshot
    }

    /// Like [`Frontend::snapshot`], but also overwrites the screen's text
    /// inputs. Only navigation does this, so typing is never reset by a
    /// render that was queued behind it.
    fn snapshot_with_inputs(&self) -> Snapshot {
        let mut snapshot = self.snapshot();
        snapshot.inputs = match &self.route {
            Route::Home => Some(Inputs::Filters {
                genre: self.home.genre().to_string(),
                author: self.home.author().to_string(),
                year: self.home.year_input().to_string(),
            }),
            Route::AddBook | Route::EditBook(_) => {
                let form = &self.form.form;
                Some(Inputs::Form {
                    title: form.title.clone(),
                    author: form.author.clone(),
                    genre: form.genre.clone(),
                    date: form.publication_date.clone(),
                    copies: form.available_copies.to_string(),
                })
            }
            _ => None,
        };
        snapshot
    }
}

enum Inputs {
    Filters {
        genre: String,
        author: String,
        year: String,
    },
    Form {
        title: String,
        author: String,
        genre: String,
        date: String,
        copies: String,
    },
}

/// Plain data for one render, built under the lock and applied on the UI
/// thread.
#[derive(Default)]
struct Snapshot {
    page: &'static str,
    signed_in: bool,
    greeting: String,
    nav: Vec<NavItem>,
    error: Option<String>,
    loading: Option<&'static str>,
    books: Vec<BookRow>,
    empty_message: String,
    detail: Option<BookRow>,
    borrow_action: Option<BorrowAction>,
    my_books: Vec<BookRow>,
    borrowed_books: Vec<BookRow>,
    form_heading: &'static str,
    inputs: Option<Inputs>,
}

impl Snapshot {
    fn apply(self, app: &App) {
        app.set_page(self.page.into());
        app.set_signed_in(self.signed_in);
        app.set_greeting(self.greeting.into());
        app.set_nav(ModelRc::new(VecModel::from(self.nav)));
        app.set_error_text(self.error.unwrap_or_default().into());
        app.set_loading(self.loading.is_some());
        app.set_loading_text(self.loading.unwrap_or_default().into());
        app.set_empty_message(self.empty_message.into());

        app.set_books(ModelRc::new(VecModel::from(self.books)));

        app.set_has_detail(self.detail.is_some());
        app.set_detail(self.detail.unwrap_or_default());
        match self.borrow_action {
            Some(action) => {
                app.set_borrow_label(action.label().into());
                app.set_borrow_is_button(action.is_button());
                app.set_borrow_is_return(action == BorrowAction::Return);
            }
            None => {
                app.set_borrow_label("".into());
                app.set_borrow_is_button(false);
                app.set_borrow_is_return(false);
            }
        }

        app.set_my_books(ModelRc::new(VecModel::from(self.my_books)));
        app.set_borrowed_books(ModelRc::new(VecModel::from(self.borrowed_books)));
        app.set_form_heading(self.form_heading.into());

        match self.inputs {
            Some(Inputs::Filters { genre, author, year }) => {
                app.set_genre_filter(genre.into());
                app.set_author_filter(author.into());
                app.set_year_filter(year.into());
            }
            Some(Inputs::Form {
                title,
                author,
                genre,
                date,
                copies,
            }) => {
                app.set_form_title(title.into());
                app.set_form_author(author.into());
                app.set_form_genre(genre.into());
                app.set_form_date(date.into());
                app.set_form_copies(copies.into());
                app.set_form_image_path("".into());
            }
            None => {}
        }
    }
}

fn show(app_weak: &slint::Weak<App>, snapshot: Snapshot) {
    if let Err(e) = app_weak.upgrade_in_event_loop(move |app| snapshot.apply(&app)) {
        tracing::error!("Could not update the UI: {}", e);
    }
}

/// Reads the cover picked on the form, if any.
#[cfg(not(target_arch = "wasm32"))]
async fn read_cover(path: &str) -> std::io::Result<Option<common::CoverImage>> {
    if path.trim().is_empty() {
        return Ok(None);
    }
    let path = std::path::Path::new(path.trim());
    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "cover".to_string());
    Ok(Some(common::CoverImage::new(file_name, bytes)))
}

#[cfg(target_arch = "wasm32")]
async fn read_cover(path: &str) -> std::io::Result<Option<common::CoverImage>> {
    if !path.trim().is_empty() {
        tracing::warn!("Cover images from file paths are not supported in the browser");
    }
    Ok(None)
}

pub fn run() -> anyhow::Result<()> {
    // For native builds, requests run on a tokio runtime entered for the
    // lifetime of the UI.
    #[cfg(not(target_arch = "wasm32"))]
    let tokio_runtime = tokio::runtime::Runtime::new()?;
    #[cfg(not(target_arch = "wasm32"))]
    let _runtime_guard = tokio_runtime.enter();

    let config = FrontendConfig::from_env().unwrap_or_else(|e| {
        tracing::warn!("Falling back to default configuration: {}", e);
        FrontendConfig::default()
    });
    let state: SharedFrontend = Arc::new(Mutex::new(Frontend::new(config)?));

    let app = App::new()?;
    app.set_app_title(pages::APP_TITLE.into());
    app.set_delete_question(DELETE_CONFIRMATION.into());

    // --- Navigation ---
    let app_weak = app.as_weak();
    let state_clone = state.clone();
    app.on_navigate(move |path| {
        let app_weak = app_weak.clone();
        let state = state_clone.clone();
        spawn(async move {
            let mut frontend = state.lock().await;
            frontend.open(&path, &app_weak).await;
        });
    });

    let app_weak = app.as_weak();
    let state_clone = state.clone();
    app.on_logout(move || {
        let app_weak = app_weak.clone();
        let state = state_clone.clone();
        spawn(async move {
            let mut frontend = state.lock().await;
            if let Err(e) = frontend.session.logout() {
                tracing::error!("Error clearing the stored session: {}", e);
            }
            frontend.open("/", &app_weak).await;
        });
    });

    // --- Home filters ---
    let app_weak = app.as_weak();
    let state_clone = state.clone();
    app.on_filters_changed(move || {
        let Some(app) = app_weak.upgrade() else {
            return;
        };
        let genre = app.get_genre_filter().to_string();
        let author = app.get_author_filter().to_string();
        let year = app.get_year_filter().to_string();
        let app_weak = app_weak.clone();
        let state = state_clone.clone();
        spawn(async move {
            let mut frontend = state.lock().await;
            frontend.home.set_genre(&genre);
            frontend.home.set_author(&author);
            frontend.home.set_year_input(&year);
            show(&app_weak, frontend.snapshot());
        });
    });

    // --- Borrowing ---
    let app_weak = app.as_weak();
    let state_clone = state.clone();
    app.on_borrow(move || {
        let app_weak = app_weak.clone();
        let state = state_clone.clone();
        spawn(async move {
            let mut frontend = state.lock().await;
            let api = frontend.session.api().clone();
            frontend.details.borrow(&api).await;
            show(&app_weak, frontend.snapshot());
        });
    });

    let app_weak = app.as_weak();
    let state_clone = state.clone();
    app.on_give_back(move || {
        let app_weak = app_weak.clone();
        let state = state_clone.clone();
        spawn(async move {
            let mut frontend = state.lock().await;
            let api = frontend.session.api().clone();
            frontend.details.return_book(&api).await;
            show(&app_weak, frontend.snapshot());
        });
    });

    let app_weak = app.as_weak();
    let state_clone = state.clone();
    app.on_give_back_borrowed(move |book_id| {
        let app_weak = app_weak.clone();
        let state = state_clone.clone();
        spawn(async move {
            let mut frontend = state.lock().await;
            let api = frontend.session.api().clone();
            frontend.borrowed.return_book(&api, &book_id).await;
            show(&app_weak, frontend.snapshot());
        });
    });

    // --- Managing own books ---
    let app_weak = app.as_weak();
    let state_clone = state.clone();
    app.on_delete_book(move |book_id| {
        let app_weak = app_weak.clone();
        let state = state_clone.clone();
        spawn(async move {
            let mut frontend = state.lock().await;
            let api = frontend.session.api().clone();
            frontend.my_books.delete(&api, &book_id).await;
            show(&app_weak, frontend.snapshot());
        });
    });

    let app_weak = app.as_weak();
    let state_clone = state.clone();
    app.on_submit_book(move || {
        let Some(app) = app_weak.upgrade() else {
            return;
        };
        let title = app.get_form_title().to_string();
        let author = app.get_form_author().to_string();
        let genre = app.get_form_genre().to_string();
        let date = app.get_form_date().to_string();
        let copies = app.get_form_copies().to_string();
        let image_path = app.get_form_image_path().to_string();
        let app_weak = app_weak.clone();
        let state = state_clone.clone();
        spawn(async move {
            let mut guard = state.lock().await;
            let frontend = &mut *guard;
            frontend.form.form.title = title;
            frontend.form.form.author = author;
            frontend.form.form.genre = genre;
            frontend.form.form.publication_date = date;
            frontend.form.set_available_copies_input(&copies);

            match read_cover(&image_path).await {
                Ok(image) => frontend.form.set_image(image),
                Err(e) => {
                    tracing::warn!("Could not read cover image {}: {}", image_path, e);
                    frontend.form.error = Some("Could not read the cover image".to_string());
                    show(&app_weak, frontend.snapshot());
                    return;
                }
            }

            frontend.form.submitting = true;
            show(&app_weak, frontend.snapshot());
            let api = frontend.session.api().clone();
            if frontend.form.submit(&api).await {
                frontend.open(&Route::MyBooks.path(), &app_weak).await;
            } else {
                show(&app_weak, frontend.snapshot());
            }
        });
    });

    // --- Auth ---
    let app_weak = app.as_weak();
    let state_clone = state.clone();
    app.on_submit_login(move || {
        let Some(app) = app_weak.upgrade() else {
            return;
        };
        let email = app.get_login_email().to_string();
        let password = app.get_login_password().to_string();
        let app_weak = app_weak.clone();
        let state = state_clone.clone();
        spawn(async move {
            let mut guard = state.lock().await;
            let frontend = &mut *guard;
            frontend.login.email = email;
            frontend.login.password = password;
            if frontend.login.submit(&mut frontend.session).await {
                frontend.open("/", &app_weak).await;
            } else {
                show(&app_weak, frontend.snapshot());
            }
        });
    });

    let app_weak = app.as_weak();
    let state_clone = state.clone();
    app.on_submit_register(move || {
        let Some(app) = app_weak.upgrade() else {
            return;
        };
        let username = app.get_register_username().to_string();
        let email = app.get_register_email().to_string();
        let password = app.get_register_password().to_string();
        let app_weak = app_weak.clone();
        let state = state_clone.clone();
        spawn(async move {
            let mut guard = state.lock().await;
            let frontend = &mut *guard;
            frontend.register.username = username;
            frontend.register.email = email;
            frontend.register.password = password;
            if frontend.register.submit(&mut frontend.session).await {
                frontend.open("/", &app_weak).await;
            } else {
                show(&app_weak, frontend.snapshot());
            }
        });
    });

    // Initial fetch of the catalogue
    app.invoke_navigate("/".into());

    app.run()?;
    Ok(())
}
