// client/tests/helpers.rs
//
// A small in-memory stand-in for the library REST API, served by axum on an
// ephemeral port so the tests exercise the real reqwest client.
#![allow(dead_code)]

use axum::{
    extract::{Multipart, Path, State},
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use client::ApiClient;
use common::{AuthResponse, BookDto, Borrower, BorrowerSummary, Credentials, RegisterPayload, UserDto};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::sync::Notify;

#[derive(Clone, Debug)]
pub struct MockUser {
    pub user: UserDto,
    pub password: String,
}

#[derive(Clone, Debug)]
pub struct StoredBook {
    pub book: BookDto,
    pub owner: String,
}

/// A cover image as the mock received it.
#[derive(Clone, Debug, PartialEq)]
pub struct ReceivedImage {
    pub file_name: String,
    pub content_type: String,
    pub len: usize,
}

/// Everything a multipart book request carried, for assertions.
#[derive(Clone, Debug, Default)]
pub struct ReceivedForm {
    pub fields: HashMap<String, String>,
    pub image: Option<ReceivedImage>,
}

#[derive(Default, Debug)]
pub struct MockLibrary {
    pub users: Vec<MockUser>,
    pub books: Vec<StoredBook>,
    pub tokens: HashMap<String, String>,
    pub received_forms: Vec<ReceivedForm>,
    /// When set, every route answers with this status and message.
    pub failure: Option<(StatusCode, Option<String>)>,
    /// When set, book reads wait for this before answering.
    pub hold: Option<Arc<Notify>>,
}

pub type SharedLibrary = Arc<Mutex<MockLibrary>>;

type ApiError = (StatusCode, Json<Value>);
type ApiResult<T> = Result<T, ApiError>;

fn api_error(status: StatusCode, message: &str) -> ApiError {
    (status, Json(json!({ "message": message })))
}

fn check_failure(library: &MockLibrary) -> ApiResult<()> {
    match &library.failure {
        Some((status, Some(message))) => Err(api_error(*status, message)),
        Some((status, None)) => Err((*status, Json(json!({})))),
        None => Ok(()),
    }
}

fn authenticate(library: &MockLibrary, headers: &HeaderMap) -> ApiResult<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .and_then(|token| library.tokens.get(token))
        .cloned()
        .ok_or_else(|| api_error(StatusCode::UNAUTHORIZED, "No token, authorization denied"))
}

fn find_book<'a>(library: &'a mut MockLibrary, id: &str) -> ApiResult<&'a mut StoredBook> {
    library
        .books
        .iter_mut()
        .find(|stored| stored.book.id == id)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "Book not found"))
}

// --- Seeding ---

pub fn seed_user(library: &SharedLibrary, username: &str, email: &str, password: &str) -> (UserDto, String) {
    let mut library = library.lock().unwrap();
    let user = UserDto {
        id: uuid::Uuid::new_v4().simple().to_string(),
        username: username.to_string(),
        email: email.to_string(),
    };
    let token = uuid::Uuid::new_v4().to_string();
    library.tokens.insert(token.clone(), user.id.clone());
    library.users.push(MockUser {
        user: user.clone(),
        password: password.to_string(),
    });
    (user, token)
}

pub fn seed_book(
    library: &SharedLibrary,
    owner: &str,
    title: &str,
    author: &str,
    genre: &str,
    publication_date: &str,
    available_copies: u32,
) -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    library.lock().unwrap().books.push(StoredBook {
        book: BookDto {
            id: id.clone(),
            title: title.to_string(),
            author: author.to_string(),
            genre: genre.to_string(),
            publication_date: publication_date.to_string(),
            available_copies,
            image_url: None,
            borrowed_by: vec![],
            available: None,
            description: None,
        },
        owner: owner.to_string(),
    });
    id
}

pub fn stored_book(library: &SharedLibrary, id: &str) -> Option<BookDto> {
    library
        .lock()
        .unwrap()
        .books
        .iter()
        .find(|stored| stored.book.id == id)
        .map(|stored| stored.book.clone())
}

// --- Handlers ---

async fn register(
    State(library): State<SharedLibrary>,
    Json(payload): Json<RegisterPayload>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    {
        let library = library.lock().unwrap();
        check_failure(&library)?;
        if library.users.iter().any(|u| u.user.email == payload.email) {
            return Err(api_error(StatusCode::BAD_REQUEST, "User already exists"));
        }
    }
    let (user, token) = seed_user(&library, &payload.username, &payload.email, &payload.password);
    Ok((StatusCode::CREATED, Json(AuthResponse { token, user })))
}

async fn login(
    State(library): State<SharedLibrary>,
    Json(credentials): Json<Credentials>,
) -> ApiResult<Json<AuthResponse>> {
    let mut library = library.lock().unwrap();
    check_failure(&library)?;
    let user = library
        .users
        .iter()
        .find(|u| u.user.email == credentials.email && u.password == credentials.password)
        .map(|u| u.user.clone())
        .ok_or_else(|| api_error(StatusCode::UNAUTHORIZED, "Invalid credentials"))?;
    let token = uuid::Uuid::new_v4().to_string();
    library.tokens.insert(token.clone(), user.id.clone());
    Ok(Json(AuthResponse { token, user }))
}

async fn wait_for_release(library: &SharedLibrary) {
    let hold = library.lock().unwrap().hold.clone();
    if let Some(gate) = hold {
        gate.notified().await;
    }
}

async fn list_books(State(library): State<SharedLibrary>) -> ApiResult<Json<Vec<BookDto>>> {
    wait_for_release(&library).await;
    let library = library.lock().unwrap();
    check_failure(&library)?;
    Ok(Json(library.books.iter().map(|s| s.book.clone()).collect()))
}

async fn get_book(
    State(library): State<SharedLibrary>,
    Path(id): Path<String>,
) -> ApiResult<Json<BookDto>> {
    wait_for_release(&library).await;
    let mut library = library.lock().unwrap();
    check_failure(&library)?;
    Ok(Json(find_book(&mut library, &id)?.book.clone()))
}

async fn my_created_books(
    State(library): State<SharedLibrary>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<BookDto>>> {
    let library = library.lock().unwrap();
    check_failure(&library)?;
    let user_id = authenticate(&library, &headers)?;

    // Borrowers are populated on this route only.
    let populate = |borrower: &Borrower| {
        let id = borrower.id().to_string();
        match library.users.iter().find(|u| u.user.id == id) {
            Some(u) => Borrower::User(BorrowerSummary {
                id,
                name: Some(u.user.username.clone()),
                email: Some(u.user.email.clone()),
            }),
            None => Borrower::Id(id),
        }
    };
    let books = library
        .books
        .iter()
        .filter(|s| s.owner == user_id)
        .map(|s| BookDto {
            borrowed_by: s.book.borrowed_by.iter().map(&populate).collect(),
            ..s.book.clone()
        })
        .collect();
    Ok(Json(books))
}

async fn my_borrowed_books(
    State(library): State<SharedLibrary>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<BookDto>>> {
    let library = library.lock().unwrap();
    check_failure(&library)?;
    let user_id = authenticate(&library, &headers)?;
    Ok(Json(
        library
            .books
            .iter()
            .filter(|s| s.book.is_borrowed_by(&user_id))
            .map(|s| s.book.clone())
            .collect(),
    ))
}

async fn read_form(mut multipart: Multipart) -> ApiResult<ReceivedForm> {
    let mut form = ReceivedForm::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, &e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "image" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| api_error(StatusCode::BAD_REQUEST, &e.to_string()))?;
            form.image = Some(ReceivedImage {
                file_name,
                content_type,
                len: bytes.len(),
            });
        } else {
            let text = field
                .text()
                .await
                .map_err(|e| api_error(StatusCode::BAD_REQUEST, &e.to_string()))?;
            form.fields.insert(name, text);
        }
    }
    Ok(form)
}

fn apply_form(book: &mut BookDto, form: &ReceivedForm) -> ApiResult<()> {
    let field = |name: &str| {
        form.fields
            .get(name)
            .cloned()
            .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, &format!("Missing {name}")))
    };
    book.title = field("title")?;
    book.author = field("author")?;
    book.genre = field("genre")?;
    book.publication_date = field("publicationDate")?;
    book.available_copies = field("availableCopies")?
        .parse()
        .map_err(|_| api_error(StatusCode::BAD_REQUEST, "Invalid availableCopies"))?;
    if let Some(image) = &form.image {
        book.image_url = Some(format!("/uploads/{}", image.file_name));
    }
    Ok(())
}

async fn create_book(
    State(library): State<SharedLibrary>,
    headers: HeaderMap,
    multipart: Multipart,
) -> ApiResult<(StatusCode, Json<BookDto>)> {
    let form = read_form(multipart).await?;
    let mut library = library.lock().unwrap();
    check_failure(&library)?;
    let owner = authenticate(&library, &headers)?;

    let mut book = BookDto {
        id: uuid::Uuid::new_v4().simple().to_string(),
        title: String::new(),
        author: String::new(),
        genre: String::new(),
        publication_date: String::new(),
        available_copies: 0,
        image_url: None,
        borrowed_by: vec![],
        available: None,
        description: None,
    };
    apply_form(&mut book, &form)?;
    library.received_forms.push(form);
    library.books.push(StoredBook {
        book: book.clone(),
        owner,
    });
    Ok((StatusCode::CREATED, Json(book)))
}

async fn update_book(
    State(library): State<SharedLibrary>,
    Path(id): Path<String>,
    headers: HeaderMap,
    multipart: Multipart,
) -> ApiResult<Json<BookDto>> {
    let form = read_form(multipart).await?;
    let mut library = library.lock().unwrap();
    check_failure(&library)?;
    let user_id = authenticate(&library, &headers)?;

    let stored = find_book(&mut library, &id)?;
    if stored.owner != user_id {
        return Err(api_error(StatusCode::FORBIDDEN, "Not authorized to update this book"));
    }
    apply_form(&mut stored.book, &form)?;
    let book = stored.book.clone();
    library.received_forms.push(form);
    Ok(Json(book))
}

async fn delete_book(
    State(library): State<SharedLibrary>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> ApiResult<Json<Value>> {
    let mut library = library.lock().unwrap();
    check_failure(&library)?;
    let user_id = authenticate(&library, &headers)?;

    if find_book(&mut library, &id)?.owner != user_id {
        return Err(api_error(StatusCode::FORBIDDEN, "Not authorized to delete this book"));
    }
    library.books.retain(|s| s.book.id != id);
    Ok(Json(json!({ "message": "Book deleted" })))
}

async fn borrow_book(
    State(library): State<SharedLibrary>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> ApiResult<Json<Value>> {
    let mut library = library.lock().unwrap();
    check_failure(&library)?;
    let user_id = authenticate(&library, &headers)?;

    let book = &mut find_book(&mut library, &id)?.book;
    if book.is_borrowed_by(&user_id) {
        return Err(api_error(StatusCode::BAD_REQUEST, "You have already borrowed this book"));
    }
    if book.available_copies == 0 {
        return Err(api_error(StatusCode::BAD_REQUEST, "No copies available"));
    }
    book.available_copies -= 1;
    book.borrowed_by.push(Borrower::Id(user_id));
    Ok(Json(json!({ "message": "Book borrowed" })))
}

async fn return_book(
    State(library): State<SharedLibrary>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> ApiResult<Json<Value>> {
    let mut library = library.lock().unwrap();
    check_failure(&library)?;
    let user_id = authenticate(&library, &headers)?;

    let book = &mut find_book(&mut library, &id)?.book;
    if !book.is_borrowed_by(&user_id) {
        return Err(api_error(StatusCode::BAD_REQUEST, "You have not borrowed this book"));
    }
    book.borrowed_by.retain(|b| b.id() != user_id);
    book.available_copies += 1;
    Ok(Json(json!({ "message": "Book returned" })))
}

pub fn create_router(library: SharedLibrary) -> Router {
    let auth_routes = Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login));

    let book_routes = Router::new()
        .route("/books", get(list_books).post(create_book))
        .route("/books/mycreatedbooks", get(my_created_books))
        .route("/books/myborrowedbooks", get(my_borrowed_books))
        .route("/books/{id}", get(get_book).put(update_book).delete(delete_book))
        .route("/books/{id}/borrow", post(borrow_book))
        .route("/books/{id}/return", post(return_book));

    Router::new()
        .nest("/api", auth_routes.merge(book_routes))
        .with_state(library)
}

/// Spawn the mock API and return its base URL and shared state.
pub async fn spawn_app() -> (String, SharedLibrary) {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();

    let library = SharedLibrary::default();
    let app = create_router(library.clone());

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/api"), library)
}

/// A client already holding a token for a freshly seeded user.
pub fn signed_in_client(base_url: &str, library: &SharedLibrary, username: &str) -> (ApiClient, UserDto) {
    let (user, token) = seed_user(
        library,
        username,
        &format!("{username}@example.com"),
        "password123",
    );
    let api = ApiClient::new(base_url);
    api.set_token(Some(token));
    (api, user)
}
