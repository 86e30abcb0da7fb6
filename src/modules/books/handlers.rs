//! Method dispatch and request handlers for the books routes.

use axum::{
    body::Bytes,
    extract::{OriginalUri, State},
    http::{Method, StatusCode},
    response::Response,
};
use readinglist_http::{read_json, write_json, write_text, AppError, Envelope};
use readinglist_kernel::settings::DecodeMode;

use super::{
    catalog,
    id::extract_id,
    models::{merge, CreateBook, UpdateBook},
};

/// Per-router state captured from settings when routes are built
#[derive(Debug, Clone, Copy)]
pub struct BooksState {
    pub decode_mode: DecodeMode,
}

/// `/v1/books`: GET lists, POST creates.
pub async fn books_collection(
    State(state): State<BooksState>,
    method: Method,
    body: Bytes,
) -> Result<Response, AppError> {
    match method {
        Method::GET => list_books(),
        Method::POST => create_book(state, &body),
        other => Err(AppError::method_not_allowed(other.as_str())),
    }
}

/// `/v1/books/{id}`: GET fetches, PUT updates, DELETE removes.
pub async fn book_item(
    State(state): State<BooksState>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    body: Bytes,
) -> Result<Response, AppError> {
    let path = uri.path();

    match method {
        Method::GET => get_book(path),
        Method::PUT => update_book(state, path, &body),
        Method::DELETE => delete_book(path),
        other => Err(AppError::method_not_allowed(other.as_str())),
    }
}

fn list_books() -> Result<Response, AppError> {
    let books = catalog::reading_list();
    tracing::debug!(count = books.len(), "listing books");

    write_json(StatusCode::OK, &Envelope::new("books", books))
}

// Nothing is stored; the decoded input is echoed back.
fn create_book(state: BooksState, body: &[u8]) -> Result<Response, AppError> {
    let input: CreateBook = read_json(body, state.decode_mode)?;
    tracing::info!(title = %input.title, decode_mode = ?state.decode_mode, "book submitted");

    Ok(write_text(StatusCode::OK, format!("{input}\n")))
}

fn get_book(path: &str) -> Result<Response, AppError> {
    let id = extract_id(path)?;
    tracing::debug!(book_id = id, "fetching book");

    write_json(StatusCode::OK, &Envelope::new("book", catalog::book_with_id(id)))
}

fn update_book(state: BooksState, path: &str, body: &[u8]) -> Result<Response, AppError> {
    let id = extract_id(path)?;
    let patch: UpdateBook = read_json(body, state.decode_mode)?;

    let book = merge(catalog::book_with_id(id), patch);
    tracing::info!(book_id = id, decode_mode = ?state.decode_mode, "book updated");

    Ok(write_text(StatusCode::OK, format!("{book}\n")))
}

fn delete_book(path: &str) -> Result<Response, AppError> {
    let id = extract_id(path)?;
    tracing::info!(book_id = id, "book deleted");

    Ok(write_text(
        StatusCode::OK,
        format!("Delete the book with id: {id}"),
    ))
}
