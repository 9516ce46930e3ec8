use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use bookshelf_http::ApiError;
use serde_json::json;

use super::models::Book;
use super::payload::BookPayload;
use super::usecase::BookUsecase;

const INVALID_INPUT: &str = "Invalid input";
const INVALID_ID: &str = "Invalid ID";
const BOOK_NOT_FOUND: &str = "Book not found";

/// HTTP handler set for books, bound to one usecase.
///
/// Handlers only check that the id parses and the body decodes; everything
/// else is the usecase's decision.
#[derive(Clone)]
pub struct BookHandler {
    usecase: Arc<dyn BookUsecase>,
}

impl BookHandler {
    pub fn new(usecase: Arc<dyn BookUsecase>) -> Self {
        Self { usecase }
    }

    /// Routes for `/books` and `/books/{id}`, with this handler as state
    pub fn router(self) -> Router {
        Router::new()
            .route("/books", get(list_books).post(create_book))
            .route(
                "/books/{id}",
                get(get_book).put(update_book).delete(delete_book),
            )
            .with_state(self)
    }
}

/// Path id as a signed integer; negative ids are passed through like any
/// other id that is not stored.
fn parse_id(path: Result<Path<String>, PathRejection>) -> Result<i64, ApiError> {
    let Path(raw) = path.map_err(|rejection| {
        tracing::debug!(error = %rejection, "rejecting undecodable book id");
        ApiError::bad_request(INVALID_ID)
    })?;

    raw.parse::<i64>().map_err(|_| {
        tracing::debug!(raw_id = %raw, "rejecting non-numeric book id");
        ApiError::bad_request(INVALID_ID)
    })
}

async fn create_book(
    State(handler): State<BookHandler>,
    payload: Result<BookPayload, JsonRejection>,
) -> Result<(StatusCode, Json<Book>), ApiError> {
    let BookPayload(book) = payload.map_err(|_| ApiError::bad_request(INVALID_INPUT))?;

    let book = handler
        .usecase
        .create(book)
        .await
        .map_err(ApiError::downstream)?;

    Ok((StatusCode::CREATED, Json(book)))
}

async fn list_books(State(handler): State<BookHandler>) -> Result<Json<Vec<Book>>, ApiError> {
    let books = handler.usecase.get_all().await.map_err(ApiError::downstream)?;
    Ok(Json(books))
}

async fn get_book(
    State(handler): State<BookHandler>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Book>, ApiError> {
    let id = parse_id(path)?;

    match handler
        .usecase
        .get_by_id(id)
        .await
        .map_err(ApiError::downstream)?
    {
        Some(book) => Ok(Json(book)),
        None => Err(ApiError::not_found(BOOK_NOT_FOUND)),
    }
}

async fn update_book(
    State(handler): State<BookHandler>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<BookPayload, JsonRejection>,
) -> Result<Json<Book>, ApiError> {
    let id = parse_id(path)?;

    // Bad bodies report the decoder's message rather than INVALID_INPUT.
    let BookPayload(mut book) = payload
        .map_err(|rejection| ApiError::malformed(json!({ "message": rejection.body_text() })))?;

    book.id = id;

    let book = handler
        .usecase
        .update(book)
        .await
        .map_err(ApiError::downstream)?;

    Ok(Json(book))
}

async fn delete_book(
    State(handler): State<BookHandler>,
    path: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(path)?;

    handler
        .usecase
        .delete(id)
        .await
        .map_err(ApiError::downstream)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Result<i64, ApiError> {
        parse_id(Ok(Path(raw.to_string())))
    }

    #[test]
    fn parse_id_accepts_signed_integers() {
        assert_eq!(parse("42").unwrap(), 42);
        assert_eq!(parse("+7").unwrap(), 7);
        assert_eq!(parse("-1").unwrap(), -1);
        assert_eq!(parse("9223372036854775807").unwrap(), i64::MAX);
    }

    #[test]
    fn parse_id_rejects_everything_else() {
        for raw in ["abc", "", "1.5", "9223372036854775808", "18446744073709551615"] {
            assert!(
                matches!(parse(raw), Err(ApiError::BadRequest { .. })),
                "{raw:?} should be rejected"
            );
        }
    }
}
