use axum::{
    body::HttpBody,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};

use super::models::Book;

/// JSON book body where an empty body binds to `Book::default()`.
///
/// Non-empty bodies go through `Json<Book>`, so a missing JSON content type
/// or undecodable payload is still rejected.
pub struct BookPayload(pub Book);

impl<S> FromRequest<S> for BookPayload
where
    S: Send + Sync,
{
    type Rejection = JsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if req.body().size_hint().exact() == Some(0) {
            return Ok(BookPayload(Book::default()));
        }

        let Json(book) = Json::<Book>::from_request(req, state).await?;
        Ok(BookPayload(book))
    }
}
