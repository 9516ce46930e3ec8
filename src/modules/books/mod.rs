pub mod error;
pub mod handlers;
pub mod models;
pub mod payload;
pub mod repository;
pub mod usecase;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use bookshelf_kernel::{InitCtx, Module};
use serde_json::json;

pub use error::BookError;
pub use handlers::BookHandler;
pub use models::Book;
pub use repository::{BookRepository, InMemoryBookRepository};
pub use usecase::{BookService, BookUsecase};

/// Books module: CRUD over the `/books` resource
pub struct BooksModule {
    usecase: Arc<dyn BookUsecase>,
}

impl BooksModule {
    pub fn new(usecase: Arc<dyn BookUsecase>) -> Self {
        Self { usecase }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        BookHandler::new(Arc::clone(&self.usecase)).router()
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(openapi_fragment())
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

fn error_response(description: &str) -> serde_json::Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/ErrorResponse" }
            }
        }
    })
}

fn raw_error_response(description: &str) -> serde_json::Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "type": "object" }
            }
        }
    })
}

fn book_response(description: &str) -> serde_json::Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/Book" }
            }
        }
    })
}

fn openapi_fragment() -> serde_json::Value {
    let book_body = json!({
        "description": "Book payload",
        "required": true,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/Book" }
            }
        }
    });
    let id_param = json!({
        "name": "id",
        "in": "path",
        "required": true,
        "description": "Book ID",
        "schema": { "type": "integer", "format": "int64" }
    });

    json!({
        "paths": {
            "/books": {
                "get": {
                    "summary": "Get all books",
                    "description": "Retrieve a list of all books",
                    "tags": ["books"],
                    "responses": {
                        "200": {
                            "description": "List of books",
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "array",
                                        "items": { "$ref": "#/components/schemas/Book" }
                                    }
                                }
                            }
                        },
                        "500": raw_error_response("Business layer failure")
                    }
                },
                "post": {
                    "summary": "Create a new book",
                    "description": "Create a new book with the input payload",
                    "tags": ["books"],
                    "requestBody": book_body.clone(),
                    "responses": {
                        "201": book_response("Created book"),
                        "400": error_response("Invalid input"),
                        "500": raw_error_response("Business layer failure")
                    }
                }
            },
            "/books/{id}": {
                "get": {
                    "summary": "Get book by ID",
                    "description": "Get a single book by its ID",
                    "tags": ["books"],
                    "parameters": [id_param.clone()],
                    "responses": {
                        "200": book_response("The book"),
                        "400": error_response("Invalid ID"),
                        "404": error_response("Book not found"),
                        "500": raw_error_response("Business layer failure")
                    }
                },
                "put": {
                    "summary": "Update a book",
                    "description": "Update a book's information by its ID",
                    "tags": ["books"],
                    "parameters": [id_param.clone()],
                    "requestBody": book_body,
                    "responses": {
                        "200": book_response("Updated book"),
                        "400": raw_error_response("Invalid ID or undecodable body"),
                        "500": raw_error_response("Business layer failure")
                    }
                },
                "delete": {
                    "summary": "Delete a book",
                    "description": "Delete a book by its ID",
                    "tags": ["books"],
                    "parameters": [id_param],
                    "responses": {
                        "204": { "description": "Book deleted" },
                        "400": error_response("Invalid ID"),
                        "500": raw_error_response("Business layer failure")
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Book": {
                    "type": "object",
                    "properties": {
                        "id": {
                            "type": "integer",
                            "format": "int64",
                            "description": "Server-assigned identifier"
                        },
                        "title": {
                            "type": "string",
                            "description": "Title of the book"
                        },
                        "author": {
                            "type": "string",
                            "description": "Author of the book"
                        }
                    },
                    "additionalProperties": true
                }
            }
        }
    })
}

/// Books module backed by the in-memory repository
pub fn create_module() -> Arc<dyn Module> {
    let repository = Arc::new(InMemoryBookRepository::new());
    let usecase: Arc<dyn BookUsecase> = Arc::new(BookService::new(repository));
    Arc::new(BooksModule::new(usecase))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_fragment_covers_every_operation() {
        let fragment = openapi_fragment();
        let paths = &fragment["paths"];

        for (path, method) in [
            ("/books", "get"),
            ("/books", "post"),
            ("/books/{id}", "get"),
            ("/books/{id}", "put"),
            ("/books/{id}", "delete"),
        ] {
            assert!(paths[path][method].is_object(), "{method} {path} missing");
        }
        assert!(fragment["components"]["schemas"]["Book"].is_object());
    }
}
