pub mod catalog;
pub mod handlers;
pub mod id;
pub mod models;

use async_trait::async_trait;
use axum::{routing::any, Router};
use readinglist_kernel::{InitCtx, Module};

use handlers::{book_item, books_collection, BooksState};

/// Reading list books: list, create, fetch, update, delete
pub struct BooksModule;

impl BooksModule {
    pub const fn new() -> Self {
        Self
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
            decode_mode = ?ctx.settings.books.decode_mode,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self, ctx: &InitCtx<'_>) -> Router {
        let state = BooksState {
            decode_mode: ctx.settings.books.decode_mode,
        };

        // Methods are dispatched inside the handlers so unsupported verbs get a text 405.
        // The whole `/books/` subtree reaches `book_item`, which rejects anything but one integer.
        Router::new()
            .route("/books", any(books_collection))
            .route("/books/", any(book_item))
            .route("/books/{*id}", any(book_item))
            .with_state(state)
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let text_ok = serde_json::json!({
            "description": "OK",
            "content": { "text/plain": { "schema": { "type": "string" } } }
        });
        let bad_id = serde_json::json!({
            "description": "Malformed id",
            "content": { "text/plain": { "schema": { "type": "string" } } }
        });
        let id_param = serde_json::json!([{
            "name": "id",
            "in": "path",
            "required": true,
            "description": "Book id; 0x, 0o and 0b prefixes are accepted",
            "schema": { "type": "integer", "format": "int64" }
        }]);

        Some(serde_json::json!({
            "paths": {
                "/books": {
                    "get": {
                        "summary": "List books",
                        "tags": ["Books"],
                        "responses": {
                            "200": {
                                "description": "Reading list",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "object",
                                            "properties": {
                                                "books": {
                                                    "type": "array",
                                                    "items": { "$ref": "#/components/schemas/Book" }
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "post": {
                        "summary": "Add a book",
                        "tags": ["Books"],
                        "requestBody": {
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/CreateBook" }
                                }
                            }
                        },
                        "responses": { "200": text_ok.clone() }
                    }
                },
                "/books/{id}": {
                    "get": {
                        "summary": "Fetch a book",
                        "tags": ["Books"],
                        "parameters": id_param.clone(),
                        "responses": {
                            "200": {
                                "description": "Book",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "object",
                                            "properties": {
                                                "book": { "$ref": "#/components/schemas/Book" }
                                            }
                                        }
                                    }
                                }
                            },
                            "400": bad_id.clone()
                        }
                    },
                    "put": {
                        "summary": "Update a book",
                        "tags": ["Books"],
                        "parameters": id_param.clone(),
                        "requestBody": {
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/UpdateBook" }
                                }
                            }
                        },
                        "responses": { "200": text_ok.clone(), "400": bad_id.clone() }
                    },
                    "delete": {
                        "summary": "Delete a book",
                        "tags": ["Books"],
                        "parameters": id_param,
                        "responses": { "200": text_ok, "400": bad_id }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer", "format": "int64" },
                            "createdAt": { "type": "string", "format": "date-time" },
                            "title": { "type": "string" },
                            "published": { "type": "integer" },
                            "pages": { "type": "integer" },
                            "genres": { "type": "array", "items": { "type": "string" } },
                            "rating": { "type": "number" },
                            "version": { "type": "integer" }
                        },
                        "required": ["id", "createdAt", "title", "published", "pages", "genres", "version"]
                    },
                    "CreateBook": {
                        "type": "object",
                        "properties": {
                            "title": { "type": "string" },
                            "published": { "type": "integer" },
                            "pages": { "type": "integer" },
                            "genres": { "type": "array", "items": { "type": "string" } },
                            "rating": { "type": "number" }
                        }
                    },
                    "UpdateBook": {
                        "type": "object",
                        "description": "Absent fields are left untouched; an empty genres list is ignored",
                        "properties": {
                            "title": { "type": ["string", "null"] },
                            "published": { "type": ["integer", "null"] },
                            "pages": { "type": ["integer", "null"] },
                            "genres": { "type": ["array", "null"], "items": { "type": "string" } },
                            "rating": { "type": ["number", "null"] }
                        }
                    }
                }
            }
        }))
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create a new instance of the books module
pub fn create_module() -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(BooksModule::new())
}
