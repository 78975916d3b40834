use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use foodgram_shopping::{DOCUMENT_CONTENT_TYPE, DOCUMENT_FILENAME, ShoppingList};
use serde_json::json;

pub const EMPTY_CART_DETAIL: &str = "shopping cart is empty";

/// Download response for an aggregated shopping list.
pub struct ShoppingListDocument(pub ShoppingList);

impl IntoResponse for ShoppingListDocument {
    fn into_response(self) -> Response {
        match self.0 {
            ShoppingList::Empty => {
                (StatusCode::OK, Json(json!({ "detail": EMPTY_CART_DETAIL }))).into_response()
            }
            ShoppingList::Ready { document, .. } => (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, DOCUMENT_CONTENT_TYPE.to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{DOCUMENT_FILENAME}\""),
                    ),
                ],
                document,
            )
                .into_response(),
        }
    }
}
