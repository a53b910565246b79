use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::{web, Error, HttpResponse};
use serde_derive::Serialize;

/// Envelope shared by every endpoint.
#[derive(Serialize)]
pub struct JsonResponse<T> {
    pub(crate) message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) item: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) list: Option<Vec<T>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) errors: Option<serde_json::Value>,
}

pub struct JsonResponseBuilder<T>
where
    T: serde::Serialize,
{
    message: String,
    code: Option<String>,
    id: Option<i32>,
    item: Option<T>,
    list: Option<Vec<T>>,
    errors: Option<serde_json::Value>,
}

impl<T> Default for JsonResponseBuilder<T>
where
    T: serde::Serialize,
{
    fn default() -> Self {
        Self {
            message: String::new(),
            code: None,
            id: None,
            item: None,
            list: None,
            errors: None,
        }
    }
}

impl<T> JsonResponseBuilder<T>
where
    T: serde::Serialize,
{
    pub(crate) fn set_msg<I: Into<String>>(mut self, msg: I) -> Self {
        self.message = msg.into();
        self
    }

    pub(crate) fn set_id(mut self, id: i32) -> Self {
        self.id = Some(id);
        self
    }

    pub(crate) fn set_item(mut self, item: T) -> Self {
        self.item = Some(item);
        self
    }

    pub(crate) fn set_list(mut self, list: Vec<T>) -> Self {
        self.list = Some(list);
        self
    }

    fn to_json_response(self) -> JsonResponse<T> {
        JsonResponse {
            message: self.message,
            code: self.code,
            id: self.id,
            item: self.item,
            list: self.list,
            errors: self.errors,
        }
    }

    pub(crate) fn ok<I: Into<String>>(self, msg: I) -> web::Json<JsonResponse<T>> {
        web::Json(self.set_msg(msg).to_json_response())
    }

    pub(crate) fn created<I: Into<String>>(self, msg: I) -> HttpResponse {
        HttpResponse::Created().json(self.set_msg(msg).to_json_response())
    }

    pub(crate) fn error<I: Into<String>>(mut self, status: StatusCode, code: &str, msg: I) -> Error {
        let msg = msg.into();
        self.code = Some(code.to_string());
        let body = self.set_msg(msg.clone()).to_json_response();

        InternalError::from_response(msg, HttpResponse::build(status).json(body)).into()
    }

    pub(crate) fn bad_request<I: Into<String>>(self, msg: I) -> Error {
        self.error(StatusCode::BAD_REQUEST, "invalid", msg)
    }

    /// 400 with the validation errors both flattened into `message` and
    /// kept as a document under `errors`.
    pub(crate) fn form_error<E: serde::Serialize>(mut self, errors: &E) -> Error {
        let errors = serde_json::to_value(errors).unwrap_or_default();
        let mut lines = vec![];
        flatten_errors("", &errors, &mut lines);
        let msg = match lines.is_empty() {
            true => "Invalid input".to_string(),
            false => lines.join("; "),
        };
        self.errors = Some(errors);

        self.error(StatusCode::BAD_REQUEST, "invalid", msg)
    }

    pub(crate) fn unauthorized<I: Into<String>>(self, msg: I) -> Error {
        self.error(StatusCode::UNAUTHORIZED, "not_authenticated", msg)
    }

    pub(crate) fn forbidden<I: Into<String>>(self, msg: I) -> Error {
        self.error(StatusCode::FORBIDDEN, "permission_denied", msg)
    }

    pub(crate) fn not_found<I: Into<String>>(self, msg: I) -> Error {
        self.error(StatusCode::NOT_FOUND, "not_found", msg)
    }

    pub(crate) fn internal_server_error<I: Into<String>>(self, msg: I) -> Error {
        let msg = msg.into();
        let msg = if msg.trim().is_empty() {
            String::from("Internal error")
        } else {
            msg
        };

        self.error(StatusCode::INTERNAL_SERVER_ERROR, "server_error", msg)
    }
}

// {"errors": [..], "properties": {"rate": {"errors": [..]}}} -> "rate: .."
fn flatten_errors(path: &str, errors: &serde_json::Value, lines: &mut Vec<String>) {
    let messages = errors.get("errors").and_then(serde_json::Value::as_array);
    for message in messages.into_iter().flatten().filter_map(serde_json::Value::as_str) {
        match path.is_empty() {
            true => lines.push(message.to_string()),
            false => lines.push(format!("{}: {}", path, message)),
        }
    }

    for nested in ["properties", "items"] {
        let children = errors.get(nested).and_then(serde_json::Value::as_object);
        for (name, child) in children.into_iter().flatten() {
            let path = match path.is_empty() {
                true => name.clone(),
                false => format!("{}.{}", path, name),
            };
            flatten_errors(&path, child, lines);
        }
    }
}

impl<T> JsonResponse<T>
where
    T: serde::Serialize,
{
    pub(crate) fn build() -> JsonResponseBuilder<T> {
        JsonResponseBuilder::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[derive(serde::Serialize)]
    struct Item {
        id: i32,
    }

    #[test]
    fn ok_response_skips_empty_fields() {
        let response = JsonResponse::build().set_item(Item { id: 3 }).ok("OK");
        let body = serde_json::to_value(&response.0).unwrap();

        assert_eq!(body, serde_json::json!({"message": "OK", "item": {"id": 3}}));
    }

    #[actix_web::test]
    async fn forbidden_carries_status_and_code() {
        let err = JsonResponse::<Item>::build().forbidden("nope");
        let response = err.error_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let bytes = to_bytes(response.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], "permission_denied");
        assert_eq!(body["message"], "nope");
    }

    #[actix_web::test]
    async fn form_error_flattens_field_messages() {
        let errors = serde_json::json!({
            "errors": [],
            "properties": {"rate": {"errors": ["\"7\" is not a valid choice."]}}
        });
        let err = JsonResponse::<Item>::build().form_error(&errors);
        assert_eq!(err.to_string(), "rate: \"7\" is not a valid choice.");

        let response = err.error_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], "invalid");
        assert_eq!(body["errors"], errors);
    }

    #[test]
    fn form_error_without_messages_is_generic() {
        let err = JsonResponse::<Item>::build().form_error(&serde_json::json!({"errors": []}));
        assert_eq!(err.to_string(), "Invalid input");
    }

    #[test]
    fn empty_internal_error_message_gets_default() {
        let err = JsonResponse::<Item>::build().internal_server_error("");
        assert_eq!(err.to_string(), "Internal error");
        assert_eq!(
            err.as_response_error().status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
