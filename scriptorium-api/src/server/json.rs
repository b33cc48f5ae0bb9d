use crate::server::ServerError;
use axum::{
    Json as AxumJson,
    extract::FromRequest,
    response::{IntoResponse, Response},
};
use axum_extra::TypedHeader;
use headers::ContentType;
use serde::Serialize;
use tracing::trace;

/// JSON body extractor and response. Rejected bodies become
/// [`ServerError::JsonRejection`] replies.
#[derive(FromRequest, Debug, Clone, Copy, Default)]
#[from_request(via(AxumJson), rejection(ServerError))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        match serde_json::to_vec(&self.0) {
            Ok(body) => {
                trace!(len = body.len(), "Serialized JSON response");
                (TypedHeader(ContentType::json()), body).into_response()
            }
            Err(err) => ServerError::JsonResponse(err).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::server::{ErrorResponse, json::Json};
    use axum::{
        body::to_bytes,
        http::{StatusCode, header},
        response::IntoResponse,
    };
    use serde::{Serialize, Serializer, ser::Error};
    use std::collections::BTreeMap;

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("cannot serialize"))
        }
    }

    #[tokio::test]
    async fn replies_with_json_content_type() {
        let response = Json(BTreeMap::from([("summary", "Short.")])).into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], br#"{"summary":"Short."}"#);
    }

    #[tokio::test]
    async fn serialization_failure_is_an_internal_error() {
        let response = Json(Unserializable).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.status, 500);
    }
}
