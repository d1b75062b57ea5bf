use axum::{Router, response::Html, routing::get};

const WELCOME: &str =
    "Welcome to the Products API. Visit <a href=\"/api-docs\">/api-docs</a> for documentation.";

async fn welcome() -> Html<&'static str> {
    Html(WELCOME)
}

pub fn router() -> Router {
    Router::new().route("/", get(welcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_welcome_links_to_docs() {
        let response = router()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response.headers()["content-type"]
                .to_str()
                .unwrap()
                .starts_with("text/html")
        );

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(body.contains("<a href=\"/api-docs\">/api-docs</a>"));
    }
}
