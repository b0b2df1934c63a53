//! Tests for the HTTP client base, the interceptors and the resource clients

mod support;

use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;

use geodata_marketplace_client::api::interceptor::DEFAULT_CSRF_HEADER;
use geodata_marketplace_client::models::{
    ActivationTokenCommand, CatalogueQuery, RatingCommand, ServerResponse,
};
use geodata_marketplace_client::{
    AccountApi, ApiClient, ApiError, ApiErrorKind, CartApi, CatalogueApi, ClientConfig,
    ConfigurationApi, HttpMethod, RatingApi, RequestBody, SessionStore, TransportResponse,
};

use support::{BASE_URL, MockTransport, envelope};

fn api_with(transport: Arc<MockTransport>, store: &SessionStore) -> ApiClient {
    ApiClient::new(
        &ClientConfig::default().with_base_url(BASE_URL),
        store.clone(),
        transport,
    )
}

mod interceptor_tests {
    use super::*;

    #[tokio::test]
    async fn test_csrf_header_on_mutating_methods_only() {
        let transport = MockTransport::json(200, envelope(json!(null)));
        let store = SessionStore::new();
        store.set_csrf_token(Some("X-XSRF".to_string()), Some("token-1".to_string()));
        let api = api_with(transport.clone(), &store);

        let _: ServerResponse<()> = api.get("/a").await.unwrap().data;
        let _: ServerResponse<()> = api.post("/a", Some(&json!({}))).await.unwrap().data;
        let _: ServerResponse<()> = api.put("/a", &json!({})).await.unwrap().data;
        let _: ServerResponse<()> = api.delete("/a").await.unwrap().data;

        let requests = transport.requests();
        assert_eq!(requests.len(), 4);
        assert_eq!(requests[0].method, HttpMethod::Get);
        assert_eq!(requests[0].header("X-XSRF"), None);
        for request in &requests[1..] {
            assert_eq!(request.header("X-XSRF"), Some("token-1"), "{}", request.method);
        }
    }

    #[tokio::test]
    async fn test_no_csrf_header_without_token() {
        let transport = MockTransport::json(200, envelope(json!(null)));
        let store = SessionStore::new();
        let api = api_with(transport.clone(), &store);

        let _: ServerResponse<()> = api.post("/a", Some(&json!({}))).await.unwrap().data;

        let request = transport.last_request().unwrap();
        assert_eq!(request.header(DEFAULT_CSRF_HEADER), None);
        assert!(request.headers.is_empty());
    }

    #[tokio::test]
    async fn test_bearer_token_on_every_method() {
        let transport = MockTransport::json(200, envelope(json!(null)));
        let store = SessionStore::new();
        store.set_auth_token(Some("jwt".to_string()));
        let api = api_with(transport.clone(), &store);

        let _: ServerResponse<()> = api.get("/a").await.unwrap().data;
        let _: ServerResponse<()> = api.delete("/a").await.unwrap().data;

        for request in transport.requests() {
            assert_eq!(request.header("authorization"), Some("Bearer jwt"));
        }
    }

    #[tokio::test]
    async fn test_store_changes_apply_to_next_request() {
        let transport = MockTransport::json(200, envelope(json!(null)));
        let store = SessionStore::new();
        let api = api_with(transport.clone(), &store);

        let _: ServerResponse<()> = api.get("/a").await.unwrap().data;
        store.set_auth_token(Some("late".to_string()));
        let _: ServerResponse<()> = api.get("/a").await.unwrap().data;
        store.logout();
        let _: ServerResponse<()> = api.get("/a").await.unwrap().data;

        let requests = transport.requests();
        assert_eq!(requests[0].header("Authorization"), None);
        assert_eq!(requests[1].header("Authorization"), Some("Bearer late"));
        assert_eq!(requests[2].header("Authorization"), None);
    }

    #[tokio::test]
    async fn test_submit_sends_form() {
        let transport = MockTransport::json(
            200,
            envelope(json!({"csrfHeader": "X-CSRF-TOKEN", "csrfToken": "next"})),
        );
        let store = SessionStore::new();
        let account = AccountApi::new(api_with(transport.clone(), &store));

        let response = account.login("user@example.com", "secret").await.unwrap();
        assert!(response.success);
        assert_eq!(response.result.unwrap().csrf_token.as_deref(), Some("next"));

        let request = transport.last_request().unwrap();
        assert_eq!(request.url, format!("{}/login", BASE_URL));
        assert_eq!(
            request.header("content-type"),
            Some("application/x-www-form-urlencoded")
        );
        assert_eq!(
            request.body,
            RequestBody::Form(vec![
                ("username".to_string(), "user@example.com".to_string()),
                ("password".to_string(), "secret".to_string()),
            ])
        );
    }
}

mod error_tests {
    use super::*;

    #[tokio::test]
    async fn test_non_2xx_is_response_error() {
        let transport = MockTransport::json(500, json!({"error": "boom"}));
        let api = api_with(transport, &SessionStore::new());

        let err = api.get::<ServerResponse<()>>("/action/cart").await.unwrap_err();
        assert_eq!(err.kind(), ApiErrorKind::Response);
        assert_eq!(err.status(), Some(500));
    }

    #[tokio::test]
    async fn test_transport_error_is_passed_through_unchanged() {
        let original = ApiError::Request {
            method: HttpMethod::Get,
            url: format!("{}/action/cart", BASE_URL),
            message: "connection refused".to_string(),
        };
        let expected = original.clone();
        let transport = MockTransport::new(move |_| Err(original.clone()));
        let cart = CartApi::new(api_with(transport, &SessionStore::new()));

        let err = cart.get_cart().await.unwrap_err();
        assert_eq!(err, expected);
        assert_eq!(err.kind(), ApiErrorKind::Request);
    }

    #[tokio::test]
    async fn test_unparseable_body_is_decode_error() {
        let transport = MockTransport::new(|_| Ok(TransportResponse::new(200, "<html>")));
        let api = api_with(transport, &SessionStore::new());

        let err = api.get::<ServerResponse<()>>("/").await.unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_business_failure_is_not_an_error() {
        let transport = MockTransport::json(
            200,
            json!({
                "messages": [{"code": "BasicMessageCode.Validation", "level": "ERROR"}],
                "result": null,
                "success": false
            }),
        );
        let cart = CartApi::new(api_with(transport, &SessionStore::new()));

        let response = cart.get_cart().await.unwrap();
        assert!(!response.success);
        assert_eq!(response.messages.len(), 1);
    }
}

mod resource_tests {
    use super::*;

    #[tokio::test]
    async fn test_catalogue_find_joins_publishers() {
        let p1 = Uuid::new_v4();
        let p2 = Uuid::new_v4();
        let p1_key = p1.to_string();
        let item = |publisher: Uuid| {
            json!({"id": Uuid::new_v4(), "title": "Roads", "publisherId": publisher, "pricingModels": []})
        };
        let transport = MockTransport::json(
            200,
            json!({
                "messages": [],
                "success": true,
                "result": {
                    "pageRequest": {"page": 0, "size": 10},
                    "count": 2,
                    "items": [item(p1), item(p2)]
                },
                "publishers": {p1_key: {"id": p1, "name": "Acme Geo"}}
            }),
        );
        let catalogue = CatalogueApi::new(api_with(transport.clone(), &SessionStore::new()));

        let response = catalogue.find("roads").await.unwrap();
        let items = response.result.unwrap().items;
        assert_eq!(items[0].publisher.as_ref().unwrap().id, p1);
        assert!(items[1].publisher.is_none());

        let request = transport.last_request().unwrap();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url, format!("{}/action/catalogue", BASE_URL));
        assert_eq!(
            request.body,
            RequestBody::Json(json!({"query": "roads", "page": 0, "size": 10}))
        );
    }

    #[tokio::test]
    async fn test_catalogue_find_with_query_object() {
        let transport = MockTransport::json(200, json!({"messages": [], "success": false}));
        let catalogue = CatalogueApi::new(api_with(transport.clone(), &SessionStore::new()));

        let response = catalogue.find(CatalogueQuery::new("lakes", 2, 25)).await.unwrap();
        assert!(!response.success);
        assert_eq!(
            transport.last_request().unwrap().body,
            RequestBody::Json(json!({"query": "lakes", "page": 2, "size": 25}))
        );
    }

    #[tokio::test]
    async fn test_endpoint_urls() {
        let transport = MockTransport::json(200, envelope(json!(null)));
        let api = api_with(transport.clone(), &SessionStore::new());
        let id = Uuid::new_v4();

        let account = AccountApi::new(api.clone());
        account.logout().await.unwrap();
        account.get_user_data().await.ok();
        account
            .request_token(&ActivationTokenCommand {
                email: "a@example.com".to_string(),
            })
            .await
            .unwrap();
        account.verify_token("abc/def").await.unwrap();
        account.delete_address(id).await.ok();

        CartApi::new(api.clone()).remove_item(id).await.ok();
        CartApi::new(api.clone()).clear().await.ok();
        ConfigurationApi::new(api.clone())
            .get_configuration("el")
            .await
            .ok();
        RatingApi::new(api.clone())
            .add_provider_rating(id, &RatingCommand::new(4.0, None).unwrap())
            .await
            .unwrap();

        let calls: Vec<(HttpMethod, String)> = transport
            .requests()
            .into_iter()
            .map(|r| (r.method, r.url.trim_start_matches(BASE_URL).to_string()))
            .collect();
        assert_eq!(
            calls,
            vec![
                (HttpMethod::Post, "/logout".to_string()),
                (HttpMethod::Get, "/action/account/user-data".to_string()),
                (HttpMethod::Post, "/action/account/token/request".to_string()),
                (HttpMethod::Post, "/action/account/token/verify/abc%2Fdef".to_string()),
                (HttpMethod::Delete, format!("/action/profile/address/{}", id)),
                (HttpMethod::Delete, format!("/action/cart/{}", id)),
                (HttpMethod::Delete, "/action/cart".to_string()),
                (HttpMethod::Get, "/action/configuration/el".to_string()),
                (HttpMethod::Post, format!("/action/rating/provider/{}", id)),
            ]
        );
    }
}
