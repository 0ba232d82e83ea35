//! Integration tests for cursor pagination.

use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shopify_graphql::pagination::{ListOptions, PaginationError};
use shopify_graphql::resources::ResourceError;
use shopify_graphql::{AccessToken, ApiVersion, Client, ClientConfig, HostUrl, ShopDomain};

fn graphql_path() -> String {
    format!("/admin/api/{}/graphql.json", ApiVersion::latest())
}

fn test_client(server: &MockServer) -> Client {
    let config = ClientConfig::builder()
        .shop(ShopDomain::new("test-shop").unwrap())
        .access_token(AccessToken::new("test-token").unwrap())
        .host(HostUrl::new(server.uri()).unwrap())
        .build()
        .unwrap();
    Client::new(&config)
}

fn orders_page(names_and_cursors: &[(&str, &str)], has_next_page: bool) -> ResponseTemplate {
    let edges: Vec<serde_json::Value> = names_and_cursors
        .iter()
        .enumerate()
        .map(|(i, (name, cursor))| {
            json!({
                "node": {"id": format!("gid://shopify/Order/{i}"), "name": name},
                "cursor": cursor
            })
        })
        .collect();

    ResponseTemplate::new(200).set_body_json(json!({
        "data": {
            "orders": {
                "edges": edges,
                "pageInfo": {"hasNextPage": has_next_page}
            }
        }
    }))
}

#[tokio::test]
async fn test_page_carries_items_cursors_and_continuation_flag() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(graphql_path()))
        .respond_with(orders_page(
            &[("#1001", "cur-1"), ("#1002", "cur-2")],
            true,
        ))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let options = ListOptions {
        first: Some(2),
        ..ListOptions::default()
    };
    let page = client.orders().list_after_cursor(&options).await.unwrap();

    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].name.as_deref(), Some("#1001"));
    assert_eq!(page.first_cursor.as_deref(), Some("cur-1"));
    assert_eq!(page.last_cursor.as_deref(), Some("cur-2"));
    assert!(page.has_next_page);
}

#[tokio::test]
async fn test_last_cursor_resumes_the_next_page() {
    let server = MockServer::start().await;

    // The first request carries no cursor; the second must carry cur-2.
    Mock::given(method("POST"))
        .and(path(graphql_path()))
        .and(body_string_contains("cur-2"))
        .respond_with(orders_page(&[("#1003", "cur-3")], false))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(graphql_path()))
        .respond_with(orders_page(
            &[("#1001", "cur-1"), ("#1002", "cur-2")],
            true,
        ))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let mut options = ListOptions {
        first: Some(2),
        ..ListOptions::default()
    };

    let first_page = client.orders().list_after_cursor(&options).await.unwrap();
    assert!(first_page.has_next_page);

    options.after = first_page.last_cursor;
    let second_page = client.orders().list_after_cursor(&options).await.unwrap();

    assert_eq!(second_page.items.len(), 1);
    assert_eq!(second_page.items[0].name.as_deref(), Some("#1003"));
    assert!(!second_page.has_next_page);
}

#[tokio::test]
async fn test_backward_pagination_sends_last_and_before() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(graphql_path()))
        .and(body_string_contains(r#""last":2"#))
        .and(body_string_contains(r#""before":"cur-5""#))
        .respond_with(orders_page(&[("#1004", "cur-4")], false))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let options = ListOptions {
        last: Some(2),
        before: Some("cur-5".to_string()),
        ..ListOptions::default()
    };
    let page = client.orders().list_after_cursor(&options).await.unwrap();

    assert_eq!(page.items.len(), 1);
}

#[tokio::test]
async fn test_reverse_flag_reaches_the_wire() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(graphql_path()))
        .and(body_string_contains(r#""reverse":true"#))
        .respond_with(orders_page(&[("#1009", "cur-9")], false))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let options = ListOptions {
        first: Some(1),
        reverse: true,
        ..ListOptions::default()
    };
    let page = client.orders().list_after_cursor(&options).await.unwrap();

    assert_eq!(page.items[0].name.as_deref(), Some("#1009"));
}

#[tokio::test]
async fn test_empty_page_has_no_cursors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(graphql_path()))
        .respond_with(orders_page(&[], false))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let options = ListOptions {
        first: Some(10),
        query: Some("name:nothing-matches".to_string()),
        ..ListOptions::default()
    };
    let page = client.orders().list_after_cursor(&options).await.unwrap();

    assert!(page.items.is_empty());
    assert!(page.first_cursor.is_none());
    assert!(page.last_cursor.is_none());
    assert!(!page.has_next_page);
}

#[tokio::test]
async fn test_conflicting_options_fail_before_any_request() {
    let server = MockServer::start().await;
    let client = test_client(&server);

    let options = ListOptions {
        first: Some(10),
        last: Some(10),
        ..ListOptions::default()
    };
    let error = client.orders().list_after_cursor(&options).await.unwrap_err();

    assert!(matches!(
        error,
        ResourceError::Pagination(PaginationError::ConflictingLimits)
    ));
    assert!(server.received_requests().await.unwrap().is_empty());
}
