//! Integration tests for GraphQL chains.
//!
//! These tests verify the request body and headers produced for each
//! operation type and how server responses map onto the GraphQL response.

use fluent_api::clients::graphql::{GraphqlError, OperationKind, QueryBuildError};
use fluent_api::{ClientConfig, FluentClient, ValidationError};
use serde::Deserialize;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> FluentClient {
    FluentClient::new(
        ClientConfig::builder()
            .base_url(format!("{}/graphql", server.uri()))
            .header("X-Api-Key", "secret")
            .build()
            .unwrap(),
    )
}

#[tokio::test]
async fn test_query_without_args_posts_query_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(header("content-type", "application/json"))
        .and(header("x-api-key", "secret"))
        .and(body_json(json!({
            "query": "query { users  { id name } }",
            "variables": {}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"users": [{"id": "1", "name": "Ada"}]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let response = client
        .gql()
        .query()
        .field("users")
        .unwrap()
        .select("id name")
        .unwrap()
        .await;

    assert!(response.is_ok());
    assert_eq!(
        response.data,
        Some(json!({"users": [{"id": "1", "name": "Ada"}]}))
    );
}

#[tokio::test]
async fn test_mutation_with_variables() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_json(json!({
            "query": "mutation ($name: String!) { createUser (name: $name, admin: false) { id } }",
            "variables": {"name": "Ada"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"createUser": {"id": "42"}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let response = client
        .gql()
        .mutation()
        .field("createUser")
        .unwrap()
        .args(json!({"name": {"type": "String!", "value": "Ada"}, "admin": false}))
        .unwrap()
        .select("id")
        .unwrap()
        .send()
        .await;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Created {
        #[serde(rename = "createUser")]
        create_user: User,
    }
    #[derive(Debug, Deserialize, PartialEq)]
    struct User {
        id: String,
    }

    let typed = response.into_typed::<Created>().unwrap();
    assert_eq!(typed.data.unwrap().create_user.id, "42");
}

#[tokio::test]
async fn test_execute_sends_empty_selection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_json(json!({
            "query": "mutation { logout (all: true) {  } }",
            "variables": {}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"logout": true}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let response = client
        .gql()
        .operation("mutation")
        .unwrap()
        .field("logout")
        .unwrap()
        .args(json!({"all": true}))
        .unwrap()
        .execute()
        .unwrap()
        .await;

    assert_eq!(response.data, Some(json!({"logout": true})));
}

#[tokio::test]
async fn test_graphql_errors_are_normalized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [
                {"message": "User not found", "extensions": {"code": "404", "path": ["user"]}},
                {"message": "bad", "code": "BAD_USER_INPUT"}
            ]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let response = client
        .gql()
        .query()
        .field("user")
        .unwrap()
        .args(json!({"id": 1}))
        .unwrap()
        .select("id")
        .unwrap()
        .await;

    assert!(response.data.is_none());
    assert!(response.is_not_found());
    let errors = response.errors.unwrap();
    assert_eq!(errors[0].extensions.message, json!("User not found"));
    assert_eq!(errors[1].code(), "BAD_USER_INPUT");
    assert_eq!(errors[1].extensions.message, json!("Input is not valid"));

    // Extension keys other than code and message are dropped
    let serialized = serde_json::to_value(&errors[0]).unwrap();
    assert!(serialized["extensions"].get("path").is_none());
}

#[tokio::test]
async fn test_context_headers_and_base_apply_per_sibling() {
    let main = MockServer::start().await;
    let other = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(header("x-tenant", "a"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": "main"})))
        .expect(1)
        .mount(&main)
        .await;
    Mock::given(method("POST"))
        .and(path("/v2"))
        .and(header("x-tenant", "b"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": "other"})))
        .expect(1)
        .mount(&other)
        .await;

    let client = client_for(&main);
    let user = client.gql().query().field("user").unwrap();
    let a = user.headers(json!({"X-Tenant": "a"})).unwrap();
    let b = user
        .headers(json!({"X-Tenant": "b"}))
        .unwrap()
        .base(&format!("{}/v2", other.uri()))
        .unwrap();

    assert_eq!(a.select("id").unwrap().await.data, Some(json!("main")));
    assert_eq!(b.select("id").unwrap().await.data, Some(json!("other")));
}

#[tokio::test]
async fn test_server_error_becomes_error_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({"error": "Maintenance"})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let response = client
        .gql()
        .subscription()
        .field("events")
        .unwrap()
        .select("id")
        .unwrap()
        .await;

    let error = &response.errors.unwrap()[0];
    assert_eq!(error.code(), "503");
    assert_eq!(error.extensions.message, json!("Maintenance"));
}

#[test]
fn test_chain_validation_is_synchronous() {
    let client = FluentClient::from_base_url("https://api.example.com/graphql").unwrap();
    let gql = client.gql();

    assert!(matches!(
        gql.operation("fragment"),
        Err(ValidationError::InvalidOperation { .. })
    ));
    assert!(matches!(
        gql.query().field(""),
        Err(ValidationError::FieldNameRequired)
    ));

    let user = gql.query().field("user").unwrap();
    assert!(matches!(user.args(json!(42)), Err(ValidationError::InvalidArgs)));
    assert!(matches!(
        user.select(""),
        Err(GraphqlError::Validation(ValidationError::EmptySelection))
    ));
    assert!(matches!(
        user.member("then"),
        Err(ValidationError::InvalidProperty { .. })
    ));
    assert!(user.base("/relative").is_err());
}

#[test]
fn test_invalid_variable_type_is_a_build_failure() {
    let client = FluentClient::from_base_url("https://api.example.com/graphql").unwrap();
    let err = client
        .gql()
        .query()
        .field("user")
        .unwrap()
        .args(json!({"id": {"type": "", "value": 1}}))
        .unwrap()
        .select("id")
        .unwrap_err();

    assert!(matches!(
        err,
        GraphqlError::QueryBuildFailed {
            operation: OperationKind::Query,
            source: QueryBuildError::InvalidVariable { .. },
            ..
        }
    ));
}

#[tokio::test]
async fn test_malformed_argument_name_is_never_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
        .expect(0)
        .mount(&server)
        .await;

    let mut args = serde_json::Map::new();
    args.insert("id: 1) { secret } } query { other (x".to_string(), json!(1));

    let err = client_for(&server)
        .gql()
        .query()
        .field("user")
        .unwrap()
        .args(serde_json::Value::Object(args))
        .unwrap()
        .select("id")
        .unwrap_err();

    assert!(matches!(
        err,
        GraphqlError::QueryBuildFailed {
            source: QueryBuildError::InvalidArgumentName { .. },
            ..
        }
    ));
}
