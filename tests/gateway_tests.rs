//! End-to-end gateway tests
//!
//! Each test executes a real GraphQL query against the schema with the
//! TMDB upstream replaced by a wiremock server, covering the laziness,
//! union-filtering, partial-failure and page-echo guarantees.

use std::sync::Arc;

use async_graphql::PathSegment;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cinegraph::config::Config;
use cinegraph::graphql::{GatewaySchema, build_schema};
use cinegraph::services::TmdbClient;

fn test_config(base_url: &str) -> Config {
    Config {
        port: 0,
        tmdb_api_key: "test-key".to_string(),
        tmdb_base_url: base_url.to_string(),
        tmdb_timeout_secs: 5,
    }
}

fn schema_for(server: &MockServer) -> GatewaySchema {
    let config = test_config(&server.uri());
    let tmdb = Arc::new(TmdbClient::new(&config).expect("client should build"));
    build_schema(tmdb)
}

async fn execute(schema: &GatewaySchema, query: &str) -> (Value, Vec<async_graphql::ServerError>) {
    let response = schema.execute(query).await;
    let data = response.data.into_json().expect("data should be json");
    (data, response.errors)
}

#[tokio::test]
async fn top_rated_movies_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/movie/top_rated"))
        .and(query_param("api_key", "test-key"))
        .and(query_param("language", "en-US"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                { "id": 1, "title": "A" },
                { "id": 2, "title": "B" }
            ]
        })))
        .mount(&server)
        .await;

    let schema = schema_for(&server);
    let (data, errors) = execute(&schema, "{ getTopRatedMovies { id title } }").await;

    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    assert_eq!(
        data,
        json!({
            "getTopRatedMovies": [
                { "id": 1, "title": "A" },
                { "id": 2, "title": "B" }
            ]
        })
    );
}

#[tokio::test]
async fn get_movies_echoes_upstream_page_and_total() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/discover/movie"))
        .and(query_param("page", "3"))
        .and(query_param("sort_by", "popularity.desc"))
        .and(query_param("include_adult", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 3,
            "results": [
                { "id": 10, "title": "C", "poster_path": "/c.jpg", "vote_average": 6.5 }
            ],
            "total_results": 1200
        })))
        .mount(&server)
        .await;

    let schema = schema_for(&server);
    let (data, errors) = execute(
        &schema,
        "{ getMovies(page: 3) { page total_results results { id title poster_path vote_average } } }",
    )
    .await;

    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    assert_eq!(
        data,
        json!({
            "getMovies": {
                "page": 3,
                "total_results": 1200,
                "results": [
                    { "id": 10, "title": "C", "poster_path": "/c.jpg", "vote_average": 6.5 }
                ]
            }
        })
    );
}

#[tokio::test]
async fn get_tv_shows_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/discover/tv"))
        .and(query_param("page", "1"))
        .and(query_param("include_null_first_air_dates", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 1,
            "results": [
                { "id": 99, "name": "Show", "first_air_date": "2020-01-01" }
            ],
            "total_results": 1
        })))
        .mount(&server)
        .await;

    let schema = schema_for(&server);
    let (data, errors) = execute(
        &schema,
        "{ getTvShows(page: 1) { page results { id name first_air_date } total_results } }",
    )
    .await;

    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    assert_eq!(
        data,
        json!({
            "getTvShows": {
                "page": 1,
                "results": [
                    { "id": 99, "name": "Show", "first_air_date": "2020-01-01" }
                ],
                "total_results": 1
            }
        })
    );
}

#[tokio::test]
async fn page_below_one_is_rejected_without_an_upstream_call() {
    let server = MockServer::start().await;
    let schema = schema_for(&server);

    let response = schema.execute("{ getMovies(page: 0) { page } }").await;
    assert!(!response.errors.is_empty());

    let requests = server.received_requests().await.unwrap();
    assert!(requests.is_empty(), "no upstream call should be made");
}

#[tokio::test]
async fn base_fields_trigger_exactly_one_upstream_call() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/discover/movie"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 1,
            "results": [
                { "id": 1, "title": "A" },
                { "id": 2, "title": "B" }
            ],
            "total_results": 2
        })))
        .mount(&server)
        .await;

    let schema = schema_for(&server);
    let (_, errors) = execute(
        &schema,
        "{ getMovies(page: 1) { results { id title release_date } } }",
    )
    .await;
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");

    // No details/credits/reviews/videos were selected, so the listing call
    // must be the only request the upstream saw
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.path(), "/discover/movie");
}

#[tokio::test]
async fn search_keeps_only_movie_and_tv_variants() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/multi"))
        .and(query_param("query", "X"))
        .and(query_param("include_adult", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                { "media_type": "movie", "id": 5, "title": "X" },
                { "media_type": "person", "id": 9, "name": "Someone" }
            ]
        })))
        .mount(&server)
        .await;

    let schema = schema_for(&server);
    let (data, errors) = execute(
        &schema,
        r#"{ search(name: "X") { ... on Movie { title } ... on TvShow { name } } }"#,
    )
    .await;

    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    assert_eq!(data, json!({ "search": [{ "title": "X" }] }));
}

#[tokio::test]
async fn search_preserves_upstream_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/multi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                { "media_type": "movie", "id": 1, "title": "A" },
                { "media_type": "tv", "id": 2, "name": "B" },
                { "media_type": "person", "id": 3, "name": "C" },
                { "media_type": "movie", "id": 4, "title": "D" }
            ]
        })))
        .mount(&server)
        .await;

    let schema = schema_for(&server);
    let (data, errors) = execute(
        &schema,
        r#"{ search(name: "anything") { __typename ... on Movie { id } ... on TvShow { id } } }"#,
    )
    .await;

    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    assert_eq!(
        data,
        json!({
            "search": [
                { "__typename": "Movie", "id": 1 },
                { "__typename": "TvShow", "id": 2 },
                { "__typename": "Movie", "id": 4 }
            ]
        })
    );
}

#[tokio::test]
async fn failed_credits_leaves_details_and_data_tree_intact() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/movie/top_rated"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "id": 7, "title": "A" }]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/movie/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "title": "A",
            "runtime": 120,
            "revenue": 5_000_000_000i64,
            "genres": [{ "id": 18, "name": "Drama" }]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/movie/7/credits"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let schema = schema_for(&server);
    let response = schema
        .execute(
            "{ getTopRatedMovies { id details { runtime revenue genres { name } } credits { name } } }",
        )
        .await;

    // The failing field surfaces as a field-level error...
    assert_eq!(response.errors.len(), 1);
    let error = &response.errors[0];
    assert!(
        error
            .path
            .iter()
            .any(|s| matches!(s, PathSegment::Field(f) if f == "credits")),
        "error path should point at credits: {:?}",
        error.path
    );
    assert!(error.message.contains("movie/7/credits"));
    assert!(!error.message.contains("api_key"));
    assert!(!error.message.contains(&server.uri()));

    // ...while the sibling details field and the data tree stay intact
    let data = response.data.into_json().unwrap();
    assert_eq!(
        data,
        json!({
            "getTopRatedMovies": [{
                "id": 7,
                "details": {
                    "runtime": 120,
                    "revenue": 5_000_000_000i64,
                    "genres": [{ "name": "Drama" }]
                },
                "credits": null
            }]
        })
    );
}

#[tokio::test]
async fn reviews_resolve_identically_within_one_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/movie/top_rated"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "id": 7, "title": "A" }]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/movie/7/reviews"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{
                "id": "r1",
                "content": "great",
                "author_details": { "name": "n", "rating": 9.0 }
            }]
        })))
        .mount(&server)
        .await;

    let schema = schema_for(&server);
    let (data, errors) = execute(
        &schema,
        r#"{
            getTopRatedMovies {
                first: reviews { id content author_details { name rating } }
                second: reviews { id content author_details { name rating } }
            }
        }"#,
    )
    .await;

    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    let movie = &data["getTopRatedMovies"][0];
    assert_eq!(movie["first"], movie["second"]);
    assert_eq!(movie["first"][0]["id"], json!("r1"));
}

#[tokio::test]
async fn absent_upstream_data_resolves_to_empty_sequence() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/movie/top_rated"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "id": 7, "title": "A" }]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/movie/7/reviews"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
        .mount(&server)
        .await;

    let schema = schema_for(&server);
    let (data, errors) = execute(&schema, "{ getTopRatedMovies { reviews { id } } }").await;

    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    assert_eq!(data, json!({ "getTopRatedMovies": [{ "reviews": [] }] }));
}

#[tokio::test]
async fn missing_envelope_field_surfaces_as_error_not_empty_result() {
    let server = MockServer::start().await;

    // Contract drift: the listing endpoint answers without `results`
    Mock::given(method("GET"))
        .and(path("/movie/top_rated"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .mount(&server)
        .await;

    let schema = schema_for(&server);
    let response = schema.execute("{ getTopRatedMovies { id } }").await;

    assert_eq!(response.errors.len(), 1);
    assert!(
        response.errors[0]
            .message
            .contains("unexpected response shape"),
        "got: {}",
        response.errors[0].message
    );
}

#[tokio::test]
async fn tv_show_nested_fields_resolve_from_parent_id() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tv/top_rated"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "id": 33, "name": "Show" }]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/tv/33"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 33,
            "name": "Show",
            "number_of_seasons": 2,
            "number_of_episodes": 16,
            "created_by": [{ "id": 1, "name": "Creator" }],
            "seasons": [
                { "id": 100, "season_number": 1, "episode_count": 8 },
                { "id": 101, "season_number": 2, "episode_count": 8 }
            ]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/tv/33/credits"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "cast": [{ "id": 4, "name": "Actor", "character": "Hero" }]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/tv/33/videos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "id": "v1", "name": "Trailer", "key": "abc", "site": "YouTube", "type": "Trailer" }]
        })))
        .mount(&server)
        .await;

    let schema = schema_for(&server);
    let (data, errors) = execute(
        &schema,
        r#"{
            getTopRatedTvShows {
                id
                details {
                    number_of_seasons
                    number_of_episodes
                    created_by { name }
                    seasons { season_number episode_count }
                }
                credits { name character }
                videos { name key site type }
            }
        }"#,
    )
    .await;

    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    assert_eq!(
        data,
        json!({
            "getTopRatedTvShows": [{
                "id": 33,
                "details": {
                    "number_of_seasons": 2,
                    "number_of_episodes": 16,
                    "created_by": [{ "name": "Creator" }],
                    "seasons": [
                        { "season_number": 1, "episode_count": 8 },
                        { "season_number": 2, "episode_count": 8 }
                    ]
                },
                "credits": [{ "name": "Actor", "character": "Hero" }],
                "videos": [{ "name": "Trailer", "key": "abc", "site": "YouTube", "type": "Trailer" }]
            }]
        })
    );
}

#[tokio::test]
async fn concurrent_requests_share_no_state() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/multi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "media_type": "movie", "id": 1, "title": "A" }]
        })))
        .mount(&server)
        .await;

    let schema = schema_for(&server);
    let query = r#"{ search(name: "A") { ... on Movie { id title } } }"#;

    let (left, right) = futures::future::join(schema.execute(query), schema.execute(query)).await;

    assert!(left.errors.is_empty() && right.errors.is_empty());
    assert_eq!(left.data.into_json().unwrap(), right.data.into_json().unwrap());
}
