//! TMDB (The Movie Database) API client
//!
//! TMDB is a popular movie/TV database with a free API.
//! Base URL: https://api.themoviedb.org/3
//!
//! Every method maps one endpoint to one statically-known response shape:
//! a paged envelope (discover), a `results`/`cast` sequence that gets
//! unwrapped, or a bare entity (details). A response that does not match
//! the declared shape is an error, never an empty result.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;

const LANGUAGE: &str = "en-US";

/// Error from an upstream TMDB call.
///
/// Variants carry the endpoint path only, never the query string, so the
/// API key cannot end up in a client-visible error message.
#[derive(Debug, Error)]
pub enum TmdbError {
    #[error("tmdb request to {endpoint} failed: {source}")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("tmdb returned {status} for {endpoint}")]
    Status {
        endpoint: String,
        status: StatusCode,
    },
    #[error("unexpected response shape from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

/// TMDB API client
///
/// Holds the base address and credential for the lifetime of the process;
/// everything else a call needs comes in through the method arguments.
pub struct TmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

/// Paged listing envelope returned by the discover endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbPage<T> {
    pub page: i32,
    pub results: Vec<T>,
    pub total_results: i32,
}

/// `{ "results": [...] }` envelope used by the listing, reviews, videos
/// and search endpoints
#[derive(Debug, Deserialize)]
struct ResultsEnvelope<T> {
    results: Vec<T>,
}

/// `{ "cast": [...] }` envelope used by the credits endpoints
#[derive(Debug, Deserialize)]
struct CreditsEnvelope {
    cast: Vec<TmdbCastMember>,
}

/// Movie as it appears in listing and search results
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieSummary {
    pub id: i32,
    pub title: Option<String>,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: Option<f64>,
}

/// TV show as it appears in listing and search results
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbTvSummary {
    pub id: i32,
    pub name: Option<String>,
    pub poster_path: Option<String>,
    pub first_air_date: Option<String>,
    pub vote_average: Option<f64>,
}

/// Full movie details from the single-entity endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieDetails {
    pub id: i32,
    pub title: Option<String>,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
    pub revenue: Option<i64>,
    pub runtime: Option<i32>,
    pub vote_average: Option<f64>,
    pub genres: Option<Vec<TmdbGenre>>,
}

/// Full TV show details from the single-entity endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbTvDetails {
    pub id: i32,
    pub name: Option<String>,
    pub poster_path: Option<String>,
    pub first_air_date: Option<String>,
    pub last_air_date: Option<String>,
    pub number_of_episodes: Option<i32>,
    pub number_of_seasons: Option<i32>,
    pub vote_average: Option<f64>,
    pub genres: Option<Vec<TmdbGenre>>,
    pub created_by: Option<Vec<TmdbCreator>>,
    pub seasons: Option<Vec<TmdbSeason>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenre {
    pub id: i32,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbSeason {
    pub id: i32,
    pub name: Option<String>,
    pub air_date: Option<String>,
    pub episode_count: Option<i32>,
    pub poster_path: Option<String>,
    pub season_number: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCreator {
    pub id: i32,
    pub name: Option<String>,
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCastMember {
    pub id: i32,
    pub name: Option<String>,
    pub character: Option<String>,
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbReview {
    pub id: Option<String>,
    pub content: Option<String>,
    pub author_details: Option<TmdbReviewAuthor>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbReviewAuthor {
    pub name: Option<String>,
    pub avatar_path: Option<String>,
    pub rating: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbVideo {
    pub id: Option<String>,
    pub name: Option<String>,
    pub key: Option<String>,
    pub site: Option<String>,
    #[serde(rename = "type")]
    pub video_type: Option<String>,
}

/// One multi-search result, discriminated by the upstream `media_type` tag
/// at the decode boundary. Tags other than `movie`/`tv` (people, collections,
/// whatever TMDB adds next) land in `Other` and get filtered out where the
/// graph union is built.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "media_type", rename_all = "lowercase")]
pub enum TmdbSearchItem {
    Movie(TmdbMovieSummary),
    Tv(TmdbTvSummary),
    #[serde(other)]
    Other,
}

impl TmdbClient {
    /// Create a new TMDB client from the process configuration
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.tmdb_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.tmdb_base_url.trim_end_matches('/').to_string(),
            api_key: config.tmdb_api_key.clone(),
        })
    }

    /// Issue a GET against one endpoint and decode the declared shape.
    ///
    /// The credential and locale are appended here so no caller ever
    /// handles them.
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T, TmdbError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let response = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str()), ("language", LANGUAGE)])
            .query(params)
            .send()
            .await
            .map_err(|e| TmdbError::Request {
                endpoint: endpoint.to_string(),
                source: e.without_url(),
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(endpoint, %status, "tmdb call failed");
            return Err(TmdbError::Status {
                endpoint: endpoint.to_string(),
                status,
            });
        }

        let body = response.bytes().await.map_err(|e| TmdbError::Request {
            endpoint: endpoint.to_string(),
            source: e.without_url(),
        })?;

        serde_json::from_slice(&body).map_err(|e| TmdbError::Decode {
            endpoint: endpoint.to_string(),
            source: e,
        })
    }

    /// Discover movies sorted by popularity, one page at a time
    pub async fn discover_movies(
        &self,
        page: u32,
    ) -> Result<TmdbPage<TmdbMovieSummary>, TmdbError> {
        debug!(page, "fetching discover movies from TMDB");
        let page = page.to_string();
        self.get_json(
            "discover/movie",
            &[
                ("sort_by", "popularity.desc"),
                ("include_adult", "false"),
                ("include_video", "false"),
                ("page", &page),
            ],
        )
        .await
    }

    /// Discover TV shows sorted by popularity, one page at a time
    pub async fn discover_tv(&self, page: u32) -> Result<TmdbPage<TmdbTvSummary>, TmdbError> {
        debug!(page, "fetching discover tv from TMDB");
        let page = page.to_string();
        self.get_json(
            "discover/tv",
            &[
                ("sort_by", "popularity.desc"),
                ("include_null_first_air_dates", "false"),
                ("page", &page),
            ],
        )
        .await
    }

    /// Top rated movies, first page
    pub async fn top_rated_movies(&self) -> Result<Vec<TmdbMovieSummary>, TmdbError> {
        let envelope: ResultsEnvelope<TmdbMovieSummary> =
            self.get_json("movie/top_rated", &[("page", "1")]).await?;
        Ok(envelope.results)
    }

    /// Upcoming movies, first page
    pub async fn upcoming_movies(&self) -> Result<Vec<TmdbMovieSummary>, TmdbError> {
        let envelope: ResultsEnvelope<TmdbMovieSummary> =
            self.get_json("movie/upcoming", &[("page", "1")]).await?;
        Ok(envelope.results)
    }

    /// Popular movies, first page
    pub async fn popular_movies(&self) -> Result<Vec<TmdbMovieSummary>, TmdbError> {
        let envelope: ResultsEnvelope<TmdbMovieSummary> =
            self.get_json("movie/popular", &[("page", "1")]).await?;
        Ok(envelope.results)
    }

    /// Top rated TV shows, first page
    pub async fn top_rated_tv(&self) -> Result<Vec<TmdbTvSummary>, TmdbError> {
        let envelope: ResultsEnvelope<TmdbTvSummary> =
            self.get_json("tv/top_rated", &[("page", "1")]).await?;
        Ok(envelope.results)
    }

    /// Popular TV shows, first page
    pub async fn popular_tv(&self) -> Result<Vec<TmdbTvSummary>, TmdbError> {
        let envelope: ResultsEnvelope<TmdbTvSummary> =
            self.get_json("tv/popular", &[("page", "1")]).await?;
        Ok(envelope.results)
    }

    /// Full details for one movie (bare entity, no envelope)
    pub async fn movie_details(&self, movie_id: i32) -> Result<TmdbMovieDetails, TmdbError> {
        debug!(movie_id, "fetching movie details from TMDB");
        self.get_json(&format!("movie/{movie_id}"), &[]).await
    }

    /// Full details for one TV show (bare entity, no envelope)
    pub async fn tv_details(&self, tv_id: i32) -> Result<TmdbTvDetails, TmdbError> {
        debug!(tv_id, "fetching tv details from TMDB");
        self.get_json(&format!("tv/{tv_id}"), &[]).await
    }

    /// Cast for one movie, unwrapped from the credits envelope
    pub async fn movie_credits(&self, movie_id: i32) -> Result<Vec<TmdbCastMember>, TmdbError> {
        let envelope: CreditsEnvelope = self
            .get_json(&format!("movie/{movie_id}/credits"), &[])
            .await?;
        Ok(envelope.cast)
    }

    /// Cast for one TV show, unwrapped from the credits envelope
    pub async fn tv_credits(&self, tv_id: i32) -> Result<Vec<TmdbCastMember>, TmdbError> {
        let envelope: CreditsEnvelope =
            self.get_json(&format!("tv/{tv_id}/credits"), &[]).await?;
        Ok(envelope.cast)
    }

    /// Reviews for one movie, first page only
    pub async fn movie_reviews(&self, movie_id: i32) -> Result<Vec<TmdbReview>, TmdbError> {
        let envelope: ResultsEnvelope<TmdbReview> = self
            .get_json(&format!("movie/{movie_id}/reviews"), &[("page", "1")])
            .await?;
        Ok(envelope.results)
    }

    /// Reviews for one TV show, first page only
    pub async fn tv_reviews(&self, tv_id: i32) -> Result<Vec<TmdbReview>, TmdbError> {
        let envelope: ResultsEnvelope<TmdbReview> = self
            .get_json(&format!("tv/{tv_id}/reviews"), &[("page", "1")])
            .await?;
        Ok(envelope.results)
    }

    /// Trailer videos for one movie
    pub async fn movie_videos(&self, movie_id: i32) -> Result<Vec<TmdbVideo>, TmdbError> {
        let envelope: ResultsEnvelope<TmdbVideo> = self
            .get_json(&format!("movie/{movie_id}/videos"), &[])
            .await?;
        Ok(envelope.results)
    }

    /// Trailer videos for one TV show
    pub async fn tv_videos(&self, tv_id: i32) -> Result<Vec<TmdbVideo>, TmdbError> {
        let envelope: ResultsEnvelope<TmdbVideo> =
            self.get_json(&format!("tv/{tv_id}/videos"), &[]).await?;
        Ok(envelope.results)
    }

    /// Multi-search across movies and TV shows.
    ///
    /// Returns the raw discriminated items in upstream order; filtering of
    /// non-movie/tv items happens where the graph union is built.
    pub async fn search_multi(&self, query: &str) -> Result<Vec<TmdbSearchItem>, TmdbError> {
        debug!(query, "searching TMDB");
        let envelope: ResultsEnvelope<TmdbSearchItem> = self
            .get_json(
                "search/multi",
                &[("query", query), ("page", "1"), ("include_adult", "false")],
            )
            .await?;
        Ok(envelope.results)
    }
}
