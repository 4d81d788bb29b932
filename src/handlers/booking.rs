use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    response::Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::store::{Artist, Show, Venue};

#[derive(Debug, Deserialize)]
pub struct SearchBody {
    #[serde(default)]
    pub search_term: String,
}

//  ----------------------------------------------------------------
//  Venues
//  ----------------------------------------------------------------

/// GET /booking/venues - venues grouped by (state, city) with their
/// upcoming-show counts
pub async fn list_venues(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let now = Utc::now();
    let venues = state.venues.scan().await;
    let shows = state.shows.scan().await;

    let mut areas: BTreeMap<(String, String), Vec<Value>> = BTreeMap::new();
    for venue in &venues {
        let num_upcoming =
            shows.iter().filter(|s| s.venue_id == venue.id && s.is_upcoming(now)).count();
        areas.entry((venue.state.clone(), venue.city.clone())).or_default().push(json!({
            "id": venue.id,
            "name": venue.name,
            "num_upcoming_shows": num_upcoming,
        }));
    }

    let areas: Vec<Value> = areas
        .into_iter()
        .map(|((state, city), venues)| json!({ "state": state, "city": city, "venues": venues }))
        .collect();

    Ok(Json(json!({ "success": true, "areas": areas })))
}

/// POST /booking/venues/search - case-insensitive substring match on name
pub async fn search_venues(
    State(state): State<AppState>,
    Json(body): Json<SearchBody>,
) -> ApiResult<Json<Value>> {
    let now = Utc::now();
    let needle = body.search_term.to_lowercase();
    let venues = state.venues.scan_where(|v| v.name.to_lowercase().contains(&needle)).await;
    let shows = state.shows.scan().await;

    let data: Vec<Value> = venues
        .iter()
        .map(|venue| {
            let num_upcoming =
                shows.iter().filter(|s| s.venue_id == venue.id && s.is_upcoming(now)).count();
            json!({ "id": venue.id, "name": venue.name, "num_upcoming_shows": num_upcoming })
        })
        .collect();

    Ok(Json(json!({ "success": true, "count": venues.len(), "data": data })))
}

/// GET /booking/venues/:id - venue detail with past and upcoming shows
pub async fn show_venue(
    State(state): State<AppState>,
    Path(venue_id): Path<i64>,
) -> ApiResult<Json<Value>> {
    let venue = state.venues.require(venue_id).await?;

    let now = Utc::now();
    let shows = state.shows.scan_where(|s| s.venue_id == venue_id).await;
    let mut upcoming = Vec::new();
    let mut past = Vec::new();
    for show in &shows {
        // join against the artist side of the show
        let Some(artist) = state.artists.get(show.artist_id).await else { continue };
        let entry = json!({
            "artist_id": artist.id,
            "artist_name": artist.name,
            "artist_image_link": artist.image_link,
            "start_date": show.start_date,
        });
        if show.is_upcoming(now) {
            upcoming.push(entry);
        } else {
            past.push(entry);
        }
    }

    let mut body = serde_json::to_value(&venue)
        .map_err(|e| ApiError::internal_server_error(e.to_string()))?;
    body["upcoming_shows_count"] = json!(upcoming.len());
    body["upcoming_shows"] = json!(upcoming);
    body["past_shows_count"] = json!(past.len());
    body["past_shows"] = json!(past);

    Ok(Json(json!({ "success": true, "venue": body })))
}

/// POST /booking/venues
pub async fn create_venue(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> ApiResult<Json<Value>> {
    let venue: Venue = serde_json::from_value(body).map_err(|_| ApiError::Unprocessable)?;
    if venue.name.is_empty() || venue.city.is_empty() || venue.state.is_empty() {
        return Err(ApiError::Unprocessable);
    }

    let created = state.venues.insert(venue).await?;
    tracing::info!("created venue {} ({})", created.id, created.name);

    Ok(Json(json!({ "success": true, "venue": created })))
}

/// PUT /booking/venues/:id - full replacement of the editable fields
pub async fn edit_venue(
    State(state): State<AppState>,
    Path(venue_id): Path<i64>,
    Json(body): Json<Value>,
) -> ApiResult<Json<Value>> {
    state.venues.require(venue_id).await?;

    let venue: Venue = serde_json::from_value(body).map_err(|_| ApiError::Unprocessable)?;
    if venue.name.is_empty() || venue.city.is_empty() || venue.state.is_empty() {
        return Err(ApiError::Unprocessable);
    }

    let updated = state.venues.update(venue_id, venue).await?;
    Ok(Json(json!({ "success": true, "venue": updated })))
}

/// DELETE /booking/venues/:id
pub async fn delete_venue(
    State(state): State<AppState>,
    Path(venue_id): Path<i64>,
) -> ApiResult<Json<Value>> {
    state.venues.remove(venue_id).await?;
    tracing::info!("deleted venue {}", venue_id);

    Ok(Json(json!({ "success": true, "deleted": venue_id })))
}

//  ----------------------------------------------------------------
//  Artists
//  ----------------------------------------------------------------

/// GET /booking/artists - id and name of every artist
pub async fn list_artists(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let artists: Vec<Value> = state
        .artists
        .scan()
        .await
        .iter()
        .map(|a| json!({ "id": a.id, "name": a.name }))
        .collect();

    Ok(Json(json!({ "success": true, "artists": artists })))
}

/// POST /booking/artists/search
pub async fn search_artists(
    State(state): State<AppState>,
    Json(body): Json<SearchBody>,
) -> ApiResult<Json<Value>> {
    let now = Utc::now();
    let needle = body.search_term.to_lowercase();
    let artists = state.artists.scan_where(|a| a.name.to_lowercase().contains(&needle)).await;
    let shows = state.shows.scan().await;

    let data: Vec<Value> = artists
        .iter()
        .map(|artist| {
            let num_upcoming =
                shows.iter().filter(|s| s.artist_id == artist.id && s.is_upcoming(now)).count();
            json!({ "id": artist.id, "name": artist.name, "num_upcoming_shows": num_upcoming })
        })
        .collect();

    Ok(Json(json!({ "success": true, "count": artists.len(), "data": data })))
}

/// GET /booking/artists/:id - artist detail with past and upcoming shows
pub async fn show_artist(
    State(state): State<AppState>,
    Path(artist_id): Path<i64>,
) -> ApiResult<Json<Value>> {
    let artist = state.artists.require(artist_id).await?;

    let now = Utc::now();
    let shows = state.shows.scan_where(|s| s.artist_id == artist_id).await;
    let mut upcoming = Vec::new();
    let mut past = Vec::new();
    for show in &shows {
        let Some(venue) = state.venues.get(show.venue_id).await else { continue };
        let entry = json!({
            "venue_id": venue.id,
            "venue_name": venue.name,
            "venue_image_link": venue.image_link,
            "start_date": show.start_date,
        });
        if show.is_upcoming(now) {
            upcoming.push(entry);
        } else {
            past.push(entry);
        }
    }

    let mut body = serde_json::to_value(&artist)
        .map_err(|e| ApiError::internal_server_error(e.to_string()))?;
    body["upcoming_shows_count"] = json!(upcoming.len());
    body["upcoming_shows"] = json!(upcoming);
    body["past_shows_count"] = json!(past.len());
    body["past_shows"] = json!(past);

    Ok(Json(json!({ "success": true, "artist": body })))
}

/// POST /booking/artists
pub async fn create_artist(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> ApiResult<Json<Value>> {
    let artist: Artist = serde_json::from_value(body).map_err(|_| ApiError::Unprocessable)?;
    if artist.name.is_empty() || artist.city.is_empty() || artist.state.is_empty() {
        return Err(ApiError::Unprocessable);
    }

    let created = state.artists.insert(artist).await?;
    tracing::info!("created artist {} ({})", created.id, created.name);

    Ok(Json(json!({ "success": true, "artist": created })))
}

/// PUT /booking/artists/:id
pub async fn edit_artist(
    State(state): State<AppState>,
    Path(artist_id): Path<i64>,
    Json(body): Json<Value>,
) -> ApiResult<Json<Value>> {
    state.artists.require(artist_id).await?;

    let artist: Artist = serde_json::from_value(body).map_err(|_| ApiError::Unprocessable)?;
    if artist.name.is_empty() || artist.city.is_empty() || artist.state.is_empty() {
        return Err(ApiError::Unprocessable);
    }

    let updated = state.artists.update(artist_id, artist).await?;
    Ok(Json(json!({ "success": true, "artist": updated })))
}

/// DELETE /booking/artists/:id
pub async fn delete_artist(
    State(state): State<AppState>,
    Path(artist_id): Path<i64>,
) -> ApiResult<Json<Value>> {
    state.artists.remove(artist_id).await?;
    tracing::info!("deleted artist {}", artist_id);

    Ok(Json(json!({ "success": true, "deleted": artist_id })))
}

//  ----------------------------------------------------------------
//  Shows
//  ----------------------------------------------------------------

/// GET /booking/shows - every show with venue and artist names joined in
pub async fn list_shows(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let mut data = Vec::new();
    for show in state.shows.scan().await {
        // shows whose venue or artist has since been deleted are dropped
        let Some(venue) = state.venues.get(show.venue_id).await else { continue };
        let Some(artist) = state.artists.get(show.artist_id).await else { continue };
        data.push(json!({
            "id": show.id,
            "venue_id": venue.id,
            "venue_name": venue.name,
            "artist_id": artist.id,
            "artist_name": artist.name,
            "artist_image_link": artist.image_link,
            "start_date": show.start_date,
        }));
    }

    Ok(Json(json!({ "success": true, "shows": data })))
}

/// POST /booking/shows - both referenced rows must exist
pub async fn create_show(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> ApiResult<Json<Value>> {
    let show: Show = serde_json::from_value(body).map_err(|_| ApiError::Unprocessable)?;

    if state.venues.get(show.venue_id).await.is_none()
        || state.artists.get(show.artist_id).await.is_none()
    {
        return Err(ApiError::Unprocessable);
    }

    let created = state.shows.insert(show).await?;
    tracing::info!("created show {}", created.id);

    Ok(Json(json!({ "success": true, "show": created })))
}
