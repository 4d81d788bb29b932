mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn categories_are_seeded_at_startup() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client.get(format!("{}/trivia/categories", server.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["total_categories"], 6);
    assert_eq!(body["categories"]["1"], "Science");
    assert_eq!(body["categories"]["6"], "Sports");
    Ok(())
}

#[tokio::test]
async fn created_question_appears_in_category_listing() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    // Geography (category 3) is reserved for this test
    let res = client
        .post(format!("{}/trivia/questions", server.base_url))
        .json(&json!({
            "question": "Which river runs through Cairo?",
            "answer": "The Nile",
            "category": 3,
            "difficulty": 2,
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await?;
    assert_eq!(body["success"], true);
    let created = body["created"].as_i64().expect("created id");
    assert!(created >= 1);

    let res = client
        .get(format!("{}/trivia/categories/3/questions", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await?;
    assert_eq!(body["current_category"], 3);
    let questions = body["questions"].as_array().expect("questions array");
    assert!(questions.iter().any(|q| q["id"] == created));
    Ok(())
}

#[tokio::test]
async fn create_rejects_unknown_category_and_missing_fields() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/trivia/questions", server.base_url))
        .json(&json!({
            "question": "Orphaned?",
            "answer": "Yes",
            "category": 999,
            "difficulty": 1,
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = res.json().await?;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], 422);
    assert_eq!(body["message"], "unprocessable");

    let res = client
        .post(format!("{}/trivia/questions", server.base_url))
        .json(&json!({ "question": "No answer" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    Ok(())
}

#[tokio::test]
async fn search_matches_substring_case_insensitively() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/trivia/questions", server.base_url))
        .json(&json!({
            "question": "Who painted the Xylophone Concerto mural?",
            "answer": "Nobody",
            "category": 2,
            "difficulty": 5,
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .post(format!("{}/trivia/questions", server.base_url))
        .json(&json!({ "searchTerm": "xylophone concerto" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["total_questions"], 1);

    // No match is a 404, not an empty success
    let res = client
        .post(format!("{}/trivia/questions", server.base_url))
        .json(&json!({ "searchTerm": "no question will ever contain this" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let body: Value = res.json().await?;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], 404);
    assert_eq!(body["message"], "resource not found");
    Ok(())
}

#[tokio::test]
async fn delete_removes_the_question_and_missing_ids_are_404() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/trivia/questions", server.base_url))
        .json(&json!({
            "question": "Doomed question?",
            "answer": "Yes",
            "category": 4,
            "difficulty": 1,
        }))
        .send()
        .await?;
    let body: Value = res.json().await?;
    let created = body["created"].as_i64().expect("created id");

    let res = client
        .delete(format!("{}/trivia/questions/{}", server.base_url, created))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await?;
    assert_eq!(body["deleted"], created);

    // Second delete: the row is gone
    let res = client
        .delete(format!("{}/trivia/questions/{}", server.base_url, created))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn empty_category_listing_is_404() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    // Sports (category 6) never receives questions in this test binary
    let res = client
        .get(format!("{}/trivia/categories/6/questions", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn page_far_past_the_end_is_404() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/trivia/questions?page=100000", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let body: Value = res.json().await?;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], 404);
    Ok(())
}
