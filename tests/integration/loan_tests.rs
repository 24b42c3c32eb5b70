//! Renewal and borrowed-list tests against seeded copies

use chrono::{Duration, NaiveDate, Utc};
use locallibrary_server::models::LoanStatus;
use reqwest::{redirect::Policy, Client, StatusCode};
use serde_json::{json, Value};
use uuid::Uuid;

use super::{api_tests::BASE_URL, fixtures};

const MARK_RETURNED: &str = "catalog.can_mark_returned";

fn client() -> Client {
    Client::builder()
        .redirect(Policy::none())
        .build()
        .expect("Failed to build client")
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

async fn renew(client: &Client, token: &str, copy: Uuid, body: Value) -> reqwest::Response {
    client
        .post(format!("{}/book/{}/renew/", BASE_URL, copy))
        .header("Authorization", format!("Bearer {}", token))
        .json(&body)
        .send()
        .await
        .expect("Failed to send request")
}

#[tokio::test]
#[ignore]
async fn test_accepted_renewal_moves_only_due_back() {
    let pool = fixtures::pool().await;
    let (_, librarian) = fixtures::create_user(&pool, &[MARK_RETURNED]).await;
    let (borrower_id, _) = fixtures::create_user(&pool, &[]).await;
    let (_, book_id) = fixtures::create_book(&pool).await;
    let copy = fixtures::create_copy(
        &pool,
        book_id,
        LoanStatus::OnLoan,
        Some(today() + Duration::days(2)),
        Some(borrower_id),
    )
    .await;

    let client = client();
    let token = fixtures::login(&client, &librarian).await;
    let tomorrow = today() + Duration::days(1);

    let response = renew(&client, &token, copy, json!({ "renewal_date": tomorrow.to_string() })).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let (due_back, status, borrower) = fixtures::read_copy(&pool, copy).await;
    assert_eq!(due_back, Some(tomorrow));
    assert_eq!(status, "o");
    assert_eq!(borrower, Some(borrower_id));
}

#[tokio::test]
#[ignore]
async fn test_rejected_renewals_leave_due_back_unchanged() {
    let pool = fixtures::pool().await;
    let (_, librarian) = fixtures::create_user(&pool, &[MARK_RETURNED]).await;
    let (borrower_id, _) = fixtures::create_user(&pool, &[]).await;
    let (_, book_id) = fixtures::create_book(&pool).await;
    let due = today() + Duration::days(2);
    let copy =
        fixtures::create_copy(&pool, book_id, LoanStatus::OnLoan, Some(due), Some(borrower_id)).await;

    let client = client();
    let token = fixtures::login(&client, &librarian).await;

    let cases = [
        (json!({ "renewal_date": today().to_string() }), "Invalid date - renewal in past"),
        (
            json!({ "renewal_date": (today() + Duration::weeks(5)).to_string() }),
            "Invalid date - renewal more than 4 weeks ahead",
        ),
        (json!({ "renewal_date": "soon" }), "Enter a valid date."),
        (json!({}), "This field is required."),
    ];
    for (body, message) in cases {
        let response = renew(&client, &token, copy, body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["fields"]["renewal_date"][0], message);

        let (due_back, _, _) = fixtures::read_copy(&pool, copy).await;
        assert_eq!(due_back, Some(due));
    }
}

#[tokio::test]
#[ignore]
async fn test_copy_not_on_loan_cannot_be_renewed() {
    let pool = fixtures::pool().await;
    let (_, librarian) = fixtures::create_user(&pool, &[MARK_RETURNED]).await;
    let (_, book_id) = fixtures::create_book(&pool).await;
    let copy = fixtures::create_copy(&pool, book_id, LoanStatus::Available, None, None).await;

    let client = client();
    let token = fixtures::login(&client, &librarian).await;

    let tomorrow = today() + Duration::days(1);
    let response = renew(&client, &token, copy, json!({ "renewal_date": tomorrow.to_string() })).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let (due_back, status, borrower) = fixtures::read_copy(&pool, copy).await;
    assert_eq!(due_back, None);
    assert_eq!(status, "a");
    assert_eq!(borrower, None);
}

#[tokio::test]
#[ignore]
async fn test_my_borrowed_lists_own_copies_on_loan_by_due_date() {
    let pool = fixtures::pool().await;
    let (reader_id, reader) = fixtures::create_user(&pool, &[]).await;
    let (other_id, _) = fixtures::create_user(&pool, &[]).await;
    let (_, book_id) = fixtures::create_book(&pool).await;

    let due_later = fixtures::create_copy(
        &pool,
        book_id,
        LoanStatus::OnLoan,
        Some(today() + Duration::days(10)),
        Some(reader_id),
    )
    .await;
    let due_soon = fixtures::create_copy(
        &pool,
        book_id,
        LoanStatus::OnLoan,
        Some(today() + Duration::days(1)),
        Some(reader_id),
    )
    .await;
    // Reserved for the reader but not on loan
    fixtures::create_copy(
        &pool,
        book_id,
        LoanStatus::Reserved,
        Some(today() + Duration::days(3)),
        Some(reader_id),
    )
    .await;
    fixtures::create_copy(
        &pool,
        book_id,
        LoanStatus::OnLoan,
        Some(today() + Duration::days(5)),
        Some(other_id),
    )
    .await;

    let client = client();
    let token = fixtures::login(&client, &reader).await;
    let response = client
        .get(format!("{}/mybooks/", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let ids: Vec<String> = body["items"]
        .as_array()
        .expect("No items")
        .iter()
        .map(|item| item["id"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(ids, vec![due_soon.to_string(), due_later.to_string()]);
    assert_eq!(body["total"], 2);
    for item in body["items"].as_array().expect("No items") {
        assert_eq!(item["status"], "on_loan");
        assert_eq!(item["borrower_id"], reader_id);
    }
}

#[tokio::test]
#[ignore]
async fn test_renewal_form_proposes_three_weeks() {
    let pool = fixtures::pool().await;
    let (_, librarian) = fixtures::create_user(&pool, &[MARK_RETURNED]).await;
    let (borrower_id, _) = fixtures::create_user(&pool, &[]).await;
    let (_, book_id) = fixtures::create_book(&pool).await;
    let copy = fixtures::create_copy(
        &pool,
        book_id,
        LoanStatus::OnLoan,
        Some(today() + Duration::days(2)),
        Some(borrower_id),
    )
    .await;

    let client = client();
    let token = fixtures::login(&client, &librarian).await;
    let response = client
        .get(format!("{}/book/{}/renew/", BASE_URL, copy))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body["form"]["renewal_date"],
        (today() + Duration::weeks(3)).to_string()
    );
    assert_eq!(body["book_instance"]["id"], copy.to_string());
}
