
use reqwest::header::COOKIE;
use reqwest::StatusCode;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

fn mia() -> Uuid {
    Uuid::parse_str("3f2a9c64-10b5-4d8a-9e37-5a1c2b3d4e5f").unwrap()
}

fn theo() -> Uuid {
    Uuid::parse_str("8d4b6e21-7f3c-4a90-b5d8-0e1f2a3b4c5d").unwrap()
}

#[sqlx::test]
async fn health_check_works(db: PgPool) {
    let addr = tools::spawn_app(db).await;
    let client = tools::client();

    let res = client
        .get(format!("http://{addr}/api/health"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
}

#[sqlx::test(fixtures("users"))]
async fn friend_request_routes_require_auth(db: PgPool) {
    let addr = tools::spawn_app(db).await;
    let client = tools::client();

    let res = client
        .post(format!("http://{addr}/api/friend-request/{}", theo()))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(fixtures("users"))]
async fn friend_request_lifecycle_over_http(db: PgPool) {
    let addr = tools::spawn_app(db).await;
    let client = tools::client();

    let mia_cookie = tools::auth_cookie(mia(), "mia@streamify.app");
    let theo_cookie = tools::auth_cookie(theo(), "theo@streamify.app");

    // Mia sends a request to Theo
    let res = client
        .post(format!("http://{addr}/api/friend-request/{}", theo()))
        .header(COOKIE, &mia_cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let request: Value = res.json().await.unwrap();
    let request_id = request["id"].as_str().unwrap().to_owned();
    assert_eq!(request["status"], "pending");

    // Theo sees it in his feed
    let res = client
        .get(format!("http://{addr}/api/friend-requests"))
        .header(COOKIE, &theo_cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let feed: Value = res.json().await.unwrap();
    assert_eq!(feed["incoming"].as_array().unwrap().len(), 1);
    assert_eq!(feed["incoming"][0]["full_name"], "Mia Kowalski");

    // Mia sees it as outgoing
    let res = client
        .get(format!("http://{addr}/api/outgoing-friend-requests"))
        .header(COOKIE, &mia_cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(res.json::<Value>().await.unwrap().as_array().unwrap().len(), 1);

    // only the recipient may accept
    let res = client
        .put(format!("http://{addr}/api/friend-request/{request_id}/accept"))
        .header(COOKIE, &mia_cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client
        .put(format!("http://{addr}/api/friend-request/{request_id}/accept"))
        .header(COOKIE, &theo_cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // the acceptance shows up in Mia's feed window
    let res = client
        .get(format!("http://{addr}/api/friend-requests"))
        .header(COOKIE, &mia_cookie)
        .send()
        .await
        .unwrap();
    let feed: Value = res.json().await.unwrap();
    assert_eq!(feed["accepted"].as_array().unwrap().len(), 1);

    // both friend lists contain the other user
    let res = client
        .get(format!("http://{addr}/api/users/friends"))
        .header(COOKIE, &mia_cookie)
        .send()
        .await
        .unwrap();
    let friends: Value = res.json().await.unwrap();
    assert_eq!(friends[0]["full_name"], "Theo Laurent");

    // sending again conflicts, the pair is already connected
    let res = client
        .post(format!("http://{addr}/api/friend-request/{}", theo()))
        .header(COOKIE, &mia_cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[sqlx::test(fixtures("users"))]
async fn reject_over_http(db: PgPool) {
    let addr = tools::spawn_app(db).await;
    let client = tools::client();

    let mia_cookie = tools::auth_cookie(mia(), "mia@streamify.app");
    let theo_cookie = tools::auth_cookie(theo(), "theo@streamify.app");

    let res = client
        .post(format!("http://{addr}/api/friend-request/{}", theo()))
        .header(COOKIE, &mia_cookie)
        .send()
        .await
        .unwrap();
    let request: Value = res.json().await.unwrap();
    let request_id = request["id"].as_str().unwrap().to_owned();

    let res = client
        .put(format!("http://{addr}/api/friend-request/{request_id}/reject"))
        .header(COOKIE, &theo_cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // the pair can try again after a rejection
    let res = client
        .post(format!("http://{addr}/api/friend-request/{}", theo()))
        .header(COOKIE, &mia_cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let revived: Value = res.json().await.unwrap();
    assert_eq!(revived["id"].as_str().unwrap(), request_id);
}
