#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{Value, json};
    use serial_test::serial;
    use tower::ServiceExt;

    use db::models::attendance_record::Model as AttendanceRecord;
    use db::models::class_session::Model as ClassSession;

    use crate::helpers::app::{auth_header, make_test_app};

    fn request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("Authorization", auth_header(false));
        match body {
            Some(value) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(value.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    #[serial]
    async fn create_and_fetch_student() {
        let (app, _db) = make_test_app().await;

        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/api/students",
                Some(json!({
                    "name": "Ava Smith",
                    "birth_date": "2018-03-14",
                    "guardian_name": "Rose Smith",
                    "guardian_phone": "555-0101"
                })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        let id = json["data"]["id"].as_i64().unwrap();
        assert_eq!(json["data"]["name"], "Ava Smith");
        assert_eq!(json["data"]["birth_date"], "2018-03-14");

        let response = app
            .clone()
            .oneshot(request("GET", &format!("/api/students/{id}"), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["guardian_name"], "Rose Smith");
        assert_eq!(json["data"]["pickups"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    #[serial]
    async fn blank_name_is_rejected() {
        let (app, _db) = make_test_app().await;

        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/api/students",
                Some(json!({ "name": "   " })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    #[serial]
    async fn roster_lists_pickups_per_student() {
        let (app, _db) = make_test_app().await;

        let mut ids = Vec::new();
        for name in ["Ben", "Ava"] {
            let response = app
                .clone()
                .oneshot(request("POST", "/api/students", Some(json!({ "name": name }))))
                .await
                .unwrap();
            ids.push(body_json(response).await["data"]["id"].as_i64().unwrap());
        }

        app.clone()
            .oneshot(request(
                "PUT",
                &format!("/api/students/{}/pickups", ids[1]),
                Some(json!({ "names": ["Grandma Rose"] })),
            ))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(request("GET", "/api/students", None))
            .await
            .unwrap();
        let json = body_json(response).await;
        let students = json["data"]["students"].as_array().unwrap();
        assert_eq!(students.len(), 2);
        // Alphabetical: Ava first, with her pickup list attached.
        assert_eq!(students[0]["name"], "Ava");
        assert_eq!(students[0]["pickups"][0], "Grandma Rose");
        assert_eq!(students[1]["pickups"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    #[serial]
    async fn update_replaces_all_fields() {
        let (app, _db) = make_test_app().await;

        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/api/students",
                Some(json!({ "name": "Leo", "notes": "peanut allergy" })),
            ))
            .await
            .unwrap();
        let id = body_json(response).await["data"]["id"].as_i64().unwrap();

        let response = app
            .clone()
            .oneshot(request(
                "PUT",
                &format!("/api/students/{id}"),
                Some(json!({ "name": "Leo M." })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["name"], "Leo M.");
        // PUT semantics: omitted fields are cleared.
        assert_eq!(json["data"]["notes"], Value::Null);
    }

    #[tokio::test]
    #[serial]
    async fn delete_is_soft() {
        let (app, _db) = make_test_app().await;

        let response = app
            .clone()
            .oneshot(request("POST", "/api/students", Some(json!({ "name": "Mia" }))))
            .await
            .unwrap();
        let id = body_json(response).await["data"]["id"].as_i64().unwrap();

        let response = app
            .clone()
            .oneshot(request("DELETE", &format!("/api/students/{id}"), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(request("GET", &format!("/api/students/{id}"), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .clone()
            .oneshot(request("GET", "/api/students", None))
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["data"]["students"].as_array().unwrap().len(), 0);

        let response = app
            .clone()
            .oneshot(request("GET", "/api/students?include_deleted=true", None))
            .await
            .unwrap();
        let json = body_json(response).await;
        let students = json["data"]["students"].as_array().unwrap();
        assert_eq!(students.len(), 1);
        assert!(students[0]["deleted_at"].is_string());
    }

    #[tokio::test]
    #[serial]
    async fn pickup_list_is_capped_and_deduplicated() {
        let (app, _db) = make_test_app().await;

        let response = app
            .clone()
            .oneshot(request("POST", "/api/students", Some(json!({ "name": "Zoe" }))))
            .await
            .unwrap();
        let id = body_json(response).await["data"]["id"].as_i64().unwrap();
        let uri = format!("/api/students/{id}/pickups");

        let response = app
            .clone()
            .oneshot(request(
                "PUT",
                &uri,
                Some(json!({ "names": ["A", "B", "C", "D"] })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .clone()
            .oneshot(request(
                "PUT",
                &uri,
                Some(json!({ "names": ["Grandma Rose", " grandma rose ", "Uncle Joe"] })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["names"], json!(["Grandma Rose", "Uncle Joe"]));

        let response = app.clone().oneshot(request("GET", &uri, None)).await.unwrap();
        let json = body_json(response).await;
        assert_eq!(json["data"]["names"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    #[serial]
    async fn frequency_counts_recent_ended_sessions() {
        let (app, db) = make_test_app().await;

        let response = app
            .clone()
            .oneshot(request("POST", "/api/students", Some(json!({ "name": "Ava" }))))
            .await
            .unwrap();
        let id = body_json(response).await["data"]["id"].as_i64().unwrap();

        // Three ended sessions; present at the first two.
        for present in [true, true, false] {
            let session = ClassSession::start(&db, "Lesson", "").await.unwrap();
            if present {
                AttendanceRecord::check_in(&db, session.id, id).await.unwrap();
            }
            ClassSession::end(&db).await.unwrap();
        }

        let response = app
            .clone()
            .oneshot(request("GET", &format!("/api/students/{id}/frequency?last=5"), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["present"].as_u64().unwrap(), 2);
        assert_eq!(json["data"]["total"].as_u64().unwrap(), 3);
        assert_eq!(json["data"]["pct"].as_f64().unwrap(), 67.0);
        assert_eq!(json["data"]["below_threshold"], false);

        let response = app
            .clone()
            .oneshot(request("GET", "/api/students/9999/frequency", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
