#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{Value, json};
    use serial_test::serial;
    use tower::ServiceExt;

    use db::models::authorized_pickup::Model as AuthorizedPickup;
    use db::models::student::{Model as Student, StudentDetails};
    use sea_orm::{ConnectionTrait, DatabaseConnection};

    use crate::helpers::app::{auth_header, make_test_app};

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .header("Authorization", auth_header(false))
            .body(Body::empty())
            .unwrap()
    }

    fn post(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Authorization", auth_header(false))
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn seed_student(db: &DatabaseConnection, name: &str, pickups: &[&str]) -> i64 {
        let student = Student::create(
            db,
            StudentDetails {
                name: name.to_owned(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        if !pickups.is_empty() {
            let names: Vec<String> = pickups.iter().map(|s| s.to_string()).collect();
            AuthorizedPickup::replace_for_student(db, student.id, &names)
                .await
                .unwrap();
        }
        student.id
    }

    async fn start_session(app: &Router, topic: &str) -> i64 {
        let response = app
            .clone()
            .oneshot(post("/api/sessions", json!({ "topic": topic })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        json["data"]["id"].as_i64().unwrap()
    }

    #[tokio::test]
    #[serial]
    async fn session_routes_require_auth() {
        let (app, _db) = make_test_app().await;

        let req = Request::builder()
            .method("GET")
            .uri("/api/sessions/active")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    #[serial]
    async fn start_then_read_active_session() {
        let (app, _db) = make_test_app().await;

        let response = app
            .clone()
            .oneshot(get("/api/sessions/active"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"], Value::Null);

        let session_id = start_session(&app, "Noah's Ark").await;

        let response = app
            .clone()
            .oneshot(get("/api/sessions/active"))
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["id"].as_i64().unwrap(), session_id);
        assert_eq!(json["data"]["topic"], "Noah's Ark");
    }

    #[tokio::test]
    #[serial]
    async fn second_start_is_conflict() {
        let (app, _db) = make_test_app().await;
        start_session(&app, "Creation").await;

        let response = app
            .clone()
            .oneshot(post("/api/sessions", json!({ "topic": "Exodus" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    #[serial]
    async fn blank_topic_is_rejected() {
        let (app, _db) = make_test_app().await;

        let response = app
            .clone()
            .oneshot(post("/api/sessions", json!({ "topic": "   " })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    #[serial]
    async fn end_reports_students_never_checked_out() {
        let (app, db) = make_test_app().await;
        let student_id = seed_student(&db, "Mia", &[]).await;
        let session_id = start_session(&app, "Parables").await;

        let response = app
            .clone()
            .oneshot(post(
                &format!("/api/sessions/{session_id}/check-in"),
                json!({ "student_id": student_id }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .clone()
            .oneshot(post("/api/sessions/active/end", json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["open_records"].as_u64().unwrap(), 1);
        assert!(
            json["message"]
                .as_str()
                .unwrap()
                .contains("never checked out")
        );

        // No session left to end.
        let response = app
            .clone()
            .oneshot(post("/api/sessions/active/end", json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    #[serial]
    async fn end_surfaces_open_record_count_failures() {
        let (app, db) = make_test_app().await;
        start_session(&app, "Parables").await;

        // Counting open records now fails at the storage layer; the close
        // must report the failure rather than a count of zero.
        db.execute_unprepared("DROP TABLE attendance_records")
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(post("/api/sessions/active/end", json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "A database error occurred");
    }

    #[tokio::test]
    #[serial]
    async fn duplicate_check_in_is_conflict() {
        let (app, db) = make_test_app().await;
        let student_id = seed_student(&db, "Leo", &[]).await;
        let session_id = start_session(&app, "Psalms").await;

        let uri = format!("/api/sessions/{session_id}/check-in");
        let body = json!({ "student_id": student_id });

        let response = app.clone().oneshot(post(&uri, body.clone())).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app.clone().oneshot(post(&uri, body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    #[serial]
    async fn check_out_matches_names_case_insensitively() {
        let (app, db) = make_test_app().await;
        let student_id = seed_student(&db, "Ava", &["Grandma Rose", "Peter Miller"]).await;
        let session_id = start_session(&app, "Ruth").await;

        app.clone()
            .oneshot(post(
                &format!("/api/sessions/{session_id}/check-in"),
                json!({ "student_id": student_id }),
            ))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(post(
                &format!("/api/sessions/{session_id}/check-out"),
                json!({ "student_id": student_id, "released_to": "  grandma rose " }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["released_to"], "grandma rose");
        assert!(json["data"]["exit_at"].is_string());
    }

    #[tokio::test]
    #[serial]
    async fn check_out_to_unlisted_name_is_forbidden() {
        let (app, db) = make_test_app().await;
        let ava = seed_student(&db, "Ava", &["Grandma Rose"]).await;
        let ben = seed_student(&db, "Ben", &["Uncle Joe"]).await;
        let session_id = start_session(&app, "Jonah").await;

        for id in [ava, ben] {
            app.clone()
                .oneshot(post(
                    &format!("/api/sessions/{session_id}/check-in"),
                    json!({ "student_id": id }),
                ))
                .await
                .unwrap();
        }

        // Uncle Joe is on Ben's list, not Ava's.
        let response = app
            .clone()
            .oneshot(post(
                &format!("/api/sessions/{session_id}/check-out"),
                json!({ "student_id": ava, "released_to": "Uncle Joe" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        // Ava is still releasable to her own guardian.
        let response = app
            .clone()
            .oneshot(post(
                &format!("/api/sessions/{session_id}/check-out"),
                json!({ "student_id": ava, "released_to": "Grandma Rose" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    #[serial]
    async fn check_out_with_no_registered_guardians_is_forbidden() {
        let (app, db) = make_test_app().await;
        let student_id = seed_student(&db, "Sam", &[]).await;
        let session_id = start_session(&app, "Esther").await;

        app.clone()
            .oneshot(post(
                &format!("/api/sessions/{session_id}/check-in"),
                json!({ "student_id": student_id }),
            ))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(post(
                &format!("/api/sessions/{session_id}/check-out"),
                json!({ "student_id": student_id, "released_to": "Anyone" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let json = body_json(response).await;
        assert!(
            json["message"]
                .as_str()
                .unwrap()
                .contains("no guardians registered")
        );
    }

    #[tokio::test]
    #[serial]
    async fn check_out_after_session_ended_is_not_found() {
        let (app, db) = make_test_app().await;
        let student_id = seed_student(&db, "Zoe", &["Mom"]).await;
        let session_id = start_session(&app, "Acts").await;

        app.clone()
            .oneshot(post(
                &format!("/api/sessions/{session_id}/check-in"),
                json!({ "student_id": student_id }),
            ))
            .await
            .unwrap();
        app.clone()
            .oneshot(post("/api/sessions/active/end", json!({})))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(post(
                &format!("/api/sessions/{session_id}/check-out"),
                json!({ "student_id": student_id, "released_to": "Mom" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    #[serial]
    async fn attendance_and_report_views() {
        let (app, db) = make_test_app().await;
        let ava = seed_student(&db, "Ava", &["Grandma Rose"]).await;
        let ben = seed_student(&db, "Ben", &[]).await;
        let session_id = start_session(&app, "Revelation").await;

        for id in [ava, ben] {
            app.clone()
                .oneshot(post(
                    &format!("/api/sessions/{session_id}/check-in"),
                    json!({ "student_id": id }),
                ))
                .await
                .unwrap();
        }
        app.clone()
            .oneshot(post(
                &format!("/api/sessions/{session_id}/check-out"),
                json!({ "student_id": ava, "released_to": "Grandma Rose" }),
            ))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(get(&format!("/api/sessions/{session_id}/attendance")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["records"].as_array().unwrap().len(), 2);

        let response = app
            .clone()
            .oneshot(get(&format!("/api/sessions/{session_id}/report")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["never_checked_out"].as_u64().unwrap(), 1);
        let records = json["data"]["records"].as_array().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["student_name"], "Ava");

        // Unknown session id is a clean 404 on both views.
        let response = app
            .clone()
            .oneshot(get("/api/sessions/9999/report"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    #[serial]
    async fn session_history_is_paginated_newest_first() {
        let (app, _db) = make_test_app().await;

        for topic in ["First", "Second"] {
            start_session(&app, topic).await;
            app.clone()
                .oneshot(post("/api/sessions/active/end", json!({})))
                .await
                .unwrap();
        }

        let response = app
            .clone()
            .oneshot(get("/api/sessions?page=1&per_page=1"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["total"].as_u64().unwrap(), 2);
        assert_eq!(json["data"]["sessions"].as_array().unwrap().len(), 1);
    }
}
