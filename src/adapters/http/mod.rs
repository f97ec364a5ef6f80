//! HTTP surface of the portal.

use crate::{
    commands::DomainLogic,
    ports::{clock::ClockPort, store::StorePort},
};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub mod error;
mod handlers;
pub mod views;

/// Build the router serving every page of the portal
pub fn build_router<S, C>(domain: DomainLogic<S, C>) -> Router
where
    S: StorePort + 'static,
    C: ClockPort + 'static,
{
    Router::new()
        .route("/", get(handlers::index::<S, C>))
        .route("/showSummary", post(handlers::show_summary::<S, C>))
        .route("/book/:club/:competition", get(handlers::book::<S, C>))
        .route("/purchasePlaces", post(handlers::purchase_places::<S, C>))
        .route("/logout", get(handlers::logout))
        .layer(TraceLayer::new_for_http())
        .with_state(domain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        adapters::{clock::SystemClock, store::memory::MemoryStore},
        domain::{fixtures::*, Club, BOOKING_COMPLETE},
    };
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
    };
    use rstest::*;
    use speculoos::prelude::*;
    use std::sync::Arc;
    use tower::{BoxError, ServiceExt};

    fn seeded_store() -> MemoryStore {
        MemoryStore::new(
            vec![
                Club {
                    name: "Simply Lift".to_string(),
                    email: "john@simplylift.co".to_string(),
                    points: 13,
                },
                Club {
                    name: "Iron Temple".to_string(),
                    email: "admin@irontemple.com".to_string(),
                    points: 4,
                },
                Club {
                    name: "She Lifts".to_string(),
                    email: "kate@shelifts.co.uk".to_string(),
                    points: 12,
                },
            ],
            vec![
                competition("Spring Festival", at(2020, 3, 27), 25),
                competition("Fall Classic", at(2020, 10, 22), 13),
                competition("Future Championship", at(2099, 6, 15), 30),
                competition("Next Year Games", at(2099, 3, 10), 20),
            ],
        )
    }

    struct Portal {
        store: MemoryStore,
        router: Router,
    }

    #[fixture]
    async fn portal() -> Portal {
        let store = seeded_store();
        let domain = DomainLogic::load(Arc::new(store.clone()), Arc::new(SystemClock))
            .await
            .unwrap();
        Portal {
            store,
            router: build_router(domain),
        }
    }

    async fn get_page(router: &Router, uri: &str) -> Response {
        router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn post_form(router: &Router, uri: &str, form: &str) -> Response {
        router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(form.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn body_text(response: Response) -> Result<String, BoxError> {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        Ok(String::from_utf8(bytes.to_vec())?)
    }

    async fn points_of(store: &MemoryStore, name: &str) -> u32 {
        store
            .load_clubs()
            .await
            .unwrap()
            .into_iter()
            .find(|club| club.name == name)
            .unwrap()
            .points
    }

    #[rstest]
    #[tokio::test]
    async fn test_index_shows_points_table(#[future] portal: Portal) -> Result<(), BoxError> {
        let portal = portal.await;

        let response = get_page(&portal.router, "/").await;

        assert_that!(response.status()).is_equal_to(StatusCode::OK);
        let body = body_text(response).await?;
        assert_that!(body.contains("Club Points Overview")).is_true();
        assert_that!(body.contains("For transparency")).is_true();
        assert_that!(body.contains("<td>Iron Temple</td><td>4</td>")).is_true();
        assert_that!(body.contains("name=\"email\"")).is_true();
        Ok(())
    }

    #[rstest]
    #[tokio::test]
    async fn test_login(#[future] portal: Portal) -> Result<(), BoxError> {
        let portal = portal.await;

        let response = post_form(&portal.router, "/showSummary", "email=john%40simplylift.co").await;

        assert_that!(response.status()).is_equal_to(StatusCode::OK);
        let body = body_text(response).await?;
        assert_that!(body.contains("Welcome, john@simplylift.co")).is_true();
        assert_that!(body.contains("Points available: 13")).is_true();
        assert_that!(body.contains("Future Championship")).is_true();
        Ok(())
    }

    #[rstest]
    #[tokio::test]
    async fn test_login_unknown_email_redirects(#[future] portal: Portal) -> Result<(), BoxError> {
        let portal = portal.await;

        let response = post_form(&portal.router, "/showSummary", "email=invalid%40test.com").await;

        // Redirected, nothing rendered
        assert_that!(response.status().is_redirection()).is_true();
        let location = response.headers()[header::LOCATION].to_str()?.to_string();
        assert_that!(body_text(response).await?.contains("Welcome")).is_false();

        // The landing page carries the message
        let body = body_text(get_page(&portal.router, &location).await).await?;
        assert_that!(body.contains("Club not found. Please try again.")).is_true();
        Ok(())
    }

    #[rstest]
    #[case("/book/Invalid%20Club/Future%20Championship", "Club not found. Please try again.")]
    #[case("/book/Simply%20Lift/Invalid%20Competition", "Competition not found. Please try again.")]
    #[case("/book/Simply%20Lift/Spring%20Festival", "This competition has already taken place")]
    #[tokio::test]
    async fn test_book_rejected(
        #[future] portal: Portal,
        #[case] uri: &str,
        #[case] message: &str,
    ) -> Result<(), BoxError> {
        let portal = portal.await;

        let response = get_page(&portal.router, uri).await;

        assert_that!(response.status()).is_equal_to(StatusCode::OK);
        let body = body_text(response).await?;
        assert_that!(body.contains(message)).is_true();
        assert_that!(body.contains("<form")).is_false();
        Ok(())
    }

    #[rstest]
    #[tokio::test]
    async fn test_book_form_contains_both_names(#[future] portal: Portal) -> Result<(), BoxError> {
        let portal = portal.await;

        let response = get_page(&portal.router, "/book/Simply%20Lift/Next%20Year%20Games").await;

        assert_that!(response.status()).is_equal_to(StatusCode::OK);
        let body = body_text(response).await?;
        assert_that!(body.contains("<form")).is_true();
        assert_that!(body.contains("Next Year Games")).is_true();
        assert_that!(body.contains("Simply Lift")).is_true();
        Ok(())
    }

    #[rstest]
    #[tokio::test]
    async fn test_purchase(#[future] portal: Portal) -> Result<(), BoxError> {
        let portal = portal.await;

        let response = post_form(
            &portal.router,
            "/purchasePlaces",
            "club=Simply+Lift&competition=Future+Championship&places=3",
        )
        .await;

        assert_that!(response.status()).is_equal_to(StatusCode::OK);
        let body = body_text(response).await?;
        assert_that!(body.contains(BOOKING_COMPLETE)).is_true();
        assert_that!(body.contains("Points available: 10")).is_true();
        assert_that!(body.contains("Number of Places: 27")).is_true();
        assert_that!(points_of(&portal.store, "Simply Lift").await).is_equal_to(10);
        Ok(())
    }

    #[rstest]
    #[case("Simply+Lift", "Future+Championship", "15", "You cannot book more than 12 places per competition!")]
    #[case("Iron+Temple", "Future+Championship", "10", "Not enough points! You need 10 points but have 4")]
    #[case("Simply+Lift", "Future+Championship", "4294967296", "You cannot book more than 12 places per competition!")]
    #[case("Simply+Lift", "Future+Championship", "99999999999", "You cannot book more than 12 places per competition!")]
    #[case("Simply+Lift", "Fall+Classic", "1", "This competition has already taken place")]
    #[case("Simply+Lift", "Fall+Classic", "99999999999", "This competition has already taken place")]
    #[case("Unknown+Club", "Future+Championship", "1", "Something went wrong-please try again")]
    #[tokio::test]
    async fn test_purchase_rejected(
        #[future] portal: Portal,
        #[case] club: &str,
        #[case] competition: &str,
        #[case] places: &str,
        #[case] message: &str,
    ) -> Result<(), BoxError> {
        let portal = portal.await;

        let form = format!("club={club}&competition={competition}&places={places}");
        let response = post_form(&portal.router, "/purchasePlaces", &form).await;

        assert_that!(response.status()).is_equal_to(StatusCode::OK);
        let body = body_text(response).await?;
        assert_that!(body.contains(message)).is_true();
        assert_that!(portal.store.saves()?).is_equal_to(0);
        Ok(())
    }

    #[rstest]
    #[case("abc")]
    #[case("-3")]
    #[case("")]
    #[tokio::test]
    async fn test_purchase_invalid_places(
        #[future] portal: Portal,
        #[case] places: &str,
    ) -> Result<(), BoxError> {
        let portal = portal.await;

        let form = format!("club=Simply+Lift&competition=Future+Championship&places={places}");
        let response = post_form(&portal.router, "/purchasePlaces", &form).await;

        assert_that!(response.status()).is_equal_to(StatusCode::BAD_REQUEST);
        assert_that!(points_of(&portal.store, "Simply Lift").await).is_equal_to(13);
        Ok(())
    }

    #[rstest]
    #[tokio::test]
    async fn test_purchase_missing_places(#[future] portal: Portal) -> Result<(), BoxError> {
        let portal = portal.await;

        let form = "club=Simply+Lift&competition=Future+Championship";
        let response = post_form(&portal.router, "/purchasePlaces", form).await;

        assert_that!(response.status()).is_equal_to(StatusCode::BAD_REQUEST);
        assert_that!(portal.store.saves()?).is_equal_to(0);
        Ok(())
    }

    #[rstest]
    #[tokio::test]
    async fn test_exact_boundary_then_refused(#[future] portal: Portal) -> Result<(), BoxError> {
        let portal = portal.await;

        let form = "club=She+Lifts&competition=Next+Year+Games&places=12";
        let body = body_text(post_form(&portal.router, "/purchasePlaces", form).await).await?;
        assert_that!(body.contains(BOOKING_COMPLETE)).is_true();
        assert_that!(points_of(&portal.store, "She Lifts").await).is_equal_to(0);

        let form = "club=She+Lifts&competition=Next+Year+Games&places=1";
        let body = body_text(post_form(&portal.router, "/purchasePlaces", form).await).await?;
        assert_that!(body.contains("You need 1 points but have 0")).is_true();
        Ok(())
    }

    #[rstest]
    #[tokio::test]
    async fn test_logout_redirects(#[future] portal: Portal) {
        let portal = portal.await;

        let response = get_page(&portal.router, "/logout").await;

        assert_that!(response.status().is_redirection()).is_true();
        assert_that!(response.headers()[header::LOCATION].to_str().unwrap()).is_equal_to("/");
    }
}
