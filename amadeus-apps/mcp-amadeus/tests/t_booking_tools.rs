//!  Amadeus Travel Tools
//!
//!  Copyright (C) 2026  Mamy Ratsimbazafy
//!
//!  This program is free software: you can redistribute it and/or modify
//!  it under the terms of the GNU Affero General Public License as published by
//!  the Free Software Foundation, either version 3 of the License, or
//!  (at your option) any later version.
//!
//!  This program is distributed in the hope that it will be useful,
//!  but WITHOUT ANY WARRANTY; without even the implied warranty of
//!  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//!  GNU Affero General Public License for more details.
//!
//!  You should have received a copy of the GNU Affero General Public License
//!  along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Booking, activity and transfer tools against a mock upstream.


use anyhow::Result;
use axum::http::Method;
use mcp_amadeus::ToolCatalog;
use mock_upstream::MockUpstream;
use serde_json::{Value, json};

fn transfer_search(time: &str) -> Value {
    json!({
        "start_latitude": 48.8566,
        "start_longitude": 2.3522,
        "end_latitude": 49.0097,
        "end_longitude": 2.5479,
        "transfer_date": "2025-11-10",
        "transfer_time": time
    })
}

#[tokio::test]
async fn flight_order_lookup() -> Result<()> {
    let mock = MockUpstream::start().await;
    mock.on(
        Method::GET,
        "/v1/booking/flight-orders/eJzTd9f3NjIJ",
        200,
        json!({"data": {
            "type": "flight-order",
            "id": "eJzTd9f3NjIJ",
            "status": "CONFIRMED",
            "associatedRecords": [{"reference": "KBHX3K"}, {"reference": "ZZZZZZ"}],
            "travelers": [{"id": "1"}],
            "flightOffers": [{"id": "1"}],
            "ticketingAgreement": {"option": "DELAY_TO_QUEUE", "delay": "6D"}
        }}),
    );

    let out = ToolCatalog::new()
        .invoke(&mock.client(), "get_flight_order", json!({"order_id": "eJzTd9f3NjIJ"}))
        .await?;

    assert_eq!(
        out,
        json!({
            "order_id": "eJzTd9f3NjIJ",
            "booking_reference": "KBHX3K",
            "status": "CONFIRMED",
            "travelers": [{"id": "1"}],
            "flight_offers": [{"id": "1"}],
            "ticketing": {"option": "DELAY_TO_QUEUE", "delay": "6D"}
        })
    );
    assert_eq!(mock.only_api_request().method, "GET");
    Ok(())
}

#[tokio::test]
async fn activity_search_keeps_twenty_with_three_pictures() -> Result<()> {
    let mock = MockUpstream::start().await;
    let activities = (0..25)
        .map(|i| {
            json!({
                "type": "activity",
                "id": i.to_string(),
                "name": format!("Tour {i}"),
                "shortDescription": "Skip the line",
                "rating": "4.5",
                "bookingLink": format!("https://example.com/book/{i}"),
                "price": {"amount": "35.00", "currencyCode": "EUR"},
                "pictures": ["p1.jpg", "p2.jpg", "p3.jpg", "p4.jpg", "p5.jpg"]
            })
        })
        .collect::<Vec<_>>();
    mock.on(Method::GET, "/v1/shopping/activities", 200, json!({"data": activities}));

    let out = ToolCatalog::new()
        .invoke(
            &mock.client(),
            "search_activities",
            json!({"latitude": 41.397158, "longitude": 2.160873, "radius": 2}),
        )
        .await?;

    let out = out.as_array().expect("array");
    assert_eq!(out.len(), 20);
    assert_eq!(
        out[0],
        json!({
            "id": "0",
            "name": "Tour 0",
            "description": "Skip the line",
            "rating": "4.5",
            "booking_link": "https://example.com/book/0",
            "price": {"amount": "35.00", "currencyCode": "EUR"},
            "pictures": ["p1.jpg", "p2.jpg", "p3.jpg"]
        })
    );
    let call = mock.only_api_request();
    assert_eq!(call.query_value("latitude"), Some("41.397158"));
    assert_eq!(call.query_value("longitude"), Some("2.160873"));
    assert_eq!(call.query_value("radius"), Some("2"));
    Ok(())
}

#[tokio::test]
async fn activity_details() -> Result<()> {
    let mock = MockUpstream::start().await;
    mock.on(
        Method::GET,
        "/v1/shopping/activities/56777",
        200,
        json!({"data": {
            "type": "activity",
            "id": "56777",
            "name": "Sagrada Familia guided tour",
            "description": "Two hours inside the basilica",
            "rating": "4.8",
            "reviewsCount": 1200,
            "bookingLink": "https://example.com/book/56777",
            "price": {"amount": "49.00", "currencyCode": "EUR"},
            "minimumDuration": "2 hours",
            "pictures": ["a.jpg", "b.jpg", "c.jpg", "d.jpg"]
        }}),
    );

    let out = ToolCatalog::new()
        .invoke(&mock.client(), "get_activity_details", json!({"activity_id": "56777"}))
        .await?;

    assert_eq!(
        out,
        json!({
            "id": "56777",
            "name": "Sagrada Familia guided tour",
            "description": "Two hours inside the basilica",
            "rating": "4.8",
            "reviews_count": 1200,
            "booking_link": "https://example.com/book/56777",
            "price": {"amount": "49.00", "currencyCode": "EUR"},
            "duration": null,
            "categories": null,
            "pictures": ["a.jpg", "b.jpg", "c.jpg", "d.jpg"]
        })
    );
    assert_eq!(mock.only_api_request().path, "/v1/shopping/activities/56777");
    Ok(())
}

#[tokio::test]
async fn unpadded_transfer_time_never_goes_upstream() -> Result<()> {
    let mock = MockUpstream::start().await;
    let catalog = ToolCatalog::new();
    let client = mock.client();

    for time in ["9:30", "7:05:00"] {
        let err = catalog
            .invoke(&client, "search_transfers", transfer_search(time))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "validation_error", "{time}");
    }
    assert!(mock.requests().is_empty());
    Ok(())
}

#[tokio::test]
async fn transfer_search_keeps_ten_offers() -> Result<()> {
    let mock = MockUpstream::start().await;
    let offers = (0..14)
        .map(|i| json!({"id": format!("T{i}"), "transferType": "PRIVATE", "duration": "PT45M"}))
        .collect::<Vec<_>>();
    mock.on(Method::POST, "/v1/shopping/transfer-offers", 200, json!({"data": offers}));

    let out = ToolCatalog::new()
        .invoke(&mock.client(), "search_transfers", transfer_search("09:05:30"))
        .await?;

    let out = out.as_array().expect("array");
    assert_eq!(out.len(), 10);
    assert_eq!(
        out[9],
        json!({
            "offer_id": "T9",
            "transfer_type": "PRIVATE",
            "vehicle": null,
            "price": null,
            "duration": "PT45M",
            "cancellation_policy": null
        })
    );
    let sent = mock.only_api_request().json();
    assert_eq!(sent["startDateTime"], "2025-11-10T09:05:30");
    assert_eq!(sent["startLocationCode"], "48.8566,2.3522");
    assert_eq!(sent["endGeoCode"], "49.0097,2.5479");
    assert_eq!(sent["passengers"], 1);
    Ok(())
}

#[tokio::test]
async fn book_transfer_order() -> Result<()> {
    let mock = MockUpstream::start().await;
    mock.on(
        Method::POST,
        "/v1/booking/transfer-orders",
        201,
        json!({"data": {
            "type": "transfer-order",
            "id": "VEg0Wk43WF",
            "confirmationNumber": "5362",
            "status": "CONFIRMED"
        }}),
    );
    let passengers = json!([{"firstName": "JOHN", "lastName": "DOE", "contacts": {"phoneNumber": "+33123456789"}}]);

    let out = ToolCatalog::new()
        .invoke(
            &mock.client(),
            "book_transfer",
            json!({
                "offer_id": "2094123123",
                "passengers": passengers,
                "contact_email": "john@example.com",
                "contact_phone": "+33123456789"
            }),
        )
        .await?;

    assert_eq!(
        out,
        json!({"order_id": "VEg0Wk43WF", "confirmation_number": "5362", "status": "CONFIRMED"})
    );
    let sent = mock.only_api_request().json();
    assert_eq!(
        sent,
        json!({"data": {
            "type": "transfer-order",
            "offerId": "2094123123",
            "passengers": passengers,
            "contacts": [{"emailAddress": "john@example.com", "phoneNumber": "+33123456789"}]
        }})
    );
    Ok(())
}

#[tokio::test]
async fn transfer_order_lookup_and_cancel() -> Result<()> {
    let mock = MockUpstream::start().await;
    mock.on(
        Method::GET,
        "/v1/booking/transfer-orders/VEg0Wk43WF",
        200,
        json!({"data": {
            "id": "VEg0Wk43WF",
            "confirmationNumber": "5362",
            "status": "CONFIRMED",
            "transferDetails": {"pickup": "CDG"},
            "passengers": [{"firstName": "JOHN"}]
        }}),
    );
    mock.on_text(Method::DELETE, "/v1/booking/transfer-orders/VEg0Wk43WF", 204, "");
    let catalog = ToolCatalog::new();
    let client = mock.client();

    let order = catalog
        .invoke(&client, "get_transfer_order", json!({"order_id": "VEg0Wk43WF"}))
        .await?;
    assert_eq!(
        order,
        json!({
            "order_id": "VEg0Wk43WF",
            "confirmation_number": "5362",
            "status": "CONFIRMED",
            "transfer_details": {"pickup": "CDG"},
            "passengers": [{"firstName": "JOHN"}]
        })
    );

    let cancelled = catalog
        .invoke(&client, "cancel_transfer", json!({"order_id": "VEg0Wk43WF"}))
        .await?;
    assert_eq!(
        cancelled,
        json!({"message": "Transfer VEg0Wk43WF cancelled successfully"})
    );

    let methods = mock
        .api_requests()
        .into_iter()
        .map(|r| r.method)
        .collect::<Vec<_>>();
    assert_eq!(methods, vec!["GET", "DELETE"]);
    Ok(())
}

#[tokio::test]
async fn cancel_with_a_body_reports_the_response() -> Result<()> {
    let mock = MockUpstream::start().await;
    let body = json!({"data": {"id": "VEg0Wk43WF", "status": "CANCELLED"}});
    mock.on(Method::DELETE, "/v1/booking/transfer-orders/VEg0Wk43WF", 200, body.clone());

    let out = ToolCatalog::new()
        .invoke(&mock.client(), "cancel_transfer", json!({"order_id": "VEg0Wk43WF"}))
        .await?;
    assert_eq!(
        out,
        json!({"message": "Cancellation processed", "response": body})
    );
    Ok(())
}
