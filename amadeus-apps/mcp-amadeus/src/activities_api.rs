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

//! # Tours and activities

use crate::client::{AmadeusClient, ApiRequest, path_segment};
use crate::error::Result;
use crate::projection::{at, data, data_object, list};
use crate::validate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

fn five() -> u32 {
    5
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug)]
pub struct SearchActivitiesParams {
    /// Latitude
    pub latitude: f64,
    /// Longitude
    pub longitude: f64,
    /// Search radius in km
    #[serde(default = "five")]
    pub radius: u32,
}

/// Search for tours and activities near a location
pub async fn search_activities(
    client: &AmadeusClient,
    params: SearchActivitiesParams,
) -> Result<Value> {
    validate::latitude("latitude", params.latitude)?;
    validate::longitude("longitude", params.longitude)?;

    let request = ApiRequest::get("/v1/shopping/activities")
        .query("latitude", params.latitude)
        .query("longitude", params.longitude)
        .query("radius", params.radius);
    let response = client.execute(&request).await?;

    let activities = data(&response)
        .iter()
        .take(20)
        .map(|a| {
            json!({
                "id": at(a, "/id"),
                "name": at(a, "/name"),
                "description": at(a, "/shortDescription"),
                "rating": at(a, "/rating"),
                "booking_link": at(a, "/bookingLink"),
                "price": at(a, "/price"),
                "pictures": list(a, "/pictures").iter().take(3).cloned().collect::<Vec<_>>(),
            })
        })
        .collect::<Vec<_>>();
    Ok(Value::Array(activities))
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug)]
pub struct ActivityIdParams {
    /// Activity ID
    pub activity_id: String,
}

/// Get detailed information about a specific activity
pub async fn get_activity_details(client: &AmadeusClient, params: ActivityIdParams) -> Result<Value> {
    validate::required("activity_id", &params.activity_id)?;
    let path = format!("/v1/shopping/activities/{}", path_segment(&params.activity_id));
    let activity = data_object(&client.get(&path, &[]).await?);

    Ok(json!({
        "id": at(&activity, "/id"),
        "name": at(&activity, "/name"),
        "description": at(&activity, "/description"),
        "rating": at(&activity, "/rating"),
        "reviews_count": at(&activity, "/reviewsCount"),
        "booking_link": at(&activity, "/bookingLink"),
        "price": at(&activity, "/price"),
        "duration": at(&activity, "/duration"),
        "categories": at(&activity, "/categories"),
        "pictures": at(&activity, "/pictures"),
    }))
}
