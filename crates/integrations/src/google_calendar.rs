// Copyright (C) 2026 SIFUT Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Google Calendar v3 events client.
//!
//! Authenticates with a bearer access token obtained elsewhere. Token
//! refresh is not handled here.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use sifut::{CalendarEvent, CalendarEventRef, CalendarFailure, CalendarGateway};
use tracing::info;

use crate::error::ProviderError;
use crate::http::{decode, send};

const GOOGLE_CALENDAR_BASE_URL: &str = "https://www.googleapis.com";

#[derive(Debug, Serialize)]
struct EventBody<'a> {
    summary: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    start: EventTime<'a>,
    end: EventTime<'a>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attendees: Vec<Attendee<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EventTime<'a> {
    date_time: String,
    time_zone: &'a str,
}

#[derive(Debug, Serialize)]
struct Attendee<'a> {
    email: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatedEvent {
    id: String,
    #[serde(default)]
    html_link: Option<String>,
}

/// Calendar gateway writing to the token owner's primary calendar.
pub struct GoogleCalendarClient {
    http_client: Client,
    access_token: String,
    base_url: String,
}

impl GoogleCalendarClient {
    #[must_use]
    pub fn new(http_client: Client, access_token: String) -> Self {
        Self {
            http_client,
            access_token,
            base_url: GOOGLE_CALENDAR_BASE_URL.to_string(),
        }
    }

    /// Overrides the API host.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    fn events_url(&self) -> String {
        format!("{}/calendar/v3/calendars/primary/events", self.base_url)
    }

    /// Inserts `event` into the primary calendar.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` for transport failures, error statuses, or a
    /// response without an event id.
    pub async fn insert_event(&self, event: &CalendarEvent) -> Result<CalendarEventRef, ProviderError> {
        let time_zone: &str = event.window.timezone_name();
        let body: EventBody<'_> = EventBody {
            summary: &event.summary,
            description: event.description.as_deref(),
            start: EventTime {
                date_time: event.window.start.to_rfc3339(),
                time_zone,
            },
            end: EventTime {
                date_time: event.window.end.to_rfc3339(),
                time_zone,
            },
            attendees: event
                .attendees
                .iter()
                .map(|email| Attendee { email })
                .collect(),
        };

        let request = self
            .http_client
            .post(self.events_url())
            .bearer_auth(&self.access_token)
            .json(&body);

        let created: CreatedEvent = decode(send("google_calendar", request).await?).await?;
        info!(event_id = %created.id, "Created calendar event");

        Ok(CalendarEventRef {
            event_id: created.id,
            html_link: created.html_link,
        })
    }

    /// Deletes an event from the primary calendar.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` for transport failures or error statuses.
    pub async fn remove_event(&self, event_id: &str) -> Result<(), ProviderError> {
        let request = self
            .http_client
            .delete(format!("{}/{event_id}", self.events_url()))
            .bearer_auth(&self.access_token);

        send("google_calendar", request).await?;
        info!(event_id, "Deleted calendar event");
        Ok(())
    }
}

#[async_trait]
impl CalendarGateway for GoogleCalendarClient {
    async fn create_shift_event(
        &self,
        event: &CalendarEvent,
    ) -> Result<CalendarEventRef, CalendarFailure> {
        Ok(self.insert_event(event).await?)
    }

    async fn delete_event(&self, event_id: &str) -> Result<(), CalendarFailure> {
        Ok(self.remove_event(event_id).await?)
    }
}
