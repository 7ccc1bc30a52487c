//! Customer delivery notifications.
//!
//! `EmailSender` is the transport seam — `LogEmailSender` in dev (logs to
//! tracing), `HttpEmailSender` against a transactional email API,
//! `FakeEmailSender` in tests. `notify_customers` walks a planned trip and
//! emails each contact their estimated arrival, once.

use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::types::DeliveryTrip;

/// A rendered email ready to hand to a transport.
#[derive(Debug, Clone, Serialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Abstraction over an email transport.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, msg: EmailMessage) -> Result<()>;
}

/// Writes messages to the log instead of sending them (dev / staging).
pub struct LogEmailSender;

#[async_trait]
impl EmailSender for LogEmailSender {
    async fn send(&self, msg: EmailMessage) -> Result<()> {
        info!(
            to = %msg.to,
            subject = %msg.subject,
            "[LogEmailSender] Would send email\n{}",
            msg.text,
        );
        Ok(())
    }
}

/// Collects sent messages in memory for assertion in tests.
#[derive(Default)]
pub struct FakeEmailSender {
    sent: Mutex<Vec<EmailMessage>>,
}

impl FakeEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent_messages(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailSender for FakeEmailSender {
    async fn send(&self, msg: EmailMessage) -> Result<()> {
        self.sent.lock().unwrap().push(msg);
        Ok(())
    }
}

/// Posts messages as JSON to a transactional email API endpoint.
pub struct HttpEmailSender {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    from: String,
}

impl HttpEmailSender {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        from: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            from: from.into(),
        }
    }
}

#[derive(Serialize)]
struct OutgoingEmail<'a> {
    from: &'a str,
    #[serde(flatten)]
    message: &'a EmailMessage,
}

#[async_trait]
impl EmailSender for HttpEmailSender {
    async fn send(&self, msg: EmailMessage) -> Result<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&OutgoingEmail { from: &self.from, message: &msg })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("email API error {}: {}", status, body));
        }

        info!(to = %msg.to, subject = %msg.subject, "Delivery notification sent");
        Ok(())
    }
}

// =============================================================================
// Arrival notification template
// =============================================================================

/// Per-stop delivery notification, rendered into an `EmailMessage`.
pub struct ArrivalNotification<'a> {
    pub to: &'a str,
    pub contact_name: Option<&'a str>,
    pub address: &'a str,
    pub estimated_arrival: Option<DateTime<Utc>>,
    pub trip_date: DateTime<Utc>,
    pub driver_name: &'a str,
    pub vehicle: &'a str,
}

impl ArrivalNotification<'_> {
    pub fn render(&self) -> EmailMessage {
        let arrival = self
            .estimated_arrival
            .map(|ts| ts.format("%H:%M").to_string())
            .unwrap_or_else(|| "during the day".to_string());
        let greeting = match self.contact_name {
            Some(name) => format!("Hello {},", name),
            None => "Hello,".to_string(),
        };

        let subject = format!(
            "Delivery scheduled for {} around {}",
            self.trip_date.format("%d.%m.%y"),
            arrival,
        );
        let html = format!(
            r#"<p>{greeting}</p>
<p>Your delivery to <b>{address}</b> is scheduled for {date}, with an estimated arrival around <b>{arrival}</b>.</p>
<p>Driver: {driver}, vehicle {vehicle}.</p>"#,
            greeting = greeting,
            address = self.address,
            date = self.trip_date.format("%d.%m.%y"),
            arrival = arrival,
            driver = self.driver_name,
            vehicle = self.vehicle,
        );
        let text = format!(
            "{}\n\nYour delivery to {} is scheduled for {}, estimated arrival around {}.\nDriver: {}, vehicle {}.",
            greeting,
            self.address,
            self.trip_date.format("%d.%m.%y"),
            arrival,
            self.driver_name,
            self.vehicle,
        );

        EmailMessage {
            to: self.to.to_string(),
            subject,
            html,
            text,
        }
    }
}

/// Email every contact on the trip their estimated arrival.
///
/// Stops without a contact email, or already notified, are skipped. Each
/// notified stop is flagged so a re-run never emails the same contact twice.
/// Returns the number of emails sent.
pub async fn notify_customers(trip: &mut DeliveryTrip, sender: &dyn EmailSender) -> Result<u32> {
    let trip_date = trip.departure_time;
    let driver_name = trip.driver_name.clone();
    let vehicle = trip.vehicle.clone();
    let mut sent = 0;

    for stop in &mut trip.stops {
        if stop.notified_by_email {
            continue;
        }
        let Some(email) = stop.contact_email.clone() else {
            continue;
        };

        let message = ArrivalNotification {
            to: &email,
            contact_name: stop.contact_name.as_deref(),
            address: &stop.address,
            estimated_arrival: stop.estimated_arrival,
            trip_date,
            driver_name: &driver_name,
            vehicle: &vehicle,
        }
        .render();

        sender.send(message).await?;

        stop.notified_by_email = true;
        stop.email_sent_to = Some(email);
        sent += 1;
    }

    Ok(sent)
}
