//! Notificaciones por email
//!
//! Cada alta de vehículo dispara un email transaccional. El envío es
//! best-effort: corre en una tarea aparte con timeout y su resultado solo
//! se registra en logs; nunca afecta a la respuesta del alta.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::models::vehicle::Vehicle;

const RESEND_API_URL: &str = "https://api.resend.com/emails";

/// Email listo para enviar
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct EmailMessage {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}

/// Proveedor externo de emails
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, message: EmailMessage) -> Result<()>;
}

/// Cliente de la API de Resend
pub struct ResendNotifier {
    api_key: String,
    api_url: String,
    client: reqwest::Client,
}

impl ResendNotifier {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self {
            api_key,
            api_url: RESEND_API_URL.to_string(),
            client,
        })
    }
}

#[async_trait]
impl Notifier for ResendNotifier {
    async fn send(&self, message: EmailMessage) -> Result<()> {
        debug!("📧 Enviando email '{}' a {:?}", message.subject, message.to);

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&message)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(anyhow!("Resend respondió {}: {}", status, error_text));
        }

        Ok(())
    }
}

/// Notifier sin proveedor configurado: solo deja constancia en logs
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledNotifier;

#[async_trait]
impl Notifier for DisabledNotifier {
    async fn send(&self, message: EmailMessage) -> Result<()> {
        info!("📭 Notificaciones desactivadas, email '{}' descartado", message.subject);
        Ok(())
    }
}

/// Remitente y destinatarios de las notificaciones de flota
#[derive(Debug, Clone)]
pub struct NotificationSettings {
    pub from: String,
    pub to: Vec<String>,
    pub timeout: Duration,
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Construir el email de "vehículo añadido"
pub fn vehicle_created_email(vehicle: &Vehicle, settings: &NotificationSettings) -> EmailMessage {
    let html = format!(
        "<h2>New vehicle added to the fleet</h2>\
         <p><strong>Registration:</strong> {}</p>\
         <p><strong>Make:</strong> {}</p>\
         <p><strong>MOT expiry:</strong> {}</p>",
        escape_html(&vehicle.reg_number),
        escape_html(&vehicle.make),
        vehicle.mot_expiry.format("%Y-%m-%d"),
    );

    EmailMessage {
        from: settings.from.clone(),
        to: settings.to.clone(),
        subject: format!("New vehicle added: {}", vehicle.reg_number),
        html,
    }
}

/// Lanzar la notificación de alta en segundo plano
pub fn spawn_vehicle_created_notification(
    notifier: Arc<dyn Notifier>,
    settings: &NotificationSettings,
    vehicle: &Vehicle,
) -> tokio::task::JoinHandle<()> {
    let message = vehicle_created_email(vehicle, settings);
    let timeout = settings.timeout;
    let reg_number = vehicle.reg_number.clone();

    tokio::spawn(async move {
        match tokio::time::timeout(timeout, notifier.send(message)).await {
            Ok(Ok(())) => info!("✅ Notificación enviada para {}", reg_number),
            Ok(Err(e)) => error!("❌ Error enviando notificación para {}: {}", reg_number, e),
            Err(_) => warn!(
                "⏱️ Timeout ({}s) enviando notificación para {}",
                timeout.as_secs(),
                reg_number
            ),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::vehicle::{VehicleStatus, VehicleType};
    use chrono::NaiveDate;
    use tokio::sync::mpsc;

    fn settings() -> NotificationSettings {
        NotificationSettings {
            from: "FleetSync <fleet@example.com>".to_string(),
            to: vec!["ops@example.com".to_string()],
            timeout: Duration::from_millis(200),
        }
    }

    fn vehicle() -> Vehicle {
        Vehicle {
            id: 9,
            reg_number: "AB12CDE".to_string(),
            make: "DAF <XF>".to_string(),
            vehicle_type: VehicleType::Hgv,
            mot_expiry: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            status: VehicleStatus::OnRoad,
        }
    }

    struct ChannelNotifier(mpsc::UnboundedSender<EmailMessage>);

    #[async_trait]
    impl Notifier for ChannelNotifier {
        async fn send(&self, message: EmailMessage) -> Result<()> {
            self.0.send(message).map_err(|e| anyhow!(e.to_string()))
        }
    }

    struct FailingNotifier;

    #[async_trait]
    impl Notifier for FailingNotifier {
        async fn send(&self, _message: EmailMessage) -> Result<()> {
            Err(anyhow!("provider down"))
        }
    }

    struct HangingNotifier;

    #[async_trait]
    impl Notifier for HangingNotifier {
        async fn send(&self, _message: EmailMessage) -> Result<()> {
            std::future::pending::<()>().await;
            Ok(())
        }
    }

    #[test]
    fn test_vehicle_created_email() {
        let email = vehicle_created_email(&vehicle(), &settings());

        assert_eq!(email.subject, "New vehicle added: AB12CDE");
        assert_eq!(email.to, vec!["ops@example.com".to_string()]);
        assert!(email.html.contains("AB12CDE"));
        assert!(email.html.contains("DAF &lt;XF&gt;"));
        assert!(email.html.contains("2025-01-01"));
    }

    #[tokio::test]
    async fn test_spawned_notification_delivers_message() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = spawn_vehicle_created_notification(
            Arc::new(ChannelNotifier(tx)),
            &settings(),
            &vehicle(),
        );

        handle.await.unwrap();
        let email = rx.recv().await.unwrap();
        assert_eq!(email.subject, "New vehicle added: AB12CDE");
    }

    #[tokio::test]
    async fn test_failures_and_timeouts_are_swallowed() {
        let failing = spawn_vehicle_created_notification(Arc::new(FailingNotifier), &settings(), &vehicle());
        assert!(failing.await.is_ok());

        let hanging = spawn_vehicle_created_notification(Arc::new(HangingNotifier), &settings(), &vehicle());
        assert!(hanging.await.is_ok());
    }

    #[tokio::test]
    async fn test_disabled_notifier_succeeds() {
        let email = vehicle_created_email(&vehicle(), &settings());
        assert!(DisabledNotifier.send(email).await.is_ok());
    }
}
