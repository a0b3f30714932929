//! Fakes for the outbound HTTP dependencies.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::{
    error::{Error, Result},
    models::song::Song,
    services::{
        catalog_service::Catalog,
        mail_service::{EmailMessage, Mailer},
    },
};

#[derive(Clone, Default)]
pub struct RecordingMailer {
    sent: Arc<Mutex<Vec<EmailMessage>>>,
    fail: bool,
}

impl RecordingMailer {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<EmailMessage> {
        self.sent().pop()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &EmailMessage) -> Result<()> {
        if self.fail {
            return Err(Error::OtpDeliveryFailed {
                reason: "email API responded with 503".to_string(),
            });
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

/// Returns a fixed result list and records the queries it saw.
#[derive(Clone, Default)]
pub struct StaticCatalog {
    songs: Vec<Song>,
    queries: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl StaticCatalog {
    pub fn with_songs(songs: Vec<Song>) -> Self {
        Self {
            songs,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl Catalog for StaticCatalog {
    async fn search_songs(&self, query: &str) -> Result<Vec<Song>> {
        self.queries.lock().unwrap().push(query.to_string());
        if self.fail {
            return Err(Error::CatalogError("connection timed out".to_string()));
        }
        Ok(self.songs.clone())
    }
}
