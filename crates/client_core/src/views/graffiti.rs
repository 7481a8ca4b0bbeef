//! Graffiti add/edit form.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use shared::{
    domain::{GraffitiId, ShiftTime},
    protocol::{Endpoint, GraffitiFields, GraffitiSaveRequest, LocationFields},
};
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

use crate::{
    dispatch::{dispatch, UiEffect},
    gallery::Gallery,
    guard::SubmissionGuard,
    rpc::RpcClient,
    upload::{ImageUploader, UploadTarget},
    views::{blank_fields, optional_number, AuthorRows, EditorMode, SaveHandler, TagList},
};

pub const INVALID_GRAFFITI: &str = "Invalid graffiti data!";

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

/// Raw text of the editor inputs.
#[derive(Debug, Clone)]
pub struct GraffitiForm {
    pub complaint_id: String,
    pub date: String,
    pub time: String,
    pub shift_time: ShiftTime,
    pub intervening: String,
    pub companions: String,
    pub notes: String,
    pub country: String,
    pub city: String,
    pub street: String,
    pub place: String,
    pub property: String,
    /// `"lat, long"`
    pub gps: String,
}

impl Default for GraffitiForm {
    fn default() -> Self {
        Self {
            complaint_id: String::new(),
            date: String::new(),
            time: String::new(),
            shift_time: ShiftTime::Morning,
            intervening: String::new(),
            companions: String::new(),
            notes: String::new(),
            country: String::new(),
            city: String::new(),
            street: String::new(),
            place: String::new(),
            property: String::new(),
            gps: String::new(),
        }
    }
}

/// Date and optional time, read as UTC. A time without a date is invalid.
pub(crate) fn parse_timestamp(date: &str, time: &str) -> Result<Option<i64>, ()> {
    let (date, time) = (date.trim(), time.trim());
    if date.is_empty() {
        return if time.is_empty() { Ok(None) } else { Err(()) };
    }
    let day = NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|_| ())?;
    let clock = if time.is_empty() {
        NaiveTime::MIN
    } else {
        NaiveTime::parse_from_str(time, TIME_FORMAT).map_err(|_| ())?
    };
    Ok(Some(NaiveDateTime::new(day, clock).and_utc().timestamp()))
}

/// `"lat, long"` into `(lat, long)`.
pub(crate) fn parse_gps(raw: &str) -> Result<Option<(f64, f64)>, ()> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let (lat, long) = raw.split_once(',').ok_or(())?;
    let lat: f64 = lat.trim().parse().map_err(|_| ())?;
    let long: f64 = long.trim().parse().map_err(|_| ())?;
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&long) {
        return Err(());
    }
    Ok(Some((lat, long)))
}

pub struct GraffitiEditor {
    rpc: Arc<RpcClient>,
    mode: EditorMode<GraffitiId>,
    guard: SubmissionGuard,
    uploader: ImageUploader,
    authors: Mutex<AuthorRows>,
    tags: Mutex<TagList>,
}

impl GraffitiEditor {
    pub fn new(rpc: Arc<RpcClient>, mode: EditorMode<GraffitiId>) -> Self {
        Self::with_content(
            rpc,
            mode,
            UploadTarget::GRAFFITI,
            AuthorRows::default(),
            TagList::default(),
            Gallery::new(),
        )
    }

    /// Editor prefilled with a stored record's rows and images.
    pub fn with_content(
        rpc: Arc<RpcClient>,
        mode: EditorMode<GraffitiId>,
        target: UploadTarget,
        authors: AuthorRows,
        tags: TagList,
        gallery: Gallery,
    ) -> Self {
        Self {
            uploader: ImageUploader::with_gallery(rpc.clone(), target, gallery),
            rpc,
            mode,
            guard: SubmissionGuard::new(),
            authors: Mutex::new(authors),
            tags: Mutex::new(tags),
        }
    }

    pub fn mode(&self) -> EditorMode<GraffitiId> {
        self.mode
    }

    pub fn guard(&self) -> &SubmissionGuard {
        &self.guard
    }

    pub fn uploader(&self) -> &ImageUploader {
        &self.uploader
    }

    pub async fn authors(&self) -> MutexGuard<'_, AuthorRows> {
        self.authors.lock().await
    }

    pub async fn tags(&self) -> MutexGuard<'_, TagList> {
        self.tags.lock().await
    }

    pub async fn save(&self, form: GraffitiForm) -> UiEffect {
        let Some(_permit) = self.guard.try_hold() else {
            debug!("graffiti save already in flight");
            return UiEffect::Ignored;
        };

        let request = match self.build_request(form).await {
            Ok(request) => request,
            Err(fields) => return UiEffect::Highlight(fields),
        };

        let (endpoint, known_id) = match self.mode {
            EditorMode::Create => (Endpoint::GraffitiAdd, None),
            EditorMode::Edit(id) => (Endpoint::GraffitiEdit, Some(id.0)),
        };
        let handler = SaveHandler {
            known_id,
            location: |id| self.rpc.navigator().graffiti(GraffitiId(id)),
            invalid_request: INVALID_GRAFFITI,
        };
        let effect = dispatch(&handler, self.rpc.call(endpoint, &request).await);
        if let UiEffect::Navigate(target) = &effect {
            info!(endpoint = endpoint.path(), %target, "graffiti saved");
        }
        effect
    }

    async fn build_request(
        &self,
        form: GraffitiForm,
    ) -> Result<GraffitiSaveRequest, Vec<&'static str>> {
        let mut invalid = blank_fields(&[("complaint_id", &form.complaint_id)]);

        let datetime = parse_timestamp(&form.date, &form.time).unwrap_or_else(|()| {
            invalid.push("date");
            None
        });
        let gps = parse_gps(&form.gps).unwrap_or_else(|()| {
            invalid.push("gps");
            None
        });
        let companions = optional_number::<u32>(&form.companions).unwrap_or_else(|()| {
            invalid.push("companions");
            None
        });
        if !invalid.is_empty() {
            return Err(invalid);
        }

        Ok(GraffitiSaveRequest {
            graffiti: GraffitiFields {
                id: match self.mode {
                    EditorMode::Create => None,
                    EditorMode::Edit(id) => Some(id),
                },
                complaint_id: form.complaint_id.trim().to_string(),
                datetime,
                shift_time: form.shift_time,
                intervening: form.intervening,
                companions: companions.unwrap_or(0),
                notes: form.notes,
            },
            location: LocationFields {
                country: form.country,
                city: form.city,
                street: form.street,
                place: form.place,
                property: form.property,
                gps_lat: gps.map(|(lat, _)| lat),
                gps_long: gps.map(|(_, long)| long),
            },
            authors: self.authors.lock().await.refs(),
            images: self.uploader.image_ids().await,
            tags: self.tags.lock().await.to_vec(),
        })
    }
}

#[cfg(test)]
#[path = "../tests/graffiti_tests.rs"]
mod tests;
