//! Per-step screen models. Each owns its [`FormState`](super::session::FormState)
//! and a [`ScreenLifetime`](super::lifetime::ScreenLifetime) that bounds any
//! async work it starts.

mod company;
mod credentials;
mod employee;
mod user_type;

use std::time::Duration;

pub use company::CompanyScreen;
pub use credentials::CredentialsScreen;
pub use employee::EmployeeScreen;
pub use user_type::UserTypeScreen;

use crate::validation::{validate_image, ErrorKind, ImageUpload};

use super::lifetime::LifetimeGuard;

/// Pending simulated submit of the credentials screen.
#[derive(Debug, Clone)]
pub struct SubmitTicket {
    pub guard: LifetimeGuard,
    pub delay: Duration,
    pub login_mode: bool,
}

/// Pending removal of the success message.
#[derive(Debug, Clone)]
pub struct ClearTicket {
    pub guard: LifetimeGuard,
    pub delay: Duration,
}

/// Pending data-URI conversion for a selected image.
#[derive(Debug, Clone)]
pub struct PreviewTicket {
    pub guard: LifetimeGuard,
    pub upload: ImageUpload,
    generation: u64,
}

/// Optional image on a profile screen. Memory only.
#[derive(Debug, Clone, Default)]
pub struct ImageSlot {
    upload: Option<ImageUpload>,
    preview: Option<String>,
    generation: u64,
}

impl ImageSlot {
    /// Validates and records `upload`. A rejected file leaves the current image
    /// in place.
    fn select(
        &mut self,
        upload: ImageUpload,
        guard: LifetimeGuard,
    ) -> Result<PreviewTicket, ErrorKind> {
        validate_image(&upload)?;
        self.generation += 1;
        self.upload = Some(upload.clone());
        self.preview = None;
        Ok(PreviewTicket {
            guard,
            upload,
            generation: self.generation,
        })
    }

    /// Applies the preview unless the screen ended or a newer file replaced it.
    fn apply(&mut self, ticket: &PreviewTicket, uri: String) -> bool {
        if !ticket.guard.is_alive() || ticket.generation != self.generation {
            return false;
        }
        self.preview = Some(uri);
        true
    }

    /// Drops an upload whose preview never arrived. A cancelled preview is
    /// not re-issued, so the slot would otherwise stay pending.
    fn drop_pending(&mut self) {
        if self.upload.is_some() && self.preview.is_none() {
            self.clear();
        }
    }

    fn clear(&mut self) {
        self.generation += 1;
        self.upload = None;
        self.preview = None;
    }

    pub fn upload(&self) -> Option<&ImageUpload> {
        self.upload.as_ref()
    }

    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }
}
