//! Per-screen editing state.
//!
//! An [`EditableSession`] is plain data owned by the UI layer and handed to
//! the [`Controller`](crate::controller::Controller) by `&mut` on every event.
//! It never holds decoded pixels; the image is referenced by handle only.

use crate::rotation::Rotation;
use crate::types::{ImageHandle, WatermarkText};
use std::path::PathBuf;

/// What the screen tells the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Status {
    /// Nothing selected yet.
    #[default]
    Idle,
    /// Image selected, fields prefilled and editable.
    Ready,
    /// A generate call is running.
    Generating,
    /// Last generate call succeeded.
    Saved(PathBuf),
    /// Last generate call failed.
    Failed,
}

impl Status {
    pub fn message(&self) -> &'static str {
        match self {
            Status::Idle => "Ready. Please select a photo.",
            Status::Ready => "EXIF loaded. You can edit the text below.",
            Status::Generating => "Generating...",
            Status::Saved(_) => "Saved successfully to Gallery!",
            Status::Failed => "Error processing image.",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EditableSession {
    pub image: Option<ImageHandle>,
    pub text: WatermarkText,
    /// Quarter turns requested by the user, on top of the EXIF orientation.
    pub rotation_delta: Rotation,
    pub status: Status,
}

impl EditableSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    /// Replace the image and its text; manual rotation starts over.
    pub fn select(&mut self, image: ImageHandle, text: WatermarkText) {
        self.image = Some(image);
        self.text = text;
        self.rotation_delta = Rotation::Deg0;
        self.status = Status::Ready;
    }

    /// One more clockwise quarter turn.
    pub fn rotate(&mut self) -> Rotation {
        self.rotation_delta = self.rotation_delta.rotated_cw();
        self.rotation_delta
    }

    /// Back to the empty screen.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_idle() {
        let session = EditableSession::new();
        assert!(!session.has_image());
        assert_eq!(session.status, Status::Idle);
        assert_eq!(session.status.message(), "Ready. Please select a photo.");
        assert_eq!(session.rotation_delta, Rotation::Deg0);
    }

    #[test]
    fn select_resets_rotation() {
        let mut session = EditableSession::new();
        session.rotation_delta = Rotation::Deg180;
        session.select(ImageHandle::from_bytes(vec![0u8]), WatermarkText::default());

        assert!(session.has_image());
        assert_eq!(session.rotation_delta, Rotation::Deg0);
        assert_eq!(session.status.message(), "EXIF loaded. You can edit the text below.");
    }

    #[test]
    fn four_rotations_wrap() {
        let mut session = EditableSession::new();
        let seen: Vec<_> = (0..4).map(|_| session.rotate()).collect();
        assert_eq!(
            seen,
            vec![Rotation::Deg90, Rotation::Deg180, Rotation::Deg270, Rotation::Deg0]
        );
    }

    #[test]
    fn status_messages() {
        assert_eq!(Status::Generating.message(), "Generating...");
        assert_eq!(
            Status::Saved(PathBuf::from("x.jpg")).message(),
            "Saved successfully to Gallery!"
        );
        assert_eq!(Status::Failed.message(), "Error processing image.");
    }

    #[test]
    fn reset_clears_everything() {
        let mut session = EditableSession::new();
        session.select(ImageHandle::from_bytes(vec![0u8]), WatermarkText::default());
        session.rotate();
        session.reset();
        assert!(!session.has_image());
        assert_eq!(session.status, Status::Idle);
    }
}
