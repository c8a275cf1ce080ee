//! UI event handlers.
//!
//! The controller owns no screen state. Each handler takes the
//! [`EditableSession`] of the screen that raised the event, updates it, and
//! returns what the screen needs to redraw.
//!
//! Generating is single-flight per controller: clones share one in-flight
//! flag, and a press while a call is running is refused without touching
//! the session. The heavy work runs on tokio's blocking pool so the caller's
//! executor stays responsive.

use crate::metadata;
use crate::process::Pipeline;
use crate::rotation::Rotation;
use crate::session::{EditableSession, Status};
use crate::types::{ImageHandle, WatermarkText};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Clone)]
pub struct Controller {
    pipeline: Arc<Pipeline>,
    in_flight: Arc<AtomicBool>,
}

/// Clears the in-flight flag when dropped, including on panic.
///
/// Owned by the blocking worker, so a caller dropping the generate future
/// does not clear the flag while the worker is still running.
struct InFlightGuard(Arc<AtomicBool>);

impl InFlightGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(Arc::clone(flag)))
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Controller {
    pub fn new(pipeline: Arc<Pipeline>) -> Self {
        Self {
            pipeline,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Whether a generate call is currently running.
    pub fn is_generating(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Prefill the text from the image's EXIF and start a fresh edit.
    ///
    /// Never fails: unreadable metadata yields the stock values.
    pub fn on_image_selected<'s>(
        &self,
        session: &'s mut EditableSession,
        image: ImageHandle,
    ) -> &'s WatermarkText {
        let fields = metadata::extract(&image);
        log::debug!("selected {}: {fields:?}", image.describe());
        session.select(image, WatermarkText::from(&fields));
        &session.text
    }

    /// Add a clockwise quarter turn. No-op without a selected image.
    pub fn on_rotate_pressed(&self, session: &mut EditableSession) -> Rotation {
        if session.has_image() {
            session.rotate()
        } else {
            session.rotation_delta
        }
    }

    /// Compose and store the selected image with the session's current text
    /// and rotation.
    ///
    /// Returns `false` without changing the session when no image is selected
    /// or another call is in flight. Otherwise the status ends as `Saved` or
    /// `Failed` and the result says which.
    pub async fn on_generate_pressed(&self, session: &mut EditableSession) -> bool {
        let Some(image) = session.image.clone() else {
            log::debug!("generate pressed without an image");
            return false;
        };
        let Some(guard) = InFlightGuard::acquire(&self.in_flight) else {
            log::debug!("generate already in flight, ignoring press");
            return false;
        };

        session.status = Status::Generating;
        log::info!("generating frame for {}", image.describe());

        let pipeline = Arc::clone(&self.pipeline);
        let text = session.text.clone();
        let delta = session.rotation_delta;
        let outcome = tokio::task::spawn_blocking(move || {
            let _guard = guard;
            pipeline.process_and_save(&image, &text, delta)
        })
        .await;

        match outcome {
            Ok(Ok(path)) => {
                log::info!("frame saved to {}", path.display());
                session.status = Status::Saved(path);
                true
            }
            Ok(Err(e)) => {
                log::error!("generate failed: {e}");
                session.status = Status::Failed;
                false
            }
            Err(e) => {
                log::error!("generate worker failed: {e}");
                session.status = Status::Failed;
                false
            }
        }
    }
}
