//! Binds the session state machine to its sources and the persistence writer

use crate::canvas::render::{render_canvas, render_overlay};
use crate::io::error::{Result, invalid_source};
use crate::io::image::load_image;
use crate::io::persistence::{PersistReport, PersistenceWriter};
use crate::session::state::{Notice, PersistRequest, Session, SessionEvent};
use crate::sources::prescriptions::PrescriptionIndex;
use crate::sources::queue::{ImageQueue, base_name};
use image::RgbImage;

/// What the operator sees about the current image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageStatus {
    /// File name of the current image
    pub file_name: String,
    /// Base name used for lookups and output naming
    pub base_name: String,
    /// Queue position, zero-based
    pub index: usize,
    /// Images after this one
    pub remaining: usize,
    /// Reference text from the prescription index
    pub prescription: String,
    /// Regions saved so far on this image
    pub region_count: usize,
}

/// Drives a [`Session`] against real images and output directories
///
/// Events are applied to a copy of the session; the copy replaces the live
/// session only after any persistence it requested has succeeded.
pub struct SessionController {
    session: Session,
    prescriptions: PrescriptionIndex,
    queue: ImageQueue,
    writer: PersistenceWriter,
    frame: Option<(usize, RgbImage)>,
    persisted_images: usize,
}

impl SessionController {
    /// Create a controller awaiting [`SessionController::start`]
    pub const fn new(
        prescriptions: PrescriptionIndex,
        queue: ImageQueue,
        writer: PersistenceWriter,
    ) -> Self {
        Self {
            session: Session::new(),
            prescriptions,
            queue,
            writer,
            frame: None,
            persisted_images: 0,
        }
    }

    /// Supply the sources to the session and render the first image
    ///
    /// # Errors
    ///
    /// Returns an error if the first image cannot be loaded
    pub fn start(&mut self) -> Result<Option<Notice>> {
        let queue_len = self.queue.len();
        self.dispatch(SessionEvent::Setup { queue_len })
    }

    /// Apply one operator event, persisting and re-rendering as needed
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails or the next image cannot be
    /// loaded; the session is left as it was before the event
    pub fn dispatch(&mut self, event: SessionEvent) -> Result<Option<Notice>> {
        let transition = self.session.clone().handle(event);

        if let Some(request) = &transition.persist {
            self.persist(request)?;
            self.persisted_images += 1;
        }

        self.session = transition.session;
        self.refresh()?;
        Ok(transition.notice)
    }

    fn persist(&self, request: &PersistRequest) -> Result<PersistReport> {
        let path = self
            .queue
            .get(request.image_index)
            .ok_or_else(|| invalid_source(&format!("no image at position {}", request.image_index)))?;
        let frame = match &self.frame {
            Some((index, frame)) if *index == request.image_index => frame,
            _ => {
                return Err(invalid_source(&format!(
                    "no rendered frame for {}",
                    path.display()
                )));
            }
        };

        self.writer
            .persist(&base_name(path), frame, &request.regions)
    }

    // Frames are rendered once per image; region edits only change the overlay
    fn refresh(&mut self) -> Result<()> {
        let Some(index) = self.session.current_index() else {
            self.frame = None;
            return Ok(());
        };
        if matches!(&self.frame, Some((shown, _)) if *shown == index) {
            return Ok(());
        }

        let path = self
            .queue
            .get(index)
            .ok_or_else(|| invalid_source(&format!("no image at position {index}")))?;
        let source = load_image(path)?;
        self.frame = Some((index, render_canvas(&source)));
        log::debug!("Rendered {}", path.display());
        Ok(())
    }

    /// Live session state
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Images whose annotations reached disk in this run
    pub const fn persisted_images(&self) -> usize {
        self.persisted_images
    }

    /// Image queue in use
    pub const fn queue(&self) -> &ImageQueue {
        &self.queue
    }

    /// Canvas frame of the current image, without outlines
    pub fn frame(&self) -> Option<&RgbImage> {
        self.frame.as_ref().map(|(_, frame)| frame)
    }

    /// Canvas frame with saved regions and the draft outlined
    pub fn preview(&self) -> Option<RgbImage> {
        self.frame()
            .map(|frame| render_overlay(frame, self.session.regions(), self.session.draft()))
    }

    /// Status of the current image, `None` once finished
    pub fn status(&self) -> Option<ImageStatus> {
        let index = self.session.current_index()?;
        let path = self.queue.get(index)?;
        let base = base_name(path);

        Some(ImageStatus {
            file_name: path
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .into_owned(),
            prescription: self.prescriptions.text_for(&base).to_string(),
            base_name: base,
            index,
            remaining: self.session.remaining(),
            region_count: self.session.regions().len(),
        })
    }
}
