//! Current image loading

use super::controller::{Controller, Event};
use crate::api::{ApiError, Backend};
use crate::constants::*;
use crate::types::*;
use crate::utils::decode_base64_png;
use std::sync::Arc;
use tracing::{debug, error};

impl<B: Backend> Controller<B> {
    /// Fetch the image the backend wants labeled next. On failure the stale
    /// image stays up.
    pub fn load_current_image(&mut self) {
        let backend = Arc::clone(&self.backend);
        self.spawn(async move {
            let result = backend
                .current_image()
                .await
                .and_then(|resp| decode_base64_png(&resp.image));
            Event::CurrentImage(result)
        });
    }

    pub(crate) fn apply_current_image(&mut self, result: Result<DecodedImage, ApiError>) {
        match result {
            Ok(image) => {
                self.image_generation += 1;
                debug!(
                    generation = self.image_generation,
                    width = image.size[0],
                    height = image.size[1],
                    "Current image loaded"
                );
                self.current_image = Some(LoadedImage {
                    generation: self.image_generation,
                    image,
                });
            }
            Err(e) => {
                error!(endpoint = CURRENT_IMAGE_PATH, error = %e, "Failed to load current image");
                self.notify(Notice::error(MSG_IMAGE_FAILED));
            }
        }
    }
}
