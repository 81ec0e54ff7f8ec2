//! Image editor side tool: gating for the single outstanding generation call.
//!
//! The call itself is made by the JS host; this session only validates input,
//! holds the busy flag and keeps whatever the call produced for display.

use base64::Engine;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageEditError {
    #[error("Please upload an image and enter a prompt.")]
    MissingInput,

    #[error("An image is already being generated.")]
    Busy,

    #[error("An error occurred: {0}")]
    Api(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageData {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageData {
    /// `data:` URL suitable for an `<img src>`.
    pub fn data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type,
            base64::engine::general_purpose::STANDARD.encode(&self.bytes)
        )
    }
}

/// What the host should send to the generation API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditRequest {
    pub image: ImageData,
    pub prompt: String,
}

#[derive(Debug, Default)]
pub struct ImageEditSession {
    busy: bool,
    output: Option<ImageData>,
    error: Option<ImageEditError>,
}

impl ImageEditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn output(&self) -> Option<&ImageData> {
        self.output.as_ref()
    }

    /// Message for the inline error line, if the last attempt failed.
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(|e| e.to_string())
    }

    pub fn begin(
        &mut self,
        image: Option<ImageData>,
        prompt: &str,
    ) -> Result<EditRequest, ImageEditError> {
        if self.busy {
            return Err(ImageEditError::Busy);
        }
        let prompt = prompt.trim();
        let image = match image {
            Some(image) if !image.bytes.is_empty() && !prompt.is_empty() => image,
            _ => {
                self.error = Some(ImageEditError::MissingInput);
                return Err(ImageEditError::MissingInput);
            }
        };
        self.busy = true;
        self.error = None;
        self.output = None;
        log::info!("image edit started ({} bytes, {})", image.bytes.len(), image.mime_type);
        Ok(EditRequest {
            image,
            prompt: prompt.to_string(),
        })
    }

    /// Store the call's result and clear the busy flag.
    pub fn finish(&mut self, result: Result<ImageData, String>) {
        self.busy = false;
        match result {
            Ok(image) => self.output = Some(image),
            Err(message) => {
                log::warn!("image edit failed: {message}");
                self.error = Some(ImageEditError::Api(message));
            }
        }
    }
}
