use crate::foundation::{
    core::Canvas,
    error::{SlidecastError, SlidecastResult},
};

/// One composited output frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// A premultiplied frame filled with `rgba`.
    pub fn filled(canvas: Canvas, rgba: [u8; 4]) -> Self {
        let mut data = Vec::with_capacity(canvas.byte_len());
        for _ in 0..(canvas.width as usize) * (canvas.height as usize) {
            data.extend_from_slice(&rgba);
        }
        Self {
            width: canvas.width,
            height: canvas.height,
            data,
            premultiplied: true,
        }
    }

    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.offset(x, y);
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    pub(crate) fn offset(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * 4
    }

    /// Encoder contract: every frame has the canvas size and a full RGBA8 buffer.
    pub fn check_size(&self, canvas: Canvas) -> SlidecastResult<()> {
        if self.width != canvas.width || self.height != canvas.height {
            return Err(SlidecastError::internal(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                self.width, self.height, canvas.width, canvas.height
            )));
        }
        if self.data.len() != canvas.byte_len() {
            return Err(SlidecastError::internal(
                "frame data size mismatch with width*height*4",
            ));
        }
        Ok(())
    }
}
