mod wav;

pub use wav::WavFrameSource;

use crate::error::Result;

/// Block of equally sized frames cut from a recording
#[derive(Debug, Clone, PartialEq)]
pub struct Frames {
    pub frames: Vec<Vec<f64>>,
    pub sample_rate: u32,
}

impl Frames {
    pub fn frame_size(&self) -> usize {
        self.frames.first().map_or(0, |f| f.len())
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Reader handing out consecutive frames of one channel of a recording
pub trait FrameSource {
    /// Read `frame_count` frames starting at frame `frame_offset`
    fn read_frames(&mut self, frame_count: usize, frame_offset: usize) -> Result<Frames>;

    fn sample_rate(&self) -> u32;

    fn frame_size(&self) -> usize;
}
