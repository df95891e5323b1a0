//! Screen frames and window resolutions.

/// A single-channel screen buffer in row-major order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    height: usize,
    width: usize,
    data: Vec<u8>,
}

impl Frame {
    /// Wrap an engine screen buffer.
    ///
    /// Returns `None` if `data.len() != height * width`.
    pub fn new(height: usize, width: usize, data: Vec<u8>) -> Option<Self> {
        (data.len() == height * width).then_some(Self {
            height,
            width,
            data,
        })
    }

    /// A zero-filled frame, substituted when the engine has no further state.
    pub fn zeros(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            data: vec![0; height * width],
        }
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// `(height, width)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// Pixel at `(row, col)`.
    pub fn pixel(&self, row: usize, col: usize) -> Option<u8> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.data.get(row * self.width + col).copied()
    }

    /// Raw row-major bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the frame, returning its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

/// Window resolutions supported by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ScreenResolution {
    /// 160 × 120.
    Res160x120,
    /// 320 × 240.
    Res320x240,
    /// 640 × 480.
    Res640x480,
    /// 800 × 600, used when watching gameplay.
    #[default]
    Res800x600,
    /// 1024 × 768.
    Res1024x768,
}

impl ScreenResolution {
    /// Width in pixels.
    pub fn width(self) -> usize {
        self.dims().0
    }

    /// Height in pixels.
    pub fn height(self) -> usize {
        self.dims().1
    }

    fn dims(self) -> (usize, usize) {
        match self {
            Self::Res160x120 => (160, 120),
            Self::Res320x240 => (320, 240),
            Self::Res640x480 => (640, 480),
            Self::Res800x600 => (800, 600),
            Self::Res1024x768 => (1024, 768),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_wrong_length() {
        assert!(Frame::new(2, 3, vec![0; 5]).is_none());
        let frame = Frame::new(2, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(frame.pixel(1, 0), Some(4));
        assert_eq!(frame.pixel(2, 0), None);
    }

    #[test]
    fn zeros_has_shape() {
        let frame = Frame::zeros(120, 160);
        assert_eq!(frame.shape(), (120, 160));
        assert!(frame.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn default_resolution_is_800x600() {
        let res = ScreenResolution::default();
        assert_eq!((res.width(), res.height()), (800, 600));
    }
}
