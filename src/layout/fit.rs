use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum LayoutError {
    #[error("Viewer dimensions must be finite and positive, got {width}x{height}")]
    InvalidDimensions { width: f64, height: f64 },
}

/// Native pixel size of the content being fit. Both sides are strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerDimensions {
    width: f64,
    height: f64,
}

impl ViewerDimensions {
    pub fn new(width: f64, height: f64) -> Result<Self, LayoutError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if valid(width) && valid(height) {
            Ok(Self { width, height })
        } else {
            Err(LayoutError::InvalidDimensions { width, height })
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn ratio(&self) -> f64 {
        self.width / self.height
    }

    /// One hundredth of the content height, the relative type-scale unit.
    pub fn font_size(&self) -> f64 {
        self.height / 100.0
    }
}

#[derive(Deserialize)]
struct RawDimensions {
    width: f64,
    height: f64,
}

impl<'de> Deserialize<'de> for ViewerDimensions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawDimensions::deserialize(deserializer)?;
        Self::new(raw.width, raw.height).map_err(serde::de::Error::custom)
    }
}

/// Rendered size of the host element at fit time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Container {
    pub width: f64,
    pub height: f64,
    pub padding_right: f64,
}

impl Container {
    pub fn new(width: f64, height: f64, padding_right: f64) -> Self {
        Self {
            width,
            height,
            padding_right,
        }
    }
}

/// The edge that receives the centering offset on top of the padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetAxis {
    Top,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitResult {
    pub scale: f64,
    pub offset_axis: OffsetAxis,
    pub offset_value: f64,
    pub container_padding: f64,
}

impl FitResult {
    pub fn top(&self) -> f64 {
        match self.offset_axis {
            OffsetAxis::Top => self.container_padding + self.offset_value,
            OffsetAxis::Right => self.container_padding,
        }
    }

    pub fn right(&self) -> f64 {
        match self.offset_axis {
            OffsetAxis::Top => self.container_padding,
            OffsetAxis::Right => self.container_padding + self.offset_value,
        }
    }

    pub fn scaled_size(&self, dimensions: ViewerDimensions) -> (f64, f64) {
        (
            dimensions.width() * self.scale,
            dimensions.height() * self.scale,
        )
    }
}

/// Fits `dimensions` inside `container`, centered, preserving aspect ratio.
///
/// Tries a width fit first and keeps it only when it leaves vertical slack;
/// otherwise fits by height. Returns `None` for a container with no area, since
/// no positive scale exists for it.
pub fn compute_fit(dimensions: ViewerDimensions, container: Container) -> Option<FitResult> {
    if !(container.width > 0.0 && container.height > 0.0) {
        return None;
    }

    let viewer_ratio = dimensions.ratio();
    let proposed_height = container.width / viewer_ratio;

    let fit = if container.height > proposed_height {
        FitResult {
            scale: container.width / dimensions.width(),
            offset_axis: OffsetAxis::Top,
            offset_value: (container.height - proposed_height) / 2.0,
            container_padding: container.padding_right,
        }
    } else {
        let proposed_width = container.height * viewer_ratio;
        FitResult {
            scale: container.height / dimensions.height(),
            offset_axis: OffsetAxis::Right,
            offset_value: (container.width - proposed_width) / 2.0,
            container_padding: container.padding_right,
        }
    };

    Some(fit)
}
