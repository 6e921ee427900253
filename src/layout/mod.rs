pub mod fit;
pub mod style;

pub use fit::{Container, FitResult, LayoutError, OffsetAxis, ViewerDimensions, compute_fit};
pub use style::{PREVIEW_STYLE_ID, SCALED_VIEWER_SELECTOR, StyleRule, StyleSheet};

/// Which element the viewer is fit inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitTarget {
    Body,
    Navigator,
}

/// Document-level mode flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewerMode {
    pub scale_viewer: bool,
    pub presenter_view: bool,
    pub home: bool,
}

impl Default for ViewerMode {
    fn default() -> Self {
        Self {
            scale_viewer: false,
            presenter_view: false,
            home: true,
        }
    }
}

impl ViewerMode {
    pub fn fit_target(&self) -> FitTarget {
        if self.presenter_view {
            FitTarget::Navigator
        } else {
            FitTarget::Body
        }
    }

    pub fn css_classes(&self) -> impl Iterator<Item = (&'static str, bool)> {
        [
            ("scale-viewer", self.scale_viewer),
            ("presenter-view", self.presenter_view),
            ("home", self.home),
        ]
        .into_iter()
    }
}

/// The rendering side the scaler writes into. Implemented by the GTK window and
/// by in-memory surfaces.
pub trait LayoutSurface {
    /// Current size of `target`, or `None` while it has no allocation.
    fn container(&self, target: FitTarget) -> Option<Container>;

    fn apply_layout_transform(&mut self, dimensions: ViewerDimensions, fit: &FitResult);

    fn apply_mode(&mut self, mode: ViewerMode);
}

/// Owned replacement for the process-wide viewer globals.
#[derive(Debug, Clone, Default)]
pub struct ViewerLayoutState {
    pub dimensions: Option<ViewerDimensions>,
    pub mode: ViewerMode,
    pub last_fit: Option<FitResult>,
}

impl ViewerLayoutState {
    /// Recomputes the fit for the current mode and pushes it to `surface`.
    pub fn refit<S: LayoutSurface + ?Sized>(&mut self, surface: &mut S) -> Option<FitResult> {
        let dimensions = self.dimensions?;
        let target = self.mode.fit_target();
        let Some(container) = surface.container(target) else {
            log::debug!("Skipping fit, {target:?} has no allocation yet");
            return None;
        };
        let Some(fit) = compute_fit(dimensions, container) else {
            log::debug!("Skipping fit into empty container {container:?}");
            return None;
        };

        surface.apply_layout_transform(dimensions, &fit);
        self.last_fit = Some(fit);
        Some(fit)
    }
}
