use crate::config::LayoutConfig;
use crate::events::InboundMessage;
use crate::layout::{FitResult, LayoutSurface, ViewerDimensions, ViewerLayoutState};
use crate::update::UpdateMenuController;

/// What the caller has to refresh after an event was handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControllerAction {
    pub menu_changed: bool,
    pub relayout: bool,
}

impl ControllerAction {
    pub fn new(menu_changed: bool, relayout: bool) -> Self {
        Self {
            menu_changed,
            relayout,
        }
    }
}

pub struct Controller<S> {
    layout: ViewerLayoutState,
    updates: UpdateMenuController,
    surface: S,
    presenter_view_enabled: bool,
}

impl<S: LayoutSurface> Controller<S> {
    pub fn new(mut surface: S, config: &LayoutConfig) -> Self {
        let layout = ViewerLayoutState::default();
        surface.apply_mode(layout.mode);
        Self {
            layout,
            updates: UpdateMenuController::new(),
            surface,
            presenter_view_enabled: config.presenter_view,
        }
    }

    pub fn layout(&self) -> &ViewerLayoutState {
        &self.layout
    }

    pub fn updates(&self) -> &UpdateMenuController {
        &self.updates
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn apply_config(&mut self, config: &LayoutConfig) {
        self.presenter_view_enabled = config.presenter_view;
    }

    pub fn handle(&mut self, message: InboundMessage) -> ControllerAction {
        match message {
            InboundMessage::PresenterView(dimensions) => {
                let relayout = self.enter_scaled_mode(dimensions);
                ControllerAction::new(false, relayout)
            }
            InboundMessage::RemoveScaleViewer => {
                self.layout.mode.scale_viewer = false;
                self.surface.apply_mode(self.layout.mode);
                ControllerAction::new(false, false)
            }
            InboundMessage::Update(event) => {
                self.updates.handle(event);
                ControllerAction::new(true, false)
            }
            // Content goes through the dispatcher, not the layout.
            InboundMessage::ShowLine(_) | InboundMessage::ShowText(_) => {
                ControllerAction::default()
            }
        }
    }

    /// Host container changed size.
    pub fn resized(&mut self) -> ControllerAction {
        let relayout = self.refit().is_some();
        ControllerAction::new(false, relayout)
    }

    pub fn refit(&mut self) -> Option<FitResult> {
        self.layout.refit(&mut self.surface)
    }

    fn enter_scaled_mode(&mut self, dimensions: ViewerDimensions) -> bool {
        let mode = &mut self.layout.mode;
        if self.presenter_view_enabled {
            mode.presenter_view = true;
            mode.home = false;
        }
        mode.scale_viewer = true;
        self.surface.apply_mode(self.layout.mode);

        log::info!(
            "Scaling viewer {}x{} into {:?}",
            dimensions.width(),
            dimensions.height(),
            self.layout.mode.fit_target()
        );
        self.layout.dimensions = Some(dimensions);
        self.refit().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{
        Container, FitTarget, OffsetAxis, PREVIEW_STYLE_ID, StyleRule, StyleSheet, ViewerMode,
    };
    use crate::events::TextPayload;
    use crate::update::{UpdateEvent, UpdateMenuEntry, UpdateMenuState};

    struct HeadlessSurface {
        body: Option<Container>,
        navigator: Option<Container>,
        sheet: StyleSheet,
        mode: ViewerMode,
        applied: usize,
    }

    impl HeadlessSurface {
        fn new(body: Container, navigator: Container) -> Self {
            Self {
                body: Some(body),
                navigator: Some(navigator),
                sheet: StyleSheet::new(),
                mode: ViewerMode::default(),
                applied: 0,
            }
        }
    }

    impl LayoutSurface for HeadlessSurface {
        fn container(&self, target: FitTarget) -> Option<Container> {
            match target {
                FitTarget::Body => self.body,
                FitTarget::Navigator => self.navigator,
            }
        }

        fn apply_layout_transform(&mut self, dimensions: ViewerDimensions, fit: &FitResult) {
            self.sheet
                .replace_rule(PREVIEW_STYLE_ID, &StyleRule::scaled_viewer(dimensions, fit));
            self.applied += 1;
        }

        fn apply_mode(&mut self, mode: ViewerMode) {
            self.mode = mode;
        }
    }

    fn controller(presenter_view: bool) -> Controller<HeadlessSurface> {
        let surface = HeadlessSurface::new(
            Container::new(800.0, 800.0, 10.0),
            Container::new(400.0, 300.0, 0.0),
        );
        let config = LayoutConfig {
            presenter_view,
            ..LayoutConfig::default()
        };
        Controller::new(surface, &config)
    }

    fn presenter_view(width: f64, height: f64) -> InboundMessage {
        InboundMessage::PresenterView(ViewerDimensions::new(width, height).unwrap())
    }

    #[test]
    fn test_presenter_view_fits_into_body() {
        let mut c = controller(false);
        let action = c.handle(presenter_view(1920.0, 1080.0));

        assert!(action.relayout);
        assert!(c.surface().mode.scale_viewer);
        assert!(c.surface().mode.home);
        assert!(!c.surface().mode.presenter_view);

        let fit = c.layout().last_fit.unwrap();
        assert_eq!(fit.offset_axis, OffsetAxis::Top);
        assert_eq!(fit.offset_value, 175.0);
        assert_eq!(c.surface().sheet.len(), 1);
    }

    #[test]
    fn test_presenter_view_pref_fits_into_navigator() {
        let mut c = controller(true);
        c.handle(presenter_view(1600.0, 900.0));

        let mode = c.surface().mode;
        assert!(mode.presenter_view);
        assert!(!mode.home);
        assert_eq!(mode.fit_target(), FitTarget::Navigator);

        let fit = c.layout().last_fit.unwrap();
        assert_eq!(fit.scale, 0.25);
    }

    #[test]
    fn test_repeated_fits_keep_one_rule() {
        let mut c = controller(false);
        c.handle(presenter_view(1920.0, 1080.0));
        let first = c.layout().last_fit;
        c.resized();
        c.resized();

        assert_eq!(c.layout().last_fit, first);
        assert_eq!(c.surface().applied, 3);
        assert_eq!(c.surface().sheet.len(), 1);
    }

    #[test]
    fn test_resize_before_dimensions_is_noop() {
        let mut c = controller(false);
        assert_eq!(c.resized(), ControllerAction::default());
        assert_eq!(c.surface().applied, 0);
    }

    #[test]
    fn test_resize_recomputes_with_new_container() {
        let mut c = controller(false);
        c.handle(presenter_view(1920.0, 1080.0));

        c.surface_mut().body = Some(Container::new(3840.0, 1080.0, 0.0));
        assert!(c.resized().relayout);
        let fit = c.layout().last_fit.unwrap();
        assert_eq!(fit.offset_axis, OffsetAxis::Right);
        assert_eq!(fit.scale, 1.0);
    }

    #[test]
    fn test_unallocated_container_skips_fit() {
        let mut c = controller(false);
        c.surface_mut().body = None;
        assert!(!c.handle(presenter_view(1920.0, 1080.0)).relayout);
        assert!(c.surface().mode.scale_viewer);
        assert_eq!(c.layout().last_fit, None);
        assert!(c.surface().sheet.is_empty());
    }

    #[test]
    fn test_remove_scale_viewer_keeps_rule() {
        let mut c = controller(false);
        c.handle(presenter_view(1920.0, 1080.0));
        c.handle(InboundMessage::RemoveScaleViewer);

        assert!(!c.surface().mode.scale_viewer);
        assert_eq!(c.surface().sheet.len(), 1);
    }

    #[test]
    fn test_update_events_drive_menu() {
        let mut c = controller(false);
        let action = c.handle(InboundMessage::Update(UpdateEvent::UpdateAvailable));
        assert!(action.menu_changed);
        c.handle(InboundMessage::Update(UpdateEvent::UpdateDownloaded));

        assert_eq!(c.updates().state(), UpdateMenuState::ReadyToInstall);
        assert!(c.updates().is_visible(UpdateMenuEntry::InstallAndRestart));
    }

    #[test]
    fn test_content_messages_leave_layout_alone() {
        let mut c = controller(false);
        let action = c.handle(InboundMessage::ShowText(TextPayload {
            text: "Waheguru".to_string(),
        }));
        assert_eq!(action, ControllerAction::default());
        assert!(!c.surface().mode.scale_viewer);
        assert_eq!(c.surface().applied, 0);
    }

    #[test]
    fn test_config_reload_toggles_presenter_view() {
        let mut c = controller(false);
        c.apply_config(&LayoutConfig {
            presenter_view: true,
            ..LayoutConfig::default()
        });
        c.handle(presenter_view(1600.0, 900.0));
        assert!(c.surface().mode.presenter_view);
    }
}
