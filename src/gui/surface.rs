use crate::dispatch::ViewerSink;
use crate::events::{LineId, ShabadId};
use crate::gui::theme;
use crate::layout::{
    Container, FitResult, FitTarget, LayoutSurface, PREVIEW_STYLE_ID, StyleRule, StyleSheet,
    ViewerDimensions, ViewerMode,
};
use gtk::prelude::*;
use gtk::{graphene, gsk};
use gtk4 as gtk;

/// The window-side half of the scaler: reads pane sizes and positions the viewer.
pub struct GtkSurface {
    window: gtk::ApplicationWindow,
    body: gtk::Widget,
    navigator: gtk::Widget,
    layer: gtk::Fixed,
    viewer: gtk::Widget,
    provider: gtk::CssProvider,
    sheet: StyleSheet,
    mode: ViewerMode,
    padding: f64,
}

impl GtkSurface {
    pub fn new(
        window: gtk::ApplicationWindow,
        body: gtk::Widget,
        navigator: gtk::Widget,
        layer: gtk::Fixed,
        viewer: gtk::Widget,
        padding: f64,
    ) -> Self {
        let provider = gtk::CssProvider::new();
        theme::add_provider(&provider);

        Self {
            window,
            body,
            navigator,
            layer,
            viewer,
            provider,
            sheet: StyleSheet::new(),
            mode: ViewerMode::default(),
            padding,
        }
    }

    pub fn set_padding(&mut self, padding: f64) {
        self.padding = padding;
    }

    fn target_widget(&self, target: FitTarget) -> &gtk::Widget {
        match target {
            FitTarget::Body => &self.body,
            FitTarget::Navigator => &self.navigator,
        }
    }
}

impl LayoutSurface for GtkSurface {
    fn container(&self, target: FitTarget) -> Option<Container> {
        let widget = self.target_widget(target);
        let (width, height) = (widget.width(), widget.height());
        (width > 0 && height > 0)
            .then(|| Container::new(f64::from(width), f64::from(height), self.padding))
    }

    fn apply_layout_transform(&mut self, dimensions: ViewerDimensions, fit: &FitResult) {
        // Size and type scale go through CSS, placement through the fixed layer.
        let rule = StyleRule::scaled_viewer(dimensions, fit).sizing_only();
        self.sheet.replace_rule(PREVIEW_STYLE_ID, &rule);
        self.provider.load_from_data(&self.sheet.to_css());

        let target = self.target_widget(self.mode.fit_target());
        let (origin_x, origin_y) = target
            .translate_coordinates(&self.layer, 0.0, 0.0)
            .unwrap_or((0.0, 0.0));
        let (scaled_width, _) = fit.scaled_size(dimensions);
        let x = origin_x + f64::from(target.width()) - fit.right() - scaled_width;
        let y = origin_y + fit.top();

        let transform = gsk::Transform::new()
            .translate(&graphene::Point::new(x as f32, y as f32))
            .scale(fit.scale as f32, fit.scale as f32);

        self.viewer
            .set_size_request(dimensions.width() as i32, dimensions.height() as i32);
        self.layer.set_child_transform(&self.viewer, Some(&transform));
    }

    fn apply_mode(&mut self, mode: ViewerMode) {
        self.mode = mode;
        for (class, on) in mode.css_classes() {
            if on {
                self.window.add_css_class(class);
            } else {
                self.window.remove_css_class(class);
            }
        }
        self.navigator.set_visible(mode.presenter_view);
        self.viewer.set_visible(mode.scale_viewer);
    }
}

/// The label the viewer content is rendered into.
pub struct GtkViewer {
    label: gtk::Label,
}

impl GtkViewer {
    pub fn new(label: gtk::Label) -> Self {
        Self { label }
    }
}

impl ViewerSink for GtkViewer {
    fn show_line(&mut self, shabad_id: &ShabadId, line_id: &LineId) {
        self.label
            .set_text(&format!("Shabad {shabad_id} \u{b7} Line {line_id}"));
    }

    fn show_text(&mut self, text: &str) {
        self.label.set_text(text);
    }
}
