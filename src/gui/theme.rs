use gtk::gdk;
use gtk4 as gtk;

const BASE_CSS: &str = "
#viewer {
    background-color: #111;
    color: #f5f5f5;
}

.sttm-window.scale-viewer #viewer {
    border-radius: 4px;
}

#navigator {
    background-color: alpha(@theme_fg_color, 0.05);
}
";

pub fn add_provider(provider: &gtk::CssProvider) {
    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    provider.load_from_data(BASE_CSS);
    add_provider(&provider);
}
