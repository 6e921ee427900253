use super::fit::{FitResult, OffsetAxis, ViewerDimensions};
use std::fmt;

/// Identifier of the single generated viewer rule.
pub const PREVIEW_STYLE_ID: &str = "preview-styles";
pub const SCALED_VIEWER_SELECTOR: &str = ".scale-viewer #viewer";

#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub property: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StyleRule {
    selector: String,
    declarations: Vec<Declaration>,
}

impl StyleRule {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            declarations: Vec::new(),
        }
    }

    pub fn declare(mut self, property: &'static str, value: impl Into<String>) -> Self {
        self.declarations.push(Declaration {
            property,
            value: value.into(),
        });
        self
    }

    /// The rule that places the viewer inside its container in scaled mode.
    pub fn scaled_viewer(dimensions: ViewerDimensions, fit: &FitResult) -> Self {
        let padding = px(fit.container_padding);
        let centered = format!("calc({} + {})", padding, px(fit.offset_value));

        let (right, top) = match fit.offset_axis {
            OffsetAxis::Top => (padding, centered),
            OffsetAxis::Right => (centered, padding),
        };

        Self::new(SCALED_VIEWER_SELECTOR)
            .declare("width", px(dimensions.width()))
            .declare("height", px(dimensions.height()))
            .declare("font-size", px(dimensions.font_size()))
            .declare("right", right)
            .declare("top", top)
            .declare("transform", format!("scale({})", fit.scale))
    }

    /// Keeps size and type scale only, with box sizes turned into minimums.
    /// Used where placement is done outside CSS.
    pub fn sizing_only(&self) -> Self {
        let declarations = self
            .declarations
            .iter()
            .filter_map(|d| {
                let property = match d.property {
                    "width" => "min-width",
                    "height" => "min-height",
                    "font-size" => "font-size",
                    _ => return None,
                };
                Some(Declaration {
                    property,
                    value: d.value.clone(),
                })
            })
            .collect();

        Self {
            selector: self.selector.clone(),
            declarations,
        }
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }

    pub fn declaration(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|d| d.property == property)
            .map(|d| d.value.as_str())
    }
}

impl fmt::Display for StyleRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{ ", self.selector)?;
        for d in &self.declarations {
            write!(f, "{}: {}; ", d.property, d.value)?;
        }
        write!(f, "}}")
    }
}

pub fn px(value: f64) -> String {
    format!("{value}px")
}

#[derive(Debug, Clone, PartialEq)]
struct StyleNode {
    id: String,
    text: String,
}

/// A document's generated style nodes, addressed by identifier.
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    nodes: Vec<StyleNode>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears and refills the node tagged `id`, creating it once if absent.
    pub fn replace_rule(&mut self, id: &str, rule: &StyleRule) {
        match self.nodes.iter_mut().find(|n| n.id == id) {
            Some(node) => {
                node.text.clear();
                node.text.push_str(&rule.to_string());
            }
            None => self.nodes.push(StyleNode {
                id: id.to_string(),
                text: rule.to_string(),
            }),
        }
    }

    pub fn rule_text(&self, id: &str) -> Option<&str> {
        self.nodes
            .iter()
            .find(|n| n.id == id)
            .map(|n| n.text.as_str())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn to_css(&self) -> String {
        self.nodes
            .iter()
            .map(|n| n.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
