use crate::{
    controls::{Control, ControlPosition},
    core::config::ControlConfig,
    Result,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendItem {
    pub name: String,
    pub color: String,
}

/// Map legend with a title and colored items
pub struct LegendControl {
    position: ControlPosition,
    title: Option<String>,
    items: Vec<LegendItem>,
}

impl LegendControl {
    pub fn new(title: Option<String>, items: Vec<LegendItem>) -> Self {
        Self {
            position: ControlPosition::BottomRight,
            title,
            items,
        }
    }

    pub fn from_config(config: &ControlConfig) -> Result<Self> {
        let mut control = Self::new(
            config.option_as("title")?,
            config.option_as("items")?.unwrap_or_default(),
        );
        if let Some(position) = config.position {
            control.position = position;
        }
        Ok(control)
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn items(&self) -> &[LegendItem] {
        &self.items
    }

    pub fn set_items(&mut self, items: Vec<LegendItem>) {
        self.items = items;
    }

    /// Text rendition of the legend, one item per line
    pub fn render_text(&self) -> String {
        let mut lines = Vec::with_capacity(self.items.len() + 1);
        if let Some(title) = &self.title {
            lines.push(title.clone());
        }
        for item in &self.items {
            lines.push(format!("{} {}", item.color, item.name));
        }
        lines.join("\n")
    }
}

impl Control for LegendControl {
    fn id(&self) -> &str {
        "legend"
    }

    fn position(&self) -> ControlPosition {
        self.position
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_legend_from_config() {
        let config = ControlConfig::new("legend")
            .with_option("title", "ANC 1st visit")
            .with_option(
                "items",
                json!([
                    { "name": "0 - 50", "color": "#ffffb2" },
                    { "name": "50 - 100", "color": "#fd8d3c" }
                ]),
            );

        let legend = LegendControl::from_config(&config).unwrap();
        assert_eq!(legend.title(), Some("ANC 1st visit"));
        assert_eq!(legend.items().len(), 2);
        assert_eq!(legend.position(), ControlPosition::BottomRight);
        assert_eq!(
            legend.render_text(),
            "ANC 1st visit\n#ffffb2 0 - 50\n#fd8d3c 50 - 100"
        );
    }

    #[test]
    fn test_malformed_items() {
        let config = ControlConfig::new("legend").with_option("items", "nope");
        assert!(LegendControl::from_config(&config).is_err());
    }
}
