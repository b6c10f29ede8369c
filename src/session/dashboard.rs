use crate::{
    CardError, CardResult,
    foundation::core::Aspect,
    prompt::{
        builder::PromptRequest,
        styles::style_presets,
        template::{Template, TemplateLibrary},
    },
    render::{encode::OutputFormat, pipeline::RenderRequest},
    session::headline::Headline,
};

/// First entry of the headline picker; selecting it leaves the caption alone.
pub const SELECT_SENTINEL: &str = "--- 請選擇熱點文章 ---";

/// Download name for a card: first 10 caption characters (`/` made safe), then the ratio label.
pub fn suggested_file_name(caption: &str, aspect: Aspect, format: OutputFormat) -> String {
    let stem: String = caption.chars().take(10).collect::<String>().replace('/', "_");
    format!("{stem}_image_{}.{}", aspect.ratio_label(), format.extension())
}

/// State of the visual-card page. Every update returns a new value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DashboardState {
    headlines: Vec<Headline>,
    caption: String,
    aspect: Aspect,
}

impl DashboardState {
    pub fn headlines(&self) -> &[Headline] {
        &self.headlines
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn aspect(&self) -> Aspect {
        self.aspect
    }

    pub fn with_headlines(self, headlines: Vec<Headline>) -> Self {
        Self { headlines, ..self }
    }

    pub fn with_caption(self, caption: impl Into<String>) -> Self {
        Self {
            caption: caption.into(),
            ..self
        }
    }

    pub fn with_aspect(self, aspect: Aspect) -> Self {
        Self { aspect, ..self }
    }

    /// Picker entries: the sentinel followed by every headline title.
    pub fn title_options(&self) -> Vec<&str> {
        std::iter::once(SELECT_SENTINEL)
            .chain(self.headlines.iter().map(|h| h.title.as_str()))
            .collect()
    }

    /// Picker index matching the current caption, or 0 (the sentinel).
    pub fn selected_index(&self) -> usize {
        self.title_options()
            .iter()
            .position(|t| *t == self.caption)
            .unwrap_or(0)
    }

    /// Copy a listed headline into the editable caption. Unknown titles and the sentinel are
    /// ignored.
    pub fn select_headline(self, title: &str) -> Self {
        if title == SELECT_SENTINEL || !self.headlines.iter().any(|h| h.title == title) {
            return self;
        }
        self.with_caption(title)
    }

    pub fn render_request(&self, background: Option<Vec<u8>>) -> RenderRequest {
        RenderRequest {
            caption: self.caption.clone(),
            aspect: self.aspect,
            background,
        }
    }

    pub fn download_name(&self, format: OutputFormat) -> String {
        suggested_file_name(&self.caption, self.aspect, format)
    }
}

/// State of the prompt-builder page. Every update returns a new value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromptPageState {
    library: TemplateLibrary,
    selected_template: String,
    style: String,
}

impl Default for PromptPageState {
    fn default() -> Self {
        Self::new(TemplateLibrary::default())
    }
}

impl PromptPageState {
    pub fn new(library: TemplateLibrary) -> Self {
        let selected_template = library.first_name().unwrap_or_default().to_string();
        let style = style_presets()
            .first()
            .map(|p| p.key.to_string())
            .unwrap_or_default();
        Self {
            library,
            selected_template,
            style,
        }
    }

    pub fn library(&self) -> &TemplateLibrary {
        &self.library
    }

    pub fn selected_template(&self) -> &str {
        &self.selected_template
    }

    pub fn style(&self) -> &str {
        &self.style
    }

    pub fn current_template(&self) -> &str {
        self.library.get(&self.selected_template).unwrap_or_default()
    }

    pub fn with_style(self, style: impl Into<String>) -> Self {
        Self {
            style: style.into(),
            ..self
        }
    }

    pub fn select_template(self, name: &str) -> CardResult<Self> {
        if self.library.get(name).is_none() {
            return Err(CardError::validation(format!("unknown template '{name}'")));
        }
        Ok(Self {
            selected_template: name.to_string(),
            ..self
        })
    }

    /// Save (or overwrite) a template and select it.
    pub fn save_template(self, name: &str, body: &str) -> CardResult<Self> {
        let mut library = self.library;
        library.save(name, body)?;
        Ok(Self {
            library,
            selected_template: name.to_string(),
            style: self.style,
        })
    }

    /// Delete the selected template and select the first remaining one.
    pub fn delete_selected(self) -> CardResult<(Self, Template)> {
        let mut library = self.library;
        let removed = library.delete(&self.selected_template)?;
        let selected_template = library.first_name().unwrap_or_default().to_string();
        Ok((
            Self {
                library,
                selected_template,
                style: self.style,
            },
            removed,
        ))
    }

    /// Request for the current selections with the given content and variable values.
    pub fn prompt_request(
        &self,
        core_content: impl Into<String>,
        values: std::collections::BTreeMap<String, String>,
    ) -> PromptRequest {
        PromptRequest {
            style: self.style.clone(),
            template: self.current_template().to_string(),
            core_content: core_content.into(),
            values,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/dashboard.rs"]
mod tests;
