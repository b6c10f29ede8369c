use std::{
    collections::{BTreeMap, BTreeSet},
    fs::File,
    io::BufReader,
    path::Path,
    sync::LazyLock,
};

use regex::Regex;

use crate::{CardError, CardResult};

static VARIABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([^}]+)\}\}").expect("variable pattern is a valid regex"));

/// Distinct `{{name}}` variables in `template`, trimmed and sorted.
pub fn extract_variables(template: &str) -> Vec<String> {
    VARIABLE_RE
        .captures_iter(template)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Replace each literal `{{name}}` with its value.
///
/// Only the exact spelling is replaced: a template written `{{ name }}` keeps that occurrence.
pub fn fill_template(template: &str, values: &BTreeMap<String, String>) -> String {
    let mut out = template.to_string();
    for (name, value) in values {
        out = out.replace(&format!("{{{{{name}}}}}"), value);
    }
    out
}

/// A named prompt template body.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Template {
    pub name: String,
    pub body: String,
}

const EVENT_TEMPLATE: &str = "
🎉 重磅消息！我們的 [活動名稱] 活動即將開始！
日期：{{日期}}
地點：{{地點}}
主題：{{主題}}

詳細內容：
{{核心內容}}

趕快點擊 {{報名連結}} 了解更多資訊並報名參加吧！
#{{Hashtag1}} #{{Hashtag2}}
";

const PRODUCT_TEMPLATE: &str = "
✨ 全新登場！隆重介紹我們的 {{產品名稱}}！
這款產品擁有以下突破性特色：
1. {{特色一}}
2. {{特色二}}

{{核心內容}}

立即體驗，享受 {{限時優惠}}！
👉 購買連結：{{購買連結}}
";

/// Ordered collection of templates; names are unique and insertion order is kept.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct TemplateLibrary {
    templates: Vec<Template>,
}

impl Default for TemplateLibrary {
    fn default() -> Self {
        Self {
            templates: vec![
                Template {
                    name: "活動宣傳基礎模板".to_string(),
                    body: EVENT_TEMPLATE.to_string(),
                },
                Template {
                    name: "產品發表模板".to_string(),
                    body: PRODUCT_TEMPLATE.to_string(),
                },
            ],
        }
    }
}

impl TemplateLibrary {
    /// Parse a JSON array of `{ "name", "body" }` objects.
    pub fn from_reader<R: std::io::Read>(r: R) -> CardResult<Self> {
        let templates: Vec<Template> = serde_json::from_reader(r)
            .map_err(|e| CardError::config(format!("parse template library JSON: {e}")))?;
        let mut lib = Self {
            templates: Vec::with_capacity(templates.len()),
        };
        for t in templates {
            lib.save(t.name, t.body)?;
        }
        if lib.is_empty() {
            return Err(CardError::config("template library must not be empty"));
        }
        Ok(lib)
    }

    pub fn from_path(path: impl AsRef<Path>) -> CardResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            CardError::config(format!("open template library '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.iter().map(|t| t.name.as_str())
    }

    pub fn first_name(&self) -> Option<&str> {
        self.templates.first().map(|t| t.name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.templates
            .iter()
            .find(|t| t.name == name)
            .map(|t| t.body.as_str())
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Insert or overwrite `name`. Overwriting keeps the template's position.
    pub fn save(&mut self, name: impl Into<String>, body: impl Into<String>) -> CardResult<()> {
        let name = name.into();
        if name.is_empty() {
            return Err(CardError::validation("template name must not be empty"));
        }
        let body = body.into();
        match self.templates.iter_mut().find(|t| t.name == name) {
            Some(t) => t.body = body,
            None => self.templates.push(Template { name, body }),
        }
        Ok(())
    }

    /// Remove `name`. The last remaining template cannot be deleted.
    pub fn delete(&mut self, name: &str) -> CardResult<Template> {
        if self.templates.len() <= 1 {
            return Err(CardError::validation(
                "cannot delete the last remaining template",
            ));
        }
        let pos = self
            .templates
            .iter()
            .position(|t| t.name == name)
            .ok_or_else(|| CardError::validation(format!("unknown template '{name}'")))?;
        Ok(self.templates.remove(pos))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/prompt/template.rs"]
mod tests;
