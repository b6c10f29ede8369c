use std::collections::BTreeMap;

use crate::{
    CardError, CardResult,
    prompt::{
        styles::style_prefix,
        template::{extract_variables, fill_template},
    },
};

/// Inputs for one prompt: tone, template body, source content, and variable values.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PromptRequest {
    pub style: String,
    pub template: String,
    pub core_content: String,
    #[serde(default)]
    pub values: BTreeMap<String, String>,
}

impl PromptRequest {
    /// Template variables that have no non-empty value yet.
    pub fn missing_variables(&self) -> Vec<String> {
        extract_variables(&self.template)
            .into_iter()
            .filter(|v| self.values.get(v).is_none_or(|s| s.is_empty()))
            .collect()
    }

    pub fn is_ready(&self) -> bool {
        !self.core_content.is_empty() && self.missing_variables().is_empty()
    }
}

/// Assemble the final prompt text without checking completeness.
pub fn generate_prompt(
    style: &str,
    template: &str,
    core_content: &str,
    values: &BTreeMap<String, String>,
) -> String {
    let prefix = style_prefix(style);
    let filled = fill_template(template, values);
    format!(
        "\n--- Prompt 指令 ---\n{prefix}\n\n--- 核心內容 ---\n{core_content}\n\n--- 套用模板後的貼文草稿 ---\n{filled}\n"
    )
}

/// Assemble the final prompt once core content and every variable are filled in.
#[tracing::instrument(skip(request), fields(style = %request.style))]
pub fn build_prompt(request: &PromptRequest) -> CardResult<String> {
    if request.core_content.is_empty() {
        return Err(CardError::validation("core content must not be empty"));
    }
    let missing = request.missing_variables();
    if !missing.is_empty() {
        return Err(CardError::validation(format!(
            "template variables without a value: {}",
            missing.join(", ")
        )));
    }
    Ok(generate_prompt(
        &request.style,
        &request.template,
        &request.core_content,
        &request.values,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/prompt/builder.rs"]
mod tests;
