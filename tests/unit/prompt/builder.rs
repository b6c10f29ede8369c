use super::*;

fn request() -> PromptRequest {
    PromptRequest {
        style: "專業正式 (Professional)".to_string(),
        template: "日期：{{日期}}\n{{核心內容}}".to_string(),
        core_content: "週六免費講座".to_string(),
        values: BTreeMap::from([
            ("日期".to_string(), "5/1".to_string()),
            ("核心內容".to_string(), "AI 寫作".to_string()),
        ]),
    }
}

#[test]
fn prompt_layout_matches_sections() {
    let out = build_prompt(&request()).unwrap();
    let expected = format!(
        "\n--- Prompt 指令 ---\n{}\n\n--- 核心內容 ---\n週六免費講座\n\n--- 套用模板後的貼文草稿 ---\n日期：5/1\nAI 寫作\n",
        style_prefix("專業正式 (Professional)")
    );
    assert_eq!(out, expected);
}

#[test]
fn missing_values_are_reported_by_name() {
    let mut req = request();
    req.values.insert("日期".to_string(), String::new());
    assert_eq!(req.missing_variables(), vec!["日期".to_string()]);
    assert!(!req.is_ready());
    let err = build_prompt(&req).unwrap_err();
    assert!(err.to_string().contains("日期"));
}

#[test]
fn empty_core_content_is_rejected() {
    let mut req = request();
    req.core_content.clear();
    assert!(build_prompt(&req).is_err());
}

#[test]
fn template_without_variables_only_needs_content() {
    let req = PromptRequest {
        style: "unknown".to_string(),
        template: "plain".to_string(),
        core_content: "c".to_string(),
        values: BTreeMap::new(),
    };
    assert!(req.is_ready());
    let out = build_prompt(&req).unwrap();
    assert!(out.starts_with("\n--- Prompt 指令 ---\n\n\n--- 核心內容 ---\nc\n"));
}
