/// A named tone instruction prepended to generated prompts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct StylePreset {
    pub key: &'static str,
    pub description: &'static str,
    pub prompt_prefix: &'static str,
}

impl StylePreset {
    /// The English label in parentheses, e.g. `Professional`.
    pub fn english_label(&self) -> Option<&'static str> {
        let start = self.key.find('(')?;
        let end = self.key.rfind(')')?;
        (start < end).then(|| self.key[start + 1..end].trim())
    }
}

static PRESETS: [StylePreset; 4] = [
    StylePreset {
        key: "專業正式 (Professional)",
        description: "嚴謹、數據導向，適合商業報告、正式公告。",
        prompt_prefix: "請以專業且正式的語氣，基於以下內容生成社群貼文。確保語法嚴謹，並在結尾加上相關數據或結論。",
    },
    StylePreset {
        key: "幽默活潑 (Casual & Lively)",
        description: "用語輕鬆、貼近年輕人，適合互動、娛樂內容。",
        prompt_prefix: "請以幽默、活潑且具吸引力的語氣，改寫以下內容。多使用表情符號和網路流行語。",
    },
    StylePreset {
        key: "緊急促銷 (Urgent Promo)",
        description: "強調時效性、稀缺性，促使使用者立即行動 (CTA)。",
        prompt_prefix: "請以緊急促銷的語氣生成貼文。必須包含強烈的行動呼籲 (CTA) 和截止日期。",
    },
    StylePreset {
        key: "教育分享 (Educational)",
        description: "清晰、步驟化、知識性，適合教學或深度解說。",
        prompt_prefix: "請將以下內容整理為步驟清晰、易於理解的教育分享貼文。每個重點請使用條列式呈現。",
    },
];

/// Built-in presets in display order.
pub fn style_presets() -> &'static [StylePreset] {
    &PRESETS
}

/// Look up a preset by its full key or, case-insensitively, by its English label.
pub fn find_style(name: &str) -> Option<&'static StylePreset> {
    let name = name.trim();
    PRESETS.iter().find(|p| {
        p.key == name
            || p
                .english_label()
                .is_some_and(|label| label.eq_ignore_ascii_case(name))
    })
}

/// Instruction prefix for `name`; unknown styles contribute nothing.
pub fn style_prefix(name: &str) -> &'static str {
    find_style(name).map_or("", |p| p.prompt_prefix)
}
