/// Title used when a feed item has none.
pub const UNTITLED: &str = "(無標題)";

/// One feed item as the dashboard lists it. Fetching feeds happens elsewhere.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Headline {
    pub title: String,
    pub link: String,
    /// `%Y-%m-%d %H:%M`; compared as text.
    pub published: String,
    pub source: String,
}

impl Headline {
    pub fn new(
        title: Option<&str>,
        link: Option<&str>,
        published: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            title: title.unwrap_or(UNTITLED).to_string(),
            link: link.unwrap_or_default().to_string(),
            published: published.into(),
            source: source.into(),
        }
    }
}

/// Merge per-source item lists: keep the first `per_source` of each, tag them with their
/// source name, then order everything newest first.
pub fn merge_latest<I, S>(feeds: I, per_source: usize) -> Vec<Headline>
where
    I: IntoIterator<Item = (S, Vec<Headline>)>,
    S: Into<String>,
{
    let mut out = Vec::new();
    for (source, items) in feeds {
        let source = source.into();
        out.extend(items.into_iter().take(per_source).map(|mut h| {
            h.source = source.clone();
            h
        }));
    }
    out.sort_by(|a, b| b.published.cmp(&a.published));
    out
}
