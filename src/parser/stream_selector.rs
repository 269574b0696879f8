use tracing::debug;

use super::models::{Rendition, SelectionPreference, SelectionResult};

/// 从可用的编码格式中挑选一个可播放的地址
///
/// 规则按顺序逐条尝试，每条规则都按原始顺序扫描全部格式，
/// 所以靠前的规则总是优先于列表中靠前的格式。没有 url 的条目直接跳过。
pub fn select(renditions: &[Rendition], preference: &SelectionPreference) -> SelectionResult {
    for rule in preference.rules() {
        let hit = renditions
            .iter()
            .filter(|r| r.url.is_some())
            .find(|r| rule.matches(r));

        if let Some(url) = hit.and_then(|r| r.url.clone()) {
            debug!("规则 {} 命中: {}", rule, url);
            return SelectionResult::Selected(url);
        }
    }

    debug!("{} 个格式中没有符合 {} 的", renditions.len(), preference);
    SelectionResult::NoMatchingRendition
}

#[derive(Debug, Clone, Default)]
pub struct StreamSelector {
    preference: SelectionPreference,
}

impl StreamSelector {
    pub fn new(preference: SelectionPreference) -> Self {
        Self { preference }
    }

    pub fn preference(&self) -> &SelectionPreference {
        &self.preference
    }

    pub fn select_stream(&self, renditions: &[Rendition]) -> SelectionResult {
        select(renditions, &self.preference)
    }
}
