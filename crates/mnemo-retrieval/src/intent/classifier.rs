//! Keyword and pattern scoring for query intent.
//!
//! Keywords are matched as substrings of the lowercased query (+2 each).
//! Patterns run against the query as written (+3 each); the English ones
//! are case-insensitive.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use mnemo_core::traits::IntentClassifier;
use mnemo_core::IntentScores;

const KEYWORD_WEIGHT: u32 = 2;
const PATTERN_WEIGHT: u32 = 3;

macro_rules! intent_pattern {
    ($name:ident, $regex_str:expr) => {
        static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

type Pattern = &'static LazyLock<Option<Regex>>;

// ── Structural ─────────────────────────────────────────────────────────────
const STRUCTURAL_KEYWORDS: &[&str] = &[
    "依赖", "depends", "调用", "calls", "引用", "imports", "继承", "extends", "关系",
    "relationship", "连接", "connected",
];
intent_pattern!(RE_WHO_USES, r"谁(调用|依赖|引用|使用)了?");
intent_pattern!(RE_USED_BY, r"被(调用|依赖|引用|使用)的?");
intent_pattern!(RE_DEPS_OF, r"(函数|类|模块|文件).*的?(依赖|关系)");
intent_pattern!(RE_WHAT_CALLS, r"(?i)what (calls|depends on|imports|uses)");
intent_pattern!(RE_SHOW_REL, r"(?i)show.*relationship");

// ── Semantic ───────────────────────────────────────────────────────────────
const SEMANTIC_KEYWORDS: &[&str] = &[
    "如何", "how", "什么", "what", "为什么", "why", "解决", "solve", "错误", "error", "问题",
    "problem", "实现", "implement",
];
intent_pattern!(RE_HOW_TO_CN, r"如何.*(实现|解决|处理)");
intent_pattern!(RE_WHAT_IS_CN, r"什么是");
intent_pattern!(RE_FIX, r"(?i)(error|bug|issue|problem).*fix");
intent_pattern!(RE_HOW_TO, r"(?i)how (to|do)");
intent_pattern!(RE_WHAT_IS, r"(?i)what (is|does)");

// ── Hybrid ─────────────────────────────────────────────────────────────────
const HYBRID_KEYWORDS: &[&str] = &[
    "相关", "related", "关于", "about", "涉及", "involve", "包含", "contain",
];
intent_pattern!(RE_RELATED_CODE, r".*相关的?(代码|函数|文件)");
intent_pattern!(RE_ALL_ABOUT_CN, r"关于.*的?(所有|全部)");
intent_pattern!(RE_FIND_RELATED, r"(?i)find.*related");
intent_pattern!(RE_ALL_ABOUT, r"(?i)all.*about");

fn structural_patterns() -> [Pattern; 5] {
    [&RE_WHO_USES, &RE_USED_BY, &RE_DEPS_OF, &RE_WHAT_CALLS, &RE_SHOW_REL]
}

fn semantic_patterns() -> [Pattern; 5] {
    [&RE_HOW_TO_CN, &RE_WHAT_IS_CN, &RE_FIX, &RE_HOW_TO, &RE_WHAT_IS]
}

fn hybrid_patterns() -> [Pattern; 4] {
    [&RE_RELATED_CODE, &RE_ALL_ABOUT_CN, &RE_FIND_RELATED, &RE_ALL_ABOUT]
}

fn score_category(lowered: &str, raw: &str, keywords: &[&str], patterns: &[Pattern]) -> u32 {
    let keyword_hits = keywords.iter().filter(|k| lowered.contains(**k)).count() as u32;
    let pattern_hits = patterns
        .iter()
        .filter_map(|p| LazyLock::force(p).as_ref())
        .filter(|re| re.is_match(raw))
        .count() as u32;
    keyword_hits * KEYWORD_WEIGHT + pattern_hits * PATTERN_WEIGHT
}

/// The default [`IntentClassifier`]: fixed bilingual keyword and pattern tables.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl IntentClassifier for KeywordClassifier {
    fn score(&self, query: &str) -> IntentScores {
        let lowered = query.to_lowercase();
        let scores = IntentScores {
            structural: score_category(&lowered, query, STRUCTURAL_KEYWORDS, &structural_patterns()),
            semantic: score_category(&lowered, query, SEMANTIC_KEYWORDS, &semantic_patterns()),
            hybrid: score_category(&lowered, query, HYBRID_KEYWORDS, &hybrid_patterns()),
        };
        debug!(
            structural = scores.structural,
            semantic = scores.semantic,
            hybrid = scores.hybrid,
            "intent scored"
        );
        scores
    }
}
