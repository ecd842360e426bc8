//! Field heuristics for a single best-post link text.
//!
//! The mobile board renders title, category, author, time and counters as one
//! run of text inside the link. The only reliable anchors are the `HH:MM`
//! time token and the labelled counters, so the rules below pivot on the time
//! token: title and author live before it, counters are searched everywhere.
//!
//! The author guess is the rightmost word before the time token that is not a
//! category or badge word. Display names containing spaces, or names equal to
//! a stoplist word, are not recovered.
//!
//! The author is then cut from the title as a literal substring, first
//! occurrence only. A title that contains the name inside a longer word loses
//! that part instead: `철수네 집 철수 14:00` yields the title `네 집 철수`.

use std::sync::LazyLock;

use regex::Regex;

use crate::constants::{DECORATIVE_TOKENS, STOPLIST};

static TIME_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{1,2}:\d{2}").unwrap());

static VIEW_COUNT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"조회\s*(\d+)").unwrap());
static LIKE_COUNT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"추천\s*(\d+)").unwrap());
static COMMENT_COUNT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"댓글\s*(\d+)").unwrap());

// Counters that leaked into the title, and everything after them
static TRAILING_META: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*조회\s*\d+\s*추천\s*\d+.*$").unwrap());

static LEADING_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*\[.*?\]\s*").unwrap());

/// Word lists driving the heuristics.
#[derive(Debug, Clone)]
pub struct HeuristicRules {
    /// Words that are never an author and are dropped from titles.
    pub stoplist: Vec<String>,
    /// Badge words dropped from titles when no time token is present.
    pub decorative: Vec<String>,
}

impl Default for HeuristicRules {
    fn default() -> Self {
        Self {
            stoplist: STOPLIST.iter().map(ToString::to_string).collect(),
            decorative: DECORATIVE_TOKENS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl HeuristicRules {
    fn is_stopword(&self, word: &str) -> bool {
        self.stoplist.iter().any(|s| s == word)
    }

    fn is_decorative(&self, word: &str) -> bool {
        self.decorative.iter().any(|s| s == word)
    }
}

/// Fields recovered from one link text. `None` means the heuristic found
/// nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryFields {
    pub title: String,
    pub author: Option<String>,
    pub posted_time: Option<String>,
    pub view_count: Option<String>,
    pub like_count: Option<String>,
    pub comment_count: Option<String>,
}

/// Split a whitespace-collapsed link text into typed fields.
#[must_use]
pub fn parse_entry_text(raw: &str, rules: &HeuristicRules) -> EntryFields {
    let time = TIME_TOKEN.find(raw);

    let (title, author) = match time {
        Some(m) => {
            let before = raw[..m.start()].trim();
            let author = guess_author(before, rules);
            (title_before_time(before, author.as_deref(), rules), author)
        }
        None => (strip_decorative(raw, rules), None),
    };

    EntryFields {
        title: clean_title(&title),
        author,
        posted_time: time.map(|m| m.as_str().to_string()),
        view_count: labeled_count(&VIEW_COUNT, raw, "회"),
        like_count: labeled_count(&LIKE_COUNT, raw, "개"),
        comment_count: labeled_count(&COMMENT_COUNT, raw, "개"),
    }
}

/// Rightmost word that is not on the stoplist.
fn guess_author(before_time: &str, rules: &HeuristicRules) -> Option<String> {
    before_time
        .split_whitespace()
        .rev()
        .find(|w| !rules.is_stopword(w))
        .map(ToString::to_string)
}

fn title_before_time(before_time: &str, author: Option<&str>, rules: &HeuristicRules) -> String {
    let without_stopwords = before_time
        .split_whitespace()
        .filter(|w| !rules.is_stopword(w))
        .collect::<Vec<_>>()
        .join(" ");

    match author {
        Some(author) => without_stopwords.replacen(author, "", 1).trim().to_string(),
        None => without_stopwords,
    }
}

fn strip_decorative(raw: &str, rules: &HeuristicRules) -> String {
    raw.split_whitespace()
        .filter(|w| !rules.is_decorative(w))
        .collect::<Vec<_>>()
        .join(" ")
}

fn clean_title(title: &str) -> String {
    let title = TRAILING_META.replace(title, "");
    let title = LEADING_TAG.replace(title.trim(), "");
    title.trim().to_string()
}

fn labeled_count(pattern: &Regex, text: &str, unit: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|digits| format!("{}{unit}", digits.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> EntryFields {
        parse_entry_text(raw, &HeuristicRules::default())
    }

    #[test]
    fn test_category_author_time_counts() {
        let fields = parse("신유머 진짜싼아이 12:50 조회 2760 추천 34");

        assert_eq!(fields.posted_time.as_deref(), Some("12:50"));
        assert_eq!(fields.view_count.as_deref(), Some("2760회"));
        assert_eq!(fields.like_count.as_deref(), Some("34개"));
        assert_eq!(fields.comment_count, None);
        assert_eq!(fields.author.as_deref(), Some("진짜싼아이"));
        assert_eq!(fields.title, "");
    }

    #[test]
    fn test_full_entry_with_title_and_badges() {
        let fields = parse("[단독] 오늘 퇴근길 사고 이미지 모바일 블박 운전왕 9:05 조회 15020 추천 210 댓글 87");

        assert_eq!(fields.title, "오늘 퇴근길 사고");
        assert_eq!(fields.author.as_deref(), Some("운전왕"));
        assert_eq!(fields.posted_time.as_deref(), Some("9:05"));
        assert_eq!(fields.view_count.as_deref(), Some("15020회"));
        assert_eq!(fields.like_count.as_deref(), Some("210개"));
        assert_eq!(fields.comment_count.as_deref(), Some("87개"));
    }

    #[test]
    fn test_stopwords_are_removed_as_whole_words_only() {
        // "유머러스" contains the stopword "유머" but is a different word
        let fields = parse("유머러스한 하루 자유 닉네임 08:15");

        assert_eq!(fields.author.as_deref(), Some("닉네임"));
        assert_eq!(fields.title, "유머러스한 하루");
    }

    #[test]
    fn test_only_stopwords_before_time() {
        let fields = parse("정치 뉴스 11:11 조회 10 추천 1");

        assert_eq!(fields.author, None);
        assert_eq!(fields.title, "");
        assert_eq!(fields.posted_time.as_deref(), Some("11:11"));
    }

    #[test]
    fn test_nothing_before_time() {
        let fields = parse("23:59 조회 1");

        assert_eq!(fields.author, None);
        assert_eq!(fields.title, "");
        assert_eq!(fields.view_count.as_deref(), Some("1회"));
    }

    #[test]
    fn test_author_removed_once_from_title() {
        let fields = parse("철수 만세 철수 14:00");

        assert_eq!(fields.author.as_deref(), Some("철수"));
        // Only the first literal occurrence goes
        assert_eq!(fields.title, "만세 철수");
    }

    #[test]
    fn test_author_removed_from_inside_longer_word() {
        let fields = parse("철수네 집 철수 14:00");

        assert_eq!(fields.author.as_deref(), Some("철수"));
        assert_eq!(fields.title, "네 집 철수");
    }

    #[test]
    fn test_no_time_token_keeps_text_as_title() {
        let fields = parse("[공지] 이미지 게시판 이용 안내 조회 500 추천 3 댓글 1");

        assert_eq!(fields.posted_time, None);
        assert_eq!(fields.author, None);
        assert_eq!(fields.title, "게시판 이용 안내");
        assert_eq!(fields.view_count.as_deref(), Some("500회"));
        assert_eq!(fields.like_count.as_deref(), Some("3개"));
        assert_eq!(fields.comment_count.as_deref(), Some("1개"));
    }

    #[test]
    fn test_no_time_token_plain_text() {
        let fields = parse("그냥 제목만 있는 글");

        assert_eq!(fields.title, "그냥 제목만 있는 글");
        assert_eq!(fields.author, None);
        assert_eq!(fields.view_count, None);
        assert_eq!(fields.like_count, None);
        assert_eq!(fields.comment_count, None);
    }

    #[test]
    fn test_counts_with_no_space_after_label() {
        let fields = parse("제목 작성자 7:30 조회123 추천4 댓글5");

        assert_eq!(fields.view_count.as_deref(), Some("123회"));
        assert_eq!(fields.like_count.as_deref(), Some("4개"));
        assert_eq!(fields.comment_count.as_deref(), Some("5개"));
    }

    #[test]
    fn test_leading_tag_is_lazy() {
        let fields = parse("[속보] [2보] 고속도로 정체 기자 10:00");

        assert_eq!(fields.title, "[2보] 고속도로 정체");
        assert_eq!(fields.author.as_deref(), Some("기자"));
    }

    #[test]
    fn test_empty_text() {
        let fields = parse("");

        assert_eq!(fields, EntryFields::default());
    }

    #[test]
    fn test_custom_rules() {
        let rules = HeuristicRules {
            stoplist: vec!["공지".to_string()],
            decorative: Vec::new(),
        };
        let fields = parse_entry_text("제목 관리자 공지 12:00", &rules);

        assert_eq!(fields.author.as_deref(), Some("관리자"));
        assert_eq!(fields.title, "제목");
    }
}
