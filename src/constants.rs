//! Shared constants used across the application.

/// User agent string sent with the board request.
///
/// A plain desktop Chrome string; the mobile board rejects obvious bot agents.
pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Best-posts listing on the mobile site.
pub const DEFAULT_BOARD_URL: &str = "https://m.bobaedream.co.kr/board/new_writing/best";

/// Origin prepended to relative post links.
pub const DEFAULT_SITE_ORIGIN: &str = "https://m.bobaedream.co.kr";

/// Path fragment shared by every best-post detail link.
pub const BEST_POST_LINK_PATH: &str = "/board/bbs_view/best/";

/// Upper bound on posts returned per request.
pub const MAX_POSTS: usize = 20;

/// Category and decoration words that never name an author.
pub const STOPLIST: &[&str] = &[
    "이미지", "모바일", "신유머", "유머", "자유", "정치", "블박", "뉴스",
];

/// Badges the mobile list renders inside the link text.
pub const DECORATIVE_TOKENS: &[&str] = &["이미지", "모바일"];

/// Placeholders for fields that could not be extracted.
pub mod sentinel {
    pub const AUTHOR: &str = "작성자 없음";
    pub const POSTED_TIME: &str = "시간 없음";
    pub const VIEW_COUNT: &str = "조회수 없음";
    pub const LIKE_COUNT: &str = "추천수 없음";
    pub const COMMENT_COUNT: &str = "댓글수 없음";
}
