use serde::Serialize;

/// One entry of the best-posts board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    /// 1-based position in the returned list.
    pub rank: u32,
    pub title: String,
    pub author: String,
    /// `HH:MM` as printed on the board.
    pub posted_time: String,
    pub view_count: String,
    pub like_count: String,
    pub comment_count: String,
    /// Absolute URL of the post.
    pub link: String,
}

/// JSON body returned by `/health`.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ResultEnvelope {
    Ok {
        message: String,
        #[serde(rename = "collectedAt")]
        collected_at: String,
        #[serde(rename = "postCount")]
        post_count: usize,
        posts: Vec<PostRecord>,
    },
    Error {
        message: String,
    },
}

impl ResultEnvelope {
    #[must_use]
    pub fn success(
        message: impl Into<String>,
        collected_at: String,
        posts: Vec<PostRecord>,
    ) -> Self {
        Self::Ok {
            message: message.into(),
            collected_at,
            post_count: posts.len(),
            posts,
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post() -> PostRecord {
        PostRecord {
            rank: 1,
            title: "퇴근길 풍경".to_string(),
            author: "진짜싼아이".to_string(),
            posted_time: "12:50".to_string(),
            view_count: "2760회".to_string(),
            like_count: "34개".to_string(),
            comment_count: "댓글수 없음".to_string(),
            link: "https://m.bobaedream.co.kr/board/bbs_view/best/12345".to_string(),
        }
    }

    #[test]
    fn test_post_record_field_names() {
        let json = serde_json::to_value(sample_post()).unwrap();

        assert_eq!(json["rank"], 1);
        assert_eq!(json["postedTime"], "12:50");
        assert_eq!(json["viewCount"], "2760회");
        assert_eq!(json["likeCount"], "34개");
        assert_eq!(json["commentCount"], "댓글수 없음");
        assert!(json.get("posted_time").is_none());
    }

    #[test]
    fn test_success_envelope_shape() {
        let envelope = ResultEnvelope::success(
            "done",
            "2026-10-19 09:30:00".to_string(),
            vec![sample_post()],
        );
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["status"], "ok");
        assert_eq!(json["message"], "done");
        assert_eq!(json["collectedAt"], "2026-10-19 09:30:00");
        assert_eq!(json["postCount"], 1);
        assert_eq!(json["posts"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_error_envelope_has_no_posts() {
        let json = serde_json::to_value(ResultEnvelope::error("boom")).unwrap();

        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], "boom");
        assert!(json.get("posts").is_none());
        assert!(json.get("postCount").is_none());
    }
}
