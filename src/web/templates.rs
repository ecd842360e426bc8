//! HTML for the landing page.
//!
//! The page is static; the posts table is filled in the browser from
//! `/health`, so a slow or failing upstream never blocks the page itself.

use maud::{html, Markup, PreEscaped, DOCTYPE};

const PAGE_STYLE: &str = r#"
.meta { color: var(--pico-muted-color); font-size: 0.85em; white-space: nowrap; }
.rank { width: 3em; text-align: right; }
#status.error { color: #dc3545; }
"#;

/// Loads `/health` and renders the envelope into `#posts`.
const LOAD_POSTS_SCRIPT: &str = r#"(function() {
    var status = document.getElementById('status');
    var body = document.getElementById('posts');

    function cell(row, text, cls) {
        var td = document.createElement('td');
        td.textContent = text;
        if (cls) { td.className = cls; }
        row.appendChild(td);
        return td;
    }

    function load() {
        status.className = '';
        status.textContent = '불러오는 중...';
        body.innerHTML = '';
        fetch('/health')
            .then(function(res) { return res.json(); })
            .then(function(data) {
                if (data.status !== 'ok') {
                    status.className = 'error';
                    status.textContent = data.message;
                    return;
                }
                status.textContent = data.message + ' (' + data.collectedAt + ', ' + data.postCount + '개)';
                data.posts.forEach(function(post) {
                    var row = document.createElement('tr');
                    cell(row, post.rank, 'rank');
                    var title = cell(row, '');
                    var link = document.createElement('a');
                    link.href = post.link;
                    link.target = '_blank';
                    link.rel = 'noopener';
                    link.textContent = post.title || '(제목 없음)';
                    title.appendChild(link);
                    cell(row, post.author);
                    cell(row, post.postedTime, 'meta');
                    cell(row, post.viewCount, 'meta');
                    cell(row, post.likeCount, 'meta');
                    cell(row, post.commentCount, 'meta');
                    body.appendChild(row);
                });
            })
            .catch(function(err) {
                status.className = 'error';
                status.textContent = String(err);
            });
    }

    document.getElementById('reload').addEventListener('click', load);
    load();
})();"#;

/// Render the landing page.
#[must_use]
pub fn render_index(board_url: &str) -> Markup {
    html! {
        (DOCTYPE)
        html lang="ko" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                meta name="color-scheme" content="light dark";
                title { "보배드림 베스트글" }
                link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/@picocss/pico@2/css/pico.min.css";
                style { (PreEscaped(PAGE_STYLE)) }
            }
            body {
                main class="container" {
                    hgroup {
                        h1 { "보배드림 베스트글" }
                        p {
                            "출처: "
                            a href=(board_url) target="_blank" rel="noopener" { (board_url) }
                        }
                    }
                    p {
                        button id="reload" type="button" { "새로고침" }
                        " "
                        span id="status" {}
                    }
                    figure {
                        table class="striped" {
                            thead {
                                tr {
                                    th class="rank" { "#" }
                                    th { "제목" }
                                    th { "작성자" }
                                    th { "시간" }
                                    th { "조회" }
                                    th { "추천" }
                                    th { "댓글" }
                                }
                            }
                            tbody id="posts" {}
                        }
                    }
                }
                script { (PreEscaped(LOAD_POSTS_SCRIPT)) }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_has_table_and_loader() {
        let html = render_index("https://m.bobaedream.co.kr/board/new_writing/best").into_string();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>보배드림 베스트글</title>"));
        assert!(html.contains(r#"<tbody id="posts">"#));
        assert!(html.contains("fetch('/health')"));
        assert!(html.contains(r#"href="https://m.bobaedream.co.kr/board/new_writing/best""#));
    }

    #[test]
    fn test_board_url_is_escaped() {
        let html = render_index(r#"https://example.com/?a=1&b="2""#).into_string();

        assert!(html.contains("&amp;b=&quot;2&quot;"));
    }
}
