//! Episode page server lookup

use crate::core::video_source::{EpisodeServer, ServerKind};
use crate::error::GoloadError;
use crate::utils::url::absolutize;
use scraper::{ElementRef, Html, Node, Selector};
use tracing::debug;

const SERVER_LIST_SELECTOR: &str = "div.anime_muti_link > ul > li";

fn selector(css: &str) -> Result<Selector, GoloadError> {
    Selector::parse(css).map_err(|e| GoloadError::Selector(e.to_string()))
}

/// Find the embed player URL for a server kind on an episode page
pub fn find_embed_url(html: &str, kind: ServerKind) -> Result<String, GoloadError> {
    let document = Html::parse_document(html);
    let selector = selector(kind.selector())?;

    let url = document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr(kind.attribute()))
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .ok_or_else(|| {
            GoloadError::MissingElement(format!("{}[{}]", kind.selector(), kind.attribute()))
        })?;

    debug!("{:?} resolved to {}", kind, url);
    Ok(absolutize(url))
}

/// Text directly inside the anchor, ignoring nested tags such as `<span>`
fn own_text(el: ElementRef<'_>) -> String {
    el.children()
        .filter_map(|child| match child.value() {
            Node::Text(text) => Some(text.trim().to_string()),
            _ => None,
        })
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// List the servers offered on an episode page that can be decoded
pub fn list_servers(html: &str) -> Result<Vec<EpisodeServer>, GoloadError> {
    let document = Html::parse_document(html);
    let item_selector = selector(SERVER_LIST_SELECTOR)?;
    let anchor_selector = selector("a")?;
    let supported = ServerKind::supported_ids();

    let servers = document
        .select(&item_selector)
        .filter_map(|item| {
            let id = item.value().attr("class")?.trim().to_string();
            if !supported.contains(&id.as_str()) {
                return None;
            }
            let display_name = item
                .select(&anchor_selector)
                .next()
                .map(own_text)
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| id.clone());
            Some(EpisodeServer { id, display_name })
        })
        .collect();

    Ok(servers)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPISODE_PAGE: &str = r##"
    <html><body>
      <div class="anime_video_body">
        <div id="load_anime">
          <div class="anime_video_body_watch">
            <div class="play-video">
              <iframe src="//embtaku.pro/streaming.php?id=MTg0NzYz&title=Spy+x+Family&typesub=SUB" allowfullscreen></iframe>
            </div>
          </div>
        </div>
        <div class="anime_muti_link">
          <ul>
            <li class="anime"><a href="#" rel="1" data-video="//embtaku.pro/streaming.php?id=MTg0NzYz"><i class="iconlayer-anime"></i>Gogo server<span>Choose this server</span></a></li>
            <li class="vidcdn"><a href="#" rel="2" data-video="https://embtaku.pro/embedplus?id=MTg0NzYz"><i class="iconlayer-vidcdn"></i>Vidstreaming<span>Choose this server</span></a></li>
            <li class="streamwish"><a href="#" rel="13" data-video="https://awish.pro/e/abc">Streamwish<span>Choose this server</span></a></li>
            <li class="doodstream"><a href="#" rel="14" data-video="https://dood.wf/e/abc"></a></li>
          </ul>
        </div>
      </div>
    </body></html>"##;

    #[test]
    fn test_iframe_branch() {
        assert_eq!(
            find_embed_url(EPISODE_PAGE, ServerKind::IframeSource).unwrap(),
            "https://embtaku.pro/streaming.php?id=MTg0NzYz&title=Spy+x+Family&typesub=SUB"
        );
    }

    #[test]
    fn test_anchor_branch() {
        assert_eq!(
            find_embed_url(EPISODE_PAGE, ServerKind::AnchorDataVideo).unwrap(),
            "https://embtaku.pro/embedplus?id=MTg0NzYz"
        );
    }

    #[test]
    fn test_branches_pick_distinct_nodes() {
        let iframe = find_embed_url(EPISODE_PAGE, ServerKind::from_source_id("anime")).unwrap();
        for id in ["vidcdn", "unknown", ""] {
            let anchor = find_embed_url(EPISODE_PAGE, ServerKind::from_source_id(id)).unwrap();
            assert_ne!(iframe, anchor);
            assert!(anchor.contains("embedplus"));
        }
    }

    #[test]
    fn test_missing_iframe() {
        let html = r#"<div class="anime_video_body"><div class="anime_muti_link"><ul></ul></div></div>"#;
        let err = find_embed_url(html, ServerKind::IframeSource).unwrap_err();
        assert!(matches!(err, GoloadError::MissingElement(_)));
        assert!(err.should_try_another_server());
    }

    #[test]
    fn test_empty_data_video() {
        let html = r#"<div class="anime_video_body"><div class="anime_muti_link"><ul>
            <li class="vidcdn"><a data-video=""></a></li></ul></div></div>"#;
        assert!(find_embed_url(html, ServerKind::AnchorDataVideo).is_err());
    }

    #[test]
    fn test_list_servers() {
        let servers = list_servers(EPISODE_PAGE).unwrap();
        assert_eq!(
            servers,
            vec![
                EpisodeServer {
                    id: "anime".to_string(),
                    display_name: "Gogo server".to_string(),
                },
                EpisodeServer {
                    id: "vidcdn".to_string(),
                    display_name: "Vidstreaming".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_list_servers_name_fallback() {
        let html = r#"<div class="anime_muti_link"><ul><li class="vidcdn"><a><span>x</span></a></li></ul></div>"#;
        let servers = list_servers(html).unwrap();
        assert_eq!(servers[0].display_name, "vidcdn");
    }
}
