use std::io::Cursor;
use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use meridian_core::blog::{
    BlogCategory, BlogPost, BlogPostDetail, BlogPostFilters, FeedItem, NewBlogPost,
};
use meridian_core::paging::Page;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
struct InsightListParams {
    category: Option<BlogCategory>,
    tag: Option<String>,
    featured: Option<bool>,
    search: Option<String>,
    page: Option<i64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InsightListPayload {
    posts: Page<BlogPost>,
    featured_posts: Vec<BlogPost>,
    recent_posts: Vec<BlogPost>,
}

async fn list_insights(
    State(state): State<Arc<AppState>>,
    Query(params): Query<InsightListParams>,
) -> ApiResult<Json<InsightListPayload>> {
    let filters = BlogPostFilters {
        category: params.category,
        tag: params.tag,
        featured: params.featured,
        search: params.search,
    };
    let posts = state
        .blog_service
        .list_posts(filters, params.page.unwrap_or(1))?;
    let featured_posts = state.blog_service.featured_posts()?;
    let recent_posts = state.blog_service.recent_posts()?;
    Ok(Json(InsightListPayload {
        posts,
        featured_posts,
        recent_posts,
    }))
}

async fn get_insight(
    Path(slug): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<BlogPostDetail>> {
    let detail = state.blog_service.get_post(&slug).await?;
    Ok(Json(detail))
}

async fn create_insight(
    State(state): State<Arc<AppState>>,
    Json(post): Json<NewBlogPost>,
) -> ApiResult<Json<BlogPost>> {
    let stored = state.blog_service.create_post(post).await?;
    Ok(Json(stored))
}

async fn delete_insight(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.blog_service.delete_post(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn insights_feed(State(state): State<Arc<AppState>>) -> ApiResult<Response> {
    let items = state.blog_service.feed_items()?;
    let body = render_feed(
        &state.site_config.site_name,
        &state.site_config.site_description,
        &state.public_url,
        &items,
    )
    .map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok((
        [(header::CONTENT_TYPE, "application/rss+xml; charset=utf-8")],
        body,
    )
        .into_response())
}

fn render_feed(
    site_name: &str,
    site_description: &str,
    public_url: &str,
    items: &[FeedItem],
) -> std::io::Result<Vec<u8>> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    let mut rss = BytesStart::new("rss");
    rss.push_attribute(("version", "2.0"));
    writer.write_event(Event::Start(rss))?;
    writer.write_event(Event::Start(BytesStart::new("channel")))?;
    write_text(&mut writer, "title", &format!("{} Insights", site_name))?;
    write_text(&mut writer, "link", &format!("{}/insights/", public_url))?;
    write_text(&mut writer, "description", site_description)?;

    for item in items {
        let link = format!("{}{}", public_url, item.link);
        writer.write_event(Event::Start(BytesStart::new("item")))?;
        write_text(&mut writer, "title", &item.title)?;
        write_text(&mut writer, "link", &link)?;
        write_text(&mut writer, "description", &item.description)?;
        write_text(&mut writer, "author", &item.author)?;
        write_text(&mut writer, "category", &item.category)?;
        write_text(
            &mut writer,
            "pubDate",
            &item.published_date.and_utc().to_rfc2822(),
        )?;
        write_text(&mut writer, "guid", &link)?;
        writer.write_event(Event::End(BytesEnd::new("item")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("channel")))?;
    writer.write_event(Event::End(BytesEnd::new("rss")))?;
    Ok(writer.into_inner().into_inner())
}

fn write_text<W: std::io::Write>(
    writer: &mut Writer<W>,
    tag: &str,
    value: &str,
) -> std::io::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(value)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/insights", get(list_insights).post(create_insight))
        .route("/insights/{slug}", get(get_insight))
        .route("/insights/id/{id}", delete(delete_insight))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_item() -> FeedItem {
        FeedItem {
            title: "Solar & storage".to_string(),
            description: "Grid notes".to_string(),
            link: "/insights/solar-storage/".to_string(),
            author: "Amina Okafor".to_string(),
            category: "Engineering".to_string(),
            published_date: NaiveDate::from_ymd_opt(2026, 3, 14)
                .expect("date")
                .and_hms_opt(9, 0, 0)
                .expect("time"),
        }
    }

    #[test]
    fn test_feed_carries_channel_and_items() {
        let body = render_feed(
            "Tawi Meridian",
            "Consulting",
            "https://example.org",
            &[sample_item()],
        )
        .expect("feed");
        let xml = String::from_utf8(body).expect("utf8");
        assert!(xml.starts_with("<?xml version=\"1.0\""));
        assert!(xml.contains("<rss version=\"2.0\">"));
        assert!(xml.contains("<link>https://example.org/insights/solar-storage/</link>"));
        assert!(xml.contains("14 Mar 2026"));
    }

    #[test]
    fn test_feed_escapes_markup_in_titles() {
        let mut item = sample_item();
        item.title = "Water <systems> & sanitation".to_string();
        let body =
            render_feed("Tawi Meridian", "Consulting", "https://example.org", &[item])
                .expect("feed");
        let xml = String::from_utf8(body).expect("utf8");
        assert!(xml.contains("Water &lt;systems&gt; &amp; sanitation"));
    }
}
