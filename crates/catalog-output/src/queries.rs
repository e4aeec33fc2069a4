//! Read-only queries over a stored catalog.

use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;

use crate::error::Result;

/// Default number of search hits.
pub const DEFAULT_SEARCH_LIMIT: usize = 20;

/// One search result row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub appid: i64,
    pub name: Option<String>,
    pub release_date: Option<String>,
    pub header_image: Option<String>,
}

/// Everything known about one item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemDetail {
    pub appid: i64,
    pub name: Option<String>,
    pub release_date: Option<String>,
    pub short_description: Option<String>,
    pub price: Option<f64>,
    pub positive_ratings: Option<f64>,
    pub negative_ratings: Option<f64>,
    pub header_image: Option<String>,
    pub genres: Vec<String>,
    pub categories: Vec<String>,
    pub platforms: Vec<String>,
    /// Tags with their vote counts, most voted first.
    pub tags: Vec<(String, f64)>,
}

/// Escapes LIKE wildcards so `term` matches literally.
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for ch in term.trim().chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

/// Case-insensitive substring search over item names.
///
/// `%` and `_` in `term` are matched literally.
pub fn search_items(conn: &Connection, term: &str, limit: usize) -> Result<Vec<SearchHit>> {
    let pattern = like_pattern(term);
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    let mut stmt = conn.prepare(
        "SELECT g.appid, g.name, g.release_date, gm.header_image
         FROM games g
         LEFT JOIN game_media gm ON g.appid = gm.appid
         WHERE g.name LIKE ?1 ESCAPE '\\'
         ORDER BY g.name, g.appid
         LIMIT ?2",
    )?;
    let rows = stmt.query_map(params![pattern, limit], |row| {
        Ok(SearchHit {
            appid: row.get(0)?,
            name: row.get(1)?,
            release_date: row.get(2)?,
            header_image: row.get(3)?,
        })
    })?;
    Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
}

fn names(conn: &Connection, sql: &str, appid: i64) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params![appid], |row| row.get(0))?;
    Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
}

/// Looks up one item by identifier, with its attribute names.
pub fn item_detail(conn: &Connection, appid: i64) -> Result<Option<ItemDetail>> {
    let base = conn
        .query_row(
            "SELECT g.appid, g.name, g.release_date, g.short_description, g.price,
                    r.positive_ratings, r.negative_ratings, gm.header_image
             FROM games g
             LEFT JOIN ratings r ON g.appid = r.appid
             LEFT JOIN game_media gm ON g.appid = gm.appid
             WHERE g.appid = ?1
             LIMIT 1",
            params![appid],
            |row| {
                Ok(ItemDetail {
                    appid: row.get(0)?,
                    name: row.get(1)?,
                    release_date: row.get(2)?,
                    short_description: row.get(3)?,
                    price: row.get(4)?,
                    positive_ratings: row.get(5)?,
                    negative_ratings: row.get(6)?,
                    header_image: row.get(7)?,
                    genres: Vec::new(),
                    categories: Vec::new(),
                    platforms: Vec::new(),
                    tags: Vec::new(),
                })
            },
        )
        .optional()?;
    let Some(mut detail) = base else {
        return Ok(None);
    };

    detail.genres = names(
        conn,
        "SELECT DISTINCT x.genre_name FROM game_genres j
         JOIN genres x ON j.genre_id = x.genre_id
         WHERE j.appid = ?1 ORDER BY x.genre_name",
        appid,
    )?;
    detail.categories = names(
        conn,
        "SELECT DISTINCT x.category_name FROM game_categories j
         JOIN categories x ON j.category_id = x.category_id
         WHERE j.appid = ?1 ORDER BY x.category_name",
        appid,
    )?;
    detail.platforms = names(
        conn,
        "SELECT DISTINCT x.platform_name FROM game_platforms j
         JOIN platforms x ON j.platform_id = x.platform_id
         WHERE j.appid = ?1 ORDER BY x.platform_name",
        appid,
    )?;

    let mut stmt = conn.prepare(
        "SELECT t.tag_name, v.votes FROM tag_votes v
         JOIN tags t ON v.tag_id = t.tag_id
         WHERE v.appid = ?1
         ORDER BY v.votes DESC, t.tag_name",
    )?;
    let tags = stmt.query_map(params![appid], |row| Ok((row.get(0)?, row.get(1)?)))?;
    detail.tags = tags.collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(Some(detail))
}
