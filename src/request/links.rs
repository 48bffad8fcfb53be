//! Edit and return links

use crate::auth::EditToken;
use crate::types::{EditError, Result};

use super::{PAGE_ENTRIES, VIEW_ENTRY};

/// Query parameters added to entry links to open the editor
pub const EDIT_LINK_PARAMS: &[&str] = &["page", "view", "edit"];

struct SplitUrl<'a> {
    base: &'a str,
    query: &'a str,
    fragment: Option<&'a str>,
}

fn split_url(url: &str) -> SplitUrl<'_> {
    let (rest, fragment) = match url.split_once('#') {
        Some((rest, fragment)) => (rest, Some(fragment)),
        None => (url, None),
    };
    let (base, query) = rest.split_once('?').unwrap_or((rest, ""));
    SplitUrl {
        base,
        query,
        fragment,
    }
}

fn rebuild(base: &str, pairs: &[(String, String)], fragment: Option<&str>) -> Result<String> {
    let query = serde_urlencoded::to_string(pairs)
        .map_err(|e| EditError::InvalidRequest(format!("Cannot encode query: {e}")))?;

    let mut url = base.to_string();
    if !query.is_empty() {
        url.push('?');
        url.push_str(&query);
    }
    if let Some(fragment) = fragment {
        url.push('#');
        url.push_str(fragment);
    }
    Ok(url)
}

/// Existing query pairs minus the editor parameters
fn retained_pairs(query: &str) -> Result<Vec<(String, String)>> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query)
        .map_err(|e| EditError::InvalidRequest(format!("Invalid link query: {e}")))?;
    Ok(pairs
        .into_iter()
        .filter(|(name, _)| !EDIT_LINK_PARAMS.contains(&name.as_str()))
        .collect())
}

/// Turn an entry link into an edit link carrying the token
pub fn edit_link(entry_link: &str, token: &EditToken) -> Result<String> {
    let url = split_url(entry_link);
    let mut pairs = retained_pairs(url.query)?;
    pairs.push(("page".to_string(), PAGE_ENTRIES.to_string()));
    pairs.push(("view".to_string(), VIEW_ENTRY.to_string()));
    pairs.push(("edit".to_string(), token.as_str().to_string()));
    rebuild(url.base, &pairs, url.fragment)
}

/// Strip the editor parameters to get back to the entry
pub fn back_link(url: &str) -> Result<String> {
    let url = split_url(url);
    let pairs = retained_pairs(url.query)?;
    rebuild(url.base, &pairs, url.fragment)
}
