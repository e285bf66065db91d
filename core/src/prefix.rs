#![deny(missing_docs)]

//! # Path Prefix Resolution
//!
//! Finds the URL prefix shared by every request in a collection. The prefix
//! becomes the server URL and is stripped from each request to form its path.

use crate::collection::Item;
use std::collections::BTreeSet;

/// Collects the raw URL of every request in the tree, deduplicated.
pub fn collect_urls(items: &[Item]) -> BTreeSet<String> {
    let mut urls = BTreeSet::new();
    collect_into(items, &mut urls);
    urls
}

fn collect_into(items: &[Item], urls: &mut BTreeSet<String>) {
    for item in items {
        match item {
            Item::Request(request) => {
                urls.insert(request.request.url.raw().to_string());
            }
            Item::Folder(folder) => collect_into(&folder.item, urls),
        }
    }
}

/// Longest common leading substring of a set of strings.
///
/// The common prefix of a set equals that of its lexicographic minimum and
/// maximum, so only those two are compared. Empty input yields `""`.
pub fn common_prefix<'a>(paths: impl IntoIterator<Item = &'a str>) -> String {
    let mut iter = paths.into_iter();
    let Some(first) = iter.next() else {
        return String::new();
    };
    let (min, max) = iter.fold((first, first), |(min, max), path| {
        (min.min(path), max.max(path))
    });
    let len: usize = min
        .chars()
        .zip(max.chars())
        .take_while(|(a, b)| a == b)
        .map(|(a, _)| a.len_utf8())
        .sum();
    min[..len].to_string()
}

/// Derives the server base from the common prefix.
///
/// When the prefix covers a whole request URL, or runs into a query string,
/// it is clipped back to the end of the URL origin (the first `/` after the
/// host) so every request keeps a real path. Otherwise it is used unchanged.
pub fn server_base(prefix: &str, urls: &BTreeSet<String>) -> String {
    if !urls.contains(prefix) && !prefix.contains('?') {
        return prefix.to_string();
    }
    match origin_end(prefix) {
        Some(end) => prefix[..end].to_string(),
        None => prefix.to_string(),
    }
}

/// Byte offset just past the `/` that ends the scheme and host.
fn origin_end(url: &str) -> Option<usize> {
    let host_start = url.find("://").map_or(0, |i| i + 3);
    url[host_start..]
        .find('/')
        .map(|slash| host_start + slash + 1)
}
