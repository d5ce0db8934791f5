use std::{collections::HashSet, sync::LazyLock};

use regex::Regex;
use url::Url;

/// The menu index page itself; it links to every menu but is not one.
pub const LANDING_PATH: &str = "/menu-semanal";

static WEEKLY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)/menu-semana-\d+").expect("weekly menu pattern"));

static SPECIAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)/menu/[^/]|/menu-especial|/menu-[a-z]+-\d{4}").expect("special menu pattern")
});

static WEEK_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)semana[- ]?(\d+)").expect("week number pattern"));

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuKind {
    Weekly,
    Special,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuLink {
    pub kind: MenuKind,
    pub week: Option<u32>,
    pub url: Url,
    pub title: String,
}

/// Classifies a link found on the menu index. Returns `None` for anything
/// that is not a menu page.
pub fn classify_link(href: &str, text: &str) -> Option<(MenuKind, Option<u32>)> {
    let kind = if WEEKLY_RE.is_match(href) {
        MenuKind::Weekly
    } else if SPECIAL_RE.is_match(href) {
        MenuKind::Special
    } else {
        return None;
    };

    Some((kind, week_number(&format!("{href} {text}"))))
}

/// Week number announced by a link or title ("menu-semana-7", "Semana 7").
pub fn week_number(text: &str) -> Option<u32> {
    WEEK_NUMBER_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

fn is_landing(url: &Url, base: &Url) -> bool {
    url.host_str() == base.host_str() && url.path().trim_end_matches('/') == LANDING_PATH
}

/// Resolves, filters and orders the `(href, text)` links of the menu index:
/// weekly menus newest first, then special menus in page order.
pub fn discover_menus(base: &Url, links: &[(String, String)]) -> Vec<MenuLink> {
    let mut seen = HashSet::new();
    let mut weekly = Vec::new();
    let mut special = Vec::new();

    for (href, text) in links {
        let url = match base.join(href) {
            Ok(url) => url,
            Err(err) => {
                tracing::debug!(href = %href, error = %err, "menu link ignored");
                continue;
            }
        };

        if is_landing(&url, base) {
            continue;
        }

        let Some((kind, week)) = classify_link(url.path(), text) else {
            continue;
        };

        let dedup_key = format!(
            "{}{}",
            url.origin().ascii_serialization(),
            url.path().trim_end_matches('/')
        );
        if !seen.insert(dedup_key) {
            continue;
        }

        let link = MenuLink {
            kind,
            week,
            url,
            title: text.trim().to_owned(),
        };

        match kind {
            MenuKind::Weekly => weekly.push(link),
            MenuKind::Special => special.push(link),
        }
    }

    weekly.sort_by(|a, b| b.week.cmp(&a.week));
    weekly.extend(special);

    tracing::debug!(menus = weekly.len(), "menus discovered");

    weekly
}

/// Highest weekly menu number, special menus ignored.
pub fn latest_weekly(menus: &[MenuLink]) -> Option<u32> {
    menus
        .iter()
        .filter(|menu| menu.kind == MenuKind::Weekly)
        .filter_map(|menu| menu.week)
        .max()
}
