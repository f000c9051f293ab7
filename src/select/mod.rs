//! Entry selection
//!
//! Large projects can build a subset of their pages during development.
//! Selection is an injected capability so the pipeline does not depend on
//! a terminal.

use async_trait::async_trait;
use colored::Colorize;
use console::Term;
use tracing::info;

use crate::config::{BuildEnv, MpaOptions, PromptOptions};
use crate::entry::EntryMap;
use crate::error::{MpaError, Result};

/// Picks the entries to keep
#[async_trait]
pub trait EntrySelector: Send + Sync {
    /// Return the chosen subset of `names`.
    async fn select(&self, names: &[String], prompt: &PromptOptions) -> Result<Vec<String>>;
}

/// Keeps every entry
pub struct SelectAll;

#[async_trait]
impl EntrySelector for SelectAll {
    async fn select(&self, names: &[String], _prompt: &PromptOptions) -> Result<Vec<String>> {
        Ok(names.to_vec())
    }
}

/// A selection decided up front (e.g. from the command line)
pub struct FixedSelection(pub Vec<String>);

#[async_trait]
impl EntrySelector for FixedSelection {
    async fn select(&self, _names: &[String], _prompt: &PromptOptions) -> Result<Vec<String>> {
        Ok(self.0.clone())
    }
}

/// Asks on the terminal
pub struct TerminalSelector;

#[async_trait]
impl EntrySelector for TerminalSelector {
    async fn select(&self, names: &[String], prompt: &PromptOptions) -> Result<Vec<String>> {
        let names = names.to_vec();
        let prompt = prompt.clone();

        tokio::task::spawn_blocking(move || prompt_on_terminal(&names, &prompt))
            .await
            .map_err(|e| MpaError::Selection(e.to_string()))?
    }
}

/// Drop the entries the selector did not pick.
///
/// Only runs in development, with `selectEntry` set and more than one
/// entry. Entries are never added.
pub async fn prune(
    mut entries: EntryMap,
    options: &MpaOptions,
    env: &BuildEnv,
    selector: &dyn EntrySelector,
) -> Result<EntryMap> {
    let Some(prompt) = options.select_entry.prompt() else {
        return Ok(entries);
    };
    if !env.is_development() || entries.len() <= 1 {
        return Ok(entries);
    }

    let names: Vec<String> = entries.keys().cloned().collect();
    let selected = selector.select(&names, &prompt).await?;

    entries.retain(|name, _| selected.contains(name));
    if entries.is_empty() {
        return Err(MpaError::Selection("Please choose at least one".to_string()));
    }

    info!("Building {} of {} entries", entries.len(), names.len());
    Ok(entries)
}

fn prompt_on_terminal(names: &[String], prompt: &PromptOptions) -> Result<Vec<String>> {
    let term = Term::stderr();
    if !term.is_term() {
        return Err(MpaError::Selection(
            "interactive entry selection needs a terminal".to_string(),
        ));
    }

    let page_size = prompt.page_size.max(1);

    loop {
        term.write_line(&format!("{} {}", "?".green(), prompt.message.bold()))?;

        for (page, chunk) in names.chunks(page_size).enumerate() {
            if page > 0 {
                term.write_str(&format!("  {} ", "(enter for more)".dimmed()))?;
                term.read_line()?;
            }
            for (i, name) in chunk.iter().enumerate() {
                let index = page * page_size + i + 1;
                term.write_line(&format!("  {:>3}) {}", index, name))?;
            }
        }

        term.write_str(&format!(
            "  {} ",
            "Numbers, ranges (2-4) or names, comma separated; * for all:".dimmed()
        ))?;
        let input = term.read_line()?;

        match parse_selection(&input, names) {
            Ok(selected) => return Ok(selected),
            Err(message) => term.write_line(&format!("  {} {}", ">>".red(), message))?,
        }
    }
}

/// Parse an answer like `1, 3-4, about` against the listed names.
pub fn parse_selection(input: &str, names: &[String]) -> std::result::Result<Vec<String>, String> {
    let mut picked = vec![false; names.len()];

    for token in input.split([',', ' ']).map(str::trim).filter(|t| !t.is_empty()) {
        if token == "*" {
            picked.iter_mut().for_each(|p| *p = true);
            continue;
        }

        if let Some(i) = names.iter().position(|name| name == token) {
            picked[i] = true;
            continue;
        }

        let (start, end) = match token.split_once('-') {
            Some((a, b)) => (a.parse::<usize>(), b.parse::<usize>()),
            None => (token.parse::<usize>(), token.parse::<usize>()),
        };
        match (start, end) {
            (Ok(start), Ok(end)) if start >= 1 && start <= end && end <= names.len() => {
                for p in &mut picked[start - 1..end] {
                    *p = true;
                }
            }
            _ => return Err(format!("Unknown entry: {}", token)),
        }
    }

    let selected: Vec<String> = names
        .iter()
        .zip(picked)
        .filter_map(|(name, picked)| picked.then(|| name.clone()))
        .collect();

    if selected.is_empty() {
        Err("Please choose at least one".to_string())
    } else {
        Ok(selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn entries(list: &[&str]) -> EntryMap {
        list.iter()
            .map(|name| {
                (
                    name.to_string(),
                    crate::entry::EntrySpec::Single(format!("src/{}.js", name)),
                )
            })
            .collect()
    }

    fn selecting() -> MpaOptions {
        MpaOptions::from_value(&json!({ "selectEntry": true })).unwrap()
    }

    #[test]
    fn test_parse_selection() {
        let list = names(&["home", "about", "cart", "blog"]);

        assert_eq!(parse_selection("1, 3", &list).unwrap(), names(&["home", "cart"]));
        assert_eq!(parse_selection("2-4", &list).unwrap(), names(&["about", "cart", "blog"]));
        assert_eq!(parse_selection("blog home", &list).unwrap(), names(&["home", "blog"]));
        assert_eq!(parse_selection("*", &list).unwrap(), list);
    }

    #[test]
    fn test_parse_selection_requires_one() {
        let list = names(&["home", "about"]);

        assert_eq!(parse_selection("  ", &list).unwrap_err(), "Please choose at least one");
        assert_eq!(parse_selection("7", &list).unwrap_err(), "Unknown entry: 7");
        assert_eq!(parse_selection("2-1", &list).unwrap_err(), "Unknown entry: 2-1");
    }

    #[tokio::test]
    async fn test_prune_keeps_selected_in_order() {
        let selector = FixedSelection(names(&["cart", "home", "missing"]));
        let kept = prune(
            entries(&["home", "about", "cart"]),
            &selecting(),
            &BuildEnv::development(),
            &selector,
        )
        .await
        .unwrap();

        assert_eq!(kept.keys().collect::<Vec<_>>(), vec!["home", "cart"]);
    }

    #[tokio::test]
    async fn test_prune_rejects_empty_selection() {
        let err = prune(
            entries(&["home", "about"]),
            &selecting(),
            &BuildEnv::development(),
            &FixedSelection(Vec::new()),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, MpaError::Selection(_)));
    }

    #[tokio::test]
    async fn test_prune_is_skipped_outside_development() {
        let all = entries(&["home", "about"]);
        let kept = prune(
            all.clone(),
            &selecting(),
            &BuildEnv::default(),
            &FixedSelection(Vec::new()),
        )
        .await
        .unwrap();

        assert_eq!(kept, all);
    }

    #[tokio::test]
    async fn test_prune_is_skipped_for_single_entry_or_no_option() {
        let single = entries(&["home"]);
        let kept = prune(
            single.clone(),
            &selecting(),
            &BuildEnv::development(),
            &FixedSelection(Vec::new()),
        )
        .await
        .unwrap();
        assert_eq!(kept, single);

        let all = entries(&["home", "about"]);
        let kept = prune(
            all.clone(),
            &MpaOptions::default(),
            &BuildEnv::development(),
            &FixedSelection(Vec::new()),
        )
        .await
        .unwrap();
        assert_eq!(kept, all);
    }

    #[tokio::test]
    async fn test_select_all() {
        let list = names(&["a", "b"]);
        let selected = SelectAll
            .select(&list, &PromptOptions::default())
            .await
            .unwrap();
        assert_eq!(selected, list);
    }
}
