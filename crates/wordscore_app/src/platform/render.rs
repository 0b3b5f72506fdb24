use serde::{Deserialize, Serialize};
use wordscore_core::AppViewModel;

/// How the visited pages are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PageListStyle {
    /// One `- page` line per page.
    #[default]
    List,
    /// All pages on one comma-separated line.
    Inline,
}

/// Renders the result area as terminal lines. Empty while the area is hidden.
pub fn render(view: &AppViewModel, style: PageListStyle) -> Vec<String> {
    if !view.result_visible {
        return Vec::new();
    }

    let mut lines = vec![view.status.clone()];
    if let Some(total) = view.total_occurrences {
        lines.push(format!("Total Occurrences: {total}"));
        match style {
            PageListStyle::List => {
                lines.push("Pages Visited:".to_string());
                lines.extend(view.pages.iter().map(|page| format!("  - {page}")));
            }
            PageListStyle::Inline => {
                lines.push(format!("Pages Visited: {}", view.pages.join(", ")));
            }
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wordscore_core::{Phase, MSG_COMPLETED, MSG_PROCESSING};

    fn completed_view() -> AppViewModel {
        AppViewModel {
            phase: Phase::Succeeded,
            result_visible: true,
            status: MSG_COMPLETED.to_string(),
            total_occurrences: Some(42),
            pages: vec!["/a".to_string(), "/b".to_string()],
            ..AppViewModel::default()
        }
    }

    #[test]
    fn hidden_result_renders_nothing() {
        assert!(render(&AppViewModel::default(), PageListStyle::List).is_empty());
    }

    #[test]
    fn processing_renders_status_only() {
        let view = AppViewModel {
            phase: Phase::Polling,
            result_visible: true,
            status: MSG_PROCESSING.to_string(),
            ..AppViewModel::default()
        };
        assert_eq!(render(&view, PageListStyle::List), vec![MSG_PROCESSING]);
    }

    #[test]
    fn success_as_list() {
        assert_eq!(
            render(&completed_view(), PageListStyle::List),
            vec![
                "Completed!",
                "Total Occurrences: 42",
                "Pages Visited:",
                "  - /a",
                "  - /b",
            ]
        );
    }

    #[test]
    fn success_inline() {
        let text = render(&completed_view(), PageListStyle::Inline).join("\n");
        assert!(text.contains("42"));
        assert!(text.contains("Pages Visited: /a, /b"));
    }
}
