use super::{require_category, AppContext, Session, TiosaCommand};
use serde::{Deserialize, Serialize};
use tiosa::error::Result;

/// Search and category filter over the synced bookmark list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListCommand {
    pub query: Option<String>,
    pub category: Option<String>,
}

impl ListCommand {
    /// Synced session with this command's filters applied
    fn filtered_session<'a>(&self, ctx: &AppContext<'a>) -> Result<Session<'a>> {
        let mut ctl = ctx.session();
        if let Some(category) = &self.category {
            require_category(&ctl, category)?;
            ctl.set_active_category(category);
        }
        if let Some(query) = &self.query {
            ctl.set_search_query(query);
        }
        Ok(ctl)
    }
}

impl TiosaCommand for ListCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let ctl = self.filtered_session(ctx)?;
        let visible = ctl.visible_bookmarks();
        ctx.format
            .print_bookmarks(&visible, ctl.categories(), ctx.no_color);
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoriesCommand;

impl TiosaCommand for CategoriesCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let ctl = ctx.session();
        ctx.format
            .print_categories(ctl.categories(), ctl.bookmarks(), ctx.no_color);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::TestEnv;
    use crate::format::OutputFormat;
    use rstest::rstest;
    use tiosa::error::TiosaError;

    #[rstest]
    #[case(None, None, vec!["1", "2", "3", "4"])]
    #[case(Some("git"), None, vec!["1"])]
    #[case(Some("git"), Some("design"), vec![])]
    #[case(None, Some("design"), vec!["2", "4"])]
    #[case(Some("ui"), Some("design"), vec!["2"])]
    #[case(Some("AI"), None, vec!["3"])]
    fn test_list_command(
        #[case] query: Option<&str>,
        #[case] category: Option<&str>,
        #[case] expected: Vec<&str>,
    ) {
        let env = TestEnv::new();
        let cmd = ListCommand {
            query: query.map(String::from),
            category: category.map(String::from),
        };
        let ctx = env.ctx();
        assert!(cmd.execute(&ctx).is_ok());

        let ctl = cmd.filtered_session(&ctx).unwrap();
        let visible = ctl.visible_bookmarks();
        let ids: Vec<&str> = visible.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, expected);

        let rendered = OutputFormat::Plain.render_bookmarks(&visible, ctl.categories(), true);
        for b in &visible {
            assert!(rendered.contains(&format!("{}. {}", b.id, b.title)));
        }
        if expected.is_empty() {
            assert!(rendered.is_empty());
        }
    }

    #[test]
    fn test_list_unknown_category() {
        let env = TestEnv::new();
        let cmd = ListCommand {
            query: None,
            category: Some("missing".into()),
        };
        assert!(matches!(cmd.execute(&env.ctx()), Err(TiosaError::NotFound(_))));
    }

    #[test]
    fn test_categories_command() {
        let env = TestEnv::new();
        assert!(CategoriesCommand.execute(&env.ctx()).is_ok());
    }
}
