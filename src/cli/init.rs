//! Project initialization command

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::config::CONFIG_FILE;

/// Initialize a new multi-page project
#[derive(Args, Debug)]
pub struct InitCommand {
    /// Project directory
    #[arg(default_value = ".")]
    pub name: String,

    /// Use TypeScript
    #[arg(long)]
    pub typescript: bool,

    /// Scan subdirectories of the pages directory
    #[arg(long)]
    pub deep: bool,
}

impl InitCommand {
    pub async fn execute(&self) -> Result<()> {
        let project_dir = Path::new(&self.name);

        eprintln!("{} Initializing new multi-page project...\n", "→".blue());

        if project_dir.join(CONFIG_FILE).exists() {
            anyhow::bail!(
                "{} already exists in {}",
                CONFIG_FILE,
                project_dir.display()
            );
        }

        let pages_dir = project_dir.join("src/pages");
        fs::create_dir_all(&pages_dir).context("Failed to create pages directory")?;

        fs::write(project_dir.join(CONFIG_FILE), self.generate_config())
            .with_context(|| format!("Failed to write {}", CONFIG_FILE))?;
        eprintln!("  {} Created {}", "✓".green(), CONFIG_FILE.cyan());

        let ext = if self.typescript { "ts" } else { "js" };
        for (page, title) in [("index", "Home"), ("about", "About")] {
            let file = format!("{}.{}", page, ext);
            fs::write(pages_dir.join(&file), generate_page(title))
                .with_context(|| format!("Failed to write {}", file))?;
            eprintln!("  {} Created {}", "✓".green(), format!("src/pages/{}", file).cyan());
        }

        fs::write(pages_dir.join("about.ejs"), ABOUT_TEMPLATE)
            .context("Failed to write about.ejs")?;
        eprintln!("  {} Created {}", "✓".green(), "src/pages/about.ejs".cyan());

        eprintln!(
            "\n{} Project initialized successfully!\n",
            "✓".green().bold()
        );

        eprintln!("  Next steps:");
        if self.name != "." {
            eprintln!("    {} cd {}", "→".dimmed(), self.name.cyan());
        }
        eprintln!("    {} component-mpa dev", "→".dimmed());
        eprintln!();

        Ok(())
    }

    fn generate_config(&self) -> String {
        format!(
            r#"# component-mpa configuration

[project]
pages = "src/pages"

[mpa]
deepPageEntry = {deep}
splitChunks = true
html = {{ chunks = ["vendors", "<%= page %>"] }}
"#,
            deep = self.deep,
        )
    }
}

fn generate_page(title: &str) -> String {
    format!(
        r#"const root = document.getElementById('root');

root.innerHTML = `<h1>{title}</h1>`;
"#,
        title = title
    )
}

const ABOUT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8" />
  <title>About</title>
</head>
<body>
  <div id="root"></div>
</body>
</html>
"#;
