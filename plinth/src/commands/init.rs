use std::path::{Path, PathBuf};

use clap::Args;
use dialoguer::{Select, theme::ColorfulTheme};
use eyre::{Context, Result, bail};
use plinth_core::{File, Overwrite, WriteResult};
use plinth_stack::Stack;

use crate::templates::Template;

#[derive(Args)]
pub struct InitCommand {
    /// Where to write the stack (a directory gets ./stack.toml)
    #[arg(default_value = "stack.toml")]
    pub path: PathBuf,

    /// Starter stack to write
    #[arg(short, long, value_enum)]
    pub template: Option<Template>,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

impl InitCommand {
    pub fn run(&self) -> Result<()> {
        let template = match self.template {
            Some(template) => template,
            None => Self::prompt_template()?,
        };
        let path = Self::resolve_path(&self.path);

        write_template(template, &path, self.force)?;

        println!("Created {} from the {} template", path.display(), template.name());
        println!();
        println!("Next steps:");
        println!("  plinth check -c {}", path.display());
        println!("  plinth build -c {}", path.display());

        Ok(())
    }

    fn prompt_template() -> Result<Template> {
        let items: Vec<_> = Template::ALL.iter().map(|t| t.summary()).collect();
        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Select a starter stack")
            .items(&items)
            .default(0)
            .interact()
            .wrap_err("Failed to get template selection")?;

        Ok(Template::ALL[selection])
    }

    fn resolve_path(path: &Path) -> PathBuf {
        if path.is_dir() {
            path.join("stack.toml")
        } else {
            path.to_path_buf()
        }
    }
}

/// Write a starter stack, refusing to replace an existing file unless forced.
fn write_template(template: Template, path: &Path, force: bool) -> Result<()> {
    // Never write a stack that would not parse
    Stack::from_str_with_filename(template.content(), template.name())
        .map_err(|e| eyre::eyre!("{} template is invalid: {}", template.name(), e))?;

    let overwrite = if force {
        Overwrite::Always
    } else {
        Overwrite::IfMissing
    };

    match File::new(path, template.content()).overwrite(overwrite).write()? {
        WriteResult::Written => Ok(()),
        WriteResult::Skipped => bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        ),
    }
}
