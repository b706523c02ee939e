//! Review command - review a repository from the terminal

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use gradr_core::{Config, ReviewVerdict, Secrets};

use crate::pipeline::{DefaultPipeline, ReviewInput};

/// Arguments for the review command
#[derive(Args, Debug)]
pub struct ReviewArgs {
    /// Repository URL (e.g. https://github.com/owner/repo)
    #[arg(required = true)]
    pub repository: String,

    /// Assignment description
    #[arg(short, long, required_unless_present = "assignment_file", conflicts_with = "assignment_file")]
    pub assignment: Option<String>,

    /// Read the assignment description from a file
    #[arg(long)]
    pub assignment_file: Option<PathBuf>,

    /// Candidate level (Junior, Middle, Senior)
    #[arg(short, long, default_value = "Junior")]
    pub level: String,

    /// Print the verdict as JSON
    #[arg(long)]
    pub json: bool,
}

impl ReviewArgs {
    /// Execute the review command
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let assignment_description = self.assignment_description()?;

        let secrets = Secrets::load()?;
        let github_token = secrets.github_token().context(
            "GitHub token not found. Set GITHUB_TOKEN or add it to ~/.config/gradr/secrets.toml",
        )?;
        let api_key = secrets.openai_api_key().context(
            "OpenAI API key not found. Set OPENAI_API_KEY or add it to ~/.config/gradr/secrets.toml",
        )?;

        let input = ReviewInput {
            assignment_description,
            github_repo_url: self.repository.clone(),
            candidate_level: self.level.clone(),
        };

        let pipeline = DefaultPipeline::from_config(config)?;
        let verdict = pipeline.run(&input, &github_token, &api_key).await?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&verdict)?);
        } else {
            print_verdict(&self.repository, &verdict);
        }

        Ok(())
    }

    /// Inline assignment text, or the contents of `--assignment-file`
    fn assignment_description(&self) -> anyhow::Result<String> {
        match (&self.assignment, &self.assignment_file) {
            (Some(text), _) => Ok(text.clone()),
            (None, Some(path)) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read assignment file {}", path.display())),
            (None, None) => anyhow::bail!("An assignment description is required"),
        }
    }
}

fn print_verdict(repository: &str, verdict: &ReviewVerdict) {
    println!("Review of {}", repository);
    println!("==========={}", "=".repeat(repository.len()));
    println!();
    println!("Rating: {}", verdict.rating);
    println!();
    println!("Files ({}):", verdict.found_files.len());
    for file in &verdict.found_files {
        println!("  {}", file);
    }
    print_list("Downsides", &verdict.downsides);
    print_list("Suggestions", &verdict.suggestions);
    println!();
    println!("Conclusion:");
    println!("  {}", verdict.conclusions);
}

fn print_list(title: &str, items: &[String]) {
    println!();
    println!("{}:", title);
    if items.is_empty() {
        println!("  (none)");
    }
    for item in items {
        println!("  - {}", item);
    }
}
