//! Serve command - run the HTTP review endpoint

use clap::Args;
use gradr_core::Config;

use crate::pipeline::DefaultPipeline;
use crate::server;

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to listen on (overrides config and env)
    #[arg(short, long)]
    pub bind: Option<String>,
}

impl ServeArgs {
    /// Execute the serve command
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let bind = self.bind.as_deref().unwrap_or(&config.server.bind);

        tracing::info!(
            github_api = %config.github.api_url,
            completion_api = %config.completion.api_url,
            model = %config.completion.model,
            "Starting review endpoint"
        );

        let pipeline = DefaultPipeline::from_config(config)?;
        server::serve(pipeline, bind).await
    }
}
