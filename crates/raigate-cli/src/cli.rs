use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "raigate")]
#[command(
    author,
    version,
    about = "Responsible-AI guardrails for an HR policy assistant"
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Pipeline configuration file (shield patterns, thresholds, refusals)
    #[arg(short, long, global = true, default_value = "raigate.yaml")]
    pub config: String,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub azure: AzureArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the scripted demo queries and print each outcome
    Demo,

    /// Ask a single question
    Ask {
        /// The employee question
        query: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Serve the pipeline over HTTP
    Serve {
        /// Listen address
        #[arg(short, long, default_value = "127.0.0.1")]
        listen: String,

        /// Listen port
        #[arg(short = 'P', long, default_value = "8080")]
        port: u16,
    },
}

/// Hosted service settings, read from flags or the environment
#[derive(Args, Debug, Clone)]
pub struct AzureArgs {
    /// Azure OpenAI resource endpoint
    #[arg(long, env = "AZURE_OPENAI_ENDPOINT", global = true)]
    pub openai_endpoint: Option<String>,

    /// Azure OpenAI API key
    #[arg(long, env = "AZURE_OPENAI_KEY", hide_env_values = true, global = true)]
    pub openai_key: Option<String>,

    /// Chat model deployment name
    #[arg(long, env = "AZURE_OPENAI_DEPLOYMENT", default_value = "gpt-4o", global = true)]
    pub openai_deployment: String,

    /// Chat completions API version
    #[arg(
        long,
        env = "AZURE_OPENAI_API_VERSION",
        default_value = "2024-08-01-preview",
        global = true
    )]
    pub openai_api_version: String,

    /// Azure AI Search endpoint
    #[arg(long, env = "AZURE_SEARCH_ENDPOINT", global = true)]
    pub search_endpoint: Option<String>,

    /// Azure AI Search key
    #[arg(long, env = "AZURE_SEARCH_KEY", hide_env_values = true, global = true)]
    pub search_key: Option<String>,

    /// Search index holding the policy documents
    #[arg(long, env = "AZURE_SEARCH_INDEX", default_value = "hr-policies", global = true)]
    pub search_index: String,

    /// Azure AI Content Safety endpoint
    #[arg(long, env = "CONTENT_SAFETY_ENDPOINT", global = true)]
    pub content_safety_endpoint: Option<String>,

    /// Azure AI Content Safety key
    #[arg(long, env = "CONTENT_SAFETY_KEY", hide_env_values = true, global = true)]
    pub content_safety_key: Option<String>,
}
