use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(ValueEnum, Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[value(alias = "ext")]
    Extension,
    #[value(alias = "wf")]
    Workflow,
}

#[derive(Parser, Debug)]
#[command(name = "promptforge", version, about = "Generate Chrome extensions and n8n workflows from natural-language prompts")]
pub struct Args {
    #[arg(long, value_enum, default_value_t = Mode::Extension)]
    pub mode: Mode,

    /// What to build, in plain language.
    #[arg(long)]
    pub prompt: String,

    #[arg(long, default_value = "gemini-1.5-flash")]
    pub model: String,

    /// Where to write the archive (extension mode) or JSON (workflow mode).
    #[arg(long)]
    pub out: Option<String>,

    #[arg(long, default_value = ".")]
    pub root: String,

    #[arg(long, default_value_t = 120)]
    pub timeout_secs: u64,

    #[arg(long, default_value_t = true)]
    pub save_response: bool,

    #[arg(long, default_value_t = false)]
    pub debug: bool,
}
