use clap::Parser;
use colored::Colorize;
use std::path::Path;
use uuid::Uuid;

use promptforge::{cli, config, errors, log, pipeline, provider, ux};

#[tokio::main]
async fn main() {
    let args = cli::Args::parse();

    if let Err(err) = run(&args).await {
        let classified = errors::classify(&err);
        if args.debug {
            eprintln!("debug: error chain: {:?}", err);
        }
        eprintln!(
            "{} {} (status {})",
            format!("[{}]", classified.kind()).red().bold(),
            classified.user_message(),
            classified.status()
        );
        std::process::exit(1);
    }
}

async fn run(args: &cli::Args) -> anyhow::Result<()> {
    let cfg = config::Config {
        root: args.root.clone(),
        model: args.model.clone(),
        timeout_secs: args.timeout_secs,
        ..config::Config::default()
    };

    // Fail on bad input before resolving credentials or touching the network.
    pipeline::validate_prompt(&args.prompt)?;

    let txid = Uuid::new_v4();
    if args.debug {
        println!("debug: flag enabled");
        log::print_planned_paths(Path::new(&cfg.root), txid);
    }

    let prov = provider::make_provider(&cfg)?;

    match args.mode {
        cli::Mode::Extension => {
            let output = pipeline::generate_extension(prov.as_ref(), &args.prompt, args.debug).await?;

            let saved = log::save_stage(
                "extension",
                &output.instruction,
                &output.raw,
                txid,
                Path::new(&cfg.root),
                args.save_response,
            )?;
            if args.debug {
                log::print_saved_paths("extension", &saved);
            }

            let out_path = Path::new(&cfg.root)
                .join(args.out.as_deref().unwrap_or(&cfg.archive_name));
            fs_err::write(&out_path, &output.archive)?;
            ux::print_extension_dashboard(&output.files, output.archive.len(), &out_path);
        }
        cli::Mode::Workflow => {
            let output = pipeline::generate_workflow(prov.as_ref(), &args.prompt, args.debug).await?;

            let saved = log::save_stage(
                "workflow",
                &output.instruction,
                &output.raw,
                txid,
                Path::new(&cfg.root),
                args.save_response,
            )?;
            if args.debug {
                log::print_saved_paths("workflow", &saved);
            }

            let rendered = serde_json::to_string_pretty(&output.document)?;
            match &args.out {
                Some(out) => {
                    let out_path = Path::new(&cfg.root).join(out);
                    fs_err::write(&out_path, &rendered)?;
                    println!("wrote workflow to {}", out_path.display());
                }
                None => println!("{rendered}"),
            }
            ux::print_workflow_dashboard(&output.document);
        }
    }

    Ok(())
}
