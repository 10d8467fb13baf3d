//! emulator-ctl: command-line control for the Azure Storage Emulator.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::FmtSubscriber;

use storage_emulator_automation::{
    Action, Args, AutomationResult, ClearTarget, Config, EmulatorClient, EmulatorCommand,
    EmulatorStatus,
};

fn main() -> ExitCode {
    // Parse command-line arguments
    let args = Args::parse();

    // Set up logging; RUST_LOG overrides --debug / --silent
    let rust_log = std::env::var("RUST_LOG").ok();
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(args.log_filter(rust_log.as_deref()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    let client = EmulatorClient::new(&Config::from(&args));

    match run(&client, &args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(client: &EmulatorClient, args: &Args) -> AutomationResult<()> {
    match args.action {
        Action::Init => client.init(),
        Action::Start => {
            if client.start()? {
                println!("Storage emulator started");
            } else {
                println!("Storage emulator is already running");
            }
            Ok(())
        }
        Action::Stop => client.stop(),
        Action::Status => {
            let status = client.status()?;
            print_status(&status, args.json);
            Ok(())
        }
        Action::Clear { target } => {
            match target {
                ClearTarget::All => client.clear_all()?,
                ClearTarget::Blob => client.clear_blobs()?,
                ClearTarget::Table => client.clear_tables()?,
                ClearTarget::Queue => client.clear_queues()?,
            }
            println!("Storage emulator: `{}` done", EmulatorCommand::from(target));
            Ok(())
        }
    }
}

fn print_status(status: &EmulatorStatus, json: bool) {
    if json {
        match serde_json::to_string_pretty(status) {
            Ok(body) => println!("{}", body),
            Err(e) => eprintln!("error: {}", e),
        }
        return;
    }

    println!(
        "Storage emulator is {}",
        if status.is_running { "running" } else { "not running" }
    );
    let endpoints = [
        ("Blob", &status.blob_endpoint),
        ("Queue", &status.queue_endpoint),
        ("Table", &status.table_endpoint),
    ];
    for (service, endpoint) in endpoints {
        if let Some(url) = endpoint {
            println!("  {:<6}{}", service, url);
        }
    }
}
