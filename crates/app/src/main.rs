// CLI modules
mod args;
mod op;
mod ops;
mod process;
mod state;

use args::Args;
use clap::{Parser, Subcommand};
use op::Op;
use ops::{Decrypt, Encrypt, Init, Keygen, Tip, Version};

command_enum! {
    (Decrypt, Decrypt),
    (Encrypt, Encrypt),
    (Init, Init),
    (Keygen, Keygen),
    (Tip, Tip),
    (Version, Version),
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let guard = process::init_logging(&args.log_level);

    let code = run(args).await;

    // Flush buffered log lines before exit skips destructors
    drop(guard);
    std::process::exit(code);
}

async fn run(args: Args) -> i32 {
    let ctx = match op::OpContext::new(args.config_path) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error: Failed to load config: {}", e);
            return 1;
        }
    };

    match args.command.execute(&ctx).await {
        Ok(output) => {
            println!("{}", output);
            0
        }
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("Error: {}", e);
            1
        }
    }
}
