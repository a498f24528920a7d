use std::{env, env::VarError};

/// There's no real CLI for the server, so any argument prints the help and the current configuration.
pub fn handle_command_line_args() -> bool {
    let has_cli_args = env::args().count() > 1;
    if has_cli_args {
        display_readme();
        display_envs();
    }
    has_cli_args
}

fn display_readme() {
    const README: &str = include_str!("./cli-help.txt");
    println!("\n{README}\n");
}

fn display_envs() {
    // Secrets are deliberately absent from this list
    const DISPLAY_ENVS: [&str; 12] = [
        "RUST_LOG",
        "SEVA_HOST",
        "SEVA_PORT",
        "SEVA_DATABASE_URL",
        "SEVA_RAZORPAY_KEY_ID",
        "SEVA_TWILIO_FROM_NUMBER",
        "SEVA_GATEWAY_TIMEOUT",
        "SEVA_SMS_TIMEOUT",
        "SEVA_VERIFY_PAYMENTS",
        "SEVA_RECONCILE_INTERVAL",
        "SEVA_DEFAULT_CURRENCY",
        "SEVA_TWILIO_ACCOUNT_SID",
    ];

    println!("Current environment values (EXCLUDING variables that contain secrets):");
    DISPLAY_ENVS.iter().for_each(|&name| {
        let val = match env::var(name) {
            Ok(s) => s,
            Err(VarError::NotPresent) => "Not set".into(),
            Err(VarError::NotUnicode(s)) => format!("Invalid value: {}", s.to_string_lossy()),
        };
        println!("  {name:<35} {val:<15}");
    })
}
