use std::{env, env::VarError};

/// None of the services take command line arguments. If any are given, print the help text and the current
/// environment instead, and let the caller exit.
pub fn handle_command_line_args(readme: &str, envs: &[&str]) -> bool {
    let has_cli_args = env::args().count() > 1;
    if has_cli_args {
        println!("\n{readme}\n");
        display_envs(envs);
    }
    has_cli_args
}

/// Prints the given environment variables. Be explicit about which variables are passed in, so as to avoid
/// accidentally exposing secrets.
pub fn display_envs(envs: &[&str]) {
    println!("Current environment values (EXCLUDING variables that contain secrets):");
    envs.iter().for_each(|&name| {
        let val = match env::var(name) {
            Ok(s) => s,
            Err(VarError::NotPresent) => "Not set".into(),
            Err(VarError::NotUnicode(s)) => format!("Invalid value: {}", s.to_string_lossy()),
        };
        println!("  {name:<35} {val:<15}");
    })
}
