//! # Mercat Entry Point
//!
//! The actual setup is in lib.rs for better testability.

fn main() -> anyhow::Result<()> {
    mercat_shell::run()
}
