use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    auditor_lib::run().await
}
