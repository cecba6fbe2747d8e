use std::process::ExitCode;

fn main() -> ExitCode {
    match ecommerce_dashboard_lib::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
